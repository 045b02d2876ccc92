//! Step-index fiber description and LP mode near fields.
//!
//! The weakly-guiding approximation holds for telecom fibers (index
//! contrast ~1e-3), so guided modes are the linearly-polarized LP_{l,m}
//! family. Their transverse profile is modelled here by the
//! Laguerre-Gauss expansion around the Marcuse mode-field radius:
//!
//! $$\psi_{l,m}(r, \varphi) \propto
//!   \Bigl(\tfrac{\sqrt{2}\,r}{w}\Bigr)^{l}
//!   L_{m-1}^{(l)}\!\Bigl(\tfrac{2 r^2}{w^2}\Bigr)
//!   e^{-r^2/w^2} \cos(l\varphi)$$
//!
//! which reproduces the exact LP01 overlap to better than 1% for V in the
//! single-mode band and keeps the l-fold azimuthal symmetry that the
//! coupling integrals are sensitive to.

use ndarray::Array2;
use num_complex::Complex64;

use candela_core::error::CoreError;

/// Mode orientation: which transverse axis the lobe pattern is aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A circular step-index fiber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepIndexFiber {
    /// Core radius (m).
    pub core_radius: f64,
    /// Core refractive index.
    pub core_index: f64,
    /// Cladding refractive index.
    pub clad_index: f64,
}

impl StepIndexFiber {
    /// Corning SMF-28: 8.2 µm core diameter, Δn ≈ 3.1e-3.
    pub fn smf28() -> Self {
        Self {
            core_radius: 4.1e-6,
            core_index: 1.4489,
            clad_index: 1.4444,
        }
    }

    /// Fiber numerical aperture $\sqrt{n_{co}^2 - n_{cl}^2}$.
    pub fn numerical_aperture(&self) -> f64 {
        (self.core_index * self.core_index - self.clad_index * self.clad_index).sqrt()
    }

    /// Normalized frequency $V = k\,a\,\mathrm{NA}$.
    pub fn v_number(&self, wavelength: f64) -> f64 {
        2.0 * std::f64::consts::PI / wavelength * self.core_radius * self.numerical_aperture()
    }

    /// Marcuse mode-field radius
    /// $w = a\,(0.65 + 1.619\,V^{-3/2} + 2.879\,V^{-6})$.
    pub fn mode_field_radius(&self, wavelength: f64) -> f64 {
        let v = self.v_number(wavelength);
        self.core_radius * (0.65 + 1.619 * v.powf(-1.5) + 2.879 * v.powi(-6))
    }

    /// Side length of the square near-field window: ten core diameters,
    /// wide enough that the mode tails are negligible at the boundary.
    pub fn window(&self) -> f64 {
        20.0 * self.core_radius
    }
}

/// Generalized Laguerre polynomial $L_k^{(\alpha)}(x)$ by the standard
/// three-term recurrence.
fn generalized_laguerre(k: usize, alpha: f64, x: f64) -> f64 {
    let mut prev = 1.0;
    if k == 0 {
        return prev;
    }
    let mut curr = 1.0 + alpha - x;
    for i in 2..=k {
        let i = i as f64;
        let next = ((2.0 * i - 1.0 + alpha - x) * curr - (i - 1.0 + alpha) * prev) / i;
        prev = curr;
        curr = next;
    }
    curr
}

/// LP_{l,m} near field on the fiber's square window, sampled on a
/// `sampling × sampling` grid and L1-normalized.
///
/// # Errors
/// [`CoreError::InvalidParameter`] for `m = 0` (radial orders start at 1)
/// or a sampling below 2.
pub fn lp_near_field(
    fiber: &StepIndexFiber,
    wavelength: f64,
    mode: (usize, usize),
    sampling: usize,
    orientation: Orientation,
) -> Result<Array2<Complex64>, CoreError> {
    let (l, m) = mode;
    if m == 0 {
        return Err(CoreError::InvalidParameter {
            name: "mode",
            value: 0.0,
            reason: "LP radial order m starts at 1",
        });
    }
    if sampling < 2 {
        return Err(CoreError::InvalidParameter {
            name: "sampling",
            value: sampling as f64,
            reason: "near-field grid needs at least 2 samples per axis",
        });
    }

    let w = fiber.mode_field_radius(wavelength);
    let window = fiber.window();
    let step = window / (sampling - 1) as f64;

    let mut field = Array2::from_elem((sampling, sampling), Complex64::new(0.0, 0.0));
    for i in 0..sampling {
        let x = -window / 2.0 + i as f64 * step;
        for j in 0..sampling {
            let y = -window / 2.0 + j as f64 * step;

            let r = (x * x + y * y).sqrt();
            let phi = y.atan2(x);
            let rho = 2.0 * r * r / (w * w);

            let radial = (2.0_f64.sqrt() * r / w).powi(l as i32)
                * generalized_laguerre(m - 1, l as f64, rho)
                * (-r * r / (w * w)).exp();
            let azimuthal = (l as f64 * phi).cos();

            field[[i, j]] = Complex64::new(radial * azimuthal, 0.0);
        }
    }

    if orientation == Orientation::Horizontal {
        field = field.t().to_owned();
    }

    let total: f64 = field.iter().map(|v| v.norm()).sum();
    if total > 0.0 {
        field.mapv_inplace(|v| v / total);
    }

    Ok(field)
}
