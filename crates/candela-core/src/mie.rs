//! Mie coefficient sequences for homogeneous spheres.
//!
//! Given the size parameter $x = k r$ and the relative refractive index
//! $M = n_{sphere} / n_{medium}$, the scattered field is expanded in
//! multipoles with coefficients $a_n$, $b_n$ (exterior) and $c_n$, $d_n$
//! (interior). All four follow from the Riccati-Bessel functions at the
//! exterior argument $\alpha = x$ and interior argument $\beta = M x$:
//!
//! $$a_n = \frac{\mu_{sp} \psi_n(\alpha) \psi_n'(\beta)
//!             - \mu M \psi_n'(\alpha) \psi_n(\beta)}
//!            {\mu_{sp} \xi_n(\alpha) \psi_n'(\beta)
//!             - \mu M \xi_n'(\alpha) \psi_n(\beta)}$$
//!
//! with $\mu$, $\mu_{sp}$ the medium/sphere permeabilities (both 1 for
//! non-magnetic media) and the companion formulas for $b_n$, $c_n$, $d_n$.
//!
//! # Reference
//! Bohren & Huffman (1983) §4.4; Gouesbet & Gréhan, *Generalized Lorenz-Mie
//! Theories*, Eq. III.88-91.

use num_complex::Complex64;

use crate::error::CoreError;
use crate::special::{riccati_psi, riccati_xi};

/// The multipole coefficient sequences of a homogeneous sphere.
///
/// Index `i` of each vector holds order `i + 1`; the sequences run from
/// n = 1 to the truncation order chosen at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MieCoefficients {
    /// Electric multipole coefficients of the scattered field.
    pub a: Vec<Complex64>,
    /// Magnetic multipole coefficients of the scattered field.
    pub b: Vec<Complex64>,
    /// Magnetic multipole coefficients of the internal field.
    pub c: Vec<Complex64>,
    /// Electric multipole coefficients of the internal field.
    pub d: Vec<Complex64>,
}

impl MieCoefficients {
    /// Truncation order for a given size parameter (Wiscombe criterion):
    /// $N = \lceil x + 4 x^{1/3} + 2 \rceil$, at least 1.
    ///
    /// Fewer terms under-represent large-particle scattering; many more
    /// waste work and eventually degrade the recursions.
    pub fn max_order(x: f64) -> usize {
        ((x + 4.0 * x.powf(1.0 / 3.0) + 2.0).ceil() as usize).max(1)
    }

    /// Compute the coefficient sequences up to `n_max`.
    ///
    /// # Arguments
    /// * `x` - Size parameter $k r$ (must be > 0).
    /// * `m` - Relative refractive index (Im ≥ 0; gain media are rejected).
    /// * `mu` - Relative permeability of the medium.
    /// * `mu_sp` - Relative permeability of the sphere.
    /// * `n_max` - Truncation order (≥ 1); see [`MieCoefficients::max_order`].
    ///
    /// # Errors
    /// [`CoreError::InvalidParameter`] on non-physical inputs,
    /// [`CoreError::NumericDivergence`] if a denominator underflows to zero.
    pub fn compute(
        x: f64,
        m: Complex64,
        mu: f64,
        mu_sp: f64,
        n_max: usize,
    ) -> Result<Self, CoreError> {
        if !(x > 0.0) {
            return Err(CoreError::InvalidParameter {
                name: "size_parameter",
                value: x,
                reason: "size parameter must be positive",
            });
        }
        if m.im < 0.0 {
            return Err(CoreError::InvalidParameter {
                name: "relative_index",
                value: m.im,
                reason: "negative imaginary part describes a gain medium",
            });
        }
        if n_max == 0 {
            return Err(CoreError::InvalidParameter {
                name: "n_max",
                value: 0.0,
                reason: "at least one multipole order is required",
            });
        }

        let alpha = Complex64::new(x, 0.0);
        let beta = m * x;

        let (psi_a, psi_p_a) = riccati_psi(n_max, alpha);
        let (psi_b, psi_p_b) = riccati_psi(n_max, beta);
        let (xi_a, xi_p_a) = riccati_xi(n_max, x);

        let mut a = Vec::with_capacity(n_max);
        let mut b = Vec::with_capacity(n_max);
        let mut c = Vec::with_capacity(n_max);
        let mut d = Vec::with_capacity(n_max);

        let mu_m = mu * m;

        for n in 1..=n_max {
            let a_num = mu_sp * psi_a[n] * psi_p_b[n] - mu_m * psi_p_a[n] * psi_b[n];
            let a_den = mu_sp * xi_a[n] * psi_p_b[n] - mu_m * xi_p_a[n] * psi_b[n];

            let b_num = mu_m * psi_a[n] * psi_p_b[n] - mu_sp * psi_p_a[n] * psi_b[n];
            let b_den = mu_m * xi_a[n] * psi_p_b[n] - mu_sp * xi_p_a[n] * psi_b[n];

            // Exterior Wronskian xi psi' - xi' psi = -i, kept in functional
            // form so the permeability factors read off the textbook formulas.
            let wronskian = xi_a[n] * psi_p_a[n] - xi_p_a[n] * psi_a[n];

            let c_num = mu_sp * m * wronskian;
            let c_den = a_den;

            let d_num = mu * m * m * wronskian;
            let d_den = mu_m * xi_a[n] * psi_p_b[n] - mu_sp * m * xi_p_a[n] * psi_b[n];

            for den in [a_den, b_den, d_den] {
                if den.norm() == 0.0 {
                    return Err(CoreError::NumericDivergence {
                        order: n,
                        size_parameter: x,
                    });
                }
            }

            a.push(a_num / a_den);
            b.push(b_num / b_den);
            c.push(c_num / c_den);
            d.push(d_num / d_den);
        }

        Ok(Self { a, b, c, d })
    }

    /// Number of multipole orders carried.
    pub fn order(&self) -> usize {
        self.a.len()
    }
}
