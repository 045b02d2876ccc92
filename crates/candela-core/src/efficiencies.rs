//! Scattering, extinction and absorption efficiencies.
//!
//! The multipole sums (Bohren & Huffman 4.61-4.62):
//!
//! $$Q_{ext} = \frac{2}{x^2} \sum_n (2n+1)\,\mathrm{Re}(a_n + b_n), \qquad
//!   Q_{sca} = \frac{2}{x^2} \sum_n (2n+1)\,(|a_n|^2 + |b_n|^2)$$
//!
//! and $Q_{abs} = Q_{ext} - Q_{sca}$, which vanishes for lossless spheres.

use serde::{Deserialize, Serialize};

use crate::mie::MieCoefficients;

/// Dimensionless optical efficiencies of a single scatterer.
///
/// Multiplying by the geometric cross-section $\pi r^2$ gives the
/// corresponding cross-sections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Efficiencies {
    /// Scattering efficiency.
    pub qsca: f64,
    /// Extinction efficiency.
    pub qext: f64,
    /// Absorption efficiency, $Q_{ext} - Q_{sca}$.
    pub qabs: f64,
}

/// Reduce a coefficient sequence to its efficiencies.
///
/// Pure function of the sequence and the size parameter; the owning
/// scatterer caches the result.
pub fn efficiencies(coeffs: &MieCoefficients, x: f64) -> Efficiencies {
    let prefactor = 2.0 / (x * x);

    let mut ext = 0.0;
    let mut sca = 0.0;
    for (i, (a, b)) in coeffs.a.iter().zip(coeffs.b.iter()).enumerate() {
        let weight = (2 * (i + 1) + 1) as f64;
        ext += weight * (a.re + b.re);
        sca += weight * (a.norm_sqr() + b.norm_sqr());
    }

    let qext = prefactor * ext;
    let qsca = prefactor * sca;

    Efficiencies {
        qsca,
        qext,
        qabs: qext - qsca,
    }
}
