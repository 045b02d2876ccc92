//! Far-field synthesis from Mie coefficients.
//!
//! The scattering amplitudes as functions of the polar angle θ
//! (Bohren & Huffman 4.74):
//!
//! $$S_1(\theta) = \sum_n \frac{2n+1}{n(n+1)}
//!   \bigl(a_n \pi_n(\cos\theta) + b_n \tau_n(\cos\theta)\bigr), \qquad
//!   S_2(\theta) = \sum_n \frac{2n+1}{n(n+1)}
//!   \bigl(a_n \tau_n(\cos\theta) + b_n \pi_n(\cos\theta)\bigr)$$
//!
//! summed ascending in n with plain floating accumulation. The complex
//! far-field components on a mesh follow as
//! $E_\parallel = S_2(\theta) \cos\varphi'$ and
//! $E_\perp = S_1(\theta) \sin\varphi'$ with $\varphi' = \varphi - \psi$
//! for a source polarized at angle $\psi$; unpolarized light splits its
//! amplitude evenly between the two channels.

use ndarray::Array1;
use num_complex::Complex64;
use rayon::prelude::*;

use crate::mesh::AngularMesh;
use crate::mie::MieCoefficients;
use crate::special::pi_tau;

/// S1/S2 amplitudes sampled over a set of polar angles.
#[derive(Debug, Clone)]
pub struct ScatteringAmplitudes {
    /// Polar angles θ (radians).
    pub theta: Vec<f64>,
    /// Perpendicular-polarization amplitude S1 at each angle.
    pub s1: Vec<Complex64>,
    /// Parallel-polarization amplitude S2 at each angle.
    pub s2: Vec<Complex64>,
}

/// The complex scattered far field over an angular mesh, split into the
/// two orthogonal polarization channels.
#[derive(Debug, Clone)]
pub struct FarField {
    /// Component polarized parallel to the scattering plane.
    pub parallel: Array1<Complex64>,
    /// Component polarized perpendicular to the scattering plane.
    pub perpendicular: Array1<Complex64>,
    /// The mesh the field is sampled on.
    pub mesh: AngularMesh,
}

impl FarField {
    /// Scattering phase function $|E_\parallel|^2 + |E_\perp|^2$ per
    /// mesh point.
    pub fn intensity(&self) -> Array1<f64> {
        Array1::from_iter(
            self.parallel
                .iter()
                .zip(self.perpendicular.iter())
                .map(|(para, perp)| para.norm_sqr() + perp.norm_sqr()),
        )
    }
}

/// S1 and S2 at a single polar angle.
pub fn s1_s2_at(coeffs: &MieCoefficients, theta: f64) -> (Complex64, Complex64) {
    let (pi, tau) = pi_tau(theta.cos(), coeffs.order());

    let mut s1 = Complex64::new(0.0, 0.0);
    let mut s2 = Complex64::new(0.0, 0.0);
    for (i, (a, b)) in coeffs.a.iter().zip(coeffs.b.iter()).enumerate() {
        let n = (i + 1) as f64;
        let prefactor = (2.0 * n + 1.0) / (n * (n + 1.0));
        s1 += prefactor * (*a * pi[i] + *b * tau[i]);
        s2 += prefactor * (*a * tau[i] + *b * pi[i]);
    }
    (s1, s2)
}

/// S1 and S2 over a slice of polar angles.
pub fn s1_s2(coeffs: &MieCoefficients, theta: &[f64]) -> ScatteringAmplitudes {
    let (s1, s2) = theta
        .par_iter()
        .map(|&t| s1_s2_at(coeffs, t))
        .unzip::<_, _, Vec<_>, Vec<_>>();

    ScatteringAmplitudes {
        theta: theta.to_vec(),
        s1,
        s2,
    }
}

/// Synthesize the complex far field on a mesh.
///
/// The dominant-cost path: every mesh point evaluates the full multipole
/// sum. Points are independent and are mapped in parallel; the summation
/// over n stays ascending within each point.
pub fn synthesize(
    coeffs: &MieCoefficients,
    mesh: &AngularMesh,
    polarization: Option<f64>,
) -> FarField {
    let components: Vec<(Complex64, Complex64)> = (0..mesh.len())
        .into_par_iter()
        .map(|i| {
            let (s1, s2) = s1_s2_at(coeffs, mesh.theta[i]);
            match polarization {
                Some(psi) => {
                    let (sin_p, cos_p) = (mesh.phi[i] - psi).sin_cos();
                    (s2 * cos_p, s1 * sin_p)
                }
                None => {
                    let split = std::f64::consts::FRAC_1_SQRT_2;
                    (s2 * split, s1 * split)
                }
            }
        })
        .collect();

    let (parallel, perpendicular): (Vec<_>, Vec<_>) = components.into_iter().unzip();

    FarField {
        parallel: Array1::from_vec(parallel),
        perpendicular: Array1::from_vec(perpendicular),
        mesh: mesh.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coeffs() -> MieCoefficients {
        MieCoefficients::compute(3.927, Complex64::new(1.4, 0.0), 1.0, 1.0, 10).unwrap()
    }

    #[test]
    fn forward_amplitudes_coincide() {
        // At theta = 0 the two polarizations are indistinguishable:
        // S1(0) = S2(0) = 1/2 sum (2n+1)(a_n + b_n).
        let c = coeffs();
        let (s1, s2) = s1_s2_at(&c, 0.0);
        assert!((s1 - s2).norm() < 1e-10);

        let mut expected = Complex64::new(0.0, 0.0);
        for (i, (a, b)) in c.a.iter().zip(c.b.iter()).enumerate() {
            let n = (i + 1) as f64;
            expected += 0.5 * (2.0 * n + 1.0) * (*a + *b);
        }
        assert!((s1 - expected).norm() < 1e-10);
    }

    #[test]
    fn backward_amplitudes_are_opposite() {
        // At theta = pi, S1 = -S2 by the parity of pi_n and tau_n.
        let c = coeffs();
        let (s1, s2) = s1_s2_at(&c, std::f64::consts::PI);
        assert!((s1 + s2).norm() < 1e-10);
    }

    #[test]
    fn polarized_field_follows_the_scattering_plane() {
        let c = coeffs();
        let mesh = AngularMesh::full_sphere(8);
        let field = synthesize(&c, &mesh, Some(0.0));

        // phi = 0 lies in the polarization plane: perpendicular channel
        // vanishes there.
        for i in 0..mesh.len() {
            if mesh.phi[i].abs() < 1e-12 {
                assert!(field.perpendicular[i].norm() < 1e-10);
            }
        }
    }

    #[test]
    fn unpolarized_intensity_is_azimuth_independent() {
        let c = coeffs();
        let mesh = AngularMesh::full_sphere(10);
        let field = synthesize(&c, &mesh, None);
        let intensity = field.intensity();

        // Same theta row, different phi: identical intensity.
        let row = 5 * 10;
        for i in row + 1..row + 10 {
            assert!((intensity[i] - intensity[row]).abs() < 1e-12 * intensity[row].max(1e-300));
        }
    }

    #[test]
    fn amplitude_batch_matches_pointwise() {
        let c = coeffs();
        let angles = [0.1, 0.7, 2.4];
        let amplitudes = s1_s2(&c, &angles);
        for (i, &t) in angles.iter().enumerate() {
            let (s1, s2) = s1_s2_at(&c, t);
            assert!((amplitudes.s1[i] - s1).norm() < 1e-14);
            assert!((amplitudes.s2[i] - s2).norm() < 1e-14);
        }
    }
}
