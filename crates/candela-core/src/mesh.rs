//! Angular meshes on the unit sphere.
//!
//! Far fields and detector responses are sampled on a flat list of
//! (θ, φ) directions: θ is the polar scattering angle measured from the
//! propagation axis, φ the azimuth measured from the source polarization
//! reference, both in radians. Each mesh carries the bare angular element
//! Δθ·Δφ of its grid; the sin θ solid-angle Jacobian is applied exactly
//! once, inside the coupling integrator.

use serde::{Deserialize, Serialize};

/// A structured set of directions on the unit sphere, stored flat.
///
/// Two meshes compare equal when every stored angle and the angular
/// element agree. The far-field cache keys on this value equality, so a
/// rebuilt but identical mesh reuses the cached field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngularMesh {
    /// Polar angles θ (radians), one per sample.
    pub theta: Vec<f64>,
    /// Azimuthal angles φ (radians), one per sample.
    pub phi: Vec<f64>,
    /// Bare angular element Δθ·Δφ of the generating grid.
    pub d_omega: f64,
    /// Largest polar angle of the generating grid (cone half-angle for
    /// detector caps, π for full-sphere meshes).
    pub max_angle: f64,
}

impl AngularMesh {
    /// Full-sphere grid: `n` polar samples over [0, π] crossed with `n`
    /// azimuthal samples over [0, 2π), flattened row-major.
    ///
    /// # Panics
    /// Panics if `n < 2`.
    pub fn full_sphere(n: usize) -> Self {
        Self::grid(n, std::f64::consts::PI)
    }

    /// Spherical-cap grid covering the cone θ ∈ [0, `max_angle`], as seen
    /// by a detector of numerical aperture sin(`max_angle`).
    ///
    /// # Panics
    /// Panics if `n < 2`.
    pub fn spherical_cap(n: usize, max_angle: f64) -> Self {
        Self::grid(n, max_angle)
    }

    fn grid(n: usize, max_angle: f64) -> Self {
        assert!(n >= 2, "mesh needs at least 2 samples per axis");

        let d_theta = max_angle / (n - 1) as f64;
        let d_phi = 2.0 * std::f64::consts::PI / n as f64;

        let mut theta = Vec::with_capacity(n * n);
        let mut phi = Vec::with_capacity(n * n);
        for it in 0..n {
            let t = it as f64 * d_theta;
            for ip in 0..n {
                theta.push(t);
                phi.push(ip as f64 * d_phi);
            }
        }

        Self {
            theta,
            phi,
            d_omega: d_theta * d_phi,
            max_angle,
        }
    }

    /// Number of directions.
    pub fn len(&self) -> usize {
        self.theta.len()
    }

    /// Whether the mesh holds no directions.
    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }

    /// The mesh rotated by the detector offsets (θ₀, φ₀, γ₀).
    ///
    /// γ₀ spins the mesh about its own axis, θ₀ tilts that axis off the
    /// propagation direction, φ₀ swings it in azimuth: each direction is
    /// mapped through $R_z(\varphi_0)\,R_y(\theta_0)\,R_z(\gamma_0)$.
    /// The angular element is unchanged by the rigid rotation.
    pub fn rotated(&self, theta_offset: f64, phi_offset: f64, gamma_offset: f64) -> Self {
        let (sin_t0, cos_t0) = theta_offset.sin_cos();
        let (sin_p0, cos_p0) = phi_offset.sin_cos();
        let (sin_g0, cos_g0) = gamma_offset.sin_cos();

        let mut theta = Vec::with_capacity(self.len());
        let mut phi = Vec::with_capacity(self.len());

        for (&t, &p) in self.theta.iter().zip(self.phi.iter()) {
            let (sin_t, cos_t) = t.sin_cos();
            let (sin_p, cos_p) = p.sin_cos();

            // Unit direction of the un-rotated sample.
            let v = [sin_t * cos_p, sin_t * sin_p, cos_t];

            // R_z(gamma0)
            let v = [
                v[0] * cos_g0 - v[1] * sin_g0,
                v[0] * sin_g0 + v[1] * cos_g0,
                v[2],
            ];
            // R_y(theta0)
            let v = [
                v[0] * cos_t0 + v[2] * sin_t0,
                v[1],
                -v[0] * sin_t0 + v[2] * cos_t0,
            ];
            // R_z(phi0)
            let v = [
                v[0] * cos_p0 - v[1] * sin_p0,
                v[0] * sin_p0 + v[1] * cos_p0,
                v[2],
            ];

            theta.push(v[2].clamp(-1.0, 1.0).acos());
            phi.push(v[1].atan2(v[0]));
        }

        Self {
            theta,
            phi,
            d_omega: self.d_omega,
            max_angle: self.max_angle,
        }
    }
}
