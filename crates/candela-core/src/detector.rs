//! Detector angular responses.
//!
//! A detector is a value object: an angular response sampled on its own
//! spherical-cap mesh, together with the bookkeeping the coupling integral
//! needs (coupling kind, aggregation policy, polarization filter).
//!
//! Two kinds exist. A **photodiode** collects power with no phase
//! sensitivity; its response is uniform over the numerical-aperture cone.
//! A **mode detector** (e.g. a fiber LP mode) couples coherently; its
//! response is a complex far-field diffraction pattern supplied by an
//! external mode-field layer as a square grid, which this module only
//! interpolates onto the cap mesh. How that grid was produced is none of
//! this module's business.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::coupling;
use crate::error::CoreError;
use crate::mesh::AngularMesh;
use crate::scatterer::Sphere;

/// How the detector combines the scattered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouplingKind {
    /// Power detector: phase-insensitive, integrates intensity.
    Intensity,
    /// Coherent mode detector: integrates the complex amplitude overlap
    /// before squaring.
    Amplitude,
}

/// How the coupling integral aggregates over the detector position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouplingPolicy {
    /// Evaluate once at the nominal (offset) detector position.
    Centered,
    /// Incoherent average, insensitive to placement phase; the tolerant
    /// estimate for a detector of uncertain alignment.
    Mean,
}

/// Angular placement and sampling of a detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorGeometry {
    /// Numerical aperture, sine of the acceptance half-angle.
    /// Valid range (0.01, 0.99]; out-of-range values are rejected.
    pub numerical_aperture: f64,
    /// Samples per mesh axis inside the aperture cone.
    pub sampling: usize,
    /// Polar offset θ₀ of the detector axis (radians).
    pub theta_offset: f64,
    /// Azimuthal offset φ₀ of the detector axis (radians).
    pub phi_offset: f64,
    /// Spin γ₀ of the detector about its own axis (radians).
    pub gamma_offset: f64,
}

impl Default for DetectorGeometry {
    fn default() -> Self {
        Self {
            numerical_aperture: 0.2,
            sampling: 200,
            theta_offset: 0.0,
            phi_offset: 0.0,
            gamma_offset: 0.0,
        }
    }
}

/// A detector response sampled on its angular mesh.
#[derive(Debug, Clone)]
pub struct Detector {
    kind: CouplingKind,
    policy: CouplingPolicy,
    geometry: DetectorGeometry,
    max_angle: f64,
    filter: Option<f64>,
    mesh: AngularMesh,
    response: Array1<Complex64>,
}

impl Detector {
    /// Photodiode: uniform unit response over the aperture cone.
    pub fn photodiode(
        geometry: DetectorGeometry,
        filter: Option<f64>,
        policy: CouplingPolicy,
    ) -> Result<Self, CoreError> {
        let max_angle = validate_aperture(geometry.numerical_aperture)?;

        let base = AngularMesh::spherical_cap(geometry.sampling, max_angle);
        let response = Array1::from_elem(base.len(), Complex64::new(1.0, 0.0));
        let mesh = base.rotated(
            geometry.theta_offset,
            geometry.phi_offset,
            geometry.gamma_offset,
        );

        Ok(Self {
            kind: CouplingKind::Intensity,
            policy,
            geometry,
            max_angle,
            filter,
            mesh,
            response,
        })
    }

    /// Coherent mode detector from an externally produced far-field grid.
    ///
    /// `far_field` is a square complex grid spanning the aperture cone
    /// (centre pixel = detector axis, edge midpoint = acceptance
    /// half-angle). Each cap-mesh direction is projected back onto the
    /// grid's tangent plane and sampled bilinearly; directions outside the
    /// grid hull clamp to the nearest edge value so no NaN can reach the
    /// coupling integral.
    pub fn mode(
        far_field: &Array2<Complex64>,
        geometry: DetectorGeometry,
        filter: Option<f64>,
        policy: CouplingPolicy,
    ) -> Result<Self, CoreError> {
        let max_angle = validate_aperture(geometry.numerical_aperture)?;

        let base = AngularMesh::spherical_cap(geometry.sampling, max_angle);
        let mut response = Array1::from_elem(base.len(), Complex64::new(0.0, 0.0));
        for i in 0..base.len() {
            let (u, v) = tangent_project(base.theta[i], base.phi[i], max_angle)?;
            response[i] = bilinear(far_field, u, v);
        }

        let mesh = base.rotated(
            geometry.theta_offset,
            geometry.phi_offset,
            geometry.gamma_offset,
        );

        Ok(Self {
            kind: CouplingKind::Amplitude,
            policy,
            geometry,
            max_angle,
            filter,
            mesh,
            response,
        })
    }

    /// Coupling of this detector against a scatterer's far field.
    pub fn coupling(&self, scatterer: &Sphere) -> Result<f64, CoreError> {
        coupling::coupling(self, scatterer)
    }

    /// Coupling kind (intensity or amplitude).
    pub fn kind(&self) -> CouplingKind {
        self.kind
    }

    /// Aggregation policy (centered or mean).
    pub fn policy(&self) -> CouplingPolicy {
        self.policy
    }

    /// Polarization filter angle, if a filter is mounted.
    pub fn filter(&self) -> Option<f64> {
        self.filter
    }

    /// Numerical aperture.
    pub fn numerical_aperture(&self) -> f64 {
        self.geometry.numerical_aperture
    }

    /// Acceptance half-angle asin(NA).
    pub fn max_angle(&self) -> f64 {
        self.max_angle
    }

    /// Detector placement and sampling.
    pub fn geometry(&self) -> DetectorGeometry {
        self.geometry
    }

    /// The (offset) angular mesh the response lives on.
    pub fn mesh(&self) -> &AngularMesh {
        &self.mesh
    }

    /// Response value per mesh point.
    pub fn response(&self) -> &Array1<Complex64> {
        &self.response
    }
}

fn validate_aperture(na: f64) -> Result<f64, CoreError> {
    if !(na > 0.01 && na <= 0.99) {
        return Err(CoreError::InvalidParameter {
            name: "numerical_aperture",
            value: na,
            reason: "numerical aperture must lie in (0.01, 0.99]",
        });
    }
    Ok(na.asin())
}

/// Project a direction onto the tangent plane of the mode grid, in
/// half-width units: the cone boundary θ = max_angle maps to radius 1.
fn tangent_project(theta: f64, phi: f64, max_angle: f64) -> Result<(f64, f64), CoreError> {
    if theta >= std::f64::consts::FRAC_PI_2 {
        return Err(CoreError::SingularAngle { theta });
    }
    let r = theta.tan() / max_angle.tan();
    let (sin_p, cos_p) = phi.sin_cos();
    Ok((r * cos_p, r * sin_p))
}

/// Bilinear sample of a square grid at tangent-plane coordinates
/// (u, v) ∈ [-1, 1]²; coordinates outside clamp to the boundary value.
fn bilinear(grid: &Array2<Complex64>, u: f64, v: f64) -> Complex64 {
    let (rows, cols) = grid.dim();

    let x = ((u + 1.0) / 2.0 * (rows - 1) as f64).clamp(0.0, (rows - 1) as f64);
    let y = ((v + 1.0) / 2.0 * (cols - 1) as f64).clamp(0.0, (cols - 1) as f64);

    let i0 = x.floor() as usize;
    let j0 = y.floor() as usize;
    let i1 = (i0 + 1).min(rows - 1);
    let j1 = (j0 + 1).min(cols - 1);
    let fx = x - i0 as f64;
    let fy = y - j0 as f64;

    grid[[i0, j0]] * ((1.0 - fx) * (1.0 - fy))
        + grid[[i1, j0]] * (fx * (1.0 - fy))
        + grid[[i0, j1]] * ((1.0 - fx) * fy)
        + grid[[i1, j1]] * (fx * fy)
}
