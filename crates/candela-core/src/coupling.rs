//! Detector / far-field overlap integrals.
//!
//! The coupling scalar is the discrete overlap of a detector response and
//! a scattered far field over the detector mesh, with the solid-angle
//! Jacobian |sin θ| applied exactly once, here and nowhere else:
//!
//! - **Intensity**: $C = \sum_i |r_i|\,|E_i|^2\,|\sin\theta_i|\,d\Omega$,
//!   phase-blind power collection.
//! - **Amplitude**: $C = \bigl|\sum_i r_i\,E_i\,|\sin\theta_i|\,d\Omega\bigr|^2$,
//!   coherent overlap before squaring, which is what makes mode coupling
//!   sensitive to interference.
//!
//! The **Centered** policy evaluates the integral once at the nominal
//! detector position; the **Mean** policy drops the offset-sensitive cross
//! term and reduces to the incoherent sum $\sum_i |r_i E_i|^2$ per channel.
//! A polarization filter at angle $f$ weights the channels as
//! $C_\perp \cos^2 f + C_\parallel \sin^2 f$; without a filter the
//! channels add with equal weight.

use ndarray::Array1;
use num_complex::Complex64;

use crate::detector::{CouplingKind, CouplingPolicy, Detector};
use crate::error::CoreError;
use crate::farfield::FarField;
use crate::scatterer::Sphere;

/// Coupling between a detector and a scatterer.
///
/// Synthesizes (or reuses) the scatterer's far field on the detector mesh,
/// then reduces the overlap under the detector's policy. Recomputed on
/// demand; the scalar itself is never cached.
pub fn coupling(detector: &Detector, scatterer: &Sphere) -> Result<f64, CoreError> {
    let field = scatterer.far_field_on(detector.mesh())?;
    coupling_with_field(detector, &field)
}

/// Coupling against an already synthesized far field.
///
/// # Errors
/// [`CoreError::MeshIncompatible`] if the field is not sampled point-for-
/// point on the detector mesh.
pub fn coupling_with_field(detector: &Detector, field: &FarField) -> Result<f64, CoreError> {
    check_meshes(detector, field)?;

    let (perp, para) = match detector.policy() {
        CouplingPolicy::Centered => (
            centered_channel(detector, &field.perpendicular),
            centered_channel(detector, &field.parallel),
        ),
        CouplingPolicy::Mean => (
            mean_channel(detector, &field.perpendicular),
            mean_channel(detector, &field.parallel),
        ),
    };

    Ok(filtered(detector.filter(), perp, para))
}

/// Angular footprint $|r E_\perp|^2 + |r E_\parallel|^2$ per mesh point:
/// where on the detector the collected light lands.
pub fn footprint(detector: &Detector, field: &FarField) -> Result<Array1<f64>, CoreError> {
    check_meshes(detector, field)?;

    let response = detector.response();
    Ok(Array1::from_iter((0..response.len()).map(|i| {
        (response[i] * field.perpendicular[i]).norm_sqr()
            + (response[i] * field.parallel[i]).norm_sqr()
    })))
}

fn check_meshes(detector: &Detector, field: &FarField) -> Result<(), CoreError> {
    let n_det = detector.response().len();
    let n_field = field.parallel.len();
    if n_det != n_field || detector.mesh().len() != field.mesh.len() {
        return Err(CoreError::MeshIncompatible {
            detector: n_det,
            field: n_field,
        });
    }
    Ok(())
}

fn centered_channel(detector: &Detector, channel: &Array1<Complex64>) -> f64 {
    let response = detector.response();
    let mesh = detector.mesh();
    let d_omega = mesh.d_omega;

    match detector.kind() {
        CouplingKind::Intensity => (0..channel.len())
            .map(|i| {
                response[i].norm() * channel[i].norm_sqr() * mesh.theta[i].sin().abs() * d_omega
            })
            .sum(),
        CouplingKind::Amplitude => (0..channel.len())
            .map(|i| response[i] * channel[i] * (mesh.theta[i].sin().abs() * d_omega))
            .sum::<Complex64>()
            .norm_sqr(),
    }
}

fn mean_channel(detector: &Detector, channel: &Array1<Complex64>) -> f64 {
    let response = detector.response();
    (0..channel.len())
        .map(|i| (response[i] * channel[i]).norm_sqr())
        .sum()
}

fn filtered(filter: Option<f64>, perp: f64, para: f64) -> f64 {
    match filter {
        Some(angle) => {
            let (sin_f, cos_f) = angle.sin_cos();
            perp * cos_f * cos_f + para * sin_f * sin_f
        }
        None => perp + para,
    }
}
