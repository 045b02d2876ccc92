//! Error types shared across the Candela core.

use thiserror::Error;

/// Errors raised by the scattering and coupling engine.
///
/// Every variant is raised at the point of detection; no routine in this
/// crate clamps an invalid input silently or lets a NaN propagate into a
/// downstream sum.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// A constructor or compute routine received a physically invalid input.
    #[error("invalid parameter `{name}` = {value:.6e}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Detector response and scatterer field are sampled on meshes that
    /// cannot be overlaid point-for-point.
    #[error("mesh mismatch: detector has {detector} points, field has {field}")]
    MeshIncompatible { detector: usize, field: usize },

    /// A polar angle at or beyond pi/2 reached the tangent-plane projection,
    /// where the mapping back onto a mode grid is undefined.
    #[error("singular polar angle {theta:.6} rad: tangent-plane projection undefined at or beyond pi/2")]
    SingularAngle { theta: f64 },

    /// A Mie coefficient denominator underflowed to exactly zero.
    #[error("Mie coefficient denominator vanished at order {order} (size parameter {size_parameter:.4e})")]
    NumericDivergence { order: usize, size_parameter: f64 },
}
