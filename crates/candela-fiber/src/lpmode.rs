//! LP-mode detector builder.
//!
//! Glues the fiber layer together: generate the LP near field, diffract it
//! into the far field, and hand the complex grid to the core's mode
//! detector. The core accepts the grid as-is, so swapping in a rigorous
//! mode solver only means producing a different grid here.

use candela_core::detector::{CouplingPolicy, Detector, DetectorGeometry};
use candela_core::error::CoreError;
use candela_core::source::PlaneWave;

use crate::backend::FourierBackend;
use crate::fiber::{lp_near_field, Orientation, StepIndexFiber};
use crate::fraunhofer::fraunhofer;

/// Configuration of an LP-mode detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LpModeConfig {
    /// LP mode indices (l, m); LP01 is `(0, 1)`, LP11 is `(1, 1)`.
    pub mode: (usize, usize),
    /// Lobe orientation of the mode pattern.
    pub orientation: Orientation,
    /// Detector geometry: aperture, sampling and offsets.
    pub geometry: DetectorGeometry,
    /// Near-field grid resolution fed to the diffraction transform.
    pub interp_sampling: usize,
    /// Polarization filter angle (radians), if mounted.
    pub filter: Option<f64>,
    /// Aggregation policy.
    pub policy: CouplingPolicy,
}

impl Default for LpModeConfig {
    fn default() -> Self {
        Self {
            mode: (0, 1),
            orientation: Orientation::Horizontal,
            geometry: DetectorGeometry::default(),
            interp_sampling: 101,
            filter: None,
            policy: CouplingPolicy::Centered,
        }
    }
}

impl LpModeConfig {
    /// Build the coherent mode detector for a given fiber and source.
    pub fn build(
        &self,
        fiber: &StepIndexFiber,
        backend: &dyn FourierBackend,
        source: &PlaneWave,
    ) -> Result<Detector, CoreError> {
        let near = lp_near_field(
            fiber,
            source.wavelength(),
            self.mode,
            self.interp_sampling,
            self.orientation,
        )?;
        let far = fraunhofer(backend, &near);

        Detector::mode(&far, self.geometry, self.filter, self.policy)
    }
}
