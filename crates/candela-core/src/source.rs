//! Incident plane-wave description.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A monochromatic plane wave illuminating the scatterer.
///
/// Immutable once constructed; the wavenumber is derived at construction
/// and never drifts from the wavelength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneWave {
    wavelength: f64,
    polarization: Option<f64>,
    k: f64,
}

impl PlaneWave {
    /// Linearly polarized plane wave.
    ///
    /// # Arguments
    /// * `wavelength` - Vacuum wavelength in metres (> 0).
    /// * `polarization` - Polarization angle in radians, measured from the
    ///   azimuthal reference axis.
    pub fn new(wavelength: f64, polarization: f64) -> Result<Self, CoreError> {
        Self::build(wavelength, Some(polarization))
    }

    /// Unpolarized plane wave.
    pub fn unpolarized(wavelength: f64) -> Result<Self, CoreError> {
        Self::build(wavelength, None)
    }

    fn build(wavelength: f64, polarization: Option<f64>) -> Result<Self, CoreError> {
        if !(wavelength > 0.0) {
            return Err(CoreError::InvalidParameter {
                name: "wavelength",
                value: wavelength,
                reason: "wavelength must be positive",
            });
        }
        Ok(Self {
            wavelength,
            polarization,
            k: 2.0 * std::f64::consts::PI / wavelength,
        })
    }

    /// Vacuum wavelength (m).
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Wavenumber $k = 2\pi/\lambda$ (m⁻¹).
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Polarization angle in radians, `None` for unpolarized light.
    pub fn polarization(&self) -> Option<f64> {
        self.polarization
    }
}
