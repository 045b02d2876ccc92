//! Sphere scatterer with cached derived quantities.
//!
//! A [`Sphere`] is immutable once constructed (new parameters mean a new
//! instance) and owns everything derived from its parameters:
//!
//! - the Mie coefficient sequence, computed once on first access;
//! - the efficiencies, reduced once from the coefficients;
//! - the far field for the most recent mesh, keyed by mesh **value**
//!   equality so a rebuilt-but-identical mesh reuses the cached field.
//!
//! The caches follow a compute-once-then-read-only discipline
//! (`OnceLock` / a mutex-guarded slot), so a sphere can be shared across
//! worker threads in a parameter sweep without further coordination.

use std::sync::{Mutex, OnceLock};

use num_complex::Complex64;

use crate::coupling;
use crate::detector::Detector;
use crate::efficiencies::{self, Efficiencies};
use crate::error::CoreError;
use crate::farfield::{self, FarField, ScatteringAmplitudes};
use crate::mesh::AngularMesh;
use crate::mie::MieCoefficients;
use crate::source::PlaneWave;

/// A homogeneous spherical scatterer in a homogeneous medium.
#[derive(Debug)]
pub struct Sphere {
    diameter: f64,
    index: Complex64,
    n_medium: f64,
    mu: f64,
    mu_sp: f64,
    source: PlaneWave,
    size_parameter: f64,
    area: f64,
    n_max: usize,
    coefficients: OnceLock<MieCoefficients>,
    efficiencies: OnceLock<Efficiencies>,
    farfield_cache: Mutex<Option<CachedField>>,
}

#[derive(Debug)]
struct CachedField {
    polarization: Option<f64>,
    field: FarField,
}

impl Sphere {
    /// Construct a sphere scatterer.
    ///
    /// # Arguments
    /// * `diameter` - Sphere diameter in metres (> 0).
    /// * `source` - Incident plane wave.
    /// * `index` - Complex refractive index of the sphere (Im ≥ 0).
    /// * `n_medium` - Real refractive index of the surrounding medium (≥ 1).
    pub fn new(
        diameter: f64,
        source: PlaneWave,
        index: Complex64,
        n_medium: f64,
    ) -> Result<Self, CoreError> {
        if !(diameter > 0.0) {
            return Err(CoreError::InvalidParameter {
                name: "diameter",
                value: diameter,
                reason: "diameter must be positive",
            });
        }
        if index.im < 0.0 {
            return Err(CoreError::InvalidParameter {
                name: "index",
                value: index.im,
                reason: "negative imaginary index describes a gain medium",
            });
        }
        if !(n_medium >= 1.0) {
            return Err(CoreError::InvalidParameter {
                name: "n_medium",
                value: n_medium,
                reason: "medium index must be at least 1",
            });
        }

        let radius = diameter / 2.0;
        let size_parameter = source.k() * radius;

        Ok(Self {
            diameter,
            index,
            n_medium,
            mu: 1.0,
            mu_sp: 1.0,
            source,
            size_parameter,
            area: std::f64::consts::PI * radius * radius,
            n_max: MieCoefficients::max_order(size_parameter),
            coefficients: OnceLock::new(),
            efficiencies: OnceLock::new(),
            farfield_cache: Mutex::new(None),
        })
    }

    /// Override the multipole truncation order chosen by the size-parameter
    /// rule. Must be called before the coefficients are first accessed.
    pub fn with_max_order(mut self, n_max: usize) -> Result<Self, CoreError> {
        if n_max == 0 {
            return Err(CoreError::InvalidParameter {
                name: "n_max",
                value: 0.0,
                reason: "at least one multipole order is required",
            });
        }
        self.n_max = n_max;
        Ok(self)
    }

    /// Relative permeabilities of medium and sphere, for magnetic media.
    /// Both default to 1.
    pub fn with_permeabilities(mut self, mu: f64, mu_sp: f64) -> Result<Self, CoreError> {
        for (name, value) in [("mu", mu), ("mu_sp", mu_sp)] {
            if !(value > 0.0) {
                return Err(CoreError::InvalidParameter {
                    name,
                    value,
                    reason: "permeability must be positive",
                });
            }
        }
        self.mu = mu;
        self.mu_sp = mu_sp;
        Ok(self)
    }

    /// Sphere diameter (m).
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Complex refractive index of the sphere.
    pub fn index(&self) -> Complex64 {
        self.index
    }

    /// Refractive index of the surrounding medium.
    pub fn n_medium(&self) -> f64 {
        self.n_medium
    }

    /// The illuminating source.
    pub fn source(&self) -> &PlaneWave {
        &self.source
    }

    /// Size parameter $x = k\,d/2$.
    pub fn size_parameter(&self) -> f64 {
        self.size_parameter
    }

    /// Geometric cross-section $\pi r^2$ (m²).
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Relative refractive index $M = n_{sphere} / n_{medium}$.
    pub fn relative_index(&self) -> Complex64 {
        self.index / self.n_medium
    }

    /// The Mie coefficient sequence, computed on first access.
    pub fn coefficients(&self) -> Result<&MieCoefficients, CoreError> {
        if let Some(coeffs) = self.coefficients.get() {
            return Ok(coeffs);
        }
        let computed = MieCoefficients::compute(
            self.size_parameter,
            self.relative_index(),
            self.mu,
            self.mu_sp,
            self.n_max,
        )?;
        // A concurrent first access may have won the race; either value is
        // identical, computed from the same immutable parameters.
        Ok(self.coefficients.get_or_init(|| computed))
    }

    fn cached_efficiencies(&self) -> Result<Efficiencies, CoreError> {
        if let Some(q) = self.efficiencies.get() {
            return Ok(*q);
        }
        let coeffs = self.coefficients()?;
        Ok(*self
            .efficiencies
            .get_or_init(|| efficiencies::efficiencies(coeffs, self.size_parameter)))
    }

    /// Scattering efficiency.
    pub fn qsca(&self) -> Result<f64, CoreError> {
        Ok(self.cached_efficiencies()?.qsca)
    }

    /// Extinction efficiency.
    pub fn qext(&self) -> Result<f64, CoreError> {
        Ok(self.cached_efficiencies()?.qext)
    }

    /// Absorption efficiency.
    pub fn qabs(&self) -> Result<f64, CoreError> {
        Ok(self.cached_efficiencies()?.qabs)
    }

    /// All three efficiencies.
    pub fn efficiencies(&self) -> Result<Efficiencies, CoreError> {
        self.cached_efficiencies()
    }

    /// S1/S2 amplitudes over `num` polar angles spanning [0, π].
    pub fn s1_s2(&self, num: usize) -> Result<ScatteringAmplitudes, CoreError> {
        let coeffs = self.coefficients()?;
        let theta: Vec<f64> = (0..num)
            .map(|i| std::f64::consts::PI * i as f64 / (num - 1).max(1) as f64)
            .collect();
        Ok(farfield::s1_s2(coeffs, &theta))
    }

    /// Far field over a full-sphere mesh of `num × num` directions.
    pub fn field(&self, num: usize) -> Result<FarField, CoreError> {
        self.far_field_on(&AngularMesh::full_sphere(num))
    }

    /// Far field on an arbitrary mesh, serving the last result again while
    /// the requested mesh compares equal to the cached one.
    pub fn far_field_on(&self, mesh: &AngularMesh) -> Result<FarField, CoreError> {
        let polarization = self.source.polarization();

        let mut slot = self
            .farfield_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(cached) = slot.as_ref() {
            if cached.polarization == polarization && cached.field.mesh == *mesh {
                return Ok(cached.field.clone());
            }
        }

        let coeffs = self.coefficients()?;
        let field = farfield::synthesize(coeffs, mesh, polarization);
        *slot = Some(CachedField {
            polarization,
            field: field.clone(),
        });
        Ok(field)
    }

    /// Coupling of this scatterer's far field into a detector.
    pub fn coupling(&self, detector: &Detector) -> Result<f64, CoreError> {
        coupling::coupling(detector, self)
    }
}
