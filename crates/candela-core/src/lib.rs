//! # Candela Core
//!
//! The numerical backbone of the Candela framework. This crate implements
//! Lorenz-Mie theory for homogeneous spheres together with the detector
//! overlap integrals used to predict how much scattered light couples into
//! an optical detector (photodiode or fiber mode).
//!
//! ## Architecture
//!
//! A [`scatterer::Sphere`] owns its lazily computed Mie coefficient sequence
//! and exposes efficiencies, scattering amplitudes and far fields. A
//! [`detector::Detector`] carries an angular response sampled on its own
//! [`mesh::AngularMesh`]; the overlap between the two is reduced to a single
//! coupling scalar by [`coupling::coupling`].
//!
//! ## Modules
//!
//! - [`special`] — Spherical Bessel, Riccati-Bessel and Mie angular functions.
//! - [`mie`] — Mie coefficient sequences a_n, b_n, c_n, d_n.
//! - [`efficiencies`] — Scattering, extinction and absorption efficiencies.
//! - [`mesh`] — Angular meshes on the unit sphere, offsets and weights.
//! - [`source`] — Incident plane-wave description.
//! - [`farfield`] — S1/S2 amplitudes and far-field synthesis.
//! - [`scatterer`] — Sphere scatterer with cached derived quantities.
//! - [`detector`] — Photodiode and mode-detector angular responses.
//! - [`coupling`] — Detector/far-field overlap integrals.

pub mod coupling;
pub mod detector;
pub mod efficiencies;
pub mod error;
pub mod farfield;
pub mod mesh;
pub mod mie;
pub mod scatterer;
pub mod source;
pub mod special;

pub use coupling::coupling;
pub use detector::{CouplingKind, CouplingPolicy, Detector, DetectorGeometry};
pub use efficiencies::Efficiencies;
pub use error::CoreError;
pub use farfield::FarField;
pub use mesh::AngularMesh;
pub use mie::MieCoefficients;
pub use scatterer::Sphere;
pub use source::PlaneWave;
