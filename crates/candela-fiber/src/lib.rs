//! # Candela Fiber
//!
//! Fiber-mode far fields for the Candela coupling engine. This crate plays
//! the role `candela-core` leaves to an external collaborator: it generates
//! the near field of a guided LP mode, Fourier-transforms it into the
//! far-field diffraction pattern, and hands the resulting complex grid to
//! the core's mode-detector constructor.
//!
//! ## Modules
//!
//! - [`backend`] — Fourier backend trait and the CPU (rustfft) backend.
//! - [`fiber`] — Step-index fiber description and LP mode near fields.
//! - [`fraunhofer`] — Near-field to far-field diffraction transform.
//! - [`lpmode`] — LP-mode detector builder gluing the three together.

pub mod backend;
pub mod fiber;
pub mod fraunhofer;
pub mod lpmode;

pub use backend::{CpuBackend, FourierBackend};
pub use fiber::{Orientation, StepIndexFiber};
pub use lpmode::LpModeConfig;
