//! Fourier backend trait and CPU implementation.
//!
//! The [`FourierBackend`] trait isolates the diffraction code from the FFT
//! provider. A backend is selected once, at construction of whatever owns
//! it, and passed explicitly, never read from ambient global state. The
//! shipped implementation runs on the CPU via `rustfft`; an accelerated
//! backend only has to satisfy the same numeric contract.

use ndarray::{Array2, Axis};
use num_complex::Complex64;
use rayon::prelude::*;
use rustfft::{Fft, FftPlanner};

/// Abstraction over 2-D Fourier operations on complex grids.
pub trait FourierBackend: Send + Sync {
    /// Forward 2-D FFT (row transform followed by column transform),
    /// unnormalized, zero frequency at index 0.
    fn fft2(&self, field: &Array2<Complex64>) -> Array2<Complex64>;

    /// Swap half-spaces along both axes so the zero frequency moves to the
    /// grid centre.
    fn fftshift2(&self, field: &Array2<Complex64>) -> Array2<Complex64>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}

/// CPU backend: `rustfft` plans, rows transformed in parallel via Rayon.
#[derive(Debug, Default)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        Self
    }
}

fn fft_rows(data: &mut Array2<Complex64>) {
    let len = data.ncols();
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(len);

    data.axis_iter_mut(Axis(0))
        .into_par_iter()
        .for_each(|mut row| {
            let mut buffer: Vec<Complex64> = row.to_vec();
            fft.process(&mut buffer);
            for (dst, src) in row.iter_mut().zip(buffer) {
                *dst = src;
            }
        });
}

impl FourierBackend for CpuBackend {
    fn fft2(&self, field: &Array2<Complex64>) -> Array2<Complex64> {
        let mut data = field.clone();
        fft_rows(&mut data);

        // Column pass as a row pass over the transpose.
        let mut data = data.t().to_owned();
        fft_rows(&mut data);
        data.t().to_owned()
    }

    fn fftshift2(&self, field: &Array2<Complex64>) -> Array2<Complex64> {
        let (rows, cols) = field.dim();
        let mut shifted = Array2::from_elem((rows, cols), Complex64::new(0.0, 0.0));
        for i in 0..rows {
            for j in 0..cols {
                shifted[[(i + rows / 2) % rows, (j + cols / 2) % cols]] = field[[i, j]];
            }
        }
        shifted
    }

    fn name(&self) -> &str {
        "cpu (rustfft)"
    }
}
