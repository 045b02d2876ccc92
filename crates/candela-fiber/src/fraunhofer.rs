//! Near-field to far-field diffraction transform.
//!
//! In the Fraunhofer regime the far-field amplitude is the 2-D Fourier
//! transform of the aperture (near) field. The discrete transform picks up
//! an index-dependent phase because the near-field grid is centred on the
//! aperture while the DFT assumes its origin at index 0; dividing by the
//! separable shift grid
//! $\exp\!\bigl(-i\pi\,k\,(N-1)/N\bigr)$ (outer product over both axes)
//! removes it for both odd and even grid sizes. The spectrum is then
//! recentred with an fftshift and L1-renormalized.

use ndarray::Array2;
use num_complex::Complex64;

use crate::backend::FourierBackend;

/// Far-field diffraction pattern of a complex near field.
pub fn fraunhofer(backend: &dyn FourierBackend, near_field: &Array2<Complex64>) -> Array2<Complex64> {
    let mut far = backend.fft2(near_field);

    let shift = phase_shift_grid(near_field.nrows());
    far.zip_mut_with(&shift, |f, s| *f = *f / *s);

    let mut far = backend.fftshift2(&far);

    let total: f64 = far.iter().map(|v| v.norm()).sum();
    if total > 0.0 {
        far.mapv_inplace(|v| v / total);
    }
    far
}

/// Separable phase-correction grid for a centred `n × n` aperture:
/// `g[k] = exp(-iπ k (n-1)/n)`, returned as the outer product g ⊗ g.
fn phase_shift_grid(n: usize) -> Array2<Complex64> {
    let line: Vec<Complex64> = (0..n)
        .map(|k| {
            let phase = -std::f64::consts::PI * k as f64 * (n as f64 - 1.0) / n as f64;
            Complex64::new(0.0, phase).exp()
        })
        .collect();

    Array2::from_shape_fn((n, n), |(i, j)| line[i] * line[j])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    #[test]
    fn shift_grid_is_unimodular() {
        let grid = phase_shift_grid(7);
        for v in grid.iter() {
            assert!((v.norm() - 1.0).abs() < 1e-12);
        }
        assert!((grid[[0, 0]] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn centred_even_symmetric_aperture_has_real_far_field() {
        // A symmetric aperture Fourier-transforms to a real pattern once
        // the centring phase is removed.
        let n = 33;
        let backend = CpuBackend::new();
        let near = Array2::from_shape_fn((n, n), |(i, j)| {
            let x = i as f64 - (n - 1) as f64 / 2.0;
            let y = j as f64 - (n - 1) as f64 / 2.0;
            Complex64::new((-(x * x + y * y) / 20.0).exp(), 0.0)
        });

        let far = fraunhofer(&backend, &near);
        let worst = far
            .iter()
            .map(|v| v.im.abs())
            .fold(0.0_f64, f64::max);
        assert!(worst < 1e-9, "residual imaginary part {worst}");
    }

    #[test]
    fn far_field_is_l1_normalized_and_centrally_peaked() {
        let n = 32;
        let backend = CpuBackend::new();
        let near = Array2::from_shape_fn((n, n), |(i, j)| {
            let x = i as f64 - (n - 1) as f64 / 2.0;
            let y = j as f64 - (n - 1) as f64 / 2.0;
            Complex64::new((-(x * x + y * y) / 12.0).exp(), 0.0)
        });

        let far = fraunhofer(&backend, &near);
        let total: f64 = far.iter().map(|v| v.norm()).sum();
        assert!((total - 1.0).abs() < 1e-9);

        // A Gaussian transforms to a Gaussian: the peak sits at the centre.
        let peak = far
            .indexed_iter()
            .max_by(|a, b| a.1.norm().total_cmp(&b.1.norm()))
            .map(|(idx, _)| idx)
            .unwrap();
        assert_eq!(peak, (n / 2, n / 2));
    }
}
