//! Integration tests: end-to-end detector coupling scenarios.
//!
//! A 500 nm dielectric sphere in 400 nm unpolarized light serves as the
//! common scatterer; photodiodes and LP-mode detectors collect its far
//! field under the centered policy.

use candela_core::detector::{CouplingPolicy, Detector, DetectorGeometry};
use candela_core::scatterer::Sphere;
use candela_core::source::PlaneWave;
use candela_fiber::backend::CpuBackend;
use candela_fiber::fiber::{Orientation, StepIndexFiber};
use candela_fiber::lpmode::LpModeConfig;
use num_complex::Complex64;

fn reference_sphere() -> Sphere {
    let source = PlaneWave::unpolarized(400e-9).expect("valid wavelength");
    Sphere::new(500e-9, source, Complex64::new(1.4, 0.0), 1.0).expect("valid scatterer")
}

/// Shrinking the aperture of a tilted photodiode from NA 0.5 to 0.05 can
/// only lose light: the collected power decreases monotonically.
#[test]
fn test_photodiode_coupling_shrinks_with_aperture() {
    let sphere = reference_sphere();
    let tilt = 15.0_f64.to_radians();

    let mut previous = f64::INFINITY;
    for &na in &[0.5, 0.4, 0.3, 0.2, 0.1, 0.05] {
        let geometry = DetectorGeometry {
            numerical_aperture: na,
            sampling: 60,
            theta_offset: tilt,
            ..Default::default()
        };
        let detector =
            Detector::photodiode(geometry, None, CouplingPolicy::Centered).expect("detector");
        let c = detector.coupling(&sphere).expect("coupling");

        eprintln!("NA = {na:.2}: coupling = {c:.6e}");
        assert!(c > 0.0);
        assert!(
            c < previous,
            "coupling grew when the aperture shrank: {c} at NA = {na}"
        );
        previous = c;
    }
}

/// Reflection symmetry: for an isotropic sphere in unpolarized light the
/// centered intensity coupling cannot tell a detector at (+theta, +phi)
/// from one at (-theta, -phi).
#[test]
fn test_centered_intensity_coupling_is_reflection_symmetric() {
    let sphere = reference_sphere();
    let theta0 = 20.0_f64.to_radians();
    let phi0 = 35.0_f64.to_radians();

    // Even azimuthal sampling keeps the mirrored mesh on the same grid.
    let base = DetectorGeometry {
        numerical_aperture: 0.4,
        sampling: 40,
        theta_offset: theta0,
        phi_offset: phi0,
        gamma_offset: 0.0,
    };
    let mirrored = DetectorGeometry {
        theta_offset: -theta0,
        phi_offset: -phi0,
        ..base
    };

    let c_plus = Detector::photodiode(base, None, CouplingPolicy::Centered)
        .expect("detector")
        .coupling(&sphere)
        .expect("coupling");
    let c_minus = Detector::photodiode(mirrored, None, CouplingPolicy::Centered)
        .expect("detector")
        .coupling(&sphere)
        .expect("coupling");

    let rel = (c_plus - c_minus).abs() / c_plus;
    eprintln!("C(+) = {c_plus:.8e}, C(-) = {c_minus:.8e}, rel = {rel:.2e}");
    assert!(rel < 1e-9, "reflection symmetry broken: rel = {rel}");
}

/// Two different fiber modes must collect differently: the coherent overlap
/// depends on the mode shape, not just on the aperture.
#[test]
fn test_lp01_and_lp11_couple_differently() {
    let sphere = reference_sphere();
    let fiber = StepIndexFiber::smf28();
    let backend = CpuBackend::new();
    let source = PlaneWave::unpolarized(400e-9).expect("valid wavelength");

    let geometry = DetectorGeometry {
        numerical_aperture: 0.3,
        sampling: 40,
        theta_offset: 15.0_f64.to_radians(),
        ..Default::default()
    };

    let couple = |mode: (usize, usize)| {
        let config = LpModeConfig {
            mode,
            orientation: Orientation::Horizontal,
            geometry,
            interp_sampling: 65,
            filter: None,
            policy: CouplingPolicy::Centered,
        };
        config
            .build(&fiber, &backend, &source)
            .expect("detector")
            .coupling(&sphere)
            .expect("coupling")
    };

    let lp01 = couple((0, 1));
    let lp11 = couple((1, 1));

    eprintln!("LP01 coupling = {lp01:.6e}, LP11 coupling = {lp11:.6e}");
    assert!(lp01 > 0.0);
    let rel = (lp01 - lp11).abs() / lp01.max(lp11);
    assert!(
        rel > 1e-3,
        "mode-dependent coupling collapsed: LP01 = {lp01}, LP11 = {lp11}"
    );
}

/// The two aggregation policies answer different questions (phase-exact
/// overlap vs. incoherent aggregate) and must not collapse onto the same
/// number for a non-trivial detector.
#[test]
fn test_centered_and_mean_policies_differ() {
    let sphere = reference_sphere();
    let fiber = StepIndexFiber::smf28();
    let backend = CpuBackend::new();
    let source = PlaneWave::unpolarized(400e-9).expect("valid wavelength");

    let geometry = DetectorGeometry {
        numerical_aperture: 0.3,
        sampling: 30,
        theta_offset: 10.0_f64.to_radians(),
        ..Default::default()
    };

    let build = |policy| {
        LpModeConfig {
            mode: (0, 1),
            geometry,
            interp_sampling: 65,
            policy,
            ..Default::default()
        }
        .build(&fiber, &backend, &source)
        .expect("detector")
        .coupling(&sphere)
        .expect("coupling")
    };

    let centered = build(CouplingPolicy::Centered);
    let mean = build(CouplingPolicy::Mean);
    eprintln!("centered = {centered:.6e}, mean = {mean:.6e}");
    assert!(centered > 0.0 && mean > 0.0);
    assert!((centered - mean).abs() > 1e-12 * centered.max(mean));
}

/// A polarization filter splits the collected power between the two
/// channels: the filtered couplings at 0 and 90 degrees add up to the
/// unfiltered value.
#[test]
fn test_polarization_filter_partitions_the_coupling() {
    let sphere = reference_sphere();
    let geometry = DetectorGeometry {
        numerical_aperture: 0.4,
        sampling: 40,
        theta_offset: 15.0_f64.to_radians(),
        ..Default::default()
    };

    let couple = |filter| {
        Detector::photodiode(geometry, filter, CouplingPolicy::Centered)
            .expect("detector")
            .coupling(&sphere)
            .expect("coupling")
    };

    let open = couple(None);
    let perp = couple(Some(0.0));
    let para = couple(Some(std::f64::consts::FRAC_PI_2));

    eprintln!("open = {open:.6e}, perp = {perp:.6e}, para = {para:.6e}");
    assert!((open - (perp + para)).abs() < 1e-12 * open);
}
