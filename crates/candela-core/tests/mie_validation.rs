//! Integration tests: Mie efficiencies against analytical limits.
//!
//! The engine is validated against the closed-form limits of Lorenz-Mie
//! theory rather than against itself: the Rayleigh law fixes the small-x
//! behaviour, the optical theorem ties the far-field synthesis to the
//! efficiency sums through an entirely independent code path, and energy
//! conservation pins the lossless case.

use candela_core::mesh::AngularMesh;
use candela_core::scatterer::Sphere;
use candela_core::source::PlaneWave;
use num_complex::Complex64;

fn sphere(diameter: f64, index: Complex64) -> Sphere {
    let source = PlaneWave::unpolarized(400e-9).expect("valid wavelength");
    Sphere::new(diameter, source, index, 1.0).expect("valid scatterer")
}

/// Lossless spheres absorb nothing: Qabs = 0 to floating tolerance for a
/// range of diameters spanning Rayleigh to resonance sizes.
#[test]
fn test_lossless_spheres_have_zero_absorption() {
    for &diameter in &[10e-9, 50e-9, 200e-9, 500e-9, 2000e-9] {
        let s = sphere(diameter, Complex64::new(1.4, 0.0));
        let q = s.efficiencies().expect("efficiencies");

        eprintln!(
            "d={:.0} nm: Qsca={:.6e}, Qext={:.6e}, Qabs={:.2e}",
            diameter * 1e9,
            q.qsca,
            q.qext,
            q.qabs
        );

        assert!(
            q.qabs.abs() <= 1e-9 * q.qext.max(1e-300),
            "Qabs = {:.3e} at d = {:.0} nm",
            q.qabs,
            diameter * 1e9
        );
    }
}

/// Passive scatterers always satisfy Qext >= Qsca >= 0.
#[test]
fn test_efficiency_ordering_for_absorbing_spheres() {
    for &im in &[0.0, 0.01, 0.1, 0.5] {
        for &diameter in &[100e-9, 500e-9, 1500e-9] {
            let s = sphere(diameter, Complex64::new(1.4, im));
            let q = s.efficiencies().expect("efficiencies");

            assert!(q.qsca >= 0.0, "Qsca = {} (im = {im})", q.qsca);
            assert!(
                q.qext >= q.qsca - 1e-12 * q.qext.abs(),
                "Qext = {} < Qsca = {} (im = {im}, d = {diameter})",
                q.qext,
                q.qsca
            );
        }
    }
}

/// In the Rayleigh limit Qsca scales as x^4: doubling x multiplies Qsca
/// by 16 to within the next-order correction.
#[test]
fn test_rayleigh_quartic_scaling() {
    let index = Complex64::new(1.4, 0.0);
    // x = k d/2 with lambda = 400 nm: d = 1.273 nm gives x = 0.01.
    let d_small = 0.01 * 400e-9 / std::f64::consts::PI;
    let q1 = sphere(d_small, index).qsca().expect("qsca");
    let q2 = sphere(2.0 * d_small, index).qsca().expect("qsca");

    let ratio = q2 / q1;
    eprintln!("Qsca(2x)/Qsca(x) = {ratio:.6}");
    assert!(
        (ratio - 16.0).abs() < 0.01,
        "expected ~16 for x^4 scaling, got {ratio}"
    );
}

/// The Rayleigh closed form
/// Qsca = (8/3) x^4 |(m^2-1)/(m^2+2)|^2 is reproduced at small x.
#[test]
fn test_rayleigh_closed_form() {
    let m = Complex64::new(1.4, 0.0);
    let x = 0.005_f64;
    let diameter = 2.0 * x * 400e-9 / (2.0 * std::f64::consts::PI);

    let q = sphere(diameter, m).qsca().expect("qsca");

    let m2 = m * m;
    let reference = 8.0 / 3.0 * x.powi(4) * ((m2 - 1.0) / (m2 + 2.0)).norm_sqr();
    let rel = (q - reference).abs() / reference;
    eprintln!("Qsca = {q:.6e}, Rayleigh = {reference:.6e}, rel = {rel:.2e}");
    assert!(rel < 1e-4, "relative error {rel}");
}

/// Optical theorem: Qext = (4/x^2) Re S(0). The left side comes from the
/// coefficient sums, the right side from the angular-function recursions;
/// agreement checks the two code paths against each other.
#[test]
fn test_optical_theorem_ties_forward_amplitude_to_extinction() {
    for &(diameter, im) in &[(500e-9, 0.0), (500e-9, 0.05), (1200e-9, 0.0)] {
        let s = sphere(diameter, Complex64::new(1.4, im));
        let x = s.size_parameter();

        let amplitudes = s.s1_s2(91).expect("amplitudes");
        let forward = amplitudes.s1[0];
        let qext_forward = 4.0 / (x * x) * forward.re;

        let qext = s.qext().expect("qext");
        let rel = (qext - qext_forward).abs() / qext;
        eprintln!("x={x:.3}: Qext={qext:.8}, optical theorem={qext_forward:.8}, rel={rel:.2e}");
        assert!(rel < 1e-9, "optical theorem violated: rel = {rel}");
    }
}

/// End-to-end scenario: 500 nm dielectric sphere (m = 1.4) in 400 nm
/// unpolarized light, x = pi*0.5/0.4 ~ 3.927. Resonance-region
/// efficiencies with exact extinction-scattering equality.
#[test]
fn test_reference_sphere_500nm() {
    let s = sphere(500e-9, Complex64::new(1.4, 0.0));
    assert!((s.size_parameter() - std::f64::consts::PI * 0.5 / 0.4).abs() < 1e-9);

    let q = s.efficiencies().expect("efficiencies");
    eprintln!(
        "x = {:.4}: Qsca = {:.6}, Qext = {:.6}, Qabs = {:.2e}",
        s.size_parameter(),
        q.qsca,
        q.qext,
        q.qabs
    );

    // Mie resonance region: well above the geometric limit of 2, below
    // the first-resonance ceiling.
    assert!(q.qsca > 2.0 && q.qsca < 5.0, "Qsca = {}", q.qsca);
    assert!((q.qext - q.qsca).abs() < 1e-9 * q.qext);
}

/// The far field integrated over the full sphere reproduces Qsca:
/// (1/x^2) sum |E|^2 sin(theta) dTheta dPhi = pi Qsca for the unpolarized
/// split. Ties the synthesis path to the efficiency path.
#[test]
fn test_integrated_far_field_recovers_qsca() {
    let s = sphere(500e-9, Complex64::new(1.4, 0.0));
    let x = s.size_parameter();

    let mesh = AngularMesh::full_sphere(400);
    let field = s.far_field_on(&mesh).expect("far field");
    let intensity = field.intensity();

    let integral: f64 = (0..mesh.len())
        .map(|i| intensity[i] * mesh.theta[i].sin().abs() * mesh.d_omega)
        .sum();
    let qsca_from_field = integral / (x * x * std::f64::consts::PI);

    let qsca = s.qsca().expect("qsca");
    let rel = (qsca_from_field - qsca).abs() / qsca;
    eprintln!("Qsca = {qsca:.6}, from field = {qsca_from_field:.6}, rel = {rel:.2e}");
    // Trapezoid-free Riemann sum on a 400x400 grid: percent-level.
    assert!(rel < 0.02, "relative error {rel}");
}
