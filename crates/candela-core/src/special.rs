//! Spherical Bessel, Riccati-Bessel and Mie angular functions.
//!
//! The Mie formulas consume these in two flavours: whole sequences
//! (n = 0..N for the coefficient recursions, evaluated once per scatterer)
//! and scalar values (the classic special-function surface). The sequence
//! routines are the numerically careful ones:
//!
//! - $j_n$ is generated by **downward (Miller) recurrence** with
//!   renormalization against $j_0(z) = \sin z / z$. Upward recurrence for
//!   $j_n$ loses all precision once $n \gtrsim |z|$ and must not be used.
//! - $y_n$ is generated by upward recurrence, which is the stable direction
//!   for the Neumann family.
//! - $\pi_n$, $\tau_n$ use the standard upward recurrence in
//!   $\mu = \cos\theta$, which is regular at $\theta \in \{0, \pi\}$.
//!
//! # Reference
//! Bohren & Huffman, *Absorption and Scattering of Light by Small Particles*
//! (1983), §4.3 and appendix A.

use num_complex::Complex64;

/// Spherical Bessel functions $j_0(z) \dots j_{n_{max}}(z)$ for complex
/// argument.
///
/// Uses Miller's downward recurrence
/// $j_{n-1}(z) = \frac{2n+1}{z} j_n(z) - j_{n+1}(z)$,
/// started well above `n_max` from an arbitrary seed and renormalized with
/// $j_0(z) = \sin z / z$. The complex argument is needed for the interior
/// Riccati-Bessel functions $\psi_n(m x)$ of absorbing spheres.
pub fn spherical_jn(n_max: usize, z: Complex64) -> Vec<Complex64> {
    let zero = Complex64::new(0.0, 0.0);

    if z.norm() < 1e-12 {
        // Leading series terms; higher orders vanish as z^n.
        let mut result = vec![zero; n_max + 1];
        result[0] = Complex64::new(1.0, 0.0) - z * z / 6.0;
        if n_max >= 1 {
            result[1] = z / 3.0;
        }
        return result;
    }

    let start = n_max + z.norm() as usize + 20;

    let mut values = vec![zero; start + 2];
    values[start + 1] = zero;
    values[start] = Complex64::new(1e-30, 0.0);

    for k in (0..start).rev() {
        values[k] = (2 * k + 3) as f64 / z * values[k + 1] - values[k + 2];
    }

    let scale = (z.sin() / z) / values[0];

    values.truncate(n_max + 1);
    for v in values.iter_mut() {
        *v *= scale;
    }
    values
}

/// Spherical Neumann functions $y_0(x) \dots y_{n_{max}}(x)$.
///
/// Upward recurrence $y_{n+1}(x) = \frac{2n+1}{x} y_n(x) - y_{n-1}(x)$ from
/// $y_0 = -\cos x / x$ and $y_1 = -\cos x / x^2 - \sin x / x$.
pub fn spherical_yn(n_max: usize, x: f64) -> Vec<f64> {
    let mut result = vec![0.0; n_max + 1];

    if x.abs() < 1e-300 {
        // y_n diverges at the origin.
        for v in result.iter_mut() {
            *v = f64::NEG_INFINITY;
        }
        return result;
    }

    let (sin_x, cos_x) = x.sin_cos();
    result[0] = -cos_x / x;
    if n_max >= 1 {
        result[1] = -cos_x / (x * x) - sin_x / x;
    }
    for n in 2..=n_max {
        result[n] = (2 * n - 1) as f64 / x * result[n - 1] - result[n - 2];
    }
    result
}

/// Spherical Bessel function of the first kind, $j_n(x)$.
pub fn jn(n: usize, x: f64) -> f64 {
    spherical_jn(n, Complex64::new(x, 0.0))[n].re
}

/// First derivative $j_n'(x) = j_{n-1}(x) - \frac{n+1}{x} j_n(x)$
/// (with $j_0' = -j_1$).
pub fn jn_prime(n: usize, x: f64) -> f64 {
    let j = spherical_jn(n + 1, Complex64::new(x, 0.0));
    if n == 0 {
        -j[1].re
    } else {
        j[n - 1].re - (n + 1) as f64 / x * j[n].re
    }
}

/// Spherical Neumann function $y_n(x)$.
pub fn yn(n: usize, x: f64) -> f64 {
    spherical_yn(n, x)[n]
}

/// First derivative $y_n'(x) = y_{n-1}(x) - \frac{n+1}{x} y_n(x)$
/// (with $y_0' = -y_1$).
pub fn yn_prime(n: usize, x: f64) -> f64 {
    let y = spherical_yn(n + 1, x);
    if n == 0 {
        -y[1]
    } else {
        y[n - 1] - (n + 1) as f64 / x * y[n]
    }
}

/// Spherical Hankel function of the first kind,
/// $h_n(x) = j_n(x) + i\,y_n(x)$.
pub fn hn(n: usize, x: f64) -> Complex64 {
    Complex64::new(jn(n, x), yn(n, x))
}

/// First derivative $h_n'(x) = j_n'(x) + i\,y_n'(x)$.
pub fn hn_prime(n: usize, x: f64) -> Complex64 {
    Complex64::new(jn_prime(n, x), yn_prime(n, x))
}

/// Riccati-Bessel function $\psi_n(x) = x\,j_n(x)$.
pub fn psi(n: usize, x: f64) -> f64 {
    x * jn(n, x)
}

/// Derivative $\psi_n'(x) = x\,j_n'(x) + j_n(x)$.
pub fn psi_prime(n: usize, x: f64) -> f64 {
    x * jn_prime(n, x) + jn(n, x)
}

/// Riccati-Bessel function $\xi_n(x) = x\,h_n(x)$.
pub fn xi(n: usize, x: f64) -> Complex64 {
    x * hn(n, x)
}

/// Derivative $\xi_n'(x) = x\,h_n'(x) + h_n(x)$.
pub fn xi_prime(n: usize, x: f64) -> Complex64 {
    x * hn_prime(n, x) + hn(n, x)
}

/// Riccati-Bessel sequences $\psi_n(z)$ and $\psi_n'(z)$ for n = 0..=n_max.
///
/// $\psi_n = z\,j_n(z)$ and, from the Bessel derivative recurrence,
/// $\psi_n' = z\,j_{n-1}(z) - n\,j_n(z)$ for $n \ge 1$, $\psi_0' = \cos z$.
pub fn riccati_psi(n_max: usize, z: Complex64) -> (Vec<Complex64>, Vec<Complex64>) {
    let j = spherical_jn(n_max, z);

    let mut psi = Vec::with_capacity(n_max + 1);
    let mut psi_p = Vec::with_capacity(n_max + 1);

    for (n, &j_n) in j.iter().enumerate() {
        psi.push(z * j_n);
        if n == 0 {
            psi_p.push(z.cos());
        } else {
            psi_p.push(z * j[n - 1] - n as f64 * j_n);
        }
    }
    (psi, psi_p)
}

/// Riccati-Bessel sequences $\xi_n(x)$ and $\xi_n'(x)$ for n = 0..=n_max.
///
/// $\xi_n = x\,h_n(x)$ with $h_n = j_n + i\,y_n$;
/// $\xi_n' = x\,h_{n-1}(x) - n\,h_n(x)$ for $n \ge 1$,
/// $\xi_0' = e^{ix}$.
pub fn riccati_xi(n_max: usize, x: f64) -> (Vec<Complex64>, Vec<Complex64>) {
    let j = spherical_jn(n_max, Complex64::new(x, 0.0));
    let y = spherical_yn(n_max, x);

    let h: Vec<Complex64> = (0..=n_max)
        .map(|n| Complex64::new(j[n].re, y[n]))
        .collect();

    let mut xi = Vec::with_capacity(n_max + 1);
    let mut xi_p = Vec::with_capacity(n_max + 1);

    for (n, &h_n) in h.iter().enumerate() {
        xi.push(x * h_n);
        if n == 0 {
            let (sin_x, cos_x) = x.sin_cos();
            xi_p.push(Complex64::new(cos_x, sin_x));
        } else {
            xi_p.push(x * h[n - 1] - n as f64 * h_n);
        }
    }
    (xi, xi_p)
}

/// Mie angular functions $\pi_n(\mu)$ and $\tau_n(\mu)$ for n = 1..=n_max,
/// with $\mu = \cos\theta$. Index `i` of each returned vector holds order
/// `i + 1`.
///
/// Upward recurrence (Bohren & Huffman 4.47):
/// $\pi_1 = 1$, $\pi_2 = 3\mu$,
/// $\pi_n = \frac{(2n-1)\,\mu\,\pi_{n-1} - n\,\pi_{n-2}}{n-1}$,
/// $\tau_n = n\,\mu\,\pi_n - (n+1)\,\pi_{n-1}$ (with $\pi_0 = 0$).
///
/// The recurrence involves no division by $\sin\theta$ and is regular at
/// $\theta \in \{0, \pi\}$.
pub fn pi_tau(mu: f64, n_max: usize) -> (Vec<f64>, Vec<f64>) {
    let mut pi = vec![0.0; n_max];
    let mut tau = vec![0.0; n_max];

    if n_max == 0 {
        return (pi, tau);
    }

    pi[0] = 1.0;
    tau[0] = mu;

    if n_max >= 2 {
        pi[1] = 3.0 * mu;
        tau[1] = 2.0 * mu * pi[1] - 3.0 * pi[0];
    }

    for i in 2..n_max {
        let n = (i + 1) as f64;
        pi[i] = ((2.0 * n - 1.0) * mu * pi[i - 1] - n * pi[i - 2]) / (n - 1.0);
        tau[i] = n * mu * pi[i] - (n + 1.0) * pi[i - 1];
    }

    (pi, tau)
}
