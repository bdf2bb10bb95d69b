//! Zernike polynomial evaluation
//!
//! The radial polynomial of `(n, l)`, with `m = |l|`, is the closed-form sum
//!
//! ```text
//! R(r) = Σ_{k=0}^{(n-m)/2} (-1)^k C(n-k, k) C(n-2k, (n-m)/2-k) r^(n-2k)
//! ```
//!
//! and the polynomial is `R(ρ/radius) cos(mφ)` for `l >= 0` or `R(ρ/radius) sin(mφ)`
//! for `l < 0`, set to zero outside the disk.

use crate::{mesh::PolarMesh, modes::ZernikePair};
use nalgebra::DMatrix;

/// Binomial coefficient `C(n, k)`
pub fn binomial(n: u32, k: u32) -> f64 {
    if k > n {
        return 0f64;
    }
    let k = k.min(n - k);
    (1..=k)
        .fold(1f64, |c, i| c * (n - k + i) as f64 / i as f64)
        .round()
}

/// Powers and coefficients of the radial polynomial terms
pub fn radial_terms(pair: ZernikePair) -> Vec<(i32, f64)> {
    let (n, m) = (pair.n(), pair.m());
    let h = (n - m) / 2;
    (0..=h)
        .map(|k| {
            let sign = if k % 2 == 0 { 1f64 } else { -1f64 };
            (
                (n - 2 * k) as i32,
                sign * binomial(n - k, k) * binomial(n - 2 * k, h - k),
            )
        })
        .collect()
}

/// Radial polynomial at the normalized radius `r`
pub fn radial_polynomial(pair: ZernikePair, r: f64) -> f64 {
    radial_terms(pair)
        .into_iter()
        .map(|(power, c)| c * r.powi(power))
        .sum()
}

/// Zernike polynomial of `pair` sampled on `mesh`
pub fn zernike_nl(pair: ZernikePair, mesh: &PolarMesh) -> DMatrix<f64> {
    let terms = radial_terms(pair);
    let m = pair.m() as f64;
    let angular = |phi: f64| {
        if pair.l() >= 0 {
            (m * phi).cos()
        } else {
            (m * phi).sin()
        }
    };
    let radius = mesh.radius;
    mesh.rho.zip_map(&mesh.phi, |rho, phi| {
        if rho <= radius {
            let r = rho / radius;
            let radial: f64 = terms.iter().map(|&(power, c)| c * r.powi(power)).sum();
            radial * angular(phi)
        } else {
            0f64
        }
    })
}
