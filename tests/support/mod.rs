//! Test support library
//! Provides various helper functions & utilities for tests.

use geo::{Coord, LineString};
use linework::float_types::{Real, TAU};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Ring of `radii.len()` vertices around `center`, vertex `i` at angle
/// `i * 2π/n` with radius `radii[i]`. Handy for seeding every shape kind the
/// classifier knows.
pub fn ring_with_radii(center: Coord<Real>, radii: &[Real]) -> LineString<Real> {
    let n = radii.len();
    LineString::new(
        radii
            .iter()
            .enumerate()
            .map(|(i, &r)| {
                let theta = TAU * i as Real / n as Real;
                Coord {
                    x: center.x + r * theta.cos(),
                    y: center.y + r * theta.sin(),
                }
            })
            .collect(),
    )
}
