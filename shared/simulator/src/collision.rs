//! Closed-form collision queries between pairs of ships.
//!
//! Every function here is pure. Passing the same ship as both arguments is a
//! defined case: a ship is at distance zero from itself, always overlaps
//! itself and never collides with itself.

use crate::ship::Ship;
use nalgebra::{point, Point2};

fn is_same(a: &Ship, b: &Ship) -> bool {
    std::ptr::eq(a, b)
}

/// Distance between the hulls of two ships, negative when they overlap.
pub fn distance_between(a: &Ship, b: &Ship) -> f64 {
    if is_same(a, b) {
        return 0.0;
    }
    (a.position() - b.position()).norm() - (a.radius() + b.radius())
}

pub fn overlap(a: &Ship, b: &Ship) -> bool {
    if is_same(a, b) {
        return true;
    }
    distance_between(a, b) < 0.0
}

/// Seconds until the hulls of `a` and `b` first touch, or infinity if they
/// never do while approaching each other.
///
/// Ships that already overlap and are still closing report the (negative)
/// time at which they first touched.
pub fn time_to_collision(a: &Ship, b: &Ship) -> f64 {
    if is_same(a, b) {
        return f64::INFINITY;
    }
    let dv = a.velocity() - b.velocity();
    let dr = a.position() - b.position();
    let sigma = a.radius() + b.radius();

    let qa = dv.dot(&dv);
    let qb = dv.dot(&dr);
    let qc = dr.dot(&dr) - sigma * sigma;
    let d = qb * qb - qa * qc;

    // NaN from overflowing products counts as no collision.
    if qa == 0.0 || qb >= 0.0 || !(d > 0.0) {
        return f64::INFINITY;
    }
    let t = (-qb - d.sqrt()) / qa;
    if t.is_finite() {
        t
    } else {
        f64::INFINITY
    }
}

/// Point where `a` touches `b` at the predicted collision instant.
///
/// The offset from `a`'s center uses the absolute coordinate deltas between
/// the two projected centers, so it always points into the +x/+y quadrant.
pub fn collision_position(a: &Ship, b: &Ship) -> Option<Point2<f64>> {
    let t = time_to_collision(a, b);
    if t == f64::INFINITY {
        return None;
    }
    let pa = a.position() + a.velocity() * t;
    let pb = b.position() + b.velocity() * t;
    let sigma = a.radius() + b.radius();
    let cos = (pa.x - pb.x).abs() / sigma;
    let sin = (pa.y - pb.y).abs() / sigma;
    Some(point![pa.x + cos * a.radius(), pa.y + sin * a.radius()])
}
