//! Per-cycle move limiting.

use crate::{Point3, Vector3};

/// Unit vector from `from` toward `to`, or `None` when they coincide.
#[inline]
pub fn direction(from: &Point3, to: &Point3) -> Option<Vector3> {
    (to - from).try_normalize(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Restrainer {
    /// Moves up to this length pass through unchanged.
    pub threshold: f64,
    /// Length of a restrained move.
    pub step: f64,
}

impl Restrainer {
    pub fn new(threshold: f64, step: f64) -> Self {
        Self { threshold, step }
    }

    /// Return `end` if it is within `threshold` of `start`, else the point
    /// `step` away from `start` toward `end`.
    pub fn apply(&self, start: &Point3, end: &Point3) -> Point3 {
        if nalgebra::distance(start, end) <= self.threshold {
            return *end;
        }
        match direction(start, end) {
            Some(dir) => start + dir * self.step,
            None => *start,
        }
    }
}

impl Default for Restrainer {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_moves_pass_through() {
        let r = Restrainer::default();
        let a = Point3::new(0.0, 0.0, -9.0);
        let b = Point3::new(0.6, 0.8, -9.0);
        assert_eq!(r.apply(&a, &b), b);
    }

    #[test]
    fn long_moves_are_cut_to_one_step() {
        let r = Restrainer::new(1.0, 0.5);
        let a = Point3::new(0.0, 0.0, -9.0);
        let b = Point3::new(3.0, 4.0, -9.0);
        let out = r.apply(&a, &b);
        assert!((nalgebra::distance(&a, &out) - 0.5).abs() < 1e-12);
        assert!((out.x - 0.3).abs() < 1e-12);
        assert!((out.y - 0.4).abs() < 1e-12);
    }

    #[test]
    fn zero_length_move_stays_put() {
        // A negative threshold forces the direction path even for a null move.
        let r = Restrainer::new(-1.0, 1.0);
        let a = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(r.apply(&a, &a), a);
        assert!(direction(&a, &a).is_none());
    }
}
