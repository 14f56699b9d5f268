//! Evenly spaced points along a segment, for recorded-path replay.

use crate::{Point3, Vector3};

/// Iterator over points from `from` toward `to`, `step` apart, ending on `to`.
///
/// Yields `from`, then `from + k * step` for as long as the previous point was
/// at least `step` short of `to`, then `to` itself. The last stride may be
/// shorter than `step`. A zero-length segment yields `to` once.
#[derive(Debug, Clone)]
pub struct Interpolate {
    from: Point3,
    to: Point3,
    dir: Option<Vector3>,
    step: f64,
    len: f64,
    k: u64,
    done: bool,
}

pub fn interpolate(from: Point3, to: Point3, step: f64) -> Interpolate {
    let dir = crate::restrain::direction(&from, &to);
    let step = if step.is_finite() && step > 0.0 {
        step
    } else {
        f64::INFINITY
    };
    Interpolate {
        from,
        to,
        dir,
        step,
        len: nalgebra::distance(&from, &to),
        k: 0,
        done: false,
    }
}

impl Iterator for Interpolate {
    type Item = Point3;

    fn next(&mut self) -> Option<Point3> {
        if self.done {
            return None;
        }
        let Some(dir) = self.dir else {
            self.done = true;
            return Some(self.to);
        };
        if self.k == 0 {
            self.k = 1;
            return Some(self.from);
        }
        let along = self.step * self.k as f64;
        let remaining_before = self.len - (along - self.step);
        let remaining_after = self.len - along;
        // Intermediate points stop strictly short of `to` so it is never repeated.
        if remaining_before >= self.step && remaining_after > self.step * 1e-9 {
            self.k += 1;
            return Some(self.from + dir * along);
        }
        self.done = true;
        Some(self.to)
    }
}

impl std::iter::FusedIterator for Interpolate {}
