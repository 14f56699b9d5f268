//! Outcome of one control cycle.

use crate::Point3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleStatus {
    /// Nothing usable was detected; the actuator keeps its position.
    Hold,
    /// A new confirmed position was commanded.
    Moved(Point3),
}
