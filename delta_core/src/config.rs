//! Runtime configuration types for the tracking pipeline.
//!
//! These are the structs the core works with. They are separate from the
//! TOML-deserialized config in `delta_config`; see `conversions`.

use crate::Point3;

/// Mechanism workspace, in inches, mechanism frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCfg {
    /// Radius of the reachable cylinder about the z axis.
    pub r_max: f64,
    /// Lowest endpoint height.
    pub z_min: f64,
    /// Highest endpoint height.
    pub z_max: f64,
    pub x_rct_min: f64,
    pub x_rct_max: f64,
    pub y_rct_min: f64,
    pub y_rct_max: f64,
    /// Working surface; floor of the prism zone for the pen tip.
    pub z_paper: f64,
    /// Boundary plane between the cylinder zone and the prism zone.
    pub z_clamp: f64,
    /// Pen protrusion below the endpoint.
    pub pen_dist: f64,
    /// Power-up position. Must be pen-valid.
    pub home: Point3,
}

impl Default for GeometryCfg {
    fn default() -> Self {
        Self {
            r_max: 6.0,
            z_min: -13.0,
            z_max: -8.0,
            x_rct_min: -4.5,
            x_rct_max: 4.5,
            y_rct_min: -3.75,
            y_rct_max: 3.75,
            z_paper: -14.5,
            z_clamp: -13.5,
            pen_dist: 2.0,
            home: Point3::new(0.0, 0.0, -8.5064),
        }
    }
}

/// Sensor-frame (mm) to mechanism-frame (in) mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformCfg {
    pub offset: [f64; 3],
    pub scale: [f64; 3],
    pub mm_per_inch: f64,
}

impl Default for TransformCfg {
    fn default() -> Self {
        Self {
            offset: [0.0, 0.0, -20.0],
            scale: [3.0, 3.0, 0.75],
            mm_per_inch: 25.4,
        }
    }
}

/// Per-cycle motion limits and pacing.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionCfg {
    /// Moves up to this distance pass through unchanged.
    pub restrain_threshold: f64,
    /// Length of a move once it exceeds the threshold.
    pub restrain_step: f64,
    /// Raw samples averaged into one detection.
    pub average_count: usize,
    /// Fixed control-cycle period in milliseconds.
    pub cycle_ms: u64,
    /// Point spacing when replaying a recorded path.
    pub replay_step: f64,
}

impl Default for MotionCfg {
    fn default() -> Self {
        Self {
            restrain_threshold: 1.0,
            restrain_step: 1.0,
            average_count: 25,
            cycle_ms: 100,
            replay_step: 0.1,
        }
    }
}

/// Timeouts and pacing at the I/O seams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeouts {
    /// Max wait per raw sensor read (ms).
    pub sensor_ms: u64,
    /// Pause after every emitted frame (ms).
    pub frame_delay_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            sensor_ms: 50,
            frame_delay_ms: 10,
        }
    }
}
