//! `From` implementations bridging `delta_config` types to `delta_core` types.

use crate::Point3;
use crate::config::{GeometryCfg, MotionCfg, Timeouts, TransformCfg};

impl From<&delta_config::GeometryCfg> for GeometryCfg {
    fn from(c: &delta_config::GeometryCfg) -> Self {
        Self {
            r_max: c.r_max,
            z_min: c.z_min,
            z_max: c.z_max,
            x_rct_min: c.x_rct_min,
            x_rct_max: c.x_rct_max,
            y_rct_min: c.y_rct_min,
            y_rct_max: c.y_rct_max,
            z_paper: c.z_paper,
            z_clamp: c.z_clamp,
            pen_dist: c.pen_dist,
            home: Point3::from(c.home),
        }
    }
}

impl From<&delta_config::TransformCfg> for TransformCfg {
    fn from(c: &delta_config::TransformCfg) -> Self {
        Self {
            offset: c.offset,
            scale: c.scale,
            mm_per_inch: c.mm_per_inch,
        }
    }
}

impl From<&delta_config::MotionCfg> for MotionCfg {
    fn from(c: &delta_config::MotionCfg) -> Self {
        Self {
            restrain_threshold: c.restrain_threshold_in,
            restrain_step: c.restrain_step_in,
            average_count: c.average_count,
            cycle_ms: c.cycle_ms,
            replay_step: c.replay_step_in,
        }
    }
}

// Reverse direction, so the builder runs the same section checks as
// `delta_config::Config::validate`.
impl From<&GeometryCfg> for delta_config::GeometryCfg {
    fn from(g: &GeometryCfg) -> Self {
        Self {
            r_max: g.r_max,
            z_min: g.z_min,
            z_max: g.z_max,
            x_rct_min: g.x_rct_min,
            x_rct_max: g.x_rct_max,
            y_rct_min: g.y_rct_min,
            y_rct_max: g.y_rct_max,
            z_paper: g.z_paper,
            z_clamp: g.z_clamp,
            pen_dist: g.pen_dist,
            home: [g.home.x, g.home.y, g.home.z],
        }
    }
}

impl From<&TransformCfg> for delta_config::TransformCfg {
    fn from(t: &TransformCfg) -> Self {
        Self {
            offset: t.offset,
            scale: t.scale,
            mm_per_inch: t.mm_per_inch,
        }
    }
}

/// Timeouts come from two config sections.
impl From<&delta_config::Config> for Timeouts {
    fn from(c: &delta_config::Config) -> Self {
        Self {
            sensor_ms: c.sensor.read_timeout_ms,
            frame_delay_ms: c.link.frame_delay_ms,
        }
    }
}
