//! Builder for `Controller`.
//!
//! `validate_and_build` rejects geometry the clamper cannot work with, using
//! the same section checks as config validation, and refuses to start from a
//! HOME outside the pen-valid workspace.

use std::sync::Arc;

use delta_traits::clock::{Clock, MonotonicClock};

use crate::config::*;
use crate::controller::Controller;
use crate::error::{BuildError, Result};
use crate::geometry::Workspace;
use crate::restrain::Restrainer;
use crate::transform::Transformer;

fn invalid(msg: &'static str) -> eyre::Report {
    eyre::Report::new(BuildError::InvalidConfig(msg))
}

fn validate_and_build<A: delta_traits::Actuator>(
    actuator: A,
    geometry: GeometryCfg,
    transform: TransformCfg,
    motion: MotionCfg,
    timeouts: Timeouts,
    clock: Option<Arc<dyn Clock + Send + Sync>>,
) -> Result<Controller<A>> {
    // ── Geometry and transform ───────────────────────────────────────────────
    delta_config::GeometryCfg::from(&geometry)
        .check()
        .map_err(invalid)?;
    delta_config::TransformCfg::from(&transform)
        .check()
        .map_err(invalid)?;

    // ── Motion ───────────────────────────────────────────────────────────────
    if !(motion.restrain_step.is_finite() && motion.restrain_step > 0.0) {
        return Err(invalid("restrain_step must be > 0"));
    }
    if !(motion.restrain_threshold.is_finite() && motion.restrain_threshold >= motion.restrain_step)
    {
        return Err(invalid("restrain_threshold must be >= restrain_step"));
    }
    if motion.average_count == 0 {
        return Err(invalid("average_count must be >= 1"));
    }
    if motion.cycle_ms == 0 {
        return Err(invalid("cycle_ms must be >= 1"));
    }
    if !(motion.replay_step.is_finite() && motion.replay_step > 0.0) {
        return Err(invalid("replay_step must be > 0"));
    }
    if timeouts.sensor_ms == 0 {
        return Err(invalid("sensor_ms must be >= 1"));
    }

    // ── Home ─────────────────────────────────────────────────────────────────
    let workspace = Workspace::new(geometry);
    let home = workspace.home();
    if !home.iter().all(|v| v.is_finite()) || !workspace.pen_valid(&home) {
        return Err(eyre::Report::new(BuildError::HomeNotReachable([
            home.x, home.y, home.z,
        ])));
    }

    let clock = clock.unwrap_or_else(|| Arc::new(MonotonicClock::new()));
    let restrainer = Restrainer::new(motion.restrain_threshold, motion.restrain_step);

    Ok(Controller {
        workspace,
        transformer: Transformer::new(transform),
        restrainer,
        motion,
        timeouts,
        actuator,
        clock,
        position: home,
        frames_sent: 0,
    })
}

/// Builder for `Controller`. Unset sections use the bench defaults; all of
/// them are validated on `build()`.
pub struct ControllerBuilder<A> {
    actuator: Option<A>,
    geometry: Option<GeometryCfg>,
    transform: Option<TransformCfg>,
    motion: Option<MotionCfg>,
    timeouts: Option<Timeouts>,
    clock: Option<Arc<dyn Clock + Send + Sync>>,
}

impl<A> Default for ControllerBuilder<A> {
    fn default() -> Self {
        Self {
            actuator: None,
            geometry: None,
            transform: None,
            motion: None,
            timeouts: None,
            clock: None,
        }
    }
}

impl<A: delta_traits::Actuator> ControllerBuilder<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actuator(mut self, actuator: A) -> Self {
        self.actuator = Some(actuator);
        self
    }
    pub fn with_geometry(mut self, geometry: GeometryCfg) -> Self {
        self.geometry = Some(geometry);
        self
    }
    pub fn with_transform(mut self, transform: TransformCfg) -> Self {
        self.transform = Some(transform);
        self
    }
    pub fn with_motion(mut self, motion: MotionCfg) -> Self {
        self.motion = Some(motion);
        self
    }
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = Some(timeouts);
        self
    }
    /// Take every section from a loaded config file.
    pub fn with_config(self, cfg: &delta_config::Config) -> Self {
        self.with_geometry((&cfg.geometry).into())
            .with_transform((&cfg.transform).into())
            .with_motion((&cfg.motion).into())
            .with_timeouts(cfg.into())
    }
    /// Provide a custom clock implementation; defaults to `MonotonicClock` when not provided.
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<Controller<A>> {
        let actuator = self
            .actuator
            .ok_or_else(|| eyre::Report::new(BuildError::MissingActuator))?;
        validate_and_build(
            actuator,
            self.geometry.unwrap_or_default(),
            self.transform.unwrap_or_default(),
            self.motion.unwrap_or_default(),
            self.timeouts.unwrap_or_default(),
            self.clock,
        )
    }
}
