//! The per-cycle motion pipeline.
//!
//! One cycle takes an averaged detection through transform, clamp and
//! restrain, emits the result as a frame, waits out the inter-frame delay,
//! and only then commits it as the new commanded position. A held cycle
//! emits nothing.

use std::sync::Arc;
use std::time::Duration;

use delta_traits::clock::Clock;
use eyre::WrapErr;

use crate::Point3;
use crate::averager::Detection;
use crate::config::{MotionCfg, Timeouts};
use crate::error::Result;
use crate::frame;
use crate::geometry::Workspace;
use crate::hw_error::map_link_error;
use crate::restrain::Restrainer;
use crate::status::CycleStatus;
use crate::transform::Transformer;

pub struct Controller<A: delta_traits::Actuator> {
    pub(crate) workspace: Workspace,
    pub(crate) transformer: Transformer,
    pub(crate) restrainer: Restrainer,
    pub(crate) motion: MotionCfg,
    pub(crate) timeouts: Timeouts,
    pub(crate) actuator: A,
    pub(crate) clock: Arc<dyn Clock + Send + Sync>,
    pub(crate) position: Point3,
    pub(crate) frames_sent: u64,
}

impl<A: delta_traits::Actuator> core::fmt::Debug for Controller<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("position", &self.position)
            .field("frames_sent", &self.frames_sent)
            .finish()
    }
}

impl<A: delta_traits::Actuator> Controller<A> {
    /// Last committed position, mechanism frame.
    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }

    pub fn motion(&self) -> &MotionCfg {
        &self.motion
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    pub fn clock(&self) -> &Arc<dyn Clock + Send + Sync> {
        &self.clock
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Bring a mechanism-frame target to a safe move from the current position.
    pub fn constrain(&self, target: &Point3) -> Point3 {
        let clamped = self.workspace.clamp(&self.position, target);
        self.restrainer.apply(&self.position, &clamped)
    }

    /// Where this detection would send the mechanism, without moving it.
    ///
    /// Non-finite sensor output is treated as no detection.
    pub fn plan(&self, detection: Detection) -> Option<Point3> {
        let raw = detection.point()?;
        if !raw.iter().all(|v| v.is_finite()) {
            tracing::warn!(?raw, "non-finite sample dropped");
            return None;
        }
        let desired = self.transformer.apply(&raw);
        Some(self.constrain(&desired))
    }

    /// Run one control cycle for an averaged detection.
    pub fn step(&mut self, detection: Detection) -> Result<CycleStatus> {
        match self.plan(detection) {
            Some(next) => {
                self.emit(&next)?;
                Ok(CycleStatus::Moved(next))
            }
            None => {
                tracing::debug!(position = ?self.position, "no detection, holding");
                Ok(CycleStatus::Hold)
            }
        }
    }

    /// Constrain and emit a mechanism-frame target, e.g. a replayed point.
    pub fn move_toward(&mut self, target: &Point3) -> Result<Point3> {
        let next = self.constrain(target);
        self.emit(&next)?;
        Ok(next)
    }

    /// Send the current position again. Used once at session start so the
    /// actuator and the controller agree on where the mechanism is.
    pub fn announce(&mut self) -> Result<()> {
        let here = self.position;
        self.emit(&here)
    }

    fn emit(&mut self, p: &Point3) -> Result<()> {
        let line = frame::encode(p);
        self.actuator
            .send_frame(&line)
            .map_err(|e| eyre::Report::new(map_link_error(&*e)))
            .wrap_err("sending frame")?;
        self.frames_sent += 1;
        self.clock
            .sleep(Duration::from_millis(self.timeouts.frame_delay_ms));
        tracing::debug!(frame = %line, "frame sent");
        self.position = *p;
        Ok(())
    }
}
