//! Test and helper mocks for delta_core

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use delta_traits::Reading;

type BoxErr = Box<dyn std::error::Error + Send + Sync>;

/// A sensor that always errors on read; useful when driving the controller
/// with externally averaged detections via `Controller::step`.
pub struct NoopSensor;

impl delta_traits::Sensor for NoopSensor {
    fn read(&mut self, _timeout: std::time::Duration) -> Result<Reading, BoxErr> {
        Err(Box::new(std::io::Error::other("noop sensor")))
    }
}

/// Replays a fixed list of readings, then reports `NotDetected` forever.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSensor {
    script: VecDeque<Reading>,
}

impl ScriptedSensor {
    pub fn new(readings: impl IntoIterator<Item = Reading>) -> Self {
        Self {
            script: readings.into_iter().collect(),
        }
    }

    /// Every point repeated `count` times, so each one fills a whole batch.
    pub fn batched(points: &[[f64; 3]], count: usize) -> Self {
        Self::new(
            points
                .iter()
                .flat_map(|p| std::iter::repeat_n(Reading::Detected(*p), count)),
        )
    }
}

impl delta_traits::Sensor for ScriptedSensor {
    fn read(&mut self, _timeout: std::time::Duration) -> Result<Reading, BoxErr> {
        Ok(self.script.pop_front().unwrap_or(Reading::NotDetected))
    }
}

/// Captures every frame; clones share the same log.
#[derive(Debug, Default, Clone)]
pub struct RecordingActuator {
    frames: Arc<Mutex<Vec<String>>>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<String> {
        self.frames
            .lock()
            .map(|f| f.clone())
            .unwrap_or_default()
    }
}

impl delta_traits::Actuator for RecordingActuator {
    fn send_frame(&mut self, frame: &str) -> Result<(), BoxErr> {
        self.frames
            .lock()
            .map_err(|_| std::io::Error::other("frame log poisoned"))?
            .push(frame.to_owned());
        Ok(())
    }
}
