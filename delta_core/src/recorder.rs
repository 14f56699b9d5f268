//! In-memory path recording for later replay.

use crate::Point3;

#[derive(Debug, Default, Clone)]
pub struct PathRecorder {
    recording: bool,
    points: Vec<Point3>,
}

impl PathRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Flip recording on or off and return the new state. Starting a
    /// recording discards the previous path.
    pub fn toggle(&mut self) -> bool {
        self.recording = !self.recording;
        if self.recording {
            self.points.clear();
        }
        self.recording
    }

    /// Append a committed position while recording. Repeats of the last
    /// point are skipped.
    pub fn record(&mut self, p: Point3) {
        if !self.recording || self.points.last() == Some(&p) {
            return;
        }
        self.points.push(p);
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
