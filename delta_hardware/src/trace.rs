//! Recorded tracking sessions played back as a sensor.
//!
//! A trace is CSV with one sample per row: `x,y,z` in sensor millimeters.
//! A row with all three fields empty is a frame where nothing was detected.
//! Lines starting with `#` are comments. There is no header row.

use std::io::Read;
use std::path::Path;

use delta_traits::{Reading, Sensor};

use crate::error::{HwError, Result};

#[derive(Debug, Clone)]
pub struct TraceSensor {
    samples: Vec<Reading>,
    next: usize,
    looping: bool,
}

impl TraceSensor {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(rdr);

        let mut samples = Vec::new();
        for (i, rec) in csv.records().enumerate() {
            let rec = rec.map_err(|e| HwError::Trace(e.to_string()))?;
            let row = i + 1;
            if rec.len() != 3 {
                return Err(HwError::Trace(format!(
                    "row {row}: expected 3 fields, got {}",
                    rec.len()
                )));
            }
            if rec.iter().all(str::is_empty) {
                samples.push(Reading::NotDetected);
                continue;
            }
            let mut xyz = [0.0; 3];
            for (slot, field) in xyz.iter_mut().zip(rec.iter()) {
                *slot = field
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| HwError::Trace(format!("row {row}: bad value {field:?}")))?;
            }
            samples.push(Reading::Detected(xyz));
        }
        tracing::debug!(samples = samples.len(), "trace loaded");
        Ok(Self {
            samples,
            next: 0,
            looping: false,
        })
    }

    /// Start over from the first sample instead of disconnecting at the end.
    pub fn looping(mut self, on: bool) -> Self {
        self.looping = on;
        self
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Sensor for TraceSensor {
    fn read(
        &mut self,
        _timeout: std::time::Duration,
    ) -> std::result::Result<Reading, Box<dyn std::error::Error + Send + Sync>> {
        if self.next >= self.samples.len() {
            if !self.looping || self.samples.is_empty() {
                return Ok(Reading::NotDetected);
            }
            self.next = 0;
        }
        let r = self.samples[self.next];
        self.next += 1;
        Ok(r)
    }

    /// A finished, non-looping trace reports a lost link.
    fn is_connected(&self) -> bool {
        self.looping || self.next < self.samples.len()
    }
}
