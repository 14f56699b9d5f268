pub mod error;
pub mod trace;
pub mod util;

#[cfg(all(feature = "hardware", target_os = "linux"))]
pub mod uart;

use std::io::Write;

use delta_traits::{Actuator, Reading, Sensor};

pub use trace::TraceSensor;

type BoxErr = Box<dyn std::error::Error + Send + Sync>;

/// Simulated tracking sensor: a fingertip circling slowly over the sensor.
///
/// Coordinates are sensor-frame millimeters with a little deterministic
/// jitter. Optionally drops every `n`th sample to exercise the hold path.
pub struct SimulatedSensor {
    center_mm: [f64; 3],
    radius_mm: f64,
    samples_per_rev: u32,
    jitter_mm: f64,
    drop_every: Option<u64>,
    tick: u64,
    rng: u32,
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSensor {
    pub fn new() -> Self {
        Self {
            center_mm: [0.0, 203.2, 0.0],
            radius_mm: 30.0,
            samples_per_rev: 2_000,
            jitter_mm: 0.5,
            drop_every: None,
            tick: 0,
            rng: 0x2545_f491,
        }
    }

    pub fn with_drop_every(mut self, n: u64) -> Self {
        self.drop_every = (n > 0).then_some(n);
        self
    }

    // xorshift32, mapped to [-1, 1)
    fn noise(&mut self) -> f64 {
        let mut x = self.rng;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng = x;
        f64::from(x) / f64::from(u32::MAX) * 2.0 - 1.0
    }
}

impl Sensor for SimulatedSensor {
    fn read(&mut self, _timeout: std::time::Duration) -> Result<Reading, BoxErr> {
        self.tick = self.tick.wrapping_add(1);
        if let Some(n) = self.drop_every {
            if self.tick % n == 0 {
                return Ok(Reading::NotDetected);
            }
        }
        let phase = (self.tick % u64::from(self.samples_per_rev.max(1))) as f64
            / f64::from(self.samples_per_rev.max(1));
        let (sin, cos) = (phase * std::f64::consts::TAU).sin_cos();
        let [cx, cy, cz] = self.center_mm;
        Ok(Reading::Detected([
            cx + self.radius_mm * cos + self.jitter_mm * self.noise(),
            cy + self.jitter_mm * self.noise(),
            cz + self.radius_mm * sin + self.jitter_mm * self.noise(),
        ]))
    }
}

/// Actuator that writes each frame as a line to any `Write`, e.g. stdout or
/// a serial device opened as a file.
pub struct WriterActuator<W: Write> {
    out: W,
}

impl<W: Write> WriterActuator<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl WriterActuator<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Actuator for WriterActuator<W> {
    fn send_frame(&mut self, frame: &str) -> Result<(), BoxErr> {
        writeln!(self.out, "{frame}").map_err(error::HwError::from)?;
        self.out.flush().map_err(error::HwError::from)?;
        Ok(())
    }
}
