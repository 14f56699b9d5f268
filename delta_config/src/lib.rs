#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the delta tracker.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//! - Every section has defaults matching the bench mechanism, so a config file
//!   only needs to carry what differs (typically `[link]`).
use serde::Deserialize;

/// Reachable volume of the mechanism endpoint, in inches.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeometryCfg {
    pub r_max: f64,
    pub z_min: f64,
    pub z_max: f64,
    pub x_rct_min: f64,
    pub x_rct_max: f64,
    pub y_rct_min: f64,
    pub y_rct_max: f64,
    /// Height of the working surface; lowest the pen tip may go.
    pub z_paper: f64,
    /// Height of the clamps; below it the pen must stay inside the rectangle.
    pub z_clamp: f64,
    /// Protrusion of the pen below the endpoint.
    pub pen_dist: f64,
    pub home: [f64; 3],
}

impl Default for GeometryCfg {
    fn default() -> Self {
        // 0.01 in inside the limits enforced on the motor controller.
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
            home: [0.0, 0.0, -8.5064],
        }
    }
}

impl GeometryCfg {
    /// Workspace consistency, HOME excluded. Returns the first rule broken.
    ///
    /// Beyond ordering, the pen planes must be reachable by the endpoint and
    /// the rectangle must fit inside the circle; otherwise clamping can land
    /// on a point that is not pen-valid.
    pub fn check(&self) -> Result<(), &'static str> {
        let vals = [
            self.r_max,
            self.z_min,
            self.z_max,
            self.x_rct_min,
            self.x_rct_max,
            self.y_rct_min,
            self.y_rct_max,
            self.z_paper,
            self.z_clamp,
            self.pen_dist,
        ];
        if !vals.iter().all(|v| v.is_finite()) {
            return Err("geometry must be finite");
        }
        if self.r_max <= 0.0 {
            return Err("geometry.r_max must be > 0");
        }
        if self.z_min >= self.z_max {
            return Err("geometry.z_min must be < geometry.z_max");
        }
        if self.x_rct_min >= self.x_rct_max {
            return Err("geometry.x_rct_min must be < geometry.x_rct_max");
        }
        if self.y_rct_min >= self.y_rct_max {
            return Err("geometry.y_rct_min must be < geometry.y_rct_max");
        }
        if self.z_paper >= self.z_clamp {
            return Err("geometry.z_paper must be < geometry.z_clamp");
        }
        if self.pen_dist < 0.0 {
            return Err("geometry.pen_dist must be >= 0");
        }
        if self.z_paper + self.pen_dist < self.z_min {
            return Err("geometry.z_paper + pen_dist must be >= geometry.z_min");
        }
        if self.z_clamp + self.pen_dist > self.z_max {
            return Err("geometry.z_clamp + pen_dist must be <= geometry.z_max");
        }
        let r2 = self.r_max * self.r_max;
        let corners_inside = [self.x_rct_min, self.x_rct_max].iter().all(|x| {
            [self.y_rct_min, self.y_rct_max]
                .iter()
                .all(|y| x * x + y * y <= r2)
        });
        if !corners_inside {
            return Err("geometry rectangle corners must lie within geometry.r_max");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TransformCfg {
    /// Added after the mm->inch conversion, per mechanism axis.
    pub offset: [f64; 3],
    /// Applied last, per mechanism axis. Negative values flip the axis.
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

impl TransformCfg {
    pub fn check(&self) -> Result<(), &'static str> {
        if !self.offset.iter().chain(&self.scale).all(|v| v.is_finite()) {
            return Err("transform must be finite");
        }
        if !(self.mm_per_inch.is_finite() && self.mm_per_inch > 0.0) {
            return Err("transform.mm_per_inch must be > 0");
        }
        if self.scale.iter().any(|s| *s == 0.0) {
            return Err("transform.scale entries must be non-zero");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MotionCfg {
    /// Moves at or below this distance (in) are passed through untouched.
    pub restrain_threshold_in: f64,
    /// Length (in) of a restrained move.
    pub restrain_step_in: f64,
    /// Raw sensor samples averaged per control cycle.
    pub average_count: usize,
    /// Control cycle period.
    pub cycle_ms: u64,
    /// Spacing (in) of interpolated points during path replay.
    pub replay_step_in: f64,
}

impl Default for MotionCfg {
    fn default() -> Self {
        Self {
            restrain_threshold_in: 1.0,
            restrain_step_in: 1.0,
            average_count: 25,
            cycle_ms: 100,
            replay_step_in: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LinkCfg {
    /// Serial device, e.g. "/dev/ttyAMA0". Empty selects the simulated link.
    pub port: String,
    pub baud_rate: u32,
    /// Pause after each frame so the actuator can consume it.
    pub frame_delay_ms: u64,
}

impl Default for LinkCfg {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: 57_600,
            frame_delay_ms: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SensorCfg {
    /// Max wait for one raw sample. Also accepts alias "sample_ms".
    #[serde(alias = "sample_ms")]
    pub read_timeout_ms: u64,
    /// Max wait for the tracking device to come up at session start.
    pub connect_timeout_ms: u64,
    /// Paced sampling rate; 0 lets the device set the pace.
    pub sample_rate_hz: u32,
}

impl Default for SensorCfg {
    fn default() -> Self {
        Self {
            read_timeout_ms: 50,
            connect_timeout_ms: 5_000,
            sample_rate_hz: 0,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Background thread averages batches while the loop runs.
    #[default]
    Sampler,
    /// The control loop reads the sensor itself.
    Direct,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RunnerCfg {
    pub mode: RunMode,
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub geometry: GeometryCfg,
    #[serde(default)]
    pub transform: TransformCfg,
    #[serde(default)]
    pub motion: MotionCfg,
    #[serde(default)]
    pub link: LinkCfg,
    #[serde(default)]
    pub sensor: SensorCfg,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub runner: RunnerCfg,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

pub fn load_file(path: &std::path::Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))
}

fn ensure_finite(name: &str, vals: &[f64]) -> eyre::Result<()> {
    if vals.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        eyre::bail!("{name} must be finite")
    }
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        ensure_finite("geometry.home", &self.geometry.home)?;
        self.geometry.check().map_err(|m| eyre::eyre!("{m}"))?;
        self.transform.check().map_err(|m| eyre::eyre!("{m}"))?;

        // Motion
        let m = &self.motion;
        if !(m.restrain_threshold_in.is_finite() && m.restrain_threshold_in > 0.0) {
            eyre::bail!("motion.restrain_threshold_in must be > 0");
        }
        if !(m.restrain_step_in.is_finite() && m.restrain_step_in > 0.0) {
            eyre::bail!("motion.restrain_step_in must be > 0");
        }
        if m.restrain_step_in > m.restrain_threshold_in {
            eyre::bail!("motion.restrain_step_in must be <= motion.restrain_threshold_in");
        }
        if m.average_count == 0 {
            eyre::bail!("motion.average_count must be >= 1");
        }
        if m.cycle_ms == 0 {
            eyre::bail!("motion.cycle_ms must be >= 1");
        }
        if m.cycle_ms > 60 * 1000 {
            eyre::bail!("motion.cycle_ms is unreasonably large (>1min)");
        }
        if !(m.replay_step_in.is_finite() && m.replay_step_in > 0.0) {
            eyre::bail!("motion.replay_step_in must be > 0");
        }

        // Link
        if self.link.baud_rate == 0 {
            eyre::bail!("link.baud_rate must be > 0");
        }

        // Sensor
        if self.sensor.read_timeout_ms == 0 {
            eyre::bail!("sensor.read_timeout_ms must be >= 1");
        }
        if self.sensor.connect_timeout_ms == 0 {
            eyre::bail!("sensor.connect_timeout_ms must be >= 1");
        }

        // Logging
        if let Some(r) = self.logging.rotation.as_deref() {
            if !matches!(r, "never" | "daily" | "hourly") {
                eyre::bail!("logging.rotation must be one of never|daily|hourly, got {r:?}");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_bench_defaults() {
        let cfg = load_toml("").unwrap();
        assert_eq!(cfg.geometry.r_max, 6.0);
        assert_eq!(cfg.geometry.home, [0.0, 0.0, -8.5064]);
        assert_eq!(cfg.transform.offset, [0.0, 0.0, -20.0]);
        assert_eq!(cfg.motion.average_count, 25);
        assert_eq!(cfg.link.baud_rate, 57_600);
        assert_eq!(cfg.runner.mode, RunMode::Sampler);
        cfg.validate().unwrap();
    }

    #[test]
    fn default_sections_pass_their_checks() {
        assert_eq!(GeometryCfg::default().check(), Ok(()));
        assert_eq!(TransformCfg::default().check(), Ok(()));
    }

    #[test]
    fn sample_ms_alias_is_accepted() {
        let cfg = load_toml("[sensor]\nsample_ms = 7\n").unwrap();
        assert_eq!(cfg.sensor.read_timeout_ms, 7);
    }
}
