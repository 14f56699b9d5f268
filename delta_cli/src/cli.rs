//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

/// Default config location, used when `--config` is not given and the file exists.
pub const DEFAULT_CONFIG: &str = "etc/delta_config.toml";

#[derive(Parser, Debug)]
#[command(name = "delta", version, about = "Delta tracker CLI")]
pub struct Cli {
    /// Path to config TOML (typed). Defaults to etc/delta_config.toml when present.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log and report as JSON lines instead of pretty text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); overrides the config
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Follow the tracked fingertip with the mechanism
    #[command(
        long_about = "Follow the tracked fingertip with the mechanism.\n\nFrames go to stdout unless a port is given. While running, type on stdin:\n  q  stop tracking\n  r  start or stop recording the path\n  p  replay the recorded path"
    )]
    Track {
        /// Replay sensor samples from a CSV trace (x,y,z in mm per row) instead of the simulator
        #[arg(long, value_name = "CSV")]
        trace: Option<PathBuf>,
        /// Restart the trace from the top when it runs out
        #[arg(long = "loop", action = ArgAction::SetTrue, requires = "trace")]
        loop_trace: bool,
        /// Actuator serial port; overrides link.port in the config
        #[arg(long, value_name = "PORT")]
        port: Option<String>,
        /// Stop after this many tracking cycles
        #[arg(long, value_name = "N")]
        max_cycles: Option<u64>,
        /// Use direct control loop (no sampler); reads the sensor inside the control loop
        #[arg(long, action = ArgAction::SetTrue)]
        direct: bool,
    },
    /// Print where the mechanism would go from START toward END
    Clamp {
        /// Current position in inches, as x,y,z
        #[arg(long, value_name = "X,Y,Z", value_parser = parse_point, allow_hyphen_values = true)]
        start: [f64; 3],
        /// Requested destination in inches, as x,y,z
        #[arg(long, value_name = "X,Y,Z", value_parser = parse_point, allow_hyphen_values = true)]
        end: [f64; 3],
    },
    /// Validate the config and check that HOME is reachable
    SelfCheck,
}

/// Parse `x,y,z` into three finite numbers.
pub fn parse_point(s: &str) -> Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got {s:?}"));
    };
    let mut out = [0.0; 3];
    for (slot, raw) in out.iter_mut().zip([x, y, z]) {
        let v: f64 = raw
            .parse()
            .map_err(|_| format!("{raw:?} is not a number"))?;
        if !v.is_finite() {
            return Err(format!("{raw:?} is not finite"));
        }
        *slot = v;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::parse_point;

    #[test]
    fn parses_signed_triples() {
        assert_eq!(parse_point("0, -1.5,-12").unwrap(), [0.0, -1.5, -12.0]);
    }

    #[test]
    fn rejects_wrong_arity_and_junk() {
        assert!(parse_point("1,2").is_err());
        assert!(parse_point("1,2,3,4").is_err());
        assert!(parse_point("1,x,3").is_err());
        assert!(parse_point("1,inf,3").is_err());
    }
}
