//! Tracking session: hardware assembly, session wiring, and the run itself.

use std::path::PathBuf;
use std::time::Duration;

use delta_config::RunMode;
use delta_core::error::Result as CoreResult;
use delta_core::runner::{RunParams, RunSummary, SamplingMode};
use delta_core::{ControllerBuilder, Session};
use delta_traits::{Actuator, Sensor};
use eyre::WrapErr;

use crate::listener;

/// Options for one `track` invocation, after CLI parsing.
#[derive(Debug, Default)]
pub struct TrackArgs {
    pub trace: Option<PathBuf>,
    pub loop_trace: bool,
    pub port: Option<String>,
    pub max_cycles: Option<u64>,
    pub direct: bool,
}

/// Env knob for the simulator: drop every Nth sample to exercise holds.
const SIM_DROP_ENV: &str = "DELTA_SIM_DROP_EVERY";

type DynSensor = Box<dyn Sensor + Send>;
type DynActuator = Box<dyn Actuator + Send>;

fn open_sensor(args: &TrackArgs) -> CoreResult<DynSensor> {
    if let Some(path) = &args.trace {
        let trace = delta_hardware::TraceSensor::from_path(path)
            .map_err(eyre::Report::new)
            .wrap_err_with(|| format!("load trace {}", path.display()))?
            .looping(args.loop_trace);
        tracing::info!(path = %path.display(), samples = trace.len(), looping = args.loop_trace, "trace sensor");
        return Ok(Box::new(trace));
    }
    let mut sim = delta_hardware::SimulatedSensor::new();
    if let Some(n) = std::env::var(SIM_DROP_ENV)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
    {
        sim = sim.with_drop_every(n);
    }
    tracing::info!("simulated sensor");
    Ok(Box::new(sim))
}

fn open_actuator(port: Option<&str>, baud_rate: u32) -> CoreResult<DynActuator> {
    let Some(port) = port else {
        tracing::info!("frames to stdout");
        return Ok(Box::new(delta_hardware::WriterActuator::stdout()));
    };
    #[cfg(all(feature = "hardware", target_os = "linux"))]
    {
        let uart = delta_hardware::uart::UartActuator::open(port, baud_rate)
            .map_err(eyre::Report::new)
            .wrap_err_with(|| format!("open link {port}"))?;
        Ok(Box::new(uart))
    }
    #[cfg(not(all(feature = "hardware", target_os = "linux")))]
    {
        // Without the UART driver the port is written as a plain file,
        // e.g. a tty already configured with stty.
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(port)
            .map_err(|e| eyre::Report::new(delta_core::DeltaError::Link(format!("{port}: {e}"))))
            .wrap_err_with(|| format!("open link {port}"))?;
        tracing::info!(port, baud_rate, "frames to file");
        Ok(Box::new(delta_hardware::WriterActuator::new(file)))
    }
}

/// Pick how sensor batches are acquired.
///
/// Sensors that block on their own frame timing run event-driven; the
/// simulator and traces return immediately, so without hardware the
/// sampler is paced at the control rate unless a rate is configured.
fn sampling_mode(cfg: &delta_config::Config, direct: bool) -> SamplingMode {
    if direct || cfg.runner.mode == RunMode::Direct {
        return SamplingMode::Direct;
    }
    if cfg.sensor.sample_rate_hz > 0 {
        return SamplingMode::Paced(cfg.sensor.sample_rate_hz);
    }
    #[cfg(all(feature = "hardware", target_os = "linux"))]
    {
        SamplingMode::Event
    }
    #[cfg(not(all(feature = "hardware", target_os = "linux")))]
    {
        SamplingMode::Paced(delta_core::util::cycle_rate_hz(cfg.motion.cycle_ms))
    }
}

/// Open the hardware, start the session, and track until stopped.
pub fn run_track(cfg: &delta_config::Config, args: &TrackArgs) -> CoreResult<RunSummary> {
    let port = args
        .port
        .as_deref()
        .or_else(|| (!cfg.link.port.is_empty()).then_some(cfg.link.port.as_str()));

    let sensor = open_sensor(args)?;
    delta_hardware::util::wait_until_with_timeout(
        || sensor.is_connected(),
        Duration::from_millis(cfg.sensor.connect_timeout_ms),
        Duration::from_millis(50),
    )
    .map_err(eyre::Report::new)?;

    let actuator = open_actuator(port, cfg.link.baud_rate)?;
    let mut controller = ControllerBuilder::new()
        .with_actuator(actuator)
        .with_config(cfg)
        .build()?;

    let session = Session::new(controller.position());
    let handle = session.handle();
    {
        let h = handle.clone();
        if let Err(e) = ctrlc::set_handler(move || h.stop()) {
            tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        }
    }
    if let Err(e) = listener::spawn_stdin(handle) {
        tracing::warn!(error = %e, "stdin listener unavailable; use Ctrl-C to stop");
    }

    let params = RunParams {
        mode: sampling_mode(cfg, args.direct),
        max_cycles: args.max_cycles,
    };
    delta_core::runner::run(sensor, &mut controller, &session, params)
}

/// Summary line for the operator.
pub fn format_summary(s: &RunSummary, json: bool) -> String {
    let p = s.final_position;
    if json {
        serde_json::json!({
            "cycles": s.cycles,
            "moves": s.moves,
            "held": s.held,
            "replayed": s.replayed,
            "final_position": [p.x, p.y, p.z],
        })
        .to_string()
    } else {
        format!(
            "tracking stopped: cycles={} moves={} held={} replayed={} final=({:.3}, {:.3}, {:.3})",
            s.cycles, s.moves, s.held, s.replayed, p.x, p.y, p.z
        )
    }
}
