mod cli;
mod error_fmt;
mod listener;
mod track;

use std::path::{Path, PathBuf};

use clap::Parser;
use delta_core::{ControllerBuilder, DeltaError, Point3};
use eyre::{Result, WrapErr};

use crate::cli::{Cli, Commands, DEFAULT_CONFIG, FILE_GUARD, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let _ = color_eyre::install();
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = real_main(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            println!("{}", format_error_json(&e));
        } else {
            println!("{}", humanize(&e));
        }
        tracing::error!(error = %e, "command failed");
        eprintln!("{e:?}");
        std::process::exit(exit_code_for_error(&e));
    }
}

fn real_main(cli: Cli) -> Result<()> {
    let cfg = load_config(cli.config.as_deref())?;
    init_tracing(cli.json, cli.log_level.as_deref(), &cfg.logging)?;

    match cli.cmd {
        Commands::Track {
            trace,
            loop_trace,
            port,
            max_cycles,
            direct,
        } => {
            let args = track::TrackArgs {
                trace,
                loop_trace,
                port,
                max_cycles,
                direct,
            };
            let summary = track::run_track(&cfg, &args)?;
            println!("{}", track::format_summary(&summary, cli.json));
        }
        Commands::Clamp { start, end } => {
            let ws = delta_core::Workspace::new((&cfg.geometry).into());
            let (start, end) = (Point3::from(start), Point3::from(end));
            let out = ws.clamp(&start, &end);
            let zone = ws.classify(&out);
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "start": [start.x, start.y, start.z],
                        "end": [end.x, end.y, end.z],
                        "clamped": [out.x, out.y, out.z],
                        "start_zone": format!("{:?}", ws.classify(&start)),
                        "zone": format!("{zone:?}"),
                    })
                );
            } else {
                println!("{:.4},{:.4},{:.4} ({zone:?})", out.x, out.y, out.z);
            }
        }
        Commands::SelfCheck => {
            // The builder runs the full validation, HOME reachability included.
            let controller = ControllerBuilder::new()
                .with_actuator(delta_hardware::WriterActuator::new(std::io::sink()))
                .with_config(&cfg)
                .build()?;
            let home = controller.position();
            let zone = controller.workspace().classify(&home);
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "ok": true, "home": [home.x, home.y, home.z], "zone": format!("{zone:?}") })
                );
            } else {
                println!(
                    "ok: home ({:.4}, {:.4}, {:.4}) in {zone:?}",
                    home.x, home.y, home.z
                );
            }
        }
    }
    Ok(())
}

/// Explicit path, else the default path when it exists, else built-in defaults.
fn load_config(explicit: Option<&Path>) -> Result<delta_config::Config> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG)).filter(|p| p.exists()),
    };
    let cfg = match path {
        Some(p) => delta_config::load_file(&p)
            .map_err(|e| eyre::Report::new(DeltaError::Config(e.to_string())))?,
        None => delta_config::Config::default(),
    };
    cfg.validate()
        .map_err(|e| eyre::Report::new(DeltaError::Config(e.to_string())))?;
    Ok(cfg)
}

/// Console logs go to stderr so frames on stdout stay clean.
///
/// Level precedence: `RUST_LOG`, then `--log-level`, then `logging.level`,
/// then `info`. A configured `logging.file` adds a JSON-lines file layer.
fn init_tracing(json: bool, cli_level: Option<&str>, logging: &delta_config::Logging) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = cli_level
        .or(logging.level.as_deref())
        .unwrap_or("info");
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(level).wrap_err_with(|| format!("invalid log level {level:?}"))?,
    };

    let pretty = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });
    let console_json = json.then(|| fmt::layer().json().with_writer(std::io::stderr));

    let file = match logging.file.as_deref() {
        Some(path) => {
            let path = Path::new(path);
            let dir = path
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("logging.file {} has no file name", path.display()))?;
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().json().with_ansi(false).with_writer(writer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(console_json)
        .with(file)
        .try_init()
        .map_err(|e| eyre::eyre!("init logging: {e}"))
}
