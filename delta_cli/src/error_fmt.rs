//! Human-readable error descriptions and structured JSON error formatting.

use delta_core::error::{BuildError, DeltaError};
use delta_hardware::error::HwError;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingActuator => {
                "What happened: No actuator was provided to the controller.\nLikely causes: The actuator link failed to open or was not wired into the builder.\nHow to fix: Ensure the link is created successfully and passed via with_actuator(...).".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. See etc/delta_config.toml for a sample."
            ),
            BuildError::HomeNotReachable([x, y, z]) => format!(
                "What happened: HOME ({x}, {y}, {z}) is outside the pen-valid workspace.\nLikely causes: geometry.home does not fit the configured cylinder/prism, or pen_dist pushes the tip below the floor.\nHow to fix: Move geometry.home inside the workspace, then run `delta_cli self-check`."
            ),
        };
    }

    if let Some(he) = err.downcast_ref::<HwError>() {
        match he {
            HwError::ConnectTimeout => {
                return "What happened: The tracking sensor never reported a connection.\nLikely causes: Sensor unplugged, its service not running, or sensor.connect_timeout_ms too low.\nHow to fix: Check the sensor, then raise sensor.connect_timeout_ms if it is slow to start.".to_string();
            }
            HwError::Trace(msg) => {
                return format!(
                    "What happened: The sensor trace could not be read ({msg}).\nLikely causes: A row without three x,y,z fields or a non-numeric value.\nHow to fix: Fix the CSV; leave all three fields empty for a no-detection row."
                );
            }
            HwError::Uart(msg) => {
                return format!(
                    "What happened: The actuator serial link failed ({msg}).\nLikely causes: Wrong port, cable unplugged, or insufficient permissions on the device.\nHow to fix: Check link.port (or --port) and that the user may open it."
                );
            }
            HwError::Timeout | HwError::Io(_) => {}
        }
    }

    if let Some(de) = err.downcast_ref::<DeltaError>() {
        return match de {
            DeltaError::Timeout => "What happened: Sensor read timed out.\nLikely causes: Sensor disconnected or sensor.read_timeout_ms too low.\nHow to fix: Check the sensor connection and consider increasing sensor.read_timeout_ms in the config.".to_string(),
            DeltaError::Link(msg) => format!(
                "What happened: Could not send a frame to the mechanism ({msg}).\nLikely causes: Serial cable unplugged, controller board reset, or the output closed.\nHow to fix: Check the link, then start a new session; the mechanism holds its last position."
            ),
            DeltaError::Config(msg) if msg.starts_with("read config") => format!(
                "What happened: The config file could not be loaded ({msg}).\nLikely causes: Wrong --config path or missing read permission.\nHow to fix: Check the path, or omit --config to use etc/delta_config.toml or the built-in defaults."
            ),
            DeltaError::Config(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun."
            ),
            other => format!(
                "What happened: {other}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    // String-based heuristics for errors from file handling
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("open link") {
        return format!(
            "What happened: Failed to open the actuator link.\nLikely causes: Wrong port path or insufficient permissions.\nHow to fix: Check link.port (or --port). Original: {msg}"
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable reason name for the JSON error object.
pub fn reason_name(err: &eyre::Report) -> &'static str {
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingActuator => "MissingActuator",
            BuildError::InvalidConfig(_) => "InvalidConfig",
            BuildError::HomeNotReachable(_) => "HomeNotReachable",
        };
    }
    if let Some(he) = err.downcast_ref::<HwError>() {
        match he {
            HwError::ConnectTimeout => return "SensorConnectTimeout",
            HwError::Trace(_) => return "BadTrace",
            HwError::Uart(_) => return "Link",
            HwError::Timeout | HwError::Io(_) => {}
        }
    }
    match err.downcast_ref::<DeltaError>() {
        Some(DeltaError::Config(_)) => "InvalidConfig",
        Some(DeltaError::Link(_)) => "Link",
        Some(DeltaError::Timeout) => "SensorTimeout",
        _ => "Error",
    }
}

/// Map error kinds to stable exit codes: 3 config, 4 actuator link,
/// 5 sensor, 1 anything else.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match reason_name(err) {
        "MissingActuator" | "InvalidConfig" | "HomeNotReachable" => 3,
        "Link" => 4,
        "SensorConnectTimeout" | "SensorTimeout" | "BadTrace" => 5,
        _ => 1,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = reason_name(err);
    if let Some(BuildError::HomeNotReachable(home)) = err.downcast_ref::<BuildError>() {
        return json!({ "reason": reason, "details": { "home": home }, "message": humanize(err) })
            .to_string();
    }
    json!({ "reason": reason, "message": humanize(err) }).to_string()
}
