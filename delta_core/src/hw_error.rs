//! Maps `Box<dyn Error>` from trait boundaries to typed `DeltaError`.
//!
//! With the `hardware-errors` feature, `delta_hardware::HwError` is downcast
//! for a precise mapping; otherwise the message is inspected.

use crate::error::DeltaError;

/// Map a sensor-side error to a typed `DeltaError`.
pub fn map_hw_error(e: &(dyn std::error::Error + 'static)) -> DeltaError {
    #[cfg(feature = "hardware-errors")]
    {
        use delta_hardware::error::HwError;
        if let Some(hw) = e.downcast_ref::<HwError>() {
            return match hw {
                HwError::Timeout | HwError::ConnectTimeout => DeltaError::Timeout,
                HwError::Uart(msg) => DeltaError::Link(msg.clone()),
                other => DeltaError::HardwareFault(other.to_string()),
            };
        }
    }

    let s = e.to_string();
    if s.to_lowercase().contains("timeout") {
        DeltaError::Timeout
    } else {
        DeltaError::Hardware(s)
    }
}

/// Map an actuator-side error. Every failure to deliver a frame, a stalled
/// write included, is a link error.
pub fn map_link_error(e: &(dyn std::error::Error + 'static)) -> DeltaError {
    match map_hw_error(e) {
        DeltaError::Timeout => DeltaError::Link(format!("write timed out: {e}")),
        DeltaError::Link(s) | DeltaError::Hardware(s) | DeltaError::HardwareFault(s) => {
            DeltaError::Link(s)
        }
        other => other,
    }
}
