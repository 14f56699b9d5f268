use std::time::Duration;

use rppal::uart::{Parity, Uart};

use crate::error::{HwError, Result};

/// Serial link to the mechanism's controller board, 8N1.
pub struct UartActuator {
    uart: Uart,
}

impl UartActuator {
    pub fn open(port: &str, baud_rate: u32) -> Result<Self> {
        let mut uart = Uart::with_path(port, baud_rate, Parity::None, 8, 1)
            .map_err(|e| HwError::Uart(format!("{port}: {e}")))?;
        uart.set_write_mode(true)
            .map_err(|e| HwError::Uart(e.to_string()))?;
        tracing::info!(port, baud_rate, "uart open");
        Ok(Self { uart })
    }

    fn write_all(&mut self, mut bytes: &[u8]) -> Result<()> {
        let mut stalls = 0;
        while !bytes.is_empty() {
            let n = self
                .uart
                .write(bytes)
                .map_err(|e| HwError::Uart(e.to_string()))?;
            if n == 0 {
                stalls += 1;
                if stalls > 3 {
                    return Err(HwError::Timeout);
                }
                tracing::warn!(retries = stalls, "uart write stalled, retrying");
                std::thread::sleep(Duration::from_millis(1));
                continue;
            }
            bytes = &bytes[n..];
        }
        self.uart.drain().map_err(|e| HwError::Uart(e.to_string()))
    }
}

impl delta_traits::Actuator for UartActuator {
    fn send_frame(
        &mut self,
        frame: &str,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.write_all(frame.as_bytes())?;
        tracing::trace!(frame, "uart frame written");
        Ok(())
    }
}
