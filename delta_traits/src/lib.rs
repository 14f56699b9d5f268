pub mod clock;

pub use clock::{Clock, MonotonicClock};

/// One raw reading from the tracking sensor, in sensor-frame millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Detected([f64; 3]),
    NotDetected,
}

pub trait Sensor {
    /// Read one sample, waiting at most `timeout` for the device.
    fn read(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<Reading, Box<dyn std::error::Error + Send + Sync>>;

    /// Whether the device link is currently up.
    fn is_connected(&self) -> bool {
        true
    }
}

pub trait Actuator {
    /// Write one encoded command frame to the mechanism.
    fn send_frame(&mut self, frame: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

impl<T: Sensor + ?Sized> Sensor for Box<T> {
    fn read(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<Reading, Box<dyn std::error::Error + Send + Sync>> {
        (**self).read(timeout)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}

impl<T: Actuator + ?Sized> Actuator for Box<T> {
    fn send_frame(&mut self, frame: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        (**self).send_frame(frame)
    }
}
