//! Batch averaging of raw tracking samples.

use crate::Point3;
use delta_traits::Reading;

/// Outcome of one averaged batch: either a usable point or nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Detection {
    Detected(Point3),
    NotDetected,
}

impl Detection {
    pub fn point(&self) -> Option<Point3> {
        match self {
            Self::Detected(p) => Some(*p),
            Self::NotDetected => None,
        }
    }
}

impl From<Reading> for Detection {
    fn from(r: Reading) -> Self {
        match r {
            Reading::Detected(xyz) => Self::Detected(Point3::from(xyz)),
            Reading::NotDetected => Self::NotDetected,
        }
    }
}

/// Average a batch. One missing sample invalidates the whole batch, and an
/// empty batch is `NotDetected`.
pub fn average<I>(samples: I) -> Detection
where
    I: IntoIterator<Item = Detection>,
{
    let mut sum = nalgebra::Vector3::<f64>::zeros();
    let mut n = 0usize;
    for s in samples {
        match s {
            Detection::Detected(p) => {
                sum += p.coords;
                n += 1;
            }
            Detection::NotDetected => return Detection::NotDetected,
        }
    }
    if n == 0 {
        return Detection::NotDetected;
    }
    Detection::Detected(Point3::from(sum / n as f64))
}

/// Read `count` samples from `sensor` and average them. Read errors count as
/// missing samples; the batch stops early on the first one.
pub fn read_batch<S: delta_traits::Sensor + ?Sized>(
    sensor: &mut S,
    count: usize,
    timeout: std::time::Duration,
) -> Detection {
    let mut batch = Vec::with_capacity(count);
    for _ in 0..count {
        if !sensor.is_connected() {
            tracing::trace!("sensor disconnected; batch abandoned");
            return Detection::NotDetected;
        }
        match sensor.read(timeout) {
            Ok(Reading::Detected(xyz)) => batch.push(Detection::Detected(Point3::from(xyz))),
            Ok(Reading::NotDetected) => return Detection::NotDetected,
            Err(e) => {
                tracing::debug!(error = %e, "sensor read failed");
                return Detection::NotDetected;
            }
        }
    }
    average(batch)
}
