//! Background sensor sampling.
//!
//! Spawns a thread that owns the `Sensor`, averages each batch of
//! `average_count` readings, pushes the latest `Detection` via a bounded
//! channel, and tracks the last-ok timestamp so the loop can tell a quiet
//! sensor from a dead one. Event-driven and paced variants are provided.
//!
//! A disconnected sensor is logged once per transition. In event mode the
//! thread then waits one read timeout per attempt instead of spinning.
//!
//! Each `Sampler` spawns exactly one thread, shut down and joined on drop.
use crossbeam_channel as xch;
use delta_traits::Sensor;
use delta_traits::clock::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::averager::{Detection, read_batch};

pub struct Sampler {
    rx: xch::Receiver<Detection>,
    last_ok: Arc<AtomicU64>,
    epoch: Instant,
    shutdown: Arc<AtomicBool>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl Sampler {
    /// Paced sampler: one batch, then sleep out the rest of the period.
    pub fn spawn<S, C>(sensor: S, batch: usize, hz: u32, timeout: Duration, clock: C) -> Self
    where
        S: Sensor + Send + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let period = Duration::from_micros(crate::util::period_us(hz));
        Self::spawn_inner(sensor, batch, Some(period), timeout, clock)
    }

    /// Event-driven sampler: rely on the sensor's own frame timing and do not
    /// add extra sleeps. `read(timeout)` should block until data is ready.
    pub fn spawn_event<S, C>(sensor: S, batch: usize, timeout: Duration, clock: C) -> Self
    where
        S: Sensor + Send + 'static,
        C: Clock + Send + Sync + 'static,
    {
        Self::spawn_inner(sensor, batch, None, timeout, clock)
    }

    fn spawn_inner<S, C>(
        mut sensor: S,
        batch: usize,
        period: Option<Duration>,
        timeout: Duration,
        clock: C,
    ) -> Self
    where
        S: Sensor + Send + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let (tx, rx) = xch::bounded(1);
        let stale = rx.clone();
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let last_ok = Arc::new(AtomicU64::new(0));
        let last_ok_clone = last_ok.clone();
        let epoch = clock.now();

        let join_handle = std::thread::spawn(move || {
            let mut connected = true;
            loop {
                if shutdown_clone.load(Ordering::Relaxed) {
                    tracing::debug!("sampler thread received shutdown signal");
                    break;
                }
                let started = clock.now();
                let now_connected = sensor.is_connected();
                if now_connected != connected {
                    if now_connected {
                        tracing::info!("sensor reconnected");
                    } else {
                        tracing::warn!("sensor disconnected");
                    }
                    connected = now_connected;
                }
                let detection = read_batch(&mut sensor, batch, timeout);
                if let Detection::Detected(_) = detection {
                    last_ok_clone.store(clock.ms_since(epoch), Ordering::Relaxed);
                }
                // An unread batch is replaced by the fresh one.
                if let Err(xch::TrySendError::Full(d)) = tx.try_send(detection) {
                    let _ = stale.try_recv();
                    let _ = tx.try_send(d);
                }
                if shutdown_clone.load(Ordering::Relaxed) {
                    break;
                }
                match period {
                    Some(period) => clock.sleep_remaining(started, period),
                    None if !connected => clock.sleep_remaining(started, timeout),
                    None => {}
                }
            }
            tracing::trace!("sampler thread exiting cleanly");
        });

        Self {
            rx,
            last_ok,
            epoch,
            shutdown,
            join_handle: Some(join_handle),
        }
    }

    /// Newest detection published since the last call, if any.
    pub fn latest(&self) -> Option<Detection> {
        self.rx.try_iter().last()
    }

    /// Wait up to `timeout` for the next detection.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Detection> {
        self.rx.recv_timeout(timeout).ok()
    }

    pub fn epoch(&self) -> Instant {
        self.epoch
    }

    /// Milliseconds since the last successful batch, measured on the caller's
    /// clock relative to this sampler's epoch.
    pub fn stalled_for(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_ok.load(Ordering::Relaxed))
    }

    /// Convenience helper: compute stall using this sampler's epoch and a real monotonic clock.
    pub fn stalled_for_now(&self) -> u64 {
        let dur = Instant::now().saturating_duration_since(self.epoch);
        let now_ms = u64::try_from(dur.as_millis()).unwrap_or(u64::MAX);
        self.stalled_for(now_ms)
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        // The thread exits at its next flag check, at worst after one batch
        // of reads each bounded by the sensor timeout.
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => {
                    tracing::trace!("sampler thread joined successfully");
                }
                Err(e) => {
                    tracing::warn!(?e, "sampler thread panicked during shutdown");
                }
            }
        }
    }
}
