//! Sampler thread lifecycle and cleanup.
//!
//! Verifies that:
//! - Threads are cleaned up when Sampler is dropped
//! - Multiple samplers can be created and destroyed without accumulating threads
//! - Averaged batches actually reach the consumer
//! - An event sampler backs off while the sensor is disconnected

use delta_core::Detection;
use delta_core::mocks::{NoopSensor, ScriptedSensor};
use delta_core::sampler::Sampler;
use delta_traits::clock::MonotonicClock;
use delta_traits::{Reading, Sensor};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Reports disconnected and counts how often it is polled.
struct UnpluggedSensor {
    polls: Arc<AtomicUsize>,
}

impl Sensor for UnpluggedSensor {
    fn read(
        &mut self,
        _timeout: Duration,
    ) -> Result<Reading, Box<dyn std::error::Error + Send + Sync>> {
        self.polls.fetch_add(1, Ordering::Relaxed);
        Err(Box::new(std::io::Error::other("unplugged")))
    }

    fn is_connected(&self) -> bool {
        self.polls.fetch_add(1, Ordering::Relaxed);
        false
    }
}

#[test]
fn sampler_thread_exits_on_drop() {
    let clock = MonotonicClock::new();
    let sampler = Sampler::spawn(NoopSensor, 25, 10, Duration::from_millis(100), clock);

    std::thread::sleep(Duration::from_millis(50));

    // Drop joins the thread; the test hangs if it leaked.
    drop(sampler);
}

#[test]
fn multiple_samplers_dont_leak_threads() {
    let clock = MonotonicClock::new();

    for _ in 0..10 {
        let sampler = Sampler::spawn(NoopSensor, 25, 10, Duration::from_millis(50), clock.clone());
        std::thread::sleep(Duration::from_millis(10));
        let _ = sampler.latest();
        drop(sampler);
    }
}

#[test]
fn event_sampler_thread_exits_on_drop() {
    let clock = MonotonicClock::new();
    let sampler = Sampler::spawn_event(NoopSensor, 25, Duration::from_millis(100), clock);
    std::thread::sleep(Duration::from_millis(50));
    drop(sampler);
}

#[test]
fn averaged_batch_reaches_consumer() {
    let clock = MonotonicClock::new();
    let sensor = ScriptedSensor::batched(&[[10.0, 20.0, 30.0]], 5);
    // 5 Hz: the first batch is published long before the second replaces it.
    let sampler = Sampler::spawn(sensor, 5, 5, Duration::from_millis(10), clock);

    let got = sampler.recv_timeout(Duration::from_millis(150));
    assert_eq!(got, Some(Detection::Detected(delta_core::Point3::new(10.0, 20.0, 30.0))));
    assert!(sampler.stalled_for_now() < 1_000);
}

#[test]
fn sampler_shutdown_is_prompt() {
    let clock = MonotonicClock::new();
    let sampler = Sampler::spawn(NoopSensor, 25, 10, Duration::from_millis(50), clock);

    std::thread::sleep(Duration::from_millis(100));

    let start = std::time::Instant::now();
    drop(sampler);
    let shutdown_time = start.elapsed();

    // Worst case is one paced sleep (100ms at 10 Hz) plus join overhead.
    assert!(
        shutdown_time < Duration::from_millis(250),
        "Shutdown took {:?}, expected < 250ms",
        shutdown_time
    );
}

#[test]
fn event_sampler_waits_while_sensor_is_disconnected() {
    let polls = Arc::new(AtomicUsize::new(0));
    let sensor = UnpluggedSensor {
        polls: polls.clone(),
    };
    let sampler = Sampler::spawn_event(sensor, 25, Duration::from_millis(20), MonotonicClock::new());

    std::thread::sleep(Duration::from_millis(100));
    drop(sampler);

    // About five attempts of two polls each; a spinning thread would poll
    // millions of times.
    let n = polls.load(Ordering::Relaxed);
    assert!(n < 50, "sensor polled {n} times in 100ms");
    assert!(n > 0);
}
