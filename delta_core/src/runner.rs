use crate::Point3;
use crate::averager::{Detection, read_batch};
use crate::controller::Controller;
use crate::error::Result as CoreResult;
use crate::path::interpolate;
use crate::recorder::PathRecorder;
use crate::sampler::Sampler;
use crate::session::{Session, SessionCommand};
use crate::status::CycleStatus;
use delta_traits::clock::Clock;
use std::time::Duration;

/// How sampling should be orchestrated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingMode {
    /// Read a whole batch inside the control loop
    #[default]
    Direct,
    /// Background thread, paced by the sensor's own frame timing
    Event,
    /// Background thread, rate-paced at the given Hz
    Paced(u32),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunParams {
    pub mode: SamplingMode,
    /// Stop after this many tracking cycles. Replayed points do not count.
    pub max_cycles: Option<u64>,
}

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub cycles: u64,
    pub moves: u64,
    pub held: u64,
    pub replayed: u64,
    pub final_position: Point3,
}

/// Compute how long the sampler may go without a detection before the loop
/// reports it.
///
/// The threshold is the larger of four sensor timeouts and two control
/// cycles, so a single slow batch does not trip it.
#[inline]
fn compute_stall_threshold_ms(sensor_timeout_ms: u64, cycle_ms: u64) -> u64 {
    fast_threshold_ms(sensor_timeout_ms)
        .max(two_periods_ms(cycle_ms))
        .max(1)
}

#[inline]
fn fast_threshold_ms(sensor_timeout_ms: u64) -> u64 {
    sensor_timeout_ms.saturating_mul(4)
}

#[inline]
fn two_periods_ms(period_ms: u64) -> u64 {
    period_ms.saturating_mul(2)
}

enum Source<S: delta_traits::Sensor + Send + 'static> {
    Direct(S),
    Background(Sampler),
}

/// Run the tracking loop until the session is stopped or `max_cycles` is hit.
///
/// The controller's position is announced to the actuator first, then every
/// cycle drains session commands, acquires one averaged detection, runs it
/// through the controller, and sleeps out the rest of the cycle.
pub fn run<S, A>(
    sensor: S,
    controller: &mut Controller<A>,
    session: &Session,
    params: RunParams,
) -> CoreResult<RunSummary>
where
    S: delta_traits::Sensor + Send + 'static,
    A: delta_traits::Actuator,
{
    let clock = controller.clock().clone();
    let motion = controller.motion().clone();
    let sensor_timeout = Duration::from_millis(controller.timeouts().sensor_ms);
    let period = crate::util::cycle_period(motion.cycle_ms);
    let stall_threshold_ms =
        compute_stall_threshold_ms(controller.timeouts().sensor_ms, motion.cycle_ms);

    let mut source = match params.mode {
        SamplingMode::Direct => Source::Direct(sensor),
        SamplingMode::Event => Source::Background(Sampler::spawn_event(
            sensor,
            motion.average_count,
            sensor_timeout,
            clock.clone(),
        )),
        SamplingMode::Paced(hz) => Source::Background(Sampler::spawn(
            sensor,
            motion.average_count,
            hz,
            sensor_timeout,
            clock.clone(),
        )),
    };

    controller.announce()?;
    session.commit(controller.position());
    tracing::info!(
        home = ?controller.position(),
        mode = ?params.mode,
        cycle_ms = motion.cycle_ms,
        "tracking start"
    );

    let mut recorder = PathRecorder::new();
    let mut summary = RunSummary {
        cycles: 0,
        moves: 0,
        held: 0,
        replayed: 0,
        final_position: controller.position(),
    };
    let mut stalled = false;

    'cycles: loop {
        for cmd in session.drain() {
            match cmd {
                SessionCommand::Stop => break 'cycles,
                SessionCommand::ToggleRecord => {
                    let on = recorder.toggle();
                    tracing::info!(recording = on, points = recorder.len(), "record toggled");
                }
                SessionCommand::Replay => {
                    if recorder.is_recording() {
                        recorder.toggle();
                        tracing::info!(points = recorder.len(), "recording stopped for replay");
                    }
                    summary.replayed +=
                        replay(controller, session, recorder.points(), motion.replay_step, period)?;
                }
            }
        }
        if session.is_stopped() {
            break;
        }
        if let Some(max) = params.max_cycles {
            if summary.cycles >= max {
                tracing::info!(max, "cycle limit reached");
                break;
            }
        }

        let started = clock.now();
        let detection = match &mut source {
            Source::Direct(sensor) => read_batch(sensor, motion.average_count, sensor_timeout),
            Source::Background(sampler) => {
                let d = sampler.recv_timeout(period).unwrap_or(Detection::NotDetected);
                let quiet_ms = sampler.stalled_for(clock.ms_since(sampler.epoch()));
                if !stalled && quiet_ms > stall_threshold_ms {
                    stalled = true;
                    tracing::warn!(quiet_ms, "no detection from sampler");
                } else if stalled && quiet_ms <= stall_threshold_ms {
                    stalled = false;
                    tracing::info!("sampler detections resumed");
                }
                d
            }
        };

        match controller.step(detection)? {
            CycleStatus::Moved(p) => {
                session.commit(p);
                recorder.record(p);
                summary.moves += 1;
            }
            CycleStatus::Hold => summary.held += 1,
        }
        summary.cycles += 1;
        clock.sleep_remaining(started, period);
    }

    summary.final_position = controller.position();
    tracing::info!(
        cycles = summary.cycles,
        moves = summary.moves,
        held = summary.held,
        replayed = summary.replayed,
        "tracking stopped"
    );
    Ok(summary)
}

/// Drive the mechanism through a recorded path, one point per cycle.
///
/// Each leg starts from wherever the previous leg actually ended, and every
/// interpolated point still goes through clamp and restrain. Returns the
/// number of points sent; stops early when the session is stopped.
fn replay<A: delta_traits::Actuator>(
    controller: &mut Controller<A>,
    session: &Session,
    path: &[Point3],
    step: f64,
    period: Duration,
) -> CoreResult<u64> {
    if path.is_empty() {
        tracing::info!("replay requested with nothing recorded");
        return Ok(0);
    }
    let clock = controller.clock().clone();
    tracing::info!(points = path.len(), step, "replay start");
    let mut sent = 0u64;
    for waypoint in path {
        let from = controller.position();
        // The first point of each leg is where we already are.
        for p in interpolate(from, *waypoint, step).skip(1) {
            if session.is_stopped() {
                tracing::info!(sent, "replay interrupted");
                return Ok(sent);
            }
            let started = clock.now();
            let next = controller.move_toward(&p)?;
            session.commit(next);
            sent += 1;
            clock.sleep_remaining(started, period);
        }
    }
    tracing::info!(sent, "replay complete");
    Ok(sent)
}
