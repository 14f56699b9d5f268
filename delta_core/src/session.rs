//! Shared state between the control loop and whoever steers it.
//!
//! The loop owns a `Session`; operators (stdin listener, Ctrl-C handler,
//! tests) hold cloned `SessionHandle`s. Commands travel over a channel and
//! are drained once per cycle boundary. Stop additionally raises a flag so
//! a replay in progress can bail out between points.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crossbeam_channel as xch;

use crate::Point3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Stop,
    ToggleRecord,
    Replay,
}

#[derive(Debug)]
pub struct Session {
    stop: Arc<AtomicBool>,
    tx: xch::Sender<SessionCommand>,
    rx: xch::Receiver<SessionCommand>,
    position: Arc<Mutex<Point3>>,
}

impl Session {
    /// New session whose commanded position starts at `home`.
    pub fn new(home: Point3) -> Self {
        let (tx, rx) = xch::unbounded();
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            tx,
            rx,
            position: Arc::new(Mutex::new(home)),
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            stop: self.stop.clone(),
            tx: self.tx.clone(),
            position: self.position.clone(),
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Every command queued since the last drain, oldest first.
    pub fn drain(&self) -> Vec<SessionCommand> {
        self.rx.try_iter().collect()
    }

    /// Publish the position just sent to the actuator.
    pub fn commit(&self, p: Point3) {
        match self.position.lock() {
            Ok(mut g) => *g = p,
            Err(poisoned) => *poisoned.into_inner() = p,
        }
    }

    pub fn position(&self) -> Point3 {
        match self.position.lock() {
            Ok(g) => *g,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Cloneable remote control for a running `Session`.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    stop: Arc<AtomicBool>,
    tx: xch::Sender<SessionCommand>,
    position: Arc<Mutex<Point3>>,
}

impl SessionHandle {
    /// Queue a command. Returns false once the session is gone.
    pub fn send(&self, cmd: SessionCommand) -> bool {
        if cmd == SessionCommand::Stop {
            self.stop.store(true, Ordering::Relaxed);
        }
        self.tx.send(cmd).is_ok()
    }

    pub fn stop(&self) {
        let _ = self.send(SessionCommand::Stop);
    }

    pub fn toggle_record(&self) -> bool {
        self.send(SessionCommand::ToggleRecord)
    }

    pub fn replay(&self) -> bool {
        self.send(SessionCommand::Replay)
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Last committed position.
    pub fn position(&self) -> Point3 {
        match self.position.lock() {
            Ok(g) => *g,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
