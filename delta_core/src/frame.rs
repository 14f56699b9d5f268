//! Actuator wire format.
//!
//! One command is `$<x>,<y>,<z>*y` where each coordinate is the mechanism-frame
//! position in thousandths of an inch, rounded to the nearest integer. The
//! trailing `y` confirms the packet; the actuator moves only on confirmation.

use crate::Point3;

/// Thousandths of an inch per inch on the wire.
pub const THOU_PER_INCH: f64 = 1000.0;

#[inline]
fn to_thou(v: f64) -> i64 {
    // Saturating cast; callers only pass finite workspace coordinates.
    (v * THOU_PER_INCH).round() as i64
}

/// Encode one confirmed move command.
pub fn encode(p: &Point3) -> String {
    debug_assert!(p.iter().all(|v| v.is_finite()), "non-finite frame {p:?}");
    format!("${},{},{}*y", to_thou(p.x), to_thou(p.y), to_thou(p.z))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Field { axis: usize, negative: bool, value: i64 },
    AwaitConfirm,
}

/// Byte-at-a-time decoder for the command stream, as the actuator sees it.
///
/// A `$` always starts a fresh packet. Anything unexpected inside a packet
/// discards it. A complete packet is held until the next byte: `y` releases
/// it, anything else drops it.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    state: State,
    fields: [i64; 3],
    rejected: usize,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            fields: [0; 3],
            rejected: 0,
        }
    }

    /// Packets discarded as malformed or unconfirmed so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    fn reject(&mut self) {
        self.rejected += 1;
        self.state = State::Idle;
    }

    /// Feed one byte; returns the commanded point (inches) on confirmation.
    pub fn feed(&mut self, byte: u8) -> Option<Point3> {
        if byte == b'$' {
            if self.state != State::Idle {
                self.rejected += 1;
            }
            self.fields = [0; 3];
            self.state = State::Field {
                axis: 0,
                negative: false,
                value: 0,
            };
            return None;
        }
        match self.state {
            State::Idle => None,
            State::AwaitConfirm => {
                if byte == b'y' {
                    self.state = State::Idle;
                    Some(Point3::new(
                        self.fields[0] as f64 / THOU_PER_INCH,
                        self.fields[1] as f64 / THOU_PER_INCH,
                        self.fields[2] as f64 / THOU_PER_INCH,
                    ))
                } else {
                    self.reject();
                    None
                }
            }
            State::Field {
                axis,
                negative,
                value,
            } => {
                match byte {
                    b'0'..=b'9' => {
                        let digit = i64::from(byte - b'0');
                        match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
                            Some(value) => {
                                self.state = State::Field {
                                    axis,
                                    negative,
                                    value,
                                }
                            }
                            None => self.reject(),
                        }
                    }
                    b'-' if value == 0 && !negative => {
                        self.state = State::Field {
                            axis,
                            negative: true,
                            value,
                        }
                    }
                    b',' if axis < 2 => {
                        self.fields[axis] = if negative { -value } else { value };
                        self.state = State::Field {
                            axis: axis + 1,
                            negative: false,
                            value: 0,
                        };
                    }
                    b'*' if axis == 2 => {
                        self.fields[axis] = if negative { -value } else { value };
                        self.state = State::AwaitConfirm;
                    }
                    _ => self.reject(),
                }
                None
            }
        }
    }

    /// Feed a whole buffer, collecting every confirmed point.
    pub fn feed_all(&mut self, bytes: &[u8]) -> Vec<Point3> {
        bytes.iter().filter_map(|b| self.feed(*b)).collect()
    }
}
