#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core motion pipeline for a delta-style mechanism (hardware-agnostic).
//!
//! Turns noisy tracking samples into positions the mechanism can safely reach.
//! All hardware interactions go through `delta_traits::Sensor` and
//! `delta_traits::Actuator`.
//!
//! ## Architecture
//!
//! - **Averaging**: batch of raw samples to one `Detection` (`averager`)
//! - **Transform**: sensor millimeters to mechanism inches (`transform`)
//! - **Geometry**: two-zone reachable volume and its projections (`geometry`)
//! - **Clamp**: zone-aware destination bounding (`clamp`)
//! - **Restrain**: per-cycle move limit (`restrain`)
//! - **Replay**: evenly spaced path points (`path`, `recorder`)
//! - **Control**: the per-cycle pipeline and the loop around it (`controller`, `runner`)
//!
//! Coordinates are `f64` inches in the mechanism frame unless a name says
//! otherwise. The wire format quantizes to thousandths (`frame`).

pub mod averager;
pub mod builder;
pub mod clamp;
pub mod config;
pub mod controller;
pub mod conversions;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod hw_error;
pub mod mocks;
pub mod path;
pub mod recorder;
pub mod restrain;
pub mod runner;
pub mod sampler;
pub mod session;
pub mod status;
pub mod transform;
pub mod util;

/// A position, in inches unless noted.
pub type Point3 = nalgebra::Point3<f64>;
/// A displacement or direction.
pub type Vector3 = nalgebra::Vector3<f64>;

pub use averager::Detection;
pub use builder::ControllerBuilder;
pub use config::{GeometryCfg, MotionCfg, Timeouts, TransformCfg};
pub use controller::Controller;
pub use error::{BuildError, DeltaError, Result};
pub use geometry::{Workspace, Zone};
pub use restrain::Restrainer;
pub use runner::{RunParams, RunSummary, SamplingMode};
pub use session::{Session, SessionCommand, SessionHandle};
pub use status::CycleStatus;
pub use transform::Transformer;
