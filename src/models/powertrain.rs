//! Powertrain models.
//!
//! A combustion [`engine`] drives a transmission input shaft through a
//! slipping [`clutch`]. Neither component knows about the other; the
//! [`driveline`] orchestrator owns both shaft speeds and threads them
//! through the two models once per fixed tick.

pub mod clutch;
pub mod driveline;
pub mod engine;
