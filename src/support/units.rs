//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units (shaft speed, torque,
//! inertia, time). This module provides the pieces that are useful for
//! powertrain modeling but aren't included in [`uom`].
//!
//! ## Shaft speeds in RPM
//!
//! Engine and transmission speeds are almost always reasoned about in
//! revolutions per minute. The [`ShaftSpeed`] trait gives
//! [`AngularVelocity`](uom::si::f64::AngularVelocity) a terse RPM view:
//!
//! ```
//! use uom::si::f64::AngularVelocity;
//! use powertrain_models::support::units::ShaftSpeed;
//!
//! let idle = AngularVelocity::from_rpm(800.0);
//! assert!((idle.rpm() - 800.0).abs() < 1e-9);
//! ```
//!
//! ## Fixed time steps
//!
//! [`TimeStep`] is a strictly positive [`Time`](uom::si::f64::Time) used by
//! every fixed-timestep update in the crate.

mod shaft_speed;
mod time_step;

pub use shaft_speed::{RAD_PER_SEC_TO_RPM, ShaftSpeed};
pub use time_step::TimeStep;
