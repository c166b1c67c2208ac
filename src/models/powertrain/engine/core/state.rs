use uom::{
    ConstZero,
    si::{
        f64::{AngularVelocity, ThermodynamicTemperature, Torque},
        thermodynamic_temperature::degree_celsius,
    },
};

use super::EngineParams;

/// Normal operating temperature the engine starts at.
const OPERATING_TEMPERATURE_C: f64 = 80.0;

/// Mutable engine state, advanced once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineState {
    /// Crankshaft speed.
    pub speed: AngularVelocity,

    /// Smoothed output torque.
    pub torque: Torque,

    /// Engine temperature.
    ///
    /// Tracked for inspection only; no relation reads or updates it.
    pub temperature: ThermodynamicTemperature,
}

impl EngineState {
    /// An engine turning at idle speed and producing no torque.
    #[must_use]
    pub fn at_idle(params: &EngineParams) -> Self {
        Self {
            speed: params.idle_speed(),
            torque: Torque::ZERO,
            temperature: ThermodynamicTemperature::new::<degree_celsius>(OPERATING_TEMPERATURE_C),
        }
    }
}

/// Per-tick engine inputs.
///
/// Fractions are clamped to `[0, 1]` when the tick runs; out-of-range values
/// are never rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineInputs {
    /// Requested fraction of available torque.
    pub throttle: f64,

    /// External resistive torque; positive values oppose rotation.
    pub load: Torque,

    /// Clutch engagement level, used by [`InertiaModel::ClutchCoupled`].
    ///
    /// [`InertiaModel::ClutchCoupled`]: super::InertiaModel::ClutchCoupled
    pub clutch_engagement: f64,
}
