//! Torque-curve, engine-braking, rev-limiter, and drag relations.
//!
//! All functions here work in plain RPM and newton-meters.

use uom::si::torque::newton_meter;

use crate::support::units::ShaftSpeed;

use super::EngineParams;

/// Speed ratio where the ramp reaches peak torque.
const PEAK_START: f64 = 0.6;

/// Speed ratio where the plateau ends and the falloff begins.
const PLATEAU_END: f64 = 0.85;

/// Fraction of peak torque lost across the plateau.
const PLATEAU_DROP: f64 = 0.1;

/// Fraction of peak torque available at the start of the falloff.
const FALLOFF_LEVEL: f64 = 0.9;

/// Throttle below which closed-throttle engine braking applies.
const BRAKING_THROTTLE: f64 = 0.1;

/// Engine braking torque at max speed, Nm.
const BRAKING_TORQUE: f64 = 20.0;

/// Speed ratio where the rev limiter starts cutting torque.
const REV_LIMIT_START: f64 = 0.98;

/// Fraction of peak torque available at full throttle for a speed ratio.
///
/// Rises concavely to 1.0 at [`PEAK_START`], declines slowly to 0.9 at
/// [`PLATEAU_END`], then falls linearly to zero at the maximum speed.
pub(super) fn curve_fraction(rpm_ratio: f64) -> f64 {
    if rpm_ratio < PEAK_START {
        let x = rpm_ratio / PEAK_START;
        x * (2.0 - x)
    } else if rpm_ratio < PLATEAU_END {
        1.0 - PLATEAU_DROP * (rpm_ratio - PEAK_START) / (PLATEAU_END - PEAK_START)
    } else {
        FALLOFF_LEVEL * (1.0 - rpm_ratio) / (1.0 - PLATEAU_END)
    }
}

/// Torque the engine is asked to produce at `rpm` for a throttle in `[0, 1]`.
///
/// Combines the throttled torque curve, closed-throttle braking, and the
/// rev limiter's linear cutback to zero at the maximum speed.
pub(super) fn target(params: &EngineParams, rpm: f64, throttle: f64) -> f64 {
    let max_rpm = params.max_speed().rpm();
    let rpm_ratio = rpm / max_rpm;

    let max_torque = params.max_torque().get::<newton_meter>();
    let mut torque = curve_fraction(rpm_ratio) * max_torque * throttle;

    if throttle < BRAKING_THROTTLE {
        torque -= BRAKING_TORQUE * rpm_ratio;
    }

    let limit_start = REV_LIMIT_START * max_rpm;
    if rpm >= limit_start {
        let cutback = ((max_rpm - rpm) / (max_rpm - limit_start)).clamp(0.0, 1.0);
        torque *= cutback;
    }

    torque
}

/// Internal drag at `rpm`; always opposes rotation.
pub(super) fn drag(params: &EngineParams, rpm: f64) -> f64 {
    let thousands = rpm / 1000.0;
    -params.drag_coefficient().get::<newton_meter>() * thousands * thousands
}
