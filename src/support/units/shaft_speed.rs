use std::f64::consts::PI;

use uom::si::{angular_velocity::revolution_per_minute, f64::AngularVelocity};

/// Converts an angular rate in rad/s (or rad/s²) to RPM (or RPM/s).
pub const RAD_PER_SEC_TO_RPM: f64 = 60.0 / (2.0 * PI);

/// Extension trait for working with shaft speeds in revolutions per minute.
pub trait ShaftSpeed {
    /// Creates a shaft speed from a value in RPM.
    fn from_rpm(rpm: f64) -> Self;

    /// Returns the shaft speed in RPM.
    fn rpm(&self) -> f64;
}

impl ShaftSpeed for AngularVelocity {
    fn from_rpm(rpm: f64) -> Self {
        AngularVelocity::new::<revolution_per_minute>(rpm)
    }

    fn rpm(&self) -> f64 {
        self.get::<revolution_per_minute>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::angular_velocity::radian_per_second;

    #[test]
    fn rpm_round_trip_through_radians() {
        let redline = AngularVelocity::from_rpm(7000.0);
        assert_relative_eq!(
            redline.get::<radian_per_second>(),
            7000.0 / RAD_PER_SEC_TO_RPM,
            max_relative = 1e-12
        );
        assert_relative_eq!(redline.rpm(), 7000.0, max_relative = 1e-12);
    }

    #[test]
    fn one_radian_per_second_in_rpm() {
        let w = AngularVelocity::new::<radian_per_second>(1.0);
        assert_relative_eq!(w.rpm(), RAD_PER_SEC_TO_RPM, max_relative = 1e-12);
    }
}
