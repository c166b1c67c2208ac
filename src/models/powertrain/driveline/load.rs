use uom::si::{
    f64::{AngularVelocity, Torque},
    torque::newton_meter,
};

use crate::support::units::ShaftSpeed;

/// What a load model sees at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadContext {
    pub engine_speed: AngularVelocity,
    pub transmission_speed: AngularVelocity,

    /// Clutch engagement in `[0, 1]`.
    pub engagement: f64,

    /// The engine's maximum speed, for normalizing.
    pub max_engine_speed: AngularVelocity,
}

/// Estimates the external torque resisting the engine each tick.
///
/// Any `Fn(&LoadContext) -> Torque` closure is a load model.
pub trait LoadModel {
    /// Returns the load torque; positive values oppose engine rotation.
    fn load_torque(&self, context: &LoadContext) -> Torque;
}

impl<F> LoadModel for F
where
    F: Fn(&LoadContext) -> Torque,
{
    fn load_torque(&self, context: &LoadContext) -> Torque {
        self(context)
    }
}

/// Drivetrain losses that grow with engagement, plus extra braking while
/// the clutch is open.
///
/// With the clutch engaged the engine mostly feels the added driveline
/// inertia rather than added load, so the engaged resistance is kept small.
/// With the clutch open the engine sheds speed quickly through the
/// disengaged braking term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrivetrainLoad {
    /// Fixed drivetrain loss.
    pub base: Torque,

    /// Speed-dependent loss per transmission RPM, Nm/RPM.
    pub speed_coefficient: f64,

    /// Engagement at which drivetrain losses begin to apply.
    ///
    /// Above it, losses grow with the square of the engagement normalized
    /// over `[onset, 1]`, so the take-up is gradual.
    pub engagement_onset: f64,

    /// Scale applied to drivetrain losses.
    pub resistance_scale: f64,

    /// Braking at max engine speed with the clutch fully open.
    pub disengaged_braking: Torque,
}

impl Default for DrivetrainLoad {
    fn default() -> Self {
        Self {
            base: Torque::new::<newton_meter>(15.0),
            speed_coefficient: 0.01,
            engagement_onset: 0.2,
            resistance_scale: 0.3,
            disengaged_braking: Torque::new::<newton_meter>(20.0),
        }
    }
}

impl LoadModel for DrivetrainLoad {
    fn load_torque(&self, context: &LoadContext) -> Torque {
        let engagement = context.engagement.clamp(0.0, 1.0);
        let onset = self.engagement_onset;
        let ramp = ((engagement - onset) / (1.0 - onset)).max(0.0);
        let applied = ramp * ramp;

        let losses = self.base.get::<newton_meter>()
            + self.speed_coefficient * context.transmission_speed.rpm();
        let resistance = applied * losses * self.resistance_scale;

        let rpm_ratio = context.engine_speed.rpm() / context.max_engine_speed.rpm();
        let braking = (1.0 - engagement) * self.disengaged_braking.get::<newton_meter>() * rpm_ratio;

        Torque::new::<newton_meter>(resistance + braking)
    }
}
