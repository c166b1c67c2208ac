//! Clutch shaft-speed synchronization.

mod params;
mod regime;

pub use params::{ClutchParams, ClutchParamsError, LockPolicy};
pub use regime::Regime;

use uom::{
    ConstZero,
    si::{
        f64::{AngularVelocity, Frequency, Torque},
        frequency::hertz,
    },
};

use crate::support::units::TimeStep;

/// Engine and transmission input shaft speeds on either side of the clutch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaftSpeeds {
    pub engine: AngularVelocity,
    pub transmission: AngularVelocity,
}

impl ShaftSpeeds {
    /// The speed both shafts converge toward.
    #[must_use]
    pub fn mean(&self) -> AngularVelocity {
        (self.engine + self.transmission) * 0.5
    }

    /// Engine speed minus transmission speed.
    #[must_use]
    pub fn slip(&self) -> AngularVelocity {
        self.engine - self.transmission
    }

    /// Moves both shafts `fraction` of the way toward their mean.
    fn converge(self, fraction: f64) -> Self {
        let mean = self.mean();
        Self {
            engine: self.engine + (mean - self.engine) * fraction,
            transmission: self.transmission + (mean - self.transmission) * fraction,
        }
    }
}

/// Result of one clutch tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coupling {
    pub speeds: ShaftSpeeds,
    pub regime: Regime,
}

impl ClutchParams {
    /// Couples two shaft speeds for one fixed tick.
    ///
    /// `engagement` is clamped to `[0, 1]` and classified into a [`Regime`]:
    ///
    /// - Disengaged: the transmission shaft decays by the freewheel rate and
    ///   never reverses; the engine is untouched.
    /// - Locked: both shafts converge per the [`LockPolicy`].
    /// - Slipping: both shafts move `engagement · stiffness · dt` (capped at 1)
    ///   of the way toward their mean.
    #[must_use]
    pub fn couple(&self, speeds: ShaftSpeeds, engagement: f64, dt: TimeStep) -> Coupling {
        let engagement = engagement.clamp(0.0, 1.0);
        let regime = Regime::classify(engagement, self.regime_tolerance());
        let dt = dt.seconds();

        let speeds = match regime {
            Regime::Disengaged => {
                let retained = 1.0 - self.freewheel_decay().get::<hertz>() * dt;
                let transmission = speeds.transmission * retained;
                ShaftSpeeds {
                    engine: speeds.engine,
                    transmission: if transmission < AngularVelocity::ZERO {
                        AngularVelocity::ZERO
                    } else {
                        transmission
                    },
                }
            }
            Regime::Locked => match self.lock() {
                LockPolicy::Instant => {
                    let mean = speeds.mean();
                    ShaftSpeeds {
                        engine: mean,
                        transmission: mean,
                    }
                }
                LockPolicy::FastConvergence => speeds.converge(self.lock().convergence()),
            },
            Regime::Slipping => speeds.converge(slip_rate(self.stiffness(), engagement, dt)),
        };

        Coupling { speeds, regime }
    }
}

/// Fraction of the gap to the mean closed in one slipping tick.
fn slip_rate(stiffness: Frequency, engagement: f64, dt: f64) -> f64 {
    (engagement * stiffness.get::<hertz>() * dt).clamp(0.0, 1.0)
}

/// A clutch synchronizing the engine and transmission input shaft speeds.
///
/// The clutch never owns either speed. Callers pass both in by mutable
/// reference for the duration of one [`update`](Self::update).
///
/// # Example
///
/// ```
/// use powertrain_models::models::powertrain::clutch::{Clutch, ClutchParams, LockPolicy, Regime};
/// use powertrain_models::support::units::{ShaftSpeed, TimeStep};
/// use uom::si::f64::AngularVelocity;
///
/// let mut clutch = Clutch::new(ClutchParams::default().with_lock(LockPolicy::Instant));
/// let mut engine = AngularVelocity::from_rpm(6000.0);
/// let mut transmission = AngularVelocity::from_rpm(0.0);
/// let dt = TimeStep::from_seconds(0.1).unwrap();
///
/// let regime = clutch.update(&mut engine, &mut transmission, 1.0, dt);
///
/// assert_eq!(regime, Regime::Locked);
/// assert!((engine.rpm() - 3000.0).abs() < 1e-9);
/// assert!((transmission.rpm() - 3000.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Clutch {
    params: ClutchParams,
    engagement_level: f64,
}

impl Clutch {
    /// Creates a fully disengaged clutch.
    #[must_use]
    pub fn new(params: ClutchParams) -> Self {
        Self {
            params,
            engagement_level: 0.0,
        }
    }

    /// Synchronizes both shaft speeds for one fixed tick and returns the
    /// regime that applied.
    ///
    /// The clamped engagement is retained for inspection only; it has no
    /// effect on later ticks.
    pub fn update(
        &mut self,
        engine: &mut AngularVelocity,
        transmission: &mut AngularVelocity,
        engagement: f64,
        dt: TimeStep,
    ) -> Regime {
        self.engagement_level = engagement.clamp(0.0, 1.0);

        let speeds = ShaftSpeeds {
            engine: *engine,
            transmission: *transmission,
        };
        let coupling = self.params.couple(speeds, engagement, dt);

        *engine = coupling.speeds.engine;
        *transmission = coupling.speeds.transmission;
        coupling.regime
    }

    /// Engagement level passed to the last [`update`](Self::update), clamped to `[0, 1]`.
    #[must_use]
    pub fn engagement_level(&self) -> f64 {
        self.engagement_level
    }

    #[must_use]
    pub fn stiffness(&self) -> Frequency {
        self.params.stiffness()
    }

    #[must_use]
    pub fn params(&self) -> &ClutchParams {
        &self.params
    }

    /// Torque transmitted through the plates.
    ///
    /// Slip torque is not modeled; the clutch only synchronizes speeds, so
    /// this is always zero.
    #[must_use]
    pub fn clutch_torque(&self) -> Torque {
        Torque::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::units::ShaftSpeed;

    fn speeds(engine: f64, transmission: f64) -> ShaftSpeeds {
        ShaftSpeeds {
            engine: AngularVelocity::from_rpm(engine),
            transmission: AngularVelocity::from_rpm(transmission),
        }
    }

    fn dt(seconds: f64) -> TimeStep {
        TimeStep::from_seconds(seconds).unwrap()
    }

    fn rpms(speeds: ShaftSpeeds) -> (f64, f64) {
        (speeds.engine.rpm(), speeds.transmission.rpm())
    }

    #[test]
    fn disengaged_freewheels_transmission_only() {
        let params = ClutchParams::default();
        let mut current = speeds(3000.0, 2000.0);

        for _ in 0..100 {
            let coupling = params.couple(current, 0.0, dt(0.1));
            assert_eq!(coupling.regime, Regime::Disengaged);
            assert_eq!(coupling.speeds.engine, current.engine);
            assert!(coupling.speeds.transmission <= current.transmission);
            assert!(coupling.speeds.transmission >= AngularVelocity::ZERO);
            current = coupling.speeds;
        }

        // 3% per second for 10 s, compounded per 0.1 s tick.
        let (_, transmission) = rpms(current);
        assert_relative_eq!(transmission, 2000.0 * 0.997_f64.powi(100), max_relative = 1e-9);
    }

    #[test]
    fn freewheel_never_reverses() {
        let params = ClutchParams::default()
            .with_freewheel_decay(Frequency::new::<hertz>(50.0))
            .unwrap();

        let coupling = params.couple(speeds(1000.0, 500.0), 0.0, dt(0.1));
        assert_eq!(coupling.speeds.transmission, AngularVelocity::ZERO);
    }

    #[test]
    fn instant_lock_sets_both_to_mean() {
        let params = ClutchParams::default().with_lock(LockPolicy::Instant);
        let coupling = params.couple(speeds(6000.0, 0.0), 1.0, dt(0.1));

        assert_eq!(coupling.regime, Regime::Locked);
        let (engine, transmission) = rpms(coupling.speeds);
        assert_relative_eq!(engine, 3000.0, max_relative = 1e-12);
        assert_relative_eq!(transmission, 3000.0, max_relative = 1e-12);
    }

    #[test]
    fn fast_lock_closes_eighty_percent_of_the_gap() {
        let params = ClutchParams::default();
        let coupling = params.couple(speeds(6000.0, 0.0), 1.0, dt(0.1));

        assert_eq!(coupling.regime, Regime::Locked);
        let (engine, transmission) = rpms(coupling.speeds);
        assert_relative_eq!(engine, 3600.0, max_relative = 1e-12);
        assert_relative_eq!(transmission, 2400.0, max_relative = 1e-12);
    }

    #[test]
    fn lock_ignores_step_length() {
        let params = ClutchParams::default();
        let short = params.couple(speeds(5000.0, 1000.0), 1.0, dt(0.01));
        let long = params.couple(speeds(5000.0, 1000.0), 1.0, dt(0.2));
        assert_eq!(short, long);
    }

    #[test]
    fn slipping_converges_symmetrically() {
        let params = ClutchParams::default();
        let before = speeds(5000.0, 1000.0);
        let mean = before.mean().rpm();

        let coupling = params.couple(before, 0.4, dt(0.1));
        assert_eq!(coupling.regime, Regime::Slipping);

        // rate = 0.4 · 10 /s · 0.1 s
        let rate = 0.4;
        let (engine, transmission) = rpms(coupling.speeds);
        assert_relative_eq!(mean - engine, (1.0 - rate) * (mean - 5000.0), max_relative = 1e-9);
        assert_relative_eq!(
            transmission - mean,
            (1.0 - rate) * (1000.0 - mean),
            max_relative = 1e-9
        );
        assert_relative_eq!(coupling.speeds.mean().rpm(), mean, max_relative = 1e-12);
    }

    #[test]
    fn equal_speeds_stay_put() {
        let params = ClutchParams::default();
        let before = speeds(4000.0, 4000.0);
        let after = params.couple(before, 0.5, dt(0.1)).speeds;
        assert_eq!(before, after);
    }

    #[test]
    fn slip_rate_is_monotonic_and_saturates() {
        let stiff = Frequency::new::<hertz>(10.0);
        let soft = Frequency::new::<hertz>(2.0);

        assert!(slip_rate(soft, 0.5, 0.1) < slip_rate(stiff, 0.5, 0.1));
        assert!(slip_rate(stiff, 0.2, 0.1) < slip_rate(stiff, 0.6, 0.1));
        assert!(slip_rate(stiff, 0.5, 0.01) < slip_rate(stiff, 0.5, 0.1));

        assert_relative_eq!(slip_rate(stiff, 0.9, 0.2), 1.0);
        assert_relative_eq!(slip_rate(stiff, 0.5, 0.2), 1.0);
    }

    #[test]
    fn saturated_slip_meets_at_mean() {
        let params = ClutchParams::default();
        let coupling = params.couple(speeds(6000.0, 0.0), 0.9, dt(0.2));

        let (engine, transmission) = rpms(coupling.speeds);
        assert_relative_eq!(engine, 3000.0, max_relative = 1e-12);
        assert_relative_eq!(transmission, 3000.0, max_relative = 1e-12);
    }

    #[test]
    fn update_mutates_both_speeds_and_records_engagement() {
        let mut clutch = Clutch::new(ClutchParams::default());
        let mut engine = AngularVelocity::from_rpm(3000.0);
        let mut transmission = AngularVelocity::from_rpm(1000.0);

        let regime = clutch.update(&mut engine, &mut transmission, 1.7, dt(0.1));

        assert_eq!(regime, Regime::Locked);
        assert_relative_eq!(clutch.engagement_level(), 1.0);
        assert_relative_eq!(engine.rpm(), 2200.0, max_relative = 1e-12);
        assert_relative_eq!(transmission.rpm(), 1800.0, max_relative = 1e-12);
    }

    #[test]
    fn engagement_has_no_memory() {
        let mut clutch = Clutch::new(ClutchParams::default());
        let mut engine = AngularVelocity::from_rpm(3000.0);
        let mut transmission = AngularVelocity::from_rpm(1000.0);
        clutch.update(&mut engine, &mut transmission, 1.0, dt(0.1));

        let mut fresh = Clutch::new(ClutchParams::default());
        let start = speeds(4500.0, 500.0);

        let mut e1 = start.engine;
        let mut t1 = start.transmission;
        clutch.update(&mut e1, &mut t1, 0.3, dt(0.1));

        let mut e2 = start.engine;
        let mut t2 = start.transmission;
        fresh.update(&mut e2, &mut t2, 0.3, dt(0.1));

        assert_eq!((e1, t1), (e2, t2));
        assert_relative_eq!(clutch.engagement_level(), 0.3);
    }

    #[test]
    fn clutch_torque_is_not_modeled() {
        let clutch = Clutch::new(ClutchParams::default());
        assert_eq!(clutch.clutch_torque(), Torque::ZERO);
    }
}
