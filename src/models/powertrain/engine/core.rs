//! Engine torque and speed dynamics.
//!
//! Each tick runs, in order: torque-curve target, first-order torque
//! smoothing, quadratic drag, speed integration against the effective
//! inertia, and the idle governor / max-speed limiter.

mod equilibrium;
mod params;
mod state;
mod torque;

pub use equilibrium::{EquilibriumConfig, EquilibriumError, OperatingPoint};
pub use params::{EngineParams, EngineParamsError, InertiaModel};
pub use state::{EngineInputs, EngineState};

use uom::si::{
    f64::{AngularVelocity, MomentOfInertia, ThermodynamicTemperature, Torque},
    moment_of_inertia::kilogram_square_meter,
    torque::newton_meter,
};

use crate::support::units::{RAD_PER_SEC_TO_RPM, ShaftSpeed, TimeStep};

/// Torque filter rate, 1/s. Steps of 0.2 s or longer track the target instantly.
const SMOOTHING_RATE: f64 = 5.0;

/// Fraction of the idle deficit recovered per tick by the idle governor.
const IDLE_GAIN: f64 = 0.1;

impl EngineParams {
    /// Advances `state` by one fixed tick.
    ///
    /// This is a pure function of its arguments; [`Engine::update`] and the
    /// [`EngineModel`](super::EngineModel) adapter both delegate to it.
    #[must_use]
    pub fn step(&self, state: &EngineState, inputs: &EngineInputs, dt: TimeStep) -> EngineState {
        let throttle = inputs.throttle.clamp(0.0, 1.0);
        let engagement = inputs.clutch_engagement.clamp(0.0, 1.0);
        let dt = dt.seconds();
        let rpm = state.speed.rpm();

        let target = torque::target(self, rpm, throttle);
        let smoothing = (SMOOTHING_RATE * dt).clamp(0.0, 1.0);
        let output = state.torque.get::<newton_meter>();
        let output = output + smoothing * (target - output);

        let inertia = self
            .inertia_model()
            .effective(self.flywheel_inertia(), engagement)
            .get::<kilogram_square_meter>();
        let net = output - inputs.load.get::<newton_meter>() + torque::drag(self, rpm);
        let rpm = self.govern(rpm + net / inertia * RAD_PER_SEC_TO_RPM * dt);

        EngineState {
            speed: AngularVelocity::from_rpm(rpm),
            torque: Torque::new::<newton_meter>(output),
            temperature: state.temperature,
        }
    }

    /// Pulls sub-idle speeds back toward idle, then caps at the max speed.
    ///
    /// The governor is proportional, so speed may sit slightly below idle
    /// while a load persists, but never below zero.
    fn govern(&self, rpm: f64) -> f64 {
        let idle = self.idle_speed().rpm();
        let rpm = if rpm < idle {
            (rpm + IDLE_GAIN * (idle - rpm)).max(0.0)
        } else {
            rpm
        };
        rpm.min(self.max_speed().rpm())
    }
}

/// A combustion engine integrating throttle and load into a speed trajectory.
///
/// The engine owns its state exclusively. Callers that couple it to other
/// components read its speed after [`update`](Self::update) and may splice a
/// corrected speed back in with [`set_speed`](Self::set_speed).
///
/// # Example
///
/// ```
/// use powertrain_models::models::powertrain::engine::{Engine, EngineParams};
/// use powertrain_models::support::units::{ShaftSpeed, TimeStep};
/// use uom::si::{f64::Torque, torque::newton_meter};
///
/// let mut engine = Engine::new(EngineParams::default());
/// let dt = TimeStep::from_seconds(0.1).unwrap();
///
/// for _ in 0..10 {
///     engine.update(1.0, Torque::new::<newton_meter>(0.0), 0.0, dt);
/// }
///
/// assert!(engine.speed().rpm() > 800.0);
/// assert!(engine.speed().rpm() <= 7000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    params: EngineParams,
    state: EngineState,
}

impl Engine {
    /// Creates an engine turning at idle speed.
    #[must_use]
    pub fn new(params: EngineParams) -> Self {
        Self {
            state: EngineState::at_idle(&params),
            params,
        }
    }

    /// Advances the engine by one fixed tick.
    ///
    /// `throttle` and `clutch_engagement` are clamped to `[0, 1]`. A positive
    /// `load` opposes rotation.
    pub fn update(&mut self, throttle: f64, load: Torque, clutch_engagement: f64, dt: TimeStep) {
        let inputs = EngineInputs {
            throttle,
            load,
            clutch_engagement,
        };
        self.state = self.params.step(&self.state, &inputs, dt);
    }

    /// Overrides the current speed.
    ///
    /// No validation is performed; callers are expected to pass a speed
    /// within the engine's operating range.
    pub fn set_speed(&mut self, speed: AngularVelocity) {
        self.state.speed = speed;
    }

    /// Finds the steady-state operating point for a fixed throttle and load.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibriumError`] if the bisection solve fails or does not
    /// converge within the configured iteration limit.
    pub fn equilibrium(
        &self,
        throttle: f64,
        load: Torque,
        config: EquilibriumConfig,
    ) -> Result<OperatingPoint, EquilibriumError> {
        equilibrium::equilibrium(&self.params, throttle, load, config)
    }

    #[must_use]
    pub fn speed(&self) -> AngularVelocity {
        self.state.speed
    }

    #[must_use]
    pub fn torque(&self) -> Torque {
        self.state.torque
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        self.state.temperature
    }

    #[must_use]
    pub fn idle_speed(&self) -> AngularVelocity {
        self.params.idle_speed()
    }

    #[must_use]
    pub fn max_speed(&self) -> AngularVelocity {
        self.params.max_speed()
    }

    #[must_use]
    pub fn flywheel_inertia(&self) -> MomentOfInertia {
        self.params.flywheel_inertia()
    }

    /// Peak full-throttle output torque.
    #[must_use]
    pub fn max_torque(&self) -> Torque {
        self.params.max_torque()
    }

    /// Drag coefficient in Nm per (1000 RPM)².
    ///
    /// This is the drag torque at exactly 1000 RPM, not the drag at the
    /// current speed; drag grows with the square of speed.
    #[must_use]
    pub fn drag_coefficient(&self) -> Torque {
        self.params.drag_coefficient()
    }

    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    #[must_use]
    pub fn params(&self) -> &EngineParams {
        &self.params
    }
}
