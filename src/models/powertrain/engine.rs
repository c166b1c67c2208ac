//! Combustion engine model.
//!
//! [`Engine`] is the stateful component used by the driveline.
//! [`EngineModel`] adapts the same tick to [`twine_core::Model`] as a pure
//! state transition, so an engine can be driven by Twine solvers and
//! observers without owning any state.

mod core;

pub use self::core::{
    Engine, EngineInputs, EngineParams, EngineParamsError, EngineState, EquilibriumConfig,
    EquilibriumError, InertiaModel, OperatingPoint,
};

use std::convert::Infallible;

use twine_core::Model;

use crate::support::units::TimeStep;

/// One fixed engine tick: the state to advance, its inputs, and the step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineTick {
    pub state: EngineState,
    pub inputs: EngineInputs,
    pub dt: TimeStep,
}

/// [`twine_core::Model`] adapter mapping an [`EngineTick`] to the next [`EngineState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineModel {
    params: EngineParams,
}

impl EngineModel {
    #[must_use]
    pub fn new(params: EngineParams) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn params(&self) -> &EngineParams {
        &self.params
    }
}

impl Model for EngineModel {
    type Input = EngineTick;
    type Output = EngineState;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.params.step(&input.state, &input.inputs, input.dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Torque, torque::newton_meter};

    #[test]
    fn model_matches_stateful_engine() {
        let params = EngineParams::default();
        let model = EngineModel::new(params);
        let mut engine = Engine::new(params);
        let dt = TimeStep::from_seconds(0.05).unwrap();

        let mut state = *engine.state();
        for tick in 0..50 {
            let inputs = EngineInputs {
                throttle: if tick < 25 { 0.9 } else { 0.0 },
                load: Torque::new::<newton_meter>(8.0),
                clutch_engagement: 0.3,
            };

            state = model.call(&EngineTick { state, inputs, dt }).unwrap();
            engine.update(inputs.throttle, inputs.load, inputs.clutch_engagement, dt);

            assert_eq!(&state, engine.state());
        }
    }
}
