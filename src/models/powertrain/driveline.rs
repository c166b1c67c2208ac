//! Engine and clutch coupled through a fixed per-tick protocol.
//!
//! Each [`Driveline::tick`] runs, in order:
//!
//! 1. Convert the pedals into throttle and engagement fractions.
//! 2. Evaluate the load torque from the current shaft speeds.
//! 3. Advance the engine.
//! 4. Synchronize the engine and transmission speeds through the clutch.
//! 5. Commit the synchronized engine speed back into the engine when the
//!    engagement exceeds the configured feedback threshold.
//! 6. Record a [`Sample`] in the history.
//!
//! Below the threshold the engine keeps the speed it computed itself and only
//! the transmission shaft sees the clutch adjustment.

mod config;
mod history;
mod load;
mod pedals;

pub use config::{DrivelineConfig, DrivelineConfigError};
pub use history::{History, Sample};
pub use load::{DrivetrainLoad, LoadContext, LoadModel};
pub use pedals::Pedals;

use log::{debug, trace};
use uom::{
    ConstZero,
    si::{
        f64::{AngularVelocity, Time},
        time::second,
        torque::newton_meter,
    },
};

use crate::support::units::ShaftSpeed;

use super::{
    clutch::{Clutch, ClutchParams, Regime},
    engine::{Engine, EngineParams},
};

/// An engine, a clutch, and the transmission input shaft they drive.
///
/// # Example
///
/// ```
/// use powertrain_models::{
///     models::powertrain::{
///         clutch::{ClutchParams, Regime},
///         driveline::{Driveline, DrivelineConfig, Pedals},
///         engine::EngineParams,
///     },
///     support::units::{ShaftSpeed, TimeStep},
/// };
///
/// let config = DrivelineConfig::new(TimeStep::from_seconds(0.1).unwrap());
/// let mut driveline = Driveline::new(EngineParams::default(), ClutchParams::default(), config);
///
/// let sample = driveline.tick(Pedals::new(0.0, 0.0));
///
/// assert_eq!(sample.regime, Regime::Locked);
/// assert!(sample.engine_speed.rpm() > sample.transmission_speed.rpm());
/// ```
#[derive(Debug, Clone)]
pub struct Driveline<L = DrivetrainLoad> {
    engine: Engine,
    clutch: Clutch,
    transmission_speed: AngularVelocity,
    load: L,
    config: DrivelineConfig,
    elapsed: Time,
    regime: Option<Regime>,
    history: History,
}

impl Driveline {
    /// Creates a driveline resisted by the default [`DrivetrainLoad`].
    #[must_use]
    pub fn new(engine: EngineParams, clutch: ClutchParams, config: DrivelineConfig) -> Self {
        Self::with_load(engine, clutch, config, DrivetrainLoad::default())
    }
}

impl<L: LoadModel> Driveline<L> {
    /// Creates a driveline with a custom load model.
    #[must_use]
    pub fn with_load(
        engine: EngineParams,
        clutch: ClutchParams,
        config: DrivelineConfig,
        load: L,
    ) -> Self {
        Self {
            engine: Engine::new(engine),
            clutch: Clutch::new(clutch),
            transmission_speed: config.initial_transmission_speed(),
            load,
            config,
            elapsed: Time::ZERO,
            regime: None,
            history: History::new(config.history_len()),
        }
    }

    /// Advances the driveline by one fixed tick and returns the recorded sample.
    pub fn tick(&mut self, pedals: Pedals) -> Sample {
        let dt = self.config.dt();
        let time = self.elapsed;
        let throttle = pedals.throttle();
        let engagement = pedals.engagement();

        let load = self.load.load_torque(&LoadContext {
            engine_speed: self.engine.speed(),
            transmission_speed: self.transmission_speed,
            engagement,
            max_engine_speed: self.engine.max_speed(),
        });

        self.engine.update(throttle, load, engagement, dt);

        let mut engine_speed = self.engine.speed();
        let regime = self.clutch.update(
            &mut engine_speed,
            &mut self.transmission_speed,
            engagement,
            dt,
        );

        if engagement > self.config.feedback_threshold() {
            self.engine.set_speed(engine_speed);
        }

        if self.regime != Some(regime) {
            debug!(
                "clutch {regime:?} at t={:.2} s, engagement={engagement:.3}",
                time.get::<second>()
            );
            self.regime = Some(regime);
        }

        let sample = Sample {
            time,
            pedals,
            engagement,
            regime,
            engine_speed: self.engine.speed(),
            clutch_engine_speed: engine_speed,
            engine_torque: self.engine.torque(),
            transmission_speed: self.transmission_speed,
            load,
        };
        trace!(
            "tick t={:.2} s: engine={:.1} rpm, transmission={:.1} rpm, load={:.2} Nm",
            time.get::<second>(),
            sample.engine_speed.rpm(),
            sample.transmission_speed.rpm(),
            load.get::<newton_meter>()
        );

        self.elapsed += *dt;
        self.history.push(sample);
        sample
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[must_use]
    pub fn clutch(&self) -> &Clutch {
        &self.clutch
    }

    #[must_use]
    pub fn transmission_speed(&self) -> AngularVelocity {
        self.transmission_speed
    }

    #[must_use]
    pub fn load(&self) -> &L {
        &self.load
    }

    #[must_use]
    pub fn config(&self) -> &DrivelineConfig {
        &self.config
    }

    /// Simulation time advanced so far.
    #[must_use]
    pub fn elapsed(&self) -> Time {
        self.elapsed
    }

    /// Regime reported by the most recent tick, if any.
    #[must_use]
    pub fn regime(&self) -> Option<Regime> {
        self.regime
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }
}
