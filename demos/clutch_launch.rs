//! Scripted launch: rev the engine with the clutch pressed, then release it.
//!
//! Run with `RUST_LOG=debug` to see regime changes, or `trace` for every tick.

use std::error::Error;

use clap::Parser;
use log::info;
use powertrain_models::{
    models::powertrain::{
        clutch::{ClutchParams, LockPolicy},
        driveline::{Driveline, DrivelineConfig, Pedals},
        engine::{EngineParams, EquilibriumConfig, OperatingPoint},
    },
    support::units::{ShaftSpeed, TimeStep},
};
use uom::si::{time::second, torque::newton_meter};

/// Engine and clutch launch simulation
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Fixed step in seconds.
    #[arg(long, default_value_t = 0.1)]
    dt: f64,

    /// Total simulated time in seconds.
    #[arg(long, default_value_t = 8.0)]
    duration: f64,

    /// Throttle pedal position in percent.
    #[arg(long, default_value_t = 60.0)]
    throttle: f64,

    /// Time at which the driver starts releasing the clutch, in seconds.
    #[arg(long, default_value_t = 2.0)]
    release_at: f64,

    /// Time taken to release the clutch pedal fully, in seconds.
    #[arg(long, default_value_t = 1.5)]
    release_over: f64,

    /// Snap both shafts to their mean on lock instead of converging quickly.
    #[arg(long)]
    instant_lock: bool,
}

impl Cli {
    /// Clutch pedal position at time `t`.
    fn clutch_percent(&self, t: f64) -> f64 {
        if t < self.release_at {
            100.0
        } else if self.release_over <= 0.0 {
            0.0
        } else {
            100.0 * (1.0 - (t - self.release_at) / self.release_over)
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let dt = TimeStep::from_seconds(cli.dt)?;
    let engine = EngineParams::default();
    let clutch = if cli.instant_lock {
        ClutchParams::default().with_lock(LockPolicy::Instant)
    } else {
        ClutchParams::default()
    };

    let mut driveline = Driveline::new(engine, clutch, DrivelineConfig::new(dt));

    // Truncation is fine; a partial final tick is not simulated.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let ticks = (cli.duration / cli.dt).max(0.0) as usize;

    println!(
        "{:>6} {:>8} {:>8} {:>10} {:>9} {:>10} {:>8}",
        "t [s]", "throttle", "clutch", "regime", "engine", "trans", "load"
    );

    for tick in 0..ticks {
        #[allow(clippy::cast_precision_loss)]
        let t = tick as f64 * cli.dt;
        let pedals = Pedals::new(cli.throttle, cli.clutch_percent(t));
        let sample = driveline.tick(pedals);

        println!(
            "{:>6.2} {:>7.1}% {:>7.1}% {:>10} {:>9.1} {:>10.1} {:>8.2}",
            sample.time.get::<second>(),
            sample.pedals.throttle_percent(),
            sample.pedals.clutch_percent(),
            format!("{:?}", sample.regime),
            sample.engine_speed.rpm(),
            sample.transmission_speed.rpm(),
            sample.load.get::<newton_meter>(),
        );
    }

    if let Some(last) = driveline.history().latest() {
        let point = driveline.engine().equilibrium(
            cli.throttle / 100.0,
            last.load,
            EquilibriumConfig::default(),
        )?;
        match point {
            OperatingPoint::Balanced { speed, torque } => info!(
                "steady state at final load: {:.1} rpm, {:.1} Nm",
                speed.rpm(),
                torque.get::<newton_meter>()
            ),
            OperatingPoint::Idle => info!("steady state at final load: idle governed"),
            OperatingPoint::RevLimit => info!("steady state at final load: rev limited"),
        }
    }

    Ok(())
}
