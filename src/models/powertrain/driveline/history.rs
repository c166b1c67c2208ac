use std::{collections::VecDeque, num::NonZeroUsize};

use uom::si::f64::{AngularVelocity, Time, Torque};

use crate::models::powertrain::clutch::Regime;

use super::Pedals;

/// Driveline state recorded by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Simulation time at the start of the tick; the first sample is at zero.
    pub time: Time,
    pub pedals: Pedals,
    pub engagement: f64,
    pub regime: Regime,

    /// Engine speed after any clutch feedback was committed.
    pub engine_speed: AngularVelocity,

    /// Engine-side speed leaving the clutch, whether or not it was fed back.
    pub clutch_engine_speed: AngularVelocity,
    pub engine_torque: Torque,
    pub transmission_speed: AngularVelocity,
    pub load: Torque,
}

/// Fixed-capacity ring buffer of recent [`Sample`]s.
///
/// Once full, each push evicts the oldest sample.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    samples: VecDeque<Sample>,
    capacity: NonZeroUsize,
}

impl History {
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity.get()),
            capacity,
        }
    }

    pub fn push(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity.get() {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sample> + ExactSizeIterator {
        self.samples.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}
