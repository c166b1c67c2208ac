/// Full-scale reading of a positive trigger axis.
const AXIS_FULL_SCALE: f64 = 32767.0;

/// Throttle and clutch pedal positions in percent.
///
/// A clutch pedal at 100% is fully pressed, which disengages the clutch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pedals {
    throttle_percent: f64,
    clutch_percent: f64,
}

impl Pedals {
    /// Creates pedal positions, clamping each to `[0, 100]` percent.
    #[must_use]
    pub fn new(throttle_percent: f64, clutch_percent: f64) -> Self {
        Self {
            throttle_percent: throttle_percent.clamp(0.0, 100.0),
            clutch_percent: clutch_percent.clamp(0.0, 100.0),
        }
    }

    /// Maps raw trigger axis readings to pedal positions.
    ///
    /// Negative readings count as released.
    #[must_use]
    pub fn from_axes(throttle_axis: i16, clutch_axis: i16) -> Self {
        Self::new(axis_percent(throttle_axis), axis_percent(clutch_axis))
    }

    #[must_use]
    pub fn throttle_percent(&self) -> f64 {
        self.throttle_percent
    }

    #[must_use]
    pub fn clutch_percent(&self) -> f64 {
        self.clutch_percent
    }

    /// Throttle as a fraction in `[0, 1]`.
    #[must_use]
    pub fn throttle(&self) -> f64 {
        self.throttle_percent / 100.0
    }

    /// Clutch engagement in `[0, 1]`: released pedal is fully engaged.
    #[must_use]
    pub fn engagement(&self) -> f64 {
        (1.0 - self.clutch_percent / 100.0).clamp(0.0, 1.0)
    }
}

/// Throttle released, clutch pressed: the state with no driver input.
impl Default for Pedals {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

fn axis_percent(axis: i16) -> f64 {
    f64::from(axis.max(0)) / AXIS_FULL_SCALE * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn default_is_idle_with_clutch_pressed() {
        let pedals = Pedals::default();
        assert_relative_eq!(pedals.throttle(), 0.0);
        assert_relative_eq!(pedals.engagement(), 0.0);
    }

    #[test]
    fn engagement_inverts_clutch_pedal() {
        assert_relative_eq!(Pedals::new(0.0, 0.0).engagement(), 1.0);
        assert_relative_eq!(Pedals::new(0.0, 25.0).engagement(), 0.75);
        assert_relative_eq!(Pedals::new(0.0, 100.0).engagement(), 0.0);
    }

    #[test]
    fn positions_are_clamped() {
        let pedals = Pedals::new(150.0, -20.0);
        assert_relative_eq!(pedals.throttle_percent(), 100.0);
        assert_relative_eq!(pedals.clutch_percent(), 0.0);
        assert_relative_eq!(pedals.throttle(), 1.0);
        assert_relative_eq!(pedals.engagement(), 1.0);
    }

    #[test]
    fn axes_map_to_percent() {
        let pedals = Pedals::from_axes(i16::MAX, 0);
        assert_relative_eq!(pedals.throttle_percent(), 100.0);
        assert_relative_eq!(pedals.clutch_percent(), 0.0);

        let half = Pedals::from_axes(16384, -32768);
        assert_relative_eq!(half.throttle_percent(), 50.0, epsilon = 0.01);
        assert_relative_eq!(half.clutch_percent(), 0.0);
    }
}
