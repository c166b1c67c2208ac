/// Clutch coupling regime, selected purely by the instantaneous engagement.
///
/// There is no hysteresis: the same engagement always maps to the same
/// regime, whatever the previous tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    /// Plates apart; the transmission shaft freewheels.
    Disengaged,

    /// Plates slipping; both shafts converge at a rate set by engagement.
    Slipping,

    /// Plates clamped; both shafts lock together.
    Locked,
}

impl Regime {
    /// Classifies an engagement level in `[0, 1]`.
    ///
    /// Engagements within `tolerance` of either end count as that end, so
    /// values like `1.0 - 1e-12` produced by pedal arithmetic still lock.
    #[must_use]
    pub fn classify(engagement: f64, tolerance: f64) -> Self {
        if engagement <= tolerance {
            Self::Disengaged
        } else if engagement >= 1.0 - tolerance {
            Self::Locked
        } else {
            Self::Slipping
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_ends() {
        assert_eq!(Regime::classify(0.0, 0.0), Regime::Disengaged);
        assert_eq!(Regime::classify(1.0, 0.0), Regime::Locked);
        assert_eq!(Regime::classify(0.5, 0.0), Regime::Slipping);
    }

    #[test]
    fn near_ends_snap_within_tolerance() {
        let tol = 1e-6;
        assert_eq!(Regime::classify(1e-9, tol), Regime::Disengaged);
        assert_eq!(Regime::classify(1.0 - 1e-12, tol), Regime::Locked);
        assert_eq!(Regime::classify(1e-3, tol), Regime::Slipping);
        assert_eq!(Regime::classify(1.0 - 1e-3, tol), Regime::Slipping);
    }
}
