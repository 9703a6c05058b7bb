//! Looping idle eye expressions and instant expressions.

use super::face::textures as tx;

/// A looping idle expression on the preset channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Left-eye wink every two seconds.
    Wink,
    /// Eyes sweep left, centre, right.
    Scan,
    /// Teary eyes welling into tears.
    Cry,
    /// Raised brows and a right-eye wink.
    Flirty,
    /// Heavy lids.
    Tired,
}

impl Preset {
    /// All presets.
    pub const ALL: [Self; 5] = [Self::Wink, Self::Scan, Self::Cry, Self::Flirty, Self::Tired];

    /// Eye frames and how long each holds.
    #[must_use]
    pub fn frames(self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Wink => &[(tx::LEFT_EYE_BLINK, 0.5), (tx::EYE_OPEN, 1.5)],
            Self::Scan => &[
                (tx::BOTH_EYE_LEFT, 0.5),
                (tx::BOTH_EYE_TOWARDS_NOSE, 0.5),
                (tx::BOTH_EYE_RIGHT, 0.5),
                (tx::EYE_OPEN, 2.0),
            ],
            Self::Cry => &[
                (tx::BOTH_EYE_TEARY, 1.0),
                (tx::SINGLE_EYE_TEAR_FLOWING, 1.0),
                (tx::BOTH_EYE_TEAR_FLOWING, 2.0),
            ],
            Self::Flirty => &[(tx::RIGHT_EYE_BLINK, 0.5), (tx::EYE_OPEN, 2.0)],
            Self::Tired => &[(tx::LEFT_EYE_BLINK, 0.2), (tx::EYE_HALF, 1.5), (tx::EYE_OPEN, 1.5)],
        }
    }

    /// Brow texture held for the whole loop, if any.
    #[must_use]
    pub fn brows(self) -> Option<&'static str> {
        match self {
            Self::Flirty => Some(tx::BROW_UP),
            _ => None,
        }
    }

    /// Length of one loop.
    #[must_use]
    pub fn cycle_secs(self) -> f64 {
        self.frames().iter().map(|(_, hold)| hold).sum()
    }

    /// Short name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wink => "wink",
            Self::Scan => "scan",
            Self::Cry => "cry",
            Self::Flirty => "flirty",
            Self::Tired => "tired",
        }
    }

    /// Parse a short name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

/// An instant expression. Setting one stops the running preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expression {
    /// Open mouth, open eyes.
    Happy,
    /// Tears, furrowed brows.
    Sad,
    /// "Ah" mouth, raised brows.
    Surprised,
    /// Looks up, furrowed.
    Thinking,
    /// Cross-eyed concentration.
    Focus,
    /// Raised brows looking up; relaxes after a moment.
    Curious,
    /// Furrowed and cross-eyed.
    Tension,
}

/// Delay before a curious look relaxes.
pub const CURIOUS_RESTORE_SECS: f64 = 1.5;

impl Expression {
    /// `(brows, eyes, mouth)`; `None` leaves that feature as the preset
    /// reset left it.
    #[must_use]
    pub fn textures(self) -> (&'static str, &'static str, Option<&'static str>) {
        match self {
            Self::Happy => (tx::BROW_NEUTRAL, tx::EYE_OPEN, Some(tx::MOUTH_OPEN)),
            Self::Sad => (tx::BROW_IN, tx::BOTH_EYE_TEAR_FLOWING, Some(tx::MOUTH_NEUTRAL)),
            Self::Surprised => (tx::BROW_UP, tx::EYE_OPEN, Some(tx::MOUTH_AH)),
            Self::Thinking => (tx::BROW_IN, tx::BOTH_EYE_UP, Some(tx::MOUTH_NEUTRAL)),
            Self::Focus | Self::Tension => {
                (tx::BROW_IN, tx::BOTH_EYE_TOWARDS_NOSE, Some(tx::MOUTH_NEUTRAL))
            }
            Self::Curious => (tx::BROW_UP, tx::BOTH_EYE_UP, None),
        }
    }

    /// Delay after which brows and eyes relax, for transient expressions.
    #[must_use]
    pub fn restore_after(self) -> Option<f64> {
        (self == Self::Curious).then_some(CURIOUS_RESTORE_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_lengths() {
        assert!((Preset::Wink.cycle_secs() - 2.0).abs() < 1e-9);
        assert!((Preset::Scan.cycle_secs() - 3.5).abs() < 1e-9);
        assert!((Preset::Tired.cycle_secs() - 3.2).abs() < 1e-9);
    }

    #[test]
    fn names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_name(preset.as_str()), Some(preset));
        }
        assert_eq!(Preset::from_name("sulk"), None);
    }

    #[test]
    fn only_curious_restores() {
        assert_eq!(Expression::Curious.restore_after(), Some(1.5));
        assert_eq!(Expression::Happy.restore_after(), None);
    }
}
