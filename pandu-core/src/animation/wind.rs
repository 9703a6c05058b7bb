//! Hair overlay loops keyed by headwear and wind strength.

use serde::{Deserialize, Serialize};

/// Hold time of every canned wind frame.
pub const WIND_FRAME_SECS: f64 = 0.8;

/// Speed below which the air counts as still.
pub const CALM_SPEED: f32 = 0.1;
/// Speed above which the wind counts as strong.
pub const STRONG_SPEED: f32 = 0.5;

/// Canned wind loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindVariant {
    /// Strong wind, bare head. Base hair hidden.
    A,
    /// Light wind, bare head. Base hair hidden.
    B,
    /// Wind under a regular hat.
    C,
    /// Strong wind under a winter hat.
    D,
    /// Light wind under a winter hat.
    E,
    /// Winter hat flapping.
    F,
}

impl WindVariant {
    /// Overlay frames, each held for [`WIND_FRAME_SECS`].
    #[must_use]
    pub fn frames(self) -> &'static [&'static str] {
        match self {
            Self::A => &["hair_2", "hair_3", "hair_2", "hair_2", "hair_3", "hair", "hair_3", "hair_2"],
            Self::B | Self::E => &["hair_2", "hair_3", "hair_2"],
            Self::C => &["hair_4", "hair_2", "hair_4", "hair_3", "hair_4"],
            Self::D => &["hair_2", "hair_3", "winter_hat", "hair_2"],
            Self::F => &["hair", "winter_hat", "hair"],
        }
    }

    /// Base asset the variant forces, if any.
    #[must_use]
    pub fn forced_base(self) -> Option<&'static str> {
        match self {
            Self::A | Self::B => None,
            Self::C => Some("hat_1"),
            Self::D => Some("winter_hat_motion_wind"),
            Self::E | Self::F => Some("winter_hat"),
        }
    }

    /// Whether the base layer stays visible under the overlay.
    #[must_use]
    pub fn shows_base(self) -> bool {
        self.forced_base().is_some()
    }

    /// Pick a loop for the current headwear and weather. `None` means the
    /// wind channel should stop.
    #[must_use]
    pub fn select(accessory: Option<&str>, speed: f32, is_outdoor: bool) -> Option<Self> {
        if !is_outdoor || speed < CALM_SPEED {
            return None;
        }
        let strong = speed > STRONG_SPEED;
        let variant = match accessory {
            Some(a) if a.contains("winter_hat") => {
                if strong { Self::D } else { Self::E }
            }
            Some(a) if a.contains("hat") => Self::C,
            _ => {
                if strong { Self::A } else { Self::B }
            }
        };
        Some(variant)
    }
}

/// One frame of a custom wind loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindStep {
    /// Overlay asset.
    pub asset: String,
    /// Hold time in seconds.
    pub secs: f64,
}

impl WindStep {
    /// Create a new step.
    #[must_use]
    pub fn new(asset: impl Into<String>, secs: f64) -> Self {
        Self {
            asset: asset.into(),
            secs,
        }
    }

    /// Steps naming `"none"` or with no duration are dropped.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.asset != "none" && self.secs > 0.0
    }
}

/// A wind loop ready to play: frames plus looping flag.
#[derive(Debug, Clone, PartialEq)]
pub struct WindProgram {
    /// Frames in order.
    pub steps: Vec<WindStep>,
    /// Whether the frames repeat forever.
    pub looped: bool,
}

impl WindProgram {
    /// The canned loop for `variant`.
    #[must_use]
    pub fn canned(variant: WindVariant) -> Self {
        Self {
            steps: variant
                .frames()
                .iter()
                .map(|asset| WindStep::new(*asset, WIND_FRAME_SECS))
                .collect(),
            looped: true,
        }
    }

    /// A custom loop; unplayable steps are filtered out. `None` if nothing
    /// is left.
    #[must_use]
    pub fn custom(steps: Vec<WindStep>, looped: bool) -> Option<Self> {
        let steps: Vec<_> = steps.into_iter().filter(WindStep::is_playable).collect();
        (!steps.is_empty()).then_some(Self { steps, looped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_table() {
        assert_eq!(WindVariant::select(None, 0.8, false), None);
        assert_eq!(WindVariant::select(None, 0.05, true), None);
        assert_eq!(WindVariant::select(Some("winter_hat_red"), 0.8, true), Some(WindVariant::D));
        assert_eq!(WindVariant::select(Some("winter_hat"), 0.3, true), Some(WindVariant::E));
        assert_eq!(WindVariant::select(Some("hat_1"), 0.9, true), Some(WindVariant::C));
        assert_eq!(WindVariant::select(None, 0.6, true), Some(WindVariant::A));
        assert_eq!(WindVariant::select(Some("glasses"), 0.5, true), Some(WindVariant::B));
    }

    #[test]
    fn custom_program_filters_steps() {
        let program = WindProgram::custom(
            vec![
                WindStep::new("hair_2", 0.4),
                WindStep::new("none", 0.4),
                WindStep::new("hair_3", 0.0),
            ],
            false,
        )
        .expect("one playable step");
        assert_eq!(program.steps, vec![WindStep::new("hair_2", 0.4)]);
        assert!(WindProgram::custom(vec![WindStep::new("none", 1.0)], true).is_none());
    }

    #[test]
    fn hat_variants_force_base() {
        assert_eq!(WindVariant::C.forced_base(), Some("hat_1"));
        assert!(!WindVariant::A.shows_base());
        assert_eq!(WindProgram::canned(WindVariant::F).steps.len(), 3);
    }
}
