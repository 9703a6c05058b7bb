//! The affective state tuple and its discretisation into emotional zones.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Valence range: hostile to loving.
pub const VALENCE_RANGE: (f64, f64) = (-1.0, 1.0);
/// Arousal range: sleepy to manic.
pub const AROUSAL_RANGE: (f64, f64) = (0.0, 1.0);
/// Patience range: exhausted to fully patient.
pub const PATIENCE_RANGE: (f64, f64) = (0.0, 1.0);

/// The persisted mood of the companion.
///
/// `consecutive_fast_messages` is volatile and never written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectiveState {
    /// Love/hate axis in `[-1, 1]`.
    pub valence: f64,
    /// Energy axis in `[0, 1]`.
    pub arousal: f64,
    /// Short-term tolerance in `[0, 1]`.
    pub patience: f64,
    /// When the user last interacted.
    pub last_interaction: DateTime<FixedOffset>,
    /// Streak of messages sent in quick succession.
    #[serde(skip)]
    pub consecutive_fast_messages: u32,
    /// Why the companion is upset, if anything specific.
    pub conflict_trigger: Option<String>,
}

impl AffectiveState {
    /// The state a fresh install starts from.
    #[must_use]
    pub fn initial(now: DateTime<FixedOffset>) -> Self {
        Self {
            valence: 0.5,
            arousal: 0.5,
            patience: 1.0,
            last_interaction: now,
            consecutive_fast_messages: 0,
            conflict_trigger: None,
        }
    }

    /// Clamp every bounded axis into its range.
    pub fn clamp(&mut self) {
        self.valence = self.valence.clamp(VALENCE_RANGE.0, VALENCE_RANGE.1);
        self.arousal = self.arousal.clamp(AROUSAL_RANGE.0, AROUSAL_RANGE.1);
        self.patience = self.patience.clamp(PATIENCE_RANGE.0, PATIENCE_RANGE.1);
    }

    /// Current emotional zone.
    #[must_use]
    pub fn zone(&self) -> EmotionalZone {
        EmotionalZone::classify(self.valence, self.arousal)
    }
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
#[must_use]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    from + (to - from) * t
}

/// Discretised mood derived from valence and arousal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalZone {
    /// Very happy and energetic.
    Ecstatic,
    /// Positive with energy to spare.
    Playful,
    /// Very positive, relaxed.
    Affectionate,
    /// Positive, relaxed.
    Calm,
    /// Very negative and wound up.
    Furious,
    /// Negative and restless.
    Annoyed,
    /// Very negative, low energy.
    Depressed,
    /// Negative, low energy.
    Cold,
    /// None of the above.
    Neutral,
}

impl EmotionalZone {
    /// Classify a (valence, arousal) pair.
    ///
    /// The ranges overlap; checks run top to bottom and the first match wins.
    #[must_use]
    pub fn classify(valence: f64, arousal: f64) -> Self {
        let (v, a) = (valence, arousal);
        if v >= 0.5 && a >= 0.6 {
            Self::Ecstatic
        } else if v >= 0.0 && a >= 0.5 {
            Self::Playful
        } else if v >= 0.5 && a < 0.5 {
            Self::Affectionate
        } else if v >= 0.0 && a < 0.5 {
            Self::Calm
        } else if v < -0.6 && a > 0.6 {
            Self::Furious
        } else if v < 0.0 && a > 0.5 {
            Self::Annoyed
        } else if v < -0.5 && a < 0.5 {
            Self::Depressed
        } else if v < 0.0 && a < 0.5 {
            Self::Cold
        } else {
            Self::Neutral
        }
    }

    /// Lowercase zone name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ecstatic => "ecstatic",
            Self::Playful => "playful",
            Self::Affectionate => "affectionate",
            Self::Calm => "calm",
            Self::Furious => "furious",
            Self::Annoyed => "annoyed",
            Self::Depressed => "depressed",
            Self::Cold => "cold",
            Self::Neutral => "neutral",
        }
    }

    /// Uppercase label used as the mood name.
    #[must_use]
    pub fn mood_label(self) -> String {
        self.as_str().to_uppercase()
    }

    /// Capitalised label for debug overlays.
    #[must_use]
    pub fn title(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Fixed dialogue tone directive for the zone.
    #[must_use]
    pub fn tone(self) -> &'static str {
        match self {
            Self::Ecstatic => "Energy is high! Use exclamation marks! Be manic and fun.",
            Self::Playful => "Be teasing and witty. Use emojis. Flirt a little.",
            Self::Calm => "Be peaceful, thoughtful, and verbose. Speak softly.",
            Self::Annoyed => "You are irritated. Give short answers. Be passive-aggressive.",
            Self::Furious => "You are angry. Do not be helpful. Confront the user.",
            Self::Cold => "Be distant. One word answers. 'Fine', 'Okay', 'Whatever'.",
            Self::Depressed => "You are sad. Sound hopeless. Low energy.",
            Self::Affectionate | Self::Neutral => "Be pleasant and helpful.",
        }
    }
}

impl fmt::Display for EmotionalZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tone used when patience has run out, whatever the zone.
pub const OVERWHELMED_TONE: &str =
    "You are overwhelmed. The user is spamming. Be curt. Tell them to slow down.";
