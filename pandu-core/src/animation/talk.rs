//! Mouth cycles for the talk channel.
//!
//! Canned variants loop a fixed frame list at a fixed cadence. Natural talk
//! is a state machine producing one randomised step at a time; the player
//! schedules the next step when the current one finishes.

use rand::Rng;

use super::face::textures as tx;

/// Which talk loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TalkStyle {
    /// neutral, open, neutral, ah, neutral @ 0.15 s.
    Variant1,
    /// neutral, ah, open, ah, neutral @ 0.1 s.
    Variant2,
    /// neutral, open, neutral @ 0.3 s.
    Variant3,
    /// open, ah, open, ah @ 0.12 s.
    Variant4,
    /// Randomised phoneme stream.
    Natural,
}

impl TalkStyle {
    /// Frame list and per-frame hold for canned variants.
    #[must_use]
    pub fn frames(self) -> Option<(&'static [&'static str], f64)> {
        const V1: [&str; 5] = [tx::MOUTH_NEUTRAL, tx::MOUTH_OPEN, tx::MOUTH_NEUTRAL, tx::MOUTH_AH, tx::MOUTH_NEUTRAL];
        const V2: [&str; 5] = [tx::MOUTH_NEUTRAL, tx::MOUTH_AH, tx::MOUTH_OPEN, tx::MOUTH_AH, tx::MOUTH_NEUTRAL];
        const V3: [&str; 3] = [tx::MOUTH_NEUTRAL, tx::MOUTH_OPEN, tx::MOUTH_NEUTRAL];
        const V4: [&str; 4] = [tx::MOUTH_OPEN, tx::MOUTH_AH, tx::MOUTH_OPEN, tx::MOUTH_AH];
        match self {
            Self::Variant1 => Some((&V1, 0.15)),
            Self::Variant2 => Some((&V2, 0.1)),
            Self::Variant3 => Some((&V3, 0.3)),
            Self::Variant4 => Some((&V4, 0.12)),
            Self::Natural => None,
        }
    }

    /// Short name, as used in logs and by callers picking a variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Variant1 => "talk1",
            Self::Variant2 => "talk2",
            Self::Variant3 => "talk3",
            Self::Variant4 => "talk4",
            Self::Natural => "natural",
        }
    }
}

/// Mouth shapes used by natural talk, with their pick weights.
const PHONEMES: [(&str, f64); 3] = [(tx::MOUTH_OPEN, 0.55), (tx::MOUTH_AH, 0.30), (tx::MOUTH_NEUTRAL, 0.15)];

const PAUSE_CHANCE: f64 = 0.20;
const BOB_CHANCE: f64 = 0.3;

/// Vertical jaw travel for one natural-talk step.
pub const JAW_DROP: f32 = 1.5;
/// Jaw stretch on the way down, relative to the shape's base scale.
pub const JAW_STRETCH: f32 = 1.05;

/// One unit of natural talk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TalkStep {
    /// Close the mouth and hold.
    Pause {
        /// Hold time.
        secs: f64,
    },
    /// Show a shape and flex the jaw.
    Shape {
        /// Mouth texture.
        mouth: &'static str,
        /// Jaw down-and-up time.
        jaw_secs: f64,
        /// Whether the body bobs along.
        bob: bool,
        /// Gap after the jaw settles.
        trailing_secs: f64,
    },
}

impl TalkStep {
    /// Time until the next step is due.
    #[must_use]
    pub fn duration(&self) -> f64 {
        match *self {
            Self::Pause { secs } => secs,
            Self::Shape {
                jaw_secs,
                trailing_secs,
                ..
            } => jaw_secs + trailing_secs,
        }
    }
}

/// State carried between natural-talk steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NaturalTalk {
    last_phoneme: Option<&'static str>,
    repeat_count: u32,
}

impl NaturalTalk {
    /// Fresh state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shape shown by the previous step.
    #[must_use]
    pub fn last_phoneme(&self) -> Option<&'static str> {
        self.last_phoneme
    }

    /// Consecutive repeats of the last shape.
    #[must_use]
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    /// Weighted shape pick.
    pub fn pick_phoneme<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
        let total: f64 = PHONEMES.iter().map(|(_, w)| w).sum();
        let mut r = rng.gen_range(0.0..total);
        for (name, weight) in PHONEMES {
            r -= weight;
            if r <= 0.0 {
                return name;
            }
        }
        tx::MOUTH_NEUTRAL
    }

    /// Choose a shape, re-rolling on the second consecutive repeat.
    pub fn choose_phoneme<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &'static str {
        let mut phoneme = Self::pick_phoneme(rng);
        if Some(phoneme) == self.last_phoneme {
            self.repeat_count += 1;
            if self.repeat_count >= 2 {
                while Some(phoneme) == self.last_phoneme {
                    phoneme = Self::pick_phoneme(rng);
                }
                self.repeat_count = 0;
            }
        } else {
            self.repeat_count = 0;
        }
        self.last_phoneme = Some(phoneme);
        phoneme
    }

    /// Produce the next step.
    pub fn next_step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TalkStep {
        if rng.gen_bool(PAUSE_CHANCE) {
            return TalkStep::Pause {
                secs: rng.gen_range(0.15..=0.7),
            };
        }
        let mouth = self.choose_phoneme(rng);
        let jaw_secs = rng.gen_range(0.08..=0.18);
        let bob = rng.gen_bool(BOB_CHANCE);
        TalkStep::Shape {
            mouth,
            jaw_secs,
            bob,
            trailing_secs: rng.gen_range(0.02..=0.08),
        }
    }
}
