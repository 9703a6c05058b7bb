//! Named one-shot reactions and the data that drives each of them.
//!
//! Every reaction is a [`ReactionDescriptor`]: three optional facial
//! textures, a body motion, and how long until the face resets. The player
//! evaluates descriptors generically.

use std::fmt;

use crate::animation::face::textures as tx;
use crate::animation::motion::{MotionStep, move_by, rotate, scale_to, wait};
use crate::types::{GestureIntensity, PullDirection};

/// Prefix the resolver puts on every reaction id.
pub const SERVER_ID_PREFIX: &str = "react_";

/// A named reaction animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionId {
    // Positive.
    /// Happy face with a double bounce.
    Laugh,
    /// Content closed eyes, slight lean.
    NuzzleHappy,
    /// Closed eyes and a burst of hearts.
    FingerKiss,
    /// Dreamy half-closed eyes, gentle lean.
    ShyPleased,
    /// Raised brows and a wiggle.
    Ticklish,
    /// Shoulder shrug with closed eyes.
    EarBlush,
    /// Pleased expression, small double dip.
    PatHappy,
    /// Open-mouthed hop.
    SurprisedHappy,
    /// Fake pain, teasing wiggle.
    OuchPlayful,
    /// Cross-eyed double shake.
    CrossEyedSilly,
    /// Surprised head shake.
    HairSurprisePlayful,

    // Neutral.
    /// Quick eye close, restores the previous eyes.
    Blink,
    /// Low-energy sigh.
    NuzzleTired,
    /// Looks away with a small smile.
    ShySmile,
    /// Half-closed eyes, slight tilt.
    ShyTolerant,
    /// Quick curious head tilt.
    EarTwitch,
    /// Looks up, puzzled.
    EarCurious,
    /// Tolerant dip.
    PatTolerant,
    /// Raised brows, mouth closed.
    SurprisedNeutral,
    /// Mild wince.
    OuchMild,
    /// Slight lean away.
    DisgustLight,
    /// Patient sigh.
    Tolerate,
    /// Mild hair wince.
    HairOuch,
    /// Puzzled tilt.
    Confused,

    // Negative.
    /// Furrowed, unimpressed.
    AnnoyedLight,
    /// Slides away to the right.
    PullAway,
    /// Real pain, teary shake.
    OuchAngry,
    /// Embarrassed flinch.
    MouthCover,
    /// Backs off and shrinks.
    Recoil,
    /// Irritated twitch.
    AnnoyedEar,
    /// Swatting motion.
    AnnoyedSwat,
    /// Scared jump.
    Startled,
    /// Strong shrink away.
    DisgustRecoil,
    /// Crying shake.
    HairHurt,
    /// Exasperated sigh, looks away.
    AnnoyedSpam,

    // Local fallback only.
    /// Content tilt towards the touch.
    Nuzzle,
    /// Pinch pain; crying when intense.
    Ouch(GestureIntensity),
    /// Surprised hop.
    Surprised,
    /// One-eyed glare.
    Annoyed,
    /// Recoil from a held nose; slower when intense.
    Disgust(GestureIntensity),
    /// Shy shrug and giggle.
    ShyLaugh,
    /// Eyes follow the pull; crying when intense.
    HairPull {
        /// Pull direction.
        direction: PullDirection,
        /// Pull strength.
        intensity: GestureIntensity,
    },
}

/// When and how a reaction hands the face back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResetPolicy {
    /// Reset eyes, brows and mouth to neutral after the delay.
    Neutral(f64),
    /// Put back whatever eyes were showing before, after the delay.
    RestoreEyes(f64),
}

impl ResetPolicy {
    /// Delay before the reset fires.
    #[must_use]
    pub fn delay(self) -> f64 {
        match self {
            Self::Neutral(secs) | Self::RestoreEyes(secs) => secs,
        }
    }
}

/// Data needed to play one reaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionDescriptor {
    /// Brow texture to show, if it changes.
    pub brows: Option<&'static str>,
    /// Eye texture to show, if it changes.
    pub eyes: Option<&'static str>,
    /// Mouth texture to show, if it changes.
    pub mouth: Option<&'static str>,
    /// Body flourish.
    pub motion: Vec<MotionStep>,
    /// How many times the flourish plays.
    pub motion_repeat: u32,
    /// Reset after the reaction.
    pub reset: ResetPolicy,
    /// Whether the idle preset is stopped first.
    pub clears_preset: bool,
    /// Whether hearts burst from the touch point.
    pub hearts: bool,
}

impl ReactionDescriptor {
    fn face(brows: &'static str, eyes: &'static str, mouth: &'static str, reset_after: f64) -> Self {
        Self {
            brows: Some(brows),
            eyes: Some(eyes),
            mouth: Some(mouth),
            motion: Vec::new(),
            motion_repeat: 1,
            reset: ResetPolicy::Neutral(reset_after),
            clears_preset: false,
            hearts: false,
        }
    }

    fn with_motion(mut self, motion: Vec<MotionStep>) -> Self {
        self.motion = motion;
        self
    }

    fn repeat(mut self, count: u32) -> Self {
        self.motion_repeat = count;
        self
    }

    fn clearing_preset(mut self) -> Self {
        self.clears_preset = true;
        self
    }
}

fn shake(angle: f32, half: f64) -> Vec<MotionStep> {
    vec![rotate(angle, half), rotate(-2.0 * angle, half * 2.0), rotate(angle, half)]
}

fn hop(height: f32, up: f64, down: f64) -> Vec<MotionStep> {
    vec![move_by(0.0, height, up), move_by(0.0, -height, down)]
}

fn hold(first: MotionStep, pause: f64, back: MotionStep) -> Vec<MotionStep> {
    vec![first, wait(pause), back]
}

impl ReactionId {
    /// Every reaction the resolver can name, in catalogue order.
    pub const SERVER_REACTIONS: [Self; 35] = [
        Self::Laugh,
        Self::NuzzleHappy,
        Self::FingerKiss,
        Self::ShyPleased,
        Self::Ticklish,
        Self::EarBlush,
        Self::PatHappy,
        Self::SurprisedHappy,
        Self::OuchPlayful,
        Self::CrossEyedSilly,
        Self::HairSurprisePlayful,
        Self::Blink,
        Self::NuzzleTired,
        Self::ShySmile,
        Self::ShyTolerant,
        Self::EarTwitch,
        Self::EarCurious,
        Self::PatTolerant,
        Self::SurprisedNeutral,
        Self::OuchMild,
        Self::DisgustLight,
        Self::Tolerate,
        Self::HairOuch,
        Self::Confused,
        Self::AnnoyedLight,
        Self::PullAway,
        Self::OuchAngry,
        Self::MouthCover,
        Self::Recoil,
        Self::AnnoyedEar,
        Self::AnnoyedSwat,
        Self::Startled,
        Self::DisgustRecoil,
        Self::HairHurt,
        Self::AnnoyedSpam,
    ];

    /// Look up a resolver id such as `"react_laugh"`.
    #[must_use]
    pub fn from_server_id(id: &str) -> Option<Self> {
        let name = id.strip_prefix(SERVER_ID_PREFIX)?;
        Self::SERVER_REACTIONS
            .iter()
            .copied()
            .find(|r| r.short_name() == Some(name))
    }

    /// Resolver id, for reactions the resolver can name.
    #[must_use]
    pub fn server_id(self) -> Option<String> {
        self.short_name().map(|n| format!("{SERVER_ID_PREFIX}{n}"))
    }

    /// Id without the `react_` prefix. `None` for local-only reactions.
    #[must_use]
    pub fn short_name(self) -> Option<&'static str> {
        let name = match self {
            Self::Laugh => "laugh",
            Self::NuzzleHappy => "nuzzle_happy",
            Self::FingerKiss => "finger_kiss",
            Self::ShyPleased => "shy_pleased",
            Self::Ticklish => "ticklish",
            Self::EarBlush => "ear_blush",
            Self::PatHappy => "pat_happy",
            Self::SurprisedHappy => "surprised_happy",
            Self::OuchPlayful => "ouch_playful",
            Self::CrossEyedSilly => "cross_eyed_silly",
            Self::HairSurprisePlayful => "hair_surprise_playful",
            Self::Blink => "blink",
            Self::NuzzleTired => "nuzzle_tired",
            Self::ShySmile => "shy_smile",
            Self::ShyTolerant => "shy_tolerant",
            Self::EarTwitch => "ear_twitch",
            Self::EarCurious => "ear_curious",
            Self::PatTolerant => "pat_tolerant",
            Self::SurprisedNeutral => "surprised_neutral",
            Self::OuchMild => "ouch_mild",
            Self::DisgustLight => "disgust_light",
            Self::Tolerate => "tolerate",
            Self::HairOuch => "hair_ouch",
            Self::Confused => "confused",
            Self::AnnoyedLight => "annoyed_light",
            Self::PullAway => "pull_away",
            Self::OuchAngry => "ouch_angry",
            Self::MouthCover => "mouth_cover",
            Self::Recoil => "recoil",
            Self::AnnoyedEar => "annoyed_ear",
            Self::AnnoyedSwat => "annoyed_swat",
            Self::Startled => "startled",
            Self::DisgustRecoil => "disgust_recoil",
            Self::HairHurt => "hair_hurt",
            Self::AnnoyedSpam => "annoyed_spam",
            Self::Nuzzle
            | Self::Ouch(_)
            | Self::Surprised
            | Self::Annoyed
            | Self::Disgust(_)
            | Self::ShyLaugh
            | Self::HairPull { .. } => return None,
        };
        Some(name)
    }

    /// Textures, motion and reset timing for this reaction.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn descriptor(self) -> ReactionDescriptor {
        use ReactionDescriptor as D;
        match self {
            Self::Laugh => D::face(tx::BROW_NEUTRAL, tx::EYE_OPEN, tx::MOUTH_OPEN, 1.2)
                .with_motion(hop(5.0, 0.1, 0.1))
                .repeat(2)
                .clearing_preset(),
            Self::NuzzleHappy => D::face(tx::BROW_NEUTRAL, tx::EYE_CLOSE, tx::MOUTH_OPEN, 1.5)
                .with_motion(hold(rotate(0.05, 0.4), 0.6, rotate(-0.05, 0.3))),
            Self::FingerKiss => D {
                hearts: true,
                ..D::face(tx::BROW_NEUTRAL, tx::EYE_CLOSE, tx::MOUTH_NEUTRAL, 1.5)
            },
            Self::ShyPleased => D::face(tx::BROW_UP, tx::EYE_HALF, tx::MOUTH_OPEN, 1.8)
                .with_motion(hold(rotate(0.04, 0.4), 0.8, rotate(-0.04, 0.3))),
            Self::Ticklish => D::face(tx::BROW_UP, tx::EYE_HALF, tx::MOUTH_OPEN, 1.0)
                .with_motion(shake(0.03, 0.1)),
            Self::EarBlush => D::face(tx::BROW_UP, tx::EYE_CLOSE, tx::MOUTH_OPEN, 1.5)
                .with_motion(hold(move_by(0.0, 8.0, 0.2), 0.6, move_by(0.0, -8.0, 0.3))),
            Self::PatHappy => D::face(tx::BROW_NEUTRAL, tx::EYE_CLOSE, tx::MOUTH_OPEN, 1.2)
                .with_motion(hop(-3.0, 0.15, 0.15))
                .repeat(2),
            Self::SurprisedHappy => D::face(tx::BROW_UP, tx::EYE_OPEN, tx::MOUTH_AH, 1.0)
                .with_motion(hop(10.0, 0.1, 0.2)),
            Self::OuchPlayful => D::face(tx::BROW_IN, tx::EYE_CLOSE, tx::MOUTH_AH, 1.0)
                .with_motion(shake(0.03, 0.08)),
            Self::CrossEyedSilly => {
                D::face(tx::BROW_UP, tx::BOTH_EYE_TOWARDS_NOSE, tx::MOUTH_OPEN, 1.2)
                    .with_motion(shake(0.02, 0.1))
                    .repeat(2)
            }
            Self::HairSurprisePlayful => D::face(tx::BROW_UP, tx::EYE_OPEN, tx::MOUTH_AH, 1.0)
                .with_motion(shake(0.04, 0.1)),

            Self::Blink => D {
                brows: None,
                mouth: None,
                reset: ResetPolicy::RestoreEyes(0.2),
                ..D::face(tx::BROW_NEUTRAL, tx::EYE_CLOSE, tx::MOUTH_NEUTRAL, 0.2)
            },
            Self::NuzzleTired => D::face(tx::BROW_NEUTRAL, tx::EYE_HALF, tx::MOUTH_NEUTRAL, 1.8)
                .with_motion(hold(move_by(0.0, -3.0, 0.4), 0.6, move_by(0.0, 3.0, 0.4))),
            Self::ShySmile => D::face(tx::BROW_NEUTRAL, tx::BOTH_EYE_LEFT, tx::MOUTH_NEUTRAL, 1.2),
            Self::ShyTolerant => D::face(tx::BROW_NEUTRAL, tx::EYE_HALF, tx::MOUTH_NEUTRAL, 1.5)
                .with_motion(hold(rotate(0.02, 0.3), 0.5, rotate(-0.02, 0.3))),
            Self::EarTwitch => D::face(tx::BROW_UP, tx::EYE_OPEN, tx::MOUTH_NEUTRAL, 0.8)
                .with_motion(vec![rotate(0.03, 0.15), rotate(-0.03, 0.15)]),
            Self::EarCurious => D::face(tx::BROW_UP, tx::BOTH_EYE_UP, tx::MOUTH_NEUTRAL, 1.2),
            Self::PatTolerant => D::face(tx::BROW_NEUTRAL, tx::EYE_HALF, tx::MOUTH_NEUTRAL, 1.0)
                .with_motion(hop(-2.0, 0.2, 0.2)),
            Self::SurprisedNeutral => D::face(tx::BROW_UP, tx::EYE_OPEN, tx::MOUTH_NEUTRAL, 0.8),
            Self::OuchMild => D::face(tx::BROW_IN, tx::EYE_HALF, tx::MOUTH_NEUTRAL, 0.8),
            Self::DisgustLight => D::face(tx::BROW_IN, tx::EYE_HALF, tx::MOUTH_NEUTRAL, 1.0)
                .with_motion(hold(scale_to(0.34, 0.2), 0.3, scale_to(0.35, 0.2))),
            Self::Tolerate => D::face(tx::BROW_NEUTRAL, tx::EYE_HALF, tx::MOUTH_NEUTRAL, 1.5)
                .with_motion(hold(move_by(0.0, -3.0, 0.3), 0.5, move_by(0.0, 3.0, 0.3))),
            Self::HairOuch => D::face(tx::BROW_IN, tx::EYE_HALF, tx::MOUTH_OPEN, 0.8),
            Self::Confused => D::face(tx::BROW_UP, tx::BOTH_EYE_UP, tx::MOUTH_NEUTRAL, 1.2)
                .with_motion(hold(rotate(0.04, 0.3), 0.5, rotate(-0.04, 0.3))),

            Self::AnnoyedLight => D::face(tx::BROW_IN, tx::EYE_HALF, tx::MOUTH_NEUTRAL, 1.2),
            Self::PullAway => D::face(tx::BROW_IN, tx::BOTH_EYE_RIGHT, tx::MOUTH_NEUTRAL, 1.8)
                .with_motion(hold(move_by(20.0, 0.0, 0.2), 0.8, move_by(-20.0, 0.0, 0.4))),
            Self::OuchAngry => D::face(tx::BROW_IN, tx::BOTH_EYE_TEARY, tx::MOUTH_AH, 1.5)
                .with_motion(shake(0.05, 0.05)),
            Self::MouthCover => D::face(tx::BROW_UP, tx::BOTH_EYE_LEFT, tx::MOUTH_NEUTRAL, 1.5)
                .with_motion(hold(move_by(-10.0, 0.0, 0.15), 0.6, move_by(10.0, 0.0, 0.3))),
            Self::Recoil => D::face(tx::BROW_IN, tx::BOTH_EYE_LEFT, tx::MOUTH_NEUTRAL, 1.5)
                .with_motion(vec![
                    move_by(-15.0, 0.0, 0.15),
                    scale_to(0.33, 0.2),
                    wait(0.5),
                    MotionStep::Group(vec![move_by(15.0, 0.0, 0.3), scale_to(0.35, 0.3)]),
                ]),
            Self::AnnoyedEar => D::face(tx::BROW_IN, tx::LEFT_EYE_BLINK, tx::MOUTH_NEUTRAL, 1.0)
                .with_motion(vec![rotate(-0.03, 0.1), rotate(0.03, 0.1)]),
            Self::AnnoyedSwat => D::face(tx::BROW_IN, tx::LEFT_EYE_BLINK, tx::MOUTH_AH, 1.0)
                .with_motion(vec![rotate(-0.08, 0.1), rotate(0.08, 0.1)]),
            Self::Startled => D::face(tx::BROW_UP, tx::EYE_OPEN, tx::MOUTH_AH, 1.0)
                .with_motion(hop(15.0, 0.08, 0.15)),
            Self::DisgustRecoil => D::face(tx::BROW_IN, tx::EYE_HALF, tx::MOUTH_NEUTRAL, 1.5)
                .with_motion(hold(scale_to(0.32, 0.3), 0.5, scale_to(0.35, 0.4))),
            Self::HairHurt => D::face(tx::BROW_IN, tx::BOTH_EYE_TEAR_FLOWING, tx::MOUTH_AH, 2.0)
                .with_motion(shake(0.05, 0.08)),
            Self::AnnoyedSpam => D::face(tx::BROW_IN, tx::BOTH_EYE_RIGHT, tx::MOUTH_NEUTRAL, 2.0)
                .with_motion(hold(move_by(0.0, -5.0, 0.3), 1.0, move_by(0.0, 5.0, 0.3))),

            Self::Nuzzle => D::face(tx::BROW_NEUTRAL, tx::EYE_CLOSE, tx::MOUTH_NEUTRAL, 1.2)
                .with_motion(vec![rotate(0.05, 0.5), rotate(-0.05, 0.5)]),
            Self::Ouch(intensity) => {
                let eyes = if intensity == GestureIntensity::Intense {
                    tx::BOTH_EYE_TEAR_FLOWING
                } else {
                    tx::BOTH_EYE_TEARY
                };
                D::face(tx::BROW_IN, eyes, tx::MOUTH_AH, 1.0).with_motion(shake(0.05, 0.05))
            }
            Self::Surprised => D::face(tx::BROW_UP, tx::EYE_OPEN, tx::MOUTH_AH, 1.0)
                .with_motion(hop(10.0, 0.1, 0.2))
                .clearing_preset(),
            Self::Annoyed => D::face(tx::BROW_IN, tx::LEFT_EYE_BLINK, tx::MOUTH_NEUTRAL, 1.2),
            Self::Disgust(intensity) => {
                let shrink = if intensity == GestureIntensity::Intense { 0.4 } else { 0.2 };
                D::face(tx::BROW_IN, tx::EYE_HALF, tx::MOUTH_NEUTRAL, 1.5)
                    .with_motion(hold(scale_to(0.33, shrink), 0.5, scale_to(0.35, 0.3)))
            }
            Self::ShyLaugh => D::face(tx::BROW_UP, tx::BOTH_EYE_LEFT, tx::MOUTH_OPEN, 2.0)
                .with_motion(vec![
                    move_by(0.0, 5.0, 0.3),
                    rotate(0.05, 0.3),
                    wait(0.5),
                    MotionStep::Group(vec![move_by(0.0, -5.0, 0.3), rotate(-0.05, 0.3)]),
                ]),
            Self::HairPull {
                direction,
                intensity,
            } => {
                if intensity == GestureIntensity::Intense {
                    D::face(tx::BROW_UP, tx::BOTH_EYE_TEAR_FLOWING, tx::MOUTH_AH, 1.0)
                } else {
                    let (brows, eyes) = match direction {
                        PullDirection::Left => (tx::BROW_UP, tx::BOTH_EYE_LEFT),
                        PullDirection::Right => (tx::BROW_UP, tx::BOTH_EYE_RIGHT),
                        PullDirection::Up => (tx::BROW_UP, tx::BOTH_EYE_UP),
                        PullDirection::Down => (tx::BROW_IN, tx::BOTH_EYE_TOWARDS_NOSE),
                    };
                    D::face(brows, eyes, tx::MOUTH_OPEN, 1.0)
                }
            }
        }
    }
}

impl fmt::Display for ReactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.server_id() {
            Some(id) => f.write_str(&id),
            None => write!(f, "local:{self:?}"),
        }
    }
}
