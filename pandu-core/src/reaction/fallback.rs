//! Local reaction table used when the remote resolver is unreachable.
//!
//! The lookup is a pure function of its inputs. Any randomness lives in the
//! animation that plays afterwards, never in the choice of reaction.

use crate::types::{BodyPart, GestureIntensity, GestureType, Haptic};

use super::catalog::ReactionId;

/// What the fallback path does with the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackAction {
    /// Play a canned reaction.
    Play(ReactionId),
    /// Interrupt the talk loop instead of reacting.
    StopTalk,
}

/// Fallback decision plus the haptic pulse that accompanies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackReaction {
    /// Animation to run.
    pub action: FallbackAction,
    /// Pulse fired after the animation starts.
    pub haptic: Haptic,
}

impl FallbackReaction {
    fn play(reaction: ReactionId, haptic: Haptic) -> Self {
        Self {
            action: FallbackAction::Play(reaction),
            haptic,
        }
    }
}

/// Map a recognised gesture to a canned reaction.
#[must_use]
pub fn fallback_reaction(
    part: BodyPart,
    gesture: GestureType,
    intensity: GestureIntensity,
    is_talking: bool,
) -> FallbackReaction {
    use BodyPart as P;
    use GestureType as G;
    use ReactionId as R;

    match (part, gesture) {
        (P::Hair, G::Pull(direction)) => FallbackReaction::play(
            R::HairPull {
                direction,
                intensity,
            },
            Haptic::Medium,
        ),
        (P::Cheeks, G::Slide) => FallbackReaction::play(R::Nuzzle, Haptic::Light),
        (P::Cheeks, G::Pinch) => FallbackReaction::play(R::Ouch(intensity), Haptic::Heavy),
        (P::Shoulders, G::Tap) => FallbackReaction::play(R::Surprised, Haptic::Medium),
        (P::Mouth, G::Tap) if is_talking => FallbackReaction {
            action: FallbackAction::StopTalk,
            haptic: Haptic::Light,
        },
        (P::Mouth, G::Tap) => FallbackReaction::play(R::FingerKiss, Haptic::Light),
        (P::Ears, G::Slide) => FallbackReaction::play(R::Annoyed, Haptic::Warning),
        (P::Ears, G::Tap) => FallbackReaction::play(R::Ticklish, Haptic::Medium),
        (P::Nose, G::Tap) => FallbackReaction::play(R::Laugh, Haptic::Success),
        (P::Nose, G::LongPress) => FallbackReaction::play(R::Disgust(intensity), Haptic::Heavy),
        (P::Neck, G::Slide) => FallbackReaction::play(R::ShyLaugh, Haptic::Light),
        _ => FallbackReaction::play(R::Blink, Haptic::Medium),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PullDirection;

    #[test]
    fn nose_tap_always_laughs() {
        for _ in 0..10 {
            let r = fallback_reaction(BodyPart::Nose, GestureType::Tap, GestureIntensity::Moderate, false);
            assert_eq!(r.action, FallbackAction::Play(ReactionId::Laugh));
            assert_eq!(r.haptic, Haptic::Success);
        }
    }

    #[test]
    fn mouth_tap_depends_on_talking() {
        let quiet = fallback_reaction(BodyPart::Mouth, GestureType::Tap, GestureIntensity::Moderate, false);
        assert_eq!(quiet.action, FallbackAction::Play(ReactionId::FingerKiss));
        let talking = fallback_reaction(BodyPart::Mouth, GestureType::Tap, GestureIntensity::Moderate, true);
        assert_eq!(talking.action, FallbackAction::StopTalk);
    }

    #[test]
    fn hair_pull_keeps_direction_and_intensity() {
        let r = fallback_reaction(
            BodyPart::Hair,
            GestureType::Pull(PullDirection::Up),
            GestureIntensity::Moderate,
            false,
        );
        assert_eq!(
            r.action,
            FallbackAction::Play(ReactionId::HairPull {
                direction: PullDirection::Up,
                intensity: GestureIntensity::Moderate,
            })
        );
    }

    #[test]
    fn unmapped_pairs_blink() {
        let r = fallback_reaction(BodyPart::Shoulders, GestureType::Slide, GestureIntensity::Gentle, false);
        assert_eq!(r.action, FallbackAction::Play(ReactionId::Blink));
        assert_eq!(r.haptic, Haptic::Medium);
    }
}
