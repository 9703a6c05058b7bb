//! Emotional meaning of a recognised physical interaction, for dialogue
//! collaborators that want to mention what the user just did.

use serde::{Deserialize, Serialize};

use crate::types::{BodyPart, GestureIntensity, GestureType};

/// A `(part, gesture, intensity)` triple as seen by the dialogue layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalInteraction {
    /// Touched region.
    pub part: BodyPart,
    /// Gesture shape. Pull direction is irrelevant here.
    pub gesture: GestureType,
    /// Gesture strength.
    pub intensity: GestureIntensity,
}

impl PhysicalInteraction {
    /// Create a new interaction.
    #[must_use]
    pub fn new(part: BodyPart, gesture: GestureType, intensity: GestureIntensity) -> Self {
        Self {
            part,
            gesture,
            intensity,
        }
    }

    /// Short tag describing what the touch means.
    #[must_use]
    pub fn emotional_meaning(&self) -> &'static str {
        use BodyPart as P;
        use GestureType as G;
        match (self.part, self.gesture) {
            (P::Cheeks, G::Slide) => "affectionate_nuzzle",
            (P::Cheeks, G::Pinch) => "playful_tease_ouch",
            (P::Shoulders, G::Tap) => "attention_seeking",
            (P::Mouth, G::Tap) => "intimate_finger_kiss",
            (P::Ears, G::Slide) => "mischievous_ear_stroke",
            (P::Ears, G::Tap) => "ticklish_play",
            (P::Nose, G::Tap) => "cute_boop",
            (P::Nose, G::LongPress) => "playful_annoyance",
            (P::Neck, G::Slide) => "sensual_shy_touch",
            (P::Hair, G::Pull(_)) => "playful_hair_tugging",
            (P::Hair, G::Tap) => "gentle_pat",
            _ => "physical_touch",
        }
    }

    /// One sentence narrating the touch from the avatar's side.
    #[must_use]
    pub fn context_description(&self) -> String {
        use BodyPart as P;
        use GestureType as G;
        let fixed = match (self.part, self.gesture) {
            (P::Cheeks, G::Slide) => "User gently caressed your cheek with a nuzzle-like slide.",
            (P::Cheeks, G::Pinch) => "User gave your cheek a playful pinch.",
            (P::Shoulders, G::Tap) => "User tapped your shoulder to get your attention.",
            (P::Mouth, G::Tap) => "User placed a finger on your lips or gave you a finger-kiss.",
            (P::Ears, G::Slide | G::Tap) => "User is playing with or tickling your ears.",
            (P::Nose, G::Tap) => "User booped your nose!",
            (P::Nose, G::LongPress) => "User is holding their finger on your nose playfully.",
            (P::Neck, G::Slide) => "User is softly stroking your neck, making you feel a bit shy.",
            (P::Hair, G::Pull(_)) => "User is playfully pulling or tugging on your hair.",
            (P::Hair, G::Tap) => "User gave your hair a gentle pat.",
            (part, gesture) => {
                return format!("User touched your {part} with a {}.", gesture.base_name());
            }
        };
        fixed.to_string()
    }

    /// `[PHYSICAL INTERACTION]` block for a language-model prompt.
    #[must_use]
    pub fn to_model_context(&self) -> String {
        format!(
            "[PHYSICAL INTERACTION]\nPart: {}\nGesture: {}\nMeaning: {}\nIntensity: {}\nDescription: {}",
            self.part,
            self.gesture.base_name(),
            self.emotional_meaning(),
            self.intensity.as_str(),
            self.context_description()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PullDirection;

    #[test]
    fn any_pull_direction_means_tugging() {
        for dir in [PullDirection::Left, PullDirection::Up] {
            let touch = PhysicalInteraction::new(
                BodyPart::Hair,
                GestureType::Pull(dir),
                GestureIntensity::Moderate,
            );
            assert_eq!(touch.emotional_meaning(), "playful_hair_tugging");
        }
    }

    #[test]
    fn unmapped_touch_is_generic() {
        let touch = PhysicalInteraction::new(
            BodyPart::Neck,
            GestureType::LongPress,
            GestureIntensity::Gentle,
        );
        assert_eq!(touch.emotional_meaning(), "physical_touch");
        assert_eq!(
            touch.context_description(),
            "User touched your Neck with a Long Press."
        );
    }

    #[test]
    fn model_context_block() {
        let touch =
            PhysicalInteraction::new(BodyPart::Nose, GestureType::Tap, GestureIntensity::Intense);
        let block = touch.to_model_context();
        assert!(block.starts_with("[PHYSICAL INTERACTION]\nPart: Nose\nGesture: Tap\n"));
        assert!(block.contains("Meaning: cute_boop"));
        assert!(block.contains("Intensity: Intense"));
        assert!(block.ends_with("Description: User booped your nose!"));
    }
}
