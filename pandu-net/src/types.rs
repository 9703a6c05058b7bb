//! JSON contract with the reaction resolver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pandu_core::{
    BodyPart, DialogueMode, GestureIntensity, GestureType, Outcome, ReactionOutcome,
};

/// Outbound record of one recognised touch.
///
/// Pull direction is dropped here: the resolver only sees `"Pull"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Touched region, e.g. `"Nose"`.
    pub part: String,
    /// Gesture base name, e.g. `"Long Press"`.
    pub gesture: String,
    /// 1 (gentle) to 3 (intense).
    pub intensity: u8,
    /// Whether the avatar was talking when touched.
    pub is_talking: bool,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

impl InteractionRecord {
    /// Build a record stamped at `at`.
    #[must_use]
    pub fn new(
        part: BodyPart,
        gesture: GestureType,
        intensity: GestureIntensity,
        is_talking: bool,
        at: DateTime<Utc>,
    ) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let timestamp = at.timestamp_millis() as f64 / 1000.0;
        Self {
            part: part.as_str().to_string(),
            gesture: gesture.base_name().to_string(),
            intensity: intensity.level(),
            is_talking,
            timestamp,
        }
    }

    /// Build a record stamped with the current time.
    #[must_use]
    pub fn now(part: BodyPart, gesture: GestureType, intensity: GestureIntensity, is_talking: bool) -> Self {
        Self::new(part, gesture, intensity, is_talking, Utc::now())
    }
}

/// Resolver answer to an [`InteractionRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchReactionResponse {
    /// Server status string, usually `"success"`.
    pub status: String,
    /// `"positive"`, `"neutral"` or `"negative"`.
    pub outcome: String,
    /// Reaction to play, e.g. `"react_laugh"`.
    pub reaction_id: String,
    /// Bonding change caused by this touch.
    pub bonding_delta: f64,
    /// Bonding total after this touch.
    pub bonding_score: f64,
    /// Line to show.
    pub dialogue: Option<String>,
    /// `"silent"` or `"speak"`.
    pub dialogue_mode: String,
    /// Tone hint for speech synthesis.
    pub dialogue_emotion: Option<String>,
    /// Whether hearts burst from the touch point.
    pub spawn_hearts: bool,
    /// Hair asset state after the touch.
    pub hair_state: String,
    /// What the server remembered, if anything.
    pub memory_note: Option<String>,
}

impl TouchReactionResponse {
    /// The parts of the response the avatar acts on.
    #[must_use]
    pub fn to_outcome(&self) -> ReactionOutcome {
        ReactionOutcome {
            outcome: Outcome::from_wire(&self.outcome),
            reaction_id: self.reaction_id.clone(),
            dialogue: self.dialogue.clone().filter(|d| !d.trim().is_empty()),
            dialogue_mode: DialogueMode::from_wire(&self.dialogue_mode),
            dialogue_emotion: self.dialogue_emotion.clone(),
            spawn_hearts: self.spawn_hearts,
            hair_state: self.hair_state.clone(),
        }
    }
}

/// Weather at the companion's current location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindResponse {
    /// 0 (still) upwards.
    pub speed: f32,
    /// Unit-ish direction vector.
    pub direction: Vec<f32>,
    /// How much the speed varies.
    pub gustiness: f32,
    /// Indoors means no wind at all.
    pub is_outdoor: bool,
    /// Location id, when outdoors.
    #[serde(default)]
    pub location: Option<String>,
}
