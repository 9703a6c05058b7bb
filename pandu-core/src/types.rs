//! Core type definitions shared by the touch, reaction and animation modules.
//!
//! Scene coordinates are y-up (positive `y` travels towards the top of the
//! screen) and measured in scene units.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A 2D point in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate (y-up).
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Displacement vector from `origin` to `self`, as `(dx, dy)`.
    #[must_use]
    pub fn delta_from(self, origin: Self) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Width and height in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle described by its center, the way sprites are
/// positioned in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Center of the rectangle.
    pub center: Point,
    /// Full extent of the rectangle.
    pub size: Size,
}

impl Rect {
    /// Create a rectangle centered on `center`.
    #[must_use]
    pub const fn centered(center: Point, size: Size) -> Self {
        Self { center, size }
    }

    /// Whether `point` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (point.x - self.center.x).abs() <= self.size.width / 2.0
            && (point.y - self.center.y).abs() <= self.size.height / 2.0
    }

    /// Map a scene point into normalized `[0, 1]` coordinates with the
    /// origin at the bottom-left corner. Points outside the rect map outside
    /// the unit square.
    #[must_use]
    pub fn normalize(&self, point: Point) -> (f32, f32) {
        let u = (point.x - self.center.x) / self.size.width + 0.5;
        let v = (point.y - self.center.y) / self.size.height + 0.5;
        (u, v)
    }
}

// ---------------------------------------------------------------------------
// Body parts & gestures
// ---------------------------------------------------------------------------

/// Touch-sensitive body region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    /// Explicit rectangle over the lips.
    Mouth,
    /// Nose mask.
    Nose,
    /// Cheeks mask.
    Cheeks,
    /// Ears mask.
    Ears,
    /// Neck mask.
    Neck,
    /// Shoulders mask.
    Shoulders,
    /// The base hair sprite.
    Hair,
}

impl BodyPart {
    /// Hit-test priority order: first match wins.
    pub const PRIORITY: [Self; 7] = [
        Self::Mouth,
        Self::Nose,
        Self::Cheeks,
        Self::Ears,
        Self::Neck,
        Self::Shoulders,
        Self::Hair,
    ];

    /// Wire name of the part.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mouth => "Mouth",
            Self::Nose => "Nose",
            Self::Cheeks => "Cheeks",
            Self::Ears => "Ears",
            Self::Neck => "Neck",
            Self::Shoulders => "Shoulders",
            Self::Hair => "Hair",
        }
    }

    /// Position of this part in [`Self::PRIORITY`].
    #[must_use]
    pub fn priority(self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|p| *p == self)
            .unwrap_or(Self::PRIORITY.len())
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a hair pull, in y-up scene space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PullDirection {
    /// Negative x travel.
    Left,
    /// Positive x travel.
    Right,
    /// Positive y travel.
    Up,
    /// Negative y travel.
    Down,
}

impl PullDirection {
    /// Pick the dominant axis of a displacement and sign it by travel.
    /// Ties go to the vertical axis.
    #[must_use]
    pub fn from_displacement(dx: f32, dy: f32) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0.0 { Self::Right } else { Self::Left }
        } else if dy > 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// Human-readable direction name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Up => "Up",
            Self::Down => "Down",
        }
    }
}

/// Classified touch shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureType {
    /// Short, stationary touch.
    Tap,
    /// Stationary touch held past the long-press time.
    LongPress,
    /// Two fingers closing in.
    Pinch,
    /// Touch travelling past the slide threshold.
    Slide,
    /// Slide on the hair, with its dominant direction.
    Pull(PullDirection),
}

impl GestureType {
    /// Base category name sent to the reaction resolver. Directional pulls
    /// collapse to `"Pull"`.
    #[must_use]
    pub fn base_name(self) -> &'static str {
        match self {
            Self::Tap => "Tap",
            Self::LongPress => "Long Press",
            Self::Pinch => "Pinch",
            Self::Slide => "Slide",
            Self::Pull(_) => "Pull",
        }
    }
}

impl fmt::Display for GestureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pull(direction) => write!(f, "Pull {}", direction.as_str()),
            other => f.write_str(other.base_name()),
        }
    }
}

/// Three-tier gesture strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GestureIntensity {
    /// Light touch.
    Gentle = 1,
    /// Default strength.
    Moderate = 2,
    /// Long hold or hard pinch.
    Intense = 3,
}

impl GestureIntensity {
    /// Numeric tier as sent on the wire (1–3).
    #[must_use]
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Human-readable tier name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gentle => "Gentle",
            Self::Moderate => "Moderate",
            Self::Intense => "Intense",
        }
    }

    /// Bucket a value against two exclusive upper bounds:
    /// `< gentle_below` → Gentle, `< moderate_below` → Moderate, else Intense.
    #[must_use]
    pub fn from_bounds(value: f64, gentle_below: f64, moderate_below: f64) -> Self {
        if value < gentle_below {
            Self::Gentle
        } else if value < moderate_below {
            Self::Moderate
        } else {
            Self::Intense
        }
    }
}

// ---------------------------------------------------------------------------
// Reaction outcome
// ---------------------------------------------------------------------------

/// Polarity of a resolved reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The avatar liked the touch.
    Positive,
    /// Neither liked nor disliked.
    Neutral,
    /// The avatar disliked the touch.
    Negative,
}

impl Outcome {
    /// Parse a wire outcome; anything unrecognised is neutral.
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            _ => Self::Neutral,
        }
    }

    /// Haptic pulse keyed by polarity.
    #[must_use]
    pub fn haptic(self) -> Haptic {
        match self {
            Self::Positive => Haptic::Success,
            Self::Negative => Haptic::Warning,
            Self::Neutral => Haptic::Light,
        }
    }
}

/// How returned dialogue is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogueMode {
    /// Floating label only.
    #[default]
    Silent,
    /// Floating label plus speech synthesis.
    Speak,
}

impl DialogueMode {
    /// Parse a wire mode; only `"speak"` triggers speech.
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        if raw == "speak" { Self::Speak } else { Self::Silent }
    }
}

/// Haptic feedback strengths understood by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Haptic {
    /// Notification: success.
    Success,
    /// Notification: warning.
    Warning,
    /// Notification: error.
    Error,
    /// Light impact.
    Light,
    /// Medium impact.
    Medium,
    /// Heavy impact.
    Heavy,
}

/// Hair asset value the server uses for untouched hair.
pub const HAIR_NEAT_SENTINEL: &str = "hair_neat";
/// Canonical asset name for untouched hair.
pub const HAIR_NEAT_ASSET: &str = "hair";

/// Map a server hair state to the asset name to display.
#[must_use]
pub fn hair_asset_for_state(state: &str) -> &str {
    if state == HAIR_NEAT_SENTINEL {
        HAIR_NEAT_ASSET
    } else {
        state
    }
}

/// A reaction resolved by the remote resolver. Consumed immediately by the
/// reaction player; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionOutcome {
    /// Polarity, drives the haptic pulse.
    pub outcome: Outcome,
    /// Named reaction animation to play.
    pub reaction_id: String,
    /// Optional line to show (and maybe speak).
    pub dialogue: Option<String>,
    /// Whether the dialogue is spoken.
    pub dialogue_mode: DialogueMode,
    /// Tone hint for the speech engine.
    pub dialogue_emotion: Option<String>,
    /// Whether hearts burst from the touch point.
    pub spawn_hearts: bool,
    /// Hair asset state after the interaction.
    pub hair_state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_direction_uses_dominant_axis() {
        assert_eq!(PullDirection::from_displacement(30.0, 5.0), PullDirection::Right);
        assert_eq!(PullDirection::from_displacement(-30.0, 5.0), PullDirection::Left);
        assert_eq!(PullDirection::from_displacement(3.0, 25.0), PullDirection::Up);
        assert_eq!(PullDirection::from_displacement(3.0, -25.0), PullDirection::Down);
        // Ties resolve vertically.
        assert_eq!(PullDirection::from_displacement(20.0, -20.0), PullDirection::Down);
    }

    #[test]
    fn pull_collapses_to_base_name() {
        let pull = GestureType::Pull(PullDirection::Left);
        assert_eq!(pull.base_name(), "Pull");
        assert_eq!(pull.to_string(), "Pull Left");
        assert_eq!(GestureType::LongPress.to_string(), "Long Press");
    }

    #[test]
    fn intensity_bounds_are_exclusive() {
        assert_eq!(GestureIntensity::from_bounds(0.99, 1.0, 2.0), GestureIntensity::Gentle);
        assert_eq!(GestureIntensity::from_bounds(1.0, 1.0, 2.0), GestureIntensity::Moderate);
        assert_eq!(GestureIntensity::from_bounds(2.0, 1.0, 2.0), GestureIntensity::Intense);
        assert!(GestureIntensity::Gentle < GestureIntensity::Intense);
        assert_eq!(GestureIntensity::Intense.level(), 3);
    }

    #[test]
    fn rect_contains_and_normalizes() {
        let rect = Rect::centered(Point::new(40.0, 75.0), Size::new(100.0, 50.0));
        assert!(rect.contains(Point::new(40.0, 75.0)));
        assert!(rect.contains(Point::new(90.0, 100.0)));
        assert!(!rect.contains(Point::new(91.0, 75.0)));

        let (u, v) = rect.normalize(Point::new(-10.0, 50.0));
        assert!(u.abs() < 1e-6);
        assert!(v.abs() < 1e-6);
    }

    #[test]
    fn hair_sentinel_maps_to_canonical_asset() {
        assert_eq!(hair_asset_for_state("hair_neat"), "hair");
        assert_eq!(hair_asset_for_state("hair_messy"), "hair_messy");
    }

    #[test]
    fn outcome_haptics_are_distinct() {
        assert_eq!(Outcome::from_wire("positive").haptic(), Haptic::Success);
        assert_eq!(Outcome::from_wire("negative").haptic(), Haptic::Warning);
        assert_eq!(Outcome::from_wire("whatever").haptic(), Haptic::Light);
    }
}
