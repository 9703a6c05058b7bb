//! Visible state of the avatar: facial textures, sprite poses and hair.

use serde::{Deserialize, Serialize};

/// Asset names for the facial feature sprites.
pub mod textures {
    /// Eyes open, looking ahead.
    pub const EYE_OPEN: &str = "eye_open";
    /// Eyes closed.
    pub const EYE_CLOSE: &str = "eye_close";
    /// Eyes half closed.
    pub const EYE_HALF: &str = "eye_half";
    /// Left eye winking.
    pub const LEFT_EYE_BLINK: &str = "left_eye_blink";
    /// Right eye winking.
    pub const RIGHT_EYE_BLINK: &str = "right_eye_blink";
    /// Both eyes looking left.
    pub const BOTH_EYE_LEFT: &str = "both_eye_left";
    /// Both eyes looking right.
    pub const BOTH_EYE_RIGHT: &str = "both_eye_right";
    /// Both eyes looking up.
    pub const BOTH_EYE_UP: &str = "both_eye_up";
    /// Cross-eyed.
    pub const BOTH_EYE_TOWARDS_NOSE: &str = "both_eye_towards_nose";
    /// Watery eyes.
    pub const BOTH_EYE_TEARY: &str = "both_eye_teary";
    /// One tear rolling.
    pub const SINGLE_EYE_TEAR_FLOWING: &str = "single_eye_tear_flowing";
    /// Crying.
    pub const BOTH_EYE_TEAR_FLOWING: &str = "both_eye_tear_flowing";

    /// Relaxed brows.
    pub const BROW_NEUTRAL: &str = "brow_neutral";
    /// Raised brows.
    pub const BROW_UP: &str = "brow_up";
    /// Furrowed brows.
    pub const BROW_IN: &str = "brow_in";

    /// Closed mouth.
    pub const MOUTH_NEUTRAL: &str = "mouth_neutral";
    /// Open mouth.
    pub const MOUTH_OPEN: &str = "mouth_open";
    /// Wide "ah" mouth.
    pub const MOUTH_AH: &str = "mouth_ah";
}

/// Resting uniform scale of the body sprite.
pub const BODY_REST_SCALE: f32 = 0.35;

/// Transform of one sprite relative to its rest position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Horizontal offset.
    pub x: f32,
    /// Vertical offset (y-up).
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Horizontal scale.
    pub scale_x: f32,
    /// Vertical scale.
    pub scale_y: f32,
}

impl Pose {
    /// Untransformed pose at the given uniform scale.
    #[must_use]
    pub const fn at_scale(scale: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: scale,
            scale_y: scale,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at_scale(1.0)
    }
}

/// Facial textures plus the mouth sprite's pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceState {
    /// Eye texture.
    pub eyes: String,
    /// Brow texture.
    pub brows: String,
    /// Mouth texture.
    pub mouth: String,
    /// Mouth sprite transform.
    pub mouth_pose: Pose,
}

impl Default for FaceState {
    fn default() -> Self {
        let mut face = Self {
            eyes: textures::EYE_OPEN.to_string(),
            brows: textures::BROW_NEUTRAL.to_string(),
            mouth: String::new(),
            mouth_pose: Pose::default(),
        };
        face.set_mouth(textures::MOUTH_NEUTRAL);
        face
    }
}

impl FaceState {
    /// Swap the mouth texture. The wide "ah" shape sits further right and
    /// smaller; every other shape returns to the standard placement.
    pub fn set_mouth(&mut self, name: &str) {
        name.clone_into(&mut self.mouth);
        let (x, scale) = if name == textures::MOUTH_AH {
            (10.0, 0.8)
        } else {
            (-10.0, 1.0)
        };
        self.mouth_pose.x = x;
        self.mouth_pose.scale_x = scale;
        self.mouth_pose.scale_y = scale;
    }

    /// Set the eye texture.
    pub fn set_eyes(&mut self, name: &str) {
        name.clone_into(&mut self.eyes);
    }

    /// Set the brow texture.
    pub fn set_brows(&mut self, name: &str) {
        name.clone_into(&mut self.brows);
    }

    /// Eyes open, brows relaxed, mouth closed.
    pub fn reset_neutral(&mut self) {
        self.set_eyes(textures::EYE_OPEN);
        self.set_brows(textures::BROW_NEUTRAL);
        self.set_mouth(textures::MOUTH_NEUTRAL);
    }

    /// Whether all three features show their neutral textures.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.eyes == textures::EYE_OPEN
            && self.brows == textures::BROW_NEUTRAL
            && self.mouth == textures::MOUTH_NEUTRAL
    }
}

/// Hair layers: the base sprite (hair or headwear) and the animated
/// overlay driven by wind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HairState {
    /// Base hair / headwear asset.
    pub base: String,
    /// Whether the base layer is drawn.
    pub base_visible: bool,
    /// Current wind overlay frame, if the overlay is shown.
    pub overlay: Option<String>,
}

impl Default for HairState {
    fn default() -> Self {
        Self {
            base: crate::types::HAIR_NEAT_ASSET.to_string(),
            base_visible: true,
            overlay: None,
        }
    }
}

impl HairState {
    /// Swap the base asset. `"none"` hides the base layer.
    pub fn set_base(&mut self, name: &str) {
        name.clone_into(&mut self.base);
        self.base_visible = name != "none";
    }

    /// Whether the base asset is headwear rather than hair.
    #[must_use]
    pub fn is_hat(&self) -> bool {
        self.base.starts_with("hat_") || self.base.starts_with("winter_hat")
    }
}
