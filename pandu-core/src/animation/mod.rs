//! Animation state for the avatar's face, body and hair.
//!
//! Everything here is deterministic given an RNG and a sequence of
//! [`ReactionPlayer::tick`] calls, so the renderer only has to copy
//! [`FaceState`], [`Pose`] and [`HairState`] onto its sprites each frame.

pub mod face;
pub mod motion;
pub mod player;
pub mod preset;
pub mod scheduler;
pub mod talk;
pub mod wind;

pub use face::{BODY_REST_SCALE, FaceState, HairState, Pose, textures};
pub use motion::{MotionStep, MotionTrack};
pub use player::{Heart, PlayerEffect, ReactionPlayer};
pub use preset::{Expression, Preset};
pub use scheduler::{Channel, Scheduler};
pub use talk::{NaturalTalk, TalkStep, TalkStyle};
pub use wind::{WindProgram, WindStep, WindVariant};
