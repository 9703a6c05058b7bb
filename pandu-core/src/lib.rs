//! # Pandu Core Library
//!
//! The on-device half of the Pandu companion avatar:
//!
//! - **Emotion**: a persisted valence/arousal/patience state that decays
//!   with time, reacts to chat messages and yields a mood and tone
//!   instruction for the dialogue model.
//! - **Touch**: per-finger tracking, body-part hit testing against
//!   sprite masks, and gesture classification (tap, long press, pinch,
//!   slide, pull).
//! - **Reactions**: the named reaction catalogue plus a deterministic
//!   local fallback table for when the remote resolver is unreachable.
//! - **Animation**: a channelled state machine playing presets, talk
//!   loops, one-shot reactions and hair wind loops.
//!
//! Nothing here does I/O beyond the SQLite affect store. Networking lives
//! in `pandu-net` and scene orchestration in `pandu-scene`.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod affect;
pub mod animation;
pub mod clock;
pub mod config;
pub mod emotion;
pub mod error;
pub mod interaction;
pub mod persistence;
pub mod reaction;
pub mod touch;
pub mod types;

pub use affect::{AffectiveState, EmotionalZone};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::PanduConfig;
pub use emotion::{EmotionEngine, EmotionModel};
pub use error::{PanduError, Result};
pub use interaction::PhysicalInteraction;
pub use persistence::{AffectStore, ConfiguredStore, MemoryAffectStore, SqliteAffectStore, open_store};
pub use types::*;
