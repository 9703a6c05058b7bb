//! Reaction catalogue and the deterministic local fallback table.

pub mod catalog;
pub mod fallback;

pub use catalog::{ReactionDescriptor, ReactionId, ResetPolicy, SERVER_ID_PREFIX};
pub use fallback::{FallbackAction, FallbackReaction, fallback_reaction};
