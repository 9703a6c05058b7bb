//! # pandu-net: Reaction Resolver Transport
//!
//! Talks to the companion server on behalf of the avatar:
//!   - **Interaction**: `POST /state/interaction` with the recognised
//!     touch, answered with the reaction to play.
//!   - **Wind**: `GET /state/wind` for the hair overlay.
//!
//! Every call has a bounded timeout and a retry budget. Errors are for
//! logging only: the scene answers any failure with a local reaction.

#![deny(clippy::unwrap_used)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod prompt;
pub mod resolver;
pub mod types;

pub use client::ReactionClient;
pub use error::NetError;
pub use resolver::{OfflineResolver, ReactionResolver};
pub use types::{InteractionRecord, TouchReactionResponse, WindResponse};
