//! # pandu-scene: Avatar Scene Integration
//!
//! Wires the game-agnostic `pandu-core` pieces to a host app:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 host app (UI)                │
//! │  ┌────────────────────────────────────────┐  │
//! │  │              pandu-scene               │  │
//! │  │  ┌────────────┐   ┌────────────────┐   │  │
//! │  │  │ AvatarScene│──▶│  Dispatcher    │   │  │
//! │  │  └─────┬──────┘   └───────┬────────┘   │  │
//! │  │        ▼                  ▼            │  │
//! │  │  ┌────────────┐   ┌────────────────┐   │  │
//! │  │  │ pandu-core │   │   pandu-net    │   │  │
//! │  │  └────────────┘   └────────────────┘   │  │
//! │  └────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `events`: raw touch batches from the platform
//! - `dispatcher`: fire-and-forget resolver calls, drained per frame
//! - `scene`: touch → gesture → reaction pipeline
//! - `hooks`: haptics, speech and gesture observers
//! - `companion`: chat session around the emotion engine
//! - `telemetry`: tracing subscriber setup

#![deny(clippy::unwrap_used)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod companion;
pub mod dispatcher;
pub mod events;
pub mod hooks;
pub mod scene;
pub mod telemetry;

pub use companion::{CompanionSession, TouchLog};
pub use dispatcher::{InteractionDispatcher, Resolution};
pub use events::{TouchEvent, TouchPhase};
pub use hooks::{GestureObserver, HapticSink, HookCall, HookRecorder, SceneHooks, SpeechSink};
pub use scene::AvatarScene;
