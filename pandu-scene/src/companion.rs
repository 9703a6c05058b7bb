//! A chat session around the emotion engine.
//!
//! The session feeds user messages into the engine and builds the system
//! prompt a dialogue service should use for its reply, including the most
//! recent touch if one happened since the last message.

use std::sync::Arc;

use pandu_core::config::PanduConfig;
use pandu_core::emotion::{EmotionEngine, EmotionModel};
use pandu_core::{AffectStore, Clock, ConfiguredStore, PhysicalInteraction, open_store};
use pandu_net::prompt;
use parking_lot::Mutex;
use tracing::debug;

use crate::hooks::GestureObserver;

/// Remembers the latest touch until a message consumes it.
#[derive(Debug, Clone, Default)]
pub struct TouchLog {
    latest: Arc<Mutex<Option<PhysicalInteraction>>>,
}

impl TouchLog {
    /// Take the latest touch, leaving nothing behind.
    #[must_use]
    pub fn take(&self) -> Option<PhysicalInteraction> {
        self.latest.lock().take()
    }
}

impl GestureObserver for TouchLog {
    fn on_gesture(&mut self, interaction: &PhysicalInteraction) {
        *self.latest.lock() = Some(*interaction);
    }
}

/// One companion conversation.
#[derive(Debug)]
pub struct CompanionSession<S, C> {
    name: String,
    engine: EmotionEngine<S, C>,
    touches: TouchLog,
}

impl<S: AffectStore, C: Clock> CompanionSession<S, C> {
    /// Start a session around an engine.
    pub fn new(name: impl Into<String>, engine: EmotionEngine<S, C>) -> Self {
        Self {
            name: name.into(),
            engine,
            touches: TouchLog::default(),
        }
    }

    /// Observer to register with the scene so touches reach the prompt.
    #[must_use]
    pub fn touch_observer(&self) -> TouchLog {
        self.touches.clone()
    }

    /// The app came back to the foreground.
    pub fn resume(&mut self) {
        self.engine.wake_up();
    }

    /// Ingest a user message and return the system prompt for the reply.
    pub fn on_user_message(&mut self, text: &str) -> String {
        self.engine.process_message(text);
        let touch = self.touches.take();
        debug!(
            mood = %self.engine.current_mood(),
            touched = touch.is_some(),
            "building reply prompt"
        );
        prompt::companion_prompt(&self.name, &self.engine.mood_prompt(), touch.as_ref())
    }

    /// The engine.
    #[must_use]
    pub fn engine(&self) -> &EmotionEngine<S, C> {
        &self.engine
    }
}

impl<C: Clock> CompanionSession<ConfiguredStore, C> {
    /// Start a session on the store and emotion tuning named in `config`.
    ///
    /// # Errors
    /// Returns an error if the configured store cannot be opened.
    pub fn open(name: impl Into<String>, config: &PanduConfig, clock: C) -> pandu_core::Result<Self> {
        let store = open_store(&config.persistence)?;
        let engine = EmotionEngine::new(store, clock, config.emotion.clone());
        Ok(Self::new(name, engine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use pandu_core::config::EmotionConfig;
    use pandu_core::{BodyPart, GestureIntensity, GestureType, ManualClock, MemoryAffectStore};

    fn clock() -> Arc<ManualClock> {
        let start = FixedOffset::east_opt(0)
            .expect("offset")
            .with_ymd_and_hms(2026, 6, 1, 18, 0, 0)
            .single()
            .expect("unambiguous");
        Arc::new(ManualClock::new(start))
    }

    fn session() -> CompanionSession<MemoryAffectStore, Arc<ManualClock>> {
        let clock = clock();
        let engine = EmotionEngine::new(MemoryAffectStore::new(), clock, EmotionConfig::default());
        CompanionSession::new("Pandu", engine)
    }

    #[test]
    fn touch_is_mentioned_once() {
        let mut session = session();
        let mut observer = session.touch_observer();
        observer.on_gesture(&PhysicalInteraction::new(
            BodyPart::Cheeks,
            GestureType::Slide,
            GestureIntensity::Moderate,
        ));

        let first = session.on_user_message("hey you");
        assert!(first.contains("[PHYSICAL INTERACTION]"));
        assert!(first.contains("[CURRENT EMOTIONAL STATE]"));

        let second = session.on_user_message("still there?");
        assert!(!second.contains("[PHYSICAL INTERACTION]"));
    }

    #[test]
    fn hostile_message_reaches_the_prompt() {
        let mut session = session();
        for _ in 0..2 {
            session.on_user_message("I hate you");
        }
        let prompt = session.on_user_message("I hate you");
        assert!(prompt.contains("upset because: User said they hate her."));
    }

    #[test]
    fn configured_session_uses_configured_store_and_rules() {
        let config = PanduConfig::from_toml(
            r#"
[persistence]
backend = "memory"

[[emotion.conflict_rules]]
phrase = "go away"
trigger = "User told her to go away"
"#,
        )
        .expect("config parses");
        let mut session = CompanionSession::open("Pandu", &config, clock()).expect("store opens");
        assert!(matches!(session.engine().store(), ConfiguredStore::Memory(_)));

        session.on_user_message("just GO AWAY");
        assert_eq!(
            session.engine().state().conflict_trigger.as_deref(),
            Some("User told her to go away")
        );
    }

    #[test]
    fn unknown_backend_fails_to_open() {
        let config = PanduConfig::from_toml("[persistence]\nbackend = \"cloud\"\n").expect("config parses");
        assert!(CompanionSession::open("Pandu", &config, clock()).is_err());
    }
}
