//! The emotion engine: time-based decay, message-driven updates and
//! mood-to-tone derivation over a persisted [`AffectiveState`].
//!
//! Storage failures never escape. A failed load starts from the default
//! state; a failed save is logged and the in-memory state carries on.

use chrono::Timelike;
use tracing::{debug, info, warn};

use crate::affect::{AffectiveState, EmotionalZone, OVERWHELMED_TONE, lerp};
use crate::clock::Clock;
use crate::config::EmotionConfig;
use crate::persistence::AffectStore;

/// Operations a companion session needs from an affective model.
pub trait EmotionModel {
    /// Apply time-based decay since the last interaction.
    fn wake_up(&mut self);
    /// Ingest one user-originated message.
    fn process_message(&mut self, text: &str);
    /// Uppercase zone name, e.g. `"PLAYFUL"`.
    fn current_mood(&self) -> String;
    /// Natural-language tone directive for a dialogue generator.
    fn tone_instruction(&self) -> String;
    /// Current arousal.
    fn energy(&self) -> f64;
}

/// Owns the [`AffectiveState`] and its storage handle.
#[derive(Debug)]
pub struct EmotionEngine<S, C> {
    state: AffectiveState,
    store: S,
    clock: C,
    config: EmotionConfig,
}

impl<S: AffectStore, C: Clock> EmotionEngine<S, C> {
    /// Load the saved state (or defaults) and immediately wake up.
    pub fn new(store: S, clock: C, config: EmotionConfig) -> Self {
        let now = clock.now();
        let state = match store.load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                info!("no saved mood, starting fresh");
                AffectiveState::initial(now)
            }
            Err(e) => {
                warn!(error = %e, "failed to load mood, starting fresh");
                AffectiveState::initial(now)
            }
        };
        let mut engine = Self {
            state,
            store,
            clock,
            config,
        };
        engine.wake_up();
        engine
    }

    /// Read-only view of the state.
    #[must_use]
    pub fn state(&self) -> &AffectiveState {
        &self.state
    }

    /// Current zone.
    #[must_use]
    pub fn zone(&self) -> EmotionalZone {
        self.state.zone()
    }

    /// The storage handle.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Block injected into dialogue requests.
    #[must_use]
    pub fn mood_prompt(&self) -> String {
        format!(
            "[CURRENT EMOTIONAL STATE]\n- Mood: {}\n- Energy: {:.2}\n- Tone Instruction: {}",
            self.current_mood(),
            self.state.arousal,
            self.tone_instruction()
        )
    }

    /// Multi-line dump for debug overlays.
    #[must_use]
    pub fn debug_info(&self) -> String {
        format!(
            "Valence: {:.2}\nArousal: {:.2}\nPatience: {:.2}\nZone: {}",
            self.state.valence,
            self.state.arousal,
            self.state.patience,
            self.zone().title()
        )
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.state) {
            warn!(error = %e, "failed to persist mood");
        }
    }

    fn hours_since_last_interaction(&self) -> f64 {
        let elapsed = self.clock.now() - self.state.last_interaction;
        #[allow(clippy::cast_precision_loss)]
        let secs = elapsed.num_milliseconds() as f64 / 1000.0;
        secs / 3600.0
    }
}

impl<S: AffectStore, C: Clock> EmotionModel for EmotionEngine<S, C> {
    fn wake_up(&mut self) {
        let cfg = &self.config;
        let hours = self.hours_since_last_interaction();

        self.state.arousal = lerp(
            self.state.arousal,
            cfg.arousal_baseline,
            cfg.arousal_decay_per_hour * hours,
        );
        let valence_rate = if self.state.valence < 0.0 {
            cfg.negative_valence_recovery_per_hour
        } else {
            cfg.positive_valence_decay_per_hour
        };
        self.state.valence = lerp(self.state.valence, 0.0, valence_rate * hours);

        if hours > cfg.patience_reset_after_hours {
            self.state.patience = 1.0;
            self.state.consecutive_fast_messages = 0;
        }

        let hour = self.clock.now().hour();
        if (cfg.circadian_start_hour..=cfg.circadian_end_hour).contains(&hour)
            && hours > cfg.circadian_min_idle_hours
        {
            self.state.arousal = cfg.circadian_arousal;
            self.state.valence -= cfg.circadian_valence_penalty;
            info!(hour, hours_idle = hours, "woken from deep sleep");
        }

        self.state.clamp();
        debug!(
            hours_idle = hours,
            valence = self.state.valence,
            arousal = self.state.arousal,
            patience = self.state.patience,
            "mood decayed"
        );
        self.persist();
    }

    fn process_message(&mut self, text: &str) {
        let now = self.clock.now();
        let elapsed = now - self.state.last_interaction;
        #[allow(clippy::cast_precision_loss)]
        let secs = elapsed.num_milliseconds() as f64 / 1000.0;
        let cfg = &self.config;

        if secs < cfg.fast_message_window_secs {
            self.state.consecutive_fast_messages += 1;
            self.state.patience -= cfg.fast_message_patience_penalty;
            debug!(
                streak = self.state.consecutive_fast_messages,
                patience = self.state.patience,
                "fast message, patience drops"
            );
        } else {
            self.state.consecutive_fast_messages = 0;
            self.state.patience = (self.state.patience + cfg.patience_recovery).min(1.0);
        }

        if self.state.patience > cfg.engagement_patience_floor {
            self.state.valence = (self.state.valence + cfg.engagement_boost).min(1.0);
            self.state.arousal = (self.state.arousal + cfg.engagement_boost).min(1.0);
        }

        let lowered = text.to_lowercase();
        for rule in &cfg.conflict_rules {
            if lowered.contains(&rule.phrase.to_lowercase()) {
                self.state.valence -= rule.valence_penalty;
                self.state.conflict_trigger = Some(rule.trigger.clone());
                info!(phrase = %rule.phrase, valence = self.state.valence, "conflict triggered");
            }
        }

        self.state.last_interaction = now;
        self.state.clamp();
        self.persist();
    }

    fn current_mood(&self) -> String {
        self.zone().mood_label()
    }

    fn tone_instruction(&self) -> String {
        if self.state.patience < self.config.overwhelmed_patience_threshold {
            return OVERWHELMED_TONE.to_string();
        }
        let mut tone = self.zone().tone().to_string();
        if let Some(trigger) = &self.state.conflict_trigger {
            if self.state.valence < self.config.conflict_report_threshold {
                tone.push_str(" You are specifically upset because: ");
                tone.push_str(trigger);
                tone.push('.');
            }
        }
        tone
    }

    fn energy(&self) -> f64 {
        self.state.arousal
    }
}
