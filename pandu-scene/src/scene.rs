//! The avatar scene: touch in, reactions out.
//!
//! ```text
//! TouchEvent ─▶ TouchTracker ─▶ (BodyPartHitTester) ─▶ RecognizedGesture
//!                                                          │
//!                         GestureObserver hooks ◀──────────┤
//!                                                          ▼
//!                                          InteractionDispatcher (async)
//!                                                          │ Resolution
//!                        update(dt) drains ◀───────────────┘
//!                              │
//!              resolver outcome ─┴─ local fallback
//!                              ▼
//!                        ReactionPlayer ─▶ HapticSink (last)
//! ```

use std::time::Duration;

use pandu_core::animation::ReactionPlayer;
use pandu_core::config::PanduConfig;
use pandu_core::reaction::{FallbackAction, fallback_reaction};
use pandu_core::touch::{BodyPartHitTester, RecognizedGesture, TouchTracker};
use pandu_core::{DialogueMode, HAIR_NEAT_ASSET, PhysicalInteraction, ReactionOutcome};
use pandu_net::{ReactionResolver, WindResponse};
use rand::Rng;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::dispatcher::{InteractionDispatcher, Resolution};
use crate::events::{TouchEvent, TouchPhase};
use crate::hooks::SceneHooks;

/// Everything the avatar needs on its main thread.
pub struct AvatarScene<R, G> {
    tracker: TouchTracker,
    hit_tester: BodyPartHitTester,
    dispatcher: InteractionDispatcher<R>,
    player: ReactionPlayer<G>,
    hooks: SceneHooks,
    accessory: Option<String>,
    enabled: bool,
}

impl<R: ReactionResolver, G: Rng> AvatarScene<R, G> {
    /// Assemble a scene. `runtime` runs the resolver calls; everything else
    /// happens on the caller's thread.
    pub fn new(
        config: &PanduConfig,
        hit_tester: BodyPartHitTester,
        resolver: R,
        runtime: Handle,
        rng: G,
        hooks: SceneHooks,
    ) -> Self {
        info!(parts = ?hit_tester.parts(), enabled = config.general.enabled, "avatar scene ready");
        Self {
            tracker: TouchTracker::new(config.touch.clone()),
            hit_tester,
            dispatcher: InteractionDispatcher::new(
                resolver,
                runtime,
                Duration::from_millis(config.resolver.timeout_ms),
            ),
            player: ReactionPlayer::new(rng, config.animation.clone()),
            hooks,
            accessory: None,
            enabled: config.general.enabled,
        }
    }

    /// The animation state, for rendering.
    #[must_use]
    pub fn player(&self) -> &ReactionPlayer<G> {
        &self.player
    }

    /// The animation state, for presets, talk and expressions driven by
    /// other parts of the app.
    pub fn player_mut(&mut self) -> &mut ReactionPlayer<G> {
        &mut self.player
    }

    /// Touch state.
    #[must_use]
    pub fn tracker(&self) -> &TouchTracker {
        &self.tracker
    }

    /// Hit regions, e.g. to swap the hair mask after a wardrobe change.
    pub fn hit_tester_mut(&mut self) -> &mut BodyPartHitTester {
        &mut self.hit_tester
    }

    /// Whether touches are being recognised.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn touch reactions on or off. Turning them off drops any touch in
    /// progress; dispatches already in flight still land.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            self.tracker.touches_cancelled();
        }
        self.enabled = enabled;
        info!(enabled, "touch reactions toggled");
    }

    /// Dispatches still waiting for an answer.
    #[must_use]
    pub fn pending_dispatches(&self) -> usize {
        self.dispatcher.in_flight()
    }

    /// Feed one touch batch. Returns the gesture it completed, if any; the
    /// gesture has already been dispatched. Ignored while disabled.
    pub fn handle_touch(&mut self, event: &TouchEvent) -> Option<RecognizedGesture> {
        if !self.enabled {
            return None;
        }
        let recognized = match event.phase {
            TouchPhase::Began => {
                self.tracker.touches_began(&event.changed, &event.all, &self.hit_tester);
                None
            }
            TouchPhase::Moved => self.tracker.touches_moved(&event.all),
            TouchPhase::Ended => self.tracker.touches_ended(&event.changed),
            TouchPhase::Cancelled => {
                self.tracker.touches_cancelled();
                None
            }
        }?;
        self.on_gesture(recognized);
        Some(recognized)
    }

    /// Dispatch an already recognised gesture. Returns the dispatch
    /// ticket, or `None` while disabled.
    pub fn on_gesture(&mut self, gesture: RecognizedGesture) -> Option<u64> {
        if !self.enabled {
            debug!(part = %gesture.part, "touch reactions disabled, gesture dropped");
            return None;
        }
        let interaction = PhysicalInteraction::new(gesture.part, gesture.gesture, gesture.intensity);
        for observer in &mut self.hooks.observers {
            observer.on_gesture(&interaction);
        }
        Some(self.dispatcher.dispatch(gesture, self.player.is_talking()))
    }

    /// Per-frame step: apply finished dispatches, then advance animation.
    pub fn update(&mut self, dt: f64) {
        for resolution in self.dispatcher.poll() {
            self.apply_resolution(resolution);
        }
        self.player.tick(dt);
    }

    /// Wait for one in-flight dispatch and apply it. Returns `false` if
    /// nothing was in flight.
    pub async fn settle_next(&mut self) -> bool {
        match self.dispatcher.next_resolution().await {
            Some(resolution) => {
                self.apply_resolution(resolution);
                true
            }
            None => false,
        }
    }

    /// Apply a finished dispatch: the resolver's outcome, or the local
    /// fallback on any failure.
    pub fn apply_resolution(&mut self, resolution: Resolution) {
        let Resolution {
            ticket,
            gesture,
            is_talking,
            result,
        } = resolution;
        match result {
            Ok(outcome) => self.apply_outcome(&outcome, &gesture),
            Err(e) => {
                warn!(ticket, error = %e, "resolver unavailable, using local reaction");
                self.apply_fallback(&gesture, is_talking);
            }
        }
    }

    /// Play a resolver outcome. Order: reaction, hair, dialogue, haptic.
    pub fn apply_outcome(&mut self, outcome: &ReactionOutcome, gesture: &RecognizedGesture) {
        let played = self
            .player
            .play_server_reaction(&outcome.reaction_id, outcome.spawn_hearts, gesture.location);
        self.player.set_hair_state(&outcome.hair_state);

        if let Some(line) = &outcome.dialogue {
            self.player.show_floating_text(line);
            if outcome.dialogue_mode == DialogueMode::Speak {
                self.hooks.speech.speak(line, outcome.dialogue_emotion.as_deref());
            }
        }

        let haptic = outcome.outcome.haptic();
        self.hooks.haptics.fire(haptic);
        debug!(reaction = %played, outcome = ?outcome.outcome, ?haptic, "outcome applied");
    }

    /// Play the deterministic local reaction for a gesture. Never touches
    /// hair or dialogue.
    pub fn apply_fallback(&mut self, gesture: &RecognizedGesture, is_talking: bool) {
        let fallback = fallback_reaction(gesture.part, gesture.gesture, gesture.intensity, is_talking);
        match fallback.action {
            FallbackAction::Play(reaction) => self.player.play_reaction(reaction, gesture.location),
            FallbackAction::StopTalk => self.player.stop_talk(),
        }
        self.hooks.haptics.fire(fallback.haptic);
        debug!(action = ?fallback.action, haptic = ?fallback.haptic, "fallback applied");
    }

    /// Record the headwear currently worn, for wind selection.
    pub fn set_accessory(&mut self, accessory: Option<&str>) {
        self.accessory = accessory.map(str::to_string);
        self.player.set_base_hair(accessory.unwrap_or(HAIR_NEAT_ASSET));
    }

    /// Pick the hair wind loop for the reported weather.
    pub fn apply_wind_state(&mut self, wind: &WindResponse) {
        let variant = self
            .player
            .apply_wind(self.accessory.as_deref(), wind.speed, wind.is_outdoor);
        debug!(speed = wind.speed, outdoor = wind.is_outdoor, ?variant, "wind updated");
    }
}

impl<R, G> std::fmt::Debug for AvatarScene<R, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarScene")
            .field("tracker", &self.tracker)
            .field("hit_tester", &self.hit_tester)
            .field("dispatcher", &self.dispatcher)
            .field("accessory", &self.accessory)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
