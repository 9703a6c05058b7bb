//! The reaction player: preset, talk and wind loops plus one-shot
//! reaction overlays, all driven from a single per-frame [`tick`].
//!
//! Channels are independent. Starting a preset cancels only the previous
//! preset, starting talk cancels only the previous talk, and a new one-shot
//! reaction cancels only the pending reset of the previous reaction.
//!
//! [`tick`]: ReactionPlayer::tick

use rand::Rng;
use tracing::{debug, warn};

use crate::config::AnimationConfig;
use crate::reaction::{ReactionId, ResetPolicy};
use crate::types::{Point, hair_asset_for_state};

use super::face::{BODY_REST_SCALE, FaceState, HairState, Pose, textures as tx};
use super::motion::{MotionStep, MotionTrack, move_by, scale_y_to};
use super::preset::{Expression, Preset};
use super::scheduler::{Channel, Scheduler};
use super::talk::{JAW_DROP, JAW_STRETCH, NaturalTalk, TalkStep, TalkStyle};
use super::wind::{WindProgram, WindStep, WindVariant};

/// Timed work queued on a channel.
#[derive(Debug, Clone, PartialEq)]
enum PlayerEvent {
    PresetFrame { preset: Preset, index: usize },
    TalkFrame { style: TalkStyle, index: usize },
    NaturalStep,
    ResetNeutral,
    RestoreEyes(String),
    ExpressionRestore,
    WindFrame { index: usize },
    DialogueExpire,
}

/// One heart particle drifting up from a touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heart {
    /// Spawn point.
    pub origin: Point,
    /// Total travel over the particle's life.
    pub drift: Point,
    /// Lifetime; the particle fades and shrinks to nothing.
    pub secs: f64,
}

/// Fire-and-forget visuals the renderer should spawn.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEffect {
    /// A burst of hearts.
    Hearts(Vec<Heart>),
}

#[derive(Debug, Clone)]
struct ActiveWind {
    program: WindProgram,
    variant: Option<WindVariant>,
}

/// Animation state machine for the avatar.
#[derive(Debug)]
pub struct ReactionPlayer<R> {
    rng: R,
    config: AnimationConfig,
    now: f64,
    scheduler: Scheduler<PlayerEvent>,
    face: FaceState,
    body_pose: Pose,
    hair: HairState,
    body_tracks: Vec<MotionTrack>,
    mouth_tracks: Vec<MotionTrack>,
    active_preset: Option<Preset>,
    active_talk: Option<TalkStyle>,
    natural: NaturalTalk,
    wind: Option<ActiveWind>,
    floating_text: Option<String>,
    last_reaction: Option<ReactionId>,
    effects: Vec<PlayerEffect>,
}

impl<R: Rng> ReactionPlayer<R> {
    /// A player at rest: every channel stopped, neutral textures.
    pub fn new(rng: R, config: AnimationConfig) -> Self {
        Self {
            rng,
            config,
            now: 0.0,
            scheduler: Scheduler::new(),
            face: FaceState::default(),
            body_pose: Pose::at_scale(BODY_REST_SCALE),
            hair: HairState::default(),
            body_tracks: Vec::new(),
            mouth_tracks: Vec::new(),
            active_preset: None,
            active_talk: None,
            natural: NaturalTalk::new(),
            wind: None,
            floating_text: None,
            last_reaction: None,
            effects: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Player time in seconds.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Facial textures and mouth pose.
    #[must_use]
    pub fn face(&self) -> &FaceState {
        &self.face
    }

    /// Body sprite transform.
    #[must_use]
    pub fn body_pose(&self) -> Pose {
        self.body_pose
    }

    /// Hair layers.
    #[must_use]
    pub fn hair(&self) -> &HairState {
        &self.hair
    }

    /// Running preset.
    #[must_use]
    pub fn active_preset(&self) -> Option<Preset> {
        self.active_preset
    }

    /// Running talk loop.
    #[must_use]
    pub fn active_talk(&self) -> Option<TalkStyle> {
        self.active_talk
    }

    /// Whether any talk loop is running.
    #[must_use]
    pub fn is_talking(&self) -> bool {
        self.active_talk.is_some()
    }

    /// Running wind variant; `None` for custom or no wind.
    #[must_use]
    pub fn active_wind(&self) -> Option<WindVariant> {
        self.wind.as_ref().and_then(|w| w.variant)
    }

    /// Whether any wind loop is running.
    #[must_use]
    pub fn has_wind(&self) -> bool {
        self.wind.is_some()
    }

    /// Floating dialogue label currently shown.
    #[must_use]
    pub fn floating_text(&self) -> Option<&str> {
        self.floating_text.as_deref()
    }

    /// Most recent one-shot reaction.
    #[must_use]
    pub fn last_reaction(&self) -> Option<ReactionId> {
        self.last_reaction
    }

    /// Pending timed entries on `channel`.
    #[must_use]
    pub fn pending(&self, channel: Channel) -> usize {
        self.scheduler.pending(channel)
    }

    /// Body motions still playing.
    #[must_use]
    pub fn active_body_motions(&self) -> usize {
        self.body_tracks.len()
    }

    /// Take the effects produced since the last call.
    pub fn drain_effects(&mut self) -> Vec<PlayerEffect> {
        std::mem::take(&mut self.effects)
    }

    // ------------------------------------------------------------------
    // Frame driver
    // ------------------------------------------------------------------

    /// Advance the clock by `dt` seconds, firing due events and moving
    /// sprites.
    pub fn tick(&mut self, dt: f64) {
        let dt = dt.max(0.0);
        self.now += dt;

        let body = &mut self.body_pose;
        self.body_tracks.retain_mut(|track| !track.advance(body, dt));
        let mouth = &mut self.face.mouth_pose;
        self.mouth_tracks.retain_mut(|track| !track.advance(mouth, dt));

        while let Some((fire_at, _channel, event)) = self.scheduler.pop_due(self.now) {
            self.handle(fire_at, event);
        }
    }

    fn handle(&mut self, fire_at: f64, event: PlayerEvent) {
        match event {
            PlayerEvent::PresetFrame { preset, index } => self.show_preset_frame(preset, index, fire_at),
            PlayerEvent::TalkFrame { style, index } => self.show_talk_frame(style, index, fire_at),
            PlayerEvent::NaturalStep => self.run_natural_step(fire_at),
            PlayerEvent::ResetNeutral => self.face.reset_neutral(),
            PlayerEvent::RestoreEyes(eyes) => self.face.set_eyes(&eyes),
            PlayerEvent::ExpressionRestore => {
                self.face.set_brows(tx::BROW_NEUTRAL);
                self.face.set_eyes(tx::EYE_OPEN);
            }
            PlayerEvent::WindFrame { index } => self.show_wind_frame(index, fire_at),
            PlayerEvent::DialogueExpire => self.floating_text = None,
        }
    }

    // ------------------------------------------------------------------
    // Preset channel
    // ------------------------------------------------------------------

    /// Start a looping idle expression, replacing any running one.
    pub fn start_preset(&mut self, preset: Preset) {
        self.stop_preset();
        self.active_preset = Some(preset);
        if let Some(brows) = preset.brows() {
            self.face.set_brows(brows);
        }
        debug!(preset = preset.as_str(), "preset started");
        self.show_preset_frame(preset, 0, self.now);
    }

    /// Stop the preset loop and return the face to neutral.
    pub fn stop_preset(&mut self) {
        self.scheduler.cancel(Channel::Preset);
        self.active_preset = None;
        self.face.reset_neutral();
    }

    fn show_preset_frame(&mut self, preset: Preset, index: usize, at: f64) {
        if self.active_preset != Some(preset) {
            return;
        }
        let frames = preset.frames();
        let Some(&(eyes, hold)) = frames.get(index) else {
            return;
        };
        self.face.set_eyes(eyes);
        self.scheduler.schedule(
            at + hold,
            Channel::Preset,
            PlayerEvent::PresetFrame {
                preset,
                index: (index + 1) % frames.len(),
            },
        );
    }

    // ------------------------------------------------------------------
    // Talk channel
    // ------------------------------------------------------------------

    /// Start a talk loop, replacing any running one.
    pub fn start_talk(&mut self, style: TalkStyle) {
        self.stop_talk();
        self.active_talk = Some(style);
        debug!(style = style.as_str(), "talk started");
        if style == TalkStyle::Natural {
            self.natural = NaturalTalk::new();
            self.run_natural_step(self.now);
        } else {
            self.show_talk_frame(style, 0, self.now);
        }
    }

    /// Stop the talk loop and close the mouth.
    pub fn stop_talk(&mut self) {
        self.scheduler.cancel(Channel::Talk);
        self.mouth_tracks.clear();
        if let Some(style) = self.active_talk.take() {
            debug!(style = style.as_str(), "talk stopped");
        }
        self.face.mouth_pose.y = 0.0;
        self.face.set_mouth(tx::MOUTH_NEUTRAL);
    }

    fn show_talk_frame(&mut self, style: TalkStyle, index: usize, at: f64) {
        if self.active_talk != Some(style) {
            return;
        }
        let Some((frames, hold)) = style.frames() else {
            return;
        };
        let Some(mouth) = frames.get(index) else {
            return;
        };
        self.face.set_mouth(mouth);
        self.scheduler.schedule(
            at + hold,
            Channel::Talk,
            PlayerEvent::TalkFrame {
                style,
                index: (index + 1) % frames.len(),
            },
        );
    }

    fn run_natural_step(&mut self, at: f64) {
        if self.active_talk != Some(TalkStyle::Natural) {
            return;
        }
        let lag = (self.now - at).max(0.0);
        let step = self.natural.next_step(&mut self.rng);
        match step {
            TalkStep::Pause { .. } => self.face.set_mouth(tx::MOUTH_NEUTRAL),
            TalkStep::Shape {
                mouth,
                jaw_secs,
                bob,
                ..
            } => {
                self.face.set_mouth(mouth);
                let base = if mouth == tx::MOUTH_AH { 0.8 } else { 1.0 };
                let half = jaw_secs / 2.0;
                let mut jaw = MotionTrack::new(vec![
                    MotionStep::Group(vec![move_by(0.0, -JAW_DROP, half), scale_y_to(base * JAW_STRETCH, half)]),
                    MotionStep::Group(vec![move_by(0.0, JAW_DROP, half), scale_y_to(base, half)]),
                ]);
                if !jaw.advance(&mut self.face.mouth_pose, lag) {
                    self.mouth_tracks.push(jaw);
                }
                if bob {
                    let mut track =
                        MotionTrack::new(vec![move_by(0.0, 1.0, jaw_secs), move_by(0.0, -1.0, jaw_secs)]);
                    if !track.advance(&mut self.body_pose, lag) {
                        self.body_tracks.push(track);
                    }
                }
            }
        }
        self.scheduler
            .schedule(at + step.duration(), Channel::Talk, PlayerEvent::NaturalStep);
    }

    // ------------------------------------------------------------------
    // One-shot reactions
    // ------------------------------------------------------------------

    /// Play a reaction. Hearts (if the reaction has them) burst at `origin`.
    pub fn play_reaction(&mut self, reaction: ReactionId, origin: Point) {
        let descriptor = reaction.descriptor();
        // A pending blink still opens the eyes it closed.
        for pending in self.scheduler.take(Channel::Reaction) {
            if let PlayerEvent::RestoreEyes(eyes) = pending {
                self.face.set_eyes(&eyes);
            }
        }
        if descriptor.clears_preset {
            self.stop_preset();
        }
        let previous_eyes = self.face.eyes.clone();

        if let Some(brows) = descriptor.brows {
            self.face.set_brows(brows);
        }
        if let Some(eyes) = descriptor.eyes {
            self.face.set_eyes(eyes);
        }
        if let Some(mouth) = descriptor.mouth {
            self.face.set_mouth(mouth);
        }
        if !descriptor.motion.is_empty() {
            self.body_tracks
                .push(MotionTrack::repeated(&descriptor.motion, descriptor.motion_repeat));
        }
        if descriptor.hearts {
            self.spawn_hearts(origin);
        }

        let reset_at = self.now + descriptor.reset.delay();
        let reset = match descriptor.reset {
            ResetPolicy::Neutral(_) => PlayerEvent::ResetNeutral,
            ResetPolicy::RestoreEyes(_) => PlayerEvent::RestoreEyes(previous_eyes),
        };
        self.scheduler.schedule(reset_at, Channel::Reaction, reset);
        self.last_reaction = Some(reaction);
        debug!(reaction = %reaction, reset_after = descriptor.reset.delay(), "reaction played");
    }

    /// Play a reaction named by the resolver. Unknown ids blink. Returns
    /// the reaction that actually played.
    pub fn play_server_reaction(&mut self, id: &str, spawn_hearts: bool, origin: Point) -> ReactionId {
        let reaction = ReactionId::from_server_id(id).unwrap_or_else(|| {
            warn!(reaction_id = id, "unknown reaction id, blinking instead");
            ReactionId::Blink
        });
        self.play_reaction(reaction, origin);
        if spawn_hearts && !reaction.descriptor().hearts {
            self.spawn_hearts(origin);
        }
        reaction
    }

    /// Queue a heart burst at `origin`.
    pub fn spawn_hearts(&mut self, origin: Point) {
        let hearts = (0..self.config.heart_count)
            .map(|_| Heart {
                origin,
                drift: Point::new(self.rng.gen_range(-20.0..=20.0), self.rng.gen_range(50.0..=100.0)),
                secs: self.config.heart_secs,
            })
            .collect();
        self.effects.push(PlayerEffect::Hearts(hearts));
    }

    // ------------------------------------------------------------------
    // Instant expressions and direct setters
    // ------------------------------------------------------------------

    /// Show an instant expression. Stops the preset first.
    pub fn set_expression(&mut self, expression: Expression) {
        self.stop_preset();
        let (brows, eyes, mouth) = expression.textures();
        self.face.set_brows(brows);
        self.face.set_eyes(eyes);
        if let Some(mouth) = mouth {
            self.face.set_mouth(mouth);
        }
        self.scheduler.cancel(Channel::Expression);
        if let Some(delay) = expression.restore_after() {
            self.scheduler
                .schedule(self.now + delay, Channel::Expression, PlayerEvent::ExpressionRestore);
        }
    }

    /// Set the mouth texture directly.
    pub fn update_mouth(&mut self, name: &str) {
        self.face.set_mouth(name);
    }

    /// Apply a hair state reported by the resolver.
    pub fn set_hair_state(&mut self, state: &str) {
        self.hair.set_base(hair_asset_for_state(state));
    }

    /// Swap the base hair or headwear asset.
    pub fn set_base_hair(&mut self, name: &str) {
        self.hair.set_base(name);
    }

    // ------------------------------------------------------------------
    // Floating dialogue
    // ------------------------------------------------------------------

    /// Show a transient label, replacing any previous one.
    pub fn show_floating_text(&mut self, text: &str) {
        self.scheduler.cancel(Channel::Dialogue);
        self.floating_text = Some(text.to_string());
        self.scheduler.schedule(
            self.now + self.config.dialogue_label_secs,
            Channel::Dialogue,
            PlayerEvent::DialogueExpire,
        );
    }

    // ------------------------------------------------------------------
    // Wind channel
    // ------------------------------------------------------------------

    /// Start a canned wind loop, replacing any running wind.
    pub fn start_wind(&mut self, variant: WindVariant) {
        self.stop_wind();
        match variant.forced_base() {
            Some(base) => self.hair.set_base(base),
            None => self.hair.base_visible = false,
        }
        debug!(?variant, "wind started");
        self.start_wind_program(WindProgram::canned(variant), Some(variant));
    }

    /// Start a custom wind sequence. Returns `false` if no step was
    /// playable, in which case the wind stays stopped.
    pub fn start_custom_wind(&mut self, steps: Vec<WindStep>, looped: bool) -> bool {
        self.stop_wind();
        let Some(program) = WindProgram::custom(steps, looped) else {
            return false;
        };
        self.start_wind_program(program, None);
        true
    }

    /// Pick and start (or stop) wind for the given conditions. Leaves an
    /// already running matching variant untouched.
    pub fn apply_wind(&mut self, accessory: Option<&str>, speed: f32, is_outdoor: bool) -> Option<WindVariant> {
        match WindVariant::select(accessory, speed, is_outdoor) {
            Some(variant) if self.active_wind() == Some(variant) => Some(variant),
            Some(variant) => {
                self.start_wind(variant);
                Some(variant)
            }
            None => {
                if self.wind.is_some() {
                    self.stop_wind();
                }
                None
            }
        }
    }

    /// Stop wind and show the base layer again.
    pub fn stop_wind(&mut self) {
        self.scheduler.cancel(Channel::Wind);
        if let Some(wind) = self.wind.take() {
            debug!(variant = ?wind.variant, "wind stopped");
        }
        self.hair.overlay = None;
        self.hair.base_visible = self.hair.base != "none";
    }

    fn start_wind_program(&mut self, program: WindProgram, variant: Option<WindVariant>) {
        self.wind = Some(ActiveWind { program, variant });
        self.show_wind_frame(0, self.now);
    }

    fn show_wind_frame(&mut self, index: usize, at: f64) {
        let Some(wind) = &self.wind else {
            return;
        };
        let Some(step) = wind.program.steps.get(index) else {
            return;
        };
        self.hair.overlay = Some(step.asset.clone());
        let next = index + 1;
        let len = wind.program.steps.len();
        if next < len || wind.program.looped {
            let fire_at = at + step.secs;
            self.scheduler.schedule(
                fire_at,
                Channel::Wind,
                PlayerEvent::WindFrame { index: next % len },
            );
        }
    }
}
