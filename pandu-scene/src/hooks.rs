//! Collaborator hooks: where the scene hands work to the platform.
//!
//! Haptics, speech synthesis and anyone interested in recognised gestures
//! (a chat session, analytics) plug in here. [`HookRecorder`] implements
//! all three and keeps an ordered log, which is what tests use.

use std::sync::Arc;

use pandu_core::{Haptic, PhysicalInteraction};
use parking_lot::Mutex;

/// Fires device haptic pulses.
pub trait HapticSink: Send {
    /// Fire one pulse.
    fn fire(&mut self, haptic: Haptic);
}

/// Speaks dialogue lines.
pub trait SpeechSink: Send {
    /// Speak `text`, optionally in a tone such as `"shy"`.
    fn speak(&mut self, text: &str, emotion: Option<&str>);
}

/// Told about every recognised gesture before it is dispatched.
pub trait GestureObserver: Send {
    /// A gesture landed on the avatar.
    fn on_gesture(&mut self, interaction: &PhysicalInteraction);
}

/// Does nothing. Used when a platform has no haptics or speech.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl HapticSink for NoopHooks {
    fn fire(&mut self, _haptic: Haptic) {}
}

impl SpeechSink for NoopHooks {
    fn speak(&mut self, _text: &str, _emotion: Option<&str>) {}
}

/// The hooks an [`AvatarScene`](crate::AvatarScene) calls out to.
pub struct SceneHooks {
    /// Haptic engine.
    pub haptics: Box<dyn HapticSink>,
    /// Speech engine.
    pub speech: Box<dyn SpeechSink>,
    /// Gesture listeners, called in registration order.
    pub observers: Vec<Box<dyn GestureObserver>>,
}

impl SceneHooks {
    /// Hooks that drop everything.
    #[must_use]
    pub fn noop() -> Self {
        Self {
            haptics: Box::new(NoopHooks),
            speech: Box::new(NoopHooks),
            observers: Vec::new(),
        }
    }

    /// Route every hook into one recorder.
    #[must_use]
    pub fn recording(recorder: &HookRecorder) -> Self {
        Self {
            haptics: Box::new(recorder.clone()),
            speech: Box::new(recorder.clone()),
            observers: vec![Box::new(recorder.clone())],
        }
    }

    /// Add a gesture listener.
    #[must_use]
    pub fn with_observer(mut self, observer: impl GestureObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }
}

impl Default for SceneHooks {
    fn default() -> Self {
        Self::noop()
    }
}

impl std::fmt::Debug for SceneHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneHooks")
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

/// One call received by a [`HookRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum HookCall {
    /// A haptic pulse.
    Haptic(Haptic),
    /// A spoken line.
    Speak {
        /// Line text.
        text: String,
        /// Tone hint.
        emotion: Option<String>,
    },
    /// A recognised gesture.
    Gesture(PhysicalInteraction),
}

/// Shared, ordered log of hook calls.
#[derive(Debug, Clone, Default)]
pub struct HookRecorder {
    calls: Arc<Mutex<Vec<HookCall>>>,
}

impl HookRecorder {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<HookCall> {
        self.calls.lock().clone()
    }

    /// Haptic pulses only, in order.
    #[must_use]
    pub fn haptics(&self) -> Vec<Haptic> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                HookCall::Haptic(h) => Some(*h),
                _ => None,
            })
            .collect()
    }

    /// Forget everything recorded.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn push(&self, call: HookCall) {
        self.calls.lock().push(call);
    }
}

impl HapticSink for HookRecorder {
    fn fire(&mut self, haptic: Haptic) {
        self.push(HookCall::Haptic(haptic));
    }
}

impl SpeechSink for HookRecorder {
    fn speak(&mut self, text: &str, emotion: Option<&str>) {
        self.push(HookCall::Speak {
            text: text.to_string(),
            emotion: emotion.map(str::to_string),
        });
    }
}

impl GestureObserver for HookRecorder {
    fn on_gesture(&mut self, interaction: &PhysicalInteraction) {
        self.push(HookCall::Gesture(*interaction));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pandu_core::{BodyPart, GestureIntensity, GestureType};

    #[test]
    fn recorder_keeps_order_across_clones() {
        let recorder = HookRecorder::new();
        let mut hooks = SceneHooks::recording(&recorder);
        hooks.speech.speak("hi", Some("happy"));
        hooks.haptics.fire(Haptic::Success);
        for observer in &mut hooks.observers {
            observer.on_gesture(&PhysicalInteraction::new(
                BodyPart::Ears,
                GestureType::Tap,
                GestureIntensity::Moderate,
            ));
        }
        let calls = recorder.calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(calls[0], HookCall::Speak { .. }));
        assert_eq!(recorder.haptics(), vec![Haptic::Success]);
        recorder.clear();
        assert!(recorder.calls().is_empty());
    }
}
