//! Raw touch input, as the platform layer delivers it.

use pandu_core::touch::TouchSample;

/// Lifecycle stage of a touch batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Fingers went down.
    Began,
    /// Fingers moved.
    Moved,
    /// Fingers lifted.
    Ended,
    /// The system took the touches away (incoming call, gesture recogniser).
    Cancelled,
}

/// One batch of touch changes.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    /// Stage.
    pub phase: TouchPhase,
    /// Touches that changed in this batch.
    pub changed: Vec<TouchSample>,
    /// Every touch on screen after this batch.
    pub all: Vec<TouchSample>,
}

impl TouchEvent {
    /// A batch where every on-screen touch changed.
    #[must_use]
    pub fn new(phase: TouchPhase, touches: Vec<TouchSample>) -> Self {
        Self {
            phase,
            changed: touches.clone(),
            all: touches,
        }
    }

    /// A batch where only some of the on-screen touches changed.
    #[must_use]
    pub fn partial(phase: TouchPhase, changed: Vec<TouchSample>, all: Vec<TouchSample>) -> Self {
        Self { phase, changed, all }
    }
}
