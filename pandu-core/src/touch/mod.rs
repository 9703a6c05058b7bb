//! Touch recognition: who was touched, and how.

pub mod hit_test;
pub mod tracker;

pub use hit_test::{AlphaBitmap, BodyPartHitTester, HitMask, RectMask, SpriteMask};
pub use tracker::{
    PartLocator, RecognizedGesture, TouchId, TouchSample, TouchTracker, classify_long_press,
    classify_pinch, classify_release,
};
