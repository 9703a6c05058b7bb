//! Raw touch tracking and gesture classification.
//!
//! One logical single-touch session at a time, plus a concurrent two-finger
//! pinch channel that takes precedence while active. Body parts are resolved
//! once per session, at touch-begin (or at the pinch midpoint).

use tracing::{debug, trace};

use crate::config::TouchConfig;
use crate::types::{BodyPart, GestureIntensity, GestureType, Point, PullDirection};

/// Platform identifier of one finger for the lifetime of its touch.
pub type TouchId = u64;

/// One finger's position at an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    /// Finger identifier.
    pub id: TouchId,
    /// Scene location.
    pub location: Point,
    /// Monotonic timestamp in seconds.
    pub timestamp: f64,
}

impl TouchSample {
    /// Create a new sample.
    #[must_use]
    pub fn new(id: TouchId, location: Point, timestamp: f64) -> Self {
        Self {
            id,
            location,
            timestamp,
        }
    }
}

/// Maps a scene point to a body part.
pub trait PartLocator {
    /// Part under `point`, if any.
    fn locate(&self, point: Point) -> Option<BodyPart>;
}

impl<F> PartLocator for F
where
    F: Fn(Point) -> Option<BodyPart>,
{
    fn locate(&self, point: Point) -> Option<BodyPart> {
        self(point)
    }
}

/// A fully classified touch, ready for dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecognizedGesture {
    /// Touched region.
    pub part: BodyPart,
    /// Gesture shape, with pull direction where relevant.
    pub gesture: GestureType,
    /// Gesture strength.
    pub intensity: GestureIntensity,
    /// Where the gesture started (pinch: finger midpoint).
    pub location: Point,
}

#[derive(Debug, Clone, Copy)]
struct TouchSession {
    id: TouchId,
    start_location: Point,
    start_time: f64,
    part: Option<BodyPart>,
}

#[derive(Debug, Clone, Copy)]
struct PinchSession {
    start_distance: f32,
    midpoint: Point,
    part: Option<BodyPart>,
}

/// Long-press intensity from hold duration in seconds.
#[must_use]
pub fn classify_long_press(duration: f64, config: &TouchConfig) -> GestureIntensity {
    let [gentle, moderate] = config.long_press_intensity_bounds;
    GestureIntensity::from_bounds(duration, gentle, moderate)
}

/// Pinch intensity from how far the fingers closed.
#[must_use]
pub fn classify_pinch(delta: f32, config: &TouchConfig) -> GestureIntensity {
    let [gentle, moderate] = config.pinch_intensity_bounds;
    GestureIntensity::from_bounds(f64::from(delta), gentle, moderate)
}

/// Classify a released single touch on `part`.
#[must_use]
pub fn classify_release(
    part: BodyPart,
    start: Point,
    end: Point,
    duration: f64,
    config: &TouchConfig,
) -> (GestureType, GestureIntensity) {
    let (dx, dy) = end.delta_from(start);
    let distance = start.distance(end);

    if distance > config.slide_threshold {
        let gesture = if part == BodyPart::Hair {
            GestureType::Pull(PullDirection::from_displacement(dx, dy))
        } else {
            GestureType::Slide
        };
        (gesture, GestureIntensity::Moderate)
    } else if duration > config.long_press_secs {
        if config.long_press_disabled_parts.contains(&part) {
            (GestureType::Tap, GestureIntensity::Moderate)
        } else {
            (GestureType::LongPress, classify_long_press(duration, config))
        }
    } else {
        (GestureType::Tap, GestureIntensity::Moderate)
    }
}

/// Per-gesture touch state machine.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    config: TouchConfig,
    session: Option<TouchSession>,
    pinch: Option<PinchSession>,
}

impl TouchTracker {
    /// Create a tracker with the given thresholds.
    #[must_use]
    pub fn new(config: TouchConfig) -> Self {
        Self {
            config,
            session: None,
            pinch: None,
        }
    }

    /// Thresholds in use.
    #[must_use]
    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Whether a single-touch session is in progress.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the pinch channel is armed.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// Part resolved for the current session or pinch.
    #[must_use]
    pub fn detected_part(&self) -> Option<BodyPart> {
        self.pinch
            .map(|p| p.part)
            .or_else(|| self.session.map(|s| s.part))
            .flatten()
    }

    /// Fingers went down. `began` are the new touches, `all` every touch
    /// currently on screen.
    pub fn touches_began(
        &mut self,
        began: &[TouchSample],
        all: &[TouchSample],
        locator: &impl PartLocator,
    ) {
        if let [a, b] = all {
            let midpoint = a.location.midpoint(b.location);
            let part = locator.locate(midpoint);
            self.pinch = Some(PinchSession {
                start_distance: a.location.distance(b.location),
                midpoint,
                part,
            });
            self.session = None;
            debug!(part = ?part, "pinch armed");
            return;
        }

        if self.session.is_some() {
            return;
        }
        let Some(first) = began.first() else {
            return;
        };
        let part = locator.locate(first.location);
        self.session = Some(TouchSession {
            id: first.id,
            start_location: first.location,
            start_time: first.timestamp,
            part,
        });
        trace!(id = first.id, part = ?part, "tracking touch");
    }

    /// Fingers moved. Emits at most one pinch per two-finger gesture.
    pub fn touches_moved(&mut self, all: &[TouchSample]) -> Option<RecognizedGesture> {
        let pinch = self.pinch?;
        let [a, b] = all else {
            return None;
        };
        let delta = pinch.start_distance - a.location.distance(b.location);
        if delta <= self.config.pinch_threshold {
            return None;
        }
        let part = pinch.part?;
        self.pinch = None;
        let recognized = RecognizedGesture {
            part,
            gesture: GestureType::Pinch,
            intensity: classify_pinch(delta, &self.config),
            location: pinch.midpoint,
        };
        debug!(part = %part, delta, intensity = ?recognized.intensity, "pinch recognized");
        Some(recognized)
    }

    /// Fingers lifted.
    pub fn touches_ended(&mut self, ended: &[TouchSample]) -> Option<RecognizedGesture> {
        if self.pinch.take().is_some() {
            return None;
        }
        let session = self.session?;
        let end = ended.iter().find(|t| t.id == session.id)?;
        self.session = None;

        let part = session.part?;
        let duration = end.timestamp - session.start_time;
        let (gesture, intensity) = classify_release(
            part,
            session.start_location,
            end.location,
            duration,
            &self.config,
        );
        debug!(part = %part, gesture = %gesture, intensity = ?intensity, duration, "gesture recognized");
        Some(RecognizedGesture {
            part,
            gesture,
            intensity,
            location: session.start_location,
        })
    }

    /// The system cancelled the touches. Nothing is emitted.
    pub fn touches_cancelled(&mut self) {
        self.session = None;
        self.pinch = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(part: BodyPart) -> impl Fn(Point) -> Option<BodyPart> {
        move |_| Some(part)
    }

    fn nowhere(_: Point) -> Option<BodyPart> {
        None
    }

    fn tap_through(
        tracker: &mut TouchTracker,
        locator: &impl PartLocator,
        from: Point,
        to: Point,
        secs: f64,
    ) -> Option<RecognizedGesture> {
        let down = TouchSample::new(1, from, 10.0);
        tracker.touches_began(&[down], &[down], locator);
        tracker.touches_ended(&[TouchSample::new(1, to, 10.0 + secs)])
    }

    #[test]
    fn slide_vs_pull() {
        let mut tracker = TouchTracker::default();
        let slide = tap_through(&mut tracker, &on(BodyPart::Neck), Point::ZERO, Point::new(30.0, 0.0), 0.1)
            .expect("gesture");
        assert_eq!(slide.gesture, GestureType::Slide);

        let pull = tap_through(&mut tracker, &on(BodyPart::Hair), Point::ZERO, Point::new(30.0, 0.0), 0.1)
            .expect("gesture");
        assert_eq!(pull.gesture, GestureType::Pull(PullDirection::Right));
        assert_eq!(pull.intensity, GestureIntensity::Moderate);
    }

    #[test]
    fn long_press_intensity_boundaries() {
        let config = TouchConfig::default();
        assert_eq!(classify_long_press(0.6, &config), GestureIntensity::Gentle);
        assert_eq!(classify_long_press(1.0, &config), GestureIntensity::Moderate);
        assert_eq!(classify_long_press(2.5, &config), GestureIntensity::Intense);
        assert_eq!(classify_pinch(19.9, &config), GestureIntensity::Gentle);
        assert_eq!(classify_pinch(20.0, &config), GestureIntensity::Moderate);
        assert_eq!(classify_pinch(40.0, &config), GestureIntensity::Intense);
    }

    #[test]
    fn cheeks_long_hold_is_a_tap() {
        let mut tracker = TouchTracker::default();
        let held = tap_through(&mut tracker, &on(BodyPart::Cheeks), Point::ZERO, Point::ZERO, 3.0)
            .expect("gesture");
        assert_eq!(held.gesture, GestureType::Tap);

        let nose = tap_through(&mut tracker, &on(BodyPart::Nose), Point::ZERO, Point::ZERO, 3.0)
            .expect("gesture");
        assert_eq!(nose.gesture, GestureType::LongPress);
        assert_eq!(nose.intensity, GestureIntensity::Intense);
    }

    #[test]
    fn short_still_touch_is_tap() {
        let mut tracker = TouchTracker::default();
        let tap = tap_through(&mut tracker, &on(BodyPart::Nose), Point::ZERO, Point::new(5.0, 5.0), 0.2)
            .expect("gesture");
        assert_eq!(tap.gesture, GestureType::Tap);
        assert_eq!(tap.location, Point::ZERO);
    }

    #[test]
    fn miss_drops_gesture_and_clears_session() {
        let mut tracker = TouchTracker::default();
        assert!(tap_through(&mut tracker, &nowhere, Point::ZERO, Point::ZERO, 0.1).is_none());
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn second_finger_is_ignored_while_tracking() {
        let mut tracker = TouchTracker::default();
        let locator = on(BodyPart::Ears);
        let first = TouchSample::new(1, Point::ZERO, 0.0);
        tracker.touches_began(&[first], &[first], &locator);
        // A new finger arrives after the first lifted from the event's view.
        let other = TouchSample::new(2, Point::new(50.0, 50.0), 0.05);
        tracker.touches_began(&[other], &[other], &locator);

        // Its release does not end the tracked session.
        assert!(tracker.touches_ended(&[TouchSample::new(2, Point::new(50.0, 50.0), 0.1)]).is_none());
        assert!(tracker.is_tracking());

        let g = tracker
            .touches_ended(&[TouchSample::new(1, Point::ZERO, 0.1)])
            .expect("gesture");
        assert_eq!(g.gesture, GestureType::Tap);
    }

    #[test]
    fn pinch_fires_once_then_release_is_silent() {
        let mut tracker = TouchTracker::default();
        let locator = on(BodyPart::Cheeks);
        let a = TouchSample::new(1, Point::new(-50.0, 0.0), 0.0);
        let b = TouchSample::new(2, Point::new(50.0, 0.0), 0.0);
        tracker.touches_began(&[a], &[a], &locator);
        tracker.touches_began(&[b], &[a, b], &locator);
        assert!(tracker.is_pinching());
        assert!(!tracker.is_tracking());

        // Closing by 5 units is not enough.
        let a1 = TouchSample::new(1, Point::new(-47.5, 0.0), 0.1);
        let b1 = TouchSample::new(2, Point::new(47.5, 0.0), 0.1);
        assert!(tracker.touches_moved(&[a1, b1]).is_none());

        // Closing by 30 units fires a moderate pinch.
        let a2 = TouchSample::new(1, Point::new(-35.0, 0.0), 0.2);
        let b2 = TouchSample::new(2, Point::new(35.0, 0.0), 0.2);
        let pinch = tracker.touches_moved(&[a2, b2]).expect("pinch");
        assert_eq!(pinch.gesture, GestureType::Pinch);
        assert_eq!(pinch.intensity, GestureIntensity::Moderate);
        assert_eq!(pinch.location, Point::ZERO);

        // Further closing does not fire again.
        let a3 = TouchSample::new(1, Point::new(-5.0, 0.0), 0.3);
        let b3 = TouchSample::new(2, Point::new(5.0, 0.0), 0.3);
        assert!(tracker.touches_moved(&[a3, b3]).is_none());
        assert!(tracker.touches_ended(&[a3, b3]).is_none());
    }

    #[test]
    fn releasing_an_armed_pinch_emits_nothing() {
        let mut tracker = TouchTracker::default();
        let locator = on(BodyPart::Nose);
        let a = TouchSample::new(1, Point::new(-20.0, 0.0), 0.0);
        let b = TouchSample::new(2, Point::new(20.0, 0.0), 0.0);
        tracker.touches_began(&[a, b], &[a, b], &locator);
        assert!(tracker.touches_ended(&[a]).is_none());
        assert!(!tracker.is_pinching());
    }

    #[test]
    fn cancel_discards_session() {
        let mut tracker = TouchTracker::default();
        let locator = on(BodyPart::Nose);
        let down = TouchSample::new(9, Point::ZERO, 0.0);
        tracker.touches_began(&[down], &[down], &locator);
        tracker.touches_cancelled();
        assert!(tracker.touches_ended(&[TouchSample::new(9, Point::ZERO, 0.1)]).is_none());
    }
}
