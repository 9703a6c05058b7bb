//! Integration tests: end-to-end flows across the core modules.
//!
//! Mood survives a restart through the SQLite store, and a raw touch
//! stream turns into a fallback reaction that the player animates.

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use rand::SeedableRng;
use rand::rngs::StdRng;

use pandu_core::animation::{Channel, ReactionPlayer, textures};
use pandu_core::config::{AnimationConfig, EmotionConfig, PersistenceConfig, TouchConfig};
use pandu_core::reaction::{FallbackAction, ReactionId, fallback_reaction};
use pandu_core::touch::{BodyPartHitTester, RectMask, TouchSample, TouchTracker};
use pandu_core::{
    AffectStore, BodyPart, EmotionEngine, EmotionModel, GestureType, Haptic, ManualClock, Point,
    Rect, Size, SqliteAffectStore,
};

fn noon() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .expect("offset")
        .with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
        .single()
        .expect("unambiguous")
}

fn face_tester() -> BodyPartHitTester {
    BodyPartHitTester::new()
        .with_region(
            BodyPart::Cheeks,
            RectMask::scene(Rect::centered(Point::new(0.0, 0.0), Size::new(200.0, 100.0))),
        )
        .with_region(
            BodyPart::Hair,
            RectMask::scene(Rect::centered(Point::new(0.0, 200.0), Size::new(300.0, 100.0))),
        )
}

// ---------------------------------------------------------------------------
// Mood persistence across sessions
// ---------------------------------------------------------------------------

#[test]
fn grudge_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("affect.db");
    let clock = Arc::new(ManualClock::new(noon()));

    {
        let store = SqliteAffectStore::open(&path, &PersistenceConfig::default()).expect("open");
        let mut engine = EmotionEngine::new(store, Arc::clone(&clock), EmotionConfig::default());
        for _ in 0..3 {
            clock.advance(Duration::seconds(10));
            engine.process_message("I HATE YOU");
        }
        // 0.5 -> 0.05 -> -0.40 -> -0.85
        assert!((engine.state().valence + 0.85).abs() < 1e-9);
        assert!(engine.tone_instruction().ends_with("You are specifically upset because: User said they hate her."));
    }

    clock.advance(Duration::hours(1));
    let store = SqliteAffectStore::open(&path, &PersistenceConfig::default()).expect("reopen");
    let engine = EmotionEngine::new(store, Arc::clone(&clock), EmotionConfig::default());

    // One hour of negative recovery at 0.1 per hour.
    assert!((engine.state().valence + 0.765).abs() < 1e-3, "valence {}", engine.state().valence);
    assert_eq!(engine.state().conflict_trigger.as_deref(), Some("User said they hate her"));
    assert!(engine.tone_instruction().contains("upset because"));

    let reloaded = engine.store().load().expect("load").expect("saved");
    assert!((reloaded.valence - engine.state().valence).abs() < 1e-9);
}

#[test]
fn fresh_database_starts_neutral() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SqliteAffectStore::open(dir.path().join("new.db"), &PersistenceConfig::default()).expect("open");
    let engine = EmotionEngine::new(store, ManualClock::new(noon()), EmotionConfig::default());
    assert!((engine.state().valence - 0.5).abs() < f64::EPSILON);
    assert!((engine.energy() - 0.5).abs() < f64::EPSILON);
    assert!(engine.mood_prompt().starts_with("[CURRENT EMOTIONAL STATE]\n- Mood: "));
}

// ---------------------------------------------------------------------------
// Touch stream -> fallback -> animation
// ---------------------------------------------------------------------------

#[test]
fn cheek_stroke_nuzzles() {
    let tester = face_tester();
    let mut tracker = TouchTracker::new(TouchConfig::default());
    let down = TouchSample::new(1, Point::new(-40.0, 0.0), 0.0);
    tracker.touches_began(&[down], &[down], &tester);
    let up = TouchSample::new(1, Point::new(40.0, 5.0), 0.3);
    let gesture = tracker.touches_ended(&[up]).expect("recognised");
    assert_eq!(gesture.part, BodyPart::Cheeks);
    assert_eq!(gesture.gesture, GestureType::Slide);

    let reaction = fallback_reaction(gesture.part, gesture.gesture, gesture.intensity, false);
    assert_eq!(reaction.action, FallbackAction::Play(ReactionId::Nuzzle));
    assert_eq!(reaction.haptic, Haptic::Light);

    let mut player = ReactionPlayer::new(StdRng::seed_from_u64(1), AnimationConfig::default());
    let FallbackAction::Play(id) = reaction.action else {
        panic!("expected a reaction");
    };
    player.play_reaction(id, gesture.location);
    assert_eq!(player.face().eyes, textures::EYE_CLOSE);
    assert_eq!(player.pending(Channel::Reaction), 1);
    for _ in 0..90 {
        player.tick(1.0 / 60.0);
    }
    assert!(player.face().is_neutral());
}

#[test]
fn hair_pull_direction_reaches_the_face() {
    let tester = face_tester();
    let mut tracker = TouchTracker::new(TouchConfig::default());
    let down = TouchSample::new(9, Point::new(0.0, 200.0), 0.0);
    tracker.touches_began(&[down], &[down], &tester);
    let up = TouchSample::new(9, Point::new(-60.0, 210.0), 0.4);
    let gesture = tracker.touches_ended(&[up]).expect("recognised");
    assert_eq!(gesture.gesture.to_string(), "Pull Left");

    let reaction = fallback_reaction(gesture.part, gesture.gesture, gesture.intensity, false);
    let FallbackAction::Play(id) = reaction.action else {
        panic!("expected a reaction");
    };
    let mut player = ReactionPlayer::new(StdRng::seed_from_u64(2), AnimationConfig::default());
    player.play_reaction(id, gesture.location);
    assert_eq!(player.face().eyes, textures::BOTH_EYE_LEFT);
}

#[test]
fn touches_off_the_body_do_nothing() {
    let tester = face_tester();
    let mut tracker = TouchTracker::new(TouchConfig::default());
    let down = TouchSample::new(3, Point::new(900.0, -900.0), 0.0);
    tracker.touches_began(&[down], &[down], &tester);
    assert!(tracker.touches_ended(&[TouchSample::new(3, Point::new(900.0, -900.0), 0.1)]).is_none());
}
