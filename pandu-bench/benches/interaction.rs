//! Pandu benchmark suite: the per-touch and per-frame hot paths.
//!
//! Budget at 60 fps is ~16ms per frame; everything here should sit well
//! under a microsecond or two except the mood update, which writes to the
//! store.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use pandu_core::animation::{ReactionPlayer, TalkStyle};
use pandu_core::config::{AnimationConfig, EmotionConfig, TouchConfig};
use pandu_core::emotion::{EmotionEngine, EmotionModel};
use pandu_core::reaction::{ReactionId, fallback_reaction};
use pandu_core::touch::{AlphaBitmap, BodyPartHitTester, RectMask, classify_release};
use pandu_core::{
    BodyPart, GestureIntensity, GestureType, MemoryAffectStore, Point, Rect, Size, SystemClock,
};

fn make_tester() -> BodyPartHitTester {
    // 64x64 hair sprite, opaque in the top half only.
    let alpha: Vec<u8> = (0..64 * 64).map(|i| if i < 32 * 64 { 255 } else { 0 }).collect();
    let hair = AlphaBitmap::from_alpha(64, 64, alpha).expect("64x64 plane");
    let rect = |x: f32, y: f32, w: f32, h: f32| Rect::centered(Point::new(x, y), Size::new(w, h));
    BodyPartHitTester::new()
        .with_region(BodyPart::Mouth, RectMask::scene(rect(0.0, -150.0, 100.0, 40.0)))
        .with_region(BodyPart::Nose, RectMask::scene(rect(0.0, 0.0, 40.0, 40.0)))
        .with_sprite(BodyPart::Hair, rect(0.0, 200.0, 256.0, 256.0), hair)
        .with_region(BodyPart::Cheeks, RectMask::scene(rect(0.0, -60.0, 300.0, 60.0)))
}

/// Hit test against every region, worst case a miss.
fn bench_hit_test(c: &mut Criterion) {
    let tester = make_tester();
    c.bench_function("hit_test_hair_sprite", |b| {
        b.iter(|| black_box(tester.resolve(black_box(Point::new(10.0, 250.0)))));
    });
    c.bench_function("hit_test_miss", |b| {
        b.iter(|| black_box(tester.resolve(black_box(Point::new(900.0, -900.0)))));
    });
}

/// Release classification plus local fallback lookup.
fn bench_classify_and_fallback(c: &mut Criterion) {
    let config = TouchConfig::default();
    c.bench_function("classify_release_pull", |b| {
        b.iter(|| {
            black_box(classify_release(
                black_box(BodyPart::Hair),
                Point::ZERO,
                black_box(Point::new(-40.0, 12.0)),
                0.2,
                &config,
            ))
        });
    });
    c.bench_function("fallback_lookup", |b| {
        b.iter(|| {
            black_box(fallback_reaction(
                black_box(BodyPart::Cheeks),
                GestureType::Pinch,
                GestureIntensity::Intense,
                false,
            ))
        });
    });
}

/// One frame of animation with talk, a body reaction and a preset running.
fn bench_player_frame(c: &mut Criterion) {
    let mut player = ReactionPlayer::new(StdRng::seed_from_u64(1), AnimationConfig::default());
    player.start_talk(TalkStyle::Natural);
    player.play_reaction(ReactionId::Recoil, Point::ZERO);

    c.bench_function("player_tick_natural_talk", |b| {
        b.iter(|| {
            player.tick(black_box(1.0 / 60.0));
            if !player.is_talking() {
                player.start_talk(TalkStyle::Natural);
            }
        });
    });
}

/// Mood update for one user message, in-memory store.
fn bench_process_message(c: &mut Criterion) {
    let mut engine = EmotionEngine::new(MemoryAffectStore::new(), SystemClock, EmotionConfig::default());
    c.bench_function("emotion_process_message", |b| {
        b.iter(|| {
            engine.process_message(black_box("you're so cute today, love you"));
            black_box(engine.state().valence);
        });
    });
}

criterion_group!(
    benches,
    bench_hit_test,
    bench_classify_and_fallback,
    bench_player_frame,
    bench_process_message,
);
criterion_main!(benches);
