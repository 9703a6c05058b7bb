//! Configuration for the Pandu companion core.
//!
//! Maps directly to `pandu.toml`. Every field has a serde default so a
//! partial (or empty) file yields the stock tuning.

use serde::{Deserialize, Serialize};

use crate::types::{BodyPart, Point, Rect, Size};

/// Top-level Pandu configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanduConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Affective model tuning.
    #[serde(default)]
    pub emotion: EmotionConfig,
    /// Gesture recognition thresholds.
    #[serde(default)]
    pub touch: TouchConfig,
    /// Body-part hit-testing.
    #[serde(default)]
    pub hit_test: HitTestConfig,
    /// Remote reaction resolver.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Persistence / save settings.
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Reaction and dialogue presentation timings.
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl PanduConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `PanduError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::PanduError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Serialize back to TOML.
    ///
    /// # Errors
    /// Returns `PanduError::Serialization` if a value cannot be encoded.
    pub fn to_toml(&self) -> crate::error::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::PanduError::Serialization(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Whether touch reactions are enabled at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: "info".to_string(),
        }
    }
}

/// A phrase that hurts the avatar's feelings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRule {
    /// Case-insensitive substring to look for.
    pub phrase: String,
    /// Amount subtracted from valence on a match.
    #[serde(default = "default_conflict_penalty")]
    pub valence_penalty: f64,
    /// Human-readable cause stored as the conflict trigger.
    pub trigger: String,
}

/// Affective model tuning. Rates are fractions of the remaining distance
/// closed per elapsed hour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionConfig {
    /// Arousal relaxation rate towards the baseline.
    #[serde(default = "default_arousal_decay")]
    pub arousal_decay_per_hour: f64,
    /// Arousal resting point.
    #[serde(default = "default_arousal_baseline")]
    pub arousal_baseline: f64,
    /// Recovery rate for negative valence.
    #[serde(default = "default_negative_valence_recovery")]
    pub negative_valence_recovery_per_hour: f64,
    /// Fade rate for non-negative valence.
    #[serde(default = "default_positive_valence_decay")]
    pub positive_valence_decay_per_hour: f64,
    /// Idle gap (hours) after which patience refills completely.
    #[serde(default = "default_patience_reset_hours")]
    pub patience_reset_after_hours: f64,
    /// Messages closer together than this count as "fast".
    #[serde(default = "default_fast_message_window")]
    pub fast_message_window_secs: f64,
    /// Patience lost per fast message.
    #[serde(default = "default_fast_message_penalty")]
    pub fast_message_patience_penalty: f64,
    /// Patience regained per unhurried message.
    #[serde(default = "default_patience_recovery")]
    pub patience_recovery: f64,
    /// Patience above which messages nudge valence and arousal up.
    #[serde(default = "default_engagement_floor")]
    pub engagement_patience_floor: f64,
    /// Size of the engagement nudge.
    #[serde(default = "default_engagement_boost")]
    pub engagement_boost: f64,
    /// First local hour of the deep-sleep window (inclusive).
    #[serde(default = "default_circadian_start")]
    pub circadian_start_hour: u32,
    /// Last local hour of the deep-sleep window (inclusive).
    #[serde(default = "default_circadian_end")]
    pub circadian_end_hour: u32,
    /// Minimum idle hours before the sleep penalty applies.
    #[serde(default = "default_circadian_min_hours")]
    pub circadian_min_idle_hours: f64,
    /// Arousal forced on a deep-sleep wake.
    #[serde(default = "default_circadian_arousal")]
    pub circadian_arousal: f64,
    /// Valence lost on a deep-sleep wake.
    #[serde(default = "default_circadian_valence_penalty")]
    pub circadian_valence_penalty: f64,
    /// Patience below which the tone becomes curt regardless of zone.
    #[serde(default = "default_overwhelmed_threshold")]
    pub overwhelmed_patience_threshold: f64,
    /// Valence below which a stored conflict trigger is reported.
    #[serde(default = "default_conflict_report_threshold")]
    pub conflict_report_threshold: f64,
    /// Keyword rules that set a conflict trigger.
    #[serde(default = "default_conflict_rules")]
    pub conflict_rules: Vec<ConflictRule>,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            arousal_decay_per_hour: default_arousal_decay(),
            arousal_baseline: default_arousal_baseline(),
            negative_valence_recovery_per_hour: default_negative_valence_recovery(),
            positive_valence_decay_per_hour: default_positive_valence_decay(),
            patience_reset_after_hours: default_patience_reset_hours(),
            fast_message_window_secs: default_fast_message_window(),
            fast_message_patience_penalty: default_fast_message_penalty(),
            patience_recovery: default_patience_recovery(),
            engagement_patience_floor: default_engagement_floor(),
            engagement_boost: default_engagement_boost(),
            circadian_start_hour: default_circadian_start(),
            circadian_end_hour: default_circadian_end(),
            circadian_min_idle_hours: default_circadian_min_hours(),
            circadian_arousal: default_circadian_arousal(),
            circadian_valence_penalty: default_circadian_valence_penalty(),
            overwhelmed_patience_threshold: default_overwhelmed_threshold(),
            conflict_report_threshold: default_conflict_report_threshold(),
            conflict_rules: default_conflict_rules(),
        }
    }
}

/// Gesture recognition thresholds, in scene units and seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchConfig {
    /// Displacement beyond which a touch is a slide (or pull).
    #[serde(default = "default_slide_threshold")]
    pub slide_threshold: f32,
    /// Hold time beyond which a stationary touch is a long press.
    #[serde(default = "default_long_press_secs")]
    pub long_press_secs: f64,
    /// Finger-closing distance that fires a pinch.
    #[serde(default = "default_pinch_threshold")]
    pub pinch_threshold: f32,
    /// Long-press hold bounds `[gentle_below, moderate_below]` in seconds.
    #[serde(default = "default_long_press_bounds")]
    pub long_press_intensity_bounds: [f64; 2],
    /// Pinch delta bounds `[gentle_below, moderate_below]` in scene units.
    #[serde(default = "default_pinch_bounds")]
    pub pinch_intensity_bounds: [f64; 2],
    /// Parts on which a long hold still counts as a tap.
    #[serde(default = "default_long_press_disabled")]
    pub long_press_disabled_parts: Vec<BodyPart>,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            slide_threshold: default_slide_threshold(),
            long_press_secs: default_long_press_secs(),
            pinch_threshold: default_pinch_threshold(),
            long_press_intensity_bounds: default_long_press_bounds(),
            pinch_intensity_bounds: default_pinch_bounds(),
            long_press_disabled_parts: default_long_press_disabled(),
        }
    }
}

/// Body-part hit-testing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitTestConfig {
    /// Alpha (0–255) a pixel must exceed to count as a hit.
    #[serde(default = "default_alpha_threshold")]
    pub alpha_threshold: u8,
    /// Explicit hit rectangle over the lips.
    #[serde(default = "default_mouth_rect")]
    pub mouth_rect: Rect,
}

impl Default for HitTestConfig {
    fn default() -> Self {
        Self {
            alpha_threshold: default_alpha_threshold(),
            mouth_rect: default_mouth_rect(),
        }
    }
}

/// Remote reaction resolver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Base URL of the companion server. Empty disables the remote path.
    #[serde(default)]
    pub base_url: String,
    /// Value of the `X-API-Key` header.
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Extra attempts after the first failure.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

/// Persistence / save settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Storage backend: `sqlite` or `memory`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Whether SQLite runs in WAL mode.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
    /// Database file path.
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            wal_mode: true,
            path: default_db_path(),
        }
    }
}

/// Reaction presentation timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Lifetime of the floating dialogue label in seconds.
    #[serde(default = "default_dialogue_secs")]
    pub dialogue_label_secs: f64,
    /// Hearts spawned by a heart burst.
    #[serde(default = "default_heart_count")]
    pub heart_count: usize,
    /// Lifetime of a heart particle in seconds.
    #[serde(default = "default_heart_secs")]
    pub heart_secs: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            dialogue_label_secs: default_dialogue_secs(),
            heart_count: default_heart_count(),
            heart_secs: default_heart_secs(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value helpers (serde requires functions)
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_conflict_penalty() -> f64 {
    0.5
}
fn default_arousal_decay() -> f64 {
    0.5
}
fn default_arousal_baseline() -> f64 {
    0.5
}
fn default_negative_valence_recovery() -> f64 {
    0.1
}
fn default_positive_valence_decay() -> f64 {
    0.3
}
fn default_patience_reset_hours() -> f64 {
    1.0
}
fn default_fast_message_window() -> f64 {
    5.0
}
fn default_fast_message_penalty() -> f64 {
    0.15
}
fn default_patience_recovery() -> f64 {
    0.1
}
fn default_engagement_floor() -> f64 {
    0.4
}
fn default_engagement_boost() -> f64 {
    0.05
}
fn default_circadian_start() -> u32 {
    2
}
fn default_circadian_end() -> u32 {
    5
}
fn default_circadian_min_hours() -> f64 {
    4.0
}
fn default_circadian_arousal() -> f64 {
    0.2
}
fn default_circadian_valence_penalty() -> f64 {
    0.4
}
fn default_overwhelmed_threshold() -> f64 {
    0.2
}
fn default_conflict_report_threshold() -> f64 {
    -0.3
}
fn default_conflict_rules() -> Vec<ConflictRule> {
    vec![ConflictRule {
        phrase: "hate you".to_string(),
        valence_penalty: 0.5,
        trigger: "User said they hate her".to_string(),
    }]
}
fn default_slide_threshold() -> f32 {
    20.0
}
fn default_long_press_secs() -> f64 {
    0.5
}
fn default_pinch_threshold() -> f32 {
    10.0
}
fn default_long_press_bounds() -> [f64; 2] {
    [1.0, 2.0]
}
fn default_pinch_bounds() -> [f64; 2] {
    [20.0, 40.0]
}
fn default_long_press_disabled() -> Vec<BodyPart> {
    vec![BodyPart::Cheeks]
}
fn default_alpha_threshold() -> u8 {
    20
}
fn default_mouth_rect() -> Rect {
    Rect::centered(Point::new(40.0, 75.0), Size::new(275.0, 150.0))
}
fn default_timeout_ms() -> u64 {
    10_000
}
fn default_max_retries() -> u32 {
    1
}
fn default_backend() -> String {
    "sqlite".to_string()
}
fn default_db_path() -> String {
    "pandu_affect.db".to_string()
}
fn default_dialogue_secs() -> f64 {
    2.2
}
fn default_heart_count() -> usize {
    5
}
fn default_heart_secs() -> f64 {
    1.5
}
