// Player timing and threshold defaults - config.rs falls back to these

pub const APP_DIR: &str = "hive-player";
pub const DEFAULT_API_BASE_URL: &str = "https://api.streamhivex.icu";

// === Resume points ===
pub const RESUME_KEY_PREFIX: &str = "lastWatched_";
pub const PERSIST_INTERVAL_SECS: u64 = 5;
pub const RESUME_PROMPT_SECS: u64 = 5;
pub const FINISHED_FRACTION: f64 = 0.95;

// === Watch reporting ===
pub const WATCHED_AFTER_SECS: f64 = 30.0;
pub const WATCHED_FRACTION: f64 = 0.1;
/// How long close() waits on an in-flight report before detaching it
pub const REPORT_FLUSH_GRACE_MS: u64 = 2000;
/// Minimum gap between token lookups while none is stored
pub const TOKEN_RECHECK_SECS: u64 = 5;

// === Controls ===
pub const HIDE_CONTROLS_MS: u64 = 3000;
pub const SKIP_INDICATOR_MS: u64 = 800;
pub const SKIP_SECONDS: f64 = 10.0;
pub const SKIP_BACK_ZONE: f64 = 0.4;
pub const SKIP_FORWARD_ZONE: f64 = 0.6;

// === Volume ===
/// Volume restored on unmute when nothing non-zero was remembered
pub const FALLBACK_VOLUME: f64 = 0.5;

// === Local storage ===
pub const TOKEN_KEY: &str = "token";
