//! Timing constants

/// Inactivity window before the screen sleeps (ms)
pub const SCREEN_TIMEOUT_MS: u64 = 30_000;

/// Device toggle confirmation banner duration (ms)
pub const TOGGLE_BANNER_MS: u64 = 1_000;

/// Scene confirmation banner duration (ms)
pub const SCENE_BANNER_MS: u64 = 2_000;

/// Power-off-all confirmation banner duration (ms)
pub const POWER_OFF_BANNER_MS: u64 = 2_000;

/// Delay between broker connection attempts (ms)
pub const RECONNECT_DELAY_MS: u64 = 5_000;
