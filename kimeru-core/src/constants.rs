//! Centralized tuning constants for Kimeru decision logic.
//!
//! Label, ladder and wheel values are the defaults of
//! [`crate::config::PickerConfig`] when no configuration overrides them.

// Labels -------------------------------------------------------------------
/// Label written to every bottom slot that carries no prize.
pub const LOSS_LABEL: &str = "ハズレ";
/// Prize name substituted when the caller supplies none.
pub const DEFAULT_PRIZE_NAME: &str = "当たり";
/// Candidate list a fresh or reset session starts with.
pub const DEFAULT_ITEMS: [&str; 6] = ["Sushi", "Ramen", "Burgers", "Tacos", "Salad", "Pizza"];

// Ladder -------------------------------------------------------------------
pub const LADDER_MIN_COLUMNS: usize = 2;
pub const LADDER_MIN_ROWS: usize = 6;
pub const LADDER_ROWS_PER_COLUMN: usize = 2;
pub const LADDER_RUNG_CHANCE: f64 = 0.35;
pub const LADDER_MIN_RUNGS_PER_GAP: usize = 2;
/// Upper bound on rows in any generated ladder.
pub const LADDER_MAX_ROWS: usize = 10_000;

// Wheel --------------------------------------------------------------------
pub const WHEEL_MAX_SPEED_DEG_PER_MS: f64 = 1.4;
pub const WHEEL_ACCEL_MS: f64 = 800.0;
pub const WHEEL_DECEL_MS: f64 = 3000.0;
pub const WHEEL_EXTRA_SPINS: u32 = 3;
pub const FULL_TURN_DEG: f64 = 360.0;

// Layout -------------------------------------------------------------------
pub const LAYOUT_LABEL_WIDTH: f64 = 56.0;
pub const LAYOUT_LADDER_TOP: f64 = 24.0;
pub const LAYOUT_LADDER_BOTTOM: f64 = 200.0;
pub const TRACE_ANIMATION_MS: f64 = 1100.0;
