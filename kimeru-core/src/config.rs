//! Picker tuning loaded from JSON.
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_PRIZE_NAME, LADDER_MAX_ROWS, LADDER_MIN_ROWS, LADDER_MIN_RUNGS_PER_GAP,
    LADDER_ROWS_PER_COLUMN, LADDER_RUNG_CHANCE, LOSS_LABEL, WHEEL_ACCEL_MS, WHEEL_DECEL_MS,
    WHEEL_EXTRA_SPINS, WHEEL_MAX_SPEED_DEG_PER_MS,
};
use crate::error::ConfigError;
use crate::numbers::usize_to_f64;

const DEFAULT_PICKER_DATA: &str = include_str!("../assets/picker.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PickerConfig {
    #[serde(default)]
    pub ladder: LadderConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub labels: LabelConfig,
}

impl PickerConfig {
    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_PICKER_DATA).unwrap_or_default()
    }

    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ladder.validate()?;
        self.wheel.validate()?;
        self.labels.validate()?;
        Ok(())
    }
}

/// Shape and density of generated ladders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LadderConfig {
    #[serde(default = "LadderConfig::default_min_rows")]
    pub min_rows: usize,
    #[serde(default = "LadderConfig::default_rows_per_column")]
    pub rows_per_column: usize,
    #[serde(default = "LadderConfig::default_rung_chance")]
    pub rung_chance: f64,
    #[serde(default = "LadderConfig::default_min_rungs_per_gap")]
    pub min_rungs_per_gap: usize,
}

impl LadderConfig {
    const fn default_min_rows() -> usize {
        LADDER_MIN_ROWS
    }

    const fn default_rows_per_column() -> usize {
        LADDER_ROWS_PER_COLUMN
    }

    const fn default_rung_chance() -> f64 {
        LADDER_RUNG_CHANCE
    }

    const fn default_min_rungs_per_gap() -> usize {
        LADDER_MIN_RUNGS_PER_GAP
    }

    /// Row count for a ladder with `columns` rails, never above
    /// [`LADDER_MAX_ROWS`] for a validated config.
    #[must_use]
    pub fn rows_for(&self, columns: usize) -> usize {
        let scaled = columns
            .saturating_mul(self.rows_per_column)
            .min(LADDER_MAX_ROWS);
        self.min_rows.max(scaled)
    }

    /// # Errors
    ///
    /// Returns an error when the row counts fall outside `1..=LADDER_MAX_ROWS`,
    /// the rung target exceeds `min_rows`, or the rung chance is not a
    /// probability.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max_rows = usize_to_f64(LADDER_MAX_ROWS);
        if !(1..=LADDER_MAX_ROWS).contains(&self.min_rows) {
            return Err(ConfigError::RangeViolation {
                field: "ladder.min_rows",
                min: 1.0,
                max: max_rows,
                value: usize_to_f64(self.min_rows),
            });
        }
        if self.rows_per_column > LADDER_MAX_ROWS {
            return Err(ConfigError::RangeViolation {
                field: "ladder.rows_per_column",
                min: 0.0,
                max: max_rows,
                value: usize_to_f64(self.rows_per_column),
            });
        }
        // A two-rail ladder has exactly `min_rows` cells per gap.
        if self.min_rungs_per_gap > self.min_rows {
            return Err(ConfigError::RangeViolation {
                field: "ladder.min_rungs_per_gap",
                min: 0.0,
                max: usize_to_f64(self.min_rows),
                value: usize_to_f64(self.min_rungs_per_gap),
            });
        }
        if !(0.0..=1.0).contains(&self.rung_chance) {
            return Err(ConfigError::RangeViolation {
                field: "ladder.rung_chance",
                min: 0.0,
                max: 1.0,
                value: self.rung_chance,
            });
        }
        Ok(())
    }
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            min_rows: Self::default_min_rows(),
            rows_per_column: Self::default_rows_per_column(),
            rung_chance: Self::default_rung_chance(),
            min_rungs_per_gap: Self::default_min_rungs_per_gap(),
        }
    }
}

/// Timing of the roulette wheel animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    #[serde(default = "WheelConfig::default_max_speed")]
    pub max_speed_deg_per_ms: f64,
    #[serde(default = "WheelConfig::default_accel_ms")]
    pub accel_ms: f64,
    #[serde(default = "WheelConfig::default_decel_ms")]
    pub decel_ms: f64,
    #[serde(default = "WheelConfig::default_extra_spins")]
    pub extra_spins: u32,
}

impl WheelConfig {
    const fn default_max_speed() -> f64 {
        WHEEL_MAX_SPEED_DEG_PER_MS
    }

    const fn default_accel_ms() -> f64 {
        WHEEL_ACCEL_MS
    }

    const fn default_decel_ms() -> f64 {
        WHEEL_DECEL_MS
    }

    const fn default_extra_spins() -> u32 {
        WHEEL_EXTRA_SPINS
    }

    /// # Errors
    ///
    /// Returns an error for a non-positive speed or negative durations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_speed_deg_per_ms > 0.0) {
            return Err(ConfigError::MinViolation {
                field: "wheel.max_speed_deg_per_ms",
                min: f64::MIN_POSITIVE,
                value: self.max_speed_deg_per_ms,
            });
        }
        for (field, value) in [
            ("wheel.accel_ms", self.accel_ms),
            ("wheel.decel_ms", self.decel_ms),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::MinViolation {
                    field,
                    min: 0.0,
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            max_speed_deg_per_ms: Self::default_max_speed(),
            accel_ms: Self::default_accel_ms(),
            decel_ms: Self::default_decel_ms(),
            extra_spins: Self::default_extra_spins(),
        }
    }
}

/// Text written onto ladder bottom slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConfig {
    #[serde(default = "LabelConfig::default_loss")]
    pub loss: String,
    #[serde(default = "LabelConfig::default_prize")]
    pub default_prize: String,
}

impl LabelConfig {
    fn default_loss() -> String {
        LOSS_LABEL.to_string()
    }

    fn default_prize() -> String {
        DEFAULT_PRIZE_NAME.to_string()
    }

    /// # Errors
    ///
    /// Returns an error when a label is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loss.trim().is_empty() {
            return Err(ConfigError::BlankLabel {
                field: "labels.loss",
            });
        }
        if self.default_prize.trim().is_empty() {
            return Err(ConfigError::BlankLabel {
                field: "labels.default_prize",
            });
        }
        Ok(())
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            loss: Self::default_loss(),
            default_prize: Self::default_prize(),
        }
    }
}
