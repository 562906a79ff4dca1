//! Roulette wheel motion as a pure per-frame step function.
//!
//! The wheel never reads a clock: callers pass a timestamp in milliseconds
//! with every [`WheelState::step`] and keep the returned state.
use serde::Serialize;

use crate::config::WheelConfig;
use crate::constants::FULL_TURN_DEG;
use crate::easing::{ease_in_cubic, ease_out_cubic, progress};
use crate::numbers::{floor_f64_to_index, u32_to_f64, usize_to_f64};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum WheelPhase {
    Idle,
    /// Accelerating towards, then holding, the configured top speed.
    Spinning {
        started_at: Option<f64>,
        last_frame: Option<f64>,
    },
    /// Easing out from `from` to `to`, then selecting `pending`.
    Stopping {
        started_at: Option<f64>,
        from: f64,
        to: f64,
        pending: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelState {
    pub rotation_deg: f64,
    pub phase: WheelPhase,
    pub selected: Option<usize>,
}

impl Default for WheelState {
    fn default() -> Self {
        Self::idle()
    }
}

impl WheelState {
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            rotation_deg: 0.0,
            phase: WheelPhase::Idle,
            selected: None,
        }
    }

    /// True while the wheel is moving, including the slow-down.
    #[must_use]
    pub const fn is_spinning(&self) -> bool {
        !matches!(self.phase, WheelPhase::Idle)
    }

    /// Start spinning from rest; a moving wheel is returned unchanged.
    #[must_use]
    pub const fn begin_spin(self) -> Self {
        if self.is_spinning() {
            return self;
        }
        Self {
            rotation_deg: self.rotation_deg,
            phase: WheelPhase::Spinning {
                started_at: None,
                last_frame: None,
            },
            selected: None,
        }
    }

    /// Begin slowing down so that slice `index` ends under the pointer.
    ///
    /// Only a spinning wheel reacts; otherwise the state is returned as is.
    #[must_use]
    pub fn request_stop(self, index: usize, item_count: usize, cfg: &WheelConfig) -> Self {
        if !matches!(self.phase, WheelPhase::Spinning { .. }) || item_count == 0 {
            return self;
        }
        let to = stop_target(self.rotation_deg, index, item_count, cfg.extra_spins);
        Self {
            phase: WheelPhase::Stopping {
                started_at: None,
                from: self.rotation_deg,
                to,
                pending: index,
            },
            ..self
        }
    }

    /// Jump straight to the resting position for `index` (reduced motion).
    #[must_use]
    pub fn settle(self, index: usize, item_count: usize, cfg: &WheelConfig) -> Self {
        if item_count == 0 {
            return Self {
                phase: WheelPhase::Idle,
                ..self
            };
        }
        Self {
            rotation_deg: stop_target(self.rotation_deg, index, item_count, cfg.extra_spins),
            phase: WheelPhase::Idle,
            selected: Some(index),
        }
    }

    /// Halt immediately wherever the wheel is, selecting nothing.
    #[must_use]
    pub const fn halt(self) -> Self {
        Self {
            rotation_deg: self.rotation_deg,
            phase: WheelPhase::Idle,
            selected: self.selected,
        }
    }

    /// Advance the wheel to time `now_ms`.
    #[must_use]
    pub fn step(self, now_ms: f64, cfg: &WheelConfig) -> Self {
        match self.phase {
            WheelPhase::Idle => self,
            WheelPhase::Spinning {
                started_at,
                last_frame,
            } => {
                let started = started_at.unwrap_or(now_ms);
                let last = last_frame.unwrap_or(now_ms);
                let accel = progress(now_ms - started, cfg.accel_ms);
                let speed = cfg.max_speed_deg_per_ms * ease_in_cubic(accel);
                let delta = (now_ms - last).max(0.0);
                Self {
                    rotation_deg: self.rotation_deg + delta * speed,
                    phase: WheelPhase::Spinning {
                        started_at: Some(started),
                        last_frame: Some(now_ms),
                    },
                    selected: None,
                }
            }
            WheelPhase::Stopping {
                started_at,
                from,
                to,
                pending,
            } => {
                let started = started_at.unwrap_or(now_ms);
                let done = progress(now_ms - started, cfg.decel_ms);
                if done >= 1.0 {
                    return Self {
                        rotation_deg: to,
                        phase: WheelPhase::Idle,
                        selected: Some(pending),
                    };
                }
                Self {
                    rotation_deg: from + (to - from) * ease_out_cubic(done),
                    phase: WheelPhase::Stopping {
                        started_at: Some(started),
                        from,
                        to,
                        pending,
                    },
                    selected: None,
                }
            }
        }
    }
}

/// Angular width of one slice.
#[must_use]
pub fn slice_deg(item_count: usize) -> f64 {
    FULL_TURN_DEG / usize_to_f64(item_count.max(1))
}

/// Midpoint angle of slice `index`, measured clockwise from the pointer.
#[must_use]
pub fn segment_center(index: usize, item_count: usize) -> f64 {
    let slice = slice_deg(item_count);
    usize_to_f64(index) * slice + slice / 2.0
}

/// Rotation at which slice `index` rests under the pointer, at least
/// `extra_spins` full turns past `rotation`.
#[must_use]
pub fn stop_target(rotation: f64, index: usize, item_count: usize, extra_spins: u32) -> f64 {
    let desired = (FULL_TURN_DEG - segment_center(index, item_count)).rem_euclid(FULL_TURN_DEG);
    let current = rotation.rem_euclid(FULL_TURN_DEG);
    let delta = (desired - current).rem_euclid(FULL_TURN_DEG);
    rotation + u32_to_f64(extra_spins) * FULL_TURN_DEG + delta
}

/// Slice currently under the pointer for a wheel turned by `rotation`.
#[must_use]
pub fn segment_under_pointer(rotation: f64, item_count: usize) -> usize {
    if item_count == 0 {
        return 0;
    }
    let pointer = (FULL_TURN_DEG - rotation.rem_euclid(FULL_TURN_DEG)).rem_euclid(FULL_TURN_DEG);
    floor_f64_to_index(pointer / slice_deg(item_count), item_count)
}
