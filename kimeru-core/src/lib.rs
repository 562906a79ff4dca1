//! Kimeru decision engine
//!
//! Platform-agnostic core for a small "help me decide" picker: a roulette
//! wheel, a random ordering, and amidakuji (ghost-leg) ladder lotteries.
//! Nothing here touches a clock, a screen or global randomness; callers pass
//! timestamps and RNG streams in.

pub mod config;
pub mod constants;
pub mod draw;
pub mod easing;
pub mod error;
pub mod ladder;
pub mod layout;
pub mod numbers;
pub mod prizes;
pub mod rng;
pub mod roster;
pub mod seed;
pub mod session;
pub mod shuffle;
pub mod wheel;

// Re-export commonly used types
pub use config::{LabelConfig, LadderConfig, PickerConfig, WheelConfig};
pub use draw::{AmidakujiDraw, Assignment};
pub use error::{ConfigError, PickerError};
pub use ladder::{
    Connectivity, GapShortfall, Ladder, LadderGenerator, Mapping, Waypoint, trace_starting_point,
};
pub use layout::{LadderLayout, Point, path_length, trace_progress};
pub use prizes::{PrizeAssignment, resolve_prize_names};
pub use rng::{CountingRng, RngStreams, StreamDomain};
pub use roster::{PrizeAddOutcome, Roster, parse_entries};
pub use seed::{decode_code, encode_code, generate_code_from_entropy};
pub use session::{DecisionMode, PickerSession};
pub use shuffle::{shuffle_in_place, shuffle_sequence};
pub use wheel::{WheelPhase, WheelState, segment_under_pointer};
