//! Draw codes: short names for replayable seeds.
//!
//! A code reads `<MODE>-<WORD><NN>`, e.g. `AM-ORANGE42`. The word and the two
//! digits select one of [`CODE_SLOTS`] slots. A slot's seed keeps the slot in
//! its low 16 bits under 48 bits mixed from the mode and the slot, so codes
//! for different modes never share a seed. Seeds built any other way have no
//! code.

use crate::session::DecisionMode;

pub const WORD_LIST: [&str; 64] = [
    "ORANGE", "SUSHI", "RAMEN", "TACO", "PIZZA", "SALAD", "BURGER", "CURRY", "MANGO", "LEMON",
    "LADDER", "RUNG", "RAIL", "WHEEL", "SPIN", "ORDER", "TICKET", "LOTTO", "PRIZE", "GHOST",
    "LANTERN", "KITE", "RIVER", "MAPLE", "CEDAR", "PEBBLE", "CLOVER", "ACORN", "COMET", "ORBIT",
    "TIGER", "PANDA", "OTTER", "FALCON", "HERON", "BADGER", "WALRUS", "GECKO", "MOOSE", "LLAMA",
    "BANJO", "CELLO", "PIANO", "DRUM", "FLUTE", "HARP", "TUBA", "VIOLA", "ARROW", "ANCHOR",
    "BEACON", "CANDLE", "DOMINO", "EMBER", "FROST", "GLOBE", "HAMMER", "ISLAND", "JIGSAW", "KETTLE",
    "MARBLE", "NEEDLE", "PARCEL", "QUARTZ",
];

const NUMBERS_PER_WORD: u16 = 100;

/// Distinct codes per mode: every word with every number `00..=99`.
pub const CODE_SLOTS: u16 = 64 * NUMBERS_PER_WORD;

const SLOT_BITS: u64 = 0xFFFF;

const fn mode_prefix(mode: DecisionMode) -> &'static str {
    match mode {
        DecisionMode::Roulette => "RL",
        DecisionMode::Order => "OR",
        DecisionMode::Amidakuji => "AM",
    }
}

const fn mode_salt(mode: DecisionMode) -> u64 {
    match mode {
        DecisionMode::Roulette => 0xD6E8_FEB8_6659_FD93,
        DecisionMode::Order => 0xA5A3_5625_E4F7_C1AD,
        DecisionMode::Amidakuji => 0x9E37_79B9_7F4A_7C15,
    }
}

fn mode_from_prefix(prefix: &str) -> Option<DecisionMode> {
    [
        DecisionMode::Roulette,
        DecisionMode::Order,
        DecisionMode::Amidakuji,
    ]
    .into_iter()
    .find(|mode| prefix.eq_ignore_ascii_case(mode_prefix(*mode)))
}

/// One SplitMix64 round.
const fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed named by `slot` in `mode`, or `None` past the last slot.
#[must_use]
pub fn seed_for_slot(mode: DecisionMode, slot: u16) -> Option<u64> {
    if slot >= CODE_SLOTS {
        return None;
    }
    let slot = u64::from(slot);
    let high = splitmix64(mode_salt(mode) ^ slot.wrapping_mul(0xA24B_AED4_963E_E407));
    Some((high & !SLOT_BITS) | slot)
}

fn slot_of(mode: DecisionMode, seed: u64) -> Option<u16> {
    let slot = u16::try_from(seed & SLOT_BITS).ok()?;
    (seed_for_slot(mode, slot)? == seed).then_some(slot)
}

fn format_slot(mode: DecisionMode, slot: u16) -> String {
    let word = WORD_LIST[usize::from(slot / NUMBERS_PER_WORD)];
    let number = slot % NUMBERS_PER_WORD;
    format!("{}-{word}{number:02}", mode_prefix(mode))
}

/// Code that reproduces `seed` in `mode`.
///
/// Returns `None` unless `seed` came from [`decode_code`] or
/// [`generate_code_from_entropy`] for the same mode.
#[must_use]
pub fn encode_code(mode: DecisionMode, seed: u64) -> Option<String> {
    slot_of(mode, seed).map(|slot| format_slot(mode, slot))
}

/// Parse a draw code, ignoring case and surrounding whitespace.
#[must_use]
pub fn decode_code(code: &str) -> Option<(DecisionMode, u64)> {
    let (prefix, rest) = code.trim().split_once('-')?;
    let mode = mode_from_prefix(prefix)?;
    if rest.len() < 3 || !rest.is_ascii() {
        return None;
    }
    let (word, digits) = rest.split_at(rest.len() - 2);
    if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let number: u16 = digits.parse().ok()?;
    let word_index = WORD_LIST
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(word))?;
    let slot = u16::try_from(word_index).ok()? * NUMBERS_PER_WORD + number;
    Some((mode, seed_for_slot(mode, slot)?))
}

/// A fresh code for `mode`, chosen by `entropy`.
#[must_use]
pub fn generate_code_from_entropy(mode: DecisionMode, entropy: u64) -> String {
    let slot = u16::try_from(entropy % u64::from(CODE_SLOTS)).unwrap_or(0);
    format_slot(mode, slot)
}
