use anyhow::{Result, bail};
use kimeru_core::{DecisionMode, decode_code, encode_code, generate_code_from_entropy};
use log::warn;
use serde::Serialize;

/// Seed for one invocation together with the code that reproduces it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedInfo {
    pub seed: u64,
    pub code: Option<String>,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self { seed, code: None }
    }

    #[must_use]
    pub const fn from_code(seed: u64, code: String) -> Self {
        Self {
            seed,
            code: Some(code),
        }
    }
}

/// Resolve the `--seed` argument for a command running in `mode`.
///
/// Accepts a literal integer or a draw code. Without a token a fresh code is
/// generated from `entropy` so the run can be replayed.
pub fn resolve_seed(token: Option<&str>, mode: DecisionMode, entropy: u64) -> Result<SeedInfo> {
    let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) else {
        let code = generate_code_from_entropy(mode, entropy);
        return match decode_code(&code) {
            Some((_, seed)) => Ok(SeedInfo::from_code(seed, code)),
            None => Ok(SeedInfo::from_numeric(entropy)),
        };
    };

    let numeric = token
        .parse::<u64>()
        .ok()
        .or_else(|| token.parse::<i64>().ok().map(i64::unsigned_abs));
    if let Some(value) = numeric {
        return Ok(match encode_code(mode, value) {
            Some(code) => SeedInfo::from_code(value, code),
            None => SeedInfo::from_numeric(value),
        });
    }

    if let Some((code_mode, seed)) = decode_code(token) {
        if code_mode != mode {
            warn!("draw code {token} was made for {code_mode:?}, replaying it as {mode:?}");
        }
        return Ok(SeedInfo::from_code(seed, token.to_ascii_uppercase()));
    }

    bail!("invalid seed or draw code: {token}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_seed_passes_through() {
        let info = resolve_seed(Some("1337"), DecisionMode::Order, 0).unwrap();
        assert_eq!(info, SeedInfo::from_numeric(1337));
    }

    #[test]
    fn negative_seed_uses_magnitude() {
        let info = resolve_seed(Some("-5"), DecisionMode::Order, 0).unwrap();
        assert_eq!(info.seed, 5);
    }

    #[test]
    fn draw_code_resolves_and_keeps_code() {
        let (_, expected) = decode_code("AM-ORANGE42").unwrap();
        let info = resolve_seed(Some("am-orange42"), DecisionMode::Amidakuji, 0).unwrap();
        assert_eq!(info.seed, expected);
        assert_eq!(info.code.as_deref(), Some("AM-ORANGE42"));
    }

    #[test]
    fn missing_seed_generates_replayable_code() {
        let info = resolve_seed(None, DecisionMode::Roulette, 0xABCDEF).unwrap();
        let code = info.code.clone().unwrap();
        assert!(code.starts_with("RL-"));
        let replay = resolve_seed(Some(&code), DecisionMode::Roulette, 0).unwrap();
        assert_eq!(replay.seed, info.seed);
        assert_eq!(encode_code(DecisionMode::Roulette, info.seed), Some(code));
    }

    #[test]
    fn numeric_seed_with_a_code_reports_it() {
        let (_, seed) = decode_code("OR-KITE07").unwrap();
        let info = resolve_seed(Some(&seed.to_string()), DecisionMode::Order, 0).unwrap();
        assert_eq!(info, SeedInfo::from_code(seed, "OR-KITE07".to_string()));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(resolve_seed(Some("not-a-code"), DecisionMode::Order, 0).is_err());
    }
}
