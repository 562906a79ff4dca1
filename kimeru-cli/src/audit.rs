//! Generator quality sweep backing `kimeru audit`.
use anyhow::{Result, ensure};
use kimeru_core::numbers::usize_to_f64;
use kimeru_core::{LadderGenerator, RngStreams, StreamDomain};
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub columns: usize,
    pub trials: usize,
    pub seed: u64,
    pub satisfied: usize,
    pub rate: f64,
    pub min_rate: f64,
    pub broken_permutations: usize,
    pub shared_rails: usize,
    pub mean_rungs_per_gap: f64,
    pub passed: bool,
}

/// Build `trials` ladders of `columns` rails from one seeded stream and tally
/// how many met the connectivity target.
///
/// The audit passes when the connected share reaches `min_rate` and no
/// ladder broke the permutation or shared-rail invariants.
pub fn run_audit(
    generator: &LadderGenerator,
    columns: usize,
    trials: usize,
    min_rate: f64,
    seed: u64,
) -> Result<AuditReport> {
    ensure!(trials > 0, "audit needs at least one trial");
    ensure!(
        (0.0..=1.0).contains(&min_rate),
        "min-rate must lie in 0..=1, got {min_rate}"
    );

    let mut streams = RngStreams::from_user_seed(seed);
    let mut satisfied = 0;
    let mut broken_permutations = 0;
    let mut shared_rails = 0;
    let mut total_rungs = 0;
    for trial in 0..trials {
        let (ladder, connectivity) =
            generator.build_ladder(columns, streams.stream(StreamDomain::Ladder))?;
        if connectivity.is_satisfied() {
            satisfied += 1;
        } else {
            debug!("trial {trial}: shortfalls {:?}", connectivity.shortfalls);
        }
        if !ladder.mapping().is_permutation() {
            broken_permutations += 1;
        }
        if ladder
            .rungs()
            .iter()
            .any(|row| row.windows(2).any(|pair| pair[0] && pair[1]))
        {
            shared_rails += 1;
        }
        total_rungs += connectivity.rung_counts.iter().sum::<usize>();
    }

    let rate = usize_to_f64(satisfied) / usize_to_f64(trials);
    let gap_samples = usize_to_f64(trials * (columns - 1));
    Ok(AuditReport {
        columns,
        trials,
        seed,
        satisfied,
        rate,
        min_rate,
        broken_permutations,
        shared_rails,
        mean_rungs_per_gap: usize_to_f64(total_rungs) / gap_samples,
        passed: rate >= min_rate && broken_permutations == 0 && shared_rails == 0,
    })
}
