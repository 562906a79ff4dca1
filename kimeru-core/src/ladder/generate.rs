//! Randomized ladder construction.
use log::{debug, warn};
use rand::Rng;
use serde::Serialize;

use super::Ladder;
use crate::config::{LabelConfig, LadderConfig};
use crate::draw::AmidakujiDraw;
use crate::error::PickerError;
use crate::prizes::PrizeAssignment;

/// Gap that ended the repair pass below the required rung count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GapShortfall {
    pub gap: usize,
    pub rungs: usize,
}

/// Outcome of the connectivity repair pass.
///
/// The repair search is bounded, so a ladder may end up under-connected. That
/// never breaks the mapping; it is reported here instead of failing the draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connectivity {
    pub required: usize,
    pub rung_counts: Vec<usize>,
    pub shortfalls: Vec<GapShortfall>,
}

impl Connectivity {
    /// Measure `ladder` against `required` rungs per gap.
    #[must_use]
    pub fn measure(ladder: &Ladder, required: usize) -> Self {
        let rung_counts: Vec<usize> = (0..ladder.gaps()).map(|gap| ladder.rung_count(gap)).collect();
        let shortfalls = rung_counts
            .iter()
            .enumerate()
            .filter(|&(_, &rungs)| rungs < required)
            .map(|(gap, &rungs)| GapShortfall { gap, rungs })
            .collect();
        Self {
            required,
            rung_counts,
            shortfalls,
        }
    }

    /// Whether every gap reached the required count.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.shortfalls.is_empty()
    }
}

/// Scan each row left to right, drawing a rung with probability `chance`
/// wherever the left neighbour is free. A drawn rung skips the next gap.
/// A NaN chance draws nothing.
pub fn fill_sparse<R>(ladder: &mut Ladder, chance: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let chance = if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    };
    let gaps = ladder.gaps();
    for row in 0..ladder.rows() {
        let mut gap = 0;
        while gap < gaps {
            let can_draw = gap == 0 || !ladder.has_rung(row, gap - 1);
            if can_draw && rng.gen_bool(chance) {
                ladder.set_rung(row, gap);
                gap += 2;
            } else {
                gap += 1;
            }
        }
    }
}

/// Top up every gap to `required` rungs.
///
/// Each missing rung gets at most `rows` attempts at a uniformly random row;
/// the first row where the rung fits without sharing a rail receives it.
/// Gaps whose attempts run out are listed in the returned shortfalls.
pub fn repair_connectivity<R>(ladder: &mut Ladder, required: usize, rng: &mut R) -> Connectivity
where
    R: Rng + ?Sized,
{
    let rows = ladder.rows();
    if rows == 0 {
        return Connectivity::measure(ladder, required);
    }
    for gap in 0..ladder.gaps() {
        let present = ladder.rung_count(gap);
        for _ in present..required {
            for _ in 0..rows {
                let row = rng.gen_range(0..rows);
                if ladder.can_place(row, gap) {
                    ladder.set_rung(row, gap);
                    break;
                }
            }
        }
    }
    Connectivity::measure(ladder, required)
}

/// Builds complete amidakuji draws from a ladder configuration.
#[derive(Debug, Clone, Default)]
pub struct LadderGenerator {
    ladder: LadderConfig,
    labels: LabelConfig,
}

impl LadderGenerator {
    #[must_use]
    pub const fn new(ladder: LadderConfig, labels: LabelConfig) -> Self {
        Self { ladder, labels }
    }

    #[must_use]
    pub const fn config(&self) -> &LadderConfig {
        &self.ladder
    }

    /// Build the rung grid only: scaffold, sparse fill, connectivity repair.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InsufficientItems`] when `columns < 2`.
    pub fn build_ladder<R>(
        &self,
        columns: usize,
        rng: &mut R,
    ) -> Result<(Ladder, Connectivity), PickerError>
    where
        R: Rng + ?Sized,
    {
        let mut ladder = Ladder::scaffold(columns, self.ladder.rows_for(columns))?;
        fill_sparse(&mut ladder, self.ladder.rung_chance, rng);
        let connectivity = repair_connectivity(&mut ladder, self.ladder.min_rungs_per_gap, rng);
        if !connectivity.is_satisfied() {
            warn!(
                "ladder with {columns} rails left {} gap(s) below {} rungs: {:?}",
                connectivity.shortfalls.len(),
                connectivity.required,
                connectivity.shortfalls
            );
        }
        Ok((ladder, connectivity))
    }

    /// Generate a fresh ladder, its mapping and the prize placement.
    ///
    /// An empty `prize_names` list falls back to the configured default prize.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InsufficientItems`] when `columns < 2`.
    pub fn generate<S, R>(
        &self,
        columns: usize,
        prize_names: &[S],
        rng: &mut R,
    ) -> Result<AmidakujiDraw, PickerError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let (ladder, connectivity) = self.build_ladder(columns, rng)?;
        let mapping = ladder.mapping();
        let names: Vec<String> = if prize_names.is_empty() {
            vec![self.labels.default_prize.clone()]
        } else {
            prize_names.iter().map(|name| name.as_ref().to_string()).collect()
        };
        let prizes = PrizeAssignment::assign(&mapping, &names, &self.labels.loss, rng);
        debug!(
            "generated ladder: {columns} rails, {} rows, {} winner(s), rung counts {:?}",
            ladder.rows(),
            prizes.winning_starts.len(),
            connectivity.rung_counts
        );
        Ok(AmidakujiDraw::new(ladder, mapping, prizes, connectivity))
    }
}
