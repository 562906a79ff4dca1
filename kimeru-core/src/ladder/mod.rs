//! Amidakuji ladders: the rung grid, its traversal and its generator.
use serde::Serialize;

use crate::constants::LADDER_MIN_COLUMNS;
use crate::error::PickerError;

pub mod generate;
pub mod trace;

pub use generate::{Connectivity, GapShortfall, LadderGenerator, fill_sparse, repair_connectivity};
pub use trace::{Waypoint, trace_starting_point};

/// A grid of rung opportunities between `columns` vertical rails.
///
/// `rungs[row][gap]` is a connector between rail `gap` and rail `gap + 1`.
/// No rail ever touches two rungs in the same row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ladder {
    columns: usize,
    rungs: Vec<Vec<bool>>,
}

impl Ladder {
    /// An empty scaffold with `rows` rows and no rungs.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InsufficientItems`] when `columns < 2`.
    pub fn scaffold(columns: usize, rows: usize) -> Result<Self, PickerError> {
        ensure_columns(columns)?;
        Ok(Self {
            columns,
            rungs: vec![vec![false; columns - 1]; rows],
        })
    }

    /// Build a ladder from an explicit rung matrix.
    ///
    /// # Errors
    ///
    /// Returns an error when `columns < 2`, a row is not `columns - 1` wide, or
    /// two rungs in one row share a rail.
    pub fn from_rungs(columns: usize, rungs: Vec<Vec<bool>>) -> Result<Self, PickerError> {
        ensure_columns(columns)?;
        let gaps = columns - 1;
        for (row_idx, row) in rungs.iter().enumerate() {
            if row.len() != gaps {
                return Err(PickerError::MalformedLadder(format!(
                    "row {row_idx} has {} gaps, expected {gaps}",
                    row.len()
                )));
            }
            if let Some(gap) = row.windows(2).position(|pair| pair[0] && pair[1]) {
                return Err(PickerError::MalformedLadder(format!(
                    "row {row_idx} joins rail {} to both neighbours",
                    gap + 1
                )));
            }
        }
        Ok(Self { columns, rungs })
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rungs.len()
    }

    /// Number of gaps between adjacent rails.
    #[must_use]
    pub const fn gaps(&self) -> usize {
        self.columns - 1
    }

    #[must_use]
    pub fn rungs(&self) -> &[Vec<bool>] {
        &self.rungs
    }

    /// Whether a rung sits at `(row, gap)`; out-of-range cells read as empty.
    #[must_use]
    pub fn has_rung(&self, row: usize, gap: usize) -> bool {
        self.rungs
            .get(row)
            .and_then(|cells| cells.get(gap))
            .copied()
            .unwrap_or(false)
    }

    /// Rungs crossing `gap` over all rows.
    #[must_use]
    pub fn rung_count(&self, gap: usize) -> usize {
        self.rungs
            .iter()
            .filter(|cells| cells.get(gap).copied().unwrap_or(false))
            .count()
    }

    /// Whether a new rung at `(row, gap)` would keep every rail in at most one
    /// rung for that row and actually add a connector.
    #[must_use]
    pub fn can_place(&self, row: usize, gap: usize) -> bool {
        if row >= self.rows() || gap >= self.gaps() {
            return false;
        }
        let left_blocked = gap > 0 && self.has_rung(row, gap - 1);
        let right_blocked = self.has_rung(row, gap + 1);
        !left_blocked && !right_blocked && !self.has_rung(row, gap)
    }

    pub(crate) fn set_rung(&mut self, row: usize, gap: usize) {
        if let Some(cell) = self.rungs.get_mut(row).and_then(|cells| cells.get_mut(gap)) {
            *cell = true;
        }
    }

    /// Rail reached after passing through `row` while standing on `position`.
    ///
    /// A rung on the left is taken first; the no-shared-rail invariant means at
    /// most one of the two can exist.
    #[must_use]
    pub fn step(&self, row: usize, position: usize) -> usize {
        if position > 0 && self.has_rung(row, position - 1) {
            position - 1
        } else if position + 1 < self.columns && self.has_rung(row, position) {
            position + 1
        } else {
            position
        }
    }

    /// Bottom rail reached from top rail `start`.
    #[must_use]
    pub fn destination(&self, start: usize) -> usize {
        (0..self.rows()).fold(start, |position, row| self.step(row, position))
    }

    /// The permutation from top rails to bottom rails.
    #[must_use]
    pub fn mapping(&self) -> Mapping {
        Mapping((0..self.columns).map(|start| self.destination(start)).collect())
    }

    /// Replay the path from `start`; see [`trace_starting_point`].
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::RailOutOfRange`] when `start` is not a rail.
    pub fn trace(&self, start: usize) -> Result<Vec<Waypoint>, PickerError> {
        trace::trace_rails(self, start)
    }
}

/// Top-rail to bottom-rail permutation induced by a ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Mapping(Vec<usize>);

impl Mapping {
    /// Bottom rail for `start`, if `start` is a rail.
    #[must_use]
    pub fn destination(&self, start: usize) -> Option<usize> {
        self.0.get(start).copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every bottom rail is reached exactly once.
    #[must_use]
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.0.len()];
        for &dest in &self.0 {
            match seen.get_mut(dest) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    /// Top rail that ends on `bottom`.
    #[must_use]
    pub fn origin_of(&self, bottom: usize) -> Option<usize> {
        self.0.iter().position(|&dest| dest == bottom)
    }
}

impl From<Vec<usize>> for Mapping {
    fn from(value: Vec<usize>) -> Self {
        Self(value)
    }
}

fn ensure_columns(columns: usize) -> Result<(), PickerError> {
    if columns < LADDER_MIN_COLUMNS {
        return Err(PickerError::InsufficientItems {
            found: columns,
            required: LADDER_MIN_COLUMNS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_rung_swaps_first_two_rails() {
        let ladder = Ladder::from_rungs(4, vec![vec![true, false, false]]).unwrap();
        assert_eq!(ladder.mapping().as_slice(), &[1, 0, 2, 3]);
    }

    #[test]
    fn empty_ladder_is_identity() {
        let ladder = Ladder::scaffold(5, 10).unwrap();
        assert_eq!(ladder.mapping().as_slice(), &[0, 1, 2, 3, 4]);
        assert_eq!(ladder.rows(), 10);
        assert_eq!(ladder.gaps(), 4);
    }

    #[test]
    fn stacked_rows_compose_swaps() {
        // Row 0 swaps 0<->1, row 1 swaps 1<->2: rail 0 walks to 2.
        let ladder =
            Ladder::from_rungs(3, vec![vec![true, false], vec![false, true]]).unwrap();
        let mapping = ladder.mapping();
        assert_eq!(mapping.as_slice(), &[2, 0, 1]);
        assert!(mapping.is_permutation());
        assert_eq!(mapping.origin_of(2), Some(0));
    }

    #[test]
    fn rejects_fewer_than_two_rails() {
        assert_eq!(
            Ladder::scaffold(1, 6).unwrap_err(),
            PickerError::InsufficientItems {
                found: 1,
                required: 2
            }
        );
        assert!(Ladder::from_rungs(0, Vec::new()).is_err());
    }

    #[test]
    fn rejects_shared_rail_and_bad_width() {
        assert!(matches!(
            Ladder::from_rungs(4, vec![vec![true, true, false]]),
            Err(PickerError::MalformedLadder(_))
        ));
        assert!(matches!(
            Ladder::from_rungs(4, vec![vec![true, false]]),
            Err(PickerError::MalformedLadder(_))
        ));
    }

    #[test]
    fn can_place_respects_neighbours() {
        let ladder = Ladder::from_rungs(4, vec![vec![false, true, false]]).unwrap();
        assert!(!ladder.can_place(0, 0));
        assert!(!ladder.can_place(0, 1));
        assert!(!ladder.can_place(0, 2));
        let open = Ladder::scaffold(4, 1).unwrap();
        assert!(open.can_place(0, 0));
        assert!(!open.can_place(1, 0));
        assert!(!open.can_place(0, 3));
    }

    #[test]
    fn permutation_check_catches_duplicates() {
        assert!(!Mapping::from(vec![0, 0, 2]).is_permutation());
        assert!(!Mapping::from(vec![0, 3]).is_permutation());
        assert!(Mapping::from(vec![1, 0]).is_permutation());
    }

    #[test]
    fn out_of_range_cells_read_empty() {
        let ladder = Ladder::scaffold(2, 1).unwrap();
        assert!(!ladder.has_rung(5, 0));
        assert!(!ladder.has_rung(0, 5));
        assert_eq!(ladder.rung_count(9), 0);
    }
}
