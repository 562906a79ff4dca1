//! The immutable result of one amidakuji draw and the views built from it.
use serde::Serialize;

use crate::error::PickerError;
use crate::ladder::{Connectivity, Ladder, Mapping, Waypoint, trace_starting_point};
use crate::prizes::PrizeAssignment;

/// Ladder, mapping and prize placement produced together by one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmidakujiDraw {
    ladder: Ladder,
    mapping: Mapping,
    prizes: PrizeAssignment,
    connectivity: Connectivity,
}

/// Where one candidate's path ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub item: String,
    pub start: usize,
    pub destination: usize,
    pub label: String,
    pub is_prize: bool,
}

impl AmidakujiDraw {
    #[must_use]
    pub const fn new(
        ladder: Ladder,
        mapping: Mapping,
        prizes: PrizeAssignment,
        connectivity: Connectivity,
    ) -> Self {
        Self {
            ladder,
            mapping,
            prizes,
            connectivity,
        }
    }

    #[must_use]
    pub const fn ladder(&self) -> &Ladder {
        &self.ladder
    }

    #[must_use]
    pub const fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    #[must_use]
    pub const fn prizes(&self) -> &PrizeAssignment {
        &self.prizes
    }

    #[must_use]
    pub const fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.ladder.columns()
    }

    /// Replay the path from `start`.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::RailOutOfRange`] when `start` is not a rail.
    pub fn trace(&self, start: usize) -> Result<Vec<Waypoint>, PickerError> {
        trace_starting_point(&self.ladder, &self.mapping, start)
    }

    /// Top rails whose path ends on a prize, in rail order.
    #[must_use]
    pub fn winning_starts(&self) -> Vec<usize> {
        let mut starts = self.prizes.winning_starts.clone();
        starts.sort_unstable();
        starts
    }

    /// Pair each candidate with the slot its path reaches.
    ///
    /// Items beyond the ladder's rail count are ignored.
    #[must_use]
    pub fn assignments<S>(&self, items: &[S]) -> Vec<Assignment>
    where
        S: AsRef<str>,
    {
        items
            .iter()
            .take(self.columns())
            .enumerate()
            .filter_map(|(start, item)| {
                let destination = self.mapping.destination(start)?;
                let label = self.prizes.label(destination)?.to_string();
                Some(Assignment {
                    item: item.as_ref().to_string(),
                    start,
                    destination,
                    is_prize: self.prizes.is_prize_slot(destination),
                    label,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::LadderGenerator;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn fixed_draw() -> AmidakujiDraw {
        let ladder = Ladder::from_rungs(3, vec![vec![true, false], vec![false, true]]).unwrap();
        let mapping = ladder.mapping();
        let prizes = PrizeAssignment {
            bottom_labels: vec!["loss".into(), "loss".into(), "Gold".into()],
            winning_starts: vec![0],
            prize_slots: vec![2],
            loss_label: "loss".into(),
        };
        let connectivity = Connectivity::measure(&ladder, 2);
        AmidakujiDraw::new(ladder, mapping, prizes, connectivity)
    }

    #[test]
    fn assignments_follow_mapping() {
        let draw = fixed_draw();
        let assignments = draw.assignments(&["Ann", "Bo", "Cy"]);
        assert_eq!(assignments.len(), 3);
        assert_eq!(assignments[0].destination, 2);
        assert_eq!(assignments[0].label, "Gold");
        assert!(assignments[0].is_prize);
        assert!(!assignments[1].is_prize);
        assert_eq!(assignments[2].item, "Cy");
    }

    #[test]
    fn winning_starts_are_sorted() {
        let draw = fixed_draw();
        assert_eq!(draw.winning_starts(), vec![0]);
        assert!(!draw.connectivity().is_satisfied());
    }

    #[test]
    fn generated_draw_traces_to_its_labels() {
        let generator = LadderGenerator::default();
        let mut rng = ChaCha20Rng::seed_from_u64(77);
        let draw = generator.generate(5, &["X", "Y"], &mut rng).unwrap();
        for start in draw.winning_starts() {
            let end = draw.trace(start).unwrap().last().unwrap().rail;
            assert!(draw.prizes().is_prize_slot(end));
        }
    }
}
