//! Path replay for rendering and highlighting a single start rail.
use serde::Serialize;

use super::{Ladder, Mapping};
use crate::error::PickerError;

/// A rail position on a row boundary.
///
/// Boundary `0` is the top of the ladder, boundary `row + 1` is the line of
/// `row`, and boundary `rows + 1` is the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Waypoint {
    pub rail: usize,
    pub boundary: usize,
}

/// Replay the path from top rail `start` down to the bottom.
///
/// The result starts at the top, records the rail on arrival at every row
/// line, records the far rail again whenever a rung is crossed, and ends at
/// the bottom. The final rail always equals `mapping[start]`. Calling this any
/// number of times yields the same sequence.
///
/// # Errors
///
/// Returns [`PickerError::RailOutOfRange`] when `start` is not a rail and
/// [`PickerError::MalformedLadder`] when `mapping` belongs to another ladder.
pub fn trace_starting_point(
    ladder: &Ladder,
    mapping: &Mapping,
    start: usize,
) -> Result<Vec<Waypoint>, PickerError> {
    if mapping.len() != ladder.columns() {
        return Err(PickerError::MalformedLadder(format!(
            "mapping covers {} rails but the ladder has {}",
            mapping.len(),
            ladder.columns()
        )));
    }
    let waypoints = trace_rails(ladder, start)?;
    debug_assert_eq!(
        waypoints.last().map(|point| point.rail),
        mapping.destination(start)
    );
    Ok(waypoints)
}

pub(super) fn trace_rails(ladder: &Ladder, start: usize) -> Result<Vec<Waypoint>, PickerError> {
    if start >= ladder.columns() {
        return Err(PickerError::RailOutOfRange {
            start,
            columns: ladder.columns(),
        });
    }
    let rows = ladder.rows();
    let mut waypoints = Vec::with_capacity(rows * 2 + 2);
    let mut position = start;
    waypoints.push(Waypoint {
        rail: position,
        boundary: 0,
    });
    for row in 0..rows {
        let boundary = row + 1;
        waypoints.push(Waypoint {
            rail: position,
            boundary,
        });
        let next = ladder.step(row, position);
        if next != position {
            position = next;
            waypoints.push(Waypoint {
                rail: position,
                boundary,
            });
        }
    }
    waypoints.push(Waypoint {
        rail: position,
        boundary: rows + 1,
    });
    Ok(waypoints)
}
