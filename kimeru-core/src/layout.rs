//! Projection of ladder paths onto a drawing surface.
use serde::{Deserialize, Serialize};

use crate::constants::{
    LAYOUT_LADDER_BOTTOM, LAYOUT_LADDER_TOP, LAYOUT_LABEL_WIDTH, TRACE_ANIMATION_MS,
};
use crate::easing::{ease_out_cubic, progress};
use crate::ladder::Waypoint;
use crate::numbers::usize_to_f64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Canvas geometry: one `label_width` column per rail, rails spanning
/// `top..bottom`, rung rows spaced evenly in between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LadderLayout {
    pub label_width: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for LadderLayout {
    fn default() -> Self {
        Self {
            label_width: LAYOUT_LABEL_WIDTH,
            top: LAYOUT_LADDER_TOP,
            bottom: LAYOUT_LADDER_BOTTOM,
        }
    }
}

impl LadderLayout {
    #[must_use]
    pub fn x_for_rail(&self, rail: usize) -> f64 {
        self.label_width * usize_to_f64(rail) + self.label_width / 2.0
    }

    /// Vertical position of a row boundary in a ladder with `rows` rows.
    #[must_use]
    pub fn y_for_boundary(&self, boundary: usize, rows: usize) -> f64 {
        if boundary == 0 {
            return self.top;
        }
        if boundary > rows {
            return self.bottom;
        }
        self.top + usize_to_f64(boundary) * (self.bottom - self.top) / usize_to_f64(rows + 1)
    }

    #[must_use]
    pub fn canvas_width(&self, columns: usize) -> f64 {
        (self.label_width * usize_to_f64(columns)).max(1.0)
    }

    #[must_use]
    pub fn project(&self, waypoints: &[Waypoint], rows: usize) -> Vec<Point> {
        waypoints
            .iter()
            .map(|point| Point {
                x: self.x_for_rail(point.rail),
                y: self.y_for_boundary(point.boundary, rows),
            })
            .collect()
    }
}

/// Total length of the polyline through `points`.
#[must_use]
pub fn path_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|pair| (pair[1].x - pair[0].x).hypot(pair[1].y - pair[0].y))
        .sum()
}

/// Fraction of a highlighted path drawn `elapsed_ms` after it was picked.
///
/// With reduced motion the whole path is shown at once.
#[must_use]
pub fn trace_progress(elapsed_ms: f64, reduced_motion: bool) -> f64 {
    if reduced_motion {
        return 1.0;
    }
    ease_out_cubic(progress(elapsed_ms, TRACE_ANIMATION_MS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::Ladder;

    #[test]
    fn rails_are_centred_in_label_columns() {
        let layout = LadderLayout::default();
        assert!((layout.x_for_rail(0) - 28.0).abs() < f64::EPSILON);
        assert!((layout.x_for_rail(2) - 140.0).abs() < f64::EPSILON);
        assert!((layout.canvas_width(3) - 168.0).abs() < f64::EPSILON);
        assert!((layout.canvas_width(0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rows_are_spaced_evenly() {
        let layout = LadderLayout::default();
        // 7 rows: 176 px split into 8 bands of 22 px.
        assert!((layout.y_for_boundary(0, 7) - 24.0).abs() < f64::EPSILON);
        assert!((layout.y_for_boundary(1, 7) - 46.0).abs() < 1e-9);
        assert!((layout.y_for_boundary(8, 7) - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn projected_trace_length_counts_rungs() {
        let layout = LadderLayout::default();
        let ladder = Ladder::from_rungs(2, vec![vec![true]]).unwrap();
        let points = layout.project(&ladder.trace(0).unwrap(), ladder.rows());
        // Vertical drop of 176 px plus one 56 px rung.
        assert!((path_length(&points) - 232.0).abs() < 1e-9);
        assert!((points.last().unwrap().x - 84.0).abs() < f64::EPSILON);
    }

    #[test]
    fn trace_progress_eases_and_respects_reduced_motion() {
        assert!(trace_progress(0.0, false).abs() < f64::EPSILON);
        assert!((trace_progress(1100.0, false) - 1.0).abs() < f64::EPSILON);
        assert!((trace_progress(550.0, false) - 0.875).abs() < 1e-12);
        assert!((trace_progress(0.0, true) - 1.0).abs() < f64::EPSILON);
    }
}
