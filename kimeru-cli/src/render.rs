//! Plain-text ladder drawing.
use std::collections::HashSet;

use kimeru_core::{Ladder, Waypoint};

const CELL_WIDTH: usize = 6;

fn fit_label(label: &str) -> String {
    let shown: String = label.chars().take(CELL_WIDTH - 1).collect();
    let pad = CELL_WIDTH - shown.chars().count();
    format!("{shown}{}", " ".repeat(pad))
}

fn label_line<S: AsRef<str>>(labels: &[S], columns: usize) -> String {
    (0..columns)
        .map(|rail| fit_label(labels.get(rail).map_or("", |label| label.as_ref())))
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Rails and rungs touched by a traced path, keyed by row.
#[derive(Debug, Default)]
struct Highlight {
    rails: HashSet<(usize, usize)>,
    rungs: HashSet<(usize, usize)>,
}

impl Highlight {
    fn from_path(path: &[Waypoint], rows: usize) -> Self {
        let mut highlight = Self::default();
        for boundary in 1..=rows {
            let row = boundary - 1;
            let on_line: Vec<usize> = path
                .iter()
                .filter(|point| point.boundary == boundary)
                .map(|point| point.rail)
                .collect();
            for rail in &on_line {
                highlight.rails.insert((row, *rail));
            }
            if let [from, to] = on_line[..] {
                highlight.rungs.insert((row, from.min(to)));
            }
        }
        highlight
    }
}

/// Draw `ladder` with candidate names on top and slot labels underneath.
///
/// When `path` is given the rails it runs down are drawn with `#` and the
/// rungs it crosses with `=`.
pub fn render_ladder<S, T>(
    ladder: &Ladder,
    top_labels: &[S],
    bottom_labels: &[T],
    path: Option<&[Waypoint]>,
) -> String
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let columns = ladder.columns();
    let highlight = path
        .map(|path| Highlight::from_path(path, ladder.rows()))
        .unwrap_or_default();
    let mut lines = vec![label_line(top_labels, columns)];

    for row in 0..ladder.rows() {
        let mut line = String::new();
        for rail in 0..columns {
            line.push(if highlight.rails.contains(&(row, rail)) {
                '#'
            } else {
                '|'
            });
            if rail + 1 == columns {
                break;
            }
            let fill = if highlight.rungs.contains(&(row, rail)) {
                "="
            } else if ladder.has_rung(row, rail) {
                "-"
            } else {
                " "
            };
            line.push_str(&fill.repeat(CELL_WIDTH - 1));
        }
        lines.push(line);
    }

    lines.push(label_line(bottom_labels, columns));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap_ladder() -> Ladder {
        Ladder::from_rungs(3, vec![vec![true, false], vec![false, false]]).unwrap()
    }

    #[test]
    fn draws_rungs_between_rails() {
        let text = render_ladder(&swap_ladder(), &["a", "b", "c"], &["x", "y", "z"], None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "a     b     c");
        assert_eq!(lines[1], "|-----|     |");
        assert_eq!(lines[2], "|     |     |");
        assert_eq!(lines[3], "x     y     z");
    }

    #[test]
    fn highlights_traced_path() {
        let ladder = swap_ladder();
        let path = ladder.trace(0).unwrap();
        let text = render_ladder(&ladder, &["a", "b", "c"], &["x", "y", "z"], Some(&path));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "#=====#     |");
        assert_eq!(lines[2], "|     #     |");
    }

    #[test]
    fn long_labels_are_clipped() {
        let text = render_ladder(&swap_ladder(), &["abcdefgh", "b", "c"], &["", "", ""], None);
        assert!(text.starts_with("abcde b"));
    }
}
