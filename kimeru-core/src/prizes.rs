//! Prize names and their placement on ladder bottom slots.
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

use crate::ladder::Mapping;
use crate::shuffle::shuffle_sequence;

/// Bottom-slot labels of one draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrizeAssignment {
    /// One label per bottom rail; slots without a prize carry the loss label.
    pub bottom_labels: Vec<String>,
    /// Top rails chosen to win, in the order they were drawn.
    pub winning_starts: Vec<usize>,
    /// Bottom slots the winning starts reach, ascending.
    pub prize_slots: Vec<usize>,
    pub loss_label: String,
}

impl PrizeAssignment {
    /// Place prizes so that exactly `min(prize_names.len(), columns)` start
    /// rails win.
    ///
    /// Winning start rails are the prefix of a uniform shuffle of all rails;
    /// the `i`-th winner's destination slot receives
    /// `prize_names[i % prize_names.len()]`.
    pub fn assign<S, R>(mapping: &Mapping, prize_names: &[S], loss_label: &str, rng: &mut R) -> Self
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let columns = mapping.len();
        let mut bottom_labels = vec![loss_label.to_string(); columns];
        let winners = prize_names.len().min(columns);
        let starts: Vec<usize> = (0..columns).collect();
        let mut winning_starts = shuffle_sequence(&starts, rng);
        winning_starts.truncate(winners);
        let mut prize_slots = Vec::with_capacity(winners);
        for (winner_idx, &start) in winning_starts.iter().enumerate() {
            let Some(bottom) = mapping.destination(start) else {
                continue;
            };
            let name = prize_names[winner_idx % prize_names.len()].as_ref();
            if let Some(slot) = bottom_labels.get_mut(bottom) {
                *slot = name.to_string();
                prize_slots.push(bottom);
            }
        }
        prize_slots.sort_unstable();
        Self {
            bottom_labels,
            winning_starts,
            prize_slots,
            loss_label: loss_label.to_string(),
        }
    }

    /// Label on bottom slot `bottom`.
    #[must_use]
    pub fn label(&self, bottom: usize) -> Option<&str> {
        self.bottom_labels.get(bottom).map(String::as_str)
    }

    /// Bottom slots holding a prize, in slot order.
    #[must_use]
    pub fn winning_slots(&self) -> Vec<usize> {
        self.prize_slots.clone()
    }

    /// Whether a winning start reaches bottom slot `bottom`.
    ///
    /// Decided by position, so a prize may share its name with the loss label.
    #[must_use]
    pub fn is_prize_slot(&self, bottom: usize) -> bool {
        self.prize_slots.binary_search(&bottom).is_ok()
    }
}

/// Normalize a raw prize list for a ladder with `columns` rails.
///
/// Names are trimmed, blanks dropped and case-insensitive duplicates removed
/// (the first spelling wins). The list is capped at `columns`; when nothing
/// remains the single `default_prize` is used.
#[must_use]
pub fn resolve_prize_names<S>(raw: &[S], columns: usize, default_prize: &str) -> Vec<String>
where
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut names: Vec<String> = raw
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_lowercase()))
        .map(str::to_string)
        .collect();
    names.truncate(columns.max(1));
    if names.is_empty() {
        names.push(default_prize.to_string());
    }
    names
}
