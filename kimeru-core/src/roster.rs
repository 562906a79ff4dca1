//! Candidate and prize lists with their editing rules.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::{DEFAULT_ITEMS, DEFAULT_PRIZE_NAME};
use crate::error::PickerError;
use crate::prizes::resolve_prize_names;

/// Split free text on newlines and commas, trimming and dropping blanks.
#[must_use]
pub fn parse_entries(input: &str) -> Vec<String> {
    input
        .split(['\n', ','])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Result of adding prize names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrizeAddOutcome {
    pub added: usize,
    /// Some new names were dropped because every item already has a prize.
    pub limit_reached: bool,
}

/// Candidates to decide between and the prizes an amidakuji hands out.
///
/// Both lists are unique ignoring case, and there are never more prizes than
/// candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    items: Vec<String>,
    prizes: Vec<String>,
    default_prize: String,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(DEFAULT_PRIZE_NAME)
    }
}

impl Roster {
    /// The stock candidate list with a single default prize.
    #[must_use]
    pub fn new(default_prize: &str) -> Self {
        Self {
            items: DEFAULT_ITEMS.iter().map(|item| (*item).to_string()).collect(),
            prizes: vec![default_prize.to_string()],
            default_prize: default_prize.to_string(),
        }
    }

    /// A roster holding exactly `items` (deduplicated) and `prizes`.
    #[must_use]
    pub fn with_entries<S: AsRef<str>>(items: &[S], prizes: &[S], default_prize: &str) -> Self {
        let mut roster = Self {
            items: Vec::new(),
            prizes: Vec::new(),
            default_prize: default_prize.to_string(),
        };
        roster.items = dedupe(items.iter().map(|item| item.as_ref()), &[]);
        roster.prizes = dedupe(prizes.iter().map(|prize| prize.as_ref()), &[]);
        roster.prizes.truncate(roster.items.len());
        roster
    }

    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn prizes(&self) -> &[String] {
        &self.prizes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Prize names to draw with, falling back to the default prize.
    #[must_use]
    pub fn resolved_prizes(&self) -> Vec<String> {
        resolve_prize_names(&self.prizes, self.items.len(), &self.default_prize)
    }

    /// Append new candidates, skipping case-insensitive duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::NothingToAdd`] when `entries` holds no text.
    pub fn add_items<S: AsRef<str>>(&mut self, entries: &[S]) -> Result<usize, PickerError> {
        let cleaned = clean(entries);
        if cleaned.is_empty() {
            return Err(PickerError::NothingToAdd);
        }
        let fresh = dedupe(cleaned.iter().map(String::as_str), &self.items);
        let added = fresh.len();
        self.items.extend(fresh);
        Ok(added)
    }

    /// Append prize names while there are fewer prizes than candidates.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::NothingToAdd`] when `entries` holds no text.
    pub fn add_prizes<S: AsRef<str>>(
        &mut self,
        entries: &[S],
    ) -> Result<PrizeAddOutcome, PickerError> {
        let cleaned = clean(entries);
        if cleaned.is_empty() {
            return Err(PickerError::NothingToAdd);
        }
        let fresh = dedupe(cleaned.iter().map(String::as_str), &self.prizes);
        let room = self.items.len().saturating_sub(self.prizes.len());
        let limit_reached = fresh.len() > room;
        let added = fresh.len().min(room);
        self.prizes.extend(fresh.into_iter().take(room));
        Ok(PrizeAddOutcome {
            added,
            limit_reached,
        })
    }

    /// Remove candidate `index`, trimming prizes to the shorter list.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::IndexOutOfRange`] for an unknown index.
    pub fn remove_item(&mut self, index: usize) -> Result<String, PickerError> {
        if index >= self.items.len() {
            return Err(PickerError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.prizes.truncate(self.items.len());
        Ok(removed)
    }

    /// Rename candidate `index`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown index, a blank value, or a name another
    /// candidate already uses.
    pub fn update_item(&mut self, index: usize, value: &str) -> Result<(), PickerError> {
        let len = self.items.len();
        if index >= len {
            return Err(PickerError::IndexOutOfRange { index, len });
        }
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(PickerError::EmptyEntry);
        }
        let key = trimmed.to_lowercase();
        let clash = self
            .items
            .iter()
            .enumerate()
            .any(|(idx, item)| idx != index && item.to_lowercase() == key);
        if clash {
            return Err(PickerError::DuplicateEntry(trimmed.to_string()));
        }
        self.items[index] = trimmed.to_string();
        Ok(())
    }

    /// Remove prize `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::IndexOutOfRange`] for an unknown index.
    pub fn remove_prize(&mut self, index: usize) -> Result<String, PickerError> {
        if index >= self.prizes.len() {
            return Err(PickerError::IndexOutOfRange {
                index,
                len: self.prizes.len(),
            });
        }
        Ok(self.prizes.remove(index))
    }

    /// Restore the stock candidates and the single default prize.
    pub fn reset(&mut self) {
        *self = Self::new(&self.default_prize);
    }
}

fn clean<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.as_ref().trim())
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn dedupe<'a>(candidates: impl Iterator<Item = &'a str>, existing: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = existing.iter().map(|item| item.to_lowercase()).collect();
    candidates
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter(|entry| seen.insert(entry.to_lowercase()))
        .map(str::to_string)
        .collect()
}
