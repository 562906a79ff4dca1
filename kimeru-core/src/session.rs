//! Session state tying the roster, the active mode and the latest results together.
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::PickerConfig;
use crate::draw::AmidakujiDraw;
use crate::error::PickerError;
use crate::ladder::{LadderGenerator, Waypoint};
use crate::rng::{RngStreams, StreamDomain};
use crate::roster::{PrizeAddOutcome, Roster};
use crate::shuffle::shuffle_sequence;
use crate::wheel::{WheelPhase, WheelState};

/// The three ways a session can decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecisionMode {
    #[default]
    Roulette,
    Order,
    Amidakuji,
}

/// One user's picker: candidates, prizes, and whatever was decided last.
///
/// Results are dropped whenever the candidates or prizes change, so a stored
/// order or draw always describes the current roster.
#[derive(Debug, Clone)]
pub struct PickerSession {
    config: PickerConfig,
    generator: LadderGenerator,
    roster: Roster,
    mode: DecisionMode,
    rng: RngStreams,
    order: Option<Vec<String>>,
    draw: Option<AmidakujiDraw>,
    wheel: WheelState,
    reduced_motion: bool,
}

impl PickerSession {
    /// Construct a session with the stock roster.
    #[must_use]
    pub fn new(config: PickerConfig, seed: u64) -> Self {
        let roster = Roster::new(&config.labels.default_prize);
        let generator = LadderGenerator::new(config.ladder.clone(), config.labels.clone());
        Self {
            config,
            generator,
            roster,
            mode: DecisionMode::default(),
            rng: RngStreams::from_user_seed(seed),
            order: None,
            draw: None,
            wheel: WheelState::idle(),
            reduced_motion: false,
        }
    }

    /// Replace the roster, discarding any results.
    #[must_use]
    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self.invalidate();
        self
    }

    #[must_use]
    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub const fn mode(&self) -> DecisionMode {
        self.mode
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub fn order_result(&self) -> Option<&[String]> {
        self.order.as_deref()
    }

    #[must_use]
    pub const fn draw(&self) -> Option<&AmidakujiDraw> {
        self.draw.as_ref()
    }

    #[must_use]
    pub const fn wheel(&self) -> &WheelState {
        &self.wheel
    }

    #[must_use]
    pub const fn rng(&self) -> &RngStreams {
        &self.rng
    }

    pub const fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Switch modes; leaving the roulette halts a moving wheel.
    pub fn set_mode(&mut self, mode: DecisionMode) {
        if mode != DecisionMode::Roulette && self.wheel.is_spinning() {
            self.wheel = self.wheel.halt();
        }
        self.mode = mode;
    }

    /// Deterministically reseed every stream.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = RngStreams::from_user_seed(seed);
    }

    fn require_items(&self, required: usize) -> Result<(), PickerError> {
        let found = self.roster.len();
        if found < required {
            return Err(PickerError::InsufficientItems { found, required });
        }
        Ok(())
    }

    /// Shuffle the candidates into a random order.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InsufficientItems`] with fewer than two candidates.
    pub fn decide_order(&mut self) -> Result<&[String], PickerError> {
        self.require_items(2)?;
        let order = shuffle_sequence(self.roster.items(), self.rng.stream(StreamDomain::Order));
        debug!("decided order of {} items", order.len());
        Ok(self.order.insert(order).as_slice())
    }

    /// Draw a fresh amidakuji for the current candidates and prizes.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InsufficientItems`] with fewer than two candidates.
    pub fn decide_amidakuji(&mut self) -> Result<&AmidakujiDraw, PickerError> {
        self.require_items(2)?;
        let prizes = self.roster.resolved_prizes();
        let draw = self.generator.generate(
            self.roster.len(),
            &prizes,
            self.rng.stream(StreamDomain::Ladder),
        )?;
        Ok(self.draw.insert(draw))
    }

    /// Path of candidate `start` through the current draw.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::NoDraw`] before the first draw and
    /// [`PickerError::RailOutOfRange`] for an unknown candidate.
    pub fn trace(&self, start: usize) -> Result<Vec<Waypoint>, PickerError> {
        self.draw.as_ref().ok_or(PickerError::NoDraw)?.trace(start)
    }

    /// Set the wheel spinning. With reduced motion the result is chosen at once.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InsufficientItems`] when there are no candidates.
    pub fn start_spin(&mut self) -> Result<(), PickerError> {
        self.require_items(1)?;
        if self.wheel.is_spinning() {
            return Ok(());
        }
        if self.reduced_motion {
            let count = self.roster.len();
            let index = self.rng.stream(StreamDomain::Wheel).gen_range(0..count);
            self.wheel = self.wheel.settle(index, count, &self.config.wheel);
            return Ok(());
        }
        self.wheel = self.wheel.begin_spin();
        Ok(())
    }

    /// Choose the winning slice and start slowing down towards it.
    ///
    /// Returns the chosen index, or `None` when the wheel is not spinning.
    pub fn stop_spin(&mut self) -> Option<usize> {
        let count = self.roster.len();
        if count == 0 || !matches!(self.wheel.phase, WheelPhase::Spinning { .. }) {
            return None;
        }
        let index = self.rng.stream(StreamDomain::Wheel).gen_range(0..count);
        self.wheel = if self.reduced_motion {
            self.wheel.settle(index, count, &self.config.wheel)
        } else {
            self.wheel.request_stop(index, count, &self.config.wheel)
        };
        debug!("wheel stopping on slice {index} of {count}");
        Some(index)
    }

    /// Advance the wheel animation to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> &WheelState {
        self.wheel = self.wheel.step(now_ms, &self.config.wheel);
        &self.wheel
    }

    /// Candidate the wheel last landed on.
    #[must_use]
    pub fn selected_item(&self) -> Option<&str> {
        self.wheel
            .selected
            .and_then(|index| self.roster.items().get(index))
            .map(String::as_str)
    }

    /// # Errors
    ///
    /// See [`Roster::add_items`].
    pub fn add_items<S: AsRef<str>>(&mut self, entries: &[S]) -> Result<usize, PickerError> {
        let added = self.roster.add_items(entries)?;
        self.invalidate();
        self.wheel.selected = None;
        Ok(added)
    }

    /// # Errors
    ///
    /// See [`Roster::remove_item`].
    pub fn remove_item(&mut self, index: usize) -> Result<String, PickerError> {
        let removed = self.roster.remove_item(index)?;
        self.wheel.selected = match self.wheel.selected {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
        self.invalidate();
        Ok(removed)
    }

    /// # Errors
    ///
    /// See [`Roster::update_item`].
    pub fn update_item(&mut self, index: usize, value: &str) -> Result<(), PickerError> {
        self.roster.update_item(index, value)?;
        self.invalidate();
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Roster::add_prizes`].
    pub fn add_prizes<S: AsRef<str>>(
        &mut self,
        entries: &[S],
    ) -> Result<PrizeAddOutcome, PickerError> {
        let outcome = self.roster.add_prizes(entries)?;
        self.draw = None;
        Ok(outcome)
    }

    /// # Errors
    ///
    /// See [`Roster::remove_prize`].
    pub fn remove_prize(&mut self, index: usize) -> Result<String, PickerError> {
        let removed = self.roster.remove_prize(index)?;
        self.draw = None;
        Ok(removed)
    }

    /// Back to the stock roster with a motionless wheel and no results.
    pub fn reset(&mut self) {
        self.roster.reset();
        self.invalidate();
        self.wheel = WheelState::idle();
    }

    fn invalidate(&mut self) {
        self.order = None;
        self.draw = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::segment_under_pointer;

    fn session_with(items: &[&str], prizes: &[&str]) -> PickerSession {
        PickerSession::new(PickerConfig::default(), 0xC0FFEE)
            .with_roster(Roster::with_entries(items, prizes, "当たり"))
    }

    #[test]
    fn order_needs_two_items() {
        let mut session = session_with(&["solo"], &[]);
        assert_eq!(
            session.decide_order().unwrap_err(),
            PickerError::InsufficientItems {
                found: 1,
                required: 2
            }
        );
        assert!(session.decide_amidakuji().is_err());
    }

    #[test]
    fn order_is_a_permutation_of_items() {
        let mut session = session_with(&["a", "b", "c", "d"], &[]);
        let mut order = session.decide_order().unwrap().to_vec();
        order.sort();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
        assert!(session.order_result().is_some());
    }

    #[test]
    fn amidakuji_assigns_resolved_prizes() {
        let mut session = session_with(&["a", "b", "c"], &["A", "B"]);
        let draw = session.decide_amidakuji().unwrap();
        let mut winners: Vec<&str> = draw
            .prizes()
            .winning_slots()
            .into_iter()
            .filter_map(|slot| draw.prizes().label(slot))
            .collect();
        winners.sort_unstable();
        assert_eq!(winners, vec!["A", "B"]);
        assert_eq!(session.trace(0).unwrap().first().map(|p| p.rail), Some(0));
    }

    #[test]
    fn edits_discard_results() {
        let mut session = session_with(&["a", "b", "c"], &["A"]);
        session.decide_order().unwrap();
        session.decide_amidakuji().unwrap();
        session.add_items(&["d"]).unwrap();
        assert!(session.order_result().is_none());
        assert!(session.draw().is_none());
        assert_eq!(session.trace(0).unwrap_err(), PickerError::NoDraw);

        session.decide_amidakuji().unwrap();
        session.add_prizes(&["B"]).unwrap();
        assert!(session.draw().is_none());
    }

    #[test]
    fn same_seed_same_draw() {
        let mut first = session_with(&["a", "b", "c", "d", "e"], &["A"]);
        let mut second = session_with(&["a", "b", "c", "d", "e"], &["A"]);
        assert_eq!(
            first.decide_amidakuji().unwrap(),
            second.decide_amidakuji().unwrap()
        );
    }

    #[test]
    fn wheel_spins_and_lands_on_selection() {
        let mut session = session_with(&["a", "b", "c", "d"], &[]);
        session.start_spin().unwrap();
        let mut now = 0.0;
        while now < 1200.0 {
            session.tick(now);
            now += 16.0;
        }
        let index = session.stop_spin().unwrap();
        while session.wheel().is_spinning() {
            session.tick(now);
            now += 16.0;
        }
        assert_eq!(session.wheel().selected, Some(index));
        assert_eq!(segment_under_pointer(session.wheel().rotation_deg, 4), index);
        assert_eq!(session.selected_item(), Some(["a", "b", "c", "d"][index]));
        assert_eq!(session.stop_spin(), None);
    }

    #[test]
    fn reduced_motion_selects_immediately() {
        let mut session = session_with(&["a", "b"], &[]);
        session.set_reduced_motion(true);
        session.start_spin().unwrap();
        assert!(!session.wheel().is_spinning());
        assert!(session.selected_item().is_some());
    }

    #[test]
    fn empty_roster_cannot_spin() {
        let empty: [&str; 0] = [];
        let mut session = session_with(&empty, &[]);
        assert_eq!(
            session.start_spin().unwrap_err(),
            PickerError::InsufficientItems {
                found: 0,
                required: 1
            }
        );
    }

    #[test]
    fn leaving_roulette_halts_wheel() {
        let mut session = session_with(&["a", "b"], &[]);
        session.start_spin().unwrap();
        session.set_mode(DecisionMode::Amidakuji);
        assert!(!session.wheel().is_spinning());
        assert_eq!(session.mode(), DecisionMode::Amidakuji);
    }

    #[test]
    fn removing_items_shifts_selection() {
        let mut session = session_with(&["a", "b", "c"], &[]);
        session.set_reduced_motion(true);
        session.start_spin().unwrap();
        let selected = session.wheel().selected.unwrap();
        let victim = if selected == 0 { 2 } else { 0 };
        session.remove_item(victim).unwrap();
        let expected = if victim < selected { selected - 1 } else { selected };
        assert_eq!(session.wheel().selected, Some(expected));
    }

    #[test]
    fn reset_restores_stock_roster() {
        let mut session = session_with(&["a", "b"], &["x"]);
        session.set_reduced_motion(true);
        session.start_spin().unwrap();
        session.reset();
        assert_eq!(session.roster().len(), 6);
        assert_eq!(session.wheel(), &WheelState::idle());
        assert_eq!(session.roster().prizes(), &["当たり".to_string()]);
    }
}
