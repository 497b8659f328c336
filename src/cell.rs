use crate::rule_set::RuleSet;
use crate::rule_set::B3S23;

/// A single cell of a [`Grid`](crate::grid::Grid).
///
/// A cell carries its current state and, between [`Cell::stage_next_state`] and
/// [`Cell::commit`], the state it will take in the next generation. A generation stages every
/// cell of the grid before committing any of them; committing early would let neighbors read
/// post-update states.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    alive: bool,

    /// Staged next state. Cleared by `commit`.
    pending: Option<bool>,
}

impl Cell {
    /// A dead cell with nothing staged.
    pub const fn dead() -> Self {
        Self {
            alive: false,
            pending: None,
        }
    }

    pub const fn alive() -> Self {
        Self {
            alive: true,
            pending: None,
        }
    }

    /// Flip the current state. Whatever was staged is left alone.
    pub fn invert(&mut self) {
        self.alive = !self.alive;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    /// Stage the next state under Conway's rule (B3/S23).
    ///
    /// Does not touch the current state. Staging twice with the same count stages the same
    /// value: the result only depends on the current state and `live_neighbors`.
    pub fn stage_next_state(&mut self, live_neighbors: u8) {
        self.stage_next_state_with(live_neighbors, &B3S23);
    }

    /// Like [`Cell::stage_next_state`], for an arbitrary Life-like rule.
    pub fn stage_next_state_with(&mut self, live_neighbors: u8, rules: &RuleSet) {
        self.pending = Some(rules.next_state(self.alive, live_neighbors));
    }

    /// The staged next state, if any.
    pub fn pending(&self) -> Option<bool> {
        self.pending
    }

    /// Move the staged state into the current one. Without a staged state this is a no-op.
    pub fn commit(&mut self) {
        if let Some(next) = self.pending.take() {
            self.alive = next;
        }
    }
}
