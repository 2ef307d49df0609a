//! Cascade resolution.
//!
//! A cascade repeats remove, compact, refill and re-check until a check finds
//! nothing. [`Cascade`] is an iterator that runs one full round per call to
//! `next`, so a caller can play back each round before asking for the next
//! one. Between rounds the board is always consistent: no removed-but-not-yet
//! compacted state is ever visible.
//!
//! The cascade holds the only mutable borrow of the board while it is alive,
//! so no other swap can start until it is finished. Dropping an unfinished
//! cascade plays its remaining rounds, so the board is always left quiescent.

use tracing::debug;

use crate::board::Board;
use crate::gem::Pos;
use crate::gravity::{Created, Moved, compact_columns, refill, touched_columns};
use crate::matching::find_matches_for;
use crate::rng::GemSource;

/// Everything that changed in one cascade round, in the order it happened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundDelta {
    /// Cells whose matched gems were destroyed
    pub removed: Vec<Pos>,
    /// Gems that fell to fill the gaps
    pub moved: Vec<Moved>,
    /// Gems created in the vacated top cells
    pub created: Vec<Created>,
}

impl RoundDelta {
    /// Cells to re-check after this round: every landing cell and every new gem.
    pub fn frontier(&self) -> Vec<Pos> {
        self.moved
            .iter()
            .map(|m| m.to)
            .chain(self.created.iter().map(|c| c.pos))
            .collect()
    }
}

#[derive(Debug)]
enum Phase {
    Checking(Vec<Pos>),
    Removing(Vec<Pos>),
    Compacting,
    Refilling,
    Done,
}

/// Round-by-round cascade over a board.
pub struct Cascade<'a, S: GemSource> {
    board: &'a mut Board,
    source: &'a mut S,
    spawn_height: usize,
    columns: Vec<usize>,
    phase: Phase,
    round: usize,
}

impl<'a, S: GemSource> Cascade<'a, S> {
    /// Start a cascade by checking `frontier` for matches.
    ///
    /// If nothing matches, the cascade is already done and yields no rounds.
    pub fn new(
        board: &'a mut Board,
        source: &'a mut S,
        spawn_height: usize,
        frontier: Vec<Pos>,
    ) -> Self {
        let matched = find_matches_for(board, frontier);
        Self::from_matches(board, source, spawn_height, matched)
    }

    /// Start a cascade whose first round removes `matched`, already flagged.
    pub(crate) fn from_matches(
        board: &'a mut Board,
        source: &'a mut S,
        spawn_height: usize,
        matched: Vec<Pos>,
    ) -> Self {
        let phase = if matched.is_empty() {
            Phase::Done
        } else {
            Phase::Removing(matched)
        };
        Self {
            board,
            source,
            spawn_height,
            columns: Vec::new(),
            phase,
            round: 0,
        }
    }

    /// Rounds completed so far.
    pub fn rounds(&self) -> usize {
        self.round
    }

    /// True once a check found no further matches.
    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// Read-only view of the board between rounds.
    pub fn board(&self) -> &Board {
        &*self.board
    }

    /// Run every remaining round and return them in order.
    pub fn resolve(self) -> Vec<RoundDelta> {
        self.collect()
    }

    fn check(&mut self, frontier: Vec<Pos>) -> Phase {
        let matched = find_matches_for(self.board, frontier);
        if matched.is_empty() {
            Phase::Done
        } else {
            Phase::Removing(matched)
        }
    }

    fn remove(&mut self, matched: &[Pos]) -> Vec<Pos> {
        let mut removed = Vec::with_capacity(matched.len());
        for &pos in matched {
            let flagged = self.board.get(pos).is_some_and(|g| g.is_matched());
            if flagged {
                self.board.take(pos);
                removed.push(pos);
            }
        }
        removed
    }
}

impl<S: GemSource> Iterator for Cascade<'_, S> {
    type Item = RoundDelta;

    fn next(&mut self) -> Option<RoundDelta> {
        let mut delta = RoundDelta::default();
        loop {
            match std::mem::replace(&mut self.phase, Phase::Done) {
                Phase::Done => return None,
                Phase::Removing(matched) => {
                    delta.removed = self.remove(&matched);
                    self.columns = touched_columns(&delta.removed);
                    self.phase = Phase::Compacting;
                }
                Phase::Compacting => {
                    delta.moved = compact_columns(self.board, &self.columns);
                    self.phase = Phase::Refilling;
                }
                Phase::Refilling => {
                    delta.created =
                        refill(self.board, &self.columns, self.source, self.spawn_height);
                    self.phase = Phase::Checking(delta.frontier());
                }
                Phase::Checking(frontier) => {
                    self.phase = self.check(frontier);
                    self.round += 1;
                    debug!(
                        round = self.round,
                        removed = delta.removed.len(),
                        moved = delta.moved.len(),
                        created = delta.created.len(),
                        done = self.is_done(),
                        "cascade round"
                    );
                    return Some(delta);
                }
            }
        }
    }
}

impl<S: GemSource> Drop for Cascade<'_, S> {
    fn drop(&mut self) {
        let mut skipped = 0;
        while self.next().is_some() {
            skipped += 1;
        }
        if skipped > 0 {
            debug!(skipped, "unfinished cascade drained on drop");
        }
    }
}
