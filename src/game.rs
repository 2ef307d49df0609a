//! Engine facade: the board plus its random source.
//!
//! [`Game`] is what a presentation layer talks to. It creates a quiescent
//! board, answers cell queries and accepts swap requests, returning the
//! round deltas to animate. It never exposes mutable access to the board.

use tracing::info;

use crate::board::Board;
use crate::cascade::Cascade;
use crate::config::{BoardConfig, validate_gem_types};
use crate::error::{Error, Result};
use crate::gem::{GemDescriptor, Pos};
use crate::matching::is_quiescent;
use crate::rng::{GemSource, SeededSource};
use crate::swap::{SwapOutcome, try_swap, try_swap_stepwise};

/// A board, the source that refills it and the current selection.
pub struct Game<S: GemSource = SeededSource> {
    board: Board,
    source: S,
    spawn_height: usize,
    selected: Option<Pos>,
}

/// Create a seeded, quiescent board of the given size.
pub fn new_board(width: usize, height: usize, gem_types: usize, seed: u64) -> Result<Game> {
    Game::new(&BoardConfig::new(width, height, gem_types, seed))
}

impl Game<SeededSource> {
    /// Build a quiescent random board from `config`.
    pub fn new(config: &BoardConfig) -> Result<Self> {
        config.validate()?;
        let mut source = SeededSource::new(config.seed, config.gem_types)?;
        let board = Board::generate(config.width, config.height, &mut source)?;
        info!(
            width = config.width,
            height = config.height,
            gem_types = config.gem_types,
            seed = config.seed,
            "board created"
        );
        Ok(Self {
            board,
            source,
            spawn_height: config.spawn_height,
            selected: None,
        })
    }
}

impl<S: GemSource> Game<S> {
    /// Wrap an existing board, e.g. one parsed with [`Board::from_rows`].
    ///
    /// The board must be full, use only the source's gem types and already
    /// be quiescent.
    pub fn from_board(board: Board, source: S, spawn_height: usize) -> Result<Self> {
        let gem_types = source.gem_type_count();
        validate_gem_types(gem_types)?;
        if !board.is_full() {
            return Err(Error::InvalidLayout {
                reason: "layout has empty cells".to_string(),
            });
        }
        if let Some(kind) = board
            .positions()
            .filter_map(|p| board.kind_at(p))
            .find(|k| k.index() >= gem_types)
        {
            let symbol = kind.symbol();
            return Err(Error::InvalidLayout {
                reason: format!("gem '{symbol}' is not among the {gem_types} types in play"),
            });
        }
        if !is_quiescent(&board) {
            return Err(Error::NotQuiescent);
        }
        Ok(Self {
            board,
            source,
            spawn_height,
            selected: None,
        })
    }

    /// Read-only view of the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.board.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.board.height()
    }

    /// Snapshot of the gem at `pos`; `None` for empty or off-board cells.
    pub fn gem_at(&self, pos: Pos) -> Option<GemDescriptor> {
        self.board.get(pos).map(|g| g.descriptor())
    }

    /// Try to swap two adjacent gems, resolving the full cascade on commit.
    ///
    /// Any selection is cleared first, whatever the outcome.
    pub fn attempt_swap(&mut self, a: Pos, b: Pos) -> Result<SwapOutcome> {
        self.clear_selection();
        try_swap(&mut self.board, &mut self.source, self.spawn_height, a, b)
    }

    /// Like [`Game::attempt_swap`], but hands back the cascade to be played
    /// one round at a time. The game cannot be used again until it is dropped.
    pub fn attempt_swap_stepwise(&mut self, a: Pos, b: Pos) -> Result<Option<Cascade<'_, S>>> {
        self.clear_selection();
        try_swap_stepwise(&mut self.board, &mut self.source, self.spawn_height, a, b)
    }

    /// Mark the gem at `pos` as selected, replacing any earlier selection.
    ///
    /// Returns false if the cell is empty. Selection never affects matching.
    pub fn select(&mut self, pos: Pos) -> Result<bool> {
        if !self.board.in_bounds(pos) {
            return Err(Error::OutOfBounds {
                col: pos.0,
                row: pos.1,
            });
        }
        self.clear_selection();
        let Some(gem) = self.board.get_mut(pos) else {
            return Ok(false);
        };
        gem.selected = true;
        self.selected = Some(pos);
        Ok(true)
    }

    /// Position of the selected gem, if any.
    pub fn selected(&self) -> Option<Pos> {
        self.selected
    }

    /// Deselect the selected gem, if any.
    pub fn clear_selection(&mut self) {
        if let Some(pos) = self.selected.take() {
            if let Some(gem) = self.board.get_mut(pos) {
                gem.selected = false;
            }
        }
    }
}
