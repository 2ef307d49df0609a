//! The gem grid.
//!
//! [`Board`] owns every gem and is the only place that indexes the cell
//! storage. Other modules go through [`Board::get`], [`Board::set`] and
//! [`Board::in_bounds`]; reads outside the board simply return `None`.

use std::fmt;

use tracing::trace;

use crate::config::{validate_dimensions, validate_gem_types};
use crate::constants::EMPTY;
use crate::error::{Error, Result};
use crate::gem::{Gem, GemId, GemType, Pos};
use crate::rng::GemSource;

#[derive(Clone, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<Gem>>,
    next_id: u32,
}

impl Board {
    /// Create an empty board.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        validate_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![None; width * height],
            next_id: 0,
        })
    }

    /// Create a fully populated board with no adjacent equal gems.
    ///
    /// Every cell is filled from `source`, then pre-match resolution
    /// rewrites the types of cells that touch an equal neighbor.
    pub fn generate(width: usize, height: usize, source: &mut impl GemSource) -> Result<Self> {
        validate_gem_types(source.gem_type_count())?;
        let mut board = Self::new(width, height)?;
        for pos in board.positions() {
            let kind = source.next_gem_type();
            board.spawn(pos, kind);
        }
        board.resolve_pre_matches(source);
        Ok(board)
    }

    /// Parse a board from rows of gem symbols, top row first.
    ///
    /// Symbols are those of [`GemType::symbol`]; `.` is an empty cell and
    /// whitespace is ignored.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let parsed: Vec<Vec<char>> = rows
            .iter()
            .map(|r| r.chars().filter(|c| !c.is_whitespace()).collect())
            .collect();
        let height = parsed.len();
        let width = parsed.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(Error::InvalidLayout {
                reason: "layout is empty".to_string(),
            });
        }
        if let Some(bad) = parsed.iter().find(|r| r.len() != width) {
            return Err(Error::InvalidLayout {
                reason: format!("row of length {} in a board of width {width}", bad.len()),
            });
        }

        let mut board = Self::new(width, height)?;
        for row in 0..height {
            let line = &parsed[height - 1 - row];
            for (col, &ch) in line.iter().enumerate() {
                if ch == EMPTY {
                    continue;
                }
                let kind = GemType::from_symbol(ch).ok_or_else(|| Error::InvalidLayout {
                    reason: format!("unknown gem symbol '{ch}'"),
                })?;
                board.spawn((col, row), kind);
            }
        }
        Ok(board)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    fn idx(&self, (col, row): Pos) -> usize {
        row * self.width + col
    }

    /// True iff `0 <= col < width` and `0 <= row < height`.
    pub fn in_bounds(&self, (col, row): Pos) -> bool {
        col < self.width && row < self.height
    }

    /// Gem at `pos`, or `None` for an empty or out-of-bounds cell.
    pub fn get(&self, pos: Pos) -> Option<&Gem> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells[self.idx(pos)].as_ref()
    }

    pub(crate) fn get_mut(&mut self, pos: Pos) -> Option<&mut Gem> {
        if !self.in_bounds(pos) {
            return None;
        }
        let i = self.idx(pos);
        self.cells[i].as_mut()
    }

    /// Type of the gem at `pos`, if any.
    pub fn kind_at(&self, pos: Pos) -> Option<GemType> {
        self.get(pos).map(Gem::kind)
    }

    /// Store `gem` (or clear the cell) and return the previous occupant.
    ///
    /// # Panics
    /// If `pos` is off the board or the gem's recorded position is not `pos`.
    pub fn set(&mut self, pos: Pos, gem: Option<Gem>) -> Option<Gem> {
        assert!(self.in_bounds(pos), "set outside the board at {pos:?}");
        if let Some(g) = &gem {
            assert_eq!(g.pos, pos, "gem {} recorded at {:?} stored at {pos:?}", g.id, g.pos);
        }
        let i = self.idx(pos);
        std::mem::replace(&mut self.cells[i], gem)
    }

    /// Remove and return the gem at `pos`.
    pub fn take(&mut self, pos: Pos) -> Option<Gem> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.set(pos, None)
    }

    /// Create a gem of `kind` at `pos` with a fresh id.
    pub(crate) fn spawn(&mut self, pos: Pos, kind: GemType) -> GemId {
        let id = GemId(self.next_id);
        self.next_id += 1;
        self.set(pos, Some(Gem::new(id, kind, pos)));
        id
    }

    /// Move the gem at `from` into the empty cell `to`, updating its position.
    pub(crate) fn relocate(&mut self, from: Pos, to: Pos) -> Option<GemId> {
        debug_assert!(self.get(to).is_none(), "relocate into occupied cell {to:?}");
        let mut gem = self.take(from)?;
        gem.pos = to;
        let id = gem.id;
        self.set(to, Some(gem));
        Some(id)
    }

    /// Exchange the contents of two cells, updating recorded positions.
    pub(crate) fn exchange(&mut self, a: Pos, b: Pos) {
        let mut ga = self.take(a);
        let mut gb = self.take(b);
        if let Some(g) = ga.as_mut() {
            g.pos = b;
        }
        if let Some(g) = gb.as_mut() {
            g.pos = a;
        }
        self.set(a, gb);
        self.set(b, ga);
    }

    /// In-bounds cell one step from `pos` by `(dc, dr)`.
    pub fn offset(&self, (col, row): Pos, dc: isize, dr: isize) -> Option<Pos> {
        let c = col.checked_add_signed(dc)?;
        let r = row.checked_add_signed(dr)?;
        self.in_bounds((c, r)).then_some((c, r))
    }

    /// Orthogonal neighbors of `pos` (up, down, left, right) that lie on the board.
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        [(0, 1), (0, -1), (-1, 0), (1, 0)]
            .into_iter()
            .filter_map(move |(dc, dr)| self.offset(pos, dc, dr))
    }

    /// Every cell in raster order: row 0 first, left to right.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |row| (0..w).map(move |col| (col, row)))
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// True if every cell holds a gem.
    pub fn is_full(&self) -> bool {
        self.occupied() == self.width * self.height
    }

    /// Make every gem differ from its four neighbors.
    ///
    /// Cells are visited in raster order. A cell that equals any neighbor is
    /// re-rolled uniformly among the types no neighbor has. With only three
    /// types all of them can be taken; the cell then avoids just its settled
    /// neighbors (left and below) and the later neighbor is fixed in its turn.
    pub(crate) fn resolve_pre_matches(&mut self, source: &mut impl GemSource) {
        let types = GemType::in_play(source.gem_type_count());
        for pos in self.positions() {
            let Some(kind) = self.kind_at(pos) else {
                continue;
            };
            let around: Vec<GemType> =
                self.neighbors(pos).filter_map(|p| self.kind_at(p)).collect();
            if !around.contains(&kind) {
                continue;
            }

            let mut free: Vec<GemType> =
                types.iter().copied().filter(|t| !around.contains(t)).collect();
            if free.is_empty() {
                let settled: Vec<GemType> = [self.offset(pos, -1, 0), self.offset(pos, 0, -1)]
                    .into_iter()
                    .flatten()
                    .filter_map(|p| self.kind_at(p))
                    .collect();
                free = types.iter().copied().filter(|t| !settled.contains(t)).collect();
            }
            let replacement = source.pick(&free);
            trace!(?pos, from = %kind, to = %replacement, "pre-match re-roll");
            if let Some(gem) = self.get_mut(pos) {
                gem.kind = replacement;
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.height).rev() {
            for col in 0..self.width {
                let ch = self.kind_at((col, row)).map_or(EMPTY, GemType::symbol);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;

    #[test]
    fn test_in_bounds() {
        let board = Board::new(4, 3).unwrap();
        assert!(board.in_bounds((0, 0)));
        assert!(board.in_bounds((3, 2)));
        assert!(!board.in_bounds((4, 0)));
        assert!(!board.in_bounds((0, 3)));
    }

    #[test]
    fn test_out_of_bounds_reads_are_empty() {
        let board = Board::from_rows(&["AB", "BA"]).unwrap();
        assert!(board.get((2, 0)).is_none());
        assert!(board.get((0, 9)).is_none());
        assert_eq!(board.offset((0, 0), -1, 0), None);
    }

    #[test]
    fn test_from_rows_top_row_first() {
        let board = Board::from_rows(&["C..", "ABD"]).unwrap();
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 2);
        assert_eq!(board.kind_at((0, 0)), Some(GemType::Purple));
        assert_eq!(board.kind_at((2, 0)), Some(GemType::Blue));
        assert_eq!(board.kind_at((0, 1)), Some(GemType::Yellow));
        assert_eq!(board.kind_at((1, 1)), None);
        assert_eq!(board.occupied(), 4);
    }

    #[test]
    fn test_from_rows_rejects_ragged_and_unknown() {
        assert!(matches!(
            Board::from_rows(&["AB", "A"]),
            Err(Error::InvalidLayout { .. })
        ));
        assert!(matches!(
            Board::from_rows(&["AZ"]),
            Err(Error::InvalidLayout { .. })
        ));
        assert!(matches!(Board::from_rows(&[]), Err(Error::InvalidLayout { .. })));
    }

    #[test]
    fn test_display_top_row_first() {
        let rows = ["A B C", "C . A"];
        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.to_string(), "A B C \nC . A \n");
    }

    #[test]
    fn test_exchange_updates_positions() {
        let mut board = Board::from_rows(&["AB"]).unwrap();
        let a = board.get((0, 0)).unwrap().id();
        board.exchange((0, 0), (1, 0));
        assert_eq!(board.get((1, 0)).unwrap().id(), a);
        assert_eq!(board.get((1, 0)).unwrap().pos(), (1, 0));
        assert_eq!(board.kind_at((0, 0)), Some(GemType::Pink));
    }

    #[test]
    fn test_relocate_moves_gem() {
        let mut board = Board::from_rows(&["A", "."]).unwrap();
        let id = board.relocate((0, 1), (0, 0));
        assert!(id.is_some());
        assert!(board.get((0, 1)).is_none());
        assert_eq!(board.get((0, 0)).unwrap().pos(), (0, 0));
    }

    #[test]
    #[should_panic]
    fn test_set_rejects_position_mismatch() {
        let mut board = Board::new(2, 2).unwrap();
        let gem = Gem::new(GemId(0), GemType::Purple, (1, 1));
        board.set((0, 0), Some(gem));
    }

    #[test]
    fn test_neighbors_at_corner() {
        let board = Board::new(3, 3).unwrap();
        let mut n: Vec<Pos> = board.neighbors((0, 0)).collect();
        n.sort();
        assert_eq!(n, vec![(0, 1), (1, 0)]);
        assert_eq!(board.neighbors((1, 1)).count(), 4);
    }

    #[test]
    fn test_generate_has_no_equal_neighbors() {
        for seed in 0..20 {
            for types in 3..=5 {
                let mut src = SeededSource::new(seed, types).unwrap();
                let board = Board::generate(9, 7, &mut src).unwrap();
                assert!(board.is_full());
                for pos in board.positions() {
                    let kind = board.kind_at(pos);
                    for n in board.neighbors(pos) {
                        assert_ne!(kind, board.kind_at(n), "seed {seed}: equal at {pos:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_generate_unique_ids() {
        let mut src = SeededSource::new(11, 5).unwrap();
        let board = Board::generate(6, 6, &mut src).unwrap();
        let mut ids: Vec<GemId> = board
            .positions()
            .filter_map(|p| board.get(p).map(Gem::id))
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 36);
    }

    #[test]
    fn test_generate_rejects_two_types() {
        struct TwoTypes;
        impl GemSource for TwoTypes {
            fn gem_type_count(&self) -> usize {
                2
            }
            fn next_uniform(&mut self) -> f64 {
                0.0
            }
        }
        let mut src = TwoTypes;
        assert!(matches!(
            Board::generate(4, 4, &mut src),
            Err(Error::TooFewGemTypes { count: 2 })
        ));
    }
}
