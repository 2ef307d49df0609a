//! Column compaction and refill.
//!
//! After matched gems are removed, every touched column is packed toward
//! row 0 and the vacated top cells are filled with new random gems.

use std::collections::VecDeque;

use crate::board::Board;
use crate::gem::{GemId, GemType, Pos};
use crate::rng::GemSource;

/// A gem that fell from `from` to `to`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Moved {
    /// Gem that fell
    pub id: GemId,
    /// Cell it left
    pub from: Pos,
    /// Cell it landed in
    pub to: Pos,
}

/// A gem created by refill.
///
/// `spawn` is the off-board cell it appears at before falling into `pos`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Created {
    /// New gem's identity
    pub id: GemId,
    /// Its type
    pub kind: GemType,
    /// Cell it settles in
    pub pos: Pos,
    /// Position above the board it falls from
    pub spawn: Pos,
}

/// Distinct columns of `cells`, ascending.
pub fn touched_columns(cells: &[Pos]) -> Vec<usize> {
    let mut cols: Vec<usize> = cells.iter().map(|&(c, _)| c).collect();
    cols.sort_unstable();
    cols.dedup();
    cols
}

/// Pack the gems of each column in `columns` toward row 0.
///
/// Walks the column bottom-up keeping a queue of empty rows; each gem met
/// while the queue is non-empty drops into the oldest empty row and leaves
/// its own row queued. Relative order within the column is kept.
pub fn compact_columns(board: &mut Board, columns: &[usize]) -> Vec<Moved> {
    let mut moved = Vec::new();
    let mut empty_rows = VecDeque::new();
    for &col in columns {
        empty_rows.clear();
        for row in 0..board.height() {
            let from = (col, row);
            if board.get(from).is_none() {
                empty_rows.push_back(row);
                continue;
            }
            let Some(target) = empty_rows.pop_front() else {
                continue;
            };
            let to = (col, target);
            if let Some(id) = board.relocate(from, to) {
                moved.push(Moved { id, from, to });
            }
            empty_rows.push_back(row);
        }
    }
    moved
}

/// Fill every empty cell of `columns` with a random gem.
///
/// Cells are filled in raster order (row 0 first). No attempt is made to
/// avoid creating matches; those are handled by the next cascade round.
pub fn refill(
    board: &mut Board,
    columns: &[usize],
    source: &mut impl GemSource,
    spawn_height: usize,
) -> Vec<Created> {
    let mut created = Vec::new();
    for row in 0..board.height() {
        for &col in columns {
            let pos = (col, row);
            if board.get(pos).is_some() {
                continue;
            }
            let kind = source.next_gem_type();
            let id = board.spawn(pos, kind);
            created.push(Created {
                id,
                kind,
                pos,
                spawn: (col, row + spawn_height),
            });
        }
    }
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    #[test]
    fn test_touched_columns_dedup_sorted() {
        assert_eq!(touched_columns(&[(3, 0), (1, 2), (3, 1), (0, 0)]), vec![0, 1, 3]);
    }

    #[test]
    fn test_compact_single_gap() {
        let mut board = Board::from_rows(&[
            "C",
            "B",
            ".",
            "A",
        ])
        .unwrap();
        let b = board.get((0, 2)).unwrap().id();
        let moved = compact_columns(&mut board, &[0]);
        assert_eq!(moved.len(), 2);
        assert_eq!(moved[0], Moved { id: b, from: (0, 2), to: (0, 1) });
        assert_eq!(board.to_string(), ". \nC \nB \nA \n");
    }

    #[test]
    fn test_compact_preserves_order_and_shift() {
        // Three removed at the bottom: everything above drops by exactly three.
        let mut board = Board::from_rows(&[
            "D",
            "C",
            "B",
            ".",
            ".",
            ".",
        ])
        .unwrap();
        let moved = compact_columns(&mut board, &[0]);
        assert_eq!(moved.len(), 3);
        for m in &moved {
            assert_eq!(m.from.1 - m.to.1, 3);
        }
        assert_eq!(board.kind_at((0, 0)), Some(GemType::Pink));
        assert_eq!(board.kind_at((0, 1)), Some(GemType::Yellow));
        assert_eq!(board.kind_at((0, 2)), Some(GemType::Blue));
        assert!(board.get((0, 3)).is_none());
    }

    #[test]
    fn test_compact_interleaved_gaps() {
        let mut board = Board::from_rows(&[
            "A",
            ".",
            "B",
            ".",
            "C",
            ".",
        ])
        .unwrap();
        compact_columns(&mut board, &[0]);
        assert_eq!(board.to_string(), ". \n. \n. \nA \nB \nC \n");
        for row in 0..3 {
            assert_eq!(board.get((0, row)).unwrap().pos(), (0, row));
        }
    }

    #[test]
    fn test_compact_leaves_other_columns() {
        let mut board = Board::from_rows(&[
            "AB",
            ".C",
        ])
        .unwrap();
        let moved = compact_columns(&mut board, &[1]);
        assert!(moved.is_empty());
        assert!(board.get((0, 0)).is_none());
    }

    #[test]
    fn test_refill_fills_only_touched_columns() {
        let mut board = Board::from_rows(&[
            "..",
            "..",
        ])
        .unwrap();
        let mut src = ScriptedSource::new(vec![GemType::Blue, GemType::Green], 5).unwrap();
        let created = refill(&mut board, &[1], &mut src, 2);
        assert_eq!(created.len(), 2);
        assert_eq!(created[0].pos, (1, 0));
        assert_eq!(created[0].spawn, (1, 2));
        assert_eq!(created[0].kind, GemType::Blue);
        assert_eq!(created[1].kind, GemType::Green);
        assert!(board.get((0, 0)).is_none());
        assert_eq!(board.kind_at((1, 1)), Some(GemType::Green));
    }
}
