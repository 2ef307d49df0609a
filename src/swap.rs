//! Swap validation, commit and rollback.

use tracing::debug;

use crate::board::Board;
use crate::cascade::{Cascade, RoundDelta};
use crate::config::validate_gem_types;
use crate::error::{Error, Result};
use crate::gem::Pos;
use crate::matching::find_matches_for;
use crate::rng::GemSource;

/// Result of a valid swap request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    /// No match formed; the two gems were swapped back.
    Rejected,
    /// A match formed; `rounds` holds every cascade round in order.
    Committed { rounds: Vec<RoundDelta> },
}

impl SwapOutcome {
    /// True if the swap stuck and a cascade ran.
    pub fn is_committed(&self) -> bool {
        matches!(self, SwapOutcome::Committed { .. })
    }
}

/// Orthogonal neighbors: Manhattan distance exactly 1.
pub fn is_adjacent(a: Pos, b: Pos) -> bool {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
}

/// Check a swap request without touching the board.
pub fn validate_swap(board: &Board, a: Pos, b: Pos) -> Result<()> {
    for (col, row) in [a, b] {
        if !board.in_bounds((col, row)) {
            return Err(Error::OutOfBounds { col, row });
        }
    }
    if !is_adjacent(a, b) {
        return Err(Error::NotAdjacent { a, b });
    }
    for (col, row) in [a, b] {
        if board.get((col, row)).is_none() {
            return Err(Error::EmptyCellSwap { col, row });
        }
    }
    Ok(())
}

/// Swap `a` and `b` and return the cascade to play, if the swap sticks.
///
/// The gems are exchanged and both cells checked for matches. Without a
/// match the exchange is undone and `Ok(None)` is returned; the board is
/// then identical to before the call. Invalid requests fail before any
/// change, as do sources reporting an unsupported number of gem types.
pub fn try_swap_stepwise<'a, S: GemSource>(
    board: &'a mut Board,
    source: &'a mut S,
    spawn_height: usize,
    a: Pos,
    b: Pos,
) -> Result<Option<Cascade<'a, S>>> {
    validate_swap(board, a, b)?;
    validate_gem_types(source.gem_type_count())?;

    board.exchange(a, b);
    let matched = find_matches_for(board, [a, b]);
    if matched.is_empty() {
        board.exchange(a, b);
        debug!(?a, ?b, "swap rejected");
        return Ok(None);
    }

    debug!(?a, ?b, matched = matched.len(), "swap committed");
    Ok(Some(Cascade::from_matches(board, source, spawn_height, matched)))
}

/// Swap `a` and `b`, running the whole cascade on commit.
pub fn try_swap<S: GemSource>(
    board: &mut Board,
    source: &mut S,
    spawn_height: usize,
    a: Pos,
    b: Pos,
) -> Result<SwapOutcome> {
    let outcome = match try_swap_stepwise(board, source, spawn_height, a, b)? {
        None => SwapOutcome::Rejected,
        Some(cascade) => SwapOutcome::Committed {
            rounds: cascade.resolve(),
        },
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;

    fn board() -> Board {
        Board::from_rows(&[
            "CBC",
            "BAC",
            "AB.",
        ])
        .unwrap()
    }

    #[test]
    fn test_is_adjacent() {
        assert!(is_adjacent((1, 1), (1, 2)));
        assert!(is_adjacent((1, 1), (0, 1)));
        assert!(!is_adjacent((1, 1), (1, 1)));
        assert!(!is_adjacent((1, 1), (2, 2)));
        assert!(!is_adjacent((0, 0), (0, 2)));
    }

    #[test]
    fn test_validate_errors() {
        let b = board();
        assert_eq!(
            validate_swap(&b, (0, 0), (3, 0)),
            Err(Error::OutOfBounds { col: 3, row: 0 })
        );
        assert_eq!(
            validate_swap(&b, (0, 0), (1, 1)),
            Err(Error::NotAdjacent { a: (0, 0), b: (1, 1) })
        );
        assert_eq!(
            validate_swap(&b, (1, 0), (2, 0)),
            Err(Error::EmptyCellSwap { col: 2, row: 0 })
        );
        assert!(validate_swap(&b, (0, 0), (1, 0)).is_ok());
    }

    #[test]
    fn test_rejected_swap_restores_board() {
        let mut b = board();
        let before = b.to_string();
        let id = b.get((0, 0)).unwrap().id();
        let mut src = SeededSource::new(5, 3).unwrap();
        let outcome = try_swap(&mut b, &mut src, 3, (0, 0), (0, 1)).unwrap();
        assert_eq!(outcome, SwapOutcome::Rejected);
        assert_eq!(b.to_string(), before);
        assert_eq!(b.get((0, 0)).unwrap().id(), id);
        assert_eq!(b.get((0, 0)).unwrap().pos(), (0, 0));
    }

    #[test]
    fn test_invalid_swap_leaves_board() {
        let mut b = board();
        let before = b.to_string();
        let mut src = SeededSource::new(5, 3).unwrap();
        assert!(try_swap(&mut b, &mut src, 3, (0, 0), (2, 2)).is_err());
        assert_eq!(b.to_string(), before);
    }

    #[test]
    fn test_committed_swap_removes_column() {
        let mut b = Board::from_rows(&[
            "ABA",
            "CAB",
            "BCA",
        ])
        .unwrap();
        // A moves right into column 2, completing A A A.
        let mut src = SeededSource::new(9, 3).unwrap();
        let outcome = try_swap(&mut b, &mut src, 3, (1, 1), (2, 1)).unwrap();
        let SwapOutcome::Committed { rounds } = outcome else {
            panic!("expected commit");
        };
        let mut first = rounds[0].removed.clone();
        first.sort();
        assert_eq!(first, vec![(2, 0), (2, 1), (2, 2)]);
        assert_eq!(b.kind_at((1, 1)), Some(crate::gem::GemType::Pink));
        assert!(b.is_full());
    }

    #[test]
    fn test_unsupported_source_is_rejected_before_swap() {
        struct SixTypes(fastrand::Rng);
        impl GemSource for SixTypes {
            fn gem_type_count(&self) -> usize {
                6
            }
            fn next_uniform(&mut self) -> f64 {
                self.0.f64()
            }
        }
        let mut b = Board::from_rows(&[
            "ABA",
            "CAB",
            "BCA",
        ])
        .unwrap();
        let before = b.to_string();
        let mut src = SixTypes(fastrand::Rng::with_seed(0));
        assert_eq!(
            try_swap(&mut b, &mut src, 3, (1, 1), (2, 1)),
            Err(Error::TooManyGemTypes { count: 6 })
        );
        assert_eq!(b.to_string(), before);
    }
}
