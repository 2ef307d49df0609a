//! Match detection.
//!
//! A match is found from an origin cell by walking each axis in both
//! directions while the gem type stays equal. An axis qualifies when the
//! origin plus its run reaches [`MIN_MATCH`]; the origin's match is the union
//! of every qualifying axis, so L, T and plus shapes come out as one match.

use tracing::trace;

use crate::board::Board;
use crate::constants::MIN_MATCH;
use crate::gem::Pos;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Axis {
    fn step(self, dir: Direction) -> (isize, isize) {
        let d = match dir {
            Direction::Positive => 1,
            Direction::Negative => -1,
        };
        match self {
            Axis::Vertical => (0, d),
            Axis::Horizontal => (d, 0),
        }
    }
}

/// Cells equal in type to `origin`, walking from it along `axis` in `dir`.
///
/// Stops at the first different type, empty cell or board edge. The origin
/// itself is not included.
pub fn scan(board: &Board, origin: Pos, axis: Axis, dir: Direction) -> Vec<Pos> {
    let mut run = Vec::new();
    let Some(kind) = board.kind_at(origin) else {
        return run;
    };
    let (dc, dr) = axis.step(dir);
    let mut cur = origin;
    while let Some(next) = board.offset(cur, dc, dr) {
        if board.kind_at(next) != Some(kind) {
            break;
        }
        run.push(next);
        cur = next;
    }
    run
}

/// Run through `origin` along `axis`, excluding the origin.
///
/// Empty unless the run and the origin together reach [`MIN_MATCH`].
pub fn axis_run(board: &Board, origin: Pos, axis: Axis) -> Vec<Pos> {
    let mut run = scan(board, origin, axis, Direction::Negative);
    run.extend(scan(board, origin, axis, Direction::Positive));
    if run.len() + 1 < MIN_MATCH {
        run.clear();
    }
    run
}

/// Match containing `origin`, flagging every gem in it as matched.
///
/// Returns the origin followed by its vertical then horizontal runs, or an
/// empty vector when neither axis qualifies.
pub fn find_matches_at(board: &mut Board, origin: Pos) -> Vec<Pos> {
    if board.get(origin).is_none() {
        return Vec::new();
    }
    let mut matched = vec![origin];
    matched.extend(axis_run(board, origin, Axis::Vertical));
    matched.extend(axis_run(board, origin, Axis::Horizontal));
    if matched.len() < MIN_MATCH {
        return Vec::new();
    }

    for &pos in &matched {
        if let Some(gem) = board.get_mut(pos) {
            gem.matched = true;
        }
    }
    trace!(?origin, size = matched.len(), "match");
    matched
}

/// Union of [`find_matches_at`] over `origins`, each cell listed once.
pub fn find_matches_for(board: &mut Board, origins: impl IntoIterator<Item = Pos>) -> Vec<Pos> {
    let width = board.width();
    let mut seen = vec![false; width * board.height()];
    let mut all = Vec::new();
    for origin in origins {
        for pos in find_matches_at(board, origin) {
            let i = pos.1 * width + pos.0;
            if !seen[i] {
                seen[i] = true;
                all.push(pos);
            }
        }
    }
    all
}

/// Every cell that lies in a horizontal or vertical run of [`MIN_MATCH`] or more.
///
/// Read-only: nothing is flagged. Cells come out in raster order.
pub fn find_all_matches(board: &Board) -> Vec<Pos> {
    let (w, h) = (board.width(), board.height());
    let mut hit = vec![false; w * h];

    let mut mark_runs = |line: &[Pos]| {
        let mut start = 0;
        while start < line.len() {
            let kind = board.kind_at(line[start]);
            let mut end = start + 1;
            while end < line.len() && kind.is_some() && board.kind_at(line[end]) == kind {
                end += 1;
            }
            if kind.is_some() && end - start >= MIN_MATCH {
                for &(c, r) in &line[start..end] {
                    hit[r * w + c] = true;
                }
            }
            start = end;
        }
    };

    for row in 0..h {
        let line: Vec<Pos> = (0..w).map(|col| (col, row)).collect();
        mark_runs(&line);
    }
    for col in 0..w {
        let line: Vec<Pos> = (0..h).map(|row| (col, row)).collect();
        mark_runs(&line);
    }

    board.positions().filter(|&(c, r)| hit[r * w + c]).collect()
}

/// True when no row or column holds a run of [`MIN_MATCH`] equal gems.
pub fn is_quiescent(board: &Board) -> bool {
    find_all_matches(board).is_empty()
}
