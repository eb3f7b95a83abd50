//! Breadth-first reachability over the current adjacency graph.
//!
//! Pawns are ignored: they move, fences don't.

use std::collections::VecDeque;

use crate::{Board, Coord, BOARD_SIZE};

/// An edge treated as fenced in addition to what the board already records.
pub type Cut = (Coord, Coord);

#[inline]
fn slot(c: Coord) -> usize {
    (c.y * BOARD_SIZE + c.x) as usize
}

#[inline]
fn is_cut(cuts: &[Cut], a: Coord, b: Coord) -> bool {
    cuts.iter().any(|&(p, q)| (p == a && q == b) || (p == b && q == a))
}

/// Fewest steps from `start` to any cell on row `goal_row`, or None if the row
/// cannot be reached. `cuts` are extra blocked edges, used to try a fence
/// before committing it.
pub fn distance_to_row(board: &Board, start: Coord, goal_row: i32, cuts: &[Cut]) -> Option<usize> {
    if !start.on_board() {
        return None;
    }
    let mut seen = [false; (BOARD_SIZE * BOARD_SIZE) as usize];
    let mut queue = VecDeque::new();
    seen[slot(start)] = true;
    queue.push_back((start, 0usize));

    while let Some((at, dist)) = queue.pop_front() {
        if at.y == goal_row {
            return Some(dist);
        }
        let Ok(cell) = board.cell_at(at) else {
            continue;
        };
        for &next in cell.neighbors() {
            if seen[slot(next)] || is_cut(cuts, at, next) {
                continue;
            }
            seen[slot(next)] = true;
            queue.push_back((next, dist + 1));
        }
    }
    None
}

#[inline]
pub fn reaches_row(board: &Board, start: Coord, goal_row: i32, cuts: &[Cut]) -> bool {
    distance_to_row(board, start, goal_row, cuts).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Orientation;

    fn wall_row(board: &mut Board, y: i32, skip: Option<i32>) {
        for x in 0..BOARD_SIZE {
            if Some(x) == skip {
                continue;
            }
            let a = Coord::new(x, y);
            let b = Orientation::Horizontal.paired(a);
            board.apply_fence(a, Orientation::Horizontal, b).unwrap();
            board.apply_fence(b, Orientation::Horizontal, a).unwrap();
        }
    }

    #[test]
    fn test_open_board_distance() {
        let board = Board::new();
        assert_eq!(distance_to_row(&board, Coord::new(4, 0), 8, &[]), Some(8));
        assert_eq!(distance_to_row(&board, Coord::new(4, 8), 0, &[]), Some(8));
        assert_eq!(distance_to_row(&board, Coord::new(4, 8), 8, &[]), Some(0));
    }

    #[test]
    fn test_wall_with_gap_detours() {
        let mut board = Board::new();
        wall_row(&mut board, 4, Some(0));
        // Four steps left to the gap, then eight down.
        assert_eq!(distance_to_row(&board, Coord::new(4, 0), 8, &[]), Some(12));
    }

    #[test]
    fn test_full_wall_blocks() {
        let mut board = Board::new();
        wall_row(&mut board, 4, None);
        assert!(!reaches_row(&board, Coord::new(4, 0), 8, &[]));
        assert!(reaches_row(&board, Coord::new(4, 0), 0, &[]));
    }

    #[test]
    fn test_cut_closes_last_gap() {
        let mut board = Board::new();
        wall_row(&mut board, 4, Some(6));
        let gap = (Coord::new(6, 4), Coord::new(6, 3));
        assert!(reaches_row(&board, Coord::new(4, 0), 8, &[]));
        assert!(!reaches_row(&board, Coord::new(4, 0), 8, &[gap]));
        // Direction of the cut does not matter.
        assert!(!reaches_row(&board, Coord::new(4, 0), 8, &[(gap.1, gap.0)]));
    }

    #[test]
    fn test_off_board_start() {
        let board = Board::new();
        assert_eq!(distance_to_row(&board, Coord::new(-1, 0), 8, &[]), None);
    }
}
