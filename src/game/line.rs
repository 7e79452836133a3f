//! The canonical 3x3 line table and the win/draw evaluator shared by every
//! variant that plays on (or reduces to) a single 3x3 board.

use generic_array::typenum::U3;

use super::grid::{Grid, GridIndex};
use super::{BoardCell, Mark};

/// A 3x3 board of marks. Doubles as Ultimate's sub-board and meta-board.
pub type MiniBoard = Grid<BoardCell<Mark>, U3, U3>;

/// The eight ways to win on a 3x3 board, in canonical order:
/// rows top to bottom, columns left to right, then the two diagonals.
/// [`evaluate`] reports the first completed triple in this order.
pub const WIN_LINES: [[GridIndex; 3]; 8] = [
    [
        GridIndex::new(0, 0),
        GridIndex::new(0, 1),
        GridIndex::new(0, 2),
    ],
    [
        GridIndex::new(1, 0),
        GridIndex::new(1, 1),
        GridIndex::new(1, 2),
    ],
    [
        GridIndex::new(2, 0),
        GridIndex::new(2, 1),
        GridIndex::new(2, 2),
    ],
    [
        GridIndex::new(0, 0),
        GridIndex::new(1, 0),
        GridIndex::new(2, 0),
    ],
    [
        GridIndex::new(0, 1),
        GridIndex::new(1, 1),
        GridIndex::new(2, 1),
    ],
    [
        GridIndex::new(0, 2),
        GridIndex::new(1, 2),
        GridIndex::new(2, 2),
    ],
    [
        GridIndex::new(0, 0),
        GridIndex::new(1, 1),
        GridIndex::new(2, 2),
    ],
    [
        GridIndex::new(0, 2),
        GridIndex::new(1, 1),
        GridIndex::new(2, 0),
    ],
];

/// Verdict of [`evaluate`] on a 3x3 board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineOutcome {
    InProgress,
    Win { mark: Mark, line: [GridIndex; 3] },
    Draw,
}

/// Checks a 3x3 board for a completed line or a full board.
///
/// Pure: same board, same verdict. A board with several completed lines
/// (unreachable under alternating play, but representable) deterministically
/// reports the first one in [`WIN_LINES`] order.
pub fn evaluate(board: &MiniBoard) -> LineOutcome {
    for line in WIN_LINES {
        let [a, b, c] = line;
        if let (Some(m1), Some(m2), Some(m3)) = (board[a].0, board[b].0, board[c].0) {
            if m1 == m2 && m2 == m3 {
                return LineOutcome::Win { mark: m1, line };
            }
        }
    }

    if board.iter().flatten().all(|cell| cell.is_some()) {
        LineOutcome::Draw
    } else {
        LineOutcome::InProgress
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn filled(marks: &[(usize, Mark)]) -> MiniBoard {
        let mut board = MiniBoard::default();
        for &(flat, mark) in marks {
            board[GridIndex::from_flat(flat, 3)] = BoardCell::from(mark);
        }
        board
    }

    fn line_of(flats: [usize; 3]) -> [GridIndex; 3] {
        flats.map(|flat| GridIndex::from_flat(flat, 3))
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&MiniBoard::default()), LineOutcome::InProgress);
    }

    #[test]
    fn test_diagonal_win_reports_mark_and_line() {
        // X on the main diagonal, O elsewhere
        let board = filled(&[
            (0, Mark::X),
            (4, Mark::X),
            (8, Mark::X),
            (1, Mark::O),
            (3, Mark::O),
        ]);
        assert_eq!(
            evaluate(&board),
            LineOutcome::Win {
                mark: Mark::X,
                line: line_of([0, 4, 8]),
            }
        );
    }

    #[test]
    fn test_column_win_for_o() {
        let board = filled(&[
            (1, Mark::O),
            (4, Mark::O),
            (7, Mark::O),
            (0, Mark::X),
            (2, Mark::X),
        ]);
        assert_eq!(
            evaluate(&board),
            LineOutcome::Win {
                mark: Mark::O,
                line: line_of([1, 4, 7]),
            }
        );
    }

    #[test]
    fn test_first_line_in_canonical_order_wins() {
        // Both the first row and the first column are complete; rows come
        // first in the table.
        let board = filled(&[
            (0, Mark::X),
            (1, Mark::X),
            (2, Mark::X),
            (3, Mark::X),
            (6, Mark::X),
        ]);
        assert_eq!(
            evaluate(&board),
            LineOutcome::Win {
                mark: Mark::X,
                line: line_of([0, 1, 2]),
            }
        );
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        // X O X / O O X / X X O
        let board = filled(&[
            (0, Mark::X),
            (1, Mark::O),
            (2, Mark::X),
            (3, Mark::O),
            (4, Mark::O),
            (5, Mark::X),
            (6, Mark::X),
            (7, Mark::X),
            (8, Mark::O),
        ]);
        assert_eq!(evaluate(&board), LineOutcome::Draw);
    }

    #[test]
    fn test_partial_board_without_line_in_progress() {
        let board = filled(&[(0, Mark::X), (1, Mark::O), (4, Mark::X)]);
        assert_eq!(evaluate(&board), LineOutcome::InProgress);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let board = filled(&[(2, Mark::X), (4, Mark::X), (6, Mark::X), (0, Mark::O)]);
        assert_eq!(evaluate(&board), evaluate(&board));
    }
}
