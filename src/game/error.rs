use super::PlayerPosition;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GameError {
    #[error("player not found")]
    PlayerNotFound,
    #[error("cell ({row}, {col}) is occupied")]
    CellIsOccupied { row: usize, col: usize },
    #[error("cell ({row}, {col}) is out of bounds")]
    CellOutOfBounds { row: usize, col: usize },
    #[error("can't make turn on a finished game")]
    GameIsFinished,
    #[error("other player's turn (expected: {expected}, found: {found})")]
    NotYourTurn {
        expected: PlayerPosition,
        found: PlayerPosition,
    },
    #[error("sub-board ({row}, {col}) is already decided")]
    BoardIsClosed { row: usize, col: usize },
    #[error("sub-board ({row}, {col}) is not the active one")]
    BoardIsInactive { row: usize, col: usize },
    #[error("failed to switch players in the pool")]
    PlayerPoolCorrupted,
}

impl GameError {
    pub fn cell_is_occupied(row: usize, col: usize) -> Self {
        Self::CellIsOccupied { row, col }
    }

    pub fn cell_out_of_bounds(row: usize, col: usize) -> Self {
        Self::CellOutOfBounds { row, col }
    }

    pub fn not_your_turn(expected: PlayerPosition, found: PlayerPosition) -> Self {
        Self::NotYourTurn { expected, found }
    }

    pub fn board_is_closed(row: usize, col: usize) -> Self {
        Self::BoardIsClosed { row, col }
    }

    pub fn board_is_inactive(row: usize, col: usize) -> Self {
        Self::BoardIsInactive { row, col }
    }
}
