use generic_array::typenum::U3;

use super::line::{evaluate, LineOutcome, MiniBoard};
use super::player_pool::{Player, PlayerPool, PlayerQueue};
use super::{
    BoardCell, Game, GameBoard, GameError, GameResult, GameState, Grid, GridIndex, Mark,
    PlayerPosition, Seat,
};

/// One move in the ultimate variant: which sub-board, and which cell in it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UltimateMove {
    pub board: GridIndex,
    pub cell: GridIndex,
}

impl UltimateMove {
    pub fn new(board: GridIndex, cell: GridIndex) -> Self {
        Self { board, cell }
    }
}

/// 3x3 arrangement of 3x3 sub-boards, 81 cells total.
#[derive(Clone, Debug, Default)]
pub struct UltimateBoard {
    boards: Grid<MiniBoard, U3, U3>,
}

impl UltimateBoard {
    pub fn sub(&self, at: GridIndex) -> Option<&MiniBoard> {
        self.boards.get(at)
    }

    fn sub_mut(&mut self, at: GridIndex) -> Option<&mut MiniBoard> {
        self.boards.get_mut(at)
    }

    fn is_sub_full(&self, at: GridIndex) -> bool {
        self.sub(at)
            .map(|board| board.iter().flatten().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }
}

impl GameBoard for UltimateBoard {
    type Item = BoardCell<Mark>;

    /// Flattens the nested boards into one 9x9 matrix, row-major.
    fn content(&self) -> Vec<Vec<Self::Item>> {
        (0..9)
            .map(|row| {
                (0..9)
                    .map(|col| {
                        let board = GridIndex::new(row / 3, col / 3);
                        let cell = GridIndex::new(row % 3, col % 3);
                        self.boards[board][cell]
                    })
                    .collect()
            })
            .collect()
    }
}

/// Ultimate rules: where you play inside a sub-board sends the opponent to
/// the sub-board at that position. Winning a sub-board claims its cell on
/// the meta-board; three claimed cells in a row win the match.
#[derive(Debug)]
pub struct Ultimate {
    players: PlayerPool<Seat>,
    state: GameState,
    field: UltimateBoard,
    meta: MiniBoard,
    active: Option<GridIndex>,
    winning_line: Option<[GridIndex; 3]>,
}

impl Ultimate {
    /// Owners of decided sub-boards, arranged as a 3x3 board.
    pub fn meta(&self) -> &MiniBoard {
        &self.meta
    }

    /// The sub-board the mover is forced into, if any.
    pub fn active_board(&self) -> Option<GridIndex> {
        self.active
    }

    /// The completed meta-board line once the match is won.
    pub fn winning_line(&self) -> Option<[GridIndex; 3]> {
        self.winning_line
    }

    /// A closed sub-board can't be played into and frees the opponent from
    /// redirection: it is either already won or has no empty cell left.
    pub fn is_closed(&self, at: GridIndex) -> bool {
        let won = self.meta.get(at).map(|owner| owner.is_some()).unwrap_or(true);
        won || self.field.is_sub_full(at)
    }

    fn all_closed(&self) -> bool {
        (0..3).all(|row| (0..3).all(|col| self.is_closed(GridIndex::new(row, col))))
    }

    fn seat_of(&self, mark: Mark) -> GameResult<Seat> {
        self.players
            .find_if(|seat| seat.mark() == mark)
            .copied()
            .ok_or(GameError::PlayerNotFound)
    }
}

impl Game for Ultimate {
    type TurnData = UltimateMove;
    type Players = PlayerPool<Seat>;
    type Board = UltimateBoard;

    fn new() -> Self {
        Self {
            players: PlayerPool::new(vec![Seat::new(0, Mark::X), Seat::new(1, Mark::O)]),
            state: GameState::Turn(0),
            field: UltimateBoard::default(),
            meta: MiniBoard::default(),
            active: None,
            winning_line: None,
        }
    }

    fn update(&mut self, player: PlayerPosition, data: Self::TurnData) -> GameResult<GameState> {
        if self.is_finished() {
            return Err(GameError::GameIsFinished);
        }
        let current = *self.get_current_player()?;
        if player != current.id() {
            return Err(GameError::not_your_turn(current.id(), player));
        }

        let UltimateMove { board, cell } = data;
        let owner = self
            .meta
            .get(board)
            .ok_or_else(|| GameError::cell_out_of_bounds(board.row(), board.col()))?;
        if owner.is_some() {
            return Err(GameError::board_is_closed(board.row(), board.col()));
        }
        if let Some(active) = self.active {
            if active != board {
                return Err(GameError::board_is_inactive(board.row(), board.col()));
            }
        }

        let mark = current.mark();
        let claimed = {
            let sub = self
                .field
                .sub_mut(board)
                .ok_or_else(|| GameError::cell_out_of_bounds(board.row(), board.col()))?;
            let target = sub
                .get_mut(cell)
                .ok_or_else(|| GameError::cell_out_of_bounds(cell.row(), cell.col()))?;
            if target.is_some() {
                return Err(GameError::cell_is_occupied(cell.row(), cell.col()));
            }
            **target = Some(mark);
            match evaluate(sub) {
                LineOutcome::Win { mark, .. } => Some(mark),
                _ => None,
            }
        };
        if let Some(owner) = claimed {
            self.meta[board] = BoardCell::from(owner);
        }

        match evaluate(&self.meta) {
            LineOutcome::Win { mark, line } => {
                self.winning_line = Some(line);
                let winner = self.seat_of(mark)?.id();
                Ok(self.set_winner(winner))
            }
            // a full meta-board means every sub-board is decided
            LineOutcome::Draw => Ok(self.set_draw()),
            LineOutcome::InProgress => {
                if self.all_closed() {
                    return Ok(self.set_draw());
                }
                // the cell just played points at the next forced sub-board,
                // unless that board is closed
                self.active = (!self.is_closed(cell)).then_some(cell);
                self.switch_player()
            }
        }
    }

    fn board(&self) -> &Self::Board {
        &self.field
    }

    fn board_mut(&mut self) -> &mut Self::Board {
        &mut self.field
    }

    fn players(&self) -> &Self::Players {
        &self.players
    }

    fn players_mut(&mut self) -> &mut Self::Players {
        &mut self.players
    }

    fn state(&self) -> GameState {
        self.state
    }

    fn set_state(&mut self, state: GameState) {
        self.state = state;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::FinishedState;

    fn at(flat: usize) -> GridIndex {
        GridIndex::from_flat(flat, 3)
    }

    fn play(game: &mut Ultimate, moves: &[(usize, usize)]) -> GameState {
        let mut state = game.state();
        for &(board, cell) in moves {
            let GameState::Turn(player) = state else {
                panic!("game finished before the script ran out");
            };
            state = game
                .update(player, UltimateMove::new(at(board), at(cell)))
                .unwrap();
        }
        state
    }

    #[test]
    fn test_played_cell_designates_the_next_board() {
        let mut game = Ultimate::new();
        play(&mut game, &[(0, 4)]);
        assert_eq!(game.active_board(), Some(at(4)));
    }

    #[test]
    fn test_move_outside_the_active_board_is_rejected() {
        let mut game = Ultimate::new();
        play(&mut game, &[(0, 4)]);
        assert_eq!(
            game.update(1, UltimateMove::new(at(5), at(0))),
            Err(GameError::board_is_inactive(1, 2))
        );
        assert_eq!(game.state(), GameState::Turn(1));
        assert_eq!(game.active_board(), Some(at(4)));
    }

    #[test]
    fn test_first_move_may_go_anywhere() {
        let mut game = Ultimate::new();
        assert!(game.active_board().is_none());
        play(&mut game, &[(7, 2)]);
        assert_eq!(game.active_board(), Some(at(2)));
    }

    // O claims sub-board 0 through its middle column while X shuttles
    // between boards 1 and 4; O's last cell points at board 7.
    const O_TAKES_BOARD_0: [(usize, usize); 6] =
        [(0, 0), (0, 1), (1, 0), (0, 4), (4, 0), (0, 7)];

    #[test]
    fn test_winning_a_sub_board_claims_the_meta_cell() {
        let mut game = Ultimate::new();
        play(&mut game, &O_TAKES_BOARD_0);
        assert_eq!(game.meta()[at(0)].0, Some(Mark::O));
        assert_eq!(game.active_board(), Some(at(7)));
        assert_eq!(game.state(), GameState::Turn(0));
    }

    #[test]
    fn test_playing_into_a_won_board_is_rejected() {
        let mut game = Ultimate::new();
        play(&mut game, &O_TAKES_BOARD_0);
        assert_eq!(
            game.update(0, UltimateMove::new(at(0), at(5))),
            Err(GameError::board_is_closed(0, 0))
        );
        assert_eq!(game.state(), GameState::Turn(0));
    }

    #[test]
    fn test_redirection_to_a_won_board_frees_the_choice() {
        let mut game = Ultimate::new();
        play(&mut game, &O_TAKES_BOARD_0);
        // X is forced into board 7 and answers with cell 0, pointing O at
        // the board O already owns
        play(&mut game, &[(7, 0)]);
        assert!(game.active_board().is_none());
        // so O may play in any open board
        let state = play(&mut game, &[(8, 8)]);
        assert_eq!(state, GameState::Turn(0));
        assert_eq!(game.active_board(), Some(at(8)));
    }

    #[test]
    fn test_three_sub_boards_in_a_row_win_the_match() {
        let mut game = Ultimate::new();
        // X takes the bottom row of boards 0, 1 and 2 in turn; every X cell
        // (6, 7 or 8) sends O to a dump board, and every O cell sends X
        // right back to the board it is working on.
        let state = play(
            &mut game,
            &[
                (0, 6), (6, 0), (0, 7), (7, 0), (0, 8), // X claims board 0
                (8, 1), (1, 6), (6, 1), (1, 7), (7, 1),
                (1, 8), // X claims board 1
                (8, 2), (2, 6), (6, 2), (2, 7), (7, 2),
                (2, 8), // X claims board 2 and the match
            ],
        );
        assert_eq!(state, GameState::Finished(FinishedState::Win(0)));
        assert_eq!(game.meta()[at(0)].0, Some(Mark::X));
        assert_eq!(game.meta()[at(1)].0, Some(Mark::X));
        assert_eq!(game.meta()[at(2)].0, Some(Mark::X));
        assert_eq!(
            game.winning_line(),
            Some([at(0), at(1), at(2)])
        );
        // O happened to finish boards 6 and 7 along the way
        assert_eq!(game.meta()[at(6)].0, Some(Mark::O));
        assert_eq!(game.meta()[at(7)].0, Some(Mark::O));
    }

    #[test]
    fn test_moves_after_the_match_is_decided_are_rejected() {
        let mut game = Ultimate::new();
        play(
            &mut game,
            &[
                (0, 6), (6, 0), (0, 7), (7, 0), (0, 8),
                (8, 1), (1, 6), (6, 1), (1, 7), (7, 1),
                (1, 8),
                (8, 2), (2, 6), (6, 2), (2, 7), (7, 2),
                (2, 8),
            ],
        );
        assert_eq!(
            game.update(1, UltimateMove::new(at(4), at(4))),
            Err(GameError::GameIsFinished)
        );
    }
}
