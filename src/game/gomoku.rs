use generic_array::typenum::U15;
use smallvec::SmallVec;

use super::grid::Direction;
use super::player_pool::{Player, PlayerPool};
use super::{
    BoardCell, Game, GameError, GameResult, GameState, Grid, GridIndex, Mark, PlayerPosition,
    Seat,
};

/// The classic 15x15 gomoku board.
pub type GomokuBoard = Grid<BoardCell<Mark>, U15, U15>;

/// Freestyle rule: five in a row wins, longer runs count too.
pub const WIN_RUN: usize = 5;

/// One scan axis per line orientation; each is walked in both directions
/// from the cell just played.
const SCAN_AXES: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::DownRight,
    Direction::DownLeft,
];

/// Gomoku: X and O place stones on a 15x15 board; the first unbroken run
/// of five or more equal marks in any orientation wins.
#[derive(Debug)]
pub struct Gomoku {
    players: PlayerPool<Seat>,
    state: GameState,
    field: GomokuBoard,
    winning_run: Option<Vec<GridIndex>>,
}

impl Gomoku {
    /// The run that decided the game, ordered along its axis.
    pub fn winning_run(&self) -> Option<&[GridIndex]> {
        self.winning_run.as_deref()
    }

    /// Collects the maximal run of `mark` through `at` along `axis`.
    fn run_through(&self, at: GridIndex, mark: Mark, axis: Direction) -> Vec<GridIndex> {
        let matches = |cell: &&BoardCell<Mark>| cell.0 == Some(mark);

        let mut run: SmallVec<[GridIndex; 8]> = self
            .field
            .ray(at, axis.opposite())
            .skip(1)
            .take_while(|(_, cell)| matches(&cell))
            .map(|(idx, _)| idx)
            .collect();
        run.reverse();
        run.extend(
            self.field
                .ray(at, axis)
                .take_while(|(_, cell)| matches(&cell))
                .map(|(idx, _)| idx),
        );
        run.into_vec()
    }
}

impl Game for Gomoku {
    type TurnData = GridIndex;
    type Players = PlayerPool<Seat>;
    type Board = GomokuBoard;

    fn new() -> Self {
        Self {
            players: PlayerPool::new(vec![Seat::new(0, Mark::X), Seat::new(1, Mark::O)]),
            state: GameState::Turn(0),
            field: GomokuBoard::default(),
            winning_run: None,
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
        let mark = current.mark();
        let cell = self
            .field
            .get_mut(data)
            .ok_or_else(|| GameError::cell_out_of_bounds(data.row(), data.col()))?;
        if cell.is_some() {
            return Err(GameError::cell_is_occupied(data.row(), data.col()));
        }
        **cell = Some(mark);

        for axis in SCAN_AXES {
            let run = self.run_through(data, mark, axis);
            if run.len() >= WIN_RUN {
                self.winning_run = Some(run);
                return Ok(self.set_winner(current.id()));
            }
        }

        if self.field.iter().flatten().all(|cell| cell.is_some()) {
            return Ok(self.set_draw());
        }
        self.switch_player()
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

    fn play(game: &mut Gomoku, moves: &[(usize, usize)]) -> GameState {
        let mut state = game.state();
        for &(row, col) in moves {
            let GameState::Turn(player) = state else {
                panic!("game finished before the script ran out");
            };
            state = game.update(player, GridIndex::new(row, col)).unwrap();
        }
        state
    }

    #[test]
    fn test_horizontal_five_wins() {
        let mut game = Gomoku::new();
        // X builds row 7 columns 3..8, O answers on row 0
        let state = play(
            &mut game,
            &[
                (7, 3),
                (0, 0),
                (7, 4),
                (0, 1),
                (7, 5),
                (0, 2),
                (7, 6),
                (0, 3),
                (7, 7),
            ],
        );
        assert_eq!(state, GameState::Finished(FinishedState::Win(0)));
        itertools::assert_equal(
            game.winning_run().unwrap().iter().copied(),
            (3..8).map(|col| GridIndex::new(7, col)),
        );
    }

    #[test]
    fn test_gap_is_closed_in_the_middle() {
        let mut game = Gomoku::new();
        // X places 3-4-6-7 first, then fills 5; the run is reported whole
        let state = play(
            &mut game,
            &[
                (2, 3),
                (0, 0),
                (2, 4),
                (0, 1),
                (2, 6),
                (0, 2),
                (2, 7),
                (0, 3),
                (2, 5),
            ],
        );
        assert_eq!(state, GameState::Finished(FinishedState::Win(0)));
        itertools::assert_equal(
            game.winning_run().unwrap().iter().copied(),
            (3..8).map(|col| GridIndex::new(2, col)),
        );
    }

    #[test]
    fn test_anti_diagonal_five_wins() {
        let mut game = Gomoku::new();
        let state = play(
            &mut game,
            &[
                (4, 10),
                (0, 0),
                (5, 9),
                (0, 1),
                (6, 8),
                (0, 2),
                (7, 7),
                (0, 3),
                (8, 6),
            ],
        );
        assert_eq!(state, GameState::Finished(FinishedState::Win(0)));
        itertools::assert_equal(
            game.winning_run().unwrap().iter().copied(),
            (4..9).map(|step| GridIndex::new(step, 14 - step)),
        );
    }

    #[test]
    fn test_overline_wins_too() {
        let mut game = Gomoku::new();
        // X holds columns 4-6 and 8-9 of row 3, then closes the gap at 7,
        // ending up with a run of six
        let state = play(
            &mut game,
            &[
                (3, 4),
                (0, 0),
                (3, 5),
                (0, 1),
                (3, 6),
                (0, 2),
                (3, 8),
                (0, 3),
                (3, 9),
                (1, 0),
                (3, 7),
            ],
        );
        assert_eq!(state, GameState::Finished(FinishedState::Win(0)));
        assert_eq!(game.winning_run().unwrap().len(), 6);
    }

    #[test]
    fn test_four_is_not_enough() {
        let mut game = Gomoku::new();
        let state = play(
            &mut game,
            &[(5, 5), (0, 0), (5, 6), (0, 1), (5, 7), (0, 2), (5, 8)],
        );
        assert_eq!(state, GameState::Turn(1));
        assert_eq!(game.winning_run(), None);
    }

    #[test]
    fn test_occupied_stone_is_rejected() {
        let mut game = Gomoku::new();
        play(&mut game, &[(5, 5)]);
        assert_eq!(
            game.update(1, GridIndex::new(5, 5)),
            Err(GameError::cell_is_occupied(5, 5))
        );
        assert_eq!(game.state(), GameState::Turn(1));
    }

    #[test]
    fn test_board_edge_is_respected() {
        let mut game = Gomoku::new();
        assert_eq!(
            game.update(0, GridIndex::new(15, 0)),
            Err(GameError::cell_out_of_bounds(15, 0))
        );
    }
}
