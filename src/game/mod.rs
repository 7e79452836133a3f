pub mod classic;
pub mod cube;
pub mod gomoku;
pub mod misere;
pub mod ultimate;
pub mod wild;

mod error;
mod grid;
mod line;
mod player_pool;

use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};

use generic_array::ArrayLength;
use serde::{Deserialize, Serialize};

pub use error::GameError;
pub use grid::{Direction, Grid, GridIndex};
pub use line::{evaluate, LineOutcome, MiniBoard, WIN_LINES};
pub use player_pool::{Player, PlayerPool, PlayerQueue};

pub type GameResult<T> = Result<T, GameError>;

/// Seat number at the table. Seat 0 always moves first.
pub type PlayerPosition = u8;

impl Player for PlayerPosition {
    type Id = PlayerPosition;

    fn id(&self) -> Self::Id {
        *self
    }
}

/// A player's symbol on the board.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

/// A seat bound to one mark for the whole game.
///
/// Used by the variants where marks are fixed; wild keeps bare
/// [`PlayerPosition`]s instead since the mover picks a mark every turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Seat {
    id: PlayerPosition,
    mark: Mark,
}

impl Seat {
    pub fn new(id: PlayerPosition, mark: Mark) -> Self {
        Self { id, mark }
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }
}

impl Player for Seat {
    type Id = PlayerPosition;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// A board cell that is either empty or holds a value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardCell<T>(pub Option<T>);

impl<T> Default for BoardCell<T> {
    fn default() -> Self {
        Self(Option::default())
    }
}

impl<T: Display> Display for BoardCell<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(val) => write!(f, "[{}]", val),
            None => f.write_str("[ ]"),
        }
    }
}

impl<T> From<T> for BoardCell<T> {
    fn from(value: T) -> Self {
        Self(Option::from(value))
    }
}

impl<T> Deref for BoardCell<T> {
    type Target = Option<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for BoardCell<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum FinishedState {
    Win(PlayerPosition),
    Draw,
}

/// The turn-taking state machine every variant runs on.
///
/// Starts as `Turn(0)`; `Finished` is terminal until an explicit reset
/// replaces the whole game with a fresh one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    Turn(PlayerPosition),
    Finished(FinishedState),
}

/// Read access to a board's full contents, used for snapshots.
pub trait GameBoard {
    type Item: Clone;

    fn content(&self) -> Vec<Vec<Self::Item>>;
}

impl<T, R: ArrayLength, C: ArrayLength> GameBoard for Grid<T, R, C>
where
    T: Clone,
{
    type Item = T;

    fn content(&self) -> Vec<Vec<Self::Item>> {
        self.iter()
            .map(|row| row.iter().cloned().collect())
            .collect()
    }
}

/// One game variant: a board, a turn cycle and a win rule.
///
/// `update` is the single mutation point. It validates the move against the
/// current state and either applies it and re-evaluates the terminal
/// condition, or returns an error leaving the game untouched.
pub trait Game: Sized {
    type TurnData;
    type Players: PlayerQueue<Id = PlayerPosition>;
    type Board: GameBoard;

    fn new() -> Self;
    fn update(&mut self, player: PlayerPosition, data: Self::TurnData) -> GameResult<GameState>;

    fn board(&self) -> &Self::Board;
    fn board_mut(&mut self) -> &mut Self::Board;

    fn players(&self) -> &Self::Players;
    fn players_mut(&mut self) -> &mut Self::Players;

    fn state(&self) -> GameState;
    fn set_state(&mut self, state: GameState);

    /// Discards the current game and starts over from the empty board.
    fn reset(&mut self) {
        *self = Self::new();
    }

    fn is_finished(&self) -> bool {
        matches!(self.state(), GameState::Finished(_))
    }

    fn set_draw(&mut self) -> GameState {
        self.set_state(GameState::Finished(FinishedState::Draw));
        self.state()
    }

    fn set_winner(&mut self, id: PlayerPosition) -> GameState {
        self.set_state(GameState::Finished(FinishedState::Win(id)));
        self.state()
    }

    fn get_current_player(&mut self) -> GameResult<&<Self::Players as PlayerQueue>::Item> {
        self.players_mut()
            .get_current()
            .ok_or(GameError::PlayerPoolCorrupted)
    }

    fn switch_player(&mut self) -> GameResult<GameState> {
        let next_player = self
            .players_mut()
            .next()
            .ok_or(GameError::PlayerPoolCorrupted)?
            .id();
        self.set_state(GameState::Turn(next_player));
        Ok(self.state())
    }
}
