use super::line::{evaluate, LineOutcome, MiniBoard};
use super::player_pool::PlayerPool;
use super::{Game, GameError, GameResult, GameState, GridIndex, Mark, PlayerPosition};

/// One move in the wild variant: where, and which mark to put there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WildMove {
    pub cell: GridIndex,
    pub mark: Mark,
}

impl WildMove {
    pub fn new(cell: GridIndex, mark: Mark) -> Self {
        Self { cell, mark }
    }
}

/// Wild rules: seats alternate as usual, but the mover picks either mark on
/// every turn. Completing a line of three equal marks wins for the mover,
/// no matter whose "usual" mark it is.
#[derive(Debug)]
pub struct Wild {
    players: PlayerPool<PlayerPosition>,
    state: GameState,
    field: MiniBoard,
    winning_line: Option<[GridIndex; 3]>,
}

impl Wild {
    pub fn winning_line(&self) -> Option<[GridIndex; 3]> {
        self.winning_line
    }
}

impl Game for Wild {
    type TurnData = WildMove;
    type Players = PlayerPool<PlayerPosition>;
    type Board = MiniBoard;

    fn new() -> Self {
        Self {
            players: PlayerPool::new(vec![0, 1]),
            state: GameState::Turn(0),
            field: MiniBoard::default(),
            winning_line: None,
        }
    }

    fn update(&mut self, player: PlayerPosition, data: Self::TurnData) -> GameResult<GameState> {
        if self.is_finished() {
            return Err(GameError::GameIsFinished);
        }
        let current = *self.get_current_player()?;
        if player != current {
            return Err(GameError::not_your_turn(current, player));
        }
        let at = data.cell;
        let cell = self
            .field
            .get_mut(at)
            .ok_or_else(|| GameError::cell_out_of_bounds(at.row(), at.col()))?;
        if cell.is_some() {
            return Err(GameError::cell_is_occupied(at.row(), at.col()));
        }
        **cell = Some(data.mark);

        match evaluate(&self.field) {
            LineOutcome::Win { line, .. } => {
                // whoever completed the line wins, regardless of the mark
                self.winning_line = Some(line);
                Ok(self.set_winner(current))
            }
            LineOutcome::Draw => Ok(self.set_draw()),
            LineOutcome::InProgress => self.switch_player(),
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
