use super::line::{evaluate, LineOutcome, MiniBoard};
use super::player_pool::{Player, PlayerPool, PlayerQueue};
use super::{
    Game, GameError, GameResult, GameState, GridIndex, Mark, PlayerPosition, Seat,
};

/// Standard rules: first mark to complete a line wins.
#[derive(Debug)]
pub struct Classic {
    players: PlayerPool<Seat>,
    state: GameState,
    field: MiniBoard,
    winning_line: Option<[GridIndex; 3]>,
}

impl Classic {
    /// The completed line once the game is won.
    pub fn winning_line(&self) -> Option<[GridIndex; 3]> {
        self.winning_line
    }

    fn seat_of(&self, mark: Mark) -> GameResult<Seat> {
        self.players
            .find_if(|seat| seat.mark() == mark)
            .copied()
            .ok_or(GameError::PlayerNotFound)
    }

    /// Validates the move and puts the mover's mark down.
    fn place(&mut self, player: PlayerPosition, at: GridIndex) -> GameResult<()> {
        if self.is_finished() {
            return Err(GameError::GameIsFinished);
        }
        let current = *self.get_current_player()?;
        if player != current.id() {
            return Err(GameError::not_your_turn(current.id(), player));
        }
        let cell = self
            .field
            .get_mut(at)
            .ok_or_else(|| GameError::cell_out_of_bounds(at.row(), at.col()))?;
        if cell.is_some() {
            return Err(GameError::cell_is_occupied(at.row(), at.col()));
        }
        **cell = Some(current.mark());
        Ok(())
    }
}

impl Game for Classic {
    type TurnData = GridIndex;
    type Players = PlayerPool<Seat>;
    type Board = MiniBoard;

    fn new() -> Self {
        Self {
            players: PlayerPool::new(vec![Seat::new(0, Mark::X), Seat::new(1, Mark::O)]),
            state: GameState::Turn(0),
            field: MiniBoard::default(),
            winning_line: None,
        }
    }

    fn update(&mut self, player: PlayerPosition, data: Self::TurnData) -> GameResult<GameState> {
        self.place(player, data)?;
        match evaluate(&self.field) {
            LineOutcome::Win { mark, line } => {
                self.winning_line = Some(line);
                let winner = self.seat_of(mark)?.id();
                Ok(self.set_winner(winner))
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
