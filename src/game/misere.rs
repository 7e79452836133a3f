use super::line::{evaluate, LineOutcome, MiniBoard};
use super::player_pool::{Player, PlayerPool, PlayerQueue};
use super::{
    Game, GameError, GameResult, GameState, GridIndex, Mark, PlayerPosition, Seat,
};

/// Inverted rules: the mark that completes a line loses, the opponent is
/// recorded as winner. A full board without a line is still a draw.
#[derive(Debug)]
pub struct Misere {
    players: PlayerPool<Seat>,
    state: GameState,
    field: MiniBoard,
    loser: Option<Mark>,
    losing_line: Option<[GridIndex; 3]>,
}

impl Misere {
    /// The mark that completed a line, once the game is decided.
    pub fn loser(&self) -> Option<Mark> {
        self.loser
    }

    /// The line that cost its maker the game.
    pub fn losing_line(&self) -> Option<[GridIndex; 3]> {
        self.losing_line
    }

    fn seat_of(&self, mark: Mark) -> GameResult<Seat> {
        self.players
            .find_if(|seat| seat.mark() == mark)
            .copied()
            .ok_or(GameError::PlayerNotFound)
    }

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

impl Game for Misere {
    type TurnData = GridIndex;
    type Players = PlayerPool<Seat>;
    type Board = MiniBoard;

    fn new() -> Self {
        Self {
            players: PlayerPool::new(vec![Seat::new(0, Mark::X), Seat::new(1, Mark::O)]),
            state: GameState::Turn(0),
            field: MiniBoard::default(),
            loser: None,
            losing_line: None,
        }
    }

    fn update(&mut self, player: PlayerPosition, data: Self::TurnData) -> GameResult<GameState> {
        self.place(player, data)?;
        match evaluate(&self.field) {
            LineOutcome::Win { mark, line } => {
                self.loser = Some(mark);
                self.losing_line = Some(line);
                let winner = self.seat_of(mark.other())?.id();
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
