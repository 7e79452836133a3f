//! The local front door to the variant collection: a static registry of
//! playable variants and a session wrapper that owns one live game,
//! serializes its input and hands out immutable snapshots for rendering.

use serde::Serialize;
use tracing::{debug, info};

use crate::game::classic::Classic;
use crate::game::cube::Cube;
use crate::game::gomoku::Gomoku;
use crate::game::misere::Misere;
use crate::game::ultimate::Ultimate;
use crate::game::wild::Wild;
use crate::game::{BoardCell, Game, GameBoard, GameState, Mark};

/// The playable variants, in menu order. The serialized form doubles as the
/// route-style identifier accepted on the command line.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    Classic,
    Ultimate,
    #[strum(serialize = "3d")]
    #[serde(rename = "3d")]
    Cube,
    Misere,
    Wild,
    Gomoku,
}

impl VariantKind {
    /// Human-readable menu title.
    pub fn title(&self) -> &'static str {
        match self {
            VariantKind::Classic => "Classic Tic-Tac-Toe",
            VariantKind::Ultimate => "Ultimate Tic-Tac-Toe",
            VariantKind::Cube => "3D Tic-Tac-Toe",
            VariantKind::Misere => "Misère Tic-Tac-Toe",
            VariantKind::Wild => "Wild Tic-Tac-Toe",
            VariantKind::Gomoku => "Gomoku",
        }
    }

    /// The rules blurb shown on demand.
    pub fn rules(&self) -> &'static str {
        match self {
            VariantKind::Classic => {
                "Take turns placing X and O on a 3x3 grid.\n\
                 First to get three in a row wins."
            }
            VariantKind::Ultimate => {
                "The board is a 3x3 grid of smaller tic-tac-toe boards.\n\
                 Where you play inside a small board sends the next player\n\
                 to the board at that position. If that board is already won\n\
                 or full, they may choose any open board. Win a small board\n\
                 to claim its cell on the big grid; three claimed cells in a\n\
                 row win the match."
            }
            VariantKind::Cube => {
                "Three stacked 3x3 layers form a cube. Three in a row wins,\n\
                 counting lines within a layer, pillars through the layers,\n\
                 and diagonals through the cube."
            }
            VariantKind::Misere => {
                "The inverse of the classic game: the player who completes\n\
                 three in a row loses. A full board without a line is a draw."
            }
            VariantKind::Wild => {
                "Players alternate turns, but each turn the mover places\n\
                 either an X or an O. Completing any line of three equal\n\
                 marks wins for the mover."
            }
            VariantKind::Gomoku => {
                "Stones are placed on a 15x15 board. The first unbroken run\n\
                 of five or more in any direction wins."
            }
        }
    }

    /// Instantiates a fresh session of this variant.
    pub fn start(self) -> AnySession {
        match self {
            VariantKind::Classic => AnySession::Classic(Session::new()),
            VariantKind::Ultimate => AnySession::Ultimate(Session::new()),
            VariantKind::Cube => AnySession::Cube(Session::new()),
            VariantKind::Misere => AnySession::Misere(Session::new()),
            VariantKind::Wild => AnySession::Wild(Session::new()),
            VariantKind::Gomoku => AnySession::Gomoku(Session::new()),
        }
    }
}

/// Immutable view of a game after a move: the full board contents plus the
/// turn/terminal state. Renderers must not (and cannot) write through it.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot<I> {
    pub board: Vec<Vec<I>>,
    pub state: GameState,
}

/// Owns one live game and serializes all input to it.
///
/// Illegal input (occupied cell, wrong board, finished game, out of bounds)
/// is a silent no-op: the game is left untouched and `play` returns [`None`].
#[derive(Debug)]
pub struct Session<T> {
    game: T,
}

impl<T: Game> Session<T> {
    pub fn new() -> Self {
        Self { game: T::new() }
    }

    pub fn game(&self) -> &T {
        &self.game
    }

    pub fn state(&self) -> GameState {
        self.game.state()
    }

    /// Replaces the game with a fresh one of the same variant.
    pub fn reset(&mut self) {
        self.game.reset();
        debug!("session reset");
    }

    pub fn snapshot(&self) -> Snapshot<<T::Board as GameBoard>::Item> {
        Snapshot {
            board: self.game.board().content(),
            state: self.game.state(),
        }
    }

    /// Attempts one move for whoever's turn it is.
    pub fn play(&mut self, data: T::TurnData) -> Option<Snapshot<<T::Board as GameBoard>::Item>> {
        let GameState::Turn(player) = self.game.state() else {
            debug!("input ignored: game is already finished");
            return None;
        };
        match self.game.update(player, data) {
            Ok(GameState::Finished(result)) => {
                info!(?result, "game finished");
                Some(self.snapshot())
            }
            Ok(_) => Some(self.snapshot()),
            Err(err) => {
                debug!(error = %err, "move rejected");
                None
            }
        }
    }
}

impl<T: Game> Default for Session<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A session of any variant, for callers that route by [`VariantKind`].
#[derive(Debug)]
pub enum AnySession {
    Classic(Session<Classic>),
    Ultimate(Session<Ultimate>),
    Cube(Session<Cube>),
    Misere(Session<Misere>),
    Wild(Session<Wild>),
    Gomoku(Session<Gomoku>),
}

impl AnySession {
    pub fn kind(&self) -> VariantKind {
        match self {
            AnySession::Classic(_) => VariantKind::Classic,
            AnySession::Ultimate(_) => VariantKind::Ultimate,
            AnySession::Cube(_) => VariantKind::Cube,
            AnySession::Misere(_) => VariantKind::Misere,
            AnySession::Wild(_) => VariantKind::Wild,
            AnySession::Gomoku(_) => VariantKind::Gomoku,
        }
    }

    pub fn state(&self) -> GameState {
        match self {
            AnySession::Classic(session) => session.state(),
            AnySession::Ultimate(session) => session.state(),
            AnySession::Cube(session) => session.state(),
            AnySession::Misere(session) => session.state(),
            AnySession::Wild(session) => session.state(),
            AnySession::Gomoku(session) => session.state(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            AnySession::Classic(session) => session.reset(),
            AnySession::Ultimate(session) => session.reset(),
            AnySession::Cube(session) => session.reset(),
            AnySession::Misere(session) => session.reset(),
            AnySession::Wild(session) => session.reset(),
            AnySession::Gomoku(session) => session.reset(),
        }
    }

    /// Every variant stores plain marks, so one snapshot type fits all.
    pub fn snapshot(&self) -> Snapshot<BoardCell<Mark>> {
        match self {
            AnySession::Classic(session) => session.snapshot(),
            AnySession::Ultimate(session) => session.snapshot(),
            AnySession::Cube(session) => session.snapshot(),
            AnySession::Misere(session) => session.snapshot(),
            AnySession::Wild(session) => session.snapshot(),
            AnySession::Gomoku(session) => session.snapshot(),
        }
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;
    use crate::game::{FinishedState, GridIndex};

    #[test]
    fn test_registry_round_trips_route_ids() {
        for kind in VariantKind::iter() {
            let id = kind.to_string();
            assert_eq!(VariantKind::from_str(&id), Ok(kind));
        }
        assert_eq!(VariantKind::from_str("3d"), Ok(VariantKind::Cube));
        assert!(VariantKind::from_str("checkers").is_err());
    }

    #[test]
    fn test_every_variant_starts_with_player_one() {
        for kind in VariantKind::iter() {
            let session = kind.start();
            assert_eq!(session.kind(), kind);
            assert_eq!(session.state(), GameState::Turn(0));
        }
    }

    #[test]
    fn test_rejected_input_changes_nothing() {
        let AnySession::Classic(mut session) = VariantKind::Classic.start() else {
            panic!("registry returned the wrong variant");
        };
        session.play(GridIndex::new(1, 1)).unwrap();
        let before = session.snapshot();

        // occupied cell: silently ignored
        assert!(session.play(GridIndex::new(1, 1)).is_none());
        let after = session.snapshot();
        assert_eq!(after.state, before.state);
        assert_eq!(after.board, before.board);
    }

    #[test]
    fn test_session_plays_through_to_a_win() {
        let AnySession::Classic(mut session) = VariantKind::Classic.start() else {
            panic!("registry returned the wrong variant");
        };
        for flat in [0, 1, 4, 3] {
            session.play(GridIndex::from_flat(flat, 3)).unwrap();
        }
        let snapshot = session.play(GridIndex::from_flat(8, 3)).unwrap();
        assert_eq!(
            snapshot.state,
            GameState::Finished(FinishedState::Win(0))
        );
        // terminal: further input is ignored
        assert!(session.play(GridIndex::from_flat(5, 3)).is_none());
    }

    #[test]
    fn test_reset_starts_over() {
        let AnySession::Classic(mut session) = VariantKind::Classic.start() else {
            panic!("registry returned the wrong variant");
        };
        for flat in [0, 1, 4, 3, 8] {
            session.play(GridIndex::from_flat(flat, 3)).unwrap();
        }
        session.reset();
        assert_eq!(session.state(), GameState::Turn(0));
        assert!(session
            .snapshot()
            .board
            .iter()
            .flatten()
            .all(|cell| cell.is_none()));
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let AnySession::Classic(mut session) = VariantKind::Classic.start() else {
            panic!("registry returned the wrong variant");
        };
        let empty = session.snapshot();
        session.play(GridIndex::new(0, 0)).unwrap();
        // the old snapshot still shows the empty board
        assert!(empty.board.iter().flatten().all(|cell| cell.is_none()));
    }

    #[test]
    fn test_snapshot_serializes_marks_plainly() {
        let AnySession::Classic(mut session) = VariantKind::Classic.start() else {
            panic!("registry returned the wrong variant");
        };
        let snapshot = session.play(GridIndex::new(0, 0)).unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["board"][0][0], serde_json::json!("X"));
        assert_eq!(json["state"], serde_json::json!({ "Turn": 1 }));
    }
}
