use generic_array::typenum::U3;
use generic_array::GenericArray;
use smallvec::SmallVec;

use super::player_pool::{Player, PlayerPool};
use super::{
    BoardCell, Game, GameBoard, GameError, GameResult, GameState, Grid, GridIndex, Mark,
    PlayerPosition, Seat,
};

const SIDE: usize = 3;

/// Index into the 3x3x3 cube: layer first, then row and column within it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CubeIndex {
    layer: usize,
    row: usize,
    col: usize,
}

impl CubeIndex {
    pub const fn new(layer: usize, row: usize, col: usize) -> Self {
        Self { layer, row, col }
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Moves one step along `axis`, backwards when `invert` is set.
    /// Returns [`None`] when the step leaves the cube.
    fn step(self, axis: Axis, invert: bool) -> Option<Self> {
        let (dl, dr, dc) = axis;
        let flip = |d: i8| if invert { -d } else { d };
        let component = |v: usize, d: i8| {
            let v = v.checked_add_signed(flip(d) as isize)?;
            (v < SIDE).then_some(v)
        };
        Some(Self {
            layer: component(self.layer, dl)?,
            row: component(self.row, dr)?,
            col: component(self.col, dc)?,
        })
    }
}

/// Per-step (layer, row, col) deltas. Thirteen axes cover every straight
/// line through the cube: edge-parallel runs, face diagonals and the four
/// space diagonals. Opposite directions share one axis.
type Axis = (i8, i8, i8);

const AXES: [Axis; 13] = [
    (0, 0, 1),
    (0, 1, 0),
    (1, 0, 0),
    (0, 1, 1),
    (0, 1, -1),
    (1, 0, 1),
    (1, 0, -1),
    (1, 1, 0),
    (1, -1, 0),
    (1, 1, 1),
    (1, 1, -1),
    (1, -1, 1),
    (1, -1, -1),
];

/// Three stacked 3x3 layers.
#[derive(Clone, Debug, Default)]
pub struct CubeBoard {
    layers: GenericArray<Grid<BoardCell<Mark>, U3, U3>, U3>,
}

impl CubeBoard {
    pub fn layer(&self, index: usize) -> Option<&Grid<BoardCell<Mark>, U3, U3>> {
        self.layers.get(index)
    }

    pub fn get(&self, at: CubeIndex) -> Option<&BoardCell<Mark>> {
        self.layers
            .get(at.layer)?
            .get(GridIndex::new(at.row, at.col))
    }

    fn get_mut(&mut self, at: CubeIndex) -> Option<&mut BoardCell<Mark>> {
        self.layers
            .get_mut(at.layer)?
            .get_mut(GridIndex::new(at.row, at.col))
    }

    fn mark_at(&self, at: CubeIndex) -> Option<Mark> {
        self.get(at).and_then(|cell| cell.0)
    }

    fn is_full(&self) -> bool {
        self.layers
            .iter()
            .all(|layer| layer.iter().flatten().all(|cell| cell.is_some()))
    }
}

impl GameBoard for CubeBoard {
    type Item = BoardCell<Mark>;

    /// Rows of all three layers, top layer first.
    fn content(&self) -> Vec<Vec<Self::Item>> {
        self.layers
            .iter()
            .flat_map(|layer| layer.iter().map(|row| row.iter().cloned().collect()))
            .collect()
    }
}

/// 3D rules: three equal marks along any straight line through the cube
/// win, including vertical pillars and the space diagonals.
#[derive(Debug)]
pub struct Cube {
    players: PlayerPool<Seat>,
    state: GameState,
    field: CubeBoard,
    winning_line: Option<[CubeIndex; 3]>,
}

impl Cube {
    pub fn winning_line(&self) -> Option<[CubeIndex; 3]> {
        self.winning_line
    }

    /// Collects the maximal run of `mark` through `at` along `axis`,
    /// ordered in the axis direction.
    fn run_through(&self, at: CubeIndex, mark: Mark, axis: Axis) -> SmallVec<[CubeIndex; 3]> {
        let mut start = at;
        while let Some(prev) = start.step(axis, true) {
            if self.field.mark_at(prev) == Some(mark) {
                start = prev;
            } else {
                break;
            }
        }

        let mut run = SmallVec::new();
        let mut cursor = Some(start);
        while let Some(idx) = cursor {
            if self.field.mark_at(idx) != Some(mark) {
                break;
            }
            run.push(idx);
            cursor = idx.step(axis, false);
        }
        run
    }
}

impl Game for Cube {
    type TurnData = CubeIndex;
    type Players = PlayerPool<Seat>;
    type Board = CubeBoard;

    fn new() -> Self {
        Self {
            players: PlayerPool::new(vec![Seat::new(0, Mark::X), Seat::new(1, Mark::O)]),
            state: GameState::Turn(0),
            field: CubeBoard::default(),
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
        let mark = current.mark();
        let cell = self
            .field
            .get_mut(data)
            .ok_or_else(|| GameError::cell_out_of_bounds(data.row(), data.col()))?;
        if cell.is_some() {
            return Err(GameError::cell_is_occupied(data.row(), data.col()));
        }
        **cell = Some(mark);

        for axis in AXES {
            let run = self.run_through(data, mark, axis);
            if run.len() >= SIDE {
                self.winning_line = Some([run[0], run[1], run[2]]);
                return Ok(self.set_winner(current.id()));
            }
        }

        if self.field.is_full() {
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
