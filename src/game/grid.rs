use generic_array::{ArrayLength, GenericArray};
use std::fmt::{Display, Formatter};
use std::ops::{Deref, Index, IndexMut};

/// Index struct to access elements in the [`Grid`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GridIndex {
    row: usize,
    col: usize,
}

impl From<(usize, usize)> for GridIndex {
    fn from(value: (usize, usize)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl Display for GridIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl GridIndex {
    /// Constructs a new [`GridIndex`].
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Maps a row-major flat offset onto a grid of the given width.
    /// `width` must be non-zero.
    pub const fn from_flat(flat: usize, width: usize) -> Self {
        Self::new(flat / width, flat % width)
    }

    /// Returns value of `self.row`
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns value of `self.col`
    pub fn col(&self) -> usize {
        self.col
    }

    /// Moves the index one step in `direction`.
    /// Returns [`None`] when the step would leave the non-negative quadrant;
    /// upper bounds are the grid's concern, not the index's.
    pub fn shift(self, direction: Direction) -> Option<Self> {
        let (dr, dc) = direction.offset();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Self::new(row, col))
    }
}

/// One of the eight compass directions a [`Grid`] ray can travel in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    /// Per-step (row, col) deltas.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::UpRight => (-1, 1),
            Direction::Right => (0, 1),
            Direction::DownRight => (1, 1),
            Direction::Down => (1, 0),
            Direction::DownLeft => (1, -1),
            Direction::Left => (0, -1),
            Direction::UpLeft => (-1, -1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::UpRight => Direction::DownLeft,
            Direction::Right => Direction::Left,
            Direction::DownRight => Direction::UpLeft,
            Direction::Down => Direction::Up,
            Direction::DownLeft => Direction::UpRight,
            Direction::Left => Direction::Right,
            Direction::UpLeft => Direction::DownRight,
        }
    }
}

/// Two-dimensional fixed-length array.
/// Lengths are defined by the generic parameters `R` and `C`.
#[derive(Clone, Debug)]
pub struct Grid<T, R: ArrayLength, C: ArrayLength> {
    rows: GenericArray<GenericArray<T, C>, R>,
}

impl<T: Default, R: ArrayLength, C: ArrayLength> Default for Grid<T, R, C> {
    fn default() -> Self {
        Self {
            rows: Default::default(),
        }
    }
}

impl<T, R: ArrayLength, C: ArrayLength> Deref for Grid<T, R, C> {
    type Target = [GenericArray<T, C>];

    fn deref(&self) -> &Self::Target {
        self.rows.as_slice()
    }
}

impl<T: Display, R: ArrayLength, C: ArrayLength> Display for Grid<T, R, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.deref() {
            for val in row {
                write!(f, "{}", val)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl<T, R: ArrayLength, C: ArrayLength> Index<GridIndex> for Grid<T, R, C> {
    type Output = T;

    fn index(&self, index: GridIndex) -> &Self::Output {
        &self.rows[index.row()][index.col()]
    }
}

impl<T, R: ArrayLength, C: ArrayLength> IndexMut<GridIndex> for Grid<T, R, C> {
    fn index_mut(&mut self, index: GridIndex) -> &mut Self::Output {
        &mut self.rows[index.row()][index.col()]
    }
}

impl<T, R: ArrayLength, C: ArrayLength> Grid<T, R, C> {
    /// Bounds-checked element access.
    pub fn get(&self, index: GridIndex) -> Option<&T> {
        self.rows.get(index.row())?.get(index.col())
    }

    /// Bounds-checked mutable element access.
    pub fn get_mut(&mut self, index: GridIndex) -> Option<&mut T> {
        self.rows.get_mut(index.row())?.get_mut(index.col())
    }

    /// Returns an iterator over indexed grid elements, row by row.
    pub fn indexed_iter(&self) -> impl Iterator<Item = (GridIndex, &T)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, val)| (GridIndex::new(r, c), val))
        })
    }

    /// Returns an iterator that starts at `start` and walks in `direction`
    /// until it leaves the grid. The start cell itself is yielded first.
    pub fn ray(&self, start: GridIndex, direction: Direction) -> Ray<'_, T, R, C> {
        Ray {
            next: Some(start),
            direction,
            grid: self,
        }
    }
}

/// Iterator produced by [`Grid::ray`], yielding `(index, element)` pairs.
pub struct Ray<'a, T, R: ArrayLength, C: ArrayLength> {
    next: Option<GridIndex>,
    direction: Direction,
    grid: &'a Grid<T, R, C>,
}

impl<'a, T, R: ArrayLength, C: ArrayLength> Iterator for Ray<'a, T, R, C> {
    type Item = (GridIndex, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let at = self.next?;
        let val = self.grid.get(at)?;
        self.next = at.shift(self.direction);
        Some((at, val))
    }
}
