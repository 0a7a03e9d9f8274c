use itertools::iproduct;

pub const GRID_SIZE: usize = 8;

/// Grid address shared by the board model and the view. Fields are readable
/// everywhere but only this module can construct one.
#[readonly::make]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    /// Panics when either component is outside the grid.
    pub fn new(x: usize, y: usize) -> Self {
        assert!(
            x < GRID_SIZE && y < GRID_SIZE,
            "coordinate ({}, {}) outside the {}x{} grid",
            x,
            y,
            GRID_SIZE,
            GRID_SIZE
        );
        Coordinate { x, y }
    }

    pub fn try_new(x: usize, y: usize) -> Option<Self> {
        if x < GRID_SIZE && y < GRID_SIZE {
            Some(Coordinate { x, y })
        } else {
            None
        }
    }

    /// Every coordinate, row by row.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        iproduct!(0..GRID_SIZE, 0..GRID_SIZE).map(|(y, x)| Coordinate { x, y })
    }

    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
