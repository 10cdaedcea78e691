use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move cell one step in a direction
    pub fn stepped(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The fixed square coordinate space the game plays on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Number of cells along one edge
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Check whether a cell lies within the grid bounds
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.size as i32 && cell.y >= 0 && cell.y < self.size as i32
    }

    /// The spawn anchor for a fresh creature
    pub fn center(&self) -> Cell {
        Cell::new((self.size / 2) as i32, (self.size / 2) as i32)
    }
}
