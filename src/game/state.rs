use super::direction::Direction;
use super::grid::{Cell, Grid};

/// The creature crawling the grid
///
/// Body cells are ordered head first. The committed `heading` is the
/// direction actually applied on a tick; `pending` holds the latest
/// arbitrated input and is committed at the start of the next tick. Keeping
/// the two apart means two inputs queued inside one tick window can never
/// fold into a 180-degree turn.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Snake {
    pub(crate) body: Vec<Cell>,
    pub(crate) heading: Direction,
    pub(crate) pending: Direction,
}

impl Snake {
    /// Create a new snake extending backwards from the given head
    pub(crate) fn new(head: Cell, heading: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = heading.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self {
            body,
            heading,
            pending: heading,
        }
    }

    /// Get the head cell
    pub(crate) fn head(&self) -> Cell {
        self.body[0]
    }

    /// All occupied cells, head first
    pub(crate) fn cells(&self) -> &[Cell] {
        &self.body
    }

    /// Latch a steering input, rejecting an exact reversal of the committed
    /// heading. Returns whether the input was accepted.
    ///
    /// The test runs against `heading`, not `pending`: even with several
    /// inputs queued before the next tick, none of them can flip the
    /// creature back onto itself.
    pub(crate) fn steer(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.heading) {
            return false;
        }
        self.pending = direction;
        true
    }

    /// Commit the pending heading for this tick
    pub(crate) fn commit_heading(&mut self) {
        self.heading = self.pending;
    }

    /// The cell the head enters when stepping along the committed heading
    pub(crate) fn next_head(&self) -> Cell {
        self.head().stepped(self.heading)
    }

    /// Check whether a cell is occupied by any segment, tail included
    pub(crate) fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Prepend the new head, dropping the tail unless the creature grows
    pub(crate) fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }
}

/// Where the engine is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Constructed or reset, not ticking, awaiting the first steering input
    Idle,
    /// The step timer is live
    Running,
    /// Terminal; awaiting an explicit restart signal
    Over,
}

/// What ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// The head left the grid
    Wall,
    /// The head entered an occupied cell
    Body,
}

/// Complete mutable game state, owned by the engine
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GameState {
    pub(crate) snake: Snake,
    pub(crate) food: Cell,
    pub(crate) score: u32,
    pub(crate) phase: GamePhase,
    pub(crate) collision: Option<CollisionKind>,
}

impl GameState {
    /// The creation state: idle, score zero, no collision on record
    pub(crate) fn new(snake: Snake, food: Cell) -> Self {
        Self {
            snake,
            food,
            score: 0,
            phase: GamePhase::Idle,
            collision: None,
        }
    }

    /// Build the external view of this state
    pub(crate) fn snapshot(&self, grid: Grid) -> Snapshot {
        Snapshot {
            grid,
            cells: self.snake.cells().to_vec(),
            food: self.food,
            score: self.score,
            phase: self.phase,
            collision: self.collision,
        }
    }
}

/// Read-only view of the game handed to renderers and observers
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// The board the game plays on
    pub grid: Grid,
    /// Creature cells, head first
    pub cells: Vec<Cell>,
    /// Current food cell
    pub food: Cell,
    /// Foods eaten this game
    pub score: u32,
    /// Lifecycle phase
    pub phase: GamePhase,
    /// Set once the phase is `Over`
    pub collision: Option<CollisionKind>,
}
