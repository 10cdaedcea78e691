//! Core game logic for the grid snake
//!
//! Everything in here is free of I/O and rendering concerns: the engine is a
//! plain state machine driven by [`SnakeEngine::tick`] and the two submit
//! entry points, so shells and tests can step it deterministically.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::SnakeEngine;
pub use food::FoodSpawner;
pub use grid::{Cell, Grid};
pub use state::{CollisionKind, GamePhase, Snapshot};
