//! Gridsnake - classic snake for the terminal
//!
//! This library provides:
//! - Core game logic: grid, creature, food, and the tick engine (game module)
//! - Keyboard handling for arrows, WASD, and vi keys (input module)
//! - TUI rendering (render module)
//! - Per-session statistics (metrics module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
