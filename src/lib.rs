//! Grid snake with a start screen, game-over/restart cycle, an eat sound and
//! a little screen shake, drawn with macroquad.

pub mod app;
pub mod audio;
pub mod clock;
pub mod config;
pub mod effects;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod snake;

pub use config::GameConfig;
pub use game::{Game, GameEvent, Mode, Snapshot};
pub use grid::{Cell, Direction, Grid};
pub use snake::{Collision, MoveResult, Snake};
