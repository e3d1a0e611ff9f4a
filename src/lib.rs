//! Grid snake for an HTML canvas.
//!
//! The engine (`game_logic`, `input`, `render`, `session`) is plain Rust and
//! knows nothing about the browser. `SnakeGame` binds it to a canvas, a
//! `setInterval` clock and the page's keyboard when built for `wasm32`.

pub mod config;
pub mod error;
pub mod game_logic;
pub mod input;
pub mod render;
pub mod seed;
pub mod session;
#[cfg(target_arch = "wasm32")]
mod web;

pub use config::GameConfig;
pub use error::SetupError;
pub use game_logic::{Cell, Direction, GameState, Phase, Snake, TickOutcome};
pub use input::KeyCommand;
pub use render::{draw_board, Palette, Surface};
pub use session::{Session, Ticker};
#[cfg(target_arch = "wasm32")]
pub use web::SnakeGame;
