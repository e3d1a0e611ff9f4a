use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game_logic::{GameState, Phase};

/// A raster target that accepts cell-sized rectangles. Coordinates are in
/// pixels, measured from the top-left corner of the arena.
pub trait Surface {
  fn clear(&mut self, colour:&str, extent:f64);
  fn fill_cell(&mut self, x:f64, y:f64, size:f64, colour:&str);
  fn stroke_cell(&mut self, x:f64, y:f64, size:f64, colour:&str);

  /// Score and phase for whatever HUD sits next to the arena.
  fn show_status(&mut self, _score:u32, _phase:Phase) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
  pub background: String,
  pub food: String,
  pub head: String,
  pub body: String,
  pub border: String,
}

impl Default for Palette {
  fn default() -> Self {
    Palette {
      background: "#1a1a1a".to_string(),
      food: "#f97316".to_string(),
      head: "#22c55e".to_string(),
      body: "#86efac".to_string(),
      border: "#14532d".to_string(),
    }
  }
}

/// Paints one frame. Reads the state only.
pub fn draw_board<S:Surface + ?Sized>(state:&GameState, config:&GameConfig, surface:&mut S) {
  let palette = &config.palette;
  let size = config.cell_size as f64;
  let px = |v:i32| v as f64 * size;

  surface.clear(&palette.background, config.arena_size as f64);

  let food = state.food();
  surface.fill_cell(px(food.x), px(food.y), size, &palette.food);

  for (i,cell) in state.snake().cells().enumerate() {
    let colour = if i == 0 {&palette.head} else {&palette.body};
    surface.fill_cell(px(cell.x), px(cell.y), size, colour);
    surface.stroke_cell(px(cell.x), px(cell.y), size, &palette.border);
  }

  surface.show_status(state.score(), state.phase());
}
