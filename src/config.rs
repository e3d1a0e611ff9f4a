use serde::{Deserialize, Serialize};

use crate::error::SetupError;
use crate::render::Palette;

const ARENA_SIZE_DEFAULT:u32 = 400;
const CELL_SIZE_DEFAULT:u32 = 20;
const TICK_INTERVAL_MS_DEFAULT:u32 = 100;
const GRID_COUNT_MIN:u32 = 3;

/// Everything a host can tune before a game starts. Field names follow the
/// JS side (`arenaSize`, `tickIntervalMs`, ...) and every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
  /// Edge length of the square arena in pixels.
  pub arena_size: u32,
  /// Edge length of one cell in pixels.
  pub cell_size: u32,
  pub tick_interval_ms: u32,
  pub palette: Palette,
  pub canvas_id: String,
  pub score_element_id: Option<String>,
  pub overlay_element_id: Option<String>,
  pub hint_element_id: Option<String>,
  /// Fixes food placement for reproducible games.
  pub seed: Option<u64>,
}

impl Default for GameConfig {
  fn default() -> Self {
    GameConfig {
      arena_size: ARENA_SIZE_DEFAULT,
      cell_size: CELL_SIZE_DEFAULT,
      tick_interval_ms: TICK_INTERVAL_MS_DEFAULT,
      palette: Palette::default(),
      canvas_id: "canvas".to_string(),
      score_element_id: None,
      overlay_element_id: None,
      hint_element_id: None,
      seed: None,
    }
  }
}

impl GameConfig {
  /// Number of cells along one edge of the arena. Saturates for configs
  /// that [`validate`](Self::validate) would reject.
  pub fn grid_count(&self) -> i32 {
    i32::try_from(self.arena_size / self.cell_size.max(1)).unwrap_or(i32::MAX)
  }

  pub fn validate(self) -> Result<Self, SetupError> {
    if self.cell_size == 0 {
      return Err(SetupError::InvalidConfig("cell size must be positive".into()));
    }
    if self.arena_size % self.cell_size != 0 {
      return Err(SetupError::InvalidConfig(format!(
        "arena size {} is not a multiple of cell size {}",
        self.arena_size, self.cell_size
      )));
    }
    let cells = self.arena_size / self.cell_size;
    if cells < GRID_COUNT_MIN {
      return Err(SetupError::InvalidConfig(format!(
        "grid must be at least {GRID_COUNT_MIN} cells wide"
      )));
    }
    if i32::try_from(cells).is_err() {
      return Err(SetupError::InvalidConfig(format!(
        "grid of {cells} cells per side is too large"
      )));
    }
    if self.tick_interval_ms == 0 {
      return Err(SetupError::InvalidConfig("tick interval must be positive".into()));
    }
    Ok(self)
  }
}
