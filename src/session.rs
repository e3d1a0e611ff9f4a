use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::error::SetupError;
use crate::game_logic::{GameState, Phase, TickOutcome};
use crate::input::KeyCommand;
use crate::render::{draw_board, Surface};

/// A periodic timer that calls back into [`Session::on_tick`].
pub trait Ticker {
  /// Starts firing every `interval_ms`. A running timer is replaced, never
  /// doubled.
  fn start(&mut self, interval_ms:u32) -> Result<(), SetupError>;
  /// Safe to call when already stopped.
  fn stop(&mut self);
  fn is_running(&self) -> bool;
}

/// One game bound to its timer, drawing surface and food RNG.
pub struct Session<T, S, R> {
  config: GameConfig,
  state: GameState,
  ticker: T,
  surface: S,
  rng: R,
}

impl<T:Ticker, S:Surface, R:Rng> Session<T, S, R> {
  /// Fails if the config describes an arena the game cannot be played on.
  pub fn new(config:GameConfig, ticker:T, surface:S, mut rng:R) -> Result<Self, SetupError> {
    let config = config.validate()?;
    let state = GameState::new(config.grid_count(),&mut rng);
    Ok(Session {config,state,ticker,surface,rng})
  }

  /// Shows the idle board and starts the clock.
  pub fn start(&mut self) -> Result<(), SetupError> {
    self.ticker.stop();
    self.render();
    self.ticker.start(self.config.tick_interval_ms)?;
    info!(
      "snake started on a {0}x{0} grid, ticking every {1}ms",
      self.config.grid_count(), self.config.tick_interval_ms
    );
    Ok(())
  }

  /// Throws away the current game and starts a new idle one.
  pub fn reset(&mut self) -> Result<(), SetupError> {
    self.ticker.stop();
    self.state = GameState::new(self.config.grid_count(),&mut self.rng);
    self.render();
    self.ticker.start(self.config.tick_interval_ms)?;
    info!("snake reset");
    Ok(())
  }

  pub fn on_tick(&mut self) -> TickOutcome {
    let outcome = self.state.tick(&mut self.rng);
    match outcome {
      TickOutcome::Halted => return outcome,
      TickOutcome::GameOver => {
        self.ticker.stop();
        info!("game over with score {}", self.state.score());
      }
      TickOutcome::AteFood => {
        let food = self.state.food();
        debug!("food eaten, score {}, next food at ({},{})", self.state.score(), food.x, food.y);
      }
      TickOutcome::Idle | TickOutcome::Moved => {}
    }
    self.render();
    outcome
  }

  /// Applies a key press. Returns the command that was acted on, or
  /// `Ignored` if the key meant nothing in the current phase. Arrow keys
  /// always count, even when the turn itself is refused.
  pub fn on_key(&mut self, key:&str) -> Result<KeyCommand, SetupError> {
    match KeyCommand::from_key(key) {
      KeyCommand::Turn(direction) => {
        if self.state.steer(direction) {
          debug!("turning {direction:?}");
        }
        Ok(KeyCommand::Turn(direction))
      }
      KeyCommand::Reset if self.state.is_terminal() => {
        self.reset()?;
        Ok(KeyCommand::Reset)
      }
      KeyCommand::Reset | KeyCommand::Ignored => Ok(KeyCommand::Ignored),
    }
  }

  fn render(&mut self) {
    draw_board(&self.state,&self.config,&mut self.surface);
  }

  pub fn state(&self) -> &GameState {
    &self.state
  }

  pub fn config(&self) -> &GameConfig {
    &self.config
  }

  pub fn score(&self) -> u32 {
    self.state.score()
  }

  pub fn is_game_over(&self) -> bool {
    self.state.is_terminal()
  }

  pub fn phase(&self) -> Phase {
    self.state.phase()
  }

  pub fn ticker(&self) -> &T {
    &self.ticker
  }

  pub fn ticker_mut(&mut self) -> &mut T {
    &mut self.ticker
  }

  pub fn surface(&self) -> &S {
    &self.surface
  }
}
