use std::collections::VecDeque;

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction{Up,Down,Left,Right}

impl Direction {
  pub fn delta(self) -> (i32,i32) {
    match self {
      Direction::Up    => ( 0,-1),
      Direction::Down  => ( 0, 1),
      Direction::Left  => (-1, 0),
      Direction::Right => ( 1, 0),
    }
  }

  pub fn is_opposite(self, other:Direction) -> bool {
    matches!(
      (self,other),
      (Direction::Up,Direction::Down)   | (Direction::Down,Direction::Up) |
      (Direction::Left,Direction::Right) | (Direction::Right,Direction::Left)
    )
  }
}

/// One grid square, addressed by column and row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
  pub x: i32,
  pub y: i32,
}

impl Cell {
  pub const fn new(x:i32, y:i32) -> Cell {
    Cell {x,y}
  }

  pub fn step(self, direction:Direction) -> Cell {
    let (dx,dy) = direction.delta();
    Cell::new(self.x + dx, self.y + dy)
  }
}

/// Lifecycle phase, derived from the state rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {Idle,Running,GameOver}

impl Phase {
  pub fn as_str(self) -> &'static str {
    match self {
      Phase::Idle     => "idle",
      Phase::Running  => "running",
      Phase::GameOver => "game-over",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
  /// No direction chosen yet; nothing moved.
  Idle,
  Moved,
  AteFood,
  /// The head hit a wall or the body this tick.
  GameOver,
  /// Tick arrived after the game had already ended.
  Halted,
}

/// Head first, tail last. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
  body: VecDeque<Cell>,
}

impl Snake {
  fn new(head:Cell) -> Snake {
    Snake {body: VecDeque::from([head])}
  }

  pub fn head(&self) -> Cell {
    self.body[0]
  }

  pub fn len(&self) -> usize {
    self.body.len()
  }

  /// Always false for a snake that came out of a [`GameState`].
  pub fn is_empty(&self) -> bool {
    self.body.is_empty()
  }

  pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
    self.body.iter().copied()
  }

  pub fn occupies(&self, cell:Cell) -> bool {
    self.body.contains(&cell)
  }

  fn advance(&mut self, new_head:Cell) {
    self.body.push_front(new_head);
    self.body.pop_back();
  }

  fn grow(&mut self, new_head:Cell) {
    self.body.push_front(new_head);
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
  grid_count: i32,
  snake: Snake,
  food: Cell,
  direction: Option<Direction>,
  direction_locked: bool,
  score: u32,
  terminal: bool,
}

/// Picks a cell with both coordinates in `1..grid_count`. The snake body is
/// not consulted, so food may land underneath it.
pub fn spawn_food<R:Rng>(grid_count:i32, rng:&mut R) -> Cell {
  Cell::new(rng.gen_range(1..grid_count), rng.gen_range(1..grid_count))
}

impl GameState {
  /// A fresh idle game: one-cell snake in the middle of the grid.
  pub fn new<R:Rng>(grid_count:i32, rng:&mut R) -> GameState {
    let centre = grid_count / 2;
    GameState {
      grid_count,
      snake: Snake::new(Cell::new(centre,centre)),
      food: spawn_food(grid_count,rng),
      direction: None,
      direction_locked: false,
      score: 0,
      terminal: false,
    }
  }

  /// Builds a mid-game layout. `snake` is head first.
  ///
  /// # Panics
  ///
  /// Panics if `snake` yields no cells.
  pub fn from_parts(
    grid_count:i32,
    snake:impl IntoIterator<Item = Cell>,
    food:Cell,
    direction:Option<Direction>,
  ) -> GameState {
    let body:VecDeque<Cell> = snake.into_iter().collect();
    assert!(!body.is_empty(), "a snake needs at least a head");
    GameState {
      grid_count,
      snake: Snake {body},
      food,
      direction,
      direction_locked: false,
      score: 0,
      terminal: false,
    }
  }

  pub fn with_score(mut self, score:u32) -> GameState {
    self.score = score;
    self
  }

  pub fn grid_count(&self) -> i32 {
    self.grid_count
  }

  pub fn snake(&self) -> &Snake {
    &self.snake
  }

  pub fn food(&self) -> Cell {
    self.food
  }

  pub fn direction(&self) -> Option<Direction> {
    self.direction
  }

  pub fn score(&self) -> u32 {
    self.score
  }

  pub fn is_terminal(&self) -> bool {
    self.terminal
  }

  pub fn is_direction_locked(&self) -> bool {
    self.direction_locked
  }

  pub fn phase(&self) -> Phase {
    match (self.terminal,self.direction) {
      (true,_)       => Phase::GameOver,
      (false,Some(_)) => Phase::Running,
      (false,None)    => Phase::Idle,
    }
  }

  fn in_bounds(&self, cell:Cell) -> bool {
    (0..self.grid_count).contains(&cell.x) && (0..self.grid_count).contains(&cell.y)
  }

  /// Requests a turn. At most one turn is taken per tick: the first accepted
  /// request locks the slot until the next tick clears it. A reversal is
  /// refused without taking the lock. Returns whether the turn was taken.
  pub fn steer(&mut self, requested:Direction) -> bool {
    if self.terminal || self.direction_locked {return false;}
    if let Some(current) = self.direction {
      if current.is_opposite(requested) {return false;}
    }
    self.direction = Some(requested);
    self.direction_locked = true;
    true
  }

  /// Advances the game by one cell.
  pub fn tick<R:Rng>(&mut self, rng:&mut R) -> TickOutcome {
    if self.terminal {return TickOutcome::Halted;}

    let outcome = match self.direction {
      None => TickOutcome::Idle,
      Some(direction) => {
        let next = self.snake.head().step(direction);
        // Checked against the body before the tail moves, so following
        // your own tail into its current cell is fatal.
        if !self.in_bounds(next) || self.snake.occupies(next) {
          self.terminal = true;
          TickOutcome::GameOver
        } else if next == self.food {
          self.score += 1;
          self.food = spawn_food(self.grid_count,rng);
          self.snake.grow(next);
          TickOutcome::AteFood
        } else {
          self.snake.advance(next);
          TickOutcome::Moved
        }
      }
    };

    self.direction_locked = false;
    outcome
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::SmallRng, SeedableRng};

  fn rng() -> SmallRng {
    SmallRng::seed_from_u64(0x5EED)
  }

  fn cells(pairs:&[(i32,i32)]) -> Vec<Cell> {
    pairs.iter().map(|&(x,y)| Cell::new(x,y)).collect()
  }

  #[test]
  fn opposite_directions() {
    assert!(Direction::Up.is_opposite(Direction::Down));
    assert!(Direction::Down.is_opposite(Direction::Up));
    assert!(Direction::Left.is_opposite(Direction::Right));
    assert!(Direction::Right.is_opposite(Direction::Left));
    assert!(!Direction::Up.is_opposite(Direction::Up));
    assert!(!Direction::Up.is_opposite(Direction::Left));
    assert!(!Direction::Right.is_opposite(Direction::Down));
  }

  #[test]
  fn cell_steps_one_unit() {
    let c = Cell::new(5,5);
    assert_eq!(c.step(Direction::Up),    Cell::new(5,4));
    assert_eq!(c.step(Direction::Down),  Cell::new(5,6));
    assert_eq!(c.step(Direction::Left),  Cell::new(4,5));
    assert_eq!(c.step(Direction::Right), Cell::new(6,5));
  }

  #[test]
  fn new_game_is_idle_in_the_centre() {
    let state = GameState::new(20,&mut rng());
    assert_eq!(state.snake().cells().collect::<Vec<_>>(), cells(&[(10,10)]));
    assert_eq!(state.direction(), None);
    assert_eq!(state.score(), 0);
    assert!(!state.is_terminal());
    assert!(!state.is_direction_locked());
    assert_eq!(state.phase(), Phase::Idle);
  }

  #[test]
  fn spawned_food_skips_row_and_column_zero() {
    let mut rng = rng();
    for _ in 0..2000 {
      let food = spawn_food(20,&mut rng);
      assert!((1..20).contains(&food.x), "{food:?}");
      assert!((1..20).contains(&food.y), "{food:?}");
    }
  }

  #[test]
  fn eaten_food_is_replaced_from_the_rng() {
    let mut expected_rng = rng();
    let expected = spawn_food(20,&mut expected_rng);
    let mut state =
      GameState::from_parts(20,cells(&[(5,5)]),Cell::new(6,5),Some(Direction::Right));
    assert_eq!(state.tick(&mut rng()), TickOutcome::AteFood);
    assert_eq!(state.food(), expected);
  }

  #[test]
  #[should_panic(expected = "at least a head")]
  fn from_parts_needs_a_head() {
    GameState::from_parts(20,Vec::new(),Cell::new(1,1),None);
  }

  #[test]
  fn snake_from_a_state_is_never_empty() {
    let state = GameState::new(20,&mut rng());
    assert!(!state.snake().is_empty());
    assert_eq!(state.snake().len(), 1);
  }

  #[test]
  fn idle_tick_changes_nothing() {
    let mut state = GameState::new(20,&mut rng());
    let before = state.clone();
    assert_eq!(state.tick(&mut rng()), TickOutcome::Idle);
    assert_eq!(state, before);
  }

  #[test]
  fn reversal_is_rejected_without_locking() {
    let mut state =
      GameState::from_parts(20,cells(&[(5,5),(5,6)]),Cell::new(1,1),Some(Direction::Up));
    assert!(!state.steer(Direction::Down));
    assert_eq!(state.direction(), Some(Direction::Up));
    assert!(!state.is_direction_locked());
  }

  #[test]
  fn second_turn_in_one_tick_is_dropped() {
    let mut state =
      GameState::from_parts(20,cells(&[(5,5),(5,6)]),Cell::new(1,1),Some(Direction::Up));
    assert!(state.steer(Direction::Left));
    assert!(state.is_direction_locked());
    // Would otherwise sneak a reversal past the neck.
    assert!(!state.steer(Direction::Down));
    assert_eq!(state.direction(), Some(Direction::Left));

    state.tick(&mut rng());
    assert!(!state.is_direction_locked());
    assert!(state.steer(Direction::Down));
  }

  #[test]
  fn first_turn_is_accepted_from_idle() {
    let mut state = GameState::new(20,&mut rng());
    assert!(state.steer(Direction::Down));
    assert_eq!(state.phase(), Phase::Running);
  }

  #[test]
  fn move_keeps_length_and_drops_tail() {
    let mut state = GameState::from_parts(
      20,cells(&[(5,5),(5,6),(5,7)]),Cell::new(1,1),Some(Direction::Up));
    assert_eq!(state.tick(&mut rng()), TickOutcome::Moved);
    assert_eq!(state.snake().cells().collect::<Vec<_>>(), cells(&[(5,4),(5,5),(5,6)]));
  }

  #[test]
  fn eating_grows_and_scores() {
    let mut state = GameState::from_parts(
      20,cells(&[(5,5),(5,6)]),Cell::new(5,4),Some(Direction::Up)).with_score(3);
    assert_eq!(state.tick(&mut rng()), TickOutcome::AteFood);
    assert_eq!(state.score(), 4);
    let food = state.food();
    assert!((1..20).contains(&food.x) && (1..20).contains(&food.y), "{food:?}");
    assert_eq!(state.snake().cells().collect::<Vec<_>>(), cells(&[(5,4),(5,5),(5,6)]));
  }

  #[test]
  fn leaving_the_grid_ends_the_game() {
    for (head,direction) in [
      ((0,5),Direction::Left), ((19,5),Direction::Right),
      ((5,0),Direction::Up),   ((5,19),Direction::Down),
    ] {
      let mut state =
        GameState::from_parts(20,cells(&[head]),Cell::new(1,1),Some(direction));
      let before = state.snake().clone();
      assert_eq!(state.tick(&mut rng()), TickOutcome::GameOver);
      assert!(state.is_terminal());
      assert_eq!(state.snake(), &before);
    }
  }

  #[test]
  fn moving_into_the_tail_cell_is_fatal() {
    // Square loop: head at (5,5) heading down into the tail at (5,6).
    let mut state = GameState::from_parts(
      20,cells(&[(5,5),(6,5),(6,6),(5,6)]),Cell::new(1,1),Some(Direction::Down));
    assert_eq!(state.tick(&mut rng()), TickOutcome::GameOver);
    assert!(state.is_terminal());
  }

  #[test]
  fn terminal_state_is_frozen() {
    let mut state =
      GameState::from_parts(20,cells(&[(0,5)]),Cell::new(1,1),Some(Direction::Left));
    state.tick(&mut rng());
    let frozen = state.clone();
    assert!(!state.steer(Direction::Up));
    assert_eq!(state.tick(&mut rng()), TickOutcome::Halted);
    assert_eq!(state, frozen);
    assert_eq!(state.phase(), Phase::GameOver);
  }
}
