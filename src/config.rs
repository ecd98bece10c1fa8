use std::time::Duration;

/// Most block executions a single run may perform, loop expansion included.
pub const MAX_STEPS: u32 = 500;
/// Wall-clock budget of a single run.
pub const MAX_EXECUTION_TIME: Duration = Duration::from_millis(3000);

pub const CANVAS_WIDTH: f64 = 600.;
pub const CANVAS_HEIGHT: f64 = 400.;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  pub max_steps: u32,
  pub max_execution_time: Duration,
  pub canvas_width: f64,
  pub canvas_height: f64,
  /// Seed for `randomColor`, so equal scripts paint equal pictures.
  pub seed: u64,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      max_steps: MAX_STEPS,
      max_execution_time: MAX_EXECUTION_TIME,
      canvas_width: CANVAS_WIDTH,
      canvas_height: CANVAS_HEIGHT,
      seed: 0,
    }
  }
}

impl Config {
  pub fn center(&self) -> (f64, f64) {
    (self.canvas_width / 2., self.canvas_height / 2.)
  }
}
