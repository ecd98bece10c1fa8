use std::time::{Duration, Instant};

/// Time source for the execution budget and event timestamps.
pub trait Clock {
  /// Time since the run started.
  fn elapsed(&self) -> Duration;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
  start: Instant,
}

impl SystemClock {
  pub fn start() -> Self {
    SystemClock {
      start: Instant::now(),
    }
  }
}

impl Clock for SystemClock {
  fn elapsed(&self) -> Duration {
    self.start.elapsed()
  }
}
