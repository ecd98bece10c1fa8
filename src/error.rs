use std::time::Duration;

use thiserror::Error;

/// Why a run stopped early. Both budgets are checked before each block runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
  #[error("Too many steps! Maximum is {limit}.")]
  StepLimitExceeded { limit: u32, reached: u32 },
  #[error("Execution took too long! Maximum is {} seconds.", .limit.as_secs_f64())]
  TimeLimitExceeded { limit: Duration, elapsed: Duration },
}
