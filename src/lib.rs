//! Interpreter for kidcode block scripts.
//!
//! A script is a list of [`Block`]s. [`interpret_blocks`] walks it against a
//! fresh turtle [`ExecutionContext`] and returns the log of draw, move, turn,
//! color, sound, animation and speech events a renderer plays back, stopping
//! early when the step or time budget runs out.

pub mod block;
pub mod clock;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod geometry;
pub mod interpreter;
pub mod palette;
pub mod script;
pub mod validate;

pub use block::{Block, BlockKind, Value};
pub use clock::{Clock, SystemClock};
pub use config::{Config, MAX_EXECUTION_TIME, MAX_STEPS};
pub use context::{create_initial_context, ExecutionContext};
pub use error::LimitError;
pub use event::{EventKind, ExecutionEvent};
pub use interpreter::{interpret_blocks, interpret_blocks_with, ExecutionResult};
pub use script::{deserialize_blocks, serialize_blocks};
pub use validate::{validate_blocks, Diagnostic};
