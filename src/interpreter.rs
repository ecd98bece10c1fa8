use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Serializer};

use crate::block::{Block, BlockKind};
use crate::clock::{Clock, SystemClock};
use crate::color::{ColorMode, COLORS};
use crate::config::Config;
use crate::context::{create_initial_context, ExecutionContext};
use crate::error::LimitError;
use crate::event::{Animation, ColorChange, Draw, EventKind, ExecutionEvent, Segment, Sound, Stamp};
use crate::geometry::{self, Point};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
  pub success: bool,
  pub context: ExecutionContext,
  #[serde(
    serialize_with = "error_message",
    skip_serializing_if = "Option::is_none"
  )]
  pub error: Option<LimitError>,
  pub events: Vec<ExecutionEvent>,
}

fn error_message<S: Serializer>(
  error: &Option<LimitError>,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  match error {
    Some(error) => serializer.collect_str(error),
    None => serializer.serialize_none(),
  }
}

/// Runs `blocks` with the default limits against the system clock.
pub fn interpret_blocks(blocks: &[Block]) -> ExecutionResult {
  interpret_blocks_with(blocks, &Config::default(), SystemClock::start())
}

pub fn interpret_blocks_with<C: Clock>(
  blocks: &[Block],
  config: &Config,
  clock: C,
) -> ExecutionResult {
  let mut interpreter = Interpreter::new(config, clock);
  let outcome = blocks
    .iter()
    .try_for_each(|block| interpreter.execute_block(block));
  interpreter.finish(outcome)
}

struct Interpreter<'a, C> {
  config: &'a Config,
  clock: C,
  rng: StdRng,
  context: ExecutionContext,
  events: Vec<ExecutionEvent>,
}

impl<'a, C: Clock> Interpreter<'a, C> {
  fn new(config: &'a Config, clock: C) -> Self {
    Interpreter {
      config,
      clock,
      rng: StdRng::seed_from_u64(config.seed),
      context: create_initial_context(config),
      events: Vec::new(),
    }
  }

  fn execute_block(&mut self, block: &Block) -> Result<(), LimitError> {
    let limit = self.config.max_steps;
    self.context.step_count = self.context.step_count.checked_add(1).ok_or(
      LimitError::StepLimitExceeded {
        limit,
        reached: u32::MAX,
      },
    )?;
    let elapsed = self.clock.elapsed();
    if self.context.step_count > self.config.max_steps {
      return Err(LimitError::StepLimitExceeded {
        limit: self.config.max_steps,
        reached: self.context.step_count,
      });
    }
    if elapsed > self.config.max_execution_time {
      return Err(LimitError::TimeLimitExceeded {
        limit: self.config.max_execution_time,
        elapsed,
      });
    }
    let timestamp = elapsed.as_millis() as u64;
    trace!(
      "step {}: {} {:?} at {timestamp}ms",
      self.context.step_count,
      block.opcode,
      block.id
    );

    match block.kind() {
      BlockKind::DrawShape { shape, size } => {
        let stamp = Stamp {
          x: self.context.x,
          y: self.context.y,
          size,
          color: self.context.color.clone(),
        };
        self.emit(timestamp, EventKind::Draw(Draw::stamp(shape, stamp)));
      }
      BlockKind::MoveForward { steps } => {
        let to = geometry::forward(self.position(), self.context.angle, steps);
        self.stroke_to(timestamp, to);
        self.emit_move(timestamp);
      }
      BlockKind::TurnRight { degrees } => {
        self.context.angle += degrees;
        self.emit_turn(timestamp);
      }
      BlockKind::TurnLeft { degrees } => {
        self.context.angle -= degrees;
        self.emit_turn(timestamp);
      }
      BlockKind::PenUp => self.context.pen_down = false,
      BlockKind::PenDown => self.context.pen_down = true,
      BlockKind::SetColor { color } => {
        self.context.color = color;
        self.emit(
          timestamp,
          EventKind::Color(ColorChange::new(self.context.color.clone())),
        );
      }
      BlockKind::SetBrush { size } => self.context.brush_size = size,
      BlockKind::Repeat { times, children } => {
        if !children.is_empty() {
          for _ in 0..iterations(times) {
            for child in children {
              self.execute_block(child)?;
            }
          }
        }
      }
      BlockKind::Walk { steps } => {
        self.emit(timestamp, EventKind::Animation(Animation::Walk { steps }))
      }
      BlockKind::Jump { height } => {
        self.emit(timestamp, EventKind::Animation(Animation::Jump { height }))
      }
      BlockKind::Wave => self.emit(timestamp, EventKind::Animation(Animation::Wave)),
      BlockKind::Say { text } => self.emit(timestamp, EventKind::Speech { text }),
      BlockKind::Wait => {}
      BlockKind::PlayNote { note } => {
        self.emit(timestamp, EventKind::Sound(Sound::Note { note }))
      }
      BlockKind::PlayDrum { drum } => self.emit(
        timestamp,
        EventKind::Sound(Sound::Drum { drum_type: drum }),
      ),
      BlockKind::Spiral { turns, spacing } => {
        let path = geometry::spiral(self.position(), turns, spacing);
        self.trace_path(timestamp, path);
      }
      BlockKind::Arc { radius, angle } => {
        let heading = self.context.angle;
        let path = geometry::arc(self.position(), heading, radius, angle);
        self.trace_path(timestamp, path);
        self.context.angle = heading + angle;
      }
      BlockKind::Zigzag { segments, width } => {
        let path = geometry::zigzag(self.position(), self.context.angle, segments, width);
        self.trace_path(timestamp, path);
      }
      BlockKind::WaveLine {
        amplitude,
        frequency,
      } => {
        let path = geometry::wave(self.position(), self.context.angle, amplitude, frequency);
        self.trace_path(timestamp, path);
      }
      BlockKind::Teleport { x, y } => {
        let (center_x, center_y) = self.config.center();
        self.context.x = center_x + x;
        self.context.y = center_y + y;
        self.emit_move(timestamp);
      }
      BlockKind::Rainbow { speed } => {
        self.context.color_mode = ColorMode::Rainbow { speed };
        self.emit_style(timestamp, |change, context| {
          change.mode = Some(context.color_mode.clone())
        });
      }
      BlockKind::Gradient { from, to } => {
        self.context.color_mode = ColorMode::Gradient { from, to };
        self.emit_style(timestamp, |change, context| {
          change.mode = Some(context.color_mode.clone())
        });
      }
      BlockKind::Glow { intensity } => {
        self.context.glow_intensity = intensity;
        self.emit_style(timestamp, |change, context| {
          change.glow = Some(context.glow_intensity)
        });
      }
      BlockKind::Opacity { opacity } => {
        self.context.opacity = opacity;
        self.emit_style(timestamp, |change, context| {
          change.opacity = Some(context.opacity)
        });
      }
      BlockKind::RandomColor => {
        let (_, hex) = COLORS[self.rng.gen_range(0..COLORS.len())];
        self.context.color = hex.to_string();
        self.context.color_mode = ColorMode::Solid;
        self.emit_style(timestamp, |change, context| {
          change.mode = Some(context.color_mode.clone())
        });
      }
      BlockKind::Unknown(opcode) => {
        debug!("skipping unknown block type {opcode:?} ({:?})", block.id)
      }
    }
    Ok(())
  }

  fn position(&self) -> Point {
    (self.context.x, self.context.y)
  }

  fn emit(&mut self, timestamp: u64, kind: EventKind) {
    self.events.push(ExecutionEvent { kind, timestamp });
  }

  fn emit_move(&mut self, timestamp: u64) {
    let (x, y) = self.position();
    self.emit(timestamp, EventKind::Move { x, y });
  }

  fn emit_turn(&mut self, timestamp: u64) {
    let angle = self.context.angle;
    self.emit(timestamp, EventKind::Turn { angle });
  }

  fn emit_style<F: FnOnce(&mut ColorChange, &ExecutionContext)>(
    &mut self,
    timestamp: u64,
    fill: F,
  ) {
    let mut change = ColorChange::new(self.context.color.clone());
    fill(&mut change, &self.context);
    self.emit(timestamp, EventKind::Color(change));
  }

  /// Moves the turtle to `to`, leaving a line when the pen is down.
  fn stroke_to(&mut self, timestamp: u64, to: Point) {
    let from = self.position();
    if self.context.pen_down {
      let segment = Segment {
        from_x: from.0,
        from_y: from.1,
        to_x: to.0,
        to_y: to.1,
        color: self.context.color.clone(),
        size: self.context.brush_size,
      };
      self.emit(timestamp, EventKind::Draw(Draw::Line(segment)));
    }
    self.context.x = to.0;
    self.context.y = to.1;
  }

  fn trace_path(&mut self, timestamp: u64, path: Vec<Point>) {
    for point in path {
      self.stroke_to(timestamp, point);
    }
    self.emit_move(timestamp);
  }

  fn finish(self, outcome: Result<(), LimitError>) -> ExecutionResult {
    match &outcome {
      Ok(()) => debug!(
        "run finished: {} steps, {} events",
        self.context.step_count,
        self.events.len()
      ),
      Err(error) => debug!(
        "run stopped after {} events: {error}",
        self.events.len()
      ),
    }
    ExecutionResult {
      success: outcome.is_ok(),
      context: self.context,
      error: outcome.err(),
      events: self.events,
    }
  }
}

/// How many times a repeat block runs its children. Zero, negative and NaN
/// counts run nothing; fractional counts round up.
fn iterations(times: f64) -> u64 {
  if times.is_nan() || times <= 0. {
    0
  } else {
    times.ceil() as u64
  }
}
