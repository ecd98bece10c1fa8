//! Integration tests for the block interpreter:
//! - turtle geometry and pen state
//! - event payloads and ordering
//! - repeat expansion and step counting
//! - step and time budgets
//! - compound motion and color-style blocks

use std::cell::Cell;
use std::time::Duration;

use kidcode::event::{Animation, ColorChange, Draw, Segment, Sound, Stamp};
use kidcode::{
  interpret_blocks, interpret_blocks_with, validate_blocks, Block, Clock, Config, EventKind,
  ExecutionResult, LimitError,
};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

/// Clock that advances by a fixed tick every time it is read.
struct SteppingClock {
  tick: Duration,
  reads: Cell<u32>,
}

impl SteppingClock {
  fn new(tick_ms: u64) -> Self {
    SteppingClock {
      tick: Duration::from_millis(tick_ms),
      reads: Cell::new(0),
    }
  }
}

impl Clock for SteppingClock {
  fn elapsed(&self) -> Duration {
    let reads = self.reads.get();
    self.reads.set(reads + 1);
    self.tick * reads
  }
}

fn run(blocks: &[Block]) -> ExecutionResult {
  interpret_blocks_with(blocks, &Config::default(), SteppingClock::new(0))
}

fn kinds(result: &ExecutionResult) -> Vec<EventKind> {
  result.events.iter().map(|event| event.kind.clone()).collect()
}

fn names(result: &ExecutionResult) -> Vec<&'static str> {
  result.events.iter().map(|event| event.kind.name()).collect()
}

fn repeat(id: &str, times: i64, children: Vec<Block>) -> Block {
  children
    .into_iter()
    .fold(Block::new(id, "repeatMagic").param("times", times), Block::child)
}

fn close(a: f64, b: f64) -> bool {
  (a - b).abs() < 1e-9
}

// ══════════════════════════════════════════════════════════════════════════════
// Geometry & pen
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn move_forward_up_draws_a_line() {
  let result = run(&[Block::new("1", "moveForward").param("steps", 100)]);
  assert!(result.success);
  assert!(close(result.context.x, 300.));
  assert!(close(result.context.y, 100.));
  assert_eq!(result.events.len(), 2);
  match &result.events[0].kind {
    EventKind::Draw(Draw::Line(Segment {
      from_x,
      from_y,
      to_x,
      to_y,
      color,
      size,
    })) => {
      assert_eq!((*from_x, *from_y), (300., 200.));
      assert!(close(*to_x, 300.));
      assert!(close(*to_y, 100.));
      assert_eq!(color, "#2D3436");
      assert_eq!(*size, 3.);
    }
    other => panic!("expected a line, got {other:?}"),
  }
  match result.events[1].kind {
    EventKind::Move { x, y } => {
      assert!(close(x, 300.));
      assert!(close(y, 100.));
    }
    ref other => panic!("expected a move, got {other:?}"),
  }
  assert_eq!(result.events[0].timestamp, result.events[1].timestamp);
}

#[test]
fn pen_up_moves_without_drawing() {
  let result = run(&[
    Block::new("1", "penUp"),
    Block::new("2", "moveForward").param("steps", 10),
    Block::new("3", "penDown"),
    Block::new("4", "moveForward").param("steps", 10),
  ]);
  assert!(result.success);
  assert_eq!(names(&result), vec!["move", "draw", "move"]);
  assert!(result.context.pen_down);
  assert!(close(result.context.y, 180.));
}

#[test]
fn turns_accumulate_without_normalizing() {
  let result = run(&[
    Block::new("1", "turnRight").param("degrees", 300),
    Block::new("2", "turnRight").param("degrees", 300),
    Block::new("3", "turnLeft").param("degrees", 45),
  ]);
  assert_eq!(result.context.angle, -90. + 300. + 300. - 45.);
  assert_eq!(
    kinds(&result),
    vec![
      EventKind::Turn { angle: 210. },
      EventKind::Turn { angle: 510. },
      EventKind::Turn { angle: 465. },
    ]
  );
}

#[test]
fn square_path_returns_home() {
  let side = vec![
    Block::new("m", "moveForward").param("steps", 50),
    Block::new("t", "turnRight").param("degrees", 90),
  ];
  let result = run(&[repeat("r", 4, side)]);
  assert!(result.success);
  assert!(close(result.context.x, 300.));
  assert!(close(result.context.y, 200.));
  assert_eq!(result.context.angle, 270.);
  let lines = result
    .events
    .iter()
    .filter(|event| matches!(event.kind, EventKind::Draw(Draw::Line(_))))
    .count();
  assert_eq!(lines, 4);
}

#[test]
fn brush_size_flows_into_lines() {
  let result = run(&[
    Block::new("1", "setBrush").param("size", 12),
    Block::new("2", "moveForward").param("steps", 5),
  ]);
  assert_eq!(result.context.brush_size, 12.);
  match &result.events[0].kind {
    EventKind::Draw(Draw::Line(segment)) => assert_eq!(segment.size, 12.),
    other => panic!("expected a line, got {other:?}"),
  }
}

// ══════════════════════════════════════════════════════════════════════════════
// Event payloads
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn set_color_then_circle_keeps_raw_color() {
  let result = run(&[
    Block::new("1", "setColor").param("color", "blue"),
    Block::new("2", "drawCircle").param("size", 50),
  ]);
  assert!(result.success);
  assert_eq!(result.context.color, "blue");
  assert_eq!(
    kinds(&result),
    vec![
      EventKind::Color(ColorChange::new("blue")),
      EventKind::Draw(Draw::Circle(Stamp {
        x: 300.,
        y: 200.,
        size: 50.,
        color: "blue".into(),
      })),
    ]
  );
}

#[test]
fn every_shape_stamps_at_the_turtle() {
  let result = run(&[
    Block::new("1", "drawSquare").param("size", 20),
    Block::new("2", "drawTriangle").param("size", 30),
    Block::new("3", "drawStar").param("size", 40),
    Block::new("4", "drawHeart"),
  ]);
  let stamp = |size: f64| Stamp {
    x: 300.,
    y: 200.,
    size,
    color: "#2D3436".into(),
  };
  assert_eq!(
    kinds(&result),
    vec![
      EventKind::Draw(Draw::Square(stamp(20.))),
      EventKind::Draw(Draw::Triangle(stamp(30.))),
      EventKind::Draw(Draw::Star(stamp(40.))),
      EventKind::Draw(Draw::Heart(stamp(50.))),
    ]
  );
}

#[test]
fn animation_speech_and_sound() {
  let result = run(&[
    Block::new("1", "walk").param("steps", 120),
    Block::new("2", "jump").param("height", 80),
    Block::new("3", "wave"),
    Block::new("4", "say").param("text", "Hi there"),
    Block::new("5", "wait").param("seconds", 2),
    Block::new("6", "playNote").param("note", "E"),
    Block::new("7", "playDrum").param("type", "clap"),
  ]);
  assert!(result.success);
  assert_eq!(result.context.step_count, 7);
  assert_eq!(
    kinds(&result),
    vec![
      EventKind::Animation(Animation::Walk { steps: 120. }),
      EventKind::Animation(Animation::Jump { height: 80. }),
      EventKind::Animation(Animation::Wave),
      EventKind::Speech {
        text: "Hi there".into()
      },
      EventKind::Sound(Sound::Note { note: "E".into() }),
      EventKind::Sound(Sound::Drum {
        drum_type: "clap".into()
      }),
    ]
  );
}

#[test]
fn unknown_blocks_are_skipped_but_counted() {
  let script = [
    Block::new("1", "flyToMoon"),
    Block::new("2", "wave"),
    Block::default(),
  ];
  let result = run(&script);
  assert!(result.success);
  assert_eq!(result.context.step_count, 3);
  assert_eq!(names(&result), vec!["animation"]);
  assert_eq!(validate_blocks(&script).len(), 2);
}

#[test]
fn out_of_range_params_still_run() {
  let script = [Block::new("1", "moveForward").param("steps", 100)];
  assert_eq!(validate_blocks(&script).len(), 1);
  assert!(run(&script).success);
}

#[test]
fn timestamps_never_decrease() {
  let body = vec![
    Block::new("m", "moveForward").param("steps", 3),
    Block::new("t", "turnLeft").param("degrees", 10),
  ];
  let result = interpret_blocks_with(&[repeat("r", 20, body)], &Config::default(), SteppingClock::new(1));
  assert!(result.success);
  assert!(result
    .events
    .windows(2)
    .all(|pair| pair[0].timestamp <= pair[1].timestamp));
  assert_eq!(result.events.last().unwrap().timestamp, 40);
}

#[test]
fn repeated_runs_are_identical() {
  let script = [
    Block::new("1", "randomColor"),
    repeat(
      "2",
      5,
      vec![
        Block::new("3", "moveForward").param("steps", 7),
        Block::new("4", "turnRight").param("degrees", 72),
        Block::new("5", "randomColor"),
      ],
    ),
  ];
  let first = run(&script);
  let second = run(&script);
  assert_eq!(first, second);

  let real_clock = interpret_blocks(&script);
  assert_eq!(real_clock.context, first.context);
  assert_eq!(kinds(&real_clock), kinds(&first));
}

// ══════════════════════════════════════════════════════════════════════════════
// Repeat expansion & step counting
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn repeat_counts_itself_once_plus_each_child_run() {
  let body = vec![
    Block::new("a", "wave"),
    Block::new("b", "wait"),
    Block::new("c", "penUp"),
  ];
  let result = run(&[repeat("r", 6, body), Block::new("z", "say")]);
  assert!(result.success);
  assert_eq!(result.context.step_count, 6 * 3 + 1 + 1);
  assert_eq!(result.events.len(), 6 + 1);
}

#[test]
fn nested_repeats_multiply() {
  let inner = repeat("inner", 3, vec![Block::new("w", "wave")]);
  let result = run(&[repeat("outer", 4, vec![inner])]);
  assert!(result.success);
  assert_eq!(result.context.step_count, 1 + 4 * (1 + 3));
  assert_eq!(result.events.len(), 12);
}

#[test]
fn children_run_in_document_order_each_pass() {
  let result = run(&[repeat(
    "r",
    2,
    vec![
      Block::new("a", "playNote").param("note", "C"),
      Block::new("b", "playNote").param("note", "G"),
    ],
  )]);
  let notes: Vec<_> = result
    .events
    .iter()
    .map(|event| match &event.kind {
      EventKind::Sound(Sound::Note { note }) => note.as_str(),
      other => panic!("expected a note, got {other:?}"),
    })
    .collect();
  assert_eq!(notes, vec!["C", "G", "C", "G"]);
}

#[test]
fn non_positive_repeat_runs_nothing() {
  for times in [0, -3] {
    let result = run(&[repeat("r", times, vec![Block::new("w", "wave")])]);
    assert!(result.success);
    assert_eq!(result.context.step_count, 1);
    assert!(result.events.is_empty());
  }
}

#[test]
fn fractional_repeat_rounds_up() {
  let block = Block::new("r", "repeatMagic")
    .param("times", 2.5)
    .child(Block::new("w", "wave"));
  let result = run(&[block]);
  assert_eq!(result.context.step_count, 4);
}

#[test]
fn repeat_without_children_is_one_step() {
  let result = run(&[Block::new("r", "repeatMagic").param("times", 1_000_000_000_i64)]);
  assert!(result.success);
  assert_eq!(result.context.step_count, 1);
}

// ══════════════════════════════════════════════════════════════════════════════
// Budgets
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn exactly_max_steps_succeeds() {
  let body = vec![Block::new("w", "wave")];
  let result = run(&[repeat("r", 499, body)]);
  assert!(result.success);
  assert_eq!(result.context.step_count, 500);
  assert_eq!(result.events.len(), 499);
}

#[test]
fn runaway_repeat_hits_step_limit() {
  let result = run(&[repeat("r", 600, vec![Block::new("w", "wait")])]);
  assert!(!result.success);
  assert!(result.events.is_empty());
  assert_eq!(
    result.error,
    Some(LimitError::StepLimitExceeded {
      limit: 500,
      reached: 501
    })
  );
  assert!(result
    .error
    .as_ref()
    .unwrap()
    .to_string()
    .contains("Too many steps"));
  assert_eq!(result.context.step_count, 501);
}

#[test]
fn step_limit_keeps_events_before_the_violation() {
  let result = run(&[
    Block::new("s", "say").param("text", "go"),
    repeat("r", 1000, vec![Block::new("w", "wave")]),
    Block::new("never", "jump"),
  ]);
  assert!(!result.success);
  // say + repeat use two steps, leaving 498 waves before step 501
  assert_eq!(result.events.len(), 1 + 498);
  assert!(!result
    .events
    .iter()
    .any(|event| matches!(event.kind, EventKind::Animation(Animation::Jump { .. }))));
}

#[test]
fn configured_step_limit() {
  let config = Config {
    max_steps: 3,
    ..Config::default()
  };
  let script: Vec<_> = (0..5)
    .map(|i| Block::new(i.to_string(), "wave"))
    .collect();
  let result = interpret_blocks_with(&script, &config, SteppingClock::new(0));
  assert_eq!(result.events.len(), 3);
  assert_eq!(
    result.error.map(|error| error.to_string()),
    Some("Too many steps! Maximum is 3.".to_string())
  );
}

#[test]
fn slow_run_hits_time_limit() {
  let script: Vec<_> = (0..10)
    .map(|i| Block::new(i.to_string(), "wave"))
    .collect();
  // each block reads the clock once, 1000ms apart: 0, 1000, 2000, 3000, 4000
  let result = interpret_blocks_with(&script, &Config::default(), SteppingClock::new(1000));
  assert!(!result.success);
  assert_eq!(result.events.len(), 4);
  assert_eq!(result.context.step_count, 5);
  assert_eq!(
    result.error,
    Some(LimitError::TimeLimitExceeded {
      limit: Duration::from_millis(3000),
      elapsed: Duration::from_millis(4000),
    })
  );
  assert_eq!(
    result.error.unwrap().to_string(),
    "Execution took too long! Maximum is 3 seconds."
  );
}

// ══════════════════════════════════════════════════════════════════════════════
// Compound motion & style blocks
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn teleport_is_relative_to_canvas_center() {
  let result = run(&[
    Block::new("1", "moveForward").param("steps", 40),
    Block::new("2", "teleport").param("x", 0).param("y", 0),
    Block::new("3", "teleport").param("x", -100).param("y", 50),
  ]);
  assert_eq!((result.context.x, result.context.y), (200., 250.));
  assert_eq!(names(&result), vec!["draw", "move", "move", "move"]);
  assert_eq!(result.events[2].kind, EventKind::Move { x: 300., y: 200. });
}

#[test]
fn spiral_draws_segments_and_one_move() {
  let result = run(&[Block::new("1", "drawSpiral")
    .param("turns", 2)
    .param("spacing", 10)]);
  let draws = names(&result).iter().filter(|name| **name == "draw").count();
  assert_eq!(draws, 40);
  assert_eq!(names(&result).last(), Some(&"move"));
  assert_eq!(result.context.step_count, 1);
}

#[test]
fn pen_up_zigzag_only_moves() {
  let result = run(&[
    Block::new("1", "penUp"),
    Block::new("2", "drawZigzag").param("segments", 3),
  ]);
  assert_eq!(names(&result), vec!["move"]);
}

#[test]
fn arc_turns_the_turtle() {
  let result = run(&[Block::new("1", "drawArc")
    .param("radius", 60)
    .param("angle", 90)]);
  assert_eq!(result.context.angle, 0.);
  let draws = names(&result).iter().filter(|name| **name == "draw").count();
  assert_eq!(draws, 19);
}

#[test]
fn wave_line_travels_forward() {
  let result = run(&[Block::new("1", "drawWave")
    .param("amplitude", 20)
    .param("frequency", 2)]);
  assert!(close(result.context.x, 300.));
  assert!(close(result.context.y, 0.));
}

#[test]
fn style_blocks_update_context_and_emit_color_events() {
  let result = run(&[
    Block::new("1", "rainbowMode").param("speed", 8),
    Block::new("2", "glowEffect").param("intensity", 15),
    Block::new("3", "setOpacity").param("opacity", 40),
    Block::new("4", "gradientColor")
      .param("from", "red")
      .param("to", "green"),
  ]);
  assert!(result.success);
  assert_eq!(result.context.glow_intensity, 15.);
  assert_eq!(result.context.opacity, 40.);
  assert_eq!(
    result.context.color_mode,
    kidcode::color::ColorMode::Gradient {
      from: "red".into(),
      to: "green".into()
    }
  );
  assert_eq!(names(&result), vec!["color"; 4]);
  match &result.events[1].kind {
    EventKind::Color(change) => assert_eq!(change.glow, Some(15.)),
    other => panic!("expected a color change, got {other:?}"),
  }
}

#[test]
fn random_color_follows_the_seed() {
  let script = [Block::new("1", "randomColor"), Block::new("2", "randomColor")];
  let pick = |seed| {
    let config = Config {
      seed,
      ..Config::default()
    };
    interpret_blocks_with(&script, &config, SteppingClock::new(0))
  };
  let a = pick(7);
  let b = pick(7);
  assert_eq!(a.context.color, b.context.color);
  assert_eq!(a.events, b.events);
  assert!(kidcode::color::COLORS
    .iter()
    .any(|(_, hex)| *hex == a.context.color));
}
