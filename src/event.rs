//! The event log a renderer plays back.
//!
//! Every event serializes as `{ "type": ..., "data": { ... }, "timestamp": ms }`
//! where `timestamp` counts milliseconds from the start of the run.

use serde::Serialize;

use crate::color::ColorMode;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionEvent {
  #[serde(flatten)]
  pub kind: EventKind,
  pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum EventKind {
  Draw(Draw),
  Move { x: f64, y: f64 },
  Turn { angle: f64 },
  Color(ColorChange),
  Sound(Sound),
  Animation(Animation),
  Speech { text: String },
}

impl EventKind {
  /// The `type` tag this event is rendered under.
  pub fn name(&self) -> &'static str {
    match self {
      EventKind::Draw(_) => "draw",
      EventKind::Move { .. } => "move",
      EventKind::Turn { .. } => "turn",
      EventKind::Color(_) => "color",
      EventKind::Sound(_) => "sound",
      EventKind::Animation(_) => "animation",
      EventKind::Speech { .. } => "speech",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
  Circle,
  Square,
  Triangle,
  Star,
  Heart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Draw {
  Circle(Stamp),
  Square(Stamp),
  Triangle(Stamp),
  Star(Stamp),
  Heart(Stamp),
  Line(Segment),
}

impl Draw {
  pub fn stamp(shape: Shape, stamp: Stamp) -> Self {
    match shape {
      Shape::Circle => Draw::Circle(stamp),
      Shape::Square => Draw::Square(stamp),
      Shape::Triangle => Draw::Triangle(stamp),
      Shape::Star => Draw::Star(stamp),
      Shape::Heart => Draw::Heart(stamp),
    }
  }
}

/// A filled shape centered on the turtle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stamp {
  pub x: f64,
  pub y: f64,
  pub size: f64,
  pub color: String,
}

/// A stroke left by the pen; `size` is the brush width.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
  pub from_x: f64,
  pub from_y: f64,
  pub to_x: f64,
  pub to_y: f64,
  pub color: String,
  pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorChange {
  pub color: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mode: Option<ColorMode>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub opacity: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub glow: Option<f64>,
}

impl ColorChange {
  pub fn new(color: impl Into<String>) -> Self {
    ColorChange {
      color: color.into(),
      mode: None,
      opacity: None,
      glow: None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "soundType", rename_all = "lowercase")]
pub enum Sound {
  Note {
    note: String,
  },
  Drum {
    #[serde(rename = "drumType")]
    drum_type: String,
  },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Animation {
  Walk { steps: f64 },
  Jump { height: f64 },
  Wave,
}
