use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::event::Shape;
use crate::palette;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
  Integer(i64),
  Float(f64),
  Bool(bool),
  String(String),
}

impl Value {
  pub fn to_f64(&self) -> f64 {
    match self {
      Value::Integer(integer) => *integer as f64,
      Value::Float(float) => *float,
      Value::Bool(flag) => *flag as i32 as f64,
      Value::String(string) => string.trim().parse::<f64>().unwrap_or(0.),
    }
  }

  pub fn is_number(&self) -> bool {
    match self {
      Value::Integer(_) | Value::Float(_) => true,
      Value::String(string) => string.trim().parse::<f64>().is_ok(),
      Value::Bool(_) => false,
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Integer(integer) => write!(f, "{integer}"),
      Value::Float(float) => write!(f, "{float}"),
      Value::Bool(flag) => write!(f, "{flag}"),
      Value::String(string) => write!(f, "{string}"),
    }
  }
}

impl From<f64> for Value {
  fn from(value: f64) -> Self {
    Value::Float(value)
  }
}

impl From<i64> for Value {
  fn from(value: i64) -> Self {
    Value::Integer(value)
  }
}

impl From<i32> for Value {
  fn from(value: i32) -> Self {
    Value::Integer(value.into())
  }
}

impl From<&str> for Value {
  fn from(value: &str) -> Self {
    Value::String(value.to_string())
  }
}

/// One node of a block script, in the shape the editor stores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
  #[serde(default)]
  pub id: String,
  #[serde(rename = "type", default)]
  pub opcode: String,
  #[serde(default, deserialize_with = "present_params")]
  pub params: BTreeMap<String, Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub children: Option<Vec<Block>>,
}

/// Drops `null` entries, which the editor writes for cleared number fields,
/// so those params fall back to their catalog defaults.
fn present_params<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<BTreeMap<String, Value>, D::Error> {
  let params = BTreeMap::<String, Option<Value>>::deserialize(deserializer)?;
  Ok(
    params
      .into_iter()
      .filter_map(|(name, value)| Some((name, value?)))
      .collect(),
  )
}

impl Block {
  pub fn new(id: impl Into<String>, opcode: impl Into<String>) -> Self {
    Block {
      id: id.into(),
      opcode: opcode.into(),
      ..Block::default()
    }
  }

  pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
    self.params.insert(name.into(), value.into());
    self
  }

  pub fn child(mut self, block: Block) -> Self {
    self.children.get_or_insert_with(Vec::new).push(block);
    self
  }

  pub fn children(&self) -> &[Block] {
    self.children.as_deref().unwrap_or(&[])
  }

  /// Reads a numeric parameter, falling back to the catalog default.
  pub fn number(&self, name: &str) -> f64 {
    match self.params.get(name) {
      Some(value) => value.to_f64(),
      None => palette::param_spec(&self.opcode, name)
        .map(|spec| spec.default.to_f64())
        .unwrap_or(0.),
    }
  }

  /// Reads a textual parameter, falling back to the catalog default.
  pub fn text(&self, name: &str) -> String {
    match self.params.get(name) {
      Some(value) => value.to_string(),
      None => palette::param_spec(&self.opcode, name)
        .map(|spec| spec.default.to_text())
        .unwrap_or_default(),
    }
  }

  pub fn kind(&self) -> BlockKind<'_> {
    match self.opcode.as_str() {
      "drawCircle" => self.shape(Shape::Circle),
      "drawSquare" => self.shape(Shape::Square),
      "drawTriangle" => self.shape(Shape::Triangle),
      "drawStar" => self.shape(Shape::Star),
      "drawHeart" => self.shape(Shape::Heart),
      "moveForward" => BlockKind::MoveForward {
        steps: self.number("steps"),
      },
      "turnRight" => BlockKind::TurnRight {
        degrees: self.number("degrees"),
      },
      "turnLeft" => BlockKind::TurnLeft {
        degrees: self.number("degrees"),
      },
      "penUp" => BlockKind::PenUp,
      "penDown" => BlockKind::PenDown,
      "setColor" => BlockKind::SetColor {
        color: self.text("color"),
      },
      "setBrush" => BlockKind::SetBrush {
        size: self.number("size"),
      },
      "repeatMagic" => BlockKind::Repeat {
        times: self.number("times"),
        children: self.children(),
      },
      "walk" => BlockKind::Walk {
        steps: self.number("steps"),
      },
      "jump" => BlockKind::Jump {
        height: self.number("height"),
      },
      "wave" => BlockKind::Wave,
      "say" => BlockKind::Say {
        text: self.text("text"),
      },
      "wait" => BlockKind::Wait,
      "playNote" => BlockKind::PlayNote {
        note: self.text("note"),
      },
      "playDrum" => BlockKind::PlayDrum {
        drum: self.text("type"),
      },
      "drawSpiral" => BlockKind::Spiral {
        turns: self.clamped("turns"),
        spacing: self.number("spacing"),
      },
      "drawArc" => BlockKind::Arc {
        radius: self.number("radius"),
        angle: self.clamped("angle"),
      },
      "drawZigzag" => BlockKind::Zigzag {
        segments: self.clamped("segments"),
        width: self.number("width"),
      },
      "drawWave" => BlockKind::WaveLine {
        amplitude: self.number("amplitude"),
        frequency: self.clamped("frequency"),
      },
      "teleport" => BlockKind::Teleport {
        x: self.number("x"),
        y: self.number("y"),
      },
      "rainbowMode" => BlockKind::Rainbow {
        speed: self.number("speed"),
      },
      "gradientColor" => BlockKind::Gradient {
        from: self.text("from"),
        to: self.text("to"),
      },
      "glowEffect" => BlockKind::Glow {
        intensity: self.number("intensity"),
      },
      "setOpacity" => BlockKind::Opacity {
        opacity: self.number("opacity"),
      },
      "randomColor" => BlockKind::RandomColor,
      opcode => BlockKind::Unknown(opcode),
    }
  }

  fn shape(&self, shape: Shape) -> BlockKind<'_> {
    BlockKind::DrawShape {
      shape,
      size: self.number("size"),
    }
  }

  // Parameters that decide how many segments a compound block draws.
  fn clamped(&self, name: &str) -> f64 {
    let value = self.number(name);
    match palette::param_spec(&self.opcode, name) {
      Some(spec) if value.is_nan() => spec.default.to_f64(),
      Some(spec) => spec.clamp(value),
      None => value,
    }
  }
}

/// Typed view of a [`Block`], resolved from its type tag and parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind<'a> {
  DrawShape { shape: Shape, size: f64 },
  MoveForward { steps: f64 },
  TurnRight { degrees: f64 },
  TurnLeft { degrees: f64 },
  PenUp,
  PenDown,
  SetColor { color: String },
  SetBrush { size: f64 },
  Repeat { times: f64, children: &'a [Block] },
  Walk { steps: f64 },
  Jump { height: f64 },
  Wave,
  Say { text: String },
  Wait,
  PlayNote { note: String },
  PlayDrum { drum: String },
  Spiral { turns: f64, spacing: f64 },
  Arc { radius: f64, angle: f64 },
  Zigzag { segments: f64, width: f64 },
  WaveLine { amplitude: f64, frequency: f64 },
  Teleport { x: f64, y: f64 },
  Rainbow { speed: f64 },
  Gradient { from: String, to: String },
  Glow { intensity: f64 },
  Opacity { opacity: f64 },
  RandomColor,
  Unknown(&'a str),
}
