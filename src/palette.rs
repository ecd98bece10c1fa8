//! The block catalog: every block the script editor can place, with its
//! category, parameters, defaults and legal ranges.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockCategory {
  Draw,
  Motion,
  Color,
  Control,
  Animation,
  Music,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
  Number,
  String,
  Select,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDefault {
  Number(f64),
  Text(&'static str),
}

impl ParamDefault {
  pub fn to_f64(self) -> f64 {
    match self {
      ParamDefault::Number(number) => number,
      ParamDefault::Text(text) => text.parse().unwrap_or(0.),
    }
  }

  pub fn to_text(self) -> String {
    match self {
      ParamDefault::Number(number) => number.to_string(),
      ParamDefault::Text(text) => text.to_string(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
  pub name: &'static str,
  pub kind: ParamKind,
  pub default: ParamDefault,
  pub min: Option<f64>,
  pub max: Option<f64>,
  pub options: &'static [&'static str],
}

impl ParamSpec {
  const fn number(name: &'static str, default: f64, min: f64, max: f64) -> Self {
    ParamSpec {
      name,
      kind: ParamKind::Number,
      default: ParamDefault::Number(default),
      min: Some(min),
      max: Some(max),
      options: &[],
    }
  }

  const fn text(name: &'static str, default: &'static str) -> Self {
    ParamSpec {
      name,
      kind: ParamKind::String,
      default: ParamDefault::Text(default),
      min: None,
      max: None,
      options: &[],
    }
  }

  const fn select(
    name: &'static str,
    default: &'static str,
    options: &'static [&'static str],
  ) -> Self {
    ParamSpec {
      name,
      kind: ParamKind::Select,
      default: ParamDefault::Text(default),
      min: None,
      max: None,
      options,
    }
  }

  /// Clamps `value` into `[min, max]` where bounds are declared.
  pub fn clamp(&self, value: f64) -> f64 {
    let value = match self.min {
      Some(min) if value < min => min,
      _ => value,
    };
    match self.max {
      Some(max) if value > max => max,
      _ => value,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockDefinition {
  pub id: &'static str,
  pub opcode: &'static str,
  pub category: BlockCategory,
  pub label: &'static str,
  pub color: &'static str,
  pub icon: &'static str,
  pub params: &'static [ParamSpec],
  pub takes_children: bool,
}

impl BlockDefinition {
  pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
    self.params.iter().find(|param| param.name == name)
  }
}

const SHAPE_SIZE: &[ParamSpec] = &[ParamSpec::number("size", 50., 10., 200.)];
const PAINT_COLORS: &[&str] = &[
  "red", "orange", "yellow", "green", "blue", "purple", "pink", "black", "white",
];
const GRADIENT_COLORS: &[&str] = &["red", "orange", "yellow", "green", "blue", "purple", "pink"];

const DRAW: &str = "#FF6B6B";
const MOTION: &str = "#4ECDC4";
const COLOR: &str = "#A06CD5";
const CONTROL: &str = "#FFE66D";
const ANIMATION: &str = "#95D5B2";
const MUSIC: &str = "#FF85A2";

macro_rules! block {
  ($id:literal, $opcode:literal, $category:ident, $label:literal, $color:ident, $icon:literal, $params:expr) => {
    block!($id, $opcode, $category, $label, $color, $icon, $params, false)
  };
  ($id:literal, $opcode:literal, $category:ident, $label:literal, $color:ident, $icon:literal, $params:expr, $children:literal) => {
    BlockDefinition {
      id: $id,
      opcode: $opcode,
      category: BlockCategory::$category,
      label: $label,
      color: $color,
      icon: $icon,
      params: $params,
      takes_children: $children,
    }
  };
}

pub static BLOCK_DEFINITIONS: &[BlockDefinition] = &[
  block!("draw-circle", "drawCircle", Draw, "Draw Circle", DRAW, "⭕", SHAPE_SIZE),
  block!("draw-square", "drawSquare", Draw, "Draw Square", DRAW, "⬜", SHAPE_SIZE),
  block!("draw-triangle", "drawTriangle", Draw, "Draw Triangle", DRAW, "🔺", SHAPE_SIZE),
  block!("draw-star", "drawStar", Draw, "Draw Star", DRAW, "⭐", SHAPE_SIZE),
  block!("draw-heart", "drawHeart", Draw, "Draw Heart", DRAW, "❤️", SHAPE_SIZE),
  block!(
    "move-forward",
    "moveForward",
    Motion,
    "Move Forward",
    MOTION,
    "➡️",
    &[ParamSpec::number("steps", 1., -12., 12.)]
  ),
  block!(
    "turn-right",
    "turnRight",
    Motion,
    "Turn Right",
    MOTION,
    "↩️",
    &[ParamSpec::number("degrees", 90., 1., 360.)]
  ),
  block!(
    "turn-left",
    "turnLeft",
    Motion,
    "Turn Left",
    MOTION,
    "↪️",
    &[ParamSpec::number("degrees", 90., 1., 360.)]
  ),
  block!("pen-up", "penUp", Motion, "Pen Up", MOTION, "✏️", &[]),
  block!("pen-down", "penDown", Motion, "Pen Down", MOTION, "🖊️", &[]),
  block!(
    "draw-spiral",
    "drawSpiral",
    Motion,
    "Draw Spiral",
    MOTION,
    "🌀",
    &[
      ParamSpec::number("turns", 3., 1., 10.),
      ParamSpec::number("spacing", 10., 5., 30.),
    ]
  ),
  block!(
    "draw-arc",
    "drawArc",
    Motion,
    "Draw Arc",
    MOTION,
    "🌙",
    &[
      ParamSpec::number("radius", 50., 20., 150.),
      ParamSpec::number("angle", 180., 30., 360.),
    ]
  ),
  block!(
    "draw-zigzag",
    "drawZigzag",
    Motion,
    "Draw Zigzag",
    MOTION,
    "⚡",
    &[
      ParamSpec::number("segments", 5., 2., 15.),
      ParamSpec::number("width", 30., 10., 80.),
    ]
  ),
  block!(
    "draw-wave",
    "drawWave",
    Motion,
    "Draw Wave",
    MOTION,
    "〰️",
    &[
      ParamSpec::number("amplitude", 30., 10., 80.),
      ParamSpec::number("frequency", 3., 1., 8.),
    ]
  ),
  block!(
    "teleport",
    "teleport",
    Motion,
    "Teleport",
    MOTION,
    "✨",
    &[
      ParamSpec::number("x", 0., -300., 300.),
      ParamSpec::number("y", 0., -200., 200.),
    ]
  ),
  block!(
    "set-color",
    "setColor",
    Color,
    "Set Color",
    COLOR,
    "🎨",
    &[ParamSpec::select("color", "red", PAINT_COLORS)]
  ),
  block!(
    "set-brush",
    "setBrush",
    Color,
    "Set Brush Size",
    COLOR,
    "🖌️",
    &[ParamSpec::number("size", 3., 1., 20.)]
  ),
  block!(
    "rainbow-mode",
    "rainbowMode",
    Color,
    "Rainbow Mode",
    COLOR,
    "🌈",
    &[ParamSpec::number("speed", 5., 1., 20.)]
  ),
  block!(
    "gradient-color",
    "gradientColor",
    Color,
    "Gradient",
    COLOR,
    "🎨",
    &[
      ParamSpec::select("from", "red", GRADIENT_COLORS),
      ParamSpec::select("to", "blue", GRADIENT_COLORS),
    ]
  ),
  block!(
    "glow-effect",
    "glowEffect",
    Color,
    "Glow Effect",
    COLOR,
    "✨",
    &[ParamSpec::number("intensity", 10., 0., 30.)]
  ),
  block!(
    "set-opacity",
    "setOpacity",
    Color,
    "Set Opacity",
    COLOR,
    "👻",
    &[ParamSpec::number("opacity", 100., 10., 100.)]
  ),
  block!("random-color", "randomColor", Color, "Random Color", COLOR, "🎲", &[]),
  block!(
    "repeat-magic",
    "repeatMagic",
    Control,
    "Repeat Magic",
    CONTROL,
    "✨",
    &[ParamSpec::number("times", 4., 1., 20.)],
    true
  ),
  block!(
    "walk",
    "walk",
    Animation,
    "Walk",
    ANIMATION,
    "🚶",
    &[ParamSpec::number("steps", 100., 10., 500.)]
  ),
  block!(
    "jump",
    "jump",
    Animation,
    "Jump",
    ANIMATION,
    "🦘",
    &[ParamSpec::number("height", 50., 10., 200.)]
  ),
  block!("wave", "wave", Animation, "Wave", ANIMATION, "👋", &[]),
  block!(
    "say",
    "say",
    Animation,
    "Say",
    ANIMATION,
    "💬",
    &[ParamSpec::text("text", "Hello!")]
  ),
  block!(
    "wait",
    "wait",
    Animation,
    "Wait",
    ANIMATION,
    "⏰",
    &[ParamSpec::number("seconds", 1., 0.1, 10.)]
  ),
  block!(
    "play-note",
    "playNote",
    Music,
    "Play Note",
    MUSIC,
    "🎵",
    &[ParamSpec::select("note", "C", &["C", "D", "E", "F", "G", "A", "B"])]
  ),
  block!(
    "play-drum",
    "playDrum",
    Music,
    "Play Drum",
    MUSIC,
    "🥁",
    &[ParamSpec::select("type", "kick", &["kick", "snare", "hihat", "clap"])]
  ),
];

pub fn block_definition(opcode: &str) -> Option<&'static BlockDefinition> {
  BLOCK_DEFINITIONS
    .iter()
    .find(|definition| definition.opcode == opcode)
}

pub fn blocks_by_category(category: BlockCategory) -> Vec<&'static BlockDefinition> {
  BLOCK_DEFINITIONS
    .iter()
    .filter(|definition| definition.category == category)
    .collect()
}

/// Looks up the declared parameter of a block type.
pub fn param_spec(opcode: &str, name: &str) -> Option<&'static ParamSpec> {
  block_definition(opcode).and_then(|definition| definition.param(name))
}
