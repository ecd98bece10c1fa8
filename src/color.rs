use serde::{Deserialize, Serialize};

/// Named paint colors offered by the `setColor` block, with the hex value a
/// renderer should paint them as.
pub const COLORS: &[(&str, &str)] = &[
  ("red", "#FF6B6B"),
  ("orange", "#FF9F43"),
  ("yellow", "#FFE66D"),
  ("green", "#95D5B2"),
  ("blue", "#45B7D1"),
  ("purple", "#A06CD5"),
  ("pink", "#FF85A2"),
  ("black", "#2D3436"),
  ("white", "#FFFFFF"),
];

pub const DEFAULT_COLOR: &str = "#2D3436";

/// Returns the hex value for a palette name, or `color` unchanged when it is
/// not a palette name (hex strings and CSS names pass through).
pub fn resolve_color(color: &str) -> &str {
  COLORS
    .iter()
    .find(|(name, _)| *name == color)
    .map(|(_, hex)| *hex)
    .unwrap_or(color)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColorMode {
  #[default]
  Solid,
  Rainbow {
    speed: f64,
  },
  Gradient {
    from: String,
    to: String,
  },
}
