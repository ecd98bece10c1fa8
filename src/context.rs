use derivative::Derivative;
use serde::Serialize;

use crate::color::{ColorMode, DEFAULT_COLOR};
use crate::config::Config;

/// Turtle state for a single run. `angle` is in degrees, 0 along +x, growing
/// clockwise on screen (y points down). It is never normalized.
#[derive(Derivative, Debug, Clone, PartialEq, Serialize)]
#[derivative(Default)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionContext {
  #[derivative(Default(value = "300.0"))]
  pub x: f64,
  #[derivative(Default(value = "200.0"))]
  pub y: f64,
  #[derivative(Default(value = "-90.0"))]
  pub angle: f64,
  #[derivative(Default(value = "true"))]
  pub pen_down: bool,
  #[derivative(Default(value = "DEFAULT_COLOR.to_string()"))]
  pub color: String,
  #[derivative(Default(value = "3.0"))]
  pub brush_size: f64,
  pub step_count: u32,
  pub color_mode: ColorMode,
  #[derivative(Default(value = "100.0"))]
  pub opacity: f64,
  pub glow_intensity: f64,
}

pub fn create_initial_context(config: &Config) -> ExecutionContext {
  let (x, y) = config.center();
  ExecutionContext {
    x,
    y,
    ..ExecutionContext::default()
  }
}
