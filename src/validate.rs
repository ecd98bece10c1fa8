//! Non-fatal checks of a script against the block catalog.
//!
//! The interpreter skips unknown blocks and accepts any parameter value, so
//! nothing reported here stops a run. Editors use the diagnostics to point a
//! child at the block that will not behave as expected.

use std::fmt;

use crate::block::Block;
use crate::palette::{block_definition, ParamKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
  pub block_id: String,
  pub issue: Issue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
  UnknownType(String),
  UnknownParam(String),
  NotANumber { param: String, value: String },
  OutOfRange { param: String, value: f64, min: f64, max: f64 },
  NotAnOption { param: String, value: String },
  UnexpectedChildren(String),
}

impl fmt::Display for Issue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnknownType(opcode) => write!(f, "unknown block type {opcode:?}"),
      Self::UnknownParam(param) => write!(f, "unknown parameter {param:?}"),
      Self::NotANumber { param, value } => {
        write!(f, "{param} should be a number, got {value:?}")
      }
      Self::OutOfRange {
        param,
        value,
        min,
        max,
      } => write!(f, "{param} = {value} is outside {min}..={max}"),
      Self::NotAnOption { param, value } => {
        write!(f, "{param} = {value:?} is not one of the choices")
      }
      Self::UnexpectedChildren(opcode) => {
        write!(f, "{opcode} blocks cannot hold other blocks")
      }
    }
  }
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "block {:?}: {}", self.block_id, self.issue)
  }
}

pub fn validate_blocks(blocks: &[Block]) -> Vec<Diagnostic> {
  let mut diagnostics = Vec::new();
  for block in blocks {
    validate_block(block, &mut diagnostics);
  }
  diagnostics
}

fn validate_block(block: &Block, diagnostics: &mut Vec<Diagnostic>) {
  let mut report = |issue| {
    diagnostics.push(Diagnostic {
      block_id: block.id.clone(),
      issue,
    })
  };
  let Some(definition) = block_definition(&block.opcode) else {
    report(Issue::UnknownType(block.opcode.clone()));
    for child in block.children() {
      validate_block(child, diagnostics);
    }
    return;
  };
  for (name, value) in &block.params {
    let Some(spec) = definition.param(name) else {
      report(Issue::UnknownParam(name.clone()));
      continue;
    };
    match spec.kind {
      ParamKind::Number if !value.is_number() => report(Issue::NotANumber {
        param: name.clone(),
        value: value.to_string(),
      }),
      ParamKind::Number => {
        let number = value.to_f64();
        if spec.clamp(number) != number {
          report(Issue::OutOfRange {
            param: name.clone(),
            value: number,
            min: spec.min.unwrap_or(f64::NEG_INFINITY),
            max: spec.max.unwrap_or(f64::INFINITY),
          });
        }
      }
      ParamKind::Select => {
        let choice = value.to_string();
        if !spec.options.contains(&choice.as_str()) {
          report(Issue::NotAnOption {
            param: name.clone(),
            value: choice,
          });
        }
      }
      ParamKind::String => {}
    }
  }
  if !definition.takes_children && !block.children().is_empty() {
    report(Issue::UnexpectedChildren(block.opcode.clone()));
  }
  for child in block.children() {
    validate_block(child, diagnostics);
  }
}
