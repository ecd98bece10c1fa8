use std::fs;
use std::io;
use std::path::Path;

use log::warn;

use crate::block::Block;

pub fn serialize_blocks(blocks: &[Block]) -> String {
  serde_json::to_string(blocks).unwrap_or_else(|error| {
    warn!("could not serialize script: {error}");
    String::from("[]")
  })
}

/// Strict parse, for callers that want to report malformed scripts.
pub fn parse_blocks(json: &str) -> Result<Vec<Block>, serde_json::Error> {
  serde_json::from_str(json)
}

/// Lenient parse: malformed input is treated as an empty script.
pub fn deserialize_blocks(json: &str) -> Vec<Block> {
  parse_blocks(json).unwrap_or_else(|error| {
    warn!("ignoring malformed script: {error}");
    Vec::new()
  })
}

pub fn load(path: impl AsRef<Path>) -> io::Result<Vec<Block>> {
  let json = fs::read_to_string(path)?;
  parse_blocks(&json).map_err(io::Error::from)
}
