//! Command-line argument parsing.
//!
//! - `polyfall` plays in the terminal
//! - `polyfall shapes [--sizes 4,5] [--corners]` prints the generated shapes
//!   as JSON

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::config::parse_sizes;
use crate::core::{Shape, ShapeGenerator};
use crate::types::DEFAULT_BLOCK_SIZES;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapesArgs {
    pub sizes: Vec<usize>,
    pub corners: bool,
}

impl Default for ShapesArgs {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_BLOCK_SIZES.to_vec(),
            corners: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play,
    Shapes(ShapesArgs),
}

/// Parse arguments, excluding the program name
pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some(first) = args.first() else {
        return Ok(Command::Play);
    };
    match first.as_str() {
        "play" if args.len() == 1 => Ok(Command::Play),
        "shapes" => parse_shapes_args(&args[1..]).map(Command::Shapes),
        other => Err(anyhow!("unknown argument: {}", other)),
    }
}

fn parse_shapes_args(args: &[String]) -> Result<ShapesArgs> {
    let mut out = ShapesArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--sizes" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("shapes: missing value for --sizes"))?;
                out.sizes = parse_sizes(v)
                    .filter(|sizes| sizes.iter().all(|&n| n > 0))
                    .ok_or_else(|| anyhow!("shapes: invalid --sizes value: {}", v))?;
            }
            "--corners" => out.corners = true,
            other => return Err(anyhow!("shapes: unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(out)
}

#[derive(Serialize)]
struct ShapeEntry<'a> {
    id: usize,
    size: usize,
    width: usize,
    height: usize,
    cells: &'a Shape,
}

/// Generate the requested shapes and encode them as pretty JSON
pub fn shapes_json(args: &ShapesArgs) -> Result<String> {
    let shapes = ShapeGenerator::new(args.corners).generate(&args.sizes);
    let entries: Vec<ShapeEntry> = shapes
        .iter()
        .enumerate()
        .map(|(id, shape)| ShapeEntry {
            id,
            size: shape.len(),
            width: shape.width(),
            height: shape.height(),
            cells: shape,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_plays() {
        assert_eq!(parse_args(&[]).unwrap(), Command::Play);
        assert_eq!(parse_args(&args(&["play"])).unwrap(), Command::Play);
    }

    #[test]
    fn test_shapes_args() {
        assert_eq!(
            parse_args(&args(&["shapes"])).unwrap(),
            Command::Shapes(ShapesArgs::default())
        );
        assert_eq!(
            parse_args(&args(&["shapes", "--sizes", "3,5", "--corners"])).unwrap(),
            Command::Shapes(ShapesArgs {
                sizes: vec![3, 5],
                corners: true
            })
        );
    }

    #[test]
    fn test_bad_args_are_errors() {
        assert!(parse_args(&args(&["fly"])).is_err());
        assert!(parse_args(&args(&["shapes", "--sizes"])).is_err());
        assert!(parse_args(&args(&["shapes", "--sizes", "0"])).is_err());
        assert!(parse_args(&args(&["shapes", "--bogus"])).is_err());
    }

    #[test]
    fn test_shapes_json_lists_tetrominoes() {
        let json = shapes_json(&ShapesArgs::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let list = value.as_array().unwrap();
        assert_eq!(list.len(), 7);
        assert_eq!(list[0]["id"], 0);
        assert_eq!(list[0]["size"], 4);
        assert_eq!(list[0]["cells"].as_array().unwrap().len(), 4);
        assert!(list[0]["cells"][0].get("x").is_some());
    }
}
