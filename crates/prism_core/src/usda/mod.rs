//! USDA (ASCII) stage loading.
//!
//! This module parses a text subset of the USDA format and authors the
//! result onto a [`Stage`]. The parser is intentionally simple and handles
//! the patterns stages in this crate are authored with.
//!
//! # Supported Syntax
//!
//! - `def Type "Name" { ... }` (nested; per-prim metadata in `(...)` is skipped)
//! - `token visibility = "invisible"`
//! - `float3[] extent = [(-0.5, -0.5, -0.5), (0.5, 0.5, 0.5)]`
//! - `double3 xformOp:translate = (1, 2, 3)`
//! - `matrix4d xformOp:transform = ( (...), (...), (...), (...) )`
//! - `<type> <name>.timeSamples = { 1: <value>, ... }`
//!
//! ## Not Supported
//!
//! - Binary `.usdc` format
//! - References, payloads, variants and other composition arcs
//! - Relationships (`rel` lines are skipped)

mod parser;

pub use parser::{ParseError, ParseResult, UsdaParser};

use std::path::Path;

use crate::stage::Stage;

impl Stage {
    /// Load a stage from a USDA file on disk.
    pub fn load_usda<P: AsRef<Path>>(path: P) -> ParseResult<Stage> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed");
        let stage = Self::from_usda_str(&content, name)?;
        log::info!(
            "loaded stage '{}' from {} ({} prims)",
            stage.name(),
            path.display(),
            stage.traverse().len()
        );
        Ok(stage)
    }

    /// Build a stage from USDA text.
    pub fn from_usda_str(content: &str, name: &str) -> ParseResult<Stage> {
        let stage = Stage::new(name);
        let mut parser = UsdaParser::new(content);
        parser.parse_into(&stage)?;
        Ok(stage)
    }
}
