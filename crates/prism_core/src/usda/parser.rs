//! Line-based USDA parser.

use std::collections::VecDeque;

use glam::{DMat4, DVec3};
use thiserror::Error;

use crate::sdf::{PathError, SdfPath, Token};
use crate::stage::{Prim, Stage, Value, ValueType};

/// Errors that can occur during USDA parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unexpected end of file")]
    UnexpectedEof,

    #[error("Invalid number format: {0}")]
    InvalidNumber(String),

    #[error("Unclosed block starting at line {0}")]
    UnclosedBlock(usize),

    #[error("Invalid prim path: {0}")]
    Path(#[from] PathError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// USDA text parser authoring prims onto a stage.
pub struct UsdaParser {
    lines: VecDeque<(usize, String)>,
}

impl UsdaParser {
    /// Create a new parser from file contents.
    pub fn new(content: &str) -> Self {
        let lines: VecDeque<_> = content
            .lines()
            .enumerate()
            .map(|(i, s)| (i + 1, s.to_string()))
            .collect();

        Self { lines }
    }

    /// Parse the content, defining every prim on `stage`.
    pub fn parse_into(&mut self, stage: &Stage) -> ParseResult<()> {
        self.skip_header();

        while let Some((line_num, line)) = self.next_content_line() {
            let trimmed = line.trim().to_string();
            if trimmed.starts_with("def ") {
                self.parse_def(&trimmed, stage, &SdfPath::absolute_root(), line_num)?;
            } else {
                return Err(ParseError::Parse {
                    line: line_num,
                    message: format!("expected prim definition, found: {}", trimmed),
                });
            }
        }

        Ok(())
    }

    /// Skip `#`-comments and the optional file-level metadata block.
    fn skip_header(&mut self) {
        let mut depth = 0usize;
        while let Some((_, line)) = self.lines.front() {
            let trimmed = line.trim();
            if depth > 0 {
                depth += trimmed.matches('(').count();
                depth = depth.saturating_sub(trimmed.matches(')').count());
                self.lines.pop_front();
            } else if trimmed.is_empty() || trimmed.starts_with('#') {
                self.lines.pop_front();
            } else if trimmed.starts_with('(') {
                depth = trimmed.matches('(').count();
                depth = depth.saturating_sub(trimmed.matches(')').count());
                self.lines.pop_front();
            } else {
                break;
            }
        }
    }

    /// Pop the next non-empty, non-comment line.
    fn next_content_line(&mut self) -> Option<(usize, String)> {
        while let Some((num, line)) = self.lines.pop_front() {
            let trimmed = line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                return Some((num, line));
            }
        }
        None
    }

    /// Parse a `def Type "Name"` block, defining the prim and its subtree.
    fn parse_def(
        &mut self,
        line: &str,
        stage: &Stage,
        parent_path: &SdfPath,
        start_line: usize,
    ) -> ParseResult<()> {
        let rest = line.strip_prefix("def ").unwrap_or(line);
        let prim_type = rest.split_whitespace().next().unwrap_or("");

        let name = match extract_quoted(rest) {
            Some(name) => name,
            None => {
                return Err(ParseError::Parse {
                    line: start_line,
                    message: format!("prim definition without a name: {}", line),
                })
            }
        };

        let path = parent_path.append_child(&name)?;
        let prim = stage.define_prim(&path, Token::new(prim_type));

        // Per-prim metadata in parentheses is skipped; composition arcs are
        // out of scope for this loader.
        let opens = line.matches('(').count();
        let closes = line.matches(')').count();
        if opens > closes {
            self.skip_until_balanced('(', ')', opens - closes, start_line)?;
        }

        if !line.contains('{') {
            self.expect_opening_brace(start_line)?;
        }

        self.parse_body(stage, &prim, &path, start_line)
    }

    /// Pop lines until `need` closing delimiters have been consumed.
    fn skip_until_balanced(
        &mut self,
        open: char,
        close: char,
        mut need: usize,
        start_line: usize,
    ) -> ParseResult<()> {
        while need > 0 {
            match self.lines.pop_front() {
                Some((_, line)) => {
                    need += line.matches(open).count();
                    need = need.saturating_sub(line.matches(close).count());
                }
                None => return Err(ParseError::UnclosedBlock(start_line)),
            }
        }
        Ok(())
    }

    fn expect_opening_brace(&mut self, start_line: usize) -> ParseResult<()> {
        match self.next_content_line() {
            Some((num, line)) => {
                let trimmed = line.trim();
                if trimmed.starts_with('(') {
                    let opens = trimmed.matches('(').count();
                    let closes = trimmed.matches(')').count();
                    if opens > closes {
                        self.skip_until_balanced('(', ')', opens - closes, num)?;
                    }
                    return self.expect_opening_brace(start_line);
                }
                if trimmed == "{" || trimmed.starts_with('{') {
                    Ok(())
                } else {
                    Err(ParseError::Parse {
                        line: num,
                        message: format!("expected '{{', found: {}", trimmed),
                    })
                }
            }
            None => Err(ParseError::UnclosedBlock(start_line)),
        }
    }

    /// Parse the lines inside a prim block: attributes and nested defs.
    fn parse_body(
        &mut self,
        stage: &Stage,
        prim: &Prim,
        path: &SdfPath,
        start_line: usize,
    ) -> ParseResult<()> {
        loop {
            let (line_num, line) = match self.next_content_line() {
                Some(entry) => entry,
                None => return Err(ParseError::UnclosedBlock(start_line)),
            };
            let trimmed = line.trim().to_string();

            if trimmed == "}" {
                return Ok(());
            }
            if trimmed.starts_with("def ") {
                self.parse_def(&trimmed, stage, path, line_num)?;
                continue;
            }
            if trimmed.contains(".timeSamples") {
                self.parse_time_samples(&trimmed, prim, line_num)?;
                continue;
            }
            if trimmed.contains('=') {
                self.parse_attribute(&trimmed, prim, line_num)?;
                continue;
            }
            // rel lines and other unhandled statements
            log::debug!("skipping line {}: {}", line_num, trimmed);
        }
    }

    /// Parse a `<type> <name> = <value>` line.
    fn parse_attribute(&mut self, line: &str, prim: &Prim, line_num: usize) -> ParseResult<()> {
        let stripped = strip_qualifiers(line);
        let (type_text, rest) = match stripped.split_once(' ') {
            Some(parts) => parts,
            None => {
                return Err(ParseError::Parse {
                    line: line_num,
                    message: format!("malformed attribute line: {}", line),
                })
            }
        };

        let value_type = match value_type_for(type_text) {
            Some(vt) => vt,
            None => {
                log::warn!(
                    "line {}: unsupported attribute type '{}', skipping",
                    line_num,
                    type_text
                );
                return Ok(());
            }
        };

        let (name, value_text) = match rest.split_once('=') {
            Some((n, v)) => (n.trim(), v.trim().to_string()),
            None => {
                return Err(ParseError::Parse {
                    line: line_num,
                    message: format!("attribute without value: {}", line),
                })
            }
        };

        let value_text = self.accumulate_balanced(value_text, line_num)?;
        let value = parse_value(value_type, &value_text, line_num)?;

        let attr = prim.declare_attribute(Token::new(name), value_type);
        attr.set(value).map_err(|e| ParseError::Parse {
            line: line_num,
            message: e.to_string(),
        })
    }

    /// Parse a `<type> <name>.timeSamples = { t: v, ... }` block.
    fn parse_time_samples(&mut self, line: &str, prim: &Prim, line_num: usize) -> ParseResult<()> {
        let stripped = strip_qualifiers(line);
        let (type_text, rest) = match stripped.split_once(' ') {
            Some(parts) => parts,
            None => {
                return Err(ParseError::Parse {
                    line: line_num,
                    message: format!("malformed timeSamples line: {}", line),
                })
            }
        };

        let value_type = match value_type_for(type_text) {
            Some(vt) => vt,
            None => {
                log::warn!(
                    "line {}: unsupported attribute type '{}', skipping samples",
                    line_num,
                    type_text
                );
                return self.skip_until_balanced('{', '}', 1, line_num);
            }
        };

        let name = rest
            .split_once(".timeSamples")
            .map(|(n, _)| n.trim())
            .unwrap_or("");
        let attr = prim.declare_attribute(Token::new(name), value_type);

        loop {
            let (num, entry) = match self.next_content_line() {
                Some(e) => e,
                None => return Err(ParseError::UnclosedBlock(line_num)),
            };
            let trimmed = entry.trim();
            if trimmed == "}" || trimmed == "}," {
                return Ok(());
            }

            let (time_text, value_text) = match trimmed.split_once(':') {
                Some(parts) => parts,
                None => {
                    return Err(ParseError::Parse {
                        line: num,
                        message: format!("malformed time sample: {}", trimmed),
                    })
                }
            };
            let time = parse_f64(time_text.trim())?;
            let value_text = value_text.trim().trim_end_matches(',').to_string();
            let value_text = self.accumulate_balanced(value_text, num)?;
            let value = parse_value(value_type, &value_text, num)?;
            attr.set_sample(time, value).map_err(|e| ParseError::Parse {
                line: num,
                message: e.to_string(),
            })?;
        }
    }

    /// Append continuation lines until brackets and parentheses balance.
    fn accumulate_balanced(&mut self, mut text: String, start_line: usize) -> ParseResult<String> {
        while !is_balanced(&text) {
            match self.lines.pop_front() {
                Some((_, line)) => {
                    text.push(' ');
                    text.push_str(line.trim());
                }
                None => return Err(ParseError::UnclosedBlock(start_line)),
            }
        }
        Ok(text)
    }
}

fn is_balanced(text: &str) -> bool {
    text.matches('(').count() == text.matches(')').count()
        && text.matches('[').count() == text.matches(']').count()
}

fn strip_qualifiers(line: &str) -> &str {
    let mut rest = line.trim();
    for qualifier in ["uniform ", "custom "] {
        if let Some(stripped) = rest.strip_prefix(qualifier) {
            rest = stripped.trim_start();
        }
    }
    rest
}

fn extract_quoted(text: &str) -> Option<String> {
    let start = text.find('"')?;
    let rest = &text[start + 1..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

fn value_type_for(type_text: &str) -> Option<ValueType> {
    match type_text {
        "bool" => Some(ValueType::Bool),
        "int" => Some(ValueType::Int),
        "float" => Some(ValueType::Float),
        "double" => Some(ValueType::Double),
        "string" => Some(ValueType::String),
        "token" => Some(ValueType::Token),
        "double3" | "float3" | "point3f" | "normal3f" | "color3f" | "vector3f" => {
            Some(ValueType::Double3)
        }
        "float3[]" | "double3[]" | "point3f[]" | "normal3f[]" | "vector3f[]" => {
            Some(ValueType::Point3Array)
        }
        "matrix4d" => Some(ValueType::Matrix4d),
        _ => None,
    }
}

fn parse_value(value_type: ValueType, text: &str, line: usize) -> ParseResult<Value> {
    let text = text.trim();
    match value_type {
        ValueType::Bool => match text {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(ParseError::Parse {
                line,
                message: format!("invalid bool: {}", text),
            }),
        },
        ValueType::Int => text
            .parse::<i32>()
            .map(Value::Int)
            .map_err(|_| ParseError::InvalidNumber(text.to_string())),
        ValueType::Float => text
            .parse::<f32>()
            .map(Value::Float)
            .map_err(|_| ParseError::InvalidNumber(text.to_string())),
        ValueType::Double => parse_f64(text).map(Value::Double),
        ValueType::String | ValueType::Token => {
            let inner = extract_quoted(text).ok_or_else(|| ParseError::Parse {
                line,
                message: format!("expected quoted value: {}", text),
            })?;
            if value_type == ValueType::Token {
                Ok(Value::Token(Token::new(&inner)))
            } else {
                Ok(Value::String(inner))
            }
        }
        ValueType::Double3 => parse_tuple3(text).map(Value::Double3),
        ValueType::Point3Array => parse_point_array(text, line).map(Value::Point3Array),
        ValueType::Matrix4d => parse_matrix4d(text, line).map(Value::Matrix4d),
    }
}

fn parse_f64(text: &str) -> ParseResult<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(text.trim().to_string()))
}

/// Parse `(a, b, c)` into a vector.
fn parse_tuple3(text: &str) -> ParseResult<DVec3> {
    let inner = text
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')');
    let mut nums = [0.0f64; 3];
    let mut count = 0;
    for part in inner.split(',') {
        if count >= 3 {
            return Err(ParseError::InvalidNumber(text.to_string()));
        }
        nums[count] = parse_f64(part)?;
        count += 1;
    }
    if count != 3 {
        return Err(ParseError::InvalidNumber(text.to_string()));
    }
    Ok(DVec3::new(nums[0], nums[1], nums[2]))
}

/// Parse `[(..), (..), ...]` into a vector list.
fn parse_point_array(text: &str, line: usize) -> ParseResult<Vec<DVec3>> {
    let text = text.trim();
    if !text.starts_with('[') || !text.ends_with(']') {
        return Err(ParseError::Parse {
            line,
            message: format!("expected point array: {}", text),
        });
    }
    let inner = &text[1..text.len() - 1];
    let mut points = Vec::new();
    let mut rest = inner;
    while let Some(open) = rest.find('(') {
        let close = rest[open..].find(')').ok_or(ParseError::UnclosedBlock(line))? + open;
        points.push(parse_tuple3(&rest[open..=close])?);
        rest = &rest[close + 1..];
    }
    Ok(points)
}

/// Parse `( (..), (..), (..), (..) )` as written row-major with the
/// translation in the fourth row, converting to the column-vector
/// convention the math crate uses.
fn parse_matrix4d(text: &str, line: usize) -> ParseResult<DMat4> {
    let mut numbers = Vec::with_capacity(16);
    for part in text
        .split(|c: char| c == '(' || c == ')' || c == ',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        numbers.push(parse_f64(part)?);
    }
    if numbers.len() != 16 {
        return Err(ParseError::Parse {
            line,
            message: format!("matrix4d needs 16 numbers, found {}", numbers.len()),
        });
    }
    let mut array = [0.0f64; 16];
    array.copy_from_slice(&numbers);
    // Row-major storage of a row-vector matrix equals column-major storage
    // of its column-vector transpose, so no element shuffling is needed.
    Ok(DMat4::from_cols_array(&array))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::tokens;
    use crate::stage::TimeCode;

    const BASIC: &str = r#"#usda 1.0
(
    doc = "test stage"
)

def Xform "World"
{
    double3 xformOp:translate = (1, 2, 3)

    def Cube "Cube"
    {
        float3[] extent = [(-0.5, -0.5, -0.5), (0.5, 0.5, 0.5)]
        token visibility = "invisible"
        uniform token purpose = "proxy"
        double size = 1
    }

    def Material "Red"
    {
        string info = "not imageable"
    }
}
"#;

    #[test]
    fn test_parse_basic_stage() {
        let stage = Stage::from_usda_str(BASIC, "basic").unwrap();
        let paths: Vec<String> = stage
            .traverse()
            .iter()
            .map(|p| p.path().to_string())
            .collect();
        assert_eq!(paths, vec!["/World", "/World/Cube", "/World/Red"]);

        let world = stage.prim_at_path(&SdfPath::new("/World").unwrap()).unwrap();
        assert_eq!(
            world
                .get_attribute(&tokens::XFORM_OP_TRANSLATE, TimeCode::Default)
                .and_then(|v| v.as_double3()),
            Some(DVec3::new(1.0, 2.0, 3.0))
        );

        let cube = stage
            .prim_at_path(&SdfPath::new("/World/Cube").unwrap())
            .unwrap();
        assert_eq!(cube.type_name().as_str(), "Cube");
        assert_eq!(
            cube.get_attribute(&tokens::VISIBILITY, TimeCode::Default)
                .and_then(|v| v.as_token().cloned()),
            Some(tokens::INVISIBLE)
        );
        assert_eq!(
            cube.get_attribute(&tokens::PURPOSE, TimeCode::Default)
                .and_then(|v| v.as_token().cloned()),
            Some(tokens::PROXY)
        );
        let extent = cube
            .get_attribute(&tokens::EXTENT, TimeCode::Default)
            .unwrap();
        assert_eq!(
            extent.as_point3_array().map(|p| p.len()),
            Some(2)
        );
    }

    #[test]
    fn test_parse_time_samples() {
        let text = r#"def Cube "Cube"
{
    float3[] extent.timeSamples = {
        1: [(-1, -1, -1), (1, 1, 1)],
        10: [(-2, -2, -2), (2, 2, 2)],
    }
}
"#;
        let stage = Stage::from_usda_str(text, "samples").unwrap();
        let cube = stage.prim_at_path(&SdfPath::new("/Cube").unwrap()).unwrap();

        let at_1 = cube
            .get_attribute(&tokens::EXTENT, TimeCode::Numeric(1.0))
            .unwrap();
        assert_eq!(at_1.as_point3_array().unwrap()[1], DVec3::splat(1.0));

        let at_10 = cube
            .get_attribute(&tokens::EXTENT, TimeCode::Numeric(10.0))
            .unwrap();
        assert_eq!(at_10.as_point3_array().unwrap()[1], DVec3::splat(2.0));
    }

    #[test]
    fn test_parse_matrix_transform() {
        let text = r#"def Xform "X"
{
    matrix4d xformOp:transform = ( (1, 0, 0, 0), (0, 1, 0, 0), (0, 0, 1, 0), (5, 6, 7, 1) )
}
"#;
        let stage = Stage::from_usda_str(text, "matrix").unwrap();
        let x = stage.prim_at_path(&SdfPath::new("/X").unwrap()).unwrap();
        let m = x
            .get_attribute(&tokens::XFORM_OP_TRANSFORM, TimeCode::Default)
            .and_then(|v| v.as_matrix4d())
            .unwrap();
        // Translation authored in the fourth row moves points.
        assert_eq!(m.transform_point3(DVec3::ZERO), DVec3::new(5.0, 6.0, 7.0));
    }

    #[test]
    fn test_multiline_array_value() {
        let text = r#"def Cube "Cube"
{
    float3[] extent = [(-0.5, -0.5, -0.5),
        (0.5, 0.5, 0.5)]
}
"#;
        let stage = Stage::from_usda_str(text, "multiline").unwrap();
        let cube = stage.prim_at_path(&SdfPath::new("/Cube").unwrap()).unwrap();
        let extent = cube
            .get_attribute(&tokens::EXTENT, TimeCode::Default)
            .unwrap();
        assert_eq!(extent.as_point3_array().unwrap().len(), 2);
    }

    #[test]
    fn test_unsupported_type_skipped() {
        let text = r#"def Cube "Cube"
{
    quath orient = (1, 0, 0, 0)
    double size = 2
}
"#;
        let stage = Stage::from_usda_str(text, "skip").unwrap();
        let cube = stage.prim_at_path(&SdfPath::new("/Cube").unwrap()).unwrap();
        assert!(!cube.has_attribute(&Token::new("orient")));
        assert_eq!(
            cube.get_attribute(&Token::new("size"), TimeCode::Default),
            Some(Value::Double(2.0))
        );
    }

    #[test]
    fn test_unclosed_block_errors() {
        let text = r#"def Cube "Cube"
{
    double size = 2
"#;
        let err = Stage::from_usda_str(text, "broken").unwrap_err();
        assert!(matches!(err, ParseError::UnclosedBlock(_)));
    }

    #[test]
    fn test_invalid_number_errors() {
        let text = r#"def Cube "Cube"
{
    double size = banana
}
"#;
        let err = Stage::from_usda_str(text, "broken").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber(_)));
    }
}
