//! Hierarchical prim paths.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

/// Errors produced when constructing an [`SdfPath`] from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path")]
    Empty,

    #[error("path must be absolute (start with '/'): {0}")]
    NotAbsolute(String),

    #[error("invalid path component: {0:?}")]
    InvalidComponent(String),
}

/// An absolute, validated prim path such as `/World/Geo/Cube`.
///
/// Paths are cheap to clone and compare by content. The absolute root is
/// spelled `/`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SdfPath {
    text: Arc<str>,
}

impl SdfPath {
    /// Parse and validate an absolute path.
    pub fn new(text: &str) -> Result<Self, PathError> {
        if text.is_empty() {
            return Err(PathError::Empty);
        }
        if !text.starts_with('/') {
            return Err(PathError::NotAbsolute(text.to_string()));
        }
        if text == "/" {
            return Ok(Self::absolute_root());
        }

        let trimmed = text.strip_suffix('/').unwrap_or(text);
        for component in trimmed[1..].split('/') {
            if !is_valid_identifier(component) {
                return Err(PathError::InvalidComponent(component.to_string()));
            }
        }

        Ok(Self {
            text: Arc::from(trimmed),
        })
    }

    /// The path of the pseudo-root, `/`.
    pub fn absolute_root() -> Self {
        Self {
            text: Arc::from("/"),
        }
    }

    /// True if this is the pseudo-root path.
    pub fn is_absolute_root(&self) -> bool {
        &*self.text == "/"
    }

    /// The full path text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The last path component, or `""` for the pseudo-root.
    pub fn name(&self) -> &str {
        self.text.rsplit('/').next().unwrap_or("")
    }

    /// The parent path, or `None` for the pseudo-root.
    pub fn parent(&self) -> Option<SdfPath> {
        if self.is_absolute_root() {
            return None;
        }
        match self.text.rfind('/') {
            Some(0) => Some(Self::absolute_root()),
            Some(idx) => Some(Self {
                text: Arc::from(&self.text[..idx]),
            }),
            None => None,
        }
    }

    /// Iterate the path components, root first.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.text[1..].split('/').filter(|c| !c.is_empty())
    }

    /// Append a child component, validating its name.
    pub fn append_child(&self, name: &str) -> Result<SdfPath, PathError> {
        if !is_valid_identifier(name) {
            return Err(PathError::InvalidComponent(name.to_string()));
        }
        let text = if self.is_absolute_root() {
            format!("/{}", name)
        } else {
            format!("{}/{}", self.text, name)
        };
        Ok(Self {
            text: Arc::from(text.as_str()),
        })
    }
}

fn is_valid_identifier(component: &str) -> bool {
    let mut chars = component.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for SdfPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for SdfPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SdfPath({})", self.text)
    }
}

impl FromStr for SdfPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
