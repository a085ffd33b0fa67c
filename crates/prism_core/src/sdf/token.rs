//! Interned enumerated strings.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A cheap-to-clone interned string used for fixed-vocabulary values:
/// prim type names, attribute names, and enumerated attribute values.
///
/// Well-known tokens are `const`-constructible from static text; tokens
/// read from files share their text behind an `Arc`. Equality and hashing
/// are by content.
#[derive(Clone)]
pub struct Token(Repr);

#[derive(Clone)]
enum Repr {
    Static(&'static str),
    Owned(Arc<str>),
}

impl Token {
    /// Build a token from static text, usable in `const` context.
    pub const fn from_static(text: &'static str) -> Self {
        Token(Repr::Static(text))
    }

    /// Build a token from runtime text.
    pub fn new(text: &str) -> Self {
        Token(Repr::Owned(Arc::from(text)))
    }

    /// The token's text.
    pub fn as_str(&self) -> &str {
        match &self.0 {
            Repr::Static(s) => s,
            Repr::Owned(s) => s,
        }
    }

    /// True if the token is the empty string.
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Token {}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.as_str())
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Token::new(text)
    }
}
