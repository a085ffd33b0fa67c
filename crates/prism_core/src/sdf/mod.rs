//! Scene-description fundamentals: prim paths and interned tokens.

mod path;
mod token;

pub use path::{PathError, SdfPath};
pub use token::Token;
