//! The scene-description model: stages, prims, and typed attributes.
//!
//! A [`Stage`] owns a tree of reference-counted [`Prim`] handles. Each prim
//! carries typed attributes whose values can be authored as a default, as
//! time samples, or both; reads resolve against a [`TimeCode`].

mod attribute;
mod prim;
mod timecode;
mod value;

pub use attribute::{Attribute, TokenAttribute, TypeMismatchError};
pub use prim::Prim;
pub use timecode::TimeCode;
pub use value::{Value, ValueType};

use crate::geom;
use crate::sdf::{SdfPath, Token};

const XFORM_TYPE: Token = Token::from_static("Xform");

/// A scene-description stage: a named prim tree under a pseudo-root.
///
/// Prims are defined by absolute path; missing ancestors are created as
/// transforms, the way over-specified hierarchies author themselves.
#[derive(Debug)]
pub struct Stage {
    name: String,
    root: Prim,
}

impl Stage {
    /// Create an empty stage.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: Prim::new(SdfPath::absolute_root(), Token::from_static("")),
        }
    }

    /// The stage name (usually the source file stem).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pseudo-root prim.
    pub fn pseudo_root(&self) -> &Prim {
        &self.root
    }

    /// Define a prim at `path` with the given type, creating missing
    /// ancestors as `Xform`s. Defining an existing path returns the
    /// existing prim unchanged.
    ///
    /// Imageable prim types receive their schema fallbacks (`visibility`,
    /// `purpose`) at definition time.
    pub fn define_prim(&self, path: &SdfPath, type_name: Token) -> Prim {
        let mut current = self.root.clone();
        let mut current_path = SdfPath::absolute_root();
        let components: Vec<&str> = path.components().collect();

        for (idx, component) in components.iter().enumerate() {
            let is_last = idx == components.len() - 1;
            // Components come from a validated path.
            current_path = match current_path.append_child(component) {
                Ok(p) => p,
                Err(_) => return current,
            };

            current = match current.child(component) {
                Some(existing) => existing,
                None => {
                    let ty = if is_last {
                        type_name.clone()
                    } else {
                        XFORM_TYPE
                    };
                    let prim = Prim::new(current_path.clone(), ty);
                    geom::apply_schema_fallbacks(&prim);
                    log::debug!("defined prim {} <{}>", prim.path(), prim.type_name());
                    current.add_child(prim.clone());
                    prim
                }
            };
        }

        current
    }

    /// Look up a prim by absolute path.
    pub fn prim_at_path(&self, path: &SdfPath) -> Option<Prim> {
        if path.is_absolute_root() {
            return Some(self.root.clone());
        }
        let mut current = self.root.clone();
        for component in path.components() {
            current = current.child(component)?;
        }
        Some(current)
    }

    /// All prims in depth-first order, pseudo-root excluded.
    pub fn traverse(&self) -> Vec<Prim> {
        let mut out = Vec::new();
        let mut pending: Vec<Prim> = self.root.children();
        pending.reverse();
        while let Some(prim) = pending.pop() {
            out.push(prim.clone());
            let mut children = prim.children();
            children.reverse();
            pending.extend(children);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::tokens;

    #[test]
    fn test_define_creates_ancestors() {
        let stage = Stage::new("test");
        let cube = stage.define_prim(
            &SdfPath::new("/World/Geo/Cube").unwrap(),
            Token::from_static("Cube"),
        );
        assert_eq!(cube.path().as_str(), "/World/Geo/Cube");
        assert_eq!(cube.type_name().as_str(), "Cube");

        let geo = stage
            .prim_at_path(&SdfPath::new("/World/Geo").unwrap())
            .unwrap();
        assert_eq!(geo.type_name().as_str(), "Xform");
    }

    #[test]
    fn test_define_existing_returns_same_prim() {
        let stage = Stage::new("test");
        let path = SdfPath::new("/World/Cube").unwrap();
        let first = stage.define_prim(&path, Token::from_static("Cube"));
        let second = stage.define_prim(&path, Token::from_static("Sphere"));
        assert!(first.same_prim(&second));
        assert_eq!(second.type_name().as_str(), "Cube");
    }

    #[test]
    fn test_imageable_fallbacks_applied() {
        let stage = Stage::new("test");
        let cube = stage.define_prim(&SdfPath::new("/Cube").unwrap(), Token::from_static("Cube"));
        let vis = cube
            .get_attribute(&tokens::VISIBILITY, TimeCode::Default)
            .and_then(|v| v.as_token().cloned());
        assert_eq!(vis, Some(tokens::INHERITED));

        let material = stage.define_prim(
            &SdfPath::new("/Looks/Red").unwrap(),
            Token::from_static("Material"),
        );
        assert!(!material.has_attribute(&tokens::VISIBILITY));
    }

    #[test]
    fn test_traverse_depth_first() {
        let stage = Stage::new("test");
        stage.define_prim(&SdfPath::new("/A/B").unwrap(), Token::from_static("Cube"));
        stage.define_prim(&SdfPath::new("/A/C").unwrap(), Token::from_static("Cube"));
        stage.define_prim(&SdfPath::new("/D").unwrap(), Token::from_static("Cube"));

        let paths: Vec<String> = stage
            .traverse()
            .iter()
            .map(|p| p.path().to_string())
            .collect();
        assert_eq!(paths, vec!["/A", "/A/B", "/A/C", "/D"]);
    }

    #[test]
    fn test_prim_at_missing_path() {
        let stage = Stage::new("test");
        assert!(stage.prim_at_path(&SdfPath::new("/Nope").unwrap()).is_none());
        assert!(stage.prim_at_path(&SdfPath::absolute_root()).is_some());
    }
}
