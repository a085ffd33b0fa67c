//! Scene items: the host's handle to one prim.

use std::fmt;

use crate::sdf::SdfPath;
use crate::stage::Prim;

/// A host-side handle pairing a hierarchical path with the prim it was
/// resolved to.
///
/// Items are cheap to clone and shared freely; many components may hold
/// items for the same prim. Equality is by path, which is how the host
/// identifies items.
#[derive(Clone)]
pub struct SceneItem {
    path: SdfPath,
    prim: Prim,
}

impl SceneItem {
    /// Create an item for a prim under an explicit path.
    pub fn new(path: SdfPath, prim: Prim) -> Self {
        Self { path, prim }
    }

    /// Create an item whose path is the prim's stage path.
    pub fn from_prim(prim: &Prim) -> Self {
        Self {
            path: prim.path().clone(),
            prim: prim.clone(),
        }
    }

    /// The item's hierarchical path.
    pub fn path(&self) -> &SdfPath {
        &self.path
    }

    /// The underlying prim.
    pub fn prim(&self) -> &Prim {
        &self.prim
    }

    /// The prim's schema type name, as the host displays it.
    pub fn node_type(&self) -> &str {
        self.prim.type_name().as_str()
    }
}

impl PartialEq for SceneItem {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for SceneItem {}

impl fmt::Debug for SceneItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SceneItem({})", self.path)
    }
}
