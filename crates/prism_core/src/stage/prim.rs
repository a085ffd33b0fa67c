//! Reference-counted prim handles.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::sdf::{SdfPath, Token};
use crate::stage::attribute::{AttrData, Attribute};
use crate::stage::timecode::TimeCode;
use crate::stage::value::{Value, ValueType};

/// A shared handle to one node of the stage's prim tree.
///
/// Cloning a `Prim` clones the handle, not the node: stage, scene items and
/// facades all reference the same storage, so attribute writes through any
/// handle are visible to every holder. Interior locking belongs to the prim
/// itself; callers never lock around it.
#[derive(Clone)]
pub struct Prim {
    inner: Arc<PrimData>,
}

struct PrimData {
    path: SdfPath,
    type_name: Token,
    attributes: RwLock<HashMap<Token, AttrData>>,
    children: RwLock<Vec<Prim>>,
}

impl Prim {
    pub(crate) fn new(path: SdfPath, type_name: Token) -> Self {
        Self {
            inner: Arc::new(PrimData {
                path,
                type_name,
                attributes: RwLock::new(HashMap::new()),
                children: RwLock::new(Vec::new()),
            }),
        }
    }

    /// The prim's path on the stage.
    pub fn path(&self) -> &SdfPath {
        &self.inner.path
    }

    /// The prim's schema type name, e.g. `Xform` or `Cube`.
    pub fn type_name(&self) -> &Token {
        &self.inner.type_name
    }

    /// The last component of the prim's path.
    pub fn name(&self) -> &str {
        self.inner.path.name()
    }

    /// True if both handles reference the same underlying prim.
    pub fn same_prim(&self, other: &Prim) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Snapshot of the prim's children, in authored order.
    pub fn children(&self) -> Vec<Prim> {
        self.inner
            .children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<Prim> {
        self.inner
            .children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|c| c.name() == name)
            .cloned()
    }

    pub(crate) fn add_child(&self, child: Prim) {
        self.inner
            .children
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(child);
    }

    /// Declare an attribute with the given type, returning its handle.
    ///
    /// Re-declaring an existing attribute keeps its authored data.
    pub fn declare_attribute(&self, name: Token, value_type: ValueType) -> Attribute {
        self.inner
            .attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.clone())
            .or_insert_with(|| AttrData::new(value_type));
        Attribute::new(self.clone(), name)
    }

    /// Look up an attribute handle by name.
    pub fn attribute(&self, name: &Token) -> Option<Attribute> {
        if self.has_attribute(name) {
            Some(Attribute::new(self.clone(), name.clone()))
        } else {
            None
        }
    }

    /// True if the attribute is declared on this prim.
    pub fn has_attribute(&self, name: &Token) -> bool {
        self.inner
            .attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Names of all declared attributes (unordered).
    pub fn attribute_names(&self) -> Vec<Token> {
        self.inner
            .attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Resolve an attribute value by name at a time code.
    pub fn get_attribute(&self, name: &Token, time: TimeCode) -> Option<Value> {
        self.with_attr(name, |data| data.resolve(time))?
    }

    pub(crate) fn with_attr<R>(&self, name: &Token, f: impl FnOnce(&AttrData) -> R) -> Option<R> {
        self.inner
            .attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(f)
    }

    pub(crate) fn with_attr_mut<R>(
        &self,
        name: &Token,
        f: impl FnOnce(&mut AttrData) -> R,
    ) -> Option<R> {
        self.inner
            .attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(name)
            .map(f)
    }
}

impl fmt::Debug for Prim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prim({} <{}>)", self.inner.path, self.inner.type_name)
    }
}
