//! Attribute access for scene items.

use crate::bridge::scene_item::SceneItem;
use crate::sdf::Token;
use crate::stage::{Attribute, TokenAttribute};

/// The attribute-access collaborator: looks up typed attribute handles on
/// the item's prim by name.
pub struct Attributes {
    item: SceneItem,
}

impl Attributes {
    /// Attribute access for an item.
    pub fn attributes(item: &SceneItem) -> Self {
        Self { item: item.clone() }
    }

    /// An untyped attribute handle, `None` if undeclared.
    pub fn attribute(&self, name: &Token) -> Option<Attribute> {
        self.item.prim().attribute(name)
    }

    /// A token-typed attribute handle, `None` if undeclared or not
    /// token-valued.
    pub fn token_attribute(&self, name: &Token) -> Option<TokenAttribute> {
        self.attribute(name)
            .and_then(TokenAttribute::try_from_attribute)
    }

    /// Names of all attributes declared on the item's prim.
    pub fn attribute_names(&self) -> Vec<Token> {
        self.item.prim().attribute_names()
    }
}
