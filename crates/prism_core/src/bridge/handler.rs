//! Factory for the 3-D object capability.

use std::sync::Arc;

use crate::bridge::object3d::{Object3d, PrimObject3d};
use crate::bridge::scene_item::SceneItem;
use crate::bridge::time::{DefaultTimeSource, TimeSource};
use crate::geom;

/// Builds [`Object3d`] capabilities for scene items.
///
/// Only imageable geometry gets a capability; such prims always carry a
/// visibility attribute, which is the precondition
/// [`PrimObject3d`]'s error contract leans on.
pub struct Object3dHandler {
    time_source: Arc<dyn TimeSource>,
}

impl Object3dHandler {
    /// Create a handler resolving times through `time_source`.
    pub fn new(time_source: Arc<dyn TimeSource>) -> Self {
        Self { time_source }
    }

    /// Create a handler that evaluates everything at the default time.
    pub fn with_default_time() -> Self {
        Self::new(Arc::new(DefaultTimeSource))
    }

    /// The 3-D object capability for `item`, or `None` if the item is not
    /// imageable geometry.
    pub fn object3d(&self, item: &SceneItem) -> Option<Arc<dyn Object3d>> {
        if !geom::is_imageable(item.prim()) {
            log::debug!(
                "no Object3d for {} ({} is not imageable)",
                item.path(),
                item.node_type()
            );
            return None;
        }
        Some(Arc::new(PrimObject3d::new(
            item.clone(),
            self.time_source.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::Token;
    use crate::stage::Stage;

    #[test]
    fn test_handler_filters_non_imageable() {
        let stage = Stage::new("test");
        let cube = stage.define_prim(&"/Cube".parse().unwrap(), Token::from_static("Cube"));
        let material =
            stage.define_prim(&"/Looks/Red".parse().unwrap(), Token::from_static("Material"));

        let handler = Object3dHandler::with_default_time();
        assert!(handler.object3d(&SceneItem::from_prim(&cube)).is_some());
        assert!(handler.object3d(&SceneItem::from_prim(&material)).is_none());
    }

    #[test]
    fn test_handler_built_capability_works() {
        let stage = Stage::new("test");
        let cube = stage.define_prim(&"/Cube".parse().unwrap(), Token::from_static("Cube"));

        let handler = Object3dHandler::with_default_time();
        let obj = handler.object3d(&SceneItem::from_prim(&cube)).unwrap();
        // The factory precondition guarantees the visibility attribute.
        assert!(obj.visibility().unwrap());
    }
}
