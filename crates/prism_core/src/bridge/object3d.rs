//! The 3-D object capability: bounding box and visibility per scene item.

use std::sync::Arc;

use prism_math::BBox3d;
use thiserror::Error;

use crate::bridge::attributes::Attributes;
use crate::bridge::scene_item::SceneItem;
use crate::bridge::time::TimeSource;
use crate::geom::{tokens, BboxCache};
use crate::sdf::SdfPath;
use crate::stage::{Prim, TimeCode, TokenAttribute};

/// Errors from the 3-D object capability.
#[derive(Error, Debug)]
pub enum Object3dError {
    /// The item's prim has no token-typed `visibility` attribute.
    ///
    /// [`Object3dHandler`](crate::bridge::Object3dHandler) only builds this
    /// capability for imageable geometry, and imageable prims always carry a
    /// visibility attribute — hitting this means the facade was constructed
    /// outside the factory's contract, a defect rather than a runtime
    /// condition to retry.
    #[error("could not get visibility attribute for Object3d: {path}")]
    MissingVisibilityAttribute { path: SdfPath },
}

/// The host's generic "3-D object" capability contract.
///
/// Backing scene-graph systems implement these four operations so the host
/// can treat their items uniformly.
pub trait Object3d {
    /// The scene item this capability was created for.
    fn scene_item(&self) -> SceneItem;

    /// The item's axis-aligned bound in its own local space, computed fresh
    /// at the time resolved for the item's path.
    fn bounding_box(&self) -> BBox3d;

    /// Whether the item is visible; `true` unless visibility is `invisible`.
    fn visibility(&self) -> Result<bool, Object3dError>;

    /// Show (`inherited`) or hide (`invisible`) the item.
    fn set_visibility(&self, visible: bool) -> Result<(), Object3dError>;
}

/// Stage-backed implementation of [`Object3d`].
///
/// Holds the item plus the underlying prim, captured once at construction
/// for direct querying. The prim handle is never re-resolved from the item;
/// if the host ever rebinds an item to a different prim, this cached handle
/// goes stale with it.
pub struct PrimObject3d {
    item: SceneItem,
    prim: Prim,
    time_source: Arc<dyn TimeSource>,
}

impl PrimObject3d {
    /// Wrap a scene item. Callers are expected to go through
    /// [`Object3dHandler`](crate::bridge::Object3dHandler), which checks the
    /// imageable precondition first.
    pub fn new(item: SceneItem, time_source: Arc<dyn TimeSource>) -> Self {
        let prim = item.prim().clone();
        Self {
            item,
            prim,
            time_source,
        }
    }

    fn visibility_attribute(&self) -> Result<TokenAttribute, Object3dError> {
        Attributes::attributes(&self.item)
            .token_attribute(&tokens::VISIBILITY)
            .ok_or_else(|| Object3dError::MissingVisibilityAttribute {
                path: self.item.path().clone(),
            })
    }
}

impl Object3d for PrimObject3d {
    fn scene_item(&self) -> SceneItem {
        self.item.clone()
    }

    fn bounding_box(&self) -> BBox3d {
        // Bounds come from the stage's own computation. Strictly speaking
        // this is incomplete: an item of this scene-graph system could in
        // principle parent a child from another system, whose extent would
        // not be seen here. No such hierarchy exists today.
        let time = self.time_source.time_for_path(self.item.path());
        BboxCache::new(time, vec![tokens::DEFAULT]).compute_untransformed_bound(&self.prim)
    }

    fn visibility(&self) -> Result<bool, Object3dError> {
        let attr = self.visibility_attribute()?;
        Ok(attr
            .get(TimeCode::Default)
            .map_or(true, |value| value != tokens::INVISIBLE))
    }

    fn set_visibility(&self, visible: bool) -> Result<(), Object3dError> {
        let attr = self.visibility_attribute()?;
        attr.set(if visible {
            tokens::INHERITED
        } else {
            tokens::INVISIBLE
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::time::DefaultTimeSource;
    use crate::sdf::Token;
    use crate::stage::{Stage, Value, ValueType};
    use glam::DVec3;

    fn object_for(prim: &Prim) -> PrimObject3d {
        PrimObject3d::new(SceneItem::from_prim(prim), Arc::new(DefaultTimeSource))
    }

    fn unit_cube(stage: &Stage, path: &str) -> Prim {
        let prim = stage.define_prim(&path.parse().unwrap(), Token::from_static("Cube"));
        prim.declare_attribute(tokens::EXTENT, ValueType::Point3Array)
            .set(Value::Point3Array(vec![
                DVec3::splat(-0.5),
                DVec3::splat(0.5),
            ]))
            .unwrap();
        prim
    }

    #[test]
    fn test_scene_item_identity_across_calls() {
        let stage = Stage::new("test");
        let cube = unit_cube(&stage, "/Cube");
        let item = SceneItem::from_prim(&cube);
        let obj = PrimObject3d::new(item.clone(), Arc::new(DefaultTimeSource));
        assert_eq!(obj.scene_item(), item);
        assert_eq!(obj.scene_item(), item);
    }

    #[test]
    fn test_visibility_token_semantics() {
        let stage = Stage::new("test");
        let cube = unit_cube(&stage, "/Cube");
        let obj = object_for(&cube);

        // Fallback is inherited, which reads as visible.
        assert!(obj.visibility().unwrap());

        cube.attribute(&tokens::VISIBILITY)
            .unwrap()
            .set(Value::Token(tokens::INVISIBLE))
            .unwrap();
        assert!(!obj.visibility().unwrap());

        // Any token other than invisible reads as visible.
        cube.attribute(&tokens::VISIBILITY)
            .unwrap()
            .set(Value::Token(Token::new("custom")))
            .unwrap();
        assert!(obj.visibility().unwrap());
    }

    #[test]
    fn test_set_visibility_roundtrip() {
        let stage = Stage::new("test");
        let cube = unit_cube(&stage, "/Cube");
        let obj = object_for(&cube);

        obj.set_visibility(false).unwrap();
        assert!(!obj.visibility().unwrap());
        obj.set_visibility(true).unwrap();
        assert!(obj.visibility().unwrap());
    }

    #[test]
    fn test_set_visibility_idempotent() {
        let stage = Stage::new("test");
        let cube = unit_cube(&stage, "/Cube");
        let obj = object_for(&cube);

        obj.set_visibility(false).unwrap();
        obj.set_visibility(false).unwrap();
        assert!(!obj.visibility().unwrap());
        assert_eq!(
            cube.get_attribute(&tokens::VISIBILITY, TimeCode::Default),
            Some(Value::Token(tokens::INVISIBLE))
        );
    }

    #[test]
    fn test_write_visible_to_other_holders() {
        let stage = Stage::new("test");
        let cube = unit_cube(&stage, "/Cube");
        let writer = object_for(&cube);
        let reader = object_for(&cube);

        writer.set_visibility(false).unwrap();
        assert!(!reader.visibility().unwrap());
    }

    #[test]
    fn test_bounding_box_unit_cube() {
        let stage = Stage::new("test");
        let cube = unit_cube(&stage, "/Cube");
        let obj = object_for(&cube);

        let bbox = obj.bounding_box();
        assert!((bbox.min - DVec3::splat(-0.5)).length() < 1e-12);
        assert!((bbox.max - DVec3::splat(0.5)).length() < 1e-12);
    }

    #[test]
    fn test_bounding_box_includes_descendants() {
        let stage = Stage::new("test");
        let world = stage.define_prim(&"/World".parse().unwrap(), Token::from_static("Xform"));
        let cube = unit_cube(&stage, "/World/Cube");
        cube.declare_attribute(tokens::XFORM_OP_TRANSLATE, ValueType::Double3)
            .set(Value::Double3(DVec3::new(4.0, 0.0, 0.0)))
            .unwrap();

        let obj = object_for(&world);
        let bbox = obj.bounding_box();
        assert_eq!(bbox.min, DVec3::new(3.5, -0.5, -0.5));
        assert_eq!(bbox.max, DVec3::new(4.5, 0.5, 0.5));
    }

    #[test]
    fn test_missing_visibility_attribute_errors() {
        let stage = Stage::new("test");
        let material =
            stage.define_prim(&"/Looks/Red".parse().unwrap(), Token::from_static("Material"));
        let obj = object_for(&material);

        // Deterministic on both the read and the write path.
        for _ in 0..2 {
            let err = obj.visibility().unwrap_err();
            assert!(matches!(
                &err,
                Object3dError::MissingVisibilityAttribute { path }
                    if path.as_str() == "/Looks/Red"
            ));
        }
        assert!(obj.set_visibility(true).is_err());
    }
}
