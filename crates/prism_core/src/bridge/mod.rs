//! Host-application bridge layer.
//!
//! A host DCC application works with scene items polymorphically, asking a
//! handler for capability interfaces per item. This module provides the
//! stage-backed side of that contract: [`SceneItem`], attribute access, time
//! resolution, and the [`Object3d`] capability (bounding box + visibility)
//! with its factory [`Object3dHandler`].

mod attributes;
mod handler;
mod object3d;
mod scene_item;
mod time;

pub use attributes::Attributes;
pub use handler::Object3dHandler;
pub use object3d::{Object3d, Object3dError, PrimObject3d};
pub use scene_item::SceneItem;
pub use time::{DefaultTimeSource, FrameTimeSource, TimeSource};
