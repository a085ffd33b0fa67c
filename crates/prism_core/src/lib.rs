//! Prism Core - USD-style scene description with a host bridge layer.
//!
//! This crate provides:
//!
//! - **Scene description**: `Stage`, `Prim`, typed attributes with time
//!   samples, hierarchical `SdfPath`s and interned `Token`s
//! - **Geometry schema**: imageable classification, xform-op composition,
//!   and untransformed bounding-box computation (`BboxCache`)
//! - **USDA support**: loading a text subset of the USDA format
//! - **Host bridge**: `SceneItem` plus the `Object3d` facade exposing
//!   bounding box and visibility to a host application
//!
//! # Example
//!
//! ```ignore
//! use prism_core::bridge::{Object3dHandler, SceneItem};
//! use prism_core::stage::Stage;
//!
//! let stage = Stage::load_usda("scene.usda")?;
//! let prim = stage.prim_at_path(&"/World/Cube".parse()?).unwrap();
//! let handler = Object3dHandler::with_default_time();
//! let obj = handler.object3d(&SceneItem::from_prim(&prim)).unwrap();
//! println!("visible: {}", obj.visibility()?);
//! ```

pub mod bridge;
pub mod geom;
pub mod sdf;
pub mod stage;
pub mod usda;

// Re-export commonly used types
pub use bridge::{Object3d, Object3dError, Object3dHandler, PrimObject3d, SceneItem};
pub use sdf::{PathError, SdfPath, Token};
pub use stage::{Attribute, Prim, Stage, TimeCode, TokenAttribute, TypeMismatchError, Value, ValueType};
