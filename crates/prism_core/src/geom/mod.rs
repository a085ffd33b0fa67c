//! Geometry schema layer: well-known tokens, imageable classification,
//! xform-op composition, and bounding-box computation.

use glam::DMat4;
use prism_math::BBox3d;

use crate::sdf::Token;
use crate::stage::{Prim, TimeCode, Value, ValueType};

mod bbox_cache;
pub use bbox_cache::BboxCache;

/// Well-known geometry schema tokens.
pub mod tokens {
    use crate::sdf::Token;

    pub const VISIBILITY: Token = Token::from_static("visibility");
    pub const INHERITED: Token = Token::from_static("inherited");
    pub const INVISIBLE: Token = Token::from_static("invisible");

    pub const PURPOSE: Token = Token::from_static("purpose");
    pub const DEFAULT: Token = Token::from_static("default");
    pub const RENDER: Token = Token::from_static("render");
    pub const PROXY: Token = Token::from_static("proxy");
    pub const GUIDE: Token = Token::from_static("guide");

    pub const EXTENT: Token = Token::from_static("extent");

    pub const XFORM_OP_TRANSLATE: Token = Token::from_static("xformOp:translate");
    pub const XFORM_OP_ROTATE_XYZ: Token = Token::from_static("xformOp:rotateXYZ");
    pub const XFORM_OP_SCALE: Token = Token::from_static("xformOp:scale");
    pub const XFORM_OP_TRANSFORM: Token = Token::from_static("xformOp:transform");
}

/// Prim types that render and carry bounds/visibility semantics.
const IMAGEABLE_TYPES: &[&str] = &[
    "Xform",
    "Scope",
    "Mesh",
    "Cube",
    "Sphere",
    "Cylinder",
    "Cone",
    "Capsule",
    "Points",
    "PointInstancer",
];

/// True if the type name classifies as imageable geometry.
pub fn is_imageable_type(type_name: &Token) -> bool {
    IMAGEABLE_TYPES.iter().any(|t| type_name == *t)
}

/// True if the prim classifies as imageable geometry.
pub fn is_imageable(prim: &Prim) -> bool {
    is_imageable_type(prim.type_name())
}

/// Declare the imageable schema fallbacks on a freshly defined prim.
///
/// Authored values are never overwritten; only missing defaults are filled.
pub(crate) fn apply_schema_fallbacks(prim: &Prim) {
    if !is_imageable(prim) {
        return;
    }
    let vis = prim.declare_attribute(tokens::VISIBILITY, ValueType::Token);
    if vis.get(TimeCode::Default).is_none() {
        vis.set_unchecked(Value::Token(tokens::INHERITED));
    }
    let purpose = prim.declare_attribute(tokens::PURPOSE, ValueType::Token);
    if purpose.get(TimeCode::Default).is_none() {
        purpose.set_unchecked(Value::Token(tokens::DEFAULT));
    }
}

/// Compose a prim's local transform from its authored xform ops.
///
/// An authored `xformOp:transform` matrix wins outright; otherwise
/// translate, rotateXYZ (degrees) and scale compose in T·R·S order.
pub fn local_transform(prim: &Prim, time: TimeCode) -> DMat4 {
    if let Some(matrix) = prim
        .get_attribute(&tokens::XFORM_OP_TRANSFORM, time)
        .and_then(|v| v.as_matrix4d())
    {
        return matrix;
    }

    let mut result = DMat4::IDENTITY;
    if let Some(t) = prim
        .get_attribute(&tokens::XFORM_OP_TRANSLATE, time)
        .and_then(|v| v.as_double3())
    {
        result *= DMat4::from_translation(t);
    }
    if let Some(euler) = prim
        .get_attribute(&tokens::XFORM_OP_ROTATE_XYZ, time)
        .and_then(|v| v.as_double3())
    {
        result *= DMat4::from_rotation_x(euler.x.to_radians())
            * DMat4::from_rotation_y(euler.y.to_radians())
            * DMat4::from_rotation_z(euler.z.to_radians());
    }
    if let Some(s) = prim
        .get_attribute(&tokens::XFORM_OP_SCALE, time)
        .and_then(|v| v.as_double3())
    {
        result *= DMat4::from_scale(s);
    }
    result
}

/// Resolve a prim's visibility token, falling back to `inherited`.
pub fn resolve_visibility(prim: &Prim, time: TimeCode) -> Token {
    prim.get_attribute(&tokens::VISIBILITY, time)
        .and_then(|v| v.as_token().cloned())
        .unwrap_or(tokens::INHERITED)
}

/// Resolve a prim's purpose token, falling back to `default`.
pub fn resolve_purpose(prim: &Prim, time: TimeCode) -> Token {
    prim.get_attribute(&tokens::PURPOSE, time)
        .and_then(|v| v.as_token().cloned())
        .unwrap_or(tokens::DEFAULT)
}

/// Schema wrapper over an imageable prim.
///
/// Holds the prim and layers the bounds/visibility API on top of the raw
/// attribute storage.
pub struct Imageable {
    prim: Prim,
}

impl Imageable {
    /// Wrap a prim, returning `None` unless its type is imageable.
    pub fn new(prim: &Prim) -> Option<Self> {
        if is_imageable(prim) {
            Some(Self { prim: prim.clone() })
        } else {
            None
        }
    }

    /// The wrapped prim.
    pub fn prim(&self) -> &Prim {
        &self.prim
    }

    /// The authored extent as a bounding box, if any.
    pub fn extent(&self, time: TimeCode) -> Option<BBox3d> {
        let value = self.prim.get_attribute(&tokens::EXTENT, time)?;
        let points = value.as_point3_array()?;
        if points.len() < 2 {
            log::warn!(
                "extent on {} has {} point(s), expected a corner pair",
                self.prim.path(),
                points.len()
            );
            return None;
        }
        Some(BBox3d::from_points(points[0], points[1]))
    }
}
