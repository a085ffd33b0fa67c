//! Typed attribute values.

use std::fmt;

use glam::{DMat4, DVec3};

use crate::sdf::Token;

/// The declared type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    Double,
    String,
    Token,
    Double3,
    Point3Array,
    Matrix4d,
}

impl ValueType {
    /// The USDA spelling of this type.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::String => "string",
            ValueType::Token => "token",
            ValueType::Double3 => "double3",
            ValueType::Point3Array => "float3[]",
            ValueType::Matrix4d => "matrix4d",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An authored attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f32),
    Double(f64),
    String(String),
    Token(Token),
    Double3(DVec3),
    /// An array of 3-D points, e.g. an `extent` corner pair.
    Point3Array(Vec<DVec3>),
    Matrix4d(DMat4),
}

impl Value {
    /// The [`ValueType`] this value conforms to.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Double(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
            Value::Token(_) => ValueType::Token,
            Value::Double3(_) => ValueType::Double3,
            Value::Point3Array(_) => ValueType::Point3Array,
            Value::Matrix4d(_) => ValueType::Matrix4d,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Value::Token(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_double3(&self) -> Option<DVec3> {
        match self {
            Value::Double3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_point3_array(&self) -> Option<&[DVec3]> {
        match self {
            Value::Point3Array(points) => Some(points),
            _ => None,
        }
    }

    pub fn as_matrix4d(&self) -> Option<DMat4> {
        match self {
            Value::Matrix4d(m) => Some(*m),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            Value::Float(f) => Some(f64::from(*f)),
            Value::Int(i) => Some(f64::from(*i)),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_mapping() {
        assert_eq!(Value::Bool(true).value_type(), ValueType::Bool);
        assert_eq!(
            Value::Token(Token::new("inherited")).value_type(),
            ValueType::Token
        );
        assert_eq!(
            Value::Point3Array(vec![DVec3::ZERO]).value_type(),
            ValueType::Point3Array
        );
    }

    #[test]
    fn test_typed_accessors() {
        let v = Value::Double3(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(v.as_double3(), Some(DVec3::new(1.0, 2.0, 3.0)));
        assert!(v.as_token().is_none());

        let d = Value::Float(0.5);
        assert_eq!(d.as_double(), Some(0.5));
    }
}
