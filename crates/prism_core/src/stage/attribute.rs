//! Attribute storage and handles.

use thiserror::Error;

use crate::sdf::Token;
use crate::stage::prim::Prim;
use crate::stage::timecode::TimeCode;
use crate::stage::value::{Value, ValueType};

/// Raised when a value of the wrong type is written to an attribute.
#[derive(Error, Debug)]
#[error("type mismatch writing attribute '{name}': expected {expected}, got {got}")]
pub struct TypeMismatchError {
    pub name: Token,
    pub expected: ValueType,
    pub got: ValueType,
}

/// Per-attribute storage: the declared type, an optional default value,
/// and time samples sorted by time.
#[derive(Debug, Clone)]
pub(crate) struct AttrData {
    pub(crate) value_type: ValueType,
    pub(crate) default: Option<Value>,
    pub(crate) samples: Vec<(f64, Value)>,
}

impl AttrData {
    pub(crate) fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            default: None,
            samples: Vec::new(),
        }
    }

    /// Resolve the value at a time code.
    ///
    /// `Default` prefers the authored default and falls back to the earliest
    /// sample. Numeric codes resolve with held interpolation: the nearest
    /// preceding sample, or the first sample before the earliest.
    pub(crate) fn resolve(&self, time: TimeCode) -> Option<Value> {
        match time {
            TimeCode::Default => self
                .default
                .clone()
                .or_else(|| self.samples.first().map(|(_, v)| v.clone())),
            TimeCode::Numeric(t) => {
                if self.samples.is_empty() {
                    return self.default.clone();
                }
                let idx = self.samples.partition_point(|(sample_time, _)| *sample_time <= t);
                let (_, value) = if idx == 0 {
                    &self.samples[0]
                } else {
                    &self.samples[idx - 1]
                };
                Some(value.clone())
            }
        }
    }

    pub(crate) fn set_default(&mut self, value: Value) {
        self.default = Some(value);
    }

    pub(crate) fn set_sample(&mut self, time: f64, value: Value) {
        match self
            .samples
            .binary_search_by(|(t, _)| t.partial_cmp(&time).unwrap_or(std::cmp::Ordering::Less))
        {
            Ok(idx) => self.samples[idx].1 = value,
            Err(idx) => self.samples.insert(idx, (time, value)),
        }
    }
}

/// A handle to one attribute of one prim.
///
/// Handles are cheap to clone; reads and writes go straight to the prim's
/// shared storage, so writes are visible to every other holder of the prim.
#[derive(Clone, Debug)]
pub struct Attribute {
    prim: Prim,
    name: Token,
}

impl Attribute {
    pub(crate) fn new(prim: Prim, name: Token) -> Self {
        Self { prim, name }
    }

    /// The attribute name.
    pub fn name(&self) -> &Token {
        &self.name
    }

    /// The owning prim.
    pub fn prim(&self) -> &Prim {
        &self.prim
    }

    /// The declared value type.
    pub fn value_type(&self) -> Option<ValueType> {
        self.prim.with_attr(&self.name, |data| data.value_type)
    }

    /// Resolve the attribute's value at a time code.
    pub fn get(&self, time: TimeCode) -> Option<Value> {
        self.prim.with_attr(&self.name, |data| data.resolve(time))?
    }

    /// Author the attribute's default value, validating the declared type.
    pub fn set(&self, value: Value) -> Result<(), TypeMismatchError> {
        let got = value.value_type();
        let expected = self
            .prim
            .with_attr_mut(&self.name, |data| {
                if data.value_type == got {
                    data.set_default(value);
                    None
                } else {
                    Some(data.value_type)
                }
            })
            .flatten();
        match expected {
            None => Ok(()),
            Some(expected) => Err(TypeMismatchError {
                name: self.name.clone(),
                expected,
                got,
            }),
        }
    }

    /// Author a time sample, validating the declared type.
    pub fn set_sample(&self, time: f64, value: Value) -> Result<(), TypeMismatchError> {
        let got = value.value_type();
        let expected = self
            .prim
            .with_attr_mut(&self.name, |data| {
                if data.value_type == got {
                    data.set_sample(time, value);
                    None
                } else {
                    Some(data.value_type)
                }
            })
            .flatten();
        match expected {
            None => Ok(()),
            Some(expected) => Err(TypeMismatchError {
                name: self.name.clone(),
                expected,
                got,
            }),
        }
    }

    /// Write a default value whose type the caller has already checked.
    pub(crate) fn set_unchecked(&self, value: Value) {
        self.prim.with_attr_mut(&self.name, |data| data.set_default(value));
    }
}

/// A typed view of an attribute whose declared type is `token`.
///
/// This is the enumerated-string read/write surface the bridge layer uses
/// for visibility and purpose.
#[derive(Clone, Debug)]
pub struct TokenAttribute {
    attr: Attribute,
}

impl TokenAttribute {
    /// Wrap an attribute, returning `None` unless it is token-typed.
    pub fn try_from_attribute(attr: Attribute) -> Option<Self> {
        match attr.value_type() {
            Some(ValueType::Token) => Some(Self { attr }),
            _ => None,
        }
    }

    /// The current token at a time code.
    pub fn get(&self, time: TimeCode) -> Option<Token> {
        self.attr.get(time)?.as_token().cloned()
    }

    /// Author the default token value.
    pub fn set(&self, value: Token) {
        // Declared type validated at construction.
        self.attr.set_unchecked(Value::Token(value));
    }

    /// The underlying untyped attribute.
    pub fn attribute(&self) -> &Attribute {
        &self.attr
    }
}
