/// A point on the stage's timeline at which attribute values resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeCode {
    /// The unvarying default; prefers an attribute's authored default value.
    Default,

    /// A specific frame on the timeline.
    Numeric(f64),
}

impl TimeCode {
    /// True for [`TimeCode::Default`].
    pub fn is_default(&self) -> bool {
        matches!(self, TimeCode::Default)
    }

    /// The frame number, if this is a numeric code.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            TimeCode::Default => None,
            TimeCode::Numeric(t) => Some(*t),
        }
    }
}

impl Default for TimeCode {
    fn default() -> Self {
        TimeCode::Default
    }
}

impl From<f64> for TimeCode {
    fn from(t: f64) -> Self {
        TimeCode::Numeric(t)
    }
}
