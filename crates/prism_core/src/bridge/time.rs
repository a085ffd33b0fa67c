//! Time resolution for scene items.

use crate::sdf::SdfPath;
use crate::stage::TimeCode;

/// Resolves the time code at which an item's values should evaluate.
///
/// The host owns the timeline; which frame applies can depend on where in
/// the scene hierarchy the item lives, so resolution takes the item's path.
pub trait TimeSource: Send + Sync {
    fn time_for_path(&self, path: &SdfPath) -> TimeCode;
}

/// Resolves every path to [`TimeCode::Default`].
#[derive(Debug, Default)]
pub struct DefaultTimeSource;

impl TimeSource for DefaultTimeSource {
    fn time_for_path(&self, _path: &SdfPath) -> TimeCode {
        TimeCode::Default
    }
}

/// Resolves every path to one pinned frame.
#[derive(Debug)]
pub struct FrameTimeSource {
    frame: f64,
}

impl FrameTimeSource {
    pub fn new(frame: f64) -> Self {
        Self { frame }
    }
}

impl TimeSource for FrameTimeSource {
    fn time_for_path(&self, _path: &SdfPath) -> TimeCode {
        TimeCode::Numeric(self.frame)
    }
}
