//! Double-precision math types for scene-description work.
//!
//! Scene-description pipelines author positions and extents in doubles,
//! so everything here is built on glam's `DVec3`/`DMat4`.

// Re-export glam for convenience
pub use glam::{DMat4, DQuat, DVec3};

mod bbox;
pub use bbox::BBox3d;
