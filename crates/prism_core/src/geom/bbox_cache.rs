//! Untransformed bounding-box computation over a prim subtree.

use glam::DMat4;
use prism_math::BBox3d;

use crate::geom::{local_transform, resolve_purpose, resolve_visibility, tokens, Imageable};
use crate::sdf::Token;
use crate::stage::{Prim, TimeCode};

/// Computes axis-aligned bounds for prim subtrees at a fixed time code,
/// filtered to a set of included purposes.
///
/// Every query walks the subtree fresh; callers that need memoization keep
/// the cache object around and reuse it for related queries.
pub struct BboxCache {
    time: TimeCode,
    included_purposes: Vec<Token>,
}

impl BboxCache {
    /// Create a cache for a time code and purpose set.
    pub fn new(time: TimeCode, included_purposes: Vec<Token>) -> Self {
        Self {
            time,
            included_purposes,
        }
    }

    /// The time code bounds resolve at.
    pub fn time(&self) -> TimeCode {
        self.time
    }

    /// Compute the bound of `prim`'s subtree in `prim`'s local space.
    ///
    /// The queried prim's own transform is excluded; each descendant's
    /// authored extent contributes under the transforms accumulated below
    /// the queried prim. Invisible and excluded-purpose subtrees are pruned.
    pub fn compute_untransformed_bound(&self, prim: &Prim) -> BBox3d {
        let mut bound = BBox3d::EMPTY;
        self.accumulate(prim, DMat4::IDENTITY, &mut bound);
        log::debug!(
            "untransformed bound for {}: min={:?} max={:?}",
            prim.path(),
            bound.min,
            bound.max
        );
        bound
    }

    fn accumulate(&self, prim: &Prim, xform: DMat4, bound: &mut BBox3d) {
        if resolve_visibility(prim, self.time) == tokens::INVISIBLE {
            return;
        }
        let purpose = resolve_purpose(prim, self.time);
        if !self.included_purposes.iter().any(|p| *p == purpose) {
            return;
        }

        if let Some(imageable) = Imageable::new(prim) {
            if let Some(extent) = imageable.extent(self.time) {
                *bound = bound.union(&extent.transformed(&xform));
            }
        }

        for child in prim.children() {
            let child_xform = xform * local_transform(&child, self.time);
            self.accumulate(&child, child_xform, bound);
        }
    }
}
