//! Spring return of released endpoints.

use crate::geometry::lerp;
use crate::grab::{Endpoint, Endpoints, Side};

/// Close `factor` of the remaining gap between an idle endpoint and its
/// anchor. Held endpoints are left alone.
///
/// For `factor` in (0, 1] this never overshoots and the distance to the
/// anchor shrinks geometrically.
#[inline]
pub fn ease_toward_anchor(ep: &mut Endpoint, factor: f32) {
    if ep.is_grabbed() {
        return;
    }
    ep.position = lerp(ep.position, ep.anchor, factor);
}

pub fn ease_idle(endpoints: &mut Endpoints, factor: f32) {
    for side in Side::ORDER {
        ease_toward_anchor(endpoints.get_mut(side), factor);
    }
}

/// Ticks needed for an idle endpoint starting `distance` away to settle
/// within `epsilon` of its anchor.
pub fn ticks_to_settle(distance: f32, epsilon: f32, factor: f32) -> u32 {
    if distance <= epsilon {
        return 0;
    }
    if factor <= 0.0 {
        return u32::MAX;
    }
    if factor >= 1.0 {
        return 1;
    }
    ((epsilon / distance).ln() / (1.0 - factor).ln()).ceil().max(0.0) as u32
}
