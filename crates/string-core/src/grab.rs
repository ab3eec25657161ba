//! Endpoint ownership: which hand, if any, holds each end of the string.
//!
//! Each endpoint is either idle or held by exactly one hand. A hand holds at
//! most one endpoint. Decisions for an endpoint use the current tick's pinch
//! states and the endpoint's position from the previous tick.

use glam::Vec2;
use log::debug;

use crate::config::GestureConfig;
use crate::geometry::distance;
use crate::hand::HandId;
use crate::pinch::PinchStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Fixed evaluation order within a tick.
    pub const ORDER: [Side; 2] = [Side::Left, Side::Right];

    #[inline]
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// One end of the string.
///
/// The controlling hand is the only ownership state, so "grabbed" and
/// "has a controller" can never disagree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Endpoint {
    pub position: Vec2,
    pub anchor: Vec2,
    controller: Option<HandId>,
}

impl Endpoint {
    pub fn at_rest(anchor: Vec2) -> Self {
        Self {
            position: anchor,
            anchor,
            controller: None,
        }
    }

    #[inline]
    pub fn is_grabbed(&self) -> bool {
        self.controller.is_some()
    }

    #[inline]
    pub fn controller(&self) -> Option<HandId> {
        self.controller
    }

    fn grab(&mut self, id: HandId, at: Vec2) {
        self.controller = Some(id);
        self.position = at;
    }

    fn release(&mut self) {
        self.controller = None;
    }

    /// Drop any controller and put the endpoint back on its anchor.
    pub fn reset(&mut self) {
        self.controller = None;
        self.position = self.anchor;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Endpoints {
    pub left: Endpoint,
    pub right: Endpoint,
}

impl Endpoints {
    pub fn at_rest(left_anchor: Vec2, right_anchor: Vec2) -> Self {
        Self {
            left: Endpoint::at_rest(left_anchor),
            right: Endpoint::at_rest(right_anchor),
        }
    }

    pub fn get(&self, side: Side) -> &Endpoint {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Endpoint {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Which endpoint, if any, `id` currently holds.
    pub fn held_by(&self, id: HandId) -> Option<Side> {
        Side::ORDER
            .into_iter()
            .find(|s| self.get(*s).controller() == Some(id))
    }
}

/// A hand as seen by the grab logic on one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedHand {
    pub id: HandId,
    pub pointer: Vec2,
    pub pinch: PinchStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseReason {
    HandLost,
    PinchOpened,
    OutOfReach,
}

/// What happened to an endpoint on one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Idle,
    Grabbed(HandId),
    Held(HandId),
    Released(HandId, ReleaseReason),
}

/// Run grab/release for one endpoint.
///
/// Held: the controller keeps the endpoint while it is observed, still
/// holding its pinch (debounce included) and within `release_radius` of the
/// endpoint's previous position; the endpoint then follows its fingertip.
///
/// Idle: the nearest raw-pinching hand within `grab_radius` takes it, ties
/// going to the lowest hand id. The other endpoint's controller is never a
/// candidate. A hand that would win the other idle endpoint and is strictly
/// nearer to it is left for that endpoint.
pub fn update_endpoint(
    endpoints: &mut Endpoints,
    side: Side,
    hands: &[TrackedHand],
    cfg: &GestureConfig,
) -> Transition {
    let other = *endpoints.get(side.other());
    let ep = endpoints.get_mut(side);

    if let Some(id) = ep.controller() {
        let reason = match hands.iter().find(|h| h.id == id) {
            None => ReleaseReason::HandLost,
            Some(h) if !h.pinch.holds() => ReleaseReason::PinchOpened,
            Some(h) if distance(h.pointer, ep.position) > cfg.release_radius() => {
                ReleaseReason::OutOfReach
            }
            Some(h) => {
                ep.position = h.pointer;
                return Transition::Held(id);
            }
        };
        ep.release();
        debug!("{side:?} endpoint released by hand {id}: {reason:?}");
        return Transition::Released(id, reason);
    }

    // Only the hand that wins the other idle endpoint, and is strictly nearer
    // to it, is kept back for it.
    let reserved = if other.is_grabbed() {
        None
    } else {
        nearest_pinching(hands, other.position, None, cfg)
            .filter(|h| distance(h.pointer, other.position) < distance(h.pointer, ep.position))
            .map(|h| h.id)
    };

    match nearest_pinching(hands, ep.position, other.controller().or(reserved), cfg) {
        Some(h) => {
            ep.grab(h.id, h.pointer);
            debug!("{side:?} endpoint grabbed by hand {}", h.id);
            Transition::Grabbed(h.id)
        }
        None => Transition::Idle,
    }
}

/// Nearest raw-pinching hand within `grab_radius` of `from`, ties going to
/// the lowest id.
fn nearest_pinching<'a>(
    hands: &'a [TrackedHand],
    from: Vec2,
    exclude: Option<HandId>,
    cfg: &GestureConfig,
) -> Option<&'a TrackedHand> {
    hands
        .iter()
        .filter(|h| h.pinch.pinching && Some(h.id) != exclude)
        .map(|h| (h, distance(h.pointer, from)))
        .filter(|(_, d)| *d <= cfg.grab_radius)
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.id.cmp(&b.0.id)))
        .map(|(h, _)| h)
}
