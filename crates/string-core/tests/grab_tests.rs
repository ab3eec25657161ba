// Tests for the endpoint grab/release state machine.

use glam::Vec2;
use rand::prelude::*;
use string_core::grab::{update_endpoint, TrackedHand};
use string_core::pinch::PinchStatus;
use string_core::{Endpoints, GestureConfig, HandId, ReleaseReason, Side, Transition};

const LEFT: Vec2 = Vec2::new(100.0, 200.0);
const RIGHT: Vec2 = Vec2::new(400.0, 200.0);

fn endpoints() -> Endpoints {
    Endpoints::at_rest(LEFT, RIGHT)
}

fn pinching(id: u32, pointer: Vec2) -> TrackedHand {
    TrackedHand {
        id: HandId(id),
        pointer,
        pinch: PinchStatus {
            pinching: true,
            in_grace: false,
        },
    }
}

fn open(id: u32, pointer: Vec2) -> TrackedHand {
    TrackedHand {
        id: HandId(id),
        pointer,
        pinch: PinchStatus::default(),
    }
}

#[test]
fn pinching_hand_inside_radius_grabs_and_snaps() {
    let cfg = GestureConfig::default();
    let mut eps = endpoints();
    let tip = LEFT + Vec2::new(20.0, 0.0);

    let tr = update_endpoint(&mut eps, Side::Left, &[pinching(1, tip)], &cfg);
    assert_eq!(tr, Transition::Grabbed(HandId(1)));
    assert!(eps.left.is_grabbed());
    assert_eq!(eps.left.controller(), Some(HandId(1)));
    assert_eq!(eps.left.position, tip);
}

#[test]
fn open_hand_or_far_hand_does_not_grab() {
    let cfg = GestureConfig::default();
    let mut eps = endpoints();
    let near = LEFT + Vec2::new(10.0, 0.0);
    let far = LEFT + Vec2::new(31.0, 0.0);

    assert_eq!(
        update_endpoint(&mut eps, Side::Left, &[open(1, near)], &cfg),
        Transition::Idle
    );
    assert_eq!(
        update_endpoint(&mut eps, Side::Left, &[pinching(1, far)], &cfg),
        Transition::Idle
    );
    assert!(!eps.left.is_grabbed());
    assert_eq!(eps.left.position, LEFT);
}

#[test]
fn grab_radius_is_inclusive() {
    let cfg = GestureConfig::default();
    let mut eps = endpoints();
    let edge = LEFT + Vec2::new(30.0, 0.0);
    assert_eq!(
        update_endpoint(&mut eps, Side::Left, &[pinching(1, edge)], &cfg),
        Transition::Grabbed(HandId(1))
    );
}

#[test]
fn grace_does_not_start_a_grab() {
    let cfg = GestureConfig::default();
    let mut eps = endpoints();
    let hand = TrackedHand {
        id: HandId(1),
        pointer: LEFT,
        pinch: PinchStatus {
            pinching: false,
            in_grace: true,
        },
    };
    assert_eq!(
        update_endpoint(&mut eps, Side::Left, &[hand], &cfg),
        Transition::Idle
    );
}

#[test]
fn held_endpoint_follows_hand() {
    let cfg = GestureConfig::default();
    let mut eps = endpoints();
    update_endpoint(&mut eps, Side::Left, &[pinching(1, LEFT)], &cfg);

    let moved = LEFT + Vec2::new(-25.0, 15.0);
    let tr = update_endpoint(&mut eps, Side::Left, &[pinching(1, moved)], &cfg);
    assert_eq!(tr, Transition::Held(HandId(1)));
    assert_eq!(eps.left.position, moved);
}

#[test]
fn hand_moving_past_release_radius_releases() {
    // GRAB_RADIUS + RELEASE_HYSTERESIS + 1 away while still pinching
    let cfg = GestureConfig::default();
    let mut eps = endpoints();
    update_endpoint(&mut eps, Side::Left, &[pinching(1, LEFT)], &cfg);

    let away = LEFT + Vec2::new(cfg.release_radius() + 1.0, 0.0);
    let tr = update_endpoint(&mut eps, Side::Left, &[pinching(1, away)], &cfg);
    assert_eq!(tr, Transition::Released(HandId(1), ReleaseReason::OutOfReach));
    assert!(!eps.left.is_grabbed());
    assert_eq!(eps.left.controller(), None);
}

#[test]
fn release_hysteresis_keeps_hold_between_radii() {
    let cfg = GestureConfig::default();
    let mut eps = endpoints();
    update_endpoint(&mut eps, Side::Left, &[pinching(1, LEFT)], &cfg);

    // 35 units is outside the grab radius but inside the release radius
    let step = LEFT + Vec2::new(35.0, 0.0);
    let tr = update_endpoint(&mut eps, Side::Left, &[pinching(1, step)], &cfg);
    assert_eq!(tr, Transition::Held(HandId(1)));
}

#[test]
fn grab_hysteresis_property() {
    // Property: idle endpoints grab only within the grab radius; held endpoints
    // keep their hand exactly while it stays within the release radius.
    let cfg = GestureConfig::default();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..1000 {
        let d: f32 = rng.gen_range(0.0..60.0);
        let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
        let tip = LEFT + Vec2::new(angle.cos(), angle.sin()) * d;
        let actual = tip.distance(LEFT);

        let mut idle = endpoints();
        let tr = update_endpoint(&mut idle, Side::Left, &[pinching(1, tip)], &cfg);
        assert_eq!(
            matches!(tr, Transition::Grabbed(_)),
            actual <= cfg.grab_radius,
            "idle at {actual}"
        );

        let mut held = endpoints();
        update_endpoint(&mut held, Side::Left, &[pinching(1, LEFT)], &cfg);
        let tr = update_endpoint(&mut held, Side::Left, &[pinching(1, tip)], &cfg);
        assert_eq!(
            matches!(tr, Transition::Held(_)),
            actual <= cfg.release_radius(),
            "held at {actual}"
        );
    }
}

#[test]
fn lost_or_opened_hand_releases() {
    let cfg = GestureConfig::default();
    let mut eps = endpoints();
    update_endpoint(&mut eps, Side::Left, &[pinching(1, LEFT)], &cfg);
    let tr = update_endpoint(&mut eps, Side::Left, &[], &cfg);
    assert_eq!(tr, Transition::Released(HandId(1), ReleaseReason::HandLost));

    update_endpoint(&mut eps, Side::Left, &[pinching(1, LEFT)], &cfg);
    let tr = update_endpoint(&mut eps, Side::Left, &[open(1, LEFT)], &cfg);
    assert_eq!(tr, Transition::Released(HandId(1), ReleaseReason::PinchOpened));
}

#[test]
fn grace_keeps_a_held_endpoint() {
    let cfg = GestureConfig::default();
    let mut eps = endpoints();
    update_endpoint(&mut eps, Side::Left, &[pinching(1, LEFT)], &cfg);
    let dropped = TrackedHand {
        id: HandId(1),
        pointer: LEFT,
        pinch: PinchStatus {
            pinching: false,
            in_grace: true,
        },
    };
    assert_eq!(
        update_endpoint(&mut eps, Side::Left, &[dropped], &cfg),
        Transition::Held(HandId(1))
    );
}

#[test]
fn nearest_hand_wins() {
    let cfg = GestureConfig::default();
    let mut eps = endpoints();
    let hands = [
        pinching(1, LEFT + Vec2::new(20.0, 0.0)),
        pinching(2, LEFT + Vec2::new(0.0, 5.0)),
    ];
    assert_eq!(
        update_endpoint(&mut eps, Side::Left, &hands, &cfg),
        Transition::Grabbed(HandId(2))
    );
}

#[test]
fn equidistant_hands_go_to_lowest_id() {
    let cfg = GestureConfig::default();
    let mut eps = endpoints();
    // Listed high id first so order alone would pick hand 9
    let hands = [
        pinching(9, LEFT + Vec2::new(10.0, 0.0)),
        pinching(4, LEFT + Vec2::new(-10.0, 0.0)),
    ];
    assert_eq!(
        update_endpoint(&mut eps, Side::Left, &hands, &cfg),
        Transition::Grabbed(HandId(4))
    );
}

#[test]
fn one_hand_cannot_hold_both_endpoints() {
    let cfg = GestureConfig::default();
    // Endpoints close together so one fingertip reaches both
    let mut eps = Endpoints::at_rest(Vec2::new(100.0, 100.0), Vec2::new(120.0, 100.0));
    let hand = [pinching(1, Vec2::new(110.0, 100.0))];

    let left = update_endpoint(&mut eps, Side::Left, &hand, &cfg);
    let right = update_endpoint(&mut eps, Side::Right, &hand, &cfg);
    // Exact tie: the left endpoint is evaluated first and keeps the hand
    assert_eq!(left, Transition::Grabbed(HandId(1)));
    assert_eq!(right, Transition::Idle);
    assert_eq!(eps.held_by(HandId(1)), Some(Side::Left));
}

#[test]
fn hand_nearer_the_right_endpoint_is_left_for_it() {
    let cfg = GestureConfig::default();
    let mut eps = Endpoints::at_rest(Vec2::new(100.0, 100.0), Vec2::new(120.0, 100.0));
    let hand = [pinching(1, Vec2::new(115.0, 100.0))];

    let left = update_endpoint(&mut eps, Side::Left, &hand, &cfg);
    let right = update_endpoint(&mut eps, Side::Right, &hand, &cfg);
    assert_eq!(left, Transition::Idle);
    assert_eq!(right, Transition::Grabbed(HandId(1)));
}

#[test]
fn hand_outbid_for_the_nearer_endpoint_still_takes_the_other() {
    let cfg = GestureConfig::default();
    let mut eps = Endpoints::at_rest(Vec2::new(100.0, 100.0), Vec2::new(130.0, 100.0));
    // Hand 1 is nearer the right endpoint, but hand 2 sits right on it
    let hands = [
        pinching(1, Vec2::new(120.0, 100.0)),
        pinching(2, Vec2::new(130.0, 100.0)),
    ];

    let left = update_endpoint(&mut eps, Side::Left, &hands, &cfg);
    let right = update_endpoint(&mut eps, Side::Right, &hands, &cfg);
    assert_eq!(left, Transition::Grabbed(HandId(1)));
    assert_eq!(right, Transition::Grabbed(HandId(2)));
    assert_eq!(eps.left.position, Vec2::new(120.0, 100.0));
}

#[test]
fn controller_of_other_endpoint_is_not_a_candidate() {
    let cfg = GestureConfig::default();
    let mut eps = Endpoints::at_rest(Vec2::new(100.0, 100.0), Vec2::new(150.0, 100.0));
    update_endpoint(&mut eps, Side::Right, &[pinching(1, Vec2::new(150.0, 100.0))], &cfg);
    assert!(eps.right.is_grabbed());

    // Hand 1 drags the right end right next to the left anchor
    let near_left = [pinching(1, Vec2::new(125.0, 100.0))];
    update_endpoint(&mut eps, Side::Right, &near_left, &cfg);
    let tr = update_endpoint(&mut eps, Side::Left, &near_left, &cfg);
    assert_eq!(tr, Transition::Idle);
    assert!(!eps.left.is_grabbed());
}

#[test]
fn two_hands_hold_both_ends() {
    let cfg = GestureConfig::default();
    let mut eps = endpoints();
    let hands = [pinching(1, LEFT), pinching(2, RIGHT)];
    for side in Side::ORDER {
        update_endpoint(&mut eps, side, &hands, &cfg);
    }
    assert_eq!(eps.left.controller(), Some(HandId(1)));
    assert_eq!(eps.right.controller(), Some(HandId(2)));
}
