//! Scripted two-hand gesture standing in for a live hand tracker.
//!
//! The left hand reports a normalized 21-point landmark array, the right hand
//! named keypoints in surface units, so both tracker formats go through the
//! engine's adapters.

use glam::Vec2;
use rand::prelude::*;
use string_core::{
    Anchors, FingertipSource, HandId, Keypoint, KeypointHand, LandmarkHand, ObservationError,
    Viewport, INDEX_TIP, INDEX_TIP_NAME, LANDMARK_COUNT, THUMB_TIP, THUMB_TIP_NAME,
};

// Timeline (seconds)
const APPROACH_END: f32 = 0.5;
const PULL_END: f32 = 2.0;
const YANK_END: f32 = 2.1;
const HOLD_END: f32 = 2.6;
const GLITCH_AT: f32 = 2.3; // one frame where the tracker misreads the pinch

// Geometry (surface units)
const APPROACH_OFFSET: Vec2 = Vec2::new(0.0, 60.0);
const OPEN_GAP: f32 = 110.0;
const PINCH_GAP: f32 = 18.0;
const PULL_LEFT: Vec2 = Vec2::new(-40.0, 25.0);
const PULL_RIGHT: Vec2 = Vec2::new(40.0, -35.0);
const YANK_RIGHT: Vec2 = Vec2::new(45.0, 0.0);
const JITTER: f32 = 1.5;

pub const LEFT_HAND: HandId = HandId(1);
pub const RIGHT_HAND: HandId = HandId(2);

pub enum SimHand {
    Landmarks(LandmarkHand),
    Keypoints(KeypointHand),
}

impl FingertipSource for SimHand {
    fn hand_id(&self) -> HandId {
        match self {
            SimHand::Landmarks(h) => h.hand_id(),
            SimHand::Keypoints(h) => h.hand_id(),
        }
    }
    fn thumb_tip(&self) -> Option<Vec2> {
        match self {
            SimHand::Landmarks(h) => h.thumb_tip(),
            SimHand::Keypoints(h) => h.thumb_tip(),
        }
    }
    fn index_tip(&self) -> Option<Vec2> {
        match self {
            SimHand::Landmarks(h) => h.index_tip(),
            SimHand::Keypoints(h) => h.index_tip(),
        }
    }
    fn check(&self) -> Result<(), ObservationError> {
        match self {
            SimHand::Landmarks(h) => h.check(),
            SimHand::Keypoints(h) => h.check(),
        }
    }
}

pub struct GestureScript {
    anchors: Anchors,
    viewport: Viewport,
    rng: StdRng,
    glitched: bool,
}

impl GestureScript {
    pub fn new(anchors: Anchors, viewport: Viewport, seed: u64) -> Self {
        Self {
            anchors,
            viewport,
            rng: StdRng::seed_from_u64(seed),
            glitched: false,
        }
    }

    /// Hands visible at script time `t`.
    pub fn hands_at(&mut self, t: f32) -> Vec<SimHand> {
        if t >= HOLD_END + 1.0 {
            return Vec::new();
        }
        let (left_tip, right_tip) = self.tips_at(t);
        let mut gap = if (APPROACH_END..HOLD_END).contains(&t) {
            PINCH_GAP
        } else {
            OPEN_GAP
        };
        let right_gap = if !self.glitched && t >= GLITCH_AT {
            self.glitched = true;
            OPEN_GAP
        } else {
            gap
        };
        gap += self.rng.gen_range(-JITTER..JITTER);

        let left_tip = left_tip + self.jitter();
        let right_tip = right_tip + self.jitter();
        vec![
            SimHand::Landmarks(self.landmark_hand(left_tip, gap)),
            SimHand::Keypoints(keypoint_hand(right_tip, right_gap)),
        ]
    }

    fn tips_at(&self, t: f32) -> (Vec2, Vec2) {
        let Anchors { left, right } = self.anchors;
        if t < APPROACH_END {
            let k = 1.0 - t / APPROACH_END;
            return (left + APPROACH_OFFSET * k, right + APPROACH_OFFSET * k);
        }
        if t < PULL_END {
            let k = (t - APPROACH_END) / (PULL_END - APPROACH_END);
            return (left + PULL_LEFT * k, right + PULL_RIGHT * k);
        }
        let k = ((t - PULL_END) / (YANK_END - PULL_END)).min(1.0);
        (left + PULL_LEFT, right + PULL_RIGHT + YANK_RIGHT * k)
    }

    fn jitter(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.gen_range(-JITTER..JITTER),
            self.rng.gen_range(-JITTER..JITTER),
        )
    }

    fn landmark_hand(&self, index_tip: Vec2, gap: f32) -> LandmarkHand {
        let (w, h) = (self.viewport.width, self.viewport.height);
        let to_norm = |p: Vec2| [p.x / w, p.y / h];
        let mut landmarks = vec![to_norm(index_tip); LANDMARK_COUNT];
        landmarks[INDEX_TIP] = to_norm(index_tip);
        landmarks[THUMB_TIP] = to_norm(index_tip + Vec2::new(0.0, gap));
        LandmarkHand {
            id: LEFT_HAND,
            landmarks,
            viewport: self.viewport,
            mirrored: false,
        }
    }
}

fn keypoint_hand(index_tip: Vec2, gap: f32) -> KeypointHand {
    let thumb = index_tip + Vec2::new(0.0, gap);
    KeypointHand {
        id: RIGHT_HAND,
        keypoints: vec![
            Keypoint {
                name: THUMB_TIP_NAME.to_string(),
                x: thumb.x,
                y: thumb.y,
            },
            Keypoint {
                name: INDEX_TIP_NAME.to_string(),
                x: index_tip.x,
                y: index_tip.y,
            },
        ],
    }
}
