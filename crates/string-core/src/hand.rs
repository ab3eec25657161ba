//! Tracker-facing hand types.
//!
//! Trackers report hands in different shapes (a flat landmark array, a list
//! of named keypoints, ...). Everything is normalized here into a single
//! [`HandObservation`] so the engine never branches on format.

use glam::Vec2;
use log::debug;
use smallvec::SmallVec;

use crate::config::Viewport;
use crate::error::{Finger, ObservationError};
use crate::geometry;

/// Landmark indices in the common 21-point hand model.
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const LANDMARK_COUNT: usize = 21;

/// Keypoint names used by name-based trackers.
pub const THUMB_TIP_NAME: &str = "thumb_tip";
pub const INDEX_TIP_NAME: &str = "index_finger_tip";

/// Persistent hand identity supplied by the tracker's track association.
///
/// Only meaningful within one session. Losing an id is treated as the hand
/// leaving the scene; ids are never reassigned by list position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandId(pub u32);

impl std::fmt::Display for HandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One tracked hand for one frame, in interaction-surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandObservation {
    pub id: HandId,
    pub thumb_tip: Vec2,
    pub index_tip: Vec2,
}

impl HandObservation {
    pub fn new(id: HandId, thumb_tip: Vec2, index_tip: Vec2) -> Self {
        Self {
            id,
            thumb_tip,
            index_tip,
        }
    }

    /// Point that touches the string: the index fingertip.
    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.index_tip
    }

    #[inline]
    pub fn pinch_distance(&self) -> f32 {
        geometry::distance(self.thumb_tip, self.index_tip)
    }

    pub fn is_finite(&self) -> bool {
        geometry::is_finite(self.thumb_tip) && geometry::is_finite(self.index_tip)
    }

    /// Normalize any tracker format into an observation.
    pub fn from_source<S: FingertipSource + ?Sized>(src: &S) -> Result<Self, ObservationError> {
        src.check()?;
        let id = src.hand_id();
        let thumb = checked_tip(id, Finger::Thumb, src.thumb_tip())?;
        let index = checked_tip(id, Finger::Index, src.index_tip())?;
        Ok(Self::new(id, thumb, index))
    }
}

fn checked_tip(id: HandId, finger: Finger, tip: Option<Vec2>) -> Result<Vec2, ObservationError> {
    let tip = tip.ok_or(ObservationError::MissingTip { id, finger })?;
    if geometry::is_finite(tip) {
        Ok(tip)
    } else {
        Err(ObservationError::NonFinite { id, finger })
    }
}

/// Anything that can supply a hand identity and two fingertip coordinates.
pub trait FingertipSource {
    fn hand_id(&self) -> HandId;
    fn thumb_tip(&self) -> Option<Vec2>;
    fn index_tip(&self) -> Option<Vec2>;

    /// Format-level sanity check run before the tips are read.
    fn check(&self) -> Result<(), ObservationError> {
        Ok(())
    }
}

impl FingertipSource for HandObservation {
    fn hand_id(&self) -> HandId {
        self.id
    }
    fn thumb_tip(&self) -> Option<Vec2> {
        Some(self.thumb_tip)
    }
    fn index_tip(&self) -> Option<Vec2> {
        Some(self.index_tip)
    }
}

/// Hand reported as a 21-point landmark array in normalized `[0, 1]`
/// image coordinates.
#[derive(Clone, Debug)]
pub struct LandmarkHand {
    pub id: HandId,
    pub landmarks: Vec<[f32; 2]>,
    pub viewport: Viewport,
    /// Flip x so the picture behaves like a mirror (front cameras).
    pub mirrored: bool,
}

impl LandmarkHand {
    fn to_surface(&self, idx: usize) -> Option<Vec2> {
        let [x, y] = *self.landmarks.get(idx)?;
        let x = if self.mirrored { 1.0 - x } else { x };
        Some(Vec2::new(x * self.viewport.width, y * self.viewport.height))
    }
}

impl FingertipSource for LandmarkHand {
    fn hand_id(&self) -> HandId {
        self.id
    }
    fn thumb_tip(&self) -> Option<Vec2> {
        self.to_surface(THUMB_TIP)
    }
    fn index_tip(&self) -> Option<Vec2> {
        self.to_surface(INDEX_TIP)
    }
    fn check(&self) -> Result<(), ObservationError> {
        if self.landmarks.len() < LANDMARK_COUNT {
            return Err(ObservationError::LandmarkCount {
                id: self.id,
                expected: LANDMARK_COUNT,
                got: self.landmarks.len(),
            });
        }
        Ok(())
    }
}

/// Hand reported as named keypoints already in surface units.
#[derive(Clone, Debug)]
pub struct KeypointHand {
    pub id: HandId,
    pub keypoints: Vec<Keypoint>,
}

#[derive(Clone, Debug)]
pub struct Keypoint {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

impl KeypointHand {
    fn find(&self, name: &str) -> Option<Vec2> {
        self.keypoints
            .iter()
            .find(|k| k.name == name)
            .map(|k| Vec2::new(k.x, k.y))
    }
}

impl FingertipSource for KeypointHand {
    fn hand_id(&self) -> HandId {
        self.id
    }
    fn thumb_tip(&self) -> Option<Vec2> {
        self.find(THUMB_TIP_NAME)
    }
    fn index_tip(&self) -> Option<Vec2> {
        self.find(INDEX_TIP_NAME)
    }
}

/// Convert a frame's worth of tracker hands, dropping the ones that cannot
/// be used this tick.
pub fn collect_observations<'a, S, I>(sources: I) -> SmallVec<[HandObservation; 4]>
where
    S: FingertipSource + 'a + ?Sized,
    I: IntoIterator<Item = &'a S>,
{
    sources
        .into_iter()
        .filter_map(|s| match HandObservation::from_source(s) {
            Ok(obs) => Some(obs),
            Err(e) => {
                debug!("skipping hand: {e}");
                None
            }
        })
        .collect()
}
