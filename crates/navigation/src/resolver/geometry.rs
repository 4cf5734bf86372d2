//! Cone filter, search origin and scoring shared by the target and fallback
//! searches.

use bevy::math::Rot2;
use bevy::prelude::*;

use crate::element::{DirectionFrame, NavDirection, NavigableElement};

/// Upper bound for `required_cos`. Width 1 opens the cone to the full front
/// hemisphere but never to 180 degrees, so candidates straight behind (and
/// exactly sideways) are always rejected.
pub const MAX_REQUIRED_COS: f32 = 0.999_999_9;

/// Minimum cosine between the direction vector and the vector to a candidate.
pub fn required_cos(search_width: f32) -> f32 {
    (1.0 - search_width).clamp(0.0, MAX_REQUIRED_COS)
}

/// Unit vector for `direction` in the element's configured frame.
pub fn direction_vector(direction: NavDirection, frame: DirectionFrame, orientation: Rot2) -> Vec2 {
    let screen = direction.screen_vector();
    match frame {
        DirectionFrame::Screen => screen,
        DirectionFrame::Local => (orientation * screen).normalize_or_zero(),
    }
}

/// Search origin: the anchor pushed toward `direction` by the element's
/// ignore-range margin.
pub fn edge_origin(
    anchor: Vec2,
    element: &NavigableElement,
    direction: NavDirection,
    dir_vector: Vec2,
) -> Vec2 {
    anchor + dir_vector * element.edge_margin(direction)
}

/// Whether `target` lies strictly inside the cone around `dir_vector`.
pub fn in_cone(origin: Vec2, dir_vector: Vec2, target: Vec2, required_cos: f32) -> bool {
    let to_target = (target - origin).normalize_or_zero();
    dir_vector.dot(to_target) > required_cos
}

/// Ranking key of one candidate. Squared distance keeps the ordering of true
/// distance without the square root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub distance_sq: f32,
    pub priority: f32,
}

impl Score {
    pub fn new(origin: Vec2, target: Vec2, priority: f32) -> Self {
        Self {
            distance_sq: origin.distance_squared(target),
            priority,
        }
    }

    /// Closer wins; on an exact distance tie higher priority wins; anything
    /// else keeps the incumbent.
    pub fn beats(&self, best: &Score) -> bool {
        self.distance_sq < best.distance_sq
            || (self.distance_sq == best.distance_sq && self.priority > best.priority)
    }
}

/// Running best-so-far fold over scored candidates.
#[derive(Debug, Default)]
pub struct BestCandidate {
    best: Option<(Entity, Score)>,
}

impl BestCandidate {
    pub fn offer(&mut self, entity: Entity, score: Score) {
        match &self.best {
            Some((_, best)) if !score.beats(best) => {}
            _ => self.best = Some((entity, score)),
        }
    }

    pub fn entity(&self) -> Option<Entity> {
        self.best.map(|(entity, _)| entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_required_cos_clamps() {
        assert!((required_cos(0.0) - MAX_REQUIRED_COS).abs() < f32::EPSILON);
        assert!((required_cos(0.5) - 0.5).abs() < f32::EPSILON);
        assert_eq!(required_cos(1.0), 0.0);
        assert_eq!(required_cos(3.0), 0.0);
        assert!((required_cos(-1.0) - MAX_REQUIRED_COS).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_width_accepts_only_aligned() {
        let cos = required_cos(0.0);
        assert!(in_cone(Vec2::ZERO, Vec2::Y, Vec2::new(0.0, 10.0), cos));
        assert!(!in_cone(Vec2::ZERO, Vec2::Y, Vec2::new(0.1, 10.0), cos));
    }

    #[test]
    fn test_full_width_rejects_sideways_and_behind() {
        let cos = required_cos(1.0);
        assert!(in_cone(Vec2::ZERO, Vec2::Y, Vec2::new(100.0, 1.0), cos));
        assert!(!in_cone(Vec2::ZERO, Vec2::Y, Vec2::new(100.0, 0.0), cos));
        assert!(!in_cone(Vec2::ZERO, Vec2::Y, Vec2::new(0.0, -10.0), cos));
    }

    #[test]
    fn test_coincident_target_is_not_in_cone() {
        assert!(!in_cone(Vec2::ONE, Vec2::Y, Vec2::ONE, 0.0));
    }

    #[test]
    fn test_local_frame_rotates_direction() {
        let turned = direction_vector(NavDirection::Up, DirectionFrame::Local, Rot2::radians(-FRAC_PI_2));
        assert!((turned - Vec2::X).length() < 1e-5, "got {turned}");
        let fixed = direction_vector(NavDirection::Up, DirectionFrame::Screen, Rot2::radians(-FRAC_PI_2));
        assert_eq!(fixed, Vec2::Y);
    }

    #[test]
    fn test_score_tie_break() {
        let near = Score { distance_sq: 4.0, priority: 0.0 };
        let far_important = Score { distance_sq: 9.0, priority: 100.0 };
        assert!(near.beats(&far_important));
        assert!(!far_important.beats(&near));

        let low = Score { distance_sq: 4.0, priority: 1.0 };
        let high = Score { distance_sq: 4.0, priority: 5.0 };
        assert!(high.beats(&low));
        assert!(!low.beats(&high));
        assert!(!low.beats(&low), "equal score keeps the incumbent");
    }

    #[test]
    fn test_best_candidate_keeps_first_of_equals() {
        let mut best = BestCandidate::default();
        let score = Score { distance_sq: 1.0, priority: 0.0 };
        best.offer(Entity::from_raw(1), score);
        best.offer(Entity::from_raw(2), score);
        assert_eq!(best.entity(), Some(Entity::from_raw(1)));
    }
}
