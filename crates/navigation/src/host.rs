//! The host seam: everything the resolver needs to know about an element
//! that it does not own itself.

use std::collections::HashMap;

use bevy::ecs::query::QueryData;
use bevy::math::Rot2;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::element::{Interactable, NavigableElement};

/// Capabilities the host UI provides to the resolver.
///
/// Positions are in a y-up screen frame: `NavDirection::Up` points toward
/// larger y.
pub trait NavHost {
    /// Navigation data of `entity`, if it is a navigable element.
    fn element(&self, entity: Entity) -> Option<&NavigableElement>;

    fn screen_position(&self, entity: Entity) -> Option<Vec2>;

    /// Rotation used for `DirectionFrame::Local`.
    fn orientation(&self, _entity: Entity) -> Rot2 {
        Rot2::IDENTITY
    }

    fn is_interactable(&self, entity: Entity) -> bool;

    fn is_active(&self, entity: Entity) -> bool;
}

// ---------------------------------------------------------------------------
// ECS host
// ---------------------------------------------------------------------------

/// How a `GlobalTransform` maps into the resolver's y-up screen frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateSpace {
    /// 2D world / sprite space: already y-up.
    #[default]
    World,
    /// `bevy_ui` layout space: y grows downward, so it is flipped.
    Ui,
}

impl CoordinateSpace {
    pub fn project(self, transform: &GlobalTransform) -> Vec2 {
        let p = transform.translation().truncate();
        match self {
            CoordinateSpace::World => p,
            CoordinateSpace::Ui => Vec2::new(p.x, -p.y),
        }
    }

    pub fn rotation(self, transform: &GlobalTransform) -> Rot2 {
        let (_, rotation, _) = transform.to_scale_rotation_translation();
        let right = (rotation * Vec3::X).truncate();
        let angle = right.y.atan2(right.x);
        match self {
            CoordinateSpace::World => Rot2::radians(angle),
            // Flipping y mirrors the rotation direction.
            CoordinateSpace::Ui => Rot2::radians(-angle),
        }
    }
}

/// Per-entity data the ECS host reads.
#[derive(QueryData)]
pub struct NavItem {
    pub element: &'static NavigableElement,
    pub transform: &'static GlobalTransform,
    pub interactable: Option<&'static Interactable>,
    pub visibility: Option<&'static InheritedVisibility>,
}

/// `NavHost` backed by a Bevy query over navigable entities.
pub struct QueryHost<'q, 'w, 's> {
    query: &'q Query<'w, 's, NavItem>,
    space: CoordinateSpace,
}

impl<'q, 'w, 's> QueryHost<'q, 'w, 's> {
    pub fn new(query: &'q Query<'w, 's, NavItem>, space: CoordinateSpace) -> Self {
        Self { query, space }
    }
}

impl NavHost for QueryHost<'_, '_, '_> {
    fn element(&self, entity: Entity) -> Option<&NavigableElement> {
        self.query.get(entity).ok().map(|item| item.element)
    }

    fn screen_position(&self, entity: Entity) -> Option<Vec2> {
        self.query
            .get(entity)
            .ok()
            .map(|item| self.space.project(item.transform))
    }

    fn orientation(&self, entity: Entity) -> Rot2 {
        self.query
            .get(entity)
            .map_or(Rot2::IDENTITY, |item| self.space.rotation(item.transform))
    }

    fn is_interactable(&self, entity: Entity) -> bool {
        self.query
            .get(entity)
            .is_ok_and(|item| item.interactable.map_or(true, |i| i.0))
    }

    fn is_active(&self, entity: Entity) -> bool {
        self.query
            .get(entity)
            .is_ok_and(|item| item.visibility.map_or(true, |v| v.get()))
    }
}

// ---------------------------------------------------------------------------
// Plain host
// ---------------------------------------------------------------------------

/// Host state for one element outside of the ECS.
#[derive(Debug, Clone)]
pub struct StaticElement {
    pub element: NavigableElement,
    pub position: Vec2,
    pub rotation: Rot2,
    pub interactable: bool,
    pub active: bool,
}

impl StaticElement {
    pub fn new(element: NavigableElement, position: Vec2) -> Self {
        Self {
            element,
            position,
            rotation: Rot2::IDENTITY,
            interactable: true,
            active: true,
        }
    }
}

/// A `NavHost` over a plain map, for driving the resolver without a `World`.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    elements: HashMap<Entity, StaticElement>,
}

impl StaticHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity, element: StaticElement) {
        self.elements.insert(entity, element);
    }

    pub fn remove(&mut self, entity: Entity) -> Option<StaticElement> {
        self.elements.remove(&entity)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut StaticElement> {
        self.elements.get_mut(&entity)
    }

    /// `(entity, zone)` pairs, for feeding `ZoneRegistry::rebuild`.
    pub fn zones(&self) -> impl Iterator<Item = (Entity, &str)> {
        self.elements
            .iter()
            .map(|(entity, e)| (*entity, e.element.zone.as_str()))
    }
}

impl NavHost for StaticHost {
    fn element(&self, entity: Entity) -> Option<&NavigableElement> {
        self.elements.get(&entity).map(|e| &e.element)
    }

    fn screen_position(&self, entity: Entity) -> Option<Vec2> {
        self.elements.get(&entity).map(|e| e.position)
    }

    fn orientation(&self, entity: Entity) -> Rot2 {
        self.elements
            .get(&entity)
            .map_or(Rot2::IDENTITY, |e| e.rotation)
    }

    fn is_interactable(&self, entity: Entity) -> bool {
        self.elements.get(&entity).is_some_and(|e| e.interactable)
    }

    fn is_active(&self, entity: Entity) -> bool {
        self.elements.get(&entity).is_some_and(|e| e.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_ui_space_flips_y() {
        let transform = GlobalTransform::from_translation(Vec3::new(10.0, 40.0, 0.0));
        assert_eq!(CoordinateSpace::World.project(&transform), Vec2::new(10.0, 40.0));
        assert_eq!(CoordinateSpace::Ui.project(&transform), Vec2::new(10.0, -40.0));
    }

    #[test]
    fn test_rotation_from_transform() {
        let transform = GlobalTransform::from(Transform::from_rotation(Quat::from_rotation_z(
            FRAC_PI_2,
        )));
        let world = CoordinateSpace::World.rotation(&transform);
        let ui = CoordinateSpace::Ui.rotation(&transform);
        assert!((world.as_radians() - FRAC_PI_2).abs() < 1e-5);
        assert!((ui.as_radians() + FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_static_host_unknown_entity() {
        let host = StaticHost::new();
        let nobody = Entity::from_raw(99);
        assert!(host.element(nobody).is_none());
        assert!(host.screen_position(nobody).is_none());
        assert!(!host.is_interactable(nobody));
        assert!(!host.is_active(nobody));
    }

    #[test]
    fn test_static_host_flags() {
        let mut host = StaticHost::new();
        let e = Entity::from_raw(1);
        let mut element = StaticElement::new(NavigableElement::new("A"), Vec2::ZERO);
        element.interactable = false;
        host.insert(e, element);
        assert!(!host.is_interactable(e));
        assert!(host.is_active(e));
        assert_eq!(host.zones().collect::<Vec<_>>(), vec![(e, "A")]);
    }
}
