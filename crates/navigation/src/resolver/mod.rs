//! Directional resolver: picks the element that should receive focus when
//! the user moves from `origin` in a direction.
//!
//! The search is a pure query over three inputs:
//! - the `ReachabilityGraph` (which zones may be entered),
//! - the `ZoneRegistry` (which elements live in those zones),
//! - a `NavHost` (positions, rotation and interactable/active flags).
//!
//! `find_target` runs the geometric cone search. `find_fallback` walks the
//! origin's authored fallback list. `resolve` chains the two.

mod geometry;


pub use geometry::{direction_vector, in_cone, required_cos, Score, MAX_REQUIRED_COS};

use bevy::prelude::*;

use crate::element::{NavDirection, NavigableElement};
use crate::graph::ReachabilityGraph;
use crate::host::NavHost;
use crate::nav_error::NavError;
use crate::registry::ZoneRegistry;
use geometry::{edge_origin, BestCandidate};

/// Result of the full move procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Focus should move to `target`.
    Moved { target: Entity, via_fallback: bool },
    /// Nothing qualified; the input is left to the host.
    Unhandled,
}

impl NavOutcome {
    pub fn target(self) -> Option<Entity> {
        match self {
            NavOutcome::Moved { target, .. } => Some(target),
            NavOutcome::Unhandled => None,
        }
    }
}

/// Origin data resolved once per query.
struct Origin<'e> {
    entity: Entity,
    zone: &'e str,
    element: &'e NavigableElement,
    dir_vector: Vec2,
    search_from: Vec2,
}

/// Borrowed view over graph, registry and host for answering navigation queries.
pub struct Navigator<'a, H: NavHost> {
    graph: &'a ReachabilityGraph,
    registry: &'a ZoneRegistry,
    host: &'a H,
}

impl<'a, H: NavHost> Navigator<'a, H> {
    pub fn new(graph: &'a ReachabilityGraph, registry: &'a ZoneRegistry, host: &'a H) -> Self {
        Self {
            graph,
            registry,
            host,
        }
    }

    /// Build a navigator where the graph may not exist yet (e.g. an optional
    /// ECS resource). A missing graph means the subsystem was never set up,
    /// which is reported instead of being treated as "nothing reachable".
    pub fn try_new(
        graph: Option<&'a ReachabilityGraph>,
        registry: &'a ZoneRegistry,
        host: &'a H,
    ) -> Result<Self, NavError> {
        let graph = graph.ok_or(NavError::GraphMissing)?;
        Ok(Self::new(graph, registry, host))
    }

    /// Best element in the cone around `direction`, or `None`.
    pub fn find_target(&self, origin: Entity, direction: NavDirection) -> Option<Entity> {
        let origin = self.origin(origin, direction)?;
        let min_cos = required_cos(origin.element.settings(direction).search_width);

        let mut best = BestCandidate::default();
        for candidate in self.registry.each_reachable(self.graph, origin.zone) {
            if !self.is_eligible(&origin, candidate) {
                continue;
            }
            let Some(position) = self.host.screen_position(candidate) else {
                continue;
            };
            if !in_cone(origin.search_from, origin.dir_vector, position, min_cos) {
                continue;
            }
            best.offer(
                candidate,
                Score::new(origin.search_from, position, self.priority(candidate)),
            );
        }
        best.entity()
    }

    /// Best entry of the origin's fallback list for `direction`, or `None`.
    ///
    /// No cone filter applies; entries still have to be interactable, active
    /// and in a zone the origin can reach.
    pub fn find_fallback(&self, origin: Entity, direction: NavDirection) -> Option<Entity> {
        let origin = self.origin(origin, direction)?;
        let fallbacks = &origin.element.settings(direction).fallbacks;
        if fallbacks.is_empty() {
            return None;
        }

        let mut best = BestCandidate::default();
        for &candidate in fallbacks {
            if !self.is_eligible(&origin, candidate) {
                continue;
            }
            let Some(position) = self.host.screen_position(candidate) else {
                continue;
            };
            best.offer(
                candidate,
                Score::new(origin.search_from, position, self.priority(candidate)),
            );
        }
        best.entity()
    }

    /// Direct search, then fallback.
    pub fn resolve(&self, origin: Entity, direction: NavDirection) -> NavOutcome {
        if let Some(target) = self
            .find_target(origin, direction)
            .filter(|&t| self.is_alive(t))
        {
            return NavOutcome::Moved {
                target,
                via_fallback: false,
            };
        }
        match self.find_fallback(origin, direction) {
            Some(target) => NavOutcome::Moved {
                target,
                via_fallback: true,
            },
            None => NavOutcome::Unhandled,
        }
    }

    /// First interactable, active element registered in `zone`, if any.
    ///
    /// Used to seed focus when nothing is focused yet. Ties are broken by
    /// priority, then by the top-left-most position.
    pub fn entry_point(&self, zone: &str) -> Option<Entity> {
        self.registry
            .elements_in(zone)
            .filter(|&e| self.is_alive(e))
            .filter_map(|e| self.host.screen_position(e).map(|p| (e, p)))
            .max_by(|(a, pa), (b, pb)| {
                self.priority(*a)
                    .total_cmp(&self.priority(*b))
                    .then(pa.y.total_cmp(&pb.y))
                    .then(pb.x.total_cmp(&pa.x))
            })
            .map(|(e, _)| e)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn origin(&self, entity: Entity, direction: NavDirection) -> Option<Origin<'a>> {
        let element = self.host.element(entity)?;
        if !element.is_enabled(direction) {
            return None;
        }
        // Inert origins (unregistered or unconfigured zone) never navigate.
        let zone = self.registry.zone_of(entity)?;
        let anchor = self.host.screen_position(entity)?;
        let dir_vector = direction_vector(direction, element.frame, self.host.orientation(entity));
        Some(Origin {
            entity,
            zone,
            element,
            dir_vector,
            search_from: edge_origin(anchor, element, direction, dir_vector),
        })
    }

    fn is_alive(&self, entity: Entity) -> bool {
        self.host.is_interactable(entity) && self.host.is_active(entity)
    }

    fn is_eligible(&self, origin: &Origin, candidate: Entity) -> bool {
        if candidate == origin.entity || !self.is_alive(candidate) {
            return false;
        }
        self.registry
            .zone_of(candidate)
            .is_some_and(|zone| self.graph.can_navigate(origin.zone, zone))
    }

    fn priority(&self, entity: Entity) -> f32 {
        self.host.element(entity).map_or(0.0, |e| e.priority)
    }
}
