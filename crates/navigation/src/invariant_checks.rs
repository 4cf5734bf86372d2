//! Runtime guards for the zone registry.
//!
//! Runs after the sync systems each frame (when `check_invariants` is on)
//! and checks that the registry's two maps agree, that every registered zone
//! is configured, and that each registered entity still carries a
//! `NavigableElement` naming the same zone. Violations are logged and counted;
//! nothing is repaired here since the next graph change rebuilds the registry.

use bevy::prelude::*;

use crate::config::NavigationSettings;
use crate::element::NavigableElement;
use crate::graph::ReachabilityGraph;
use crate::registry::ZoneRegistry;

/// Violations found in the last validation pass. Used by integration tests.
#[derive(Resource, Default, Debug)]
pub struct RegistryInvariantViolations {
    /// Forward and reverse maps disagree.
    pub bookkeeping: u32,
    /// Element registered under a zone the graph does not configure.
    pub unconfigured_zone: u32,
    /// Registered entity whose component is gone or names another zone.
    pub stale_element: u32,
}

impl RegistryInvariantViolations {
    pub fn total(&self) -> u32 {
        self.bookkeeping + self.unconfigured_zone + self.stale_element
    }
}

pub fn validate_zone_registry(
    settings: Res<NavigationSettings>,
    graph: Option<Res<ReachabilityGraph>>,
    registry: Res<ZoneRegistry>,
    elements: Query<&NavigableElement>,
    mut violations: ResMut<RegistryInvariantViolations>,
) {
    if !settings.check_invariants {
        return;
    }
    *violations = RegistryInvariantViolations::default();

    for problem in registry.check_invariants() {
        warn!("Invariant violation: zone registry {problem}");
        violations.bookkeeping += 1;
    }

    let Some(graph) = graph else {
        return;
    };
    for zone in registry.zones() {
        if !graph.contains_zone(zone) {
            warn!("Invariant violation: zone '{zone}' is registered but not configured");
            violations.unconfigured_zone += 1;
        }
    }
    for (entity, zone) in registry.iter() {
        match elements.get(entity) {
            Ok(element) if element.zone == zone => {}
            Ok(element) => {
                warn!(
                    "Invariant violation: {entity} registered in '{zone}' but its element says '{}'",
                    element.zone
                );
                violations.stale_element += 1;
            }
            Err(_) => {
                warn!("Invariant violation: {entity} registered in '{zone}' but has no NavigableElement");
                violations.stale_element += 1;
            }
        }
    }
}
