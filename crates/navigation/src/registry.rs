//! Live zone membership of navigable elements.
//!
//! `ZoneRegistry` keeps two maps that must always agree:
//! - `members`: zone -> set of entities,
//! - `zone_of`: entity -> zone.
//!
//! Only elements whose zone is configured in the `ReachabilityGraph` are
//! stored. Everything else is inert until it is re-added with a valid zone
//! (or the graph learns the zone and `rebuild` runs).

use std::collections::{hash_map, hash_set, HashMap, HashSet};

use bevy::prelude::*;

use crate::graph::ReachabilityGraph;

/// Result of an `add` / `set_zone` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The element now lives in the requested zone.
    Registered,
    /// The zone name was empty; the element is inert.
    EmptyZone,
    /// The zone is not configured in the graph; the element is inert.
    UnconfiguredZone,
}

impl Registration {
    pub fn is_registered(self) -> bool {
        self == Registration::Registered
    }
}

#[derive(Resource, Debug, Default)]
pub struct ZoneRegistry {
    members: HashMap<String, HashSet<Entity>>,
    zone_of: HashMap<Entity, String>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `element` under `zone`, moving it out of any previous zone first.
    pub fn add(
        &mut self,
        element: Entity,
        zone: &str,
        graph: &ReachabilityGraph,
    ) -> Registration {
        if self.zone_of.get(&element).is_some_and(|z| z == zone) {
            // Same zone again: still re-validate against the graph.
            if graph.contains_zone(zone) {
                return Registration::Registered;
            }
        }
        self.remove(element);

        if zone.is_empty() {
            return Registration::EmptyZone;
        }
        if !graph.contains_zone(zone) {
            return Registration::UnconfiguredZone;
        }
        self.members
            .entry(zone.to_string())
            .or_default()
            .insert(element);
        self.zone_of.insert(element, zone.to_string());
        Registration::Registered
    }

    /// Move `element` to `zone` in one step. Equivalent to `add`; kept as the
    /// explicit entry point for zone edits.
    pub fn set_zone(
        &mut self,
        element: Entity,
        zone: &str,
        graph: &ReachabilityGraph,
    ) -> Registration {
        self.add(element, zone, graph)
    }

    /// Drop `element` from both maps. Unknown elements are ignored.
    ///
    /// Returns the zone it was registered under.
    pub fn remove(&mut self, element: Entity) -> Option<String> {
        let zone = self.zone_of.remove(&element)?;
        if let hash_map::Entry::Occupied(mut set) = self.members.entry(zone.clone()) {
            set.get_mut().remove(&element);
            if set.get().is_empty() {
                set.remove();
            }
        }
        Some(zone)
    }

    pub fn zone_of(&self, element: Entity) -> Option<&str> {
        self.zone_of.get(&element).map(String::as_str)
    }

    pub fn contains(&self, element: Entity) -> bool {
        self.zone_of.contains_key(&element)
    }

    /// Elements currently registered in exactly `zone`.
    pub fn elements_in(&self, zone: &str) -> impl Iterator<Item = Entity> + '_ {
        self.members
            .get(zone)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Zones with at least one element, in no particular order.
    pub fn zones(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Every registered (element, zone) pair.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &str)> {
        self.zone_of.iter().map(|(&e, z)| (e, z.as_str()))
    }

    /// Number of zones with at least one element.
    pub fn zone_count(&self) -> usize {
        self.members.len()
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.zone_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zone_of.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.zone_of.clear();
    }

    /// Every element in a zone that `from_zone` can navigate into.
    ///
    /// The iterator reads the registry as it is now; call again for a fresh scan.
    pub fn each_reachable<'a>(
        &'a self,
        graph: &'a ReachabilityGraph,
        from_zone: &'a str,
    ) -> ReachableElements<'a> {
        ReachableElements {
            graph,
            from_zone,
            zones: self.members.iter(),
            current: None,
        }
    }

    /// Re-register a full set of `(entity, zone)` pairs against `graph`.
    ///
    /// Used after the graph changes so elements that were inert because of a
    /// missing zone come back (and elements of a removed zone go inert).
    /// Returns how many elements ended up registered.
    pub fn rebuild<'z>(
        &mut self,
        graph: &ReachabilityGraph,
        elements: impl IntoIterator<Item = (Entity, &'z str)>,
    ) -> usize {
        self.clear();
        elements
            .into_iter()
            .filter(|&(entity, zone)| self.add(entity, zone, graph).is_registered())
            .count()
    }

    /// Describe every disagreement between the forward and reverse maps.
    /// An empty result means the registry is consistent.
    pub fn check_invariants(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (zone, set) in &self.members {
            if set.is_empty() {
                problems.push(format!("zone '{zone}' has an empty member set"));
            }
            for entity in set {
                match self.zone_of.get(entity) {
                    Some(z) if z == zone => {}
                    Some(z) => problems.push(format!(
                        "{entity} is in set '{zone}' but reverse map says '{z}'"
                    )),
                    None => problems.push(format!(
                        "{entity} is in set '{zone}' but has no reverse entry"
                    )),
                }
            }
        }
        for (entity, zone) in &self.zone_of {
            if !self.members.get(zone).is_some_and(|set| set.contains(entity)) {
                problems.push(format!(
                    "{entity} maps to '{zone}' but is missing from that set"
                ));
            }
        }
        problems
    }
}

/// Iterator over registered elements reachable from one zone.
pub struct ReachableElements<'a> {
    graph: &'a ReachabilityGraph,
    from_zone: &'a str,
    zones: hash_map::Iter<'a, String, HashSet<Entity>>,
    current: Option<hash_set::Iter<'a, Entity>>,
}

impl Iterator for ReachableElements<'_> {
    type Item = Entity;

    fn next(&mut self) -> Option<Entity> {
        loop {
            if let Some(entity) = self.current.as_mut().and_then(Iterator::next) {
                return Some(*entity);
            }
            let (zone, set) = self.zones.next()?;
            if self.graph.can_navigate(self.from_zone, zone) {
                self.current = Some(set.iter());
            } else {
                self.current = None;
            }
        }
    }
}
