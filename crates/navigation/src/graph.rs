//! Directed reachability graph over zone names.
//!
//! Each configured zone owns the set of zones it may navigate into. The graph
//! is asymmetric (`A -> B` says nothing about `B -> A`) and fails closed: any
//! zone missing from the configuration reaches nothing but itself.
//!
//! Serialized form is a plain JSON object of zone name to list of reachable
//! zone names:
//!
//! ```json
//! { "Menu/Main": ["Menu/Settings"], "Menu/Settings": [] }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::nav_error::NavError;

/// Configured reachability between zones.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReachabilityGraph {
    zones: BTreeMap<String, BTreeSet<String>>,
}

impl ReachabilityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether focus may move from an element in `from` to one in `to`.
    ///
    /// Empty names never navigate. A zone always reaches itself, configured
    /// or not.
    pub fn can_navigate(&self, from: &str, to: &str) -> bool {
        if from.is_empty() || to.is_empty() {
            return false;
        }
        if from == to {
            return true;
        }
        self.zones
            .get(from)
            .is_some_and(|targets| targets.contains(to))
    }

    pub fn contains_zone(&self, zone: &str) -> bool {
        self.zones.contains_key(zone)
    }

    /// Configure `zone`, returning its (possibly pre-existing) edge set.
    pub fn add_zone(&mut self, zone: &str) -> Result<&mut BTreeSet<String>, NavError> {
        if zone.is_empty() {
            return Err(NavError::EmptyZoneName);
        }
        Ok(self.zones.entry(zone.to_string()).or_default())
    }

    /// Remove `zone` and every edge pointing at it. Returns whether it existed.
    pub fn remove_zone(&mut self, zone: &str) -> bool {
        let existed = self.zones.remove(zone).is_some();
        for targets in self.zones.values_mut() {
            targets.remove(zone);
        }
        existed
    }

    /// Rename a zone, rewriting incoming edges to the new name.
    pub fn rename_zone(&mut self, old: &str, new: &str) -> Result<(), NavError> {
        if new.is_empty() {
            return Err(NavError::EmptyZoneName);
        }
        if old == new {
            return Ok(());
        }
        if self.zones.contains_key(new) {
            return Err(NavError::ZoneExists(new.to_string()));
        }
        let Some(mut targets) = self.zones.remove(old) else {
            return Err(NavError::UnknownZone(old.to_string()));
        };
        // A self edge is implicit anyway; carry it over under the new name.
        if targets.remove(old) {
            targets.insert(new.to_string());
        }
        for other in self.zones.values_mut() {
            if other.remove(old) {
                other.insert(new.to_string());
            }
        }
        self.zones.insert(new.to_string(), targets);
        Ok(())
    }

    /// Add the edge `from -> to`, configuring both zones if needed.
    ///
    /// Returns `true` if the edge is new.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<bool, NavError> {
        if from.is_empty() || to.is_empty() {
            return Err(NavError::EmptyZoneName);
        }
        self.add_zone(to)?;
        let targets = self.add_zone(from)?;
        Ok(targets.insert(to.to_string()))
    }

    /// Remove the edge `from -> to`. Returns whether it was configured.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> bool {
        self.zones
            .get_mut(from)
            .is_some_and(|targets| targets.remove(to))
    }

    /// Configured zone names in sorted order.
    pub fn zone_names(&self) -> impl Iterator<Item = &str> {
        self.zones.keys().map(String::as_str)
    }

    /// Zones explicitly reachable from `zone` (the implicit self edge is not listed).
    pub fn reachable_from(&self, zone: &str) -> impl Iterator<Item = &str> {
        self.zones
            .get(zone)
            .into_iter()
            .flat_map(|targets| targets.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    // -----------------------------------------------------------------------
    // Configuration I/O
    // -----------------------------------------------------------------------

    pub fn from_json(json: &str) -> Result<Self, NavError> {
        let graph: Self = serde_json::from_str(json)?;
        if graph.zones.contains_key("") {
            return Err(NavError::EmptyZoneName);
        }
        Ok(graph)
    }

    pub fn to_json_pretty(&self) -> Result<String, NavError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, NavError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), NavError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}
