//! Plugin-level navigation settings.

use std::path::PathBuf;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::host::CoordinateSpace;
use crate::nav_error::NavError;

/// File name the demo app and tools look for next to the assets.
pub const DEFAULT_GRAPH_FILE: &str = "navigation.json";

/// Settings read by `NavigationPlugin` and its systems.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    /// Reachability config loaded at startup. `None` keeps whatever graph
    /// is already in the world (an empty one by default).
    pub graph_path: Option<PathBuf>,
    /// How entity transforms map into the resolver's y-up frame.
    pub coordinate_space: CoordinateSpace,
    /// Zone that receives focus when a request arrives with nothing focused.
    pub initial_zone: Option<String>,
    /// Log a warning when an element lands in an empty or unknown zone.
    pub warn_on_inert: bool,
    /// Run the registry invariant check every frame (debug aid).
    pub check_invariants: bool,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            graph_path: None,
            coordinate_space: CoordinateSpace::World,
            initial_zone: None,
            warn_on_inert: true,
            check_invariants: cfg!(debug_assertions),
        }
    }
}

impl NavigationSettings {
    pub fn from_json(json: &str) -> Result<Self, NavError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_graph_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.graph_path = Some(path.into());
        self
    }

    pub fn with_coordinate_space(mut self, space: CoordinateSpace) -> Self {
        self.coordinate_space = space;
        self
    }

    pub fn with_initial_zone(mut self, zone: impl Into<String>) -> Self {
        self.initial_zone = Some(zone.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            NavigationSettings::from_json(r#"{ "coordinate_space": "Ui", "initial_zone": "Menu" }"#)
                .unwrap();
        assert_eq!(settings.coordinate_space, CoordinateSpace::Ui);
        assert_eq!(settings.initial_zone.as_deref(), Some("Menu"));
        assert!(settings.warn_on_inert);
        assert!(settings.graph_path.is_none());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let result = NavigationSettings::from_json(r#"{ "coordinate_space": "Sideways" }"#);
        assert!(matches!(result, Err(NavError::Parse(_))));
    }

    #[test]
    fn test_builders() {
        let settings = NavigationSettings::default()
            .with_graph_path(DEFAULT_GRAPH_FILE)
            .with_coordinate_space(CoordinateSpace::Ui)
            .with_initial_zone("Menu/Main");
        assert_eq!(
            settings.graph_path.as_deref(),
            Some(std::path::Path::new("navigation.json"))
        );
        assert_eq!(settings.initial_zone.as_deref(), Some("Menu/Main"));
    }
}
