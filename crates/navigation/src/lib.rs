//! Directional focus navigation for Bevy.
//!
//! Elements carry a `NavigableElement` naming the zone they live in. A
//! `ReachabilityGraph` says which zones may be entered from which, and the
//! `ZoneRegistry` indexes elements by zone. When the user presses a direction
//! the resolver searches a cone in front of the focused element across every
//! reachable zone, falling back to the element's authored fallback list.

use bevy::prelude::*;

pub mod config;
pub mod element;
pub mod graph;
pub mod host;
pub mod invariant_checks;
pub mod keybindings;
pub mod nav_error;
pub mod registry;
pub mod resolver;
pub mod systems;
pub mod zone_path;

#[cfg(test)]
pub(crate) mod test_harness;

pub use config::NavigationSettings;
pub use element::{
    DirectionFrame, DirectionSettings, IgnoreRange, Interactable, NavDirection, NavigableElement,
    PerDirection,
};
pub use graph::ReachabilityGraph;
pub use host::{CoordinateSpace, NavHost, QueryHost, StaticElement, StaticHost};
pub use keybindings::NavKeyBindings;
pub use nav_error::NavError;
pub use registry::{Registration, ZoneRegistry};
pub use resolver::{NavOutcome, Navigator};
pub use systems::{FocusMoved, FocusedElement, NavRequest, NavUnhandled};

/// Ordering of the navigation systems within `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavigationSet {
    /// Registry follows the graph and the `NavigableElement` components.
    Sync,
    /// Key presses become `NavRequest`s.
    Input,
    /// Requests become focus changes.
    Resolve,
}

/// Adds the navigation resources, events and systems.
///
/// A `ReachabilityGraph` already inserted into the app is kept; otherwise an
/// empty one is created (and replaced at startup if `graph_path` is set).
#[derive(Default)]
pub struct NavigationPlugin {
    pub settings: NavigationSettings,
}

impl NavigationPlugin {
    pub fn new(settings: NavigationSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings.clone())
            .init_resource::<ReachabilityGraph>()
            .init_resource::<ZoneRegistry>()
            .init_resource::<FocusedElement>()
            .init_resource::<NavKeyBindings>()
            .init_resource::<invariant_checks::RegistryInvariantViolations>()
            .add_event::<NavRequest>()
            .add_event::<FocusMoved>()
            .add_event::<NavUnhandled>()
            .configure_sets(
                Update,
                (
                    NavigationSet::Sync,
                    NavigationSet::Input,
                    NavigationSet::Resolve,
                )
                    .chain(),
            )
            .add_systems(Startup, systems::load_reachability_config)
            .add_systems(
                Update,
                (
                    systems::heal_registry_on_graph_change,
                    systems::remove_unregistered_elements,
                    systems::sync_navigable_elements,
                    invariant_checks::validate_zone_registry,
                )
                    .chain()
                    .in_set(NavigationSet::Sync),
            )
            .add_systems(
                Update,
                systems::keyboard_nav_requests.in_set(NavigationSet::Input),
            )
            .add_systems(
                Update,
                systems::process_nav_requests.in_set(NavigationSet::Resolve),
            );
    }
}
