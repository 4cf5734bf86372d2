//! ECS side of navigation: keeps the `ZoneRegistry` in step with
//! `NavigableElement` components and turns `NavRequest`s into focus changes.

use bevy::prelude::*;

use crate::config::NavigationSettings;
use crate::element::{NavDirection, NavigableElement};
use crate::graph::ReachabilityGraph;
use crate::host::{NavHost, NavItem, QueryHost};
use crate::keybindings::NavKeyBindings;
use crate::registry::{Registration, ZoneRegistry};
use crate::resolver::{NavOutcome, Navigator};

// =============================================================================
// Resources & events
// =============================================================================

/// The host's current focus. The resolver only reads it; `process_nav_requests`
/// is the single writer on a successful move.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FocusedElement(pub Option<Entity>);

/// Ask for focus to move one step in `direction`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavRequest {
    pub direction: NavDirection,
    /// Key that produced the request; cleared from `ButtonInput` once the
    /// request is handled so later systems don't see it.
    pub source_key: Option<KeyCode>,
}

impl NavRequest {
    pub fn new(direction: NavDirection) -> Self {
        Self {
            direction,
            source_key: None,
        }
    }
}

/// Focus moved from `from` to `to`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusMoved {
    pub from: Option<Entity>,
    pub to: Entity,
    pub direction: NavDirection,
    pub via_fallback: bool,
}

/// No target was found; the input was not consumed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavUnhandled {
    pub origin: Option<Entity>,
    pub direction: NavDirection,
}

// =============================================================================
// Configuration
// =============================================================================

/// Startup: load the reachability config named in `NavigationSettings`.
pub fn load_reachability_config(
    settings: Res<NavigationSettings>,
    mut graph: ResMut<ReachabilityGraph>,
) {
    let Some(path) = settings.graph_path.as_ref() else {
        return;
    };
    match ReachabilityGraph::load(path) {
        Ok(loaded) => {
            info!(
                "Loaded navigation graph from {}: {} zones",
                path.display(),
                loaded.len()
            );
            *graph = loaded;
        }
        Err(e) => {
            error!(
                "Failed to load navigation graph from {}: {} (keeping {} configured zones)",
                path.display(),
                e,
                graph.len()
            );
        }
    }
}

// =============================================================================
// Registry sync
// =============================================================================

/// Re-register every element when the graph changes, so elements that were
/// inert because their zone was missing come back (and vice versa).
pub fn heal_registry_on_graph_change(
    graph: Option<Res<ReachabilityGraph>>,
    mut registry: ResMut<ZoneRegistry>,
    elements: Query<(Entity, &NavigableElement)>,
) {
    let Some(graph) = graph else {
        return;
    };
    if !graph.is_changed() {
        return;
    }
    let registered = registry.rebuild(
        &graph,
        elements
            .iter()
            .map(|(entity, element)| (entity, element.zone.as_str())),
    );
    debug!(
        "Navigation graph changed: {registered}/{} elements registered",
        elements.iter().count()
    );
}

/// Register new elements and move elements whose component changed.
pub fn sync_navigable_elements(
    graph: Option<Res<ReachabilityGraph>>,
    settings: Res<NavigationSettings>,
    mut registry: ResMut<ZoneRegistry>,
    changed: Query<(Entity, &NavigableElement), Changed<NavigableElement>>,
) {
    let Some(graph) = graph else {
        if !changed.is_empty() {
            error!("NavigableElement changed but no ReachabilityGraph resource exists");
        }
        return;
    };
    for (entity, element) in &changed {
        let result = registry.set_zone(entity, &element.zone, &graph);
        if !settings.warn_on_inert {
            continue;
        }
        match result {
            Registration::Registered => {}
            Registration::EmptyZone => {
                warn!("Navigable element {entity} has no zone; it will not take part in navigation");
            }
            Registration::UnconfiguredZone => {
                warn!(
                    "Navigable element {entity} is in unconfigured zone '{}'; it will not take part in navigation",
                    element.zone
                );
            }
        }
    }
}

/// Drop elements whose component was removed or whose entity was despawned.
///
/// An entity that got a new `NavigableElement` in the same frame keeps its
/// registration and focus; `sync_navigable_elements` handles the new component.
pub fn remove_unregistered_elements(
    mut removed: RemovedComponents<NavigableElement>,
    still_navigable: Query<(), With<NavigableElement>>,
    mut registry: ResMut<ZoneRegistry>,
    mut focus: ResMut<FocusedElement>,
) {
    for entity in removed.read() {
        if still_navigable.contains(entity) {
            continue;
        }
        registry.remove(entity);
        if focus.0 == Some(entity) {
            focus.0 = None;
        }
    }
}

// =============================================================================
// Input
// =============================================================================

/// Turn bound key presses into `NavRequest`s.
pub fn keyboard_nav_requests(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<NavKeyBindings>,
    mut requests: EventWriter<NavRequest>,
) {
    let Some(keys) = keys else {
        return;
    };
    for (direction, key) in bindings.just_pressed(&keys) {
        requests.send(NavRequest {
            direction,
            source_key: Some(key),
        });
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Run the move procedure for every pending request.
#[allow(clippy::too_many_arguments)]
pub fn process_nav_requests(
    mut requests: EventReader<NavRequest>,
    graph: Option<Res<ReachabilityGraph>>,
    registry: Res<ZoneRegistry>,
    settings: Res<NavigationSettings>,
    elements: Query<NavItem>,
    mut focus: ResMut<FocusedElement>,
    mut keys: Option<ResMut<ButtonInput<KeyCode>>>,
    mut moved: EventWriter<FocusMoved>,
    mut unhandled: EventWriter<NavUnhandled>,
) {
    if requests.is_empty() {
        return;
    }
    let host = QueryHost::new(&elements, settings.coordinate_space);
    let navigator = match Navigator::try_new(graph.as_deref(), &registry, &host) {
        Ok(navigator) => navigator,
        Err(e) => {
            error!("Dropping {} navigation request(s): {e}", requests.len());
            requests.clear();
            return;
        }
    };

    for request in requests.read() {
        // A stale focus (despawned, no longer navigable or inert) counts as none.
        let origin = focus
            .0
            .filter(|&e| host.element(e).is_some() && registry.contains(e));
        let outcome = match origin {
            Some(origin) => navigator.resolve(origin, request.direction),
            None => settings
                .initial_zone
                .as_deref()
                .and_then(|zone| navigator.entry_point(zone))
                .map_or(NavOutcome::Unhandled, |target| NavOutcome::Moved {
                    target,
                    via_fallback: false,
                }),
        };

        match outcome {
            NavOutcome::Moved {
                target,
                via_fallback,
            } => {
                focus.0 = Some(target);
                moved.send(FocusMoved {
                    from: origin,
                    to: target,
                    direction: request.direction,
                    via_fallback,
                });
                if let (Some(key), Some(keys)) = (request.source_key, keys.as_mut()) {
                    keys.clear_just_pressed(key);
                }
            }
            NavOutcome::Unhandled => {
                unhandled.send(NavUnhandled {
                    origin,
                    direction: request.direction,
                });
            }
        }
    }
}
