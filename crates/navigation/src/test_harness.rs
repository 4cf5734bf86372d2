//! # TestNav: headless harness for navigation integration tests
//!
//! Wraps `bevy::app::App` + `NavigationPlugin` with `MinimalPlugins` so tests
//! can spawn elements, press keys and inspect focus without a window.
//! `GlobalTransform` is written directly since no transform propagation runs.

use bevy::app::App;
use bevy::prelude::*;

use crate::config::NavigationSettings;
use crate::element::{NavDirection, NavigableElement};
use crate::graph::ReachabilityGraph;
use crate::registry::ZoneRegistry;
use crate::systems::{FocusMoved, FocusedElement, NavRequest, NavUnhandled};
use crate::NavigationPlugin;

pub struct TestNav {
    app: App,
}

impl TestNav {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Empty graph, default bindings, invariant checks on.
    pub fn new() -> Self {
        Self::with_settings(NavigationSettings::default())
    }

    pub fn with_settings(mut settings: NavigationSettings) -> Self {
        settings.check_invariants = true;
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        // MinimalPlugins has no InputPlugin; keys are driven by hand.
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_plugins(NavigationPlugin::new(settings));
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Graph setup (builder pattern)
    // -----------------------------------------------------------------------

    pub fn with_zone(mut self, zone: &str) -> Self {
        self.graph_mut().add_zone(zone).unwrap();
        self
    }

    pub fn with_edge(mut self, from: &str, to: &str) -> Self {
        self.graph_mut().add_edge(from, to).unwrap();
        self
    }

    pub fn graph_mut(&mut self) -> Mut<'_, ReachabilityGraph> {
        self.app.world_mut().resource_mut::<ReachabilityGraph>()
    }

    // -----------------------------------------------------------------------
    // Elements
    // -----------------------------------------------------------------------

    /// Spawn a default element in `zone` at `(x, y)`.
    pub fn spawn(&mut self, zone: &str, x: f32, y: f32) -> Entity {
        self.spawn_element(NavigableElement::new(zone), x, y)
    }

    pub fn spawn_element(&mut self, element: NavigableElement, x: f32, y: f32) -> Entity {
        let translation = Vec3::new(x, y, 0.0);
        self.app
            .world_mut()
            .spawn((
                element,
                Transform::from_translation(translation),
                GlobalTransform::from_translation(translation),
            ))
            .id()
    }

    pub fn move_to(&mut self, entity: Entity, x: f32, y: f32) {
        let translation = Vec3::new(x, y, 0.0);
        let mut e = self.app.world_mut().entity_mut(entity);
        e.insert((
            Transform::from_translation(translation),
            GlobalTransform::from_translation(translation),
        ));
    }

    pub fn element_mut(&mut self, entity: Entity) -> Mut<'_, NavigableElement> {
        self.app
            .world_mut()
            .get_mut::<NavigableElement>(entity)
            .unwrap()
    }

    pub fn despawn(&mut self, entity: Entity) {
        self.app.world_mut().despawn(entity);
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    pub fn focus(&mut self, entity: Entity) {
        self.app.world_mut().resource_mut::<FocusedElement>().0 = Some(entity);
    }

    /// Press `key` for one frame. Any earlier key state is cleared first;
    /// the new press stays visible until the next call so tests can check
    /// whether it was consumed.
    pub fn press(&mut self, key: KeyCode) {
        {
            let mut keys = self.app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.reset_all();
            keys.press(key);
        }
        self.app.update();
    }

    /// Send a request directly, bypassing key bindings.
    pub fn navigate(&mut self, direction: NavDirection) {
        self.app.world_mut().send_event(NavRequest::new(direction));
        self.app.update();
    }

    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn focused(&self) -> Option<Entity> {
        self.resource::<FocusedElement>().0
    }

    pub fn key_pending(&self, key: KeyCode) -> bool {
        self.resource::<ButtonInput<KeyCode>>().just_pressed(key)
    }

    pub fn registry(&self) -> &ZoneRegistry {
        self.resource::<ZoneRegistry>()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    /// Drain every `FocusMoved` sent so far.
    pub fn take_moves(&mut self) -> Vec<FocusMoved> {
        self.app
            .world_mut()
            .resource_mut::<Events<FocusMoved>>()
            .drain()
            .collect()
    }

    /// Drain every `NavUnhandled` sent so far.
    pub fn take_unhandled(&mut self) -> Vec<NavUnhandled> {
        self.app
            .world_mut()
            .resource_mut::<Events<NavUnhandled>>()
            .drain()
            .collect()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}

impl Default for TestNav {
    fn default() -> Self {
        Self::new()
    }
}
