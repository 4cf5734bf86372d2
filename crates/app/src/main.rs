use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use navigation::config::DEFAULT_GRAPH_FILE;
use navigation::{
    CoordinateSpace, FocusMoved, FocusedElement, Interactable, NavUnhandled, NavigableElement,
    NavigationPlugin, NavigationSettings, ReachabilityGraph,
};

const NORMAL: Color = Color::srgb(0.18, 0.18, 0.22);
const FOCUSED: Color = Color::srgb(0.25, 0.45, 0.85);
const DISABLED: Color = Color::srgb(0.35, 0.12, 0.12);

/// Built-in zones when no `navigation.json` is present. The main menu and
/// its options column reach each other; the status bar is configured but
/// nothing leads into it.
const DEFAULT_ZONES: &[&str] = &["Menu", "Menu/Options", "Status"];
const DEFAULT_EDGES: &[(&str, &str)] = &[("Menu", "Menu/Options"), ("Menu/Options", "Menu")];

#[derive(Component)]
struct MenuLabel(String);

fn main() {
    let mut app = App::new();

    let mut settings = NavigationSettings::default()
        .with_coordinate_space(CoordinateSpace::Ui)
        .with_initial_zone("Menu");
    if std::path::Path::new(DEFAULT_GRAPH_FILE).exists() {
        settings = settings.with_graph_path(DEFAULT_GRAPH_FILE);
    }

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Zone Navigation".to_string(),
            resolution: (960.0, 540.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .insert_resource(default_graph())
    .add_plugins(NavigationPlugin::new(settings))
    .add_systems(Startup, spawn_menu)
    .add_systems(
        Update,
        (highlight_focus, log_navigation, activate_focused)
            .after(navigation::NavigationSet::Resolve),
    );

    app.run();
}

fn default_graph() -> ReachabilityGraph {
    let mut graph = ReachabilityGraph::new();
    for zone in DEFAULT_ZONES {
        if let Err(e) = graph.add_zone(zone) {
            warn!("Skipping navigation zone '{zone}': {e}");
        }
    }
    for (from, to) in DEFAULT_EDGES {
        if let Err(e) = graph.add_edge(from, to) {
            warn!("Skipping navigation edge {from} -> {to}: {e}");
        }
    }
    graph
}

fn spawn_menu(mut commands: Commands) {
    commands.spawn(Camera2d);

    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::SpaceBetween,
            align_items: AlignItems::Center,
            padding: UiRect::all(Val::Px(24.0)),
            ..default()
        })
        .with_children(|root| {
            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(60.0),
                ..default()
            })
            .with_children(|columns| {
                columns
                    .spawn(column_node())
                    .with_children(|menu| {
                        for label in ["New Game", "Continue", "Load", "Quit"] {
                            spawn_button(menu, label, NavigableElement::new("Menu"), true);
                        }
                    });
                columns
                    .spawn(column_node())
                    .with_children(|options| {
                        for label in ["Audio", "Video", "Controls"] {
                            spawn_button(options, label, NavigableElement::new("Menu/Options"), true);
                        }
                        spawn_button(
                            options,
                            "Online (offline)",
                            NavigableElement::new("Menu/Options"),
                            false,
                        );
                    });
            });

            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(12.0),
                ..default()
            })
            .with_children(|status| {
                spawn_button(status, "Status", NavigableElement::new("Status"), true);
            });
        });
}

fn column_node() -> Node {
    Node {
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(12.0),
        ..default()
    }
}

fn spawn_button(parent: &mut ChildBuilder, label: &str, element: NavigableElement, enabled: bool) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(48.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(if enabled { NORMAL } else { DISABLED }),
            element,
            Interactable(enabled),
            MenuLabel(label.to_string()),
        ))
        .with_child(Text::new(label));
}

fn highlight_focus(
    focus: Res<FocusedElement>,
    mut buttons: Query<(Entity, &Interactable, &mut BackgroundColor), With<NavigableElement>>,
) {
    if !focus.is_changed() {
        return;
    }
    for (entity, interactable, mut color) in &mut buttons {
        color.0 = match (focus.0 == Some(entity), interactable.0) {
            (true, _) => FOCUSED,
            (false, true) => NORMAL,
            (false, false) => DISABLED,
        };
    }
}

fn log_navigation(
    mut moved: EventReader<FocusMoved>,
    mut unhandled: EventReader<NavUnhandled>,
    labels: Query<&MenuLabel>,
) {
    let label = |entity: Entity| {
        labels
            .get(entity)
            .map_or_else(|_| format!("{entity}"), |l| l.0.clone())
    };
    for event in moved.read() {
        let from = event.from.map_or_else(|| "nothing".to_string(), label);
        info!(
            "Focus {} -> {} ({}{})",
            from,
            label(event.to),
            event.direction.label(),
            if event.via_fallback { ", fallback" } else { "" }
        );
    }
    for event in unhandled.read() {
        info!("No target {}", event.direction.label());
    }
}

fn activate_focused(
    keys: Res<ButtonInput<KeyCode>>,
    focus: Res<FocusedElement>,
    labels: Query<&MenuLabel>,
    mut exit: EventWriter<AppExit>,
) {
    if !keys.just_pressed(KeyCode::Enter) {
        return;
    }
    let Some(label) = focus.0.and_then(|e| labels.get(e).ok()) else {
        return;
    };
    info!("Activated '{}'", label.0);
    if label.0 == "Quit" {
        exit.send(AppExit::Success);
    }
}
