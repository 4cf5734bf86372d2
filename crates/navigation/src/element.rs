//! Per-element navigation data: directions, per-direction settings, ignore
//! range and the `NavigableElement` component.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Default angular search width: `required_cos = 0.5`, a 60 degree half-cone.
pub const DEFAULT_SEARCH_WIDTH: f32 = 0.5;

/// A navigation direction in screen terms (y grows upward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NavDirection {
    pub const ALL: [NavDirection; 4] = [
        NavDirection::Up,
        NavDirection::Down,
        NavDirection::Left,
        NavDirection::Right,
    ];

    /// Unit vector in the fixed screen frame.
    pub fn screen_vector(self) -> Vec2 {
        match self {
            NavDirection::Up => Vec2::Y,
            NavDirection::Down => Vec2::NEG_Y,
            NavDirection::Left => Vec2::NEG_X,
            NavDirection::Right => Vec2::X,
        }
    }

    pub fn opposite(self) -> NavDirection {
        match self {
            NavDirection::Up => NavDirection::Down,
            NavDirection::Down => NavDirection::Up,
            NavDirection::Left => NavDirection::Right,
            NavDirection::Right => NavDirection::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NavDirection::Up => "Up",
            NavDirection::Down => "Down",
            NavDirection::Left => "Left",
            NavDirection::Right => "Right",
        }
    }
}

/// One value per direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerDirection<T> {
    pub up: T,
    pub down: T,
    pub left: T,
    pub right: T,
}

impl<T> PerDirection<T> {
    pub fn get(&self, direction: NavDirection) -> &T {
        match direction {
            NavDirection::Up => &self.up,
            NavDirection::Down => &self.down,
            NavDirection::Left => &self.left,
            NavDirection::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, direction: NavDirection) -> &mut T {
        match direction {
            NavDirection::Up => &mut self.up,
            NavDirection::Down => &mut self.down,
            NavDirection::Left => &mut self.left,
            NavDirection::Right => &mut self.right,
        }
    }
}

impl<T: Clone> PerDirection<T> {
    pub fn splat(value: T) -> Self {
        Self {
            up: value.clone(),
            down: value.clone(),
            left: value.clone(),
            right: value,
        }
    }
}

/// Settings for navigating out of an element in one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionSettings {
    pub enabled: bool,
    /// 0 = only exactly aligned candidates, 1 = anything in the front hemisphere.
    pub search_width: f32,
    /// Authored backup targets, tried only when the geometric search finds nothing.
    pub fallbacks: Vec<Entity>,
}

impl Default for DirectionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            search_width: DEFAULT_SEARCH_WIDTH,
            fallbacks: Vec::new(),
        }
    }
}

/// Margins measured from the element's anchor. The margin matching the
/// requested direction pushes the search origin out to the element's edge,
/// so neighbours closer than that edge are not picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IgnoreRange {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl IgnoreRange {
    /// Margins are clamped to be non-negative.
    pub fn new(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            top: top.max(0.0),
            bottom: bottom.max(0.0),
            left: left.max(0.0),
            right: right.max(0.0),
        }
    }

    /// Same margin on all four sides.
    pub fn uniform(margin: f32) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Half extents of a rectangle centered on the anchor.
    pub fn from_size(size: Vec2) -> Self {
        Self::new(size.y * 0.5, size.y * 0.5, size.x * 0.5, size.x * 0.5)
    }

    /// Margin toward `direction`. Negative (or NaN) fields read as zero, so
    /// a hand-built or deserialized range never pulls the origin backwards.
    pub fn margin(&self, direction: NavDirection) -> f32 {
        let margin = match direction {
            NavDirection::Up => self.top,
            NavDirection::Down => self.bottom,
            NavDirection::Left => self.left,
            NavDirection::Right => self.right,
        };
        margin.max(0.0)
    }
}

/// Frame in which a direction is turned into a vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionFrame {
    /// Up is always screen-up.
    #[default]
    Screen,
    /// Up follows the element's own rotation.
    Local,
}

/// A focusable widget taking part in directional navigation.
///
/// Changing `zone` re-registers the entity through change detection; the
/// registry is never edited by hand from gameplay code.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct NavigableElement {
    pub zone: String,
    pub directions: PerDirection<DirectionSettings>,
    pub priority: f32,
    /// `None` disables the ignore range (search starts at the anchor).
    pub ignore_range: Option<IgnoreRange>,
    pub frame: DirectionFrame,
}

impl Default for NavigableElement {
    fn default() -> Self {
        Self {
            zone: String::new(),
            directions: PerDirection::splat(DirectionSettings::default()),
            priority: 0.0,
            ignore_range: None,
            frame: DirectionFrame::Screen,
        }
    }
}

impl NavigableElement {
    pub fn new(zone: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            ..default()
        }
    }

    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_ignore_range(mut self, range: IgnoreRange) -> Self {
        self.ignore_range = Some(range);
        self
    }

    pub fn with_frame(mut self, frame: DirectionFrame) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_search_width(mut self, direction: NavDirection, width: f32) -> Self {
        self.directions.get_mut(direction).search_width = width;
        self
    }

    /// Same search width for every direction.
    pub fn with_uniform_search_width(mut self, width: f32) -> Self {
        for direction in NavDirection::ALL {
            self.directions.get_mut(direction).search_width = width;
        }
        self
    }

    pub fn with_direction_enabled(mut self, direction: NavDirection, enabled: bool) -> Self {
        self.directions.get_mut(direction).enabled = enabled;
        self
    }

    pub fn with_fallback(mut self, direction: NavDirection, target: Entity) -> Self {
        self.directions.get_mut(direction).fallbacks.push(target);
        self
    }

    pub fn settings(&self, direction: NavDirection) -> &DirectionSettings {
        self.directions.get(direction)
    }

    pub fn is_enabled(&self, direction: NavDirection) -> bool {
        self.directions.get(direction).enabled
    }

    /// Offset of the search origin from the anchor, along the direction axis.
    pub fn edge_margin(&self, direction: NavDirection) -> f32 {
        self.ignore_range.map_or(0.0, |range| range.margin(direction))
    }
}

/// Host-side interactable flag. Absent means interactable.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interactable(pub bool);

impl Default for Interactable {
    fn default() -> Self {
        Self(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_round_trip() {
        for direction in NavDirection::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }

    #[test]
    fn test_screen_vectors_are_unit_and_y_up() {
        for direction in NavDirection::ALL {
            let v = direction.screen_vector();
            assert!((v.length() - 1.0).abs() < f32::EPSILON);
            assert_eq!(v, -direction.opposite().screen_vector());
        }
        assert_eq!(NavDirection::Up.screen_vector(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_ignore_range_clamps_negative_margins() {
        let range = IgnoreRange::new(-5.0, 2.0, 3.0, -1.0);
        assert_eq!(range.margin(NavDirection::Up), 0.0);
        assert_eq!(range.margin(NavDirection::Down), 2.0);
        assert_eq!(range.margin(NavDirection::Left), 3.0);
        assert_eq!(range.margin(NavDirection::Right), 0.0);
    }

    #[test]
    fn test_negative_fields_read_as_zero_margin() {
        let range: IgnoreRange =
            serde_json::from_str(r#"{ "top": 4.0, "bottom": 0.0, "left": 0.0, "right": -100.0 }"#)
                .unwrap();
        assert_eq!(range.margin(NavDirection::Right), 0.0);
        assert_eq!(range.margin(NavDirection::Up), 4.0);

        let mut range = IgnoreRange::uniform(3.0);
        range.left = -7.0;
        let element = NavigableElement::new("Menu").with_ignore_range(range);
        assert_eq!(element.edge_margin(NavDirection::Left), 0.0);
    }

    #[test]
    fn test_ignore_range_from_size() {
        let range = IgnoreRange::from_size(Vec2::new(100.0, 40.0));
        assert_eq!(range.margin(NavDirection::Left), 50.0);
        assert_eq!(range.margin(NavDirection::Up), 20.0);
    }

    #[test]
    fn test_edge_margin_disabled_by_default() {
        let element = NavigableElement::new("Menu");
        assert_eq!(element.edge_margin(NavDirection::Up), 0.0);
        let element = element.with_ignore_range(IgnoreRange::uniform(8.0));
        assert_eq!(element.edge_margin(NavDirection::Up), 8.0);
    }

    #[test]
    fn test_builder_touches_only_one_direction() {
        let target = Entity::from_raw(7);
        let element = NavigableElement::new("Menu")
            .with_direction_enabled(NavDirection::Left, false)
            .with_search_width(NavDirection::Up, 0.0)
            .with_fallback(NavDirection::Down, target);
        assert!(!element.is_enabled(NavDirection::Left));
        assert!(element.is_enabled(NavDirection::Right));
        assert_eq!(element.settings(NavDirection::Up).search_width, 0.0);
        assert_eq!(
            element.settings(NavDirection::Right).search_width,
            DEFAULT_SEARCH_WIDTH
        );
        assert_eq!(element.settings(NavDirection::Down).fallbacks, vec![target]);
        assert!(element.settings(NavDirection::Up).fallbacks.is_empty());
    }
}
