//! Keys that trigger directional navigation.
//!
//! Systems read the `NavKeyBindings` resource instead of hardcoding
//! `KeyCode`s, so a host can rebind (or clear) them.

use bevy::prelude::*;

use crate::element::{NavDirection, PerDirection};

/// Up to two keys per direction. `None` leaves a slot unbound.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct NavKeyBindings {
    pub primary: PerDirection<Option<KeyCode>>,
    pub alternate: PerDirection<Option<KeyCode>>,
}

impl Default for NavKeyBindings {
    fn default() -> Self {
        Self {
            primary: PerDirection {
                up: Some(KeyCode::ArrowUp),
                down: Some(KeyCode::ArrowDown),
                left: Some(KeyCode::ArrowLeft),
                right: Some(KeyCode::ArrowRight),
            },
            alternate: PerDirection {
                up: Some(KeyCode::KeyW),
                down: Some(KeyCode::KeyS),
                left: Some(KeyCode::KeyA),
                right: Some(KeyCode::KeyD),
            },
        }
    }
}

impl NavKeyBindings {
    /// No keys bound at all (navigation only through `NavRequest` events).
    pub fn unbound() -> Self {
        Self {
            primary: PerDirection::default(),
            alternate: PerDirection::default(),
        }
    }

    /// Keys bound to `direction`.
    pub fn keys(&self, direction: NavDirection) -> impl Iterator<Item = KeyCode> {
        [*self.primary.get(direction), *self.alternate.get(direction)]
            .into_iter()
            .flatten()
    }

    /// Direction bound to `key`, if any.
    pub fn direction_for(&self, key: KeyCode) -> Option<NavDirection> {
        NavDirection::ALL
            .into_iter()
            .find(|&direction| self.keys(direction).any(|k| k == key))
    }

    /// Every (direction, key) pair whose key was pressed this frame.
    pub fn just_pressed<'a>(
        &'a self,
        keys: &'a ButtonInput<KeyCode>,
    ) -> impl Iterator<Item = (NavDirection, KeyCode)> + 'a {
        NavDirection::ALL.into_iter().flat_map(move |direction| {
            self.keys(direction)
                .filter(move |&key| keys.just_pressed(key))
                .map(move |key| (direction, key))
        })
    }

    /// Rebind the primary key of `direction`. The key is first removed from
    /// any other slot so one key never drives two directions.
    pub fn rebind(&mut self, direction: NavDirection, key: KeyCode) {
        for d in NavDirection::ALL {
            for slot in [self.primary.get_mut(d), self.alternate.get_mut(d)] {
                if *slot == Some(key) {
                    *slot = None;
                }
            }
        }
        *self.primary.get_mut(direction) = Some(key);
    }
}
