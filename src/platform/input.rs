//! Host keyboard tracking
//!
//! The host forwards key down/up events by name (`"w"`, `" "`, `"escape"`);
//! once per tick the held set is turned into a [`TickInput`] through the
//! player's [`KeyBindings`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::input::TickInput;
use crate::sim::lane::Lane;

/// Which key drives which control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub north: String,
    pub east: String,
    pub south: String,
    pub west: String,
    pub fire: String,
    /// Leave the round (counts as a failure)
    pub abort: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            north: "w".to_string(),
            east: "d".to_string(),
            south: "s".to_string(),
            west: "a".to_string(),
            fire: " ".to_string(),
            abort: "escape".to_string(),
        }
    }
}

impl KeyBindings {
    pub fn key_for(&self, lane: Lane) -> &str {
        match lane {
            Lane::North => &self.north,
            Lane::East => &self.east,
            Lane::South => &self.south,
            Lane::West => &self.west,
        }
    }

    /// Pairs of actions bound to the same key
    pub fn conflicts(&self) -> Vec<(&'static str, &'static str)> {
        let named = [
            ("north", &self.north),
            ("east", &self.east),
            ("south", &self.south),
            ("west", &self.west),
            ("fire", &self.fire),
            ("abort", &self.abort),
        ];
        let mut conflicts = Vec::new();
        for (i, (a, key_a)) in named.iter().enumerate() {
            for (b, key_b) in &named[i + 1..] {
                if normalize(key_a) == normalize(key_b) {
                    conflicts.push((*a, *b));
                }
            }
        }
        conflicts
    }
}

fn normalize(key: &str) -> String {
    // Space is a real key name; only trim around longer names
    if key.trim().is_empty() {
        key.to_string()
    } else {
        key.trim().to_lowercase()
    }
}

/// Keys currently held, plus this frame's fresh presses
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<String>,
    just_pressed: HashSet<String>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Auto-repeat downs for an already held key are ignored.
    pub fn key_down(&mut self, key: &str) {
        let key = normalize(key);
        if self.held.insert(key.clone()) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(&normalize(key));
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(&normalize(key))
    }

    pub fn just_pressed(&self, key: &str) -> bool {
        self.just_pressed.contains(&normalize(key))
    }

    /// Drop per-frame presses; call at the end of each frame
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
    }

    /// Release everything (focus loss)
    pub fn clear(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
    }

    /// Level-triggered controls for this tick
    pub fn snapshot(&self, bindings: &KeyBindings) -> TickInput {
        let mut input = TickInput::default();
        for lane in Lane::ALL {
            input.held[lane.index()] = self.is_held(bindings.key_for(lane));
        }
        input.fire = self.is_held(&bindings.fire);
        input
    }

    pub fn abort_requested(&self, bindings: &KeyBindings) -> bool {
        self.just_pressed(&bindings.abort)
    }
}
