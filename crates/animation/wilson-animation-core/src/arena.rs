//! Shared render resources keyed by content.
//!
//! Scenes reuse a handful of materials many times over; the arena hands out a
//! dense handle per distinct key and builds each resource at most once.

use std::fmt;
use std::hash::Hash;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use wilson_api_core::Color;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ResourceHandle(pub u32);

/// Key for a material that depends only on a color: `#rrggbbaa`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ColorKey(String);

impl ColorKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Color> for ColorKey {
    fn from(c: Color) -> Self {
        let [r, g, b, a] = c.to_rgba8();
        ColorKey(format!("#{r:02x}{g:02x}{b:02x}{a:02x}"))
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub struct ResourceArena<K, R> {
    index: HashMap<K, ResourceHandle>,
    slots: Vec<R>,
}

impl<K, R> Default for ResourceArena<K, R> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            slots: Vec::new(),
        }
    }
}

impl<K: Eq + Hash, R> ResourceArena<K, R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `key`, building the resource with `make` on first use.
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> ResourceHandle
    where
        F: FnOnce(&K) -> R,
    {
        if let Some(handle) = self.index.get(&key) {
            return *handle;
        }
        let handle = ResourceHandle(self.slots.len() as u32);
        self.slots.push(make(&key));
        self.index.insert(key, handle);
        handle
    }

    pub fn handle(&self, key: &K) -> Option<ResourceHandle> {
        self.index.get(key).copied()
    }

    pub fn get(&self, handle: ResourceHandle) -> Option<&R> {
        self.slots.get(handle.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every resource; outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_key_formats_rgba8() {
        let key = ColorKey::from(Color::rgba(1.0, 0.0, 0.5, 1.0));
        assert_eq!(key.as_str(), "#ff0080ff");
        assert_eq!(ColorKey::from(Color::BLACK).to_string(), "#000000ff");
    }

    #[test]
    fn builds_each_key_once() {
        let mut arena: ResourceArena<ColorKey, Color> = ResourceArena::new();
        let mut built = 0;
        let red = Color::rgba(1.0, 0.0, 0.0, 1.0);
        let a = arena.get_or_insert_with(red.into(), |_| {
            built += 1;
            red
        });
        let b = arena.get_or_insert_with(red.into(), |_| {
            built += 1;
            red
        });
        let c = arena.get_or_insert_with(Color::BLACK.into(), |_| Color::BLACK);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(built, 1);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(c), Some(&Color::BLACK));

        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.handle(&ColorKey::from(red)), None);
    }
}
