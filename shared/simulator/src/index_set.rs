pub use rapier2d_f64::data::arena::{Arena, Index};
use std::collections::HashMap;

pub trait HasIndex {
    fn index(self) -> Index;
}

/// Ordered set of arena handles.
///
/// Iteration follows insertion order, and removal keeps the relative order of
/// the remaining handles so that cycling through them stays predictable.
pub struct IndexSet<T: HasIndex> {
    indices: Vec<T>,
    positions: HashMap<T, usize>,
}

impl<T: HasIndex + Eq + std::hash::Hash + Copy> IndexSet<T> {
    pub fn new() -> Self {
        IndexSet::<T> {
            indices: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub fn insert(&mut self, handle: T) {
        if self.contains(handle) {
            return;
        }
        self.indices.push(handle);
        self.positions.insert(handle, self.indices.len() - 1);
    }

    pub fn remove(&mut self, handle: T) -> bool {
        let pos = match self.positions.remove(&handle) {
            Some(pos) => pos,
            None => return false,
        };
        self.indices.remove(pos);
        for (i, h) in self.indices.iter().enumerate().skip(pos) {
            self.positions.insert(*h, i);
        }
        true
    }

    pub fn contains(&self, handle: T) -> bool {
        self.positions.contains_key(&handle)
    }

    /// Returns the handle following `handle`, wrapping around to the first.
    pub fn next_after(&self, handle: T) -> Option<T> {
        let pos = *self.positions.get(&handle)?;
        self.indices.get((pos + 1) % self.indices.len()).copied()
    }

    pub fn first(&self) -> Option<T> {
        self.indices.first().copied()
    }

    pub fn iter(&self) -> std::slice::Iter<T> {
        self.indices.iter()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<T: HasIndex + Eq + std::hash::Hash + Copy> Default for IndexSet<T> {
    fn default() -> IndexSet<T> {
        IndexSet::new()
    }
}
