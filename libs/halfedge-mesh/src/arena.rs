//! # Element Arena
//!
//! Dense storage for one element kind. Removal leaves a tombstone so that
//! handles held elsewhere are never invalidated mid-iteration and iteration
//! over live elements follows insertion order.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::error::{MeshError, MeshResult};
use crate::handles::Handle;

/// Tombstoned arena addressed by a typed handle.
///
/// Indexing a removed slot returns its last value; callers that may hold a
/// stale handle must go through [`Arena::get`] or [`Arena::try_get`].
#[derive(Debug, Clone)]
pub(crate) struct Arena<I, T> {
    items: Vec<T>,
    alive: Vec<bool>,
    live: usize,
    _marker: PhantomData<I>,
}

impl<I: Handle, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            alive: Vec::new(),
            live: 0,
            _marker: PhantomData,
        }
    }
}

impl<I: Handle, T> Arena<I, T> {
    /// Handle the next inserted element will receive.
    #[inline]
    pub fn next_id(&self) -> I {
        I::from_index(self.items.len())
    }

    /// Stores an element and returns its handle.
    pub fn insert(&mut self, item: T) -> I {
        let id = self.next_id();
        self.items.push(item);
        self.alive.push(true);
        self.live += 1;
        id
    }

    /// Marks the element as removed. Returns false if it was not live.
    pub fn remove(&mut self, id: I) -> bool {
        match self.alive.get_mut(id.index()) {
            Some(alive) if *alive => {
                *alive = false;
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    /// Whether `id` names a live element.
    #[inline]
    pub fn contains(&self, id: I) -> bool {
        self.alive.get(id.index()).copied().unwrap_or(false)
    }

    /// Live element, `None` for a removed or unknown handle.
    pub fn get(&self, id: I) -> Option<&T> {
        if self.contains(id) {
            self.items.get(id.index())
        } else {
            None
        }
    }

    /// Mutable live element, `None` for a removed or unknown handle.
    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        if self.contains(id) {
            self.items.get_mut(id.index())
        } else {
            None
        }
    }

    /// Like [`Arena::get`] but reports a dangling handle as an error.
    pub fn try_get(&self, id: I) -> MeshResult<&T> {
        self.get(id)
            .ok_or_else(|| MeshError::dangling(I::KIND, id.raw()))
    }

    /// Like [`Arena::get_mut`] but reports a dangling handle as an error.
    pub fn try_get_mut(&mut self, id: I) -> MeshResult<&mut T> {
        self.get_mut(id)
            .ok_or_else(|| MeshError::dangling(I::KIND, id.raw()))
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Number of slots ever allocated, live or not.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.items.len()
    }

    /// Live handles in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = I> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(index, _)| I::from_index(index))
    }

    /// Live handles and elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.items
            .iter()
            .zip(self.alive.iter())
            .enumerate()
            .filter(|(_, (_, alive))| **alive)
            .map(|(index, (item, _))| (I::from_index(index), item))
    }
}

impl<I: Handle, T> Index<I> for Arena<I, T> {
    type Output = T;

    #[inline]
    fn index(&self, id: I) -> &T {
        &self.items[id.index()]
    }
}

impl<I: Handle, T> IndexMut<I> for Arena<I, T> {
    #[inline]
    fn index_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.index()]
    }
}
