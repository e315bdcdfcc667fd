// ── Ordered entity collection ──
//
// Insertion-ordered storage with O(1) id lookups and a version counter
// that persistence uses to detect which collections changed.

use indexmap::IndexMap;

use crate::model::{Device, EntityId, Voucher};

/// Anything that can live in an [`EntityCollection`].
pub(crate) trait Keyed {
    fn key(&self) -> &EntityId;
}

impl Keyed for Device {
    fn key(&self) -> &EntityId {
        &self.id
    }
}

impl Keyed for Voucher {
    fn key(&self) -> &EntityId {
        &self.id
    }
}

/// An ordered collection for a single entity type.
///
/// Every mutation that actually changes contents bumps `version`.
/// Lookups that miss leave the version untouched.
#[derive(Debug, Clone)]
pub(crate) struct EntityCollection<T> {
    items: IndexMap<EntityId, T>,
    version: u64,
}

impl<T: Keyed + Clone> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        Self {
            items: IndexMap::new(),
            version: 0,
        }
    }

    pub(crate) fn from_vec(items: Vec<T>) -> Self {
        let mut collection = Self::new();
        collection.replace_all(items);
        collection
    }

    /// Insert at the front, ahead of every existing entity.
    pub(crate) fn push_front(&mut self, entity: T) {
        let id = entity.key().clone();
        self.items.shift_remove(&id);
        self.items.shift_insert(0, id, entity);
        self.bump_version();
    }

    /// Remove an entity, preserving the order of the rest.
    pub(crate) fn remove(&mut self, id: &EntityId) -> Option<T> {
        let removed = self.items.shift_remove(id);
        if removed.is_some() {
            self.bump_version();
        }
        removed
    }

    pub(crate) fn get(&self, id: &EntityId) -> Option<&T> {
        self.items.get(id)
    }

    /// Apply `f` to one entity. Returns `None` when the id is unknown.
    pub(crate) fn update<R>(&mut self, id: &EntityId, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let entity = self.items.get_mut(id)?;
        let out = f(entity);
        self.bump_version();
        Some(out)
    }

    /// Apply `f` to every entity. Bumps the version even when empty.
    pub(crate) fn update_all(&mut self, mut f: impl FnMut(&mut T)) {
        self.items.values_mut().for_each(&mut f);
        self.bump_version();
    }

    /// Drop current contents and load `items` in order. Later duplicates
    /// of an id overwrite earlier ones.
    pub(crate) fn replace_all(&mut self, items: Vec<T>) {
        self.items = items
            .into_iter()
            .map(|item| (item.key().clone(), item))
            .collect();
        self.bump_version();
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        self.items.values().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
