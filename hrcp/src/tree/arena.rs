//! Slot storage for resources.

use std::ops::{Index, IndexMut};

use crate::resource::{Resource, ResourceId};

#[derive(Debug, Clone)]
struct Slot {
    generation: u64,
    resource: Option<Resource>,
}

/// Generational slot arena owning every resource of a tree.
///
/// Removing a resource bumps its slot's generation, so handles issued
/// before the removal no longer resolve even after the slot is reused.
#[derive(Debug, Clone, Default)]
pub(crate) struct Arena {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: usize,
}

impl Arena {
    pub(crate) fn insert(&mut self, resource: Resource) -> ResourceId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.resource = Some(resource);
            return ResourceId::new(index, slot.generation);
        }

        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            resource: Some(resource),
        });
        ResourceId::new(index, 0)
    }

    pub(crate) fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.resource.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: ResourceId) -> Option<&mut Resource> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.resource.as_mut())
    }

    pub(crate) fn remove(&mut self, id: ResourceId) -> Option<Resource> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let resource = slot.resource.take()?;
        slot.generation += 1;
        self.free.push(id.index);
        self.live -= 1;
        Some(resource)
    }

    pub(crate) fn contains(&self, id: ResourceId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) const fn len(&self) -> usize {
        self.live
    }
}

impl Index<ResourceId> for Arena {
    type Output = Resource;

    fn index(&self, id: ResourceId) -> &Resource {
        match self.get(id) {
            Some(resource) => resource,
            None => panic!("stale resource handle {id}"),
        }
    }
}

impl IndexMut<ResourceId> for Arena {
    fn index_mut(&mut self, id: ResourceId) -> &mut Resource {
        match self.get_mut(id) {
            Some(resource) => resource,
            None => panic!("stale resource handle {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(name: &str) -> Resource {
        Resource::new(name).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let mut arena = Arena::default();
        let a = arena.insert(resource("a"));
        let b = arena.insert(resource("b"));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a).unwrap().name(), "a");
        assert_eq!(arena[b].name(), "b");
    }

    #[test]
    fn test_remove_invalidates_handle() {
        let mut arena = Arena::default();
        let a = arena.insert(resource("a"));
        assert_eq!(arena.remove(a).unwrap().name(), "a");
        assert!(arena.get(a).is_none());
        assert!(!arena.contains(a));
        assert_eq!(arena.len(), 0);
        assert!(arena.remove(a).is_none());
    }

    #[test]
    fn test_reused_slot_does_not_alias_stale_handle() {
        let mut arena = Arena::default();
        let old = arena.insert(resource("old"));
        arena.remove(old);
        let new = arena.insert(resource("new"));

        assert_eq!(old.index(), new.index());
        assert_ne!(old.generation(), new.generation());
        assert!(arena.get(old).is_none());
        assert_eq!(arena[new].name(), "new");
    }

    #[test]
    #[should_panic(expected = "stale resource handle")]
    fn test_index_stale_handle_panics() {
        let mut arena = Arena::default();
        let id = arena.insert(resource("a"));
        arena.remove(id);
        let _ = &arena[id];
    }
}
