//! World - the ordered entity list and the collision index over it.
//!
//! List order is significant: entities tick in list order and collision
//! queries report hits in list order, so earlier entities win ties.

use crate::entity::{Entity, EntityId, EntityKind};
use crate::types::Position;

/// Every live entity of a session, in registration order.
#[derive(Debug, Clone, Default)]
pub struct World {
    entities: Vec<Entity>,
    next_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a world from loader output, preserving order.
    pub fn from_kinds(kinds: impl IntoIterator<Item = EntityKind>) -> Self {
        let mut world = Self::new();
        for kind in kinds {
            world.spawn(kind);
        }
        world
    }

    /// Append a new entity and return its id.
    pub fn spawn(&mut self, kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity::new(id, kind));
        id
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id() == id)
    }

    pub fn find(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn find_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    /// Indices of every entity whose footprint touches any of `positions`.
    ///
    /// Each entity is reported at most once, in list order. The querying
    /// entity is not excluded.
    pub fn items_at(&self, positions: &[Position]) -> Vec<usize> {
        if positions.is_empty() {
            return Vec::new();
        }
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                let footprint = e.footprint();
                positions.iter().any(|p| footprint.contains(p))
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Mutable access to two distinct entities at once.
    ///
    /// Returns `None` when the indices are equal or out of range.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Entity, &mut Entity)> {
        if a == b || a >= self.entities.len() || b >= self.entities.len() {
            return None;
        }
        if a < b {
            let (left, right) = self.entities.split_at_mut(b);
            Some((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.entities.split_at_mut(a);
            Some((&mut right[0], &mut left[b]))
        }
    }

    /// Drop every entity for which `keep` returns false.
    pub fn retain(&mut self, keep: impl FnMut(&Entity) -> bool) {
        self.entities.retain(keep);
    }
}
