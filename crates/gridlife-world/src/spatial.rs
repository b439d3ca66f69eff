//! Spatial index: the entity arena, its occupancy grid and per-kind groupings.
//!
//! The arena is the only owner of entity state. The grid and the per-kind sets
//! hold handles into it and are updated together on every placement, move and
//! removal, so an entity is either fully present (arena, one grid cell, one
//! kind set) or fully absent.

use crate::entity::{Entity, EntityId};
use crate::grid::Grid;
use crate::organism::Organism;
use gridlife_core::{EntityKind, Position, RandomSource};
use slotmap::SlotMap;
use std::collections::BTreeSet;

/// Rejection-sampling attempts before falling back to a full scan
const FREE_CELL_ATTEMPTS: usize = 64;

#[derive(Debug, Clone)]
pub struct SpatialIndex {
    entities: SlotMap<EntityId, Entity>,
    grid: Grid,
    by_kind: [BTreeSet<EntityId>; EntityKind::COUNT],
}

impl SpatialIndex {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            entities: SlotMap::with_key(),
            grid: Grid::new(width, height),
            by_kind: Default::default(),
        }
    }

    pub fn width(&self) -> i32 {
        self.grid.width
    }

    pub fn height(&self) -> i32 {
        self.grid.height
    }

    pub fn wrap(&self, pos: Position) -> Position {
        self.grid.wrap(pos)
    }

    pub fn occupied(&self, pos: Position) -> bool {
        self.grid.get(pos).is_some()
    }

    pub fn occupant(&self, pos: Position) -> Option<EntityId> {
        self.grid.get(pos)
    }

    pub fn get(&self, pos: Position) -> Option<&Entity> {
        self.occupant(pos).map(|id| &self.entities[id])
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Mutable access to an organism's state; position changes go through [`relocate`](Self::relocate)
    pub fn organism_mut(&mut self, id: EntityId) -> Option<&mut Organism> {
        self.entities.get_mut(id).and_then(Entity::as_organism_mut)
    }

    pub fn organism(&self, id: EntityId) -> Option<&Organism> {
        self.entities.get(id).and_then(Entity::as_organism)
    }

    /// Insert an entity into an empty cell.
    ///
    /// # Panics
    /// If the cell is already occupied.
    pub fn place(&mut self, mut entity: Entity) -> EntityId {
        entity.position = self.wrap(entity.position);
        let pos = entity.position;
        if let Some(existing) = self.grid.get(pos) {
            panic!(
                "cannot place {} at {}: cell already holds {:?}",
                entity.kind(),
                pos,
                existing
            );
        }

        let kind = entity.kind();
        let id = self.entities.insert(entity);
        self.grid.set(pos, Some(id));
        self.by_kind[kind.index()].insert(id);
        id
    }

    /// Remove an entity from the arena, its cell and its kind set.
    ///
    /// # Panics
    /// If the entity is not present.
    pub fn remove(&mut self, id: EntityId) -> Entity {
        let entity = match self.entities.remove(id) {
            Some(entity) => entity,
            None => panic!("cannot remove {:?}: not present in the world", id),
        };

        assert_eq!(
            self.grid.get(entity.position),
            Some(id),
            "grid slot at {} does not hold the removed entity",
            entity.position
        );
        self.grid.set(entity.position, None);

        let was_grouped = self.by_kind[entity.kind().index()].remove(&id);
        assert!(was_grouped, "{:?} missing from its {} set", id, entity.kind());
        entity
    }

    /// Move an entity to an empty cell.
    ///
    /// # Panics
    /// If the entity is absent or the target is occupied by another entity.
    pub fn relocate(&mut self, id: EntityId, to: Position) {
        let to = self.wrap(to);
        let from = match self.entities.get(id) {
            Some(entity) => entity.position,
            None => panic!("cannot relocate {:?}: not present in the world", id),
        };
        if from == to {
            return;
        }
        if let Some(existing) = self.grid.get(to) {
            panic!("cannot relocate {:?} to {}: cell holds {:?}", id, to, existing);
        }

        self.grid.set(from, None);
        self.grid.set(to, Some(id));
        self.entities[id].position = to;
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.by_kind[kind.index()].len()
    }

    /// Handles of every live entity of `kind`, in stable order
    pub fn ids(&self, kind: EntityKind) -> impl Iterator<Item = EntityId> + '_ {
        self.by_kind[kind.index()].iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities.iter()
    }

    /// Uniformly random empty cell, or `None` when every cell is occupied
    pub fn random_free_position(&self, rng: &mut RandomSource) -> Option<Position> {
        if self.entities.len() >= self.grid.len() {
            return None;
        }

        for _ in 0..FREE_CELL_ATTEMPTS {
            let pos = Position::new(
                rng.range_inclusive(0, self.width() - 1),
                rng.range_inclusive(0, self.height() - 1),
            );
            if !self.occupied(pos) {
                return Some(pos);
            }
        }

        // Dense grid: sample uniformly among the remaining free cells.
        let free: Vec<Position> = self.grid.free_positions().collect();
        if free.is_empty() {
            return None;
        }
        Some(free[rng.index(free.len())])
    }

    /// Cross-check the arena, grid and kind sets against each other
    pub fn check_invariants(&self) -> Result<(), String> {
        for (id, entity) in &self.entities {
            if !entity.position.is_within(self.width(), self.height()) {
                return Err(format!("{:?} at unwrapped position {}", id, entity.position));
            }
            if self.grid.get(entity.position) != Some(id) {
                return Err(format!("{:?} not found in its cell {}", id, entity.position));
            }
            for kind in EntityKind::all() {
                let grouped = self.by_kind[kind.index()].contains(&id);
                if grouped != (kind == entity.kind()) {
                    return Err(format!("{:?} grouped under the wrong kind", id));
                }
            }
            if let Some(organism) = entity.as_organism() {
                if !organism.is_alive() {
                    return Err(format!("{:?} present with health {}", id, organism.health));
                }
            }
        }

        let occupied = self.grid.iter().count();
        if occupied != self.entities.len() {
            return Err(format!(
                "{} occupied cells for {} entities",
                occupied,
                self.entities.len()
            ));
        }
        let grouped: usize = self.by_kind.iter().map(BTreeSet::len).sum();
        if grouped != self.entities.len() {
            return Err(format!(
                "{} grouped handles for {} entities",
                grouped,
                self.entities.len()
            ));
        }
        Ok(())
    }
}
