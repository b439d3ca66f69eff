//! Reaction protocol: what happens when an organism tries to enter a cell.
//!
//! `react` is the single contract shared by every variant: it returns whether
//! the acting organism ends the move standing on the target cell. A variant
//! that allows entry has already removed itself from the index.

use crate::entity::{Body, EntityId};
use crate::organism::Organism;
use crate::spatial::SpatialIndex;
use gridlife_core::{EntityKind, Position};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether the actor may occupy the reacting entity's cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Allowed,
    Denied,
}

/// Result of one attempted move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Wrapped target cell
    pub target: Position,
    /// Whether the organism now stands on `target`
    pub moved: bool,
    /// Kind of the entity that occupied `target`, if any
    pub encountered: Option<EntityKind>,
    /// Whether the organism was removed for health <= 0
    pub died: bool,
}

/// Let the entity `occupant` react to `actor` trying to enter its cell.
///
/// # Panics
/// If `actor` is not a live organism.
pub fn react(index: &mut SpatialIndex, occupant: EntityId, actor: EntityId) -> Entry {
    let body = match index.entity(occupant) {
        Some(entity) => entity.body.reaction(),
        None => panic!("reacting entity {:?} is not present", occupant),
    };

    match body {
        Reaction::Block => Entry::Denied,
        Reaction::Damage(amount) => {
            index.remove(occupant);
            actor_organism(index, actor).damage(amount);
            debug!(?actor, amount, "Organism stepped on a hazard");
            Entry::Allowed
        }
        Reaction::Heal(amount) => {
            index.remove(occupant);
            actor_organism(index, actor).heal(amount);
            debug!(?actor, amount, "Organism consumed a resource");
            Entry::Allowed
        }
    }
}

/// Move `actor` towards `target`, resolving any occupant's reaction, then
/// remove the actor if its health dropped to zero or below.
pub fn attempt_move(index: &mut SpatialIndex, actor: EntityId, target: Position) -> MoveOutcome {
    let target = index.wrap(target);
    // Fails fast on a non-organism actor.
    actor_organism(index, actor);

    let (moved, encountered) = match index.occupant(target) {
        None => (true, None),
        Some(occupant) => {
            let kind = index.entity(occupant).map(|e| e.kind());
            let moved = react(index, occupant, actor) == Entry::Allowed;
            (moved, kind)
        }
    };

    if moved {
        index.relocate(actor, target);
    }

    let died = remove_if_dead(index, actor);

    MoveOutcome {
        target,
        moved,
        encountered,
        died,
    }
}

/// Remove the organism when its health is at or below zero; returns whether it was removed
pub fn remove_if_dead(index: &mut SpatialIndex, id: EntityId) -> bool {
    let alive = actor_organism(index, id).is_alive();
    if !alive {
        let entity = index.remove(id);
        if let Some(organism) = entity.as_organism() {
            debug!(
                organism = ?id,
                position = %entity.position,
                health = organism.health,
                age = organism.age,
                generation = organism.generation,
                "Organism died"
            );
        }
    }
    !alive
}

fn actor_organism(index: &mut SpatialIndex, actor: EntityId) -> &mut Organism {
    match index.organism_mut(actor) {
        Some(organism) => organism,
        None => panic!("actor {:?} is not a live organism", actor),
    }
}

/// Side effect a variant applies to an entering organism
enum Reaction {
    Block,
    Damage(i32),
    Heal(i32),
}

impl Body {
    fn reaction(&self) -> Reaction {
        match self {
            Body::Organism(_) | Body::Obstacle => Reaction::Block,
            Body::Hazard { damage } => Reaction::Damage(*damage),
            Body::Resource { heal } => Reaction::Heal(*heal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use gridlife_genome::GeneticCode;

    fn place_organism(index: &mut SpatialIndex, pos: Position, health: i32) -> EntityId {
        let code = GeneticCode::from_values(&[0]).unwrap();
        index.place(Entity::new(pos, Body::Organism(Organism::new(code, health, 0))))
    }

    #[test]
    fn test_move_into_empty_cell() {
        let mut index = SpatialIndex::new(20, 20);
        let id = place_organism(&mut index, Position::new(0, 0), 10);

        let outcome = attempt_move(&mut index, id, Position::new(-1, -1));
        assert_eq!(outcome.target, Position::new(19, 19));
        assert!(outcome.moved);
        assert_eq!(outcome.encountered, None);
        assert!(!outcome.died);
        assert_eq!(index.entity(id).unwrap().position, Position::new(19, 19));
        assert!(!index.occupied(Position::new(0, 0)));
    }

    #[test]
    fn test_obstacle_blocks() {
        let mut index = SpatialIndex::new(10, 10);
        let id = place_organism(&mut index, Position::new(5, 5), 10);
        let wall = index.place(Entity::new(Position::new(5, 6), Body::Obstacle));

        let outcome = attempt_move(&mut index, id, Position::new(5, 6));
        assert!(!outcome.moved);
        assert_eq!(outcome.encountered, Some(EntityKind::Obstacle));
        assert_eq!(index.entity(id).unwrap().position, Position::new(5, 5));
        assert!(index.contains(wall));
        assert_eq!(index.organism(id).unwrap().health, 10);
    }

    #[test]
    fn test_organisms_block_each_other() {
        let mut index = SpatialIndex::new(10, 10);
        let a = place_organism(&mut index, Position::new(1, 1), 10);
        let b = place_organism(&mut index, Position::new(2, 1), 10);

        let outcome = attempt_move(&mut index, a, Position::new(2, 1));
        assert!(!outcome.moved);
        assert_eq!(outcome.encountered, Some(EntityKind::Organism));
        assert_eq!(index.occupant(Position::new(2, 1)), Some(b));
        assert_eq!(index.organism(b).unwrap().health, 10);
    }

    #[test]
    fn test_hazard_damages_and_is_consumed() {
        let mut index = SpatialIndex::new(10, 10);
        let id = place_organism(&mut index, Position::new(3, 3), 20);
        let hazard = index.place(Entity::new(Position::new(4, 4), Body::Hazard { damage: 5 }));

        let outcome = attempt_move(&mut index, id, Position::new(4, 4));
        assert!(outcome.moved);
        assert_eq!(outcome.encountered, Some(EntityKind::Hazard));
        assert!(!index.contains(hazard));
        assert_eq!(index.organism(id).unwrap().health, 15);
        assert_eq!(index.occupant(Position::new(4, 4)), Some(id));
        assert_eq!(index.count(EntityKind::Hazard), 0);
        assert!(index.check_invariants().is_ok());
    }

    #[test]
    fn test_resource_heals_and_is_consumed() {
        let mut index = SpatialIndex::new(10, 10);
        let id = place_organism(&mut index, Position::new(0, 0), 20);
        index.place(Entity::new(Position::new(0, 9), Body::Resource { heal: 7 }));

        let outcome = attempt_move(&mut index, id, Position::new(0, -1));
        assert!(outcome.moved);
        assert_eq!(outcome.encountered, Some(EntityKind::Resource));
        assert_eq!(index.organism(id).unwrap().health, 27);
        assert_eq!(index.count(EntityKind::Resource), 0);
    }

    #[test]
    fn test_lethal_hazard_removes_both() {
        let mut index = SpatialIndex::new(10, 10);
        let id = place_organism(&mut index, Position::new(3, 3), 5);
        index.place(Entity::new(Position::new(3, 4), Body::Hazard { damage: 5 }));

        let outcome = attempt_move(&mut index, id, Position::new(3, 4));
        assert!(outcome.moved);
        assert!(outcome.died);
        assert!(!index.contains(id));
        assert!(index.is_empty());
        assert!(index.check_invariants().is_ok());
    }

    #[test]
    #[should_panic(expected = "not a live organism")]
    fn test_non_organism_actor_panics() {
        let mut index = SpatialIndex::new(10, 10);
        let wall = index.place(Entity::new(Position::new(0, 0), Body::Obstacle));
        attempt_move(&mut index, wall, Position::new(1, 0));
    }
}
