//! Entity model: a position plus one of a closed set of variants.

use crate::organism::Organism;
use gridlife_core::{Color, EntityKind, Position};
use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to an entity in the world arena
    pub struct EntityId;
}

/// Variant-specific state
#[derive(Debug, Clone)]
pub enum Body {
    Organism(Organism),
    /// Always blocks
    Obstacle,
    /// Damages the organism that steps on it, then disappears
    Hazard { damage: i32 },
    /// Heals the organism that steps on it, then disappears
    Resource { heal: i32 },
}

impl Body {
    pub fn kind(&self) -> EntityKind {
        match self {
            Body::Organism(_) => EntityKind::Organism,
            Body::Obstacle => EntityKind::Obstacle,
            Body::Hazard { .. } => EntityKind::Hazard,
            Body::Resource { .. } => EntityKind::Resource,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub position: Position,
    pub body: Body,
}

impl Entity {
    pub fn new(position: Position, body: Body) -> Self {
        Self { position, body }
    }

    pub fn kind(&self) -> EntityKind {
        self.body.kind()
    }

    pub fn color(&self) -> Color {
        self.kind().color()
    }

    pub fn as_organism(&self) -> Option<&Organism> {
        match &self.body {
            Body::Organism(organism) => Some(organism),
            _ => None,
        }
    }

    pub fn as_organism_mut(&mut self) -> Option<&mut Organism> {
        match &mut self.body {
            Body::Organism(organism) => Some(organism),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlife_genome::GeneticCode;

    #[test]
    fn test_kinds_and_colors() {
        let pos = Position::new(1, 1);
        let code = GeneticCode::from_values(&[0]).unwrap();

        let organism = Entity::new(pos, Body::Organism(Organism::new(code, 10, 0)));
        assert_eq!(organism.kind(), EntityKind::Organism);
        assert_eq!(organism.color(), Color::BLUE);
        assert!(organism.as_organism().is_some());

        let hazard = Entity::new(pos, Body::Hazard { damage: 5 });
        assert_eq!(hazard.kind(), EntityKind::Hazard);
        assert_eq!(hazard.color(), Color::RED);
        assert!(hazard.as_organism().is_none());

        assert_eq!(Entity::new(pos, Body::Resource { heal: 1 }).color(), Color::GREEN);
        assert_eq!(Entity::new(pos, Body::Obstacle).kind(), EntityKind::Obstacle);
    }
}
