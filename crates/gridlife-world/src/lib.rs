//! World simulation engine.
//!
//! This module implements the toroidal grid where organisms move by their
//! genetic code, react with what they bump into, and are bred back when the
//! population collapses.

pub mod entity;
pub mod grid;
pub mod organism;
pub mod population;
pub mod reaction;
pub mod spatial;
pub mod stats;
pub mod world;

pub use entity::{Body, Entity, EntityId};
pub use grid::Grid;
pub use organism::{Organism, OrganismStats};
pub use population::{GenerationEvent, PopulationController};
pub use reaction::{Entry, MoveOutcome};
pub use spatial::SpatialIndex;
pub use stats::{Drawable, TickSummary, WorldStats};
pub use world::World;
