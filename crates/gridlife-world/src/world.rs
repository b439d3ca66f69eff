//! World orchestration: one tick of organisms, reactions and population control.

use crate::entity::{Body, Entity, EntityId};
use crate::organism::{Organism, OrganismStats};
use crate::population::PopulationController;
use crate::reaction::{self, MoveOutcome};
use crate::spatial::SpatialIndex;
use crate::stats::{Drawable, TickSummary, WorldStats};
use gridlife_core::{EntityKind, Position, RandomSource, Result, SimConfig};
use gridlife_genome::GeneticCode;
use tracing::{debug, info, instrument};

pub struct World {
    index: SpatialIndex,
    controller: PopulationController,
    rng: RandomSource,
    iteration: u64,
    generation: u64,
    last_tick: TickSummary,
}

impl World {
    /// Validate `config` and seed the initial population
    pub fn new(config: SimConfig) -> Result<Self> {
        let mut world = Self::empty(config)?;
        world.controller.seed(&mut world.index, &mut world.rng);
        Ok(world)
    }

    /// Validate `config` and build a world with no entities
    pub fn empty(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            index: SpatialIndex::new(config.world.width, config.world.height),
            controller: PopulationController::new(&config),
            rng: RandomSource::new(config.seed),
            iteration: 0,
            generation: 0,
            last_tick: TickSummary::default(),
        })
    }

    pub fn width(&self) -> i32 {
        self.index.width()
    }

    pub fn height(&self) -> i32 {
        self.index.height()
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn last_tick(&self) -> &TickSummary {
        &self.last_tick
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.index.count(kind)
    }

    pub fn organism(&self, id: EntityId) -> Option<&Organism> {
        self.index.organism(id)
    }

    pub fn position_of(&self, id: EntityId) -> Option<Position> {
        self.index.entity(id).map(|e| e.position)
    }

    /// Place an entity at a specific cell.
    ///
    /// # Panics
    /// If the cell is occupied.
    pub fn spawn(&mut self, position: Position, body: Body) -> EntityId {
        self.index.place(Entity::new(position, body))
    }

    /// Place an organism with baseline health in the current generation
    pub fn spawn_organism(&mut self, position: Position, code: GeneticCode) -> EntityId {
        let health = self.controller.organism_config().baseline_health;
        let organism = Organism::new(code, health, self.generation);
        self.spawn(position, Body::Organism(organism))
    }

    /// Move organism `id` towards `target` under the reaction protocol
    pub fn attempt_move(&mut self, id: EntityId, target: Position) -> MoveOutcome {
        reaction::attempt_move(&mut self.index, id, target)
    }

    /// Advance the simulation by one tick.
    ///
    /// Only organisms alive at the start of the tick act, in shuffled order;
    /// population control runs once after all of them.
    pub fn iterate(&mut self) {
        let mut summary = TickSummary::default();

        let mut acting: Vec<EntityId> = self.index.ids(EntityKind::Organism).collect();
        self.rng.shuffle(&mut acting);

        for id in acting {
            if !self.index.contains(id) {
                continue;
            }
            self.act(id, &mut summary);
        }

        summary.restocked = self.controller.restock(&mut self.index, &mut self.rng);
        summary.generation_event =
            self.controller
                .reproduce(&mut self.index, &mut self.rng, &mut self.generation);

        self.iteration += 1;
        debug!(
            iteration = self.iteration,
            acted = summary.acted,
            deaths = summary.deaths,
            restocked = summary.restocked,
            "Tick complete"
        );
        self.last_tick = summary;
    }

    /// Age one organism, then run its next instruction
    fn act(&mut self, id: EntityId, summary: &mut TickSummary) {
        let aging_cost = self.controller.organism_config().aging_cost;
        let direction = match self.index.organism_mut(id) {
            Some(organism) => {
                organism.tick(aging_cost);
                if !organism.is_alive() {
                    None
                } else {
                    Some(organism.next_move())
                }
            }
            None => return,
        };
        summary.acted += 1;

        let Some(direction) = direction else {
            // Died of old age: no move this tick.
            reaction::remove_if_dead(&mut self.index, id);
            summary.deaths += 1;
            return;
        };

        let from = match self.index.entity(id) {
            Some(entity) => entity.position,
            None => return,
        };
        let outcome = reaction::attempt_move(&mut self.index, id, from.step(direction));

        if outcome.moved {
            summary.moved += 1;
        } else {
            summary.blocked += 1;
        }
        match outcome.encountered {
            Some(EntityKind::Resource) => summary.resources_consumed += 1,
            Some(EntityKind::Hazard) => summary.hazards_triggered += 1,
            _ => {}
        }
        if outcome.died {
            summary.deaths += 1;
        }
    }

    /// Run `ticks` ticks and return the final statistics
    #[instrument(skip(self), fields(start = self.iteration))]
    pub fn run(&mut self, ticks: u64) -> WorldStats {
        for _ in 0..ticks {
            self.iterate();

            if self.iteration % 1000 == 0 {
                info!(
                    iteration = self.iteration,
                    generation = self.generation,
                    organisms = self.count(EntityKind::Organism),
                    "Simulation progress"
                );
            }
        }
        self.stats()
    }

    /// Position and visual tag of every live entity
    pub fn drawable(&self) -> Vec<Drawable> {
        self.index
            .iter()
            .map(|(_, entity)| Drawable {
                position: entity.position,
                color: entity.color(),
            })
            .collect()
    }

    pub fn stats(&self) -> WorldStats {
        let counts = EntityKind::all()
            .into_iter()
            .map(|kind| (kind, self.index.count(kind)))
            .collect();
        let organisms = self
            .index
            .ids(EntityKind::Organism)
            .filter_map(|id| self.index.organism(id))
            .map(OrganismStats::from)
            .collect();

        WorldStats {
            iteration: self.iteration,
            generation: self.generation,
            counts,
            organisms,
        }
    }
}
