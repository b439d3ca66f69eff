//! Population controller: keeps stock counts within bounds and breeds a new
//! generation when organisms run low.

use crate::entity::{Body, Entity, EntityId};
use crate::organism::Organism;
use crate::spatial::SpatialIndex;
use gridlife_core::{EntityKind, OrganismConfig, RandomSource, SimConfig, StockPolicy};
use gridlife_genome::{GeneticCode, Mutator};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Stationary kinds, in restock order
const STOCK_KINDS: [EntityKind; 3] = [
    EntityKind::Resource,
    EntityKind::Hazard,
    EntityKind::Obstacle,
];

/// Summary of one reproduction event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationEvent {
    pub generation: u64,
    pub parents: usize,
    pub offspring: usize,
}

pub struct PopulationController {
    organisms: OrganismConfig,
    resources: StockPolicy,
    hazards: StockPolicy,
    obstacles: StockPolicy,
    mutator: Mutator,
}

impl PopulationController {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            organisms: config.organisms.clone(),
            resources: config.resources,
            hazards: config.hazards,
            obstacles: config.obstacles,
            mutator: Mutator::new(config.mutation.clone()),
        }
    }

    pub fn organism_config(&self) -> &OrganismConfig {
        &self.organisms
    }

    pub fn policy(&self, kind: EntityKind) -> Option<&StockPolicy> {
        match kind {
            EntityKind::Organism => None,
            EntityKind::Resource => Some(&self.resources),
            EntityKind::Hazard => Some(&self.hazards),
            EntityKind::Obstacle => Some(&self.obstacles),
        }
    }

    /// Place the initial organisms and fill every stock kind to its maximum
    pub fn seed(&self, index: &mut SpatialIndex, rng: &mut RandomSource) {
        for _ in 0..self.organisms.initial_count {
            let code = GeneticCode::random_in_range(
                self.organisms.min_code_length,
                self.organisms.max_code_length,
                rng,
            );
            let organism = Organism::new(code, self.organisms.baseline_health, 0);
            if self.spawn(index, rng, Body::Organism(organism)).is_none() {
                break;
            }
        }

        for kind in STOCK_KINDS {
            self.fill(kind, index, rng);
        }

        info!(
            organisms = index.count(EntityKind::Organism),
            resources = index.count(EntityKind::Resource),
            hazards = index.count(EntityKind::Hazard),
            obstacles = index.count(EntityKind::Obstacle),
            "World seeded"
        );
    }

    /// Restock every stationary kind whose count fell to its minimum; returns entities spawned
    pub fn restock(&self, index: &mut SpatialIndex, rng: &mut RandomSource) -> usize {
        let mut spawned = 0;
        for kind in STOCK_KINDS {
            let count = index.count(kind);
            let needs_restock = self
                .policy(kind)
                .is_some_and(|policy| policy.needs_restock(count));
            if needs_restock {
                let added = self.fill(kind, index, rng);
                debug!(%kind, from = count, added, "Restocked");
                spawned += added;
            }
        }
        spawned
    }

    /// Breed one mutated offspring per living organism when the population is at
    /// or below the survival floor.
    ///
    /// Parents are snapshotted first, so offspring never breed in the same event.
    /// An extinct population has nothing to breed and leaves `generation` unchanged.
    pub fn reproduce(
        &self,
        index: &mut SpatialIndex,
        rng: &mut RandomSource,
        generation: &mut u64,
    ) -> Option<GenerationEvent> {
        let population = index.count(EntityKind::Organism);
        if population > self.organisms.survival_floor {
            return None;
        }
        if population == 0 {
            debug!("Population extinct, skipping generation event");
            return None;
        }

        *generation += 1;
        let parents: Vec<EntityId> = index.ids(EntityKind::Organism).collect();

        let mut offspring = 0;
        for parent in &parents {
            let code = match index.organism(*parent) {
                Some(organism) => self.mutator.offspring(organism.code(), rng),
                None => continue,
            };
            let child = Organism::new(code, self.organisms.baseline_health, *generation);
            if self.spawn(index, rng, Body::Organism(child)).is_none() {
                break;
            }
            offspring += 1;
        }

        let event = GenerationEvent {
            generation: *generation,
            parents: parents.len(),
            offspring,
        };
        info!(
            generation = event.generation,
            parents = event.parents,
            offspring = event.offspring,
            "New generation"
        );
        Some(event)
    }

    /// Spawn `kind` at random free cells until its count reaches the policy maximum
    fn fill(&self, kind: EntityKind, index: &mut SpatialIndex, rng: &mut RandomSource) -> usize {
        let Some(policy) = self.policy(kind).copied() else {
            return 0;
        };

        let mut added = 0;
        while index.count(kind) < policy.maximum {
            if self.spawn(index, rng, stock_body(kind, &policy)).is_none() {
                break;
            }
            added += 1;
        }
        added
    }

    fn spawn(&self, index: &mut SpatialIndex, rng: &mut RandomSource, body: Body) -> Option<EntityId> {
        match index.random_free_position(rng) {
            Some(pos) => Some(index.place(Entity::new(pos, body))),
            None => {
                warn!(kind = %body.kind(), "No free cell left, spawn skipped");
                None
            }
        }
    }
}

fn stock_body(kind: EntityKind, policy: &StockPolicy) -> Body {
    match kind {
        EntityKind::Resource => Body::Resource {
            heal: policy.amount,
        },
        EntityKind::Hazard => Body::Hazard {
            damage: policy.amount,
        },
        EntityKind::Obstacle => Body::Obstacle,
        EntityKind::Organism => unreachable!("organisms are not stocked"),
    }
}
