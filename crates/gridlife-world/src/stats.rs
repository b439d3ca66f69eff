//! Read-only snapshots handed to renderers and reporters.

use crate::organism::OrganismStats;
use crate::population::GenerationEvent;
use gridlife_core::{Color, EntityKind, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One live entity as a renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Drawable {
    pub position: Position,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldStats {
    pub iteration: u64,
    pub generation: u64,
    pub counts: BTreeMap<EntityKind, usize>,
    pub organisms: Vec<OrganismStats>,
}

impl WorldStats {
    pub fn count(&self, kind: EntityKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn mean_health(&self) -> f64 {
        if self.organisms.is_empty() {
            return 0.0;
        }
        self.organisms.iter().map(|o| o.health as f64).sum::<f64>() / self.organisms.len() as f64
    }

    pub fn mean_code_length(&self) -> f64 {
        if self.organisms.is_empty() {
            return 0.0;
        }
        self.organisms.iter().map(|o| o.code_length as f64).sum::<f64>()
            / self.organisms.len() as f64
    }
}

/// What happened during the most recent tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    pub acted: usize,
    pub moved: usize,
    pub blocked: usize,
    pub resources_consumed: usize,
    pub hazards_triggered: usize,
    pub deaths: usize,
    pub restocked: usize,
    pub generation_event: Option<GenerationEvent>,
}
