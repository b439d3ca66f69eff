//! Organism state and management.

use gridlife_core::Direction;
use gridlife_genome::{GeneticCode, Interpreter};
use serde::{Deserialize, Serialize};

/// The only mobile entity: moves by its genetic code and dies when health runs out
#[derive(Debug, Clone)]
pub struct Organism {
    pub health: i32,
    pub generation: u64,
    pub age: u64,
    interpreter: Interpreter,
}

impl Organism {
    pub fn new(code: GeneticCode, health: i32, generation: u64) -> Self {
        Self {
            health,
            generation,
            age: 0,
            interpreter: Interpreter::new(code),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = self.health.saturating_add(amount);
    }

    pub fn damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Age one tick and pay the aging cost
    pub fn tick(&mut self, aging_cost: i32) {
        self.age += 1;
        self.damage(aging_cost);
    }

    pub fn next_move(&mut self) -> Direction {
        self.interpreter.next_move()
    }

    pub fn code(&self) -> &GeneticCode {
        self.interpreter.code()
    }

    pub fn code_pos(&self) -> usize {
        self.interpreter.code_pos()
    }
}

/// Per-organism statistics for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganismStats {
    pub generation: u64,
    pub health: i32,
    pub code_length: usize,
    pub age: u64,
}

impl From<&Organism> for OrganismStats {
    fn from(org: &Organism) -> Self {
        Self {
            generation: org.generation,
            health: org.health,
            code_length: org.code().len(),
            age: org.age,
        }
    }
}
