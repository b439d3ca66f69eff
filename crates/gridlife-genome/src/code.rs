//! Genetic code: the instruction sequence an organism runs.

use crate::opcode::Opcode;
use gridlife_core::{Error, RandomSource, Result};
use serde::{Deserialize, Serialize};

/// A non-empty sequence of opcodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Opcode>", into = "Vec<Opcode>")]
pub struct GeneticCode {
    opcodes: Vec<Opcode>,
}

impl GeneticCode {
    pub fn new(opcodes: Vec<Opcode>) -> Result<Self> {
        if opcodes.is_empty() {
            return Err(Error::Validation(
                "genetic code must contain at least one opcode".to_string(),
            ));
        }
        Ok(Self { opcodes })
    }

    pub(crate) fn from_nonempty(opcodes: Vec<Opcode>) -> Self {
        assert!(!opcodes.is_empty(), "genetic code must contain at least one opcode");
        Self { opcodes }
    }

    /// Build from raw values, validating each against the alphabet
    pub fn from_values(values: &[u8]) -> Result<Self> {
        let opcodes = values
            .iter()
            .map(|&v| Opcode::new(v))
            .collect::<Result<Vec<_>>>()?;
        Self::new(opcodes)
    }

    /// Uniformly random code of exactly `len` opcodes
    pub fn random(len: usize, rng: &mut RandomSource) -> Self {
        assert!(len > 0, "genetic code length must be at least 1");
        Self {
            opcodes: (0..len).map(|_| Opcode::random(rng)).collect(),
        }
    }

    /// Random code with length uniform in `[min_len, max_len]`
    pub fn random_in_range(min_len: usize, max_len: usize, rng: &mut RandomSource) -> Self {
        let len = rng.count_inclusive(min_len, max_len);
        Self::random(len, rng)
    }

    pub fn len(&self) -> usize {
        self.opcodes.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.opcodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Opcode> {
        self.opcodes.get(index).copied()
    }

    pub fn opcodes(&self) -> &[Opcode] {
        &self.opcodes
    }

    pub fn values(&self) -> Vec<u8> {
        self.opcodes.iter().map(|op| op.value()).collect()
    }
}

impl TryFrom<Vec<Opcode>> for GeneticCode {
    type Error = Error;

    fn try_from(opcodes: Vec<Opcode>) -> Result<Self> {
        Self::new(opcodes)
    }
}

impl From<GeneticCode> for Vec<Opcode> {
    fn from(code: GeneticCode) -> Self {
        code.opcodes
    }
}
