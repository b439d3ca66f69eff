//! Opcode alphabet for genetic codes.

use gridlife_core::{Direction, Error, RandomSource, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single movement instruction.
///
/// The alphabet has exactly [`Opcode::ALPHABET_SIZE`] values, one per entry of
/// the move table, so every opcode maps to a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Opcode(u8);

impl Opcode {
    pub const ALPHABET_SIZE: u8 = Direction::COUNT as u8;

    pub fn new(value: u8) -> Result<Self> {
        if value < Self::ALPHABET_SIZE {
            Ok(Self(value))
        } else {
            Err(Error::Validation(format!(
                "opcode {} outside alphabet [0, {})",
                value,
                Self::ALPHABET_SIZE
            )))
        }
    }

    /// Uniformly random opcode
    pub fn random(rng: &mut RandomSource) -> Self {
        Self(rng.index(Self::ALPHABET_SIZE as usize) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn direction(&self) -> Direction {
        Direction::all()[self.0 as usize]
    }
}

impl TryFrom<u8> for Opcode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> u8 {
        opcode.0
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_opcode_has_a_direction() {
        let mut seen = Vec::new();
        for value in 0..Opcode::ALPHABET_SIZE {
            let direction = Opcode::new(value).unwrap().direction();
            assert!(!seen.contains(&direction));
            seen.push(direction);
        }
        assert_eq!(seen.len(), Direction::COUNT);
    }

    #[test]
    fn test_out_of_alphabet_rejected() {
        assert!(matches!(Opcode::new(7), Err(Error::Validation(_))));
        assert!(Opcode::try_from(255).is_err());
    }

    #[test]
    fn test_random_stays_in_alphabet() {
        let mut rng = RandomSource::new(9);
        for _ in 0..1000 {
            assert!(Opcode::random(&mut rng).value() < Opcode::ALPHABET_SIZE);
        }
    }

    #[test]
    fn test_serde_validates() {
        let op: Opcode = serde_json::from_str("3").unwrap();
        assert_eq!(op.direction(), Direction::NorthEast);
        assert!(serde_json::from_str::<Opcode>("7").is_err());
    }
}
