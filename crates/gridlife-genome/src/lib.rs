//! Genetic codes for organisms.
//!
//! A genetic code is a circular sequence of movement opcodes. Organisms read
//! one opcode per tick through an [`Interpreter`]; offspring codes are derived
//! from their parent's by a [`Mutator`].

pub mod opcode;
pub mod code;
pub mod interpreter;
pub mod mutation;

pub use opcode::Opcode;
pub use code::GeneticCode;
pub use interpreter::Interpreter;
pub use mutation::Mutator;
