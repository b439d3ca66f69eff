//! Circular instruction pointer over a genetic code.

use crate::code::GeneticCode;
use gridlife_core::Direction;

/// Runs a genetic code one opcode per tick, wrapping at the end.
///
/// `code_pos` is always a valid index into `code`.
#[derive(Debug, Clone)]
pub struct Interpreter {
    code: GeneticCode,
    code_pos: usize,
}

impl Interpreter {
    pub fn new(code: GeneticCode) -> Self {
        Self { code, code_pos: 0 }
    }

    /// Read the current opcode, then advance the pointer
    pub fn next_move(&mut self) -> Direction {
        let opcode = self.code.opcodes()[self.code_pos];
        self.code_pos = (self.code_pos + 1) % self.code.len();
        opcode.direction()
    }

    pub fn code(&self) -> &GeneticCode {
        &self.code
    }

    pub fn code_pos(&self) -> usize {
        self.code_pos
    }
}
