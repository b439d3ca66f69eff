//! Mutation operators for genetic codes.

use crate::code::GeneticCode;
use crate::opcode::Opcode;
use gridlife_core::{MutationConfig, RandomSource};
use tracing::trace;

pub struct Mutator {
    config: MutationConfig,
}

impl Mutator {
    pub fn new(config: MutationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Derive an offspring code from `parent`.
    ///
    /// The length jitters by up to `length_jitter`, the shared prefix is copied,
    /// any extension is random, then a few point mutations hit the prefix.
    pub fn offspring(&self, parent: &GeneticCode, rng: &mut RandomSource) -> GeneticCode {
        let jitter = rng.range_inclusive(-self.config.length_jitter, self.config.length_jitter);
        let new_len = (parent.len() as i64 + jitter as i64).max(1) as usize;
        let shared_len = new_len.min(parent.len());

        let mut opcodes: Vec<Opcode> = Vec::with_capacity(new_len);
        opcodes.extend_from_slice(&parent.opcodes()[..shared_len]);
        opcodes.extend((shared_len..new_len).map(|_| Opcode::random(rng)));

        let point_mutations = self.point_mutate(&mut opcodes[..shared_len], rng);

        trace!(
            parent_len = parent.len(),
            new_len,
            shared_len,
            point_mutations,
            "Derived offspring code"
        );

        GeneticCode::from_nonempty(opcodes)
    }

    /// Overwrite up to `len / point_mutation_divisor` random positions; returns the count drawn
    fn point_mutate(&self, shared: &mut [Opcode], rng: &mut RandomSource) -> usize {
        if shared.is_empty() {
            return 0;
        }

        let max_mutations = shared.len() / self.config.point_mutation_divisor.max(1);
        let count = rng.count_inclusive(0, max_mutations);
        for _ in 0..count {
            let index = rng.index(shared.len());
            shared[index] = Opcode::random(rng);
        }
        count
    }
}
