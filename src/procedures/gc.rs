/*!
Garbage collection of the clause arena.

Freed clauses waste arena words until a collection copies every live clause
into a fresh region and drops the old region wholesale.
Collection walks each root holding a handle --- watch lists, reasons on the
trail, and the original and learnt vectors --- and relocates the handle in
place; the forwarding word written by the first relocation of a clause keeps
every root consistent.
*/

use rand::{Rng, SeedableRng};

use crate::{
    db::arena::ClauseArena,
    misc::log::targets::{self},
    solver::GenericSolver,
};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Initiates a collection if the wasted fraction of the arena crosses the
    /// configured bound.
    pub(crate) fn check_garbage(&mut self) {
        if self.arena.wasted() as f64 > self.arena.len() as f64 * self.config.garbage_fraction {
            self.collect_garbage();
        }
    }

    /// Copies every live clause to a fresh arena and rewrites every root.
    fn collect_garbage(&mut self) {
        let before = self.arena.len();
        let mut fresh = ClauseArena::with_capacity(self.arena.len() - self.arena.wasted());

        // Watchers of freed clauses are purged rather than relocated.
        self.watches.clean_all(&self.arena);

        let arena = &mut self.arena;

        self.watches
            .for_each_clause_mut(|clause| arena.reloc(clause, &mut fresh));

        for entry in self.clause_db.learnts.iter_mut() {
            arena.reloc(&mut entry.clause, &mut fresh);
        }
        for clause in self.clause_db.originals.iter_mut() {
            arena.reloc(clause, &mut fresh);
        }

        // Reasons on the trail. A reason already relocated through a watch
        // list resolves by its forward; a reason freed at the root level is
        // forgotten.
        for index in 0..self.trail.len() {
            let atom = self.trail.literals()[index].atom();
            if let Some(mut reason) = self.variables.reason_of(atom) {
                if arena.is_deleted(reason) {
                    self.variables.clear_reason(atom);
                } else {
                    arena.reloc(&mut reason, &mut fresh);
                    if let Some(slot) = self.variables.reason_mut(atom) {
                        *slot = reason;
                    }
                }
            }
        }

        log::debug!(
            target: targets::ARENA,
            "Collection: {before} words to {} words",
            fresh.len(),
        );

        self.arena = fresh;
    }
}
