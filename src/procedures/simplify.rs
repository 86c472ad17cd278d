/*!
Root-level simplification of the clause databases.

At the root level every assignment is proven, so a clause with a true literal
is satisfied on every extension of the valuation and contributes nothing.
Simplification removes such clauses, rebuilds the activity heap over the
remaining unvalued atoms, and collects arena garbage.

A linear sweep over the databases is not free, so simplification is skipped
until the root valuation has grown and a propagation debt proportional to the
database size has been paid down.
*/

use rand::{Rng, SeedableRng};

use crate::{
    db::arena::ClauseRef,
    misc::log::targets::{self},
    solver::GenericSolver,
};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Simplifies the clause databases against the root-level valuation.
    ///
    /// Returns false if the formula is, or is found to be, unsatisfiable.
    pub(crate) fn simplify(&mut self) -> bool {
        debug_assert_eq!(self.trail.level(), 0);

        if !self.consistent {
            return false;
        }
        if self.propagate().is_err() {
            log::info!(target: targets::SIMPLIFY, "Conflict during root propagation");
            self.consistent = false;
            return false;
        }

        // Nothing to gain until the root valuation grows and some propagation
        // work has been done.
        if self.counters.last_simplify_assigns == Some(self.trail.len())
            || self.counters.simplify_props > 0
        {
            return true;
        }

        let removed_learnts = self.remove_satisfied_learnts();
        let removed_originals = self.remove_satisfied_originals();
        if removed_learnts + removed_originals > 0 {
            log::debug!(
                target: targets::SIMPLIFY,
                "Removed {removed_learnts} learnt and {removed_originals} original satisfied clauses",
            );
        }

        self.check_garbage();
        self.variables.rebuild_activity_heap();

        self.counters.last_simplify_assigns = Some(self.trail.len());
        self.counters.simplify_props =
            (self.counters.original_literals + self.counters.learnt_literals) as i64;

        true
    }

    /// True if some literal of the clause is satisfied.
    pub(crate) fn clause_satisfied(&self, clause: ClauseRef) -> bool {
        self.arena
            .literals(clause)
            .iter()
            .any(|literal| self.variables.literal_value(*literal) == Some(true))
    }

    /// Removes satisfied learnt clauses, frozen or attached, with their
    /// freeze records.
    fn remove_satisfied_learnts(&mut self) -> usize {
        let mut entries = std::mem::take(&mut self.clause_db.learnts);
        let before = entries.len();

        entries.retain(|entry| {
            if self.clause_satisfied(entry.clause) {
                self.remove_clause(entry.clause, !entry.state.frozen);
                false
            } else {
                true
            }
        });

        let removed = before - entries.len();
        self.clause_db.learnts = entries;
        removed
    }

    /// Removes satisfied original clauses.
    fn remove_satisfied_originals(&mut self) -> usize {
        let mut originals = std::mem::take(&mut self.clause_db.originals);
        let before = originals.len();

        originals.retain(|clause| {
            if self.clause_satisfied(*clause) {
                self.remove_clause(*clause, true);
                false
            } else {
                true
            }
        });

        let removed = before - originals.len();
        self.clause_db.originals = originals;
        removed
    }
}
