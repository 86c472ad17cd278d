/*!
Learnt-database reduction, by freeze, thaw, and removal.

# Overview

Rather than sorting the learnt database and deleting its worse half, each
reduction runs a *freeze analysis* over every learnt clause:

- A clause whose literals mostly agree with the saved phases is likely to be
  satisfied early on the next trajectory of the search, and so unlikely to
  propagate: such a clause is *frozen* --- detached from the watch indices,
  but retained with its metadata.
- A frozen clause whose measure reverses is *thawed* --- re-attached --- with
  its idle count reset, so it re-enters propagation without being relearnt.
- A clause which idles through several reductions without distinguishing
  itself (by activity, or by a protected LBD) is removed outright.

The measure is the clause's *polarity-saving measure* (PSM): the count of its
literals whose polarity disagrees with the saved phase of their atom.
A low PSM means the saved phases mostly satisfy the clause.

# Exclusions

A locked clause --- the reason of a current assignment --- is neither frozen
nor removed, and a clause holding a protected LBD or a recent activity spike
has its idle count reset rather than being removed.
*/

use rand::{Rng, SeedableRng};

use crate::{
    db::arena::ClauseRef,
    misc::log::targets::{self},
    solver::GenericSolver,
};

/// The activity at which a clause is considered recently useful, resetting
/// its idle count.
const ACTIVITY_FLOOR: f32 = 100_000.0;

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Reduces the learnt database by freeze analysis, and advances the
    /// reduction schedule.
    pub(crate) fn reduce_db(&mut self) {
        self.counters.reductions += 1;

        self.clause_db
            .note_reduction(self.counters.conflicts, self.config.reduction.interval_inc);

        // With many good clauses comparison is difficult: keep more, by
        // deferring the next reduction.
        let good = self
            .clause_db
            .learnts
            .iter()
            .filter(|entry| self.arena.lbd(entry.clause) <= 3)
            .count();
        if 2 * good >= self.clause_db.learnt_count() {
            self.clause_db.reduce_interval += self.config.reduction.special_interval_inc;
        }

        self.freeze_analyse();
    }

    /// Walks every learnt clause, applying freeze and thaw transitions and
    /// removing clauses which have idled through too many reductions.
    pub(crate) fn freeze_analyse(&mut self) {
        let mut entries = std::mem::take(&mut self.clause_db.learnts);
        let candidates = entries.len();

        let mut psm_sum: u64 = 0;
        let mut activity_sum: f64 = 0.0;
        let mut frozen = 0_u64;
        let mut thawed = 0_u64;
        let mut removed = 0_u64;

        let idle_bound = self.config.reduction.idle_bound;
        let psm_threshold = self.config.reduction.psm_threshold;

        entries.retain_mut(|entry| {
            let clause = entry.clause;
            let locked = self.locked(clause);

            let psm = self.clause_psm(clause);
            psm_sum += psm as u64;
            activity_sum += self.arena.activity(clause) as f64;

            let before = entry.state.frozen;
            let after = !locked && psm <= psm_threshold;

            if before != after {
                match after {
                    true => {
                        self.detach_clause(clause, true);
                        frozen += 1;
                    }
                    false => {
                        self.attach_clause(clause);
                        entry.state.idle_reductions = 0;
                        thawed += 1;
                    }
                }
            }
            entry.state.frozen = after;

            if !after && self.arena.activity(clause) >= ACTIVITY_FLOOR {
                entry.state.idle_reductions = 0;
            }

            entry.state.idle_reductions += 1;
            if entry.state.idle_reductions >= idle_bound
                && self.arena.lbd(clause) >= 3
                && self.arena.can_be_deleted(clause)
                && !locked
            {
                self.remove_clause(clause, !after);
                removed += 1;
                false
            } else {
                self.arena.set_can_be_deleted(clause, true);
                true
            }
        });

        self.clause_db.learnts = entries;

        self.counters.frozen_clauses += frozen;
        self.counters.thawed_clauses += thawed;
        self.counters.removed_clauses += removed;

        if candidates > 0 {
            log::info!(
                target: targets::REDUCTION,
                "Reduction over {candidates} clauses: {frozen} frozen, {thawed} thawed, {removed} removed, avg psm {:.2}, avg activity {:.2}",
                psm_sum as f64 / candidates as f64,
                activity_sum / candidates as f64,
            );
        }

        self.check_garbage();
    }

    /// The polarity-saving measure of a clause: the count of its literals
    /// whose polarity disagrees with the saved phase of their atom.
    pub(crate) fn clause_psm(&self, clause: ClauseRef) -> u32 {
        self.arena
            .literals(clause)
            .iter()
            .filter(|literal| self.variables.phase_of(literal.atom()) != literal.polarity())
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::Config,
        db::arena::ClauseRef,
        solver::Solver,
        structures::literal::CLiteral,
    };

    fn solver_with_atoms(count: u32) -> Solver {
        let mut config = Config::default();
        // Keep handles stable: no collection during these tests.
        config.garbage_fraction = f64::MAX;
        let mut solver = Solver::from_config(config);
        for _ in 0..count {
            solver.fresh_atom().unwrap();
        }
        solver
    }

    /// Stores an attached learnt clause with the given LBD.
    fn learn(solver: &mut Solver, literals: &[CLiteral], lbd: u32) -> ClauseRef {
        let clause = solver.arena.alloc(literals, true).unwrap();
        solver.arena.set_lbd(clause, lbd);
        solver.clause_db.push_learnt(clause);
        solver.attach_clause(clause);
        clause
    }

    #[test]
    fn phase_agreement_freezes() {
        let mut solver = solver_with_atoms(6);

        // Initial phases are negative, so positive literals disagree.
        let busy: Vec<CLiteral> = (0..5).map(|atom| CLiteral::new(atom, true)).collect();
        let busy = learn(&mut solver, &busy.clone(), 2);

        let idle: Vec<CLiteral> = (0..3).map(|atom| CLiteral::new(atom, false)).collect();
        let idle = learn(&mut solver, &idle.clone(), 2);

        assert_eq!(solver.clause_psm(busy), 5);
        assert_eq!(solver.clause_psm(idle), 0);

        solver.freeze_analyse();

        // The agreeing clause froze, the disagreeing clause did not.
        assert!(solver.clause_db.learnts[1].state.frozen);
        assert!(solver.watches.unwatched(idle));
        assert!(!solver.clause_db.learnts[0].state.frozen);
        assert!(!solver.watches.unwatched(busy));
        assert_eq!(solver.counters.frozen_clauses, 1);
    }

    #[test]
    fn measure_reversal_thaws() {
        let mut solver = solver_with_atoms(4);

        let literals = vec![
            CLiteral::new(0, false),
            CLiteral::new(1, false),
            CLiteral::new(2, true),
        ];
        let clause = learn(&mut solver, &literals, 2);

        solver.freeze_analyse();
        assert!(solver.clause_db.learnts[0].state.frozen);
        assert!(solver.watches.unwatched(clause));

        // A tighter threshold reverses the measure, thawing the clause.
        solver.config.reduction.psm_threshold = 0;
        solver.freeze_analyse();

        let entry = solver.clause_db.learnts[0];
        assert!(!entry.state.frozen);
        assert_eq!(entry.state.idle_reductions, 1);
        assert!(!solver.watches.unwatched(clause));
        assert_eq!(solver.counters.thawed_clauses, 1);
    }

    #[test]
    fn idle_clauses_are_removed() {
        let mut solver = solver_with_atoms(6);

        let doomed: Vec<CLiteral> = (0..5).map(|atom| CLiteral::new(atom, true)).collect();
        let doomed = learn(&mut solver, &doomed.clone(), 3);

        let protected: Vec<CLiteral> = (1..6).map(|atom| CLiteral::new(atom, true)).collect();
        let protected = learn(&mut solver, &protected.clone(), 2);

        for _ in 0..3 {
            solver.freeze_analyse();
        }

        // Three idle reductions with an LBD of three suffice for removal.
        assert!(solver.arena.is_deleted(doomed));
        assert_eq!(solver.clause_db.learnt_count(), 1);
        assert_eq!(solver.counters.removed_clauses, 1);

        // A low LBD protects a clause regardless of idling.
        assert!(!solver.arena.is_deleted(protected));

        solver.watches.clean_all(&solver.arena);
        assert!(solver.watches.unwatched(doomed));
    }
}
