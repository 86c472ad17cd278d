/*!
The search loop: propagate, analyze, backjump, decide, until a restart or an
answer.

# Overview

Search alternates propagation with conflict handling or decision making:

- A conflict at the root level settles unsatisfiability.
  Any other conflict is [analyzed](crate::procedures::analysis) into an
  asserting clause; the solver [backjumps](crate::procedures::backjump) to
  the asserting level, records the clause, and queues the asserted literal.
- Saturated propagation first checks the restart trigger, then --- at the
  root level --- [simplifies](crate::procedures::simplify), then runs any due
  [reduction](crate::procedures::reduction), then applies pending
  assumptions, and finally extends the valuation with a
  [decision](crate::procedures::decision).
  If no decision-eligible atom is unvalued the valuation is a model.

A forced restart leaves the loop with [Report::Unknown]; the
[solve](crate::procedures::solve) loop re-enters after importing any clauses
published by other workers.

# Assumptions

Assumptions occupy the lowest decision levels, one level each, applied in
order before any free decision.
A falsified assumption ends the solve: the conflicting subset of the
assumptions is derived by [analyze_final](GenericSolver::analyze_final) and
stored for the caller.
*/

use rand::{Rng, SeedableRng};

use crate::{
    misc::log::targets::{self},
    reports::Report,
    solver::GenericSolver,
    types::err::{self},
};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Searches for a model or a contradiction, until either is found or a
    /// restart is forced.
    pub(crate) fn search(&mut self) -> Report {
        debug_assert!(self.consistent);

        loop {
            match self.propagate() {
                Err(err::BCPError::Conflict(conflict)) => {
                    self.counters.conflicts += 1;

                    if self.counters.conflicts % 10_000 == 0 {
                        log::info!(
                            "{} conflicts, {} restarts, {} learnts",
                            self.counters.conflicts,
                            self.counters.restarts,
                            self.clause_db.learnt_count(),
                        );
                    }

                    if self.trail.level() == 0 {
                        self.consistent = false;
                        return Report::Unsatisfiable;
                    }

                    if self
                        .restarts
                        .note_conflict(self.trail.len(), self.counters.conflicts)
                    {
                        self.counters.blocked_restarts += 1;
                        log::trace!(target: targets::RESTART, "Restart blocked by the trail window");
                    }

                    let analysis = self.analyze(conflict);
                    self.restarts.note_learnt(analysis.lbd);

                    self.backjump(analysis.backjump_level);

                    match analysis.clause.len() {
                        1 => {
                            self.assign(analysis.clause[0], None);
                            self.counters.learnt_units += 1;
                        }

                        _ => {
                            let learnt = self
                                .arena
                                .alloc(&analysis.clause, true)
                                .expect("! Arena exhausted while learning");
                            self.arena.set_lbd(learnt, analysis.lbd);

                            if analysis.lbd <= 2 {
                                self.counters.learnt_lbd2 += 1;
                            }
                            if analysis.clause.len() == 2 {
                                self.counters.learnt_binaries += 1;
                            }

                            self.clause_db.push_learnt(learnt);
                            self.attach_clause(learnt);
                            self.clause_db.bump_activity(&mut self.arena, learnt);
                            self.assign(analysis.clause[0], Some(learnt));
                        }
                    }

                    self.export_clause(&analysis.clause, analysis.lbd);

                    self.variables.decay_activity();
                    self.clause_db.decay_activity();
                }

                Ok(()) => {
                    // The dynamic restart, on the windowed LBD average.
                    if self.restarts.should_restart(self.counters.conflicts) {
                        self.counters.restarts += 1;
                        log::trace!(target: targets::RESTART, "Restart {}", self.counters.restarts);
                        self.backjump(0);
                        return Report::Unknown;
                    }

                    // Simplify the problem clauses against root assignments.
                    if self.trail.level() == 0 && !self.simplify() {
                        return Report::Unsatisfiable;
                    }

                    // Learnt database reduction.
                    if self.clause_db.learnt_count() > 0
                        && self.clause_db.reduction_due(self.counters.conflicts)
                    {
                        self.reduce_db();
                    }

                    // Apply pending assumptions, then decide.
                    let mut next = None;
                    while (self.trail.level() as usize) < self.assumptions.len() {
                        let assumption = self.assumptions[self.trail.level() as usize];

                        match self.variables.literal_value(assumption) {
                            Some(true) => {
                                // Already satisfied: a dummy level keeps the
                                // level-to-assumption correspondence.
                                self.trail.new_level();
                            }

                            Some(false) => {
                                self.conflict = self.analyze_final(assumption.negate());
                                return Report::Unsatisfiable;
                            }

                            None => {
                                next = Some(assumption);
                                break;
                            }
                        }
                    }

                    let decision = match next {
                        Some(assumption) => assumption,
                        None => {
                            self.counters.decisions += 1;
                            match self.pick_branch_literal() {
                                Some(decision) => decision,
                                None => return Report::Satisfiable,
                            }
                        }
                    };

                    log::trace!("Decision {decision} at level {}", self.trail.level() + 1);
                    self.trail.new_level();
                    self.assign(decision, None);
                }
            }
        }
    }
}
