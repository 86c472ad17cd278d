/*!
Boolean constraint propagation, by two watched literals.

# Overview

Propagation takes queued trail literals in turn and examines the clauses
watching for the falsification the literal entails.
Each such clause either finds a replacement watch, is satisfied, asserts its
remaining watched literal, or conflicts with the valuation --- in which case
the conflict is returned for [analysis](crate::procedures::analysis).

Propagation happens in two steps, distinguished by clause length:

- First, with respect to binary clauses.
  A binary watch carries the other literal of its clause, so this step never
  touches the arena, and binary watches are never updated.
- Second, with respect to long clauses, by the standard two-watched-literal
  scan: a satisfied blocker keeps the watch as-is, otherwise the clause is
  normalized so the falsified literal is at position one, a replacement watch
  is sought, and failing that the clause is unit (or conflicting) under
  position zero.

Each step touches only the watch lists of the falsified literal, and a
rewatch is amortized constant per falsified watch.

# Complications

A pointer to the traversed watch list is taken up front, as replacement
watches are pushed onto the lists of *other* literals while the traversal is
in flight.
The replacement is never the falsified literal --- a replacement is, by
construction, unfalsified --- so the traversed list is never the mutated
list, and the pointer remains valid throughout.

# Dynamic LBD refinement

When a learnt clause with an LBD above two becomes unit its LBD is
recomputed from the levels of its current literals.
A strict improvement updates the clause, and a sufficiently small improved
LBD shields the clause from the next reduction.
*/

use rand::{Rng, SeedableRng};

use crate::{
    db::arena::ClauseRef,
    misc::log::targets::{self},
    solver::GenericSolver,
    types::err::{self},
};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Propagates all queued trail literals.
    /// On a conflict, the conflicting clause is returned and the queue is
    /// exhausted.
    ///
    /// The implementation requires a key invariant to be upheld:
    /// <div class="warning">
    /// The literals at positions zero and one of an attached clause are its
    /// watched literals.
    /// </div>
    pub(crate) fn propagate(&mut self) -> Result<(), err::BCPError> {
        use crate::db::watches::LongWatch;

        self.watches.clean_all(&self.arena);
        let mut propagations: u64 = 0;

        while let Some(literal) = self.trail.next_to_propagate() {
            propagations += 1;
            let false_literal = literal.negate();

            // Binary clauses block.
            {
                let watch_count = self.watches.binary_list(literal).len();
                for watch_index in 0..watch_count {
                    let watch = self.watches.binary_list(literal)[watch_index];

                    match self.variables.literal_value(watch.other) {
                        Some(false) => {
                            log::trace!(target: targets::PROPAGATION, "Conflict of {} and {literal} via binary {}", watch.other, watch.clause);
                            self.note_propagations(propagations);
                            self.trail.saturate_cursor();
                            return Err(err::BCPError::Conflict(watch.clause));
                        }

                        None => self.assign(watch.other, Some(watch.clause)),

                        // A repeat implication, as this is binary.
                        Some(true) => {}
                    }
                }
            }

            // Long clauses block.
            {
                // Safety: replacement watches land on the lists of
                // unfalsified literals, never on this list.
                let list = unsafe { &mut *self.watches.long_list_ptr(literal) };

                let mut read = 0;
                let mut keep = 0;
                let length = list.len();

                'long: while read < length {
                    let watch = list[read];

                    // A satisfied blocker witnesses the clause without a visit.
                    if self.variables.literal_value(watch.blocker) == Some(true) {
                        list[keep] = watch;
                        keep += 1;
                        read += 1;
                        continue 'long;
                    }

                    let clause = watch.clause;
                    if self.arena.literal(clause, 0) == false_literal {
                        self.arena.swap_literals(clause, 0, 1);
                    }
                    debug_assert_eq!(self.arena.literal(clause, 1), false_literal);
                    read += 1;

                    let zero = self.arena.literal(clause, 0);
                    let fresh_watch = LongWatch {
                        clause,
                        blocker: zero,
                    };

                    if zero != watch.blocker && self.variables.literal_value(zero) == Some(true) {
                        list[keep] = fresh_watch;
                        keep += 1;
                        continue 'long;
                    }

                    // Look for a replacement watch.
                    for offset in 2..self.arena.size(clause) {
                        if self.variables.literal_value(self.arena.literal(clause, offset))
                            != Some(false)
                        {
                            self.arena.swap_literals(clause, 1, offset);
                            let moved = self.arena.literal(clause, 1);
                            self.watches.push_long(moved.negate(), fresh_watch);
                            continue 'long;
                        }
                    }

                    // No replacement: the clause is unit under position zero.
                    list[keep] = fresh_watch;
                    keep += 1;

                    match self.variables.literal_value(zero) {
                        Some(false) => {
                            // Conflict. Keep the remaining watches before
                            // returning.
                            while read < length {
                                list[keep] = list[read];
                                keep += 1;
                                read += 1;
                            }
                            list.truncate(keep);

                            log::trace!(target: targets::PROPAGATION, "Conflict of {literal} via {clause}");
                            self.note_propagations(propagations);
                            self.trail.saturate_cursor();
                            return Err(err::BCPError::Conflict(clause));
                        }

                        None => {
                            self.assign(zero, Some(clause));
                            self.refine_lbd(clause);
                        }

                        Some(true) => {
                            // Position zero was the blocker, and is satisfied.
                        }
                    }
                }

                list.truncate(keep);
            }
        }

        self.note_propagations(propagations);
        Ok(())
    }

    /// Recomputes the LBD of a learnt clause which became unit, updating the
    /// clause on a strict improvement and shielding it from the next
    /// reduction if the improved LBD is small.
    fn refine_lbd(&mut self, clause: ClauseRef) {
        if !self.arena.is_learnt(clause) || self.arena.lbd(clause) <= 2 {
            return;
        }

        let fresh = self.clause_lbd(clause);
        if fresh < self.arena.lbd(clause) {
            if fresh <= self.config.reduction.lbd_frozen_bound {
                self.arena.set_can_be_deleted(clause, false);
            }
            self.arena.set_lbd(clause, fresh);
        }
    }

    /// Accounts propagation work, against the totals and the simplification
    /// re-entry guard.
    fn note_propagations(&mut self, count: u64) {
        self.counters.propagations += count;
        self.counters.simplify_props -= count as i64;
    }
}
