/*!
Sharing of learnt clauses through the exchange.

A solver bound to an [exchange](crate::exchange) publishes its good learnt
clauses as they are learnt, and imports the publications of every other
worker between restarts.

An imported clause crosses threads as a raw literal sequence: the consumer
re-allocates it in its own arena as a learnt clause with the published LBD,
attaches it, and hands it a fresh freeze record.
An imported unit is enqueued directly, when its atom is unvalued.
Imports happen at the root level, so an enqueued unit is proven.
*/

use rand::{Rng, SeedableRng};

use crate::{misc::log::targets::{self}, solver::GenericSolver, structures::literal::CLiteral};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Publishes a learnt clause to the other workers, if the solver is bound
    /// to an exchange and the LBD of the clause is within the export bound.
    ///
    /// When the publisher's own reduction is due, the head of its list is
    /// cleaned in passing.
    pub(crate) fn export_clause(&mut self, literals: &[CLiteral], lbd: u32) {
        if lbd > self.config.exchange.export_lbd_bound {
            return;
        }

        let clean = self.clause_db.reduction_due(self.counters.conflicts);

        if let Some(handle) = &self.exchange {
            handle.shared.publish(handle.worker, literals, lbd, clean);
            self.counters.exported_clauses += 1;
        }
    }

    /// Imports every clause published by other workers since the last import.
    ///
    /// Driven by [solve](crate::procedures::solve) between restarts, at the
    /// root level; public for drivers which schedule imports explicitly.
    pub fn import_clauses(&mut self) {
        let (shared, worker) = match &self.exchange {
            Some(handle) => (handle.shared.clone(), handle.worker),
            None => return,
        };

        debug_assert_eq!(self.trail.level(), 0);
        let mut imported: u64 = 0;

        shared.consume(worker, |literals, lbd| {
            match literals.len() {
                1 => {
                    if self.variables.literal_value(literals[0]).is_none() {
                        self.assign(literals[0], None);
                    }
                }

                _ => {
                    let Ok(stored) = self.arena.alloc(literals, true) else {
                        return;
                    };
                    self.arena.set_lbd(stored, lbd);
                    self.clause_db.push_learnt(stored);
                    self.attach_clause(stored);
                    self.clause_db.bump_activity(&mut self.arena, stored);
                }
            }

            self.variables.decay_activity();
            self.clause_db.decay_activity();
            imported += 1;
        });

        if imported > 0 {
            log::debug!(target: targets::EXCHANGE, "Worker {worker} imported {imported} clauses");
            self.counters.imported_clauses += imported;
        }
    }
}
