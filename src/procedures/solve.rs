/*!
The solve loop: searches between restarts, under budgets, with assumptions.

# Overview

A solve loops over [search](crate::procedures::search) until an answer is
found, a budget is exhausted, or an interrupt is raised --- budgets and the
interrupt flag are polled at restart boundaries only, as restarts are
frequent and the checks are not free.
Between searches the solver imports clauses published to the
[exchange](crate::exchange) by other workers.

On a satisfiable answer the valuation is copied out as the model; on an
unsatisfiable answer without a conflicting assumption subset the solver is
marked inconsistent, and every further solve reports unsatisfiable at once.

# Example

```rust
# use boreal_sat::solver::Solver;
# use boreal_sat::config::Config;
# use boreal_sat::reports::Report;
# use boreal_sat::structures::literal::CLiteral;
let mut solver = Solver::from_config(Config::default());

let p = solver.fresh_literal().unwrap();
let q = solver.fresh_literal().unwrap();

assert!(solver.add_clause(vec![p, q]).is_ok());
assert!(solver.add_clause(vec![-p, q]).is_ok());

assert_eq!(solver.solve(), Report::Satisfiable);
assert_eq!(solver.model()[q.atom() as usize], Some(true));

// The same formula is unsatisfiable under the assumption -q.
assert_eq!(solver.solve_with(vec![-q]), Report::Unsatisfiable);
assert_eq!(solver.conflict(), &[q]);

// Without assumptions, the formula remains satisfiable.
assert_eq!(solver.solve(), Report::Satisfiable);
```
*/

use rand::{Rng, SeedableRng};

use crate::{reports::Report, solver::GenericSolver, structures::literal::CLiteral};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Determines the satisfiability of the formula in the solver.
    pub fn solve(&mut self) -> Report {
        self.solve_with(Vec::default())
    }

    /// Determines the satisfiability of the formula under `assumptions`,
    /// unless a budget is exhausted or an interrupt is raised.
    ///
    /// Assumptions are applied in the given order, before any free decision.
    /// If the formula is unsatisfiable under the assumptions, a conflicting
    /// subset of the assumptions is [kept](GenericSolver::conflict), negated.
    pub fn solve_with(&mut self, assumptions: Vec<CLiteral>) -> Report {
        self.model.clear();
        self.conflict.clear();

        if !self.consistent {
            return Report::Unsatisfiable;
        }

        self.counters.solves += 1;
        self.assumptions = assumptions;
        self.restarts.reset_windows();
        self.clause_db.reduce_interval = self.config.reduction.first_interval;

        let mut status = Report::Unknown;
        while status == Report::Unknown {
            status = self.search();

            if !self.within_budget() {
                break;
            }

            if status == Report::Unknown {
                // Between restarts: adopt clauses learnt by other workers.
                self.import_clauses();
            }
        }

        match status {
            Report::Satisfiable => {
                self.model = self.variables.valuation().clone();
            }

            Report::Unsatisfiable if self.conflict.is_empty() => {
                self.consistent = false;
            }

            _ => {}
        }

        self.backjump(0);
        self.assumptions.clear();

        status
    }
}
