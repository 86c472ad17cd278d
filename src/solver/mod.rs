/*!
The solver: a composition of the databases, the procedures, and a source of
randomness.

# Orientation

A solver owns:
- A [clause arena](crate::db::arena), its [watch index](crate::db::watches),
  a [variable store](crate::db::variable), a [trail](crate::db::trail), and a
  [clause database](crate::db::learnt).
- A [restart controller](restarts) and [analysis buffers](crate::procedures::analysis).
- Optionally, a handle to a [shared exchange](crate::exchange), through which
  a fleet of solvers trades learnt clauses.

The algorithms over these are given in the [procedures](crate::procedures)
module, as methods on the solver.

# Worker isolation

Every structure other than the exchange is owned by the solver, and a solver
never observes another solver's internal state.
A fleet is built by handing each solver a clone of one `Arc<SharedExchange>`
and a distinct worker index; the solvers may then be moved to one thread
each.

# Randomness

The solver is generic over its source of randomness, fixed by the [Solver]
alias to a seedable generator so a single-worker solve replays bit-identically
from its configured seed.
*/

mod counters;
pub mod restarts;

pub use counters::Counters;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use rand::{Rng, SeedableRng};

use crate::{
    config::Config,
    db::{
        arena::ClauseArena, learnt::ClauseDB, trail::Trail, variable::VariableStore,
        watches::WatchIndex,
    },
    exchange::SharedExchange,
    procedures::analysis::AnalysisBuffers,
    solver::restarts::RestartController,
    structures::{atom::Atom, literal::CLiteral, valuation::VValuation},
};

/// A handle binding a solver, as a worker, to a shared exchange.
pub struct ExchangeHandle {
    /// The exchange shared by the fleet.
    pub shared: Arc<SharedExchange>,

    /// The index of this worker within the fleet.
    pub worker: usize,
}

/// A CDCL solver, generic over its source of randomness.
pub struct GenericSolver<R: Rng + SeedableRng> {
    /// The configuration of the solver.
    pub config: Config,

    /// Packed clause storage.
    pub(crate) arena: ClauseArena,

    /// Per-atom assignment data, activity, and phases.
    pub(crate) variables: VariableStore,

    /// Per-literal watch lists.
    pub(crate) watches: WatchIndex,

    /// The assignment history.
    pub(crate) trail: Trail,

    /// Original and learnt clause records, with freeze states.
    pub(crate) clause_db: ClauseDB,

    /// Windowed restart control.
    pub(crate) restarts: RestartController,

    /// Buffers for conflict analysis, kept across conflicts.
    pub(crate) analysis: AnalysisBuffers,

    /// Counters over the history of the solve.
    pub(crate) counters: Counters,

    /// The exchange handle, for a solver in a fleet.
    pub(crate) exchange: Option<ExchangeHandle>,

    /// The assumptions of the present solve.
    pub(crate) assumptions: Vec<CLiteral>,

    /// On an unsatisfiable solve under assumptions, a conflicting subset of
    /// the assumptions.
    pub(crate) conflict: Vec<CLiteral>,

    /// The valuation of the most recent satisfiable solve.
    pub(crate) model: VValuation,

    /// False if the formula is unsatisfiable at the root level.
    pub(crate) consistent: bool,

    /// A bound on conflicts for the present solve, if any.
    pub(crate) conflict_budget: Option<u64>,

    /// A bound on propagations for the present solve, if any.
    pub(crate) propagation_budget: Option<u64>,

    /// An interrupt flag, polled at restart boundaries.
    interrupt: Arc<AtomicBool>,

    /// The source of randomness of the solver.
    pub(crate) rng: R,
}

/// The solver, with the canonical source of randomness.
pub type Solver = GenericSolver<rand_xoshiro::Xoshiro256PlusPlus>;

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// A fresh solver, configured by `config`.
    pub fn from_config(config: Config) -> Self {
        let rng = R::seed_from_u64(config.random_seed);
        GenericSolver {
            arena: ClauseArena::default(),
            variables: VariableStore::new(&config),
            watches: WatchIndex::default(),
            trail: Trail::default(),
            clause_db: ClauseDB::new(&config),
            restarts: RestartController::new(&config.restarts),
            analysis: AnalysisBuffers::default(),
            counters: Counters::default(),
            exchange: None,
            assumptions: Vec::default(),
            conflict: Vec::default(),
            model: Vec::default(),
            consistent: true,
            conflict_budget: None,
            propagation_budget: None,
            interrupt: Arc::default(),
            rng,
            config,
        }
    }

    /// Binds the solver to `exchange` as worker `worker`.
    ///
    /// Worker indices within a fleet are distinct, and every index below the
    /// worker count of the exchange is taken by exactly one solver.
    pub fn attach_exchange(&mut self, exchange: Arc<SharedExchange>, worker: usize) {
        debug_assert!(worker < exchange.workers());
        self.exchange = Some(ExchangeHandle {
            shared: exchange,
            worker,
        });
    }

    /// True if no root-level contradiction has been found.
    pub fn consistent(&self) -> bool {
        self.consistent
    }

    /// The value of `atom` on the current valuation, if any.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.variables.value_of(atom)
    }

    /// A count of atoms in the solver.
    pub fn atom_count(&self) -> usize {
        self.variables.count()
    }

    /// The model of the most recent satisfiable solve.
    ///
    /// Every atom of the solver indexes the model; an atom may lack a value
    /// if it was not eligible for decision.
    pub fn model(&self) -> &VValuation {
        &self.model
    }

    /// On an unsatisfiable solve under assumptions, a conflicting subset of
    /// the assumptions, negated.
    pub fn conflict(&self) -> &[CLiteral] {
        &self.conflict
    }

    /// Counters over the history of the solve.
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Bounds the conflicts of the next solve; `None` removes the bound.
    pub fn set_conflict_budget(&mut self, budget: Option<u64>) {
        self.conflict_budget = budget.map(|bound| self.counters.conflicts + bound);
    }

    /// Bounds the propagations of the next solve; `None` removes the bound.
    pub fn set_propagation_budget(&mut self, budget: Option<u64>) {
        self.propagation_budget = budget.map(|bound| self.counters.propagations + bound);
    }

    /// A handle to the interrupt flag of the solver.
    ///
    /// Setting the flag ends the present solve with
    /// [Report::Unknown](crate::reports::Report::Unknown) at the next restart
    /// boundary; the solver remains usable.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        self.interrupt.clone()
    }

    /// True if the solve is within its budgets and no interrupt is raised.
    pub(crate) fn within_budget(&self) -> bool {
        if self.interrupt.load(Ordering::Relaxed) {
            return false;
        }
        if let Some(bound) = self.conflict_budget {
            if self.counters.conflicts >= bound {
                return false;
            }
        }
        if let Some(bound) = self.propagation_budget {
            if self.counters.propagations >= bound {
                return false;
            }
        }
        true
    }

    /// An estimate of the progress of the search, as the fraction of the
    /// valuation fixed, weighted exponentially by decision level.
    pub fn progress_estimate(&self) -> f64 {
        let atoms = self.variables.count();
        if atoms == 0 {
            return 1.0;
        }
        let factor = 1.0 / atoms as f64;

        let mut progress = 0.0;
        for level in 0..=self.trail.level() {
            let begin = self.trail.level_start(level);
            let end = match level == self.trail.level() {
                true => self.trail.len(),
                false => self.trail.level_start(level + 1),
            };
            progress += factor.powi(level as i32) * (end - begin) as f64;
        }

        progress * factor
    }
}
