/*!
Counters over the history of a solve.

Most counters are statistics, surfaced through periodic log lines.
A handful drive the solve itself: the conflict total schedules reductions and
the global LBD average, and the propagation total meters budgets and the
re-entry guard of simplification.
*/

/// Counters over the history of a solve.
#[derive(Default)]
pub struct Counters {
    /// A count of conflicts, total.
    pub conflicts: u64,

    /// A count of decisions made.
    pub decisions: u64,

    /// A count of decisions whose atom was chosen at random.
    pub random_decisions: u64,

    /// A count of literals propagated.
    pub propagations: u64,

    /// A count of restarts.
    pub restarts: u64,

    /// A count of restarts blocked by the trail window.
    pub blocked_restarts: u64,

    /// A count of learnt-database reductions.
    pub reductions: u64,

    /// A count of learnt clauses removed by reduction.
    pub removed_clauses: u64,

    /// A count of freeze transitions.
    pub frozen_clauses: u64,

    /// A count of thaw transitions.
    pub thawed_clauses: u64,

    /// A count of learnt unit clauses.
    pub learnt_units: u64,

    /// A count of learnt binary clauses.
    pub learnt_binaries: u64,

    /// A count of learnt clauses with an LBD of at most two.
    pub learnt_lbd2: u64,

    /// A count of clauses imported through the exchange.
    pub imported_clauses: u64,

    /// A count of clauses published to the exchange.
    pub exported_clauses: u64,

    /// A count of calls to solve.
    pub solves: u64,

    /// A count of literals in attached original clauses.
    pub original_literals: usize,

    /// A count of literals in attached learnt clauses.
    pub learnt_literals: usize,

    /// The trail length at the most recent simplification, if any.
    pub last_simplify_assigns: Option<usize>,

    /// Propagation work to perform before simplification is worthwhile again.
    pub simplify_props: i64,
}
