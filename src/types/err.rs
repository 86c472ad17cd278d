/*!
Error types used in the library.

- Some of these are internally expected --- e.g. BCP errors are used to
  control the flow of a solve, as a conflict is a learning opportunity.
- Others are external --- e.g. a solver returns a `RootUnsatisfiable` error
  from adding a clause which contradicts the formula at the root level.
  In this case information about satisfiability is obtained and the solver
  may continue to be used for further queries (all of which report
  unsatisfiable).
- Invariant violations (corrupt watch lists, dangling arena handles) are not
  represented here: those are bugs, checked by debug assertions, and fatal.
*/

use crate::db::arena::ClauseRef;

/// A union of varied error kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error during conflict analysis.
    Analysis(AnalysisError),

    /// An error when building a formula.
    Build(BuildError),

    /// An error related to BCP.
    BCP(BCPError),

    /// An error in the clause database.
    ClauseDB(ClauseDBError),

    /// The attempted action could not be completed given the state of the solver.
    InvalidState(StateError),
}

/// Noted errors during boolean constraint propagation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BCPError {
    /// A conflict was found.
    /// This is expected from time to time, and a learning opportunity.
    Conflict(ClauseRef),
}

impl From<BCPError> for ErrorKind {
    fn from(e: BCPError) -> Self {
        ErrorKind::BCP(e)
    }
}

/// Noted errors when building a formula.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// A clear instance of an unsatisfiable clause, e.g. an empty clause, or
    /// a root-level conflict from propagating a unit clause.
    Unsatisfiable,

    /// There are no more fresh atoms.
    AtomsExhausted,

    /// A clause was added after some decision had been made.
    DecisionsMade,
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// An error during conflict analysis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnalysisError {
    /// Analysis was called at the root level, where no asserting clause exists.
    RootLevel,

    /// The trail was exhausted without finding a unique implication point.
    Exhausted,
}

impl From<AnalysisError> for ErrorKind {
    fn from(e: AnalysisError) -> Self {
        ErrorKind::Analysis(e)
    }
}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseDBError {
    /// Some attempt was made to store an empty clause.
    EmptyClause,

    /// Some attempt was made to store a unit clause.
    /// Unit clauses are never stored; they are enqueued at the root level.
    UnitClause,

    /// All possible arena handles have been used.
    StorageExhausted,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

/// Errors due to the state of the solver.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StateError {
    /// The solver is in an unsatisfiable state, and the action requires a
    /// consistent formula.
    RootUnsatisfiable,
}

impl From<StateError> for ErrorKind {
    fn from(e: StateError) -> Self {
        ErrorKind::InvalidState(e)
    }
}
