/*!
High-level reports on the state of a solve.

A solve is tri-valued: a formula is found satisfiable, found unsatisfiable, or
the solve ended without an answer (a budget was exhausted, or an interrupt was
raised).
*/

/// A report on the satisfiability of the formula in a solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    /// The formula is satisfiable, with a model held by the solver.
    Satisfiable,

    /// The formula is unsatisfiable.
    ///
    /// If assumptions were made, unsatisfiability is relative to the
    /// assumptions, and a conflicting subset of the assumptions is held by
    /// the solver.
    Unsatisfiable,

    /// No conclusion was reached.
    ///
    /// The solver remains usable, and a further solve resumes where this one
    /// stopped.
    Unknown,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
