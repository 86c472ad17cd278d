/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library
and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].

For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
- Logs related to reduction and freezing can be filtered with `RUST_LOG=reduction …` or,
- Logs of exchanged clauses can be found with `RUST_LOG=exchange=debug …`
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    pub const ANALYSIS: &str = "analysis";
    pub const ARENA: &str = "arena";
    pub const BACKJUMP: &str = "backjump";
    pub const CLAUSE_DB: &str = "clause_db";
    pub const EXCHANGE: &str = "exchange";
    pub const PROPAGATION: &str = "propagation";
    pub const REDUCTION: &str = "reduction";
    pub const RESTART: &str = "restart";
    pub const SIMPLIFY: &str = "simplify";
    pub const VALUATION: &str = "valuation";
}
