//! A parallel CDCL SAT solver in the Glucose lineage, with a lock-free
//! learnt-clause exchange across workers and a freeze/thaw learnt database.
//!
//! # Orientation
//!
//! The library is designed around the core structure of a
//! [solver](crate::solver::Solver).
//!
//! Solvers are built from a [configuration](crate::config), clauses are added
//! [programmatically](crate::solver::GenericSolver::add_clause), and a
//! [solve](crate::procedures::solve) determines satisfiability --- outright,
//! or relative to a stack of assumptions.
//!
//! Internally, and at a high level, a solve is viewed in terms of
//! manipulation of, and relationships between, a handful of databases:
//!
//! - A formula is stored in a [clause arena](crate::db::arena), with records
//!   and freeze states in a [clause database](crate::db::learnt).
//! - A valuation is stored in a [variable store](crate::db::variable).
//! - Consequences of the current valuation with respect to the formula are
//!   ordered on a [trail](crate::db::trail), and found through
//!   [watch indices](crate::db::watches).
//!
//! Useful starting points, then, may be:
//!
//! - The high-level [solve procedure](crate::procedures::solve) to inspect
//!   the dynamics of a solve.
//! - The [database module](crate::db) to inspect the data considered during
//!   a solve.
//! - The [configuration](crate::config) to see what features are supported.
//!
//! # Workers
//!
//! A fleet of solvers over one formula shares learnt clauses through a
//! [SharedExchange](crate::exchange::SharedExchange): each worker publishes
//! its good learnt clauses to its own lock-free list, and adopts the
//! publications of every other worker between restarts.
//!
//! ```rust
//! # use std::sync::Arc;
//! # use boreal_sat::config::Config;
//! # use boreal_sat::exchange::SharedExchange;
//! # use boreal_sat::reports::Report;
//! # use boreal_sat::solver::Solver;
//! let workers = 4;
//! let exchange = Arc::new(SharedExchange::new(workers));
//!
//! let mut fleet: Vec<Solver> = (0..workers)
//!     .map(|worker| {
//!         let mut config = Config::default();
//!         config.random_seed += worker as u64;
//!         let mut solver = Solver::from_config(config);
//!         solver.attach_exchange(exchange.clone(), worker);
//!         solver
//!     })
//!     .collect();
//!
//! // Clauses for p ∨ q, ¬p ∨ q on every worker.
//! for solver in fleet.iter_mut() {
//!     let p = solver.fresh_literal().unwrap();
//!     let q = solver.fresh_literal().unwrap();
//!     assert!(solver.add_clause(vec![p, q]).is_ok());
//!     assert!(solver.add_clause(vec![-p, q]).is_ok());
//! }
//!
//! let reports = std::thread::scope(|scope| {
//!     let handles: Vec<_> = fleet
//!         .iter_mut()
//!         .map(|solver| scope.spawn(move || solver.solve()))
//!         .collect();
//!     handles.into_iter().map(|h| h.join().unwrap()).collect::<Vec<_>>()
//! });
//!
//! assert!(reports.iter().all(|report| *report == Report::Satisfiable));
//! ```
//!
//! # Logs
//!
//! To help diagnose issues, (somewhat) detailed calls to [log!](log) are
//! made, and a variety of [targets](crate::misc::log::targets) are defined
//! in order to help narrow output to relevant parts of the library.
//! No logger implementation is supplied.

pub mod builder;
pub mod procedures;

pub mod config;
pub mod solver;
pub mod structures;
pub mod types;

pub mod generic;

pub mod db;
pub mod exchange;

pub mod misc;
pub mod reports;
