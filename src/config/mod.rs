/*!
Configuration of a solver.

All configuration is held in a [Config] record, threaded through the solver
constructor.
There is no process-wide mutable state: two solvers with different
configurations coexist in a single process, as required to run a fleet of
differently-tuned workers.

Defaults follow the Glucose lineage, and are tuned to work well together.
*/

/// Controls conflict-clause minimization during analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CcminMode {
    /// No minimization.
    Off,

    /// Remove a literal if every literal of its reason is seen or proven.
    Basic,

    /// Remove a literal if the transitive closure of its reason is absorbed
    /// by the learnt clause, checked by a depth-first search.
    Deep,
}

/// Controls how much of the valuation is saved as phases on backtracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseSaving {
    /// No phases are saved.
    Off,

    /// Only phases from the top decision level are saved.
    Limited,

    /// All cleared phases are saved.
    Full,
}

/// Configuration of dynamic restarts.
#[derive(Clone, Debug)]
pub struct RestartConfig {
    /// The constant used to force a restart: a restart is forced when the
    /// windowed LBD average exceeds `k` times the global LBD average.
    pub k: f64,

    /// The constant used to block a restart: the force window is cleared when
    /// the trail exceeds `r` times the windowed trail average.
    pub r: f64,

    /// The size of the moving average window for LBDs (forcing restarts).
    pub lbd_window: usize,

    /// The size of the moving average window for the trail (blocking restarts).
    pub trail_window: usize,
}

impl Default for RestartConfig {
    fn default() -> Self {
        RestartConfig {
            k: 0.8,
            r: 1.4,
            lbd_window: 50,
            trail_window: 5000,
        }
    }
}

/// Configuration of learnt-database reduction and the freeze/thaw policy.
#[derive(Clone, Debug)]
pub struct ReductionConfig {
    /// The number of conflicts before the first reduction.
    pub first_interval: u64,

    /// The increment to the reduction interval applied after each reduction.
    pub interval_inc: u64,

    /// The bonus increment applied when the learnt database holds many
    /// low-LBD clauses.
    pub special_interval_inc: u64,

    /// Protect a clause from deletion for one round if its LBD decreases
    /// during propagation and the new LBD is at most this bound.
    pub lbd_frozen_bound: u32,

    /// Freeze a learnt clause when its polarity-saving measure is at most
    /// this threshold.
    pub psm_threshold: u32,

    /// The count of reductions a clause may idle through before deletion.
    pub idle_bound: u32,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        ReductionConfig {
            first_interval: 4000,
            interval_inc: 300,
            special_interval_inc: 1000,
            lbd_frozen_bound: 30,
            psm_threshold: 3,
            idle_bound: 3,
        }
    }
}

/// Configuration of conflict-clause minimization.
#[derive(Clone, Debug)]
pub struct MinimizeConfig {
    /// Which minimization to apply to the learnt clause.
    pub ccmin: CcminMode,

    /// The maximum size of a learnt clause for binary-clause minimization.
    pub binary_size_bound: usize,

    /// The maximum LBD of a learnt clause for binary-clause minimization.
    pub binary_lbd_bound: u32,
}

impl Default for MinimizeConfig {
    fn default() -> Self {
        MinimizeConfig {
            ccmin: CcminMode::Deep,
            binary_size_bound: 30,
            binary_lbd_bound: 6,
        }
    }
}

/// Configuration of decisions.
#[derive(Clone, Debug)]
pub struct DecisionConfig {
    /// The frequency with which a decision atom is chosen at random rather
    /// than by activity.
    pub random_frequency: f64,

    /// Choose the polarity of a decision at random, rather than by the saved
    /// phase.
    pub random_polarity: bool,

    /// How much of the valuation is saved as phases on backtracking.
    pub phase_saving: PhaseSaving,

    /// Randomize the initial activity of fresh atoms.
    pub random_initial_activity: bool,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        DecisionConfig {
            random_frequency: 0.0,
            random_polarity: false,
            phase_saving: PhaseSaving::Full,
            random_initial_activity: false,
        }
    }
}

/// Configuration of activity bumps and decays.
#[derive(Clone, Debug)]
pub struct ActivityConfig {
    /// The atom activity decay factor.
    pub atom_decay: f64,

    /// The clause activity decay factor.
    pub clause_decay: f64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        ActivityConfig {
            atom_decay: 0.95,
            clause_decay: 0.999,
        }
    }
}

/// Configuration of the shared clause exchange.
#[derive(Clone, Debug)]
pub struct ExchangeConfig {
    /// Publish a learnt clause to other workers only if its LBD is at most
    /// this bound.
    pub export_lbd_bound: u32,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        ExchangeConfig {
            export_lbd_bound: 8,
        }
    }
}

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// Configuration of dynamic restarts.
    pub restarts: RestartConfig,

    /// Configuration of reduction and the freeze/thaw policy.
    pub reduction: ReductionConfig,

    /// Configuration of conflict-clause minimization.
    pub minimize: MinimizeConfig,

    /// Configuration of decisions.
    pub decisions: DecisionConfig,

    /// Configuration of activity bumps and decays.
    pub activity: ActivityConfig,

    /// Configuration of the shared clause exchange.
    pub exchange: ExchangeConfig,

    /// The seed for the random source of the solver.
    pub random_seed: u64,

    /// The fraction of wasted arena storage which triggers a garbage
    /// collection.
    pub garbage_fraction: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            restarts: RestartConfig::default(),
            reduction: ReductionConfig::default(),
            minimize: MinimizeConfig::default(),
            decisions: DecisionConfig::default(),
            activity: ActivityConfig::default(),
            exchange: ExchangeConfig::default(),
            random_seed: 91648253,
            garbage_fraction: 0.2,
        }
    }
}
