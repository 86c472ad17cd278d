/*!
The clause database: original and learnt clause records, freeze states, and
the reduction schedule.

# Freeze states

A learnt clause is either attached --- watched, and so a participant in
propagation --- or *frozen*: detached from the watch indices but retained in
the database, with its handle and metadata intact.
Freezing trades propagation cost against the cost of relearning: a frozen
clause sits out rounds in which the saved phases suggest it is unlikely to
prune the search, and is thawed (re-attached) when the suggestion reverses.

Each learnt record embeds its [FreezeState], so the clause vector and the
freeze vector cannot fall out of lockstep during compaction.

# Reduction schedule

Reductions run on a conflict budget: the `n`th reduction happens once the
conflict total passes `n` times the current interval, and the interval grows
with each reduction.
*/

use crate::{
    config::Config,
    db::arena::{ClauseArena, ClauseRef},
};

/// The bound at which clause activities are rescaled towards zero.
const RESCALE_BOUND: f32 = 1e20;

/// The propagation status of a learnt clause, with an idle count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FreezeState {
    /// True if the clause is detached from the watch indices.
    pub frozen: bool,

    /// A count of reductions the clause has sat through without
    /// distinguishing itself.
    pub idle_reductions: u32,
}

/// The record of a learnt clause: its handle, and its freeze state.
#[derive(Clone, Copy, Debug)]
pub struct LearntEntry {
    /// The handle of the clause.
    pub clause: ClauseRef,

    /// The freeze state of the clause.
    pub state: FreezeState,
}

impl LearntEntry {
    /// A fresh record: attached, with no idle reductions.
    pub fn fresh(clause: ClauseRef) -> Self {
        LearntEntry {
            clause,
            state: FreezeState::default(),
        }
    }
}

/// Original and learnt clause records, with the reduction schedule.
pub struct ClauseDB {
    /// Handles of the original clauses.
    pub(crate) originals: Vec<ClauseRef>,

    /// Records of the learnt clauses, frozen or attached.
    pub(crate) learnts: Vec<LearntEntry>,

    /// The current clause activity bump.
    bump: f32,

    /// The inverse decay applied to the bump after each conflict.
    decay: f32,

    /// The conflict interval between reductions.
    pub(crate) reduce_interval: u64,

    /// The multiplier for the next reduction trigger.
    pub(crate) reduce_multiple: u64,
}

impl ClauseDB {
    pub fn new(config: &Config) -> Self {
        ClauseDB {
            originals: Vec::default(),
            learnts: Vec::default(),
            bump: 1.0,
            decay: 1.0 / config.activity.clause_decay as f32,
            reduce_interval: config.reduction.first_interval,
            reduce_multiple: 1,
        }
    }

    /// A count of original clauses.
    pub fn original_count(&self) -> usize {
        self.originals.len()
    }

    /// A count of learnt clauses, frozen or attached.
    pub fn learnt_count(&self) -> usize {
        self.learnts.len()
    }

    /// Records an original clause.
    pub fn push_original(&mut self, clause: ClauseRef) {
        self.originals.push(clause);
    }

    /// Records a learnt clause, with a fresh freeze state.
    pub fn push_learnt(&mut self, clause: ClauseRef) {
        self.learnts.push(LearntEntry::fresh(clause));
    }

    /// True if a reduction is due at the given conflict total.
    pub fn reduction_due(&self, conflicts: u64) -> bool {
        conflicts >= self.reduce_multiple * self.reduce_interval
    }

    /// Advances the reduction schedule past the given conflict total.
    pub fn note_reduction(&mut self, conflicts: u64, interval_inc: u64) {
        self.reduce_multiple = conflicts / self.reduce_interval + 1;
        self.reduce_interval += interval_inc;
    }

    /// Bumps the activity of a learnt clause, rescaling all learnt activities
    /// if the bump would overflow the activity bound.
    pub fn bump_activity(&mut self, arena: &mut ClauseArena, clause: ClauseRef) {
        let bumped = arena.activity(clause) + self.bump;
        arena.set_activity(clause, bumped);

        if bumped > RESCALE_BOUND {
            let factor = 1.0 / RESCALE_BOUND;
            for entry in &self.learnts {
                let activity = arena.activity(entry.clause);
                arena.set_activity(entry.clause, activity * factor);
            }
            self.bump *= factor;
        }
    }

    /// Inflates the clause activity bump, so earlier bumps decay relative to
    /// later bumps.
    pub fn decay_activity(&mut self) {
        self.bump *= self.decay;
    }
}
