/*!
Backjumping: reverting the valuation to an earlier decision level.

Assignments above the target level are cleared in reverse trail order, their
phases saved per the configured phase-saving mode, and their atoms restored
to the activity heap.
The propagation cursor is rewound to the end of the target level, so any
literals queued above the target are forgotten along with their level.
*/

use rand::{Rng, SeedableRng};

use crate::{
    config::PhaseSaving,
    db::LevelIndex,
    misc::log::targets::{self},
    solver::GenericSolver,
};

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Reverts to the state at the given level, keeping all assignments at
    /// the level but none beyond.
    pub(crate) fn backjump(&mut self, level: LevelIndex) {
        if self.trail.level() <= level {
            return;
        }
        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {level}", self.trail.level());

        // Positions strictly after the top start saw the top decision.
        let top_start = self.trail.level_start(self.trail.level());
        let kept = self.trail.level_start(level + 1);

        let cleared = self.trail.clear_above(level);
        for (offset, literal) in cleared.iter().enumerate() {
            let save = match self.config.decisions.phase_saving {
                PhaseSaving::Full => Some(literal.polarity()),
                PhaseSaving::Limited if kept + offset > top_start => Some(literal.polarity()),
                _ => None,
            };
            self.variables.clear_value(literal.atom(), save);
        }
    }
}
