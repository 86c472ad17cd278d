/*!
Dynamic restarts, keyed on moving averages of LBD and trail size.

# Forcing

A short window of recent learnt-clause LBDs is compared against the global
average: when the window is full and its average, scaled by `k`, exceeds the
global average, recent conflicts are producing unusually poor clauses and a
restart is forced.

# Blocking

A long window of trail sizes guards against restarting out of a deep,
promising valuation: when the trail at a conflict is much larger than the
windowed average the force window is cleared, suppressing the next forced
restart.

See the SAT'09 and IJCAI'09 papers of Audemard and Simon on Glucose for the
scheme and its tuning.
*/

use crate::{config::RestartConfig, generic::bounded_queue::BoundedQueue};

/// Blocking is considered only after this many conflicts.
const BLOCKING_CONFLICT_BOUND: u64 = 10_000;

/// Windowed LBD and trail averages, deciding forced and blocked restarts.
pub struct RestartController {
    /// A window over the LBDs of recent learnt clauses.
    lbd_window: BoundedQueue,

    /// A window over the trail size at recent conflicts.
    trail_window: BoundedQueue,

    /// The sum of the LBDs of all learnt clauses.
    sum_lbd: u64,

    /// The constant used to force a restart.
    k: f64,

    /// The constant used to block a restart.
    r: f64,
}

impl RestartController {
    pub fn new(config: &RestartConfig) -> Self {
        RestartController {
            lbd_window: BoundedQueue::new(config.lbd_window),
            trail_window: BoundedQueue::new(config.trail_window),
            sum_lbd: 0,
            k: config.k,
            r: config.r,
        }
    }

    /// Notes the trail size at a conflict and, after enough conflicts, blocks
    /// the pending restart if the trail is unusually deep.
    ///
    /// Returns true if a restart was blocked.
    pub fn note_conflict(&mut self, trail_size: usize, conflicts: u64) -> bool {
        self.trail_window.push(trail_size as u64);

        if conflicts > BLOCKING_CONFLICT_BOUND
            && self.lbd_window.full()
            && trail_size as f64 > self.r * self.trail_window.avg()
        {
            self.lbd_window.clear();
            return true;
        }
        false
    }

    /// Notes the LBD of a fresh learnt clause.
    pub fn note_learnt(&mut self, lbd: u32) {
        self.lbd_window.push(lbd as u64);
        self.sum_lbd += lbd as u64;
    }

    /// True if the recent LBD window forces a restart.
    ///
    /// On true the window is cleared, arming the next force check afresh.
    pub fn should_restart(&mut self, conflicts: u64) -> bool {
        if self.lbd_window.full()
            && conflicts > 0
            && self.lbd_window.avg() * self.k > self.sum_lbd as f64 / conflicts as f64
        {
            self.lbd_window.clear();
            return true;
        }
        false
    }

    /// Empties both windows, used when a fresh solve begins.
    pub fn reset_windows(&mut self) {
        self.lbd_window.clear();
        self.trail_window.clear();
        self.sum_lbd = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RestartConfig;

    #[test]
    fn force_after_poor_window() {
        let config = RestartConfig {
            lbd_window: 2,
            ..RestartConfig::default()
        };
        let mut controller = RestartController::new(&config);

        // A history of good clauses…
        for _ in 0..100 {
            controller.note_learnt(2);
        }
        assert!(!controller.should_restart(100));

        // …then a window of poor clauses.
        controller.note_learnt(30);
        controller.note_learnt(30);
        assert!(controller.should_restart(102));

        // The force cleared the window.
        assert!(!controller.should_restart(102));
    }
}
