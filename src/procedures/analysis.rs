/*!
Conflict analysis: from a conflicting clause to an asserting learnt clause.

# Overview

Analysis resolves the conflicting clause against the reasons of its literals,
walking the trail bottom-up, until exactly one literal of the current decision
level remains unresolved --- the first unique implication point.
The negation of that literal heads the learnt clause, and every other literal
of the clause is falsified at some lower level, so after backjumping to the
largest such level the clause asserts its head.

# Minimization

The learnt clause is minimized before use:

- *Deep* minimization removes a literal if the transitive closure of its
  reason, restricted to the levels present in the clause, is absorbed by the
  clause.
  The closure is explored depth-first with an explicit stack, and the
  restriction is a bitmask over level hashes, pruning most failing searches
  at the first step.
- *Basic* minimization removes a literal if every literal of its reason is
  already in the clause or proven at the root level.
- Small, low-LBD clauses take a further pass against the binary watch lists
  of the asserting literal: a true binary implication subsumes the
  falsehood of any clause literal it implies, and such literals are dropped.

# Binary reasons

The first literal of a binary reason must be the satisfied one.
Propagation over binary watches does not normalize positions, so the swap is
made wherever a binary reason is inspected --- here, in redundancy checks,
and in [assumption analysis](GenericSolver::analyze_final).

# LBD

The LBD of the learnt clause is the count of distinct decision levels among
its literals, computed with a monotone stamp over levels, so no clearing pass
is needed.
*/

use rand::{Rng, SeedableRng};

use crate::{
    config::CcminMode,
    db::{arena::ClauseRef, LevelIndex},
    misc::log::targets::{self},
    solver::GenericSolver,
    structures::{clause::CClause, literal::CLiteral},
};

/// Buffers for conflict analysis, kept across conflicts to avoid
/// reallocation.
#[derive(Default)]
pub struct AnalysisBuffers {
    /// Whether an atom has been resolved on, or included in the learnt
    /// clause, during the present analysis.
    seen: Vec<bool>,

    /// Literals whose seen flag is to be cleared when analysis concludes.
    to_clear: Vec<CLiteral>,

    /// The depth-first stack of deep minimization.
    stack: Vec<CLiteral>,

    /// Monotone stamps over levels (for LBD) and atoms (for binary
    /// minimization).
    stamps: Vec<u32>,

    /// The current stamp.
    stamp: u32,

    /// Literals of the conflict level whose reason is learnt, re-bumped when
    /// the learnt clause outranks their reason.
    pending_bumps: Vec<CLiteral>,
}

impl AnalysisBuffers {
    /// Grows the buffers in step with a fresh atom.
    pub fn fresh_atom(&mut self) {
        self.seen.push(false);
        // Stamps are indexed by atom and by level, and there is one more
        // level than there are atoms.
        if self.stamps.is_empty() {
            self.stamps.push(0);
        }
        self.stamps.push(0);
    }

    /// A stamp distinct from every stamp issued before.
    fn fresh_stamp(&mut self) -> u32 {
        self.stamp += 1;
        self.stamp
    }

    /// Clears the seen flags recorded in `to_clear`.
    fn clear_seen(&mut self) {
        let AnalysisBuffers { seen, to_clear, .. } = self;
        for literal in to_clear.drain(..) {
            seen[literal.atom() as usize] = false;
        }
    }
}

/// The result of conflict analysis: an asserting clause, the level to
/// backjump to, and the LBD of the clause.
pub struct Analysis {
    /// The learnt clause, its asserting literal at position zero.
    pub clause: CClause,

    /// The level at which the clause asserts.
    pub backjump_level: LevelIndex,

    /// The LBD of the clause.
    pub lbd: u32,
}

impl<R: Rng + SeedableRng> GenericSolver<R> {
    /// Analyzes the conflict of `conflict`, producing an asserting clause.
    ///
    /// Analysis requires a decision (or assumption) level: at the root level
    /// there is nothing to resolve towards, and the conflict is fundamental.
    pub(crate) fn analyze(&mut self, conflict: ClauseRef) -> Analysis {
        debug_assert!(self.trail.level() > 0, "Analysis at the root level");

        let mut learnt: CClause = Vec::default();
        // Leave room for the asserting literal.
        learnt.push(CLiteral::new(0, false));

        let conflict_level = self.trail.level();
        let mut path_count: usize = 0;
        let mut pivot: Option<CLiteral> = None;
        let mut reason = conflict;
        let mut index = self.trail.len();

        loop {
            // The satisfied literal of a binary reason belongs at position
            // zero.
            if pivot.is_some()
                && self.arena.size(reason) == 2
                && self.variables.literal_value(self.arena.literal(reason, 0)) == Some(false)
            {
                self.arena.swap_literals(reason, 0, 1);
            }

            if self.arena.is_learnt(reason) {
                self.clause_db.bump_activity(&mut self.arena, reason);
            }

            let skip = match pivot {
                None => 0,
                Some(_) => 1,
            };
            for offset in skip..self.arena.size(reason) {
                let literal = self.arena.literal(reason, offset);
                let atom = literal.atom();

                if !self.analysis.seen[atom as usize] && self.variables.level_of(atom) > 0 {
                    self.variables.bump_activity(atom);
                    self.analysis.seen[atom as usize] = true;
                    self.analysis.to_clear.push(literal);

                    if self.variables.level_of(atom) >= conflict_level {
                        path_count += 1;
                        // Candidates for a re-bump, should the learnt clause
                        // outrank their learnt reason.
                        if let Some(literal_reason) = self.variables.reason_of(atom) {
                            if self.arena.is_learnt(literal_reason) {
                                self.analysis.pending_bumps.push(literal);
                            }
                        }
                    } else {
                        learnt.push(literal);
                    }
                }
            }

            // Take the next seen literal down the trail as the pivot.
            loop {
                index -= 1;
                if self.analysis.seen[self.trail.literals()[index].atom() as usize] {
                    break;
                }
            }

            let next = self.trail.literals()[index];
            self.analysis.seen[next.atom() as usize] = false;
            pivot = Some(next);
            path_count -= 1;

            if path_count == 0 {
                learnt[0] = next.negate();
                break;
            }

            reason = self
                .variables
                .reason_of(next.atom())
                .expect("! A resolved literal of the conflict level lacks a reason");
        }

        let uip = learnt[0].negate();

        self.minimize(&mut learnt);
        self.minimize_against_binary(&mut learnt, uip);

        let backjump_level = self.backjump_level_of(&mut learnt);
        let lbd = self.clause_slice_lbd(&learnt);

        self.apply_pending_bumps(lbd);
        self.analysis.clear_seen();

        log::trace!(target: targets::ANALYSIS, "Learnt ({lbd}): {:?}", learnt);

        Analysis {
            clause: learnt,
            backjump_level,
            lbd,
        }
    }

    /// Minimizes the learnt clause per the configured mode.
    fn minimize(&mut self, learnt: &mut CClause) {
        match self.config.minimize.ccmin {
            CcminMode::Off => {}

            CcminMode::Basic => {
                let mut keep = 1;
                for offset in 1..learnt.len() {
                    let literal = learnt[offset];
                    if !self.basic_redundant(literal) {
                        learnt[keep] = literal;
                        keep += 1;
                    }
                }
                learnt.truncate(keep);
            }

            CcminMode::Deep => {
                let mut level_mask: u32 = 0;
                for literal in &learnt[1..] {
                    level_mask |= level_hash(self.variables.level_of(literal.atom()));
                }

                let mut keep = 1;
                for offset in 1..learnt.len() {
                    let literal = learnt[offset];
                    let redundant = self.variables.reason_of(literal.atom()).is_some()
                        && self.deep_redundant(literal, level_mask);
                    if !redundant {
                        learnt[keep] = literal;
                        keep += 1;
                    }
                }
                learnt.truncate(keep);
            }
        }
    }

    /// True if every literal of the reason of `literal` is seen or proven at
    /// the root level.
    fn basic_redundant(&self, literal: CLiteral) -> bool {
        let Some(reason) = self.variables.reason_of(literal.atom()) else {
            return false;
        };

        for offset in 1..self.arena.size(reason) {
            let other = self.arena.literal(reason, offset);
            if !self.analysis.seen[other.atom() as usize]
                && self.variables.level_of(other.atom()) > 0
            {
                return false;
            }
        }
        true
    }

    /// True if the transitive closure of the reason of `literal`, restricted
    /// to the levels of `level_mask`, is absorbed by the learnt clause.
    ///
    /// Every atom newly seen by a successful search keeps its flag, as the
    /// search certifies the atom redundant for the remainder of the analysis.
    fn deep_redundant(&mut self, literal: CLiteral, level_mask: u32) -> bool {
        self.analysis.stack.clear();
        self.analysis.stack.push(literal);
        let rewind_mark = self.analysis.to_clear.len();

        while let Some(top) = self.analysis.stack.pop() {
            let reason = self
                .variables
                .reason_of(top.atom())
                .expect("! Redundancy check without a reason");

            if self.arena.size(reason) == 2
                && self.variables.literal_value(self.arena.literal(reason, 0)) == Some(false)
            {
                self.arena.swap_literals(reason, 0, 1);
            }

            for offset in 1..self.arena.size(reason) {
                let other = self.arena.literal(reason, offset);
                let atom = other.atom();

                if self.analysis.seen[atom as usize] || self.variables.level_of(atom) == 0 {
                    continue;
                }

                let expandable = self.variables.reason_of(atom).is_some()
                    && level_hash(self.variables.level_of(atom)) & level_mask != 0;
                if !expandable {
                    // The literal resists resolution, so nothing on the
                    // stack is redundant: rewind the speculative flags.
                    for cleared in self.analysis.to_clear.split_off(rewind_mark) {
                        self.analysis.seen[cleared.atom() as usize] = false;
                    }
                    return false;
                }

                self.analysis.seen[atom as usize] = true;
                self.analysis.stack.push(other);
                self.analysis.to_clear.push(other);
            }
        }

        true
    }

    /// Drops literals of the learnt clause which are subsumed by a true
    /// binary implication of the asserting literal.
    ///
    /// Applied only to small clauses of low LBD, where the scan over the
    /// binary watch lists is likely to pay off.
    fn minimize_against_binary(&mut self, learnt: &mut CClause, uip: CLiteral) {
        if learnt.len() < 2 || learnt.len() > self.config.minimize.binary_size_bound {
            return;
        }
        if self.clause_slice_lbd(learnt) > self.config.minimize.binary_lbd_bound {
            return;
        }

        let stamp = self.analysis.fresh_stamp();
        for literal in &learnt[1..] {
            self.analysis.stamps[literal.atom() as usize] = stamp;
        }

        // The binary watches of the UIP trail literal hold the clauses of
        // form (learnt[0] ∨ implied).
        let mut dropped = 0;
        let watch_count = self.watches.binary_list(uip).len();
        for watch_index in 0..watch_count {
            let implied = self.watches.binary_list(uip)[watch_index].other;
            if self.analysis.stamps[implied.atom() as usize] == stamp
                && self.variables.literal_value(implied) == Some(true)
            {
                dropped += 1;
                self.analysis.stamps[implied.atom() as usize] = stamp - 1;
            }
        }

        if dropped > 0 {
            // Compact the surviving literals over the subsumed ones.
            let mut tail = learnt.len() - 1;
            let mut offset = 1;
            let keep_bound = learnt.len() - dropped;
            while offset < keep_bound {
                if self.analysis.stamps[learnt[offset].atom() as usize] != stamp {
                    learnt.swap(offset, tail);
                    tail -= 1;
                } else {
                    offset += 1;
                }
            }
            learnt.truncate(keep_bound);
            log::trace!(target: targets::ANALYSIS, "Binary minimization dropped {dropped} literals");
        }
    }

    /// The level to backjump to: the largest level among the non-asserting
    /// literals, whose maximal literal is swapped to position one to be
    /// watched.
    fn backjump_level_of(&self, learnt: &mut CClause) -> LevelIndex {
        if learnt.len() == 1 {
            return 0;
        }

        let mut max_offset = 1;
        for offset in 2..learnt.len() {
            if self.variables.level_of(learnt[offset].atom())
                > self.variables.level_of(learnt[max_offset].atom())
            {
                max_offset = offset;
            }
        }
        learnt.swap(1, max_offset);
        self.variables.level_of(learnt[1].atom())
    }

    /// Re-bumps literals of the conflict level whose learnt reason has a
    /// larger LBD than the fresh clause.
    fn apply_pending_bumps(&mut self, lbd: u32) {
        let pending = std::mem::take(&mut self.analysis.pending_bumps);
        for literal in &pending {
            let reason = self.variables.reason_of(literal.atom());
            if let Some(reason) = reason {
                if self.arena.lbd(reason) < lbd {
                    self.variables.bump_activity(literal.atom());
                }
            }
        }
        self.analysis.pending_bumps = pending;
        self.analysis.pending_bumps.clear();
    }

    /// The count of distinct decision levels among the literals of `clause`.
    pub(crate) fn clause_lbd(&mut self, clause: ClauseRef) -> u32 {
        let stamp = self.analysis.fresh_stamp();
        let mut lbd = 0;
        for offset in 0..self.arena.size(clause) {
            let level = self.variables.level_of(self.arena.literal(clause, offset).atom());
            if self.analysis.stamps[level as usize] != stamp {
                self.analysis.stamps[level as usize] = stamp;
                lbd += 1;
            }
        }
        lbd
    }

    /// The count of distinct decision levels among `literals`.
    pub(crate) fn clause_slice_lbd(&mut self, literals: &[CLiteral]) -> u32 {
        let stamp = self.analysis.fresh_stamp();
        let mut lbd = 0;
        for literal in literals {
            let level = self.variables.level_of(literal.atom());
            if self.analysis.stamps[level as usize] != stamp {
                self.analysis.stamps[level as usize] = stamp;
                lbd += 1;
            }
        }
        lbd
    }

    /// Expresses a conflict with the assumptions in terms of the assumptions:
    /// the returned literals are the negations of the assumption subset which
    /// led to the falsification of `falsified`.
    pub(crate) fn analyze_final(&mut self, falsified: CLiteral) -> Vec<CLiteral> {
        let mut conflict = vec![falsified];

        if self.trail.level() == 0 {
            return conflict;
        }

        self.analysis.seen[falsified.atom() as usize] = true;

        for index in (self.trail.level_start(1)..self.trail.len()).rev() {
            let literal = self.trail.literals()[index];
            let atom = literal.atom();

            if !self.analysis.seen[atom as usize] {
                continue;
            }

            match self.variables.reason_of(atom) {
                None => {
                    debug_assert!(self.variables.level_of(atom) > 0);
                    conflict.push(literal.negate());
                }

                Some(reason) => {
                    // Positions of a binary reason may be unnormalized, so
                    // position zero is included for binary clauses.
                    let skip = match self.arena.size(reason) {
                        2 => 0,
                        _ => 1,
                    };
                    for offset in skip..self.arena.size(reason) {
                        let other = self.arena.literal(reason, offset);
                        if self.variables.level_of(other.atom()) > 0 {
                            self.analysis.seen[other.atom() as usize] = true;
                        }
                    }
                }
            }

            self.analysis.seen[atom as usize] = false;
        }

        self.analysis.seen[falsified.atom() as usize] = false;

        conflict
    }
}

/// A hash of a level into a 32-bit mask, used to prune deep minimization.
fn level_hash(level: LevelIndex) -> u32 {
    1 << (level & 31)
}
