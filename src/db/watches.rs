/*!
Per-literal indices of the clauses watching a literal.

# Theory

BCP rests on the observation that a clause asserts a literal exactly when
every *other* literal of the clause conflicts with the background valuation.
Watching two literals of each clause suffices to notice every such clause:
so long as both watched literals are unfalsified nothing in the clause is
forced, and when one is falsified either a replacement watch is found or the
clause is asserting (or conflicting).

# Implementation

Two indices are kept, keyed by literal:

- Binary clauses. The watch stores the *other* literal of the clause, so
  propagation over a binary clause never touches the arena, and the watches
  of a binary clause are never updated.
- Long clauses (size ≥ 3). The watch stores the handle together with a
  *blocker* --- a cached literal of the clause used to short-circuit the
  "clause already satisfied" check without touching arena memory.

A clause is attached when the watches for its position-0 and position-1
literals are present, keyed by the *negation* of each watched literal: the
index is consulted when a literal is assigned, for the clauses in which that
assignment is a falsification.

Detachment is strict (scan and remove) or lazy ([smudge](WatchIndex::smudge_long)
followed by [clean_all](WatchIndex::clean_all), which purges watchers of
freed clauses).
Lazy detachment is only sound for clauses about to be freed; a detached but
live clause --- a frozen clause --- is removed strictly, so a frozen clause
appears in no watch list.
*/

use crate::{db::arena::ClauseArena, db::arena::ClauseRef, structures::literal::CLiteral};

/// A watch for a binary clause: the clause, and its other literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinaryWatch {
    pub clause: ClauseRef,
    pub other: CLiteral,
}

/// A watch for a long clause: the clause, and a blocker literal.
///
/// The blocker is some other literal of the clause at the time the watch was
/// made --- if the blocker is satisfied, so is the clause, and the clause
/// need not be inspected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LongWatch {
    pub clause: ClauseRef,
    pub blocker: CLiteral,
}

/// Per-literal watch lists for binary and long clauses, with lazy deletion.
#[derive(Default)]
pub struct WatchIndex {
    /// Binary watches, indexed by literal.
    binary: Vec<Vec<BinaryWatch>>,

    /// Long watches, indexed by literal.
    long: Vec<Vec<LongWatch>>,

    /// Literal indices whose long list may hold watchers of freed clauses.
    dirty: Vec<usize>,

    /// Whether a literal index is recorded in `dirty`.
    dirty_flags: Vec<bool>,
}

impl WatchIndex {
    /// Extends the index with lists for both polarities of a fresh atom.
    pub fn fresh_atom(&mut self) {
        for _ in 0..2 {
            self.binary.push(Vec::default());
            self.long.push(Vec::default());
            self.dirty_flags.push(false);
        }
    }

    /// Adds a binary watch to the list of `literal`.
    pub fn push_binary(&mut self, literal: CLiteral, watch: BinaryWatch) {
        self.binary[literal.index()].push(watch);
    }

    /// Adds a long watch to the list of `literal`.
    pub fn push_long(&mut self, literal: CLiteral, watch: LongWatch) {
        self.long[literal.index()].push(watch);
    }

    /// The binary watch list of `literal`.
    pub fn binary_list(&self, literal: CLiteral) -> &[BinaryWatch] {
        &self.binary[literal.index()]
    }

    /// A pointer to the long watch list of `literal`.
    ///
    /// A pointer, rather than a borrow, to support BCP: during propagation the
    /// list of the falsified literal is traversed while watches are *added* to
    /// the lists of other literals.
    /// A replacement watch is never the falsified literal, so the traversed
    /// list is never the mutated list.
    ///
    /// # Safety
    /// The caller must not alias the list through `self` while the pointer is
    /// live, other than through [push_long](WatchIndex::push_long) on a
    /// different literal.
    pub unsafe fn long_list_ptr(&mut self, literal: CLiteral) -> *mut Vec<LongWatch> {
        &mut self.long[literal.index()]
    }

    /// Strictly removes the binary watch of `clause` from the list of `literal`.
    pub fn remove_binary(&mut self, literal: CLiteral, clause: ClauseRef) {
        let list = &mut self.binary[literal.index()];
        if let Some(at) = list.iter().position(|w| w.clause == clause) {
            list.swap_remove(at);
        }
    }

    /// Strictly removes the long watch of `clause` from the list of `literal`.
    pub fn remove_long(&mut self, literal: CLiteral, clause: ClauseRef) {
        let list = &mut self.long[literal.index()];
        if let Some(at) = list.iter().position(|w| w.clause == clause) {
            list.swap_remove(at);
        }
    }

    /// Marks the long list of `literal` as holding watchers of freed clauses.
    pub fn smudge_long(&mut self, literal: CLiteral) {
        if !self.dirty_flags[literal.index()] {
            self.dirty_flags[literal.index()] = true;
            self.dirty.push(literal.index());
        }
    }

    /// Purges watchers of freed clauses from every smudged list.
    pub fn clean_all(&mut self, arena: &ClauseArena) {
        for index in self.dirty.drain(..) {
            self.long[index].retain(|watch| !arena.is_deleted(watch.clause));
            self.dirty_flags[index] = false;
        }
    }

    /// Applies `f` to the clause handle of every watch, used to relocate
    /// handles during garbage collection.
    pub fn for_each_clause_mut(&mut self, mut f: impl FnMut(&mut ClauseRef)) {
        for list in self.binary.iter_mut() {
            for watch in list.iter_mut() {
                f(&mut watch.clause);
            }
        }
        for list in self.long.iter_mut() {
            for watch in list.iter_mut() {
                f(&mut watch.clause);
            }
        }
    }

    /// True if `clause` is watched in the binary list of `literal` exactly once.
    #[cfg(test)]
    pub fn watched_binary_once(&self, literal: CLiteral, clause: ClauseRef) -> bool {
        self.binary[literal.index()]
            .iter()
            .filter(|w| w.clause == clause)
            .count()
            == 1
    }

    /// True if `clause` is watched in the long list of `literal` exactly once.
    #[cfg(test)]
    pub fn watched_long_once(&self, literal: CLiteral, clause: ClauseRef) -> bool {
        self.long[literal.index()]
            .iter()
            .filter(|w| w.clause == clause)
            .count()
            == 1
    }

    /// True if `clause` appears in no watch list.
    #[cfg(test)]
    pub fn unwatched(&self, clause: ClauseRef) -> bool {
        self.binary.iter().flatten().all(|w| w.clause != clause)
            && self.long.iter().flatten().all(|w| w.clause != clause)
    }
}
