/*!
The procedures of a solve, as methods on a [solver](crate::solver).

The algorithm for determining satisfiability is factored into a collection of
procedures:

- [Boolean constraint propagation](bcp), over the watch indices.
- [Conflict analysis](analysis), from a conflict to an asserting clause.
- [Backjumping](backjump), reverting the valuation to an earlier level.
- [Decisions](decision), extending the valuation when propagation settles.
- [Simplification](simplify) of the clause databases at the root level.
- [Reduction](reduction) of the learnt database, by freeze, thaw, and removal.
- [Garbage collection](gc) of the clause arena.
- [Sharing](sharing) of learnt clauses through the exchange.
- The [search](search) loop over the above, and the [solve](solve) loop over
  searches.
*/

pub mod analysis;
pub mod backjump;
pub mod bcp;
pub mod decision;
pub mod gc;
pub mod reduction;
pub mod search;
pub mod sharing;
pub mod simplify;
pub mod solve;
