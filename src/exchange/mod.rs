/*!
Lock-free exchange of learnt clauses between workers.

# Structure

For a fleet of `N` workers the exchange holds `N` singly-linked lists.
List `p` is owned by worker `p`: only `p` appends to it, and only `p` unlinks
from it.
Every other worker consumes the list through its own cursor, so each list is
single-producer and, per cursor, single-consumer.
The only contended mutation is the per-node count of consumers which have not
yet moved past the node.

A published clause is serialized as a raw literal sequence inside its node,
not as an arena handle: the consumer re-allocates the clause in its own
arena, so no arena memory is ever shared across threads.

# Protocol

- **Publish**: the producer allocates a node with the count set to the number
  of consumers, and appends it with a release store --- to the `next` field
  of the old tail, or to `head` for an empty list.
  A consumer which observes the node therefore also observes its literals.
- **Consume**: a consumer walks from its cursor (or from `head` on first
  contact with the list).
  The cursor parks on the last node consumed; the consumer decrements a
  node's count exactly once, *when leaving it for an observed successor*.
  In particular the count of a list's tail node is untouched until the list
  grows.
- **Clean**: the producer unlinks nodes from the head while the count reads
  zero (acquire).
  A zero count proves every consumer has moved its cursor strictly past the
  node, so no cursor dangles when the node is freed.

The count is born as the number of consumers, so the sum of counts over all
nodes is the total of unconsumed (producer, consumer) pairs --- the
accounting decreases monotonically between publishes.

# Suspension

None of the operations block, and a consume touches each available node a
bounded number of times: the exchange is lock-free, and wait-free per step.
*/

use std::sync::atomic::{AtomicPtr, AtomicU32, Ordering};

use crossbeam_utils::CachePadded;

use crate::{
    misc::log::targets::{self},
    structures::literal::CLiteral,
};

/// A published clause: an immutable literal sequence, its LBD, the link to
/// the next publication, and the count of consumers yet to move past it.
pub struct ExchangeNode {
    /// The literals of the published clause.
    literals: Box<[CLiteral]>,

    /// The LBD of the clause when published.
    lbd: u32,

    /// The next publication of the same producer, if any.
    next: AtomicPtr<ExchangeNode>,

    /// A count of consumers which have not yet moved past this node.
    remaining: AtomicU32,
}

/// The list owned by one producer, with a read cursor for every worker.
struct ProducerList {
    /// The oldest node not yet unlinked.
    head: AtomicPtr<ExchangeNode>,

    /// The most recent publication. Touched only by the producer.
    tail: AtomicPtr<ExchangeNode>,

    /// For each worker, the last node of this list the worker consumed.
    /// Each cursor is written only by its worker.
    cursors: Box<[CachePadded<AtomicPtr<ExchangeNode>>]>,
}

impl ProducerList {
    fn new(workers: usize) -> Self {
        ProducerList {
            head: AtomicPtr::default(),
            tail: AtomicPtr::default(),
            cursors: (0..workers).map(|_| CachePadded::default()).collect(),
        }
    }
}

/// The shared clause exchange for a fleet of workers.
pub struct SharedExchange {
    /// One list per worker, owned by that worker.
    lists: Box<[ProducerList]>,
}

impl SharedExchange {
    /// An exchange for a fleet of `workers` workers.
    pub fn new(workers: usize) -> Self {
        SharedExchange {
            lists: (0..workers).map(|_| ProducerList::new(workers)).collect(),
        }
    }

    /// A count of the workers the exchange serves.
    pub fn workers(&self) -> usize {
        self.lists.len()
    }

    /// Publishes a clause from `producer` to every other worker, cleaning the
    /// producer's own list if `clean` is set.
    ///
    /// To be called only by worker `producer`.
    pub fn publish(&self, producer: usize, literals: &[CLiteral], lbd: u32, clean: bool) {
        let consumers = self.workers().saturating_sub(1) as u32;

        let node = Box::into_raw(Box::new(ExchangeNode {
            literals: literals.into(),
            lbd,
            next: AtomicPtr::default(),
            remaining: AtomicU32::new(consumers),
        }));

        let list = &self.lists[producer];
        let tail = list.tail.load(Ordering::Relaxed);
        if tail.is_null() {
            // Release publishes the literals along with the node.
            list.head.store(node, Ordering::Release);
        } else {
            // Safety: the tail is unlinked only by this worker, and only
            // after its count reaches zero, which requires a successor.
            unsafe { (*tail).next.store(node, Ordering::Release) };
        }
        list.tail.store(node, Ordering::Relaxed);

        log::debug!(target: targets::EXCHANGE, "Worker {producer} published a clause of lbd {lbd}");

        if clean {
            self.clean(producer);
        }
    }

    /// Unlinks and frees fully-consumed nodes from the head of the list of
    /// `producer`.
    ///
    /// To be called only by worker `producer`.
    pub fn clean(&self, producer: usize) {
        let list = &self.lists[producer];
        let mut cursor = list.head.load(Ordering::Relaxed);
        let mut freed: usize = 0;

        // Acquire on the count pairs with the release of the final decrement,
        // so the producer observes every consumer's last read as complete.
        while !cursor.is_null() {
            // Safety: only this worker unlinks from the list, so the node is
            // live, and a zero count rules out any consumer revisiting it.
            let node = unsafe { &*cursor };
            if node.remaining.load(Ordering::Acquire) != 0 {
                break;
            }
            let next = node.next.load(Ordering::Relaxed);
            drop(unsafe { Box::from_raw(cursor) });
            freed += 1;
            cursor = next;
        }

        if freed > 0 {
            list.head.store(cursor, Ordering::Release);
            if cursor.is_null() {
                list.tail.store(cursor, Ordering::Relaxed);
            }
            log::debug!(target: targets::EXCHANGE, "Worker {producer} freed {freed} shared clauses");
        }
    }

    /// Feeds `import` every clause published by other workers which `reader`
    /// has not yet consumed, in publication order per producer.
    ///
    /// To be called only by worker `reader`.
    pub fn consume(&self, reader: usize, mut import: impl FnMut(&[CLiteral], u32)) {
        for producer in 0..self.workers() {
            if producer == reader {
                continue;
            }

            let list = &self.lists[producer];
            let cursor = &list.cursors[reader];

            let parked = cursor.load(Ordering::Relaxed);
            let mut node = match parked.is_null() {
                true => list.head.load(Ordering::Acquire),
                false => {
                    // Safety: the parked node was consumed without a
                    // successor, so this reader has not decremented it, its
                    // count is nonzero, and the producer has not freed it.
                    let parked_node = unsafe { &*parked };
                    let next = parked_node.next.load(Ordering::Acquire);
                    if !next.is_null() {
                        parked_node.remaining.fetch_sub(1, Ordering::AcqRel);
                    }
                    next
                }
            };

            while !node.is_null() {
                // Safety: the node was reached through an acquire load of the
                // link which published it, and this reader has yet to move
                // past it, so the producer retains it.
                let current = unsafe { &*node };
                import(&current.literals, current.lbd);
                cursor.store(node, Ordering::Relaxed);

                let next = current.next.load(Ordering::Acquire);
                if next.is_null() {
                    break;
                }
                current.remaining.fetch_sub(1, Ordering::AcqRel);
                node = next;
            }
        }
    }

    /// A count of the nodes currently linked in the list of `producer`.
    ///
    /// Racy under concurrent publication; intended for diagnostics and tests
    /// at quiescent points.
    pub fn node_count(&self, producer: usize) -> usize {
        let mut count = 0;
        let mut cursor = self.lists[producer].head.load(Ordering::Acquire);
        while !cursor.is_null() {
            count += 1;
            cursor = unsafe { (*cursor).next.load(Ordering::Acquire) };
        }
        count
    }
}

impl Drop for SharedExchange {
    fn drop(&mut self) {
        for list in self.lists.iter() {
            let mut cursor = list.head.load(Ordering::Relaxed);
            while !cursor.is_null() {
                // Safety: drop has exclusive access, and every node between
                // head and tail was allocated by publish and never freed.
                let node = unsafe { Box::from_raw(cursor) };
                cursor = node.next.load(Ordering::Relaxed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(ints: &[isize]) -> Vec<CLiteral> {
        ints.iter()
            .map(|l| CLiteral::new(l.unsigned_abs() as u32, l.is_positive()))
            .collect()
    }

    #[test]
    fn publication_order() {
        let exchange = SharedExchange::new(2);
        exchange.publish(0, &literals(&[1, 2]), 2, false);
        exchange.publish(0, &literals(&[3, 4]), 3, false);

        let mut seen = Vec::new();
        exchange.consume(1, |lits, lbd| seen.push((lits.to_vec(), lbd)));

        assert_eq!(
            seen,
            vec![(literals(&[1, 2]), 2), (literals(&[3, 4]), 3)]
        );

        // Nothing is consumed twice.
        let mut again = 0;
        exchange.consume(1, |_, _| again += 1);
        assert_eq!(again, 0);
    }

    #[test]
    fn own_list_is_skipped() {
        let exchange = SharedExchange::new(2);
        exchange.publish(0, &literals(&[1, 2]), 2, false);

        let mut own = 0;
        exchange.consume(0, |_, _| own += 1);
        assert_eq!(own, 0);
    }

    #[test]
    fn clean_respects_lagging_readers() {
        let exchange = SharedExchange::new(3);
        exchange.publish(0, &literals(&[1, 2]), 2, false);
        exchange.publish(0, &literals(&[3, 4]), 2, false);
        exchange.publish(0, &literals(&[5, 6]), 2, false);

        // Reader 1 consumes everything, reader 2 nothing.
        exchange.consume(1, |_, _| {});
        exchange.clean(0);
        assert_eq!(exchange.node_count(0), 3);

        // After reader 2 catches up, all but the tail are fully consumed.
        exchange.consume(2, |_, _| {});
        exchange.clean(0);
        assert_eq!(exchange.node_count(0), 1);
    }

    #[test]
    fn refcount_accounting() {
        let workers = 4;
        let exchange = SharedExchange::new(workers);
        exchange.publish(0, &literals(&[1, 2, 3]), 3, false);
        exchange.publish(0, &literals(&[4, 5]), 2, false);

        let sum_remaining = || {
            let mut sum = 0;
            let mut cursor = exchange.lists[0].head.load(Ordering::Acquire);
            while !cursor.is_null() {
                unsafe {
                    sum += (*cursor).remaining.load(Ordering::Acquire);
                    cursor = (*cursor).next.load(Ordering::Acquire);
                }
            }
            sum
        };

        // Two nodes, three consumers each.
        assert_eq!(sum_remaining(), 6);

        exchange.consume(1, |_, _| {});
        // Reader 1 moved past the first node and parked on the second.
        assert_eq!(sum_remaining(), 5);

        exchange.consume(2, |_, _| {});
        exchange.consume(3, |_, _| {});
        assert_eq!(sum_remaining(), 3);
    }
}
