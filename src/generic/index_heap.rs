/*!
A max heap on some subset of elements with fixed indices.

In other words, a heap backed by a vector of values together with a companion
vector which tracks the current location of each value index within the heap.
The backing vector stays constant, allowing the structure to double as a plain
store of values which may be moved onto, and off, the heap.

[IndexHeap] is used to order atoms by activity: every atom keeps an activity
score in the store, and any atom without a value on the current valuation is
*active* on the heap, so the most active unvalued atom is always a pop away.

```rust
# use boreal_sat::generic::index_heap::IndexHeap;
let mut heap = IndexHeap::default();

heap.add(3, 1.0);
heap.add(0, 7.0);

heap.activate(3);
heap.activate(0);

assert_eq!(heap.pop_max(), Some(0));
assert_eq!(heap.pop_max(), Some(3));
assert_eq!(heap.pop_max(), None);
```
*/

/// A max heap over values indexed by a fixed external index.
pub struct IndexHeap<V: PartialOrd + Default> {
    /// The value store, indexed by external index.
    values: Vec<V>,

    /// The position of each external index within `heap`, if active.
    positions: Vec<Option<usize>>,

    /// External indices, arranged as a binary max heap on their values.
    heap: Vec<usize>,

    /// The active prefix of `heap`.
    limit: usize,
}

impl<V: PartialOrd + Default> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            positions: Vec::default(),
            heap: Vec::default(),
            limit: 0,
        }
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    /// Stores `value` at `index`, growing the structure as required.
    ///
    /// The index is *not* activated on the heap --- for this, see
    /// [activate](IndexHeap::activate).
    pub fn add(&mut self, index: usize, value: V) {
        if index >= self.values.len() {
            let required = index + 1 - self.values.len();
            self.values
                .extend(std::iter::repeat_with(V::default).take(required));
            self.positions.extend(std::iter::repeat(None).take(required));
            self.heap.extend(std::iter::repeat(usize::MAX).take(required));
        }
        self.values[index] = value;
    }

    /// Activates `index` on the heap, or restores heap order at the index if
    /// already active.
    pub fn activate(&mut self, index: usize) {
        match self.positions[index] {
            None => {
                let position = self.limit;
                self.positions[index] = Some(position);
                self.heap[position] = index;
                self.limit += 1;
                self.sift_up(position);
            }
            Some(position) => {
                self.sift_up(position);
                self.sift_down(position);
            }
        }
    }

    /// Removes `index` from the heap, if active.
    pub fn remove(&mut self, index: usize) {
        if let Some(position) = self.positions[index] {
            self.limit -= 1;
            self.positions[index] = None;
            if position < self.limit {
                let moved = self.heap[self.limit];
                self.heap[position] = moved;
                self.positions[moved] = Some(position);
                self.sift_down(position);
                self.sift_up(position);
            }
        }
    }

    /// The index with the maximum value, if any index is active.
    pub fn peek_max(&self) -> Option<usize> {
        match self.limit {
            0 => None,
            _ => Some(self.heap[0]),
        }
    }

    /// Pops the index with the maximum value off the heap.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max = self.peek_max()?;
        self.remove(max);
        Some(max)
    }

    /// True if `index` is active on the heap.
    pub fn active(&self, index: usize) -> bool {
        self.positions[index].is_some()
    }

    /// The value stored at `index`.
    pub fn value_at(&self, index: usize) -> &V {
        &self.values[index]
    }

    /// Applies `f` to the value stored at `index`, without restoring heap
    /// order --- for this, see [heapify_if_active](IndexHeap::heapify_if_active).
    pub fn apply_to_index(&mut self, index: usize, f: impl Fn(&V) -> V) {
        self.values[index] = f(&self.values[index]);
    }

    /// Applies `f` to every stored value.
    ///
    /// Heap order is preserved only if `f` is monotone (e.g. a uniform
    /// rescale), which is the only use made of the method.
    pub fn apply_to_all(&mut self, f: impl Fn(&V) -> V) {
        for value in self.values.iter_mut() {
            *value = f(value);
        }
    }

    /// Restores heap order at `index`, if active.
    pub fn heapify_if_active(&mut self, index: usize) {
        if let Some(position) = self.positions[index] {
            self.sift_up(position);
            self.sift_down(position);
        }
    }

    /// A count of values indexed by the structure (active or not).
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Deactivates every index, without touching stored values.
    pub fn clear_active(&mut self) {
        for position in 0..self.limit {
            self.positions[self.heap[position]] = None;
        }
        self.limit = 0;
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    fn value_at_position(&self, position: usize) -> &V {
        &self.values[self.heap[position]]
    }

    fn swap_positions(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a]] = Some(a);
        self.positions[self.heap[b]] = Some(b);
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;
            if self.value_at_position(parent) >= self.value_at_position(position) {
                break;
            }
            self.swap_positions(parent, position);
            position = parent;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        loop {
            let left = 2 * position + 1;
            if left >= self.limit {
                break;
            }

            let mut largest = position;
            if self.value_at_position(left) > self.value_at_position(largest) {
                largest = left;
            }

            let right = left + 1;
            if right < self.limit && self.value_at_position(right) > self.value_at_position(largest)
            {
                largest = right;
            }

            if largest == position {
                break;
            }
            self.swap_positions(largest, position);
            position = largest;
        }
    }
}
