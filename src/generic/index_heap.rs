/*!
A max heap over a fixed range of indices, each index paired with a value.

The values are stored in a vector indexed by the (external) index, and the heap itself stores indices.
A companion vector records where (if anywhere) an index currently sits on the heap, so the value of an index may be revised and the heap repaired without a search.

The [core](crate::engine::core) uses the heap to keep atoms ordered by activity, so the most active atom without a value can be found quickly when a decision is required.

```rust
# use tweety::generic::index_heap::IndexHeap;
let mut heap = IndexHeap::default();

heap.add(3, 1.5);
heap.add(1, 7.0);
heap.add(2, 0.5);

heap.activate(1);
heap.activate(2);
heap.activate(3);

assert_eq!(heap.pop_max(), Some(1));
assert_eq!(heap.pop_max(), Some(3));
assert_eq!(heap.pop_max(), Some(2));
assert!(heap.pop_max().is_none());
```
*/

/// The index heap struct.
pub struct IndexHeap<V: PartialOrd + Default + Clone> {
    /// Values, indexed by the external index.
    values: Vec<V>,

    /// The position of each external index on the heap, if active.
    position: Vec<Option<usize>>,

    /// The heap, as a vector of external indices.
    heap: Vec<usize>,
}

impl<V: PartialOrd + Default + Clone> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            position: Vec::default(),
            heap: Vec::default(),
        }
    }
}

impl<V: PartialOrd + Default + Clone> IndexHeap<V> {
    /// Stores `value` at `index`, growing the structure if required.
    /// Returns true if `index` was fresh, false otherwise.
    ///
    /// The index is not placed on the heap until [activate](IndexHeap::activate) is called.
    pub fn add(&mut self, index: usize, value: V) -> bool {
        let fresh = index >= self.values.len();
        if fresh {
            self.values.resize(index + 1, V::default());
            self.position.resize(index + 1, None);
        }
        self.values[index] = value;
        if !fresh {
            self.heapify_if_active(index);
        }
        fresh
    }

    /// Places `index` on the heap, if not already present.
    /// Returns true if the index was placed, false otherwise.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.values.len() || self.position[index].is_some() {
            return false;
        }
        let heap_index = self.heap.len();
        self.heap.push(index);
        self.position[index] = Some(heap_index);
        self.sift_up(heap_index);
        true
    }

    /// True if `index` is currently on the heap.
    pub fn is_active(&self, index: usize) -> bool {
        self.position.get(index).is_some_and(|p| p.is_some())
    }

    /// Removes `index` from the heap, if present.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(heap_index) = self.position.get(index).copied().flatten() else {
            return false;
        };
        let last = self.heap.len() - 1;
        self.swap(heap_index, last);
        self.heap.pop();
        self.position[index] = None;
        if heap_index < self.heap.len() {
            self.sift_down(heap_index);
            self.sift_up(heap_index);
        }
        true
    }

    /// The index with maximum value, without removing it from the heap.
    pub fn peek_max(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    /// Removes and returns the index with maximum value.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max = self.peek_max()?;
        self.remove(max);
        Some(max)
    }

    /// The value stored at `index`.
    pub fn value_at(&self, index: usize) -> &V {
        &self.values[index]
    }

    /// Applies `f` to the value at `index`, and repairs the heap.
    pub fn apply_to_index(&mut self, index: usize, f: impl Fn(&V) -> V) {
        self.values[index] = f(&self.values[index]);
        self.heapify_if_active(index);
    }

    /// Applies `f` to every stored value.
    ///
    /// The order of the heap is preserved only if `f` is monotone, as is the case when rescaling activity.
    pub fn apply_to_all(&mut self, f: impl Fn(&V) -> V) {
        for value in self.values.iter_mut() {
            *value = f(value);
        }
    }

    /// A count of indexed values (active or not).
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// True if no index is on the heap.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn heapify_if_active(&mut self, index: usize) {
        if let Some(heap_index) = self.position[index] {
            self.sift_up(heap_index);
            if let Some(heap_index) = self.position[index] {
                self.sift_down(heap_index);
            }
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }

    fn greater(&self, a: usize, b: usize) -> bool {
        self.values[self.heap[a]] > self.values[self.heap[b]]
    }

    fn sift_up(&mut self, mut heap_index: usize) {
        while heap_index > 0 {
            let parent = (heap_index - 1) / 2;
            if self.greater(heap_index, parent) {
                self.swap(heap_index, parent);
                heap_index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut heap_index: usize) {
        loop {
            let left = 2 * heap_index + 1;
            let right = left + 1;
            let mut largest = heap_index;

            if left < self.heap.len() && self.greater(left, largest) {
                largest = left;
            }
            if right < self.heap.len() && self.greater(right, largest) {
                largest = right;
            }
            if largest == heap_index {
                break;
            }
            self.swap(heap_index, largest);
            heap_index = largest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_order() {
        let mut heap = IndexHeap::default();
        for (index, value) in [(6, 10), (5, 20), (4, 30), (1, 60), (0, 70)] {
            heap.add(index, value);
            heap.activate(index);
        }

        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(5));
        assert_eq!(heap.pop_max(), Some(6));
        assert!(heap.pop_max().is_none());
    }

    #[test]
    fn heap_revalue() {
        let mut heap = IndexHeap::default();
        for index in 0..5 {
            heap.add(index, index as i32);
            heap.activate(index);
        }

        heap.apply_to_index(0, |_| 100);
        heap.add(4, -1);

        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(3));
        assert_eq!(heap.pop_max(), Some(2));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(4));
    }

    #[test]
    fn heap_sparse() {
        let mut heap = IndexHeap::default();
        heap.add(600, 10);
        heap.add(0, 70);
        heap.activate(600);
        heap.activate(0);

        assert_eq!(heap.count(), 601);
        assert_eq!(heap.value_at(5), &i32::default());
        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(600));
        assert!(heap.pop_max().is_none());
    }

    #[test]
    fn heap_remove() {
        let mut heap = IndexHeap::default();
        for index in [6, 5, 4, 1, 0] {
            heap.add(index, index as i32);
            heap.activate(index);
        }

        assert!(heap.remove(4));
        assert!(!heap.remove(4));
        assert!(heap.remove(6));
        assert!(!heap.add(4, 10));
        heap.activate(4);

        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(5));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(0));
    }
}
