/// Fixed-capacity ring buffer; pushing onto a full buffer overwrites the oldest entry.
#[derive(Clone, Debug)]
pub struct TrailBuffer<T> {
    items: Vec<T>,
    head: usize,
    capacity: usize,
}

impl<T: Copy> TrailBuffer<T> {
    /// Empty buffer holding at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    /// Append, evicting the oldest item when full. O(1).
    pub fn push(&mut self, v: T) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() < self.capacity {
            self.items.push(v);
        } else {
            self.items[self.head] = v;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent item.
    pub fn last(&self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let i = (self.head + self.items.len() - 1) % self.items.len();
        self.items.get(i).copied()
    }

    /// Items oldest first.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        let n = self.items.len();
        (0..n).map(move |i| self.items[(self.head + i) % n])
    }

    /// Remove everything without freeing storage.
    pub fn clear(&mut self) {
        self.items.clear();
        self.head = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particle/trail.rs"]
mod tests;
