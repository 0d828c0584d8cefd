//! Index arena whose released slots are handed out again.

#[cfg(test)]
#[path = "slots_test.rs"]
mod slots_test;

/// Values addressed by a stable index.
///
/// [`Slots::remove`] empties a slot and queues its index; the next
/// [`Slots::insert`] takes a queued index before growing the arena.
#[derive(Debug, Clone)]
pub struct Slots<T> {
    entries: Vec<Option<T>>,
    free: Vec<usize>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Slots<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new(), free: Vec::new() }
    }

    /// Store `value` and return its index.
    pub fn insert(&mut self, value: T) -> usize {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.entries.get_mut(index) {
                *slot = Some(value);
                return index;
            }
        }
        self.entries.push(Some(value));
        self.entries.len() - 1
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)?.as_ref()
    }

    /// Empty the slot at `index` and return what it held.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let value = self.entries.get_mut(index)?.take()?;
        self.free.push(index);
        Some(value)
    }

    /// Occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len() - self.free.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
