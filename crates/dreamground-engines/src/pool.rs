//! Fixed-capacity object pool backed by an arena with an index free list.
//!
//! Handles returned by [`Pool::acquire`] are move-only and consumed by
//! [`Pool::release`], so a slot can never be live twice or live and pooled
//! at the same time.

/// Values that can be reset for reuse.
pub trait Recycle: Default {
    /// Reset every field to its default.
    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Handle to a live slot. Deliberately neither `Clone` nor `Copy`.
#[derive(Debug, PartialEq, Eq)]
pub struct Slot(usize);

impl Slot {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Entry<T> {
    Live(T),
    /// Cleared and waiting on the free list.
    Pooled(T),
    /// Released while the free list was full; the value was dropped.
    Vacant,
}

/// Object pool keeping up to `capacity` released values for reuse.
#[derive(Debug)]
pub struct Pool<T> {
    entries: Vec<Entry<T>>,
    /// Indices of `Pooled` entries.
    free: Vec<usize>,
    /// Indices of `Vacant` entries.
    vacant: Vec<usize>,
    capacity: usize,
    recycled: u64,
    fresh: u64,
}

impl<T: Recycle> Pool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            vacant: Vec::new(),
            capacity,
            recycled: 0,
            fresh: 0,
        }
    }

    /// Take a value out of the pool, or construct one if none is free.
    pub fn acquire(&mut self) -> Slot {
        if let Some(idx) = self.free.pop() {
            let entry = std::mem::replace(&mut self.entries[idx], Entry::Vacant);
            let value = match entry {
                Entry::Pooled(value) => value,
                _ => T::default(),
            };
            self.entries[idx] = Entry::Live(value);
            self.recycled += 1;
            return Slot(idx);
        }

        self.fresh += 1;
        if let Some(idx) = self.vacant.pop() {
            self.entries[idx] = Entry::Live(T::default());
            Slot(idx)
        } else {
            self.entries.push(Entry::Live(T::default()));
            Slot(self.entries.len() - 1)
        }
    }

    /// Clear the value behind `slot` and return it to the pool. Beyond
    /// capacity the value is dropped instead.
    pub fn release(&mut self, slot: Slot) {
        let idx = slot.0;
        let Some(entry) = self.entries.get_mut(idx) else {
            return;
        };
        if !matches!(entry, Entry::Live(_)) {
            log::warn!("released slot {idx} that was not live");
            return;
        }
        let Entry::Live(mut value) = std::mem::replace(entry, Entry::Vacant) else {
            return;
        };
        if self.free.len() < self.capacity {
            value.clear();
            self.entries[idx] = Entry::Pooled(value);
            self.free.push(idx);
        } else {
            self.vacant.push(idx);
        }
    }

    pub fn get(&self, slot: &Slot) -> Option<&T> {
        match self.entries.get(slot.0) {
            Some(Entry::Live(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, slot: &Slot) -> Option<&mut T> {
        match self.entries.get_mut(slot.0) {
            Some(Entry::Live(value)) => Some(value),
            _ => None,
        }
    }

    /// Number of values waiting for reuse.
    pub fn pooled(&self) -> usize {
        self.free.len()
    }

    /// Number of acquisitions served from the free list.
    pub fn recycled_count(&self) -> u64 {
        self.recycled
    }

    /// Number of acquisitions that had to construct a new value.
    pub fn fresh_count(&self) -> u64 {
        self.fresh
    }
}
