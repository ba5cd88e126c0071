//! Logical-to-physical row index
//!
//! A capacity-sized array whose first `active_count()` entries map logical
//! row positions to physical slots; the rest are unused. Active entries are
//! always packed at the front.

use std::fmt;

/// Maps logical row positions to physical slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCursor {
    slots: Vec<Option<u8>>,
}

impl IndexCursor {
    /// Empty cursor for a table of `capacity` slots
    pub fn new(capacity: u8) -> Self {
        Self {
            slots: vec![None; capacity as usize],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Unfiltered view for a table whose size counter is `size`
    ///
    /// Logical order is insertion order: once the ring has wrapped
    /// (`size >= capacity`) the oldest row sits at `size % capacity`.
    pub fn reset(&mut self, size: u16) {
        let capacity = self.capacity();
        if capacity == 0 {
            return;
        }

        let size = size as usize;
        let live = size.min(capacity);
        let oldest = if size >= capacity { size % capacity } else { 0 };

        for (i, slot) in self.slots.iter_mut().enumerate() {
            *slot = (i < live).then(|| ((oldest + i) % capacity) as u8);
        }
    }

    /// Number of rows reachable through the cursor
    pub fn active_count(&self) -> usize {
        self.slots.iter().take_while(|slot| slot.is_some()).count()
    }

    /// Physical slot of logical position `n`, wrapping past the active count
    pub fn map(&self, n: usize) -> Option<usize> {
        let active = self.active_count();
        if active == 0 {
            return None;
        }
        self.slots[n % active].map(usize::from)
    }

    /// Active physical slots in logical order
    pub fn active(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().map_while(|slot| slot.map(usize::from))
    }

    /// Keep only the active slots for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let kept: Vec<usize> = self.active().filter(|&slot| keep(slot)).collect();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            *slot = kept.get(i).map(|&s| s as u8);
        }
    }

    /// Drop logical position `position` after its row was removed and every
    /// later physical row moved down by one slot
    pub fn remove(&mut self, position: usize) {
        let active = self.active_count();
        if position >= active {
            return;
        }

        for i in position + 1..active {
            self.slots[i - 1] = self.slots[i].map(|slot| slot.saturating_sub(1));
        }
        self.slots[active - 1] = None;
    }

    /// Follow a left rotation of the physical slots by `shift`
    pub fn rotate(&mut self, shift: usize) {
        let capacity = self.capacity();
        if capacity == 0 {
            return;
        }

        for slot in self.slots.iter_mut().flatten() {
            *slot = ((*slot as usize + capacity - shift % capacity) % capacity) as u8;
        }
    }
}

impl fmt::Display for IndexCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match slot {
                Some(s) => write!(f, "{}", s)?,
                None => write!(f, "-")?,
            }
        }
        write!(f, "]")
    }
}
