/// Maximum number of simultaneously pending events, sentinel included
pub const MAX_EVENTS: usize = 64;

/// Stable identifier for a pending event, required to cancel it.
///
/// A handle is valid for exactly one occurrence: once the event fired or was
/// cancelled, the handle goes stale and cancelling it again is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventHandle(u8);

#[derive(Clone, Copy)]
struct Entry<E: Copy> {
    timestamp: u64,
    event: E,
    /// Stable id, also the index into the slot map
    id: u8,
}

/// Virtual-time event queue backed by a fixed-capacity binary min-heap.
///
/// Each entry carries a stable id mapped back to its current heap slot, so
/// any pending event can be removed in O(log n), not just the earliest one.
/// The queue always holds a sentinel at the largest possible timestamp;
/// popping it means virtual time ran off the end of the schedule.
pub struct Scheduler<E: Copy> {
    heap: [Entry<E>; MAX_EVENTS],
    /// id -> current heap slot
    slots: [u8; MAX_EVENTS],
    len: usize,
    now: u64,
    sentinel: E,
}

impl<E: Copy> Scheduler<E> {
    pub fn new(sentinel: E) -> Self {
        let mut scheduler = Self {
            heap: core::array::from_fn(|i| Entry {
                timestamp: 0,
                event: sentinel,
                id: i as u8,
            }),
            slots: core::array::from_fn(|i| i as u8),
            len: 0,
            now: 0,
            sentinel,
        };
        scheduler.schedule(u64::MAX, sentinel);
        scheduler
    }

    /// Empty the queue, rewind time to zero and reinstall the sentinel
    pub fn reset(&mut self) {
        self.len = 0;
        self.now = 0;
        let sentinel = self.sentinel;
        self.schedule(u64::MAX, sentinel);
    }

    /// Current virtual time in cycles
    #[inline]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Timestamp of the earliest pending event
    #[inline]
    pub fn next_timestamp(&self) -> u64 {
        self.heap[0].timestamp
    }

    /// Cycles left until the earliest pending event is due
    #[inline]
    pub fn remaining_cycles(&self) -> u64 {
        self.next_timestamp() - self.now
    }

    /// Enqueue `event` at `delay` cycles from now
    pub fn schedule(&mut self, delay: u64, event: E) -> EventHandle {
        assert!(self.len < MAX_EVENTS, "scheduler: too many pending events");
        let n = self.len;
        self.len += 1;
        let id = self.heap[n].id;
        self.heap[n] = Entry {
            timestamp: self.now.saturating_add(delay),
            event,
            id,
        };
        self.slots[id as usize] = n as u8;
        self.sift_up(n);
        EventHandle(id)
    }

    /// Remove a still pending event; stale handles are ignored
    pub fn cancel(&mut self, handle: EventHandle) {
        let n = self.slots[handle.0 as usize] as usize;
        if n < self.len && self.heap[n].id == handle.0 {
            self.remove(n);
        }
    }

    /// Pop the next event due at or before `target`, setting the current time
    /// to its exact timestamp. Returns the event and its lateness in cycles;
    /// events popped through here always fire on time, so lateness is zero.
    pub fn pop_due(&mut self, target: u64) -> Option<(E, u64)> {
        if self.len == 0 {
            return None;
        }
        let root = self.heap[0];
        if root.timestamp > target {
            return None;
        }
        self.now = root.timestamp;
        self.remove(0);
        Some((root.event, 0))
    }

    /// Complete an advance, landing exactly on `target`
    pub fn finish_advance(&mut self, target: u64) {
        debug_assert!(target >= self.now);
        self.now = target;
    }

    fn remove(&mut self, n: usize) {
        self.len -= 1;
        self.swap(n, self.len);
        if n == self.len {
            return;
        }
        // Restore heap order around the entry moved into slot n
        if n > 0 && self.heap[(n - 1) / 2].timestamp > self.heap[n].timestamp {
            self.sift_up(n);
        } else {
            self.sift_down(n);
        }
    }

    fn sift_up(&mut self, mut n: usize) {
        while n > 0 {
            let parent = (n - 1) / 2;
            if self.heap[parent].timestamp <= self.heap[n].timestamp {
                break;
            }
            self.swap(n, parent);
            n = parent;
        }
    }

    fn sift_down(&mut self, mut n: usize) {
        loop {
            let left = n * 2 + 1;
            let right = n * 2 + 2;
            let mut min = n;
            if left < self.len && self.heap[left].timestamp < self.heap[min].timestamp {
                min = left;
            }
            if right < self.len && self.heap[right].timestamp < self.heap[min].timestamp {
                min = right;
            }
            if min == n {
                break;
            }
            self.swap(n, min);
            n = min;
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.slots[self.heap[i].id as usize] = i as u8;
        self.slots[self.heap[j].id as usize] = j as u8;
    }

    #[cfg(test)]
    fn is_heap(&self) -> bool {
        (1..self.len).all(|n| self.heap[(n - 1) / 2].timestamp <= self.heap[n].timestamp)
    }
}
