use crate::core::Millis;

/// A cancellable set of scheduled deadlines.
///
/// Every transition a component schedules goes through one of these so that
/// teardown can revoke the whole set at once: dropping the owner drops the
/// set, and nothing fires afterwards. Entries that share a deadline drain in
/// insertion order.
#[derive(Clone, Debug)]
pub struct TimerSet<K> {
    pending: Vec<Entry<K>>,
    seq: u64,
}

#[derive(Clone, Debug)]
struct Entry<K> {
    at: Millis,
    seq: u64,
    key: K,
}

impl<K> TimerSet<K> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            seq: 0,
        }
    }

    pub fn schedule(&mut self, at: Millis, key: K) {
        self.seq += 1;
        self.pending.push(Entry {
            at,
            seq: self.seq,
            key,
        });
    }

    /// Earliest pending deadline, if any. Hosts use this to decide when to
    /// call back into `tick`.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.iter().map(|e| e.at).min()
    }

    /// Removes and returns every entry whose deadline is at or before `now`,
    /// ordered by (deadline, insertion).
    pub fn due(&mut self, now: Millis) -> Vec<K> {
        let mut fired: Vec<Entry<K>> = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].at <= now {
                fired.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        fired.sort_by_key(|e| (e.at, e.seq));
        fired.into_iter().map(|e| e.key).collect()
    }

    /// Cancels every pending entry as a unit.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl<K> Default for TimerSet<K> {
    fn default() -> Self {
        Self::new()
    }
}
