use std::collections::HashMap;
use std::hash::Hash;
use tokio::time::Instant;

/// Deadlines owned by a single player component.
///
/// Nothing runs on its own: the owner asks for `next_deadline`, sleeps until
/// then, and drains the expired kinds. Dropping or clearing the set cancels
/// every pending task at once.
#[derive(Debug)]
pub struct Timers<K> {
    deadlines: HashMap<K, Instant>,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self {
            deadlines: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `kind` at `at`, replacing any earlier deadline for it
    pub fn schedule(&mut self, kind: K, at: Instant) {
        self.deadlines.insert(kind, at);
    }

    pub fn cancel(&mut self, kind: K) {
        self.deadlines.remove(&kind);
    }

    pub fn is_scheduled(&self, kind: K) -> bool {
        self.deadlines.contains_key(&kind)
    }

    pub fn deadline(&self, kind: K) -> Option<Instant> {
        self.deadlines.get(&kind).copied()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    /// Removes and returns every kind due at `now`, earliest first
    pub fn take_expired(&mut self, now: Instant) -> Vec<K> {
        let mut expired: Vec<(K, Instant)> = self
            .deadlines
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(kind, at)| (*kind, *at))
            .collect();
        expired.sort_by_key(|(_, at)| *at);

        for (kind, _) in &expired {
            self.deadlines.remove(kind);
        }
        expired.into_iter().map(|(kind, _)| kind).collect()
    }

    pub fn clear(&mut self) {
        self.deadlines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
