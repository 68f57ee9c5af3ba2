use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::time::{Duration, Instant};

struct Slot<V> {
    value: V,
    inserted_at: Instant,
    /// Position in the recency index; larger is more recently used.
    tick: u64,
}

/// Bounded map with least-recently-used eviction and a per-entry max age.
///
/// Expiry is lazy: an entry older than `max_age` is dropped the next time it
/// is read. Capacity is enforced on every insert.
pub struct LruTtlCache<K, V> {
    slots: HashMap<K, Slot<V>>,
    recency: BTreeMap<u64, K>,
    next_tick: u64,
    capacity: usize,
    max_age: Duration,
}

impl<K, V> LruTtlCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// `capacity` is clamped to at least one entry.
    pub fn new(capacity: usize, max_age: Duration) -> Self {
        Self {
            slots: HashMap::new(),
            recency: BTreeMap::new(),
            next_tick: 0,
            capacity: capacity.max(1),
            max_age,
        }
    }

    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    /// Read `key` as of `now`, refreshing its recency on a hit.
    pub fn get_at(&mut self, key: &K, now: Instant) -> Option<&V> {
        let (old_tick, expired) = {
            let slot = self.slots.get(key)?;
            (
                slot.tick,
                now.saturating_duration_since(slot.inserted_at) > self.max_age,
            )
        };

        self.recency.remove(&old_tick);
        if expired {
            self.slots.remove(key);
            return None;
        }

        let tick = self.bump();
        self.recency.insert(tick, key.clone());
        let slot = self.slots.get_mut(key)?;
        slot.tick = tick;
        Some(&slot.value)
    }

    /// Store `value` under `key` as of `now`, replacing any previous value and
    /// resetting its age.
    pub fn insert_at(&mut self, key: K, value: V, now: Instant) {
        let tick = self.bump();
        let slot = Slot {
            value,
            inserted_at: now,
            tick,
        };
        if let Some(previous) = self.slots.insert(key.clone(), slot) {
            self.recency.remove(&previous.tick);
        }
        self.recency.insert(tick, key);

        while self.slots.len() > self.capacity {
            let Some((_, oldest)) = self.recency.pop_first() else {
                break;
            };
            self.slots.remove(&oldest);
        }
    }

    /// Number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn bump(&mut self) -> u64 {
        let tick = self.next_tick;
        self.next_tick += 1;
        tick
    }
}
