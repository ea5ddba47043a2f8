use crate::{collect_ids, Tag, TagId};
use chrono::Utc;
use rand::Rng;

/// Width of the random suffix appended to the millisecond timestamp
const SUFFIX_RANGE: u64 = 1000;

/// Source of fresh tag ids for one editing session.
///
/// Clock-backed generators produce `<unix millis><3 random digits>`; seeded
/// generators count up from their seed and never read the clock. Both are
/// strictly increasing, so a generator never repeats itself.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: u64,
    clock: bool,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { last: 0, clock: true }
    }

    /// Sequential ids `seed + 1, seed + 2, ...` for deterministic replay
    pub fn from_seed(seed: u64) -> Self {
        Self {
            last: seed,
            clock: false,
        }
    }

    /// Generate the next id
    pub fn new_id(&mut self) -> TagId {
        let candidate = if self.clock {
            let millis = Utc::now().timestamp_millis().max(0) as u64;
            let suffix = rand::thread_rng().gen_range(0..SUFFIX_RANGE);
            millis.saturating_mul(SUFFIX_RANGE).saturating_add(suffix)
        } else {
            0
        };

        self.last = candidate.max(self.last.saturating_add(1));
        TagId(self.last)
    }

    /// Make sure every future id sorts after the ids already in `root`
    pub fn observe(&mut self, root: &Tag) {
        if let Some(max) = collect_ids(root).into_iter().max() {
            self.last = self.last.max(max.0);
        }
    }

    /// Most recently issued (or observed) id
    pub fn last(&self) -> u64 {
        self.last
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
