use std::time::Instant;

/// Counters collected since the previous call to [`crate::Cache::stats`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Stats {
    pub miss_count: u64,
    pub hit_count: u64,
    pub eviction_count: u64,
    pub millis_elapsed: u128,
}

#[derive(Debug)]
pub(crate) struct Counters {
    hit_count: u64,
    miss_count: u64,
    eviction_count: u64,
    last_reset: Instant,
}

impl Default for Counters {
    fn default() -> Self {
        Self {
            hit_count: 0,
            miss_count: 0,
            eviction_count: 0,
            last_reset: Instant::now(),
        }
    }
}

impl Counters {
    pub(crate) fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hit_count += 1;
        } else {
            self.miss_count += 1;
        }
    }

    pub(crate) fn record_eviction(&mut self) {
        self.eviction_count += 1;
    }

    pub(crate) fn take(&mut self) -> Stats {
        let stats = Stats {
            miss_count: self.miss_count,
            hit_count: self.hit_count,
            eviction_count: self.eviction_count,
            millis_elapsed: self.last_reset.elapsed().as_millis(),
        };

        *self = Counters::default();

        stats
    }
}
