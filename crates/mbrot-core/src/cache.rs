#![forbid(unsafe_code)]

//! Per-pixel escape cache.
//!
//! Only escaped results are stored. A point that escaped at iteration `i`
//! under budget `b` escapes at `i` under every budget `b' > i`, so the entry
//! stays valid for every later pass until the grid is resized. Points that
//! did not escape are re-evaluated each pass with the larger budget.

use rustc_hash::FxHashMap;

use crate::grid::PixelCoord;

/// Hit/miss counters since the last [`EscapeCache::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups that hit, `0.0` when nothing was looked up.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Map from packed pixel coordinate to escape iteration.
#[derive(Debug, Default)]
pub struct EscapeCache {
    entries: FxHashMap<u64, u32>,
    stats: CacheStats,
}

impl EscapeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for roughly `pixels` escaped entries.
    #[must_use]
    pub fn with_capacity(pixels: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(pixels, Default::default()),
            stats: CacheStats::default(),
        }
    }

    /// Cached escape iteration for `coord`, counting the hit or miss.
    #[inline]
    pub fn lookup(&mut self, coord: PixelCoord) -> Option<u32> {
        let found = self.entries.get(&coord.packed()).copied();
        if found.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        found
    }

    /// Whether `coord` has an entry. Does not touch the counters.
    #[inline]
    pub fn contains(&self, coord: PixelCoord) -> bool {
        self.entries.contains_key(&coord.packed())
    }

    /// Store an escape iteration. The first escape recorded for a pixel wins;
    /// a repeat insert with the same value is a no-op.
    #[inline]
    pub fn record(&mut self, coord: PixelCoord, iteration: u32) {
        self.entries.entry(coord.packed()).or_insert(iteration);
    }

    /// Drop every entry and reset the counters. Capacity is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
