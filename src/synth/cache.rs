use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use image::RgbImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ResampleKey {
    source_id: u64,
    w: u32,
    h: u32,
}

/// Hit/miss counters for a [`ResampleCache`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResampleCacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Bounded cache of resampled source images keyed by `(source, width, height)`.
///
/// Slow zooms map many consecutive frames onto the same scaled size, so even a couple of
/// entries avoid most Lanczos passes. The cache never changes output, only cost. One cache
/// belongs to one rendering thread.
#[derive(Debug)]
pub struct ResampleCache {
    max_entries: usize,
    entries: HashMap<ResampleKey, Arc<RgbImage>>,
    order: VecDeque<ResampleKey>,
    stats: ResampleCacheStats,
}

impl Default for ResampleCache {
    fn default() -> Self {
        Self::with_capacity(2)
    }
}

impl ResampleCache {
    /// Create a cache holding at most `max_entries` resampled images (minimum 1).
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            max_entries: max_entries.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
            stats: ResampleCacheStats::default(),
        }
    }

    /// Hit/miss counters since creation.
    pub fn stats(&self) -> ResampleCacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn get_or_insert_with(
        &mut self,
        source_id: u64,
        w: u32,
        h: u32,
        make: impl FnOnce() -> RgbImage,
    ) -> Arc<RgbImage> {
        let key = ResampleKey { source_id, w, h };
        if let Some(img) = self.entries.get(&key) {
            self.stats.hits += 1;
            return Arc::clone(img);
        }

        self.stats.misses += 1;
        while self.entries.len() >= self.max_entries {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }

        let img = Arc::new(make());
        self.entries.insert(key, Arc::clone(&img));
        self.order.push_back(key);
        img
    }
}
