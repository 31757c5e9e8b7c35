//! Bounded cache of encoded thumbnails for re-hovered points.
//!
//! Keys combine the point id with the render options so that a change of
//! display size or channel never serves a stale rendition.

use std::collections::{HashMap, VecDeque};

use super::{RenderOptions, ThumbnailArtifact};

/// Cache key: which point, rendered how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThumbnailKey {
    /// Point id in the index table
    pub point_id: usize,
    /// Options the artifact was rendered with
    pub options: RenderOptions,
}

/// Least-recently-used cache of thumbnail artifacts.
pub struct ThumbnailCache {
    /// Maximum number of entries; zero disables caching
    capacity: usize,
    /// Cached artifacts
    entries: HashMap<ThumbnailKey, ThumbnailArtifact>,
    /// Keys from least to most recently used
    recency: VecDeque<ThumbnailKey>,
}

impl ThumbnailCache {
    /// Create an empty cache holding at most `capacity` thumbnails.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            recency: VecDeque::with_capacity(capacity),
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of cached thumbnails.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a key is cached without touching its recency.
    pub fn contains(&self, key: &ThumbnailKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Get a cached artifact and mark it most recently used.
    pub fn get(&mut self, key: &ThumbnailKey) -> Option<ThumbnailArtifact> {
        let artifact = self.entries.get(key)?.clone();
        self.touch(key);
        Some(artifact)
    }

    /// Insert an artifact, evicting the least recently used entry when full.
    pub fn insert(&mut self, key: ThumbnailKey, artifact: ThumbnailArtifact) {
        if self.capacity == 0 {
            return;
        }

        if self.entries.insert(key, artifact).is_some() {
            self.touch(&key);
            return;
        }

        self.recency.push_back(key);
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.recency.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            log::trace!("Evicted thumbnail for point {}", oldest.point_id);
        }
    }

    /// Drop every cached thumbnail.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    fn touch(&mut self, key: &ThumbnailKey) {
        if let Some(pos) = self.recency.iter().position(|k| k == key) {
            self.recency.remove(pos);
        }
        self.recency.push_back(*key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thumbnail::ThumbnailFormat;

    fn key(point_id: usize) -> ThumbnailKey {
        ThumbnailKey {
            point_id,
            options: RenderOptions::new(128),
        }
    }

    fn artifact(tag: u8) -> ThumbnailArtifact {
        ThumbnailArtifact {
            bytes: vec![tag],
            format: ThumbnailFormat::Jpeg,
            width: 1,
            height: 1,
        }
    }

    #[test]
    fn test_cache_creation() {
        let cache = ThumbnailCache::new(2);
        assert_eq!(cache.capacity(), 2);
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = ThumbnailCache::new(2);
        cache.insert(key(0), artifact(0));
        cache.insert(key(1), artifact(1));

        // Touch 0 so that 1 becomes the eviction candidate
        assert_eq!(cache.get(&key(0)), Some(artifact(0)));
        cache.insert(key(2), artifact(2));

        assert!(cache.contains(&key(0)));
        assert!(!cache.contains(&key(1)));
        assert!(cache.contains(&key(2)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_reinsert_replaces_without_growing() {
        let mut cache = ThumbnailCache::new(2);
        cache.insert(key(0), artifact(0));
        cache.insert(key(0), artifact(9));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key(0)), Some(artifact(9)));
    }

    #[test]
    fn test_options_are_part_of_the_key() {
        let mut cache = ThumbnailCache::new(4);
        cache.insert(key(0), artifact(0));

        let gray = ThumbnailKey {
            point_id: 0,
            options: RenderOptions::new(128).with_channel(Some(1)),
        };
        assert!(cache.get(&gray).is_none());
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        let mut cache = ThumbnailCache::new(0);
        cache.insert(key(0), artifact(0));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cache = ThumbnailCache::new(1);
        cache.insert(key(3), artifact(3));
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&key(3)).is_none());
    }
}
