// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prepared buffers shared between measurement calls.

use core::fmt;
use core::hash::BuildHasher;
use std::sync::Arc;

use hashbrown::{DefaultHashBuilder, HashMap};
use parking_lot::{Mutex, RwLock};

use crate::lru_cache::LruCache;
use crate::model::{CacheId, Fragment};
use crate::spans::StyledText;

/// Identifies a fragment list by content.
#[derive(Clone, Debug)]
pub struct ContentKey {
    hash: u64,
    fragments: Arc<[Fragment]>,
}

impl ContentKey {
    /// The hash of the fragments.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// The fragments the key stands for.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }
}

impl PartialEq for ContentKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.fragments == other.fragments
    }
}

/// Key of a [`LayoutCache`] entry.
///
/// Explicit ids and content keys live in separate tables and never collide.
#[derive(Clone, Debug, PartialEq)]
pub enum CacheKey {
    /// A buffer installed and removed by its owner.
    Id(CacheId),
    /// A buffer derived from fragment content, evicted when least recently used.
    Content(ContentKey),
}

/// A thread-safe cache of flattened buffers.
///
/// Buffers keyed by [`CacheId`] stay until removed. Buffers keyed by content are kept in
/// a bounded least-recently-used table.
pub struct LayoutCache {
    explicit: RwLock<HashMap<CacheId, Arc<StyledText>>>,
    implicit: Mutex<LruCache<ContentKey, Arc<StyledText>>>,
    capacity: usize,
    hasher: DefaultHashBuilder,
}

impl fmt::Debug for LayoutCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutCache")
            .field("explicit", &self.explicit.read().len())
            .field("implicit", &self.implicit.lock().len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(100)
    }
}

impl LayoutCache {
    /// Creates a cache holding up to `capacity` content-keyed buffers.
    pub fn new(capacity: usize) -> Self {
        Self {
            explicit: RwLock::new(HashMap::new()),
            implicit: Mutex::new(LruCache::new(capacity)),
            capacity: capacity.max(1),
            hasher: DefaultHashBuilder::default(),
        }
    }

    /// Maximum number of content-keyed buffers.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of buffers installed under an explicit id.
    pub fn explicit_len(&self) -> usize {
        self.explicit.read().len()
    }

    /// Number of content-keyed buffers.
    pub fn implicit_len(&self) -> usize {
        self.implicit.lock().len()
    }

    /// Returns the content key of `fragments`.
    pub fn content_key(&self, fragments: &[Fragment]) -> CacheKey {
        CacheKey::Content(ContentKey {
            hash: self.hasher.hash_one(fragments),
            fragments: fragments.into(),
        })
    }

    /// Returns the buffer stored under `key`.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<StyledText>> {
        let found = match key {
            CacheKey::Id(id) => self.explicit.read().get(id).cloned(),
            CacheKey::Content(content) => self.implicit.lock().get(content).cloned(),
        };
        match key {
            CacheKey::Id(id) => tracing::debug!(%id, hit = found.is_some(), "layout cache lookup"),
            CacheKey::Content(content) => {
                tracing::debug!(hash = content.hash, hit = found.is_some(), "layout cache lookup");
            }
        }
        found
    }

    /// Returns the buffer stored under `key`, building it on a miss.
    ///
    /// Content-keyed buffers are stored once built. Explicit ids are only installed by
    /// [`LayoutCache::put`], so a miss on an id returns the built buffer without storing
    /// it. `build` runs without holding any lock. When two callers race on the same
    /// content key, the first insert wins and both receive the stored buffer.
    pub fn get_or_build<E>(
        &self,
        key: CacheKey,
        build: impl FnOnce() -> Result<StyledText, E>,
    ) -> Result<Arc<StyledText>, E> {
        if let Some(text) = self.get(&key) {
            return Ok(text);
        }
        let built = Arc::new(build()?);
        Ok(match key {
            CacheKey::Id(_) => built,
            CacheKey::Content(content) => self.insert_implicit(content, built),
        })
    }

    /// Stores `text` under `key`, replacing any previous buffer.
    pub fn put(&self, key: CacheKey, text: StyledText) -> Arc<StyledText> {
        let text = Arc::new(text);
        match key {
            CacheKey::Id(id) => {
                self.explicit.write().insert(id, text.clone());
                text
            }
            CacheKey::Content(content) => {
                self.implicit.lock().remove(&content);
                self.insert_implicit(content, text)
            }
        }
    }

    /// Removes the buffer stored under `key`, returning it.
    pub fn remove(&self, key: &CacheKey) -> Option<Arc<StyledText>> {
        match key {
            CacheKey::Id(id) => self.explicit.write().remove(id),
            CacheKey::Content(content) => self.implicit.lock().remove(content),
        }
    }

    fn insert_implicit(&self, key: ContentKey, text: Arc<StyledText>) -> Arc<StyledText> {
        let mut implicit = self.implicit.lock();
        let (stored, evicted) = implicit.get_or_insert(key, text);
        let stored = stored.clone();
        if let Some(evicted) = evicted {
            tracing::debug!(hash = evicted.hash, "evicted buffer from layout cache");
        }
        stored
    }
}
