// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::utils::TestEnv;
use crate::{
    AttributedString, CacheId, CacheKey, Error, Fragment, LayoutCache, LayoutConfig, MeasureMode,
    ParagraphAttributes, StyledText,
};

fn build_counting(counter: &AtomicUsize, text: &str) -> Result<StyledText, Error> {
    counter.fetch_add(1, Ordering::Relaxed);
    Ok(StyledText::new(text))
}

#[test]
fn content_hits_reuse_the_buffer() {
    let cache = LayoutCache::default();
    let builds = AtomicUsize::new(0);
    let fragments = [Fragment::new("Hello")];

    let first = cache
        .get_or_build(cache.content_key(&fragments), || build_counting(&builds, "Hello"))
        .unwrap();
    let second = cache
        .get_or_build(cache.content_key(&fragments), || build_counting(&builds, "Hello"))
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second), "second lookup hits");
    assert_eq!(builds.load(Ordering::Relaxed), 1);
    assert_eq!(cache.implicit_len(), 1);
    assert_eq!(cache.explicit_len(), 0);
}

#[test]
fn equal_content_shares_a_key() {
    let cache = LayoutCache::default();
    let key = cache.content_key(&[Fragment::new("a"), Fragment::new("b")]);
    assert_eq!(key, cache.content_key(&[Fragment::new("a"), Fragment::new("b")]));
    assert_ne!(key, cache.content_key(&[Fragment::new("ab")]));
}

#[test]
fn removed_entries_are_rebuilt() {
    let cache = LayoutCache::default();
    let builds = AtomicUsize::new(0);
    let key = cache.content_key(&[Fragment::new("x")]);

    cache.get_or_build(key.clone(), || build_counting(&builds, "x")).unwrap();
    assert!(cache.remove(&key).is_some(), "entry was cached");
    assert!(cache.get(&key).is_none(), "entry is gone");
    cache.get_or_build(key, || build_counting(&builds, "x")).unwrap();
    assert_eq!(builds.load(Ordering::Relaxed), 2);
}

#[test]
fn least_recently_used_content_is_evicted() {
    let cache = LayoutCache::new(2);
    let key = |text: &str| cache.content_key(&[Fragment::new(text)]);
    let put = |text: &str| {
        cache
            .get_or_build(key(text), || Ok::<_, Error>(StyledText::new(text)))
            .unwrap()
    };

    put("a");
    put("b");
    // Touch "a" so "b" becomes the oldest entry.
    assert!(cache.get(&key("a")).is_some(), "a is cached");
    put("c");

    assert_eq!(cache.implicit_len(), 2);
    assert!(cache.get(&key("a")).is_some(), "recently used entry survives");
    assert!(cache.get(&key("b")).is_none(), "oldest entry is evicted");
    assert!(cache.get(&key("c")).is_some(), "new entry is cached");
}

#[test]
fn explicit_entries_are_never_evicted() {
    let cache = LayoutCache::new(1);
    for id in 0..5 {
        cache.put(CacheKey::Id(CacheId(id)), StyledText::new("pinned"));
    }
    cache.put(cache.content_key(&[Fragment::new("a")]), StyledText::new("a"));
    cache.put(cache.content_key(&[Fragment::new("b")]), StyledText::new("b"));

    assert_eq!(cache.explicit_len(), 5);
    assert_eq!(cache.implicit_len(), 1);
}

#[test]
fn put_replaces_explicit_entries() {
    let cache = LayoutCache::default();
    let key = CacheKey::Id(CacheId(7));
    cache.put(key.clone(), StyledText::new("old"));
    cache.put(key.clone(), StyledText::new("new"));
    assert_eq!(cache.get(&key).unwrap().as_str(), "new");
}

#[test]
fn failed_builds_are_not_cached() {
    let cache = LayoutCache::default();
    let key = cache.content_key(&[Fragment::new("bad")]);
    let result = cache.get_or_build(key.clone(), || {
        Err(Error::StaleCacheReference(CacheId(0)))
    });
    assert!(result.is_err(), "build error is returned");
    assert!(cache.get(&key).is_none(), "nothing was stored");
}

#[test]
fn concurrent_lookups_agree() {
    let cache = LayoutCache::default();
    let fragments = [Fragment::new("shared")];
    let results: Vec<Arc<StyledText>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    cache
                        .get_or_build(cache.content_key(&fragments), || {
                            Ok::<_, Error>(StyledText::new("shared"))
                        })
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(cache.implicit_len(), 1);
    let stored = cache.get(&cache.content_key(&fragments)).unwrap();
    assert!(
        results.iter().all(|text| Arc::ptr_eq(text, &stored)),
        "every caller sees the stored buffer"
    );
}

#[test]
fn stale_cache_reference_is_an_error() {
    let env = TestEnv::new();
    let result = env.manager.measure(
        &AttributedString::cached(CacheId(42)),
        &ParagraphAttributes::default(),
        100.0,
        MeasureMode::AtMost,
        0.0,
        MeasureMode::Undefined,
    );
    assert!(
        matches!(result, Err(Error::StaleCacheReference(CacheId(42)))),
        "unexpected result: {result:?}"
    );
}

#[test]
fn installed_buffers_are_measured_by_id() {
    let env = TestEnv::new();
    let id = CacheId(3);
    let content = AttributedString::new(vec![Fragment::new("Hello world")]);
    env.manager.set_cached_buffer(id, &content).unwrap();

    let measure = |attributed: &AttributedString| {
        env.manager.measure(
            attributed,
            &ParagraphAttributes::default(),
            200.0,
            MeasureMode::AtMost,
            0.0,
            MeasureMode::Undefined,
        )
    };
    let by_id = measure(&AttributedString::cached(id)).unwrap();
    let by_content = measure(&content).unwrap();
    assert_eq!(by_id, by_content);

    assert!(env.manager.delete_cached_buffer(id), "buffer was installed");
    assert!(!env.manager.delete_cached_buffer(id), "buffer is already gone");
    assert!(
        matches!(
            measure(&AttributedString::cached(id)),
            Err(Error::StaleCacheReference(_))
        ),
        "deleted id is stale"
    );
}

#[test]
fn lookups_never_install_ids() {
    let env = TestEnv::new();
    let id = CacheId(9);
    let content = AttributedString::new(vec![Fragment::new("abc")]);
    env.manager.set_cached_buffer(id, &content).unwrap();
    assert!(env.manager.delete_cached_buffer(id), "buffer was installed");

    for n in 0..50 {
        let attributed = AttributedString {
            cache_key: Some(CacheId(100 + n)),
            ..content.clone()
        };
        let text = env.manager.styled_text(&attributed).unwrap();
        assert_eq!(text.as_str(), "abc");
    }
    let with_deleted_id = AttributedString {
        cache_key: Some(id),
        ..content.clone()
    };
    env.manager.styled_text(&with_deleted_id).unwrap();

    assert_eq!(env.manager.cache().explicit_len(), 0);
    assert_eq!(env.manager.cache().implicit_len(), 1, "fragments share one content entry");
    assert!(
        matches!(
            env.manager.styled_text(&AttributedString::cached(id)),
            Err(Error::StaleCacheReference(_))
        ),
        "deleted id stays deleted"
    );
}

#[test]
fn installed_ids_win_over_fragments() {
    let env = TestEnv::new();
    let id = CacheId(4);
    let installed = env
        .manager
        .set_cached_buffer(id, &AttributedString::new(vec![Fragment::new("installed")]))
        .unwrap();
    let attributed = AttributedString {
        cache_key: Some(id),
        ..AttributedString::new(vec![Fragment::new("other")])
    };
    let text = env.manager.styled_text(&attributed).unwrap();
    assert!(Arc::ptr_eq(&text, &installed), "the installed buffer is used");
}

#[test]
fn id_misses_build_without_storing() {
    let cache = LayoutCache::default();
    let builds = AtomicUsize::new(0);
    let key = CacheKey::Id(CacheId(1));
    let text = cache.get_or_build(key.clone(), || build_counting(&builds, "a")).unwrap();
    assert_eq!(text.as_str(), "a");
    assert!(cache.get(&key).is_none(), "ids are only installed by put");
    assert_eq!(cache.explicit_len(), 0);
}

#[test]
fn manager_cache_follows_configuration() {
    let env = TestEnv::with_config(LayoutConfig::default().with_cache_capacity(3));
    assert_eq!(env.manager.cache().capacity(), 3);
    for text in ["a", "b", "c", "d"] {
        env.manager
            .styled_text(&AttributedString::new(vec![Fragment::new(text)]))
            .unwrap();
    }
    assert_eq!(env.manager.cache().implicit_len(), 3);
}
