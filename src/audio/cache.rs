use crate::audio::synth::SynthesizedClip;
use crate::error::Result;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

type Slot = Arc<OnceCell<Arc<SynthesizedClip>>>;

/// Keyed store of synthesized clips.
///
/// Each key owns a slot that is filled at most once. The map lock is only
/// held while looking up the slot, so synthesis of one key never blocks
/// lookups of another, while concurrent callers of the same key wait for a
/// single synthesis instead of running their own.
#[derive(Default)]
pub struct ClipCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl ClipCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached clip for `key`, running `synthesize` on a miss.
    ///
    /// A failed synthesis frees the key so a later call can retry.
    pub fn get_or_create<F>(&self, key: &str, synthesize: F) -> Result<Arc<SynthesizedClip>>
    where
        F: FnOnce() -> Result<SynthesizedClip>,
    {
        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(slots.entry(key.to_string()).or_default())
        };

        let result = slot
            .get_or_try_init(|| {
                tracing::debug!(key, "synthesizing clip");
                synthesize().map(Arc::new)
            })
            .map(Arc::clone);

        if result.is_err() {
            let mut slots = self.slots.lock();
            // only drop our own empty slot, never a replacement or a filled one
            if slots
                .get(key)
                .is_some_and(|current| Arc::ptr_eq(current, &slot) && current.get().is_none())
            {
                slots.remove(key);
            }
        }
        result
    }

    /// Cached clip for `key`, or `None` when it was never synthesized.
    pub fn get(&self, key: &str) -> Option<Arc<SynthesizedClip>> {
        self.slots
            .lock()
            .get(key)
            .and_then(|slot| slot.get().cloned())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys holding a clip.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evicts one key, returning its clip if it had one.
    pub fn remove(&self, key: &str) -> Option<Arc<SynthesizedClip>> {
        self.slots
            .lock()
            .remove(key)
            .and_then(|slot| slot.get().cloned())
    }

    /// Evicts every clip; later lookups synthesize again.
    pub fn clear(&self) {
        let mut slots = self.slots.lock();
        tracing::debug!(entries = slots.len(), "clearing clip cache");
        slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::catalog::SoundEffect;
    use crate::audio::synth::ClipSynthesizer;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn pickup(cache: &ClipCache) -> Arc<SynthesizedClip> {
        cache
            .get_or_create("pickup", || {
                ClipSynthesizer::new().render(SoundEffect::Pickup.recipe())
            })
            .unwrap()
    }

    #[test]
    fn test_same_key_returns_same_instance() {
        let cache = ClipCache::new();
        let first = pickup(&cache);
        let second = pickup(&cache);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_forces_new_synthesis() {
        let cache = ClipCache::new();
        let first = pickup(&cache);
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("pickup").is_none());

        let second = pickup(&cache);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_unknown_key_is_none() {
        let cache = ClipCache::new();
        assert!(cache.get("nothing-here").is_none());
        assert!(!cache.contains("nothing-here"));
    }

    #[test]
    fn test_failed_synthesis_can_retry() {
        let cache = ClipCache::new();
        let failed = cache.get_or_create("broken", || Err(Error::InvalidRecipe("nope".into())));
        assert!(failed.is_err());
        assert!(!cache.contains("broken"));

        let clip = cache
            .get_or_create("broken", || Ok(SynthesizedClip::new(vec![0.0; 4])))
            .unwrap();
        assert_eq!(clip.len(), 4);
    }

    #[test]
    fn test_failed_keys_leave_no_slots() {
        let cache = ClipCache::new();
        for i in 0..32 {
            let key = format!("broken-{}", i);
            assert!(cache
                .get_or_create(&key, || Err(Error::InvalidRecipe("nope".into())))
                .is_err());
        }
        assert!(cache.slots.lock().is_empty());

        pickup(&cache);
        assert_eq!(cache.slots.lock().len(), 1);
    }

    #[test]
    fn test_concurrent_requests_synthesize_once() {
        let cache = Arc::new(ClipCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                thread::spawn(move || {
                    cache
                        .get_or_create("magic", || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            ClipSynthesizer::new().render(SoundEffect::Magic.recipe())
                        })
                        .unwrap()
                })
            })
            .collect();

        let clips: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(clips.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
