//! Per-section reveal flags.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

/// Default delay between successive items of a revealed section.
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(100);

/// Default fade-in length of a revealed item.
pub const DEFAULT_FADE: Duration = Duration::from_millis(600);

/// Remembers which sections have been revealed and when.
///
/// A section is revealed at most once; later calls keep the first time.
#[derive(Debug, Clone)]
pub struct RevealStore<K> {
    revealed_at: HashMap<K, Duration>,
    stagger: Duration,
    fade: Duration,
}

impl<K: Copy + Eq + Hash> Default for RevealStore<K> {
    fn default() -> Self {
        Self::new(DEFAULT_STAGGER, DEFAULT_FADE)
    }
}

impl<K: Copy + Eq + Hash> RevealStore<K> {
    pub fn new(stagger: Duration, fade: Duration) -> Self {
        Self {
            revealed_at: HashMap::new(),
            stagger,
            fade,
        }
    }

    /// Mark `key` revealed at `now`. Returns true the first time only.
    pub fn reveal(&mut self, key: K, now: Duration) -> bool {
        if self.revealed_at.contains_key(&key) {
            return false;
        }
        self.revealed_at.insert(key, now);
        true
    }

    pub fn is_revealed(&self, key: K) -> bool {
        self.revealed_at.contains_key(&key)
    }

    pub fn revealed_at(&self, key: K) -> Option<Duration> {
        self.revealed_at.get(&key).copied()
    }

    /// Whether item `index` of a revealed section has started its entry.
    pub fn item_visible(&self, key: K, index: usize, now: Duration) -> bool {
        self.item_progress(key, index, now) > 0.0
    }

    /// Fade-in progress of the whole section, in `[0, 1]`.
    pub fn progress(&self, key: K, now: Duration) -> f32 {
        self.item_progress(key, 0, now)
    }

    /// Fade-in progress of item `index`, delayed by `index * stagger`.
    pub fn item_progress(&self, key: K, index: usize, now: Duration) -> f32 {
        let Some(start) = self.revealed_at(key) else {
            return 0.0;
        };
        let start = start + self.stagger * index as u32;
        if now < start {
            return 0.0;
        }
        if self.fade.is_zero() {
            return 1.0;
        }
        // The first instant of an item counts as started.
        let elapsed = (now - start).as_secs_f32();
        (elapsed / self.fade.as_secs_f32()).clamp(f32::EPSILON, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Section {
        About,
        Skills,
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_reveal_once() {
        let mut store = RevealStore::default();
        assert!(!store.is_revealed(Section::About));
        assert!(store.reveal(Section::About, ms(100)));
        assert!(!store.reveal(Section::About, ms(900)));
        assert_eq!(store.revealed_at(Section::About), Some(ms(100)));
        assert!(!store.is_revealed(Section::Skills));
    }

    #[test]
    fn test_stagger() {
        let mut store = RevealStore::new(ms(100), ms(600));
        store.reveal(Section::Skills, ms(1000));
        assert!(store.item_visible(Section::Skills, 0, ms(1000)));
        assert!(!store.item_visible(Section::Skills, 2, ms(1150)));
        assert!(store.item_visible(Section::Skills, 2, ms(1200)));
        assert!(!store.item_visible(Section::About, 0, ms(5000)));
    }

    #[test]
    fn test_progress_clamps() {
        let mut store = RevealStore::new(ms(100), ms(600));
        assert_eq!(store.progress(Section::About, ms(0)), 0.0);
        store.reveal(Section::About, ms(0));
        let half = store.progress(Section::About, ms(300));
        assert!((half - 0.5).abs() < 1e-4);
        assert_eq!(store.progress(Section::About, ms(10_000)), 1.0);
    }
}
