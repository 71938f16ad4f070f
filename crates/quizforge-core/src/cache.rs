//! Process-lifetime memoization of generated question sets.
//!
//! Entries are keyed by the full [`QuizConfig`] value and never evicted.
//! Each key owns a [`OnceCell`], so concurrent requests for the same key
//! populate it at most once: later racers wait for the first and reuse its
//! result. A failed population removes the empty cell and the next request
//! tries again, so only successes are ever cached.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;

use crate::error::QuizError;
use crate::model::{Question, QuizConfig};

type Slot = Arc<OnceCell<Arc<Vec<Question>>>>;

/// Memoization cache for synthesized questions.
#[derive(Default)]
pub struct QuestionCache {
    slots: Mutex<HashMap<QuizConfig, Slot>>,
}

impl QuestionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached questions for `key`, or run `init` to produce them.
    ///
    /// The returned flag is `true` when the value came from the cache.
    pub async fn get_or_try_insert<F, Fut>(
        &self,
        key: &QuizConfig,
        init: F,
    ) -> Result<(Arc<Vec<Question>>, bool), QuizError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Question>, QuizError>>,
    {
        let slot = self.slot(key);
        if let Some(questions) = slot.get() {
            return Ok((Arc::clone(questions), true));
        }

        let mut populated = false;
        let result = slot
            .get_or_try_init(|| async {
                populated = true;
                init().await.map(Arc::new)
            })
            .await;

        match result {
            Ok(questions) => {
                // A failed racer may have dropped this slot from the map.
                self.lock()
                    .entry(key.clone())
                    .or_insert_with(|| Arc::clone(&slot));
                Ok((Arc::clone(questions), !populated))
            }
            Err(e) => {
                self.discard_empty(key, &slot);
                Err(e)
            }
        }
    }

    /// Cached questions for `key`, if present.
    pub fn get(&self, key: &QuizConfig) -> Option<Arc<Vec<Question>>> {
        self.lock()
            .get(key)
            .and_then(|slot| slot.get().map(Arc::clone))
    }

    /// Number of successfully cached entries.
    pub fn len(&self) -> usize {
        self.lock().values().filter(|s| s.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, key: &QuizConfig) -> Slot {
        Arc::clone(self.lock().entry(key.clone()).or_default())
    }

    fn discard_empty(&self, key: &QuizConfig, slot: &Slot) {
        let mut slots = self.lock();
        let stale = slots
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && !current.initialized());
        if stale {
            slots.remove(key);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<QuizConfig, Slot>> {
        // The map is only touched in short non-panicking sections, so a
        // poisoned lock still holds a consistent map.
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}
