//! Observer registry and broadcast.
//!
//! Observers are held in an ordered map keyed by [`ObserverId`].  A
//! broadcast clones the current set first and then calls out, so an
//! observer list edited mid-broadcast cannot invalidate the iteration.
//! Each delivery runs under `catch_unwind`: a panicking observer is logged
//! and skipped, the remaining observers are still notified, and nothing
//! already persisted is touched.

use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use log::warn;

use super::events::PanelEvent;
use super::ports::StatusObserver;

/// Handle returned by [`ObserverSet::add`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

/// Result of one broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delivery {
    pub delivered: usize,
    pub failed: usize,
}

#[derive(Default)]
pub struct ObserverSet {
    observers: BTreeMap<ObserverId, Arc<dyn StatusObserver>>,
    next_id: u64,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, observer: Arc<dyn StatusObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.insert(id, observer);
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        self.observers.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver `event` to every registered observer.
    pub fn broadcast(&self, event: PanelEvent) -> Delivery {
        let snapshot: Vec<(ObserverId, Arc<dyn StatusObserver>)> = self
            .observers
            .iter()
            .map(|(id, obs)| (*id, Arc::clone(obs)))
            .collect();

        let mut delivery = Delivery::default();
        for (id, observer) in snapshot {
            let outcome = catch_unwind(AssertUnwindSafe(|| event.deliver(observer.as_ref())));
            match outcome {
                Ok(()) => delivery.delivered += 1,
                Err(_) => {
                    delivery.failed += 1;
                    warn!("Observer {:?} panicked handling {:?}", id, event);
                }
            }
        }
        delivery
    }
}

impl core::fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObserverSet")
            .field("ids", &self.observers.keys().collect::<Vec<_>>())
            .finish()
    }
}
