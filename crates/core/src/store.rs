//! In-memory feedback store.
//!
//! The store owns the authoritative collection of testimonial records for
//! the lifetime of the process. There is no persistence; a restart discards
//! all state, which is an accepted property of the design.
//!
//! ## Concurrency
//!
//! Every operation is a complete read-modify-write under an exclusive lock,
//! so the store can be shared across request handlers behind an `Arc`.
//! Observer registration uses a separate lock and is safe to call
//! concurrently with mutation.
//!
//! ## Change notification
//!
//! Observers registered with [`FeedbackStore::subscribe`] are invoked
//! synchronously, once per successful mutation, with a full snapshot of the
//! collection (never a diff). Callbacks run outside the record lock, so an
//! observer may call read operations on the store. A panicking observer is
//! isolated: the mutation still completes and the remaining observers are
//! still invoked.

use crate::id::FeedbackId;
use crate::record::{Feedback, FeedbackPatch, NewFeedback};
use chrono::Utc;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

type ObserverFn = dyn Fn(&[Feedback]) + Send + Sync;
type ObserverMap = HashMap<u64, Arc<ObserverFn>>;

/// Authoritative in-memory collection of feedback records.
#[derive(Default)]
pub struct FeedbackStore {
    records: Mutex<HashMap<FeedbackId, Feedback>>,
    observers: Arc<Mutex<ObserverMap>>,
    next_observer_id: AtomicU64,
}

/// Handle returned by [`FeedbackStore::subscribe`].
///
/// Dropping the handle does *not* remove the observer; call
/// [`Subscription::unsubscribe`] explicitly. Calling it more than once is a
/// no-op.
pub struct Subscription {
    observers: Weak<Mutex<ObserverMap>>,
    id: u64,
}

impl Subscription {
    /// Removes the observer from the store.
    pub fn unsubscribe(&self) {
        if let Some(observers) = self.observers.upgrade() {
            observers
                .lock()
                .expect("feedback observer lock poisoned")
                .remove(&self.id);
        }
    }
}

impl FeedbackStore {
    /// Creates an empty store.
    ///
    /// Construct one instance at startup and share it explicitly; the store
    /// is deliberately not a global.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record, newest first.
    pub fn list_all(&self) -> Vec<Feedback> {
        let records = self.records.lock().expect("feedback store lock poisoned");
        let mut all: Vec<Feedback> = records.values().cloned().collect();
        // Tie-break on id so records created within the same instant keep a
        // stable order.
        all.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        all
    }

    /// Approved records only, newest first.
    pub fn list_approved(&self) -> Vec<Feedback> {
        let mut all = self.list_all();
        all.retain(|record| record.approved);
        all
    }

    /// Inserts a new record built from validated input.
    ///
    /// The record gets a freshly generated unique id, `approved = false`,
    /// and the current time as `created_at`. Observers are notified and the
    /// created record is returned.
    pub fn add(&self, input: NewFeedback) -> Feedback {
        let record = {
            let mut records = self.records.lock().expect("feedback store lock poisoned");

            // Generated ids are random; regenerate on the astronomically
            // unlikely collision rather than overwrite a live record.
            let mut id = FeedbackId::generate();
            while records.contains_key(&id) {
                id = FeedbackId::generate();
            }

            let record = Feedback {
                id: id.clone(),
                name: input.name,
                title: input.title,
                body: input.body,
                rating: input.rating,
                approved: false,
                created_at: Utc::now(),
            };
            records.insert(id, record.clone());
            record
        };

        self.notify();
        record
    }

    /// Merges `patch` into the record with the given id.
    ///
    /// Returns the updated record, or `None` if the id is unknown.
    /// Observers are notified whenever a record was found.
    pub fn update(&self, id: &FeedbackId, patch: FeedbackPatch) -> Option<Feedback> {
        let updated = {
            let mut records = self.records.lock().expect("feedback store lock poisoned");
            let record = records.get_mut(id)?;
            patch.apply(record);
            record.clone()
        };

        self.notify();
        Some(updated)
    }

    /// Sets only the approval flag.
    ///
    /// Returns `false` if the id is unknown. Observers are notified on
    /// success.
    pub fn set_approval(&self, id: &FeedbackId, approved: bool) -> bool {
        let found = {
            let mut records = self.records.lock().expect("feedback store lock poisoned");
            match records.get_mut(id) {
                Some(record) => {
                    record.approved = approved;
                    true
                }
                None => false,
            }
        };

        if found {
            self.notify();
        }
        found
    }

    /// Deletes the record with the given id.
    ///
    /// Returns `false` if the id is unknown. Observers are notified on
    /// success.
    pub fn remove(&self, id: &FeedbackId) -> bool {
        let removed = {
            let mut records = self.records.lock().expect("feedback store lock poisoned");
            records.remove(id).is_some()
        };

        if removed {
            self.notify();
        }
        removed
    }

    /// Registers an observer invoked after every successful mutation with a
    /// full [`FeedbackStore::list_all`] snapshot.
    pub fn subscribe(
        &self,
        observer: impl Fn(&[Feedback]) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_observer_id.fetch_add(1, Ordering::Relaxed);
        self.observers
            .lock()
            .expect("feedback observer lock poisoned")
            .insert(id, Arc::new(observer));

        Subscription {
            observers: Arc::downgrade(&self.observers),
            id,
        }
    }

    fn notify(&self) {
        let snapshot = self.list_all();

        // Clone the observer list out of the lock so callbacks can
        // subscribe/unsubscribe without deadlocking.
        let observers: Vec<Arc<ObserverFn>> = self
            .observers
            .lock()
            .expect("feedback observer lock poisoned")
            .values()
            .cloned()
            .collect();

        for observer in observers {
            if catch_unwind(AssertUnwindSafe(|| observer(&snapshot))).is_err() {
                tracing::warn!("feedback observer panicked; continuing with remaining observers");
            }
        }
    }
}
