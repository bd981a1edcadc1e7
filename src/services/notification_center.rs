// src/services/notification_center.rs
//
// Notification Center - the toast queue
//
// CRITICAL RULES:
// - Never fails; unknown ids are ignored
// - No deduplication; identical titles may coexist
// - At most one lifetime timer per notification
// - Publishes a snapshot after every change

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::domain::{Notification, PartialNotification};
use crate::events::{EventBus, NotificationQueueChanged};

struct Lifetime {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Ordered queue of notifications waiting to be shown or dismissed.
///
/// Cloning is cheap and yields a handle to the same queue.
#[derive(Clone)]
pub struct NotificationCenter {
    queue: Arc<RwLock<Vec<Notification>>>,
    lifetimes: Arc<Mutex<HashMap<String, Lifetime>>>,
    next_generation: Arc<AtomicU64>,
    event_bus: Arc<EventBus>,
}

impl NotificationCenter {
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self {
            queue: Arc::new(RwLock::new(Vec::new())),
            lifetimes: Arc::new(Mutex::new(HashMap::new())),
            next_generation: Arc::new(AtomicU64::new(0)),
            event_bus,
        }
    }

    /// Appends a notification and returns its id.
    pub fn notify(&self, input: PartialNotification) -> String {
        let notification = input.complete();
        let id = notification.id.clone();

        log::debug!(
            "notification {} [{}] {}",
            id,
            notification.kind,
            notification.title
        );

        let snapshot = {
            let mut queue = self.queue.write().unwrap();
            queue.push(notification);
            queue.clone()
        };

        self.event_bus.emit(NotificationQueueChanged::new(snapshot));
        id
    }

    /// Appends a notification that dismisses itself after `after`.
    pub fn notify_with_lifetime(&self, input: PartialNotification, after: Duration) -> String {
        let id = self.notify(input);
        self.schedule_dismiss(&id, after);
        id
    }

    /// Removes the notification with `id`. Unknown ids are a no-op.
    pub fn dismiss(&self, id: &str) {
        if let Some(lifetime) = self.lifetimes.lock().unwrap().remove(id) {
            lifetime.handle.abort();
        }
        self.remove(id);
    }

    /// Dismisses `id` once `after` has elapsed.
    ///
    /// A notification has at most one active lifetime: scheduling again
    /// cancels the previous timer. Ignored for unknown ids and outside a Tokio
    /// runtime.
    pub fn schedule_dismiss(&self, id: &str, after: Duration) {
        if !self.contains(id) {
            log::debug!("not scheduling lifetime for unknown notification {}", id);
            return;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                log::warn!("no async runtime; notification {} will not expire", id);
                return;
            }
        };

        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);

        // Held while spawning so the timer cannot look itself up before it is
        // registered.
        let mut lifetimes = self.lifetimes.lock().unwrap();

        let center = self.clone();
        let owned_id = id.to_string();
        let handle = runtime.spawn(async move {
            tokio::time::sleep(after).await;
            center.expire(&owned_id, generation);
        });

        if let Some(previous) = lifetimes.insert(id.to_string(), Lifetime { generation, handle }) {
            previous.handle.abort();
        }
    }

    /// Removes everything and cancels every pending timer.
    pub fn clear(&self) {
        for (_, lifetime) in self.lifetimes.lock().unwrap().drain() {
            lifetime.handle.abort();
        }

        let changed = {
            let mut queue = self.queue.write().unwrap();
            let changed = !queue.is_empty();
            queue.clear();
            changed
        };

        if changed {
            self.event_bus.emit(NotificationQueueChanged::new(Vec::new()));
        }
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.queue.read().unwrap().clone()
    }

    pub fn get(&self, id: &str) -> Option<Notification> {
        self.queue.read().unwrap().iter().find(|n| n.id == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.queue.read().unwrap().iter().any(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.queue.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.read().unwrap().is_empty()
    }

    /// Number of notifications with a running lifetime timer
    pub fn active_lifetimes(&self) -> usize {
        self.lifetimes.lock().unwrap().len()
    }

    fn expire(&self, id: &str, generation: u64) {
        {
            let mut lifetimes = self.lifetimes.lock().unwrap();
            match lifetimes.get(id) {
                Some(current) if current.generation == generation => {
                    lifetimes.remove(id);
                }
                // Superseded or already dismissed
                _ => return,
            }
        }
        log::debug!("notification {} expired", id);
        self.remove(id);
    }

    fn remove(&self, id: &str) {
        let snapshot = {
            let mut queue = self.queue.write().unwrap();
            let before = queue.len();
            queue.retain(|n| n.id != id);
            if queue.len() == before {
                return;
            }
            queue.clone()
        };

        self.event_bus.emit(NotificationQueueChanged::new(snapshot));
    }
}
