use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Duration;
use uuid::Uuid;

/// Keys for one-shot delayed work. One pending task per key; scheduling a
/// key again replaces its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    NotificationRead,
    SaveAck,
    SearchMessageClear,
}

impl TaskKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotificationRead => "notification-read",
            Self::SaveAck => "save-ack",
            Self::SearchMessageClear => "search-message-clear",
        }
    }
}

struct PendingTask {
    token: Uuid,
    handle: JoinHandle<()>,
}

/// Delayed-work registry for the dashboard session: at most one pending
/// one-shot per key, plus the single recurring metric tick. `shutdown`
/// aborts everything so teardown never leaves a dangling timer.
#[derive(Clone, Default)]
pub struct TaskScheduler {
    pending: Arc<Mutex<HashMap<TaskKey, PendingTask>>>,
    recurring: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` once after `delay`. Must be called from within a tokio
    /// runtime. Returns the token identifying this scheduling.
    pub fn schedule_once<F, Fut>(&self, key: TaskKey, delay: Duration, task: F) -> Uuid
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = Uuid::new_v4();
        let pending = Arc::clone(&self.pending);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task().await;
            let mut map = pending.lock().expect("scheduler pending lock");
            if map.get(&key).is_some_and(|entry| entry.token == token) {
                map.remove(&key);
            }
        });

        let mut map = self.pending.lock().expect("scheduler pending lock");
        if let Some(previous) = map.insert(key, PendingTask { token, handle }) {
            previous.handle.abort();
            tracing::debug!(key = key.as_str(), "replaced pending task");
        }
        token
    }

    /// Aborts the pending task for `key`, if any.
    pub fn cancel(&self, key: TaskKey) -> bool {
        let mut map = self.pending.lock().expect("scheduler pending lock");
        match map.remove(&key) {
            Some(entry) => {
                entry.handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn has_pending(&self, key: TaskKey) -> bool {
        let map = self.pending.lock().expect("scheduler pending lock");
        map.contains_key(&key)
    }

    /// Registers the recurring task. The first interval tick resolves
    /// immediately and is consumed, so `task` first runs after one full
    /// period. Returns false when a recurring task is already registered.
    pub fn start_recurring<F, Fut>(&self, period: Duration, mut task: F) -> bool
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut slot = self.recurring.lock().expect("scheduler recurring lock");
        if slot.is_some() {
            return false;
        }
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                task().await;
            }
        });
        *slot = Some(handle);
        true
    }

    pub fn stop_recurring(&self) -> bool {
        let mut slot = self.recurring.lock().expect("scheduler recurring lock");
        match slot.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Aborts the recurring task and every pending one-shot.
    pub fn shutdown(&self) {
        self.stop_recurring();
        let mut map = self.pending.lock().expect("scheduler pending lock");
        for (key, entry) in map.drain() {
            entry.handle.abort();
            tracing::debug!(key = key.as_str(), "cancelled pending task at shutdown");
        }
    }
}
