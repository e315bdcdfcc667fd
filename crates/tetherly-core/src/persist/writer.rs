// ── Background storage writer ──
//
// Callers never wait on individual writes. Changed pieces of state are
// serialized on the caller's side and queued; a blocking task drains
// the queue in order, so the last write for a key always wins.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{KeyValueStore, PersistencePolicy, StorageKey, encode};
use crate::error::CoreError;
use crate::store::HotspotStore;

enum WriteOp {
    Set { key: StorageKey, value: String },
    Clear,
}

impl std::fmt::Debug for WriteOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Set { key, value } => write!(f, "Set({key}, {} bytes)", value.len()),
            Self::Clear => f.write_str("Clear"),
        }
    }
}

/// Handle to the writer task plus the bookkeeping of what it has been
/// asked to write.
///
/// Must be created inside a tokio runtime. Call [`close`](Self::close)
/// before exiting so queued writes reach the backend.
#[derive(Debug)]
pub struct Persistence {
    tx: mpsc::UnboundedSender<WriteOp>,
    task: JoinHandle<Vec<CoreError>>,
    policy: PersistencePolicy,
    queued: HashMap<StorageKey, u64>,
}

impl Persistence {
    /// Start the writer. `store` is taken as already persisted: only
    /// changes made after this call are written.
    pub fn spawn(
        backend: Arc<dyn KeyValueStore>,
        policy: PersistencePolicy,
        store: &HotspotStore,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::task::spawn_blocking(move || writer_loop(rx, backend.as_ref(), policy));
        Self {
            tx,
            task,
            policy,
            queued: current_versions(store),
        }
    }

    pub fn policy(&self) -> PersistencePolicy {
        self.policy
    }

    /// Queue every piece of state whose version moved since it was last
    /// queued. Returns how many writes were queued.
    pub fn sync(&mut self, store: &HotspotStore) -> Result<usize, CoreError> {
        let mut queued = 0;
        for key in StorageKey::ALL {
            let version = store.version(key);
            if self.queued.get(&key) == Some(&version) {
                continue;
            }
            match encode(store, key) {
                Ok(value) => {
                    self.tx
                        .send(WriteOp::Set { key, value })
                        .map_err(|_| CoreError::WriterClosed)?;
                    queued += 1;
                }
                Err(e) if self.policy == PersistencePolicy::Silent => {
                    warn!(key = %key, error = %e, "skipping unserializable state");
                }
                Err(e) => return Err(CoreError::persistence(key.as_str(), e)),
            }
            self.queued.insert(key, version);
        }
        if queued > 0 {
            debug!(queued, "queued state writes");
        }
        Ok(queued)
    }

    /// Queue removal of every stored key. The current in-memory state is
    /// treated as persisted, so the next start falls back to the seed.
    pub fn clear(&mut self, store: &HotspotStore) -> Result<(), CoreError> {
        self.tx
            .send(WriteOp::Clear)
            .map_err(|_| CoreError::WriterClosed)?;
        self.queued = current_versions(store);
        Ok(())
    }

    /// Drain the queue and stop the writer. Under
    /// [`PersistencePolicy::Surface`] the first write failure is returned.
    pub async fn close(self) -> Result<(), CoreError> {
        let Self {
            tx, task, policy, ..
        } = self;
        drop(tx);
        let failures = task.await.map_err(|_| CoreError::WriterClosed)?;
        match (policy, failures.into_iter().next()) {
            (PersistencePolicy::Surface, Some(first)) => Err(first),
            _ => Ok(()),
        }
    }
}

fn current_versions(store: &HotspotStore) -> HashMap<StorageKey, u64> {
    StorageKey::ALL
        .iter()
        .map(|&key| (key, store.version(key)))
        .collect()
}

fn writer_loop(
    mut rx: mpsc::UnboundedReceiver<WriteOp>,
    backend: &dyn KeyValueStore,
    policy: PersistencePolicy,
) -> Vec<CoreError> {
    let mut failures = Vec::new();
    while let Some(op) = rx.blocking_recv() {
        let result = match &op {
            WriteOp::Set { key, value } => backend.set(key.as_str(), value),
            WriteOp::Clear => backend.clear(),
        };
        match result {
            Ok(()) => debug!(op = ?op, "storage write done"),
            Err(e) => {
                warn!(op = ?op, error = %e, "storage write failed");
                if policy == PersistencePolicy::Surface {
                    failures.push(e);
                }
            }
        }
    }
    failures
}
