// ── Controller ──
//
// Facade tying the store to its persistence: restore on open, execute
// commands, queue the pieces each command changed, drain on shutdown.

use std::sync::Arc;

use tracing::{debug, info};

use crate::command::{self, Command, CommandResult};
use crate::error::CoreError;
use crate::persist::{self, KeyValueStore, Persistence, PersistencePolicy};
use crate::store::HotspotStore;

/// The single writer of hotspot state for a process.
///
/// Reads go straight to [`store`](Self::store); writes go through
/// [`execute`](Self::execute) so persistence sees every change.
#[derive(Debug)]
pub struct Controller {
    store: HotspotStore,
    persistence: Persistence,
}

impl Controller {
    /// Overlay stored state onto `store` and start the background writer.
    ///
    /// Must be called inside a tokio runtime.
    pub fn open(
        mut store: HotspotStore,
        backend: Arc<dyn KeyValueStore>,
        policy: PersistencePolicy,
    ) -> Result<Self, CoreError> {
        let restored = persist::load_into(&mut store, backend.as_ref(), policy)?;
        info!(restored, ?policy, "hotspot state loaded");
        let persistence = Persistence::spawn(backend, policy, &store);
        Ok(Self { store, persistence })
    }

    pub fn store(&self) -> &HotspotStore {
        &self.store
    }

    /// Run a command and queue whatever it changed. Callers do not wait
    /// for the write itself.
    pub fn execute(&mut self, cmd: Command) -> Result<CommandResult, CoreError> {
        let wipes_storage = matches!(cmd, Command::ResetAll);
        let result = command::execute(&mut self.store, cmd)?;

        if wipes_storage {
            self.persistence.clear(&self.store)?;
        } else {
            let queued = self.persistence.sync(&self.store)?;
            debug!(queued, "command persisted");
        }
        Ok(result)
    }

    /// Flush queued writes and stop the writer.
    pub async fn shutdown(self) -> Result<(), CoreError> {
        self.persistence.close().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{DeviceStatus, EntityId};
    use crate::persist::MemoryStore;

    fn open(backend: &Arc<MemoryStore>) -> Controller {
        Controller::open(
            HotspotStore::seeded().with_rng_seed(42),
            backend.clone(),
            PersistencePolicy::Surface,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn changes_survive_reopen() {
        let backend = Arc::new(MemoryStore::new());

        let mut first = open(&backend);
        first
            .execute(Command::BlockDevice {
                id: EntityId::from("dev-002"),
            })
            .unwrap();
        first.shutdown().await.unwrap();

        let second = open(&backend);
        let device = second.store().device(&"dev-002".into()).unwrap();
        assert_eq!(device.status, DeviceStatus::Blocked);
        assert_eq!(second.store().network_stats().blocked_attempts, 8);
        second.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn reset_all_wipes_storage() {
        let backend = Arc::new(MemoryStore::new());

        let mut controller = open(&backend);
        controller.execute(Command::ToggleHotspotPower).unwrap();
        controller.execute(Command::ResetAll).unwrap();
        assert!(controller.store().hotspot_config().is_active);
        controller.shutdown().await.unwrap();

        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn not_found_changes_nothing() {
        let backend = Arc::new(MemoryStore::new());
        let mut controller = open(&backend);
        let result = controller
            .execute(Command::KickDevice {
                id: EntityId::from("dev-999"),
            })
            .unwrap();
        assert!(result.is_not_found());
        controller.shutdown().await.unwrap();
        assert!(backend.is_empty());
    }
}
