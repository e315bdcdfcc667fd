// ── Persistence adapter ──
//
// Mirrors the store's five pieces of state into a key-value backend,
// one JSON document per key. Loading overlays whatever parses onto the
// seeded store; saving hands changed pieces to a background writer.

mod file_store;
mod memory;
mod writer;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{Device, HotspotConfig, NetworkStats, UiSettings, Voucher};
use crate::store::HotspotStore;

pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use writer::Persistence;

// ── Storage keys ─────────────────────────────────────────────────────

/// The five independently persisted pieces of state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr,
)]
pub enum StorageKey {
    #[strum(to_string = "hotspot_devices")]
    Devices,
    #[strum(to_string = "hotspot_vouchers")]
    Vouchers,
    #[strum(to_string = "hotspot_config")]
    Config,
    #[strum(to_string = "hotspot_stats")]
    Stats,
    #[strum(to_string = "hotspot_ui_settings")]
    UiSettings,
}

impl StorageKey {
    pub const ALL: [Self; 5] = [
        Self::Devices,
        Self::Vouchers,
        Self::Config,
        Self::Stats,
        Self::UiSettings,
    ];

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

// ── Backend ──────────────────────────────────────────────────────────

/// Minimal string key-value storage.
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), CoreError>;

    /// Remove every key this crate writes.
    fn clear(&self) -> Result<(), CoreError> {
        StorageKey::ALL
            .iter()
            .try_for_each(|key| self.remove(key.as_str()))
    }
}

// ── Failure policy ───────────────────────────────────────────────────

/// What to do when storage misbehaves.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PersistencePolicy {
    /// Log and carry on with in-memory state.
    #[default]
    Silent,
    /// Report load failures immediately and write failures on close.
    Surface,
}

// ── Encoding ─────────────────────────────────────────────────────────

/// Serialize the current value of one piece of state.
pub(crate) fn encode(store: &HotspotStore, key: StorageKey) -> Result<String, serde_json::Error> {
    match key {
        StorageKey::Devices => serde_json::to_string(&store.devices().collect::<Vec<_>>()),
        StorageKey::Vouchers => serde_json::to_string(&store.vouchers().collect::<Vec<_>>()),
        StorageKey::Config => serde_json::to_string(store.hotspot_config()),
        StorageKey::Stats => serde_json::to_string(store.network_stats()),
        StorageKey::UiSettings => serde_json::to_string(store.ui_settings()),
    }
}

/// Parse a stored document and overwrite the matching piece of state.
/// On a parse failure the store is untouched.
pub(crate) fn apply(
    store: &mut HotspotStore,
    key: StorageKey,
    raw: &str,
) -> Result<(), serde_json::Error> {
    match key {
        StorageKey::Devices => store.replace_devices(serde_json::from_str::<Vec<Device>>(raw)?),
        StorageKey::Vouchers => store.replace_vouchers(serde_json::from_str::<Vec<Voucher>>(raw)?),
        StorageKey::Config => {
            store.replace_hotspot_config(serde_json::from_str::<HotspotConfig>(raw)?);
        }
        StorageKey::Stats => {
            store.replace_network_stats(serde_json::from_str::<NetworkStats>(raw)?);
        }
        StorageKey::UiSettings => {
            store.replace_ui_settings(serde_json::from_str::<UiSettings>(raw)?);
        }
    }
    Ok(())
}

// ── Loading ──────────────────────────────────────────────────────────

/// Overlay stored state onto `store`, key by key. A key that is absent
/// keeps its seeded value; a key that cannot be read or parsed does the
/// same under [`PersistencePolicy::Silent`] and fails under `Surface`.
///
/// Returns how many keys were restored.
pub fn load_into(
    store: &mut HotspotStore,
    backend: &dyn KeyValueStore,
    policy: PersistencePolicy,
) -> Result<usize, CoreError> {
    let mut restored = 0;
    for key in StorageKey::ALL {
        let outcome = backend.get(key.as_str()).and_then(|raw| match raw {
            Some(raw) => apply(store, key, &raw)
                .map(|()| true)
                .map_err(|e| CoreError::persistence(key.as_str(), e)),
            None => Ok(false),
        });

        match outcome {
            Ok(true) => {
                debug!(key = %key, "restored from storage");
                restored += 1;
            }
            Ok(false) => debug!(key = %key, "nothing stored, keeping seed"),
            Err(e) if policy == PersistencePolicy::Silent => {
                warn!(key = %key, error = %e, "ignoring unreadable stored state");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(restored)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn keys_match_storage_names() {
        let names: Vec<&str> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            [
                "hotspot_devices",
                "hotspot_vouchers",
                "hotspot_config",
                "hotspot_stats",
                "hotspot_ui_settings"
            ]
        );
    }

    #[test]
    fn load_overlays_only_parseable_keys() {
        let backend = MemoryStore::new();
        backend
            .set("hotspot_config", r#"{"isActive":false,"ssid":"Stored","password":"password1","band":"2.4GHz","maxClients":4,"isRooted":false,"gatewayIP":"10.0.0.1","securityType":"WPA2"}"#)
            .unwrap();
        backend.set("hotspot_devices", "not json").unwrap();
        backend.set("hotspot_ui_settings", r#"{"theme":"purple"}"#).unwrap();

        let mut store = HotspotStore::seeded_at(Utc::now());
        let restored = load_into(&mut store, &backend, PersistencePolicy::Silent).unwrap();

        assert_eq!(restored, 2);
        assert_eq!(store.hotspot_config().ssid, "Stored");
        assert_eq!(store.device_count(), 20);
        assert_eq!(store.ui_settings().theme, crate::model::Theme::Purple);
        assert!(store.ui_settings().enable_haptics);
    }

    #[test]
    fn unknown_ui_theme_keeps_other_stored_preferences() {
        let backend = MemoryStore::new();
        backend
            .set("hotspot_ui_settings", r#"{"theme":"neon","reduceMotion":true}"#)
            .unwrap();
        let mut store = HotspotStore::seeded_at(Utc::now());
        let restored = load_into(&mut store, &backend, PersistencePolicy::Surface).unwrap();

        assert_eq!(restored, 1);
        assert_eq!(store.ui_settings().theme, crate::model::Theme::Default);
        assert!(store.ui_settings().reduce_motion);
    }

    #[test]
    fn surface_policy_reports_corrupt_state() {
        let backend = MemoryStore::new();
        backend.set("hotspot_vouchers", "[{]").unwrap();
        let mut store = HotspotStore::seeded_at(Utc::now());
        let err = load_into(&mut store, &backend, PersistencePolicy::Surface).unwrap_err();
        assert!(matches!(err, CoreError::Persistence { ref key, .. } if key == "hotspot_vouchers"));
        assert_eq!(store.voucher_count(), 8);
    }

    #[test]
    fn encode_then_apply_restores_piece() {
        let now = Utc::now();
        let mut source = HotspotStore::seeded_at(now);
        source.block(&"dev-001".into());
        let raw = encode(&source, StorageKey::Devices).unwrap();

        let mut target = HotspotStore::seeded_at(now);
        apply(&mut target, StorageKey::Devices, &raw).unwrap();
        assert!(target.device(&"dev-001".into()).unwrap().is_blocked());
    }
}
