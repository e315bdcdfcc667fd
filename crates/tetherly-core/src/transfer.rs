// ── Export / import bundles ──
//
// A single JSON document carrying the state a user would want to move
// between installs. UI settings stay local and are not part of it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Device, EntityId, HotspotConfig, NetworkStats, Voucher};
use crate::store::HotspotStore;

/// Written into every bundle's `version` field.
pub const BUNDLE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Top-level keys an import must carry.
pub const REQUIRED_KEYS: [&str; 3] = ["hotspotConfig", "devices", "vouchers"];

const INVALID_FORMAT: &str = "invalid data format";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub hotspot_config: HotspotConfig,
    pub devices: Vec<Device>,
    pub vouchers: Vec<Voucher>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_stats: Option<NetworkStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// What an import replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub devices: usize,
    pub vouchers: usize,
    pub network_stats_replaced: bool,
}

impl ExportBundle {
    pub fn capture_at(store: &HotspotStore, now: DateTime<Utc>) -> Self {
        Self {
            hotspot_config: store.hotspot_config().clone(),
            devices: store.devices_snapshot(),
            vouchers: store.vouchers_snapshot(),
            network_stats: Some(store.network_stats().clone()),
            export_date: Some(now),
            version: Some(BUNDLE_VERSION.to_owned()),
        }
    }

    pub fn capture(store: &HotspotStore) -> Self {
        Self::capture_at(store, Utc::now())
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a pasted document. Nothing is applied here,
    /// so a rejected document can never leave partial state behind.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(import_error("input is empty"));
        }
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| import_error(format!("malformed JSON: {e}")))?;

        let Some(object) = value.as_object() else {
            return Err(import_error(INVALID_FORMAT));
        };
        if let Some(missing) = REQUIRED_KEYS.iter().find(|k| !object.contains_key(**k)) {
            return Err(import_error(format!("{INVALID_FORMAT}: missing '{missing}'")));
        }

        let bundle: Self = serde_json::from_value(value)
            .map_err(|e| import_error(format!("{INVALID_FORMAT}: {e}")))?;
        reject_duplicates("device", bundle.devices.iter().map(|d| &d.id))?;
        reject_duplicates("voucher", bundle.vouchers.iter().map(|v| &v.id))?;
        Ok(bundle)
    }

    /// Replace the collections wholesale. Network stats are replaced only
    /// when the bundle carries them.
    pub fn apply(self, store: &mut HotspotStore) -> ImportSummary {
        let summary = ImportSummary {
            devices: self.devices.len(),
            vouchers: self.vouchers.len(),
            network_stats_replaced: self.network_stats.is_some(),
        };
        store.replace_hotspot_config(self.hotspot_config);
        store.replace_devices(self.devices);
        store.replace_vouchers(self.vouchers);
        if let Some(stats) = self.network_stats {
            store.replace_network_stats(stats);
        }
        debug!(?summary, "bundle imported");
        summary
    }
}

/// Collections are keyed by id, so a repeated id would silently drop records.
fn reject_duplicates<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a EntityId>,
) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(import_error(format!("duplicate {kind} id '{id}'")));
        }
    }
    Ok(())
}

fn import_error(message: impl Into<String>) -> CoreError {
    CoreError::Import {
        message: message.into(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seeded() -> HotspotStore {
        HotspotStore::seeded_at(Utc::now())
    }

    #[test]
    fn export_then_import_reproduces_collections() {
        let mut source = seeded();
        source.block(&"dev-003".into());
        source.revoke_voucher(&"voucher-002".into());
        let json = ExportBundle::capture(&source).to_json().unwrap();

        let mut target = seeded();
        target.kick(&"dev-001".into());
        ExportBundle::parse(&json).unwrap().apply(&mut target);

        assert_eq!(target.devices_snapshot(), source.devices_snapshot());
        assert_eq!(target.vouchers_snapshot(), source.vouchers_snapshot());
        assert_eq!(target.hotspot_config(), source.hotspot_config());
        assert_eq!(target.network_stats(), source.network_stats());
    }

    #[test]
    fn bundle_uses_dashboard_key_names() {
        let json = ExportBundle::capture(&seeded()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for key in ["hotspotConfig", "devices", "vouchers", "networkStats", "exportDate", "version"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["version"], BUNDLE_VERSION);
    }

    #[test]
    fn missing_required_key_is_rejected() {
        let err = ExportBundle::parse(r#"{"devices":[],"vouchers":[]}"#).unwrap_err();
        assert!(err.to_string().contains("invalid data format"), "{err}");
        assert!(err.to_string().contains("hotspotConfig"), "{err}");
    }

    #[test]
    fn non_object_and_garbage_are_rejected() {
        assert!(matches!(ExportBundle::parse("[1,2]"), Err(CoreError::Import { .. })));
        assert!(matches!(ExportBundle::parse("{oops"), Err(CoreError::Import { .. })));
        assert!(matches!(ExportBundle::parse("   "), Err(CoreError::Import { .. })));
    }

    #[test]
    fn ill_typed_entities_are_rejected() {
        let raw = r#"{"hotspotConfig":{},"devices":[{"id":"x"}],"vouchers":[]}"#;
        assert!(matches!(ExportBundle::parse(raw), Err(CoreError::Import { .. })));
    }

    #[test]
    fn repeated_ids_are_rejected_before_apply() {
        let mut bundle = ExportBundle::capture(&seeded());
        bundle.devices.push(bundle.devices[0].clone());
        let err = ExportBundle::parse(&bundle.to_json().unwrap()).unwrap_err();
        assert!(err.to_string().contains("duplicate device id 'dev-001'"), "{err}");

        let mut bundle = ExportBundle::capture(&seeded());
        bundle.vouchers.push(bundle.vouchers[1].clone());
        let err = ExportBundle::parse(&bundle.to_json().unwrap()).unwrap_err();
        assert!(err.to_string().contains("duplicate voucher id 'voucher-002'"), "{err}");
    }

    #[test]
    fn negative_connection_counter_imports_as_zero() {
        let json = ExportBundle::capture(&seeded()).to_json().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["networkStats"]["totalConnectionsToday"] = serde_json::json!(-1);

        let bundle = ExportBundle::parse(&value.to_string()).unwrap();
        assert_eq!(bundle.network_stats.unwrap().total_connections_today, 0);
    }

    #[test]
    fn stats_survive_when_bundle_omits_them() {
        let mut bundle = ExportBundle::capture(&seeded());
        bundle.network_stats = None;
        bundle.devices.clear();

        let mut target = seeded();
        target.kick(&"dev-001".into());
        let before = target.network_stats().clone();
        let summary = bundle.apply(&mut target);

        assert!(!summary.network_stats_replaced);
        assert_eq!(target.device_count(), 0);
        assert_eq!(target.network_stats(), &before);
    }
}
