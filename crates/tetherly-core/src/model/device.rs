// ── Device domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use super::common::{Bandwidth, BandwidthLimit};
use super::entity_id::{EntityId, MacAddress};

/// What kind of client joined the hotspot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeviceType {
    Phone,
    Tablet,
    Laptop,
    Desktop,
    Other,
}

/// Simulated connectivity state. Exactly one applies at a time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeviceStatus {
    Connected,
    Limited,
    Blocked,
}

/// A client connected to (or remembered by) the hotspot.
///
/// Invariants maintained by the store:
/// - `Blocked` devices have zero live rates and zero signal.
/// - `Limited` devices never run faster than their caps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: EntityId,
    pub name: String,
    pub hostname: String,
    pub mac_address: MacAddress,
    pub ip_address: IpAddr,
    pub device_type: DeviceType,
    pub status: DeviceStatus,

    // Cumulative usage
    #[serde(rename = "downloadUsageMB")]
    pub download_usage_mb: f64,
    #[serde(rename = "uploadUsageMB")]
    pub upload_usage_mb: f64,

    // Live rates (Mbps)
    #[serde(rename = "currentDownloadSpeed")]
    pub current_download_mbps: f64,
    #[serde(rename = "currentUploadSpeed")]
    pub current_upload_mbps: f64,

    // Configured caps (Mbps)
    #[serde(rename = "maxDownloadSpeed")]
    pub max_download_mbps: f64,
    #[serde(rename = "maxUploadSpeed")]
    pub max_upload_mbps: f64,

    /// 0-100.
    pub signal_strength: u8,
    pub connected_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voucher_id: Option<EntityId>,
}

impl Device {
    pub fn current_rates(&self) -> Bandwidth {
        Bandwidth::new(self.current_download_mbps, self.current_upload_mbps)
    }

    pub fn caps(&self) -> Bandwidth {
        Bandwidth::new(self.max_download_mbps, self.max_upload_mbps)
    }

    pub fn is_blocked(&self) -> bool {
        self.status == DeviceStatus::Blocked
    }

    /// Display label: the friendly name, falling back to the hostname.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.hostname
        } else {
            &self.name
        }
    }

    pub(crate) fn set_current_rates(&mut self, rates: Bandwidth) {
        self.current_download_mbps = rates.download_mbps;
        self.current_upload_mbps = rates.upload_mbps;
    }

    /// Overwrite the caps and pull live rates down to them. Never raises a rate.
    pub(crate) fn apply_caps(&mut self, limit: BandwidthLimit) {
        let cap = limit.as_bandwidth();
        self.max_download_mbps = cap.download_mbps;
        self.max_upload_mbps = cap.upload_mbps;
        self.set_current_rates(self.current_rates().clamped_to(cap));
    }
}
