// ── Typed request structs for Command payloads ──

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::model::{AnimationSpeed, Band, CornerStyle, SecurityType, Theme};

// ── Voucher ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoucherRequest {
    pub duration_hours: u32,
    #[serde(rename = "dataLimitMB")]
    pub data_limit_mb: u64,
    pub max_devices: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Default for CreateVoucherRequest {
    fn default() -> Self {
        Self {
            duration_hours: 24,
            data_limit_mb: 1024,
            max_devices: 2,
            note: None,
        }
    }
}

/// Quick-create voucher plans.
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
pub enum VoucherPreset {
    /// 1h, 100 MB, 1 device.
    Trial,
    /// 4h, 512 MB, 1 device.
    Basic,
    /// 24h, 2 GB, 2 devices.
    Standard,
    /// 48h, 5 GB, 3 devices.
    Premium,
    /// 72h, 10 GB, 5 devices.
    Bulk,
}

impl VoucherPreset {
    pub fn request(self) -> CreateVoucherRequest {
        let (duration_hours, data_limit_mb, max_devices) = match self {
            Self::Trial => (1, 100, 1),
            Self::Basic => (4, 512, 1),
            Self::Standard => (24, 2048, 2),
            Self::Premium => (48, 5120, 3),
            Self::Bulk => (72, 10240, 5),
        };
        CreateVoucherRequest {
            duration_hours,
            data_limit_mb,
            max_devices,
            note: None,
        }
    }
}

// ── Hotspot config ─────────────────────────────────────────────────

/// Partial update of the access-point settings. `None` keeps the
/// current value. Power state is absent: it changes only
/// through the power commands so device rates follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<Band>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_clients: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_rooted: Option<bool>,
    #[serde(rename = "gatewayIP", skip_serializing_if = "Option::is_none")]
    pub gateway_ip: Option<Ipv4Addr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_type: Option<SecurityType>,
}

impl HotspotConfigPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── UI settings ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_speed: Option<AnimationSpeed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_style: Option<CornerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_animations: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_haptics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_motion: Option<bool>,
}

impl UiSettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
