// ── Voucher domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// Voucher lifecycle.
///
/// `Unused -> Active -> Expired | Revoked`, or `Unused -> Revoked`.
/// Activation and expiry happen outside the store; revocation is the only
/// transition the store performs.
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
pub enum VoucherStatus {
    Unused,
    Active,
    Expired,
    Revoked,
}

impl VoucherStatus {
    /// No further transitions are possible from this state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Expired | Self::Revoked)
    }
}

/// Time- and data-boxed access grant redeemable by a bounded number of devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: EntityId,
    pub code: String,
    pub duration_hours: u32,
    #[serde(rename = "dataLimitMB")]
    pub data_limit_mb: u64,
    pub max_devices: u32,
    pub current_devices: u32,
    #[serde(rename = "dataUsedMB")]
    pub data_used_mb: f64,
    pub status: VoucherStatus,
    #[serde(default)]
    pub used_by: Vec<EntityId>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Voucher {
    /// Data left before the cap is reached, never negative.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn remaining_data_mb(&self) -> f64 {
        (self.data_limit_mb as f64 - self.data_used_mb).max(0.0)
    }

    /// Share of the data cap consumed, 0-100.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn usage_pct(&self) -> f64 {
        if self.data_limit_mb == 0 {
            return 100.0;
        }
        (self.data_used_mb / self.data_limit_mb as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Whether another device could still redeem this voucher.
    pub fn has_free_slot(&self) -> bool {
        !self.status.is_terminal() && self.current_devices < self.max_devices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn voucher(limit: u64, used: f64, status: VoucherStatus) -> Voucher {
        let now = Utc::now();
        Voucher {
            id: EntityId::from("voucher-test"),
            code: "ABCD2345".into(),
            duration_hours: 24,
            data_limit_mb: limit,
            max_devices: 2,
            current_devices: 1,
            data_used_mb: used,
            status,
            used_by: vec![EntityId::from("dev-001")],
            created_at: now,
            expires_at: now + Duration::hours(24),
            note: None,
        }
    }

    #[test]
    fn remaining_data_saturates_at_zero() {
        assert!((voucher(128, 200.0, VoucherStatus::Active).remaining_data_mb()).abs() < f64::EPSILON);
        assert!((voucher(1024, 24.0, VoucherStatus::Active).remaining_data_mb() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn usage_pct_is_clamped() {
        assert!((voucher(512, 256.0, VoucherStatus::Active).usage_pct() - 50.0).abs() < 1e-9);
        assert!((voucher(100, 500.0, VoucherStatus::Active).usage_pct() - 100.0).abs() < 1e-9);
        assert!((voucher(0, 0.0, VoucherStatus::Unused).usage_pct() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn terminal_vouchers_have_no_free_slot() {
        assert!(voucher(1024, 0.0, VoucherStatus::Unused).has_free_slot());
        assert!(!voucher(1024, 0.0, VoucherStatus::Revoked).has_free_slot());
        assert!(!voucher(1024, 0.0, VoucherStatus::Expired).has_free_slot());
    }

    #[test]
    fn wire_names_match_dashboard_format() {
        let json = serde_json::to_value(voucher(2048, 10.0, VoucherStatus::Active)).unwrap_or_default();
        assert_eq!(json["dataLimitMB"], 2048);
        assert_eq!(json["status"], "active");
        assert!(json.get("note").is_none());
        assert!(json.get("usedBy").is_some());
    }
}
