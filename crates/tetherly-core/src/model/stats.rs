// ── Aggregate network counters ──

use serde::{Deserialize, Deserializer, Serialize};

/// Singleton aggregate counters shown on the dashboard.
///
/// Nothing measures these; device actions nudge them (a kick lowers the
/// connection count, a block raises the blocked-attempt count).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    #[serde(rename = "totalDownloadMB")]
    pub total_download_mb: f64,
    #[serde(rename = "totalUploadMB")]
    pub total_upload_mb: f64,
    #[serde(rename = "peakDownloadSpeed")]
    pub peak_download_mbps: f64,
    #[serde(rename = "peakUploadSpeed")]
    pub peak_upload_mbps: f64,
    pub uptime_minutes: u64,
    #[serde(deserialize_with = "clamped_count")]
    pub total_connections_today: u32,
    #[serde(deserialize_with = "clamped_count")]
    pub blocked_attempts: u32,
}

/// Older exports can carry a negative counter; read it as zero.
fn clamped_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = i64::deserialize(deserializer)?;
    Ok(u32::try_from(raw.max(0)).unwrap_or(u32::MAX))
}

/// One hour of traffic in the usage chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSample {
    /// `HH:00` label.
    pub hour: String,
    #[serde(rename = "downloadMB")]
    pub download_mb: f64,
    #[serde(rename = "uploadMB")]
    pub upload_mb: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn negative_counters_read_as_zero() {
        let raw = r#"{"totalDownloadMB":1.5,"totalUploadMB":0.5,"peakDownloadSpeed":10.0,
            "peakUploadSpeed":2.0,"uptimeMinutes":30,"totalConnectionsToday":-1,
            "blockedAttempts":3}"#;
        let stats: NetworkStats = serde_json::from_str(raw).unwrap();
        assert_eq!(stats.total_connections_today, 0);
        assert_eq!(stats.blocked_attempts, 3);
    }
}
