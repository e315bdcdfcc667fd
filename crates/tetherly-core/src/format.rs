// ── Display formatting helpers ──
//
// Pure functions shared by every front end. Time-relative helpers take
// `now` explicitly so output is reproducible.

use chrono::{DateTime, Utc};

use crate::model::{DeviceStatus, VoucherStatus};

// ── Sizes and rates ──────────────────────────────────────────────────

/// Human size for a megabyte count: `512 KB`, `340.0 MB`, `2.21 GB`.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
pub fn data_mb(mb: f64) -> String {
    if mb < 1.0 {
        format!("{} KB", (mb * 1024.0).round() as i64)
    } else if mb < 1024.0 {
        format!("{mb:.1} MB")
    } else {
        format!("{:.2} GB", mb / 1024.0)
    }
}

/// Byte count in 1024-based units with at most `decimals` places,
/// trailing zeros dropped: `1.5 KB`, `3 MB`, `0 Bytes`.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn bytes(bytes: u64, decimals: usize) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".into();
    }
    let mut exp = 0;
    let mut unit = 1u64;
    while exp + 1 < UNITS.len() && bytes >= unit * 1024 {
        unit *= 1024;
        exp += 1;
    }
    let scaled = format!("{:.*}", decimals, bytes as f64 / unit as f64);
    let trimmed = if scaled.contains('.') {
        scaled.trim_end_matches('0').trim_end_matches('.')
    } else {
        scaled.as_str()
    };
    format!("{trimmed} {}", UNITS[exp])
}

/// `850 Kbps` below one megabit, `24.5 Mbps` otherwise.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
pub fn speed_mbps(mbps: f64) -> String {
    if mbps < 1.0 {
        format!("{} Kbps", (mbps * 1000.0).round() as i64)
    } else {
        format!("{mbps:.1} Mbps")
    }
}

// ── Durations and times ──────────────────────────────────────────────

/// `45m`, `2h`, `2h 5m`, `1d`, `1d 3h`. Days drop the minutes.
pub fn duration_minutes(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours < 24 {
        return if mins > 0 {
            format!("{hours}h {mins}m")
        } else {
            format!("{hours}h")
        };
    }
    let days = hours / 24;
    let rem = hours % 24;
    if rem > 0 {
        format!("{days}d {rem}h")
    } else {
        format!("{days}d")
    }
}

/// `Just now`, `5m ago`, `3h ago`, `2d ago`. Future times read as
/// `Just now`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        return "Just now".into();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

/// How long a device has been connected, as a [`duration_minutes`] string.
pub fn time_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = u64::try_from((now - then).num_minutes()).unwrap_or(0);
    duration_minutes(minutes)
}

/// Time left until `expires`, or `expired`.
pub fn time_left(expires: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if expires <= now {
        return "expired".into();
    }
    let minutes = u64::try_from((expires - now).num_minutes()).unwrap_or(0);
    format!("{} left", duration_minutes(minutes))
}

// ── Colours ──────────────────────────────────────────────────────────

pub fn device_status_color(status: DeviceStatus) -> &'static str {
    match status {
        DeviceStatus::Connected => "#34D399",
        DeviceStatus::Blocked => "#F87171",
        DeviceStatus::Limited => "#FBBF24",
    }
}

pub fn voucher_status_color(status: VoucherStatus) -> &'static str {
    match status {
        VoucherStatus::Active => "#34D399",
        VoucherStatus::Unused => "#60A5FA",
        VoucherStatus::Expired => "#6B7280",
        VoucherStatus::Revoked => "#F87171",
    }
}

// ── Signal ───────────────────────────────────────────────────────────

/// Signal quality bucket for a 0-100 strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SignalLevel {
    Excellent,
    Good,
    Fair,
    Weak,
    Off,
}

impl SignalLevel {
    pub fn from_strength(strength: u8) -> Self {
        match strength {
            75.. => Self::Excellent,
            50..=74 => Self::Good,
            25..=49 => Self::Fair,
            1..=24 => Self::Weak,
            0 => Self::Off,
        }
    }

    pub fn bars(self) -> u8 {
        match self {
            Self::Excellent => 4,
            Self::Good => 3,
            Self::Fair => 2,
            Self::Weak => 1,
            Self::Off => 0,
        }
    }

    /// Weak and off share the alarm colour.
    pub fn color(self) -> &'static str {
        match self {
            Self::Excellent => "#34D399",
            Self::Good => "#FBBF24",
            Self::Fair => "#F59E0B",
            Self::Weak | Self::Off => "#F87171",
        }
    }
}

/// Four-cell bar glyph: `▂▄▆█` filled up to the level.
pub fn signal_bars(strength: u8) -> String {
    const CELLS: [char; 4] = ['▂', '▄', '▆', '█'];
    let lit = usize::from(SignalLevel::from_strength(strength).bars());
    CELLS
        .iter()
        .enumerate()
        .map(|(i, c)| if i < lit { *c } else { '·' })
        .collect()
}

// ── Usage ────────────────────────────────────────────────────────────

/// Fixed-width usage bar for a 0-100 percentage.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::as_conversions
)]
pub fn usage_bar(pct: f64, width: usize) -> String {
    let pct = if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 };
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
