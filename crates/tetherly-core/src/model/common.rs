// ── Common types shared across the domain model ──

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A download/upload pair in Mbps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bandwidth {
    pub download_mbps: f64,
    pub upload_mbps: f64,
}

impl Bandwidth {
    pub const ZERO: Self = Self {
        download_mbps: 0.0,
        upload_mbps: 0.0,
    };

    pub fn new(download_mbps: f64, upload_mbps: f64) -> Self {
        Self {
            download_mbps,
            upload_mbps,
        }
    }

    /// Both directions multiplied by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.download_mbps * factor, self.upload_mbps * factor)
    }

    /// Component-wise minimum against a cap.
    pub fn clamped_to(self, cap: Self) -> Self {
        Self::new(
            self.download_mbps.min(cap.download_mbps),
            self.upload_mbps.min(cap.upload_mbps),
        )
    }

    #[allow(clippy::float_cmp)]
    pub fn is_zero(self) -> bool {
        self.download_mbps == 0.0 && self.upload_mbps == 0.0
    }
}

impl std::ops::Add for Bandwidth {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.download_mbps + rhs.download_mbps,
            self.upload_mbps + rhs.upload_mbps,
        )
    }
}

impl std::iter::Sum for Bandwidth {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, b| acc + b)
    }
}

/// An administrator-set bandwidth cap. Both values are finite and `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandwidthLimit(Bandwidth);

impl BandwidthLimit {
    pub fn new(download_mbps: f64, upload_mbps: f64) -> Result<Self, CoreError> {
        check_rate("download", download_mbps)?;
        check_rate("upload", upload_mbps)?;
        Ok(Self(Bandwidth::new(download_mbps, upload_mbps)))
    }

    pub fn download_mbps(self) -> f64 {
        self.0.download_mbps
    }

    pub fn upload_mbps(self) -> f64 {
        self.0.upload_mbps
    }

    pub fn as_bandwidth(self) -> Bandwidth {
        self.0
    }
}

fn check_rate(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation {
            field: field.into(),
            reason: format!("{value} is not a finite rate"),
        });
    }
    if value < 0.0 {
        return Err(CoreError::Validation {
            field: field.into(),
            reason: format!("limit must not be negative, got {value}"),
        });
    }
    Ok(())
}
