// ── Authoritative hotspot state ──
//
// Owns the five pieces of dashboard state and every mutation on them.
// Mutations are total over the in-memory data: an unknown id is a
// no-op whose outcome is reported to the caller, never an error.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::collection::EntityCollection;
use crate::command::{CreateVoucherRequest, HotspotConfigPatch, UiSettingsPatch};
use crate::error::CoreError;
use crate::model::{
    Bandwidth, BandwidthLimit, Device, DeviceStatus, EntityId, HotspotConfig, MacAddress,
    NetworkStats, UiSettings, Voucher, VoucherStatus,
};
use crate::persist::StorageKey;
use crate::{seed, voucher_code};

/// Share of the caps a device resumes at after being unblocked.
const UNBLOCK_RATE_FACTOR: f64 = 0.4;
/// Share of the caps every device runs at when the hotspot wakes.
const WAKE_RATE_FACTOR: f64 = 0.5;
/// Simulated signal range after unblocking, `[50, 90)`.
const UNBLOCK_SIGNAL: std::ops::Range<u8> = 50..90;

pub const SSID_MAX_LEN: usize = 32;
pub const PASSWORD_LEN: std::ops::RangeInclusive<usize> = 8..=63;
pub const MAX_CLIENTS: std::ops::RangeInclusive<u32> = 1..=255;

/// A value with a change counter, for the singletons.
#[derive(Debug, Clone)]
struct Versioned<T> {
    value: T,
    version: u64,
}

impl<T> Versioned<T> {
    fn new(value: T) -> Self {
        Self { value, version: 0 }
    }

    fn get(&self) -> &T {
        &self.value
    }

    fn set(&mut self, value: T) {
        self.value = value;
        self.bump();
    }

    fn modify<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.value);
        self.bump();
        out
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

/// Count of devices in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct StatusCounts {
    pub connected: usize,
    pub limited: usize,
    pub blocked: usize,
}

impl StatusCounts {
    pub fn total(self) -> usize {
        self.connected + self.limited + self.blocked
    }
}

/// The single authoritative holder of hotspot state.
///
/// Constructed explicitly and passed to whoever needs it; there is no
/// global instance. All randomness comes from the store's own RNG so a
/// seeded store replays identically.
#[derive(Debug)]
pub struct HotspotStore {
    devices: EntityCollection<Device>,
    vouchers: EntityCollection<Voucher>,
    config: Versioned<HotspotConfig>,
    stats: Versioned<NetworkStats>,
    ui_settings: Versioned<UiSettings>,
    code_length: usize,
    rng: StdRng,
}

impl HotspotStore {
    pub fn new(
        devices: Vec<Device>,
        vouchers: Vec<Voucher>,
        config: HotspotConfig,
        stats: NetworkStats,
    ) -> Self {
        Self {
            devices: EntityCollection::from_vec(devices),
            vouchers: EntityCollection::from_vec(vouchers),
            config: Versioned::new(config),
            stats: Versioned::new(stats),
            ui_settings: Versioned::new(UiSettings::default()),
            code_length: voucher_code::DEFAULT_CODE_LENGTH,
            rng: StdRng::from_entropy(),
        }
    }

    /// Store populated with the demo dataset, timestamped relative to `now`.
    pub fn seeded_at(now: DateTime<Utc>) -> Self {
        Self::new(
            seed::devices(now),
            seed::vouchers(now),
            seed::hotspot_config(),
            seed::network_stats(),
        )
    }

    pub fn seeded() -> Self {
        Self::seeded_at(Utc::now())
    }

    /// Replace the RNG with a deterministic one.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_code_length(mut self, length: usize) -> Self {
        self.code_length = length;
        self
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    pub fn vouchers(&self) -> impl Iterator<Item = &Voucher> {
        self.vouchers.iter()
    }

    pub fn device(&self, id: &EntityId) -> Option<&Device> {
        self.devices.get(id)
    }

    pub fn voucher(&self, id: &EntityId) -> Option<&Voucher> {
        self.vouchers.get(id)
    }

    pub fn hotspot_config(&self) -> &HotspotConfig {
        self.config.get()
    }

    pub fn network_stats(&self) -> &NetworkStats {
        self.stats.get()
    }

    pub fn ui_settings(&self) -> &UiSettings {
        self.ui_settings.get()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn voucher_count(&self) -> usize {
        self.vouchers.len()
    }

    /// Resolve a user-supplied reference to a device: id, MAC address,
    /// hostname or display name (the last two case-insensitively).
    pub fn find_device(&self, query: &str) -> Option<&Device> {
        let query = query.trim();
        if let Some(device) = self.devices.get(&EntityId::from(query)) {
            return Some(device);
        }
        let mac = MacAddress::new(query);
        self.devices.iter().find(|d| {
            d.mac_address == mac
                || d.hostname.eq_ignore_ascii_case(query)
                || d.name.eq_ignore_ascii_case(query)
        })
    }

    /// Resolve a voucher by id or code (code case-insensitively).
    pub fn find_voucher(&self, query: &str) -> Option<&Voucher> {
        let query = query.trim();
        self.vouchers
            .get(&EntityId::from(query))
            .or_else(|| {
                self.vouchers
                    .iter()
                    .find(|v| v.code.eq_ignore_ascii_case(query))
            })
    }

    /// Change counter of one persisted piece of state.
    pub fn version(&self, key: StorageKey) -> u64 {
        match key {
            StorageKey::Devices => self.devices.version(),
            StorageKey::Vouchers => self.vouchers.version(),
            StorageKey::Config => self.config.version,
            StorageKey::Stats => self.stats.version,
            StorageKey::UiSettings => self.ui_settings.version,
        }
    }

    // ── Device actions ───────────────────────────────────────────────

    /// Disconnect and forget a device. Lowers today's connection count
    /// (never below zero) only when something was removed.
    pub fn kick(&mut self, id: &EntityId) -> Option<Device> {
        let removed = self.devices.remove(id)?;
        self.stats.modify(|s| {
            s.total_connections_today = s.total_connections_today.saturating_sub(1);
        });
        debug!(device = %id, "device kicked");
        Some(removed)
    }

    /// Block a device: rates and signal drop to zero. Re-blocking is a
    /// harmless overwrite but still counts as a blocked attempt.
    pub fn block(&mut self, id: &EntityId) -> bool {
        let found = self
            .devices
            .update(id, |d| {
                d.status = DeviceStatus::Blocked;
                d.set_current_rates(Bandwidth::ZERO);
                d.signal_strength = 0;
            })
            .is_some();
        if found {
            self.stats.modify(|s| {
                s.blocked_attempts = s.blocked_attempts.saturating_add(1);
            });
            debug!(device = %id, "device blocked");
        }
        found
    }

    /// Reconnect a device at 40% of its caps with a simulated signal in
    /// `[50, 90)`.
    pub fn unblock(&mut self, id: &EntityId) -> bool {
        let signal = self.rng.gen_range(UNBLOCK_SIGNAL);
        let found = self
            .devices
            .update(id, |d| {
                d.status = DeviceStatus::Connected;
                d.set_current_rates(d.caps().scaled(UNBLOCK_RATE_FACTOR));
                d.signal_strength = signal;
            })
            .is_some();
        if found {
            debug!(device = %id, signal, "device unblocked");
        }
        found
    }

    /// Overwrite the caps, pulling live rates down to them. Status is
    /// left as it was.
    pub fn set_speed_limit(&mut self, id: &EntityId, limit: BandwidthLimit) -> bool {
        self.devices.update(id, |d| d.apply_caps(limit)).is_some()
    }

    /// Same as [`set_speed_limit`](Self::set_speed_limit) and marks the
    /// device as limited.
    pub fn limit(&mut self, id: &EntityId, limit: BandwidthLimit) -> bool {
        self.devices
            .update(id, |d| {
                d.apply_caps(limit);
                d.status = DeviceStatus::Limited;
            })
            .is_some()
    }

    // ── Voucher actions ──────────────────────────────────────────────

    pub fn create_voucher(&mut self, request: CreateVoucherRequest) -> Result<Voucher, CoreError> {
        self.create_voucher_at(request, Utc::now())
    }

    /// Mint a voucher with a code unique among existing vouchers and
    /// place it first in the list.
    pub fn create_voucher_at(
        &mut self,
        request: CreateVoucherRequest,
        now: DateTime<Utc>,
    ) -> Result<Voucher, CoreError> {
        if request.duration_hours == 0 {
            return Err(CoreError::validation("duration", "must be at least 1 hour"));
        }
        if request.max_devices == 0 {
            return Err(CoreError::validation("max devices", "must be at least 1"));
        }

        let code = {
            let taken: HashSet<&str> = self.vouchers.iter().map(|v| v.code.as_str()).collect();
            voucher_code::generate_unique(&mut self.rng, self.code_length, &taken)?
        };

        let voucher = Voucher {
            id: EntityId::generate(),
            code,
            duration_hours: request.duration_hours,
            data_limit_mb: request.data_limit_mb,
            max_devices: request.max_devices,
            current_devices: 0,
            data_used_mb: 0.0,
            status: VoucherStatus::Unused,
            used_by: Vec::new(),
            created_at: now,
            expires_at: now + Duration::hours(i64::from(request.duration_hours)),
            note: request.note.filter(|n| !n.trim().is_empty()),
        };
        debug!(voucher = %voucher.id, code = %voucher.code, "voucher created");
        self.vouchers.push_front(voucher.clone());
        Ok(voucher)
    }

    /// Mark a voucher revoked whatever its prior status. Idempotent.
    pub fn revoke_voucher(&mut self, id: &EntityId) -> bool {
        self.vouchers
            .update(id, |v| v.status = VoucherStatus::Revoked)
            .is_some()
    }

    pub fn delete_voucher(&mut self, id: &EntityId) -> Option<Voucher> {
        self.vouchers.remove(id)
    }

    // ── Hotspot actions ──────────────────────────────────────────────

    /// Flip the power state. Waking sets every unblocked device to half
    /// its caps; shutting down zeroes every device. Returns the new state.
    pub fn toggle_hotspot_power(&mut self) -> bool {
        let active = !self.config.get().is_active;
        self.config.modify(|c| c.is_active = active);
        self.devices.update_all(|d| {
            let rates = if active && !d.is_blocked() {
                d.caps().scaled(WAKE_RATE_FACTOR)
            } else {
                Bandwidth::ZERO
            };
            d.set_current_rates(rates);
        });
        debug!(active, "hotspot power toggled");
        active
    }

    /// Bring the power state to `active`. Returns `true` if it changed.
    pub fn set_hotspot_power(&mut self, active: bool) -> bool {
        if self.config.get().is_active == active {
            return false;
        }
        self.toggle_hotspot_power();
        true
    }

    /// Validate the whole patch, then merge it. Nothing is applied when
    /// any field is invalid.
    pub fn update_hotspot_config(&mut self, patch: HotspotConfigPatch) -> Result<(), CoreError> {
        let ssid = patch.ssid.as_deref().map(validate_ssid).transpose()?;
        if let Some(password) = patch.password.as_deref() {
            validate_password(password)?;
        }
        if let Some(max) = patch.max_clients {
            validate_max_clients(max)?;
        }

        self.config.modify(|c| {
            if let Some(ssid) = ssid {
                c.ssid = ssid;
            }
            if let Some(password) = patch.password {
                c.password = password;
            }
            if let Some(band) = patch.band {
                c.band = band;
            }
            if let Some(max) = patch.max_clients {
                c.max_clients = max;
            }
            if let Some(rooted) = patch.is_rooted {
                c.is_rooted = rooted;
            }
            if let Some(gateway) = patch.gateway_ip {
                c.gateway_ip = gateway;
            }
            if let Some(security) = patch.security_type {
                c.security_type = security;
            }
        });
        Ok(())
    }

    pub fn update_ui_settings(&mut self, patch: UiSettingsPatch) {
        self.ui_settings.modify(|s| {
            if let Some(theme) = patch.theme {
                s.theme = theme;
            }
            if let Some(speed) = patch.animation_speed {
                s.animation_speed = speed;
            }
            if let Some(corner) = patch.corner_style {
                s.corner_style = corner;
            }
            if let Some(v) = patch.show_animations {
                s.show_animations = v;
            }
            if let Some(v) = patch.enable_haptics {
                s.enable_haptics = v;
            }
            if let Some(v) = patch.reduce_motion {
                s.reduce_motion = v;
            }
        });
    }

    pub fn reset_ui_settings(&mut self) {
        self.ui_settings.set(UiSettings::default());
    }

    // ── Wholesale replacement (load, import, reset) ──────────────────

    pub fn replace_devices(&mut self, devices: Vec<Device>) {
        self.devices.replace_all(devices);
    }

    pub fn replace_vouchers(&mut self, vouchers: Vec<Voucher>) {
        self.vouchers.replace_all(vouchers);
    }

    pub fn replace_hotspot_config(&mut self, config: HotspotConfig) {
        self.config.set(config);
    }

    pub fn replace_network_stats(&mut self, stats: NetworkStats) {
        self.stats.set(stats);
    }

    pub fn replace_ui_settings(&mut self, settings: UiSettings) {
        self.ui_settings.set(settings);
    }

    /// Return every piece of state to the demo dataset and default
    /// UI settings.
    pub fn reset_at(&mut self, now: DateTime<Utc>) {
        self.replace_devices(seed::devices(now));
        self.replace_vouchers(seed::vouchers(now));
        self.replace_hotspot_config(seed::hotspot_config());
        self.replace_network_stats(seed::network_stats());
        self.reset_ui_settings();
    }

    pub fn devices_snapshot(&self) -> Vec<Device> {
        self.devices.to_vec()
    }

    pub fn vouchers_snapshot(&self) -> Vec<Voucher> {
        self.vouchers.to_vec()
    }

    // ── Derived selectors ────────────────────────────────────────────

    pub fn devices_with_status(&self, status: DeviceStatus) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(move |d| d.status == status)
    }

    pub fn active_devices(&self) -> impl Iterator<Item = &Device> {
        self.devices_with_status(DeviceStatus::Connected)
    }

    pub fn limited_devices(&self) -> impl Iterator<Item = &Device> {
        self.devices_with_status(DeviceStatus::Limited)
    }

    pub fn blocked_devices(&self) -> impl Iterator<Item = &Device> {
        self.devices_with_status(DeviceStatus::Blocked)
    }

    pub fn vouchers_with_status(&self, status: VoucherStatus) -> impl Iterator<Item = &Voucher> {
        self.vouchers.iter().filter(move |v| v.status == status)
    }

    pub fn active_vouchers(&self) -> impl Iterator<Item = &Voucher> {
        self.vouchers_with_status(VoucherStatus::Active)
    }

    /// Sum of live rates across every device that is not blocked.
    pub fn total_bandwidth(&self) -> Bandwidth {
        self.devices
            .iter()
            .filter(|d| !d.is_blocked())
            .map(Device::current_rates)
            .sum()
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.devices
            .iter()
            .fold(StatusCounts::default(), |mut counts, d| {
                match d.status {
                    DeviceStatus::Connected => counts.connected += 1,
                    DeviceStatus::Limited => counts.limited += 1,
                    DeviceStatus::Blocked => counts.blocked += 1,
                }
                counts
            })
    }

    /// Connected devices over the client limit; 0 when the limit is 0.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn capacity_ratio(&self) -> f64 {
        let max = self.config.get().max_clients;
        if max == 0 {
            return 0.0;
        }
        self.active_devices().count() as f64 / f64::from(max)
    }
}

impl Default for HotspotStore {
    fn default() -> Self {
        Self::seeded()
    }
}

// ── Input validation ─────────────────────────────────────────────────

/// Returns the trimmed SSID.
fn validate_ssid(raw: &str) -> Result<String, CoreError> {
    let ssid = raw.trim();
    if ssid.is_empty() {
        return Err(CoreError::validation("ssid", "must not be empty"));
    }
    let len = ssid.chars().count();
    if len > SSID_MAX_LEN {
        return Err(CoreError::validation(
            "ssid",
            format!("must be at most {SSID_MAX_LEN} characters, got {len}"),
        ));
    }
    Ok(ssid.to_owned())
}

fn validate_password(password: &str) -> Result<(), CoreError> {
    let len = password.chars().count();
    if !PASSWORD_LEN.contains(&len) {
        return Err(CoreError::validation(
            "password",
            format!(
                "must be {}-{} characters, got {len}",
                PASSWORD_LEN.start(),
                PASSWORD_LEN.end()
            ),
        ));
    }
    Ok(())
}

fn validate_max_clients(max: u32) -> Result<(), CoreError> {
    if !MAX_CLIENTS.contains(&max) {
        return Err(CoreError::validation(
            "max clients",
            format!(
                "must be between {} and {}, got {max}",
                MAX_CLIENTS.start(),
                MAX_CLIENTS.end()
            ),
        ));
    }
    Ok(())
}
