// Behavioural tests for `HotspotStore` and the command layer against the
// seeded demo dataset.

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;

use tetherly_core::command::{self, execute_at};
use tetherly_core::{
    Bandwidth, BandwidthLimit, Command, CommandResult, CoreError, CreateVoucherRequest,
    DeviceStatus, EntityId, ExportBundle, HotspotConfigPatch, HotspotStore, StatusCounts, Theme,
    UiSettingsPatch, VoucherPreset, VoucherStatus,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn store() -> HotspotStore {
    HotspotStore::seeded_at(Utc::now()).with_rng_seed(7)
}

fn id(raw: &str) -> EntityId {
    EntityId::from(raw)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn assert_rates(rates: Bandwidth, down: f64, up: f64) {
    assert!(
        approx(rates.download_mbps, down) && approx(rates.upload_mbps, up),
        "expected ({down}, {up}), got {rates:?}"
    );
}

// ── Devices ─────────────────────────────────────────────────────────

#[test]
fn test_block_zeroes_device_and_counts_attempt() {
    let mut store = store();
    assert!(store.block(&id("dev-001")));

    let device = store.device(&id("dev-001")).unwrap();
    assert_eq!(device.status, DeviceStatus::Blocked);
    assert!(device.current_rates().is_zero());
    assert_eq!(device.signal_strength, 0);
    assert_eq!(store.network_stats().blocked_attempts, 8);
}

#[test]
fn test_block_unknown_device_changes_nothing() {
    let mut store = store();
    let before = store.network_stats().clone();
    assert!(!store.block(&id("dev-999")));
    assert_eq!(store.network_stats(), &before);
}

#[test]
fn test_unblock_resumes_at_forty_percent() {
    let mut store = store();
    assert!(store.unblock(&id("dev-006")));

    let device = store.device(&id("dev-006")).unwrap();
    assert_eq!(device.status, DeviceStatus::Connected);
    assert_rates(device.current_rates(), 20.0, 10.0);
    assert!((50..90).contains(&device.signal_strength));
}

#[test]
fn test_speed_limit_clamps_but_never_raises() {
    let mut store = store();
    let limit = BandwidthLimit::new(10.0, 10.0).unwrap();
    assert!(store.set_speed_limit(&id("dev-003"), limit));

    let device = store.device(&id("dev-003")).unwrap();
    assert_rates(device.current_rates(), 10.0, 10.0);
    assert_rates(device.caps(), 10.0, 10.0);
    assert_eq!(device.status, DeviceStatus::Connected);

    let generous = BandwidthLimit::new(500.0, 500.0).unwrap();
    store.set_speed_limit(&id("dev-003"), generous);
    assert_rates(store.device(&id("dev-003")).unwrap().current_rates(), 10.0, 10.0);
}

#[test]
fn test_limit_marks_device_limited() {
    let mut store = store();
    let limit = BandwidthLimit::new(5.0, 2.0).unwrap();
    assert!(store.limit(&id("dev-001"), limit));

    let device = store.device(&id("dev-001")).unwrap();
    assert_eq!(device.status, DeviceStatus::Limited);
    assert_rates(device.current_rates(), 5.0, 2.0);
}

#[test]
fn test_negative_limit_is_rejected() {
    assert!(matches!(
        BandwidthLimit::new(-1.0, 5.0),
        Err(CoreError::Validation { .. })
    ));
    assert!(BandwidthLimit::new(f64::NAN, 5.0).is_err());
}

#[test]
fn test_kick_removes_device_and_saturates_counter() {
    let mut store = store();
    let removed = store.kick(&id("dev-001")).unwrap();
    assert_eq!(removed.id, id("dev-001"));
    assert_eq!(store.device_count(), 19);
    assert_eq!(store.network_stats().total_connections_today, 23);

    let mut stats = store.network_stats().clone();
    stats.total_connections_today = 0;
    store.replace_network_stats(stats);
    store.kick(&id("dev-002"));
    assert_eq!(store.network_stats().total_connections_today, 0);
}

#[test]
fn test_find_device_by_mac_hostname_or_name() {
    let store = store();
    assert_eq!(store.find_device("dev-003").unwrap().id, id("dev-003"));
    assert_eq!(store.find_device("a4-b1-c2-d3-e4-f5").unwrap().id, id("dev-001"));
    assert_eq!(store.find_device("GALAXY-S24").unwrap().id, id("dev-001"));
    assert_eq!(store.find_device("ipad air").unwrap().id, id("dev-004"));
    assert!(store.find_device("nope").is_none());
}

// ── Vouchers ────────────────────────────────────────────────────────

#[test]
fn test_create_voucher_goes_first_and_expires_on_time() {
    let mut store = store();
    let now = Utc::now();
    let request = CreateVoucherRequest {
        duration_hours: 6,
        data_limit_mb: 500,
        max_devices: 2,
        note: Some("  ".into()),
    };
    let voucher = store.create_voucher_at(request, now).unwrap();

    assert_eq!(voucher.status, VoucherStatus::Unused);
    assert_eq!(voucher.expires_at - voucher.created_at, Duration::hours(6));
    assert_eq!(voucher.code.len(), 8);
    assert_eq!(voucher.note, None);
    assert!(voucher.id.as_uuid().is_some());
    assert_eq!(store.vouchers().next().unwrap().id, voucher.id);
    assert_eq!(store.voucher_count(), 9);
}

#[test]
fn test_create_voucher_rejects_zero_duration_and_devices() {
    let mut store = store();
    let zero_hours = CreateVoucherRequest {
        duration_hours: 0,
        ..CreateVoucherRequest::default()
    };
    assert!(matches!(
        store.create_voucher(zero_hours),
        Err(CoreError::Validation { .. })
    ));
    let zero_devices = CreateVoucherRequest {
        max_devices: 0,
        ..CreateVoucherRequest::default()
    };
    assert!(store.create_voucher(zero_devices).is_err());
    assert_eq!(store.voucher_count(), 8);
}

#[test]
fn test_generated_codes_are_unique() {
    let mut store = store().with_code_length(2);
    let mut codes = std::collections::HashSet::new();
    for _ in 0..50 {
        let voucher = store.create_voucher(VoucherPreset::Trial.request()).unwrap();
        assert!(codes.insert(voucher.code));
    }
}

#[test]
fn test_revoke_is_idempotent_and_delete_removes() {
    let mut store = store();
    assert!(store.revoke_voucher(&id("voucher-004")));
    assert!(store.revoke_voucher(&id("voucher-004")));
    assert_eq!(
        store.voucher(&id("voucher-004")).unwrap().status,
        VoucherStatus::Revoked
    );

    assert!(store.delete_voucher(&id("voucher-004")).is_some());
    assert!(store.delete_voucher(&id("voucher-004")).is_none());
    assert_eq!(store.voucher_count(), 7);
}

#[test]
fn test_find_voucher_by_code() {
    let store = store();
    assert_eq!(store.find_voucher("fast2024").unwrap().id, id("voucher-001"));
    assert_eq!(store.find_voucher("voucher-005").unwrap().code, "PREM1UM8");
}

// ── Hotspot ─────────────────────────────────────────────────────────

#[test]
fn test_toggle_power_scales_rates() {
    let mut store = store();
    assert!(!store.toggle_hotspot_power());
    assert!(store.devices().all(|d| d.current_rates().is_zero()));

    assert!(store.toggle_hotspot_power());
    assert_rates(store.device(&id("dev-001")).unwrap().current_rates(), 25.0, 12.5);
    assert!(store.device(&id("dev-006")).unwrap().current_rates().is_zero());
}

#[test]
fn test_set_power_reports_change() {
    let mut store = store();
    assert!(!store.set_hotspot_power(true));
    assert!(store.set_hotspot_power(false));
    assert!(!store.hotspot_config().is_active);
}

#[test]
fn test_config_patch_is_validated_before_applying() {
    let mut store = store();
    let before = store.hotspot_config().clone();

    let bad = HotspotConfigPatch {
        ssid: Some("NewName".into()),
        password: Some("short".into()),
        ..HotspotConfigPatch::default()
    };
    assert!(store.update_hotspot_config(bad).is_err());
    assert_eq!(store.hotspot_config(), &before);

    for patch in [
        HotspotConfigPatch {
            ssid: Some("   ".into()),
            ..HotspotConfigPatch::default()
        },
        HotspotConfigPatch {
            ssid: Some("x".repeat(33)),
            ..HotspotConfigPatch::default()
        },
        HotspotConfigPatch {
            max_clients: Some(0),
            ..HotspotConfigPatch::default()
        },
        HotspotConfigPatch {
            max_clients: Some(256),
            ..HotspotConfigPatch::default()
        },
    ] {
        assert!(store.update_hotspot_config(patch).is_err());
    }

    let good = HotspotConfigPatch {
        ssid: Some("  Cafe Guest ".into()),
        max_clients: Some(20),
        ..HotspotConfigPatch::default()
    };
    store.update_hotspot_config(good).unwrap();
    assert_eq!(store.hotspot_config().ssid, "Cafe Guest");
    assert_eq!(store.hotspot_config().max_clients, 20);
    assert_eq!(store.hotspot_config().password, before.password);
}

#[test]
fn test_ui_settings_merge_and_reset() {
    let mut store = store();
    store.update_ui_settings(UiSettingsPatch {
        theme: Some(Theme::Ocean),
        reduce_motion: Some(true),
        ..UiSettingsPatch::default()
    });
    assert_eq!(store.ui_settings().theme, Theme::Ocean);
    assert_eq!(store.ui_settings().animation_duration_ms(), 0);
    assert!(store.ui_settings().show_animations);

    store.reset_ui_settings();
    assert_eq!(store.ui_settings().theme, Theme::Default);
}

// ── Selectors ───────────────────────────────────────────────────────

#[test]
fn test_selectors_partition_devices() {
    let store = store();
    let counts = store.status_counts();
    assert_eq!(
        counts,
        StatusCounts {
            connected: 15,
            limited: 3,
            blocked: 2,
        }
    );
    assert_eq!(counts.total(), store.device_count());
    assert_eq!(store.active_devices().count(), 15);
    assert_eq!(store.blocked_devices().count(), 2);
    assert_eq!(store.active_vouchers().count(), 3);
    assert!(approx(store.capacity_ratio(), 1.5));
}

#[test]
fn test_total_bandwidth_skips_blocked_devices() {
    let mut store = store();
    let before = store.total_bandwidth();
    store.block(&id("dev-001"));
    let after = store.total_bandwidth();
    assert!(approx(before.download_mbps - after.download_mbps, 24.5));
    assert!(approx(before.upload_mbps - after.upload_mbps, 8.2));
}

// ── Commands ────────────────────────────────────────────────────────

#[test]
fn test_unknown_ids_yield_not_found() {
    let mut store = store();
    let now = Utc::now();
    let commands = [
        Command::KickDevice { id: id("ghost") },
        Command::BlockDevice { id: id("ghost") },
        Command::UnblockDevice { id: id("ghost") },
        Command::RevokeVoucher { id: id("ghost") },
        Command::DeleteVoucher { id: id("ghost") },
    ];
    for cmd in commands {
        let result = execute_at(&mut store, cmd, now).unwrap();
        assert!(result.is_not_found(), "{result:?}");
    }
    assert_eq!(store.device_count(), 20);
    assert_eq!(store.voucher_count(), 8);
}

#[test]
fn test_import_command_replaces_collections() {
    let mut source = store();
    source.kick(&id("dev-001"));
    let bundle = ExportBundle::capture(&source);

    let mut target = store();
    let result = command::execute(&mut target, Command::Import(Box::new(bundle))).unwrap();
    let CommandResult::Imported(summary) = result else {
        panic!("unexpected result {result:?}");
    };
    assert_eq!(summary.devices, 19);
    assert_eq!(target.device_count(), 19);
}

#[test]
fn test_reset_all_restores_seed() {
    let mut store = store();
    store.kick(&id("dev-001"));
    store.toggle_hotspot_power();
    command::execute(&mut store, Command::ResetAll).unwrap();
    assert_eq!(store.device_count(), 20);
    assert!(store.hotspot_config().is_active);
}
