// ── Seed data ──
//
// The demo dataset every fresh install starts from. Timestamps are
// expressed as offsets from a caller-supplied `now` so the data always
// looks recent.

use std::net::{IpAddr, Ipv4Addr};

use chrono::{DateTime, Duration, Utc};

use crate::model::{
    Band, Device, DeviceStatus, DeviceType, EntityId, HotspotConfig, MacAddress, NetworkStats,
    SecurityType, UsageSample, Voucher, VoucherStatus,
};

/// Every seeded device lives on the hotspot's /24.
const SUBNET: [u8; 3] = [192, 168, 43];

#[derive(Clone, Copy)]
enum Offset {
    MinutesAgo(f64),
    HoursAgo(f64),
    DaysAgo(f64),
    HoursFromNow(f64),
}

impl Offset {
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    fn resolve(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let minutes = match self {
            Self::MinutesAgo(m) => -m,
            Self::HoursAgo(h) => -h * 60.0,
            Self::DaysAgo(d) => -d * 1440.0,
            Self::HoursFromNow(h) => h * 60.0,
        };
        now + Duration::seconds((minutes * 60.0).round() as i64)
    }
}

struct DeviceRow {
    id: &'static str,
    name: &'static str,
    hostname: &'static str,
    mac: &'static str,
    host: u8,
    kind: DeviceType,
    status: DeviceStatus,
    usage_mb: (f64, f64),
    current: (f64, f64),
    caps: (f64, f64),
    signal: u8,
    connected: Offset,
    last_activity: Offset,
    voucher: Option<&'static str>,
}

struct VoucherRow {
    id: &'static str,
    code: &'static str,
    duration_hours: u32,
    data_limit_mb: u64,
    max_devices: u32,
    current_devices: u32,
    data_used_mb: f64,
    status: VoucherStatus,
    used_by: &'static [&'static str],
    created: Offset,
    expires: Offset,
    note: &'static str,
}

const DEVICES: &[DeviceRow] = &[
    DeviceRow {
        id: "dev-001",
        name: "Samsung Galaxy S24",
        hostname: "galaxy-s24",
        mac: "A4:B1:C2:D3:E4:F5",
        host: 101,
        kind: DeviceType::Phone,
        status: DeviceStatus::Connected,
        usage_mb: (2340.0, 456.0),
        current: (24.5, 8.2),
        caps: (50.0, 25.0),
        signal: 92,
        connected: Offset::HoursAgo(3.5),
        last_activity: Offset::MinutesAgo(1.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-002",
        name: "iPhone 15 Pro",
        hostname: "iphone-15pro",
        mac: "B6:C7:D8:E9:F0:A1",
        host: 102,
        kind: DeviceType::Phone,
        status: DeviceStatus::Connected,
        usage_mb: (1820.0, 310.0),
        current: (18.3, 5.7),
        caps: (50.0, 25.0),
        signal: 78,
        connected: Offset::HoursAgo(2.0),
        last_activity: Offset::MinutesAgo(3.0),
        voucher: Some("voucher-001"),
    },
    DeviceRow {
        id: "dev-003",
        name: "MacBook Pro 14\"",
        hostname: "macbook-pro",
        mac: "C8:D9:E0:F1:A2:B3",
        host: 103,
        kind: DeviceType::Laptop,
        status: DeviceStatus::Connected,
        usage_mb: (5670.0, 1230.0),
        current: (45.8, 15.4),
        caps: (100.0, 50.0),
        signal: 85,
        connected: Offset::HoursAgo(6.0),
        last_activity: Offset::MinutesAgo(0.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-004",
        name: "iPad Air",
        hostname: "ipad-air",
        mac: "D0:E1:F2:A3:B4:C5",
        host: 104,
        kind: DeviceType::Tablet,
        status: DeviceStatus::Limited,
        usage_mb: (890.0, 120.0),
        current: (8.1, 2.3),
        caps: (10.0, 5.0),
        signal: 65,
        connected: Offset::HoursAgo(1.5),
        last_activity: Offset::MinutesAgo(8.0),
        voucher: Some("voucher-002"),
    },
    DeviceRow {
        id: "dev-005",
        name: "Dell XPS 15",
        hostname: "dell-xps",
        mac: "E2:F3:A4:B5:C6:D7",
        host: 105,
        kind: DeviceType::Laptop,
        status: DeviceStatus::Connected,
        usage_mb: (3450.0, 780.0),
        current: (32.6, 12.1),
        caps: (50.0, 25.0),
        signal: 71,
        connected: Offset::HoursAgo(4.0),
        last_activity: Offset::MinutesAgo(2.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-006",
        name: "Pixel 8 Pro",
        hostname: "pixel-8pro",
        mac: "F4:A5:B6:C7:D8:E9",
        host: 106,
        kind: DeviceType::Phone,
        status: DeviceStatus::Blocked,
        usage_mb: (4520.0, 890.0),
        current: (0.0, 0.0),
        caps: (50.0, 25.0),
        signal: 0,
        connected: Offset::HoursAgo(8.0),
        last_activity: Offset::HoursAgo(1.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-007",
        name: "Samsung Galaxy Tab S9",
        hostname: "galaxy-tab-s9",
        mac: "A1:B2:C3:D4:E5:F6",
        host: 107,
        kind: DeviceType::Tablet,
        status: DeviceStatus::Connected,
        usage_mb: (670.0, 95.0),
        current: (15.2, 4.8),
        caps: (50.0, 25.0),
        signal: 58,
        connected: Offset::HoursAgo(0.5),
        last_activity: Offset::MinutesAgo(5.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-008",
        name: "Windows Desktop",
        hostname: "win-desktop",
        mac: "B3:C4:D5:E6:F7:A8",
        host: 108,
        kind: DeviceType::Desktop,
        status: DeviceStatus::Connected,
        usage_mb: (8920.0, 2340.0),
        current: (55.3, 22.7),
        caps: (100.0, 50.0),
        signal: 45,
        connected: Offset::HoursAgo(12.0),
        last_activity: Offset::MinutesAgo(0.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-009",
        name: "OnePlus 12",
        hostname: "oneplus-12",
        mac: "C5:D6:E7:F8:A9:B0",
        host: 109,
        kind: DeviceType::Phone,
        status: DeviceStatus::Limited,
        usage_mb: (1230.0, 340.0),
        current: (5.0, 2.0),
        caps: (5.0, 2.0),
        signal: 82,
        connected: Offset::HoursAgo(2.5),
        last_activity: Offset::MinutesAgo(12.0),
        voucher: Some("voucher-003"),
    },
    DeviceRow {
        id: "dev-010",
        name: "Xiaomi 14 Ultra",
        hostname: "xiaomi-14ultra",
        mac: "D7:E8:F9:A0:B1:C2",
        host: 110,
        kind: DeviceType::Phone,
        status: DeviceStatus::Connected,
        usage_mb: (560.0, 180.0),
        current: (21.4, 7.6),
        caps: (50.0, 25.0),
        signal: 73,
        connected: Offset::HoursAgo(1.0),
        last_activity: Offset::MinutesAgo(4.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-011",
        name: "HP Spectre x360",
        hostname: "hp-spectre",
        mac: "E9:F0:A1:B2:C3:D4",
        host: 111,
        kind: DeviceType::Laptop,
        status: DeviceStatus::Blocked,
        usage_mb: (6780.0, 1560.0),
        current: (0.0, 0.0),
        caps: (50.0, 25.0),
        signal: 0,
        connected: Offset::HoursAgo(10.0),
        last_activity: Offset::HoursAgo(3.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-012",
        name: "Nothing Phone 2",
        hostname: "nothing-phone2",
        mac: "F1:A2:B3:C4:D5:E6",
        host: 112,
        kind: DeviceType::Phone,
        status: DeviceStatus::Connected,
        usage_mb: (345.0, 67.0),
        current: (12.8, 3.9),
        caps: (25.0, 10.0),
        signal: 61,
        connected: Offset::HoursAgo(0.75),
        last_activity: Offset::MinutesAgo(6.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-013",
        name: "Lenovo ThinkPad",
        hostname: "thinkpad-t14",
        mac: "A3:B4:C5:D6:E7:F8",
        host: 113,
        kind: DeviceType::Laptop,
        status: DeviceStatus::Connected,
        usage_mb: (4120.0, 920.0),
        current: (38.9, 14.2),
        caps: (50.0, 25.0),
        signal: 68,
        connected: Offset::HoursAgo(5.0),
        last_activity: Offset::MinutesAgo(1.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-014",
        name: "Amazon Fire Tablet",
        hostname: "fire-tablet",
        mac: "B5:C6:D7:E8:F9:A0",
        host: 114,
        kind: DeviceType::Tablet,
        status: DeviceStatus::Connected,
        usage_mb: (1890.0, 230.0),
        current: (9.4, 2.1),
        caps: (25.0, 10.0),
        signal: 52,
        connected: Offset::HoursAgo(3.0),
        last_activity: Offset::MinutesAgo(15.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-015",
        name: "Huawei MatePad",
        hostname: "matepad-11",
        mac: "C7:D8:E9:F0:A1:B2",
        host: 115,
        kind: DeviceType::Tablet,
        status: DeviceStatus::Connected,
        usage_mb: (720.0, 110.0),
        current: (11.7, 3.5),
        caps: (50.0, 25.0),
        signal: 47,
        connected: Offset::HoursAgo(1.2),
        last_activity: Offset::MinutesAgo(9.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-016",
        name: "ASUS ROG Phone 8",
        hostname: "rog-phone8",
        mac: "D9:E0:F1:A2:B3:C4",
        host: 116,
        kind: DeviceType::Phone,
        status: DeviceStatus::Connected,
        usage_mb: (7830.0, 2100.0),
        current: (62.1, 28.4),
        caps: (100.0, 50.0),
        signal: 89,
        connected: Offset::HoursAgo(7.0),
        last_activity: Offset::MinutesAgo(0.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-017",
        name: "Motorola Edge 40",
        hostname: "moto-edge40",
        mac: "E1:F2:A3:B4:C5:D6",
        host: 117,
        kind: DeviceType::Phone,
        status: DeviceStatus::Limited,
        usage_mb: (2100.0, 430.0),
        current: (3.0, 1.0),
        caps: (3.0, 1.0),
        signal: 76,
        connected: Offset::HoursAgo(4.0),
        last_activity: Offset::MinutesAgo(20.0),
        voucher: Some("voucher-004"),
    },
    DeviceRow {
        id: "dev-018",
        name: "Sony Xperia 1 V",
        hostname: "xperia-1v",
        mac: "F3:A4:B5:C6:D7:E8",
        host: 118,
        kind: DeviceType::Phone,
        status: DeviceStatus::Connected,
        usage_mb: (980.0, 210.0),
        current: (19.8, 6.3),
        caps: (50.0, 25.0),
        signal: 64,
        connected: Offset::HoursAgo(1.8),
        last_activity: Offset::MinutesAgo(7.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-019",
        name: "Surface Pro 9",
        hostname: "surface-pro9",
        mac: "A5:B6:C7:D8:E9:F0",
        host: 119,
        kind: DeviceType::Laptop,
        status: DeviceStatus::Connected,
        usage_mb: (3210.0, 870.0),
        current: (41.2, 16.8),
        caps: (50.0, 25.0),
        signal: 55,
        connected: Offset::HoursAgo(5.5),
        last_activity: Offset::MinutesAgo(2.0),
        voucher: None,
    },
    DeviceRow {
        id: "dev-020",
        name: "Google Pixel Tablet",
        hostname: "pixel-tablet",
        mac: "B7:C8:D9:E0:F1:A2",
        host: 120,
        kind: DeviceType::Tablet,
        status: DeviceStatus::Connected,
        usage_mb: (430.0, 55.0),
        current: (7.6, 2.4),
        caps: (25.0, 10.0),
        signal: 41,
        connected: Offset::HoursAgo(0.3),
        last_activity: Offset::MinutesAgo(11.0),
        voucher: None,
    },
];

const VOUCHERS: &[VoucherRow] = &[
    VoucherRow {
        id: "voucher-001",
        code: "FAST2024",
        duration_hours: 24,
        data_limit_mb: 2048,
        max_devices: 2,
        current_devices: 1,
        data_used_mb: 1820.0,
        status: VoucherStatus::Active,
        used_by: &["dev-002"],
        created: Offset::DaysAgo(1.0),
        expires: Offset::HoursFromNow(12.0),
        note: "Guest access - premium",
    },
    VoucherRow {
        id: "voucher-002",
        code: "LITE4EVR",
        duration_hours: 12,
        data_limit_mb: 512,
        max_devices: 1,
        current_devices: 1,
        data_used_mb: 410.0,
        status: VoucherStatus::Active,
        used_by: &["dev-004"],
        created: Offset::HoursAgo(6.0),
        expires: Offset::HoursFromNow(6.0),
        note: "Limited speed guest",
    },
    VoucherRow {
        id: "voucher-003",
        code: "THR0TTL3",
        duration_hours: 8,
        data_limit_mb: 256,
        max_devices: 1,
        current_devices: 1,
        data_used_mb: 230.0,
        status: VoucherStatus::Active,
        used_by: &["dev-009"],
        created: Offset::HoursAgo(5.0),
        expires: Offset::HoursFromNow(3.0),
        note: "Throttled access",
    },
    VoucherRow {
        id: "voucher-004",
        code: "SLW00001",
        duration_hours: 4,
        data_limit_mb: 128,
        max_devices: 1,
        current_devices: 1,
        data_used_mb: 128.0,
        status: VoucherStatus::Expired,
        used_by: &["dev-017"],
        created: Offset::HoursAgo(8.0),
        expires: Offset::HoursAgo(4.0),
        note: "Expired basic voucher",
    },
    VoucherRow {
        id: "voucher-005",
        code: "PREM1UM8",
        duration_hours: 48,
        data_limit_mb: 5120,
        max_devices: 3,
        current_devices: 0,
        data_used_mb: 0.0,
        status: VoucherStatus::Unused,
        used_by: &[],
        created: Offset::HoursAgo(2.0),
        expires: Offset::HoursFromNow(46.0),
        note: "Premium 48h pass",
    },
    VoucherRow {
        id: "voucher-006",
        code: "FREETRL1",
        duration_hours: 1,
        data_limit_mb: 100,
        max_devices: 1,
        current_devices: 0,
        data_used_mb: 0.0,
        status: VoucherStatus::Unused,
        used_by: &[],
        created: Offset::MinutesAgo(30.0),
        expires: Offset::HoursFromNow(24.0),
        note: "Free trial - 1 hour",
    },
    VoucherRow {
        id: "voucher-007",
        code: "BULK0010",
        duration_hours: 72,
        data_limit_mb: 10240,
        max_devices: 5,
        current_devices: 0,
        data_used_mb: 0.0,
        status: VoucherStatus::Unused,
        used_by: &[],
        created: Offset::MinutesAgo(15.0),
        expires: Offset::HoursFromNow(72.0),
        note: "Bulk plan - 10GB/5 devices",
    },
    VoucherRow {
        id: "voucher-008",
        code: "RVKD2024",
        duration_hours: 24,
        data_limit_mb: 1024,
        max_devices: 2,
        current_devices: 0,
        data_used_mb: 450.0,
        status: VoucherStatus::Revoked,
        used_by: &[],
        created: Offset::DaysAgo(3.0),
        expires: Offset::DaysAgo(2.0),
        note: "Revoked - abuse detected",
    },
];

const HOURLY_USAGE: [(f64, f64); 24] = [
    (120.0, 30.0),
    (85.0, 20.0),
    (45.0, 10.0),
    (20.0, 5.0),
    (15.0, 3.0),
    (30.0, 8.0),
    (180.0, 45.0),
    (350.0, 90.0),
    (520.0, 130.0),
    (680.0, 170.0),
    (750.0, 190.0),
    (820.0, 210.0),
    (900.0, 230.0),
    (780.0, 200.0),
    (650.0, 160.0),
    (580.0, 140.0),
    (720.0, 180.0),
    (850.0, 220.0),
    (950.0, 250.0),
    (1100.0, 280.0),
    (980.0, 260.0),
    (750.0, 190.0),
    (450.0, 110.0),
    (250.0, 60.0),
];

/// The twenty demo clients, in display order.
pub fn devices(now: DateTime<Utc>) -> Vec<Device> {
    DEVICES
        .iter()
        .map(|row| Device {
            id: EntityId::from(row.id),
            name: row.name.to_owned(),
            hostname: row.hostname.to_owned(),
            mac_address: MacAddress::new(row.mac),
            ip_address: IpAddr::V4(Ipv4Addr::new(SUBNET[0], SUBNET[1], SUBNET[2], row.host)),
            device_type: row.kind,
            status: row.status,
            download_usage_mb: row.usage_mb.0,
            upload_usage_mb: row.usage_mb.1,
            current_download_mbps: row.current.0,
            current_upload_mbps: row.current.1,
            max_download_mbps: row.caps.0,
            max_upload_mbps: row.caps.1,
            signal_strength: row.signal,
            connected_at: row.connected.resolve(now),
            last_activity: row.last_activity.resolve(now),
            voucher_id: row.voucher.map(EntityId::from),
        })
        .collect()
}

pub fn vouchers(now: DateTime<Utc>) -> Vec<Voucher> {
    VOUCHERS
        .iter()
        .map(|row| Voucher {
            id: EntityId::from(row.id),
            code: row.code.to_owned(),
            duration_hours: row.duration_hours,
            data_limit_mb: row.data_limit_mb,
            max_devices: row.max_devices,
            current_devices: row.current_devices,
            data_used_mb: row.data_used_mb,
            status: row.status,
            used_by: row.used_by.iter().copied().map(EntityId::from).collect(),
            created_at: row.created.resolve(now),
            expires_at: row.expires.resolve(now),
            note: Some(row.note.to_owned()),
        })
        .collect()
}

pub fn hotspot_config() -> HotspotConfig {
    HotspotConfig {
        is_active: true,
        ssid: "HotspotManager_5G".into(),
        password: "Xk9#mP2$vL".into(),
        band: Band::Ghz5,
        max_clients: 10,
        is_rooted: true,
        gateway_ip: Ipv4Addr::new(SUBNET[0], SUBNET[1], SUBNET[2], 1),
        security_type: SecurityType::Wpa3,
    }
}

pub fn network_stats() -> NetworkStats {
    NetworkStats {
        total_download_mb: 52180.0,
        total_upload_mb: 12440.0,
        peak_download_mbps: 89.3,
        peak_upload_mbps: 42.1,
        uptime_minutes: 720,
        total_connections_today: 24,
        blocked_attempts: 7,
    }
}

/// Traffic per hour of the day, midnight first.
pub fn usage_history() -> Vec<UsageSample> {
    HOURLY_USAGE
        .iter()
        .enumerate()
        .map(|(hour, &(download_mb, upload_mb))| UsageSample {
            hour: format!("{hour:02}:00"),
            download_mb,
            upload_mb,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seeds_have_expected_sizes_and_unique_ids() {
        let now = Utc::now();
        let devices = devices(now);
        let vouchers = vouchers(now);
        assert_eq!(devices.len(), 20);
        assert_eq!(vouchers.len(), 8);
        let ids: HashSet<_> = devices.iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids.len(), 20);
        assert_eq!(usage_history().len(), 24);
    }

    #[test]
    fn seeded_devices_respect_status_invariants() {
        for d in devices(Utc::now()) {
            match d.status {
                DeviceStatus::Blocked => {
                    assert!(d.current_rates().is_zero(), "{}", d.id);
                    assert_eq!(d.signal_strength, 0, "{}", d.id);
                }
                DeviceStatus::Limited => {
                    assert!(d.current_download_mbps <= d.max_download_mbps, "{}", d.id);
                    assert!(d.current_upload_mbps <= d.max_upload_mbps, "{}", d.id);
                }
                DeviceStatus::Connected => {}
            }
        }
    }

    #[test]
    fn offsets_resolve_against_now() {
        let now = Utc::now();
        let first = &vouchers(now)[0];
        assert_eq!(first.created_at, now - Duration::days(1));
        assert_eq!(first.expires_at, now + Duration::hours(12));
        assert_eq!(usage_history()[9].hour, "09:00");
    }
}
