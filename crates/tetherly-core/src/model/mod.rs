// ── Hotspot domain model ──
//
// Canonical types for everything the dashboard tracks. The serialized
// form of each type is the JSON shape used both for local storage and
// for export bundles.

pub mod common;
pub mod entity_id;

pub mod device;
pub mod hotspot;
pub mod stats;
pub mod ui_settings;
pub mod voucher;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use tetherly_core::model::*` gives you everything.

// Core identity
pub use entity_id::{EntityId, MacAddress};

// Common building blocks
pub use common::{Bandwidth, BandwidthLimit};

// Device
pub use device::{Device, DeviceStatus, DeviceType};

// Voucher
pub use voucher::{Voucher, VoucherStatus};

// Hotspot
pub use hotspot::{Band, HotspotConfig, SecurityType};

// Stats
pub use stats::{NetworkStats, UsageSample};

// UI settings
pub use ui_settings::{AnimationSpeed, CornerStyle, Theme, UiSettings};
