// tetherly-core: State store and persistence behind the hotspot dashboard.

pub mod command;
pub mod controller;
pub mod error;
pub mod format;
pub mod model;
pub mod persist;
pub mod seed;
pub mod shell;
pub mod store;
pub mod transfer;
pub mod voucher_code;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{
    Command, CommandResult, CreateVoucherRequest, HotspotConfigPatch, UiSettingsPatch,
    VoucherPreset,
};
pub use controller::Controller;
pub use error::CoreError;
pub use persist::{FileStore, KeyValueStore, MemoryStore, Persistence, PersistencePolicy, StorageKey};
pub use shell::ShellCommands;
pub use store::{HotspotStore, StatusCounts};
pub use transfer::{ExportBundle, ImportSummary};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Entities
    Device, DeviceStatus, DeviceType, EntityId, MacAddress, Voucher, VoucherStatus,
    // Hotspot
    Band, HotspotConfig, NetworkStats, SecurityType, UsageSample,
    // Supporting types
    Bandwidth, BandwidthLimit,
    // Presentation
    AnimationSpeed, CornerStyle, Theme, UiSettings,
};
