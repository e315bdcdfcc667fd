// ── Command API ──
//
// All write operations flow through a unified `Command` enum.
// `execute` routes each variant to the matching store method and
// turns "nothing matched that id" into an explicit result.

pub mod requests;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::CoreError;
use crate::model::{BandwidthLimit, Device, EntityId, Voucher};
use crate::store::HotspotStore;
use crate::transfer::{ExportBundle, ImportSummary};

pub use requests::{CreateVoucherRequest, HotspotConfigPatch, UiSettingsPatch, VoucherPreset};

/// All possible write operations against the hotspot state.
#[derive(Debug, Clone)]
pub enum Command {
    // ── Device operations ────────────────────────────────────────────
    KickDevice {
        id: EntityId,
    },
    BlockDevice {
        id: EntityId,
    },
    UnblockDevice {
        id: EntityId,
    },
    SetSpeedLimit {
        id: EntityId,
        limit: BandwidthLimit,
    },
    LimitDevice {
        id: EntityId,
        limit: BandwidthLimit,
    },

    // ── Vouchers ─────────────────────────────────────────────────────
    CreateVoucher(CreateVoucherRequest),
    RevokeVoucher {
        id: EntityId,
    },
    DeleteVoucher {
        id: EntityId,
    },

    // ── Hotspot ──────────────────────────────────────────────────────
    ToggleHotspotPower,
    SetHotspotPower {
        active: bool,
    },
    UpdateHotspotConfig(HotspotConfigPatch),

    // ── UI settings ──────────────────────────────────────────────────
    UpdateUiSettings(UiSettingsPatch),
    ResetUiSettings,

    // ── Whole-state ──────────────────────────────────────────────────
    Import(Box<ExportBundle>),
    ResetAll,
}

impl Command {
    /// Short stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::KickDevice { .. } => "kick_device",
            Self::BlockDevice { .. } => "block_device",
            Self::UnblockDevice { .. } => "unblock_device",
            Self::SetSpeedLimit { .. } => "set_speed_limit",
            Self::LimitDevice { .. } => "limit_device",
            Self::CreateVoucher(_) => "create_voucher",
            Self::RevokeVoucher { .. } => "revoke_voucher",
            Self::DeleteVoucher { .. } => "delete_voucher",
            Self::ToggleHotspotPower => "toggle_hotspot_power",
            Self::SetHotspotPower { .. } => "set_hotspot_power",
            Self::UpdateHotspotConfig(_) => "update_hotspot_config",
            Self::UpdateUiSettings(_) => "update_ui_settings",
            Self::ResetUiSettings => "reset_ui_settings",
            Self::Import(_) => "import",
            Self::ResetAll => "reset_all",
        }
    }
}

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Ok,
    /// The target id did not exist; nothing changed.
    NotFound {
        entity_type: &'static str,
        id: EntityId,
    },
    VoucherCreated(Voucher),
    DeviceRemoved(Device),
    VoucherRemoved(Voucher),
    /// Power state after the command and whether it changed.
    HotspotPower {
        active: bool,
        changed: bool,
    },
    Imported(ImportSummary),
}

impl CommandResult {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Turn [`NotFound`](Self::NotFound) into [`CoreError::NotFound`] for
    /// callers that treat a miss as a failure.
    pub fn found(self) -> Result<Self, CoreError> {
        match self {
            Self::NotFound { entity_type, id } => Err(CoreError::NotFound {
                entity_type: entity_type.into(),
                identifier: id.to_string(),
            }),
            other => Ok(other),
        }
    }
}

/// Apply `cmd` to `store` using the current time.
pub fn execute(store: &mut HotspotStore, cmd: Command) -> Result<CommandResult, CoreError> {
    execute_at(store, cmd, Utc::now())
}

/// Apply `cmd` to `store`. Only validation failures are errors; an
/// unknown id yields [`CommandResult::NotFound`] with state unchanged.
pub fn execute_at(
    store: &mut HotspotStore,
    cmd: Command,
    now: DateTime<Utc>,
) -> Result<CommandResult, CoreError> {
    debug!(command = cmd.name(), "executing command");

    let result = match cmd {
        // ── Device operations ────────────────────────────────────

        Command::KickDevice { id } => match store.kick(&id) {
            Some(device) => CommandResult::DeviceRemoved(device),
            None => device_not_found(id),
        },

        Command::BlockDevice { id } => found_or(store.block(&id), || device_not_found(id)),

        Command::UnblockDevice { id } => found_or(store.unblock(&id), || device_not_found(id)),

        Command::SetSpeedLimit { id, limit } => {
            found_or(store.set_speed_limit(&id, limit), || device_not_found(id))
        }

        Command::LimitDevice { id, limit } => {
            found_or(store.limit(&id, limit), || device_not_found(id))
        }

        // ── Vouchers ─────────────────────────────────────────────

        Command::CreateVoucher(request) => {
            CommandResult::VoucherCreated(store.create_voucher_at(request, now)?)
        }

        Command::RevokeVoucher { id } => {
            found_or(store.revoke_voucher(&id), || voucher_not_found(id))
        }

        Command::DeleteVoucher { id } => match store.delete_voucher(&id) {
            Some(voucher) => CommandResult::VoucherRemoved(voucher),
            None => voucher_not_found(id),
        },

        // ── Hotspot ──────────────────────────────────────────────

        Command::ToggleHotspotPower => CommandResult::HotspotPower {
            active: store.toggle_hotspot_power(),
            changed: true,
        },

        Command::SetHotspotPower { active } => CommandResult::HotspotPower {
            changed: store.set_hotspot_power(active),
            active,
        },

        Command::UpdateHotspotConfig(patch) => {
            store.update_hotspot_config(patch)?;
            CommandResult::Ok
        }

        // ── UI settings ──────────────────────────────────────────

        Command::UpdateUiSettings(patch) => {
            store.update_ui_settings(patch);
            CommandResult::Ok
        }

        Command::ResetUiSettings => {
            store.reset_ui_settings();
            CommandResult::Ok
        }

        // ── Whole-state ──────────────────────────────────────────

        Command::Import(bundle) => CommandResult::Imported(bundle.apply(store)),

        Command::ResetAll => {
            store.reset_at(now);
            CommandResult::Ok
        }
    };

    Ok(result)
}

fn found_or(found: bool, not_found: impl FnOnce() -> CommandResult) -> CommandResult {
    if found { CommandResult::Ok } else { not_found() }
}

fn device_not_found(id: EntityId) -> CommandResult {
    CommandResult::NotFound {
        entity_type: "device",
        id,
    }
}

fn voucher_not_found(id: EntityId) -> CommandResult {
    CommandResult::NotFound {
        entity_type: "voucher",
        id,
    }
}
