//! Voucher command handlers.

use chrono::Utc;
use tabled::Tabled;
use tetherly_config::VoucherDefaults;
use tetherly_core::format;
use tetherly_core::{
    Command as CoreCommand, CommandResult, Controller, CoreError, CreateVoucherRequest, Voucher,
    VoucherPreset, VoucherStatus,
};

use crate::cli::{GlobalOpts, PresetArg, VoucherStatusArg, VouchersArgs, VouchersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct VoucherRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Data")]
    data: String,
    #[tabled(rename = "Devices")]
    devices: String,
    #[tabled(rename = "Expires")]
    expires: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl From<&Voucher> for VoucherRow {
    fn from(v: &Voucher) -> Self {
        Self {
            id: v.id.to_string(),
            code: v.code.clone(),
            status: v.status.to_string(),
            duration: format!("{}h", v.duration_hours),
            data: data_summary(v),
            devices: format!("{}/{}", v.current_devices, v.max_devices),
            expires: format::time_left(v.expires_at, Utc::now()),
            note: v.note.clone().unwrap_or_default(),
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn data_summary(v: &Voucher) -> String {
    format!(
        "{} / {}",
        format::data_mb(v.data_used_mb),
        format::data_mb(v.data_limit_mb as f64)
    )
}

fn detail(v: &Voucher, color: bool) -> String {
    let now = Utc::now();
    let mut lines = vec![
        format!("ID:        {}", v.id),
        format!("Code:      {}", v.code),
        format!(
            "Status:    {}",
            output::paint(&v.status.to_string(), format::voucher_status_color(v.status), color)
        ),
        format!("Duration:  {}h", v.duration_hours),
        format!(
            "Data:      {} {:.0}%",
            format::usage_bar(v.usage_pct(), 20),
            v.usage_pct()
        ),
        format!("           {} ({} left)", data_summary(v), format::data_mb(v.remaining_data_mb())),
        format!(
            "Devices:   {}/{}{}",
            v.current_devices,
            v.max_devices,
            if v.has_free_slot() { "" } else { " (full)" }
        ),
        format!("Created:   {}", format::time_ago(v.created_at, now)),
        format!("Expires:   {}", format::time_left(v.expires_at, now)),
    ];
    if !v.used_by.is_empty() {
        let ids: Vec<String> = v.used_by.iter().map(ToString::to_string).collect();
        lines.push(format!("Used by:   {}", ids.join(", ")));
    }
    if let Some(note) = &v.note {
        lines.push(format!("Note:      {note}"));
    }
    lines.join("\n")
}

fn status_filter(arg: VoucherStatusArg) -> VoucherStatus {
    match arg {
        VoucherStatusArg::Unused => VoucherStatus::Unused,
        VoucherStatusArg::Active => VoucherStatus::Active,
        VoucherStatusArg::Expired => VoucherStatus::Expired,
        VoucherStatusArg::Revoked => VoucherStatus::Revoked,
    }
}

fn preset(arg: PresetArg) -> VoucherPreset {
    match arg {
        PresetArg::Trial => VoucherPreset::Trial,
        PresetArg::Basic => VoucherPreset::Basic,
        PresetArg::Standard => VoucherPreset::Standard,
        PresetArg::Premium => VoucherPreset::Premium,
        PresetArg::Bulk => VoucherPreset::Bulk,
    }
}

/// Preset (or configured defaults), then explicit flags on top.
fn build_request(
    defaults: &VoucherDefaults,
    preset_arg: Option<PresetArg>,
    hours: Option<u32>,
    data_mb: Option<u64>,
    max_devices: Option<u32>,
    note: Option<String>,
) -> CreateVoucherRequest {
    let base = preset_arg.map_or_else(|| defaults.request(), |p| preset(p).request());
    CreateVoucherRequest {
        duration_hours: hours.unwrap_or(base.duration_hours),
        data_limit_mb: data_mb.unwrap_or(base.data_limit_mb),
        max_devices: max_devices.unwrap_or(base.max_devices),
        note,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

/// Vouchers created before a failure are already persisted, so they are
/// returned alongside the error.
fn create_batch(
    controller: &mut Controller,
    request: &CreateVoucherRequest,
    count: u32,
) -> (Vec<Voucher>, Option<CoreError>) {
    let mut created = Vec::new();
    for _ in 0..count {
        match controller.execute(CoreCommand::CreateVoucher(request.clone())) {
            Ok(CommandResult::VoucherCreated(voucher)) => created.push(voucher),
            Ok(_) => {}
            Err(err) => return (created, Some(err)),
        }
    }
    (created, None)
}

pub fn handle(
    controller: &mut Controller,
    args: VouchersArgs,
    global: &GlobalOpts,
    defaults: &VoucherDefaults,
) -> Result<(), CliError> {
    let format = global.output_format();
    match args.command {
        VouchersCommand::List { status } => {
            let store = controller.store();
            let vouchers: Vec<&Voucher> = match status {
                Some(s) => store.vouchers_with_status(status_filter(s)).collect(),
                None => store.vouchers().collect(),
            };
            let out = output::render_list(
                format,
                &vouchers,
                |v| VoucherRow::from(*v),
                |v| v.code.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VouchersCommand::Get { voucher } => {
            let id = util::resolve_voucher_id(controller, &voucher)?;
            let found = controller
                .store()
                .voucher(&id)
                .ok_or_else(|| CliError::not_found("voucher", &voucher))?;
            let color = output::should_color(global.color_mode());
            let out = output::render_single(format, found, |v| detail(v, color), |v| v.code.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VouchersCommand::Create {
            preset,
            hours,
            data_mb,
            max_devices,
            note,
            count,
        } => {
            if count == 0 {
                return Err(CliError::Validation {
                    field: "count".into(),
                    reason: "must be at least 1".into(),
                });
            }
            let request = build_request(defaults, preset, hours, data_mb, max_devices, note);
            let (created, failure) = create_batch(controller, &request, count);
            if !created.is_empty() {
                let out =
                    output::render_list(format, &created, |v| VoucherRow::from(v), |v| v.code.clone());
                output::print_output(&out, global.quiet);
            }
            match failure {
                Some(err) => {
                    output::notice(
                        &format!("Created {} of {count} vouchers before failing", created.len()),
                        global.quiet,
                    );
                    Err(err.into())
                }
                None => Ok(()),
            }
        }

        VouchersCommand::Revoke { voucher } => {
            let id = util::resolve_voucher_id(controller, &voucher)?;
            controller.execute(CoreCommand::RevokeVoucher { id })?.found()?;
            output::notice(&format!("Revoked {voucher}"), global.quiet);
            Ok(())
        }

        VouchersCommand::Delete { voucher } => {
            let id = util::resolve_voucher_id(controller, &voucher)?;
            if !util::confirm(&format!("Delete voucher {voucher}?"), "delete", global.yes)? {
                return Ok(());
            }
            if let CommandResult::VoucherRemoved(removed) =
                controller.execute(CoreCommand::DeleteVoucher { id })?.found()?
            {
                output::notice(&format!("Deleted voucher {}", removed.code), global.quiet);
            }
            Ok(())
        }
    }
}
