//! Device command handlers.

use chrono::Utc;
use tabled::Tabled;
use tetherly_core::format::{self, SignalLevel};
use tetherly_core::{
    Command as CoreCommand, CommandResult, Controller, Device, DeviceStatus, ShellCommands,
};

use crate::cli::{DeviceStatusArg, DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    dtype: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Down")]
    down: String,
    #[tabled(rename = "Up")]
    up: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Connected")]
    connected: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        let now = Utc::now();
        Self {
            id: d.id.to_string(),
            name: d.label().to_owned(),
            dtype: d.device_type.to_string(),
            status: d.status.to_string(),
            ip: d.ip_address.to_string(),
            down: format::speed_mbps(d.current_download_mbps),
            up: format::speed_mbps(d.current_upload_mbps),
            used: format::data_mb(d.download_usage_mb + d.upload_usage_mb),
            signal: format!("{} {}%", format::signal_bars(d.signal_strength), d.signal_strength),
            connected: format::time_since(d.connected_at, now),
        }
    }
}

fn detail(d: &Device, color: bool) -> String {
    let now = Utc::now();
    let level = SignalLevel::from_strength(d.signal_strength);
    [
        format!("ID:        {}", d.id),
        format!("Name:      {}", d.name),
        format!("Hostname:  {}", d.hostname),
        format!("Type:      {}", d.device_type),
        format!(
            "Status:    {}",
            output::paint(&d.status.to_string(), format::device_status_color(d.status), color)
        ),
        format!("MAC:       {}", d.mac_address),
        format!("IP:        {}", d.ip_address),
        format!(
            "Speed:     {} down / {} up",
            format::speed_mbps(d.current_download_mbps),
            format::speed_mbps(d.current_upload_mbps)
        ),
        format!(
            "Caps:      {} down / {} up",
            format::speed_mbps(d.max_download_mbps),
            format::speed_mbps(d.max_upload_mbps)
        ),
        format!(
            "Usage:     {} down / {} up",
            format::data_mb(d.download_usage_mb),
            format::data_mb(d.upload_usage_mb)
        ),
        format!(
            "Signal:    {} {}% ({level})",
            output::paint(&format::signal_bars(d.signal_strength), level.color(), color),
            d.signal_strength
        ),
        format!("Connected: {}", format::time_since(d.connected_at, now)),
        format!("Active:    {}", format::time_ago(d.last_activity, now)),
        format!(
            "Voucher:   {}",
            d.voucher_id.as_ref().map_or_else(|| "-".into(), ToString::to_string)
        ),
    ]
    .join("\n")
}

fn status_filter(arg: DeviceStatusArg) -> DeviceStatus {
    match arg {
        DeviceStatusArg::Connected => DeviceStatus::Connected,
        DeviceStatusArg::Limited => DeviceStatus::Limited,
        DeviceStatusArg::Blocked => DeviceStatus::Blocked,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    controller: &mut Controller,
    args: DevicesArgs,
    global: &GlobalOpts,
    shell: &ShellCommands,
) -> Result<(), CliError> {
    let format = global.output_format();
    match args.command {
        DevicesCommand::List { status } => {
            let store = controller.store();
            let devices: Vec<&Device> = match status {
                Some(s) => store.devices_with_status(status_filter(s)).collect(),
                None => store.devices().collect(),
            };
            let out = output::render_list(
                format,
                &devices,
                |d| DeviceRow::from(*d),
                |d| d.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { device } => {
            let id = util::resolve_device_id(controller, &device)?;
            let found = controller
                .store()
                .device(&id)
                .ok_or_else(|| CliError::not_found("device", &device))?;
            let color = output::should_color(global.color_mode());
            let out = output::render_single(format, found, |d| detail(d, color), |d| {
                d.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Kick { device } => {
            let id = util::resolve_device_id(controller, &device)?;
            if !util::confirm(&format!("Kick device {device}?"), "kick", global.yes)? {
                return Ok(());
            }
            if let CommandResult::DeviceRemoved(removed) =
                controller.execute(CoreCommand::KickDevice { id })?.found()?
            {
                output::notice(&format!("Kicked {}", removed.label()), global.quiet);
            }
            Ok(())
        }

        DevicesCommand::Block { device } => {
            let id = util::resolve_device_id(controller, &device)?;
            controller.execute(CoreCommand::BlockDevice { id })?.found()?;
            output::notice(&format!("Blocked {device}"), global.quiet);
            Ok(())
        }

        DevicesCommand::Unblock { device } => {
            let id = util::resolve_device_id(controller, &device)?;
            controller.execute(CoreCommand::UnblockDevice { id })?.found()?;
            output::notice(&format!("Unblocked {device}"), global.quiet);
            Ok(())
        }

        DevicesCommand::Limit { device, rates } => {
            let limit = util::bandwidth_limit(&rates)?;
            let id = util::resolve_device_id(controller, &device)?;
            controller.execute(CoreCommand::LimitDevice { id, limit })?.found()?;
            output::notice(
                &format!(
                    "Limited {device} to {} down / {} up",
                    format::speed_mbps(rates.down),
                    format::speed_mbps(rates.up)
                ),
                global.quiet,
            );
            Ok(())
        }

        DevicesCommand::SpeedLimit { device, rates } => {
            let limit = util::bandwidth_limit(&rates)?;
            let id = util::resolve_device_id(controller, &device)?;
            controller.execute(CoreCommand::SetSpeedLimit { id, limit })?.found()?;
            output::notice(&format!("Updated caps for {device}"), global.quiet);
            Ok(())
        }

        DevicesCommand::Commands { device } => {
            let id = util::resolve_device_id(controller, &device)?;
            let found = controller
                .store()
                .device(&id)
                .ok_or_else(|| CliError::not_found("device", &device))?;
            let snippets = shell.for_device(found);
            let out = util::render_snippets(format, &snippets);
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
