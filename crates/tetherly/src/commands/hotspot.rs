//! Hotspot power and settings handlers.

use tetherly_core::{
    Band, Command as CoreCommand, CommandResult, Controller, HotspotConfig, HotspotConfigPatch,
    SecurityType, ShellCommands,
};

use crate::cli::{BandArg, GlobalOpts, HotspotArgs, HotspotCommand, SecurityArg};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(cfg: &HotspotConfig, clients: usize, color: bool) -> String {
    let power = if cfg.is_active {
        output::paint("on", "#34D399", color)
    } else {
        output::paint("off", "#F87171", color)
    };
    [
        format!("Power:       {power}"),
        format!("SSID:        {}", cfg.ssid),
        format!("Password:    {}", cfg.masked_password()),
        format!("Security:    {}", cfg.security_type),
        format!("Band:        {}", cfg.band),
        format!("Clients:     {clients}/{}", cfg.max_clients),
        format!("Gateway:     {}", cfg.gateway_ip),
        format!("Rooted:      {}", util::yes_no(cfg.is_rooted)),
    ]
    .join("\n")
}

fn band(arg: BandArg) -> Band {
    match arg {
        BandArg::Ghz2_4 => Band::Ghz2_4,
        BandArg::Ghz5 => Band::Ghz5,
    }
}

fn security(arg: SecurityArg) -> SecurityType {
    match arg {
        SecurityArg::Wpa2 => SecurityType::Wpa2,
        SecurityArg::Wpa3 => SecurityType::Wpa3,
        SecurityArg::Open => SecurityType::Open,
    }
}

fn report_power(result: &CommandResult, quiet: bool) {
    if let CommandResult::HotspotPower { active, changed } = result {
        let state = if *active { "on" } else { "off" };
        if *changed {
            output::notice(&format!("Hotspot turned {state}"), quiet);
        } else {
            output::notice(&format!("Hotspot already {state}"), quiet);
        }
    }
}

pub fn handle(
    controller: &mut Controller,
    args: HotspotArgs,
    global: &GlobalOpts,
    shell: &ShellCommands,
) -> Result<(), CliError> {
    let format = global.output_format();
    match args.command {
        HotspotCommand::Status => {
            let store = controller.store();
            let clients = store.active_devices().count();
            let color = output::should_color(global.color_mode());
            let out = output::render_single(
                format,
                store.hotspot_config(),
                |c| detail(c, clients, color),
                |c| c.ssid.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        HotspotCommand::On => {
            let result = controller.execute(CoreCommand::SetHotspotPower { active: true })?;
            report_power(&result, global.quiet);
            Ok(())
        }

        HotspotCommand::Off => {
            let result = controller.execute(CoreCommand::SetHotspotPower { active: false })?;
            report_power(&result, global.quiet);
            Ok(())
        }

        HotspotCommand::Toggle => {
            let result = controller.execute(CoreCommand::ToggleHotspotPower)?;
            report_power(&result, global.quiet);
            Ok(())
        }

        HotspotCommand::Set {
            ssid,
            password,
            band: band_arg,
            max_clients,
            security: security_arg,
            rooted,
            gateway,
        } => {
            let patch = HotspotConfigPatch {
                ssid,
                password,
                band: band_arg.map(band),
                max_clients,
                is_rooted: rooted,
                gateway_ip: gateway,
                security_type: security_arg.map(security),
            };
            if patch.is_empty() {
                return Err(CliError::Validation {
                    field: "hotspot set".into(),
                    reason: "pass at least one setting to change".into(),
                });
            }
            controller.execute(CoreCommand::UpdateHotspotConfig(patch))?;
            output::notice("Hotspot settings updated", global.quiet);
            Ok(())
        }

        HotspotCommand::Commands => {
            let snippets = shell.for_hotspot();
            let out = util::render_snippets(format, &snippets);
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
