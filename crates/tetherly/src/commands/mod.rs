//! Command dispatch: bridges CLI args -> core Commands -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod hotspot;
pub mod stats;
pub mod transfer;
pub mod ui;
pub mod util;
pub mod vouchers;

use tetherly_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a state-bound command to the appropriate handler.
pub fn dispatch(
    cmd: Command,
    controller: &mut Controller,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(controller, args, global, &cfg.shell.commands()),
        Command::Vouchers(args) => vouchers::handle(controller, args, global, &cfg.vouchers),
        Command::Hotspot(args) => hotspot::handle(controller, args, global, &cfg.shell.commands()),
        Command::Stats(args) => {
            stats::handle(controller, args, global);
            Ok(())
        }
        Command::Ui(args) => ui::handle(controller, args, global),
        Command::Export(args) => transfer::export(controller, args, global),
        Command::Import(args) => transfer::import(controller, args, global),
        Command::Reset => transfer::reset(controller, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
