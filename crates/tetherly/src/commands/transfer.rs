//! Export, import and full reset.

use tetherly_core::{Command as CoreCommand, CommandResult, Controller, ExportBundle};

use crate::cli::{ExportArgs, GlobalOpts, ImportArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub fn export(controller: &Controller, args: ExportArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let json = ExportBundle::capture(controller.store()).to_json()?;
    match args.file {
        Some(path) => {
            std::fs::write(&path, json)?;
            output::notice(&format!("Exported to {}", path.display()), global.quiet);
        }
        None => output::print_output(&json, global.quiet),
    }
    Ok(())
}

pub fn import(controller: &mut Controller, args: ImportArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let raw = util::read_input(args.file.as_deref())?;
    let bundle = ExportBundle::parse(&raw)?;

    let prompt = format!(
        "Replace current state with {} devices and {} vouchers?",
        bundle.devices.len(),
        bundle.vouchers.len()
    );
    if !util::confirm(&prompt, "import", global.yes)? {
        return Ok(());
    }

    if let CommandResult::Imported(summary) =
        controller.execute(CoreCommand::Import(Box::new(bundle)))?
    {
        output::notice(
            &format!(
                "Imported {} devices and {} vouchers",
                summary.devices, summary.vouchers
            ),
            global.quiet,
        );
    }
    Ok(())
}

pub fn reset(controller: &mut Controller, global: &GlobalOpts) -> Result<(), CliError> {
    if !util::confirm(
        "Restore the demo dataset and erase all saved state?",
        "reset",
        global.yes,
    )? {
        return Ok(());
    }
    controller.execute(CoreCommand::ResetAll)?;
    output::notice("State reset to defaults", global.quiet);
    Ok(())
}
