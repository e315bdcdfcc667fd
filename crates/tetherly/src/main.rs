mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tetherly_core::{Controller, HotspotStore};

use crate::cli::{Cli, Command};
use crate::config::StorageTarget;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { mut global, command } = cli;
    match command {
        // Config commands don't touch hotspot state
        Command::Config(args) => commands::config_cmd::handle(args, &global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "tetherly", &mut std::io::stdout());
            Ok(())
        }

        // Everything else runs against the persisted store
        cmd => {
            let cfg = config::load_config()?;
            config::apply_defaults(&mut global, &cfg)?;

            let target = StorageTarget::resolve(&global, &cfg);
            tracing::debug!(?target, "opening hotspot state");

            let store = HotspotStore::seeded().with_code_length(cfg.vouchers.code_length);
            let mut controller = Controller::open(store, target.backend(), cfg.storage.policy)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            let outcome = commands::dispatch(cmd, &mut controller, &global, &cfg);

            // Flush queued writes even when the command failed; its error wins.
            let flushed = controller.shutdown().await;
            outcome?;
            flushed?;
            Ok(())
        }
    }
}
