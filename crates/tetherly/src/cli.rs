//! Clap derive structures for the `tetherly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tetherly -- manage a phone hotspot's clients, vouchers and settings
#[derive(Debug, Parser)]
#[command(
    name = "tetherly",
    version,
    about = "Manage a mobile hotspot from the command line",
    long_about = "Inspect and control the clients, access vouchers and access-point\n\
        settings of a tethering hotspot. State persists between runs in the\n\
        data directory; --ephemeral keeps everything in memory.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format [default: table, or `defaults.output` from config]
    #[arg(long, short = 'o', env = "TETHERLY_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Directory holding persisted state (overrides config)
    #[arg(long, env = "TETHERLY_DATA_DIR", global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep state in memory only; nothing is read or written
    #[arg(long, global = true, conflicts_with = "data_dir")]
    pub ephemeral: bool,
}

impl GlobalOpts {
    pub fn output_format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect and control connected clients
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Create and manage access vouchers
    #[command(alias = "v")]
    Vouchers(VouchersArgs),

    /// Access-point power and settings
    #[command(alias = "hs")]
    Hotspot(HotspotArgs),

    /// Network statistics and bandwidth totals
    Stats(StatsArgs),

    /// Dashboard appearance preferences
    Ui(UiArgs),

    /// Write the current state as a JSON bundle
    Export(ExportArgs),

    /// Replace devices, vouchers and settings from a JSON bundle
    Import(ImportArgs),

    /// Restore the demo dataset and wipe persisted state
    Reset,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List clients
    #[command(alias = "ls")]
    List {
        /// Only show clients in this state
        #[arg(long, short = 's')]
        status: Option<DeviceStatusArg>,
    },

    /// Show one client
    Get {
        /// Device ID, MAC address, hostname or name
        device: String,
    },

    /// Disconnect and forget a client
    Kick {
        /// Device ID, MAC address, hostname or name
        device: String,
    },

    /// Block a client
    Block {
        /// Device ID, MAC address, hostname or name
        device: String,
    },

    /// Unblock a client
    Unblock {
        /// Device ID, MAC address, hostname or name
        device: String,
    },

    /// Cap a client's bandwidth and mark it limited
    Limit {
        /// Device ID, MAC address, hostname or name
        device: String,

        #[command(flatten)]
        rates: RateArgs,
    },

    /// Change a client's bandwidth caps without changing its state
    SpeedLimit {
        /// Device ID, MAC address, hostname or name
        device: String,

        #[command(flatten)]
        rates: RateArgs,
    },

    /// Print the root shell commands behind each action for a client
    Commands {
        /// Device ID, MAC address, hostname or name
        device: String,
    },
}

#[derive(Debug, Args)]
pub struct RateArgs {
    /// Download cap in Mbps
    #[arg(long, value_name = "MBPS")]
    pub down: f64,

    /// Upload cap in Mbps
    #[arg(long, value_name = "MBPS")]
    pub up: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeviceStatusArg {
    Connected,
    Limited,
    Blocked,
}

// ── Vouchers ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VouchersArgs {
    #[command(subcommand)]
    pub command: VouchersCommand,
}

#[derive(Debug, Subcommand)]
pub enum VouchersCommand {
    /// List vouchers
    #[command(alias = "ls")]
    List {
        /// Only show vouchers in this state
        #[arg(long, short = 's')]
        status: Option<VoucherStatusArg>,
    },

    /// Show one voucher
    Get {
        /// Voucher ID or code
        voucher: String,
    },

    /// Create vouchers
    Create {
        /// Start from a predefined plan; explicit flags override it
        #[arg(long, short = 'p')]
        preset: Option<PresetArg>,

        /// Validity in hours
        #[arg(long, value_name = "HOURS")]
        hours: Option<u32>,

        /// Data allowance in MB
        #[arg(long, value_name = "MB")]
        data_mb: Option<u64>,

        /// Devices allowed to redeem the voucher
        #[arg(long, value_name = "N")]
        max_devices: Option<u32>,

        /// Free-text note
        #[arg(long)]
        note: Option<String>,

        /// Number of vouchers to create
        #[arg(long, short = 'n', default_value = "1")]
        count: u32,
    },

    /// Revoke a voucher
    Revoke {
        /// Voucher ID or code
        voucher: String,
    },

    /// Delete a voucher
    #[command(alias = "rm")]
    Delete {
        /// Voucher ID or code
        voucher: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VoucherStatusArg {
    Unused,
    Active,
    Expired,
    Revoked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    /// 1 hour, 100 MB, 1 device
    Trial,
    /// 4 hours, 512 MB, 1 device
    Basic,
    /// 24 hours, 2 GB, 2 devices
    Standard,
    /// 48 hours, 5 GB, 3 devices
    Premium,
    /// 72 hours, 10 GB, 5 devices
    Bulk,
}

// ── Hotspot ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct HotspotArgs {
    #[command(subcommand)]
    pub command: HotspotCommand,
}

#[derive(Debug, Subcommand)]
pub enum HotspotCommand {
    /// Show access-point settings
    Status,

    /// Turn the hotspot on
    On,

    /// Turn the hotspot off
    Off,

    /// Flip the power state
    Toggle,

    /// Change access-point settings
    Set {
        /// Network name (1-32 characters)
        #[arg(long)]
        ssid: Option<String>,

        /// Passphrase (8-63 characters)
        #[arg(long)]
        password: Option<String>,

        /// Radio band
        #[arg(long)]
        band: Option<BandArg>,

        /// Maximum simultaneous clients (1-255)
        #[arg(long, value_name = "N")]
        max_clients: Option<u32>,

        /// Security mode
        #[arg(long)]
        security: Option<SecurityArg>,

        /// Whether root access is available
        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        rooted: Option<bool>,

        /// Gateway IPv4 address
        #[arg(long, value_name = "IP")]
        gateway: Option<std::net::Ipv4Addr>,
    },

    /// Print the root shell commands for hotspot-wide actions
    Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BandArg {
    #[value(name = "2.4ghz", alias = "2.4")]
    Ghz2_4,
    #[value(name = "5ghz", alias = "5")]
    Ghz5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SecurityArg {
    Wpa2,
    Wpa3,
    Open,
}

// ── Stats ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Include the hourly usage chart
    #[arg(long)]
    pub history: bool,
}

// ── UI settings ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UiArgs {
    #[command(subcommand)]
    pub command: UiCommand,
}

#[derive(Debug, Subcommand)]
pub enum UiCommand {
    /// Show appearance settings and derived render values
    Show,

    /// Change appearance settings
    Set {
        #[arg(long)]
        theme: Option<ThemeArg>,

        #[arg(long)]
        animation_speed: Option<AnimationSpeedArg>,

        #[arg(long)]
        corner_style: Option<CornerStyleArg>,

        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        show_animations: Option<bool>,

        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        haptics: Option<bool>,

        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        reduce_motion: Option<bool>,
    },

    /// Restore default appearance settings
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Default,
    Ocean,
    Forest,
    Sunset,
    Purple,
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnimationSpeedArg {
    Slow,
    Normal,
    Fast,
    Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CornerStyleArg {
    None,
    Small,
    Medium,
    Large,
    Full,
}

// ── Export / Import ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Read from this file instead of stdin
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a configuration value
    Set {
        /// Config key (e.g. "storage.policy", "vouchers.code_length")
        key: String,

        /// Value to set
        value: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
