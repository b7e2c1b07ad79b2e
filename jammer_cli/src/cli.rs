//! CLI argument definitions and shared statics.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use jammer_core::Tier;
use jammer_share::Channel;
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "jammer", version, about = "Jammer configurator and quote CLI")]
pub struct Cli {
    /// Price table TOML; the built-in catalog is used when omitted
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Print results and logs as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG wins when set
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Also write JSON logs to this file
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the selectable bands
    Bands,
    /// Validate the catalog and list its options
    Catalog,
    /// Price a configuration with breakdown, runtime and coverage
    Quote {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Print the order summary text
    Summary {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Copy the summary and print a messenger link to send it
    Order {
        /// Messenger to send the order through
        #[arg(long, value_enum)]
        channel: ChannelArg,
        /// Username or link (telegram), phone number (signal, whatsapp);
        /// overrides the configured recipient for the channel
        #[arg(long, value_name = "DEST")]
        to: Option<String>,
        #[command(flatten)]
        recipients: Recipients,
        /// Write the summary to this file as the clipboard
        #[arg(long = "copy-to", value_name = "FILE")]
        copy_to: Option<PathBuf>,
        #[command(flatten)]
        selection: SelectionArgs,
    },
}

/// Configuration choices shared by the pricing commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Band and tier, e.g. `400-500=50w` or `2400=100w`; repeatable
    #[arg(long = "band", value_name = "ID=TIER", value_parser = parse_band_pick)]
    pub bands: Vec<BandPick>,
    /// Case key (see `jammer catalog`)
    #[arg(long = "case", value_name = "KEY")]
    pub case: Option<String>,
    /// Battery key (see `jammer catalog`)
    #[arg(long, value_name = "KEY")]
    pub battery: Option<String>,
    /// Add the 220 V charger
    #[arg(long = "charger-220", action = ArgAction::SetTrue)]
    pub charger_220: bool,
    /// Add the 12/24 V charger
    #[arg(long = "charger-12-24", action = ArgAction::SetTrue)]
    pub charger_12_24: bool,
    /// Number of magnetic feet; out-of-range values are clamped
    #[arg(long = "magnetic-feet", value_name = "N", allow_negative_numbers = true)]
    pub magnetic_feet: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandPick {
    pub band: String,
    pub tier: Tier,
}

pub fn parse_band_pick(s: &str) -> Result<BandPick, String> {
    let (band, tier) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=TIER, got '{s}'"))?;
    let band = band.trim();
    if band.is_empty() {
        return Err(format!("missing band id in '{s}'"));
    }
    let tier = tier.parse::<Tier>().map_err(|e| e.to_string())?;
    Ok(BandPick {
        band: band.to_string(),
        tier,
    })
}

pub const TG_USERNAME_ENV: &str = "JAMMER_TG_USERNAME";
pub const SIGNAL_PHONE_ENV: &str = "JAMMER_SIGNAL_PHONE";
pub const WA_PHONE_ENV: &str = "JAMMER_WA_PHONE";
/// Placeholder WhatsApp number used when nothing is configured.
pub const DEFAULT_WA_PHONE: &str = "380000000000";

/// Per-channel order recipients, usually set once per deployment through
/// the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct Recipients {
    /// Telegram username or link
    #[arg(long, value_name = "USER", env = TG_USERNAME_ENV)]
    pub tg_username: Option<String>,
    /// Signal phone number
    #[arg(long, value_name = "PHONE", env = SIGNAL_PHONE_ENV)]
    pub signal_phone: Option<String>,
    /// WhatsApp phone number
    #[arg(long, value_name = "PHONE", env = WA_PHONE_ENV, default_value = DEFAULT_WA_PHONE)]
    pub wa_phone: Option<String>,
}

impl Recipients {
    pub fn for_channel(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Telegram => self.tg_username.as_deref(),
            Channel::Signal => self.signal_phone.as_deref(),
            Channel::WhatsApp => self.wa_phone.as_deref(),
        }
    }
}

/// Environment variable that configures the recipient of `channel`.
pub fn recipient_env(channel: Channel) -> &'static str {
    match channel {
        Channel::Telegram => TG_USERNAME_ENV,
        Channel::Signal => SIGNAL_PHONE_ENV,
        Channel::WhatsApp => WA_PHONE_ENV,
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ChannelArg {
    Telegram,
    Signal,
    Whatsapp,
}

impl From<ChannelArg> for Channel {
    fn from(c: ChannelArg) -> Self {
        match c {
            ChannelArg::Telegram => Channel::Telegram,
            ChannelArg::Signal => Channel::Signal,
            ChannelArg::Whatsapp => Channel::WhatsApp,
        }
    }
}
