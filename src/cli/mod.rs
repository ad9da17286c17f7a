use std::path::PathBuf;

use clap::Parser;

/// Terminal shell for a Telegram-style chat client.
#[derive(Parser)]
#[command(name = "egram", version, about)]
pub struct Cli {
    /// Path to an alternate config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seconds between scripted backend transitions
    #[arg(long, default_value_t = 2)]
    pub demo_interval: u64,
}
