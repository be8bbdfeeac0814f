//! A hot-seat poker table in the terminal.

use anyhow::{Context, Result};
use pico_args::Arguments;

use hotseat_tui::{config::ClientConfig, logging, tui_app::TuiApp};

const HELP: &str = "\
Play Texas Hold'em with friends sharing one terminal

USAGE:
  hotseat_tui

FLAGS:
  -h, --help            Print help information

COMMANDS (typed at the action prompt):
  C                     Check, or call the bet to match
  F                     Fold, forfeiting your hand
  B<amount>             Bet, raising the bet to match by AMOUNT
  R<amount>             Raise, same as B
  exit                  Quit, from any prompt

ENVIRONMENT:
  HOTSEAT_REVEAL_DELAY_MS   Delay between board cards  [default: 1000]
  HOTSEAT_SEED              Seed for a reproducible deck
  HOTSEAT_LOG_FILE          Write logs to this file (filtered by RUST_LOG)
";

#[tokio::main]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {remaining:?}. Try --help");
    }

    let config = ClientConfig::from_env().context("Failed to load configuration")?;
    if let Some(path) = &config.log_file {
        logging::init(path).context("Failed to initialize logging")?;
    }

    let terminal = ratatui::try_init().context("Failed to initialize terminal")?;
    let result = TuiApp::new(&config).run(terminal).await;
    ratatui::restore();

    result
}
