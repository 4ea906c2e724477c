//! Transtip - translate text through an external CLI
//!
//! Command-line front end for the translation mode.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use transtip::config::{self, Config};
use transtip::popup::TerminalPopup;
use transtip::text::PlainTextBuffer;
use transtip::{CommandInvoker, Dispatch, TransMode, Trigger};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the translation program
    #[arg(long, global = true)]
    tool: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate TEXT as if it were the selection
    Translate {
        text: String,

        /// Skip the translation when TEXT is longer than this (drag behaviour)
        #[arg(long)]
        max_length: Option<usize>,
    },

    /// Translate the sentence around CURSOR with the word there blanked out
    Gap {
        /// Read the buffer from a file
        #[arg(long, conflicts_with = "text", required_unless_present = "text")]
        file: Option<PathBuf>,

        /// Use this text as the buffer
        #[arg(long)]
        text: Option<String>,

        /// Character offset of the cursor
        #[arg(long)]
        cursor: usize,

        /// Characters of context on each side of the word
        #[arg(long)]
        max_context: Option<usize>,
    },

    /// Translate each line read from stdin like a mouse-drag selection
    Interactive,

    /// Print the effective configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(tool) = &args.tool {
        config.tool.program = tool.clone();
    }

    init_logging(args.verbose, &config.log_level);
    debug!("Using config {}", config_path.display());

    match args.command {
        Commands::Translate { text, max_length } => {
            let trigger = match max_length {
                Some(limit) => {
                    config.max_selection_length = limit;
                    Trigger::Drag
                }
                None => Trigger::TranslateKey,
            };
            let popup = Arc::new(TerminalPopup::new());
            let mode = build_mode(&config, popup.clone());
            let editor = PlainTextBuffer::new(text).select_all();
            let dispatch = mode.handle(trigger, &editor).await?;
            settle(dispatch, &popup).await?;
        }
        Commands::Gap {
            file,
            text,
            cursor,
            max_context,
        } => {
            let buffer = match (file, text) {
                (Some(path), _) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, Some(text)) => text,
                (None, None) => anyhow::bail!("Either --file or --text is required"),
            };
            if let Some(max_context) = max_context {
                config.max_gap_context = max_context;
            }
            let popup = Arc::new(TerminalPopup::new());
            let mode = build_mode(&config, popup.clone());
            let editor = PlainTextBuffer::new(buffer).with_cursor(cursor);
            let dispatch = mode.handle(Trigger::GappedKey, &editor).await?;
            settle(dispatch, &popup).await?;
        }
        Commands::Interactive => run_interactive(&config).await?,
        Commands::Config { write } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if write {
                config.save_to(&config_path)?;
                info!("💾 Wrote {}", config_path.display());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, log_level: &str) {
    let default_level = if verbose {
        "debug".to_string()
    } else {
        log_level.to_lowercase()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_mode(config: &Config, popup: Arc<TerminalPopup>) -> TransMode {
    TransMode::new(config, Arc::new(CommandInvoker::new()), popup)
}

/// Wait for a dispatched translation (Ctrl-C cancels it) and print the popup
async fn settle(dispatch: Dispatch, popup: &TerminalPopup) -> Result<()> {
    let handle = match dispatch {
        Dispatch::Started(handle) => handle,
        Dispatch::Skipped(reason) => {
            info!("⏭️ Nothing to translate ({:?})", reason);
            return Ok(());
        }
    };

    let cancel = handle.cancel_handle();
    let join = handle.join();
    tokio::pin!(join);

    let rendered = tokio::select! {
        rendered = &mut join => rendered?,
        _ = tokio::signal::ctrl_c() => {
            warn!("🛑 Interrupted, stopping translation");
            cancel.cancel();
            join.await?
        }
    };

    match popup.current() {
        Some(text) => println!("{}", text),
        None if rendered.is_none() => warn!("⚠️ Translation tool produced no output"),
        None => {}
    }
    Ok(())
}

async fn run_interactive(config: &Config) -> Result<()> {
    let popup = Arc::new(TerminalPopup::new());
    let mode = build_mode(config, popup.clone());
    info!("✅ Reading selections from stdin (one per line)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let editor = PlainTextBuffer::new(line).select_all();
        match mode.handle(Trigger::Drag, &editor).await {
            Ok(dispatch) => settle(dispatch, &popup).await?,
            Err(e) => warn!("❌ {}", e),
        }
    }
    Ok(())
}
