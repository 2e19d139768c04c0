//! promptloom CLI: the main entry point.
//!
//! Every command reads and writes plain JSON files, so the CLI can stand in
//! for the host application:
//! - `init`    : Write the default config file
//! - `compose` : Render an item, optionally with values applied
//! - `tokens`  : List an item's placeholder tokens
//! - `check`   : Run the finalize guardrail
//! - `merge`   : Merge a remote snapshot into a catalog
//! - `score`   : Grade an answer set
//! - `brief`   : Synthesize a structured brief
//! - `record`  : Record an item-to-item transition
//! - `open`    : Consume an item: track the transition and suggest the next
//! - `suggest` : Recommend what to open next

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "promptloom",
    about = "promptloom — prompt composition, catalog merge and recommendations",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Selects one catalog item.
#[derive(Args, Debug)]
pub struct ItemArgs {
    /// Catalog JSON file
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Item title (case-insensitive)
    #[arg(short, long)]
    pub title: String,

    /// Item group, when the title alone is ambiguous
    #[arg(short, long)]
    pub group: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default config file
    Init,

    /// Print an item's composed prompt
    Compose {
        #[command(flatten)]
        item: ItemArgs,

        /// Field values JSON file (name → value)
        #[arg(long)]
        values: Option<PathBuf>,
    },

    /// List an item's placeholder tokens
    Tokens {
        #[command(flatten)]
        item: ItemArgs,
    },

    /// Report unfilled placeholders and whether finalize would be interrupted
    Check {
        #[command(flatten)]
        item: ItemArgs,

        /// Field values JSON file (name → value)
        #[arg(long)]
        values: PathBuf,
    },

    /// Merge a remote snapshot into a catalog
    Merge {
        /// Local catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Remote snapshot JSON file
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Write the merged catalog here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Version merged last time; an identical snapshot version is skipped
        #[arg(long)]
        since: Option<String>,
    },

    /// Grade an answer set
    Score {
        /// Answers JSON file (question key → answer)
        #[arg(short, long)]
        answers: PathBuf,

        /// Comma-separated question keys the wizard asked
        #[arg(long, value_delimiter = ',')]
        expected: Vec<String>,

        /// Previous score, to report newly reached tiers
        #[arg(long)]
        previous: Option<u32>,
    },

    /// Synthesize a structured brief from an answer set
    Brief {
        /// Answers JSON file (question key → answer)
        #[arg(short, long)]
        answers: PathBuf,

        /// Challenge key, e.g. `pricing-pressure`
        #[arg(long)]
        challenge: String,

        /// Text file holding the base prompt
        #[arg(long)]
        base: Option<PathBuf>,
    },

    /// Record a transition between two items
    Record {
        /// Sequence state JSON file (created if absent)
        #[arg(short, long)]
        state: PathBuf,

        /// Source item key (`group/title`)
        #[arg(long)]
        from: String,

        /// Target item key (`group/title`)
        #[arg(long)]
        to: String,

        /// Transition time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Consume an item: record the transition from the previous one and suggest the next
    Open {
        #[command(flatten)]
        item: ItemArgs,

        /// Sequence state JSON file (created if absent)
        #[arg(short, long)]
        state: PathBuf,

        /// Recent-events JSON file (created if absent)
        #[arg(short, long)]
        recent: PathBuf,

        /// Consumption time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Recommend items to open after the given one
    Suggest {
        #[command(flatten)]
        item: ItemArgs,

        /// Sequence state JSON file
        #[arg(short, long)]
        state: PathBuf,

        /// Maximum suggestions; defaults to the configured limit
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init => commands::init::run()?,
        Commands::Compose { item, values } => commands::compose::run(&item, values.as_deref())?,
        Commands::Tokens { item } => commands::compose::tokens(&item)?,
        Commands::Check { item, values } => commands::check::run(&item, &values)?,
        Commands::Merge {
            catalog,
            snapshot,
            output,
            since,
        } => commands::merge::run(&catalog, &snapshot, output.as_deref(), since.as_deref())?,
        Commands::Score {
            answers,
            expected,
            previous,
        } => commands::insight::score(&answers, &expected, previous)?,
        Commands::Brief {
            answers,
            challenge,
            base,
        } => commands::insight::brief(&answers, &challenge, base.as_deref())?,
        Commands::Record { state, from, to, at } => {
            commands::sequence::record(&state, &from, &to, at.unwrap_or_else(Utc::now))?
        }
        Commands::Open {
            item,
            state,
            recent,
            at,
        } => commands::sequence::open(&item, &state, &recent, at.unwrap_or_else(Utc::now))?,
        Commands::Suggest { item, state, limit } => {
            commands::sequence::suggest(&item, &state, limit)?
        }
    }

    Ok(())
}
