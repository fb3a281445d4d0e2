//! Inspect or repair the daily-state document without going through the bot.
//!
//! Usage: daily-admin [--file PATH] <show | reset [--what notice|override|all] | expire>
//!   --file PATH  : Document to operate on (default: $DATA_FILE or data/daily.json)

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};

use strandstuebchen_api::{
    config::data_file_from_env,
    db::{read_state, DailyStore, FileStore},
    models::daily::ResetTarget,
    services::{
        daily::{expire_override, reset_state},
        local_now,
    },
};

#[derive(Parser)]
#[command(name = "daily-admin", about = "Inspect and reset the Strandstübchen daily state")]
struct Args {
    /// Path of the JSON document (defaults to $DATA_FILE)
    #[arg(long)]
    file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the document as pretty JSON
    Show,
    /// Put the notice and/or the hours override back to inactive
    Reset {
        #[arg(long, value_enum, default_value_t = Target::All)]
        what: Target,
    },
    /// Deactivate an hours override whose date is not today
    Expire,
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Notice,
    Override,
    All,
}

impl From<Target> for ResetTarget {
    fn from(target: Target) -> Self {
        match target {
            Target::Notice => ResetTarget::Notice,
            Target::Override => ResetTarget::Override,
            Target::All => ResetTarget::All,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let store = FileStore::new(args.file.unwrap_or_else(data_file_from_env));

    match args.command {
        Command::Show => {
            let state = read_state(&store);
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Command::Reset { what } => {
            let mut state = read_state(&store);
            reset_state(&mut state, what.into(), Utc::now());
            store.save(&state)?;
            tracing::info!("Reset written to {}", store.path().display());
        }
        Command::Expire => {
            let mut state = read_state(&store);
            if expire_override(&mut state, local_now().date_naive(), Utc::now()) {
                store.save(&state)?;
                tracing::info!("Expired override written to {}", store.path().display());
            } else {
                tracing::info!("No stale override in {}", store.path().display());
            }
        }
    }

    Ok(())
}
