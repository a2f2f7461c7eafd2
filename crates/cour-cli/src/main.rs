use anyhow::Result;
use clap::Parser;
use cour_core::Quarter;
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "cour", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the database (default: ~/.local/share/cour/cour.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Show the broadcast quarter containing an instant
    ///
    /// Broadcast days start at 04:00 Asia/Tokyo, so a show airing at 01:30
    /// on April 1 still belongs to the winter quarter.
    ///
    /// Without an argument the current time is used.
    At {
        /// RFC 3339 instant, e.g. 2023-01-01T01:30:00+09:00
        instant: Option<String>,
    },
    /// Show the quarter after the given one
    Next {
        /// Quarter symbol, e.g. 2023winter
        quarter: Quarter,
    },
    /// Show the quarter before the given one
    Prev {
        /// Quarter symbol, e.g. 2023winter
        quarter: Quarter,
    },
    /// List every quarter from FROM to TO inclusive, oldest first
    Range {
        from: Quarter,
        to: Quarter,
        /// Print as a JSON array of symbols
        #[arg(long)]
        json: bool,
    },
    /// Show the inclusive start and exclusive end of a quarter
    Span {
        /// Quarter symbol, e.g. 2023winter
        quarter: Quarter,
    },
    /// List the quarters covered by the catalog, newest first
    ///
    /// Runs from the quarter of the oldest registered episode up to the
    /// current quarter. These are the options a quarter selector offers.
    Cours {
        /// Print as JSON objects with symbol and label
        #[arg(long)]
        json: bool,
    },
    /// Manage works
    Work {
        #[command(subcommand)]
        action: WorkAction,
    },
    /// Manage episodes
    Episode {
        #[command(subcommand)]
        action: EpisodeAction,
    },
    /// Record that an episode was watched
    Watch {
        /// Episode id
        episode_id: String,
        /// Rating from 1 to 5
        #[arg(long)]
        rating: Option<u8>,
        /// Free-form comment
        #[arg(long)]
        comment: Option<String>,
        /// When it was watched (RFC 3339, default: now)
        #[arg(long)]
        at: Option<String>,
    },
    /// Show watch duty against achievement for a quarter
    ///
    /// Duty is every episode of a subscribed work that aired within the
    /// quarter; achievement is how many of those have been watched.
    Stats {
        /// Quarter symbol (default: current quarter)
        #[arg(long)]
        cour: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum WorkAction {
    /// Register a new work
    Add {
        title: String,
        /// Official site URL
        #[arg(long)]
        url: Option<String>,
        /// Subscribe immediately
        #[arg(long)]
        subscribe: bool,
    },
    /// List works, optionally only those airing in a quarter
    List {
        /// Quarter symbol, e.g. 2023winter. Malformed values are ignored.
        #[arg(long)]
        cour: Option<String>,
    },
    /// Subscribe to a work
    Subscribe { id: String },
    /// Unsubscribe from a work
    Unsubscribe { id: String },
}

#[derive(Debug, clap::Subcommand)]
enum EpisodeAction {
    /// Register an episode air date
    Add {
        work_id: String,
        number: u32,
        /// RFC 3339 air time, e.g. 2023-01-07T23:30:00+09:00
        aired_at: String,
        #[arg(long)]
        title: Option<String>,
    },
    /// List the episodes of a work
    List { work_id: String },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print a config value, or the whole file without a key
    Get { key: Option<String> },
    /// Set a config value in the config file
    Set { key: String, value: String },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.db {
        Some(db) => Config::load_with_db_path(db)?,
        None => Config::load()?,
    };
    logging::init(&config.logging)?;

    match cli.command {
        Commands::At { instant } => commands::quarter::show_at(instant.as_deref())?,
        Commands::Next { quarter } => commands::quarter::show_quarter(quarter.next()),
        Commands::Prev { quarter } => commands::quarter::show_quarter(quarter.previous()),
        Commands::Range { from, to, json } => commands::quarter::show_range(from, to, json)?,
        Commands::Span { quarter } => commands::quarter::show_span(quarter)?,
        Commands::Cours { json } => commands::stats::list_cours(&open_db(&config)?, json)?,
        Commands::Work { action } => {
            let db = open_db(&config)?;
            match action {
                WorkAction::Add {
                    title,
                    url,
                    subscribe,
                } => commands::catalog::add_work(&db, title, url, subscribe)?,
                WorkAction::List { cour } => commands::catalog::list_works(&db, cour.as_deref())?,
                WorkAction::Subscribe { id } => commands::catalog::subscribe(&db, &id, true)?,
                WorkAction::Unsubscribe { id } => commands::catalog::subscribe(&db, &id, false)?,
            }
        }
        Commands::Episode { action } => {
            let db = open_db(&config)?;
            match action {
                EpisodeAction::Add {
                    work_id,
                    number,
                    aired_at,
                    title,
                } => commands::catalog::add_episode(&db, &work_id, number, &aired_at, title)?,
                EpisodeAction::List { work_id } => commands::catalog::list_episodes(&db, &work_id)?,
            }
        }
        Commands::Watch {
            episode_id,
            rating,
            comment,
            at,
        } => commands::catalog::record_watch(
            &open_db(&config)?,
            &episode_id,
            rating,
            comment,
            at.as_deref(),
        )?,
        Commands::Stats { cour } => commands::stats::show_stats(&open_db(&config)?, cour.as_deref())?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Get { key } => commands::config::get_config(&config, key)?,
            ConfigAction::Set { key, value } => commands::config::set_config(&key, &value)?,
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}

fn open_db(config: &Config) -> Result<cour_core::schema::Database> {
    // Ensure database directory exists
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db = cour_core::schema::Database::open(&config.database_path)?;
    log::debug!("Opened database {}", config.database_path.display());
    Ok(db)
}
