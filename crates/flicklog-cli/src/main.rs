use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use watch_state_models::MediaKind;

mod commands;
mod logging;
mod output;

use commands::{clear, config, history, login, recommend, saved, watch};

#[derive(Parser)]
#[command(name = "flicklog")]
#[command(about = "Flicklog - watch history, saved titles, and recommendations from the terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (daily rotation) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the account service
    #[command(long_about = "Sign in with email and password. The session is stored in the credentials file so saved-list commands work across invocations.")]
    Login {
        /// Account email (if not provided, will prompt)
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign out and forget the stored session
    #[command(long_about = "Drop the stored session. The remote saved list is left untouched.")]
    Logout,

    /// Log a title as watched
    #[command(long_about = "Fetch the title from the catalog and record it at the front of the local watch history. Re-watching moves a title to the front instead of duplicating it.")]
    Watch {
        /// Catalog id of the title
        id: u64,

        /// Media kind: movie or tv
        #[arg(long, default_value = "movie")]
        kind: MediaKind,

        /// Playback progress percent (0-100)
        #[arg(long)]
        progress: Option<u8>,
    },

    /// Inspect or edit the local watch history
    History {
        #[command(subcommand)]
        cmd: Option<HistoryCommands>,
    },

    /// Manage the saved-for-later list (requires sign-in)
    Saved {
        #[command(subcommand)]
        cmd: SavedCommands,
    },

    /// Recommendations based on recently watched titles
    #[command(long_about = "Fan similar-title lookups out over the most recent history entries, merged and de-duplicated, excluding everything already watched.")]
    Recommend,

    /// View or edit configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },

    /// Clear local state
    Clear {
        /// Clear watch history and stored credentials
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear the local watch history
        #[arg(long, action = ArgAction::SetTrue)]
        history: bool,

        /// Clear stored credentials
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "all")]
        credentials: bool,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List history, most recent first (default)
    List,
    /// Remove one title from history
    Remove {
        /// Catalog id of the title
        id: u64,
    },
    /// Empty the history log
    Clear,
}

#[derive(Subcommand)]
enum SavedCommands {
    /// List saved titles
    List,
    /// Save a title for later
    Add {
        /// Catalog id of the title
        id: u64,

        /// Media kind: movie or tv
        #[arg(long, default_value = "movie")]
        kind: MediaKind,
    },
    /// Remove a title from the saved list
    Remove {
        /// Catalog id of the title
        id: u64,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks keys)
    Show {
        /// Show full configuration including masked values
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Set configuration values
    Set {
        /// Catalog API base URL
        #[arg(long)]
        catalog_base: Option<String>,

        /// Catalog API bearer key
        #[arg(long)]
        catalog_key: Option<String>,

        /// Account service base URL
        #[arg(long)]
        account_base: Option<String>,

        /// Account service anon key
        #[arg(long)]
        account_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Login { email } => login::run_login(email, &output).await,
        Commands::Logout => login::run_logout(&output),
        Commands::Watch { id, kind, progress } => {
            watch::run_watch(id, kind, progress, &output).await
        }
        Commands::History { cmd } => match cmd.unwrap_or(HistoryCommands::List) {
            HistoryCommands::List => history::run_list(&output),
            HistoryCommands::Remove { id } => history::run_remove(id, &output),
            HistoryCommands::Clear => history::run_clear(&output),
        },
        Commands::Saved { cmd } => match cmd {
            SavedCommands::List => saved::run_list(&output).await,
            SavedCommands::Add { id, kind } => saved::run_add(id, kind, &output).await,
            SavedCommands::Remove { id } => saved::run_remove(id, &output).await,
        },
        Commands::Recommend => recommend::run_recommend(&output).await,
        Commands::Config { cmd } => match cmd.unwrap_or(ConfigCommands::Show { full: false }) {
            ConfigCommands::Show { full } => config::run_show(full, &output),
            ConfigCommands::Set {
                catalog_base,
                catalog_key,
                account_base,
                account_key,
            } => config::run_set(catalog_base, catalog_key, account_base, account_key, &output),
        },
        Commands::Clear {
            all,
            history,
            credentials,
        } => clear::run_clear(all, history, credentials, &output),
    }
}
