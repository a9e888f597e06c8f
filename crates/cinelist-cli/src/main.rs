use clap::{ArgAction, Parser, Subcommand};
use commands::watchlist::WatchlistCommands;
use commands::{browse, clear, config, movie, open, popular, watchlist};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod context;
mod logging;
mod output;
mod routes;

#[derive(Parser)]
#[command(name = "cinelist")]
#[command(about = "Cinelist - Discover popular movies and keep a watchlist")]
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

    /// Also write logs to this file (rotated daily)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List popular movies (the home view)
    Popular {
        /// Page to show, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Page through popular movies interactively and edit the watchlist
    Browse {
        /// Page to start on
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show details, cast and trailer for one movie
    Movie {
        /// TMDB movie id
        id: String,

        /// Also add the movie to the watchlist
        #[arg(long, action = ArgAction::SetTrue)]
        add: bool,
    },
    /// Show or edit the watchlist
    #[command(long_about = "Manage the local watchlist. Without a subcommand the full watchlist is shown.")]
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },
    /// Open a view by path: '/', '/watchlist' or '/movie/<id>'
    Open { path: String },
    /// Manage configuration and the TMDB API key
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear the saved watchlist or stored credentials
    #[command(long_about = "Remove local data. Use --watchlist to drop the saved watchlist, --credentials to delete the stored API key, or --all for both.")]
    Clear {
        /// Clear watchlist and credentials
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["watchlist", "credentials"])]
        all: bool,

        /// Clear the saved watchlist
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,

        /// Clear stored credentials
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Store the TMDB API key in the credentials file
    #[command(long_about = "Save a TMDB API key to credentials.toml. The TMDB_API_KEY environment variable and the config file take precedence over it.")]
    ApiKey {
        /// API key (if not provided, will prompt)
        key: Option<String>,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing file without asking
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let mut ctx = context::AppContext::load().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    match cli.command {
        Commands::Popular { page } => popular::run_popular(&ctx, page, &output).await,
        Commands::Browse { page } => browse::run_browse(&ctx, page, &output).await,
        Commands::Movie { id, add } => movie::run_movie(&ctx, &id, add, &output).await,
        Commands::Watchlist { cmd } => watchlist::run_watchlist(&ctx, cmd, &output).await,
        Commands::Open { path } => open::run_open(&ctx, &path, &output).await,
        Commands::Config { cmd } => {
            config::run_config(&mut ctx, cmd, &output)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Clear { all, watchlist, credentials } => {
            clear::run_clear(&ctx, all, watchlist, credentials, &output)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
