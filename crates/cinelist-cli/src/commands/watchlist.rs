use super::{render, report_persistence};
use crate::context::AppContext;
use crate::output::Output;
use cinelist_core::{genre_options, GenreFilter, WatchlistQuery, WatchlistSummary};
use cinelist_models::MovieId;
use cinelist_sources::{FetchKind, MetadataSource};
use clap::{Subcommand, ValueEnum};
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Lowest rating first
    Asc,
    /// Highest rating first
    Desc,
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// Show the watchlist, optionally filtered by genre and title
    Show {
        /// Genre name to filter by ("All Genres" shows everything)
        #[arg(long)]
        genre: Option<String>,

        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a movie by id (details are fetched from TMDB)
    Add { id: String },
    /// Remove every entry with this id
    Remove { id: String },
    /// Reorder the watchlist by rating
    Sort {
        #[arg(value_enum)]
        order: SortOrder,
    },
    /// List the genres present in the watchlist
    Genres,
}

pub async fn run_watchlist(ctx: &AppContext, cmd: Option<WatchlistCommands>, output: &Output) -> Result<ExitCode> {
    match cmd.unwrap_or(WatchlistCommands::Show { genre: None, search: None }) {
        WatchlistCommands::Show { genre, search } => {
            show(ctx, GenreFilter::from(genre.as_deref()), search.unwrap_or_default(), output);
            Ok(ExitCode::SUCCESS)
        }
        WatchlistCommands::Add { id } => add(ctx, &id, output).await,
        WatchlistCommands::Remove { id } => {
            remove(ctx, &id, output);
            Ok(ExitCode::SUCCESS)
        }
        WatchlistCommands::Sort { order } => {
            sort(ctx, order, output);
            Ok(ExitCode::SUCCESS)
        }
        WatchlistCommands::Genres => {
            let store = ctx.open_watchlist();
            let options = genre_options(store.movies(), &ctx.genres);
            if output.is_human() {
                for option in &options {
                    output.println(option);
                }
            } else {
                output.json(&json!({ "type": "genres", "genres": options }));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

pub fn show(ctx: &AppContext, genre: GenreFilter, search: String, output: &Output) {
    let store = ctx.open_watchlist();
    let movies = store.movies();

    if movies.is_empty() {
        if output.is_human() {
            output.println(format!("\n{}", "🍿 Your Watchlist is Empty".bold()));
            output.println("Start adding movies to your watchlist to keep track of what you want to watch!");
            output.println(format!(
                "{} Tip: run 'cinelist browse' or 'cinelist movie <id> --add' to save a movie",
                "💡".yellow()
            ));
        } else {
            output.json(&json!({ "type": "watchlist", "movies": [], "summary": WatchlistSummary::of(movies, &ctx.genres) }));
        }
        return;
    }

    let options = genre_options(movies, &ctx.genres);
    let query = WatchlistQuery::new(genre, search);
    let rows = query.apply(movies, &ctx.genres);
    let summary = WatchlistSummary::of(movies, &ctx.genres);

    if !output.is_human() {
        let rows: Vec<_> = rows
            .iter()
            .map(|m| render::movie_json(m, &ctx.genres, ctx.image_base()))
            .collect();
        output.json(&json!({
            "type": "watchlist",
            "genre": query.genre.label(),
            "search": query.search,
            "genres": options,
            "movies": rows,
            "summary": summary,
        }));
        return;
    }

    output.println(format!("\n{}", "My Watchlist".bright_magenta().bold()));
    let genre_line: Vec<String> = options
        .iter()
        .map(|g| {
            if g == query.genre.label() {
                format!("[{}]", g).bright_magenta().bold().to_string()
            } else {
                g.clone()
            }
        })
        .collect();
    output.println(format!("Genres: {}", genre_line.join("  ")));

    if rows.is_empty() {
        output.info("No movies match the current filter");
    } else {
        output.table(&render::watchlist_table(&rows, &ctx.genres));
    }
    output.table(&render::summary_table(&summary));
}

async fn add(ctx: &AppContext, id: &str, output: &Output) -> Result<ExitCode> {
    let mut store = ctx.open_watchlist();
    if store.contains_id(&MovieId::from(id)) {
        output.info(format!("Movie {} is already in your watchlist", id));
        return Ok(ExitCode::SUCCESS);
    }

    let Ok(numeric_id) = id.trim().parse::<u64>() else {
        output.info("Movie not found");
        return Ok(ExitCode::SUCCESS);
    };

    let client = ctx.metadata_client();
    let spinner = output.spinner("Loading...");
    let result = client.movie(numeric_id).await;
    spinner.finish_and_clear();

    let details = match result {
        Ok(Some(details)) => details,
        Ok(None) => {
            output.info("Movie not found");
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            tracing::warn!("Loading movie {} failed: {}", numeric_id, e);
            output.error(e.user_message(FetchKind::Details));
            return Ok(ExitCode::FAILURE);
        }
    };

    let record = details.to_record();
    let title = record.display_title().to_string();
    let persistence = store.add(record);
    report_persistence(&persistence, output);
    output.success(format!("Added {} to your watchlist", title));
    Ok(ExitCode::SUCCESS)
}

fn remove(ctx: &AppContext, id: &str, output: &Output) {
    let mut store = ctx.open_watchlist();
    let id = MovieId::from(id);
    if !store.contains_id(&id) {
        output.info(format!("Movie {} is not in your watchlist", id));
        return;
    }

    let before = store.len();
    let persistence = store.remove_id(&id);
    report_persistence(&persistence, output);
    let removed = before - store.len();
    let noun = if removed == 1 { "entry" } else { "entries" };
    output.success(format!("Removed {} {} for movie {}", removed, noun, id));
}

fn sort(ctx: &AppContext, order: SortOrder, output: &Output) {
    let mut store = ctx.open_watchlist();
    let persistence = match order {
        SortOrder::Asc => store.sort_ascending(),
        SortOrder::Desc => store.sort_descending(),
    };
    report_persistence(&persistence, output);
    output.success(match order {
        SortOrder::Asc => "Watchlist sorted by rating, lowest first",
        SortOrder::Desc => "Watchlist sorted by rating, highest first",
    });
}
