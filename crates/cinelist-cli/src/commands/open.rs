use super::movie::run_movie;
use super::popular::run_popular;
use super::watchlist::show;
use crate::context::AppContext;
use crate::output::Output;
use crate::routes::Route;
use cinelist_core::GenreFilter;
use color_eyre::Result;
use std::process::ExitCode;

/// Render the view a path points at
pub async fn run_open(ctx: &AppContext, path: &str, output: &Output) -> Result<ExitCode> {
    let route = match path.parse::<Route>() {
        Ok(route) => route,
        Err(message) => {
            output.error(message);
            return Ok(ExitCode::FAILURE);
        }
    };
    tracing::debug!("Opening {}", route);

    match route {
        Route::Home => run_popular(ctx, 1, output).await,
        Route::Watchlist => {
            show(ctx, GenreFilter::All, String::new(), output);
            Ok(ExitCode::SUCCESS)
        }
        Route::Movie(id) => run_movie(ctx, &id, false, output).await,
    }
}
