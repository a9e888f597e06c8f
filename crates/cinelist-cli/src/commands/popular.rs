use super::render;
use crate::context::AppContext;
use crate::output::Output;
use cinelist_core::{DurableStorage, PageCursor, WatchlistStore};
use cinelist_models::PopularPage;
use cinelist_sources::{FetchKind, MetadataSource};
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use std::process::ExitCode;

/// Fetch one listing page. Failures are reported to the user here.
pub async fn load_page(ctx: &AppContext, cursor: PageCursor, output: &Output) -> Option<PopularPage> {
    let client = ctx.metadata_client();
    let spinner = output.spinner("Loading movies...");
    let result = client.popular(cursor.page()).await;
    spinner.finish_and_clear();

    match result {
        Ok(page) => Some(page),
        Err(e) => {
            tracing::warn!("Loading popular page {} failed: {}", cursor.page(), e);
            output.error(e.user_message(FetchKind::Listing));
            None
        }
    }
}

pub fn show_page<S: DurableStorage>(page: &PopularPage, store: &WatchlistStore<S>, ctx: &AppContext, output: &Output) {
    if output.is_human() {
        output.println(format!("\n{}", "Trending Movies".bright_cyan().bold()));
        output.table(&render::popular_table(&page.results, &ctx.genres, |m| store.contains(m)));
        output.println(format!(
            "Page {} of {}",
            page.page,
            page.total_pages.max(page.page)
        ));
        return;
    }

    let results: Vec<_> = page
        .results
        .iter()
        .map(|m| {
            let mut row = render::movie_json(m, &ctx.genres, ctx.image_base());
            row["in_watchlist"] = json!(store.contains(m));
            row
        })
        .collect();
    output.json(&json!({
        "type": "popular",
        "page": page.page,
        "total_pages": page.total_pages,
        "results": results,
    }));
}

pub async fn run_popular(ctx: &AppContext, page: u32, output: &Output) -> Result<ExitCode> {
    let cursor = PageCursor::at(page);
    let Some(listing) = load_page(ctx, cursor, output).await else {
        return Ok(ExitCode::FAILURE);
    };

    let store = ctx.open_watchlist();
    show_page(&listing, &store, ctx, output);
    Ok(ExitCode::SUCCESS)
}
