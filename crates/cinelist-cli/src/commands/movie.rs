use super::render;
use crate::context::AppContext;
use crate::output::Output;
use cinelist_models::MovieOverview;
use cinelist_sources::FetchKind;
use cinelist_sources::MetadataSource;
use color_eyre::Result;
use serde_json::json;
use std::process::ExitCode;

/// Result of loading the detail view for one id
pub enum DetailView {
    Found(MovieOverview),
    NotFound,
    Failed,
}

/// Fetch details, credits and videos for `id`. Failures are reported to the user here.
pub async fn load_overview(ctx: &AppContext, id: &str, output: &Output) -> DetailView {
    // Non-numeric ids cannot exist on the service
    let Ok(numeric_id) = id.trim().parse::<u64>() else {
        return DetailView::NotFound;
    };

    let client = ctx.metadata_client();
    let spinner = output.spinner("Loading...");
    let result = client.overview(numeric_id, ctx.config.display.cast_limit).await;
    spinner.finish_and_clear();

    match result {
        Ok(Some(overview)) => DetailView::Found(overview),
        Ok(None) => DetailView::NotFound,
        Err(e) => {
            tracing::warn!("Loading movie {} failed: {}", numeric_id, e);
            output.error(e.user_message(FetchKind::Details));
            DetailView::Failed
        }
    }
}

pub fn show_overview(overview: &MovieOverview, ctx: &AppContext, output: &Output) {
    output.table(&render::overview_table(overview));
    if !output.is_human() {
        let record = overview.details.to_record();
        output.json(&json!({
            "type": "movie",
            "movie": overview,
            "poster_url": record.poster_url(ctx.image_base(), "original"),
        }));
    }
}

pub async fn run_movie(ctx: &AppContext, id: &str, add: bool, output: &Output) -> Result<ExitCode> {
    let overview = match load_overview(ctx, id, output).await {
        DetailView::Found(overview) => overview,
        DetailView::NotFound => {
            output.info("Movie not found");
            return Ok(ExitCode::SUCCESS);
        }
        DetailView::Failed => return Ok(ExitCode::FAILURE),
    };

    show_overview(&overview, ctx, output);

    if add {
        let mut store = ctx.open_watchlist();
        let record = overview.details.to_record();
        if store.contains(&record) {
            output.info(format!("{} is already in your watchlist", record.display_title()));
        } else {
            let title = record.display_title().to_string();
            let persistence = store.add(record);
            super::report_persistence(&persistence, output);
            output.success(format!("Added {} to your watchlist", title));
        }
    }

    Ok(ExitCode::SUCCESS)
}
