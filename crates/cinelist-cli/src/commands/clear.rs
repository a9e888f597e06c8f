use crate::context::AppContext;
use crate::output::Output;
use cinelist_core::DurableStorage;
use color_eyre::Result;
use std::fs;

pub fn run_clear(ctx: &AppContext, all: bool, watchlist: bool, credentials: bool, output: &Output) -> Result<()> {
    if all {
        clear_watchlist(ctx, output)?;
        clear_credentials(ctx, output)?;
        output.success("Watchlist and credentials cleared");
        return Ok(());
    }

    let mut cleared_anything = false;

    if watchlist {
        clear_watchlist(ctx, output)?;
        cleared_anything = true;
    }

    if credentials {
        clear_credentials(ctx, output)?;
        cleared_anything = true;
    }

    if !cleared_anything {
        output.warn("No clear option specified. Use --watchlist, --credentials, or --all");
        output.println("\nExample: cinelist clear --watchlist");
    }

    Ok(())
}

fn clear_watchlist(ctx: &AppContext, output: &Output) -> Result<()> {
    let key = &ctx.config.storage.watchlist_key;
    let mut storage = ctx.storage();
    let path = storage.path_for(key);

    if !path.exists() {
        output.info("No saved watchlist found to clear");
        return Ok(());
    }

    storage
        .remove(key)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to clear watchlist: {}", e))?;
    output.success(format!("Cleared watchlist: {}", path.display()));
    Ok(())
}

fn clear_credentials(ctx: &AppContext, output: &Output) -> Result<()> {
    let credentials_file = ctx.paths.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            color_eyre::eyre::eyre!(
                "Failed to remove credentials file at {}: {}",
                credentials_file.display(),
                e
            )
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }

    Ok(())
}
