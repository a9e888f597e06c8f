use super::prompts::{prompt_password, prompt_yes_no};
use crate::context::AppContext;
use crate::output::Output;
use crate::ConfigCommands;
use cinelist_config::{Config, PLACEHOLDER_API_KEY};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(ctx: &mut AppContext, cmd: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match cmd.unwrap_or(ConfigCommands::Show { full: false }) {
        ConfigCommands::Show { full } => show_config(ctx, full, output),
        ConfigCommands::ApiKey { key } => set_api_key(ctx, key, output),
        ConfigCommands::Init { force } => init_config(ctx, force, output),
    }
}

fn show_config(ctx: &AppContext, full: bool, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();
    let located = ctx.config.locate_api_key(&ctx.credentials);
    let key_display = match &located {
        Some((key, _)) if full => key.clone(),
        Some((key, _)) => mask_string(key),
        None => "<not set>".to_string(),
    };
    let key_source = located.as_ref().map(|(_, source)| source.describe());
    let storage_file = ctx.storage().path_for(&ctx.config.storage.watchlist_key);

    if !output.is_human() {
        output.json(&json!({
            "type": "config",
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "api_key": key_display,
            "api_key_source": key_source,
            "language": ctx.config.tmdb.language,
            "api_base_url": ctx.config.tmdb.api_base_url,
            "image_base_url": ctx.config.tmdb.image_base_url,
            "watchlist_file": storage_file.display().to_string(),
            "cast_limit": ctx.config.display.cast_limit,
        }));
        return Ok(());
    }

    output.println(format!("\n{}", "Configuration".bright_cyan().bold()));
    if !config_file.exists() {
        output.println(format!(
            "{}",
            "No config file yet, showing defaults. Run 'cinelist config init' to create one.".bright_black()
        ));
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display().to_string())]);
    let key_cell = match key_source {
        Some(source) => Cell::new(format!("{} (from {})", key_display, source)),
        None => Cell::new(key_display).fg(Color::Red),
    };
    table.add_row(vec![Cell::new("TMDB API Key"), key_cell]);
    table.add_row(vec![Cell::new("Language"), Cell::new(&ctx.config.tmdb.language)]);
    table.add_row(vec![Cell::new("API Base URL"), Cell::new(&ctx.config.tmdb.api_base_url)]);
    table.add_row(vec![Cell::new("Image Base URL"), Cell::new(&ctx.config.tmdb.image_base_url)]);
    table.add_row(vec![Cell::new("Watchlist File"), Cell::new(storage_file.display().to_string())]);
    table.add_row(vec![Cell::new("Cast Shown"), Cell::new(ctx.config.display.cast_limit)]);
    output.table(&table);

    Ok(())
}

fn set_api_key(ctx: &mut AppContext, key: Option<String>, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => {
            output.println("Get a key at https://www.themoviedb.org/settings/api");
            prompt_password("TMDB API key")?
        }
    };
    let key = key.trim().to_string();
    if let Err(msg) = validate_api_key(&key) {
        output.error(msg);
        return Ok(());
    }

    ctx.credentials.set_tmdb_api_key(key);
    ctx.credentials.save().map_err(|e| {
        color_eyre::eyre::eyre!(
            "Failed to save credentials to {}: {}",
            ctx.credentials.path().display(),
            e
        )
    })?;
    output.success(format!("API key saved to {}", ctx.credentials.path().display()));

    if std::env::var(cinelist_config::API_KEY_ENV).is_ok_and(|v| !v.trim().is_empty()) {
        output.warn("TMDB_API_KEY is set in the environment and takes precedence over the saved key");
    }
    Ok(())
}

fn init_config(ctx: &AppContext, force: bool, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();
    if config_file.exists()
        && !force
        && !prompt_yes_no(&format!("{} already exists. Overwrite?", config_file.display()), false)?
    {
        output.info("Keeping existing configuration");
        return Ok(());
    }

    ctx.paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories under {}: {}", ctx.paths.config_dir().display(), e))?;

    let mut config = Config::default();
    config.tmdb.api_key = Some(PLACEHOLDER_API_KEY.to_string());
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Configuration written to {}", config_file.display()));
    output.println("Replace YOUR_API_KEY with your TMDB key, or run 'cinelist config api-key'.");
    output.println(format!(
        "Pass --log-file {} to keep a log of each run.",
        ctx.paths.log_file().display()
    ));
    Ok(())
}

fn validate_api_key(input: &str) -> Result<(), &'static str> {
    if input.is_empty() {
        return Err("API key cannot be empty");
    }
    if input == PLACEHOLDER_API_KEY {
        return Err("Replace the placeholder with your real TMDB API key");
    }
    if input.chars().any(char::is_whitespace) {
        return Err("API key cannot contain whitespace");
    }
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.len() <= 4 || !s.is_ascii() {
        return "*".repeat(s.chars().count());
    }
    format!("{}***{}", &s[..2], &s[s.len() - 2..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("abcd"), "****");
        assert_eq!(mask_string("0123456789abcdef"), "01***ef");
    }

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key("").is_err());
        assert!(validate_api_key("YOUR_API_KEY").is_err());
        assert!(validate_api_key("abc def").is_err());
        assert!(validate_api_key("0123456789abcdef").is_ok());
    }
}
