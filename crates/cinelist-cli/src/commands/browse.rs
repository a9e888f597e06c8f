use super::movie::{load_overview, show_overview, DetailView};
use super::popular::{load_page, show_page};
use super::prompts::prompt_select;
use super::report_persistence;
use crate::context::AppContext;
use crate::output::Output;
use cinelist_core::PageCursor;
use cinelist_models::PopularPage;
use color_eyre::Result;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Prev,
    Toggle,
    Details,
    Quit,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::Next => "Next page",
            Action::Prev => "Previous page",
            Action::Toggle => "Add/remove from watchlist…",
            Action::Details => "Details…",
            Action::Quit => "Quit",
        }
    }
}

/// Menu entries for the current state; movie actions need a loaded page
fn actions(cursor: PageCursor, has_movies: bool) -> Vec<Action> {
    let mut actions = Vec::new();
    if has_movies {
        actions.push(Action::Toggle);
        actions.push(Action::Details);
    }
    actions.push(Action::Next);
    if cursor.has_prev() {
        actions.push(Action::Prev);
    }
    actions.push(Action::Quit);
    actions
}

fn pick_movie(page: &PopularPage) -> Result<Option<usize>> {
    let titles: Vec<String> = page
        .results
        .iter()
        .map(|m| format!("{} ({})", m.display_title(), m.id))
        .collect();
    prompt_select("Which movie?", &titles)
}

fn toggle(ctx: &AppContext, page: &PopularPage, output: &Output) -> Result<()> {
    let Some(index) = pick_movie(page)? else {
        return Ok(());
    };
    let movie = &page.results[index];

    let mut store = ctx.open_watchlist();
    if store.contains(movie) {
        let persistence = store.remove_id(&movie.id);
        report_persistence(&persistence, output);
        output.success(format!("Removed {} from your watchlist", movie.display_title()));
    } else {
        let persistence = store.add(movie.clone());
        report_persistence(&persistence, output);
        output.success(format!("Added {} to your watchlist", movie.display_title()));
    }
    Ok(())
}

async fn details(ctx: &AppContext, page: &PopularPage, output: &Output) -> Result<()> {
    let Some(index) = pick_movie(page)? else {
        return Ok(());
    };
    let id = page.results[index].id.to_string();

    match load_overview(ctx, &id, output).await {
        DetailView::Found(overview) => show_overview(&overview, ctx, output),
        DetailView::NotFound => output.info("Movie not found"),
        DetailView::Failed => {}
    }
    Ok(())
}

/// Interactive listing: page through popular movies and edit the watchlist in place
pub async fn run_browse(ctx: &AppContext, start_page: u32, output: &Output) -> Result<ExitCode> {
    if !output.is_human() {
        output.error("browse is interactive; use 'cinelist popular --page N' for machine-readable output");
        return Ok(ExitCode::FAILURE);
    }

    let mut cursor = PageCursor::at(start_page);
    let mut page = load_page(ctx, cursor, output).await;

    loop {
        if let Some(listing) = &page {
            let store = ctx.open_watchlist();
            show_page(listing, &store, ctx, output);
        }

        let has_movies = page.as_ref().is_some_and(|p| !p.results.is_empty());
        let menu = actions(cursor, has_movies);
        let labels: Vec<&str> = menu.iter().map(|a| a.label()).collect();
        let Some(choice) = prompt_select("What next?", &labels)? else {
            break;
        };

        match menu[choice] {
            Action::Next => {
                cursor.next();
                page = load_page(ctx, cursor, output).await;
            }
            Action::Prev => {
                cursor.prev();
                page = load_page(ctx, cursor, output).await;
            }
            Action::Toggle => {
                if let Some(listing) = &page {
                    toggle(ctx, listing, output)?;
                }
            }
            Action::Details => {
                if let Some(listing) = &page {
                    details(ctx, listing, output).await?;
                }
            }
            Action::Quit => break,
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_has_no_previous() {
        let menu = actions(PageCursor::new(), true);
        assert!(!menu.contains(&Action::Prev));
        assert_eq!(menu.first(), Some(&Action::Toggle));
        assert_eq!(menu.last(), Some(&Action::Quit));
    }

    #[test]
    fn test_failed_page_still_offers_navigation() {
        let menu = actions(PageCursor::at(3), false);
        assert_eq!(menu, vec![Action::Next, Action::Prev, Action::Quit]);
    }
}
