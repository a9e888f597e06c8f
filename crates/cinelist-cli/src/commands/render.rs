use cinelist_core::view::genre_name;
use cinelist_core::WatchlistSummary;
use cinelist_models::{GenreTable, MovieOverview, MovieRecord};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use serde_json::{json, Value};

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|l| Cell::new(l).add_attribute(Attribute::Bold))
        .collect()
}

fn year_label(movie: &MovieRecord) -> String {
    movie
        .release_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Home listing; `saved` marks titles already on the watchlist
pub fn popular_table(movies: &[MovieRecord], genres: &GenreTable, saved: impl Fn(&MovieRecord) -> bool) -> Table {
    let mut table = styled_table();
    table.set_header(header(&["#", "Id", "Title", "Year", "Rating", "Genre", "Watchlist"]));
    for (index, movie) in movies.iter().enumerate() {
        let mark = if saved(movie) {
            Cell::new("♥").fg(Color::Magenta)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(movie.id.to_string()),
            Cell::new(movie.display_title()),
            Cell::new(year_label(movie)),
            Cell::new(movie.rating_label()).set_alignment(CellAlignment::Right),
            Cell::new(genre_name(movie, genres)),
            mark.set_alignment(CellAlignment::Center),
        ]);
    }
    table
}

pub fn watchlist_table(rows: &[&MovieRecord], genres: &GenreTable) -> Table {
    let mut table = styled_table();
    table.set_header(header(&["Id", "Movie", "Year", "Rating", "Popularity", "Genre"]));
    for movie in rows {
        table.add_row(vec![
            Cell::new(movie.id.to_string()),
            Cell::new(movie.display_title()).add_attribute(Attribute::Bold),
            Cell::new(year_label(movie)),
            Cell::new(format!("★ {}", movie.rating_label())).fg(Color::Yellow),
            Cell::new(movie.popularity_rounded()).set_alignment(CellAlignment::Right),
            Cell::new(genre_name(movie, genres)).fg(Color::Magenta),
        ]);
    }
    table
}

pub fn summary_table(summary: &WatchlistSummary) -> Table {
    let mut table = styled_table();
    table.set_header(header(&["Total Movies", "Genres"]));
    table.add_row(vec![Cell::new(summary.total), Cell::new(summary.genres)]);
    table
}

pub fn overview_table(overview: &MovieOverview) -> Table {
    let details = &overview.details;
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new(details.title.as_deref().unwrap_or("N/A"))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Rating"),
        Cell::new(format!("⭐ {:.1}/10 ({} votes)", details.vote_average, details.vote_count)),
    ]);
    if let Some(date) = details.release_date.as_deref().filter(|d| !d.is_empty()) {
        table.add_row(vec![Cell::new("Released"), Cell::new(date)]);
    }
    if let Some(runtime) = details.runtime.filter(|r| *r > 0) {
        table.add_row(vec![Cell::new("Runtime"), Cell::new(format!("{} min", runtime))]);
    }
    if !details.genres.is_empty() {
        let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        table.add_row(vec![Cell::new("Genres"), Cell::new(names.join(", "))]);
    }
    table.add_row(vec![Cell::new("Overview"), Cell::new(details.overview_text())]);
    table.add_row(vec![Cell::new("Director"), Cell::new(overview.director_label())]);
    if let Some(url) = overview.trailer_url() {
        table.add_row(vec![Cell::new("Official Trailer"), Cell::new(url)]);
    }
    if !overview.cast.is_empty() {
        let cast: Vec<String> = overview
            .cast
            .iter()
            .map(|c| match c.character.as_deref().filter(|ch| !ch.is_empty()) {
                Some(character) => format!("{} as {}", c.name, character),
                None => c.name.clone(),
            })
            .collect();
        table.add_row(vec![Cell::new("Main Cast"), Cell::new(cast.join("\n"))]);
    }
    table
}

/// JSON row for a watchlist or listing entry
pub fn movie_json(movie: &MovieRecord, genres: &GenreTable, image_base: &str) -> Value {
    json!({
        "id": movie.id,
        "title": movie.title,
        "year": movie.release_year(),
        "rating": movie.vote_average,
        "popularity": movie.popularity,
        "genre": genre_name(movie, genres),
        "poster_url": movie.poster_url(image_base, "original"),
    })
}
