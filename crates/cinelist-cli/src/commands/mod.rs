pub mod browse;
pub mod clear;
pub mod config;
pub mod movie;
pub mod open;
pub mod popular;
pub mod prompts;
pub mod render;
pub mod watchlist;

use crate::output::Output;
use cinelist_core::Persistence;

/// Tell the user when a watchlist change could not be written to disk
pub fn report_persistence(persistence: &Persistence, output: &Output) {
    if let Some(e) = persistence.error() {
        output.warn(format!("Watchlist change was not saved and will be lost on exit: {}", e));
    }
}
