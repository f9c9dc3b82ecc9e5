//! Find a `<table>` by id in a parsed document.

use crate::error::ExtractError;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

fn table_selector() -> Result<Selector, ExtractError> {
    Selector::parse("table").map_err(|e| ExtractError::Selector(e.to_string()))
}

/// First `table` element whose `id` equals `id`, in document order.
///
/// Several matches are not an error; the first wins and a warning is logged.
pub fn find_table<'a>(document: &'a Html, id: &str) -> Result<ElementRef<'a>, ExtractError> {
    let sel = table_selector()?;
    let mut matches = document
        .select(&sel)
        .filter(|el| el.value().id() == Some(id));

    let first = matches.next().ok_or_else(|| ExtractError::TableNotFound { id: id.to_string() })?;

    let others = matches.count();
    if others > 0 {
        warn!(id, matches = others + 1, "several tables share this id, using the first");
    }

    Ok(first)
}

/// Ids of every `table` in the document that has one, in document order.
pub fn table_ids(document: &Html) -> Vec<String> {
    let Ok(sel) = table_selector() else {
        return Vec::new();
    };
    document
        .select(&sel)
        .filter_map(|el| el.value().id().map(String::from))
        .collect()
}
