//! HTML table extraction.
//!
//! Parses a document, locates one `<table>` by id and converts it into a
//! [`Table`]: header labels become column names, remaining rows become
//! data rows with per-column type inference.

pub mod coerce;
pub mod grid;
pub mod locate;

use crate::error::ExtractError;
use crate::table::{CellValue, Table};
use scraper::{ElementRef, Html};
use std::collections::HashSet;
use tracing::debug;

pub use locate::{find_table, table_ids};

/// Parse `html` and convert the table with the given id.
pub fn parse_table(html: &str, table_id: &str) -> Result<Table, ExtractError> {
    let document = Html::parse_document(html);
    let table = find_table(&document, table_id).inspect_err(|_| {
        debug!(id = table_id, available = ?table_ids(&document), "table not found");
    })?;
    table_from_element(table, table_id)
}

/// Convert an already located `<table>` element.
pub fn table_from_element(table: ElementRef<'_>, table_id: &str) -> Result<Table, ExtractError> {
    let sections = grid::read_sections(table);
    if sections.is_empty() {
        return Err(ExtractError::EmptyTable {
            id: table_id.to_string(),
        });
    }

    let grid = grid::build_grid(sections);
    let width = grid.width();
    let columns = column_names(&grid.header, width);

    let mut cells: Vec<Vec<CellValue>> = Vec::with_capacity(width);
    for col in 0..width {
        let raw: Vec<Option<&str>> = grid
            .rows
            .iter()
            .map(|row| row.get(col).map(String::as_str))
            .collect();
        cells.push(coerce::infer_column(&raw));
    }

    let rows: Vec<Vec<CellValue>> = (0..grid.rows.len())
        .map(|r| cells.iter().map(|col| col[r].clone()).collect())
        .collect();

    debug!(
        id = table_id,
        columns = columns.len(),
        rows = rows.len(),
        "table converted"
    );

    Ok(Table::new(columns, rows))
}

/// One label per column from possibly several header rows.
///
/// Distinct non-empty labels are joined with a space, blanks become
/// `Unnamed: {index}` and repeats get `.1`, `.2`, ... suffixes.
pub fn column_names(header: &[Vec<String>], width: usize) -> Vec<String> {
    let labels = (0..width).map(|i| {
        let mut parts: Vec<&str> = Vec::new();
        for row in header {
            if let Some(label) = row.get(i).map(String::as_str) {
                if !label.is_empty() && !parts.contains(&label) {
                    parts.push(label);
                }
            }
        }
        if parts.is_empty() {
            format!("Unnamed: {i}")
        } else {
            parts.join(" ")
        }
    });

    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(width);
    for label in labels {
        let mut name = label.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{label}.{n}");
            n += 1;
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_country_population() {
        let html = r#"<table id="t1"><tr><th>Country</th><th>Population</th></tr><tr><td>A</td><td>100</td></tr></table>"#;
        let table = parse_table(html, "t1").unwrap();

        assert_eq!(table.columns, vec!["Country", "Population"]);
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.rows[0],
            vec![CellValue::Text("A".into()), CellValue::Int(100)]
        );
    }

    #[test]
    fn test_missing_table_is_extraction_error() {
        let err = parse_table("<html><body><p>nothing</p></body></html>", "t1").unwrap_err();
        assert!(err.is_extraction());
        assert_eq!(err.kind(), "table_not_found");
    }

    #[test]
    fn test_header_only_table_has_no_rows() {
        let html = r#"<table id="t"><thead><tr><th>a</th><th>b</th><th>c</th></tr></thead><tbody></tbody></table>"#;
        let table = parse_table(html, "t").unwrap();
        assert_eq!(table.columns, vec!["a", "b", "c"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_table_without_rows_is_empty_error() {
        let err = parse_table(r#"<table id="t"></table>"#, "t").unwrap_err();
        assert_eq!(err.kind(), "empty_table");
    }

    #[test]
    fn test_malformed_markup_still_parses() {
        let html = r#"<table id="t"><tr><th>name<th>n<tr><td>x<td>1<tr><td>y<td>2</table"#;
        let table = parse_table(html, "t").unwrap();
        assert_eq!(table.columns, vec!["name", "n"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1][1], CellValue::Int(2));
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let html = r#"<table id="t"><tr><th>a</th><th>b</th></tr><tr><td>1</td></tr><tr><td>2</td><td>x</td><td>extra</td></tr></table>"#;
        let table = parse_table(html, "t").unwrap();
        assert_eq!(table.columns, vec!["a", "b", "Unnamed: 2"]);
        assert_eq!(table.rows[0], vec![CellValue::Int(1), CellValue::Null, CellValue::Null]);
        assert_eq!(
            table.rows[1],
            vec![
                CellValue::Int(2),
                CellValue::Text("x".into()),
                CellValue::Text("extra".into())
            ]
        );
    }

    #[test]
    fn test_rowspan_does_not_outlive_its_section() {
        let html = "<table id=t><tr><th>a</th><th>b</th></tr><tr><td>x</td><td rowspan=3>z</td></tr></table>";
        let table = parse_table(html, "t").unwrap();
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(
            table.rows,
            vec![vec![CellValue::Text("x".into()), CellValue::Text("z".into())]]
        );
    }

    #[test]
    fn test_column_names_dedup_and_unnamed() {
        let header = vec![vec!["a".to_string(), "".to_string(), "a".to_string(), "a".to_string()]];
        assert_eq!(
            column_names(&header, 4),
            vec!["a", "Unnamed: 1", "a.1", "a.2"]
        );
    }

    #[test]
    fn test_column_names_join_header_rows() {
        let header = vec![
            vec!["Population".to_string(), "Population".to_string(), "Area".to_string()],
            vec!["Male".to_string(), "Female".to_string(), "Area".to_string()],
        ];
        assert_eq!(
            column_names(&header, 3),
            vec!["Population Male", "Population Female", "Area"]
        );
    }

    #[test]
    fn test_population_style_table() {
        let html = r#"
            <table id="example2">
              <thead><tr><th>#</th><th>Country (or dependency)</th><th>Population (2020)</th><th>Yearly Change</th><th>Med. Age</th></tr></thead>
              <tbody>
                <tr><td>1</td><td><a href="/china">China</a></td><td>1,439,323,776</td><td>0.39 %</td><td>38</td></tr>
                <tr><td>2</td><td><a href="/india">India</a></td><td>1,380,004,385</td><td>0.99 %</td><td>28</td></tr>
                <tr><td>3</td><td>Holy See</td><td>801</td><td>0.25 %</td><td>N.A.</td></tr>
              </tbody>
            </table>"#;
        let table = parse_table(html, "example2").unwrap();

        assert_eq!(table.width(), 5);
        assert_eq!(table.len(), 3);
        let china = table.row(0).unwrap();
        assert_eq!(china.get("Country (or dependency)"), Some(&CellValue::Text("China".into())));
        assert_eq!(china.get("Population (2020)"), Some(&CellValue::Int(1_439_323_776)));
        assert_eq!(china.get("Yearly Change"), Some(&CellValue::Text("0.39 %".into())));
        // "N.A." keeps the whole column as text
        assert_eq!(china.get("Med. Age"), Some(&CellValue::Text("38".into())));
    }
}
