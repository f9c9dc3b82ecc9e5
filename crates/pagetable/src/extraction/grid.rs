//! Turn a `<table>` element into header labels and rows of cell text.
//!
//! Rows come from the table's own `<thead>`, `<tbody>` and `<tfoot>` (or
//! bare `<tr>` children); rows of nested tables are skipped. `colspan` and
//! `rowspan` are expanded per section so every logical cell gets its text.

use scraper::ElementRef;

/// Largest `colspan`/`rowspan` honoured.
pub const MAX_SPAN: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawCell {
    pub text: String,
    pub is_header: bool,
    pub colspan: usize,
    pub rowspan: usize,
}

type RawRow = Vec<RawCell>;

/// Rows of a table split by section, spans not yet expanded.
#[derive(Debug, Default)]
pub(crate) struct Sections {
    pub head: Vec<RawRow>,
    pub body: Vec<RawRow>,
    pub foot: Vec<RawRow>,
}

impl Sections {
    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.body.is_empty() && self.foot.is_empty()
    }
}

/// Header rows and data rows, spans expanded, not yet padded.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Grid {
    pub header: Vec<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn width(&self) -> usize {
        self.header
            .iter()
            .chain(self.rows.iter())
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }
}

/// Collapse whitespace runs (NBSP included) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

fn span_attr(cell: &ElementRef<'_>, name: &str) -> usize {
    cell.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .map(|n| n.min(MAX_SPAN))
        .unwrap_or(1)
}

fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

fn read_row(tr: ElementRef<'_>) -> RawRow {
    child_elements(tr)
        .filter(|c| matches!(c.value().name(), "td" | "th"))
        .map(|c| RawCell {
            text: normalize_ws(&c.text().collect::<String>()),
            is_header: c.value().name() == "th",
            colspan: span_attr(&c, "colspan"),
            rowspan: span_attr(&c, "rowspan"),
        })
        .collect()
}

fn read_section(section: ElementRef<'_>) -> Vec<RawRow> {
    child_elements(section)
        .filter(|c| c.value().name() == "tr")
        .map(read_row)
        .filter(|r| !r.is_empty())
        .collect()
}

/// Split the table's own rows into sections. Rows without cells are dropped.
pub(crate) fn read_sections(table: ElementRef<'_>) -> Sections {
    let mut sections = Sections::default();
    for child in child_elements(table) {
        match child.value().name() {
            "thead" => sections.head.extend(read_section(child)),
            "tbody" => sections.body.extend(read_section(child)),
            "tfoot" => sections.foot.extend(read_section(child)),
            "tr" => {
                let row = read_row(child);
                if !row.is_empty() {
                    sections.body.push(row);
                }
            }
            _ => {}
        }
    }
    sections
}

/// Pick header rows, then expand spans section by section.
///
/// Header rows are `<thead>` if present, else leading all-`<th>` rows,
/// else the first row.
pub(crate) fn build_grid(mut sections: Sections) -> Grid {
    if sections.head.is_empty() {
        let leading_th = sections
            .body
            .iter()
            .take_while(|row| row.iter().all(|c| c.is_header))
            .count();
        if leading_th > 0 {
            sections.head = sections.body.drain(..leading_th).collect();
        } else if !sections.body.is_empty() {
            sections.head.push(sections.body.remove(0));
        } else if !sections.foot.is_empty() {
            sections.head.push(sections.foot.remove(0));
        }
    }

    let mut rows = expand_spans(sections.body);
    rows.extend(expand_spans(sections.foot));

    Grid {
        header: expand_spans(sections.head),
        rows,
    }
}

/// Repeat `colspan` cells across columns and `rowspan` cells down rows.
///
/// A rowspan ends with its section. Carried cells keep their column; a
/// short row is padded with empty text up to it.
pub(crate) fn expand_spans(rows: Vec<RawRow>) -> Vec<Vec<String>> {
    let mut out = Vec::with_capacity(rows.len());
    // (column, text, rows still to fill) carried from the row above
    let mut pending: Vec<(usize, String, usize)> = Vec::new();

    for row in rows {
        let mut texts: Vec<String> = Vec::new();
        let mut next = Vec::new();
        let mut carried = pending.into_iter().peekable();

        for cell in row {
            while let Some((_, text, left)) = carried.next_if(|(col, _, _)| *col <= texts.len()) {
                if left > 1 {
                    next.push((texts.len(), text.clone(), left - 1));
                }
                texts.push(text);
            }
            for _ in 0..cell.colspan {
                if cell.rowspan > 1 {
                    next.push((texts.len(), cell.text.clone(), cell.rowspan - 1));
                }
                texts.push(cell.text.clone());
            }
        }
        for (col, text, left) in carried {
            if texts.len() < col {
                texts.resize(col, String::new());
            }
            if left > 1 {
                next.push((texts.len(), text.clone(), left - 1));
            }
            texts.push(text);
        }

        out.push(texts);
        pending = next;
    }

    out
}
