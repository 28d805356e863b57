//! Display formatting for terminal output
//!
//! Every formatter returns a `String`; the command handlers print it.

pub mod catalog;
pub mod compare;
pub mod contents;
pub mod save;
pub mod size;

pub use catalog::{format_archive_selection, format_catalog_heading, format_catalog_list};
pub use compare::format_compare_report;
pub use contents::format_archive_contents;
pub use save::format_save_plan;
pub use size::format_byte_count;

/// Column alignment in a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Right,
}

/// Render rows under a header line and a dashed separator
///
/// Columns are separated by two spaces. The last column is never padded.
pub(crate) fn render_table(headers: &[(&str, Align)], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|(h, _)| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        let last = cells.len().saturating_sub(1);
        let line = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = widths[i];
                match headers[i].1 {
                    Align::Left if i == last => cell.to_string(),
                    Align::Left => format!("{:<width$}", cell, width = width),
                    Align::Right => format!("{:>width$}", cell, width = width),
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", line)
    };

    let mut output = String::new();
    output.push_str(&render_row(headers.iter().map(|(h, _)| *h).collect()));
    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&render_row(dashes.iter().map(String::as_str).collect()));
    for row in rows {
        output.push_str(&render_row(row.iter().map(String::as_str).collect()));
    }
    output
}
