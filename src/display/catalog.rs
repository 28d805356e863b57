//! Catalog display formatting

use std::path::{Path, PathBuf};

use super::{format_byte_count, render_table, Align};
use crate::catalog::CatalogItem;
use crate::config::SizeUnit;

/// Format catalog entries as a table
///
/// The long form adds size and file name columns.
pub fn format_catalog_list(items: &[CatalogItem], long: bool, unit: SizeUnit) -> String {
    if items.is_empty() {
        return "No archives found.".to_string();
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            let mut row = vec![item.time_string(), item.method_name.clone(), item.tags_string()];
            if long {
                let size = if item.is_folder {
                    None
                } else {
                    Some(item.size)
                };
                row.push(format_byte_count(size, unit));
                row.push(item.display_name());
            }
            row
        })
        .collect();

    let mut headers = vec![
        ("date/time", Align::Left),
        ("method", Align::Left),
        ("tags", Align::Left),
    ];
    if long {
        headers.push(("size", Align::Right));
        headers.push(("file/folder name", Align::Left));
    }

    render_table(&headers, &rows)
}

/// Title line naming the source and the catalog folder being listed
pub fn format_catalog_heading(source_name: &str, archive_folder: &Path) -> String {
    format!(
        "{} archive catalog from \"{}\"",
        source_name,
        archive_folder.display()
    )
}

/// List archives about to be acted on, one per line
pub fn format_archive_selection(title: &str, paths: &[PathBuf]) -> String {
    let mut output = format!("{} ({}):\n", title, paths.len());
    for path in paths {
        output.push_str(&format!("  * {}\n", path.display()));
    }
    output
}
