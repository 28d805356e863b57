//! Archive contents display formatting

use super::{format_byte_count, render_table, Align};
use crate::catalog::builder::format_timestamp;
use crate::config::SizeUnit;
use crate::methods::MethodListItem;

/// Format the entries of one archive as a table
pub fn format_archive_contents(items: &[MethodListItem], unit: SizeUnit) -> String {
    if items.is_empty() {
        return "Archive is empty.".to_string();
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                format_byte_count(item.size, unit),
                format_timestamp(item.time),
                item.path.display().to_string(),
            ]
        })
        .collect();

    render_table(
        &[
            ("size", Align::Right),
            ("date/time", Align::Left),
            ("path", Align::Left),
        ],
        &rows,
    )
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_contents_table() {
        let items = vec![
            MethodListItem {
                path: PathBuf::from("src"),
                time: 0.0,
                size: None,
            },
            MethodListItem {
                path: PathBuf::from("src/main.rs"),
                time: 0.0,
                size: Some(12),
            },
        ];
        let output = format_archive_contents(&items, SizeUnit::Raw);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("   -  "));
        assert!(lines[2].ends_with("  src"));
        assert!(lines[3].starts_with("  12  "));
        assert!(lines[3].ends_with("  src/main.rs"));
    }

    #[test]
    fn test_empty_contents() {
        assert_eq!(format_archive_contents(&[], SizeUnit::Binary), "Archive is empty.");
    }
}
