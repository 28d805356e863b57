//! Archive comparison display formatting

use crate::services::CompareReport;

/// Summarize differences between an archive and its source
pub fn format_compare_report(report: &CompareReport) -> String {
    if report.is_identical() {
        return format!("No differences ({} files match).", report.matching);
    }

    let mut output = String::new();
    if !report.only_in_archive.is_empty() {
        output.push_str(&format!("Only in archive ({}):\n", report.only_in_archive.len()));
        for path in &report.only_in_archive {
            output.push_str(&format!("  - {}\n", path.display()));
        }
    }
    if !report.only_in_source.is_empty() {
        output.push_str(&format!("Only in source ({}):\n", report.only_in_source.len()));
        for path in &report.only_in_source {
            output.push_str(&format!("  + {}\n", path.display()));
        }
    }
    if !report.size_differs.is_empty() {
        output.push_str(&format!("Size differs ({}):\n", report.size_differs.len()));
        for diff in &report.size_differs {
            output.push_str(&format!(
                "  ~ {} (archive {} bytes, source {} bytes)\n",
                diff.path.display(),
                diff.archive_size,
                diff.source_size
            ));
        }
    }
    output.push_str(&format!("Matching files: {}\n", report.matching));
    output
}
