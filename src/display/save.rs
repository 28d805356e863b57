//! Save plan display formatting

use super::format_byte_count;
use crate::config::SizeUnit;
use crate::services::SavePlan;

/// Describe a save before it runs
///
/// Dry runs list every selected file. With `verbose`, the archive command
/// line is included.
pub fn format_save_plan(plan: &SavePlan, unit: SizeUnit, verbose: bool) -> String {
    let mut output = String::new();

    if plan.dry_run {
        output.push_str(&format!(
            "Saving archive (dry run): {}\n",
            plan.archive_path.display()
        ));
        for path in &plan.files {
            output.push_str(&format!("  {}\n", path.display()));
        }
    } else {
        output.push_str(&format!("Saving archive: {}\n", plan.archive_path.display()));
    }

    if plan.list_kept {
        if let Some(list_path) = &plan.list_path {
            output.push_str(&format!("File list: {}\n", list_path.display()));
        }
    }
    if verbose {
        output.push_str(&format!("Archive command: {}\n", plan.command));
    }

    output.push_str(&format!(
        "Archiving {} from {} files in {} folders ...",
        format_byte_count(Some(plan.totals.bytes), unit),
        plan.totals.files,
        plan.totals.folders
    ));
    output
}
