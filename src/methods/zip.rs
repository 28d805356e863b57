//! Zip archive support

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, TimeZone};

use super::{push_progress, MethodListItem, SaveCommand, SaveSpec};
use crate::error::{ShelfError, ShelfResult};

/// `zip -r - . -i@<list> [-q] [| pv -bret] > <archive>.zip`
///
/// Runs from the source folder so the list's relative paths resolve.
pub(super) fn build_save_command(spec: &SaveSpec) -> SaveCommand {
    let mut args: Vec<String> = vec![
        "zip".into(),
        "-r".into(),
        "-".into(),
        ".".into(),
        format!("-i@{}", spec.source_list_path.display()),
    ];
    if !spec.verbose {
        args.push("-q".into());
    }
    push_progress(&mut args, spec);

    let archive_path = PathBuf::from(format!("{}.zip", spec.archive_path.display()));
    args.extend([">".to_string(), archive_path.display().to_string()]);

    SaveCommand {
        archive_path,
        arguments: args,
    }
}

pub(super) fn list_contents(archive_path: &Path) -> ShelfResult<Vec<MethodListItem>> {
    let file = File::open(archive_path)
        .map_err(|e| ShelfError::Io(format!("Failed to open {}: {}", archive_path.display(), e)))?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut items = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        let size = if entry.is_dir() { None } else { Some(entry.size()) };
        items.push(MethodListItem {
            path: PathBuf::from(entry.name()),
            time: dos_time_to_epoch(entry.last_modified()),
            size,
        });
    }

    Ok(items)
}

/// Zip entries store a local wall-clock time without zone information
fn dos_time_to_epoch(stamp: zip::DateTime) -> f64 {
    NaiveDate::from_ymd_opt(stamp.year() as i32, stamp.month() as u32, stamp.day() as u32)
        .and_then(|date| {
            date.and_hms_opt(stamp.hour() as u32, stamp.minute() as u32, stamp.second() as u32)
        })
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|local| local.timestamp() as f64)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::methods::ArchiveMethod;
    use crate::process::testing::FakePrograms;

    #[test]
    fn test_zip_save_command() {
        let spec = SaveSpec {
            source_path: PathBuf::from("/home/me/proj"),
            source_list_path: PathBuf::from("/tmp/list.txt"),
            archive_path: PathBuf::from("/arch/proj_a_b"),
            verbose: false,
            pv_progress: true,
        };
        let cmd = ArchiveMethod::Zip
            .build_save_command(&spec, &FakePrograms::with(&[]))
            .unwrap();
        assert_eq!(cmd.archive_path, PathBuf::from("/arch/proj_a_b.zip"));
        assert_eq!(
            cmd.arguments.join(" "),
            "zip -r - . -i@/tmp/list.txt -q | pv -bret > /arch/proj_a_b.zip"
        );
    }

    #[test]
    fn test_list_zip_contents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("proj.zip");
        let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
        let options = zip::write::FileOptions::default();
        writer.add_directory("docs/", options).unwrap();
        writer.start_file("docs/readme.md", options).unwrap();
        writer.write_all(b"# readme").unwrap();
        writer.finish().unwrap();

        let items = ArchiveMethod::Zip.list_contents(&path).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].size, None);
        assert_eq!(items[1].path, PathBuf::from("docs/readme.md"));
        assert_eq!(items[1].size, Some(8));
        assert!(items[1].time > 0.0);
    }

    #[test]
    fn test_list_not_a_zip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fake.zip");
        std::fs::write(&path, b"nope").unwrap();

        let err = ArchiveMethod::Zip.list_contents(&path).unwrap_err();
        assert!(matches!(err, ShelfError::Archive(_)));
    }
}
