//! Compressed tarball support shared by the `gz` and `xz` methods

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use xz2::read::XzDecoder;

use super::{push_progress, MethodListItem, SaveCommand, SaveSpec};
use crate::error::{ShelfError, ShelfResult};
use crate::process::{choose_program, ProgramLocator};

/// Compression wrapped around the tar stream
#[derive(Debug, Clone, Copy)]
pub(super) enum Compression {
    Gzip,
    Xz,
}

/// `tar cf - -T <list> | <compressor> [| pv -bret] > <archive>.tar.<extension>`
pub(super) fn build_save_command(
    spec: &SaveSpec,
    programs: &dyn ProgramLocator,
    compressors: &[&str],
    extension: &str,
) -> ShelfResult<SaveCommand> {
    let mut args: Vec<String> = vec![
        "tar".into(),
        "cf".into(),
        "-".into(),
        "-T".into(),
        spec.source_list_path.display().to_string(),
    ];
    if spec.verbose {
        args.push("-v".into());
    }

    let compressor = choose_program(programs, compressors)?;
    args.extend(["|".to_string(), compressor]);
    push_progress(&mut args, spec);

    let archive_path = PathBuf::from(format!("{}.tar.{}", spec.archive_path.display(), extension));
    args.extend([">".to_string(), archive_path.display().to_string()]);

    Ok(SaveCommand {
        archive_path,
        arguments: args,
    })
}

pub(super) fn list_contents(
    archive_path: &Path,
    compression: Compression,
) -> ShelfResult<Vec<MethodListItem>> {
    let file = File::open(archive_path)
        .map_err(|e| ShelfError::Io(format!("Failed to open {}: {}", archive_path.display(), e)))?;
    let reader: Box<dyn Read> = match compression {
        Compression::Gzip => Box::new(GzDecoder::new(file)),
        Compression::Xz => Box::new(XzDecoder::new(file)),
    };

    let mut archive = tar::Archive::new(reader);
    let entries = archive.entries().map_err(tar_error)?;
    let mut items = Vec::new();

    for entry in entries {
        let entry = entry.map_err(tar_error)?;
        let header = entry.header();
        let time = header.mtime().map_err(tar_error)? as f64;
        let size = if header.entry_type().is_dir() {
            None
        } else {
            Some(header.size().map_err(tar_error)?)
        };
        let path = entry.path().map_err(tar_error)?.into_owned();
        items.push(MethodListItem { path, time, size });
    }

    Ok(items)
}

fn tar_error(err: std::io::Error) -> ShelfError {
    ShelfError::Archive(format!("Failed to read tarball: {}", err))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::methods::ArchiveMethod;
    use crate::process::testing::FakePrograms;

    fn spec(pv_progress: bool, verbose: bool) -> SaveSpec {
        SaveSpec {
            source_path: PathBuf::from("/home/me/proj"),
            source_list_path: PathBuf::from("/tmp/list.txt"),
            archive_path: PathBuf::from("/arch/proj_20200101-000000"),
            verbose,
            pv_progress,
        }
    }

    fn append_file<W: Write>(builder: &mut tar::Builder<W>, path: &str, data: &[u8], mtime: u64) {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(mtime);
        header.set_cksum();
        builder.append_data(&mut header, path, data).unwrap();
    }

    fn append_dir<W: Write>(builder: &mut tar::Builder<W>, path: &str, mtime: u64) {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Directory);
        header.set_size(0);
        header.set_mode(0o755);
        header.set_mtime(mtime);
        header.set_cksum();
        builder.append_data(&mut header, path, std::io::empty()).unwrap();
    }

    #[test]
    fn test_gz_save_command() {
        let programs = FakePrograms::with(&["gzip"]);
        let cmd = ArchiveMethod::Gz
            .build_save_command(&spec(false, false), &programs)
            .unwrap();
        assert_eq!(
            cmd.archive_path,
            PathBuf::from("/arch/proj_20200101-000000.tar.gz")
        );
        assert_eq!(
            cmd.arguments.join(" "),
            "tar cf - -T /tmp/list.txt | gzip > /arch/proj_20200101-000000.tar.gz"
        );
    }

    #[test]
    fn test_xz_save_command_with_progress() {
        let programs = FakePrograms::with(&["pxz", "xz", "pv"]);
        let cmd = ArchiveMethod::Xz
            .build_save_command(&spec(true, true), &programs)
            .unwrap();
        assert_eq!(
            cmd.arguments.join(" "),
            "tar cf - -T /tmp/list.txt -v | pxz | pv -bret > /arch/proj_20200101-000000.tar.xz"
        );
    }

    #[test]
    fn test_missing_compressor() {
        let programs = FakePrograms::with(&[]);
        let err = ArchiveMethod::Xz
            .build_save_command(&spec(false, false), &programs)
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_list_gz_contents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("proj.tar.gz");
        let encoder = flate2::write::GzEncoder::new(
            File::create(&path).unwrap(),
            flate2::Compression::default(),
        );
        let mut builder = tar::Builder::new(encoder);
        append_dir(&mut builder, "src/", 1_600_000_000);
        append_file(&mut builder, "src/main.rs", b"fn main() {}", 1_600_000_100);
        builder.into_inner().unwrap().finish().unwrap();

        let items = ArchiveMethod::Gz.list_contents(&path).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].path, PathBuf::from("src/"));
        assert_eq!(items[0].size, None);
        assert_eq!(items[1].path, PathBuf::from("src/main.rs"));
        assert_eq!(items[1].size, Some(12));
        assert_eq!(items[1].time, 1_600_000_100.0);
    }

    #[test]
    fn test_list_xz_contents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("proj.tar.xz");
        let encoder = xz2::write::XzEncoder::new(File::create(&path).unwrap(), 6);
        let mut builder = tar::Builder::new(encoder);
        append_file(&mut builder, "notes.txt", b"hello", 1_500_000_000);
        builder.into_inner().unwrap().finish().unwrap();

        let items = ArchiveMethod::Xz.list_contents(&path).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].size, Some(5));
    }

    #[test]
    fn test_list_corrupt_tarball() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.tar.gz");
        std::fs::write(&path, b"definitely not gzip").unwrap();

        let err = ArchiveMethod::Gz.list_contents(&path).unwrap_err();
        assert!(matches!(err, ShelfError::Archive(_)));
    }
}
