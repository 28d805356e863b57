//! Archive methods
//!
//! Each archive method is one compression or mirroring backend with its own
//! naming convention. The set is closed: a method recognizes the paths it owns,
//! strips its suffix before the name is parsed, builds the external command that
//! writes a new archive, and lists the contents of a finished one.
//!
//! | Method  | On disk                  | Writer                      |
//! |---------|--------------------------|-----------------------------|
//! | `files` | folder, no suffix        | `rsync`                     |
//! | `gz`    | `<name>.tar.gz` file     | `tar` piped to `pigz`/`gzip`|
//! | `xz`    | `<name>.tar.xz` file     | `tar` piped to `pxz`/`xz`   |
//! | `zip`   | `<name>.zip` file        | `zip`                       |

mod registry;
mod sync;
mod tarball;
mod zip;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ShelfResult;
use crate::process::ProgramLocator;

pub use registry::{MethodRegistry, RegisteredMethod};

/// Physical type to assume when checking a path instead of stat-ing it
///
/// Lets catalog logic be exercised with synthetic paths that don't exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssumedType {
    File,
    Folder,
}

/// Input for building an archive save command
#[derive(Debug, Clone)]
pub struct SaveSpec {
    /// Folder being archived
    pub source_path: PathBuf,
    /// File holding the source-relative paths to include, one per line
    pub source_list_path: PathBuf,
    /// Target path without any method suffix
    pub archive_path: PathBuf,
    pub verbose: bool,
    /// Pipe output through `pv` (already checked to be installed)
    pub pv_progress: bool,
}

/// Output of building an archive save command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveCommand {
    /// Final archive path, suffix included
    pub archive_path: PathBuf,
    /// Command arguments, including shell pipe/redirect operators
    pub arguments: Vec<String>,
}

/// One entry inside an archive
#[derive(Debug, Clone, PartialEq)]
pub struct MethodListItem {
    pub path: PathBuf,
    /// Modification time, seconds since the epoch
    pub time: f64,
    /// File size, or `None` for folders
    pub size: Option<u64>,
}

/// A compression or mirroring backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveMethod {
    /// Folder mirror written with rsync
    Sync,
    /// gzip-compressed tarball
    Gz,
    /// xz-compressed tarball
    Xz,
    /// Zip file
    Zip,
}

impl ArchiveMethod {
    /// Remove this method's suffix from an archive file name
    ///
    /// Names without the suffix are returned unchanged.
    pub fn strip_name_suffix<'a>(&self, file_name: &'a str) -> &'a str {
        match self.suffix() {
            Some(suffix) => file_name.strip_suffix(suffix).unwrap_or(file_name),
            None => file_name,
        }
    }

    /// Check whether this method owns `path`
    ///
    /// Returns the path with the method suffix removed when it does. With no
    /// assumed type the filesystem is consulted.
    pub fn check_supported(&self, path: &Path, assumed_type: Option<AssumedType>) -> Option<PathBuf> {
        let is_folder = match assumed_type {
            Some(AssumedType::Folder) => true,
            Some(AssumedType::File) => false,
            None if path.is_dir() => true,
            None if path.is_file() => false,
            None => return None,
        };

        match self.suffix() {
            None if is_folder => Some(path.to_path_buf()),
            None => None,
            Some(_) if is_folder => None,
            Some(suffix) => {
                let text = path.to_str()?;
                text.strip_suffix(suffix).map(PathBuf::from)
            }
        }
    }

    /// Build the external command that writes a new archive
    pub fn build_save_command(
        &self,
        spec: &SaveSpec,
        programs: &dyn ProgramLocator,
    ) -> ShelfResult<SaveCommand> {
        match self {
            Self::Sync => Ok(sync::build_save_command(spec)),
            Self::Gz => tarball::build_save_command(spec, programs, &["pigz", "gzip"], "gz"),
            Self::Xz => tarball::build_save_command(spec, programs, &["pxz", "xz"], "xz"),
            Self::Zip => Ok(zip::build_save_command(spec)),
        }
    }

    /// List the entries of an existing archive
    ///
    /// The returned entries are in archive order.
    pub fn list_contents(&self, archive_path: &Path) -> ShelfResult<Vec<MethodListItem>> {
        match self {
            Self::Sync => sync::list_contents(archive_path),
            Self::Gz => tarball::list_contents(archive_path, tarball::Compression::Gzip),
            Self::Xz => tarball::list_contents(archive_path, tarball::Compression::Xz),
            Self::Zip => zip::list_contents(archive_path),
        }
    }

    /// File name suffix, or `None` for folder archives
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Self::Sync => None,
            Self::Gz => Some(".tar.gz"),
            Self::Xz => Some(".tar.xz"),
            Self::Zip => Some(".zip"),
        }
    }

    /// Whether archives of this method are folders
    pub fn is_folder(&self) -> bool {
        self.suffix().is_none()
    }
}

impl fmt::Display for ArchiveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync => write!(f, "rsync mirror"),
            Self::Gz => write!(f, "tar+gzip"),
            Self::Xz => write!(f, "tar+xz"),
            Self::Zip => write!(f, "zip"),
        }
    }
}

/// Append `pv` to a pipeline when progress reporting is on
fn push_progress(args: &mut Vec<String>, spec: &SaveSpec) {
    if spec.pv_progress {
        args.extend(["|", "pv", "-bret"].map(String::from));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_name_suffix() {
        assert_eq!(ArchiveMethod::Gz.strip_name_suffix("src_a.tar.gz"), "src_a");
        assert_eq!(ArchiveMethod::Xz.strip_name_suffix("src_a.tar.xz"), "src_a");
        assert_eq!(ArchiveMethod::Zip.strip_name_suffix("src_a.zip"), "src_a");
        assert_eq!(ArchiveMethod::Sync.strip_name_suffix("src_a"), "src_a");
        assert_eq!(ArchiveMethod::Gz.strip_name_suffix("src_a.zip"), "src_a.zip");
    }

    #[test]
    fn test_check_supported_assumed_file() {
        let file = Some(AssumedType::File);
        assert_eq!(
            ArchiveMethod::Gz.check_supported(Path::new("/a/x_1.tar.gz"), file),
            Some(PathBuf::from("/a/x_1"))
        );
        assert_eq!(ArchiveMethod::Gz.check_supported(Path::new("/a/x.gz"), file), None);
        assert_eq!(ArchiveMethod::Xz.check_supported(Path::new("/a/x.tar.gz"), file), None);
        assert_eq!(
            ArchiveMethod::Zip.check_supported(Path::new("/a/x.zip"), file),
            Some(PathBuf::from("/a/x"))
        );
        assert_eq!(ArchiveMethod::Sync.check_supported(Path::new("/a/x"), file), None);
    }

    #[test]
    fn test_check_supported_assumed_folder() {
        let folder = Some(AssumedType::Folder);
        assert_eq!(
            ArchiveMethod::Sync.check_supported(Path::new("/a/x_1"), folder),
            Some(PathBuf::from("/a/x_1"))
        );
        assert_eq!(ArchiveMethod::Zip.check_supported(Path::new("/a/x.zip"), folder), None);
    }

    #[test]
    fn test_check_supported_physical() {
        let dir = tempfile::TempDir::new().unwrap();
        let folder = dir.path().join("src_20200101-000000");
        std::fs::create_dir(&folder).unwrap();
        let file = dir.path().join("src.tar.xz");
        std::fs::write(&file, b"").unwrap();

        assert!(ArchiveMethod::Sync.check_supported(&folder, None).is_some());
        assert!(ArchiveMethod::Xz.check_supported(&folder, None).is_none());
        assert!(ArchiveMethod::Xz.check_supported(&file, None).is_some());
        assert!(ArchiveMethod::Sync.check_supported(&file, None).is_none());
        assert!(ArchiveMethod::Zip
            .check_supported(&dir.path().join("missing.zip"), None)
            .is_none());
    }
}
