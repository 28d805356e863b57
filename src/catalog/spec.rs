//! Where a source's archives live and what they are called

use std::path::{Component, Path, PathBuf};

use crate::config::paths::{expand_home, home_dir};
use crate::config::Settings;
use crate::error::{ShelfError, ShelfResult};

/// Catalog folder used for sources outside the home directory
const OUTSIDE_HOME_FOLDER: &str = "__ROOT__";

/// Resolved source folder, catalog folder and source name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSpec {
    pub source_folder: PathBuf,
    pub archive_folder: PathBuf,
    pub source_name: String,
}

impl CatalogSpec {
    /// Fill in defaults for anything not given on the command line
    ///
    /// The source folder defaults to the current directory. Without an explicit
    /// archive folder, the source's path relative to home is mirrored under the
    /// configured archive root.
    pub fn resolve(
        settings: &Settings,
        source_folder: Option<&Path>,
        archive_folder: Option<&Path>,
        source_name: Option<&str>,
    ) -> ShelfResult<Self> {
        let current_dir = std::env::current_dir()
            .map_err(|e| ShelfError::Io(format!("Failed to read current directory: {}", e)))?;
        Self::resolve_from(
            settings,
            &current_dir,
            home_dir().as_deref(),
            source_folder,
            archive_folder,
            source_name,
        )
    }

    fn resolve_from(
        settings: &Settings,
        current_dir: &Path,
        home: Option<&Path>,
        source_folder: Option<&Path>,
        archive_folder: Option<&Path>,
        source_name: Option<&str>,
    ) -> ShelfResult<Self> {
        let source_folder = match source_folder {
            Some(folder) => normalize(&current_dir.join(expand_home(folder))),
            None => normalize(current_dir),
        };

        let archive_folder = match archive_folder {
            Some(folder) => current_dir.join(expand_home(folder)),
            None => {
                let root = expand_home(&settings.archive_root);
                match home.and_then(|h| source_folder.strip_prefix(h).ok()) {
                    Some(relative) => root.join(relative),
                    None => root
                        .join(OUTSIDE_HOME_FOLDER)
                        .join(source_folder.strip_prefix("/").unwrap_or(&source_folder)),
                }
            }
        };

        let source_name = match source_name {
            Some(name) => name.to_string(),
            None => source_folder
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    ShelfError::Config(format!(
                        "Cannot derive a source name from \"{}\", use --name",
                        source_folder.display()
                    ))
                })?,
        };
        if source_name.is_empty() || source_name.contains('_') {
            return Err(ShelfError::Config(format!(
                "Bad source name \"{}\" (must be non-empty, without underscores)",
                source_name
            )));
        }

        Ok(Self {
            source_folder,
            archive_folder,
            source_name,
        })
    }
}

/// Remove `.` and `..` components without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            archive_root: PathBuf::from("/backups"),
            ..Settings::default()
        }
    }

    #[test]
    fn test_defaults_under_home() {
        let spec = CatalogSpec::resolve_from(
            &settings(),
            Path::new("/home/me/work/proj"),
            Some(Path::new("/home/me")),
            None,
            None,
            None,
        )
        .unwrap();

        assert_eq!(spec.source_folder, PathBuf::from("/home/me/work/proj"));
        assert_eq!(spec.archive_folder, PathBuf::from("/backups/work/proj"));
        assert_eq!(spec.source_name, "proj");
    }

    #[test]
    fn test_source_outside_home() {
        let spec = CatalogSpec::resolve_from(
            &settings(),
            Path::new("/home/me"),
            Some(Path::new("/home/me")),
            Some(Path::new("/srv/data/../site")),
            None,
            None,
        )
        .unwrap();

        assert_eq!(spec.source_folder, PathBuf::from("/srv/site"));
        assert_eq!(spec.archive_folder, PathBuf::from("/backups/__ROOT__/srv/site"));
        assert_eq!(spec.source_name, "site");
    }

    #[test]
    fn test_explicit_values() {
        let spec = CatalogSpec::resolve_from(
            &settings(),
            Path::new("/home/me"),
            Some(Path::new("/home/me")),
            Some(Path::new("proj")),
            Some(Path::new("/mnt/usb/proj")),
            Some("nightly"),
        )
        .unwrap();

        assert_eq!(spec.source_folder, PathBuf::from("/home/me/proj"));
        assert_eq!(spec.archive_folder, PathBuf::from("/mnt/usb/proj"));
        assert_eq!(spec.source_name, "nightly");
    }

    #[test]
    fn test_bad_source_name() {
        let err = CatalogSpec::resolve_from(
            &settings(),
            Path::new("/home/me"),
            None,
            Some(Path::new("/srv/my_site")),
            None,
            None,
        )
        .unwrap_err();
        assert!(err.is_config());
    }
}
