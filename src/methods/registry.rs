//! Named archive method table
//!
//! Built once at startup and passed by reference to everything that needs to
//! resolve a method name or find the method owning a path.

use std::path::Path;

use super::{ArchiveMethod, AssumedType};
use crate::error::{ShelfError, ShelfResult};

/// A method together with the name users select it by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredMethod {
    pub name: String,
    pub method: ArchiveMethod,
}

/// Ordered, read-only map from method name to method
///
/// Path lookups try methods in registration order and the first match wins.
#[derive(Debug, Clone)]
pub struct MethodRegistry {
    methods: Vec<RegisteredMethod>,
}

impl MethodRegistry {
    /// Build a registry from `(name, method)` pairs, keeping their order
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, ArchiveMethod)>,
        S: Into<String>,
    {
        Self {
            methods: entries
                .into_iter()
                .map(|(name, method)| RegisteredMethod {
                    name: name.into(),
                    method,
                })
                .collect(),
        }
    }

    /// The standard method set
    pub fn builtin() -> Self {
        Self::new([
            ("files", ArchiveMethod::Sync),
            ("gz", ArchiveMethod::Gz),
            ("xz", ArchiveMethod::Xz),
            ("zip", ArchiveMethod::Zip),
        ])
    }

    /// Look up a method by name
    pub fn get(&self, name: &str) -> Option<&RegisteredMethod> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Look up a method by name, failing with a configuration error
    pub fn resolve(&self, name: &str) -> ShelfResult<&RegisteredMethod> {
        self.get(name)
            .ok_or_else(|| ShelfError::unknown_method(name, &self.names()))
    }

    /// Find the first method that claims `path`
    pub fn find_for_path(
        &self,
        path: &Path,
        assumed_type: Option<AssumedType>,
    ) -> Option<&RegisteredMethod> {
        self.methods
            .iter()
            .find(|m| m.method.check_supported(path, assumed_type).is_some())
    }

    /// Method names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.iter().map(|m| m.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Iterate methods in registration order
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredMethod> {
        self.methods.iter()
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        let registry = MethodRegistry::builtin();
        assert_eq!(registry.names(), vec!["files", "gz", "xz", "zip"]);
        let order: Vec<&str> = registry.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(order, vec!["files", "gz", "xz", "zip"]);
    }

    #[test]
    fn test_resolve() {
        let registry = MethodRegistry::builtin();
        assert_eq!(registry.resolve("xz").unwrap().method, ArchiveMethod::Xz);

        let err = registry.resolve("rar").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("files, gz, xz, zip"));
    }

    #[test]
    fn test_find_for_path() {
        let registry = MethodRegistry::builtin();
        let found = registry
            .find_for_path(Path::new("/a/b_20200101-000000.tar.gz"), Some(AssumedType::File))
            .unwrap();
        assert_eq!(found.name, "gz");

        let found = registry
            .find_for_path(Path::new("/a/b_20200101-000000"), Some(AssumedType::Folder))
            .unwrap();
        assert_eq!(found.name, "files");

        assert!(registry
            .find_for_path(Path::new("/a/b.txt"), Some(AssumedType::File))
            .is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let registry = MethodRegistry::new([("alpha", ArchiveMethod::Zip), ("beta", ArchiveMethod::Zip)]);
        let found = registry
            .find_for_path(Path::new("x.zip"), Some(AssumedType::File))
            .unwrap();
        assert_eq!(found.name, "alpha");
    }
}
