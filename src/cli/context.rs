//! State shared by the command handlers

use std::io::{self, BufRead, Write};

use crate::catalog::TimestampMatcher;
use crate::config::{ShelfPaths, Settings};
use crate::error::{ShelfError, ShelfResult};
use crate::methods::MethodRegistry;

/// Everything a command handler needs besides its own arguments
pub struct AppContext {
    pub paths: ShelfPaths,
    pub settings: Settings,
    pub registry: MethodRegistry,
    pub matcher: TimestampMatcher,
    /// Report what would happen without changing anything
    pub dry_run: bool,
    pub verbose: bool,
}

impl AppContext {
    pub fn new(
        paths: ShelfPaths,
        settings: Settings,
        dry_run: bool,
        verbose: bool,
    ) -> ShelfResult<Self> {
        let matcher = settings.timestamp_matcher()?;
        Ok(Self {
            paths,
            settings,
            registry: MethodRegistry::builtin(),
            matcher,
            dry_run,
            verbose,
        })
    }
}

/// Ask a yes/no question on stdin; anything but `y` or `yes` means no
pub fn confirm(question: &str) -> ShelfResult<bool> {
    print!("{} [y/N]: ", question);
    io::stdout()
        .flush()
        .map_err(|e| ShelfError::Io(e.to_string()))?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|e| ShelfError::Io(e.to_string()))?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }
}
