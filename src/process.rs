//! External program collaborators
//!
//! Archive methods describe their work as an argument list; this module turns
//! that list into a shell command line, runs it, and locates optional programs
//! such as `pv` or parallel compressors.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::error::{ShelfError, ShelfResult};

/// Shell operators that are emitted without quoting
const SHELL_OPERATORS: &[&str] = &["|", ">", ">>", "<", "&&", "||"];

/// Join command arguments into a single shell command string
///
/// Arguments containing characters the shell would interpret are wrapped in
/// single quotes. Pipe and redirection operators pass through unchanged.
pub fn shell_command_string<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| quote_argument(arg.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_argument(arg: &str) -> String {
    if SHELL_OPERATORS.contains(&arg) {
        return arg.to_string();
    }
    if arg.is_empty() {
        return "''".to_string();
    }
    let safe = arg
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_./=@%+:,".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Runs a shell command line to completion
pub trait CommandRunner {
    /// Run `command` through the shell with `working_dir` as current directory
    fn run(&self, command: &str, working_dir: &Path) -> ShelfResult<ExitStatus>;
}

/// `CommandRunner` backed by `bash -c`
///
/// Pipelines run with `pipefail`, so a failing stage fails the whole command.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, working_dir: &Path) -> ShelfResult<ExitStatus> {
        debug!(command, dir = %working_dir.display(), "running shell command");
        Command::new("bash")
            .arg("-c")
            .arg(format!("set -o pipefail; {}", command))
            .current_dir(working_dir)
            .status()
            .map_err(|e| ShelfError::Io(format!("Failed to start shell: {}", e)))
    }
}

/// Looks up programs available to the shell
pub trait ProgramLocator {
    /// Full path of `name`, or `None` when it is not installed
    fn find_program(&self, name: &str) -> Option<PathBuf>;
}

/// `ProgramLocator` that searches `PATH`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPrograms;

impl ProgramLocator for SystemPrograms {
    fn find_program(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }
}

/// Pick the first installed program among `alternatives`
pub fn choose_program(
    locator: &dyn ProgramLocator,
    alternatives: &[&str],
) -> ShelfResult<String> {
    alternatives
        .iter()
        .find(|name| locator.find_program(name).is_some())
        .map(|name| name.to_string())
        .ok_or_else(|| {
            ShelfError::Config(format!(
                "None of the required programs is installed: {}",
                alternatives.join(", ")
            ))
        })
}
