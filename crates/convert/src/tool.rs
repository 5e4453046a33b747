//! Running external converters.

use slides_core::{Error, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run `program` with `args` to completion.
///
/// Arguments are passed directly, never through a shell. A failed exit is
/// reported with whatever the tool printed.
pub(crate) fn run<I, S>(program: &Path, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let tool = program.display().to_string();
    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null());
    log::debug!("Running {:?}", command);

    let output = command.output().map_err(|source| Error::ToolSpawn {
        tool: tool.clone(),
        source,
    })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let diagnostics = if !stderr.is_empty() {
            stderr.to_string()
        } else if !stdout.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            "no diagnostic output".to_string()
        };
        return Err(Error::ToolFailed {
            tool,
            status: output.status,
            diagnostics,
        });
    }

    if !stderr.is_empty() {
        log::warn!("{} warning: {}", tool, stderr);
    }

    Ok(())
}

/// Create `dir` and its parents if needed.
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::OutputDirectory {
        path: dir.to_path_buf(),
        source,
    })
}
