use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

const CRATE_PREFIX: &str = "noah-";

/// Returns the root directory of the project.
///
/// # Errors
/// Returns an error if the manifest directory does not have a parent.
pub fn get_project_root() -> Result<PathBuf> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .context("Could not find project root from xtask manifest")
}

/// Normalizes a project crate name to the workspace naming convention.
#[must_use]
pub fn normalize_project_name(project: &str) -> String {
    if project.starts_with(CRATE_PREFIX) {
        project.to_owned()
    } else {
        format!("{CRATE_PREFIX}{project}")
    }
}

/// Runs `program` with `args` from `cwd`, inheriting stdio.
///
/// # Errors
/// Returns an error if the program cannot be spawned or exits unsuccessfully.
pub fn run_command(program: &str, args: &[String], cwd: &Path) -> Result<()> {
    debug!(program, ?args, cwd = %cwd.display(), "Spawning");

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .with_context(|| format!("Failed to execute {program}. Is it installed and on PATH?"))?;

    if !status.success() {
        bail!("{program} exited with non-zero status: {}", status.code().unwrap_or(-1));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_bare_crate_names() {
        assert_eq!(normalize_project_name("kernel"), "noah-kernel");
        assert_eq!(normalize_project_name("noah-web"), "noah-web");
    }

    #[test]
    fn project_root_holds_the_workspace_manifest() {
        let root = get_project_root().unwrap();
        assert!(root.join("Cargo.toml").is_file());
        assert!(root.join("xtask").is_dir());
    }
}
