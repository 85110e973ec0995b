//! Helpers for `build.rs` scripts that embed build metadata.

use crate::branch::{
    BRANCH_ENV_VARS, CI_VAR, DISABLE_GIT_VAR, EnvSource, GitQuery, resolve_branch,
};
use std::path::{Path, PathBuf};

pub const BRANCH_ENV_OUT: &str = "NOAH_GIT_BRANCH";
pub const VERSION_ENV_OUT: &str = "NOAH_BUILD_VERSION";
pub const LABEL_ENV_OUT: &str = "NOAH_BUILD_LABEL";

/// Metadata about the build currently running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: String,
    /// See [`resolve_branch`] for the meaning of `None` vs `Some("")`.
    pub branch: Option<String>,
    /// `.git/HEAD` of the enclosing repository, if one was found.
    pub head_file: Option<PathBuf>,
}

impl BuildInfo {
    /// Collects metadata from inside a build script.
    ///
    /// Cargo provides `CARGO_PKG_VERSION` and `CARGO_MANIFEST_DIR` to build scripts.
    pub fn collect<E, G>(env: &E, git: &G) -> Self
    where
        E: EnvSource + ?Sized,
        G: GitQuery + ?Sized,
    {
        let version = env.var("CARGO_PKG_VERSION").unwrap_or_default();
        let head_file =
            env.var("CARGO_MANIFEST_DIR").and_then(|dir| find_git_head(Path::new(&dir)));
        Self { version, branch: resolve_branch(env, git), head_file }
    }

    /// `"<version>"`, or `"<version> (<branch>)"` when a branch is known.
    #[must_use]
    pub fn version_label(&self) -> String {
        match self.branch.as_deref() {
            Some(branch) if !branch.is_empty() => format!("{} ({branch})", self.version),
            _ => self.version.clone(),
        }
    }

    /// The `cargo:` directives [`BuildInfo::emit_cargo_env`] prints.
    ///
    /// Values come from the environment, so control characters are replaced
    /// with spaces: each directive stays on exactly one line.
    #[must_use]
    pub fn cargo_directives(&self) -> Vec<String> {
        let branch = single_line(self.branch.as_deref().unwrap_or(""));
        let mut lines = vec![
            format!("cargo:rustc-env={BRANCH_ENV_OUT}={branch}"),
            format!("cargo:rustc-env={VERSION_ENV_OUT}={}", single_line(&self.version)),
            format!("cargo:rustc-env={LABEL_ENV_OUT}={}", single_line(&self.version_label())),
        ];

        lines.extend(
            BRANCH_ENV_VARS
                .iter()
                .chain([&DISABLE_GIT_VAR, &CI_VAR])
                .map(|name| format!("cargo:rerun-if-env-changed={name}")),
        );

        if let Some(head) = &self.head_file {
            let head = single_line(&head.display().to_string());
            lines.push(format!("cargo:rerun-if-changed={head}"));
        }

        lines
    }

    /// Prints the directives to stdout, where cargo picks them up.
    #[allow(clippy::print_stdout)]
    pub fn emit_cargo_env(&self) {
        for line in self.cargo_directives() {
            println!("{line}");
        }
    }
}

fn single_line(value: &str) -> String {
    value.chars().map(|c| if c.is_control() { ' ' } else { c }).collect()
}

/// Walks up from `start` looking for `.git/HEAD`.
///
/// Worktrees and submodules use a `.git` file instead of a directory; those are
/// skipped, so branch switches there only trigger a rebuild through env changes.
#[must_use]
pub fn find_git_head(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(".git").join("HEAD")).find(|head| head.is_file())
}
