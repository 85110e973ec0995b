use crate::error::{BuildInfoError, BuildInfoErrorExt};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// CI and container variables that carry the branch name, highest priority first.
pub const BRANCH_ENV_VARS: [&str; 5] =
    ["BRANCH_NAME", "GIT_BRANCH", "CI_COMMIT_BRANCH", "GITHUB_REF_NAME", "BUILD_SOURCEBRANCHNAME"];

/// Set to `1` to forbid invoking git (sandboxed or networkless builds).
pub const DISABLE_GIT_VAR: &str = "DISABLE_GIT";

/// Set to `true` by most CI providers; also forbids invoking git.
pub const CI_VAR: &str = "CI";

/// Output of `git rev-parse --abbrev-ref HEAD` on a detached HEAD.
pub const DETACHED_HEAD: &str = "HEAD";

/// Read access to environment variables.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The ambient process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Synchronous version-control query for the current branch.
pub trait GitQuery {
    /// Raw output of the abbreviated-ref query (untrimmed).
    ///
    /// # Errors
    /// Any failure to run the tool or a non-zero exit.
    fn abbrev_ref_head(&self) -> Result<String, BuildInfoError>;
}

/// Runs `git rev-parse --abbrev-ref HEAD` as a blocking subprocess, with no timeout.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    dir: Option<PathBuf>,
}

impl GitCli {
    #[must_use]
    pub const fn new() -> Self {
        Self { dir: None }
    }

    /// Runs git from `dir` instead of the current working directory.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: Some(dir.into()) }
    }
}

impl GitQuery for GitCli {
    fn abbrev_ref_head(&self) -> Result<String, BuildInfoError> {
        let mut command = Command::new("git");
        command.args(["rev-parse", "--abbrev-ref", "HEAD"]);
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }

        let output = command.output().context("Spawning git rev-parse")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BuildInfoError::Exit {
                message: format!("{} ({})", stderr.trim(), output.status).into(),
                context: Some("git rev-parse --abbrev-ref HEAD".into()),
            });
        }

        String::from_utf8(output.stdout).context("Decoding git rev-parse output")
    }
}

/// Resolves a human-readable label for the current branch. Never fails.
///
/// 1. The first of [`BRANCH_ENV_VARS`] that is non-empty after trimming wins.
/// 2. `DISABLE_GIT=1` or `CI=true` yields `Some("")` without running git.
/// 3. Otherwise git is asked: a detached `HEAD` yields `None`, any failure
///    yields `Some("")`, anything else is returned trimmed.
///
/// `None` means "unknown", `Some("")` means "intentionally blank".
///
/// ```rust
/// use noah_buildinfo::{BuildInfoError, GitQuery, resolve_branch};
/// use std::collections::HashMap;
///
/// struct NoGit;
/// impl GitQuery for NoGit {
///     fn abbrev_ref_head(&self) -> Result<String, BuildInfoError> {
///         Err("git is not installed".into())
///     }
/// }
///
/// let env = HashMap::from([("GITHUB_REF_NAME".to_owned(), " release/1.2 ".to_owned())]);
/// assert_eq!(resolve_branch(&env, &NoGit).as_deref(), Some("release/1.2"));
///
/// let empty: HashMap<String, String> = HashMap::new();
/// assert_eq!(resolve_branch(&empty, &NoGit).as_deref(), Some(""));
/// ```
pub fn resolve_branch<E, G>(env: &E, git: &G) -> Option<String>
where
    E: EnvSource + ?Sized,
    G: GitQuery + ?Sized,
{
    for name in BRANCH_ENV_VARS {
        if let Some(value) = env.var(name) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                debug!(var = name, branch = trimmed, "Branch resolved from environment");
                return Some(trimmed.to_owned());
            }
        }
    }

    if git_disabled(env) {
        debug!("Branch lookup via git disabled by environment");
        return Some(String::new());
    }

    match git.abbrev_ref_head() {
        Ok(raw) => {
            let branch = raw.trim();
            if branch == DETACHED_HEAD {
                debug!("Detached HEAD, branch unknown");
                None
            } else {
                debug!(branch, "Branch resolved from git");
                Some(branch.to_owned())
            }
        },
        Err(err) => {
            debug!(error = %err, "git branch lookup failed, using an empty branch");
            Some(String::new())
        },
    }
}

/// [`resolve_branch`] against the process environment and the `git` binary.
#[must_use]
pub fn current_branch() -> Option<String> {
    resolve_branch(&ProcessEnv, &GitCli::new())
}

fn git_disabled<E: EnvSource + ?Sized>(env: &E) -> bool {
    env.var(DISABLE_GIT_VAR).as_deref() == Some("1") || env.var(CI_VAR).as_deref() == Some("true")
}
