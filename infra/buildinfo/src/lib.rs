//! # Build Info
//!
//! Best-effort build metadata for build scripts and developer tooling.
//!
//! The main entry point is [`resolve_branch`], a lookup of the current
//! source-control branch that consults CI variables first and falls back to
//! `git`. It never fails a build: every error becomes an empty label.
//!
//! ## Example (`build.rs`)
//!
//! ```rust,no_run
//! use noah_buildinfo::{BuildInfo, GitCli, ProcessEnv};
//!
//! BuildInfo::collect(&ProcessEnv, &GitCli::new()).emit_cargo_env();
//! ```

mod branch;
pub mod cargo;
mod error;

pub use crate::branch::{
    BRANCH_ENV_VARS, CI_VAR, DETACHED_HEAD, DISABLE_GIT_VAR, EnvSource, GitCli, GitQuery,
    ProcessEnv, current_branch, resolve_branch,
};
pub use crate::cargo::BuildInfo;
pub use crate::error::{BuildInfoError, BuildInfoErrorExt};
