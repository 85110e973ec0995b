use assert_cmd::Command;
use noah_buildinfo::BRANCH_ENV_VARS;
use predicates::prelude::*;

/// `xtask` with every branch-carrying CI variable cleared.
fn xtask() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_xtask"));
    for name in BRANCH_ENV_VARS {
        cmd.env_remove(name);
    }
    cmd.env_remove("DISABLE_GIT").env_remove("CI").env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_arguments_prints_help() {
    xtask().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn branch_prefers_ci_variables() {
    xtask()
        .arg("branch")
        .env("GIT_BRANCH", "develop")
        .env("BRANCH_NAME", "  feature/login ")
        .assert()
        .success()
        .stdout("feature/login\n");
}

#[test]
fn branch_is_blank_when_git_is_disabled() {
    xtask().arg("branch").env("DISABLE_GIT", "1").assert().success().stdout("\n");
    xtask().arg("branch").env("CI", "true").assert().success().stdout("\n");
}

#[test]
fn info_appends_the_branch_to_the_version() {
    let expected = format!("{} (release/2.0)\n", env!("CARGO_PKG_VERSION"));
    xtask().arg("info").env("GITHUB_REF_NAME", "release/2.0").assert().success().stdout(expected);

    let bare = format!("{}\n", env!("CARGO_PKG_VERSION"));
    xtask().arg("info").env("CI", "true").assert().success().stdout(bare);
}

#[test]
fn verbose_logs_go_to_stderr_only() {
    xtask()
        .args(["--verbose", "branch"])
        .env("BRANCH_NAME", "main")
        .assert()
        .success()
        .stdout("main\n")
        .stderr(predicate::str::contains("Branch resolved from environment"));
}
