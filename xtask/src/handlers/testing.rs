use crate::services::utils::{get_project_root, normalize_project_name, run_command};

/// `cargo` arguments selecting the workspace or a single crate.
fn target_args(project: Option<&str>) -> Vec<String> {
    match project {
        None | Some("all") => vec!["--workspace".into()],
        Some(project) => vec!["-p".into(), normalize_project_name(project)],
    }
}

/// Runs tests in the workspace or a specific crate.
///
/// The web app only builds for `wasm32`, so a workspace run excludes it.
///
/// # Errors
/// Returns an error if the test run fails or the test runner is not found.
pub fn run_tests(project: Option<&str>) -> anyhow::Result<()> {
    let targets = target_args(project);
    let is_workspace = targets.first().is_some_and(|arg| arg == "--workspace");

    println!("🧪 Running {} tests...", if is_workspace { "workspace" } else { "crate" });
    let has_nextest = std::process::Command::new("cargo-nextest").arg("--version").output().is_ok();

    let mut args: Vec<String> =
        if has_nextest { vec!["nextest".into(), "run".into()] } else { vec!["test".into()] };
    args.extend(targets);
    if is_workspace {
        args.extend(["--exclude".into(), "noah-web".into()]);
    }

    if has_nextest {
        args.extend(
            ["--failure-output", "immediate-final", "--success-output", "never", "--status-level", "skip"]
                .into_iter()
                .map(String::from),
        );
    } else {
        args.extend(["--", "-q"].into_iter().map(String::from));
    }

    println!("🧪 Running tests via '{}'...", if has_nextest { "nextest" } else { "cargo test" });
    run_command("cargo", &args, &get_project_root()?)
}

/// Runs doc tests in the workspace or a specific crate.
///
/// # Errors
/// Returns an error if the doctest run fails.
pub fn run_doctests(project: Option<&str>) -> anyhow::Result<()> {
    let targets = target_args(project);
    let is_workspace = targets.first().is_some_and(|arg| arg == "--workspace");

    println!("📚 Running {} doc tests...", if is_workspace { "workspace" } else { "crate" });

    let mut args: Vec<String> = vec!["test".into(), "--doc".into()];
    args.extend(targets);
    if is_workspace {
        args.extend(["--exclude".into(), "noah-web".into()]);
    }

    run_command("cargo", &args, &get_project_root()?)
}
