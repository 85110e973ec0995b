use noah_buildinfo::{BuildInfo, current_branch};

/// Shown by `branch` when the lookup cannot name a branch (detached HEAD).
pub const DETACHED_LABEL: &str = "<detached>";

/// Prints the branch exactly as build scripts resolve it.
///
/// An intentionally blank branch (git disabled, lookup failure) prints an empty line.
pub fn print_branch() {
    println!("{}", current_branch().as_deref().unwrap_or(DETACHED_LABEL));
}

/// Prints the version label the web footer embeds.
pub fn print_info() {
    let info = BuildInfo {
        version: env!("CARGO_PKG_VERSION").to_owned(),
        branch: current_branch(),
        head_file: None,
    };
    println!("{}", info.version_label());
}
