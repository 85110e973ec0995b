use crate::services::utils::{get_project_root, run_command};
use anyhow::Result;

const WEB_PACKAGE: &str = "noah-web";

/// Serves the web app with the Dioxus CLI.
///
/// # Errors
/// Returns an error if `dx` is missing or the dev server exits with a failure.
pub fn serve(port: u16) -> Result<()> {
    println!("🌐 Serving {WEB_PACKAGE} on port {port}...");
    let args = ["serve", "--package", WEB_PACKAGE, "--platform", "web", "--port"]
        .into_iter()
        .map(String::from)
        .chain([port.to_string()])
        .collect::<Vec<_>>();
    run_command("dx", &args, &get_project_root()?)
}

/// Builds an optimized release bundle of the web app.
///
/// # Errors
/// Returns an error if `dx` is missing or the bundle fails.
pub fn bundle() -> Result<()> {
    println!("📦 Bundling {WEB_PACKAGE} for release...");
    let args = ["bundle", "--release", "--package", WEB_PACKAGE, "--platform", "web"]
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();
    run_command("dx", &args, &get_project_root()?)?;
    println!("✅ Bundle ready");
    Ok(())
}
