//! # CLI Argument Definitions
//!
//! This module defines the command-line interface (CLI) structure using the `clap` crate.

use clap::{Parser, Subcommand};

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "cargo xtask")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Developer toolkit for the Noah workspace")]
pub struct Cli {
    /// Print debug logs (branch lookup steps, spawned commands) to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The main subcommand to execute.
    #[command(subcommand)]
    pub command: AppCommands,
}

/// Enumeration of available application subcommands.
#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Print the current branch as build scripts see it ('<detached>' if unknown)
    Branch {},
    /// Print the version label embedded into the web app
    Info {},
    /// Serve the web app with hot reload (`dx serve`)
    Serve {
        /// Port for the dev server
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
    /// Build a release bundle of the web app (`dx bundle --release`)
    Bundle {},
    /// Run tests (workspace by default)
    Test {
        /// Run tests for a specific crate (auto-prefixes with 'noah-' if missing)
        project: Option<String>,
    },
    /// Run doc tests (workspace by default)
    Doctest {
        /// Run doc tests for a specific crate (auto-prefixes with 'noah-' if missing)
        project: Option<String>,
    },
}
