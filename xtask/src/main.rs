#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::disallowed_methods,
    clippy::disallowed_types
)]

pub mod handlers;
pub mod models;
pub mod services;

use crate::handlers::{build_info, testing, web};
use crate::models::args::{AppCommands, Cli};

use anyhow::Result;
use clap::Parser;
use noah_logger::{LevelFilter, Logger};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let _logger = Logger::builder("xtask").level(level).init()?;

    match cli.command {
        AppCommands::Branch {} => build_info::print_branch(),
        AppCommands::Info {} => build_info::print_info(),
        AppCommands::Serve { port } => web::serve(port)?,
        AppCommands::Bundle {} => web::bundle()?,
        AppCommands::Test { project } => testing::run_tests(project.as_deref())?,
        AppCommands::Doctest { project } => testing::run_doctests(project.as_deref())?,
    }

    Ok(())
}
