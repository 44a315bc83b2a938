//! Assigns homeowners to neighborhoods and ranks them by compatibility score.
//!
//! The pipeline is parse → assign → report:
//!
//! ```
//! use homematch::{run, config::MatchConfig};
//!
//! let input = "\
//! N N0 E:1 W:2 R:3
//! H H0 E:1 W:1 R:1 N0
//! ";
//! let report = run(input, &MatchConfig::default()).unwrap();
//! assert_eq!(report.to_string(), "N0: H0(6)");
//! ```

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

pub mod assign;
pub mod cache;
pub mod config;
pub mod model;
pub mod parse;
pub mod report;

use assign::AssignError;
use config::{ConfigError, MatchConfig};
use parse::ParseError;
use report::Report;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Assign(#[from] AssignError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
}

/// Runs the whole pipeline over already-read input text.
pub fn run(input: &str, config: &MatchConfig) -> Result<Report, Error> {
    config.validate()?;
    let attributes = config.attribute_set();
    let mut roster = parse::parse(input, &attributes)?;
    assign::assign(&mut roster, config.strategy)?;
    let report = Report::build(&roster);
    info!(lines = report.lines.len(), "report ready");
    Ok(report)
}

/// Reads `config.input` and runs the pipeline over it.
pub fn run_file(config: &MatchConfig) -> Result<Report, Error> {
    let input = std::fs::read_to_string(&config.input)
        .map_err(|source| Error::Io { path: config.input.clone(), source })?;
    info!(path = %config.input.display(), bytes = input.len(), "read input");
    run(&input, config)
}
