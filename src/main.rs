mod cli;
mod error;
mod file_utils;
mod logger;
mod metadata;
mod walker;

#[cfg(test)]
mod test_support;

use crate::{
    cli::{Cli, RunConfig},
    logger::Logger,
    walker::Summary,
};
use clap::Parser;
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();
    let config = RunConfig::from_cli(&cli);
    let logger = Logger::console(config.log);

    // Per-target failures are logged, never turned into an exit code.
    run(&cli.directories, &config, &logger);
}

/// Outcome of a whole invocation
#[derive(Debug, Default, PartialEq, Eq)]
struct Report {
    processed: usize,
    rejected: usize,
    summary: Summary,
}

fn run(targets: &[PathBuf], config: &RunConfig, logger: &Logger) -> Report {
    let mut report = Report::default();

    for arg in targets {
        let path = match file_utils::resolve_target(arg) {
            Ok(path) => path,
            Err(err) => {
                logger.error(&format!("Error: {err}"), err.path());
                report.rejected += 1;
                continue;
            }
        };

        logger.target_start(&path);
        report.summary += walker::tag_tree(&path, config.tag_version, logger);
        logger.target_complete(arg, &path);
        report.processed += 1;
    }

    logger.info(&format!(
        "{} of {} directories processed: {} files tagged, {} failed.",
        report.processed,
        targets.len(),
        report.summary.tagged,
        report.summary.failed
    ));

    report
}
