use clap::{Parser, ValueEnum};
use id3::Version;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "foldertag")]
#[command(version)]
#[command(about = "Set the album tag of MP3 files from the name of the folder they live in")]
pub struct Cli {
    /// One or more directories to process
    #[arg(required = true)]
    pub directories: Vec<PathBuf>,

    /// Only print warnings and errors
    #[arg(long, short, default_value_t = false, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also print a line for every tagged file
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,

    /// Console output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long = "no-color", default_value_t = false)]
    pub no_color: bool,

    /// Write ID3v2.3 tags (for older players) instead of ID3v2.4
    #[arg(long = "id3v23", default_value_t = false)]
    pub id3v23: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Logger settings derived from CLI flags
#[derive(Clone, Copy, Debug)]
pub struct LogConfig {
    pub quiet: bool,
    pub verbose: bool,
    pub color: bool,
    pub output_format: OutputFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            verbose: false,
            color: false,
            output_format: OutputFormat::Text,
        }
    }
}

/// Runtime configuration derived from CLI flags
#[derive(Clone, Copy, Debug)]
pub struct RunConfig {
    pub log: LogConfig,
    pub tag_version: Version,
}

impl RunConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let color = !cli.no_color
            && cli.format == OutputFormat::Text
            && std::io::stdout().is_terminal();

        Self {
            log: LogConfig {
                quiet: cli.quiet,
                verbose: cli.verbose,
                color,
                output_format: cli.format,
            },
            tag_version: if cli.id3v23 {
                Version::Id3v23
            } else {
                Version::Id3v24
            },
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            tag_version: Version::Id3v24,
        }
    }
}
