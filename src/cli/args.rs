use crate::constants::verbosity;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// CLI for tmplgroups.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render one template of one group to stdout.
    Render(RenderArgs),
    /// Build every group and list the templates each one holds.
    List(SourceArgs),
    /// List every file found under the base path.
    Files(SourceArgs),
}

impl Commands {
    pub fn verbose(&self) -> u8 {
        match self {
            Commands::Render(args) => args.source.verbose,
            Commands::List(args) | Commands::Files(args) => args.verbose,
        }
    }
}

/// Where templates are read from.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Directory holding the shared templates and the subdirectories.
    #[arg(short, long = "base-path", value_name = "DIR")]
    pub base_path: Option<PathBuf>,

    /// Subdirectory of the base path to build as a group (repeatable).
    #[arg(short = 's', long = "sub-dir", value_name = "NAME")]
    pub sub_dirs: Vec<String>,

    /// Template file extension [default: html].
    #[arg(short, long)]
    pub extension: Option<String>,

    /// JSON or YAML file providing defaults for these options.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Group to render from; `""` is the base directory.
    #[arg(value_name = "GROUP")]
    pub group: String,

    /// Template name, with or without the extension.
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Data for the template as a JSON string, or `-` to read it from stdin.
    #[arg(short, long)]
    pub data: Option<String>,

    /// Render with the development flag set.
    #[arg(long)]
    pub development: bool,

    /// Render with the use-local-files flag set.
    #[arg(long = "use-local-files")]
    pub use_local_files: bool,

    /// Cache-busting pair `ORIGINAL=BUSTED` (repeatable).
    #[arg(long = "cache-bust", value_name = "ORIGINAL=BUSTED", value_parser = parse_pair)]
    pub cache_bust: Vec<(String, String)>,
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((original, busted)) if !original.is_empty() && !busted.is_empty() => {
            Ok((original.to_string(), busted.to_string()))
        }
        _ => Err(format!("expected ORIGINAL=BUSTED, got '{s}'")),
    }
}

/// Parse command line arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
