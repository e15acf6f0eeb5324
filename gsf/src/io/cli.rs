use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// One or more planning requests, solved in parallel
    #[arg(short, long, value_name = "FILE", num_args = 1.., required = true)]
    pub input_file: Vec<PathBuf>,
    /// Receives `sol_<stem>.json` and `sol_<stem>.svg` for every request
    #[arg(short, long, value_name = "FOLDER")]
    pub solution_folder: PathBuf,
    /// Optimizer configuration (JSON), defaults are used when omitted
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
}
