use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bdselect",
    about = "Pick the main feature playlist of a Blu-ray disc",
    long_about = None,
    version,
    arg_required_else_help = true,
)]
pub struct Args {
    /// Disc root, BDMV directory, index.bdmv or a file inside BDMV
    pub path: PathBuf,

    /// Path to TOML settings file (overrides default search: ./bdselect.toml, ~/.config/bdselect/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// List every candidate playlist instead of prompting
    #[arg(short, long)]
    pub all: bool,
}
