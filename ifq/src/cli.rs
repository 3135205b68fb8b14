use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
pub struct Cli {
    /// JSON corpus file: an object with `targets` and/or `connections`
    /// maps of identifier to record.
    pub corpus: PathBuf,
    #[clap(long)]
    /// Print the search-guide trees after loading and exit.
    pub guide: bool,
}
