use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::models::ChapterIndex;

#[derive(Parser, Debug)]
#[clap(
    name = "surah",
    version,
    about = "Read the chapters of the Quran one surah at a time in your terminal.",
    long_about = None
)]
pub struct Cli {
    /// Chapter to open (1-114)
    #[clap(name = "CHAPTER", default_value = "1")]
    pub chapter: ChapterIndex,

    /// Print the chapter as plain text instead of starting the reader
    #[clap(short, long)]
    pub dump: bool,

    /// Use a specific configuration file
    #[clap(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog endpoint, overrides the configured one
    #[clap(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds, overrides the configured one
    #[clap(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Wrap width for --dump output
    #[clap(short, long, value_name = "COLUMNS")]
    pub width: Option<usize>,

    /// Increase verbosity (-v, -vv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Enable debug output
    #[clap(long)]
    pub debug: bool,
}
