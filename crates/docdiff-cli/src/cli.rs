use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docdiff",
    about = "Compare documents line by line or character by character",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file; engine settings go under `[diff]`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Largest gap, in chars, bridged when merging text differences
    #[arg(long, global = true)]
    pub max_gap: Option<usize>,

    /// Similarity above which a replaced line counts as modified
    #[arg(long, global = true)]
    pub threshold: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two documents line by line
    Lines(PairArgs),
    /// Compare two text files character by character
    Text(PairArgs),
    /// Print the similarity ratio of two strings
    Similarity(SimilarityArgs),
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct PairArgs {
    pub file1: PathBuf,
    pub file2: PathBuf,
}

#[derive(Args)]
pub struct SimilarityArgs {
    pub a: String,
    pub b: String,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on, overriding the configuration file
    #[arg(long)]
    pub bind: Option<String>,
}
