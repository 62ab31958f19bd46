use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "leetsync")]
#[command(about = "Archive accepted LeetCode solutions into a git repository")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Working tree of the archive repository
    #[arg(long, global = true, value_name = "PATH", default_value = ".")]
    pub repo: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape solved problems and commit new submissions
    Sync {
        /// Commit locally without pushing
        #[arg(long)]
        no_push: bool,
        /// Pause before each problem's requests, in milliseconds
        #[arg(long, value_name = "MS")]
        request_delay_ms: Option<u64>,
    },
    /// Scrape solved problems and print them as JSON
    Scrape {
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Pause before each problem's requests, in milliseconds
        #[arg(long, value_name = "MS")]
        request_delay_ms: Option<u64>,
    },
    /// Regenerate README.md from submissions.json
    Index,
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output file path (defaults to stdout)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
