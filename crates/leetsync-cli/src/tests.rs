use std::path::PathBuf;

use clap::Parser;
use leetsync_core::models::{Difficulty, RecordEntry};
use leetsync_core::store::RecordStore;
use leetsync_core::sync::SyncReport;
use pretty_assertions::assert_eq;

use crate::cli::{Cli, Commands, CompletionShell};
use crate::commands::completions::{render_completions, run_completions};
use crate::commands::index::run_index;
use crate::commands::sync::format_report;
use crate::error::CliError;

#[test]
fn repo_defaults_to_current_directory() {
    let cli = Cli::try_parse_from(["leetsync", "index"]).unwrap();
    assert_eq!(cli.repo, PathBuf::from("."));
    assert!(matches!(cli.command, Commands::Index));
}

#[test]
fn sync_flags_parse_after_subcommand() {
    let cli = Cli::try_parse_from([
        "leetsync",
        "sync",
        "--no-push",
        "--request-delay-ms",
        "250",
        "--repo",
        "/tmp/archive",
    ])
    .unwrap();

    assert_eq!(cli.repo, PathBuf::from("/tmp/archive"));
    match cli.command {
        Commands::Sync {
            no_push,
            request_delay_ms,
        } => {
            assert!(no_push);
            assert_eq!(request_delay_ms, Some(250));
        }
        _ => panic!("expected sync command"),
    }
}

#[test]
fn sync_pushes_by_default() {
    let cli = Cli::try_parse_from(["leetsync", "sync"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Sync {
            no_push: false,
            request_delay_ms: None
        }
    ));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["leetsync"]).is_err());
}

#[test]
fn completions_reject_unknown_shell() {
    assert!(Cli::try_parse_from(["leetsync", "completions", "powershell"]).is_err());
}

#[test]
fn completions_mention_binary_and_subcommands() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("leetsync"));
    assert!(script.contains("sync"));
    assert!(script.contains("scrape"));
}

#[test]
fn completions_write_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leetsync.fish");

    run_completions(CompletionShell::Fish, Some(&path)).unwrap();

    let script = std::fs::read_to_string(&path).unwrap();
    assert!(script.contains("complete -c leetsync"));
}

#[test]
fn index_regenerates_readme_from_records() {
    let dir = tempfile::tempdir().unwrap();
    RecordStore::in_repo(dir.path())
        .save(&[
            RecordEntry::new(
                2,
                "Add Two Numbers",
                "add-two-numbers",
                Difficulty::Medium,
                vec!["Math".to_string()],
            ),
            RecordEntry::new(1, "Two Sum", "two-sum", Difficulty::Easy, Vec::new()),
        ])
        .unwrap();

    run_index(dir.path()).unwrap();

    let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.contains("Total-2-blue"));
    let first_row = readme.find("| 0001 |").unwrap();
    let second_row = readme.find("| 0002 |").unwrap();
    assert!(first_row < second_row);
}

#[test]
fn index_rejects_missing_repository() {
    let dir = tempfile::tempdir().unwrap();
    let error = run_index(&dir.path().join("missing")).unwrap_err();
    assert!(matches!(error, CliError::NotADirectory(_)));
}

#[test]
fn format_report_distinguishes_no_op_runs() {
    assert_eq!(
        format_report(&SyncReport {
            scraped: 4,
            committed: 0,
            skipped: 4,
            records_added: 0,
        }),
        "Already up to date (4 solved problems)"
    );
    assert_eq!(
        format_report(&SyncReport {
            scraped: 4,
            committed: 2,
            skipped: 2,
            records_added: 1,
        }),
        "Committed 2 new submissions (2 already synced, 1 new problems)"
    );
}
