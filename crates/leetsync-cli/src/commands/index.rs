use std::path::Path;

use leetsync_core::store::{self, RecordStore, INDEX_FILE};

use crate::error::CliError;

/// Rewrite the index from the stored records without touching git.
pub fn run_index(repo: &Path) -> Result<(), CliError> {
    if !repo.is_dir() {
        return Err(CliError::NotADirectory(repo.display().to_string()));
    }

    let entries = RecordStore::in_repo(repo).load()?;
    store::write_index(repo, &entries)?;
    println!(
        "Wrote {} ({} problems)",
        repo.join(INDEX_FILE).display(),
        entries.len()
    );
    Ok(())
}
