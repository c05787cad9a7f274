use std::path::PathBuf;

use crate::core::FilterStats;

/// What happened to one stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Comments were (or, in dry-run, would be) removed.
    Changed { path: PathBuf, stats: FilterStats },
    /// Nothing to remove.
    Unchanged { path: PathBuf, stats: FilterStats },
    /// The file could not be parsed or filtered. Other files still run.
    Failed { path: PathBuf, error: String },
}

impl FileOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

#[derive(Debug)]
pub enum CommandSummary {
    Strip(StripSummary),
    /// `strip -`: one stylesheet read from stdin.
    Stream(StreamSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct StripSummary {
    pub files: Vec<FileOutcome>,
    pub is_apply: bool,
    /// Entries the scanner could not access.
    pub skipped_count: usize,
}

impl StripSummary {
    pub fn changed_files(&self) -> impl Iterator<Item = (&PathBuf, &FilterStats)> {
        self.files.iter().filter_map(|outcome| match outcome {
            FileOutcome::Changed { path, stats } => Some((path, stats)),
            _ => None,
        })
    }

    pub fn removed_count(&self) -> usize {
        self.changed_files().map(|(_, stats)| stats.removed).sum()
    }
}

#[derive(Debug)]
pub struct StreamSummary {
    /// Filtered CSS, written to stdout as-is. `None` when filtering failed.
    pub output: Option<String>,
    pub outcome: FileOutcome,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running csscrub commands
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Files that failed to parse, or a failed init.
    pub error_count: usize,
}
