//! Comment classification.
//!
//! Every comment occurrence, whether a standalone node or a span inside raw
//! text, goes through [`CommentRemover::can_remove`]. Decision order:
//!
//! 1. the custom predicate, when it says remove;
//! 2. plain comments are always removed;
//! 3. important comments (`/*!...*/`) are removed by `remove_all`, or by
//!    `remove_all_but_first` once the first one has been kept;
//! 4. otherwise the comment stays.

use anyhow::Result;
use tracing::debug;

use super::options::Options;

/// Marker that makes a comment important.
pub const IMPORTANT_MARKER: char = '!';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// Removed unless a retention rule applies.
    Plain,
    /// `/*!...*/`, kept by default.
    Important,
}

impl CommentKind {
    pub fn of(text: &str) -> Self {
        if text.starts_with(IMPORTANT_MARKER) {
            CommentKind::Important
        } else {
            CommentKind::Plain
        }
    }
}

/// Where a comment occurrence lives in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Standalone comment child.
    Node,
    Before,
    Between,
    After,
    AfterName,
    Selector,
    Value,
    Params,
    Important,
}

impl Location {
    /// Text that replaces a removed comment squeezed between two tokens.
    pub fn separator(self) -> &'static str {
        match self {
            Location::Value | Location::Params => " ",
            _ => "",
        }
    }

    /// Slots whose trailing whitespace is dropped after a removal.
    pub fn trims_end(self) -> bool {
        matches!(self, Location::Selector | Location::Value | Location::Params)
    }
}

/// One comment, found either as a node or inside raw text.
#[derive(Debug, Clone, Copy)]
pub struct CommentOccurrence<'a> {
    pub text: &'a str,
    pub location: Location,
}

/// Counts of comment occurrences seen in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub removed: usize,
    pub kept: usize,
}

impl std::ops::AddAssign for FilterStats {
    fn add_assign(&mut self, other: Self) {
        self.removed += other.removed;
        self.kept += other.kept;
    }
}

/// Decides the fate of each comment. One remover per pass: it carries the
/// "first important comment already kept" state.
pub struct CommentRemover<'o> {
    options: &'o Options,
    kept_first_important: bool,
    stats: FilterStats,
}

impl<'o> CommentRemover<'o> {
    pub fn new(options: &'o Options) -> Self {
        Self {
            options,
            kept_first_important: false,
            stats: FilterStats::default(),
        }
    }

    pub fn stats(&self) -> FilterStats {
        self.stats
    }

    pub fn can_remove(&mut self, occurrence: &CommentOccurrence) -> Result<bool> {
        let remove = self.decide(occurrence.text)?;
        if remove {
            self.stats.removed += 1;
        } else {
            self.stats.kept += 1;
        }
        debug!(
            location = ?occurrence.location,
            kind = ?CommentKind::of(occurrence.text),
            remove,
            "comment"
        );
        Ok(remove)
    }

    fn decide(&mut self, text: &str) -> Result<bool> {
        if let Some(predicate) = &self.options.remove
            && predicate(text)?
        {
            return Ok(true);
        }

        match CommentKind::of(text) {
            CommentKind::Plain => Ok(true),
            CommentKind::Important => {
                if self.options.remove_all {
                    return Ok(true);
                }
                if self.options.remove_all_but_first {
                    if self.kept_first_important {
                        return Ok(true);
                    }
                    self.kept_first_important = true;
                }
                Ok(false)
            }
        }
    }
}
