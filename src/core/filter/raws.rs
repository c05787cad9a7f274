//! Comment removal inside raw text slots.

use anyhow::Result;

use super::remover::{CommentOccurrence, CommentRemover, Location};
use crate::core::parsers::scanner::{Segment, split_comments};

/// What to do with the text that follows a removed comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gap {
    None,
    /// The comment separated two tokens: insert the slot separator unless
    /// whitespace follows anyway.
    Separator,
    /// Whitespace already precedes the removed comment: drop the whitespace
    /// run that follows it.
    SkipSpace,
}

/// Remove comments from one raw slot.
///
/// Returns `None` when no comment was removed, so untouched slots keep their
/// exact text. Kept comments are written back verbatim.
pub fn scrub_raw(
    raw: &str,
    location: Location,
    remover: &mut CommentRemover,
) -> Result<Option<String>> {
    if !raw.contains("/*") {
        return Ok(None);
    }

    let mut out = String::with_capacity(raw.len());
    let mut removed_any = false;
    let mut gap = Gap::None;

    for segment in split_comments(raw) {
        match segment {
            Segment::Text(text) => {
                let text = match gap {
                    Gap::SkipSpace => text.trim_start(),
                    Gap::Separator => {
                        if !text.starts_with(char::is_whitespace) {
                            let separator = location.separator();
                            // `/` + `*` across a removed comment would open a new one.
                            if separator.is_empty()
                                && out.ends_with('/')
                                && text.starts_with('*')
                            {
                                out.push(' ');
                            } else {
                                out.push_str(separator);
                            }
                        }
                        text
                    }
                    Gap::None => text,
                };
                if !text.is_empty() {
                    gap = Gap::None;
                }
                out.push_str(text);
            }
            Segment::Comment(text) => {
                if !remover.can_remove(&CommentOccurrence { text, location })? {
                    out.push_str("/*");
                    out.push_str(text);
                    out.push_str("*/");
                    gap = Gap::None;
                    continue;
                }
                removed_any = true;
                if gap == Gap::None {
                    gap = if out.is_empty() || out.ends_with(char::is_whitespace) {
                        Gap::SkipSpace
                    } else {
                        Gap::Separator
                    };
                }
            }
        }
    }

    if !removed_any {
        return Ok(None);
    }
    if location.trims_end() {
        out.truncate(out.trim_end().len());
    }
    Ok(Some(out))
}
