//! Comment filter - remove comments from a CSS tree by retention rules.
//!
//! The filter walks the tree once, in source order, and visits every comment
//! occurrence exactly once:
//! - standalone comment children of the root, rules and at-rules;
//! - comments embedded in raw slots: `before` of non-comment children,
//!   selectors, declaration `between`/value/`!important`, at-rule
//!   `after_name`/params/`between`, and container `after`.
//!
//! ## Module Structure
//!
//! - `options`: Retention rules and the custom predicate type
//! - `remover`: Per-comment classification (shared by both representations)
//! - `raws`: Span removal and whitespace consolidation inside raw text

mod options;
mod raws;
mod remover;


use anyhow::Result;
use tracing::instrument;

pub use options::{Options, RemovePredicate};
pub use remover::{CommentKind, CommentOccurrence, CommentRemover, FilterStats, Location};

use crate::core::ast::{AtRule, Declaration, Node, Root, Rule};
use crate::core::parsers::css::parse_css;
use crate::core::parsers::scanner::contains_comment;
use crate::core::stringify::stringify;
use raws::scrub_raw;

/// Remove comments from `root` in place.
///
/// Running the filter again on its own output removes nothing more. If the
/// custom predicate fails, its error is returned as-is and the tree is left
/// partially filtered.
#[instrument(skip_all)]
pub fn discard_comments(root: &mut Root, options: &Options) -> Result<FilterStats> {
    let mut filter = CommentFilter {
        remover: CommentRemover::new(options),
    };
    filter.visit_nodes(&mut root.nodes)?;
    filter.scrub(&mut root.raws.after, Location::After)?;
    Ok(filter.remover.stats())
}

/// Parse, filter and serialize CSS source.
pub fn process(css: &str, options: &Options) -> Result<String> {
    let mut root = parse_css(css)?;
    discard_comments(&mut root, options)?;
    Ok(stringify(&root))
}

struct CommentFilter<'o> {
    remover: CommentRemover<'o>,
}

impl CommentFilter<'_> {
    /// Scrub one raw slot. Returns whether anything was removed.
    fn scrub(&mut self, slot: &mut String, location: Location) -> Result<bool> {
        match scrub_raw(slot, location, &mut self.remover)? {
            Some(scrubbed) => {
                *slot = scrubbed;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn visit_nodes(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        let mut i = 0;
        while i < nodes.len() {
            let remove = match &mut nodes[i] {
                Node::Comment(comment) => self.remover.can_remove(&CommentOccurrence {
                    text: &comment.text,
                    location: Location::Node,
                })?,
                Node::Rule(rule) => {
                    self.visit_rule(rule)?;
                    false
                }
                Node::AtRule(at_rule) => {
                    self.visit_at_rule(at_rule)?;
                    false
                }
                Node::Declaration(decl) => {
                    self.visit_declaration(decl)?;
                    false
                }
            };
            if remove {
                nodes.remove(i);
            } else {
                i += 1;
            }
        }
        Ok(())
    }

    fn visit_rule(&mut self, rule: &mut Rule) -> Result<()> {
        self.scrub(&mut rule.raws.before, Location::Before)?;
        self.scrub(&mut rule.selector, Location::Selector)?;
        self.scrub(&mut rule.raws.between, Location::Between)?;
        self.visit_nodes(&mut rule.nodes)?;
        self.scrub(&mut rule.raws.after, Location::After)?;
        Ok(())
    }

    fn visit_at_rule(&mut self, at_rule: &mut AtRule) -> Result<()> {
        self.scrub(&mut at_rule.raws.before, Location::Before)?;
        self.scrub(&mut at_rule.raws.after_name, Location::AfterName)?;

        let leading_comment = at_rule.params.starts_with("/*");
        if self.scrub(&mut at_rule.params, Location::Params)?
            && leading_comment
            && at_rule.raws.after_name.is_empty()
            && !at_rule.params.is_empty()
            && !at_rule.params.starts_with("/*")
        {
            // `@media/*x*/screen` must not fuse into `@mediascreen`.
            at_rule.raws.after_name.push(' ');
        }

        self.scrub(&mut at_rule.raws.between, Location::Between)?;
        if let Some(nodes) = &mut at_rule.nodes {
            self.visit_nodes(nodes)?;
            self.scrub(&mut at_rule.raws.after, Location::After)?;
        }
        Ok(())
    }

    fn visit_declaration(&mut self, decl: &mut Declaration) -> Result<()> {
        self.scrub(&mut decl.raws.before, Location::Before)?;
        self.scrub(&mut decl.raws.between, Location::Between)?;
        self.scrub(&mut decl.value, Location::Value)?;

        if decl.important
            && let Some(flag) = &decl.raws.important
            && let Some(scrubbed) = scrub_raw(flag, Location::Important, &mut self.remover)?
        {
            let flag = if contains_comment(&scrubbed) {
                scrubbed
            } else {
                let indent = &flag[..flag.len() - flag.trim_start().len()];
                format!("{}!important", indent)
            };
            decl.raws.important = (flag != "!important").then_some(flag);
        }
        Ok(())
    }
}
