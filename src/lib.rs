//! csscrub - comment remover for CSS
//!
//! Parses stylesheets into a lossless syntax tree, discards comments by
//! retention rules and writes the tree back byte-for-byte otherwise.
//! `/*! important */` comments survive unless asked otherwise.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (strip and init commands, report)
//! - `config`: Configuration file loading and parsing
//! - `core`: Syntax tree, parser, comment filter, serializer and file scanning
//!
//! ## Example
//!
//! ```
//! use csscrub::core::{Options, process};
//!
//! let css = process("/*!license*/a{color:red/* note */}", &Options::default()).unwrap();
//! assert_eq!(css, "/*!license*/a{color:red}");
//! ```

pub mod cli;
pub mod config;
pub mod core;
