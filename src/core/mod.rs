//! Core engine: syntax tree, parsing, comment filtering and serialization.
//!
//! ## Module Structure
//!
//! - `ast`: CSS tree types with lossless raw slots
//! - `parsers`: CSS text to tree
//! - `filter`: Comment classification and removal
//! - `stringify`: Tree to CSS text
//! - `scan`: Stylesheet discovery on disk

pub mod ast;
pub mod filter;
pub mod parsers;
pub mod scan;
pub mod stringify;

pub use ast::Root;
pub use filter::{FilterStats, Options, RemovePredicate, discard_comments, process};
pub use parsers::parse_css;
pub use stringify::stringify;
