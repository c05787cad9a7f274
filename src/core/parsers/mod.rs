//! CSS source handling.
//!
//! - `scanner`: Comment and string aware cursor, raw text segmentation
//! - `css`: Lossless CSS text to tree builder

pub mod css;
pub mod scanner;

pub use css::parse_css;
