//! Block-level parser.
//!
//! The block parser is line-oriented and handles:
//! - headings (`= h3`, `== h2`, `=== h1`)
//! - plain paragraphs
//! - ordered, unordered and definition lists, nested by indentation
//! - fenced code blocks with an optional language specifier
//!
//! Within each block, textual content is handed to [`crate::inline`] for
//! the link/emphasis/code passes.

mod parser;

pub use parser::Parser;
