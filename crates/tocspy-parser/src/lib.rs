//! tocspy Parser Library
//!
//! Extracts heading trees from Markdown articles and renders the article
//! body with an anchor id on every heading, so the tracker can find them.

pub mod markdown;
pub mod slug;

pub use markdown::{MarkdownParser, ParsedDocument};
pub use slug::{Slugger, slugify};
