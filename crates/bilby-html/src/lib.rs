//! HTML parser for the bilby renderer.
//!
//! # Scope
//!
//! This crate parses a restricted HTML dialect:
//! - Balanced open/close tags (`<div>...</div>`)
//! - Attributes with quoted values (`id="main"`, `class='note'`)
//! - Text nodes
//!
//! The parser is non-validating and performs no nesting repair: input is
//! assumed well formed, and anything unexpected is consumed leniently (a
//! mismatched close tag is reported once on stderr and skipped). There is no
//! support for comments, doctypes, character references, or void elements.
//!
//! Multiple top-level nodes are wrapped in a synthesized `html` element so a
//! document always has a single root element under the document node.

mod parser;

pub use parser::{HtmlParser, parse, print_tree};
