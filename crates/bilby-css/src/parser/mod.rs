//! CSS parsing, after [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).

#[allow(clippy::module_inception)]
mod parser;

pub use parser::{CssParser, Declaration, Rule, Stylesheet, parse_stylesheet};
