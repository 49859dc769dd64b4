//! Error types for CSS parsing and layout.
//!
//! Only structural failures surface as errors: a stylesheet whose rule never
//! opens its declaration block, a layout call rooted on an invisible element,
//! or an anonymous box asked for style it does not have. Everything else
//! (missing properties, unmatched elements, unsupported values) resolves
//! locally through defaults and never reaches the caller.

use thiserror::Error;

/// Structural errors raised while parsing a stylesheet.
///
/// These abort the whole parse: there is no well-defined stylesheet to
/// recover once rule boundaries are lost.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssParseError {
    /// A selector list ran off the end of the input without its `{`.
    #[error("selector list is missing its declaration block")]
    MissingDeclarationBlock,

    /// The input ended in the middle of a construct.
    #[error("unexpected end of stylesheet input")]
    UnexpectedEof,
}

/// Structural errors raised while building or running layout.
///
/// These abort the whole layout call: there is no well-defined partial
/// layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The root style node resolved to `display: none`, so there is nothing
    /// to root the layout tree on.
    #[error("root node has display: none")]
    RootDisplayNone,

    /// An anonymous block box was asked for its style node.
    #[error("anonymous block box has no style node")]
    AnonymousStyleLookup,
}
