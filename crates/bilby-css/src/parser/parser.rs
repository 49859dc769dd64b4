//! CSS parser for the restricted dialect.
//!
//! The input is a token stream from the tokenizer; the output is a
//! [`Stylesheet`] of style rules. Each rule is a comma-separated list of
//! simple selectors followed by a brace-delimited declaration block.
//!
//! Error policy: losing track of rule boundaries (a selector list that never
//! opens its block, or input ending inside a block) aborts the parse.
//! Everything smaller - an unsupported unit, a malformed value, an at-rule -
//! is dropped with a deduplicated warning and parsing continues.

use bilby_common::warning::warn_once;

use crate::error::CssParseError;
use crate::selector::SimpleSelector;
use crate::style::{ColorValue, Unit, Value};
use crate::tokenizer::{CssToken, CssTokenizer};

/// [§ 5.4.4 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-a-declaration)
///
/// A CSS declaration, e.g. `margin-left: auto`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name.
    pub name: String,
    /// The specified value.
    pub value: Value,
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-a-qualified-rule)
///
/// A style rule: selectors plus declarations.
///
/// A rule matches an element if ANY of its selectors matches. The selectors
/// are stored sorted by descending specificity, so the first matching
/// selector is also the most specific matching one - that is the specificity
/// the rule contributes to cascade ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// The comma-separated selector alternatives, most specific first.
    pub selectors: Vec<SimpleSelector>,
    /// The declarations in this rule's block, in source order.
    pub declarations: Vec<Declaration>,
}

/// [§ 5.3.2 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// A parsed stylesheet: rules in source order. Source order is the cascade's
/// tiebreaker, so it must be preserved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stylesheet {
    /// The style rules, in source order.
    pub rules: Vec<Rule>,
}

/// Parse CSS source text into a stylesheet.
///
/// Convenience wrapper that tokenizes and parses in one step.
///
/// # Errors
///
/// Returns [`CssParseError`] when rule structure is unrecoverable (see the
/// module docs).
pub fn parse_stylesheet(source: &str) -> Result<Stylesheet, CssParseError> {
    let mut tokenizer = CssTokenizer::new(source);
    tokenizer.run();
    let mut parser = CssParser::new(tokenizer.into_tokens());
    parser.parse_stylesheet()
}

/// Token-stream parser for the restricted CSS dialect.
pub struct CssParser {
    tokens: Vec<CssToken>,
    position: usize,
}

impl CssParser {
    /// Create a new parser from a list of tokens.
    #[must_use]
    pub fn new(tokens: Vec<CssToken>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// [§ 5.3.2 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    ///
    /// Parse the whole token stream into a stylesheet.
    ///
    /// # Errors
    ///
    /// Returns [`CssParseError::MissingDeclarationBlock`] when a selector
    /// list reaches EOF without its `{`, and [`CssParseError::UnexpectedEof`]
    /// when the input ends inside a declaration block.
    pub fn parse_stylesheet(&mut self) -> Result<Stylesheet, CssParseError> {
        let mut rules = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None | Some(CssToken::Eof) => break,
                // At-rules are not part of the dialect: skip the whole
                // construct (prelude plus block or terminating semicolon).
                Some(CssToken::Delim('@')) => self.skip_at_rule(),
                Some(_) => rules.push(self.parse_rule()?),
            }
        }
        Ok(Stylesheet { rules })
    }

    /// Parse one style rule: selector list, then declaration block.
    fn parse_rule(&mut self) -> Result<Rule, CssParseError> {
        let selectors = self.parse_selector_list()?;
        let declarations = self.parse_declaration_block()?;
        Ok(Rule {
            selectors,
            declarations,
        })
    }

    /// Parse a comma-separated list of simple selectors, stopping before the
    /// opening `{` of the declaration block.
    ///
    /// Returns the selectors sorted by descending specificity.
    fn parse_selector_list(&mut self) -> Result<Vec<SimpleSelector>, CssParseError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            selectors.push(self.parse_simple_selector());
            self.skip_whitespace();
            match self.peek() {
                Some(CssToken::Comma) => {
                    let _ = self.consume();
                }
                Some(CssToken::LeftBrace) => break,
                None | Some(CssToken::Eof) => {
                    return Err(CssParseError::MissingDeclarationBlock);
                }
                Some(other) => {
                    // Something the selector grammar cannot contain; drop it
                    // so the loop makes progress.
                    warn_once("CSS", &format!("unexpected {other} in selector list"));
                    let _ = self.consume();
                }
            }
        }
        // Highest specificity first, so matching can take the first hit.
        selectors.sort_by(|a, b| b.specificity().cmp(&a.specificity()));
        Ok(selectors)
    }

    /// Parse one simple selector, e.g. `type#id.class1.class2`.
    ///
    /// An empty or `*`-only selector leaves every axis unconstrained.
    fn parse_simple_selector(&mut self) -> SimpleSelector {
        let mut selector = SimpleSelector::default();
        loop {
            match self.peek() {
                Some(CssToken::Ident(name)) => {
                    selector.tag_name = Some(name.clone());
                    let _ = self.consume();
                }
                Some(CssToken::Hash(value)) => {
                    selector.id = Some(value.clone());
                    let _ = self.consume();
                }
                Some(CssToken::Delim('.')) => {
                    let _ = self.consume();
                    if let Some(CssToken::Ident(class)) = self.peek() {
                        selector.classes.push(class.clone());
                        let _ = self.consume();
                    } else {
                        warn_once("CSS", "'.' not followed by a class name");
                        break;
                    }
                }
                // Universal selector: constrains nothing.
                Some(CssToken::Delim('*')) => {
                    let _ = self.consume();
                }
                _ => break,
            }
        }
        selector
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-a-list-of-declarations)
    ///
    /// Parse a `{ ... }` block of declarations. The opening brace is the
    /// current token.
    fn parse_declaration_block(&mut self) -> Result<Vec<Declaration>, CssParseError> {
        let _ = self.consume(); // {
        let mut declarations = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(CssToken::RightBrace) => {
                    let _ = self.consume();
                    break;
                }
                None | Some(CssToken::Eof) => return Err(CssParseError::UnexpectedEof),
                Some(CssToken::Ident(_)) => {
                    if let Some(declaration) = self.parse_declaration() {
                        declarations.push(declaration);
                    }
                }
                Some(other) => {
                    warn_once("CSS", &format!("unexpected {other} in declaration block"));
                    let _ = self.consume();
                }
            }
        }
        Ok(declarations)
    }

    /// Parse one `property: value;` declaration.
    ///
    /// Returns `None` (with a warning) for values outside the supported
    /// grammar; the surrounding block keeps parsing either way.
    fn parse_declaration(&mut self) -> Option<Declaration> {
        let name = match self.consume() {
            Some(CssToken::Ident(name)) => name,
            _ => return None,
        };

        self.skip_whitespace();
        if self.peek() == Some(&CssToken::Colon) {
            let _ = self.consume();
        } else {
            warn_once("CSS", &format!("declaration '{name}' is missing ':'"));
            self.skip_to_declaration_end();
            return None;
        }

        self.skip_whitespace();
        let value = self.parse_value(&name);

        // Multi-component values ("margin: 0 auto") are outside the dialect;
        // drop the whole declaration rather than keep half of it.
        self.skip_whitespace();
        let clean_end = matches!(
            self.peek(),
            Some(CssToken::Semicolon | CssToken::RightBrace | CssToken::Eof) | None
        );
        self.skip_to_declaration_end();

        if !clean_end {
            warn_once(
                "CSS",
                &format!("unsupported multi-component value for '{name}'"),
            );
            return None;
        }

        value.map(|value| Declaration { name, value })
    }

    /// Parse a single value token: `auto`, a keyword, a px length, or a hex
    /// color.
    fn parse_value(&mut self, property: &str) -> Option<Value> {
        match self.peek() {
            Some(CssToken::Ident(keyword)) => {
                let value = if keyword == "auto" {
                    Value::Auto
                } else {
                    Value::Keyword(keyword.clone())
                };
                let _ = self.consume();
                Some(value)
            }
            Some(CssToken::Dimension { value, unit }) => {
                let result = if unit.eq_ignore_ascii_case("px") {
                    Some(Value::Length(*value, Unit::Px))
                } else {
                    warn_once(
                        "CSS",
                        &format!("unsupported unit '{unit}' in '{property}'"),
                    );
                    None
                };
                let _ = self.consume();
                result
            }
            // A bare number is taken as px; `margin: 0` is ubiquitous.
            Some(CssToken::Number(value)) => {
                let value = *value;
                let _ = self.consume();
                Some(Value::Length(value, Unit::Px))
            }
            Some(CssToken::Hash(hex)) => {
                let result = ColorValue::from_hex(hex).map(Value::Color);
                if result.is_none() {
                    warn_once("CSS", &format!("invalid hex color '#{hex}' in '{property}'"));
                }
                let _ = self.consume();
                result
            }
            _ => {
                warn_once("CSS", &format!("unsupported value for '{property}'"));
                None
            }
        }
    }

    /// Consume tokens up to and including the next semicolon, or up to (not
    /// including) the block's closing brace.
    fn skip_to_declaration_end(&mut self) {
        loop {
            match self.peek() {
                Some(CssToken::Semicolon) => {
                    let _ = self.consume();
                    break;
                }
                Some(CssToken::RightBrace) | Some(CssToken::Eof) | None => break,
                Some(_) => {
                    let _ = self.consume();
                }
            }
        }
    }

    /// Skip an entire at-rule: everything through the matching close of its
    /// block, or through the terminating semicolon for block-less at-rules.
    fn skip_at_rule(&mut self) {
        warn_once("CSS", "at-rules are not supported; skipping");
        let _ = self.consume(); // @
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None | Some(CssToken::Eof) => break,
                Some(CssToken::LeftBrace) => {
                    depth += 1;
                    let _ = self.consume();
                }
                Some(CssToken::RightBrace) => {
                    let _ = self.consume();
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                Some(CssToken::Semicolon) if depth == 0 => {
                    let _ = self.consume();
                    break;
                }
                Some(_) => {
                    let _ = self.consume();
                }
            }
        }
    }

    /// Skip any run of whitespace tokens.
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(CssToken::is_whitespace) {
            let _ = self.consume();
        }
    }

    /// Return the current token and advance past it.
    fn consume(&mut self) -> Option<CssToken> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Read the current token without consuming it.
    fn peek(&self) -> Option<&CssToken> {
        self.tokens.get(self.position)
    }
}
