//! Tokenizer for the restricted CSS dialect.
//!
//! Follows the structure of
//! [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms),
//! cut down to the token set the dialect can produce.

use super::token::CssToken;

/// CSS tokenizer over a char buffer.
pub struct CssTokenizer {
    /// The input string being tokenized
    input: Vec<char>,
    /// Current position in the input
    position: usize,
    /// Collected tokens
    tokens: Vec<CssToken>,
}

impl CssTokenizer {
    /// Create a new tokenizer with the given input.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into().chars().collect(),
            position: 0,
            tokens: Vec::new(),
        }
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    ///
    /// Tokenize the whole input, ending with an EOF token.
    pub fn run(&mut self) {
        loop {
            let token = self.consume_token();
            let is_eof = token.is_eof();
            self.tokens.push(token);
            if is_eof {
                break;
            }
        }
    }

    /// Return the collected tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<CssToken> {
        self.tokens
    }

    /// Return a reference to the collected tokens.
    #[must_use]
    pub fn tokens(&self) -> &[CssToken] {
        &self.tokens
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> CssToken {
        // "Consume comments."
        self.consume_comments();

        let Some(c) = self.consume() else {
            return CssToken::Eof;
        };

        match c {
            // "whitespace: Consume as much whitespace as possible.
            // Return a <whitespace-token>."
            c if c.is_whitespace() => {
                self.consume_whitespace();
                CssToken::Whitespace
            }

            // "U+0023 NUMBER SIGN (#)"
            // "If the next input code point is an ident code point, consume
            // an ident sequence" - otherwise it is a lone delim.
            '#' => {
                if self.peek().is_some_and(is_ident_code_point) {
                    CssToken::Hash(self.consume_ident_sequence())
                } else {
                    CssToken::Delim('#')
                }
            }

            // "U+003A COLON (:): Return a <colon-token>."
            ':' => CssToken::Colon,

            // "U+003B SEMICOLON (;): Return a <semicolon-token>."
            ';' => CssToken::Semicolon,

            // "U+002C COMMA (,): Return a <comma-token>."
            ',' => CssToken::Comma,

            // "U+007B LEFT CURLY BRACKET ({): Return a <{-token>."
            '{' => CssToken::LeftBrace,

            // "U+007D RIGHT CURLY BRACKET (}): Return a <}-token>."
            '}' => CssToken::RightBrace,

            // "U+002B PLUS SIGN (+)" / "U+002D HYPHEN-MINUS (-)" /
            // "U+002E FULL STOP (.)": a number if one follows, else a delim.
            // A hyphen may also begin an ident ("-moz-...").
            '+' | '-' | '.' => {
                if self.would_start_number(c) {
                    self.reconsume();
                    self.consume_numeric_token()
                } else if c == '-' && self.peek().is_some_and(is_ident_code_point) {
                    self.reconsume();
                    CssToken::Ident(self.consume_ident_sequence())
                } else {
                    CssToken::Delim(c)
                }
            }

            // "digit: Reconsume the current input code point, consume a
            // numeric token, and return it."
            c if c.is_ascii_digit() => {
                self.reconsume();
                self.consume_numeric_token()
            }

            // "ident-start code point: Reconsume... consume an ident-like
            // token, and return it."
            c if is_ident_start_code_point(c) => {
                self.reconsume();
                CssToken::Ident(self.consume_ident_sequence())
            }

            // "anything else: Return a <delim-token> with its value set to
            // the current input code point."
            c => CssToken::Delim(c),
        }
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comments)
    ///
    /// "If the next two input code points are U+002F SOLIDUS (/) followed by
    /// a U+002A ASTERISK (*), consume them and all following code points up
    /// to and including the first U+002A ASTERISK (*) followed by a U+002F
    /// SOLIDUS (/), or up to an EOF code point."
    fn consume_comments(&mut self) {
        while self.peek() == Some('/') && self.peek_at(1) == Some('*') {
            self.position += 2;
            loop {
                match self.consume() {
                    None => return,
                    Some('*') if self.peek() == Some('/') => {
                        self.position += 1;
                        break;
                    }
                    Some(_) => {}
                }
            }
        }
    }

    /// Consume a run of whitespace (the first char is already consumed).
    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.position += 1;
        }
    }

    /// [§ 4.3.12 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident_sequence(&mut self) -> String {
        let mut result = String::new();
        while let Some(c) = self.peek() {
            if !is_ident_code_point(c) {
                break;
            }
            result.push(c);
            self.position += 1;
        }
        result
    }

    /// [§ 4.3.3 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    ///
    /// "Consume a number... If the next 3 input code points would start an
    /// ident sequence... create a <dimension-token>... Otherwise... create a
    /// <number-token>."
    fn consume_numeric_token(&mut self) -> CssToken {
        let value = self.consume_number();

        if self.peek().is_some_and(is_ident_start_code_point) {
            let unit = self.consume_ident_sequence();
            CssToken::Dimension { value, unit }
        } else {
            CssToken::Number(value)
        }
    }

    /// [§ 4.3.13 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    ///
    /// Optional sign, integer part, optional fractional part. Scientific
    /// notation is not part of the dialect.
    fn consume_number(&mut self) -> f32 {
        let mut repr = String::new();

        if matches!(self.peek(), Some('+' | '-')) {
            repr.push(self.consume().unwrap_or('+'));
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            repr.push(self.consume().unwrap_or('0'));
        }
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            repr.push(self.consume().unwrap_or('.'));
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                repr.push(self.consume().unwrap_or('0'));
            }
        }

        repr.parse().unwrap_or(0.0)
    }

    /// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    ///
    /// `first` is the already-consumed code point; the stream holds what
    /// follows it.
    fn would_start_number(&self, first: char) -> bool {
        match first {
            '+' | '-' => {
                self.peek().is_some_and(|c| c.is_ascii_digit())
                    || (self.peek() == Some('.')
                        && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()))
            }
            '.' => self.peek().is_some_and(|c| c.is_ascii_digit()),
            c => c.is_ascii_digit(),
        }
    }

    /// Return the current character and advance, or `None` at EOF.
    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    /// Push the last consumed character back onto the stream.
    fn reconsume(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Read the current character without consuming it.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Read the character `offset` positions ahead without consuming.
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
///
/// "ident code point: An ident-start code point, a digit, or
/// U+002D HYPHEN-MINUS (-)." Restricted to ASCII in this dialect.
fn is_ident_code_point(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
///
/// "ident-start code point: A letter... or U+005F LOW LINE (_)."
fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}
