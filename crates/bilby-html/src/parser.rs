//! Recursive-descent parser for the restricted HTML dialect.
//!
//! The grammar is small enough that no separate tokenization pass is needed:
//! the parser walks a char buffer directly, one node at a time.

use bilby_common::warning::warn_once;
use bilby_dom::{AttributesMap, DomTree, NodeId, NodeType};

/// Parse an HTML source string into a [`DomTree`].
///
/// The returned tree always has a single element child under the document
/// node: if the source contains exactly one top-level element, that element
/// is used; otherwise all top-level nodes are wrapped in a synthesized
/// `html` element.
#[must_use]
pub fn parse(source: &str) -> DomTree {
    let mut tree = DomTree::new();
    let mut parser = HtmlParser::new(source);
    let nodes = parser.parse_nodes(&mut tree);

    let document = tree.root();
    let single_element = nodes.len() == 1 && tree.as_element(nodes[0]).is_some();
    if single_element {
        tree.append_child(document, nodes[0]);
    } else {
        let html = tree.alloc(NodeType::Element(bilby_dom::ElementData {
            tag_name: "html".to_string(),
            attrs: AttributesMap::new(),
        }));
        tree.append_child(document, html);
        for id in nodes {
            tree.append_child(html, id);
        }
    }
    tree
}

/// Cursor-based parser over the input characters.
///
/// Each `parse_*` method leaves the cursor just past the construct it
/// consumed. The parser never backtracks.
pub struct HtmlParser {
    /// The input, decoded up front for O(1) peeking.
    input: Vec<char>,
    /// Current position in `input`.
    position: usize,
}

impl HtmlParser {
    /// Create a parser over `source`, positioned at the start.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            input: source.chars().collect(),
            position: 0,
        }
    }

    /// Parse a sequence of sibling nodes until EOF or a closing tag.
    ///
    /// Whitespace runs between nodes are discarded, so indentation between
    /// elements does not produce text nodes.
    pub fn parse_nodes(&mut self, tree: &mut DomTree) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        loop {
            self.consume_whitespace();
            if self.eof() || self.starts_with("</") {
                break;
            }
            nodes.push(self.parse_node(tree));
        }
        nodes
    }

    /// Parse a single node: an element if the next char opens a tag,
    /// otherwise a text node.
    fn parse_node(&mut self, tree: &mut DomTree) -> NodeId {
        if self.peek() == Some('<') {
            self.parse_element(tree)
        } else {
            self.parse_text(tree)
        }
    }

    /// Parse one element: open tag, children, close tag.
    fn parse_element(&mut self, tree: &mut DomTree) -> NodeId {
        // Opening tag.
        self.expect('<');
        let tag_name = self.parse_tag_name();
        let attrs = self.parse_attributes();
        self.expect('>');

        let element = tree.alloc(NodeType::Element(bilby_dom::ElementData {
            tag_name: tag_name.clone(),
            attrs,
        }));

        // Contents.
        let children = self.parse_nodes(tree);
        for child in children {
            tree.append_child(element, child);
        }

        // Closing tag. The dialect requires it to match; on mismatch we warn
        // and carry on with the tree as built (no nesting repair).
        self.expect('<');
        self.expect('/');
        let closing = self.parse_tag_name();
        self.expect('>');
        if closing != tag_name {
            warn_once(
                "HTML",
                &format!("mismatched closing tag </{closing}> for <{tag_name}>"),
            );
        }

        element
    }

    /// Parse a text node: everything up to the next `<`.
    fn parse_text(&mut self, tree: &mut DomTree) -> NodeId {
        let data = self.consume_while(|c| c != '<');
        tree.alloc(NodeType::Text(data))
    }

    /// Parse a tag or attribute name (ASCII alphanumerics).
    fn parse_tag_name(&mut self) -> String {
        self.consume_while(|c| c.is_ascii_alphanumeric())
    }

    /// Parse all attributes of an open tag, up to (not including) the `>`.
    fn parse_attributes(&mut self) -> AttributesMap {
        let mut attributes = AttributesMap::new();
        loop {
            self.consume_whitespace();
            if self.eof() || self.peek() == Some('>') {
                break;
            }
            let (name, value) = self.parse_attr();
            let _ = attributes.insert(name, value);
        }
        attributes
    }

    /// Parse one `name="value"` attribute pair.
    fn parse_attr(&mut self) -> (String, String) {
        let name = self.parse_tag_name();
        self.expect('=');
        let value = self.parse_attr_value();
        (name, value)
    }

    /// Parse a quoted attribute value; either quote character is accepted.
    fn parse_attr_value(&mut self) -> String {
        let open_quote = self.consume().unwrap_or('"');
        let value = self.consume_while(|c| c != open_quote);
        let _ = self.consume(); // closing quote
        value
    }

    /// Consume and discard zero or more whitespace characters.
    fn consume_whitespace(&mut self) {
        let _ = self.consume_while(char::is_whitespace);
    }

    /// Consume characters while `test` holds, returning them as a string.
    fn consume_while(&mut self, test: impl Fn(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(c) = self.peek() {
            if !test(c) {
                break;
            }
            result.push(c);
            self.position += 1;
        }
        result
    }

    /// Return the current character and advance, or `None` at EOF.
    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    /// Consume one character that is expected to be `c`; warns and leaves the
    /// cursor unchanged if the input disagrees (lenient recovery).
    fn expect(&mut self, c: char) {
        if self.peek() == Some(c) {
            self.position += 1;
        } else {
            warn_once("HTML", &format!("expected '{c}' at offset {}", self.position));
        }
    }

    /// Read the current character without consuming it.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Do the next characters start with the given string?
    fn starts_with(&self, s: &str) -> bool {
        self.input[self.position..]
            .iter()
            .copied()
            .take(s.chars().count())
            .eq(s.chars())
    }

    /// Return true if all input is consumed.
    fn eof(&self) -> bool {
        self.position >= self.input.len()
    }
}

/// Print an indented rendering of the tree to stdout, for debugging.
pub fn print_tree(tree: &DomTree, id: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    let Some(node) = tree.get(id) else { return };

    match &node.node_type {
        NodeType::Document => println!("{indent}#document"),
        NodeType::Element(data) => {
            let mut attrs: Vec<String> = data
                .attrs
                .iter()
                .map(|(name, value)| format!(" {name}=\"{value}\""))
                .collect();
            attrs.sort();
            println!("{indent}<{}{}>", data.tag_name, attrs.concat());
        }
        NodeType::Text(text) => println!("{indent}\"{}\"", text.trim()),
    }

    for &child in tree.children(id) {
        print_tree(tree, child, depth + 1);
    }
}
