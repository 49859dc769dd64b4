//! Document rendering pipeline for the bilby renderer.
//!
//! # Architecture
//!
//! ```text
//! HTML ─parse─> DOM ──style──> styled tree ──layout──> box tree
//! CSS ─parse─> stylesheet ──┘                             │
//!                                                       paint
//!                                                         │
//!                                    pixels <─render─ display list
//! ```
//!
//! This crate wires the stages together and owns the last one: executing a
//! display list onto an RGBA pixel buffer and writing it out as PNG.
//!
//! # Not Implemented
//!
//! - Network fetching (documents and stylesheets come from files or strings)
//! - Text rendering (inline formatting is out of scope engine-wide)

pub mod renderer;

pub use renderer::Renderer;

pub use bilby_css as css;
pub use bilby_dom as dom;
pub use bilby_html as html;

use std::fs;
use std::path::Path;

use bilby_css::{
    Dimensions, LayoutBox, LayoutError, Rect, Stylesheet, StyledNode, build_display_list,
    extract_style_content, layout_tree, parse_stylesheet, style_tree,
};
use bilby_dom::{DomTree, NodeId};
use image::RgbaImage;
use thiserror::Error;

/// Default viewport width when the caller does not specify one.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 800;
/// Default viewport height when the caller does not specify one.
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 600;

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the HTML document.
    #[error("failed to read document '{path}': {source}")]
    Document {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read the stylesheet file.
    #[error("failed to read stylesheet '{path}': {source}")]
    Stylesheet {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The stylesheet was structurally malformed.
    #[error("failed to parse stylesheet: {0}")]
    Css(#[from] bilby_css::CssParseError),
}

/// A fully loaded and parsed document, ready for layout and painting.
pub struct LoadedDocument {
    /// Original HTML source.
    pub html_source: String,
    /// The CSS text that was applied (from a file or from `<style>`
    /// elements).
    pub css_text: String,
    /// Parsed DOM tree.
    pub dom: DomTree,
    /// Parsed stylesheet.
    pub stylesheet: Stylesheet,
}

impl LoadedDocument {
    /// Parse a document from in-memory HTML, taking CSS from the given
    /// string or, when `None`, from the document's own `<style>` elements.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Css`] when the stylesheet is structurally
    /// malformed.
    pub fn from_source(html: &str, css: Option<&str>) -> Result<LoadedDocument, LoadError> {
        let dom = bilby_html::parse(html);
        let css_text = match css {
            Some(text) => text.to_string(),
            None => extract_style_content(&dom),
        };
        let stylesheet = parse_stylesheet(&css_text)?;

        Ok(LoadedDocument {
            html_source: html.to_string(),
            css_text,
            dom,
            stylesheet,
        })
    }

    /// The DOM node styling and layout start from: the document element.
    #[must_use]
    pub fn root_element(&self) -> Option<NodeId> {
        self.dom.document_element()
    }

    /// Build the styled tree for this document.
    ///
    /// Returns `None` for a document with no element at all (text-only
    /// input never produces one, since the parser synthesizes `html`).
    #[must_use]
    pub fn style_tree(&self) -> Option<StyledNode> {
        self.root_element()
            .map(|root| style_tree(&self.dom, root, &self.stylesheet))
    }

    /// Lay the styled tree out against a `width` x `height` viewport at the
    /// origin.
    ///
    /// # Errors
    ///
    /// Propagates [`LayoutError`] for structurally unrenderable documents
    /// (e.g. a root with `display: none`).
    pub fn layout<'a>(
        &self,
        styled: &'a StyledNode,
        width: u32,
        height: u32,
    ) -> Result<LayoutBox<'a>, LayoutError> {
        layout_tree(styled, viewport(width, height))
    }
}

/// The initial containing block: a viewport rectangle at the origin with
/// zero edges.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn viewport(width: u32, height: u32) -> Dimensions {
    Dimensions {
        content: Rect {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
        },
        ..Dimensions::default()
    }
}

/// Load a document from an HTML file, with CSS from a separate file or from
/// the document's `<style>` elements.
///
/// # Errors
///
/// Returns [`LoadError`] when either file cannot be read or the stylesheet
/// is structurally malformed.
pub fn load_document(
    html_path: &Path,
    css_path: Option<&Path>,
) -> Result<LoadedDocument, LoadError> {
    let html = fs::read_to_string(html_path).map_err(|source| LoadError::Document {
        path: html_path.display().to_string(),
        source,
    })?;

    let css = match css_path {
        Some(path) => Some(
            fs::read_to_string(path).map_err(|source| LoadError::Stylesheet {
                path: path.display().to_string(),
                source,
            })?,
        ),
        None => None,
    };

    LoadedDocument::from_source(&html, css.as_deref())
}

/// Render errors: everything that can go wrong between a loaded document
/// and a pixel buffer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The document has no element to root the render on.
    #[error("document has no root element")]
    NoRootElement,

    /// Layout failed structurally.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Run the full pipeline for a loaded document and return the pixel buffer.
///
/// The buffer starts out white; painting is last-write-wins with no
/// antialiasing or alpha compositing.
///
/// # Errors
///
/// Returns [`RenderError`] when the document cannot be rooted or laid out.
pub fn render_to_image(
    document: &LoadedDocument,
    width: u32,
    height: u32,
) -> Result<RgbaImage, RenderError> {
    let styled = document.style_tree().ok_or(RenderError::NoRootElement)?;
    let layout_root = document.layout(&styled, width, height)?;
    let display_list = build_display_list(&layout_root);

    let mut renderer = Renderer::new(width, height);
    renderer.render(&display_list);
    Ok(renderer.into_image())
}
