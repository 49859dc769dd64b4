//! bilby command-line interface.
//!
//! Renders an HTML document (plus a stylesheet) to a PNG, with optional
//! debug dumps of each pipeline stage.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use bilby_browser::{
    DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, LoadedDocument, Renderer, load_document,
};
use bilby_css::{BoxType, LayoutBox, build_display_list};
use clap::Parser;
use owo_colors::OwoColorize;

/// Render an HTML document to an image.
#[derive(Parser, Debug)]
#[command(name = "bilby", version, about)]
struct Args {
    /// Path to the HTML document.
    input: PathBuf,

    /// Path to a CSS file. When omitted, CSS is taken from the document's
    /// <style> elements.
    #[arg(short = 'c', long = "css")]
    css: Option<PathBuf>,

    /// Output image path.
    #[arg(short = 'o', long = "output", default_value = "render.png")]
    output: PathBuf,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    height: u32,

    /// Print the parsed DOM tree.
    #[arg(long)]
    dump_dom: bool,

    /// Print the per-element property maps as JSON.
    #[arg(long)]
    dump_styles: bool,

    /// Print the laid-out box tree.
    #[arg(long)]
    dump_layout: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let document = load_document(&args.input, args.css.as_deref())?;
    eprintln!(
        "{} parsed {} ({} nodes, {} rules)",
        "bilby".green().bold(),
        args.input.display(),
        document.dom.len(),
        document.stylesheet.rules.len(),
    );

    if args.dump_dom {
        bilby_html::print_tree(&document.dom, document.dom.root(), 0);
    }

    let Some(styled) = document.style_tree() else {
        bail!("document has no root element");
    };

    if args.dump_styles {
        print_styles(&document, &styled)?;
    }

    let layout_root = document
        .layout(&styled, args.width, args.height)
        .context("layout failed")?;

    if args.dump_layout {
        print_layout(&layout_root, 0);
    }

    let display_list = build_display_list(&layout_root);
    let mut renderer = Renderer::new(args.width, args.height);
    renderer.render(&display_list);
    renderer.save(&args.output)?;

    eprintln!(
        "{} wrote {} ({}x{}, {} commands)",
        "bilby".green().bold(),
        args.output.display(),
        args.width,
        args.height,
        display_list.len(),
    );
    Ok(())
}

/// Dump every element's property map as one JSON object keyed by a small
/// CSS-like element path.
fn print_styles(document: &LoadedDocument, styled: &bilby_css::StyledNode) -> Result<()> {
    let mut entries = serde_json::Map::new();
    collect_styles(document, styled, &mut String::new(), &mut entries);
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

/// Walk the styled tree accumulating `path -> property map` entries.
fn collect_styles(
    document: &LoadedDocument,
    styled: &bilby_css::StyledNode,
    path: &mut String,
    entries: &mut serde_json::Map<String, serde_json::Value>,
) {
    if let Some(element) = document.dom.as_element(styled.node) {
        let previous_len = path.len();
        if !path.is_empty() {
            path.push_str(" > ");
        }
        path.push_str(&element.tag_name);
        if let Some(id) = element.id() {
            path.push('#');
            path.push_str(id);
        }

        if !styled.specified_values.is_empty() {
            let value = serde_json::to_value(&styled.specified_values)
                .unwrap_or(serde_json::Value::Null);
            let _ = entries.insert(path.clone(), value);
        }

        for child in &styled.children {
            collect_styles(document, child, path, entries);
        }
        path.truncate(previous_len);
    } else {
        for child in &styled.children {
            collect_styles(document, child, path, entries);
        }
    }
}

/// Print an indented rendering of the laid-out box tree.
fn print_layout(layout_box: &LayoutBox<'_>, depth: usize) {
    let indent = "  ".repeat(depth);
    let label = match layout_box.box_type {
        BoxType::Block(_) => "block",
        BoxType::Inline(_) => "inline",
        BoxType::Anonymous => "anonymous",
    };
    let d = &layout_box.dimensions;
    println!(
        "{indent}{} content=({}, {}) {}x{} margin=({}, {}, {}, {})",
        label.cyan(),
        d.content.x,
        d.content.y,
        d.content.width,
        d.content.height,
        d.margin.left,
        d.margin.right,
        d.margin.top,
        d.margin.bottom,
    );
    for child in &layout_box.children {
        print_layout(child, depth + 1);
    }
}
