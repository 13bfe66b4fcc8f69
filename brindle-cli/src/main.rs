//! Brindle CLI
//!
//! Parse an HTML or XML document and print what a selector finds.

use std::path::PathBuf;

use anyhow::{Context, Result};
use brindle::dom::{FormatOptions, NodeId, NodeSnapshot};
use brindle::{Document, read_source};
use clap::Parser;
use owo_colors::OwoColorize;

/// Brindle - query HTML and XML documents with CSS selectors
#[derive(Parser, Debug)]
#[command(name = "brindle")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print every <a> element of a page
    brindle page.html -s a

    # Print the id and the <name>/<age> children of every <student>
    brindle --xml students.xml -s student --attr id --child name --child age

    # Parse inline markup and dump the match as JSON
    brindle --html '<ul><li>1</li><li>2</li></ul>' -s 'li:last-child' --json

    # Show the whole tree and what the parser recovered from
    brindle --tree --issues broken.html
"#)]
struct Cli {
    /// Path to the document
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse this markup instead of reading a file
    #[arg(long, value_name = "MARKUP", conflicts_with = "path")]
    html: Option<String>,

    /// Selector to run from the document node
    #[arg(short, long, value_name = "SELECTOR")]
    select: Option<String>,

    /// Use XML rules (case-sensitive names, no void or raw-text elements)
    #[arg(long)]
    xml: bool,

    /// Encoding label for FILE, e.g. gbk or windows-1252 (default: UTF-8)
    #[arg(short, long, value_name = "LABEL", requires = "path")]
    encoding: Option<String>,

    /// Indent and break lines in printed markup
    #[arg(short, long)]
    format: bool,

    /// Indentation unit used with --format
    #[arg(long, default_value = "  ", value_name = "STRING")]
    indent: String,

    /// Print matches as JSON instead of markup
    #[arg(long, conflicts_with_all = ["attr", "child", "tree"])]
    json: bool,

    /// Print this attribute of each match (repeatable)
    #[arg(short, long, value_name = "NAME")]
    attr: Vec<String>,

    /// Print the inner markup of the first child element with this name
    /// (repeatable)
    #[arg(short, long, value_name = "NAME")]
    child: Vec<String>,

    /// Print a debug outline instead of markup
    #[arg(long)]
    tree: bool,

    /// Report parse issues on stderr
    #[arg(long)]
    issues: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let doc = load_doc(&cli)?;

    if cli.issues {
        print_issues(&doc);
    }

    let matches = match cli.select.as_deref() {
        Some(selector) => doc.search(selector),
        None => vec![doc.document()],
    };

    if cli.json {
        let snapshots: Vec<NodeSnapshot> = matches
            .iter()
            .filter_map(|&id| doc.tree().snapshot(id))
            .collect();
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
        return Ok(());
    }

    if cli.select.is_some() {
        eprintln!("{}", format!("{} match(es)", matches.len()).dimmed());
    }
    for (i, &id) in matches.iter().enumerate() {
        if cli.attr.is_empty() && cli.child.is_empty() {
            print_node(&cli, &doc, id);
        } else {
            if i > 0 {
                println!();
            }
            print_fields(&cli, &doc, id);
        }
    }
    Ok(())
}

/// Load the document from CLI arguments
fn load_doc(cli: &Cli) -> Result<Document> {
    if let Some(ref markup) = cli.html {
        Ok(Document::from_string_with_mode(markup, cli.xml))
    } else if let Some(ref path) = cli.path {
        let source = read_source(path, cli.encoding.as_deref())
            .with_context(|| format!("cannot load {}", path.display()))?;
        Ok(Document::from_string_with_mode(&source, cli.xml))
    } else {
        anyhow::bail!("a FILE or --html is required")
    }
}

fn print_issues(doc: &Document) {
    for issue in doc.issues() {
        if issue.fatal {
            eprintln!("{}", issue.red());
        } else {
            eprintln!("{}", issue.yellow());
        }
    }
}

/// Print one match as markup or as an outline
fn print_node(cli: &Cli, doc: &Document, id: NodeId) {
    let tree = doc.tree();
    if cli.tree {
        print!("{}", tree.outline(id));
        return;
    }
    let options = FormatOptions {
        format: cli.format,
        ..FormatOptions::default()
    }
    .with_indent(cli.indent.as_str());
    println!("{}", tree.serialize(id, &options));
}

/// Print `name:value` lines for the requested attributes and children
fn print_fields(cli: &Cli, doc: &Document, id: NodeId) {
    let tree = doc.tree();
    let Some(element) = tree.as_element(id) else {
        return;
    };
    for name in &cli.attr {
        let value = element.attr_value(name).unwrap_or_default();
        println!("{}:{value}", name.green());
    }
    for name in &cli.child {
        let inner = tree
            .child_elements_named(id, name)
            .first()
            .map(|&child| tree.inner(child))
            .unwrap_or_default();
        println!("{}:{inner}", name.green());
    }
}
