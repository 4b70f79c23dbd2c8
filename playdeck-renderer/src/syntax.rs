//! Page syntax: splits a page's `Contents.swift` into markup, code and
//! `nef` command regions.
//!
//! ```text
//! /*:                      ┐
//!  # Title                 │ Markup
//!  */                      ┘
//! //: single markup line     Markup
//! let x = 1                  Code
//! // nef:begin:hidden      ┐
//! import Helpers           │ Nef { Hidden, [Code] }
//! // nef:end               ┘
//! ```
//!
//! Consecutive lines of the same kind are merged into one node.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static NEF_BEGIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//\s*nef:begin:([A-Za-z]+)\s*$").unwrap());

static NEF_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^//\s*nef:end\s*$").unwrap());

/// Region commands understood inside `// nef:begin:<command>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NefCommand {
    /// Front matter for documentation targets; never compiled.
    Header,
    /// Compiled, but left out of documentation targets.
    Hidden,
}

impl fmt::Display for NefCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NefCommand::Header => write!(f, "header"),
            NefCommand::Hidden => write!(f, "hidden"),
        }
    }
}

/// One node of a parsed page. Text always ends with a newline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Markup { text: String },
    Code { text: String },
    Nef { command: NefCommand, nodes: Vec<Node> },
}

/// Malformed page source. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("line {line}: unknown nef command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: nef region opened inside another nef region")]
    NestedRegion { line: usize },

    #[error("line {line}: nef region is never closed")]
    UnclosedRegion { line: usize },

    #[error("line {line}: `nef:end` without a matching `nef:begin`")]
    UnmatchedEnd { line: usize },

    #[error("line {line}: markup comment is never closed")]
    UnclosedMarkup { line: usize },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Markup,
    Code,
}

fn push_line(nodes: &mut Vec<Node>, kind: Kind, line: &str) {
    match (nodes.last_mut(), kind) {
        (Some(Node::Markup { text }), Kind::Markup) | (Some(Node::Code { text }), Kind::Code) => {
            text.push_str(line);
            text.push('\n');
        }
        (_, Kind::Markup) => nodes.push(Node::Markup {
            text: format!("{line}\n"),
        }),
        (_, Kind::Code) => nodes.push(Node::Code {
            text: format!("{line}\n"),
        }),
    }
}

fn parse_command(line: usize, raw: &str) -> Result<NefCommand, SyntaxError> {
    match raw.to_ascii_lowercase().as_str() {
        "header" => Ok(NefCommand::Header),
        "hidden" => Ok(NefCommand::Hidden),
        _ => Err(SyntaxError::UnknownCommand {
            line,
            command: raw.to_owned(),
        }),
    }
}

/// Parse page source into nodes.
pub fn parse(source: &str) -> Result<Vec<Node>, SyntaxError> {
    let mut root: Vec<Node> = Vec::new();
    // Open nef region: (command, first line, nodes collected so far).
    let mut region: Option<(NefCommand, usize, Vec<Node>)> = None;
    // First line of an open `/*:` comment.
    let mut markup_since: Option<usize> = None;

    for (index, line) in source.lines().enumerate() {
        let number = index + 1;
        let target = match region.as_mut() {
            Some((_, _, nodes)) => nodes,
            None => &mut root,
        };

        if markup_since.is_some() {
            match line.find("*/") {
                Some(end) => {
                    let rest = &line[..end];
                    if !rest.trim().is_empty() {
                        push_line(target, Kind::Markup, rest.trim_end());
                    }
                    markup_since = None;
                }
                None => push_line(target, Kind::Markup, line),
            }
            continue;
        }

        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("/*:") {
            match rest.find("*/") {
                Some(end) => {
                    let inline = rest[..end].trim();
                    if !inline.is_empty() {
                        push_line(target, Kind::Markup, inline);
                    }
                }
                None => {
                    if !rest.trim().is_empty() {
                        push_line(target, Kind::Markup, rest.trim());
                    }
                    markup_since = Some(number);
                }
            }
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("//:") {
            push_line(target, Kind::Markup, rest.strip_prefix(' ').unwrap_or(rest));
            continue;
        }

        if let Some(caps) = NEF_BEGIN.captures(trimmed) {
            if region.is_some() {
                return Err(SyntaxError::NestedRegion { line: number });
            }
            let command = parse_command(number, &caps[1])?;
            region = Some((command, number, Vec::new()));
            continue;
        }

        if NEF_END.is_match(trimmed) {
            let Some((command, _, nodes)) = region.take() else {
                return Err(SyntaxError::UnmatchedEnd { line: number });
            };
            root.push(Node::Nef { command, nodes });
            continue;
        }

        push_line(target, Kind::Code, line);
    }

    if let Some(line) = markup_since {
        return Err(SyntaxError::UnclosedMarkup { line });
    }
    if let Some((_, line, _)) = region {
        return Err(SyntaxError::UnclosedRegion { line });
    }
    Ok(root)
}

/// One line per node, indented by nesting depth.
pub fn describe(nodes: &[Node]) -> String {
    fn walk(nodes: &[Node], depth: usize, out: &mut String) {
        for node in nodes {
            let indent = "  ".repeat(depth);
            match node {
                Node::Markup { text } => {
                    out.push_str(&format!("{indent}markup ({} lines)\n", text.lines().count()));
                }
                Node::Code { text } => {
                    out.push_str(&format!("{indent}code ({} lines)\n", text.lines().count()));
                }
                Node::Nef { command, nodes } => {
                    out.push_str(&format!("{indent}nef:{command}\n"));
                    walk(nodes, depth + 1, out);
                }
            }
        }
    }
    let mut out = String::new();
    walk(nodes, 0, &mut out);
    out
}
