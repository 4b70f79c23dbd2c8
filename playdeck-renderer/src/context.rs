//! Template context: serializable rendering payload built from a parsed page.

use serde::Serialize;

use crate::syntax::{NefCommand, Node};

/// Keys the Jekyll template always emits; a header region may override them.
const FRONT_MATTER_KEYS: &[&str] = &["layout", "title", "permalink"];

const DEFAULT_LAYOUT: &str = "docs";

/// Payload handed to the documentation templates.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub title: String,
    /// `key: value` lines of the YAML front matter, in output order.
    pub front_matter: Vec<String>,
    /// Visible content of the page, in source order.
    pub blocks: Vec<BlockCtx>,
}

/// A visible run of markup or code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockCtx {
    /// `"markup"` or `"code"`.
    pub kind: &'static str,
    /// Text without trailing newline. Code has surrounding blank lines removed.
    pub text: String,
}

impl PageContext {
    /// Build the context for the page titled `title`.
    ///
    /// Hidden regions are dropped. Header regions only feed the front matter.
    pub fn from_nodes(title: &str, nodes: &[Node], permalink: Option<&str>) -> Self {
        let mut blocks = Vec::new();
        let mut header = Vec::new();

        for node in nodes {
            match node {
                Node::Markup { text } => blocks.push(BlockCtx {
                    kind: "markup",
                    text: text.trim_end().to_owned(),
                }),
                Node::Code { text } => {
                    let code = trim_blank_lines(text);
                    if !code.is_empty() {
                        blocks.push(BlockCtx {
                            kind: "code",
                            text: code.to_owned(),
                        });
                    }
                }
                Node::Nef {
                    command: NefCommand::Header,
                    nodes,
                } => header.extend(header_lines(nodes)),
                Node::Nef {
                    command: NefCommand::Hidden,
                    ..
                } => {}
            }
        }

        PageContext {
            title: title.to_owned(),
            front_matter: front_matter(title, permalink, header),
            blocks,
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, tera::Error> {
        tera::Context::from_serialize(self)
    }
}

fn trim_blank_lines(text: &str) -> &str {
    let start = text
        .char_indices()
        .take_while(|(_, c)| c.is_whitespace())
        .filter(|(_, c)| *c == '\n')
        .last()
        .map_or(0, |(i, _)| i + 1);
    text[start..].trim_end()
}

/// Non-comment lines of a header region, trimmed.
fn header_lines(nodes: &[Node]) -> Vec<String> {
    nodes
        .iter()
        .filter_map(|n| match n {
            Node::Markup { text } | Node::Code { text } => Some(text.as_str()),
            Node::Nef { .. } => None,
        })
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|l| !l.is_empty() && *l != "/*" && *l != "*/")
        .map(str::to_owned)
        .collect()
}

fn header_key(line: &str) -> Option<&str> {
    line.split_once(':').map(|(k, _)| k.trim())
}

fn front_matter(title: &str, permalink: Option<&str>, header: Vec<String>) -> Vec<String> {
    let overridden = |key: &str| header.iter().any(|l| header_key(l) == Some(key));

    let mut lines = Vec::new();
    for key in FRONT_MATTER_KEYS {
        if overridden(key) {
            continue;
        }
        match *key {
            "layout" => lines.push(format!("layout: {DEFAULT_LAYOUT}")),
            "title" => lines.push(format!("title: {title}")),
            "permalink" => {
                if let Some(p) = permalink {
                    lines.push(format!("permalink: {p}"));
                }
            }
            _ => {}
        }
    }
    lines.extend(header);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    #[test]
    fn hidden_regions_are_dropped() {
        let nodes = parse("//: Intro\n// nef:begin:hidden\nimport A\n// nef:end\nlet x = 1\n").unwrap();
        let ctx = PageContext::from_nodes("Page", &nodes, None);
        let kinds: Vec<_> = ctx.blocks.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec!["markup", "code"]);
        assert_eq!(ctx.blocks[1].text, "let x = 1");
    }

    #[test]
    fn blank_code_between_markup_is_dropped() {
        let nodes = parse("//: One\n\n\n//: Two\n").unwrap();
        let ctx = PageContext::from_nodes("Page", &nodes, None);
        assert_eq!(ctx.blocks.len(), 2);
        assert!(ctx.blocks.iter().all(|b| b.kind == "markup"));
    }

    #[test]
    fn code_keeps_inner_indentation() {
        assert_eq!(trim_blank_lines("\n\n  let a = 1\n    b\n\n"), "  let a = 1\n    b");
    }

    #[test]
    fn default_front_matter() {
        let ctx = PageContext::from_nodes("Basics", &[], Some("/docs/intro/basics/"));
        assert_eq!(
            ctx.front_matter,
            vec!["layout: docs", "title: Basics", "permalink: /docs/intro/basics/"]
        );
    }

    #[test]
    fn header_overrides_and_extends_front_matter() {
        let src = "// nef:begin:header\n/*\n  layout: home\n  tags: [fp]\n*/\n// nef:end\n";
        let nodes = parse(src).unwrap();
        let ctx = PageContext::from_nodes("Basics", &nodes, Some("/docs/"));
        assert_eq!(
            ctx.front_matter,
            vec!["title: Basics", "permalink: /docs/", "layout: home", "tags: [fp]"]
        );
        assert!(ctx.blocks.is_empty());
    }
}
