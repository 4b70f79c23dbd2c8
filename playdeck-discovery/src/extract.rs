//! Structure extraction from workspace and playground descriptors.
//!
//! Descriptors are XML, but only a handful of attribute values matter, so they
//! are pulled out with fixed patterns instead of a full XML parse:
//!
//! | descriptor                 | pattern                          |
//! |----------------------------|----------------------------------|
//! | `contents.xcworkspacedata` | `location = "group:<rel>.playground"` |
//! | `contents.xcplayground`    | `<page name='<page>'/>`          |
//! | `contents.xcplayground`    | `target-platform='<platform>'`   |

use std::sync::LazyLock;

use regex::Regex;

static PLAYGROUND_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)group:([^"\n]*\.playground)""#).unwrap());

static PAGE_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bname='([^']+)'").unwrap());

static TARGET_PLATFORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"target-platform='([^']+)'").unwrap());

/// Relative playground paths referenced by a workspace descriptor, in
/// document order.
pub fn playground_refs(descriptor: &str) -> Vec<String> {
    PLAYGROUND_REF
        .captures_iter(descriptor)
        .map(|c| c[1].to_owned())
        .collect()
}

/// Page names listed by a playground descriptor, in document order.
pub fn page_names(descriptor: &str) -> Vec<String> {
    PAGE_NAME
        .captures_iter(descriptor)
        .map(|c| c[1].to_owned())
        .collect()
}

/// Raw `target-platform` value of a playground descriptor.
pub fn target_platform(descriptor: &str) -> Option<&str> {
    TARGET_PLATFORM
        .captures(descriptor)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
