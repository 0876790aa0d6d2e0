//! Dialect descriptions for the line engine
//!
//! A [`Dialect`] knows how to recognise the lines the engine cares about
//! (resource openers, type declarations, tag and replica members, entry
//! headers) and how to render new entries. Everything else, including the
//! traversal itself, lives in the generic engine.

mod hcl;
mod json;
mod yaml;

pub use hcl::HclDialect;
pub use json::JsonDialect;
pub use yaml::YamlDialect;

use crate::rules::RequiredTag;
use crate::scanner::{self, Delimiters, Extent};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Identifies a dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    Yaml,
    Json,
    Hcl,
}

impl DialectKind {
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            DialectKind::Yaml => &YamlDialect,
            DialectKind::Json => &JsonDialect,
            DialectKind::Hcl => &HclDialect,
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DialectKind::Yaml => "YAML",
            DialectKind::Json => "JSON",
            DialectKind::Hcl => "HCL",
        };
        f.write_str(name)
    }
}

/// Shape of the value that follows a member key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// Multi-line container starting on this line
    Open,
    /// `[]`, `{}` or the equivalent on the same line
    EmptyInline,
    /// Anything else: references, function calls, inline literals
    Other,
}

/// What an extent is being computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Resource,
    Tags,
    Replicas,
    Item,
}

impl Role {
    fn is_sequence(self) -> bool {
        matches!(self, Role::Tags | Role::Replicas)
    }
}

/// A recognised opener line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opener {
    pub indent: String,
    pub form: Form,
    /// Type declared on the opener line itself
    pub declared_type: Option<String>,
}

impl Opener {
    pub fn new(indent: &str, form: Form) -> Self {
        Self {
            indent: indent.to_string(),
            form,
            declared_type: None,
        }
    }

    pub fn width(&self) -> usize {
        self.indent.len()
    }
}

/// Line-level syntax of one template dialect
pub trait Dialect: Send + Sync {
    fn kind(&self) -> DialectKind;

    /// Delimiters for depth-structured dialects, `None` when structure
    /// comes from indentation.
    fn delimiters(&self) -> Option<Delimiters>;

    /// Blank or comment-only line.
    fn is_trivia(&self, line: &str) -> bool;

    fn match_resource(&self, line: &str) -> Option<Opener>;

    /// A type declaration on this line, unquoted.
    fn match_type(&self, line: &str) -> Option<String>;

    fn match_tags(&self, line: &str) -> Option<Opener>;

    fn match_replicas(&self, _line: &str) -> Option<Opener> {
        None
    }

    /// Column of a sequence item starting on this line.
    fn match_item(&self, _line: &str) -> Option<usize> {
        None
    }

    /// The item's first line with its sequence marker blanked out, when the
    /// item's first member shares that line.
    fn item_header(&self, _line: &str) -> Option<String> {
        None
    }

    /// Keys named by entry header lines. Value lines yield nothing.
    fn entry_keys(&self, line: &str) -> Vec<String>;

    /// Indent of existing entries in a collection body.
    fn sniff_entry_indent(&self, body: &[String]) -> Option<String>;

    fn render_entry(&self, indent: &str, unit: &str, tag: &RequiredTag) -> Vec<String>;

    fn render_collection_open(&self, indent: &str) -> String;

    /// Closing line of a fabricated collection; `followed` is true when
    /// other members come after it.
    fn render_collection_close(&self, indent: &str, followed: bool) -> Option<String>;

    /// Appended between consecutive entries.
    fn entry_separator(&self) -> Option<&'static str> {
        None
    }

    /// Split an empty inline container line into an opener line and an
    /// optional closer line.
    fn expand_inline(&self, line: &str) -> Option<(String, Option<String>)>;

    fn extent(&self, lines: &[String], start: usize, anchor: usize, role: Role) -> Extent {
        match self.delimiters() {
            Some(delimiters) => scanner::delimited_block(lines, start, delimiters),
            None => scanner::indented_block(lines, start, anchor, |l| self.is_trivia(l), role.is_sequence()),
        }
    }
}

static EMPTY_DELIMITED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<head>.*?)(?P<open>[\[{])[ \t]*(?P<close>[\]}])(?P<tail>[ \t]*,?)[ \t]*$")
        .expect("Invalid empty container regex")
});

/// Expansion of `head{}` / `head[],` into `head{` and `indent},`.
pub(crate) fn split_empty_delimited(line: &str) -> Option<(String, Option<String>)> {
    let caps = EMPTY_DELIMITED.captures(line)?;
    let opener = format!("{}{}", &caps["head"], &caps["open"]);
    let closer = format!(
        "{}{}{}",
        scanner::indent_of(line),
        &caps["close"],
        caps["tail"].trim()
    );
    Some((opener, Some(closer)))
}
