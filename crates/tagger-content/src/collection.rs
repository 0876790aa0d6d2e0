//! Locating, fabricating and patching tag collections

use crate::dialect::{Dialect, Form, Role};
use crate::rules::RequiredTag;
use crate::scanner::{self, Extent};
use std::collections::HashSet;
use std::ops::Range;
use tracing::debug;

/// Replacement lines for a window plus the number of entries added
#[derive(Debug)]
pub(crate) struct Rewrite {
    pub lines: Vec<String>,
    pub added: usize,
}

/// Indentation of an owner's direct children
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    pub child: String,
    pub unit: String,
}

/// An owner block (resource body or replica item) seen as a window of lines
#[derive(Debug)]
pub(crate) struct Scope<'a> {
    pub window: &'a [String],
    pub body: Range<usize>,
    /// Virtual first line for sequence items whose first member shares
    /// the marker line
    pub header: Option<String>,
    pub owner_indent: String,
}

impl<'a> Scope<'a> {
    pub fn new(window: &'a [String], closed: bool, owner_indent: &str) -> Self {
        let end = if closed { window.len().saturating_sub(1) } else { window.len() };
        Self {
            window,
            body: 1..end.max(1),
            header: None,
            owner_indent: owner_indent.to_string(),
        }
    }

    pub fn with_header(mut self, header: Option<String>) -> Self {
        self.header = header;
        self
    }

    fn view(&self, idx: usize) -> &str {
        match &self.header {
            Some(header) if idx == 0 => header,
            _ => &self.window[idx],
        }
    }

    pub fn layout(&self, dialect: &dyn Dialect) -> Layout {
        let owner = self.owner_indent.as_str();
        let child = match &self.header {
            Some(header) => scanner::indent_of(header).to_string(),
            None => self.window[self.body.clone()]
                .iter()
                .find(|line| !dialect.is_trivia(line))
                .map(|line| scanner::indent_of(line))
                .filter(|indent| indent.len() > owner.len())
                .map_or_else(|| format!("{owner}  "), str::to_string),
        };
        let unit = child
            .strip_prefix(owner)
            .filter(|unit| !unit.is_empty())
            .unwrap_or("  ")
            .to_string();
        Layout { child, unit }
    }

    /// Indices of non-trivia lines sitting directly inside the owner.
    pub fn child_lines(&self, dialect: &dyn Dialect, layout: &Layout) -> Vec<usize> {
        match dialect.delimiters() {
            None => {
                let first = if self.header.is_some() { 0 } else { self.body.start };
                (first..self.body.end)
                    .filter(|&idx| {
                        let line = self.view(idx);
                        !dialect.is_trivia(line) && scanner::indent_width(line) == layout.child.len()
                    })
                    .collect()
            }
            Some(delimiters) => {
                let mut depth = 0isize;
                let mut found = Vec::new();
                for idx in self.body.clone() {
                    let line = &self.window[idx];
                    if depth == 0 && !dialect.is_trivia(line) {
                        found.push(idx);
                    }
                    depth += scanner::net_depth(line, delimiters);
                }
                found
            }
        }
    }

    /// First child line recognised by `matcher`.
    pub fn find_member<T>(
        &self,
        dialect: &dyn Dialect,
        layout: &Layout,
        matcher: impl Fn(&str) -> Option<T>,
    ) -> Option<(usize, T)> {
        self.child_lines(dialect, layout)
            .into_iter()
            .find_map(|idx| matcher(self.view(idx)).map(|found| (idx, found)))
    }

    /// Line where a new member goes: the head of the body, or after the
    /// value of a header member that shares the marker line.
    fn insertion_point(&self, dialect: &dyn Dialect, layout: &Layout) -> usize {
        if self.header.is_none() {
            return self.body.start;
        }
        let is_trivia = |line: &str| dialect.is_trivia(line);
        match scanner::indented_block(self.window, 0, layout.child.len(), is_trivia, true) {
            Extent::Block(value) => value.end.clamp(self.body.start, self.body.end),
            _ => self.body.start,
        }
    }

    fn splice(&self, range: Range<usize>, replacement: Vec<String>) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.window.len() + replacement.len());
        lines.extend_from_slice(&self.window[..range.start]);
        lines.extend(replacement);
        lines.extend_from_slice(&self.window[range.end..]);
        lines
    }
}

/// Make sure the owner's tag collection carries every required tag.
pub(crate) fn ensure_tags(dialect: &dyn Dialect, scope: &Scope<'_>, tags: &[RequiredTag]) -> Option<Rewrite> {
    if tags.is_empty() {
        return None;
    }
    let layout = scope.layout(dialect);
    let Some((idx, opener)) = scope.find_member(dialect, &layout, |line| dialect.match_tags(line)) else {
        return Some(fabricate(dialect, scope, &layout, tags));
    };

    match opener.form {
        Form::Other => {
            debug!(line = idx, "tag collection is not a literal, leaving it alone");
            None
        }
        Form::EmptyInline => {
            let (open, close) = dialect.expand_inline(&scope.window[idx])?;
            let required: Vec<&RequiredTag> = tags.iter().collect();
            let indent = format!("{}{}", opener.indent, layout.unit);
            let mut replacement = vec![open];
            replacement.extend(render_entries(dialect, &indent, &layout.unit, &required, false));
            replacement.extend(close);
            Some(Rewrite {
                lines: scope.splice(idx..idx + 1, replacement),
                added: required.len(),
            })
        }
        Form::Open => {
            let Extent::Block(block) = dialect.extent(scope.window, idx, opener.width(), Role::Tags) else {
                debug!(line = idx, "tag collection has no usable extent");
                return None;
            };
            let body = block.body();
            let (lines, added) = patch_entries(
                dialect,
                &scope.window[body.clone()],
                &opener.indent,
                &layout.unit,
                tags,
            )?;
            Some(Rewrite {
                lines: scope.splice(body.start..body.start, lines),
                added,
            })
        }
    }
}

fn fabricate(dialect: &dyn Dialect, scope: &Scope<'_>, layout: &Layout, tags: &[RequiredTag]) -> Rewrite {
    let followed = scope.window[scope.body.clone()]
        .iter()
        .any(|line| !dialect.is_trivia(line));
    let required: Vec<&RequiredTag> = tags.iter().collect();
    let entry_indent = format!("{}{}", layout.child, layout.unit);

    let mut collection = vec![dialect.render_collection_open(&layout.child)];
    collection.extend(render_entries(dialect, &entry_indent, &layout.unit, &required, false));
    collection.extend(dialect.render_collection_close(&layout.child, followed));

    let at = scope.insertion_point(dialect, layout);
    Rewrite {
        lines: scope.splice(at..at, collection),
        added: required.len(),
    }
}

/// Entries to insert at the head of an existing collection body, or `None`
/// when every required key is already present.
pub(crate) fn patch_entries(
    dialect: &dyn Dialect,
    body: &[String],
    collection_indent: &str,
    unit: &str,
    tags: &[RequiredTag],
) -> Option<(Vec<String>, usize)> {
    let present: HashSet<String> = body
        .iter()
        .filter(|line| !dialect.is_trivia(line))
        .flat_map(|line| dialect.entry_keys(line))
        .collect();
    let missing: Vec<&RequiredTag> = tags.iter().filter(|tag| !present.contains(&tag.key)).collect();
    if missing.is_empty() {
        return None;
    }

    let indent = dialect
        .sniff_entry_indent(body)
        .unwrap_or_else(|| format!("{collection_indent}{unit}"));
    let has_content = body.iter().any(|line| !dialect.is_trivia(line));
    Some((
        render_entries(dialect, &indent, unit, &missing, has_content),
        missing.len(),
    ))
}

fn render_entries(
    dialect: &dyn Dialect,
    indent: &str,
    unit: &str,
    tags: &[&RequiredTag],
    followed: bool,
) -> Vec<String> {
    let separator = dialect.entry_separator();
    let mut lines = Vec::new();
    for (n, tag) in tags.iter().enumerate() {
        let mut entry = dialect.render_entry(indent, unit, tag);
        let more = n + 1 < tags.len() || followed;
        if let (Some(separator), true, Some(last)) = (separator, more, entry.last_mut()) {
            last.push_str(separator);
        }
        lines.extend(entry);
    }
    lines
}
