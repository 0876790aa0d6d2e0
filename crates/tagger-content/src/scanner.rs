//! Block boundary scanning
//!
//! Two realizations of "where does the block starting here end":
//! indentation for YAML, delimiter depth for JSON and HCL. Both give up
//! after [`MAX_LOOKAHEAD`] lines.

use std::ops::Range;

/// Maximum number of lines scanned past an opener before giving up.
pub const MAX_LOOKAHEAD: usize = 5000;

/// A half-open range of lines rooted at an opener line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub start: usize,
    pub end: usize,
    /// Whether the last line of the block is its closing delimiter line
    pub closed: bool,
}

impl Block {
    /// Lines strictly between the opener and the closer, if any.
    pub fn body(&self) -> Range<usize> {
        let end = if self.closed { self.end - 1 } else { self.end };
        self.start + 1..end.max(self.start + 1)
    }
}

/// Result of scanning for the end of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    Block(Block),
    /// The opener closes on its own line
    Inline,
    /// End of input or the lookahead ceiling was reached first
    Unresolved,
}

/// Delimiter characters and line-comment markers of a depth dialect
#[derive(Debug, Clone, Copy)]
pub struct Delimiters {
    pub open: &'static [char],
    pub close: &'static [char],
    pub comments: &'static [&'static str],
}

/// Leading spaces and tabs.
pub fn indent_of(line: &str) -> &str {
    let rest = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - rest.len()]
}

pub fn indent_width(line: &str) -> usize {
    indent_of(line).len()
}

fn is_sequence_entry(line: &str) -> bool {
    let rest = line.trim_start_matches([' ', '\t']);
    rest == "-" || rest.starts_with("- ") || rest.starts_with("-\t")
}

/// Indentation realization.
///
/// Lines deeper than `anchor` belong to the block; trivia never ends it
/// but trailing trivia is left outside. With `sequence_at_anchor`, `-`
/// entries at the anchor column also belong to it.
pub fn indented_block(
    lines: &[String],
    start: usize,
    anchor: usize,
    is_trivia: impl Fn(&str) -> bool,
    sequence_at_anchor: bool,
) -> Extent {
    let limit = lines.len().min(start.saturating_add(MAX_LOOKAHEAD));
    let mut end = start + 1;
    let mut idx = start + 1;

    while idx < limit {
        let line = &lines[idx];
        if is_trivia(line) {
            idx += 1;
            continue;
        }
        let width = indent_width(line);
        let nested = width > anchor || (sequence_at_anchor && width == anchor && is_sequence_entry(line));
        if !nested {
            return Extent::Block(Block {
                start,
                end,
                closed: false,
            });
        }
        idx += 1;
        end = idx;
    }

    if idx >= lines.len() {
        Extent::Block(Block {
            start,
            end,
            closed: false,
        })
    } else {
        Extent::Unresolved
    }
}

/// Depth realization.
///
/// Starts from the opener's net delimiter count and ends on the line
/// where the running depth returns to zero or below.
pub fn delimited_block(lines: &[String], start: usize, delimiters: Delimiters) -> Extent {
    let mut depth = net_depth(&lines[start], delimiters);
    if depth <= 0 {
        return Extent::Inline;
    }

    let limit = lines.len().min(start.saturating_add(MAX_LOOKAHEAD));
    for (idx, line) in lines.iter().enumerate().take(limit).skip(start + 1) {
        depth += net_depth(line, delimiters);
        if depth <= 0 {
            return Extent::Block(Block {
                start,
                end: idx + 1,
                closed: true,
            });
        }
    }
    Extent::Unresolved
}

/// Openers minus closers on one line, ignoring double-quoted strings and
/// anything after a line comment.
pub fn net_depth(line: &str, delimiters: Delimiters) -> isize {
    let mut depth = 0isize;
    let mut in_string = false;
    let mut escaped = false;

    for (pos, ch) in line.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        if ch == '"' {
            in_string = true;
        } else if delimiters.comments.iter().any(|c| line[pos..].starts_with(c)) {
            break;
        } else if delimiters.open.contains(&ch) {
            depth += 1;
        } else if delimiters.close.contains(&ch) {
            depth -= 1;
        }
    }
    depth
}
