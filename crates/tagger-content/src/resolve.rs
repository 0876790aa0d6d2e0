//! Declared type lookup for resource bodies
//!
//! A resource body's type is declared by a sibling of its opener, either
//! before it (the usual layout) or after the body ends. The search walks
//! outward from the opener, stays at the opener's structural level and
//! stops as soon as it leaves the enclosing resource.

use crate::dialect::{Dialect, Opener};
use crate::scanner::{self, Block, MAX_LOOKAHEAD};

pub(crate) fn resolve_type(dialect: &dyn Dialect, lines: &[String], block: &Block, opener: &Opener) -> Option<String> {
    if let Some(declared) = &opener.declared_type {
        return Some(declared.clone());
    }
    let upward = (block.start.saturating_sub(MAX_LOOKAHEAD)..block.start).rev();
    let downward = block.end..lines.len().min(block.end.saturating_add(MAX_LOOKAHEAD));

    search(dialect, lines, upward, opener.width(), true).or_else(|| search(dialect, lines, downward, opener.width(), false))
}

fn search(
    dialect: &dyn Dialect,
    lines: &[String],
    indices: impl Iterator<Item = usize>,
    anchor: usize,
    upward: bool,
) -> Option<String> {
    match dialect.delimiters() {
        None => {
            for idx in indices {
                let line = &lines[idx];
                if dialect.is_trivia(line) {
                    continue;
                }
                let width = scanner::indent_width(line);
                if width < anchor {
                    break;
                }
                let found = (width == anchor).then(|| dialect.match_type(line)).flatten();
                if found.is_some() {
                    return found;
                }
            }
            None
        }
        Some(delimiters) => {
            // depth relative to the opener's level
            let mut depth = 0isize;
            for idx in indices {
                let line = &lines[idx];
                let net = scanner::net_depth(line, delimiters);
                if upward {
                    depth -= net;
                }
                if depth < 0 {
                    break;
                }
                let found = (depth == 0 && !dialect.is_trivia(line))
                    .then(|| dialect.match_type(line))
                    .flatten();
                if found.is_some() {
                    return found;
                }
                if !upward {
                    depth += net;
                }
            }
            None
        }
    }
}
