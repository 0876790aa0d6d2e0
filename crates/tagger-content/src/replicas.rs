//! Per-replica tagging for replicated resource types

use crate::collection::{Rewrite, Scope, ensure_tags};
use crate::dialect::{Dialect, Form, Role};
use crate::rules::RequiredTag;
use crate::scanner::{self, Extent};
use tracing::debug;

/// Ensure every element of the owner's replicas list carries the required
/// tags. Replica elements are never fabricated.
pub(crate) fn ensure_replica_tags(
    dialect: &dyn Dialect,
    scope: &Scope<'_>,
    tags: &[RequiredTag],
) -> Option<Rewrite> {
    let layout = scope.layout(dialect);
    let Some((idx, opener)) = scope.find_member(dialect, &layout, |line| dialect.match_replicas(line)) else {
        debug!("replicated resource has no replicas list");
        return None;
    };
    if opener.form != Form::Open {
        debug!(line = idx, "replicas list is not a multi-line literal");
        return None;
    }
    let Extent::Block(list) = dialect.extent(scope.window, idx, opener.width(), Role::Replicas) else {
        debug!(line = idx, "replicas list has no usable extent");
        return None;
    };

    let body = list.body();
    let bounded = &scope.window[..body.end];
    let mut lines: Vec<String> = scope.window[..body.start].to_vec();
    let mut added = 0;
    let mut item_column = None;
    let mut cursor = body.start;

    while cursor < body.end {
        let line = &scope.window[cursor];
        let column = dialect
            .match_item(line)
            .filter(|column| item_column.is_none_or(|expected| expected == *column));
        let item = match column {
            Some(column) if !dialect.is_trivia(line) => {
                item_column = Some(column);
                dialect.extent(bounded, cursor, column, Role::Item)
            }
            _ => Extent::Unresolved,
        };

        let Extent::Block(item) = item else {
            lines.push(line.clone());
            cursor += 1;
            continue;
        };

        let window = &scope.window[item.start..item.end];
        let item_scope =
            Scope::new(window, item.closed, scanner::indent_of(line)).with_header(dialect.item_header(line));
        match ensure_tags(dialect, &item_scope, tags) {
            Some(rewrite) => {
                added += rewrite.added;
                lines.extend(rewrite.lines);
            }
            None => lines.extend_from_slice(window),
        }
        cursor = item.end;
    }

    lines.extend_from_slice(&scope.window[body.end..]);
    (added > 0).then_some(Rewrite { lines, added })
}
