//! Resource/property pairing driver
//!
//! [`Engine`] walks a document once. Each resource opener is sized with the
//! dialect's extent rule, its type is resolved and classified, and eligible
//! bodies are handed to the tag or replica patchers. Lines outside patched
//! collections are copied verbatim.

use crate::collection::{Rewrite, Scope, ensure_tags};
use crate::dialect::{Dialect, Form, Opener, Role};
use crate::document::Document;
use crate::replicas::ensure_replica_tags;
use crate::resolve::resolve_type;
use crate::rules::{Eligibility, RequiredTag, ResourceRules};
use crate::scanner::{Block, Extent};
use serde::Serialize;
use tracing::{debug, trace};

/// Counters for one patch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PatchStats {
    /// Resource bodies recognised
    pub resources: usize,
    /// Resources whose type is on an allow-list
    pub eligible: usize,
    /// Resources that received at least one entry
    pub patched: usize,
    pub entries_added: usize,
}

impl PatchStats {
    pub fn changed(&self) -> bool {
        self.entries_added > 0
    }
}

/// Patched text, present only when something changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOutcome {
    pub text: Option<String>,
    pub stats: PatchStats,
}

/// Line engine bound to one dialect and policy
pub struct Engine<'a> {
    dialect: &'a dyn Dialect,
    rules: &'a ResourceRules,
    tags: &'a [RequiredTag],
}

impl<'a> Engine<'a> {
    pub fn new(dialect: &'a dyn Dialect, rules: &'a ResourceRules, tags: &'a [RequiredTag]) -> Self {
        Self { dialect, rules, tags }
    }

    /// Patch source text, keeping its line-ending conventions.
    pub fn patch_text(&self, source: &str) -> TextOutcome {
        let document = Document::parse(source);
        let (patched, stats) = self.patch_document(&document);
        TextOutcome {
            text: stats.changed().then(|| patched.render()),
            stats,
        }
    }

    pub fn patch_document(&self, document: &Document) -> (Document, PatchStats) {
        let (lines, stats) = self.patch_lines(document.lines());
        (document.with_lines(lines), stats)
    }

    pub fn patch_lines(&self, lines: &[String]) -> (Vec<String>, PatchStats) {
        let mut out = Vec::with_capacity(lines.len());
        let mut stats = PatchStats::default();
        let mut idx = 0;

        while idx < lines.len() {
            let Some(opener) = self.dialect.match_resource(&lines[idx]) else {
                out.push(lines[idx].clone());
                idx += 1;
                continue;
            };

            match opener.form {
                Form::Other => {
                    trace!(line = idx + 1, "resource body is not a literal");
                    out.push(lines[idx].clone());
                    idx += 1;
                }
                Form::EmptyInline => {
                    stats.resources += 1;
                    out.extend(self.patch_empty(lines, idx, &opener, &mut stats));
                    idx += 1;
                }
                Form::Open => match self.dialect.extent(lines, idx, opener.width(), Role::Resource) {
                    Extent::Block(block) => {
                        stats.resources += 1;
                        out.extend(self.patch_block(lines, &block, &opener, &mut stats));
                        idx = block.end;
                    }
                    extent => {
                        debug!(line = idx + 1, ?extent, "resource body has no end, copying opener through");
                        out.push(lines[idx].clone());
                        idx += 1;
                    }
                },
            }
        }

        (out, stats)
    }

    fn classify(&self, lines: &[String], block: &Block, opener: &Opener, stats: &mut PatchStats) -> Eligibility {
        let resource_type = resolve_type(self.dialect, lines, block, opener);
        let eligibility = self.rules.classify(resource_type.as_deref());
        if eligibility.is_eligible() {
            stats.eligible += 1;
        }
        trace!(
            line = block.start + 1,
            resource_type = resource_type.as_deref().unwrap_or("<unresolved>"),
            ?eligibility,
            "classified resource"
        );
        eligibility
    }

    fn patch_block(&self, lines: &[String], block: &Block, opener: &Opener, stats: &mut PatchStats) -> Vec<String> {
        let window = &lines[block.start..block.end];
        let scope = Scope::new(window, block.closed, &opener.indent);
        let rewrite = match self.classify(lines, block, opener, stats) {
            Eligibility::Ineligible => None,
            Eligibility::Direct => ensure_tags(self.dialect, &scope, self.tags),
            Eligibility::Replicated => ensure_replica_tags(self.dialect, &scope, self.tags),
        };
        self.apply(rewrite, window, block, stats)
    }

    fn patch_empty(&self, lines: &[String], idx: usize, opener: &Opener, stats: &mut PatchStats) -> Vec<String> {
        let block = Block {
            start: idx,
            end: idx + 1,
            closed: false,
        };
        let window = &lines[idx..idx + 1];
        if self.classify(lines, &block, opener, stats) != Eligibility::Direct {
            return window.to_vec();
        }
        let Some((open, close)) = self.dialect.expand_inline(&lines[idx]) else {
            return window.to_vec();
        };

        let closed = close.is_some();
        let expanded: Vec<String> = std::iter::once(open).chain(close).collect();
        let scope = Scope::new(&expanded, closed, &opener.indent);
        let rewrite = ensure_tags(self.dialect, &scope, self.tags);
        self.apply(rewrite, window, &block, stats)
    }

    fn apply(&self, rewrite: Option<Rewrite>, window: &[String], block: &Block, stats: &mut PatchStats) -> Vec<String> {
        match rewrite {
            Some(rewrite) => {
                debug!(
                    dialect = %self.dialect.kind(),
                    line = block.start + 1,
                    added = rewrite.added,
                    "tagged resource"
                );
                stats.patched += 1;
                stats.entries_added += rewrite.added;
                rewrite.lines
            }
            None => window.to_vec(),
        }
    }
}
