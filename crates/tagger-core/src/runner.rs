//! Per-file processing and batch runner

use std::path::Path;

use tagger_content::{Engine, TextOutcome, diff, parsed};
use tagger_fs::{NormalizedPath, checksum, io};
use tracing::{debug, error, info, warn};

use crate::kind::DocumentKind;
use crate::policy::Policy;
use crate::report::{BatchReport, FileReport, Outcome};

/// Whether patched files are written back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Write,
    /// Compute changes and diffs without touching any file
    DryRun,
}

/// Applies a policy to files, one at a time
#[derive(Debug, Clone)]
pub struct Runner {
    policy: Policy,
    mode: RunMode,
}

impl Runner {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            mode: RunMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Process every path in order. Failures are recorded per file.
    pub fn run<I, P>(&self, paths: I) -> BatchReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut batch = BatchReport::default();
        for path in paths {
            batch.push(self.process(path));
        }
        debug!(
            files = batch.files.len(),
            patched = batch.patched(),
            pending = batch.pending(),
            skipped = batch.skipped(),
            failed = batch.failed(),
            entries = batch.entries_added(),
            "batch complete"
        );
        batch
    }

    pub fn process(&self, path: impl AsRef<Path>) -> FileReport {
        let path = NormalizedPath::new(path);

        if let Some(pattern) = self.policy.excluded_by(&path) {
            info!(path = %path, pattern, "skipping excluded path");
            return FileReport::new(
                &path,
                Outcome::SkippedExcluded {
                    pattern: pattern.to_string(),
                },
            );
        }

        let Some(kind) = DocumentKind::detect(&path) else {
            info!(path = %path, "skipping file of unknown type");
            return FileReport::new(&path, Outcome::SkippedUnknownType);
        };
        let report = FileReport::new(&path, Outcome::Unchanged).with_kind(kind);

        let source = match io::read_text(&path) {
            Ok(source) => source,
            Err(e) => {
                warn!(path = %path, error = %e, "skipping unreadable file");
                let reason = if e.is_decode_error() {
                    "not valid UTF-8".to_string()
                } else {
                    e.to_string()
                };
                return report.with_outcome(Outcome::SkippedUnreadable { reason });
            }
        };
        let mut report = FileReport {
            checksum_before: Some(checksum::of_text(&source)),
            ..report
        };

        let patch = match self.patch(kind, &source) {
            Ok(patch) => patch,
            Err(e) => {
                warn!(path = %path, error = %e, "skipping unparseable file");
                return report.with_outcome(Outcome::SkippedUnreadable { reason: e.to_string() });
            }
        };
        report.stats = patch.stats;

        let Some(text) = patch.text else {
            debug!(path = %path, resources = patch.stats.resources, "nothing to patch");
            return report;
        };
        report.lines_added = diff::inserted_lines(&source, &text);
        report.checksum_after = Some(checksum::of_text(&text));

        match self.mode {
            RunMode::DryRun => {
                report.diff = Some(diff::unified_diff(path.as_str(), &source, &text));
                report.with_outcome(Outcome::WouldPatch)
            }
            RunMode::Write => match io::write_text(&path, &text) {
                Ok(()) => {
                    info!(path = %path, entries = patch.stats.entries_added, "patched file");
                    report.with_outcome(Outcome::Patched)
                }
                Err(e) => {
                    error!(path = %path, error = %e, "failed to write patched file");
                    report.with_outcome(Outcome::Failed { reason: e.to_string() })
                }
            },
        }
    }

    fn patch(&self, kind: DocumentKind, source: &str) -> tagger_content::Result<TextOutcome> {
        let rules = self.policy.rules_for(kind);
        match kind.dialect() {
            Some(dialect) => Ok(Engine::new(dialect.dialect(), rules, &self.policy.tags).patch_text(source)),
            None => parsed::patch_terraform_json(source, rules, &self.policy.tags),
        }
    }
}
