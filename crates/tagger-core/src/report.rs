//! Per-file and per-batch reports

use serde::Serialize;
use tagger_content::PatchStats;
use tagger_fs::NormalizedPath;

use crate::error::Result;
use crate::kind::DocumentKind;

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Entries were inserted and the file was rewritten
    Patched,
    /// Entries would be inserted; nothing was written
    WouldPatch,
    /// No eligible resource needed a change
    Unchanged,
    /// The file could not be read or decoded
    SkippedUnreadable { reason: String },
    /// The file name matches no supported kind
    SkippedUnknownType,
    /// The path contains an excluded substring
    SkippedExcluded { pattern: String },
    /// The patched text could not be written back
    Failed { reason: String },
}

impl Outcome {
    /// Whether the file has changes that were not written.
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::WouldPatch)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            Outcome::SkippedUnreadable { .. } | Outcome::SkippedUnknownType | Outcome::SkippedExcluded { .. }
        )
    }
}

/// Result of processing one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub kind: Option<DocumentKind>,
    pub outcome: Outcome,
    pub stats: PatchStats,
    /// Lines the patch inserted
    pub lines_added: usize,
    /// Checksum of the file as read
    pub checksum_before: Option<String>,
    /// Checksum of the patched text, when there is one
    pub checksum_after: Option<String>,
    /// Unified diff of the pending change in dry runs
    #[serde(skip)]
    pub diff: Option<String>,
}

impl FileReport {
    pub fn new(path: &NormalizedPath, outcome: Outcome) -> Self {
        Self {
            path: path.as_str().to_string(),
            kind: None,
            outcome,
            stats: PatchStats::default(),
            lines_added: 0,
            checksum_before: None,
            checksum_after: None,
            diff: None,
        }
    }

    pub fn with_kind(mut self, kind: DocumentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }
}

/// Reports for a whole batch, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn push(&mut self, report: FileReport) {
        self.files.push(report);
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.files.iter().filter(|file| predicate(&file.outcome)).count()
    }

    pub fn patched(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Patched))
    }

    pub fn pending(&self) -> usize {
        self.count(Outcome::is_pending)
    }

    pub fn skipped(&self) -> usize {
        self.count(Outcome::is_skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Failed { .. }))
    }

    pub fn has_pending_changes(&self) -> bool {
        self.pending() > 0
    }

    pub fn entries_added(&self) -> usize {
        self.files.iter().map(|file| file.stats.entries_added).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcome: Outcome) -> FileReport {
        FileReport::new(&NormalizedPath::new("a.yaml"), outcome)
    }

    #[test]
    fn batch_counts_outcomes() {
        let mut batch = BatchReport::default();
        batch.push(report(Outcome::Patched));
        batch.push(report(Outcome::WouldPatch));
        batch.push(report(Outcome::SkippedUnknownType));
        batch.push(report(Outcome::SkippedExcluded {
            pattern: "test".into(),
        }));

        assert_eq!(batch.patched(), 1);
        assert_eq!(batch.pending(), 1);
        assert_eq!(batch.skipped(), 2);
        assert_eq!(batch.failed(), 0);
        assert!(batch.has_pending_changes());
    }

    #[test]
    fn json_report_tags_outcomes() {
        let mut batch = BatchReport::default();
        batch.push(
            report(Outcome::SkippedUnreadable {
                reason: "bad utf-8".into(),
            })
            .with_kind(DocumentKind::CloudFormationYaml),
        );
        let json: serde_json::Value = serde_json::from_str(&batch.to_json().unwrap()).unwrap();
        let file = &json["files"][0];
        assert_eq!(file["kind"], "cloudformation-yaml");
        assert_eq!(file["outcome"]["status"], "skipped_unreadable");
        assert_eq!(file["outcome"]["reason"], "bad utf-8");
        assert!(file.get("diff").is_none());
    }
}
