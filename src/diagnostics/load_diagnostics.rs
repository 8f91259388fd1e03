//! Load diagnostics with structured skip reasons and error reporting.
//!
//! Every file a load session skips or fails on becomes one record. Records
//! carry a stable sort key so a batch reports identically across runs
//! regardless of the order parallel parsing finished in.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Reason why an input entry was skipped without being parsed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Not a regular file (directory placeholder, symlink, device)
    NotAFile,
    /// Extension is neither `.class` nor a recognized archive
    UnrecognizedExtension,
}

impl SkipReason {
    pub fn sort_key(&self) -> u8 {
        match self {
            SkipReason::NotAFile => 0,
            SkipReason::UnrecognizedExtension => 1,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SkipReason::NotAFile => "not a regular file",
            SkipReason::UnrecognizedExtension => "not a classfile or archive",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Stage of the load pipeline where a failure happened.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub enum LoadStage {
    /// Reading bytes from disk
    Read,
    /// Opening or walking an archive
    Archive,
    /// Decoding the classfile structure
    Parse,
}

impl LoadStage {
    pub fn sort_key(&self) -> u8 {
        match self {
            LoadStage::Read => 0,
            LoadStage::Archive => 1,
            LoadStage::Parse => 2,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LoadStage::Read => "read",
            LoadStage::Archive => "archive",
            LoadStage::Parse => "parse",
        }
    }
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// One diagnostic record: a skip or an error for one entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum LoadDiagnostic {
    Skipped {
        path: String,
        reason: SkipReason,
    },
    Failed {
        path: String,
        stage: LoadStage,
        detail: String,
    },
}

impl LoadDiagnostic {
    pub fn path(&self) -> &str {
        match self {
            LoadDiagnostic::Skipped { path, .. } | LoadDiagnostic::Failed { path, .. } => path,
        }
    }

    /// (class, sub-key, path) tuple giving the canonical report order:
    /// skips before failures, then by reason/stage, then by path.
    fn sort_key(&self) -> (u8, u8, &str) {
        match self {
            LoadDiagnostic::Skipped { path, reason } => (0, reason.sort_key(), path),
            LoadDiagnostic::Failed { path, stage, .. } => (1, stage.sort_key(), path),
        }
    }
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadDiagnostic::Skipped { path, reason } => {
                write!(f, "skipped {path}: {reason}")
            }
            LoadDiagnostic::Failed {
                path,
                stage,
                detail,
            } => write!(f, "failed {path} ({stage}): {detail}"),
        }
    }
}

impl PartialOrd for LoadDiagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LoadDiagnostic {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Collects diagnostics during a load session.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    records: Vec<LoadDiagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: LoadDiagnostic) {
        self.records.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records in canonical order.
    pub fn sorted(&self) -> Vec<LoadDiagnostic> {
        let mut records = self.records.clone();
        records.sort();
        records
    }

    /// Print every record to stderr in canonical order.
    pub fn report(&self) {
        for record in self.sorted() {
            eprintln!("{record}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_is_deterministic() {
        let mut sink = DiagnosticSink::new();
        sink.push(LoadDiagnostic::Failed {
            path: "b.class".into(),
            stage: LoadStage::Parse,
            detail: "bad magic number 0x00000000".into(),
        });
        sink.push(LoadDiagnostic::Skipped {
            path: "a.txt".into(),
            reason: SkipReason::UnrecognizedExtension,
        });
        sink.push(LoadDiagnostic::Failed {
            path: "a.class".into(),
            stage: LoadStage::Read,
            detail: "permission denied".into(),
        });

        let sorted = sink.sorted();
        assert_eq!(sorted[0].path(), "a.txt");
        assert_eq!(sorted[1].path(), "a.class");
        assert_eq!(sorted[2].path(), "b.class");
    }
}
