//! Structured diagnostics for load operations.
//!
//! Provides deterministic, sortable diagnostic types for skip reasons and
//! per-file errors. One record per skipped or failed entry; a batch of
//! diagnostics sorts the same way every run.

pub mod load_diagnostics;

pub use load_diagnostics::{DiagnosticSink, LoadDiagnostic, LoadStage, SkipReason};
