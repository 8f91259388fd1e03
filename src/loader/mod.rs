//! Classfile loading from directories, archives and loose files.
//!
//! One load session walks a list of input locations. Each location becomes a
//! group: a directory contributes every `.class` file under it (sorted, for
//! determinism), a jar/zip contributes its entries in archive order with
//! nested archives expanded in place, and a loose `.class` file contributes
//! itself. Entry bytes are materialized first, parsed in parallel under
//! rayon, then dispatched to listeners serially in entry order so event
//! nesting stays strict no matter how the parallel parsing interleaved.
//!
//! A malformed or unreadable entry never aborts the batch; it becomes a
//! diagnostic record and an error-carrying `EndClassfile` event.

mod events;

pub use events::{ClassfileCollector, LoadEvent, LoadListener};

use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::classfile::{self, Classfile};
use crate::diagnostics::{DiagnosticSink, LoadDiagnostic, LoadStage, SkipReason};

fn is_archive(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".jar") || lower.ends_with(".zip")
}

fn is_classfile(path: &str) -> bool {
    path.to_ascii_lowercase().ends_with(".class")
}

/// One materialized entry of a group: the bytes of a single `.class` file
/// and the path it was found under (`outer.jar!inner/Name.class` for archive
/// members).
struct GroupEntry {
    path: String,
    bytes: Vec<u8>,
}

/// Loads classfiles and fires lifecycle events.
///
/// The loader retains successfully parsed classfiles by default; the
/// transient variant hands them to listeners only, which keeps memory flat
/// on large inputs.
pub struct ClassfileLoader {
    retaining: bool,
    show_progress: bool,
    classfiles: Vec<Classfile>,
    diagnostics: DiagnosticSink,
}

impl Default for ClassfileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassfileLoader {
    /// Aggregating loader: parsed classfiles are kept and available through
    /// [`ClassfileLoader::classfiles`].
    pub fn new() -> Self {
        Self {
            retaining: true,
            show_progress: false,
            classfiles: Vec::new(),
            diagnostics: DiagnosticSink::new(),
        }
    }

    /// Listener-only loader; nothing is retained.
    pub fn transient() -> Self {
        Self {
            retaining: false,
            ..Self::new()
        }
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn classfiles(&self) -> &[Classfile] {
        &self.classfiles
    }

    pub fn into_classfiles(self) -> Vec<Classfile> {
        self.classfiles
    }

    pub fn diagnostics(&self) -> &DiagnosticSink {
        &self.diagnostics
    }

    /// Load every location, firing events on `listeners` as the session
    /// progresses.
    ///
    /// Only session-level failures (a location that does not exist at all)
    /// are errors; per-entry problems become diagnostics.
    pub fn load(
        &mut self,
        locations: &[impl AsRef<Path>],
        listeners: &mut [&mut dyn LoadListener],
    ) -> Result<()> {
        fire(listeners, &LoadEvent::BeginSession);
        for location in locations {
            self.load_group(location.as_ref(), listeners)?;
        }
        fire(listeners, &LoadEvent::EndSession);
        Ok(())
    }

    fn load_group(
        &mut self,
        location: &Path,
        listeners: &mut [&mut dyn LoadListener],
    ) -> Result<()> {
        let group_name = location.display().to_string();
        let metadata = std::fs::metadata(location)
            .with_context(|| format!("cannot access {group_name}"))?;

        let entries = if metadata.is_dir() {
            self.collect_directory(location)
        } else if is_archive(&group_name) {
            self.collect_archive_file(location, &group_name)
        } else if is_classfile(&group_name) {
            self.collect_loose_file(location, &group_name)
        } else {
            self.diagnostics.push(LoadDiagnostic::Skipped {
                path: group_name.clone(),
                reason: SkipReason::UnrecognizedExtension,
            });
            Vec::new()
        };

        fire(
            listeners,
            &LoadEvent::BeginGroup {
                name: &group_name,
                size: Some(entries.len()),
            },
        );

        let progress = if self.show_progress && !entries.is_empty() {
            let bar = ProgressBar::new(entries.len() as u64);
            if let Ok(style) =
                ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            {
                bar.set_style(style);
            }
            bar.set_message(group_name.clone());
            Some(bar)
        } else {
            None
        };

        // Parsing is embarrassingly parallel; event dispatch is not.
        // Results come back in entry order, so listeners observe the same
        // sequence every run.
        let parsed: Vec<Result<Classfile, _>> = entries
            .par_iter()
            .map(|entry| classfile::parse(&entry.bytes))
            .collect();

        for (entry, result) in entries.iter().zip(parsed) {
            fire(listeners, &LoadEvent::BeginFile { path: &entry.path });
            fire(listeners, &LoadEvent::BeginClassfile { path: &entry.path });
            if let Err(error) = &result {
                self.diagnostics.push(LoadDiagnostic::Failed {
                    path: entry.path.clone(),
                    stage: LoadStage::Parse,
                    detail: error.to_string(),
                });
            }
            fire(
                listeners,
                &LoadEvent::EndClassfile {
                    path: &entry.path,
                    result: &result,
                },
            );
            fire(listeners, &LoadEvent::EndFile { path: &entry.path });
            if let (true, Ok(classfile)) = (self.retaining, result) {
                self.classfiles.push(classfile);
            }
            if let Some(bar) = &progress {
                bar.inc(1);
            }
        }

        if let Some(bar) = progress {
            bar.finish_and_clear();
        }
        fire(listeners, &LoadEvent::EndGroup { name: &group_name });
        Ok(())
    }

    fn collect_directory(&mut self, root: &Path) -> Vec<GroupEntry> {
        let mut paths: Vec<_> = walkdir::WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect();
        paths.sort();

        let mut entries = Vec::new();
        for path in paths {
            let name = path.display().to_string();
            if is_classfile(&name) {
                match std::fs::read(&path) {
                    Ok(bytes) => entries.push(GroupEntry { path: name, bytes }),
                    Err(error) => self.diagnostics.push(LoadDiagnostic::Failed {
                        path: name,
                        stage: LoadStage::Read,
                        detail: error.to_string(),
                    }),
                }
            } else if is_archive(&name) {
                match std::fs::read(&path) {
                    Ok(bytes) => self.collect_archive_bytes(&name, bytes, &mut entries),
                    Err(error) => self.diagnostics.push(LoadDiagnostic::Failed {
                        path: name,
                        stage: LoadStage::Read,
                        detail: error.to_string(),
                    }),
                }
            }
            // Anything else under a directory is silently irrelevant.
        }
        entries
    }

    fn collect_archive_file(&mut self, path: &Path, name: &str) -> Vec<GroupEntry> {
        let mut entries = Vec::new();
        match std::fs::read(path) {
            Ok(bytes) => self.collect_archive_bytes(name, bytes, &mut entries),
            Err(error) => self.diagnostics.push(LoadDiagnostic::Failed {
                path: name.to_string(),
                stage: LoadStage::Read,
                detail: error.to_string(),
            }),
        }
        entries
    }

    fn collect_loose_file(&mut self, path: &Path, name: &str) -> Vec<GroupEntry> {
        match std::fs::read(path) {
            Ok(bytes) => vec![GroupEntry {
                path: name.to_string(),
                bytes,
            }],
            Err(error) => {
                self.diagnostics.push(LoadDiagnostic::Failed {
                    path: name.to_string(),
                    stage: LoadStage::Read,
                    detail: error.to_string(),
                });
                Vec::new()
            }
        }
    }

    /// Expand one archive, recursing into nested jars. Nested archives are
    /// read fully into memory; their entries get `outer!inner` paths.
    fn collect_archive_bytes(
        &mut self,
        archive_path: &str,
        bytes: Vec<u8>,
        entries: &mut Vec<GroupEntry>,
    ) {
        let mut archive = match zip::ZipArchive::new(Cursor::new(bytes)) {
            Ok(archive) => archive,
            Err(error) => {
                self.diagnostics.push(LoadDiagnostic::Failed {
                    path: archive_path.to_string(),
                    stage: LoadStage::Archive,
                    detail: error.to_string(),
                });
                return;
            }
        };

        for index in 0..archive.len() {
            let (entry_name, data) = match archive.by_index(index) {
                Ok(mut file) => {
                    if file.is_dir() {
                        continue;
                    }
                    let entry_name = format!("{archive_path}!{}", file.name());
                    let mut data = Vec::with_capacity(file.size() as usize);
                    if let Err(error) = file.read_to_end(&mut data) {
                        self.diagnostics.push(LoadDiagnostic::Failed {
                            path: entry_name,
                            stage: LoadStage::Archive,
                            detail: error.to_string(),
                        });
                        continue;
                    }
                    (entry_name, data)
                }
                Err(error) => {
                    self.diagnostics.push(LoadDiagnostic::Failed {
                        path: format!("{archive_path}!#{index}"),
                        stage: LoadStage::Archive,
                        detail: error.to_string(),
                    });
                    continue;
                }
            };

            if is_classfile(&entry_name) {
                entries.push(GroupEntry {
                    path: entry_name,
                    bytes: data,
                });
            } else if is_archive(&entry_name) {
                self.collect_archive_bytes(&entry_name, data, entries);
            }
        }
    }
}

fn fire(listeners: &mut [&mut dyn LoadListener], event: &LoadEvent<'_>) {
    for listener in listeners.iter_mut() {
        listener.on_event(event);
    }
}
