//! Load lifecycle events and the listener contract.

use crate::classfile::error::ClassfileError;
use crate::classfile::Classfile;

/// Lifecycle event fired by the loader.
///
/// Events are strictly nested: one `BeginSession`/`EndSession` pair wraps
/// one `BeginGroup`/`EndGroup` pair per input location, which wraps one
/// `BeginFile`/`EndFile` pair per entry; entries that look like classfiles
/// additionally get `BeginClassfile`/`EndClassfile` between those.
/// `EndClassfile` carries the parse outcome, error included: a listener sees
/// malformed files, the batch still continues.
#[derive(Debug)]
pub enum LoadEvent<'a> {
    BeginSession,
    BeginGroup {
        name: &'a str,
        /// Entry count when the group's size is known up front.
        size: Option<usize>,
    },
    BeginFile {
        path: &'a str,
    },
    BeginClassfile {
        path: &'a str,
    },
    EndClassfile {
        path: &'a str,
        result: &'a Result<Classfile, ClassfileError>,
    },
    EndFile {
        path: &'a str,
    },
    EndGroup {
        name: &'a str,
    },
    EndSession,
}

/// Receives loader lifecycle events.
pub trait LoadListener {
    fn on_event(&mut self, event: &LoadEvent<'_>);
}

/// Listener that accumulates successfully parsed classfiles by cloning them
/// out of `EndClassfile` events.
#[derive(Debug, Default)]
pub struct ClassfileCollector {
    classfiles: Vec<Classfile>,
}

impl ClassfileCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classfiles(&self) -> &[Classfile] {
        &self.classfiles
    }

    pub fn into_classfiles(self) -> Vec<Classfile> {
        self.classfiles
    }
}

impl LoadListener for ClassfileCollector {
    fn on_event(&mut self, event: &LoadEvent<'_>) {
        if let LoadEvent::EndClassfile {
            result: Ok(classfile),
            ..
        } = event
        {
            self.classfiles.push(classfile.clone());
        }
    }
}
