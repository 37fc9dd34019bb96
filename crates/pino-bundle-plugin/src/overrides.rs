// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Override table: symbolic module name to output path

use std::collections::BTreeMap;

use crate::config::PinoBundleConfig;

/// Override key pino uses for its file transport
pub const PINO_FILE: &str = "pino/file";

/// Override key pino uses for its transport worker
pub const PINO_WORKER: &str = "pino-worker";

/// Override key thread-stream uses for its worker
pub const THREAD_STREAM_WORKER: &str = "thread-stream-worker";

/// A fixed worker module pino loads by path at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerModule {
    /// Override key
    pub name: &'static str,
    /// Module specifier the chunk is built from
    pub input: &'static str,
    /// File stem inside the transports directory
    pub file_stem: &'static str,
}

/// Worker modules emitted on every cold build
pub const WORKER_MODULES: [WorkerModule; 3] = [
    WorkerModule {
        name: PINO_FILE,
        input: "pino/file.js",
        file_stem: "pino-file",
    },
    WorkerModule {
        name: PINO_WORKER,
        input: "pino/lib/worker.js",
        file_stem: "pino-worker",
    },
    WorkerModule {
        name: THREAD_STREAM_WORKER,
        input: "thread-stream/lib/worker.js",
        file_stem: "thread-stream-worker",
    },
];

/// Mapping from symbolic name to the output path (relative to the output
/// directory) that holds its chunk.
///
/// Entries are only ever added. Iteration is sorted by name so generated code
/// is stable across builds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: BTreeMap<String, String>,
}

impl OverrideTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding the fixed worker entries for a configuration
    pub fn with_workers(config: &PinoBundleConfig) -> Self {
        let mut table = Self::new();
        for worker in WORKER_MODULES {
            table.insert(worker.name, config.transport_path(worker.file_stem));
        }
        table
    }

    /// Record the output path for a name
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<String>) {
        self.entries.insert(name.into(), path.into());
    }

    /// Output path for a name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Whether any entry points at `path`
    pub fn contains_path(&self, path: &str) -> bool {
        self.entries.values().any(|p| p == path)
    }

    /// Iterate `(name, path)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_workers() {
        let table = OverrideTable::with_workers(&PinoBundleConfig::default());
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.get(PINO_FILE),
            Some("./pino/transports/pino-file.js")
        );
        assert_eq!(
            table.get(PINO_WORKER),
            Some("./pino/transports/pino-worker.js")
        );
        assert_eq!(
            table.get(THREAD_STREAM_WORKER),
            Some("./pino/transports/thread-stream-worker.js")
        );
        assert!(table.contains_path("./pino/transports/pino-worker.js"));
        assert!(!table.contains_path("pino/transports/pino-worker.js"));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut table = OverrideTable::new();
        table.insert("zeta", "z.js");
        table.insert("alpha", "a.js");
        let names: Vec<_> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
