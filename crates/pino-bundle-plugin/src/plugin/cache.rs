// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Output cache for emitted pino chunks
//!
//! Captured once, after the first successful bundle write, and replayed on
//! every later build of the same plugin instance. There is no invalidation:
//! changes to pino or a transport are not picked up until the process
//! restarts.

use futures::future::try_join_all;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{BundleError, Result};
use crate::host::OutputBundle;
use crate::path::normalize;

use super::PinoBundlePlugin;

/// Cached chunk contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedOutput {
    /// Final chunk code
    pub source: String,
    /// Serialized source map, written next to the chunk as `<file>.map`
    pub source_map: Option<String>,
}

type Entries = BTreeMap<PathBuf, CachedOutput>;

/// Process-lifetime cache of emitted chunks keyed by output path
#[derive(Debug, Default)]
pub struct OutputCache {
    entries: RwLock<Option<Arc<Entries>>>,
}

impl OutputCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether entries have been captured
    pub fn is_captured(&self) -> bool {
        self.entries.read().is_some()
    }

    /// Number of cached chunks
    pub fn len(&self) -> usize {
        self.entries.read().as_ref().map_or(0, |e| e.len())
    }

    /// Whether the cache holds no chunks
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached entry for an output path
    pub fn get(&self, path: &Path) -> Option<CachedOutput> {
        self.entries.read().as_ref()?.get(path).cloned()
    }

    /// Cached output paths
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries
            .read()
            .as_ref()
            .map(|e| e.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Store a complete set of entries.
    ///
    /// Returns `false` and keeps the existing entries if the cache was already
    /// captured.
    pub fn commit(&self, entries: BTreeMap<PathBuf, CachedOutput>) -> bool {
        let mut slot = self.entries.write();
        if slot.is_some() {
            return false;
        }
        *slot = Some(Arc::new(entries));
        true
    }

    /// Write every cached chunk (and source map) back to disk.
    ///
    /// Relative paths are resolved against the working directory. Returns the
    /// number of chunks written.
    pub async fn replay(&self) -> Result<usize> {
        let entries = self.entries.read().clone();
        let Some(entries) = entries else {
            return Ok(0);
        };

        try_join_all(
            entries
                .iter()
                .map(|(path, output)| write_cached(path, output)),
        )
        .await?;

        Ok(entries.len())
    }
}

async fn write_cached(path: &Path, output: &CachedOutput) -> Result<()> {
    let replay_err = |source| BundleError::Replay {
        path: path.to_path_buf(),
        source,
    };

    let absolute = std::path::absolute(path).map_err(replay_err)?;
    if let Some(parent) = absolute.parent() {
        fs::create_dir_all(parent).await.map_err(replay_err)?;
    }
    fs::write(&absolute, &output.source)
        .await
        .map_err(replay_err)?;
    if let Some(map) = &output.source_map {
        let mut map_path = absolute.into_os_string();
        map_path.push(".map");
        fs::write(PathBuf::from(map_path), map)
            .await
            .map_err(replay_err)?;
    }

    debug!("Replayed {}", path.display());
    Ok(())
}

impl PinoBundlePlugin {
    /// Capture the pino chunks from a written bundle, on the first build only
    pub(crate) fn capture_cache(&self, bundle: &OutputBundle) -> Result<()> {
        if self.cache.is_captured() {
            return Ok(());
        }

        let out_dir = self.out_dir();
        let mut files: Vec<String> = self
            .overrides
            .read()
            .iter()
            .map(|(_, path)| path.to_string())
            .collect();
        files.push(self.config.pino_file().to_string());

        let mut entries = BTreeMap::new();
        for file in files {
            // Emitted file names are the normalized paths, without `./`
            let file_name = normalize(&file);
            let chunk = bundle
                .get(&file_name)
                .and_then(|item| item.as_chunk())
                .ok_or_else(|| BundleError::missing_chunk(file_name.as_str()))?;

            entries.insert(
                out_dir.join(&file_name),
                CachedOutput {
                    source: chunk.code.clone(),
                    source_map: chunk.map.clone(),
                },
            );
        }

        let count = entries.len();
        if self.cache.commit(entries) {
            info!("Cached {} pino chunks", count);
        }
        Ok(())
    }
}
