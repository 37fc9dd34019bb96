// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! In-memory bundler host for driving the plugin end to end

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use pino_bundle_plugin::{
    BundlerPlugin, ChunkDescriptor, OutputBundle, OutputChunk, OutputItem, OutputOptions,
    PluginContext, ResolvedId, Result,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Absolute id the mock resolves `pino` to
pub const PINO_ID: &str = "/project/node_modules/pino/pino.js";

/// A bundler that resolves from a fixed table and "compiles" modules by
/// returning their source unchanged.
#[derive(Default)]
pub struct MockBundler {
    modules: HashMap<String, ResolvedId>,
    sources: HashMap<String, String>,
    resolve_calls: Mutex<HashMap<String, usize>>,
    emitted: Mutex<Vec<ChunkDescriptor>>,
    emit_count: Mutex<usize>,
}

impl MockBundler {
    /// Host with pino, its workers and the given transports installed
    pub fn with_transports(transports: &[&str]) -> Self {
        let mut host = Self::default();
        host.install("pino", PINO_ID, "export default function pino() {}\n");
        host.install(
            "pino/file.js",
            "/project/node_modules/pino/file.js",
            "module.exports = function file() {};\n",
        );
        host.install(
            "pino/lib/worker.js",
            "/project/node_modules/pino/lib/worker.js",
            "module.exports = function worker() {};\n",
        );
        host.install(
            "thread-stream/lib/worker.js",
            "/project/node_modules/thread-stream/lib/worker.js",
            "module.exports = function threadStreamWorker() {};\n",
        );
        for transport in transports {
            host.install(
                transport,
                &format!("/project/node_modules/{}/index.js", transport),
                &format!("export default function transport() {{ return {:?}; }}\n", transport),
            );
        }
        host
    }

    /// Make `specifier` resolvable to `id` with the given source
    pub fn install(&mut self, specifier: &str, id: &str, source: &str) {
        self.modules
            .insert(specifier.to_string(), ResolvedId::internal(id));
        self.sources.insert(id.to_string(), source.to_string());
    }

    /// Make `specifier` resolve to an external reference
    pub fn install_external(&mut self, specifier: &str) {
        self.modules
            .insert(specifier.to_string(), ResolvedId::external(specifier));
    }

    /// How often `specifier` went through [`PluginContext::resolve`]
    pub fn resolve_count(&self, specifier: &str) -> usize {
        self.resolve_calls
            .lock()
            .get(specifier)
            .copied()
            .unwrap_or(0)
    }

    /// Total chunks emitted over the host's lifetime
    pub fn emit_count(&self) -> usize {
        *self.emit_count.lock()
    }

    /// Chunks emitted since the last call
    pub fn take_emitted(&self) -> Vec<ChunkDescriptor> {
        std::mem::take(&mut *self.emitted.lock())
    }

    /// Load, transform and return the code of one module the way the host
    /// pipeline would.
    pub async fn compile(&self, plugin: &dyn BundlerPlugin, specifier: &str) -> Result<String> {
        let id = match plugin.resolve_id(self, specifier, None).await? {
            Some(resolved) => resolved.id,
            None => self
                .modules
                .get(specifier)
                .map(|r| r.id.clone())
                .ok_or_else(|| format!("Cannot find module '{}'", specifier))?,
        };

        let code = match plugin.load(self, &id).await? {
            Some(code) => code,
            None => self
                .sources
                .get(&id)
                .cloned()
                .ok_or_else(|| format!("No source for '{}'", id))?,
        };

        Ok(plugin.transform(&code, &id)?.unwrap_or(code))
    }

    /// Run one build: build start, compile emitted chunks, write them under
    /// `out_dir`, then the write-bundle hook.
    pub async fn build(&self, plugin: &dyn BundlerPlugin, out_dir: &Path) -> Result<OutputBundle> {
        let options = OutputOptions {
            dir: Some(out_dir.to_path_buf()),
        };
        plugin.output_options(&options);
        plugin.build_start(self).await?;

        let mut bundle = OutputBundle::new();
        for chunk in self.take_emitted() {
            let code = self.compile(plugin, &chunk.id).await?;
            let map = format!("{{\"version\":3,\"file\":{:?}}}", chunk.file_name);

            let path = out_dir.join(&chunk.file_name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &code)?;
            std::fs::write(map_path(&path), &map)?;

            bundle.insert(
                chunk.file_name.clone(),
                OutputItem::Chunk(OutputChunk {
                    file_name: chunk.file_name,
                    code,
                    map: Some(map),
                }),
            );
        }

        plugin.write_bundle(&options, &bundle).await?;
        Ok(bundle)
    }
}

#[async_trait]
impl PluginContext for MockBundler {
    async fn resolve(&self, specifier: &str, _importer: Option<&str>) -> Result<Option<ResolvedId>> {
        *self
            .resolve_calls
            .lock()
            .entry(specifier.to_string())
            .or_default() += 1;
        Ok(self.modules.get(specifier).cloned())
    }

    fn emit_chunk(&self, chunk: ChunkDescriptor) -> String {
        let mut count = self.emit_count.lock();
        *count += 1;
        self.emitted.lock().push(chunk);
        format!("chunk-{}", *count)
    }
}

/// `<path>.map`
pub fn map_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".map");
    PathBuf::from(os)
}

/// Read every file under `dir`, keyed by path relative to `dir`
pub fn snapshot(dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, Vec<u8>)>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, out);
            } else if let Ok(bytes) = std::fs::read(&path) {
                out.push((path.strip_prefix(root).unwrap().to_path_buf(), bytes));
            }
        }
    }

    let mut files = Vec::new();
    walk(dir, dir, &mut files);
    files.sort();
    files
}
