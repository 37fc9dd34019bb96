// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Host bundler interface
//!
//! The bundler owns module resolution, compilation and chunk writing. It calls
//! into a plugin through [`BundlerPlugin`] and hands each hook a
//! [`PluginContext`] for the services a plugin may request back.
//!
//! Phase order is fixed by the host:
//!
//! 1. `output_options`
//! 2. `build_start`
//! 3. `resolve_id` / `load` / `transform`, per module, interleaved
//! 4. chunk rendering and writing
//! 5. `write_bundle`

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::Result;

/// Outcome of resolving a module specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedId {
    /// Resolved module id
    pub id: String,
    /// Leave the import as a runtime reference instead of bundling it
    pub external: bool,
    /// Force (or forbid) side effects for tree-shaking; `None` lets the host decide
    pub module_side_effects: Option<bool>,
}

impl ResolvedId {
    /// A module the bundler should load and compile
    pub fn internal(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            external: false,
            module_side_effects: None,
        }
    }

    /// A module left as a runtime import
    pub fn external(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            external: true,
            module_side_effects: None,
        }
    }

    /// Mark the module as having side effects
    pub fn with_side_effects(mut self) -> Self {
        self.module_side_effects = Some(true);
        self
    }
}

/// Request to emit an extra chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkDescriptor {
    /// Module id the chunk is built from
    pub id: String,
    /// Exact output file name, relative to the output directory
    pub file_name: String,
}

/// Output options observed before the build
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Output directory, if the build writes to one
    pub dir: Option<PathBuf>,
}

/// A rendered chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    /// Output file name
    pub file_name: String,
    /// Final code
    pub code: String,
    /// Serialized source map
    pub map: Option<String>,
}

/// A non-code output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputAsset {
    /// Output file name
    pub file_name: String,
    /// File contents
    pub source: Vec<u8>,
}

/// An entry of a written bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputItem {
    /// Rendered chunk
    Chunk(OutputChunk),
    /// Static asset
    Asset(OutputAsset),
}

impl OutputItem {
    /// The chunk, if this item is one
    pub fn as_chunk(&self) -> Option<&OutputChunk> {
        match self {
            OutputItem::Chunk(chunk) => Some(chunk),
            OutputItem::Asset(_) => None,
        }
    }
}

/// Written bundle keyed by output file name
pub type OutputBundle = BTreeMap<String, OutputItem>;

/// Which commands a plugin participates in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyTo {
    /// Production builds only
    Build,
    /// Development server only
    Serve,
    /// Every command
    Both,
}

/// Ordering of a hook relative to other plugins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOrder {
    /// Before plugins without an order and before default handling
    Pre,
    /// In registration order
    Normal,
    /// After everything else
    Post,
}

/// Services the host provides to plugin hooks
#[async_trait]
pub trait PluginContext: Send + Sync {
    /// Resolve a specifier through the other plugins and the default resolver.
    ///
    /// The calling plugin's own `resolve_id` is skipped. `Ok(None)` means the
    /// specifier could not be resolved.
    async fn resolve(&self, specifier: &str, importer: Option<&str>) -> Result<Option<ResolvedId>>;

    /// Register an extra chunk and return the host's reference id for it
    fn emit_chunk(&self, chunk: ChunkDescriptor) -> String;
}

/// Hooks a bundler plugin may implement.
///
/// Every hook defaults to doing nothing.
#[async_trait]
pub trait BundlerPlugin: Send + Sync {
    /// Plugin name used in host diagnostics
    fn name(&self) -> &str;

    /// Commands the plugin applies to
    fn apply(&self) -> ApplyTo {
        ApplyTo::Both
    }

    /// Observe the output options
    fn output_options(&self, _options: &OutputOptions) {}

    /// Called once before the module graph is built
    async fn build_start(&self, _ctx: &dyn PluginContext) -> Result<()> {
        Ok(())
    }

    /// Ordering of [`BundlerPlugin::resolve_id`]
    fn resolve_id_order(&self) -> HookOrder {
        HookOrder::Normal
    }

    /// Resolve an import; `Ok(None)` defers to the next resolver
    async fn resolve_id(
        &self,
        _ctx: &dyn PluginContext,
        _specifier: &str,
        _importer: Option<&str>,
    ) -> Result<Option<ResolvedId>> {
        Ok(None)
    }

    /// Supply module source; `Ok(None)` defers to the next loader
    async fn load(&self, _ctx: &dyn PluginContext, _id: &str) -> Result<Option<String>> {
        Ok(None)
    }

    /// Rewrite compiled module code; `Ok(None)` keeps it unchanged
    fn transform(&self, _code: &str, _id: &str) -> Result<Option<String>> {
        Ok(None)
    }

    /// Called after the bundle has been written to disk
    async fn write_bundle(&self, _options: &OutputOptions, _bundle: &OutputBundle) -> Result<()> {
        Ok(())
    }
}
