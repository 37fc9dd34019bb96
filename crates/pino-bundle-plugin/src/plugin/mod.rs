// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The pino bundle plugin
//!
//! ## Build start
//! - replays the output cache when one was captured
//! - otherwise emits the pino entry, worker and transport chunks
//!
//! ## Module graph
//! - `resolve_id` redirects pino and transport imports into the virtual namespace
//! - `load` synthesizes the entry stub, transport stubs and importer modules
//! - `transform` finishes the two-hop rewrite in importer modules
//!
//! ## Write bundle
//! - captures the emitted chunks into the output cache once

mod cache;
mod emit;
mod resolve;
mod rewrite;
pub mod synth;

pub use cache::{CachedOutput, OutputCache};
pub use emit::plan_chunks;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::path::PathBuf;
use tracing::debug;

use crate::config::{PinoBundleConfig, PinoBundleOptions};
use crate::error::Result;
use crate::host::{
    ApplyTo, BundlerPlugin, HookOrder, OutputBundle, OutputOptions, PluginContext, ResolvedId,
};
use crate::overrides::OverrideTable;
use crate::PLUGIN_NAME;

/// Default output directory when the host reports none
const DEFAULT_OUT_DIR: &str = "./";

/// Bundler plugin packaging pino and its transports.
///
/// One instance serves one build configuration. The override table and output
/// cache live for as long as the instance, so watch-mode rebuilds reuse them.
pub struct PinoBundlePlugin {
    config: PinoBundleConfig,
    overrides: RwLock<OverrideTable>,
    out_dir: RwLock<PathBuf>,
    cache: OutputCache,
}

impl PinoBundlePlugin {
    /// Create a plugin from user options
    pub fn new(options: PinoBundleOptions) -> Result<Self> {
        Ok(Self::with_config(options.resolve()?))
    }

    /// Create a plugin from an already resolved configuration
    pub fn with_config(config: PinoBundleConfig) -> Self {
        let overrides = OverrideTable::with_workers(&config);
        Self {
            config,
            overrides: RwLock::new(overrides),
            out_dir: RwLock::new(PathBuf::from(DEFAULT_OUT_DIR)),
            cache: OutputCache::new(),
        }
    }

    /// Effective configuration
    pub fn config(&self) -> &PinoBundleConfig {
        &self.config
    }

    /// Snapshot of the override table
    pub fn overrides(&self) -> OverrideTable {
        self.overrides.read().clone()
    }

    /// Output directory chunks are written under
    pub fn out_dir(&self) -> PathBuf {
        self.out_dir.read().clone()
    }

    /// The output cache
    pub fn cache(&self) -> &OutputCache {
        &self.cache
    }
}

#[async_trait]
impl BundlerPlugin for PinoBundlePlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    // TODO: serve mode never reaches `write_bundle`; supporting it means
    // filling the cache by reading the chunks back from the served outDir.
    fn apply(&self) -> ApplyTo {
        ApplyTo::Build
    }

    fn output_options(&self, options: &OutputOptions) {
        if let Some(dir) = &options.dir {
            debug!("Output directory: {}", dir.display());
            *self.out_dir.write() = dir.clone();
        }
    }

    async fn build_start(&self, ctx: &dyn PluginContext) -> Result<()> {
        self.start_build(ctx).await
    }

    fn resolve_id_order(&self) -> HookOrder {
        HookOrder::Pre
    }

    async fn resolve_id(
        &self,
        _ctx: &dyn PluginContext,
        specifier: &str,
        _importer: Option<&str>,
    ) -> Result<Option<ResolvedId>> {
        Ok(self.intercept(specifier))
    }

    async fn load(&self, ctx: &dyn PluginContext, id: &str) -> Result<Option<String>> {
        self.load_virtual(ctx, id).await
    }

    fn transform(&self, code: &str, id: &str) -> Result<Option<String>> {
        Ok(rewrite::rewrite_importer(code, id))
    }

    async fn write_bundle(&self, _options: &OutputOptions, bundle: &OutputBundle) -> Result<()> {
        self.capture_cache(bundle)
    }
}
