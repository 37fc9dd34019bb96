// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # pino-bundle-plugin
//!
//! A bundler plugin that packages the [pino](https://getpino.io) logger so that
//! its worker-thread transports keep working after bundling.
//!
//! pino loads its transports from file paths computed at runtime, which a static
//! bundler cannot follow. This plugin:
//!
//! - emits the pino entry point, its worker bootstraps and every configured
//!   transport as standalone chunks
//! - synthesizes an entry stub that publishes the emitted file locations in
//!   `globalThis.__bundlerPathsOverrides` before pino initializes
//! - redirects bare `pino` / transport imports in user code to the emitted
//!   chunks through a two-hop proxy rewrite
//! - caches the emitted chunks after the first build and replays them verbatim
//!   on rebuilds
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pino_bundle_plugin::{PinoBundleOptions, PinoBundlePlugin};
//!
//! let plugin = PinoBundlePlugin::new(PinoBundleOptions {
//!     transports: vec!["pino-pretty".to_string()],
//!     ..Default::default()
//! })?;
//! bundler.add_plugin(Box::new(plugin));
//! ```
//!
//! The host bundler drives the plugin through the [`BundlerPlugin`] trait and
//! exposes its own resolver and chunk emission through [`PluginContext`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod host;
pub mod namespace;
pub mod overrides;
pub mod path;
pub mod plugin;

// Re-exports
pub use config::{PinoBundleConfig, PinoBundleOptions};
pub use error::{BundleError, Result};
pub use host::{
    ApplyTo, BundlerPlugin, ChunkDescriptor, HookOrder, OutputAsset, OutputBundle, OutputChunk,
    OutputItem, OutputOptions, PluginContext, ResolvedId,
};
pub use namespace::ModuleRequest;
pub use overrides::OverrideTable;
pub use plugin::{CachedOutput, OutputCache, PinoBundlePlugin};

/// Name the plugin registers under with the host bundler
pub const PLUGIN_NAME: &str = "rollup-plugin-pino-bundle";

/// Version of the plugin crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
