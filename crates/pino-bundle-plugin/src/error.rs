// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the pino bundle plugin
//!
//! Every variant aborts the build. Nothing here is retried: resolution and
//! emission are deterministic for a fixed configuration and a fixed bundler.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, BundleError>;

/// Errors that abort a build
#[derive(Debug, Error)]
pub enum BundleError {
    /// A configured transport could not be resolved by the bundler
    #[error("Pino transport \"{0}\" not resolved!")]
    UnresolvedTransport(String),

    /// Several configured transports could not be resolved
    #[error("{} pino transports not resolved: {}", .0.len(), join_messages(.0))]
    UnresolvedTransports(Vec<BundleError>),

    /// A transport requested through a proxy module is not installed
    #[error("Transport not installed: {0}!")]
    UnresolvedProxyTarget(String),

    /// A chunk registered for caching is missing from the written bundle
    #[error("Chunk not in bundle: {0}")]
    MissingBundleChunk(String),

    /// File system error
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// Error writing a cached chunk back to disk
    #[error("Failed to replay cached chunk {path}: {source}")]
    Replay {
        /// Absolute output path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid plugin options
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error raised by the host bundler
    #[error("{0}")]
    Host(String),
}

impl BundleError {
    /// Create an unresolved-transport error
    pub fn unresolved_transport(name: impl Into<String>) -> Self {
        Self::UnresolvedTransport(name.into())
    }

    /// Create an unresolved-proxy-target error
    pub fn unresolved_proxy_target(name: impl Into<String>) -> Self {
        Self::UnresolvedProxyTarget(name.into())
    }

    /// Create a missing-chunk error
    pub fn missing_chunk(file_name: impl Into<String>) -> Self {
        Self::MissingBundleChunk(file_name.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Collapse a list of transport failures into a single error.
    ///
    /// Returns `None` for an empty list.
    pub fn aggregate(mut errors: Vec<BundleError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::UnresolvedTransports(errors)),
        }
    }

    /// Transport names carried by this error, in report order
    pub fn transport_names(&self) -> Vec<&str> {
        match self {
            Self::UnresolvedTransport(name) | Self::UnresolvedProxyTarget(name) => {
                vec![name.as_str()]
            }
            Self::UnresolvedTransports(errors) => {
                errors.iter().flat_map(|e| e.transport_names()).collect()
            }
            _ => Vec::new(),
        }
    }
}

fn join_messages(errors: &[BundleError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<&str> for BundleError {
    fn from(s: &str) -> Self {
        BundleError::Host(s.to_string())
    }
}

impl From<String> for BundleError {
    fn from(s: String) -> Self {
        BundleError::Host(s)
    }
}
