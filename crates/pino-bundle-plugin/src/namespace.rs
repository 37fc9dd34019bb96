// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Virtual module ids
//!
//! Every synthetic id starts with a NUL byte, which the bundler convention
//! reserves for plugin-owned modules, so no file on disk can resolve to one.
//! The four sentinels below are pairwise non-prefixing.

/// Virtual id of the pino entry stub
pub const PINO_ENTRY: &str = "\0pino-bundle:entry";

/// Prefix of per-transport proxy stubs, followed by the transport specifier
pub const NAMED_TRANSPORT_PREFIX: &str = "\0pino-bundle:transport:";

/// Prefix of ids that are always external, followed by a final output path
pub const PROXY_PREFIX: &str = "\0pino-bundle:proxy:";

/// Prefix of importer modules, followed by a final output path
pub const IMPORTER_PREFIX: &str = "\0pino-bundle:importer:";

const RESERVED_ROOT: &str = "\0pino-bundle:";

/// A module id classified into the plugin's namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleRequest<'a> {
    /// Anything that is not a plugin sentinel
    RealFile(&'a str),
    /// The pino entry stub
    LibraryEntry,
    /// Proxy stub for the named transport module
    NamedTransport(&'a str),
    /// External passthrough for an output path
    ProxyTarget(&'a str),
    /// Importer module re-exporting an output path through its proxy
    ImporterOf(&'a str),
}

impl<'a> ModuleRequest<'a> {
    /// Classify a specifier or module id
    pub fn parse(id: &'a str) -> Self {
        if id == PINO_ENTRY {
            Self::LibraryEntry
        } else if let Some(rest) = id.strip_prefix(NAMED_TRANSPORT_PREFIX) {
            Self::NamedTransport(rest)
        } else if let Some(rest) = id.strip_prefix(PROXY_PREFIX) {
            Self::ProxyTarget(rest)
        } else if let Some(rest) = id.strip_prefix(IMPORTER_PREFIX) {
            Self::ImporterOf(rest)
        } else {
            Self::RealFile(id)
        }
    }

    /// Render back into a module id
    pub fn to_id(&self) -> String {
        match self {
            Self::RealFile(path) => path.to_string(),
            Self::LibraryEntry => PINO_ENTRY.to_string(),
            Self::NamedTransport(name) => format!("{}{}", NAMED_TRANSPORT_PREFIX, name),
            Self::ProxyTarget(path) => format!("{}{}", PROXY_PREFIX, path),
            Self::ImporterOf(path) => format!("{}{}", IMPORTER_PREFIX, path),
        }
    }

    /// Whether this is one of the plugin's virtual ids
    pub fn is_virtual(&self) -> bool {
        !matches!(self, Self::RealFile(_))
    }
}

/// Id of the proxy stub for a transport
pub fn named_transport_id(name: &str) -> String {
    ModuleRequest::NamedTransport(name).to_id()
}

/// Id of the external passthrough for an output path
pub fn proxy_id(path: &str) -> String {
    ModuleRequest::ProxyTarget(path).to_id()
}

/// Id of the importer module for an output path
pub fn importer_id(path: &str) -> String {
    ModuleRequest::ImporterOf(path).to_id()
}

/// Whether a name falls inside the reserved namespace
pub fn is_reserved(name: &str) -> bool {
    name.starts_with(RESERVED_ROOT)
}
