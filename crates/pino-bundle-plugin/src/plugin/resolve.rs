// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Resolution interceptor

use crate::host::ResolvedId;
use crate::namespace::{importer_id, ModuleRequest};

use super::PinoBundlePlugin;

/// Package name of the logging library
pub(crate) const PINO_PACKAGE: &str = "pino";

impl PinoBundlePlugin {
    /// Decide how to resolve `specifier`, or `None` for default resolution.
    ///
    /// Rules are checked in order; the first match wins.
    pub(crate) fn intercept(&self, specifier: &str) -> Option<ResolvedId> {
        // The emitted pino chunk is loaded from disk at runtime
        if specifier == self.config.pino_file() {
            return Some(ResolvedId::external(specifier));
        }

        match ModuleRequest::parse(specifier) {
            // Second hop of the importer indirection, rewritten in `transform`
            ModuleRequest::ProxyTarget(_) => return Some(ResolvedId::external(specifier)),
            ModuleRequest::LibraryEntry | ModuleRequest::NamedTransport(_) => {
                // Stubs mutate global state, never tree-shake them
                return Some(ResolvedId::internal(specifier).with_side_effects());
            }
            ModuleRequest::ImporterOf(_) | ModuleRequest::RealFile(_) => {}
        }

        if specifier == PINO_PACKAGE {
            return Some(ResolvedId::internal(importer_id(self.config.pino_file())));
        }

        let overrides = self.overrides.read();
        if self.config.is_transport(specifier) {
            if let Some(path) = overrides.get(specifier) {
                return Some(ResolvedId::internal(importer_id(path)));
            }
            // Not resolved at build start yet; the path is fixed by configuration
            return Some(ResolvedId::internal(importer_id(
                &self.config.transport_path(specifier),
            )));
        }

        if overrides.contains_path(specifier) {
            return Some(ResolvedId::external(specifier));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PinoBundleOptions;
    use crate::namespace::{named_transport_id, proxy_id, PINO_ENTRY};

    fn plugin(transports: &[&str]) -> PinoBundlePlugin {
        PinoBundlePlugin::new(PinoBundleOptions {
            transports: transports.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_entry_file_is_external() {
        let plugin = plugin(&[]);
        assert_eq!(
            plugin.intercept("./pino/pino.js"),
            Some(ResolvedId::external("./pino/pino.js"))
        );
    }

    #[test]
    fn test_proxy_is_external() {
        let plugin = plugin(&[]);
        let id = proxy_id("./pino/pino.js");
        assert_eq!(plugin.intercept(&id), Some(ResolvedId::external(id.clone())));
    }

    #[test]
    fn test_pino_redirects_to_importer() {
        let plugin = plugin(&[]);
        let resolved = plugin.intercept("pino").unwrap();
        assert_eq!(resolved.id, importer_id("./pino/pino.js"));
        assert!(!resolved.external);
        assert_eq!(resolved.module_side_effects, None);
    }

    #[test]
    fn test_stubs_have_side_effects() {
        let plugin = plugin(&["my-transport"]);
        for id in [PINO_ENTRY.to_string(), named_transport_id("my-transport")] {
            let resolved = plugin.intercept(&id).unwrap();
            assert_eq!(resolved.id, id);
            assert!(!resolved.external);
            assert_eq!(resolved.module_side_effects, Some(true));
        }
    }

    #[test]
    fn test_transport_redirects_to_importer() {
        let plugin = plugin(&["my-transport"]);
        let resolved = plugin.intercept("my-transport").unwrap();
        assert_eq!(
            resolved.id,
            importer_id("./pino/transports/my-transport.js")
        );
    }

    #[test]
    fn test_override_paths_are_external() {
        let plugin = plugin(&[]);
        assert_eq!(
            plugin.intercept("./pino/transports/thread-stream-worker.js"),
            Some(ResolvedId::external("./pino/transports/thread-stream-worker.js"))
        );
    }

    #[test]
    fn test_unrelated_specifiers_defer() {
        let plugin = plugin(&["my-transport"]);
        assert_eq!(plugin.intercept("lodash"), None);
        assert_eq!(plugin.intercept("./src/index.js"), None);
        assert_eq!(plugin.intercept("pino/file.js"), None);
        assert_eq!(plugin.intercept("other-transport"), None);
    }
}
