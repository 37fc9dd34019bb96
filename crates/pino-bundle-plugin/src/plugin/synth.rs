// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Virtual module source generation
//!
//! The generators are pure functions of their inputs; [`PinoBundlePlugin`]
//! resolves the ids they need and feeds them in.

use tracing::debug;

use crate::error::{BundleError, Result};
use crate::host::PluginContext;
use crate::namespace::{proxy_id, ModuleRequest};
use crate::overrides::OverrideTable;
use crate::path::{normalize, relative};

use super::resolve::PINO_PACKAGE;
use super::PinoBundlePlugin;

/// Global property pino reads its path overrides from
pub const GLOBAL_OVERRIDES: &str = "__bundlerPathsOverrides";

/// Quote a string as a JavaScript string literal
pub fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Entry stub: publishes the override table and re-exports pino.
///
/// Paths are emitted relative to `pino_dir`, the directory the stub itself is
/// written to, and joined with the stub's runtime directory. Keys already in
/// the global table win over the ones computed here, so the first bundle to
/// load in a process decides where each worker lives.
pub fn entry_stub(overrides: &OverrideTable, pino_dir: &str, library_id: &str) -> String {
    let entries = overrides
        .iter()
        .map(|(name, out_path)| {
            let relative_path = normalize(&relative(pino_dir, out_path));
            format!(
                "  [{}]: path.join(dirname, {}),\n",
                js_string(name),
                js_string(&relative_path)
            )
        })
        .collect::<String>();
    let library = js_string(library_id);

    format!(
        r#"import path from 'path';

const dirname = typeof __dirname !== 'undefined' ? __dirname : import.meta.dirname;

const bundlerPathsOverrides = {{
{entries}}};

function mergeBundlerPathsOverrides(existing, fresh) {{
  const merged = Object.assign({{}}, existing);
  for (const name of Object.keys(fresh)) {{
    if (!Object.prototype.hasOwnProperty.call(merged, name)) {{
      merged[name] = fresh[name];
    }}
  }}
  return merged;
}}

globalThis.{global} = mergeBundlerPathsOverrides(
  globalThis.{global} || {{}},
  bundlerPathsOverrides
);

export * from {library};
export {{ default }} from {library};
"#,
        entries = entries,
        global = GLOBAL_OVERRIDES,
        library = library,
    )
}

/// Re-export a module, keeping its default export only when it has one
pub fn reexport_stub(module_id: &str) -> String {
    let module = js_string(module_id);
    format!(
        r#"import * as all from {module};
export * from {module};
export default 'default' in all ? all.default : undefined;
"#,
        module = module
    )
}

/// Importer module: re-exports an output path through its proxy id
pub fn importer_stub(out_path: &str) -> String {
    reexport_stub(&proxy_id(out_path))
}

impl PinoBundlePlugin {
    /// Supply source for the plugin's virtual modules
    pub(crate) async fn load_virtual(
        &self,
        ctx: &dyn PluginContext,
        id: &str,
    ) -> Result<Option<String>> {
        match ModuleRequest::parse(id) {
            ModuleRequest::LibraryEntry => {
                let resolution = match ctx.resolve(PINO_PACKAGE, None).await? {
                    Some(resolution) if !resolution.external => resolution,
                    _ => {
                        debug!("pino is not bundled, entry stub left empty");
                        return Ok(Some(String::new()));
                    }
                };
                let overrides = self.overrides.read();
                Ok(Some(entry_stub(
                    &overrides,
                    self.config.pino_dir(),
                    &resolution.id,
                )))
            }
            ModuleRequest::NamedTransport(module_id) => {
                let resolution = ctx
                    .resolve(module_id, None)
                    .await?
                    .ok_or_else(|| BundleError::unresolved_proxy_target(module_id))?;
                if resolution.external {
                    return Ok(Some(String::new()));
                }
                Ok(Some(reexport_stub(&resolution.id)))
            }
            ModuleRequest::ImporterOf(out_path) => Ok(Some(importer_stub(out_path))),
            ModuleRequest::ProxyTarget(_) | ModuleRequest::RealFile(_) => Ok(None),
        }
    }
}
