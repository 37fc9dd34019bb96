// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Plugin options

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{BundleError, Result};
use crate::namespace;
use crate::path::normalize;

/// Default output directory for pino files
pub const PINO_DIR: &str = "./pino";

/// Transports subdirectory under the pino directory
pub const TRANSPORTS_DIR: &str = "transports";

/// User-facing plugin options.
///
/// Field names follow the JavaScript plugin (`pinoDir`, `transportsDir`) so a
/// `pino-bundle.json` written for it loads unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PinoBundleOptions {
    /// Transport module names to bundle
    pub transports: Vec<String>,

    /// Custom directory for pino files (default `./pino`)
    pub pino_dir: Option<String>,

    /// Custom directory for all transports (default `<pinoDir>/transports`)
    pub transports_dir: Option<String>,
}

impl PinoBundleOptions {
    /// Load options from a `.toml` or `.json` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(BundleError::config(format!(
                "unsupported options file '{}' (expected .toml or .json)",
                path.display()
            ))),
        }
    }

    /// Overlay non-empty values from `other` onto these options
    pub fn merge(&mut self, other: PinoBundleOptions) {
        self.transports.extend(other.transports);
        if other.pino_dir.is_some() {
            self.pino_dir = other.pino_dir;
        }
        if other.transports_dir.is_some() {
            self.transports_dir = other.transports_dir;
        }
    }

    /// Validate and resolve into the effective configuration
    pub fn resolve(self) -> Result<PinoBundleConfig> {
        PinoBundleConfig::new(self)
    }
}

/// Effective configuration derived from [`PinoBundleOptions`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinoBundleConfig {
    transports: Vec<String>,
    pino_dir: String,
    transports_dir: String,
    pino_file: String,
}

impl PinoBundleConfig {
    /// Resolve options, applying defaults and rejecting invalid transport names
    pub fn new(options: PinoBundleOptions) -> Result<Self> {
        let pino_dir = options.pino_dir.unwrap_or_else(|| PINO_DIR.to_string());

        // An explicit transports dir is normalized, the derived one is kept
        // verbatim so override paths keep their leading `./`.
        let transports_dir = match options.transports_dir {
            Some(dir) => normalize(&dir),
            None => format!("{}/{}", pino_dir, TRANSPORTS_DIR),
        };

        let mut transports: Vec<String> = Vec::with_capacity(options.transports.len());
        for transport in options.transports {
            if transport.trim().is_empty() {
                return Err(BundleError::config("transport names must not be empty"));
            }
            if namespace::is_reserved(&transport) {
                return Err(BundleError::config(format!(
                    "transport name {:?} uses a reserved module id prefix",
                    transport
                )));
            }
            if !transports.contains(&transport) {
                transports.push(transport);
            }
        }

        let pino_file = format!("{}/pino.js", pino_dir);

        Ok(Self {
            transports,
            pino_dir,
            transports_dir,
            pino_file,
        })
    }

    /// Configured transports, de-duplicated in configuration order
    pub fn transports(&self) -> &[String] {
        &self.transports
    }

    /// Whether `name` is a configured transport
    pub fn is_transport(&self, name: &str) -> bool {
        self.transports.iter().any(|t| t == name)
    }

    /// Directory holding the pino entry chunk
    pub fn pino_dir(&self) -> &str {
        &self.pino_dir
    }

    /// Directory holding worker and transport chunks
    pub fn transports_dir(&self) -> &str {
        &self.transports_dir
    }

    /// Path of the pino entry chunk, relative to the output directory
    pub fn pino_file(&self) -> &str {
        &self.pino_file
    }

    /// Output path for a file inside the transports directory
    pub fn transport_path(&self, file_stem: &str) -> String {
        format!("{}/{}.js", self.transports_dir, file_stem)
    }
}

impl Default for PinoBundleConfig {
    fn default() -> Self {
        Self {
            transports: Vec::new(),
            pino_dir: PINO_DIR.to_string(),
            transports_dir: format!("{}/{}", PINO_DIR, TRANSPORTS_DIR),
            pino_file: format!("{}/pino.js", PINO_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PinoBundleOptions::default().resolve().unwrap();
        assert_eq!(config, PinoBundleConfig::default());
        assert_eq!(config.pino_dir(), "./pino");
        assert_eq!(config.transports_dir(), "./pino/transports");
        assert_eq!(config.pino_file(), "./pino/pino.js");
        assert_eq!(
            config.transport_path("pino-file"),
            "./pino/transports/pino-file.js"
        );
    }

    #[test]
    fn test_custom_dirs() {
        let config = PinoBundleOptions {
            pino_dir: Some("vendor/pino".to_string()),
            ..Default::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(config.transports_dir(), "vendor/pino/transports");

        let config = PinoBundleOptions {
            transports_dir: Some("./workers//pino/".to_string()),
            ..Default::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(config.transports_dir(), "workers/pino/");
        assert_eq!(config.pino_dir(), "./pino");
    }

    #[test]
    fn test_transports_deduplicated() {
        let config = PinoBundleOptions {
            transports: vec!["a".into(), "b".into(), "a".into()],
            ..Default::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(config.transports(), &["a".to_string(), "b".to_string()]);
        assert!(config.is_transport("b"));
        assert!(!config.is_transport("c"));
    }

    #[test]
    fn test_invalid_transport_names() {
        let empty = PinoBundleOptions {
            transports: vec!["  ".into()],
            ..Default::default()
        };
        assert!(matches!(empty.resolve(), Err(BundleError::Config(_))));

        let reserved = PinoBundleOptions {
            transports: vec![format!("{}x", namespace::PROXY_PREFIX)],
            ..Default::default()
        };
        assert!(matches!(reserved.resolve(), Err(BundleError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("pino-bundle.toml");
        let mut file = std::fs::File::create(&toml_path).unwrap();
        writeln!(file, "transports = [\"pino-pretty\"]\npinoDir = \"./logs\"").unwrap();
        let options = PinoBundleOptions::from_file(&toml_path).unwrap();
        assert_eq!(options.transports, vec!["pino-pretty".to_string()]);
        assert_eq!(options.pino_dir.as_deref(), Some("./logs"));

        let json_path = dir.path().join("pino-bundle.json");
        std::fs::write(&json_path, r#"{ "transportsDir": "t" }"#).unwrap();
        let options = PinoBundleOptions::from_file(&json_path).unwrap();
        assert_eq!(options.transports_dir.as_deref(), Some("t"));

        let yaml_path = dir.path().join("pino-bundle.yaml");
        std::fs::write(&yaml_path, "").unwrap();
        assert!(PinoBundleOptions::from_file(&yaml_path).is_err());
    }

    #[test]
    fn test_merge() {
        let mut base = PinoBundleOptions {
            transports: vec!["a".into()],
            pino_dir: Some("x".into()),
            transports_dir: None,
        };
        base.merge(PinoBundleOptions {
            transports: vec!["b".into()],
            pino_dir: None,
            transports_dir: Some("t".into()),
        });
        assert_eq!(base.transports, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(base.pino_dir.as_deref(), Some("x"));
        assert_eq!(base.transports_dir.as_deref(), Some("t"));
    }
}
