// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Chunk emission at build start

use futures::future::join_all;
use tracing::{debug, info};

use crate::config::PinoBundleConfig;
use crate::error::{BundleError, Result};
use crate::host::{ChunkDescriptor, PluginContext};
use crate::namespace::{named_transport_id, PINO_ENTRY};
use crate::overrides::WORKER_MODULES;
use crate::path::{join, normalize};

use super::PinoBundlePlugin;

/// Chunks emitted on every cold build: the pino entry and its workers
fn fixed_chunks(config: &PinoBundleConfig) -> Vec<ChunkDescriptor> {
    let mut chunks = Vec::with_capacity(1 + WORKER_MODULES.len());
    chunks.push(ChunkDescriptor {
        id: PINO_ENTRY.to_string(),
        file_name: join(&[config.pino_dir(), "pino.js"]),
    });
    for worker in WORKER_MODULES {
        chunks.push(ChunkDescriptor {
            id: worker.input.to_string(),
            file_name: normalize(&config.transport_path(worker.file_stem)),
        });
    }
    chunks
}

fn transport_chunk(config: &PinoBundleConfig, transport: &str) -> ChunkDescriptor {
    ChunkDescriptor {
        id: named_transport_id(transport),
        file_name: normalize(&config.transport_path(transport)),
    }
}

/// Every chunk a cold build emits for `config`, assuming all transports
/// resolve.
pub fn plan_chunks(config: &PinoBundleConfig) -> Vec<ChunkDescriptor> {
    let mut chunks = fixed_chunks(config);
    chunks.extend(
        config
            .transports()
            .iter()
            .map(|transport| transport_chunk(config, transport)),
    );
    chunks
}

impl PinoBundlePlugin {
    pub(crate) async fn start_build(&self, ctx: &dyn PluginContext) -> Result<()> {
        if self.cache.is_captured() {
            let written = self.cache.replay().await?;
            info!("Replayed {} cached pino chunks", written);
            return Ok(());
        }

        for chunk in fixed_chunks(&self.config) {
            debug!("Emitting chunk {} => {}", chunk.id.escape_debug(), chunk.file_name);
            ctx.emit_chunk(chunk);
        }

        self.emit_transports(ctx).await
    }

    /// Resolve every configured transport, then record and emit them.
    ///
    /// Nothing is recorded unless all of them resolve.
    async fn emit_transports(&self, ctx: &dyn PluginContext) -> Result<()> {
        let resolutions = join_all(self.config.transports().iter().map(|transport| async move {
            let resolution = ctx.resolve(transport, None).await;
            (transport, resolution)
        }))
        .await;

        let mut failures = Vec::new();
        for (transport, resolution) in &resolutions {
            match resolution {
                Ok(Some(_)) => {}
                Ok(None) => failures.push(BundleError::unresolved_transport(transport.as_str())),
                Err(e) => failures.push(BundleError::Host(format!(
                    "resolving transport \"{}\": {}",
                    transport, e
                ))),
            }
        }
        if let Some(err) = BundleError::aggregate(failures) {
            return Err(err);
        }

        for (transport, _) in resolutions {
            let out_path = self.config.transport_path(transport);
            info!("Added transport {} => {}", transport, normalize(&out_path));
            self.overrides.write().insert(transport.as_str(), out_path);
            ctx.emit_chunk(transport_chunk(&self.config, transport));
        }

        Ok(())
    }
}
