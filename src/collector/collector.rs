//! Main collector that combines the three samplers.
//!
//! The `Collector` struct runs every sampler once per tick and stamps the
//! readings into a `Metrics` value.

use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;

use crate::collector::procfs::{CpuSampler, MemorySampler, NetworkSampler};
use crate::collector::traits::FileSystem;
use crate::config::MonitorConfig;
use crate::models::Metrics;

/// Gathers CPU, memory and network readings for one tick.
///
/// Owns all previous-sample state, so dropping or resetting the collector is
/// the only way that state goes away.
pub struct Collector<F: FileSystem> {
    fs: F,
    config: MonitorConfig,
    network: NetworkSampler,
    cpu: CpuSampler,
    memory: MemorySampler,
}

impl<F: FileSystem> Collector<F> {
    /// Creates a new collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `config` - Proc path and sampling interval
    pub fn new(fs: F, config: MonitorConfig) -> Self {
        Self {
            network: NetworkSampler::new(&config.proc_path, config.interval),
            cpu: CpuSampler::new(&config.proc_path),
            memory: MemorySampler::new(&config.proc_path),
            fs,
            config,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Mutable access to the filesystem, for tests that rewrite counters between ticks.
    pub fn fs_mut(&mut self) -> &mut F {
        &mut self.fs
    }

    pub fn network(&self) -> &NetworkSampler {
        &self.network
    }

    pub fn cpu(&self) -> &CpuSampler {
        &self.cpu
    }

    /// Samples memory, network and CPU, in that order.
    pub fn collect(&mut self) -> Metrics {
        let memory = self.memory.sample(&self.fs);
        let net = self.network.sample(&self.fs);
        let cpu = self.cpu.sample(&self.fs);

        let metrics = Metrics {
            timestamp: Utc::now().timestamp(),
            cpu,
            memory,
            net,
        };
        debug!("collected {:?}", metrics);
        metrics
    }

    /// Drops every sampler's previous-sample state.
    pub fn reset(&mut self) {
        self.network.reset();
        self.cpu.reset();
    }

    /// Counter files that do not exist under the configured proc path.
    pub fn missing_sources(&self) -> Vec<PathBuf> {
        [self.memory.path(), self.network.path(), self.cpu.path()]
            .into_iter()
            .filter(|path| !self.fs.exists(path))
            .map(|path| path.to_path_buf())
            .collect()
    }
}
