use std::collections::HashMap;
use std::ffi::OsStr;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use sysinfo::{Disks, Networks, ProcessRefreshKind, ProcessesToUpdate, System};

use super::provider::MetricsProvider;
use super::snapshot::{DiskCounters, NetworkCounters};

/// [`MetricsProvider`] backed by `sysinfo`.
///
/// CPU usage is computed between two refreshes, so the very first reading
/// after construction is usually 0.
pub struct Collector {
    sys: System,
    disks: Disks,
    networks: Networks,
}

impl Collector {
    pub fn new() -> Result<Self> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(eyre!(
                "system metrics are not supported on {}",
                std::env::consts::OS
            ));
        }

        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );

        Ok(Collector {
            sys,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
        })
    }

    pub fn system(&self) -> &System {
        &self.sys
    }
}

impl MetricsProvider for Collector {
    fn read_cpu_percent(&mut self) -> Result<f32> {
        self.sys.refresh_cpu_usage();
        let usage = self.sys.global_cpu_usage();
        if usage.is_nan() {
            return Err(eyre!("CPU usage is unavailable"));
        }
        // Rounding in per-core aggregation can overshoot slightly.
        Ok(usage.clamp(0.0, 100.0))
    }

    fn read_memory_percent(&mut self) -> Result<f32> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(eyre!("total physical memory reported as 0"));
        }
        let used = self.sys.used_memory().min(total);
        Ok((used as f64 / total as f64 * 100.0) as f32)
    }

    fn read_process_count(&mut self) -> Result<usize> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );
        Ok(self.sys.processes().len())
    }

    fn read_disk_counters(&mut self) -> Result<DiskCounters> {
        // Keep disks that vanish so the summed totals never go backwards.
        self.disks.refresh(false);
        let counters = sum_per_device(self.disks.list().iter().map(|disk| {
            let usage = disk.usage();
            (disk.name(), usage.total_read_bytes, usage.total_written_bytes)
        }));
        Ok(counters)
    }

    fn read_network_counters(&mut self) -> Result<NetworkCounters> {
        self.networks.refresh(false);
        let counters = self
            .networks
            .list()
            .values()
            .fold(NetworkCounters::default(), |acc, data| NetworkCounters {
                sent_bytes: acc.sent_bytes.saturating_add(data.total_transmitted()),
                recv_bytes: acc.recv_bytes.saturating_add(data.total_received()),
            });
        Ok(counters)
    }
}

/// Every mount of a device reports the whole device's counters, so each
/// device name is counted once.
fn sum_per_device<'a>(mounts: impl IntoIterator<Item = (&'a OsStr, u64, u64)>) -> DiskCounters {
    let devices: HashMap<&OsStr, (u64, u64)> = mounts
        .into_iter()
        .map(|(name, read, written)| (name, (read, written)))
        .collect();
    devices
        .values()
        .fold(DiskCounters::default(), |acc, &(read, written)| DiskCounters {
            read_bytes: acc.read_bytes.saturating_add(read),
            write_bytes: acc.write_bytes.saturating_add(written),
        })
}
