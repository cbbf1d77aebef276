use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};

use super::provider::MetricsProvider;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiskCounters {
    pub read_bytes: u64,
    pub write_bytes: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetworkCounters {
    pub sent_bytes: u64,
    pub recv_bytes: u64,
}

/// Disk and network values are running totals, not rates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub process_count: usize,
    pub disk: DiskCounters,
    pub network: NetworkCounters,
}

/// Percentages outside `0..=100` (or NaN) count as read failures.
pub fn sample<P: MetricsProvider + ?Sized>(provider: &mut P) -> Result<Snapshot> {
    let _span = tracing::debug_span!("snapshot.sample").entered();

    let cpu_percent = provider
        .read_cpu_percent()
        .wrap_err("failed to read CPU usage")?;
    let memory_percent = provider
        .read_memory_percent()
        .wrap_err("failed to read memory usage")?;
    let process_count = provider
        .read_process_count()
        .wrap_err("failed to read process count")?;
    let disk = provider
        .read_disk_counters()
        .wrap_err("failed to read disk counters")?;
    let network = provider
        .read_network_counters()
        .wrap_err("failed to read network counters")?;

    Ok(Snapshot {
        cpu_percent: checked_percent("CPU", cpu_percent)?,
        memory_percent: checked_percent("memory", memory_percent)?,
        process_count,
        disk,
        network,
    })
}

fn checked_percent(metric: &str, value: f32) -> Result<f32> {
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(eyre!("{metric} usage out of range: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Scripted {
        cpu: f32,
        memory: f32,
        fail_disk: bool,
        calls: usize,
    }

    impl MetricsProvider for Scripted {
        fn read_cpu_percent(&mut self) -> Result<f32> {
            self.calls += 1;
            Ok(self.cpu)
        }

        fn read_memory_percent(&mut self) -> Result<f32> {
            self.calls += 1;
            Ok(self.memory)
        }

        fn read_process_count(&mut self) -> Result<usize> {
            self.calls += 1;
            Ok(3)
        }

        fn read_disk_counters(&mut self) -> Result<DiskCounters> {
            self.calls += 1;
            if self.fail_disk {
                return Err(eyre!("permission denied"));
            }
            Ok(DiskCounters {
                read_bytes: 10,
                write_bytes: 20,
            })
        }

        fn read_network_counters(&mut self) -> Result<NetworkCounters> {
            self.calls += 1;
            Ok(NetworkCounters {
                sent_bytes: 30,
                recv_bytes: 40,
            })
        }
    }

    #[test]
    fn sample_reads_every_metric_once() {
        let mut provider = Scripted {
            cpu: 12.5,
            memory: 50.0,
            ..Default::default()
        };
        let snapshot = sample(&mut provider).unwrap();
        assert_eq!(provider.calls, 5);
        assert_eq!(snapshot.process_count, 3);
        assert_eq!(snapshot.disk.write_bytes, 20);
        assert_eq!(snapshot.network.recv_bytes, 40);
    }

    #[test]
    fn percent_bounds_are_inclusive() {
        let mut provider = Scripted {
            cpu: 0.0,
            memory: 100.0,
            ..Default::default()
        };
        let snapshot = sample(&mut provider).unwrap();
        assert_eq!(snapshot.cpu_percent, 0.0);
        assert_eq!(snapshot.memory_percent, 100.0);
    }

    #[test]
    fn out_of_range_cpu_is_rejected() {
        let mut provider = Scripted {
            cpu: 100.5,
            memory: 10.0,
            ..Default::default()
        };
        let err = sample(&mut provider).unwrap_err();
        assert!(err.to_string().contains("CPU usage out of range"));
    }

    #[test]
    fn nan_memory_is_rejected() {
        let mut provider = Scripted {
            cpu: 1.0,
            memory: f32::NAN,
            ..Default::default()
        };
        assert!(sample(&mut provider).is_err());
    }

    #[test]
    fn failed_read_carries_context() {
        let mut provider = Scripted {
            fail_disk: true,
            ..Default::default()
        };
        let err = sample(&mut provider).unwrap_err();
        assert_eq!(err.to_string(), "failed to read disk counters");
        assert_eq!(err.root_cause().to_string(), "permission denied");
    }
}
