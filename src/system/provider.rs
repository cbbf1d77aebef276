use color_eyre::Result;

use super::snapshot::{DiskCounters, NetworkCounters};

/// Every read is synchronous and may fail; a failed read ends the refresh
/// loop.
pub trait MetricsProvider {
    fn read_cpu_percent(&mut self) -> Result<f32>;

    fn read_memory_percent(&mut self) -> Result<f32>;

    fn read_process_count(&mut self) -> Result<usize>;

    fn read_disk_counters(&mut self) -> Result<DiskCounters>;

    fn read_network_counters(&mut self) -> Result<NetworkCounters>;
}

impl<P: MetricsProvider + ?Sized> MetricsProvider for &mut P {
    fn read_cpu_percent(&mut self) -> Result<f32> {
        (**self).read_cpu_percent()
    }

    fn read_memory_percent(&mut self) -> Result<f32> {
        (**self).read_memory_percent()
    }

    fn read_process_count(&mut self) -> Result<usize> {
        (**self).read_process_count()
    }

    fn read_disk_counters(&mut self) -> Result<DiskCounters> {
        (**self).read_disk_counters()
    }

    fn read_network_counters(&mut self) -> Result<NetworkCounters> {
        (**self).read_network_counters()
    }
}

impl<P: MetricsProvider + ?Sized> MetricsProvider for Box<P> {
    fn read_cpu_percent(&mut self) -> Result<f32> {
        (**self).read_cpu_percent()
    }

    fn read_memory_percent(&mut self) -> Result<f32> {
        (**self).read_memory_percent()
    }

    fn read_process_count(&mut self) -> Result<usize> {
        (**self).read_process_count()
    }

    fn read_disk_counters(&mut self) -> Result<DiskCounters> {
        (**self).read_disk_counters()
    }

    fn read_network_counters(&mut self) -> Result<NetworkCounters> {
        (**self).read_network_counters()
    }
}
