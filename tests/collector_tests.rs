use std::thread;

use sysinfo::MINIMUM_CPU_UPDATE_INTERVAL;
use sysglance::system::collector::Collector;
use sysglance::system::provider::MetricsProvider;
use sysglance::system::snapshot::sample;

#[test]
fn live_snapshot_is_within_bounds() {
    let mut collector = Collector::new().expect("collector should start on a supported host");
    thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
    let snapshot = sample(&mut collector).unwrap();
    assert!((0.0..=100.0).contains(&snapshot.cpu_percent));
    assert!((0.0..=100.0).contains(&snapshot.memory_percent));
    assert!(snapshot.memory_percent > 0.0);
    assert!(snapshot.process_count >= 1);
}

#[test]
fn cumulative_counters_do_not_go_backwards() {
    let mut collector = Collector::new().unwrap();
    let first_disk = collector.read_disk_counters().unwrap();
    let first_net = collector.read_network_counters().unwrap();

    // Produce a little I/O of our own between the two reads.
    let path = std::env::temp_dir().join("sysglance_counter_scratch.bin");
    std::fs::write(&path, vec![0u8; 64 * 1024]).unwrap();
    let _ = std::fs::remove_file(&path);
    thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);

    let second_disk = collector.read_disk_counters().unwrap();
    let second_net = collector.read_network_counters().unwrap();

    assert!(second_disk.read_bytes >= first_disk.read_bytes);
    assert!(second_disk.write_bytes >= first_disk.write_bytes);
    assert!(second_net.sent_bytes >= first_net.sent_bytes);
    assert!(second_net.recv_bytes >= first_net.recv_bytes);
}
