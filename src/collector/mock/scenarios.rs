//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` counter files for the three
//! sampled sources, plus setters that rewrite one source between ticks.

use super::filesystem::MockFs;

const NET_DEV_HEADER: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
";

impl MockFs {
    /// Creates a typical desktop system.
    ///
    /// Includes loopback, one wired and one wireless interface, and a libvirt bridge.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );
        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
cpu2 2500 125 750 20000 250 50 25 0 0 0
cpu3 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
        );
        fs.set_net_dev(&[
            ("lo", 12345678, 12345678),
            ("eth0", 987654321, 123456789),
            ("wlan0", 1000000, 500000),
            ("virbr0", 4444444, 3333333),
        ]);

        fs
    }

    /// Creates a host where every interface except `eth0` is virtual.
    pub fn virtual_interfaces() -> Self {
        let mut fs = Self::typical_system();
        fs.set_net_dev(&[
            ("lo", 900, 900),
            ("eth0", 1000, 2000),
            ("ifb7", 111111, 111111),
            ("lxdbr0", 222222, 222222),
            ("virbr1", 333333, 333333),
            ("br0", 444444, 444444),
            ("vnet2", 555555, 555555),
            ("tun3", 666666, 666666),
            ("tap4", 777777, 777777),
        ]);
        fs
    }

    /// Creates a system where the CPU barely moves between ticks.
    pub fn idle_system() -> Self {
        let mut fs = Self::typical_system();
        fs.set_cpu_ticks(100, 0, 50, 100000);
        fs
    }

    /// Creates a `/proc` that exists but carries none of the counter files.
    pub fn empty_proc() -> Self {
        let mut fs = Self::new();
        fs.add_file("/proc/uptime", "12345.67 98765.43\n");
        fs
    }

    /// Rewrites `/proc/net/dev` with the given `(interface, rx_bytes, tx_bytes)` rows.
    pub fn set_net_dev(&mut self, interfaces: &[(&str, u64, u64)]) {
        let mut content = String::from(NET_DEV_HEADER);
        for (name, rx, tx) in interfaces {
            content.push_str(&format!(
                "{:>6}: {} 1000 0 0 0 0 0 0 {} 800 0 0 0 0 0 0\n",
                name, rx, tx
            ));
        }
        self.add_file("/proc/net/dev", content);
    }

    /// Rewrites the aggregate `cpu` row of `/proc/stat`.
    pub fn set_cpu_ticks(&mut self, user: u64, nice: u64, system: u64, idle: u64) {
        self.add_file(
            "/proc/stat",
            format!(
                "cpu  {} {} {} {} 40 0 3 0 0 0\ncpu0 {} {} {} {} 40 0 3 0 0 0\nctxt 42\n",
                user, nice, system, idle, user, nice, system, idle
            ),
        );
    }

    /// Rewrites `/proc/meminfo` with the two rows the memory sampler reads.
    pub fn set_meminfo(&mut self, total_kb: u64, available_kb: u64) {
        self.add_file(
            "/proc/meminfo",
            format!(
                "MemTotal:       {} kB\nMemFree:        {} kB\nMemAvailable:   {} kB\n",
                total_kb,
                available_kb / 2,
                available_kb
            ),
        );
    }
}
