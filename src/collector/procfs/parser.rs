//! Parsers for `/proc` counter files.
//!
//! These are pure functions over already-read lines. They are designed to be
//! easily testable with string inputs; file access lives in the samplers.

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Interface name prefixes that, followed by a digit, mark a virtual device.
///
/// `ifb` comes from traffic shapers, `lxdbr` from LXD, `virbr`/`vnet` from
/// libvirt, `tun`/`tap` from VPNs and emulators.
const VIRTUAL_PREFIXES: [&str; 7] = ["ifb", "lxdbr", "virbr", "br", "vnet", "tun", "tap"];

const LOOPBACK: &str = "lo";

/// Aggregate CPU row in `/proc/stat`; per-core rows are `cpu0`, `cpu1`, ...
const AGGREGATE_CPU: &str = "cpu";

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits a line on runs of non-word characters.
///
/// Separator runs collapse into one split point. A leading or trailing run
/// still produces an empty first or last field, so `"|bytes"` gives
/// `["", "bytes"]` and an empty line gives `[""]`.
pub fn split_fields(line: &str) -> Vec<&str> {
    let pieces: Vec<&str> = line.split(|c: char| !is_word_char(c)).collect();
    let last = pieces.len() - 1;
    pieces
        .into_iter()
        .enumerate()
        .filter(|(i, piece)| !piece.is_empty() || *i == 0 || *i == last)
        .map(|(_, piece)| piece)
        .collect()
}

/// Parses field `idx` as an unsigned counter.
pub fn parse_counter(fields: &[&str], idx: usize, name: &str) -> Result<u64, ParseError> {
    fields
        .get(idx)
        .ok_or_else(|| ParseError::new(format!("missing field {}", name)))?
        .parse()
        .map_err(|_| ParseError::new(format!("invalid {}", name)))
}

/// Returns true for loopback and virtual interfaces.
pub fn is_virtual_interface(name: &str) -> bool {
    if name == LOOPBACK {
        return true;
    }
    VIRTUAL_PREFIXES.iter().any(|prefix| {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_digit())
    })
}

// ============ Network Device Stats Parser ============

/// Byte totals summed over physical interfaces in `/proc/net/dev`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetTotals {
    /// Bytes received.
    pub down: u64,
    /// Bytes transmitted.
    pub up: u64,
}

/// Sums received/transmitted bytes of the physical interfaces.
///
/// Format:
/// Inter-|   Receive                                                |  Transmit
///  face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
///    lo: 1234567     1234    0    0    0     0          0         0  1234567     1234    0    0    0     0       0          0
///
/// Field 1 is rx bytes and field 9 is tx bytes. The header rows fall out
/// because their byte fields are not numeric. A line with two or fewer
/// fields ends the table.
pub fn parse_net_dev<I, S>(lines: I) -> NetTotals
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut totals = NetTotals::default();

    for line in lines {
        let fields = split_fields(line.as_ref());
        if fields.len() <= 2 {
            break;
        }

        let interface = fields[0];
        if is_virtual_interface(interface) {
            continue;
        }

        let (rx, tx) = match (
            parse_counter(&fields, 1, "rx_bytes"),
            parse_counter(&fields, 9, "tx_bytes"),
        ) {
            (Ok(rx), Ok(tx)) => (rx, tx),
            (Err(e), _) | (_, Err(e)) => {
                tracing::trace!("skipping net/dev row {:?}: {}", interface, e);
                continue;
            }
        };

        totals.down = totals.down.saturating_add(rx);
        totals.up = totals.up.saturating_add(tx);
    }

    totals
}

// ============ CPU Stats Parser ============

/// Busy and total tick counts of the aggregate CPU row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    /// user + system
    pub used: u64,
    /// user + system + idle
    pub total: u64,
}

/// Reads the aggregate `cpu` row of `/proc/stat`.
///
/// Only user, system and idle count; nice, iowait, irq, softirq, steal and
/// guest are left out of both sums. Returns `None` when no usable row is found.
pub fn parse_cpu_ticks<I, S>(lines: I) -> Option<CpuTicks>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        let fields = split_fields(line.as_ref());
        if fields.len() < 2 {
            continue;
        }

        if fields[0] == AGGREGATE_CPU && fields.len() >= 5 {
            let parsed = parse_counter(&fields, 1, "user").and_then(|user| {
                let system = parse_counter(&fields, 3, "system")?;
                let idle = parse_counter(&fields, 4, "idle")?;
                Ok((user, system, idle))
            });
            return match parsed {
                Ok((user, system, idle)) => {
                    let used = user.saturating_add(system);
                    Some(CpuTicks {
                        used,
                        total: used.saturating_add(idle),
                    })
                }
                Err(e) => {
                    tracing::debug!("unusable cpu row: {}", e);
                    None
                }
            };
        }
    }

    None
}

// ============ Memory Info Parser ============

/// The two `/proc/meminfo` rows the memory sampler needs, in kB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub mem_total: Option<u64>,
    pub mem_available: Option<u64>,
}

impl MemInfo {
    fn is_complete(&self) -> bool {
        self.mem_total.is_some() && self.mem_available.is_some()
    }
}

/// Scans `/proc/meminfo` for `MemTotal` and `MemAvailable`.
///
/// Stops once both are known or at the first line with fewer than two fields.
pub fn parse_meminfo<I, S>(lines: I) -> MemInfo
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut info = MemInfo::default();

    for line in lines {
        let fields = split_fields(line.as_ref());
        if fields.len() < 2 {
            break;
        }

        let value = parse_counter(&fields, 1, fields[0]).ok();
        match fields[0] {
            "MemTotal" => info.mem_total = value,
            "MemAvailable" => info.mem_available = value,
            _ => {}
        }

        if info.is_complete() {
            break;
        }
    }

    info
}
