//! Input file format classification from a two-line peek.

use super::mac;

/// Record format of a device dump file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// One bare MAC address per line.
    MacList,
    /// `show ip arp` style output (`Internet <ip> <age> <mac> ARPA <iface>`).
    ArpTable,
    /// `show mac address-table` style output (`<vlan> <mac> <type> <port>`).
    MacTable,
}

/// Classify a file from its first two lines, in strict precedence:
/// a syntactically valid bare MAC wins outright, then the ARP heuristics,
/// then MAC table as the catch-all.
pub fn classify(first_line: &str, second_line: &str) -> InputFormat {
    if mac::is_valid(first_line) {
        return InputFormat::MacList;
    }
    if first_line.starts_with("Protocol")
        || first_line.contains("Internet")
        || second_line.contains("Internet")
    {
        return InputFormat::ArpTable;
    }
    InputFormat::MacTable
}
