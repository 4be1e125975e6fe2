//! Line-level record extraction for the supported dump formats. Malformed lines
//! are skipped silently; a bad row never aborts a file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::format::{self, InputFormat};
use super::mac;

/// One device row extracted from an input dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    /// Canonical MAC (`00:11:22:33:44:55`).
    pub mac: String,
    /// VLAN identifier, or `"N/A"` when the format carries none.
    pub vlan: String,
    /// Switch port, or `"N/A"` when the format carries none.
    pub port: String,
}

const NOT_AVAILABLE: &str = "N/A";

/// Device map keyed by canonical MAC; duplicate MACs are last-write-wins.
pub type DeviceMap = HashMap<String, DeviceRecord>;

/// Split on whitespace into at most `limit` fields; the final field keeps any
/// internal whitespace instead of being split further.
fn split_whitespace_limit(line: &str, limit: usize) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut rest = line.trim();
    while !rest.is_empty() && fields.len() + 1 < limit {
        match rest.find(char::is_whitespace) {
            Some(idx) => {
                let (head, tail) = rest.split_at(idx);
                fields.push(head);
                rest = tail.trim_start();
            }
            None => {
                fields.push(rest);
                return fields;
            }
        }
    }
    if !rest.is_empty() {
        fields.push(rest);
    }
    fields
}

/// Extract a record from one line under the given format. Returns `None` for
/// headers, blanks, and anything that fails validation.
pub fn parse_line(line: &str, format: InputFormat) -> Option<DeviceRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match format {
        InputFormat::MacList => {
            let lowered = line.to_lowercase();
            if !mac::is_valid(&lowered) {
                return None;
            }
            let canonical = mac::normalize(&lowered)?;
            Some(DeviceRecord {
                mac: canonical,
                vlan: NOT_AVAILABLE.to_string(),
                port: NOT_AVAILABLE.to_string(),
            })
        }
        InputFormat::ArpTable => {
            let fields = split_whitespace_limit(line, 6);
            if fields.len() < 6 || fields[0] != "Internet" {
                return None;
            }
            let canonical = mac::normalize(fields[3])?;
            let interface = fields[5].trim();
            let vlan = if interface.contains("Vlan") {
                interface.replace("Vlan", "")
            } else {
                NOT_AVAILABLE.to_string()
            };
            Some(DeviceRecord {
                mac: canonical,
                vlan,
                port: NOT_AVAILABLE.to_string(),
            })
        }
        InputFormat::MacTable => {
            let fields = split_whitespace_limit(line, 5);
            if fields.len() < 4 {
                return None;
            }
            // First column must be a numeric VLAN; headers and separators fail here
            if fields[0].parse::<u32>().is_err() {
                return None;
            }
            let canonical = mac::normalize(fields[1])?;
            Some(DeviceRecord {
                mac: canonical,
                vlan: fields[0].to_string(),
                port: fields[3].to_string(),
            })
        }
    }
}

/// Parse a whole dump held in memory: classify from the first two lines, then
/// extract every line under that format.
pub fn parse_text(content: &str) -> (InputFormat, DeviceMap) {
    let mut lines = content.lines();
    let first = lines.next().unwrap_or("").trim();
    let second = lines.next().unwrap_or("").trim();
    let format = format::classify(first, second);

    let mut devices = DeviceMap::new();
    for line in content.lines() {
        if let Some(record) = parse_line(line, format) {
            devices.insert(record.mac.clone(), record);
        }
    }
    debug!(?format, devices = devices.len(), "parsed input");
    (format, devices)
}

/// Parse a dump file, returning the detected format alongside the device map.
/// An unreadable file yields an empty map; reporting that to the operator is
/// the caller's job.
pub fn parse_file_detailed(path: &Path) -> (InputFormat, DeviceMap) {
    match fs::read_to_string(path) {
        Ok(content) => parse_text(&content),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read input file");
            (InputFormat::MacTable, DeviceMap::new())
        }
    }
}

/// Parse a dump file into a device map keyed by canonical MAC.
pub fn parse_file(path: &Path) -> DeviceMap {
    parse_file_detailed(path).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_limit_preserves_tail() {
        let fields = split_whitespace_limit("a  b c   d e f g", 5);
        assert_eq!(fields, vec!["a", "b", "c", "d", "e f g"]);
    }

    #[test]
    fn test_parse_mac_list_line() {
        let rec = parse_line("AA:BB:CC:DD:EE:FF", InputFormat::MacList).unwrap();
        assert_eq!(rec.mac, "aa:bb:cc:dd:ee:ff");
        assert_eq!(rec.vlan, "N/A");
        assert_eq!(rec.port, "N/A");
        assert_eq!(parse_line("not-a-mac", InputFormat::MacList), None);
    }

    #[test]
    fn test_parse_arp_line() {
        let rec = parse_line(
            "Internet  192.168.1.1   -   0011.2233.4455  ARPA   Vlan10",
            InputFormat::ArpTable,
        )
        .unwrap();
        assert_eq!(rec.mac, "00:11:22:33:44:55");
        assert_eq!(rec.vlan, "10");
        assert_eq!(rec.port, "N/A");
    }

    #[test]
    fn test_parse_arp_line_without_vlan_interface() {
        let rec = parse_line(
            "Internet  10.0.0.1  12  0011.2233.4455  ARPA  GigabitEthernet0/1",
            InputFormat::ArpTable,
        )
        .unwrap();
        assert_eq!(rec.vlan, "N/A");
    }

    #[test]
    fn test_parse_arp_skips_header_and_short_lines() {
        let header = "Protocol  Address  Age (min)  Hardware Addr  Type  Interface";
        assert_eq!(parse_line(header, InputFormat::ArpTable), None);
        assert_eq!(parse_line("Internet 10.0.0.1", InputFormat::ArpTable), None);
    }

    #[test]
    fn test_parse_mac_table_line() {
        let rec = parse_line("10  0011.2233.4455  DYNAMIC  Gi1/0/1", InputFormat::MacTable).unwrap();
        assert_eq!(rec.mac, "00:11:22:33:44:55");
        assert_eq!(rec.vlan, "10");
        assert_eq!(rec.port, "Gi1/0/1");
    }

    #[test]
    fn test_parse_mac_table_rejects_non_numeric_vlan() {
        assert_eq!(
            parse_line("Vlan  Mac Address  Type  Ports", InputFormat::MacTable),
            None
        );
        assert_eq!(
            parse_line("----  --------------  ------  -----", InputFormat::MacTable),
            None
        );
    }

    #[test]
    fn test_parse_mac_table_skips_bad_mac() {
        assert_eq!(
            parse_line("10  zz:zz:zz:zz:zz:zz  DYNAMIC  Gi1/0/1", InputFormat::MacTable),
            None
        );
    }

    #[test]
    fn test_parse_text_last_write_wins() {
        let content = "10  0011.2233.4455  DYNAMIC  Gi1/0/1\n\
                       20  0011.2233.4455  DYNAMIC  Gi1/0/2\n";
        let (format, devices) = parse_text(content);
        assert_eq!(format, InputFormat::MacTable);
        assert_eq!(devices.len(), 1);
        let rec = &devices["00:11:22:33:44:55"];
        assert_eq!(rec.vlan, "20");
        assert_eq!(rec.port, "Gi1/0/2");
    }

    #[test]
    fn test_parse_text_arp_table_end_to_end() {
        let content = "Protocol  Address          Age (min)  Hardware Addr   Type   Interface\n\
                       Internet  192.168.1.1             -   0011.2233.4455  ARPA   Vlan10\n\
                       Internet  192.168.1.2             5   aabb.ccdd.eeff  ARPA   Vlan10\n";
        let (format, devices) = parse_text(content);
        assert_eq!(format, InputFormat::ArpTable);
        assert_eq!(devices.len(), 2);
        assert_eq!(devices["aa:bb:cc:dd:ee:ff"].vlan, "10");
    }

    #[test]
    fn test_parse_file_missing_returns_empty() {
        let devices = parse_file(Path::new("/nonexistent/input.txt"));
        assert!(devices.is_empty());
    }
}
