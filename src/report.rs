//! Report generation: per-device CSV, per-port CSV, and the plain-text
//! vendor distribution summary.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::io;
use std::path::Path;

use chrono::Local;
use thiserror::Error;
use tracing::info;

use crate::input::DeviceMap;
use crate::vendor::OuiResolver;

const UNKNOWN_VENDOR: &str = "Unknown";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

/// Resolve every device's vendor up front. Any network lookups happen on the
/// first report; later reports hit the resolver cache for the same OUIs.
fn resolve_all(devices: &DeviceMap, resolver: &mut OuiResolver) -> HashMap<String, String> {
    devices
        .keys()
        .map(|mac| {
            let vendor = resolver
                .get_vendor(mac)
                .unwrap_or_else(|| UNKNOWN_VENDOR.to_string());
            (mac.clone(), vendor)
        })
        .collect()
}

/// Write the per-device report: one row per MAC with its resolved vendor,
/// VLAN, and port, sorted by MAC.
pub fn write_device_csv(
    path: &Path,
    devices: &DeviceMap,
    resolver: &mut OuiResolver,
) -> Result<(), ReportError> {
    let vendors = resolve_all(devices, resolver);

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["MAC", "Vendor", "VLAN", "Port"])?;

    let mut macs: Vec<&String> = devices.keys().collect();
    macs.sort();
    for mac in macs {
        let record = &devices[mac];
        let vendor = vendors.get(mac).map(String::as_str).unwrap_or(UNKNOWN_VENDOR);
        writer.write_record([mac.as_str(), vendor, &record.vlan, &record.port])?;
    }
    writer.flush()?;
    info!(path = %path.display(), devices = devices.len(), "device report written");
    Ok(())
}

#[derive(Default)]
struct PortGroup {
    vlans: BTreeSet<String>,
    vendors: BTreeSet<String>,
    details: Vec<String>,
}

/// Write the per-port report: devices grouped by switch port with the VLANs
/// and vendors seen on each. Only meaningful for MAC address table input,
/// where ports are present.
pub fn write_port_csv(
    path: &Path,
    devices: &DeviceMap,
    resolver: &mut OuiResolver,
) -> Result<(), ReportError> {
    let vendors = resolve_all(devices, resolver);

    let mut ports: BTreeMap<String, PortGroup> = BTreeMap::new();
    let mut macs: Vec<&String> = devices.keys().collect();
    macs.sort();
    for mac in macs {
        let record = &devices[mac];
        let vendor = vendors.get(mac).map(String::as_str).unwrap_or(UNKNOWN_VENDOR);
        let group = ports.entry(record.port.clone()).or_default();
        group.vlans.insert(record.vlan.clone());
        group.vendors.insert(vendor.to_string());
        group
            .details
            .push(format!("{} ({}, VLAN {})", mac, vendor, record.vlan));
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Port", "Total Devices", "VLANs", "Vendors", "Device Details"])?;
    for (port, group) in &ports {
        writer.write_record([
            port.as_str(),
            &group.details.len().to_string(),
            &group.vlans.iter().cloned().collect::<Vec<_>>().join(", "),
            &group.vendors.iter().cloned().collect::<Vec<_>>().join(", "),
            &group.details.join("; "),
        ])?;
    }
    writer.flush()?;
    info!(path = %path.display(), ports = ports.len(), "port report written");
    Ok(())
}

/// Write the plain-text vendor distribution summary: an aligned table of
/// vendor, device count, and percentage, most common first.
pub fn write_vendor_summary(
    path: &Path,
    devices: &DeviceMap,
    resolver: &mut OuiResolver,
) -> Result<(), ReportError> {
    let vendors = resolve_all(devices, resolver);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for vendor in vendors.values() {
        *counts.entry(vendor.as_str()).or_insert(0) += 1;
    }
    let total: usize = counts.values().sum();

    // Descending by count, then by name so equal counts order stably.
    let mut ordered: Vec<(&str, usize)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let width = ordered
        .iter()
        .map(|(vendor, _)| vendor.len())
        .max()
        .unwrap_or(0)
        .max("Vendor".len());

    let mut out = String::new();
    out.push_str("Network Device Vendor Summary\n");
    out.push_str(&format!("Generated: {}\n", Local::now().format("%Y-%m-%d %H:%M:%S")));
    let separator = format!("+{}+-------+------------+\n", "-".repeat(width + 2));
    out.push_str(&separator);
    out.push_str(&format!("| {:<width$} | Count | Percentage |\n", "Vendor"));
    out.push_str(&separator.replace('-', "="));
    for (vendor, count) in &ordered {
        let percentage = if total == 0 {
            0.0
        } else {
            *count as f64 / total as f64 * 100.0
        };
        out.push_str(&format!(
            "| {:<width$} | {:<5} | {:<9.1}% |\n",
            vendor, count, percentage
        ));
    }
    out.push_str(&separator);

    fs::write(path, out)?;
    info!(path = %path.display(), vendors = ordered.len(), "vendor summary written");
    Ok(())
}
