//! netvendor: resolve hardware vendors for MAC address dumps.
//!
//! Parses MAC lists, ARP tables, and switch MAC address tables, then resolves
//! each device's vendor through a layered OUI cache backed by rate-limited
//! online lookup services.

pub mod config;
pub mod input;
pub mod report;
pub mod vendor;
