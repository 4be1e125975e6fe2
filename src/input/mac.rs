//! MAC address validation and canonicalization. Accepts the separator styles seen in
//! switch/router dumps (colon, dash, Cisco dot-groups) and optional mask suffixes.

/// Isolate the MAC portion of a raw field: everything before the first `/`
/// (mask notation like `00:11:22:33:44:55/ff:ff:ff:ff:ff:ff`) or whitespace.
fn mac_portion(raw: &str) -> &str {
    raw.trim()
        .split(|c: char| c == '/' || c.is_whitespace())
        .next()
        .unwrap_or("")
}

/// Check if a string is a valid MAC address.
/// Supports `00:11:22:33:44:55`, `00-11-22-33-44-55`, `0011.2233.4455`,
/// and bare `001122334455`, with or without a mask suffix.
pub fn is_valid(raw: &str) -> bool {
    let stripped: String = mac_portion(raw)
        .chars()
        .filter(|c| !matches!(c, ':' | '-' | '.'))
        .collect();
    stripped.len() == 12 && stripped.chars().all(|c| c.is_ascii_hexdigit())
}

/// Canonicalize a MAC address to lowercase colon-separated byte pairs
/// (`00:11:22:33:44:55`). Returns `None` if fewer than 12 hex characters
/// remain after separator/mask stripping. Idempotent on its own output.
pub fn normalize(raw: &str) -> Option<String> {
    let part = mac_portion(raw);

    // Dot-grouped (three 4-hex groups): concatenating the groups already
    // yields the bytes in order. Other styles just drop their separators.
    let joined: String = if part.contains('.') {
        part.split('.').collect()
    } else {
        part.chars().filter(|c| !matches!(c, ':' | '-')).collect()
    };
    let joined = joined.to_lowercase();

    let chars: Vec<char> = joined.chars().collect();
    if chars.len() < 12 {
        return None;
    }
    let hex: String = chars[..12].iter().collect();
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let pairs: Vec<&str> = (0..12).step_by(2).map(|i| &hex[i..i + 2]).collect();
    Some(pairs.join(":"))
}

/// Extract the OUI (first 3 octets) from a canonical MAC, as `"xx:xx:xx"`.
/// OUI keys are lowercase colon-separated everywhere: cache, failed lookups,
/// seed data, and persisted files all share this one convention.
pub fn extract_oui(canonical: &str) -> String {
    canonical.split(':').take(3).collect::<Vec<_>>().join(":")
}
