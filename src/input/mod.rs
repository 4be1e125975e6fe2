//! Input handling: MAC normalization, format detection, and record extraction
//! for MAC tables, ARP tables, and plain MAC lists.

mod format;
mod mac;
mod parser;

pub use format::{classify, InputFormat};
pub use mac::{extract_oui, is_valid, normalize};
pub use parser::{parse_file, parse_file_detailed, parse_line, parse_text, DeviceMap, DeviceRecord};
