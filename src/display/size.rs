//! Byte count formatting

use humansize::{format_size, BINARY, DECIMAL};

use crate::config::SizeUnit;

/// Format a byte count, or `-` when there is none
pub fn format_byte_count(bytes: Option<u64>, unit: SizeUnit) -> String {
    let Some(bytes) = bytes else {
        return "-".to_string();
    };
    match unit {
        SizeUnit::Binary => format_size(bytes, BINARY),
        SizeUnit::Decimal => format_size(bytes, DECIMAL),
        SizeUnit::Raw => bytes.to_string(),
    }
}
