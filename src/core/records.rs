//! Newline-delimited JSON: one record per line in, one match group per line out.

use crate::domain::model::{MalformedPolicy, MatchGroup};
use crate::utils::error::{MatcherError, Result};
use serde::de::DeserializeOwned;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Parses every non-blank line of `data` as a `T`.
///
/// Each line is decoded on its own, so a line with invalid UTF-8 is just
/// another malformed line. Under `MalformedPolicy::Abort` the first bad line
/// fails the whole file; under `Skip` it is logged and dropped. `source`
/// names the file in errors.
pub fn parse_json_lines<T: DeserializeOwned>(
    data: &[u8],
    source: &str,
    policy: MalformedPolicy,
) -> Result<Vec<T>> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, raw) in data.split(|&b| b == b'\n').enumerate() {
        let line_number = index + 1;
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

        let parsed = match std::str::from_utf8(raw) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => serde_json::from_str::<T>(line).map_err(|e| e.to_string()),
            Err(e) => Err(format!("invalid UTF-8: {}", e)),
        };

        match parsed {
            Ok(record) => records.push(record),
            Err(message) => match policy {
                MalformedPolicy::Abort => {
                    return Err(MatcherError::MalformedRecord {
                        file: source.to_string(),
                        line: line_number,
                        message,
                    });
                }
                MalformedPolicy::Skip => {
                    tracing::warn!(
                        "Skipping malformed record {}:{}: {}",
                        source,
                        line_number,
                        message
                    );
                    skipped += 1;
                }
            },
        }
    }

    if skipped > 0 {
        tracing::warn!("Dropped {} malformed records from {}", skipped, source);
    }
    tracing::debug!("Parsed {} records from {}", records.len(), source);

    Ok(records)
}

/// One JSON object per group, each line terminated by `\n`. Empty groups are kept.
pub fn to_json_lines(groups: &[MatchGroup]) -> Result<String> {
    let mut out = String::new();
    for group in groups {
        out.push_str(&serde_json::to_string(group)?);
        out.push('\n');
    }
    Ok(out)
}
