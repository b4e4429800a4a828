//! Line-oriented parsing of a node's delivery log.

use std::io::{self, BufRead};

use audit_types::DeliveryRecord;

/// Records parsed from one log, in file order, plus the lines that were dropped.
#[derive(Debug, Default)]
pub struct ParsedRecords {
    pub records: Vec<DeliveryRecord>,
    /// `(1-based line number, reason)` for every malformed line.
    pub malformed: Vec<(usize, String)>,
}

/// Parse newline-delimited JSON records from `reader`.
///
/// Blank lines are skipped silently. Lines that are not valid UTF-8, not
/// valid JSON, or lack a string `batch_id` / integer `seq` are recorded in
/// `malformed` and skipped. Only an I/O failure of the reader is an error.
pub fn parse_records<R: BufRead>(reader: R) -> io::Result<ParsedRecords> {
    let mut parsed = ParsedRecords::default();

    for (idx, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line_no = idx + 1;

        let text = match std::str::from_utf8(&line) {
            Ok(text) => text.trim(),
            Err(e) => {
                parsed.malformed.push((line_no, format!("invalid UTF-8: {e}")));
                continue;
            }
        };
        if text.is_empty() {
            continue;
        }

        match DeliveryRecord::from_json_line(text) {
            Ok(record) => parsed.records.push(record),
            Err(e) => parsed.malformed.push((line_no, e.to_string())),
        }
    }

    Ok(parsed)
}
