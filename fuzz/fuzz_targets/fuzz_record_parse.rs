#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Whole-log path: arbitrary bytes, including invalid UTF-8 and blank lines.
    let parsed = audit_loader::parse_records(data).expect("in-memory reads cannot fail");
    let non_blank = data
        .split(|b| *b == b'\n')
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .count();
    assert!(parsed.records.len() + parsed.malformed.len() <= non_blank);

    // Single-line path.
    if let Ok(line) = std::str::from_utf8(data) {
        let _ = audit_types::DeliveryRecord::from_json_line(line);
    }
});
