//! Time formatting helpers.

use std::time::Duration;

/// Format an elapsed duration as a short human-readable string.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs == 0 {
        let micros = elapsed.as_micros();
        if micros < 1000 {
            format!("{}µs", micros)
        } else {
            format!("{}ms", elapsed.as_millis())
        }
    } else if secs < 60 {
        format!("{}.{:03}s", secs, elapsed.subsec_millis())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
