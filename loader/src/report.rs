//! Human-readable output of a lookup comparison.

use crate::benchmark::LookupTimings;

/// Render the comparison as a small table, one line per store.
pub fn render_report(timings: &LookupTimings) -> String {
    let relational_ms = timings.relational.as_secs_f64() * 1000.0;
    let cache_ms = timings.cache.as_secs_f64() * 1000.0;
    let rule = "=".repeat(48);

    let mut out = format!(
        "\n{rule}\n  Point lookup comparison ({} ids)\n{rule}\n",
        timings.lookups
    );
    out.push_str(&format!("  {:16} {:>12}\n", "Store", "Total (ms)"));
    out.push_str(&format!("  {}\n", "-".repeat(29)));
    out.push_str(&format!("  {:16} {:>12.2}\n", "SQLite", relational_ms));
    out.push_str(&format!("  {:16} {:>12.2}\n", "KeyDB", cache_ms));

    if timings.lookups > 0 && cache_ms > 0.0 {
        out.push_str(&format!(
            "\n  Cache lookups were {:.1}x faster.\n",
            relational_ms / cache_ms
        ));
    }
    out
}

pub fn print_report(timings: &LookupTimings) {
    println!("{}", render_report(timings));
}
