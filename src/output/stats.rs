//! Run statistics display
//!
//! Formats a [`RunSummary`] for the terminal once a run is over.

use crate::pipeline::RunSummary;

/// Renders run statistics as a multi-line report
pub fn format_statistics(summary: &RunSummary) -> String {
    let mut lines = vec!["=== Run Statistics ===".to_string(), String::new()];

    lines.push(format!("Entries discovered: {}", summary.discovered));
    lines.push(format!("Entries processed: {}", summary.processed()));
    if summary.stopped {
        lines.push(format!(
            "Stopped early: {} entries not processed",
            summary.discovered.saturating_sub(summary.processed())
        ));
    }
    lines.push(String::new());

    lines.push("Outcomes:".to_string());
    for (label, count) in [
        ("Extracted", summary.extracted),
        ("Archive fetch failed", summary.fetch_failed),
        ("Malformed archive", summary.malformed_archive),
        ("No text member", summary.no_text_member),
        ("No archive available", summary.unresolved_archive),
    ] {
        if count > 0 {
            lines.push(format!(
                "  {}: {} ({:.1}%)",
                label,
                count,
                percentage(count, summary.processed())
            ));
        }
    }
    lines.push(String::new());

    lines.push(format!(
        "Success Rate: {:.1}% ({} / {} entries extracted)",
        percentage(summary.extracted, summary.processed()),
        summary.extracted,
        summary.processed()
    ));

    lines.join("\n")
}

/// Prints run statistics to stdout
pub fn print_statistics(summary: &RunSummary) {
    println!("{}", format_statistics(summary));
}

fn percentage(count: usize, total: usize) -> f64 {
    if total > 0 {
        (count as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
