//! Terminal text summary of a parsed dump.

use crate::aggregator::DumpSummary;
use crate::utils::error::DumpError;

/// Render a status table plus the rejected lines
///
/// **Public** - used by the analyze command's `--summary`
pub fn generate_text_summary(summary: &DumpSummary, errors: &[DumpError], max_lines: usize) -> String {
    let mut lines = Vec::new();

    lines.push(format!("  {:<40} {:>10}", "STATUS", "GOROUTINES"));
    lines.push(format!("  {}", "-".repeat(51)));
    for (status, count) in summary.top_statuses(max_lines) {
        let display_status = if status.len() > 40 {
            format!("{}...", truncate_at_char_boundary(status, 37))
        } else {
            status.to_string()
        };
        lines.push(format!("  {:<40} {:>10}", display_status, count));
    }
    if summary.by_status.len() > max_lines {
        lines.push(format!(
            "  ... {} more statuses",
            summary.by_status.len() - max_lines
        ));
    }

    lines.push(String::new());
    lines.push(format!("  Locked to thread:    {}", summary.locked_to_thread));
    lines.push(format!("  Elided stacks:       {}", summary.with_elided_frames));
    lines.push(format!("  With ancestors:      {}", summary.with_ancestors));
    lines.push(format!("  Deepest stack:       {} frames", summary.deepest_stack));
    if let Some(id) = summary.longest_waiting_id {
        lines.push(format!(
            "  Longest wait:        goroutine {} ({} minutes)",
            id,
            summary.longest_wait_millis / 60_000
        ));
    }

    if !errors.is_empty() {
        lines.push(String::new());
        lines.push(format!("  Rejected lines ({}):", errors.len()));
        for err in errors.iter().take(max_lines) {
            lines.push(format!("    {}", err));
        }
    }

    lines.join("\n")
}

fn truncate_at_char_boundary(s: &str, max: usize) -> &str {
    let mut end = max.min(s.len());
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
