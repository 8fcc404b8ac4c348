//! Format generation reports as text or JSON.

use crate::compression::space_savings;
use crate::encoder::GenerationReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{CellAlignment, Table};
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn format_savings(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Human-readable summary of a generation run.
pub fn format_report_text(report: &GenerationReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Embedded module `{}`", report.package))
    ));
    if !report.tags.is_empty() {
        out.push_str(&format!("  cfg: any({})\n\n", report.tags.join(", ")));
    }
    if report.records.is_empty() {
        out.push_str("No files embedded.\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Original", "Stored", "Gzip", "Savings"]);
    for row in &report.records {
        table.add_row(vec![
            row.path.clone(),
            row.original_size.to_string(),
            row.stored_size.to_string(),
            if row.compressed { "yes" } else { "no" }.to_string(),
            format_savings(row.space_savings()),
        ]);
    }
    for index in 1..=4 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    out.push_str(&format!("{}\n\n", table));

    let original = report.total_original_size();
    let stored = report.total_stored_size();
    out.push_str(&format!(
        "Total: {} files, {} compressed, {} -> {} bytes ({} saved).\n",
        report.records.len(),
        report.compressed_count(),
        original,
        stored,
        format_savings(space_savings(original, stored))
    ));
    out
}

/// JSON form of a generation report.
pub fn format_report_json(report: &GenerationReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
