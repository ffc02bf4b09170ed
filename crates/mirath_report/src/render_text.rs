//! Plain-text renderer: an aligned share table with each line's citation
//! underneath, then diagnostics and integrity footers.

use std::fmt::Write as _;

use crate::ReportModel;

const INDENT: &str = "    ";

/// Render the model as an aligned plain-text report.
pub fn render_text(model: &ReportModel) -> String {
    let mut out = String::new();

    // Cover
    let _ = writeln!(out, "{}", model.cover.title);
    let _ = writeln!(out, "{}", "=".repeat(model.cover.title.len()));
    match &model.cover.reason {
        Some(reason) => {
            let _ = writeln!(out, "Outcome: {} ({reason})", model.cover.outcome);
        }
        None => {
            let _ = writeln!(out, "Outcome: {}", model.cover.outcome);
        }
    }
    let currency = model
        .estate
        .currency
        .as_deref()
        .map(|c| format!(" {c}"))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "Deceased: {}   Net estate: {}{currency}",
        model.estate.deceased, model.estate.net_estate
    );
    out.push('\n');

    // Share table
    if model.table.is_empty() {
        let _ = writeln!(out, "No granted shares.");
    } else {
        render_table(&mut out, model);
    }

    // Blocked
    if !model.blocked.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Blocked");
        let _ = writeln!(out, "-------");
        for row in &model.blocked {
            let _ = writeln!(
                out,
                "- {} x{}: {} [{}]",
                row.heir, row.count, row.note, row.citation
            );
        }
    }

    // Diagnostics
    out.push('\n');
    let _ = writeln!(out, "Diagnostics");
    let _ = writeln!(out, "-----------");
    let _ = writeln!(
        out,
        "Pre-normalization total: {}",
        model.diagnostics.pre_normalization_total
    );
    match &model.diagnostics.detail {
        Some(detail) => {
            let _ = writeln!(out, "Outcome: {} ({detail})", model.diagnostics.outcome);
        }
        None => {
            let _ = writeln!(out, "Outcome: {}", model.diagnostics.outcome);
        }
    }
    if let Some(unallocated) = &model.diagnostics.unallocated_amount {
        let _ = writeln!(out, "Unallocated: {unallocated}");
    }

    // Integrity
    out.push('\n');
    let _ = writeln!(out, "Integrity");
    let _ = writeln!(out, "---------");
    let e = &model.integrity.engine;
    let _ = writeln!(out, "Engine: {}/{} {} ({})", e.vendor, e.name, e.version, e.build);
    let _ = writeln!(out, "Case:   {}", model.integrity.case_id);
    let _ = writeln!(out, "Result: {}", model.integrity.result_id);
    let _ = writeln!(out, "Run:    {}", model.integrity.run_id);
    let _ = writeln!(out, "Time:   {}", model.integrity.timestamp_utc);

    out
}

fn render_table(out: &mut String, model: &ReportModel) {
    let headers = ["Heir", "Count", "Share", "Percent", "Amount", "Note"];
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &model.table {
        widths[0] = widths[0].max(row.heir.len());
        widths[1] = widths[1].max(row.count.to_string().len());
        widths[2] = widths[2].max(row.share_label.len());
        widths[3] = widths[3].max(row.percent.len());
        widths[4] = widths[4].max(row.amount.len());
        widths[5] = widths[5].max(row.note.as_deref().unwrap_or("").len());
    }

    let _ = writeln!(
        out,
        "{:<w0$}  {:>w1$}  {:<w2$}  {:>w3$}  {:>w4$}  {:<w5$}",
        headers[0],
        headers[1],
        headers[2],
        headers[3],
        headers[4],
        headers[5],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
        w4 = widths[4],
        w5 = widths[5],
    );
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));

    for row in &model.table {
        let _ = writeln!(
            out,
            "{:<w0$}  {:>w1$}  {:<w2$}  {:>w3$}  {:>w4$}  {:<w5$}",
            row.heir,
            row.count,
            row.share_label,
            row.percent,
            row.amount,
            row.note.as_deref().unwrap_or(""),
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
            w4 = widths[4],
            w5 = widths[5],
        );
        let _ = writeln!(out, "{INDENT}{}", row.citation);
    }
}
