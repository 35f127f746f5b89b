//! HTML report rendering for email delivery.
//!
//! Produces a self-contained document: header, generation date, total amount,
//! entry count, and a styled table. Every textual field is HTML-escaped;
//! empty or missing values render as an em-dash placeholder.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{ReportEntry, format_amount};

/// Placeholder for empty or missing fields.
const PLACEHOLDER: &str = "\u{2014}";

const CELL_STYLE: &str = "padding:8px 12px;border:1px solid #e2e8f0";
const HEAD_STYLE: &str = "padding:8px 12px;border:1px solid #e2e8f0;text-align:left";

/// Escapes text for embedding in HTML.
#[must_use]
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn escape_or_placeholder(value: &str) -> String {
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        escape_html(value)
    }
}

/// Renders the expense set as a self-contained HTML report.
///
/// The "Requested by" column is included only for privileged callers.
#[must_use]
pub fn render_html_report(
    entries: &[ReportEntry],
    privileged: bool,
    generated_on: NaiveDate,
) -> String {
    let total: Decimal = entries.iter().map(|e| e.amount).sum();
    let generated = generated_on.format("%d %B %Y");

    let mut rows = String::new();
    for entry in entries {
        let requester_cell = if privileged {
            let requested_by = entry.requester.as_ref().map_or_else(
                || PLACEHOLDER.to_string(),
                |r| {
                    if r.department.is_empty() {
                        escape_html(&r.username)
                    } else {
                        escape_html(&format!("{} ({})", r.username, r.department))
                    }
                },
            );
            format!("<td style=\"{CELL_STYLE}\">{requested_by}</td>")
        } else {
            String::new()
        };
        let date = entry
            .date
            .map_or_else(|| PLACEHOLDER.to_string(), |d| d.to_string());

        rows.push_str(&format!(
            "\n        <tr>\n            \
             <td style=\"{CELL_STYLE}\">{title}</td>\n            \
             <td style=\"{CELL_STYLE}\">{category}</td>\n            \
             <td style=\"{CELL_STYLE}\">{amount}</td>\n            \
             <td style=\"{CELL_STYLE}\">{status}</td>\n            \
             {requester_cell}<td style=\"{CELL_STYLE}\">{date}</td>\n        </tr>",
            title = escape_or_placeholder(&entry.title),
            category = escape_html(entry.category.as_str()),
            amount = format_amount(entry.amount),
            status = escape_html(entry.status.as_str()),
        ));
    }

    let requester_head = if privileged {
        format!("<th style=\"{HEAD_STYLE}\">Requested by</th>")
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><style>body{{font-family:system-ui,sans-serif;color:#334155;line-height:1.5;max-width:720px;margin:0 auto;padding:24px}}</style></head>
<body>
    <h1 style="color:#1e293b;margin-bottom:4px">CorpSpend Expense Report</h1>
    <p style="color:#64748b;margin-bottom:24px">Generated on {generated}</p>
    <p style="margin-bottom:16px"><strong>Total amount:</strong> {total}</p>
    <p style="margin-bottom:16px"><strong>Total entries:</strong> {count}</p>
    <table style="width:100%;border-collapse:collapse;margin-top:16px">
        <thead>
            <tr style="background:#f1f5f9">
                <th style="{HEAD_STYLE}">Description</th>
                <th style="{HEAD_STYLE}">Category</th>
                <th style="{HEAD_STYLE}">Amount</th>
                <th style="{HEAD_STYLE}">Status</th>
                {requester_head}<th style="{HEAD_STYLE}">Date</th>
            </tr>
        </thead>
        <tbody>{rows}
        </tbody>
    </table>
    <p style="margin-top:24px;color:#64748b;font-size:14px">This is an automated report from CorpSpend.</p>
</body>
</html>"#,
        total = format_amount(total),
        count = entries.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::{ExpenseCategory, ExpenseStatus};
    use crate::report::types::Requester;
    use rust_decimal_macros::dec;

    fn generated_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn entry(title: &str, amount: Decimal) -> ReportEntry {
        ReportEntry {
            title: title.to_string(),
            category: ExpenseCategory::Food,
            amount,
            status: ExpenseStatus::Approved,
            requester: Some(Requester {
                username: "bob".to_string(),
                department: "Engineering".to_string(),
            }),
            date: NaiveDate::from_ymd_opt(2026, 2, 14),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>\"a\" & b</script>"),
            "&lt;script&gt;&quot;a&quot; &amp; b&lt;/script&gt;"
        );
    }

    #[test]
    fn test_totals_and_count() {
        let html = render_html_report(
            &[entry("Lunch", dec!(120.50)), entry("Dinner", dec!(80))],
            false,
            generated_on(),
        );
        assert!(html.contains("<strong>Total amount:</strong> 200.50"));
        assert!(html.contains("<strong>Total entries:</strong> 2"));
        assert!(html.contains("Generated on 01 March 2026"));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = render_html_report(
            &[entry("<img src=x onerror=alert(1)>", dec!(5))],
            false,
            generated_on(),
        );
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }

    #[test]
    fn test_privileged_column_toggle() {
        let entries = [entry("Lunch", dec!(10))];
        let privileged = render_html_report(&entries, true, generated_on());
        let plain = render_html_report(&entries, false, generated_on());

        assert!(privileged.contains("Requested by"));
        assert!(privileged.contains("bob (Engineering)"));
        assert!(!plain.contains("Requested by"));
        assert!(!plain.contains("bob"));
    }

    #[test]
    fn test_empty_fields_render_placeholder() {
        let mut e = entry("", dec!(10));
        e.requester = None;
        e.date = None;
        let html = render_html_report(&[e], true, generated_on());
        assert!(html.contains('\u{2014}'));
    }

    #[test]
    fn test_empty_set_renders_document() {
        let html = render_html_report(&[], false, generated_on());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<strong>Total entries:</strong> 0"));
        assert!(html.contains("<strong>Total amount:</strong> 0.00"));
    }
}
