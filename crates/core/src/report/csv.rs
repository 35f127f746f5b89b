//! CSV export of a visible expense set.
//!
//! Output is UTF-8 with a byte-order-mark prefix (so spreadsheet tools detect
//! the encoding) and CRLF row separators. Fields containing a comma, quote,
//! or newline are quote-wrapped with interior quotes doubled.

use chrono::NaiveDate;

use super::types::{ReportEntry, format_amount};

/// UTF-8 byte order mark prepended to the document.
const BOM: &str = "\u{feff}";

/// Escapes a single CSV field.
///
/// Quote-wraps the value when it contains a comma, quote, or newline,
/// doubling interior quotes.
#[must_use]
pub fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders the expense set as a CSV document.
///
/// The requester and department columns are included only for privileged
/// (manager/admin) callers, mirroring the visibility rule applied everywhere
/// expenses are listed.
#[must_use]
pub fn render_csv(entries: &[ReportEntry], privileged: bool) -> String {
    let mut headers = vec!["Description", "Category", "Amount", "Status"];
    if privileged {
        headers.push("Requested by");
        headers.push("Department");
    }
    headers.push("Date");

    let mut lines = vec![headers.join(",")];

    for entry in entries {
        let mut fields = vec![
            escape_field(&entry.title),
            escape_field(entry.category.as_str()),
            format_amount(entry.amount),
            escape_field(entry.status.as_str()),
        ];
        if privileged {
            let (username, department) = entry
                .requester
                .as_ref()
                .map_or(("", ""), |r| (r.username.as_str(), r.department.as_str()));
            fields.push(escape_field(username));
            fields.push(escape_field(department));
        }
        fields.push(
            entry
                .date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        );
        lines.push(fields.join(","));
    }

    format!("{BOM}{}", lines.join("\r\n"))
}

/// Returns the attachment filename for an export generated on `date`.
#[must_use]
pub fn attachment_filename(date: NaiveDate) -> String {
    format!("expense-report-{date}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::{ExpenseCategory, ExpenseStatus};
    use crate::report::types::Requester;
    use rust_decimal_macros::dec;

    fn entry(title: &str) -> ReportEntry {
        ReportEntry {
            title: title.to_string(),
            category: ExpenseCategory::Travel,
            amount: dec!(500),
            status: ExpenseStatus::Pending,
            requester: Some(Requester {
                username: "alice".to_string(),
                department: "Sales".to_string(),
            }),
            date: NaiveDate::from_ymd_opt(2026, 3, 1),
        }
    }

    #[test]
    fn test_starts_with_bom() {
        let csv = render_csv(&[], false);
        assert!(csv.starts_with('\u{feff}'));
    }

    #[test]
    fn test_header_row_unprivileged() {
        let csv = render_csv(&[], false);
        assert_eq!(
            csv.trim_start_matches('\u{feff}'),
            "Description,Category,Amount,Status,Date"
        );
    }

    #[test]
    fn test_header_row_privileged() {
        let csv = render_csv(&[], true);
        assert_eq!(
            csv.trim_start_matches('\u{feff}'),
            "Description,Category,Amount,Status,Requested by,Department,Date"
        );
    }

    #[test]
    fn test_row_rendering() {
        let csv = render_csv(&[entry("Taxi")], true);
        let rows: Vec<&str> = csv.trim_start_matches('\u{feff}').split("\r\n").collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], "Taxi,Travel,500.00,Pending,alice,Sales,2026-03-01");
    }

    #[test]
    fn test_requester_columns_hidden_for_unprivileged() {
        let csv = render_csv(&[entry("Taxi")], false);
        assert!(!csv.contains("alice"));
        assert!(!csv.contains("Sales"));
    }

    #[test]
    fn test_escape_comma() {
        assert_eq!(escape_field("Taxi, airport"), "\"Taxi, airport\"");
    }

    #[test]
    fn test_escape_quote() {
        assert_eq!(escape_field("the \"special\" one"), "\"the \"\"special\"\" one\"");
    }

    #[test]
    fn test_escape_newline() {
        assert_eq!(escape_field("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn test_plain_field_untouched() {
        assert_eq!(escape_field("Taxi"), "Taxi");
    }

    #[test]
    fn test_comma_in_title_keeps_column_count() {
        let csv = render_csv(&[entry("Taxi, airport \"run\"")], true);
        let rows: Vec<&str> = csv.trim_start_matches('\u{feff}').split("\r\n").collect();
        // Naive comma-count on the quoted row would overcount; parsing it back
        // is covered by the property tests. Here just check the quoted wrap.
        assert!(rows[1].starts_with("\"Taxi, airport \"\"run\"\"\","));
    }

    #[test]
    fn test_attachment_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(attachment_filename(date), "expense-report-2026-03-01.csv");
    }

    #[test]
    fn test_missing_requester_renders_empty() {
        let mut e = entry("Taxi");
        e.requester = None;
        let csv = render_csv(&[e], true);
        let rows: Vec<&str> = csv.trim_start_matches('\u{feff}').split("\r\n").collect();
        assert_eq!(rows[1], "Taxi,Travel,500.00,Pending,,,2026-03-01");
    }
}
