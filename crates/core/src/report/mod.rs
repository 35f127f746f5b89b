//! Expense report rendering.
//!
//! Pure rendering of a visible expense set into its export representations:
//! - `csv` - spreadsheet export with BOM and CSV escaping
//! - `html` - self-contained HTML document for email delivery
//!
//! Both renderers take the same row type and a privileged flag that controls
//! whether requester identity columns are included.

pub mod csv;
pub mod html;
pub mod types;

#[cfg(test)]
mod csv_props;

pub use csv::{attachment_filename, render_csv};
pub use html::render_html_report;
pub use types::{ReportEntry, Requester};
