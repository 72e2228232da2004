//! Error page

use super::{escape, Page};
use crate::error::ErrorReport;

/// Renders an error; `show_detail` discloses the internal error text
pub fn page(report: &ErrorReport, show_detail: bool) -> Page {
    let mut content = format!(
        "<h1>{}</h1>\n<h2>{}</h2>",
        escape(&report.message),
        report.status.as_u16()
    );
    if show_detail {
        content.push_str(&format!("\n<pre>{}</pre>", escape(&report.detail)));
    }
    Page::new(report.message.clone(), content)
}
