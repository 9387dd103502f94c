//! Markdown document rendering
//!
//! Every mirrored article becomes one Markdown document: a title heading, a
//! metadata list, a separator and the body lines verbatim.

use crate::extract::labels::{BUSINESS_CATEGORY_LABEL, DATE_LABEL, NEWS_CATEGORY_LABEL, UNIT_LABEL};
use crate::extract::ArticleRecord;

/// Heading used when no title could be extracted or back-filled
pub const UNTITLED: &str = "(未解析到標題)";

const SOURCE_LABEL: &str = "原文連結";

/// Formats an article record as a Markdown document
///
/// The output is deterministic for a given record and ends with a newline.
///
/// # Arguments
///
/// * `article` - The record, with date, unit and title already reconciled
///
/// # Returns
///
/// A formatted markdown string
pub fn render_document(article: &ArticleRecord) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "# {}\n\n",
        article.title.as_deref().unwrap_or(UNTITLED)
    ));

    md.push_str(&format!(
        "- {}：{}\n",
        DATE_LABEL,
        article.publish_date.as_deref().unwrap_or_default()
    ));
    md.push_str(&format!(
        "- {}：{}\n",
        UNIT_LABEL,
        article.unit.as_deref().unwrap_or_default()
    ));
    if let Some(category) = non_empty(&article.news_category) {
        md.push_str(&format!("- {}：{}\n", NEWS_CATEGORY_LABEL, category));
    }
    if let Some(category) = non_empty(&article.business_category) {
        md.push_str(&format!("- {}：{}\n", BUSINESS_CATEGORY_LABEL, category));
    }
    md.push_str(&format!("- {}：{}\n", SOURCE_LABEL, article.url));

    md.push_str("\n---\n\n");

    for line in &article.body_lines {
        md.push_str(line);
        md.push('\n');
    }

    md
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
