//! Article page extraction
//!
//! The article page is flattened to lines and read with fixed heuristics:
//! the last banner line opens the article region, metadata is found by label,
//! the title follows the unit line and the body runs until page chrome.

use crate::extract::labels::{
    is_metadata_line, is_stop_marker, labeled_value, Field, FieldRule, BANNER, FIELD_RULES,
    UNIT_LABEL,
};
use crate::extract::text::flatten_lines;
use crate::extract::SummaryRecord;
use scraper::Html;

/// Lines scanned for labelled metadata
const FIELD_WINDOW: usize = 80;

/// Lines scanned for the unit line that precedes the title
const TITLE_WINDOW: usize = 120;

/// Lines after the unit line that may hold the title
const TITLE_LOOKAHEAD: usize = 10;

/// Where the body starts when no title was recognised
const BODY_FALLBACK_OFFSET: usize = 10;

/// Structured content of one article page
///
/// Any optional field may be unset when its label was not found; see
/// [`ArticleRecord::backfill_from`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleRecord {
    pub url: String,
    pub news_category: Option<String>,
    pub business_category: Option<String>,
    pub publish_date: Option<String>,
    pub unit: Option<String>,
    pub title: Option<String>,

    /// Body text, ending before the first stop marker
    pub body_lines: Vec<String>,
}

impl ArticleRecord {
    /// Fills unset date, unit and title from the listing record
    ///
    /// Values extracted from the article page always win.
    pub fn backfill_from(mut self, summary: &SummaryRecord) -> Self {
        self.publish_date.get_or_insert_with(|| summary.publish_date.clone());
        self.unit.get_or_insert_with(|| summary.unit.clone());
        self.title.get_or_insert_with(|| summary.title.clone());
        self
    }
}

/// Parses raw article markup into an [`ArticleRecord`]
///
/// # Arguments
///
/// * `html` - Raw article markup
/// * `url` - URL the markup was fetched from
pub fn parse_article(html: &str, url: &str) -> ArticleRecord {
    let document = Html::parse_document(html);
    let lines = flatten_lines(&document);
    extract_article(&lines, url)
}

/// Applies the article heuristics to already flattened lines
pub fn extract_article(lines: &[String], url: &str) -> ArticleRecord {
    let block = working_block(lines);

    let title = locate_title(block);
    let body_start = title
        .as_ref()
        .map_or(BODY_FALLBACK_OFFSET, |(index, _)| index + 1);

    let body_lines = block
        .get(body_start..)
        .unwrap_or_default()
        .iter()
        .take_while(|line| !is_stop_marker(line))
        .cloned()
        .collect();

    ArticleRecord {
        url: url.to_string(),
        news_category: find_field(block, Field::NewsCategory),
        business_category: find_field(block, Field::BusinessCategory),
        publish_date: find_field(block, Field::PublishDate),
        unit: find_field(block, Field::Unit),
        title: title.map(|(_, title)| title),
        body_lines,
    }
}

/// Lines from the last banner onwards, or everything without a banner
///
/// Navigation menus repeat the banner text, so only the last occurrence
/// marks the article itself.
fn working_block(lines: &[String]) -> &[String] {
    let start = lines.iter().rposition(|line| line == BANNER).unwrap_or(0);
    &lines[start..]
}

/// Looks a field up through its labels in the field window
///
/// For each label the first line carrying it decides; an empty value falls
/// through to the next alternative label.
fn find_field(block: &[String], field: Field) -> Option<String> {
    let rule: &FieldRule = FIELD_RULES.iter().find(|rule| rule.field == field)?;

    rule.labels.iter().find_map(|label| {
        block
            .iter()
            .take(FIELD_WINDOW)
            .find_map(|line| labeled_value(line, label))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    })
}

/// Finds the title line: the first content line after the unit line
fn locate_title(block: &[String]) -> Option<(usize, String)> {
    let unit_index = block
        .iter()
        .take(TITLE_WINDOW)
        .position(|line| line.starts_with(UNIT_LABEL))?;

    block
        .iter()
        .enumerate()
        .skip(unit_index + 1)
        .take(TITLE_LOOKAHEAD)
        .find(|(_, line)| !line.is_empty() && !is_metadata_line(line))
        .map(|(index, line)| (index, line.clone()))
}
