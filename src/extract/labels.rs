//! Fixed labels of the press release markup
//!
//! Field extraction is driven by the [`FIELD_RULES`] table: each field is
//! looked up by one or more label prefixes, tried in order, inside a bounded
//! window of lines.

/// Banner that precedes the genuine article region
pub const BANNER: &str = "交通新聞稿";

pub const NEWS_CATEGORY_LABEL: &str = "新聞類別";
pub const BUSINESS_CATEGORY_LABEL: &str = "業務分類";
pub const CATEGORY_LABEL: &str = "分類";
pub const DATE_LABEL: &str = "發布日期";
pub const UNIT_LABEL: &str = "發布單位";

/// Every label that marks a metadata line rather than content
pub const KNOWN_LABELS: [&str; 5] = [
    NEWS_CATEGORY_LABEL,
    BUSINESS_CATEGORY_LABEL,
    CATEGORY_LABEL,
    DATE_LABEL,
    UNIT_LABEL,
];

/// Full-width and ASCII label separators
pub const SEPARATORS: [char; 2] = ['：', ':'];

/// Page chrome that follows the article body
pub const STOP_MARKERS: [&str; 6] = ["回上一頁", "回頁首", "更新日期", "瀏覽人次", "點閱次數", "分享"];

/// Article metadata fields recognised by label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    NewsCategory,
    BusinessCategory,
    PublishDate,
    Unit,
}

/// Labels tried, in order, for one field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub labels: &'static [&'static str],
}

pub const FIELD_RULES: [FieldRule; 4] = [
    FieldRule {
        field: Field::NewsCategory,
        labels: &[NEWS_CATEGORY_LABEL],
    },
    FieldRule {
        field: Field::BusinessCategory,
        labels: &[BUSINESS_CATEGORY_LABEL, CATEGORY_LABEL],
    },
    FieldRule {
        field: Field::PublishDate,
        labels: &[DATE_LABEL],
    },
    FieldRule {
        field: Field::Unit,
        labels: &[UNIT_LABEL],
    },
];

/// Returns the value of `line` if it starts with `label`
///
/// The value is whatever follows the first separator, trimmed. Without a
/// separator the remainder after the label is used. `Some("")` means the
/// label was present with nothing after it.
pub fn labeled_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(label)?;
    let value = rest
        .split_once(|c| SEPARATORS.contains(&c))
        .map_or(rest, |(_, value)| value);
    Some(value.trim())
}

/// True if `line` starts with any metadata label
pub fn is_metadata_line(line: &str) -> bool {
    KNOWN_LABELS.iter().any(|label| line.starts_with(label))
}

/// True if `line` is a stop marker, alone or followed by a separator
pub fn is_stop_marker(line: &str) -> bool {
    STOP_MARKERS.iter().any(|marker| match line.strip_prefix(marker) {
        Some(rest) => rest.is_empty() || rest.trim_start().starts_with(SEPARATORS),
        None => false,
    })
}
