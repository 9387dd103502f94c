//! Listing page extraction
//!
//! A listing page links to each press release with an anchor whose visible
//! text carries the publish date, the publishing unit and the title, e.g.
//! `發布日期：113-05-01 發布單位：航政司 港埠新制上路`.

use crate::extract::text::flatten_inline;
use chrono::NaiveDate;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// Anchors pointing at an article detail view of the news module
static CANDIDATE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(
        r#"a[href*="/ch/app/news_list/view"][href*="module=news"][href*="serno="][href*="id=14"]"#,
    )
    .expect("candidate selector is valid")
});

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"發布日期[：:]\s*([0-9]{3}-[0-9]{2}-[0-9]{2})").expect("date regex is valid"));

static UNIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"發布單位[：:]\s*(\S+)").expect("unit regex is valid"));

/// Everything up to and including the unit label and its value
static TITLE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*?發布單位[：:]\s*\S+\s*").expect("title regex is valid"));

/// Lightweight metadata for one article, as listed on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRecord {
    /// Absolute article URL, unique per listing
    pub url: String,

    /// Era date `YYY-MM-DD` (three-digit Minguo year)
    pub publish_date: String,

    /// Publishing unit, a single token
    pub unit: String,

    pub title: String,
}

impl SummaryRecord {
    /// Converts the era date to the Gregorian calendar (year + 1911)
    ///
    /// Returns `None` if the listed date is not a real calendar day.
    pub fn gregorian_date(&self) -> Option<NaiveDate> {
        let mut parts = self.publish_date.splitn(3, '-');
        let year: i32 = parts.next()?.parse().ok()?;
        let month: u32 = parts.next()?.parse().ok()?;
        let day: u32 = parts.next()?.parse().ok()?;
        NaiveDate::from_ymd_opt(year + 1911, month, day)
    }
}

/// Parses one listing page into summary records
///
/// Records are deduplicated by URL: the first occurrence fixes the position,
/// a later occurrence of the same URL replaces the values. Candidates that
/// miss the date, the unit or a title are skipped.
///
/// # Arguments
///
/// * `html` - Raw listing markup
/// * `base_url` - Base URL for resolving relative article links
pub fn parse_listing(html: &str, base_url: &Url) -> Vec<SummaryRecord> {
    let document = Html::parse_document(html);
    let mut records: IndexMap<String, SummaryRecord> = IndexMap::new();

    for element in document.select(&CANDIDATE_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let text = flatten_inline(element);
        match summarize(&text, href, base_url) {
            Some(record) => {
                records.insert(record.url.clone(), record);
            }
            None => tracing::trace!(href, text = %text, "Skipping listing candidate"),
        }
    }

    records.into_values().collect()
}

/// Builds a record from one candidate's flattened text and link
fn summarize(text: &str, href: &str, base_url: &Url) -> Option<SummaryRecord> {
    let publish_date = DATE_RE.captures(text)?.get(1)?.as_str().to_string();
    let unit = UNIT_RE.captures(text)?.get(1)?.as_str().to_string();

    let title = TITLE_PREFIX_RE.replace(text, "").trim().to_string();
    if title.is_empty() {
        return None;
    }

    let url = base_url.join(href.trim()).ok()?;

    let record = SummaryRecord {
        url: url.to_string(),
        publish_date,
        unit,
        title,
    };
    if record.gregorian_date().is_none() {
        tracing::warn!(
            url = %record.url,
            date = %record.publish_date,
            "Listed publish date is not a calendar day"
        );
    }
    Some(record)
}
