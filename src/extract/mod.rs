//! Structured extraction from listing and article markup
//!
//! This module turns the loosely structured HTML of the press release site
//! into records:
//! - [`parse_listing`]: one listing page into deduplicated [`SummaryRecord`]s
//! - [`parse_article`]: one article page into an [`ArticleRecord`]
//!
//! Both extractors are pure. A field that cannot be found is never an error:
//! listing candidates missing a required field are skipped, and article
//! fields are left unset for the caller to back-fill.

mod article;
pub mod labels;
mod listing;
mod text;

pub use article::{parse_article, ArticleRecord};
pub use listing::{parse_listing, SummaryRecord};
pub use text::{flatten_inline, flatten_lines};
