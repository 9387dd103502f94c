//! Query-string substitution

use url::Url;

/// Returns `url` with query parameter `key` set to `value`
///
/// An existing `key` keeps its position and loses any duplicates; a missing
/// one is appended. All other pairs are left in order.
///
/// # Example
///
/// ```
/// use press_mirror::pagination::set_query_param;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/list?lang=ch&id=14").unwrap();
/// let paged = set_query_param(&url, "page", "2");
/// assert_eq!(paged.as_str(), "https://example.com/list?lang=ch&id=14&page=2");
/// ```
pub fn set_query_param(url: &Url, key: &str, value: &str) -> Url {
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    let mut replaced = false;
    pairs.retain_mut(|(k, v)| {
        if k != key {
            return true;
        }
        if replaced {
            return false;
        }
        *v = value.to_string();
        replaced = true;
        true
    });
    if !replaced {
        pairs.push((key.to_string(), value.to_string()));
    }

    let mut updated = url.clone();
    updated.query_pairs_mut().clear().extend_pairs(pairs.iter());
    updated
}
