//! Target identity derivation
//!
//! The identity of an article is a file name built from its unit, publish
//! date and title. It does not depend on the URL, so the same press release
//! listed under two links maps to one document.

use std::fmt;

/// Longest file name kept, in characters
pub const MAX_FILENAME_CHARS: usize = 180;

/// Longest file name kept, in UTF-8 bytes
///
/// File systems cap names at 255 bytes, and writes go through a `.tmp`
/// sibling first, so four bytes stay free.
pub const MAX_FILENAME_BYTES: usize = 251;

const DOCUMENT_EXTENSION: &str = "md";

/// Deterministic storage key of an article
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetIdentity {
    file_name: String,
}

impl TargetIdentity {
    /// Derives the identity from the three identifying fields
    ///
    /// # Example
    ///
    /// ```
    /// use press_mirror::TargetIdentity;
    ///
    /// let identity = TargetIdentity::new("航政司", "113-05-01", "新制/上路");
    /// assert_eq!(identity.file_name(), "航政司_113-05-01_新制_上路.md");
    /// ```
    pub fn new(unit: &str, publish_date: &str, title: &str) -> Self {
        let raw = format!("{}_{}_{}.{}", unit, publish_date, title, DOCUMENT_EXTENSION);
        Self {
            file_name: sanitize_filename(&raw),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl fmt::Display for TargetIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name)
    }
}

/// Makes a string safe to use as a file name on Windows, macOS and Linux
///
/// Reserved characters become `_`, whitespace runs collapse to one space,
/// leading and trailing dots and spaces are removed and the result is capped
/// at [`MAX_FILENAME_CHARS`] characters and [`MAX_FILENAME_BYTES`] bytes,
/// cutting on a character boundary.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();

    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_matches(|c| c == '.' || c == ' ');

    let mut end = 0;
    for (count, (idx, c)) in trimmed.char_indices().enumerate() {
        let next = idx + c.len_utf8();
        if count == MAX_FILENAME_CHARS || next > MAX_FILENAME_BYTES {
            break;
        }
        end = next;
    }

    if end < trimmed.len() {
        trimmed[..end].trim_end().to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_format() {
        let identity = TargetIdentity::new("U1", "113-05-01", "T1");
        assert_eq!(identity.file_name(), "U1_113-05-01_T1.md");
        assert_eq!(identity.to_string(), "U1_113-05-01_T1.md");
    }

    #[test]
    fn test_identity_is_deterministic() {
        assert_eq!(
            TargetIdentity::new("航政司", "113-05-01", "港埠新制"),
            TargetIdentity::new("航政司", "113-05-01", "港埠新制")
        );
        assert_ne!(
            TargetIdentity::new("航政司", "113-05-01", "港埠新制"),
            TargetIdentity::new("航政司", "113-05-02", "港埠新制")
        );
    }

    #[test]
    fn test_sanitize_reserved_characters() {
        assert_eq!(sanitize_filename(r#"a\b/c:d*e?f"g<h>i|j"#), "a_b_c_d_e_f_g_h_i_j");
    }

    #[test]
    fn test_sanitize_whitespace_and_dots() {
        assert_eq!(sanitize_filename("  ..交通部\t新聞   稿.. "), "交通部 新聞 稿");
    }

    #[test]
    fn test_sanitize_truncates_by_characters() {
        let long = "a".repeat(200);
        let sanitized = sanitize_filename(&long);
        assert_eq!(sanitized.chars().count(), MAX_FILENAME_CHARS);
    }

    #[test]
    fn test_sanitize_truncates_wide_characters_by_bytes() {
        let long = "交".repeat(200);
        let sanitized = sanitize_filename(&long);
        // 3 bytes per character: 83 whole characters fit in 251 bytes
        assert_eq!(sanitized.chars().count(), 83);
        assert!(sanitized.len() <= MAX_FILENAME_BYTES);
    }

    #[test]
    fn test_long_cjk_title_fits_file_system_limit() {
        let identity = TargetIdentity::new("航政司", "113-05-01", &"交".repeat(90));
        let name = identity.file_name();
        assert!(name.len() + ".tmp".len() <= 255);
        assert!(name.starts_with("航政司_113-05-01_交"));
    }

    #[test]
    fn test_truncation_trims_trailing_space() {
        let name = format!("{} tail", "a".repeat(MAX_FILENAME_CHARS - 1));
        let sanitized = sanitize_filename(&name);
        assert_eq!(sanitized, "a".repeat(MAX_FILENAME_CHARS - 1));
    }
}
