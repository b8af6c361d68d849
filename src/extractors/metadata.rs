// src/extractors/metadata.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// --- Constants ---
/// Suffix every backup file carries; also stripped from display labels.
pub const BACKUP_SUFFIX: &str = ".polaris.json";
/// Conventional prefix of scheduled backups; stripped from display labels.
pub const BACKUP_PREFIX: &str = "polaris_backup_";

// --- Regex Patterns (Lazy Static) ---
// Matches the first four consecutive digits anywhere in the name; a longer
// digit run still yields its leading four digits.
static YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}").expect("Failed to compile YEAR_RE")
});

// "Q" or "q" immediately followed by a single digit, e.g. "2025-Q1".
static QUARTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[Qq](\d)").expect("Failed to compile QUARTER_RE")
});

// A YYYY-MM-DD shaped substring, e.g. "2025-07-16".
static FULL_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("Failed to compile FULL_DATE_RE")
});

// --- Data Structures ---
/// Metadata derived from one backup file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRecord {
    pub filename: String,        // exact file name as found on disk
    pub label: String,           // human-readable display string
    pub year: Option<String>,    // 4-digit year, if one could be extracted
    pub quarter: Option<String>, // quarter digit as a string, if extractable
}

// --- Main Extractor Structure ---
pub struct MetadataExtractor;

impl MetadataExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// Derives a [`BackupRecord`] from a backup file name.
    ///
    /// Total function: every input produces a record. Matchers run in a
    /// fixed order and later matchers may overwrite fields set by earlier
    /// ones — quarter labeling takes precedence over the full-date form,
    /// which only runs when no quarter marker matched.
    pub fn extract(&self, filename: &str) -> BackupRecord {
        // Default label: the name with the conventional affixes removed.
        let mut label = filename.replace(BACKUP_SUFFIX, "").replace(BACKUP_PREFIX, "");
        let mut year: Option<String> = None;
        let mut quarter: Option<String> = None;

        if let Some(m) = YEAR_RE.find(filename) {
            year = Some(m.as_str().to_string());
        }

        let quarter_caps = QUARTER_RE.captures(filename);
        if let Some(caps) = &quarter_caps {
            let digit = caps[1].to_string();
            if let Some(y) = &year {
                label = format!("{} {}", quarter_name(&digit), y);
            }
            quarter = Some(digit);
        }

        // Full-date form is only considered when no quarter marker matched.
        if quarter_caps.is_none() {
            if let Some(caps) = FULL_DATE_RE.captures(filename) {
                let (y, month, day) = (&caps[1], &caps[2], &caps[3]);
                // Last writer wins over the bare 4-digit match above.
                year = Some(y.to_string());
                quarter = Some(quarter_from_month(month).to_string());
                label = format!("{}-{}-{}", y, month, day);
            }
        }

        tracing::trace!("Extracted metadata for '{}': label='{}'", filename, label);

        BackupRecord {
            filename: filename.to_string(),
            label,
            year,
            quarter,
        }
    }
}

/// Display name for a quarter digit. Digits outside 1-4 are kept as-is in a
/// generic "quarter N" form rather than rejected.
fn quarter_name(digit: &str) -> String {
    match digit {
        "1" => "first quarter".to_string(),
        "2" => "second quarter".to_string(),
        "3" => "third quarter".to_string(),
        "4" => "fourth quarter".to_string(),
        other => format!("quarter {}", other),
    }
}

/// Calendar quarter for a two-digit month string. Months outside 1-12 fall
/// into the last bucket; that matches the historical index format, so it is
/// kept and flagged instead of rejected.
fn quarter_from_month(month: &str) -> &'static str {
    let month_num: u32 = month.parse().unwrap_or(0);
    if !(1..=12).contains(&month_num) {
        tracing::warn!("Month '{}' outside 1-12, bucketing into quarter 4", month);
    }
    match month_num {
        1..=3 => "1",
        4..=6 => "2",
        7..=9 => "3",
        _ => "4",
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn extract(filename: &str) -> BackupRecord {
        MetadataExtractor::new().extract(filename)
    }

    #[test]
    fn test_full_date_filename() {
        let record = extract("polaris_backup_2025-07-16.polaris.json");
        assert_eq!(record.filename, "polaris_backup_2025-07-16.polaris.json");
        assert_eq!(record.label, "2025-07-16");
        assert_eq!(record.year.as_deref(), Some("2025"));
        assert_eq!(record.quarter.as_deref(), Some("3"));
    }

    #[test]
    fn test_quarterly_filename() {
        let record = extract("polaris_backup_2025-Q1.polaris.json");
        assert_eq!(record.label, "first quarter 2025");
        assert_eq!(record.year.as_deref(), Some("2025"));
        assert_eq!(record.quarter.as_deref(), Some("1"));
    }

    #[test]
    fn test_lowercase_quarter_marker() {
        let record = extract("polaris_backup_2024-q4.polaris.json");
        assert_eq!(record.label, "fourth quarter 2024");
        assert_eq!(record.quarter.as_deref(), Some("4"));
    }

    #[test]
    fn test_out_of_range_quarter_digit_kept() {
        // The quarter digit is not validated against 1-4; the label falls
        // back to the generic form.
        let record = extract("polaris_backup_2025-Q9.polaris.json");
        assert_eq!(record.label, "quarter 9 2025");
        assert_eq!(record.year.as_deref(), Some("2025"));
        assert_eq!(record.quarter.as_deref(), Some("9"));
    }

    #[test]
    fn test_no_digits_at_all() {
        let record = extract("notes.polaris.json");
        assert_eq!(record.label, "notes");
        assert_eq!(record.year, None);
        assert_eq!(record.quarter, None);
    }

    #[test]
    fn test_quarter_without_year_keeps_default_label() {
        // A quarter marker alone does not override the label.
        let record = extract("backup_Q2.polaris.json");
        assert_eq!(record.label, "backup_Q2");
        assert_eq!(record.year, None);
        assert_eq!(record.quarter.as_deref(), Some("2"));
    }

    #[test]
    fn test_quarter_wins_over_full_date() {
        // When both patterns are present only the quarter label is used and
        // the date-derived quarter is never computed.
        let record = extract("polaris_backup_2025-01-15_Q3.polaris.json");
        assert_eq!(record.label, "third quarter 2025");
        assert_eq!(record.quarter.as_deref(), Some("3"));
        assert_eq!(record.year.as_deref(), Some("2025"));
    }

    #[test]
    fn test_year_taken_from_longer_digit_run() {
        // An eight-digit run still yields its first four digits as the year,
        // and without dashes the full-date pattern does not apply.
        let record = extract("polaris_backup_20250716.polaris.json");
        assert_eq!(record.label, "20250716");
        assert_eq!(record.year.as_deref(), Some("2025"));
        assert_eq!(record.quarter, None);
    }

    #[test]
    fn test_month_zero_falls_through_to_fourth_quarter() {
        let record = extract("polaris_backup_2025-00-01.polaris.json");
        assert_eq!(record.label, "2025-00-01");
        assert_eq!(record.quarter.as_deref(), Some("4"));
    }

    #[test]
    fn test_month_thirteen_falls_through_to_fourth_quarter() {
        let record = extract("polaris_backup_2025-13-01.polaris.json");
        assert_eq!(record.quarter.as_deref(), Some("4"));
    }

    #[test]
    fn test_label_with_no_conventional_affixes() {
        let record = extract("archive-2023.json");
        assert_eq!(record.label, "archive-2023.json");
        assert_eq!(record.year.as_deref(), Some("2023"));
        assert_eq!(record.quarter, None);
    }

    #[test]
    fn test_non_ascii_label_preserved() {
        let record = extract("polaris_backup_نسخة.polaris.json");
        assert_eq!(record.label, "نسخة");
        assert_eq!(record.year, None);
        assert_eq!(record.quarter, None);
    }
}
