//! Locale-aware date display helpers
//!
//! Display patterns are written in the Moment.js style the site
//! configuration uses (`DD MMM YYYY`) and converted to chrono patterns
//! before formatting.

use chrono::{DateTime, Locale, TimeZone};

/// Format a publication date for display in the configured language.
///
/// # Examples
/// ```ignore
/// format_display_date(&date, "DD MMM YYYY", "pt-br") // -> "05 jan 2022"
/// ```
pub fn format_display_date<Tz: TimeZone>(
    date: &DateTime<Tz>,
    pattern: &str,
    language: &str,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(pattern);
    date.format_localized(&chrono_format, locale_for(language))
        .to_string()
}

/// Map a site language tag to a chrono locale. Unknown tags fall back to
/// US English rather than failing the render.
fn locale_for(language: &str) -> Locale {
    match language.to_ascii_lowercase().as_str() {
        "pt-br" | "pt_br" | "pt" => Locale::pt_BR,
        "en" | "en-us" | "en_us" => Locale::en_US,
        "en-gb" | "en_gb" => Locale::en_GB,
        "es" | "es-es" | "es_es" => Locale::es_ES,
        "fr" | "fr-fr" | "fr_fr" => Locale::fr_FR,
        "de" | "de-de" | "de_de" => Locale::de_DE,
        _ => Locale::en_US,
    }
}

/// Convert a Moment.js date pattern to a chrono pattern.
///
/// Longest tokens first so `MMMM` is not eaten by `MM`.
fn moment_to_chrono_format(format: &str) -> String {
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"), // Full month name
        ("MMM", "%b"),  // Abbreviated month name
        ("MM", "%m"),   // Two-digit month
        ("DD", "%d"),   // Two-digit day
        ("dddd", "%A"), // Full weekday name
        ("ddd", "%a"),  // Abbreviated weekday name
    ];

    let mut result = format.to_string();
    for (from, to) in replacements {
        result = result.replace(from, to);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("DD MMM YYYY"), "%d %b %Y");
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
    }

    #[test]
    fn test_display_date_pt_br() {
        let date = Utc.with_ymd_and_hms(2022, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(
            format_display_date(&date, "DD MMM YYYY", "pt-br"),
            "05 jan 2022"
        );
    }

    #[test]
    fn test_display_date_unknown_language_falls_back() {
        let date = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        assert_eq!(
            format_display_date(&date, "DD MMMM YYYY", "tlh"),
            "15 March 2024"
        );
    }
}
