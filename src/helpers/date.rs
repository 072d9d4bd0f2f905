//! Date helper functions

use chrono::{DateTime, Datelike, TimeZone};

use crate::i18n::I18n;

// Month tokens are substituted after chrono formatting so the names can be
// localized. Private-use codepoints never collide with format output.
const MONTH_FULL: &str = "\u{e000}";
const MONTH_ABBREV: &str = "\u{e001}";

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "DD MMM YYYY", &i18n) // -> "15 Mar 2021"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str, i18n: &I18n) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    let mut result = date.format(&chrono_format).to_string();

    if result.contains(MONTH_FULL) {
        result = result.replace(MONTH_FULL, i18n.month_name(date.month()));
    }
    if result.contains(MONTH_ABBREV) {
        result = result.replace(MONTH_ABBREV, i18n.month_abbrev(date.month()));
    }

    result
}

/// Format a date for display, converted to the configured site timezone
///
/// An empty or unparsable timezone keeps the date's own offset.
pub fn display_date(
    date: &DateTime<chrono::FixedOffset>,
    format: &str,
    timezone: &str,
    i18n: &I18n,
) -> String {
    match timezone.parse::<chrono_tz::Tz>() {
        Ok(tz) => format_date(&date.with_timezone(&tz), format, i18n),
        Err(_) => format_date(date, format, i18n),
    }
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Process from longest to shortest patterns within each category
    let replacements = [
        // Year (process first as they're uppercase)
        ("YYYY", "%Y"),
        ("YY", "%y"),
        // Month (uppercase M) - names go through placeholders for i18n
        ("MMMM", MONTH_FULL),
        ("MMM", MONTH_ABBREV),
        ("MM", "%m"),
        // Day of month (uppercase D)
        ("DDDD", "%j"), // Day of year
        ("DD", "%d"),   // Two-digit day
        // Hour 24h (uppercase H)
        ("HH", "%H"),
        // Hour 12h (lowercase h)
        ("hh", "%I"),
        // Minute (lowercase m after we've processed MM)
        ("mm", "%M"),
        // Second (lowercase s)
        ("ss", "%S"),
        // Day of week (lowercase d) - process last to avoid conflicts
        ("dddd", "%A"),
        ("ddd", "%a"),
        // Timezone
        ("ZZ", "%z"),
        // Milliseconds
        ("SSS", "%3f"),
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
    use chrono::FixedOffset;

    fn date(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_format_date() {
        let i18n = I18n::new("en");
        let d = date("2024-01-15T10:30:00+00:00");
        assert_eq!(format_date(&d, "YYYY-MM-DD", &i18n), "2024-01-15");
        assert_eq!(format_date(&d, "DD MMM YYYY", &i18n), "15 Jan 2024");
        assert_eq!(
            format_date(&d, "DD MMM YYYY, HH:mm", &i18n),
            "15 Jan 2024, 10:30"
        );
    }

    #[test]
    fn test_format_date_localized() {
        let i18n = I18n::new("pt");
        let d = date("2021-03-15T19:25:28+00:00");
        assert_eq!(format_date(&d, "DD MMM YYYY", &i18n), "15 mar 2021");
        assert_eq!(format_date(&d, "DD MMMM YYYY", &i18n), "15 março 2021");
    }

    #[test]
    fn test_display_date_timezone() {
        let i18n = I18n::new("en");
        let d = date("2021-03-15T02:30:00+00:00");
        // UTC-3: falls back to the previous day
        assert_eq!(
            display_date(&d, "DD MMM YYYY", "America/Sao_Paulo", &i18n),
            "14 Mar 2021"
        );
        // Unknown timezone keeps the original offset
        assert_eq!(
            display_date(&d, "DD MMM YYYY", "Mars/Olympus", &i18n),
            "15 Mar 2021"
        );
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
    }
}
