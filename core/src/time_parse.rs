//! Free-form kill time input
//!
//! Users type kill times by hand, usually without a year. [`parse`] tries a
//! fixed list of layouts in order and returns the first match, or `None`.
//!
//! # Missing year
//!
//! Month/day input takes its year from the caller's `reference_year`. A kill
//! from late December entered after New Year therefore lands a year in the
//! future. Callers that care must pass the intended year explicitly.

use chrono::NaiveDateTime;

/// One accepted input layout.
#[derive(Debug, Clone, Copy)]
struct Layout {
    delimiter: char,
    /// Whether the text itself carries the year
    year_in_text: bool,
    /// chrono format, always including the year
    format: &'static str,
}

impl Layout {
    const fn dated(delimiter: char, format: &'static str) -> Self {
        Self {
            delimiter,
            year_in_text: true,
            format,
        }
    }

    const fn yearless(delimiter: char, format: &'static str) -> Self {
        Self {
            delimiter,
            year_in_text: false,
            format,
        }
    }

    fn apply(&self, text: &str, reference_year: i32) -> Option<NaiveDateTime> {
        if self.year_in_text {
            if !leads_with_four_digit_year(text, self.delimiter) {
                return None;
            }
            NaiveDateTime::parse_from_str(text, self.format).ok()
        } else {
            let expanded = format!("{reference_year:04}{}{text}", self.delimiter);
            NaiveDateTime::parse_from_str(&expanded, self.format).ok()
        }
    }
}

/// Tried in order; first match wins.
const LAYOUTS: [Layout; 8] = [
    Layout::dated('/', "%Y/%m/%d %H:%M"),
    Layout::yearless('/', "%Y/%m/%d %H:%M"),
    Layout::dated('-', "%Y-%m-%d %H:%M"),
    Layout::yearless('-', "%Y-%m-%d %H:%M"),
    Layout::dated('/', "%Y/%m/%d %H:%M:%S"),
    Layout::yearless('/', "%Y/%m/%d %H:%M:%S"),
    Layout::dated('-', "%Y-%m-%d %H:%M:%S"),
    Layout::yearless('-', "%Y-%m-%d %H:%M:%S"),
];

/// Parse a user-entered kill time.
///
/// Accepted, after trimming surrounding whitespace:
/// `YYYY/MM/DD HH:MM`, `MM/DD HH:MM`, `YYYY-MM-DD HH:MM`, `MM-DD HH:MM`,
/// and each of those with `:SS` seconds.
///
/// Returns `None` for anything else, including impossible dates such as
/// `02/29` in a non-leap `reference_year`. Never panics.
pub fn parse(text: &str, reference_year: i32) -> Option<NaiveDateTime> {
    let text = normalize_separator(text.trim())?;

    LAYOUTS
        .iter()
        .find_map(|layout| layout.apply(&text, reference_year))
}

/// Date and time must be separated by whitespace, collapsed here to one
/// space. A space in a chrono format also matches nothing, so this is the
/// only place the separator is enforced.
fn normalize_separator(text: &str) -> Option<String> {
    let (date, time) = text.split_once(char::is_whitespace)?;
    let time = time.trim_start();
    if date.is_empty() || time.is_empty() || time.contains(char::is_whitespace) {
        return None;
    }
    Some(format!("{date} {time}"))
}

/// Human-readable list of accepted layouts, for validation messages.
pub fn format_input_hint() -> &'static str {
    "YYYY/MM/DD HH:MM or MM/DD HH:MM (optionally :SS; '-' works in place of '/')"
}

/// chrono's `%Y` takes any digit count, so the year width is checked here.
fn leads_with_four_digit_year(text: &str, delimiter: char) -> bool {
    text.split_once(delimiter)
        .is_some_and(|(year, _)| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
}
