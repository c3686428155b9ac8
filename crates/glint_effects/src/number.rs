//! Numeric literals inside display text
//!
//! A counter's text is split into a literal prefix, the first run of digits
//! and group separators, and a literal suffix: `"Over 12,345 patients"` →
//! `("Over ", "12,345", " patients")`. Only ASCII digits and `,` are matched,
//! so a parsed value is never negative or non-finite.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

fn numeric_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("[0-9,]+").expect("numeric run pattern is valid"))
}

/// A numeric literal found in display text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumericLiteral<'a> {
    pub prefix: &'a str,
    /// The matched literal, separators included
    pub literal: &'a str,
    pub suffix: &'a str,
    /// Value with separators removed
    pub value: u64,
}

/// Find and parse the first numeric run in `text`
///
/// Returns `None` when there is no run, when the run holds only separators,
/// or when the digits overflow a `u64`.
pub fn parse_numeric_literal(text: &str) -> Option<NumericLiteral<'_>> {
    let found = numeric_run().find(text)?;
    let digits: String = found.as_str().chars().filter(|c| *c != ',').collect();
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<u64>().ok()?;
    Some(NumericLiteral {
        prefix: &text[..found.start()],
        literal: found.as_str(),
        suffix: &text[found.end()..],
        value,
    })
}

/// Digit grouping convention
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// Thousands, then hundreds: `12,34,567`
    #[default]
    Indian,
    /// Thousands throughout: `1,234,567`
    Western,
    /// No separators: `1234567`
    Plain,
}

impl Grouping {
    /// Infer the convention from a literal's separator layout
    ///
    /// `1,234,567` is Western and `12,34,567` is Indian. Literals without
    /// separators, or whose layout fits both (`12,345`), are ambiguous.
    pub fn infer(literal: &str) -> Option<Grouping> {
        let groups: Vec<&str> = literal.split(',').collect();
        if groups.len() < 2 || groups.iter().any(|g| g.is_empty()) {
            return None;
        }
        if groups[groups.len() - 1].len() != 3 {
            return None;
        }

        let middle = &groups[1..groups.len() - 1];
        if middle.is_empty() {
            // A single separator only disambiguates once the leading group is full
            return (groups[0].len() == 3).then_some(Grouping::Western);
        }
        if middle.iter().all(|g| g.len() == 2) && groups[0].len() <= 2 {
            Some(Grouping::Indian)
        } else if middle.iter().all(|g| g.len() == 3) && groups[0].len() <= 3 {
            Some(Grouping::Western)
        } else {
            None
        }
    }

    /// Render `value` with this convention's separators
    pub fn format(self, value: u64) -> String {
        let digits = value.to_string();
        match self {
            Grouping::Indian => group_digits(&digits, 3, 2),
            Grouping::Western => group_digits(&digits, 3, 3),
            Grouping::Plain => digits,
        }
    }
}

/// Insert `,` separators: the rightmost group has `lead` digits, the rest `step`
fn group_digits(digits: &str, lead: usize, step: usize) -> String {
    let mut groups = Vec::new();
    let mut end = digits.len();
    let mut size = lead;
    while end > size {
        groups.push(&digits[end - size..end]);
        end -= size;
        size = step;
    }
    groups.push(&digits[..end]);
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_prefix_literal_suffix() {
        let parsed = parse_numeric_literal("Prefix 12,345 suffix").unwrap();
        assert_eq!(parsed.prefix, "Prefix ");
        assert_eq!(parsed.literal, "12,345");
        assert_eq!(parsed.suffix, " suffix");
        assert_eq!(parsed.value, 12345);
    }

    #[test]
    fn test_suffix_only() {
        let parsed = parse_numeric_literal("1,200+").unwrap();
        assert_eq!(parsed.prefix, "");
        assert_eq!(parsed.suffix, "+");
        assert_eq!(parsed.value, 1200);
    }

    #[test]
    fn test_first_run_wins() {
        let parsed = parse_numeric_literal("24/7 support").unwrap();
        assert_eq!(parsed.literal, "24");
        assert_eq!(parsed.suffix, "/7 support");
    }

    #[test]
    fn test_unparsable_text() {
        assert_eq!(parse_numeric_literal("N/A"), None);
        assert_eq!(parse_numeric_literal(""), None);
        assert_eq!(parse_numeric_literal("a, b"), None);
        assert_eq!(parse_numeric_literal("99999999999999999999999"), None);
    }

    #[test]
    fn test_non_ascii_digits_are_not_matched() {
        assert_eq!(parse_numeric_literal("٣٤٥"), None);
        let parsed = parse_numeric_literal("-40%").unwrap();
        assert_eq!(parsed.prefix, "-");
        assert_eq!(parsed.value, 40);
    }

    #[test]
    fn test_format_indian() {
        assert_eq!(Grouping::Indian.format(0), "0");
        assert_eq!(Grouping::Indian.format(999), "999");
        assert_eq!(Grouping::Indian.format(1200), "1,200");
        assert_eq!(Grouping::Indian.format(123456), "1,23,456");
        assert_eq!(Grouping::Indian.format(1234567), "12,34,567");
    }

    #[test]
    fn test_format_western() {
        assert_eq!(Grouping::Western.format(1200), "1,200");
        assert_eq!(Grouping::Western.format(123456), "123,456");
        assert_eq!(Grouping::Western.format(1234567), "1,234,567");
        assert_eq!(Grouping::Plain.format(1234567), "1234567");
    }

    #[test]
    fn test_infer_grouping() {
        assert_eq!(Grouping::infer("1,234,567"), Some(Grouping::Western));
        assert_eq!(Grouping::infer("123,456"), Some(Grouping::Western));
        assert_eq!(Grouping::infer("12,34,567"), Some(Grouping::Indian));
        assert_eq!(Grouping::infer("1,00,000"), Some(Grouping::Indian));
        assert_eq!(Grouping::infer("12,345"), None);
        assert_eq!(Grouping::infer("1,200"), None);
        assert_eq!(Grouping::infer("500"), None);
        assert_eq!(Grouping::infer("1,2"), None);
        assert_eq!(Grouping::infer("1,,200"), None);
    }
}
