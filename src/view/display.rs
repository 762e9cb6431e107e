//! Text rendering of results and history entries.

use crate::entry::{EntrySource, HistoryItem};

/// Formats `value` with two decimals and Indian digit grouping
/// (`1,23,45,678.90`). Non-finite values render as `0.00`.
pub fn format_area(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 2 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_indian(int_part));
    out.push('.');
    out.push_str(frac_part);
    out
}

// Last three digits form one group, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// One-line title describing what the user entered for `item`.
pub fn entry_title(item: &HistoryItem) -> String {
    match &item.source {
        EntrySource::SevenTwelve { raw } => format!(
            "{} hectare {} are {} sqm",
            or_zero(&raw.hectare),
            or_zero(&raw.are),
            or_zero(&raw.sqm)
        ),
        EntrySource::Home => format!("{} {}", item.input.value, item.input.unit),
    }
}

fn or_zero(raw: &str) -> &str {
    if raw.is_empty() { "0" } else { raw }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::convert::ConversionInput,
        entry::{CompositeInput, HistoryDraft},
        types::AreaUnit,
    };

    #[test]
    fn indian_grouping() {
        assert_eq!(format_area(0.0), "0.00");
        assert_eq!(format_area(999.999), "1,000.00");
        assert_eq!(format_area(123456.789), "1,23,456.79");
        assert_eq!(format_area(12345678.9), "1,23,45,678.90");
        assert_eq!(format_area(f64::NAN), "0.00");
        assert_eq!(format_area(-1234.5), "-1,234.50");
    }

    #[test]
    fn titles_follow_the_source_view() {
        let home = HistoryDraft::home(ConversionInput::new(2.5, AreaUnit::Hectare));
        let item = HistoryItem {
            id: "a".into(),
            input: home.input,
            result: home.result,
            source: home.source,
        };
        assert_eq!(entry_title(&item), "2.5 hectare");

        let composite = HistoryDraft::seven_twelve(CompositeInput::new("1", "", "3"));
        let item = HistoryItem {
            id: "b".into(),
            input: composite.input,
            result: composite.result,
            source: composite.source,
        };
        assert_eq!(entry_title(&item), "1 hectare 0 are 3 sqm");
    }
}
