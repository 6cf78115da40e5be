//! Time formatter (`@`).
//!
//! The spec is either a preset name or a layout where `Y`, `M`, `D`, `h`,
//! `m` and `s` stand for year, month, day, hour, minute and second. Any other
//! character is copied as is.
//!
//! ```text
//! {:@date}        2024-03-09
//! {:@D/M/Y h:m}   09/03/2024 14:05
//! ```

use chrono::{DateTime, NaiveDateTime};
use phf::phf_map;

use super::ValueFormatter;
use crate::core::value::{Value, DEFAULT_TIME_LAYOUT};
use crate::utils::error::FormatResult;

/// Named layouts, expressed as chrono format strings.
static PRESETS: phf::Map<&'static str, &'static str> = phf_map! {
    "datetime" => "%Y-%m-%d %H:%M:%S",
    "YMDhms" => "%Y-%m-%d %H:%M:%S",
    "date" => "%Y-%m-%d",
    "YMD" => "%Y-%m-%d",
    "time" => "%H:%M:%S",
    "hms" => "%H:%M:%S",
};

/// Translate a `YMDhms` layout into a chrono format string.
fn translate_layout(layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() * 2);
    for c in layout.chars() {
        match c {
            'Y' => out.push_str("%Y"),
            'M' => out.push_str("%m"),
            'D' => out.push_str("%d"),
            'h' => out.push_str("%H"),
            'm' => out.push_str("%M"),
            's' => out.push_str("%S"),
            '%' => out.push_str("%%"),
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormatter {
    layout: String,
}

impl Default for TimeFormatter {
    fn default() -> Self {
        Self {
            layout: DEFAULT_TIME_LAYOUT.to_string(),
        }
    }
}

impl TimeFormatter {
    fn render(&self, time: &NaiveDateTime) -> String {
        time.format(&self.layout).to_string()
    }
}

impl ValueFormatter for TimeFormatter {
    fn parse(&mut self, spec: &str) -> FormatResult<()> {
        self.layout = match PRESETS.get(spec) {
            Some(layout) => (*layout).to_string(),
            None if spec.is_empty() => DEFAULT_TIME_LAYOUT.to_string(),
            None => translate_layout(spec),
        };
        Ok(())
    }

    fn format(&self, value: &Value) -> String {
        if let Value::Time(time) = value {
            return self.render(time);
        }

        // Anything else is read as Unix seconds, rendered in UTC
        let seconds = match value {
            Value::Str(s) => s.trim().parse::<i64>(),
            other => other.to_string().parse::<i64>(),
        };
        match seconds {
            Ok(seconds) => match DateTime::from_timestamp(seconds, 0) {
                Some(time) => self.render(&time.naive_utc()),
                None => format!("timestamp {} out of range", seconds),
            },
            Err(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn time() -> Value {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(14, 5, 7))
            .unwrap()
            .into()
    }

    fn format(spec: &str, value: &Value) -> String {
        let mut formatter = TimeFormatter::default();
        formatter.parse(spec).unwrap();
        formatter.format(value)
    }

    #[test]
    fn test_presets() {
        assert_eq!(format("datetime", &time()), "2024-03-09 14:05:07");
        assert_eq!(format("YMDhms", &time()), "2024-03-09 14:05:07");
        assert_eq!(format("date", &time()), "2024-03-09");
        assert_eq!(format("hms", &time()), "14:05:07");
        assert_eq!(format("", &time()), "2024-03-09 14:05:07");
    }

    #[test]
    fn test_custom_layout() {
        assert_eq!(format("D/M/Y h:m", &time()), "09/03/2024 14:05");
        assert_eq!(format("Y年M月D日", &time()), "2024年03月09日");
        assert_eq!(format("h%m", &time()), "14%05");
    }

    #[test]
    fn test_unix_seconds() {
        assert_eq!(format("datetime", &Value::from(0)), "1970-01-01 00:00:00");
        assert_eq!(format("date", &Value::from("86400")), "1970-01-02");
    }

    #[test]
    fn test_unparsable_value() {
        let rendered = format("date", &Value::from("yesterday"));
        assert_eq!(rendered, "invalid digit found in string");
    }
}
