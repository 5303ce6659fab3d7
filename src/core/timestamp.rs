//! Time column templates and elapsed-time formatting
//!
//! Templates use a small token language: `yyyy`, `yy`, `MM`, `dd`, `hh`,
//! `mm`, `ss` and `SSS`. Each token is replaced once, so the rendered column
//! is exactly as wide as the template.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};

pub const DEFAULT_TIME_TEMPLATE: &str = "yyyy-MM-dd hh:mm:ss ";

const SECOND: i64 = 1000;
const MINUTE: i64 = SECOND * 60;
const HOUR: i64 = MINUTE * 60;
const DAY: i64 = HOUR * 24;

/// Render `template` against `time`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use reggol::core::timestamp::render_template;
///
/// let time = Utc.with_ymd_and_hms(2025, 1, 8, 9, 5, 3).unwrap();
/// assert_eq!(render_template("yyyy-MM-dd hh:mm:ss", &time), "2025-01-08 09:05:03");
/// ```
#[must_use]
pub fn render_template<T: Datelike + Timelike>(template: &str, time: &T) -> String {
    let year = time.year().to_string();
    let short_year = format!("{:02}", time.year().rem_euclid(100));
    template
        .replacen("yyyy", &year, 1)
        .replacen("yy", &short_year, 1)
        .replacen("MM", &format!("{:02}", time.month()), 1)
        .replacen("dd", &format!("{:02}", time.day()), 1)
        .replacen("hh", &format!("{:02}", time.hour()), 1)
        .replacen("mm", &format!("{:02}", time.minute()), 1)
        .replacen("ss", &format!("{:02}", time.second()), 1)
        .replacen("SSS", &format!("{:03}", time.nanosecond() / 1_000_000 % 1000), 1)
}

/// Render `template` for a millisecond Unix timestamp in local time
#[must_use]
pub fn render_millis(template: &str, millis: i64) -> String {
    let time: DateTime<Local> = Local
        .timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(Local::now);
    render_template(template, &time)
}

/// Human-readable elapsed time: `3ms`, `2s`, `5m`, `1h`, `2d`
#[must_use]
pub fn format_duration(ms: i64) -> String {
    let abs = ms.abs();
    if abs >= DAY - HOUR / 2 {
        format!("{}d", round_div(ms, DAY))
    } else if abs >= HOUR - MINUTE / 2 {
        format!("{}h", round_div(ms, HOUR))
    } else if abs >= MINUTE - SECOND / 2 {
        format!("{}m", round_div(ms, MINUTE))
    } else if abs >= SECOND {
        format!("{}s", round_div(ms, SECOND))
    } else {
        format!("{}ms", ms)
    }
}

fn round_div(value: i64, unit: i64) -> i64 {
    (value as f64 / unit as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn fixed_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + Duration::milliseconds(7)
    }

    #[test]
    fn test_default_template() {
        let rendered = render_template(DEFAULT_TIME_TEMPLATE, &fixed_datetime());
        assert_eq!(rendered, "2025-01-08 10:30:45 ");
        assert_eq!(rendered.len(), DEFAULT_TIME_TEMPLATE.len());
    }

    #[test]
    fn test_short_year_and_millis() {
        assert_eq!(render_template("yy/MM hh:mm:ss.SSS", &fixed_datetime()), "25/01 10:30:45.007");
    }

    #[test]
    fn test_literal_template() {
        assert_eq!(render_template("[time] ", &fixed_datetime()), "[time] ");
    }

    #[test]
    fn test_render_millis_width() {
        let rendered = render_millis(DEFAULT_TIME_TEMPLATE, 1_736_332_245_123);
        assert_eq!(rendered.len(), DEFAULT_TIME_TEMPLATE.len());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0ms");
        assert_eq!(format_duration(2), "2ms");
        assert_eq!(format_duration(999), "999ms");
        assert_eq!(format_duration(1500), "2s");
        assert_eq!(format_duration(59_400), "59s");
        assert_eq!(format_duration(59_500), "1m");
        assert_eq!(format_duration(90 * MINUTE), "2h");
        assert_eq!(format_duration(DAY * 3), "3d");
        assert_eq!(format_duration(-5), "-5ms");
    }
}
