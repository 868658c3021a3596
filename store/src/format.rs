//! Display formatting helpers — rupee amounts and relative timestamps,
//! shared by the derived activity titles and the dashboard rendering.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current instant as an RFC 3339 string with millisecond precision,
/// the format every record's `date` field carries.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format an amount as Indian rupees: `₹` plus Indian-system digit
/// grouping (last three digits, then pairs), rounded to whole rupees.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("₹{amount}");
    }
    let rounded = amount.round();
    let grouped = group_indian(&format!("{}", rounded.abs() as u64));
    if rounded < 0.0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Indian digit grouping: `1234567` → `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut parts: Vec<&str> = Vec::new();
    let mut idx = head.len();
    while idx > 2 {
        parts.push(&head[idx - 2..idx]);
        idx -= 2;
    }
    parts.push(&head[..idx]);
    parts.reverse();
    format!("{},{}", parts.join(","), tail)
}

/// Human-relative rendering of an RFC 3339 timestamp against `now`:
/// "Just now", then minute/hour/day buckets, then an absolute
/// `D Mon YYYY`. An unparseable date is returned verbatim.
pub fn format_relative(date: &str, now: DateTime<Utc>) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(date) else {
        return date.to_string();
    };
    let parsed = parsed.with_timezone(&Utc);
    let elapsed = now.signed_duration_since(parsed);
    let mins = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if mins < 1 {
        return "Just now".to_string();
    }
    if mins < 60 {
        return format!("{mins} min ago");
    }
    if hours < 24 {
        return format!("{hours} hour{} ago", if hours > 1 { "s" } else { "" });
    }
    if days < 7 {
        return format!("{days} day{} ago", if days > 1 { "s" } else { "" });
    }
    parsed.format("%-d %b %Y").to_string()
}
