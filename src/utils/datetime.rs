use chrono::{DateTime, Utc};

pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Formats epoch seconds as `2026-02-26 15:23` (UTC).
pub fn format_timestamp(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}
