use chrono::{DateTime, Utc};

/// Format how long ago `created_at` was, relative to `now`.
///
/// Under a minute reads "just now"; then minutes, hours and days; anything
/// older than a week shows the date. Timestamps in the future (clock skew)
/// also read "just now".
pub fn format_relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - created_at).num_seconds();

    if diff < 60 {
        return "just now".to_string();
    }

    if diff < 3600 {
        return format!("{}m ago", diff / 60);
    }

    if diff < 86400 {
        return format!("{}h ago", diff / 3600);
    }

    if diff < 604800 {
        return format!("{}d ago", diff / 86400);
    }

    created_at.format("%b %d").to_string()
}
