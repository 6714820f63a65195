use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Describes the distance between `moment` and `now` in words.
///
/// Past moments read "3 hours ago", future ones "in 3 hours".
#[must_use]
pub fn relative_age(moment: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(moment).num_seconds();
    let distance = distance_in_words(seconds.abs());

    if seconds < 0 {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

fn distance_in_words(seconds: i64) -> String {
    match seconds {
        s if s < 30 => "less than a minute".to_owned(),
        s if s < 90 => "1 minute".to_owned(),
        s if s < 45 * MINUTE => format!("{} minutes", rounded(s, MINUTE)),
        s if s < 90 * MINUTE => "about 1 hour".to_owned(),
        s if s < DAY => format!("about {} hours", rounded(s, HOUR)),
        s if s < 42 * HOUR => "1 day".to_owned(),
        s if s < MONTH => format!("{} days", rounded(s, DAY)),
        s if s < 45 * DAY => "about 1 month".to_owned(),
        s if s < YEAR => format!("{} months", rounded(s, MONTH).max(2)),
        s if s < 2 * YEAR => "about 1 year".to_owned(),
        s => format!("over {} years", s / YEAR),
    }
}

fn rounded(seconds: i64, unit: i64) -> i64 {
    (seconds + unit / 2) / unit
}
