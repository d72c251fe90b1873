use chrono::{DateTime, Utc};

/// Rough human readable distance between two instants, `arrow.humanize` style.
/// `target` before `now` renders as "... ago", after as "in ...".
pub fn humanize_delta(now: DateTime<Utc>, target: DateTime<Utc>) -> String {
    let secs = (target - now).num_seconds();
    let future = secs >= 0;
    let phrase = humanize_span(secs.unsigned_abs());
    if future {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

fn humanize_span(secs: u64) -> String {
    match secs {
        0..=44 => String::from("a few seconds"),
        45..=89 => String::from("a minute"),
        90..=2_699 => format!("{} minutes", div_round(secs, 60)),
        2_700..=5_399 => String::from("an hour"),
        5_400..=79_199 => format!("{} hours", div_round(secs, 3_600)),
        79_200..=129_599 => String::from("a day"),
        _ => format!("{} days", div_round(secs, 86_400)),
    }
}

const fn div_round(value: u64, divisor: u64) -> u64 {
    (value + divisor / 2) / divisor
}
