use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub const PLAYLIST_NAME_PREFIX: &str = "Weekly Discoveries";

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Opaque value echoed back by the authorization callback.
pub fn generate_state() -> String {
    random_alphanumeric(22)
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Parses a release date into the instant it is compared at.
///
/// A 10 character value is a full `YYYY-MM-DD` date. Anything else is read as
/// a bare year and lands on January 1st, so `"2024"` and `"2024-03"` both
/// become `2024-01-01T00:00:00`.
pub fn parse_release_date(release_date: &str) -> Option<NaiveDateTime> {
    let date = if release_date.len() == 10 {
        NaiveDate::parse_from_str(release_date, "%Y-%m-%d").ok()?
    } else {
        let year: i32 = release_date.get(..4)?.parse().ok()?;
        NaiveDate::from_ymd_opt(year, 1, 1)?
    };

    date.and_hms_opt(0, 0, 0)
}

/// Lower edge of the lookback window.
///
/// `None` for a negative lookback or one reaching past the calendar's range.
pub fn window_start(now: NaiveDateTime, lookback_days: i64) -> Option<NaiveDateTime> {
    if lookback_days < 0 {
        return None;
    }
    TimeDelta::try_days(lookback_days).and_then(|days| now.checked_sub_signed(days))
}

/// The lower edge is inclusive.
pub fn is_within_window(released: NaiveDateTime, window_start: NaiveDateTime) -> bool {
    released >= window_start
}

pub fn playlist_name(date: NaiveDate) -> String {
    format!(
        "{prefix} - {date}",
        prefix = PLAYLIST_NAME_PREFIX,
        date = date.format("%Y-%m-%d")
    )
}

pub fn playlist_description(date: NaiveDate, lookback_days: i64) -> String {
    format!(
        "Recent releases from your followed artists and their related artists (last {days} days). Generated on {date}",
        days = lookback_days,
        date = date.format("%Y-%m-%d")
    )
}
