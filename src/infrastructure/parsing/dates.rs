//! Date normalisation for Russian-language page text

use chrono::{Duration, Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LONG_DATE: Regex =
        Regex::new(r"(\d{1,2})\s+(\p{L}+)\s+(\d{4})").expect("long date pattern is valid");
    static ref CLOCK_TIME: Regex = Regex::new(r"(\d{1,2}):(\d{2})").expect("time pattern is valid");
    static ref NUMERIC_DATE: Regex =
        Regex::new(r"(\d{2})-(\d{2})-(\d{4})").expect("numeric date pattern is valid");
}

const TODAY: &str = "сегодня";
const YESTERDAY: &str = "вчера";

fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "января" => 1,
        "февраля" => 2,
        "марта" => 3,
        "апреля" => 4,
        "мая" => 5,
        "июня" => 6,
        "июля" => 7,
        "августа" => 8,
        "сентября" => 9,
        "октября" => 10,
        "ноября" => 11,
        "декабря" => 12,
        _ => return None,
    };
    Some(month)
}

fn long_date(raw: &str) -> Option<NaiveDate> {
    let captures = LONG_DATE.captures(raw)?;
    let day = captures[1].parse().ok()?;
    let month = month_number(&captures[2])?;
    let year = captures[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn relative_date(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lower = raw.to_lowercase();
    if lower.contains(TODAY) {
        Some(today)
    } else if lower.contains(YESTERDAY) {
        Some(today - Duration::days(1))
    } else {
        None
    }
}

/// "12 марта 2024" → "2024-03-12"
pub fn parse_long_date(raw: &str) -> Option<String> {
    long_date(raw).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Comment timestamp ("12 марта 2024 15:30", "сегодня, 09:05") → "2024-03-12T15:30:00"
pub fn parse_comment_timestamp(raw: &str, today: NaiveDate) -> Option<String> {
    let date = long_date(raw).or_else(|| relative_date(raw, today))?;
    let (hour, minute) = CLOCK_TIME
        .captures(raw)
        .and_then(|c| Some((c[1].parse::<u32>().ok()?, c[2].parse::<u32>().ok()?)))
        .unwrap_or((0, 0));
    let datetime = date.and_hms_opt(hour, minute, 0)?;
    Some(datetime.format("%Y-%m-%dT%H:%M:%S").to_string())
}

/// Watch history date ("сегодня", "вчера", "05-01-2024") → "YYYY-MM-DD"
///
/// Anything unrecognised falls back to `today`, the way the history page
/// itself only ever omits the date for entries watched moments ago.
pub fn parse_history_date(raw: &str, today: NaiveDate) -> String {
    let date = relative_date(raw, today)
        .or_else(|| {
            let captures = NUMERIC_DATE.captures(raw)?;
            NaiveDate::from_ymd_opt(
                captures[3].parse().ok()?,
                captures[2].parse().ok()?,
                captures[1].parse().ok()?,
            )
        })
        .unwrap_or(today);
    date.format("%Y-%m-%d").to_string()
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
