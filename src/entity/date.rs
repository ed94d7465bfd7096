//! Date-range filters from natural language.
//!
//! Relative phrases ("last month", "since yesterday") are resolved first,
//! then explicit dates found by the recognizer. Both are evaluated against a
//! caller-supplied `now` so results are reproducible.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entity::recognizer::{EntityLabel, EntityRecognizer};
use crate::error::Result;

const CALENDAR_FORMATS: &[&str] = &[
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

static AGO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)\s+(day|week|month|year)s?\s+ago$").expect("ago pattern is valid")
});

static START_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:from|since)\b").expect("start cue pattern is valid"));
static END_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:to|until)\b").expect("end cue pattern is valid"));
static FROM_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfrom\b").expect("from cue pattern is valid"));
static TO_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bto\b").expect("to cue pattern is valid"));
static BETWEEN_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bbetween\b").expect("between cue pattern is valid"));

/// Relative date phrases, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RelativePhrase {
    Today,
    Yesterday,
    LastWeek,
    LastMonth,
    LastYear,
    ThisWeek,
    ThisMonth,
    ThisYear,
}

static RELATIVE_PHRASES: LazyLock<Vec<(Regex, RelativePhrase)>> = LazyLock::new(|| {
    [
        (r"\btoday\b", RelativePhrase::Today),
        (r"\byesterday\b", RelativePhrase::Yesterday),
        (r"\b(?:last|past)\s+week\b", RelativePhrase::LastWeek),
        (r"\b(?:last|past)\s+month\b", RelativePhrase::LastMonth),
        (r"\b(?:last|past)\s+year\b", RelativePhrase::LastYear),
        (r"\bthis\s+week\b", RelativePhrase::ThisWeek),
        (r"\bthis\s+month\b", RelativePhrase::ThisMonth),
        (r"\bthis\s+year\b", RelativePhrase::ThisYear),
    ]
    .into_iter()
    .map(|(pattern, phrase)| {
        let regex = Regex::new(&format!("(?i){pattern}")).expect("relative pattern is valid");
        (regex, phrase)
    })
    .collect()
});

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| midnight(date))
}

impl RelativePhrase {
    fn anchor(self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date();
        match self {
            RelativePhrase::Today => midnight(today),
            RelativePhrase::Yesterday => midnight(today - Duration::days(1)),
            RelativePhrase::LastWeek => now - Duration::days(7),
            RelativePhrase::LastMonth => now - Duration::days(30),
            RelativePhrase::LastYear => now - Duration::days(365),
            RelativePhrase::ThisWeek => {
                let offset = i64::from(today.weekday().num_days_from_monday());
                midnight(today - Duration::days(offset))
            }
            RelativePhrase::ThisMonth => midnight(today.with_day(1).unwrap_or(today)),
            RelativePhrase::ThisYear => midnight(today.with_ordinal(1).unwrap_or(today)),
        }
    }
}

/// A date expression resolved against `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParsedDate {
    /// A calendar day such as `05/03/2024`.
    Calendar(NaiveDate),
    /// A point in time such as `3 days ago`.
    Instant(NaiveDateTime),
}

impl ParsedDate {
    /// The bound when used as the start of a range: midnight for calendar days.
    pub fn as_start(&self) -> NaiveDateTime {
        match self {
            ParsedDate::Calendar(date) => midnight(*date),
            ParsedDate::Instant(instant) => *instant,
        }
    }

    /// The bound when used as the end of a range: 23:59:59 for calendar days.
    pub fn as_end(&self) -> NaiveDateTime {
        match self {
            ParsedDate::Calendar(date) => end_of_day(*date),
            ParsedDate::Instant(instant) => *instant,
        }
    }
}

/// Parse an explicit date expression: one of the calendar formats, or
/// `N day(s)|week(s)|month(s)|year(s) ago` (a month is 30 days, a year 365).
pub fn parse_date_expression(text: &str, now: NaiveDateTime) -> Option<ParsedDate> {
    let normalized = text
        .replace('.', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    for format in CALENDAR_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&normalized, format) {
            return Some(ParsedDate::Calendar(date));
        }
    }

    let captures = AGO.captures(&normalized)?;
    let count: i64 = captures[1].parse().ok()?;
    let days = match captures[2].to_lowercase().as_str() {
        "day" => Some(count),
        "week" => count.checked_mul(7),
        "month" => count.checked_mul(30),
        _ => count.checked_mul(365),
    }?;
    let instant = now.checked_sub_signed(Duration::try_days(days)?)?;
    Some(ParsedDate::Instant(instant))
}

/// Inclusive bounds on the transaction date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDateTime>,
}

impl DateFilters {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }
}

/// Extract date bounds relative to the local clock.
pub fn extract_date_filters(
    recognizer: &dyn EntityRecognizer,
    utterance: &str,
) -> Result<DateFilters> {
    extract_date_filters_at(recognizer, utterance, Local::now().naive_local())
}

/// Extract date bounds relative to `now`.
pub fn extract_date_filters_at(
    recognizer: &dyn EntityRecognizer,
    utterance: &str,
    now: NaiveDateTime,
) -> Result<DateFilters> {
    let mut filters = DateFilters::default();
    if utterance.trim().is_empty() {
        return Ok(filters);
    }

    let start_cue = START_CUE.is_match(utterance);
    let end_cue = END_CUE.is_match(utterance);

    for (pattern, phrase) in RELATIVE_PHRASES.iter() {
        if !pattern.is_match(utterance) {
            continue;
        }
        let anchor = phrase.anchor(now);
        if start_cue {
            filters.start_date = Some(anchor);
        } else if end_cue {
            filters.end_date = Some(anchor);
        } else {
            filters.start_date = Some(anchor);
            filters.end_date = Some(now);
        }
    }

    let mut dates: Vec<ParsedDate> = Vec::new();
    for span in recognizer.recognize(utterance)? {
        if span.label != EntityLabel::Date {
            continue;
        }
        match parse_date_expression(&span.text, now) {
            Some(date) => dates.push(date),
            None => trace!("Skipping date expression {:?}", span.text),
        }
    }
    dates.sort_by_key(ParsedDate::as_start);

    if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
        let from_to = FROM_CUE.is_match(utterance) && TO_CUE.is_match(utterance);

        if from_to {
            // Fewer than two dates leave the bounds untouched.
            if dates.len() >= 2 {
                filters.start_date = Some(first.as_start());
                filters.end_date = Some(last.as_end());
            }
        } else if start_cue {
            filters.start_date = Some(first.as_start());
        } else if end_cue {
            filters.end_date = Some(first.as_end());
        } else if BETWEEN_CUE.is_match(utterance) && dates.len() >= 2 {
            filters.start_date = Some(first.as_start());
            filters.end_date = Some(last.as_end());
        } else if dates.len() == 1 {
            filters.start_date = Some(first.as_start());
            filters.end_date = Some(now);
        } else {
            filters.start_date = Some(first.as_start());
            filters.end_date = Some(last.as_end());
        }
    }

    debug!("Date filters for {utterance:?}: {filters:?}");
    Ok(filters)
}
