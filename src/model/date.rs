// File: ./src/model/date.rs
//! The one date/time format the tracker understands: `dd/mm/yy hhmm`.
//!
//! Every field is zero-padded and the year is two digits, read as 20yy. Because the
//! accepted shape is fixed, `render` is an exact inverse of `parse`.
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Human-readable name of the accepted pattern, used in error messages and help.
pub const DATE_TIME_PATTERN: &str = "dd/mm/yy hhmm";

const RECORD_FORMAT: &str = "%d/%m/%y %H%M";
const DISPLAY_FORMAT: &str = "%b %d %Y, %H:%M";
const CENTURY: i32 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a date/time in the format {pattern}", pattern = DATE_TIME_PATTERN)]
pub struct InvalidDateTime {
    pub input: String,
}

impl InvalidDateTime {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// A calendar date with a 24-hour minute-precision time, between 2000 and 2099.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Builds a timestamp from its parts. Returns `None` for impossible dates/times
    /// or a year outside the two-digit range.
    pub fn from_parts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        if !(CENTURY..CENTURY + 100).contains(&year) {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        Some(Self(date.and_time(time)))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// The friendly form shown next to a task, e.g. `Dec 01 2023, 18:00`.
    pub fn display(&self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }
}

/// Parses `dd/mm/yy hhmm`. Anything else, including unpadded fields, is rejected.
pub fn parse(text: &str) -> Result<Timestamp, InvalidDateTime> {
    if !has_expected_shape(text) {
        return Err(InvalidDateTime::new(text));
    }

    from_fields(text).ok_or_else(|| InvalidDateTime::new(text))
}

// Expects the shape to be checked already: every slice below is ASCII digits.
fn from_fields(text: &str) -> Option<Timestamp> {
    let field = |start: usize, end: usize| text[start..end].parse::<u32>().ok();
    let day = field(0, 2)?;
    let month = field(3, 5)?;
    let year = field(6, 8)? as i32;
    let hour = field(9, 11)?;
    let minute = field(11, 13)?;
    Timestamp::from_parts(CENTURY + year, month, day, hour, minute)
}

/// Renders back to `dd/mm/yy hhmm`.
pub fn render(timestamp: &Timestamp) -> String {
    timestamp.0.format(RECORD_FORMAT).to_string()
}

fn has_expected_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != DATE_TIME_PATTERN.len() {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        2 | 5 => *b == b'/',
        8 => *b == b' ',
        _ => b.is_ascii_digit(),
    })
}

impl FromStr for Timestamp {
    type Err = InvalidDateTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
