//! Canonical date keys.
//!
//! Weather rows are keyed by day using a sortable `YYYYMMDD` string derived
//! from the feed's epoch timestamps. Lexicographic order on the key equals
//! chronological order, which is what the store's range queries rely on.

use core::fmt;

use time::{Date, Month, OffsetDateTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};

/// A calendar day encoded as an eight-digit `YYYYMMDD` string.
///
/// Keys compare lexicographically in chronological order, so they can be
/// used directly in range filters.
///
/// # Examples
///
/// ```
/// use stratus_types::DateKey;
/// use time::macros::date;
///
/// let key = DateKey::from_date(date!(2014 - 05 - 17));
/// assert_eq!(key.as_str(), "20140517");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DateKey(String);

impl DateKey {
    /// Build a key from a calendar date.
    #[must_use]
    pub fn from_date(date: Date) -> Self {
        let (year, month, day) = date.to_calendar_date();
        Self(format!("{:04}{:02}{:02}", year, u8::from(month), day))
    }

    /// Build a key from a UTC timestamp.
    #[must_use]
    pub fn from_datetime(datetime: OffsetDateTime) -> Self {
        Self::from_date(datetime.date())
    }

    /// Build a key from epoch seconds, interpreted as UTC.
    ///
    /// Returns [`ParseError::InvalidTimestamp`] for timestamps outside the
    /// representable date range.
    pub fn from_unix_timestamp(timestamp: i64) -> ParseResult<Self> {
        let datetime = OffsetDateTime::from_unix_timestamp(timestamp)
            .map_err(|_| ParseError::InvalidTimestamp(timestamp))?;
        Ok(Self::from_datetime(datetime))
    }

    /// Parse a key from its string form, validating the `YYYYMMDD` shape.
    pub fn parse(s: &str) -> ParseResult<Self> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidDateKey(s.to_string()));
        }
        // The digits must also name a real calendar date.
        Self::digits_to_date(s)?;
        Ok(Self(s.to_string()))
    }

    /// Convert back to a calendar date.
    pub fn to_date(&self) -> ParseResult<Date> {
        Self::digits_to_date(&self.0)
    }

    /// The underlying `YYYYMMDD` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn digits_to_date(s: &str) -> ParseResult<Date> {
        let invalid = || ParseError::InvalidDateKey(s.to_string());

        let year: i32 = s.get(0..4).and_then(|v| v.parse().ok()).ok_or_else(invalid)?;
        let month: u8 = s.get(4..6).and_then(|v| v.parse().ok()).ok_or_else(invalid)?;
        let day: u8 = s.get(6..8).and_then(|v| v.parse().ok()).ok_or_else(invalid)?;

        let month = Month::try_from(month).map_err(|_| invalid())?;
        Date::from_calendar_date(year, month, day).map_err(|_| invalid())
    }
}

impl From<Date> for DateKey {
    fn from(date: Date) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
