use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::error::EncodeError;

/// Seconds of 0001-01-01T00:00:00Z, the earliest encodable instant.
pub const MIN_SECONDS: i64 = -62_135_596_800;

/// Seconds of 10000-01-01T00:00:00Z, the first instant past the encodable range.
pub const MAX_SECONDS: i64 = 253_402_300_800;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Errors raised while parsing a timestamp string.
#[derive(Debug, Error)]
pub enum TimestampError {
    /// The string is not an RFC 3339 timestamp with a `Z` suffix.
    #[error("'{0}' is not a UTC RFC 3339 timestamp")]
    Format(String),
    /// The string matched the pattern but does not name a valid instant.
    #[error("'{value}' is not a valid instant: {source}")]
    Parse {
        /// Offending string.
        value: String,
        /// Underlying chrono error.
        #[source]
        source: chrono::ParseError,
    },
}

/// UTC instant with nanosecond granularity.
///
/// Encoded as a record of `seconds` since the Unix epoch and the
/// non-negative `nanos` remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    seconds: i64,
    nanos: u32,
}

impl Timestamp {
    /// 1970-01-01T00:00:00Z.
    pub const UNIX_EPOCH: Timestamp = Timestamp {
        seconds: 0,
        nanos: 0,
    };

    /// Builds a timestamp from Unix seconds and nanoseconds.
    ///
    /// Nanoseconds past one second carry into `seconds`.
    pub fn from_unix(seconds: i64, nanos: u32) -> Self {
        let carry = i64::from(nanos / NANOS_PER_SECOND);
        Self {
            seconds: seconds.saturating_add(carry),
            nanos: nanos % NANOS_PER_SECOND,
        }
    }

    /// Normalizes a zoned date-time to UTC.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        let utc = datetime.with_timezone(&Utc);
        // chrono reports leap seconds as nanos >= 1e9; they fold into the next second.
        Self::from_unix(utc.timestamp(), utc.timestamp_subsec_nanos())
    }

    /// Parses `YYYY-MM-DDTHH:MM:SS[.fraction]Z` with up to nine fraction digits.
    pub fn parse(value: &str) -> Result<Self, TimestampError> {
        let re = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?Z$")
            .expect("invalid regex");
        if !re.is_match(value) {
            return Err(TimestampError::Format(value.to_string()));
        }
        let parsed =
            DateTime::parse_from_rfc3339(value).map_err(|source| TimestampError::Parse {
                value: value.to_string(),
                source,
            })?;
        Ok(Self::from_datetime(&parsed))
    }

    /// Whole seconds since the Unix epoch.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Sub-second remainder in nanoseconds.
    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    /// Converts back to a chrono date-time when representable.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanos)
    }

    /// Rejects instants outside `[0001-01-01, 10000-01-01)`.
    pub fn check_range(&self) -> Result<(), EncodeError> {
        if self.seconds < MIN_SECONDS {
            return Err(EncodeError::out_of_range(self, "timestamp before year 1"));
        }
        if self.seconds >= MAX_SECONDS {
            return Err(EncodeError::out_of_range(self, "timestamp after year 9999"));
        }
        Ok(())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(datetime: DateTime<Tz>) -> Self {
        Self::from_datetime(&datetime)
    }
}

impl fmt::Display for Timestamp {
    /// RFC 3339 in UTC with trailing zeros of the fraction trimmed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(datetime) = self.to_datetime() else {
            return write!(f, "@{}.{:09}", self.seconds, self.nanos);
        };
        write!(f, "{}", datetime.format("%Y-%m-%dT%H:%M:%S"))?;
        if self.nanos != 0 {
            let fraction = format!("{:09}", self.nanos);
            write!(f, ".{}", fraction.trim_end_matches('0'))?;
        }
        f.write_str("Z")
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn parses_nanosecond_fraction() {
        let ts = Timestamp::parse("2018-05-23T00:37:22.036663121Z").unwrap();
        assert_eq!(ts.seconds(), 1_527_035_842);
        assert_eq!(ts.nanos(), 36_663_121);
    }

    #[test]
    fn rejects_non_utc_strings() {
        assert!(matches!(
            Timestamp::parse("2018-05-23T08:37:22+08:00"),
            Err(TimestampError::Format(_))
        ));
        assert!(matches!(
            Timestamp::parse("2018-05-23T00:37:22.0366631211Z"),
            Err(TimestampError::Format(_))
        ));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(matches!(
            Timestamp::parse("2018-02-30T00:00:00Z"),
            Err(TimestampError::Parse { .. })
        ));
    }

    #[test]
    fn normalizes_zones_to_utc() {
        let hong_kong = FixedOffset::east_opt(8 * 3600).unwrap();
        let local = hong_kong.with_ymd_and_hms(1973, 11, 30, 5, 33, 9).unwrap();
        assert_eq!(Timestamp::from(local), Timestamp::from_unix(123_456_789, 0));
    }

    #[test]
    fn carries_excess_nanos() {
        let ts = Timestamp::from_unix(10, 2_500_000_000);
        assert_eq!((ts.seconds(), ts.nanos()), (12, 500_000_000));
    }

    #[test]
    fn displays_trimmed_rfc3339() {
        assert_eq!(
            Timestamp::from_unix(123_456_789, 123_456_789).to_string(),
            "1973-11-29T21:33:09.123456789Z"
        );
        assert_eq!(Timestamp::UNIX_EPOCH.to_string(), "1970-01-01T00:00:00Z");
        assert_eq!(
            Timestamp::from_unix(1_500_000_000, 500_000_000).to_string(),
            "2017-07-14T02:40:00.5Z"
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        let ts = Timestamp::from_unix(-1_000_000, 1_000);
        assert_eq!(Timestamp::parse(&ts.to_string()).unwrap(), ts);
    }

    #[test]
    fn range_boundaries() {
        assert!(Timestamp::from_unix(MIN_SECONDS, 0).check_range().is_ok());
        assert!(Timestamp::from_unix(MIN_SECONDS - 1, 999_999_999)
            .check_range()
            .is_err());
        assert!(Timestamp::from_unix(MAX_SECONDS - 1, 999_999_999)
            .check_range()
            .is_ok());
        assert!(Timestamp::from_unix(MAX_SECONDS, 0).check_range().is_err());
    }
}
