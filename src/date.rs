//! Timestamps and the HTTP-date parser seam.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// An absolute point in time, in milliseconds since the Unix epoch.
///
/// This is the resolution epoch headers are stored at. It is signed so that
/// any integer found in a sidecar header decodes to a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a `Timestamp` from milliseconds since the Unix epoch.
    pub const fn from_millis(millis: i64) -> Timestamp {
        Timestamp(millis)
    }

    /// Milliseconds since the Unix epoch.
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Convert into a `SystemTime`.
    ///
    /// Returns `None` if the platform's `SystemTime` can't represent it.
    pub fn to_system_time(&self) -> Option<SystemTime> {
        if self.0 >= 0 {
            UNIX_EPOCH.checked_add(Duration::from_millis(self.0 as u64))
        } else {
            UNIX_EPOCH.checked_sub(Duration::from_millis(self.0.unsigned_abs()))
        }
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Timestamp {
        // saturates far outside of any date an HTTP header can carry
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Timestamp(after.as_millis().min(i64::MAX as u128) as i64),
            Err(before) => {
                let millis = before.duration().as_millis().min(i64::MAX as u128 + 1);
                Timestamp((-(millis as i128)) as i64)
            }
        }
    }
}

/// Parses the text of a date-valued header into a `Timestamp`.
///
/// The cache never surfaces a parser's error to its callers, it only records
/// that the header had no usable value. The error is kept for logging.
pub trait DateParser {
    /// Why a value was rejected.
    type Error: fmt::Display;

    /// Parse `text` as an HTTP-date.
    fn parse(&self, text: &str) -> Result<Timestamp, Self::Error>;
}

impl<'a, P: DateParser + ?Sized> DateParser for &'a P {
    type Error = P::Error;

    fn parse(&self, text: &str) -> Result<Timestamp, Self::Error> {
        (**self).parse(text)
    }
}

/// The default `DateParser`, accepting every HTTP-date format.
///
//   Prior to 1995, there were three different formats commonly used by
//   servers to communicate timestamps.  For compatibility with old
//   implementations, all three are defined here.  The preferred format is
//   a fixed-length and single-zone subset of the date and time
//   specification used by the Internet Message Format [RFC5322].
//
//     HTTP-date    = IMF-fixdate / obs-date
//
//   An example of the preferred format is
//
//     Sun, 06 Nov 1994 08:49:37 GMT    ; IMF-fixdate
//
//   Examples of the two obsolete formats are
//
//     Sunday, 06-Nov-94 08:49:37 GMT   ; obsolete RFC 850 format
//     Sun Nov  6 08:49:37 1994         ; ANSI C's asctime() format
//
//   A recipient that parses a timestamp value in an HTTP header field
//   MUST accept all three HTTP-date formats.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpDateParser;

impl DateParser for HttpDateParser {
    type Error = httpdate::Error;

    fn parse(&self, text: &str) -> Result<Timestamp, httpdate::Error> {
        httpdate::parse_http_date(text).map(Timestamp::from)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::{DateParser, HttpDateParser, Timestamp};

    const NOV_06: Timestamp = Timestamp::from_millis(784_111_777_000);

    #[test]
    fn test_imf_fixdate() {
        assert_eq!(HttpDateParser.parse("Sun, 06 Nov 1994 08:49:37 GMT").unwrap(), NOV_06);
    }

    #[test]
    fn test_rfc_850() {
        assert_eq!(HttpDateParser.parse("Sunday, 06-Nov-94 08:49:37 GMT").unwrap(), NOV_06);
    }

    #[test]
    fn test_asctime() {
        assert_eq!(HttpDateParser.parse("Sun Nov  6 08:49:37 1994").unwrap(), NOV_06);
    }

    #[test]
    fn test_no_date() {
        assert!(HttpDateParser.parse("this-is-no-date").is_err());
        assert!(HttpDateParser.parse("").is_err());
    }

    #[test]
    fn test_system_time_conversion() {
        let time = UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert_eq!(Timestamp::from(time), NOV_06);
        assert_eq!(NOV_06.to_system_time(), Some(time));

        let before = Timestamp::from_millis(-1_500);
        assert_eq!(
            before.to_system_time(),
            Some(UNIX_EPOCH - Duration::from_millis(1_500))
        );
        assert_eq!(before.to_system_time().map(Timestamp::from), Some(before));
    }

    #[test]
    fn test_system_time_extremes() {
        // whether these fit depends on the platform, but they never panic
        for &millis in &[i64::MAX, i64::MIN] {
            let ts = Timestamp::from_millis(millis);
            if let Some(time) = ts.to_system_time() {
                assert_eq!(Timestamp::from(time), ts);
            }
        }
    }
}
