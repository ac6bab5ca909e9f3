//! Timestamp and date formatting helpers.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

/// Renders a UTC timestamp in the system time zone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Long date heading, e.g. `Wednesday, January 15, 2025`.
pub struct DateHeading(pub Date);

impl fmt::Display for DateHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%A, %B %-d, %Y"))
    }
}
