//! Resolves "today" for date range filters, either from the system clock in
//! the configured timezone or from a fixed date.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Get the current UTC offset of `canonical_timezone`, e.g. "Asia/Jakarta".
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The source of the current date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clock {
    /// Read the system clock and convert it to the given canonical timezone.
    System {
        /// A canonical timezone name, e.g. "Asia/Jakarta".
        timezone: String,
    },
    /// Always report the same date.
    Fixed(Date),
}

impl Clock {
    /// A clock that reads the system time in `timezone`.
    pub fn system(timezone: &str) -> Self {
        Self::System {
            timezone: timezone.to_owned(),
        }
    }

    /// The current date.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the timezone is not a known
    /// canonical timezone.
    pub fn today(&self) -> Result<Date, Error> {
        match self {
            Clock::System { timezone } => {
                let offset = get_local_offset(timezone)
                    .ok_or_else(|| Error::InvalidTimezoneError(timezone.clone()))?;

                Ok(OffsetDateTime::now_utc().to_offset(offset).date())
            }
            Clock::Fixed(date) => Ok(*date),
        }
    }
}
