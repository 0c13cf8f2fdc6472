use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use time::{format_description::well_known::Rfc3339, Duration, OffsetDateTime};

/// A unix timestamp with second precision.
///
/// All persisted `*_at` values use this resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn now() -> Self {
        OffsetDateTime::now_utc().into()
    }

    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    pub const fn into_seconds(self) -> i64 {
        self.0
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(from: OffsetDateTime) -> Self {
        Self(from.unix_timestamp())
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(from: Timestamp) -> Self {
        // Falls back to the epoch for values outside the
        // representable date range.
        OffsetDateTime::from_unix_timestamp(from.0)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs.whole_seconds())
    }
}

impl AddAssign<Duration> for Timestamp {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs.whole_seconds();
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Self;
    fn sub(self, rhs: Duration) -> Self {
        Self(self.0 - rhs.whole_seconds())
    }
}

impl SubAssign<Duration> for Timestamp {
    fn sub_assign(&mut self, rhs: Duration) {
        self.0 -= rhs.whole_seconds();
    }
}

impl Sub for Timestamp {
    type Output = Duration;
    fn sub(self, rhs: Self) -> Duration {
        Duration::seconds(self.0 - rhs.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let dt = OffsetDateTime::from(*self);
        match dt.format(&Rfc3339) {
            Ok(formatted) => f.write_str(&formatted),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_from_into_seconds() {
        let t1 = Timestamp::now();
        let s1 = t1.into_seconds();
        let t2 = Timestamp::from_seconds(s1);
        assert_eq!(t1, t2);
    }

    #[test]
    fn add_and_subtract_durations() {
        let t = Timestamp::from_seconds(1_000);
        assert_eq!(t + Duration::seconds(60), Timestamp::from_seconds(1_060));
        assert_eq!(t - Duration::seconds(60), Timestamp::from_seconds(940));
        assert_eq!(
            Timestamp::from_seconds(1_060) - t,
            Duration::seconds(60)
        );
    }
}
