use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveTime, Utc};

/// Clock abstracts access to the current timestamp so derivations remain deterministic in tests.
///
/// The returned offset is the one calendar boundaries (midnight, Monday, the
/// first of the month) are computed in.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;

    /// Returns the current local calendar date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Calendar date of `now` in UTC.
    fn utc_today(&self) -> NaiveDate {
        self.now().with_timezone(&Utc).date_naive()
    }
}

/// Wall clock in the machine's local offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    pub fn utc(instant: DateTime<Utc>) -> Self {
        Self(instant.fixed_offset())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Midnight of `day` in the offset carried by `now`.
pub fn local_midnight(now: &DateTime<FixedOffset>, day: NaiveDate) -> DateTime<FixedOffset> {
    let offset = *now.offset();
    let local = day.and_time(NaiveTime::MIN);
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

pub fn start_of_today(now: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    local_midnight(now, now.date_naive())
}

/// Most recent Monday at 00:00, or today's midnight when `now` is a Monday.
pub fn start_of_week(now: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let today = now.date_naive();
    let delta = i64::from(today.weekday().num_days_from_monday());
    local_midnight(now, today - Duration::days(delta))
}

pub fn start_of_month(now: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let today = now.date_naive();
    local_midnight(now, today - Duration::days(i64::from(today.day0())))
}
