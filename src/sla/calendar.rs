//! Working-week calendar

use crate::config::SlaConfig;
use crate::utils::error::{FixzitError, Result};
use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    Timelike, Utc, Weekday,
};
use std::collections::BTreeSet;

/// Working days, hours and holidays in a fixed local offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkWeek {
    start_day: Weekday,
    end_day: Weekday,
    start_hour: u32,
    end_hour: u32,
    holidays: BTreeSet<NaiveDate>,
    offset: FixedOffset,
}

impl WorkWeek {
    /// Create a work week in UTC without holidays
    ///
    /// Days are inclusive and may wrap past Saturday (`Sun..=Thu`, `Sat..=Wed`).
    pub fn new(
        start_day: Weekday,
        end_day: Weekday,
        start_hour: u32,
        end_hour: u32,
    ) -> Result<Self> {
        if start_hour > 23 || end_hour > 24 || start_hour >= end_hour {
            return Err(FixzitError::validation(format!(
                "Invalid working hours {}:00-{}:00",
                start_hour, end_hour
            )));
        }

        Ok(Self {
            start_day,
            end_day,
            start_hour,
            end_hour,
            holidays: BTreeSet::new(),
            offset: Utc.fix(),
        })
    }

    /// Build the calendar described by the SLA configuration
    pub fn from_config(config: &SlaConfig) -> Result<Self> {
        let week = &config.work_week;
        Self::new(week.start_day, week.end_day, week.start_hour, week.end_hour)?
            .with_holidays(config.holidays.iter().copied())
            .with_utc_offset_minutes(config.utc_offset_minutes)
    }

    pub fn with_holidays<I: IntoIterator<Item = NaiveDate>>(mut self, holidays: I) -> Self {
        self.holidays.extend(holidays);
        self
    }

    /// Set the local offset from UTC, in minutes
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Result<Self> {
        self.offset = FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
            FixzitError::validation(format!("Invalid UTC offset: {} minutes", minutes))
        })?;
        Ok(self)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn holidays(&self) -> &BTreeSet<NaiveDate> {
        &self.holidays
    }

    /// Whether `weekday` falls inside the (possibly wrapping) working range
    pub fn is_working_weekday(&self, weekday: Weekday) -> bool {
        let start = self.start_day.num_days_from_sunday();
        let end = self.end_day.num_days_from_sunday();
        let day = weekday.num_days_from_sunday();

        if start <= end {
            (start..=end).contains(&day)
        } else {
            day >= start || day <= end
        }
    }

    /// Working weekday that is not a holiday
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        self.is_working_weekday(date.weekday()) && !self.holidays.contains(&date)
    }

    /// Whether the instant falls inside working hours on a business day
    pub fn is_business_time(&self, at: DateTime<Utc>) -> bool {
        let local = self.to_local(at);
        let minute = local.hour() * 60 + local.minute();
        self.is_business_day(local.date())
            && minute >= self.start_hour * 60
            && minute < self.end_hour * 60
    }

    pub(super) fn to_local(&self, at: DateTime<Utc>) -> NaiveDateTime {
        at.with_timezone(&self.offset).naive_local()
    }

    pub(super) fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        local
            .checked_sub_signed(Duration::seconds(i64::from(self.offset.local_minus_utc())))
            .map(|utc| utc.and_utc())
            .ok_or_else(out_of_range)
    }

    pub(super) fn day_start(&self, date: NaiveDate) -> Result<NaiveDateTime> {
        at_hour(date, self.start_hour)
    }

    pub(super) fn day_end(&self, date: NaiveDate) -> Result<NaiveDateTime> {
        at_hour(date, self.end_hour)
    }

    /// Length of one working day, in minutes
    pub(super) fn day_minutes(&self) -> i64 {
        i64::from(self.end_hour - self.start_hour) * 60
    }

    /// Number of working weekdays
    pub(super) fn working_days_per_week(&self) -> i64 {
        WEEK.iter()
            .filter(|day| self.is_working_weekday(**day))
            .count() as i64
    }

    /// First business day strictly after `date`
    ///
    /// Only holidays can push this past a week, so the search is bounded.
    pub(super) fn next_business_day(&self, date: NaiveDate) -> Result<NaiveDate> {
        let max_days = self.holidays.len() + 8;
        let mut candidate = date;
        for _ in 0..max_days {
            candidate = candidate.succ_opt().ok_or_else(out_of_range)?;
            if self.is_business_day(candidate) {
                return Ok(candidate);
            }
        }
        Err(FixzitError::validation(
            "Work week has no business days after the given date",
        ))
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn at_hour(date: NaiveDate, hour: u32) -> Result<NaiveDateTime> {
    date.and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::hours(i64::from(hour)))
        .ok_or_else(out_of_range)
}

pub(super) fn out_of_range() -> FixzitError {
    FixzitError::validation("Date out of range")
}

impl Default for WorkWeek {
    /// Sunday to Thursday, 08:00-18:00, UTC+3
    fn default() -> Self {
        Self {
            start_day: Weekday::Sun,
            end_day: Weekday::Thu,
            start_hour: 8,
            end_hour: 18,
            holidays: BTreeSet::new(),
            offset: FixedOffset::east_opt(3 * 3600).unwrap_or(Utc.fix()),
        }
    }
}
