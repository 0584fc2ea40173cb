//! Business-minute deadline arithmetic and SLA status

use super::calendar::{WorkWeek, out_of_range};
use crate::config::{PriorityMinutes, SlaConfig};
use crate::utils::error::{FixzitError, Result};
use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use tracing::debug;

/// Upper bound on a single business-minute budget (100 years)
pub const MAX_BUSINESS_MINUTES: i64 = 100 * 365 * 24 * 60;

/// Years accepted for SLA timestamps
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1970..=9999;

impl WorkWeek {
    /// Add `minutes` of business time to `from`
    ///
    /// A start outside working hours first moves to the next working instant.
    /// Zero minutes returns `from` unchanged.
    pub fn add_business_minutes(
        &self,
        from: DateTime<Utc>,
        minutes: i64,
    ) -> Result<DateTime<Utc>> {
        if minutes < 0 {
            return Err(FixzitError::validation(format!(
                "Business minutes must not be negative, got {}",
                minutes
            )));
        }
        if minutes == 0 {
            return Ok(from);
        }
        if minutes > MAX_BUSINESS_MINUTES {
            return Err(FixzitError::validation(format!(
                "Business minutes must not exceed {}, got {}",
                MAX_BUSINESS_MINUTES, minutes
            )));
        }

        let mut remaining = Duration::minutes(minutes);
        let mut cursor = self.to_local(from);

        loop {
            let date = cursor.date();
            let day_end = self.day_end(date)?;
            if !self.is_business_day(date) || cursor >= day_end {
                cursor = self.day_start(self.next_business_day(date)?)?;
                continue;
            }
            cursor = cursor.max(self.day_start(date)?);

            let available = day_end - cursor;
            if remaining <= available {
                return self.to_utc(cursor + remaining);
            }

            remaining -= available;
            cursor = self.day_start(self.next_business_day(date)?)?;
        }
    }

    /// Whole business minutes elapsed between `start` and `end`
    ///
    /// Returns zero when `end` is not after `start`. Whole weeks between the
    /// two dates are counted without visiting each day.
    pub fn business_minutes_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64> {
        if end <= start {
            return Ok(0);
        }

        let start = self.to_local(start);
        let end = self.to_local(end);
        let (first, last) = (start.date(), end.date());

        let mut elapsed = self.business_time_on(first, start, end)?;
        if first == last {
            return Ok(elapsed.num_minutes());
        }
        elapsed += self.business_time_on(last, start, end)?;

        // Full days strictly between `first` and `last`
        let between = (last - first).num_days() - 1;
        let weeks = between / 7;
        let day_minutes = self.day_minutes();
        let mut minutes = weeks * self.working_days_per_week() * day_minutes;

        let weeks_end = first
            .checked_add_days(Days::new((weeks * 7) as u64))
            .ok_or_else(out_of_range)?;
        if weeks > 0 {
            let skipped_start = first.succ_opt().ok_or_else(out_of_range)?;
            let holidays = self
                .holidays()
                .range(skipped_start..=weeks_end)
                .filter(|date| self.is_working_weekday(date.weekday()))
                .count() as i64;
            minutes -= holidays * day_minutes;
        }

        let mut date = weeks_end;
        for _ in 0..between % 7 {
            date = date.succ_opt().ok_or_else(out_of_range)?;
            if self.is_business_day(date) {
                minutes += day_minutes;
            }
        }

        Ok(elapsed.num_minutes() + minutes)
    }

    /// Business time on `date` that falls inside `from..to`
    fn business_time_on(
        &self,
        date: NaiveDate,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Duration> {
        if !self.is_business_day(date) {
            return Ok(Duration::zero());
        }
        let from = from.max(self.day_start(date)?);
        let to = to.min(self.day_end(date)?);
        Ok(if to > from { to - from } else { Duration::zero() })
    }
}

fn check_supported(name: &str, at: DateTime<Utc>) -> Result<()> {
    if SUPPORTED_YEARS.contains(&at.year()) {
        Ok(())
    } else {
        Err(FixzitError::validation(format!(
            "{} must fall between years {} and {}, got {}",
            name,
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end(),
            at
        )))
    }
}

/// Work-order priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl FromStr for Priority {
    type Err = FixzitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "normal" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" | "critical" => Ok(Priority::Urgent),
            other => Err(FixzitError::validation(format!("Unknown priority: {}", other))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        };
        f.write_str(name)
    }
}

/// Where an open item stands against its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    OnTrack,
    AtRisk,
    Breached,
}

/// Full SLA picture for one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaEvaluation {
    pub priority: Priority,
    pub target_minutes: i64,
    pub due_at: DateTime<Utc>,
    pub elapsed_business_minutes: i64,
    pub remaining_business_minutes: i64,
    pub status: SlaStatus,
}

/// Priority targets applied on a work-week calendar
#[derive(Debug, Clone)]
pub struct SlaPolicy {
    calendar: WorkWeek,
    targets: PriorityMinutes,
    at_risk_ratio: f64,
}

impl SlaPolicy {
    pub fn new(calendar: WorkWeek, targets: PriorityMinutes, at_risk_ratio: f64) -> Result<Self> {
        targets.validate().map_err(FixzitError::validation)?;
        if !(at_risk_ratio > 0.0 && at_risk_ratio < 1.0) {
            return Err(FixzitError::validation(
                "At-risk ratio must be between 0 and 1 (exclusive)",
            ));
        }

        Ok(Self {
            calendar,
            targets,
            at_risk_ratio,
        })
    }

    pub fn from_config(config: &SlaConfig) -> Result<Self> {
        Self::new(
            WorkWeek::from_config(config)?,
            config.priority_minutes.clone(),
            config.at_risk_ratio,
        )
    }

    pub fn calendar(&self) -> &WorkWeek {
        &self.calendar
    }

    /// Business-minute budget for a priority
    pub fn target_minutes(&self, priority: Priority) -> i64 {
        match priority {
            Priority::Low => self.targets.low,
            Priority::Medium => self.targets.medium,
            Priority::High => self.targets.high,
            Priority::Urgent => self.targets.urgent,
        }
    }

    pub fn due_at(&self, created_at: DateTime<Utc>, priority: Priority) -> Result<DateTime<Utc>> {
        check_supported("created_at", created_at)?;
        self.calendar
            .add_business_minutes(created_at, self.target_minutes(priority))
    }

    pub fn status(
        &self,
        created_at: DateTime<Utc>,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<SlaStatus> {
        Ok(self.evaluate(created_at, priority, now)?.status)
    }

    /// Compute the deadline and status of an item at `now`
    pub fn evaluate(
        &self,
        created_at: DateTime<Utc>,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<SlaEvaluation> {
        check_supported("now", now)?;
        let target_minutes = self.target_minutes(priority);
        let due_at = self.due_at(created_at, priority)?;
        let elapsed = self.calendar.business_minutes_between(created_at, now)?;

        let status = if now > due_at {
            SlaStatus::Breached
        } else if elapsed as f64 >= target_minutes as f64 * self.at_risk_ratio {
            SlaStatus::AtRisk
        } else {
            SlaStatus::OnTrack
        };

        debug!(%priority, %due_at, elapsed, ?status, "SLA evaluated");

        Ok(SlaEvaluation {
            priority,
            target_minutes,
            due_at,
            elapsed_business_minutes: elapsed,
            remaining_business_minutes: (target_minutes - elapsed).max(0),
            status,
        })
    }
}
