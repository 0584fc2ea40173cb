//! SLA calendar configuration

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// SLA calendar configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlaConfig {
    /// Working week used for business-hour arithmetic
    #[serde(default)]
    pub work_week: WorkWeekConfig,
    /// Non-working dates, in the calendar's local time
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
    /// Offset of the calendar's local time from UTC, in minutes
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
    /// Business-minute targets per priority
    #[serde(default)]
    pub priority_minutes: PriorityMinutes,
    /// Fraction of the budget after which an open item is at risk
    #[serde(default = "default_at_risk_ratio")]
    pub at_risk_ratio: f64,
}

impl Default for SlaConfig {
    fn default() -> Self {
        Self {
            work_week: WorkWeekConfig::default(),
            holidays: Vec::new(),
            utc_offset_minutes: default_utc_offset_minutes(),
            priority_minutes: PriorityMinutes::default(),
            at_risk_ratio: default_at_risk_ratio(),
        }
    }
}

impl SlaConfig {
    /// Validate SLA configuration
    pub fn validate(&self) -> Result<(), String> {
        self.work_week.validate()?;

        if self.utc_offset_minutes.abs() > 14 * 60 {
            return Err(format!(
                "UTC offset {} minutes is outside the valid range",
                self.utc_offset_minutes
            ));
        }

        if !(self.at_risk_ratio > 0.0 && self.at_risk_ratio < 1.0) {
            return Err("At-risk ratio must be between 0 and 1 (exclusive)".to_string());
        }

        self.priority_minutes.validate()
    }
}

/// Working days and hours
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkWeekConfig {
    /// First working day (inclusive)
    #[serde(default = "default_start_day")]
    pub start_day: Weekday,
    /// Last working day (inclusive, may wrap past Saturday)
    #[serde(default = "default_end_day")]
    pub end_day: Weekday,
    /// Hour the working day starts (0-23)
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    /// Hour the working day ends (1-24, exclusive)
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
}

impl Default for WorkWeekConfig {
    fn default() -> Self {
        Self {
            start_day: default_start_day(),
            end_day: default_end_day(),
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
        }
    }
}

impl WorkWeekConfig {
    /// Validate working hours
    pub fn validate(&self) -> Result<(), String> {
        if self.start_hour > 23 {
            return Err(format!("Start hour {} must be within 0-23", self.start_hour));
        }
        if self.end_hour > 24 {
            return Err(format!("End hour {} must be within 1-24", self.end_hour));
        }
        if self.start_hour >= self.end_hour {
            return Err(format!(
                "Start hour {} must be before end hour {}",
                self.start_hour, self.end_hour
            ));
        }
        Ok(())
    }
}

/// Business-minute targets per priority
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityMinutes {
    #[serde(default = "default_urgent_minutes")]
    pub urgent: i64,
    #[serde(default = "default_high_minutes")]
    pub high: i64,
    #[serde(default = "default_medium_minutes")]
    pub medium: i64,
    #[serde(default = "default_low_minutes")]
    pub low: i64,
}

impl Default for PriorityMinutes {
    fn default() -> Self {
        Self {
            urgent: default_urgent_minutes(),
            high: default_high_minutes(),
            medium: default_medium_minutes(),
            low: default_low_minutes(),
        }
    }
}

impl PriorityMinutes {
    /// Validate that every target is positive
    pub fn validate(&self) -> Result<(), String> {
        for (name, minutes) in [
            ("urgent", self.urgent),
            ("high", self.high),
            ("medium", self.medium),
            ("low", self.low),
        ] {
            if minutes <= 0 {
                return Err(format!("SLA target for {} priority must be positive", name));
            }
        }
        Ok(())
    }
}

fn default_start_day() -> Weekday {
    Weekday::Sun
}

fn default_end_day() -> Weekday {
    Weekday::Thu
}

fn default_start_hour() -> u32 {
    8
}

fn default_end_hour() -> u32 {
    18
}

fn default_utc_offset_minutes() -> i32 {
    180 // Asia/Riyadh, no DST
}

fn default_at_risk_ratio() -> f64 {
    0.75
}

fn default_urgent_minutes() -> i64 {
    4 * 60
}

fn default_high_minutes() -> i64 {
    8 * 60
}

fn default_medium_minutes() -> i64 {
    24 * 60
}

fn default_low_minutes() -> i64 {
    72 * 60
}
