//! SLA deadlines computed from a loaded configuration

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use chrono::{DateTime, TimeZone, Utc};
    use fixzit_scope::Config;
    use fixzit_scope::sla::{Priority, SlaPolicy, SlaStatus};

    /// Monday to Friday, 09:00-17:00 UTC, Christmas off
    const CONFIG: &str = r#"
sla:
  work_week:
    start_day: mon
    end_day: fri
    start_hour: 9
    end_hour: 17
  holidays: ["2025-12-25"]
  utc_offset_minutes: 0
  priority_minutes:
    urgent: 120
    high: 480
    medium: 960
    low: 2400
"#;

    fn policy() -> SlaPolicy {
        let config = assert_ok!(Config::from_yaml_str(CONFIG));
        assert_ok!(config.validate());
        assert_ok!(SlaPolicy::from_config(config.sla()))
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_deadline_skips_holiday() {
        // Wednesday 13:00, four hours left that day, Thursday is a holiday
        let due = assert_ok!(policy().due_at(at(24, 13), Priority::High));
        assert_eq!(due, at(26, 13));
    }

    #[test]
    fn test_deadline_skips_weekend() {
        // Friday 16:00 plus two hours lands on Monday 10:00
        let due = assert_ok!(policy().due_at(at(26, 16), Priority::Urgent));
        assert_eq!(due, at(29, 10));
    }

    #[test]
    fn test_status_progression() {
        let policy = policy();
        let created = at(24, 13);

        assert_eq!(
            assert_ok!(policy.status(created, Priority::High, at(24, 14))),
            SlaStatus::OnTrack
        );
        assert_eq!(
            assert_ok!(policy.status(created, Priority::High, at(26, 12))),
            SlaStatus::AtRisk
        );
        assert_eq!(
            assert_ok!(policy.status(created, Priority::High, at(26, 14))),
            SlaStatus::Breached
        );
    }

    #[test]
    fn test_holiday_time_does_not_count() {
        let policy = policy();
        let evaluation = assert_ok!(policy.evaluate(at(24, 13), Priority::High, at(25, 16)));

        assert_eq!(evaluation.elapsed_business_minutes, 240);
        assert_eq!(evaluation.remaining_business_minutes, 240);
        assert_eq!(evaluation.status, SlaStatus::OnTrack);
    }

    #[test]
    fn test_default_calendar_is_riyadh_week() {
        let policy = assert_ok!(SlaPolicy::from_config(Config::default().sla()));

        // Thursday 16:00 Riyadh is 13:00 UTC; due Sunday 10:00 Riyadh
        let created = Utc.with_ymd_and_hms(2025, 9, 18, 13, 0, 0).unwrap();
        let due = assert_ok!(policy.due_at(created, Priority::Urgent));
        assert_eq!(due, Utc.with_ymd_and_hms(2025, 9, 21, 7, 0, 0).unwrap());
    }
}
