use std::collections::HashSet;

use crate::models::operational_hours::OperationalHoursEntry;

use super::ValidationIssue;

/// Rejects hour lists where any weekday appears more than once.
pub fn check_operational_hours(entries: &[OperationalHoursEntry]) -> Result<(), ValidationIssue> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.day) {
            return Err(ValidationIssue::new(
                "duplicate days found in operational hours",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::operational_hours::Weekday;

    fn entry(day: Weekday) -> OperationalHoursEntry {
        OperationalHoursEntry {
            day,
            open_time: "08:00".into(),
            close_time: "17:00".into(),
        }
    }

    #[test]
    fn repeated_day_fails() {
        let entries = vec![entry(Weekday::Monday), entry(Weekday::Monday)];
        let err = check_operational_hours(&entries).unwrap_err();
        assert!(err.message().contains("duplicate days found"));
    }

    #[test]
    fn distinct_days_pass() {
        let entries = vec![
            entry(Weekday::Monday),
            entry(Weekday::Tuesday),
            entry(Weekday::Wednesday),
            entry(Weekday::Thursday),
            entry(Weekday::Friday),
            entry(Weekday::Saturday),
            entry(Weekday::Sunday),
        ];
        assert!(check_operational_hours(&entries).is_ok());
    }

    #[test]
    fn empty_list_passes() {
        assert!(check_operational_hours(&[]).is_ok());
    }

    #[test]
    fn duplicate_with_different_times_still_fails() {
        let entries = vec![
            OperationalHoursEntry {
                day: Weekday::Friday,
                open_time: "08:00".into(),
                close_time: "12:00".into(),
            },
            OperationalHoursEntry {
                day: Weekday::Friday,
                open_time: "13:00".into(),
                close_time: "17:00".into(),
            },
        ];
        assert!(check_operational_hours(&entries).is_err());
    }
}
