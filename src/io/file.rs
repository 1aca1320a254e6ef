use crate::model::Schedule;
use std::path::Path;

/// Save a schedule to a JSON file.
pub fn save_schedule(schedule: &Schedule, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(schedule).map_err(|e| e.to_string())?;
    std::fs::write(path, json).map_err(|e| e.to_string())
}

/// Load a schedule from a JSON file.
pub fn load_schedule(path: &Path) -> Result<Schedule, String> {
    let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let mut schedule: Schedule = serde_json::from_str(&json).map_err(|e| e.to_string())?;
    schedule.normalize_lanes();
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ticket;
    use chrono::NaiveDate;

    #[test]
    fn schedule_survives_a_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ops.wrm.json");

        let mut schedule = Schedule::new("Ops Week 24");
        schedule.lanes = vec!["Alice".into(), "Bob".into()];
        let start = NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        schedule
            .tickets
            .push(Ticket::new("Rollout", start, start + chrono::Duration::hours(2), 1));

        save_schedule(&schedule, &path).unwrap();
        let loaded = load_schedule(&path).unwrap();

        assert_eq!(loaded.name, schedule.name);
        assert_eq!(loaded.lanes, schedule.lanes);
        assert_eq!(loaded.tickets, schedule.tickets);
    }

    #[test]
    fn loading_clamps_lane_indexes_to_the_lane_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stale.wrm.json");

        // A file written against an older lane list can reference lanes
        // that no longer exist.
        let start = NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut schedule = Schedule::new("Stale");
        schedule.lanes = vec!["Only".into()];
        schedule
            .tickets
            .push(Ticket::new("Orphan", start, start + chrono::Duration::hours(1), 4));
        save_schedule(&schedule, &path).unwrap();

        let loaded = load_schedule(&path).unwrap();
        assert_eq!(loaded.tickets[0].lane, 0);
    }

    #[test]
    fn loading_a_missing_file_reports_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_schedule(&dir.path().join("nope.json")).is_err());
    }
}
