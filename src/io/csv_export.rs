use crate::model::Schedule;
use std::path::Path;

/// Export a schedule's tickets to a semicolon-delimited CSV file.
///
/// Columns: Title ; Lane ; Start ; End ; Done
/// Timestamps are formatted as YYYY-MM-DD HH:MM.
/// Returns the number of tickets written.
pub fn export_csv(schedule: &Schedule, path: &Path) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    wtr.write_record(["Title", "Lane", "Start", "End", "Done"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    for ticket in &schedule.tickets {
        let lane = schedule
            .lanes
            .get(ticket.lane)
            .map(String::as_str)
            .unwrap_or("");
        wtr.write_record([
            ticket.title.as_str(),
            lane,
            &ticket.start.format("%Y-%m-%d %H:%M").to_string(),
            &ticket.end.format("%Y-%m-%d %H:%M").to_string(),
            if ticket.done { "yes" } else { "no" },
        ])
        .map_err(|e| format!("Failed to write ticket '{}': {}", ticket.title, e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(schedule.tickets.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ticket;
    use chrono::NaiveDate;

    #[test]
    fn exports_one_row_per_ticket_plus_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickets.csv");

        let mut schedule = Schedule::new("Export");
        schedule.lanes = vec!["Infra".into()];
        let start = NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        schedule
            .tickets
            .push(Ticket::new("Patch", start, start + chrono::Duration::minutes(45), 0));

        let written = export_csv(&schedule, &path).unwrap();
        assert_eq!(written, 1);

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("Title;Lane;Start;End;Done"));
        assert_eq!(
            lines.next(),
            Some("Patch;Infra;2025-06-10 14:30;2025-06-10 15:15;no")
        );
    }
}
