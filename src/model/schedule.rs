use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ticket::Ticket;

/// A schedule containing lanes, tickets, and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub name: String,
    /// Named swimlanes; ticket `lane` fields index into this list.
    pub lanes: Vec<String>,
    pub tickets: Vec<Ticket>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            name: "Untitled Schedule".to_string(),
            lanes: vec!["General".to_string()],
            tickets: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Schedule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len().max(1)
    }

    /// Clamp a lane index to the valid range.
    pub fn clamp_lane(&self, lane: usize) -> usize {
        lane.min(self.lane_count() - 1)
    }

    /// Clamp every ticket's lane to the current lane list. Externally
    /// sourced schedules may reference lanes that no longer exist.
    pub fn normalize_lanes(&mut self) {
        let max = self.lane_count() - 1;
        for ticket in &mut self.tickets {
            ticket.lane = ticket.lane.min(max);
        }
    }

    pub fn ticket(&self, id: Uuid) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    pub fn ticket_mut(&mut self, id: Uuid) -> Option<&mut Ticket> {
        self.tickets.iter_mut().find(|t| t.id == id)
    }

    pub fn remove_ticket(&mut self, id: Uuid) {
        self.tickets.retain(|t| t.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_lane_never_exceeds_the_lane_list() {
        let mut schedule = Schedule::new("Ops");
        schedule.lanes = vec!["A".into(), "B".into(), "C".into()];
        assert_eq!(schedule.clamp_lane(0), 0);
        assert_eq!(schedule.clamp_lane(2), 2);
        assert_eq!(schedule.clamp_lane(99), 2);
    }

    #[test]
    fn normalize_lanes_pulls_stray_tickets_into_range() {
        use crate::model::Ticket;
        use chrono::NaiveDate;

        let start = NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut schedule = Schedule::new("Ops");
        schedule.lanes = vec!["A".into(), "B".into()];
        schedule
            .tickets
            .push(Ticket::new("Valid", start, start + chrono::Duration::hours(1), 1));
        schedule
            .tickets
            .push(Ticket::new("Stray", start, start + chrono::Duration::hours(1), 7));

        schedule.normalize_lanes();
        assert_eq!(schedule.tickets[0].lane, 1);
        assert_eq!(schedule.tickets[1].lane, 1);
    }

    #[test]
    fn clamp_lane_handles_an_empty_lane_list() {
        let mut schedule = Schedule::new("Empty");
        schedule.lanes.clear();
        assert_eq!(schedule.clamp_lane(5), 0);
    }
}
