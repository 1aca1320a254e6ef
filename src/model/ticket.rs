use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Quantization applied to ticket boundaries after a drag or resize.
pub const SNAP_MINUTES: i64 = 15;

/// Shortest duration a ticket is allowed to have.
pub const MIN_DURATION_MINUTES: i64 = 15;

/// A single schedulable ticket on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Index into the schedule's lane list.
    pub lane: usize,
    pub done: bool,
    pub notes: String,
    /// Display color for the ticket bar (stored as RGBA).
    #[serde(with = "color_serde")]
    pub color: Color32,
}

/// A partial update produced by a drag/resize gesture or an edit form.
/// Fields left as `None` keep the ticket's current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketPatch {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub lane: Option<usize>,
}

impl Ticket {
    pub fn new(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        lane: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start,
            end,
            lane,
            done: false,
            notes: String::new(),
            color: Color32::from_rgb(70, 130, 180), // Steel blue
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Apply a gesture or edit to this ticket, returning the new value.
    ///
    /// The patch is overlaid on the current fields, the minimum duration is
    /// enforced, and both bounds are snapped independently to the 15-minute
    /// grid (ties round up). If snapping collapses the range, the end is
    /// pushed out one grid step past the snapped start. Every input coerces
    /// to a valid ticket; the original is left untouched.
    pub fn apply_update(&self, patch: &TicketPatch) -> Ticket {
        let mut next = self.clone();
        if let Some(start) = patch.start {
            next.start = start;
        }
        if let Some(end) = patch.end {
            next.end = end;
        }
        if let Some(lane) = patch.lane {
            next.lane = lane;
        }

        if next.end - next.start < Duration::minutes(MIN_DURATION_MINUTES) {
            next.end = next.start + Duration::minutes(MIN_DURATION_MINUTES);
        }

        let start = snap_to_grid(next.start);
        let mut end = snap_to_grid(next.end);
        if end <= start {
            end = start + Duration::minutes(MIN_DURATION_MINUTES);
        }
        next.start = start;
        next.end = end;
        next
    }
}

/// Round an instant to the nearest 15-minute grid point, halves up.
pub fn snap_to_grid(t: NaiveDateTime) -> NaiveDateTime {
    let grid = SNAP_MINUTES * 60;
    let secs = t.num_seconds_from_midnight() as i64;
    let rounded = (secs + grid / 2) / grid * grid;
    t.date().and_time(NaiveTime::MIN) + Duration::seconds(rounded)
}

/// Serde helper for `Color32`.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rgba = [color.r(), color.g(), color.b(), color.a()];
        rgba.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba: [u8; 4] = Deserialize::deserialize(deserializer)?;
        Ok(Color32::from_rgba_premultiplied(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(h, min, sec)
            .unwrap()
    }

    #[test]
    fn snap_rounds_to_nearest_quarter_hour() {
        assert_eq!(snap_to_grid(at(10, 7, 0)), at(10, 0, 0));
        assert_eq!(snap_to_grid(at(10, 8, 0)), at(10, 15, 0));
        assert_eq!(snap_to_grid(at(10, 15, 0)), at(10, 15, 0));
        assert_eq!(snap_to_grid(at(10, 52, 29)), at(10, 45, 0));
        assert_eq!(snap_to_grid(at(10, 52, 59)), at(11, 0, 0));
    }

    #[test]
    fn snap_ties_round_up() {
        assert_eq!(snap_to_grid(at(10, 7, 30)), at(10, 15, 0));
        assert_eq!(snap_to_grid(at(10, 22, 30)), at(10, 30, 0));
    }

    #[test]
    fn snap_can_roll_into_the_next_day() {
        let late = at(23, 53, 0);
        let next_midnight = NaiveDate::from_ymd_opt(2025, 6, 11)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(snap_to_grid(late), next_midnight);
    }

    #[test]
    fn empty_patch_enforces_the_duration_floor() {
        let ticket = Ticket::new("Standup", at(10, 0, 0), at(10, 5, 0), 0);
        let updated = ticket.apply_update(&TicketPatch::default());
        assert_eq!(updated.start, at(10, 0, 0));
        assert_eq!(updated.end, at(10, 15, 0));
        // The original is untouched.
        assert_eq!(ticket.end, at(10, 5, 0));
    }

    #[test]
    fn every_update_keeps_at_least_the_minimum_duration() {
        let ticket = Ticket::new("Review", at(9, 0, 0), at(11, 0, 0), 0);
        let patches = [
            TicketPatch {
                start: Some(at(10, 58, 0)),
                ..Default::default()
            },
            TicketPatch {
                end: Some(at(9, 1, 0)),
                ..Default::default()
            },
            TicketPatch {
                start: Some(at(14, 3, 0)),
                end: Some(at(14, 4, 0)),
                lane: None,
            },
        ];
        for patch in patches {
            let updated = ticket.apply_update(&patch);
            assert!(
                updated.duration() >= Duration::minutes(MIN_DURATION_MINUTES),
                "patch {:?} gave {:?}",
                patch,
                updated.duration()
            );
        }
    }

    #[test]
    fn bounds_land_on_the_grid_after_any_update() {
        let ticket = Ticket::new("Deploy", at(9, 0, 0), at(11, 0, 0), 0);
        let updated = ticket.apply_update(&TicketPatch {
            start: Some(at(9, 11, 0)),
            end: Some(at(10, 38, 0)),
            lane: None,
        });
        assert_eq!(updated.start, at(9, 15, 0));
        assert_eq!(updated.end, at(10, 45, 0));
    }

    #[test]
    fn empty_update_is_idempotent() {
        let ticket = Ticket::new("Triage", at(10, 7, 0), at(10, 40, 0), 2);
        let once = ticket.apply_update(&TicketPatch::default());
        let twice = once.apply_update(&TicketPatch::default());
        assert_eq!(once, twice);
        // First application equals snapping the original bounds.
        assert_eq!(once.start, snap_to_grid(ticket.start));
        assert_eq!(once.end, snap_to_grid(ticket.end));
    }

    #[test]
    fn lane_change_leaves_snapped_times_alone() {
        let ticket = Ticket::new("Handoff", at(13, 0, 0), at(14, 30, 0), 0);
        let updated = ticket.apply_update(&TicketPatch {
            lane: Some(3),
            ..Default::default()
        });
        assert_eq!(updated.lane, 3);
        assert_eq!(updated.start, ticket.start);
        assert_eq!(updated.end, ticket.end);
    }
}
