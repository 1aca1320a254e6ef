use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};

/// Controls what span of time the timeline displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineView {
    Daily,
    Weekly,
    Monthly,
}

impl TimelineView {
    pub fn label(&self) -> &'static str {
        match self {
            TimelineView::Daily => "Daily",
            TimelineView::Weekly => "Weekly",
            TimelineView::Monthly => "Monthly",
        }
    }

    /// Compute the visible window for this view around an anchor instant.
    ///
    /// - `Daily`: 12 hours before the anchor's midnight to 36 hours after it,
    ///   so the anchor's day sits in the middle of a 48-hour window.
    /// - `Weekly`: the most recent Sunday at midnight, spanning exactly 7 days.
    /// - `Monthly`: 180 days centered on the anchor's midnight.
    ///
    /// The returned window is freshly constructed and always satisfies
    /// `end > start`.
    pub fn window_around(&self, anchor: NaiveDateTime) -> DateWindow {
        let midnight = anchor.date().and_time(NaiveTime::MIN);
        match self {
            TimelineView::Daily => DateWindow {
                start: midnight - Duration::hours(12),
                end: midnight + Duration::hours(36),
            },
            TimelineView::Weekly => {
                let back = anchor.date().weekday().num_days_from_sunday() as i64;
                let sunday = (anchor.date() - Duration::days(back)).and_time(NaiveTime::MIN);
                DateWindow {
                    start: sunday,
                    end: sunday + Duration::days(7),
                }
            }
            TimelineView::Monthly => DateWindow {
                start: midnight - Duration::days(90),
                end: midnight + Duration::days(90),
            },
        }
    }

    /// Default horizontal scale for this view.
    pub fn default_pixels_per_minute(&self) -> f32 {
        match self {
            TimelineView::Daily => 0.8,
            TimelineView::Weekly => 0.15,
            TimelineView::Monthly => 0.02,
        }
    }
}

/// A half-open `[start, end)` range of visible time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, t: NaiveDateTime) -> bool {
        t >= self.start && t < self.end
    }
}

/// Manages the visible viewport of the timeline.
#[derive(Debug, Clone)]
pub struct TimelineState {
    /// Current view mode.
    pub view: TimelineView,
    /// The visible time window.
    pub window: DateWindow,
    /// Pixels per minute (controls zoom level).
    pub pixels_per_minute: f32,
}

const MIN_PIXELS_PER_MINUTE: f32 = 0.005;
const MAX_PIXELS_PER_MINUTE: f32 = 4.0;

impl TimelineState {
    pub fn new(anchor: NaiveDateTime) -> Self {
        let view = TimelineView::Weekly;
        Self {
            view,
            window: view.window_around(anchor),
            pixels_per_minute: view.default_pixels_per_minute(),
        }
    }

    /// Switch view mode and recompute the window wholesale around `anchor`.
    pub fn set_view(&mut self, view: TimelineView, anchor: NaiveDateTime) {
        self.view = view;
        self.window = view.window_around(anchor);
        self.pixels_per_minute = view.default_pixels_per_minute();
    }

    /// Manual override: store an explicit window verbatim, bypassing the
    /// per-view calculator. The caller owns alignment of the range.
    pub fn set_date_range(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        self.window = DateWindow { start, end };
    }

    /// Convert an instant to an x-pixel offset from the window start.
    pub fn time_to_x(&self, t: NaiveDateTime) -> f32 {
        debug_assert!(self.pixels_per_minute > 0.0);
        let minutes = (t - self.window.start).num_seconds() as f32 / 60.0;
        minutes * self.pixels_per_minute
    }

    /// Convert an x-pixel offset back to an instant (second resolution).
    pub fn x_to_time(&self, x: f32) -> NaiveDateTime {
        debug_assert!(self.pixels_per_minute > 0.0);
        let seconds = (x / self.pixels_per_minute * 60.0).round() as i64;
        self.window.start + Duration::seconds(seconds)
    }

    /// Total width in pixels for the visible range.
    pub fn total_width(&self) -> f32 {
        self.time_to_x(self.window.end)
    }

    /// Zoom in (increase pixels per minute).
    pub fn zoom_in(&mut self) {
        self.pixels_per_minute = (self.pixels_per_minute * 1.2).min(MAX_PIXELS_PER_MINUTE);
    }

    /// Zoom out (decrease pixels per minute).
    pub fn zoom_out(&mut self) {
        self.pixels_per_minute = (self.pixels_per_minute / 1.2).max(MIN_PIXELS_PER_MINUTE);
    }

    /// Shift the window by a duration without changing its width.
    pub fn scroll_by(&mut self, delta: Duration) {
        self.window.start += delta;
        self.window.end += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn every_view_produces_an_ordered_window() {
        let anchors = [
            at(2025, 1, 1, 0, 0),
            at(2025, 6, 15, 23, 59),
            at(1999, 12, 31, 12, 30),
        ];
        for view in [
            TimelineView::Daily,
            TimelineView::Weekly,
            TimelineView::Monthly,
        ] {
            for anchor in anchors {
                let w = view.window_around(anchor);
                assert!(w.end > w.start, "{:?} around {anchor}", view);
            }
        }
    }

    #[test]
    fn daily_window_brackets_the_anchor_day() {
        // 2025-06-15 is the anchor day; window runs from the previous day's
        // noon to the following day's noon.
        let w = TimelineView::Daily.window_around(at(2025, 6, 15, 9, 30));
        assert_eq!(w.start, at(2025, 6, 14, 12, 0));
        assert_eq!(w.end, at(2025, 6, 16, 12, 0));
        assert_eq!(w.duration(), Duration::hours(48));
    }

    #[test]
    fn weekly_window_is_sunday_anchored_seven_days() {
        // 2025-01-01 is a Wednesday; the most recent Sunday is 2024-12-29.
        let w = TimelineView::Weekly.window_around(at(2025, 1, 1, 0, 0));
        assert_eq!(w.start, at(2024, 12, 29, 0, 0));
        assert_eq!(w.duration(), Duration::days(7));
        assert_eq!(w.start.date().weekday(), chrono::Weekday::Sun);
    }

    #[test]
    fn weekly_window_on_a_sunday_starts_that_day() {
        let w = TimelineView::Weekly.window_around(at(2025, 6, 8, 18, 45));
        assert_eq!(w.start, at(2025, 6, 8, 0, 0));
        assert_eq!(w.end, at(2025, 6, 15, 0, 0));
    }

    #[test]
    fn monthly_window_is_180_days_centered() {
        let w = TimelineView::Monthly.window_around(at(2025, 6, 15, 14, 0));
        assert_eq!(w.start, at(2025, 3, 17, 0, 0));
        assert_eq!(w.end, at(2025, 9, 13, 0, 0));
        assert_eq!(w.duration(), Duration::days(180));
    }

    #[test]
    fn pixel_mapping_round_trips_times() {
        let state = TimelineState::new(at(2025, 3, 10, 8, 0));
        for minutes in [0i64, 1, 17, 240, 1440, 10079] {
            let t = state.window.start + Duration::minutes(minutes);
            assert_eq!(state.x_to_time(state.time_to_x(t)), t);
        }
    }

    #[test]
    fn pixel_mapping_round_trips_pixels() {
        let mut state = TimelineState::new(at(2025, 3, 10, 8, 0));
        state.pixels_per_minute = 0.37;
        for x in [0.0f32, 1.0, 42.5, 317.0, 1500.25] {
            let back = state.time_to_x(state.x_to_time(x));
            // One second maps to well under a pixel at this scale, so the
            // round trip can be off by at most half a second's worth.
            assert!((back - x).abs() <= 0.37 / 60.0 + 1e-3, "{x} -> {back}");
        }
    }

    #[test]
    fn set_view_recomputes_window_and_scale() {
        let mut state = TimelineState::new(at(2025, 1, 1, 0, 0));
        state.zoom_in();
        state.set_view(TimelineView::Daily, at(2025, 2, 3, 10, 0));
        assert_eq!(state.window.start, at(2025, 2, 2, 12, 0));
        assert_eq!(
            state.pixels_per_minute,
            TimelineView::Daily.default_pixels_per_minute()
        );
    }

    #[test]
    fn set_date_range_stores_the_override_verbatim() {
        let mut state = TimelineState::new(at(2025, 1, 1, 0, 0));
        // Deliberately not aligned to any view granularity.
        let start = at(2025, 4, 1, 7, 13);
        let end = at(2025, 4, 2, 19, 41);
        state.set_date_range(start, end);
        assert_eq!(state.window, DateWindow { start, end });
    }

    #[test]
    fn scroll_preserves_window_width() {
        let mut state = TimelineState::new(at(2025, 1, 1, 0, 0));
        let before = state.window.duration();
        state.scroll_by(Duration::days(3));
        assert_eq!(state.window.duration(), before);
        assert_eq!(state.window.start, at(2025, 1, 1, 0, 0));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut state = TimelineState::new(at(2025, 1, 1, 0, 0));
        for _ in 0..200 {
            state.zoom_in();
        }
        assert!(state.pixels_per_minute <= MAX_PIXELS_PER_MINUTE);
        for _ in 0..200 {
            state.zoom_out();
        }
        assert!(state.pixels_per_minute >= MIN_PIXELS_PER_MINUTE);
    }
}
