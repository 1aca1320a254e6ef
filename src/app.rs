use chrono::{Duration, NaiveDate, NaiveTime};
use std::path::PathBuf;
use uuid::Uuid;

use crate::model::{Schedule, Ticket, TicketPatch, TimelineState, TimelineView};
use crate::ui;

/// Main application state.
pub struct WrmApp {
    pub schedule: Schedule,
    pub timeline: TimelineState,
    pub file_path: Option<PathBuf>,
    pub selected_ticket: Option<Uuid>,

    // Dialog state
    pub show_add_ticket: bool,
    pub show_about: bool,
    pub new_ticket_title: String,
    pub new_ticket_date: NaiveDate,
    pub new_ticket_start: String,
    pub new_ticket_end: String,
    pub new_ticket_lane: usize,

    // Custom range picker (View menu)
    pub range_start_date: NaiveDate,
    pub range_end_date: NaiveDate,

    // Status message
    pub status_message: String,
}

impl WrmApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        _cc.egui_ctx.set_fonts(fonts);

        let now = chrono::Local::now().naive_local();

        Self {
            schedule: Self::sample_schedule(),
            timeline: TimelineState::new(now),
            file_path: None,
            selected_ticket: None,
            show_add_ticket: false,
            show_about: false,
            new_ticket_title: String::new(),
            new_ticket_date: now.date(),
            new_ticket_start: "09:00".to_string(),
            new_ticket_end: "10:00".to_string(),
            new_ticket_lane: 0,
            range_start_date: now.date(),
            range_end_date: now.date() + Duration::days(7),
            status_message: "Ready".to_string(),
        }
    }

    /// Generate a sample schedule for demonstration.
    fn sample_schedule() -> Schedule {
        let today = chrono::Local::now().date_naive();
        let at = |day_offset: i64, h: u32, m: u32| {
            (today + Duration::days(day_offset))
                .and_hms_opt(h, m, 0)
                .unwrap_or_else(|| today.and_time(NaiveTime::MIN))
        };

        let mut schedule = Schedule::new("Sample Schedule");
        schedule.lanes = vec![
            "Field Crew A".to_string(),
            "Field Crew B".to_string(),
            "Workshop".to_string(),
        ];

        let seeds = [
            ("Site survey", 0i64, 8, 0, 0i64, 10, 30, 0usize, true),
            ("Cable pull", 0, 11, 0, 0, 15, 0, 0, false),
            ("Panel install", 0, 9, 0, 0, 12, 0, 1, false),
            ("Inspection", 1, 13, 0, 1, 14, 30, 1, false),
            ("Bench repair", -1, 10, 0, -1, 16, 0, 2, true),
            ("Fabrication", 1, 8, 0, 2, 12, 0, 2, false),
        ];
        for (i, (title, sd, sh, sm, ed, eh, em, lane, done)) in seeds.into_iter().enumerate() {
            let mut ticket = Ticket::new(title, at(sd, sh, sm), at(ed, eh, em), lane);
            ticket.color = ui::theme::ticket_color(i);
            ticket.done = done;
            schedule.tickets.push(ticket);
        }
        schedule
    }

    // --- File operations ---

    pub fn new_schedule(&mut self) {
        self.schedule = Schedule::default();
        self.file_path = None;
        self.selected_ticket = None;
        self.status_message = "New schedule created".to_string();
    }

    pub fn open_schedule(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("WRM Schedule", &["wrm.json", "json"])
            .pick_file()
        {
            match crate::io::load_schedule(&path) {
                Ok(schedule) => {
                    self.schedule = schedule;
                    self.file_path = Some(path);
                    self.selected_ticket = None;
                    self.status_message = "Schedule loaded".to_string();
                }
                Err(e) => {
                    log::warn!("failed to load {}: {}", path.display(), e);
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_schedule(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.schedule.touch();
            match crate::io::save_schedule(&self.schedule, &path) {
                Ok(()) => self.status_message = "Schedule saved".to_string(),
                Err(e) => {
                    log::warn!("failed to save {}: {}", path.display(), e);
                    self.status_message = format!("Error saving: {}", e);
                }
            }
        } else {
            self.save_schedule_as();
        }
    }

    pub fn save_schedule_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("WRM Schedule", &["wrm.json", "json"])
            .set_file_name(format!("{}.wrm.json", self.schedule.name))
            .save_file()
        {
            self.file_path = Some(path.clone());
            self.schedule.touch();
            match crate::io::save_schedule(&self.schedule, &path) {
                Ok(()) => self.status_message = "Schedule saved".to_string(),
                Err(e) => {
                    log::warn!("failed to save {}: {}", path.display(), e);
                    self.status_message = format!("Error saving: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.schedule.tickets.is_empty() {
            self.status_message = "Nothing to export — schedule has no tickets".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.schedule.name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match crate::io::csv_export::export_csv(&self.schedule, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} tickets to CSV", count);
                }
                Err(e) => {
                    log::warn!("CSV export failed: {}", e);
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    // --- View operations ---

    /// Switch view mode, anchoring the new window on the selected ticket if
    /// there is one, otherwise on the current time.
    pub fn set_view(&mut self, view: TimelineView) {
        let anchor = self
            .selected_ticket
            .and_then(|id| self.schedule.ticket(id))
            .map(|t| t.start)
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        self.timeline.set_view(view, anchor);
        self.status_message = format!("{} view", view.label());
    }

    pub fn jump_to_today(&mut self) {
        let view = self.timeline.view;
        self.timeline.set_view(view, chrono::Local::now().naive_local());
        self.status_message = "Jumped to today".to_string();
    }

    /// Apply the custom range from the View menu pickers. The window is
    /// stored verbatim; only a reversed or empty range is rejected.
    pub fn apply_custom_range(&mut self) {
        if self.range_end_date <= self.range_start_date {
            self.status_message = "Custom range must end after it starts".to_string();
            return;
        }
        self.timeline.set_date_range(
            self.range_start_date.and_time(NaiveTime::MIN),
            self.range_end_date.and_time(NaiveTime::MIN),
        );
        self.status_message = format!(
            "Showing {} → {}",
            self.range_start_date.format("%Y-%m-%d"),
            self.range_end_date.format("%Y-%m-%d")
        );
    }

    // --- Ticket operations ---

    pub fn create_ticket_from_dialog(&mut self) {
        let title = if self.new_ticket_title.is_empty() {
            "New Ticket".to_string()
        } else {
            self.new_ticket_title.clone()
        };

        let start_time = parse_time(&self.new_ticket_start)
            .or_else(|| NaiveTime::from_hms_opt(9, 0, 0))
            .unwrap_or(NaiveTime::MIN);
        let start = self.new_ticket_date.and_time(start_time);
        let end = match parse_time(&self.new_ticket_end) {
            Some(t) if self.new_ticket_date.and_time(t) > start => {
                self.new_ticket_date.and_time(t)
            }
            _ => start + Duration::hours(1),
        };

        let lane = self.schedule.clamp_lane(self.new_ticket_lane);
        let mut ticket = Ticket::new(title, start, end, lane);
        ticket.color = ui::theme::ticket_color(self.schedule.tickets.len());
        // Normalize onto the snap grid through the same path gestures use.
        let ticket = ticket.apply_update(&TicketPatch::default());

        self.selected_ticket = Some(ticket.id);
        self.schedule.tickets.push(ticket);
        self.schedule.touch();
        self.reset_dialog_fields();
        self.status_message = "Ticket added".to_string();
    }

    pub fn delete_ticket(&mut self, id: Uuid) {
        self.schedule.remove_ticket(id);
        self.schedule.touch();
        if self.selected_ticket == Some(id) {
            self.selected_ticket = None;
        }
        self.status_message = "Ticket deleted".to_string();
    }

    pub fn toggle_done(&mut self, id: Uuid) {
        if let Some(ticket) = self.schedule.ticket_mut(id) {
            ticket.done = !ticket.done;
            self.schedule.touch();
        }
    }

    fn reset_dialog_fields(&mut self) {
        self.new_ticket_title = String::new();
        self.new_ticket_date = chrono::Local::now().date_naive();
        self.new_ticket_start = "09:00".to_string();
        self.new_ticket_end = "10:00".to_string();
    }
}

/// Parse an "HH:MM" field from the add-ticket dialog.
fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

impl eframe::App for WrmApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Keyboard shortcuts, handled outside panel closures
        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S)) {
            self.save_schedule();
        }
        // Shift the window by a day without changing its width
        let step = chrono::Duration::days(1);
        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::ArrowRight)) {
            self.timeline.scroll_by(step);
        }
        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::ArrowLeft)) {
            self.timeline.scroll_by(-step);
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_sub())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Tickets: {}",
                                self.schedule.tickets.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        let default_ppm = self.timeline.view.default_pixels_per_minute();
                        ui.label(
                            egui::RichText::new(format!(
                                "{} ({}d) · Zoom: {:.0}%",
                                self.timeline.view.label(),
                                self.timeline.window.duration().num_days(),
                                self.timeline.pixels_per_minute / default_ppm * 100.0
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: ticket table
        let mut table_action = ui::ticket_table::TicketTableAction::None;
        egui::SidePanel::left("ticket_panel")
            .default_width(300.0)
            .min_width(220.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                table_action =
                    ui::ticket_table::show_ticket_table(&self.schedule, self.selected_ticket, ui);
            });

        match table_action {
            ui::ticket_table::TicketTableAction::Select(id) => {
                self.selected_ticket = Some(id);
            }
            ui::ticket_table::TicketTableAction::Delete(id) => {
                self.delete_ticket(id);
            }
            ui::ticket_table::TicketTableAction::ToggleDone(id) => {
                self.toggle_done(id);
            }
            ui::ticket_table::TicketTableAction::Add => {
                self.show_add_ticket = true;
            }
            ui::ticket_table::TicketTableAction::None => {}
        }

        // Central panel: timeline canvas
        let canvas_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(canvas_frame).show(ctx, |ui| {
            let interaction = ui::timeline_canvas::show_timeline(
                &mut self.schedule,
                &mut self.timeline,
                &mut self.selected_ticket,
                ui,
            );
            if interaction.changed {
                self.schedule.touch();
                if let Some(ticket) = self
                    .selected_ticket
                    .and_then(|id| self.schedule.ticket(id))
                {
                    self.status_message = format!(
                        "Updated '{}' ({} → {})",
                        ticket.title,
                        ticket.start.format("%Y-%m-%d %H:%M"),
                        ticket.end.format("%Y-%m-%d %H:%M")
                    );
                } else {
                    self.status_message = "Timeline updated".to_string();
                }
            }
        });

        // Dialogs
        if self.show_add_ticket {
            ui::dialogs::show_add_ticket_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
