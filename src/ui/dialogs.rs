use crate::app::WrmApp;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Render the "Add Ticket" dialog.
pub fn show_add_ticket_dialog(app: &mut WrmApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Add Ticket").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 0.0])
        .show(ctx, |ui| {
            // Force dark backgrounds inside this dialog
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.visuals_mut().faint_bg_color = Color32::TRANSPARENT;
            ui.visuals_mut().striped = false;

            ui.add_space(4.0);

            egui::Grid::new("add_ticket_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_ticket_title)
                            .hint_text("Ticket title...")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Date").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_ticket_date)
                            .id_salt("dlg_dp_date"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("From").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [70.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_ticket_start)
                            .hint_text("09:00")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("To").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [70.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_ticket_end)
                            .hint_text("10:00")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Lane").color(theme::TEXT_SECONDARY));
                    let lane_label = app
                        .schedule
                        .lanes
                        .get(app.new_ticket_lane)
                        .cloned()
                        .unwrap_or_else(|| "?".to_string());
                    egui::ComboBox::from_id_salt("dlg_lane")
                        .selected_text(lane_label)
                        .show_ui(ui, |ui| {
                            for (idx, lane) in app.schedule.lanes.iter().enumerate() {
                                ui.selectable_value(&mut app.new_ticket_lane, idx, lane);
                            }
                        });
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], create_btn).clicked() {
                    app.create_ticket_from_dialog();
                    should_close = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_ticket = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut WrmApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([280.0, 160.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("WRM Timeline").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("A ticket scheduling timeline");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
