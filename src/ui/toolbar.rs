use crate::app::WrmApp;
use crate::model::TimelineView;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut WrmApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Schedule").clicked() {
                app.new_schedule();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_schedule();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_schedule();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_schedule_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                app.timeline.zoom_in();
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                app.timeline.zoom_out();
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("View Mode").small().weak());
            for view in [
                TimelineView::Daily,
                TimelineView::Weekly,
                TimelineView::Monthly,
            ] {
                if ui.radio(app.timeline.view == view, view.label()).clicked() {
                    app.set_view(view);
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("  Jump to Today").clicked() {
                app.jump_to_today();
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("Custom Range").small().weak());
            ui.horizontal(|ui| {
                ui.add(
                    egui_extras::DatePickerButton::new(&mut app.range_start_date)
                        .id_salt("range_dp_start"),
                );
                ui.label("→");
                ui.add(
                    egui_extras::DatePickerButton::new(&mut app.range_end_date)
                        .id_salt("range_dp_end"),
                );
            });
            if ui.button("  Apply Range").clicked() {
                app.apply_custom_range();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned schedule name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.schedule.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
