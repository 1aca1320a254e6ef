use crate::model::Schedule;
use crate::ui::theme;
use egui::{Color32, RichText, Ui};
use uuid::Uuid;

/// Actions that the ticket table can request.
pub enum TicketTableAction {
    None,
    Select(Uuid),
    Delete(Uuid),
    ToggleDone(Uuid),
    Add,
}

/// Render the left-side ticket table panel.
pub fn show_ticket_table(
    schedule: &Schedule,
    selected_ticket: Option<Uuid>,
    ui: &mut Ui,
) -> TicketTableAction {
    let mut action = TicketTableAction::None;

    // Header area
    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tickets")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", schedule.tickets.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    // Add ticket button — accent styled
    let btn = egui::Button::new(
        RichText::new("＋  Add Ticket").color(Color32::WHITE).size(12.0),
    )
    .fill(theme::ACCENT)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = TicketTableAction::Add;
    }

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    // Ticket rows
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, ticket) in schedule.tickets.iter().enumerate() {
                let is_selected = selected_ticket == Some(ticket.id);

                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        // Color dot
                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter().circle_filled(dot_rect.center(), 3.0, ticket.color);

                        // Title, struck through when done
                        let mut title_text =
                            RichText::new(&ticket.title).size(12.0).color(if is_selected {
                                Color32::WHITE
                            } else if ticket.done {
                                theme::TEXT_DIM
                            } else {
                                theme::TEXT_PRIMARY
                            });
                        if ticket.done {
                            title_text = title_text.strikethrough();
                        }
                        ui.add(egui::Label::new(title_text).truncate());

                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.spacing_mut().item_spacing.x = 4.0;

                                // Delete button
                                let del_btn = ui.add(
                                    egui::Button::new(
                                        RichText::new("✕").size(10.0).color(theme::TEXT_DIM),
                                    )
                                    .frame(false),
                                );
                                if del_btn.on_hover_text("Delete ticket").clicked() {
                                    action = TicketTableAction::Delete(ticket.id);
                                }

                                // Done toggle
                                let done_btn = ui.add(
                                    egui::Button::new(
                                        RichText::new(if ticket.done { "☑" } else { "☐" })
                                            .size(11.0)
                                            .color(if ticket.done {
                                                theme::ACCENT
                                            } else {
                                                theme::TEXT_DIM
                                            }),
                                    )
                                    .frame(false),
                                );
                                if done_btn.on_hover_text("Toggle done").clicked() {
                                    action = TicketTableAction::ToggleDone(ticket.id);
                                }

                                // Time range (compact)
                                ui.label(
                                    RichText::new(ticket.end.format("%H:%M").to_string())
                                        .size(10.0)
                                        .color(theme::TEXT_SECONDARY),
                                );
                                ui.label(RichText::new("→").size(9.0).color(theme::TEXT_DIM));
                                ui.label(
                                    RichText::new(ticket.start.format("%d/%m %H:%M").to_string())
                                        .size(10.0)
                                        .color(theme::TEXT_SECONDARY),
                                );

                                // Lane name
                                let lane = schedule
                                    .lanes
                                    .get(ticket.lane)
                                    .map(String::as_str)
                                    .unwrap_or("?");
                                ui.label(
                                    RichText::new(lane).size(10.0).color(theme::TEXT_DIM),
                                );
                            },
                        );
                    });
                });

                // Make entire row clickable
                let row_rect = frame_resp.response.rect;
                let row_click = ui.interact(
                    row_rect,
                    egui::Id::new(("ticket-row", ticket.id)),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    action = TicketTableAction::Select(ticket.id);
                }

                ui.add_space(1.0);
            }
        });

    action
}
