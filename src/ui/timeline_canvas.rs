use crate::model::{Schedule, Ticket, TicketPatch, TimelineState, TimelineView};
use crate::ui::theme;
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike};
use egui::{Color32, Id, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

const LANE_HEIGHT: f32 = theme::LANE_HEIGHT;
const LANE_GAP: f32 = theme::LANE_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

#[derive(Debug, Clone)]
struct DragSnapshot {
    start: NaiveDateTime,
    end: NaiveDateTime,
    start_pointer_x: f32,
}

/// Result details from interactions in the timeline canvas.
#[derive(Debug, Clone, Default)]
pub struct CanvasInteraction {
    pub changed: bool,
}

/// Render the scrollable timeline surface (central panel).
pub fn show_timeline(
    schedule: &mut Schedule,
    state: &mut TimelineState,
    selected_ticket: &mut Option<Uuid>,
    ui: &mut Ui,
) -> CanvasInteraction {
    let mut interaction = CanvasInteraction::default();
    let available = ui.available_size();
    let chart_width = state.total_width().max(available.x);
    let lane_count = schedule.lane_count();
    let chart_height = HEADER_HEIGHT + (lane_count as f32 * (LANE_HEIGHT + LANE_GAP)) + 40.0;

    // Handle zoom with scroll wheel
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            state.zoom_in();
        } else if scroll_delta.y < 0.0 {
            state.zoom_out();
        }
    }

    let lane_names = schedule.lanes.clone();

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            draw_time_header(&painter, origin, state, chart_width);
            draw_now_line(&painter, origin, state, chart_height);

            // Lane rows with alternating backgrounds
            for (i, lane_name) in lane_names.iter().enumerate() {
                let y = origin.y + HEADER_HEIGHT + i as f32 * (LANE_HEIGHT + LANE_GAP);
                let row_bg = if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };
                painter.rect_filled(
                    Rect::from_min_size(
                        Pos2::new(origin.x, y),
                        Vec2::new(chart_width, LANE_HEIGHT + LANE_GAP),
                    ),
                    0.0,
                    row_bg,
                );
                painter.line_segment(
                    [
                        Pos2::new(origin.x, y + LANE_HEIGHT + LANE_GAP),
                        Pos2::new(origin.x + chart_width, y + LANE_HEIGHT + LANE_GAP),
                    ],
                    Stroke::new(0.5, theme::BORDER_SUBTLE),
                );
                painter.text(
                    Pos2::new(origin.x + 6.0, y + 11.0),
                    egui::Align2::LEFT_CENTER,
                    lane_name,
                    theme::font_small(),
                    theme::TEXT_DIM,
                );
            }

            // Ticket bars
            for ticket in schedule.tickets.iter_mut() {
                let lane = ticket.lane.min(lane_count - 1);
                let y = origin.y
                    + HEADER_HEIGHT
                    + lane as f32 * (LANE_HEIGHT + LANE_GAP)
                    + LANE_GAP;
                let is_selected = *selected_ticket == Some(ticket.id);

                let bar_rect = draw_ticket_bar(&painter, origin, state, ticket, y, is_selected);

                let bar_response = ui.interact(
                    bar_rect,
                    ui.make_persistent_id(("ticket-bar", ticket.id)),
                    Sense::click_and_drag(),
                );
                let left_handle_rect = Rect::from_min_max(
                    Pos2::new(bar_rect.left() - HANDLE_WIDTH * 0.5, bar_rect.top()),
                    Pos2::new(bar_rect.left() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
                );
                let right_handle_rect = Rect::from_min_max(
                    Pos2::new(bar_rect.right() - HANDLE_WIDTH * 0.5, bar_rect.top()),
                    Pos2::new(bar_rect.right() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
                );

                let left_response = ui.interact(
                    left_handle_rect.expand(4.0),
                    ui.make_persistent_id(("ticket-resize-left", ticket.id)),
                    Sense::drag(),
                );
                let right_response = ui.interact(
                    right_handle_rect.expand(4.0),
                    ui.make_persistent_id(("ticket-resize-right", ticket.id)),
                    Sense::drag(),
                );

                if bar_response.clicked() {
                    *selected_ticket = Some(ticket.id);
                    consumed_click = true;
                }

                for (mode, resp) in [
                    ("move", &bar_response),
                    ("left", &left_response),
                    ("right", &right_response),
                ] {
                    if resp.drag_started() {
                        let ptr_x = resp.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                        ui.ctx().data_mut(|data| {
                            data.insert_persisted(
                                drag_id(ticket.id, mode),
                                DragSnapshot {
                                    start: ticket.start,
                                    end: ticket.end,
                                    start_pointer_x: ptr_x,
                                },
                            );
                        });
                        *selected_ticket = Some(ticket.id);
                        consumed_click = true;
                    }
                }

                if left_response.dragged() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                    let ptr_x = left_response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                    let snapshot = ui.ctx().data_mut(|data| {
                        data.get_persisted::<DragSnapshot>(drag_id(ticket.id, "left"))
                    });
                    if let Some(snapshot) = snapshot {
                        let minutes =
                            drag_minutes(ptr_x - snapshot.start_pointer_x, state.pixels_per_minute);
                        *ticket = ticket.apply_update(&TicketPatch {
                            start: Some(snapshot.start + Duration::minutes(minutes)),
                            end: Some(snapshot.end),
                            lane: None,
                        });
                        interaction.changed = true;
                    }
                } else if right_response.dragged() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                    let ptr_x = right_response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                    let snapshot = ui.ctx().data_mut(|data| {
                        data.get_persisted::<DragSnapshot>(drag_id(ticket.id, "right"))
                    });
                    if let Some(snapshot) = snapshot {
                        let minutes =
                            drag_minutes(ptr_x - snapshot.start_pointer_x, state.pixels_per_minute);
                        *ticket = ticket.apply_update(&TicketPatch {
                            start: Some(snapshot.start),
                            end: Some(snapshot.end + Duration::minutes(minutes)),
                            lane: None,
                        });
                        interaction.changed = true;
                    }
                } else if bar_response.dragged() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                    let ptr = bar_response.interact_pointer_pos().unwrap_or(origin);
                    let snapshot = ui.ctx().data_mut(|data| {
                        data.get_persisted::<DragSnapshot>(drag_id(ticket.id, "move"))
                    });
                    if let Some(snapshot) = snapshot {
                        let minutes =
                            drag_minutes(ptr.x - snapshot.start_pointer_x, state.pixels_per_minute);
                        let new_lane = lane_at_y(ptr.y - origin.y, lane_count);
                        *ticket = ticket.apply_update(&TicketPatch {
                            start: Some(snapshot.start + Duration::minutes(minutes)),
                            end: Some(snapshot.end + Duration::minutes(minutes)),
                            lane: Some(new_lane),
                        });
                        interaction.changed = true;
                    }
                }

                for (mode, resp) in [
                    ("move", &bar_response),
                    ("left", &left_response),
                    ("right", &right_response),
                ] {
                    if resp.drag_stopped() {
                        ui.ctx().data_mut(|data| {
                            data.remove::<DragSnapshot>(drag_id(ticket.id, mode));
                        });
                    }
                }

                // Handle affordances
                if is_selected || left_response.hovered() || right_response.hovered() {
                    if left_response.hovered() || right_response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                    } else if bar_response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    let handle_h = bar_rect.height() * 0.55;
                    let handle_y = bar_rect.center().y - handle_h / 2.0;
                    let lh = Rect::from_min_size(
                        Pos2::new(bar_rect.left() - 1.5, handle_y),
                        Vec2::new(4.0, handle_h),
                    );
                    let rh = Rect::from_min_size(
                        Pos2::new(bar_rect.right() - 2.5, handle_y),
                        Vec2::new(4.0, handle_h),
                    );
                    painter.rect_filled(lh, Rounding::same(2.0), theme::HANDLE_COLOR);
                    painter.rect_filled(rh, Rounding::same(2.0), theme::HANDLE_COLOR);
                }

                // Tooltip on hover
                if bar_response.hovered() || left_response.hovered() || right_response.hovered() {
                    let lane_label = lane_names
                        .get(ticket.lane)
                        .map(String::as_str)
                        .unwrap_or("?");
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("ticket-tip", ticket.id)),
                        |ui| {
                            ui.strong(&ticket.title);
                            ui.label(format!(
                                "{} → {}",
                                ticket.start.format("%a %d %b %H:%M"),
                                ticket.end.format("%a %d %b %H:%M"),
                            ));
                            ui.label(format!(
                                "Lane: {} · {} min",
                                lane_label,
                                ticket.duration().num_minutes()
                            ));
                            if ticket.done {
                                ui.label("Done");
                            }
                        },
                    );
                }
            }

            // Empty click on background clears selection
            if response.clicked() && !consumed_click {
                *selected_ticket = None;
            }
        });

    interaction
}

fn drag_id(ticket_id: Uuid, mode: &'static str) -> Id {
    Id::new(("drag", ticket_id, mode))
}

/// Translate a horizontal pixel delta into whole minutes at the current scale.
fn drag_minutes(delta_x: f32, pixels_per_minute: f32) -> i64 {
    debug_assert!(pixels_per_minute > 0.0);
    (delta_x / pixels_per_minute).round() as i64
}

/// Which lane row a canvas-local y coordinate falls in.
fn lane_at_y(y: f32, lane_count: usize) -> usize {
    let row = ((y - HEADER_HEIGHT) / (LANE_HEIGHT + LANE_GAP)).floor();
    (row.max(0.0) as usize).min(lane_count - 1)
}

fn draw_time_header(
    painter: &egui::Painter,
    origin: Pos2,
    state: &TimelineState,
    width: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    // Ticks start at the midnight of the first visible day so that manual
    // window overrides still get an aligned ruler.
    let window = state.window;
    let mut t = window.start.date().and_time(NaiveTime::MIN);

    match state.view {
        TimelineView::Daily => {
            while t <= window.end {
                if t >= window.start {
                    let x = origin.x + state.time_to_x(t);
                    let is_midnight = t.time() == NaiveTime::MIN;
                    painter.line_segment(
                        [
                            Pos2::new(x, origin.y + HEADER_HEIGHT),
                            Pos2::new(x, origin.y + 2000.0),
                        ],
                        Stroke::new(
                            0.5,
                            if is_midnight {
                                theme::GRID_LINE_MAJOR
                            } else {
                                theme::GRID_LINE
                            },
                        ),
                    );

                    if state.pixels_per_minute >= 0.5 || t.time().hour() % 3 == 0 {
                        painter.text(
                            Pos2::new(x + 3.0, origin.y + 28.0),
                            egui::Align2::LEFT_CENTER,
                            t.format("%H:%M").to_string(),
                            theme::font_sub(),
                            theme::TEXT_SECONDARY,
                        );
                    }
                    if is_midnight {
                        painter.text(
                            Pos2::new(x + 3.0, origin.y + 12.0),
                            egui::Align2::LEFT_CENTER,
                            t.format("%a %d %b").to_string(),
                            theme::font_header(),
                            theme::TEXT_PRIMARY,
                        );
                    }
                }
                t += Duration::hours(1);
            }
        }
        TimelineView::Weekly => {
            while t <= window.end {
                if t >= window.start {
                    let x = origin.x + state.time_to_x(t);
                    painter.line_segment(
                        [
                            Pos2::new(x, origin.y + HEADER_HEIGHT),
                            Pos2::new(x, origin.y + 2000.0),
                        ],
                        Stroke::new(0.5, theme::GRID_LINE),
                    );
                    painter.text(
                        Pos2::new(x + 3.0, origin.y + 28.0),
                        egui::Align2::LEFT_CENTER,
                        t.format("%a %d").to_string(),
                        theme::font_sub(),
                        theme::TEXT_SECONDARY,
                    );
                    if t.day() == 1 || t == window.start.date().and_time(NaiveTime::MIN) {
                        painter.text(
                            Pos2::new(x + 3.0, origin.y + 12.0),
                            egui::Align2::LEFT_CENTER,
                            t.format("%b %Y").to_string(),
                            theme::font_header(),
                            theme::TEXT_PRIMARY,
                        );
                    }
                }
                t += Duration::days(1);
            }
        }
        TimelineView::Monthly => {
            // Align ticks to Sundays.
            let back = t.date().weekday().num_days_from_sunday() as i64;
            t -= Duration::days(back);
            while t <= window.end {
                if t >= window.start {
                    let x = origin.x + state.time_to_x(t);
                    painter.line_segment(
                        [
                            Pos2::new(x, origin.y + HEADER_HEIGHT),
                            Pos2::new(x, origin.y + 2000.0),
                        ],
                        Stroke::new(0.5, theme::GRID_LINE),
                    );
                    painter.text(
                        Pos2::new(x + 3.0, origin.y + 28.0),
                        egui::Align2::LEFT_CENTER,
                        t.format("W%V").to_string(),
                        theme::font_sub(),
                        theme::TEXT_SECONDARY,
                    );
                    if t.day() <= 7 {
                        painter.text(
                            Pos2::new(x + 3.0, origin.y + 12.0),
                            egui::Align2::LEFT_CENTER,
                            t.format("%b %Y").to_string(),
                            theme::font_header(),
                            theme::TEXT_PRIMARY,
                        );
                    }
                }
                t += Duration::days(7);
            }
        }
    }
}

fn draw_now_line(painter: &egui::Painter, origin: Pos2, state: &TimelineState, height: f32) {
    let now = chrono::Local::now().naive_local();
    if !state.window.contains(now) {
        return;
    }
    let x = origin.x + state.time_to_x(now);

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::NOW_LINE),
    );

    let badge_w = 36.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::NOW_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Now",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_ticket_bar(
    painter: &egui::Painter,
    origin: Pos2,
    state: &TimelineState,
    ticket: &Ticket,
    y: f32,
    is_selected: bool,
) -> Rect {
    let x_start = origin.x + state.time_to_x(ticket.start);
    let x_end = origin.x + state.time_to_x(ticket.end);
    let bar_width = (x_end - x_start).max(6.0);
    let inset = theme::BAR_INSET;

    let bar_rect = Rect::from_min_size(
        Pos2::new(x_start, y + inset),
        Vec2::new(bar_width, LANE_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    // Soft shadow
    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));

    painter.rect_filled(bar_rect, rounding, ticket.color);
    // Lighter top highlight
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_width, (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    // Completed tickets get a darkened overlay
    if ticket.done {
        painter.rect_filled(bar_rect, rounding, theme::DONE_OVERLAY);
    }

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Title on bar (single line, clipped to bar bounds)
    if bar_width > 30.0 {
        let galley = painter.layout_no_wrap(
            ticket.title.clone(),
            theme::font_bar(),
            theme::TEXT_ON_BAR,
        );
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = y + inset + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}
