use std::collections::BTreeMap;
use std::ops::Range;

use chrono::NaiveDate;
use egui::{Color32, RichText, Ui};

use crate::api::time::{
    event_duration_hours, format_clock_time, parse_time_to_minutes, start_time_offset,
};
use crate::api::Todo;
use crate::calendar::{format_date, time_periods, CalendarDay};
use crate::config::ClockFormat;
use crate::todo::{TodoGroup, TodoStore};
use super::theme::{day_tab_colors, day_tab_text_colors, phosphor_fill_family, task_colors};

const TIME_LABEL_WIDTH: f32 = 52.0;
const HOUR_HEIGHT: f32 = 48.0;
const MIN_BLOCK_HEIGHT: f32 = 16.0;

/// Result from week grid interactions
#[derive(Default)]
pub struct GridResult {
    pub edit: Option<Todo>,
    pub add_at: Option<(String, String)>,  // (date "YYYY-MM-DD", start_time "HH:MM")
}

/// Result from task list interactions
#[derive(Default)]
pub struct ListResult {
    pub toggle: Option<String>,
    pub edit: Option<Todo>,
    pub delete: Option<Todo>,
}

/// Render the day tabs. Returns the formatted date of a clicked tab.
pub fn render_day_tabs(ui: &mut Ui, days: &[CalendarDay], store: &TodoStore) -> Option<String> {
    let mut clicked = None;
    let (bg_color, border_color, today_color) = day_tab_colors();

    ui.horizontal(|ui| {
        ui.add_space(TIME_LABEL_WIDTH);
        let tab_width = ((ui.available_width() - 6.0 * 2.0) / 7.0).max(40.0);

        for day in days {
            let (day_color, number_color) = day_tab_text_colors(day.is_selected);
            let stroke = if day.is_selected {
                egui::Stroke::new(1.0, Color32::WHITE)
            } else {
                egui::Stroke::new(1.0, border_color)
            };

            let (rect, response) = ui.allocate_exact_size(egui::vec2(tab_width, 56.0), egui::Sense::click());
            if ui.is_rect_visible(rect) {
                let painter = ui.painter();
                painter.rect(rect, 8.0, bg_color, stroke);

                painter.text(
                    egui::pos2(rect.center().x, rect.min.y + 18.0),
                    egui::Align2::CENTER_CENTER,
                    &day.day_name,
                    egui::FontId::proportional(13.0),
                    if day.is_today { today_color } else { day_color },
                );
                painter.text(
                    egui::pos2(rect.center().x, rect.min.y + 38.0),
                    egui::Align2::CENTER_CENTER,
                    day.day_number.to_string(),
                    egui::FontId::proportional(16.0),
                    if day.is_today { today_color } else { number_color },
                );

                // Dot for days that still have open tasks
                let open = store.todos_on(day.date).iter().filter(|t| !t.done).count();
                if open > 0 {
                    painter.circle_filled(
                        egui::pos2(rect.max.x - 10.0, rect.min.y + 10.0),
                        3.0,
                        today_color,
                    );
                }
            }

            let response = response.on_hover_text(format_date(day.date));
            if response.clicked() {
                clicked = Some(day.formatted_date.clone());
            }
            ui.add_space(2.0);
        }
    });

    clicked
}

/// Render the hour-by-day grid with the week's tasks painted as blocks
pub fn render_week_grid(
    ui: &mut Ui,
    days: &[CalendarDay],
    store: &TodoStore,
    hours: Range<u32>,
    clock_format: ClockFormat,
) -> GridResult {
    let mut result = GridResult::default();
    let (bg_color, border_color, today_color) = day_tab_colors();
    let labels = time_periods();
    let first_hour = hours.start;
    let hour_count = hours.len() as f32;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let width = ui.available_width();
            let (rect, response) = ui.allocate_exact_size(
                egui::vec2(width, hour_count * HOUR_HEIGHT),
                egui::Sense::click(),
            );
            let column_width = (width - TIME_LABEL_WIDTH) / days.len().max(1) as f32;
            let column_left = |i: usize| rect.min.x + TIME_LABEL_WIDTH + i as f32 * column_width;

            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, bg_color);

            // Today column tint and selected column outline
            for (i, day) in days.iter().enumerate() {
                let column = egui::Rect::from_min_size(
                    egui::pos2(column_left(i), rect.min.y),
                    egui::vec2(column_width, rect.height()),
                );
                if day.is_today {
                    painter.rect_filled(column, 0.0, today_color.gamma_multiply(0.08));
                }
                if day.is_selected {
                    painter.rect_stroke(column.shrink(1.0), 4.0, egui::Stroke::new(1.0, Color32::from_gray(120)));
                }
                painter.line_segment(
                    [column.left_top(), column.left_bottom()],
                    egui::Stroke::new(1.0, border_color),
                );
            }

            // Hour rows
            for (row, hour) in hours.clone().enumerate() {
                let y = rect.min.y + row as f32 * HOUR_HEIGHT;
                painter.line_segment(
                    [egui::pos2(rect.min.x + TIME_LABEL_WIDTH, y), egui::pos2(rect.max.x, y)],
                    egui::Stroke::new(1.0, border_color),
                );
                if let Some(label) = labels.get(hour as usize) {
                    painter.text(
                        egui::pos2(rect.min.x + TIME_LABEL_WIDTH - 8.0, y + 2.0),
                        egui::Align2::RIGHT_TOP,
                        format_clock_time(label, clock_format),
                        egui::FontId::proportional(12.0),
                        Color32::from_gray(130),
                    );
                }
            }

            // Task blocks
            let mut blocks: Vec<(egui::Rect, &Todo)> = Vec::new();
            for (i, day) in days.iter().enumerate() {
                for todo in store.todos_on(day.date) {
                    let start_hour = parse_time_to_minutes(&todo.start_time).div_euclid(60) as f32;
                    let offset = start_time_offset(&todo.start_time) as f32 / 100.0;
                    let top = rect.min.y + (start_hour - first_hour as f32 + offset) * HOUR_HEIGHT;
                    let height = (event_duration_hours(&todo.start_time, &todo.end_time) as f32 * HOUR_HEIGHT)
                        .max(MIN_BLOCK_HEIGHT);

                    let block = egui::Rect::from_min_size(
                        egui::pos2(column_left(i) + 2.0, top),
                        egui::vec2(column_width - 4.0, height),
                    );
                    if !block.intersects(rect) {
                        continue;
                    }
                    blocks.push((block, todo));
                }
            }

            let hovered = response.hover_pos();
            for (block, todo) in &blocks {
                let (fill, text_color) = task_colors(todo.done);
                let fill = if hovered.is_some_and(|p| block.contains(p)) {
                    fill.gamma_multiply(1.3)
                } else {
                    fill
                };
                painter.rect_filled(*block, 4.0, fill);

                let block_painter = painter.with_clip_rect(block.shrink(2.0).intersect(rect));
                // Done tasks get a filled check drawn from the phosphor-fill family
                let (title, font) = if todo.done {
                    (
                        format!("{} {}", egui_phosphor::fill::CHECK_CIRCLE, todo.name),
                        egui::FontId::new(13.0, phosphor_fill_family()),
                    )
                } else {
                    (todo.name.clone(), egui::FontId::proportional(13.0))
                };
                block_painter.text(
                    block.min + egui::vec2(6.0, 4.0),
                    egui::Align2::LEFT_TOP,
                    title,
                    font,
                    text_color,
                );
                if block.height() >= 36.0 {
                    block_painter.text(
                        block.min + egui::vec2(6.0, 20.0),
                        egui::Align2::LEFT_TOP,
                        format!(
                            "{} - {}",
                            format_clock_time(&todo.start_time, clock_format),
                            format_clock_time(&todo.end_time, clock_format)
                        ),
                        egui::FontId::proportional(11.0),
                        text_color.gamma_multiply(0.8),
                    );
                }
            }

            // Clicking a block edits it, clicking an empty slot adds at that hour
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if let Some((_, todo)) = blocks.iter().rev().find(|(b, _)| b.contains(pos)) {
                        result.edit = Some((*todo).clone());
                    } else if pos.x >= rect.min.x + TIME_LABEL_WIDTH {
                        let column = ((pos.x - rect.min.x - TIME_LABEL_WIDTH) / column_width) as usize;
                        let row = ((pos.y - rect.min.y) / HOUR_HEIGHT) as u32;
                        if let Some(day) = days.get(column) {
                            let hour = (first_hour + row).min(23);
                            result.add_at = Some((day.formatted_date.clone(), format!("{:02}:00", hour)));
                        }
                    }
                }
            }
        });

    result
}

/// Render tasks grouped by date with toggle/edit/delete controls
pub fn render_todo_list(
    ui: &mut Ui,
    groups: &BTreeMap<String, TodoGroup>,
    clock_format: ClockFormat,
) -> ListResult {
    let mut result = ListResult::default();

    if groups.is_empty() {
        ui.add_space(12.0);
        ui.label(RichText::new("No todos").color(Color32::from_gray(130)));
        return result;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (date, group) in groups {
                let heading = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .map(format_date)
                    .unwrap_or_else(|_| date.clone());
                ui.add_space(6.0);
                ui.label(RichText::new(heading).strong());

                for todo in group.not_done.iter().chain(group.done.iter()) {
                    render_todo_row(ui, todo, clock_format, &mut result);
                }
                ui.separator();
            }
        });

    result
}

fn render_todo_row(ui: &mut Ui, todo: &Todo, clock_format: ClockFormat, result: &mut ListResult) {
    ui.horizontal(|ui| {
        let mut done = todo.done;
        if ui.checkbox(&mut done, "").changed() {
            result.toggle = Some(todo.id.clone());
        }

        let name = if todo.done {
            RichText::new(&todo.name).strikethrough().color(Color32::from_gray(130))
        } else {
            RichText::new(&todo.name)
        };
        ui.add(egui::Label::new(name).truncate());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button(egui_phosphor::regular::TRASH).on_hover_text("Delete").clicked() {
                result.delete = Some(todo.clone());
            }
            if ui.small_button(egui_phosphor::regular::PENCIL_SIMPLE).on_hover_text("Edit").clicked() {
                result.edit = Some(todo.clone());
            }
            ui.label(
                RichText::new(format!(
                    "{}-{}",
                    format_clock_time(&todo.start_time, clock_format),
                    format_clock_time(&todo.end_time, clock_format)
                ))
                .small()
                .color(Color32::from_gray(150)),
            );
        });
    });
}
