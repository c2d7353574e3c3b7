use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::Local;
use eframe::egui;
use egui::{Color32, RichText};

use crate::api::time::{default_end_time, format_clock_time};
use crate::api::{ApiError, MockTodoApi, Todo, TodoApi, TodoClient};
use crate::calendar::CalendarWeek;
use crate::config::{ClockFormat, Config};
use crate::todo::{
    completion_rate, DialogController, NoticeKind, Notifier, TodoOp, TodoRequest, TodoStore,
};
use super::theme::{dialog_colors, notice_color};
use super::views;

/// How long a success notice stays in the status line
const NOTICE_TTL: Duration = Duration::from_secs(4);

pub struct WeekPlanApp {
    config: Config,
    api: Arc<dyn TodoApi>,

    calendar: CalendarWeek,
    store: TodoStore,
    dialog: DialogController,

    // Delete confirmation
    pending_delete: Option<Todo>,

    // Settings dialog
    show_settings: bool,
    settings_base_url: String,
    settings_use_mock: bool,
    settings_font_scale: f32,
    settings_clock_format: ClockFormat,

    status: StatusLine,

    // Progress bar state
    progress: f32,
    progress_start: Instant,
    progress_phase: ProgressPhase,

    // Async communication
    runtime: tokio::runtime::Runtime,
    result_rx: Receiver<Completion>,
    result_tx: Sender<Completion>,
    ctx: egui::Context,
}

/// A finished request, sent back to the UI thread
struct Completion {
    op: TodoOp,
    result: Result<Vec<Todo>, ApiError>,
    // Backend generation the request was sent under
    generation: u64,
    // Dialog opening that produced an add/update
    dialog_session: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ProgressPhase {
    Idle,
    FastStart,    // 0→17% in 0.25s
    SlowCrawl,    // 17%→50% slowly
    Completing,   // snap to 100%
    FadingOut,
}

/// Latest notice, shown at the bottom of the window
#[derive(Default)]
struct StatusLine {
    message: Option<(NoticeKind, String, Instant)>,
}

impl StatusLine {
    fn current(&self) -> Option<(NoticeKind, &str)> {
        match &self.message {
            Some((NoticeKind::Success, _, at)) if at.elapsed() > NOTICE_TTL => None,
            Some((kind, text, _)) => Some((*kind, text.as_str())),
            None => None,
        }
    }

    fn dismiss(&mut self) {
        self.message = None;
    }
}

impl Notifier for StatusLine {
    fn notify(&mut self, kind: NoticeKind, text: &str) {
        match kind {
            NoticeKind::Error => log::warn!("{}", text),
            _ => log::info!("{}", text),
        }
        self.message = Some((kind, text.to_string(), Instant::now()));
    }
}

fn build_api(config: &Config) -> anyhow::Result<Arc<dyn TodoApi>> {
    if config.use_mock_api {
        log::info!("Using in-process mock backend ({} ms latency)", config.mock_latency_ms);
        let mock = MockTodoApi::seeded().with_latency(Duration::from_millis(config.mock_latency_ms));
        Ok(Arc::new(mock))
    } else {
        log::info!("Using backend at {}", config.base_url());
        let client = TodoClient::new(config).context("Failed to create HTTP client")?;
        Ok(Arc::new(client))
    }
}

impl WeekPlanApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        let config = Config::load().unwrap_or_else(|e| {
            log::warn!("Using default settings: {:#}", e);
            Config::default()
        });
        super::setup_fonts(&cc.egui_ctx);
        super::setup_theme(&cc.egui_ctx);

        let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let (result_tx, result_rx) = channel();

        let api = build_api(&config)?;

        let today = Local::now().date_naive();

        let mut app = Self {
            show_settings: false,
            settings_base_url: config.api_base_url.clone(),
            settings_use_mock: config.use_mock_api,
            settings_font_scale: config.font_scale,
            settings_clock_format: config.clock_format,
            config,
            api,
            calendar: CalendarWeek::new(today),
            store: TodoStore::new(today),
            dialog: DialogController::new(),
            pending_delete: None,
            status: StatusLine::default(),
            progress: 0.0,
            progress_start: Instant::now(),
            progress_phase: ProgressPhase::Idle,
            runtime,
            result_rx,
            result_tx,
            ctx: cc.egui_ctx.clone(),
        };

        app.dispatch(TodoRequest::Fetch);

        Ok(app)
    }

    /// Start `request` unless one of the same kind is already in flight
    fn dispatch(&mut self, request: TodoRequest) {
        let op = request.op();
        if !self.store.begin(op) {
            return;
        }

        if self.progress_phase == ProgressPhase::Idle {
            self.progress = 0.0;
            self.progress_phase = ProgressPhase::FastStart;
            self.progress_start = Instant::now();
        }

        let generation = self.store.generation();
        let dialog_session = match op {
            TodoOp::Add | TodoOp::Update => self.dialog.session(),
            _ => None,
        };
        let api = Arc::clone(&self.api);
        let tx = self.result_tx.clone();
        let ctx = self.ctx.clone();

        self.runtime.spawn(async move {
            let result = request.send(api.as_ref()).await;
            let _ = tx.send(Completion { op, result, generation, dialog_session });
            ctx.request_repaint();
        });
    }

    fn check_async_results(&mut self) {
        while let Ok(completion) = self.result_rx.try_recv() {
            let Completion { op, result, generation, dialog_session } = completion;
            let ok = self.store.complete_from(generation, op, result, &mut self.status);
            // The dialog stays open on failure so the draft can be retried
            if let (Some(true), Some(session)) = (ok, dialog_session) {
                self.dialog.close_session(session);
            }
        }

        if !self.store.loading().any() && matches!(self.progress_phase, ProgressPhase::FastStart | ProgressPhase::SlowCrawl) {
            self.progress_phase = ProgressPhase::Completing;
            self.progress_start = Instant::now();
        }
    }

    fn refresh_data(&mut self) {
        self.dispatch(TodoRequest::Fetch);
    }

    fn sync_week(&mut self) {
        self.store.set_week(self.calendar.current_date());
    }

    fn open_add_dialog(&mut self, date: Option<&str>, start_time: Option<&str>) {
        let date = date
            .map(str::to_string)
            .unwrap_or_else(|| self.calendar.selected_date().format("%Y-%m-%d").to_string());
        self.dialog.open_for_add(&date, start_time);
    }

    fn save_dialog(&mut self) {
        let now = Local::now().naive_local();
        if let Some(request) = self.dialog.commit(now, &mut self.status) {
            self.dispatch(request);
        }
    }

    fn save_settings(&mut self) {
        let backend_changed = self.settings_use_mock != self.config.use_mock_api
            || self.settings_base_url.trim() != self.config.api_base_url;

        self.config.api_base_url = self.settings_base_url.trim().to_string();
        self.config.use_mock_api = self.settings_use_mock;
        self.config.font_scale = self.settings_font_scale;
        self.config.clock_format = self.settings_clock_format;

        if let Err(e) = self.config.save() {
            self.status.notify(NoticeKind::Error, &format!("Failed to save settings: {}", e));
            return;
        }

        if backend_changed {
            match build_api(&self.config) {
                Ok(api) => {
                    self.api = api;
                    self.store.switch_backend();
                    self.refresh_data();
                }
                Err(e) => {
                    self.status.notify(NoticeKind::Error, &format!("{:#}", e));
                    return;
                }
            }
        }

        self.show_settings = false;
    }

    fn open_settings(&mut self) {
        self.settings_base_url = self.config.api_base_url.clone();
        self.settings_use_mock = self.config.use_mock_api;
        self.settings_font_scale = self.config.font_scale;
        self.settings_clock_format = self.config.clock_format;
        self.show_settings = true;
    }

    fn update_progress(&mut self, ctx: &egui::Context) {
        let elapsed = self.progress_start.elapsed().as_secs_f32();
        match self.progress_phase {
            ProgressPhase::Idle => {}
            ProgressPhase::FastStart => {
                self.progress = (elapsed / 0.25 * 0.17).min(0.17);
                if elapsed >= 0.25 {
                    self.progress_phase = ProgressPhase::SlowCrawl;
                    self.progress_start = Instant::now();
                }
                ctx.request_repaint();
            }
            ProgressPhase::SlowCrawl => {
                self.progress = 0.17 + (elapsed / 7.5 * 0.33).min(0.33);
                ctx.request_repaint();
            }
            ProgressPhase::Completing => {
                let t = (elapsed / 0.15).min(1.0);
                self.progress = self.progress + (1.0 - self.progress) * t;
                if elapsed >= 0.15 {
                    self.progress = 1.0;
                    self.progress_phase = ProgressPhase::FadingOut;
                    self.progress_start = Instant::now();
                }
                ctx.request_repaint();
            }
            ProgressPhase::FadingOut => {
                if elapsed >= 0.3 {
                    self.progress_phase = ProgressPhase::Idle;
                    self.progress = 0.0;
                }
                ctx.request_repaint();
            }
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(RichText::new(format!("{} Today", egui_phosphor::regular::CALENDAR_CHECK))).clicked() {
                self.calendar.go_to_today();
                self.sync_week();
            }
            if ui.button(egui_phosphor::regular::CARET_LEFT).on_hover_text("Previous week").clicked() {
                self.calendar.go_to_previous_week();
                self.sync_week();
            }
            if ui.button(egui_phosphor::regular::CARET_RIGHT).on_hover_text("Next week").clicked() {
                self.calendar.go_to_next_week();
                self.sync_week();
            }

            ui.add_space(8.0);
            ui.label(RichText::new(self.calendar.month_year_text()).size(18.0).color(Color32::WHITE));
            ui.label(RichText::new(self.calendar.week_range_text()).color(Color32::from_gray(150)));
            if !self.calendar.is_current_week() {
                ui.label(RichText::new("not this week").small().color(Color32::from_gray(110)));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(egui_phosphor::regular::GEAR).on_hover_text("Settings").clicked() {
                    self.open_settings();
                }
                let adding = self.store.loading().is_set(TodoOp::Add);
                if ui.add_enabled(!adding, egui::Button::new(format!("{} Add", egui_phosphor::regular::PLUS))).clicked() {
                    self.open_add_dialog(None, None);
                }
                let fetching = self.store.loading().is_set(TodoOp::Fetch);
                if ui.add_enabled(!fetching, egui::Button::new(egui_phosphor::regular::ARROWS_CLOCKWISE))
                    .on_hover_text("Refresh")
                    .clicked()
                {
                    self.refresh_data();
                }
                if self.store.loading().any() {
                    ui.spinner();
                }
            });
        });
    }

    fn render_sidebar(&mut self, ui: &mut egui::Ui) {
        let week = self.store.todos_by_week();
        let done = self.store.completed_todos().len();
        let open = self.store.on_progress_todos().len();
        let rate = completion_rate(&week);

        ui.add_space(8.0);
        ui.label(RichText::new("This week").strong());
        ui.add(egui::ProgressBar::new(rate as f32 / 100.0).text(format!("{}% done", rate)));
        ui.label(
            RichText::new(format!("{} done, {} open", done, open))
                .small()
                .color(Color32::from_gray(150)),
        );
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label(egui_phosphor::regular::MAGNIFYING_GLASS);
            ui.add(
                egui::TextEdit::singleline(&mut self.store.search_keyword)
                    .hint_text("Search todos")
                    .desired_width(f32::INFINITY),
            );
        });
        ui.separator();

        let groups = self.store.filtered_todos_by_date();
        let action = views::render_todo_list(ui, &groups, self.config.clock_format);

        if let Some(id) = action.toggle {
            self.dispatch(TodoRequest::Toggle(id));
        }
        if let Some(todo) = action.edit {
            self.dialog.open_for_edit(&todo);
        }
        if let Some(todo) = action.delete {
            self.pending_delete = Some(todo);
        }
    }

    fn render_calendar(&mut self, ui: &mut egui::Ui) {
        let days = self.calendar.week_days();

        if let Some(date) = views::render_day_tabs(ui, &days, &self.store) {
            self.calendar.select_date(&date);
        }
        ui.add_space(6.0);

        let result = views::render_week_grid(
            ui,
            &days,
            &self.store,
            self.config.grid_hours(),
            self.config.clock_format,
        );
        if let Some(todo) = result.edit {
            self.dialog.open_for_edit(&todo);
        }
        if let Some((date, start)) = result.add_at {
            self.calendar.select_date(&date);
            self.open_add_dialog(Some(&date), Some(&start));
        }
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let mut save = false;
        let mut cancel = false;
        let loading = self.store.loading();
        let saving = loading.is_set(TodoOp::Add) || loading.is_set(TodoOp::Update);
        let clock_format = self.config.clock_format;

        let (content_bg, frame_color, frame_text) = dialog_colors();
        let dialog_frame = egui::Frame::none()
            .fill(content_bg)
            .stroke(egui::Stroke::new(2.0, frame_color))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(20.0));

        egui::Window::new(self.dialog.title())
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(dialog_frame)
            .show(ctx, |ui| {
                ui.set_min_width(380.0);

                egui::Grid::new("todo_dialog_grid")
                    .num_columns(2)
                    .spacing([20.0, 10.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Name").color(frame_text));
                        let name = ui.add(
                            egui::TextEdit::singleline(&mut self.dialog.draft.name)
                                .hint_text("What needs doing?")
                                .desired_width(260.0),
                        );
                        if name.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            save = true;
                        }
                        ui.end_row();

                        ui.label(RichText::new("Date").color(frame_text));
                        let mut date = self.dialog.draft.date.clone().unwrap_or_default();
                        if ui
                            .add(egui::TextEdit::singleline(&mut date).hint_text("YYYY-MM-DD").desired_width(120.0))
                            .changed()
                        {
                            self.dialog.draft.date = Some(date);
                        }
                        ui.end_row();

                        ui.label(RichText::new("Start").color(frame_text));
                        let start = ui.add(
                            egui::TextEdit::singleline(&mut self.dialog.draft.start_time)
                                .hint_text("HH:MM")
                                .desired_width(80.0),
                        );
                        // Keep the one-hour default when the start moves
                        if start.lost_focus() && self.dialog.target_id().is_none() {
                            self.dialog.draft.end_time = default_end_time(&self.dialog.draft.start_time);
                        }
                        ui.end_row();

                        ui.label(RichText::new("End").color(frame_text));
                        ui.add(
                            egui::TextEdit::singleline(&mut self.dialog.draft.end_time)
                                .hint_text("HH:MM")
                                .desired_width(80.0),
                        );
                        ui.end_row();
                    });

                // Overlap warning against the same day's tasks
                if let Some(date) = self.dialog.draft.date.as_deref() {
                    let clashes = self.store.overlapping(
                        date,
                        &self.dialog.draft.start_time,
                        &self.dialog.draft.end_time,
                        self.dialog.target_id(),
                    );
                    if let Some(other) = clashes.first() {
                        ui.add_space(8.0);
                        ui.label(
                            RichText::new(format!(
                                "{} Overlaps \"{}\" ({} - {})",
                                egui_phosphor::regular::WARNING,
                                other.name,
                                format_clock_time(&other.start_time, clock_format),
                                format_clock_time(&other.end_time, clock_format)
                            ))
                            .color(notice_color(NoticeKind::Warning)),
                        );
                    }
                }

                ui.add_space(20.0);
                ui.horizontal(|ui| {
                    let label = if saving { "Saving..." } else { "Save" };
                    if dialog_button(ui, label, Color32::from_rgb(180, 180, 190), !saving).clicked() {
                        save = true;
                    }
                    if dialog_button(ui, "Cancel", Color32::from_rgb(180, 180, 190), true).clicked() {
                        cancel = true;
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            cancel = true;
        }
        if save && !saving {
            self.save_dialog();
        }
        if cancel {
            self.dialog.close();
        }
    }

    fn render_delete_confirm(&mut self, ctx: &egui::Context) {
        let mut do_delete = false;
        let mut cancel_delete = false;

        let (content_bg, frame_color, _) = dialog_colors();
        let dialog_frame = egui::Frame::none()
            .fill(content_bg)
            .stroke(egui::Stroke::new(2.0, frame_color))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(20.0));

        egui::Window::new("Confirm Delete")
            .collapsible(false)
            .resizable(false)
            .default_width(360.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(dialog_frame)
            .show(ctx, |ui| {
                ui.add_space(10.0);
                if let Some(todo) = &self.pending_delete {
                    ui.label(RichText::new("Delete this todo?").size(14.0));
                    ui.add_space(10.0);
                    ui.add(egui::Label::new(RichText::new(&todo.name).strong()).truncate());
                    ui.label(format!(
                        "{}  {} - {}",
                        todo.date,
                        format_clock_time(&todo.start_time, self.config.clock_format),
                        format_clock_time(&todo.end_time, self.config.clock_format)
                    ));
                }
                ui.add_space(20.0);

                ui.horizontal(|ui| {
                    if dialog_button(ui, "Delete", Color32::from_rgb(224, 108, 117), true).clicked() {
                        do_delete = true;
                    }
                    if dialog_button(ui, "Cancel", Color32::from_rgb(180, 180, 190), true).clicked() {
                        cancel_delete = true;
                    }
                });
            });

        if do_delete {
            if let Some(todo) = self.pending_delete.take() {
                self.dispatch(TodoRequest::Delete(todo.id));
            }
        }
        if cancel_delete {
            self.pending_delete = None;
        }
    }

    fn render_settings(&mut self, ctx: &egui::Context) {
        let mut save = false;
        let mut cancel = false;
        let section_color = Color32::from_rgb(140, 140, 160);

        let (content_bg, frame_color, _) = dialog_colors();
        let dialog_frame = egui::Frame::none()
            .fill(content_bg)
            .stroke(egui::Stroke::new(2.0, frame_color))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(20.0));

        egui::Window::new("Settings")
            .collapsible(false)
            .resizable(false)
            .default_width(480.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(dialog_frame)
            .show(ctx, |ui| {
                // === Backend ===
                ui.label(RichText::new("Backend").color(section_color).strong());
                ui.add_space(8.0);

                egui::Grid::new("backend_grid")
                    .num_columns(2)
                    .spacing([20.0, 10.0])
                    .show(ui, |ui| {
                        ui.label("Source");
                        ui.horizontal(|ui| {
                            ui.radio_value(&mut self.settings_use_mock, true, "Built-in sample data");
                            ui.radio_value(&mut self.settings_use_mock, false, "HTTP server");
                        });
                        ui.end_row();

                        ui.label("Server URL");
                        ui.add_enabled(
                            !self.settings_use_mock,
                            egui::TextEdit::singleline(&mut self.settings_base_url)
                                .hint_text("http://localhost:5173")
                                .desired_width(300.0),
                        );
                        ui.end_row();
                    });

                ui.add_space(20.0);

                // === Display ===
                ui.label(RichText::new("Display").color(section_color).strong());
                ui.add_space(8.0);

                egui::Grid::new("display_grid")
                    .num_columns(2)
                    .spacing([20.0, 10.0])
                    .show(ui, |ui| {
                        ui.label("Font scale");
                        ui.horizontal(|ui| {
                            ui.add(egui::Slider::new(&mut self.settings_font_scale, 0.75..=2.0).show_value(false));
                            ui.label(format!("{:.0}%", self.settings_font_scale * 100.0));
                        });
                        ui.end_row();

                        ui.label("Clock format");
                        ui.horizontal(|ui| {
                            ui.radio_value(&mut self.settings_clock_format, ClockFormat::Hour24, "14:30");
                            ui.radio_value(&mut self.settings_clock_format, ClockFormat::Hour12, "2:30pm");
                        });
                        ui.end_row();
                    });

                ui.add_space(24.0);
                ui.horizontal(|ui| {
                    if dialog_button(ui, "Save", Color32::from_rgb(180, 180, 190), true).clicked() {
                        save = true;
                    }
                    if dialog_button(ui, "Cancel", Color32::from_rgb(180, 180, 190), true).clicked() {
                        cancel = true;
                    }
                });
            });

        if save {
            self.save_settings();
        }
        if cancel {
            self.show_settings = false;
        }
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        let mut dismiss = false;
        ui.horizontal(|ui| {
            match self.status.current() {
                Some((kind, text)) => {
                    ui.label(RichText::new(text).color(notice_color(kind)));
                    let dim_color = Color32::from_rgb(120, 120, 130);
                    let close_btn = ui.add(
                        egui::Label::new(RichText::new(egui_phosphor::regular::X).size(14.0).color(dim_color))
                            .sense(egui::Sense::click()),
                    );
                    if close_btn.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    dismiss = close_btn.clicked();
                }
                None => {
                    if let Some(error) = self.store.last_error() {
                        ui.label(RichText::new(error).color(notice_color(NoticeKind::Error)));
                    } else {
                        ui.label(
                            RichText::new(format!("{} todos", self.store.tasks().len()))
                                .small()
                                .color(Color32::from_gray(110)),
                        );
                    }
                }
            }
        });
        if dismiss {
            self.status.dismiss();
        }
    }
}

/// Flat button with hover fill, matching the dialog frame
fn dialog_button(ui: &mut egui::Ui, text: &str, text_color: Color32, enabled: bool) -> egui::Response {
    let btn_bg = Color32::from_rgb(0x28, 0x28, 0x26);
    let btn_hover = Color32::from_rgb(0x50, 0x50, 0x4a);
    let font_id = egui::FontId::proportional(17.0);
    let padding = egui::vec2(18.0, 10.0);
    let rounding = egui::Rounding::same(6.0);

    let sense = if enabled { egui::Sense::click() } else { egui::Sense::hover() };
    let text_color = if enabled { text_color } else { text_color.gamma_multiply(0.5) };
    let size = ui.fonts(|f| f.layout_no_wrap(text.to_string(), font_id.clone(), text_color).size());
    let (rect, response) = ui.allocate_exact_size(size + padding * 2.0, sense);
    let bg = if enabled && response.hovered() { btn_hover } else { btn_bg };
    ui.painter().rect_filled(rect, rounding, bg);
    ui.painter().text(rect.center(), egui::Align2::CENTER_CENTER, text, font_id, text_color);
    response
}

impl eframe::App for WeekPlanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pinch-to-zoom (trackpad pinch or Ctrl+scroll) drives the font scale
        let zoom_delta = ctx.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 {
            self.config.font_scale = (self.config.font_scale * zoom_delta).clamp(0.75, 2.5);
            if (zoom_delta - 1.0).abs() > 0.01 {
                if let Err(e) = self.config.save() {
                    log::warn!("Failed to save font scale: {:#}", e);
                }
            }
        }
        ctx.set_pixels_per_point(self.config.font_scale);

        self.check_async_results();
        self.update_progress(ctx);

        // Success notices expire on their own
        if let Some((NoticeKind::Success, _)) = self.status.current() {
            ctx.request_repaint_after(NOTICE_TTL);
        }

        if self.dialog.is_open() {
            self.render_dialog(ctx);
        }
        if self.pending_delete.is_some() {
            self.render_delete_confirm(ctx);
        }
        if self.show_settings {
            self.render_settings(ctx);
        }

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(12.0, 8.0)))
            .show(ctx, |ui| {
                // Progress bar at top (fixed height, no layout shift)
                let bar_height = 3.0;
                let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), bar_height), egui::Sense::hover());
                if self.progress_phase != ProgressPhase::Idle && self.progress > 0.0 {
                    let bar_rect = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width() * self.progress, bar_height));
                    let alpha = if self.progress_phase == ProgressPhase::FadingOut {
                        let t = self.progress_start.elapsed().as_secs_f32() / 0.3;
                        ((1.0 - t).max(0.0) * 255.0) as u8
                    } else {
                        255
                    };
                    ui.painter().rect_filled(bar_rect, 0.0, Color32::from_rgba_unmultiplied(255, 255, 255, alpha));
                }
                ui.add_space(4.0);
                self.render_header(ui);
            });

        egui::TopBottomPanel::bottom("status")
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(12.0, 6.0)))
            .show(ctx, |ui| self.render_status(ui));

        egui::SidePanel::right("todo_list")
            .resizable(true)
            .default_width(300.0)
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(12.0, 0.0)))
            .show(ctx, |ui| self.render_sidebar(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(12.0, 0.0)))
            .show(ctx, |ui| self.render_calendar(ui));
    }
}
