use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

pub const ACCENT: Color32 = Color32::from_rgb(19, 152, 244);

/// Font family for filled Phosphor icons
pub fn phosphor_fill_family() -> FontFamily {
    FontFamily::Name("phosphor-fill".into())
}

pub fn setup_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    // Phosphor Regular icons as fallback in the Proportional family
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    // Phosphor Fill as a separate family, with the default UI font as fallback for text
    fonts.font_data.insert(
        "phosphor-fill".into(),
        egui_phosphor::Variant::Fill.font_data(),
    );
    let mut fill_family = vec!["phosphor-fill".to_owned()];
    if let Some(proportional) = fonts.families.get(&FontFamily::Proportional) {
        fill_family.extend(proportional.iter().cloned());
    }
    fonts.families.insert(phosphor_fill_family(), fill_family);

    ctx.set_fonts(fonts);
}

pub fn setup_theme(ctx: &egui::Context) {
    let mut style = Style::default();
    let mut visuals = Visuals::dark();

    let bg = Color32::from_rgb(12, 12, 14);
    visuals.panel_fill = bg;
    visuals.window_fill = bg;
    visuals.faint_bg_color = Color32::from_rgb(22, 22, 26);
    visuals.extreme_bg_color = Color32::BLACK;

    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(40, 40, 44);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(176, 176, 184));

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(52, 52, 58);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(200, 200, 208));

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(76, 76, 84);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.widgets.active.bg_fill = ACCENT;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.selection.bg_fill = ACCENT;
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.hyperlink_color = ACCENT;

    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);
    visuals.widgets.active.rounding = Rounding::same(6.0);
    visuals.window_rounding = Rounding::same(8.0);

    style.visuals = visuals;

    style.text_styles = [
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(20.0);

    ctx.set_style(style);
}

/// Returns (bg_color, border_color, today_color) for day tabs and grid columns
pub fn day_tab_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(12, 12, 14),
        Color32::from_rgb(52, 52, 58),
        ACCENT,
    )
}

/// Returns (day_name_color, number_color) for day tabs
pub fn day_tab_text_colors(is_selected: bool) -> (Color32, Color32) {
    if is_selected {
        (Color32::from_rgb(208, 208, 216), Color32::WHITE)
    } else {
        (Color32::from_rgb(112, 112, 120), Color32::from_rgb(200, 200, 208))
    }
}

/// Returns (fill, text) for a task block in the grid
pub fn task_colors(done: bool) -> (Color32, Color32) {
    if done {
        (Color32::from_rgb(36, 72, 48), Color32::from_rgb(176, 208, 184))
    } else {
        (Color32::from_rgb(16, 88, 150), Color32::WHITE)
    }
}

/// Returns (content_bg, frame_color, frame_text) for dialogs
pub fn dialog_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(12, 12, 14),
        Color32::from_rgb(40, 40, 44),
        Color32::from_rgb(176, 176, 184),
    )
}

/// Returns the text color for a notice
pub fn notice_color(kind: crate::todo::NoticeKind) -> Color32 {
    match kind {
        crate::todo::NoticeKind::Success => Color32::from_rgb(0x65, 0xba, 0x43),
        crate::todo::NoticeKind::Warning => Color32::from_rgb(0xff, 0xb0, 0x00),
        crate::todo::NoticeKind::Error => Color32::from_rgb(0xff, 0x44, 0x44),
    }
}
