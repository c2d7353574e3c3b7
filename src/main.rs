#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod calendar;
mod config;
mod todo;
mod ui;

use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1200.0, 860.0])
        .with_min_inner_size([900.0, 640.0])
        .with_title("Weekplan");

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Weekplan",
        options,
        Box::new(|cc| Ok(Box::new(ui::WeekPlanApp::new(cc)?))),
    )
}
