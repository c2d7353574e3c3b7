mod app;
mod theme;
mod views;

pub use app::WeekPlanApp;
use theme::{setup_fonts, setup_theme};
