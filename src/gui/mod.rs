//! GUI module - application window

mod app;

pub use app::PieChartApp;
