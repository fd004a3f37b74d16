//! Charts module - pie chart rendering

mod pie;
mod renderer;

pub use pie::{PieChartOptions, PieDataset, PiePlotter};
pub use renderer::ChartRenderer;
