//! Static Chart Renderer
//! Exports the pie chart to a PNG file with plotters.

use crate::charts::pie::PALETTE;
use crate::charts::PieDataset;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("chart rendering failed: {0}")]
    Backend(String),
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render the dataset as a titled pie chart PNG at `path`.
    pub fn export_png(
        dataset: &PieDataset,
        title: &str,
        path: &Path,
        (width, height): (u32, u32),
    ) -> Result<(), RenderError> {
        let backend = |e: DrawingAreaErrorKind<_>| RenderError::Backend(e.to_string());

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(backend)?;
        let root = root.titled(title, ("sans-serif", 30)).map_err(backend)?;

        let (w, h) = root.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);

        let total = dataset.total();
        if total <= 0 {
            root.draw(&Text::new(
                "No data",
                (center.0 - 40, center.1),
                ("sans-serif", 24),
            ))
            .map_err(backend)?;
            return root.present().map_err(backend);
        }

        let mut sizes: Vec<f64> = Vec::new();
        let mut colors: Vec<RGBColor> = Vec::new();
        let mut labels: Vec<String> = Vec::new();
        for (index, (name, value)) in dataset.iter().enumerate() {
            if value <= 0 {
                continue;
            }
            sizes.push(value as f64);
            let c = PALETTE[index % PALETTE.len()];
            colors.push(RGBColor(c.r(), c.g(), c.b()));
            labels.push(name.to_string());
        }

        let radius = w.min(h) as f64 * 0.36;
        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.label_style(("sans-serif", 20).into_font());
        pie.percentages(("sans-serif", 14).into_font().color(&BLACK));

        root.draw(&pie).map_err(backend)?;
        root.present().map_err(backend)
    }
}
