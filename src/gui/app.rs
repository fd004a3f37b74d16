//! Pie Chart Application Window
//! Toolbar plus a padded white panel holding the rendered chart.

use crate::charts::{ChartRenderer, PieChartOptions, PieDataset, PiePlotter};
use crate::data::{DataLoader, PieData};
use egui::{CentralPanel, Color32, RichText, TopBottomPanel};
use std::path::PathBuf;
use tracing::{error, info};

/// Main application window. Construction performs the whole load pass;
/// afterwards the egui event loop owns the process until the window is
/// closed.
pub struct PieChartApp {
    source: PathBuf,
    data: PieData,
    dataset: PieDataset,
    options: PieChartOptions,
    status: String,
}

impl PieChartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, source: PathBuf) -> Self {
        let mut app = Self {
            source,
            data: PieData::default(),
            dataset: PieDataset::new(),
            options: PieChartOptions::default(),
            status: String::new(),
        };
        app.reload();
        app
    }

    /// Re-read the current source file. Synchronous; the inputs are a
    /// handful of lines.
    fn reload(&mut self) {
        self.data = DataLoader::load(&self.source);
        self.dataset = PieDataset::from_data(&self.data.data);
        self.status = if self.dataset.is_empty() {
            format!("{}: no data", self.source.display())
        } else {
            format!(
                "{}: {} slice(s)",
                self.source.display(),
                self.dataset.len()
            )
        };
    }

    fn handle_open(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Chart data", &["txt"])
            .pick_file()
        {
            self.source = path;
            self.reload();
        }
    }

    fn handle_export(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name("pie_chart.png")
            .save_file()
        else {
            return; // User cancelled
        };

        match ChartRenderer::export_png(&self.dataset, &self.data.title, &path, (900, 700)) {
            Ok(()) => {
                info!("exported chart to {}", path.display());
                self.status = format!("Exported {}", path.display());
                if let Err(e) = open::that(&path) {
                    error!("cannot open {}: {}", path.display(), e);
                }
            }
            Err(e) => {
                error!("export failed: {}", e);
                self.status = format!("Export error: {}", e);
            }
        }
    }
}

impl eframe::App for PieChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open…").clicked() {
                    self.handle_open();
                }
                if ui.button("Reload").clicked() {
                    self.reload();
                }
                if ui.button("Export PNG…").clicked() {
                    self.handle_export();
                }
                ui.separator();
                ui.label(RichText::new(&self.status).size(12.0).color(Color32::GRAY));
            });
        });

        CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::WHITE).inner_margin(15.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(&self.data.title)
                            .size(22.0)
                            .strong()
                            .color(Color32::BLACK),
                    );
                });
                ui.add_space(8.0);
                PiePlotter::draw(ui, &self.dataset, self.options);
            });
    }
}
