//! Pie Chart Plotter Module
//! Label-keyed dataset plus 3D-styled pie rendering with the egui painter.

use crate::data::Datum;
use egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Vec2};
use std::f32::consts::TAU;

/// Color palette for slices
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Vertical/horizontal radius ratio giving the tilted 3D look.
const SQUASH: f32 = 0.55;
/// Rim height relative to the vertical radius.
const DEPTH_RATIO: f32 = 0.28;
/// Angular sampling step along arcs, in radians.
const ARC_STEP: f32 = TAU / 128.0;

/// Ordered label→value mapping consumed by the renderers. Setting an
/// existing label overwrites its value in place, keeping the position of
/// the first insertion.
#[derive(Debug, Clone, Default)]
pub struct PieDataset {
    entries: Vec<(String, i64)>,
}

impl PieDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from the loaded data sequence. Duplicate names
    /// collapse to the last value seen.
    pub fn from_data(data: &[Datum]) -> Self {
        let mut dataset = Self::new();
        for datum in data {
            dataset.set_value(&datum.name, datum.value);
        }
        dataset
    }

    pub fn set_value(&mut self, name: &str, value: i64) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name.to_string(), value));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the positive values; the denominator for slice shares.
    pub fn total(&self) -> i64 {
        self.entries.iter().map(|(_, v)| (*v).max(0)).sum()
    }
}

/// Display flags for the pie chart.
#[derive(Debug, Clone, Copy)]
pub struct PieChartOptions {
    pub legend: bool,
    pub tooltips: bool,
}

impl Default for PieChartOptions {
    fn default() -> Self {
        Self {
            legend: false,
            tooltips: true,
        }
    }
}

/// Angular extent of one rendered slice.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SliceArc {
    /// Index into the dataset entries.
    index: usize,
    /// Start angle in radians; 0 is three o'clock, angles grow clockwise.
    start: f32,
    sweep: f32,
}

/// Paints the 3D-styled pie into an egui `Ui`.
pub struct PiePlotter;

impl PiePlotter {
    /// Draw the chart, allocating the remaining panel space.
    pub fn draw(ui: &mut egui::Ui, dataset: &PieDataset, options: PieChartOptions) {
        let desired = Vec2::new(
            ui.available_width().max(240.0),
            ui.available_height().max(220.0),
        );
        let (rect, response) = ui.allocate_exact_size(desired, Sense::hover());
        let painter = ui.painter_at(rect);

        let arcs = Self::slice_arcs(dataset);
        if arcs.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No data",
                FontId::proportional(20.0),
                ui.visuals().weak_text_color(),
            );
            return;
        }

        // Fit 2*ry + rim depth into the rect height.
        let ry = (rect.height() * 0.84 / (2.0 + DEPTH_RATIO)).min(rect.width() * 0.42 * SQUASH);
        let rx = ry / SQUASH;
        let depth = ry * DEPTH_RATIO;
        let center = rect.center() - Vec2::new(0.0, depth / 2.0);

        // Rim first, then the top face over it.
        for arc in &arcs {
            Self::paint_rim(&painter, center, rx, ry, depth, arc);
        }
        for arc in &arcs {
            Self::paint_top(&painter, center, rx, ry, arc);
        }

        if options.tooltips {
            if let Some(arc) = response
                .hover_pos()
                .and_then(|pos| Self::hit_test(pos, center, rx, ry, &arcs))
            {
                let (name, value) = dataset.entries[arc.index].clone();
                let percent = arc.sweep / TAU * 100.0;
                response.on_hover_text(format!("{}: {} ({:.1}%)", name, value, percent));
            }
        }

        if options.legend {
            Self::draw_legend(ui, dataset);
        }
    }

    /// Allocate angular extents clockwise from twelve o'clock, in dataset
    /// order. Non-positive values get no geometry.
    fn slice_arcs(dataset: &PieDataset) -> Vec<SliceArc> {
        let total = dataset.total();
        if total <= 0 {
            return Vec::new();
        }

        let mut arcs = Vec::new();
        let mut start = -TAU / 4.0;
        for (index, (_, value)) in dataset.iter().enumerate() {
            if value <= 0 {
                continue;
            }
            let sweep = value as f32 / total as f32 * TAU;
            arcs.push(SliceArc {
                index,
                start,
                sweep,
            });
            start += sweep;
        }
        arcs
    }

    fn ellipse_point(center: Pos2, rx: f32, ry: f32, angle: f32) -> Pos2 {
        center + Vec2::new(rx * angle.cos(), ry * angle.sin())
    }

    /// Sample [start, start+sweep] densely enough that arcs look smooth.
    fn arc_points(center: Pos2, rx: f32, ry: f32, start: f32, sweep: f32) -> Vec<Pos2> {
        let steps = (sweep / ARC_STEP).ceil().max(1.0) as usize;
        (0..=steps)
            .map(|i| {
                let angle = start + sweep * i as f32 / steps as f32;
                Self::ellipse_point(center, rx, ry, angle)
            })
            .collect()
    }

    /// Top face of a slice: center-fan polygons filled with the slice
    /// color, with white separator edges on top.
    fn paint_top(painter: &egui::Painter, center: Pos2, rx: f32, ry: f32, arc: &SliceArc) {
        let color = PALETTE[arc.index % PALETTE.len()];
        let points = Self::arc_points(center, rx, ry, arc.start, arc.sweep);

        // A fan wider than a quarter turn is no longer convex; fill it in
        // quarter-turn chunks.
        for chunk in points.windows(2).collect::<Vec<_>>().chunks(32) {
            let mut fan = vec![center];
            fan.push(chunk[0][0]);
            fan.extend(chunk.iter().map(|pair| pair[1]));
            painter.add(Shape::convex_polygon(fan, color, Stroke::NONE));
        }

        let separator = Stroke::new(1.5, Color32::WHITE);
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            painter.line_segment([center, *first], separator);
            painter.line_segment([center, *last], separator);
        }
    }

    /// Extruded rim below the outline, visible only along the lower half
    /// of the ellipse.
    fn paint_rim(
        painter: &egui::Painter,
        center: Pos2,
        rx: f32,
        ry: f32,
        depth: f32,
        arc: &SliceArc,
    ) {
        let color = Self::darken(PALETTE[arc.index % PALETTE.len()]);
        let drop = Vec2::new(0.0, depth);
        let points = Self::arc_points(center, rx, ry, arc.start, arc.sweep);

        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            // Lower half in screen coordinates.
            if a.y < center.y && b.y < center.y {
                continue;
            }
            painter.add(Shape::convex_polygon(
                vec![a, b, b + drop, a + drop],
                color,
                Stroke::NONE,
            ));
        }
    }

    fn darken(color: Color32) -> Color32 {
        Color32::from_rgb(
            (color.r() as f32 * 0.6) as u8,
            (color.g() as f32 * 0.6) as u8,
            (color.b() as f32 * 0.6) as u8,
        )
    }

    /// Map a pointer position to the slice under it, if any.
    fn hit_test(pos: Pos2, center: Pos2, rx: f32, ry: f32, arcs: &[SliceArc]) -> Option<SliceArc> {
        let d = pos - center;
        let nx = d.x / rx;
        let ny = d.y / ry;
        if nx * nx + ny * ny > 1.0 {
            return None;
        }

        let angle = ny.atan2(nx);
        arcs.iter()
            .find(|arc| (angle - arc.start).rem_euclid(TAU) < arc.sweep)
            .copied()
    }

    /// Horizontal row of color swatches and labels below the chart.
    fn draw_legend(ui: &mut egui::Ui, dataset: &PieDataset) {
        ui.horizontal_wrapped(|ui| {
            for (index, (name, _)) in dataset.iter().enumerate() {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
                ui.painter()
                    .rect_filled(rect, 3.0, PALETTE[index % PALETTE.len()]);
                ui.label(name);
                ui.add_space(10.0);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Datum;

    fn datum(name: &str, value: i64) -> Datum {
        Datum {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_dataset_preserves_insertion_order() {
        let dataset = PieDataset::from_data(&[datum("C", 3), datum("A", 1), datum("B", 2)]);
        let names: Vec<&str> = dataset.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_dataset_last_write_wins() {
        let dataset = PieDataset::from_data(&[datum("A", 1), datum("B", 2), datum("A", 9)]);
        assert_eq!(dataset.len(), 2);
        let pairs: Vec<(&str, i64)> = dataset.iter().collect();
        assert_eq!(pairs, vec![("A", 9), ("B", 2)]);
    }

    #[test]
    fn test_total_ignores_non_positive() {
        let dataset = PieDataset::from_data(&[datum("A", 10), datum("B", -5), datum("C", 0)]);
        assert_eq!(dataset.total(), 10);
    }

    #[test]
    fn test_slice_arcs_cover_full_circle() {
        let dataset = PieDataset::from_data(&[datum("A", 10), datum("B", 20), datum("C", 10)]);
        let arcs = PiePlotter::slice_arcs(&dataset);
        assert_eq!(arcs.len(), 3);
        let sum: f32 = arcs.iter().map(|a| a.sweep).sum();
        assert!((sum - TAU).abs() < 1e-4);
        assert!((arcs[1].sweep - TAU / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_slice_arcs_skip_non_positive() {
        let dataset = PieDataset::from_data(&[datum("A", 5), datum("B", -1), datum("C", 5)]);
        let arcs = PiePlotter::slice_arcs(&dataset);
        let indices: Vec<usize> = arcs.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_slice_arcs_empty_when_no_positive_values() {
        assert!(PiePlotter::slice_arcs(&PieDataset::new()).is_empty());

        let dataset = PieDataset::from_data(&[datum("A", 0), datum("B", -2)]);
        assert!(PiePlotter::slice_arcs(&dataset).is_empty());
    }

    #[test]
    fn test_hit_test_finds_slice_by_angle() {
        let dataset = PieDataset::from_data(&[datum("A", 1), datum("B", 1)]);
        let arcs = PiePlotter::slice_arcs(&dataset);
        let center = Pos2::new(100.0, 100.0);

        // Right of center: first slice sweeps clockwise from twelve to six.
        let hit = PiePlotter::hit_test(Pos2::new(140.0, 100.0), center, 80.0, 44.0, &arcs);
        assert_eq!(hit.map(|a| a.index), Some(0));

        // Left of center: second slice.
        let hit = PiePlotter::hit_test(Pos2::new(60.0, 100.0), center, 80.0, 44.0, &arcs);
        assert_eq!(hit.map(|a| a.index), Some(1));

        // Outside the ellipse.
        let hit = PiePlotter::hit_test(Pos2::new(200.0, 100.0), center, 80.0, 44.0, &arcs);
        assert_eq!(hit, None);
    }
}
