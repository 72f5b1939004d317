//! Painter-drawn chart widgets: multi-series line chart, stacked columns,
//! plain columns, and a clickable donut used by the drill-down view.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use crate::drilldown::SlicePoint;
use crate::utils;

const AXIS_COLOR: Color32 = Color32::from_rgb(226, 232, 240);
const GRID_COLOR: Color32 = Color32::from_rgb(70, 78, 90);
const TEXT_COLOR: Color32 = Color32::from_rgb(160, 174, 192);
const LABEL_FONT: f32 = 10.0;

const MARGIN_LEFT: f32 = 52.0;
const MARGIN_RIGHT: f32 = 10.0;
const MARGIN_TOP: f32 = 18.0;
const MARGIN_BOTTOM: f32 = 22.0;

pub struct Series {
    pub name: String,
    pub color: Color32,
    pub values: Vec<f64>,
}

/// Rounds up to a "nice" axis maximum (1/2/5 × 10^k).
fn nice_ceil(value: f64) -> f64 {
    if value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let normalized = value / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn plot_area(rect: Rect) -> Rect {
    Rect::from_min_max(
        Pos2::new(rect.left() + MARGIN_LEFT, rect.top() + MARGIN_TOP),
        Pos2::new(rect.right() - MARGIN_RIGHT, rect.bottom() - MARGIN_BOTTOM),
    )
}

/// Vertical position of a value against its own axis maximum.
fn value_to_y(plot: Rect, value: f64, y_max: f64) -> f32 {
    plot.bottom() - ((value / y_max) as f32 * plot.height())
}

fn draw_y_grid(painter: &egui::Painter, plot: Rect, y_max: f64) {
    for step in 0..=4 {
        let fraction = step as f32 / 4.0;
        let y = plot.bottom() - plot.height() * fraction;
        painter.line_segment(
            [Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
            Stroke::new(1.0, GRID_COLOR),
        );
        let tick = (y_max * fraction as f64).round() as u64;
        painter.text(
            Pos2::new(plot.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            utils::format_thousands(tick),
            FontId::proportional(LABEL_FONT),
            TEXT_COLOR,
        );
    }
}

fn draw_x_labels(painter: &egui::Painter, plot: Rect, labels: &[String]) {
    if labels.is_empty() {
        return;
    }
    let slot = plot.width() / labels.len() as f32;
    for (i, label) in labels.iter().enumerate() {
        painter.text(
            Pos2::new(plot.left() + slot * (i as f32 + 0.5), plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            label,
            FontId::proportional(LABEL_FONT),
            TEXT_COLOR,
        );
    }
}

fn draw_legend(painter: &egui::Painter, rect: Rect, entries: &[(&str, Color32)]) {
    let mut x = rect.left() + MARGIN_LEFT;
    let y = rect.top() + 4.0;
    for (name, color) in entries {
        painter.circle_filled(Pos2::new(x, y + 4.0), 4.0, *color);
        let galley = painter.text(
            Pos2::new(x + 8.0, y),
            Align2::LEFT_TOP,
            *name,
            FontId::proportional(LABEL_FONT),
            TEXT_COLOR,
        );
        x = galley.right() + 16.0;
    }
}

fn legend_entries(series: &[Series]) -> Vec<(&str, Color32)> {
    series.iter().map(|s| (s.name.as_str(), s.color)).collect()
}

/// Multi-series line chart with point markers and a shared category axis.
pub fn line_chart(ui: &mut egui::Ui, labels: &[String], series: &[Series], height: f32) {
    let width = ui.available_width();
    let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::hover());
    let plot = plot_area(response.rect);

    let y_max = nice_ceil(
        series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max),
    );

    draw_y_grid(&painter, plot, y_max);
    draw_x_labels(&painter, plot, labels);
    draw_legend(&painter, response.rect, &legend_entries(series));

    let n = labels.len();
    if n == 0 {
        return;
    }
    let slot = plot.width() / n as f32;
    for s in series {
        let points: Vec<Pos2> = s
            .values
            .iter()
            .take(n)
            .enumerate()
            .map(|(i, v)| {
                Pos2::new(
                    plot.left() + slot * (i as f32 + 0.5),
                    value_to_y(plot, *v, y_max),
                )
            })
            .collect();
        draw_series_line(&painter, &points, s.color);
    }
}

fn draw_series_line(painter: &egui::Painter, points: &[Pos2], color: Color32) {
    if points.len() > 1 {
        painter.add(egui::Shape::line(points.to_vec(), Stroke::new(2.5, color)));
    }
    for p in points {
        painter.circle_filled(*p, 3.5, color);
    }
}

/// Two series sharing a category axis but plotted against independent
/// y-scales, left and right. Right-hand ticks take the series color so the
/// scales can be told apart.
pub fn dual_axis_line_chart(
    ui: &mut egui::Ui,
    labels: &[String],
    left: &Series,
    right: &Series,
    height: f32,
) {
    let width = ui.available_width();
    let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::hover());
    let mut plot = plot_area(response.rect);
    plot.set_right(plot.right() - 46.0);

    let left_max = nice_ceil(left.values.iter().copied().fold(0.0, f64::max));
    let right_max = nice_ceil(right.values.iter().copied().fold(0.0, f64::max));

    draw_y_grid(&painter, plot, left_max);
    for step in 0..=4 {
        let fraction = step as f32 / 4.0;
        let y = plot.bottom() - plot.height() * fraction;
        let tick = (right_max * fraction as f64).round() as u64;
        painter.text(
            Pos2::new(plot.right() + 6.0, y),
            Align2::LEFT_CENTER,
            utils::format_thousands(tick),
            FontId::proportional(LABEL_FONT),
            right.color,
        );
    }
    draw_x_labels(&painter, plot, labels);
    draw_legend(
        &painter,
        response.rect,
        &[
            (left.name.as_str(), left.color),
            (right.name.as_str(), right.color),
        ],
    );

    let n = labels.len();
    if n == 0 {
        return;
    }
    let slot = plot.width() / n as f32;
    for (s, y_max) in [(left, left_max), (right, right_max)] {
        let points: Vec<Pos2> = s
            .values
            .iter()
            .take(n)
            .enumerate()
            .map(|(i, v)| {
                Pos2::new(
                    plot.left() + slot * (i as f32 + 0.5),
                    value_to_y(plot, *v, y_max),
                )
            })
            .collect();
        draw_series_line(&painter, &points, s.color);
    }
}

/// Stacked column chart, one stack per category, one segment per series.
pub fn stacked_columns(ui: &mut egui::Ui, labels: &[String], series: &[Series], height: f32) {
    let width = ui.available_width();
    let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::hover());
    let plot = plot_area(response.rect);

    let n = labels.len();
    if n == 0 {
        return;
    }
    let stack_totals: Vec<f64> = (0..n)
        .map(|i| {
            series
                .iter()
                .map(|s| s.values.get(i).copied().unwrap_or(0.0))
                .sum()
        })
        .collect();
    let y_max = nice_ceil(stack_totals.iter().copied().fold(0.0, f64::max));

    draw_y_grid(&painter, plot, y_max);
    draw_x_labels(&painter, plot, labels);
    draw_legend(&painter, response.rect, &legend_entries(series));

    let slot = plot.width() / n as f32;
    let bar_width = (slot * 0.6).min(48.0);
    for i in 0..n {
        let x_center = plot.left() + slot * (i as f32 + 0.5);
        let mut y_bottom = plot.bottom();
        for s in series {
            let value = s.values.get(i).copied().unwrap_or(0.0);
            let h = (value / y_max) as f32 * plot.height();
            if h <= 0.0 {
                continue;
            }
            let rect = Rect::from_min_max(
                Pos2::new(x_center - bar_width / 2.0, y_bottom - h),
                Pos2::new(x_center + bar_width / 2.0, y_bottom),
            );
            painter.rect_filled(rect, 2.0, s.color);
            y_bottom -= h;
        }
    }
}

/// Plain columns with the value printed above each bar.
pub fn column_chart(ui: &mut egui::Ui, points: &[(String, f64, Color32)], height: f32) {
    let width = ui.available_width();
    let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::hover());
    let plot = plot_area(response.rect);

    let n = points.len();
    if n == 0 {
        return;
    }
    let y_max = nice_ceil(points.iter().map(|p| p.1).fold(0.0, f64::max));
    let labels: Vec<String> = points.iter().map(|p| p.0.clone()).collect();
    draw_y_grid(&painter, plot, y_max);
    draw_x_labels(&painter, plot, &labels);

    let slot = plot.width() / n as f32;
    let bar_width = (slot * 0.5).min(72.0);
    for (i, (_, value, color)) in points.iter().enumerate() {
        let x_center = plot.left() + slot * (i as f32 + 0.5);
        let h = (value / y_max) as f32 * plot.height();
        let rect = Rect::from_min_max(
            Pos2::new(x_center - bar_width / 2.0, plot.bottom() - h),
            Pos2::new(x_center + bar_width / 2.0, plot.bottom()),
        );
        painter.rect_filled(rect, 4.0, *color);
        painter.text(
            Pos2::new(x_center, plot.bottom() - h - 4.0),
            Align2::CENTER_BOTTOM,
            utils::format_thousands(value.round() as u64),
            FontId::proportional(13.0),
            AXIS_COLOR,
        );
    }
}

/// Donut chart. Returns the index of the slice the user clicked, if any.
/// An empty or all-zero dataset renders as a placeholder, not an error.
pub fn donut_chart(ui: &mut egui::Ui, slices: &[SlicePoint], height: f32) -> Option<usize> {
    let width = ui.available_width();
    let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::click());
    let rect = response.rect;
    let center = rect.center();

    let total: u64 = slices.iter().map(|s| s.value).sum();
    if total == 0 {
        painter.text(
            center,
            Align2::CENTER_CENTER,
            "Sin datos para esta selección",
            FontId::proportional(14.0),
            TEXT_COLOR,
        );
        return None;
    }

    let r_outer = (rect.width().min(rect.height()) / 2.0 - 56.0).max(40.0);
    let r_inner = r_outer * 0.35;
    let fractions: Vec<f64> = slices.iter().map(|s| s.value as f64 / total as f64).collect();

    // Slices start at the top and run clockwise.
    let mut angle = -std::f32::consts::FRAC_PI_2;
    let mut mesh = egui::Mesh::default();
    for (slice, fraction) in slices.iter().zip(&fractions) {
        if *fraction <= 0.0 {
            continue;
        }
        let sweep = (*fraction as f32) * std::f32::consts::TAU;
        ring_segment(&mut mesh, center, r_inner, r_outer, angle, angle + sweep, slice.color);

        let mid = angle + sweep / 2.0;
        let label_pos = center + Vec2::new(mid.cos(), mid.sin()) * (r_outer + 26.0);
        painter.text(
            label_pos,
            Align2::CENTER_CENTER,
            format!("{}\n{:.1}% ({})", slice.name, fraction * 100.0, slice.value),
            FontId::proportional(LABEL_FONT + 1.0),
            AXIS_COLOR,
        );
        angle += sweep;
    }
    painter.add(egui::Shape::mesh(mesh));

    painter.text(
        center,
        Align2::CENTER_CENTER,
        utils::format_thousands(total),
        FontId::proportional(18.0),
        AXIS_COLOR,
    );

    if response.clicked() {
        let pos = response.interact_pointer_pos()?;
        return slice_at(center, pos, r_inner, r_outer, &fractions);
    }
    None
}

/// Appends one donut ring segment to the mesh as a fan of quads.
fn ring_segment(
    mesh: &mut egui::Mesh,
    center: Pos2,
    r_inner: f32,
    r_outer: f32,
    a0: f32,
    a1: f32,
    color: Color32,
) {
    let steps = (((a1 - a0).abs() / 0.05).ceil() as usize).max(1);
    let base = mesh.vertices.len() as u32;
    for i in 0..=steps {
        let t = a0 + (a1 - a0) * i as f32 / steps as f32;
        let dir = Vec2::new(t.cos(), t.sin());
        mesh.colored_vertex(center + dir * r_inner, color);
        mesh.colored_vertex(center + dir * r_outer, color);
    }
    for i in 0..steps as u32 {
        let i0 = base + 2 * i;
        mesh.add_triangle(i0, i0 + 1, i0 + 2);
        mesh.add_triangle(i0 + 1, i0 + 3, i0 + 2);
    }
}

/// Maps a pointer position to the donut slice covering that angle, or None
/// outside the ring.
fn slice_at(
    center: Pos2,
    pos: Pos2,
    r_inner: f32,
    r_outer: f32,
    fractions: &[f64],
) -> Option<usize> {
    let offset = pos - center;
    let radius = offset.length();
    if radius < r_inner || radius > r_outer {
        return None;
    }
    // Angle measured clockwise from the top, matching the draw order.
    let mut angle = offset.y.atan2(offset.x) + std::f32::consts::FRAC_PI_2;
    if angle < 0.0 {
        angle += std::f32::consts::TAU;
    }
    let fraction = angle / std::f32::consts::TAU;

    let mut cumulative = 0.0;
    for (i, f) in fractions.iter().enumerate() {
        cumulative += *f as f32;
        if fraction <= cumulative {
            return Some(i);
        }
    }
    // Floating point edge at the very end of the circle.
    if fractions.is_empty() {
        None
    } else {
        Some(fractions.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_ceil_picks_round_axis_maxima() {
        assert_eq!(nice_ceil(0.0), 1.0);
        assert_eq!(nice_ceil(7.0), 10.0);
        assert_eq!(nice_ceil(13.0), 20.0);
        assert_eq!(nice_ceil(420.0), 500.0);
        assert_eq!(nice_ceil(1000.0), 1000.0);
    }

    #[test]
    fn dual_axis_series_scale_independently() {
        let plot = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 100.0));

        // Each series' maximum reaches the top of its own axis, so a series
        // 2.75x larger than the other is not visually flattened.
        let left_max = nice_ceil(1000.0);
        let right_max = nice_ceil(2750.0);
        assert_eq!(value_to_y(plot, 1000.0, left_max), plot.top());
        assert!(value_to_y(plot, 2750.0, right_max) < plot.center().y);

        // On a shared axis the smaller series would sit in the bottom fifth.
        assert!(value_to_y(plot, 1000.0, right_max) > plot.bottom() - plot.height() * 0.4);
    }

    #[test]
    fn slice_hit_maps_angles_clockwise_from_top() {
        let center = Pos2::new(100.0, 100.0);
        // Four equal slices: top-right, bottom-right, bottom-left, top-left.
        let fractions = [0.25, 0.25, 0.25, 0.25];

        // Straight right (3 o'clock) is inside the first quarter's end.
        let right = Pos2::new(160.0, 100.0);
        assert_eq!(slice_at(center, right, 20.0, 80.0, &fractions), Some(0));

        // Straight down (6 o'clock) starts the second slice.
        let down = Pos2::new(100.0, 160.0);
        assert_eq!(slice_at(center, down, 20.0, 80.0, &fractions), Some(1));

        // Straight left lands in the third slice.
        let left = Pos2::new(40.0, 100.0);
        assert_eq!(slice_at(center, left, 20.0, 80.0, &fractions), Some(2));
    }

    #[test]
    fn slice_hit_ignores_points_outside_the_ring() {
        let center = Pos2::new(0.0, 0.0);
        let fractions = [1.0];
        assert_eq!(
            slice_at(center, Pos2::new(5.0, 0.0), 20.0, 80.0, &fractions),
            None
        );
        assert_eq!(
            slice_at(center, Pos2::new(200.0, 0.0), 20.0, 80.0, &fractions),
            None
        );
    }
}
