use eframe::egui;

use crate::models::{ExecutiveData, MONTH_NAMES};
use crate::utils;

/// Ranked executives table with per-month detail and a proportional bar for
/// the totals column.
pub fn show_executives(ui: &mut egui::Ui, ejecutivos: &ExecutiveData) {
    ui.heading("🏆 Top Ejecutivos");
    if ejecutivos.ejecutivos.is_empty() {
        ui.label("Sin datos de ejecutivos");
        return;
    }

    let max_total = ejecutivos
        .ejecutivos
        .iter()
        .map(|e| e.total)
        .max()
        .unwrap_or(1)
        .max(1);

    egui::ScrollArea::horizontal().show(ui, |ui| {
        egui::Grid::new("ejecutivos_grid")
            .striped(true)
            .min_col_width(48.0)
            .show(ui, |ui| {
                ui.label(egui::RichText::new("#").strong());
                ui.label(egui::RichText::new("Nombre").strong());
                ui.label(egui::RichText::new("Coordinador").strong());
                for mes in MONTH_NAMES {
                    ui.label(egui::RichText::new(mes).strong());
                }
                ui.label(egui::RichText::new("Total").strong());
                ui.label(egui::RichText::new("Promedio").strong());
                ui.label("");
                ui.end_row();

                for entry in &ejecutivos.ejecutivos {
                    ui.label(entry.posicion.to_string());
                    ui.label(&entry.nombre);
                    ui.label(&entry.coordinador);
                    for value in entry.monthly_values() {
                        ui.label(utils::format_thousands(value));
                    }
                    ui.label(
                        egui::RichText::new(utils::format_thousands(entry.total)).strong(),
                    );
                    ui.label(format!("{:.1}", entry.promedio));
                    total_bar(ui, entry.total, max_total);
                    ui.end_row();
                }
            });
    });
}

fn total_bar(ui: &mut egui::Ui, total: u64, max_total: u64) {
    let (response, painter) = ui.allocate_painter(
        egui::Vec2::new(120.0, 14.0),
        egui::Sense::hover(),
    );
    let rect = response.rect;
    let fraction = total as f32 / max_total as f32;
    let bar = egui::Rect::from_min_size(
        rect.min,
        egui::Vec2::new((rect.width() * fraction).max(2.0), rect.height()),
    );
    painter.rect_filled(bar, 2.0, egui::Color32::from_rgb(102, 126, 234));
}
