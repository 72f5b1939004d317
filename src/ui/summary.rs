use eframe::egui;

use crate::models::SalesSummary;
use crate::utils;

/// Header stat cards built from the `/resumen` aggregate.
pub fn show_summary_cards(ui: &mut egui::Ui, resumen: &SalesSummary) {
    ui.heading("Resumen General");
    egui::Grid::new("resumen_grid")
        .striped(true)
        .min_col_width(160.0)
        .show(ui, |ui| {
            ui.label("Total Ventas:");
            right_value(ui, utils::format_thousands(resumen.total_ventas));
            ui.end_row();

            ui.label("Total NAP:");
            right_value(ui, utils::format_thousands(resumen.total_nap.round() as u64));
            ui.end_row();

            ui.label("Promedio Mensual Ventas:");
            right_value(
                ui,
                utils::format_thousands(resumen.promedio_mensual_ventas.round() as u64),
            );
            ui.end_row();

            ui.label("Promedio Mensual NAP:");
            right_value(
                ui,
                utils::format_thousands(resumen.promedio_mensual_nap.round() as u64),
            );
            ui.end_row();

            ui.label("Meses Procesados:");
            right_value(ui, resumen.meses_procesados.to_string());
            ui.end_row();

            ui.label("Última Actualización:");
            right_value(
                ui,
                utils::format_update_timestamp(&resumen.ultima_actualizacion),
            );
            ui.end_row();
        });
}

fn right_value(ui: &mut egui::Ui, text: String) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        ui.label(egui::RichText::new(text).strong());
    });
}
