use eframe::egui;

use crate::app::{DashboardApp, View};
use crate::drilldown::PALETTE;
use crate::models::{NAP_FACTOR, SalesSnapshot};
use crate::ui::charts::{self, Series};
use crate::ui::{drill_panel, executives, summary};
use crate::utils;

const TITLE: &str = "Dashboard Ventas Aprobadas Servicing";

pub fn show_main_panel(ui: &mut egui::Ui, app: &mut DashboardApp) {
    ui.horizontal(|ui| {
        ui.heading(TITLE);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🔄 Recargar").clicked() {
                app.reload(ui.ctx());
            }
            if app.loading {
                ui.spinner();
            }
        });
    });

    if let Some(message) = &app.error_message {
        ui.label(
            egui::RichText::new(format!("⚠ {}", message))
                .color(egui::Color32::from_rgb(245, 87, 108))
                .strong(),
        );
    }

    ui.horizontal(|ui| {
        for (view, label) in [
            (View::General, "📊 General"),
            (View::Products, "🎯 Productos"),
            (View::Trends, "📈 Tendencias"),
            (View::Executives, "🏆 Ejecutivos"),
        ] {
            if ui.selectable_label(app.view == view, label).clicked() {
                app.set_view(view);
            }
        }
    });
    ui.separator();

    if app.snapshot.is_none() {
        if app.loading {
            ui.label("Cargando datos...");
        } else if app.error_message.is_none() {
            ui.label("Sin datos. Presiona Recargar para consultar la API.");
        }
        return;
    }

    match app.view {
        View::General => {
            if let Some(snapshot) = &app.snapshot {
                show_general(ui, snapshot);
            }
        }
        View::Products => {
            let mut event = None;
            if let Some(snapshot) = &app.snapshot {
                event = drill_panel::show_drill_panel(
                    ui,
                    &mut app.drill,
                    &mut app.drill_panel,
                    snapshot,
                    &app.selected_month,
                );
            }
            if let Some(drill_panel::DrillEvent::MonthSelected(mes)) = event {
                app.set_month(mes, ui.ctx());
            }
        }
        View::Trends => {
            if let Some(snapshot) = &app.snapshot {
                show_trends(ui, snapshot);
            }
        }
        View::Executives => {
            if let Some(snapshot) = &app.snapshot {
                executives::show_executives(ui, &snapshot.ejecutivos);
            }
        }
    }
}

fn show_general(ui: &mut egui::Ui, snapshot: &SalesSnapshot) {
    summary::show_summary_cards(ui, &snapshot.resumen);
    ui.separator();

    ui.heading("📈 Ventas por Coordinador");
    ui.label("Evolución mensual de ventas aprobadas");
    charts::line_chart(
        ui,
        &snapshot.coordinadores.labels,
        &coordinator_series(snapshot, 1.0),
        320.0,
    );
    ui.separator();

    ui.heading("💰 NAP por Coordinador");
    ui.label(format!(
        "Nuevos Activos Productivos (Ventas × {})",
        NAP_FACTOR
    ));
    charts::stacked_columns(
        ui,
        &snapshot.coordinadores.labels,
        &coordinator_series(snapshot, NAP_FACTOR),
        320.0,
    );
    ui.separator();

    ui.heading("📈 Tendencia Mensual de Ventas");
    ui.label("Evolución de ventas y NAP durante el año");
    // NAP runs 2.75x above ventas, so each series gets its own y-axis.
    let ventas = Series {
        name: "Ventas".to_string(),
        color: PALETTE[0],
        values: snapshot.tendencia.ventas.iter().map(|v| *v as f64).collect(),
    };
    let nap = Series {
        name: "NAP".to_string(),
        color: PALETTE[3],
        values: snapshot.tendencia.nap.clone(),
    };
    charts::dual_axis_line_chart(ui, &snapshot.tendencia.labels, &ventas, &nap, 320.0);
}

/// One series per coordinator, labelled by first name, optionally scaled
/// (NAP view multiplies the sales counts by `NAP_FACTOR`).
fn coordinator_series(snapshot: &SalesSnapshot, factor: f64) -> Vec<Series> {
    snapshot
        .coordinadores
        .coordinadores
        .iter()
        .enumerate()
        .map(|(i, (nombre, monthly))| Series {
            name: nombre
                .split_whitespace()
                .next()
                .unwrap_or(nombre)
                .to_string(),
            color: PALETTE[i % PALETTE.len()],
            values: monthly
                .iter()
                .map(|v| (*v as f64 * factor).round())
                .collect(),
        })
        .collect()
}

fn show_trends(ui: &mut egui::Ui, snapshot: &SalesSnapshot) {
    ui.heading("📊 Comparativo Trimestral");
    ui.label("Evolución de ventas por trimestre");

    let q1: u64 = snapshot.tendencia.ventas.iter().take(3).sum();
    let q2: u64 = snapshot.tendencia.ventas.iter().skip(3).take(3).sum();
    charts::column_chart(
        ui,
        &[
            ("Q1 (Ene-Mar)".to_string(), q1 as f64, PALETTE[0]),
            ("Q2 (Abr-Jun)".to_string(), q2 as f64, PALETTE[3]),
        ],
        360.0,
    );
    ui.label(format!(
        "Crecimiento: {}",
        utils::variation(q2 as f64, q1 as f64)
    ));
}
