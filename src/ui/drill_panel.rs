use eframe::egui;
use log::info;

use crate::drilldown::{DrillDown, SlicePoint};
use crate::models::SalesSnapshot;
use crate::ui::charts;

/// Emitted when the user picks a different month in the product selector; the
/// app reacts by refetching the product breakdown.
pub enum DrillEvent {
    MonthSelected(Option<String>),
}

/// Cached dataset for the current drill-down level. Recomputed from
/// (snapshot, breadcrumbs) whenever navigation or the snapshot changes.
pub struct DrillPanelState {
    dataset: Vec<SlicePoint>,
    needs_update: bool,
}

impl Default for DrillPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl DrillPanelState {
    pub fn new() -> Self {
        Self {
            dataset: Vec::new(),
            needs_update: true,
        }
    }

    pub fn mark_for_update(&mut self) {
        self.needs_update = true;
    }

    fn dataset(&mut self, drill: &DrillDown, snapshot: &SalesSnapshot) -> Vec<SlicePoint> {
        if self.needs_update {
            self.dataset = drill.dataset(snapshot);
            self.needs_update = false;
        }
        self.dataset.clone()
    }
}

/// Drill-down donut with breadcrumb title, back affordance, and the month
/// selector for the product level.
pub fn show_drill_panel(
    ui: &mut egui::Ui,
    drill: &mut DrillDown,
    state: &mut DrillPanelState,
    snapshot: &SalesSnapshot,
    selected_month: &Option<String>,
) -> Option<DrillEvent> {
    let mut event = None;

    ui.heading(drill.title());
    ui.label(drill.subtitle());
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        if !drill.at_root() {
            if ui.button(drill.back_label()).clicked() && drill.back() {
                state.mark_for_update();
            }
        } else if !snapshot.productos.meses_disponibles.is_empty() {
            ui.label("Mes:");
            let mut selection = selected_month.clone();
            egui::ComboBox::from_id_source("month_selector")
                .selected_text(selection.as_deref().unwrap_or("Todos los meses"))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut selection, None, "Todos los meses");
                    for mes in &snapshot.productos.meses_disponibles {
                        ui.selectable_value(&mut selection, Some(mes.clone()), mes);
                    }
                });
            if selection != *selected_month {
                event = Some(DrillEvent::MonthSelected(selection));
            }
        }
    });

    let dataset = state.dataset(drill, snapshot);
    if let Some(index) = charts::donut_chart(ui, &dataset, 520.0) {
        let point = &dataset[index];
        info!("Drill-down selection: {} ({} ventas)", point.name, point.value);
        if drill.select(&point.name) {
            state.mark_for_update();
        }
    }

    event
}
