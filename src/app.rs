use eframe::egui;
use log::info;

use crate::api::ApiClient;
use crate::drilldown::DrillDown;
use crate::loader::{DataLoader, LoaderMessage};
use crate::models::SalesSnapshot;
use crate::ui::{DrillPanelState, show_main_panel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    General,
    Products,
    Trends,
    Executives,
}

pub struct DashboardApp {
    pub snapshot: Option<SalesSnapshot>,
    pub loading: bool,
    pub error_message: Option<String>,
    pub view: View,
    pub drill: DrillDown,
    pub drill_panel: DrillPanelState,
    pub selected_month: Option<String>,
    loader: DataLoader,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let loader = DataLoader::new(ApiClient::from_env());
        info!("Sales API base URL: {}", loader.client().base_url());

        let mut app = Self::with_loader(loader);
        app.loading = true;
        app.loader.request_full_load(&cc.egui_ctx);
        app
    }

    fn with_loader(loader: DataLoader) -> Self {
        Self {
            snapshot: None,
            loading: false,
            error_message: None,
            view: View::General,
            drill: DrillDown::new(),
            drill_panel: DrillPanelState::new(),
            selected_month: None,
            loader,
        }
    }

    /// Explicit reload; the only recovery path after a failed load.
    pub fn reload(&mut self, ctx: &egui::Context) {
        self.loading = true;
        self.loader.request_full_load(ctx);
    }

    /// View switch; navigation is discarded when moving between views.
    pub fn set_view(&mut self, view: View) {
        if self.view != view {
            self.view = view;
            self.drill.reset();
            self.drill_panel.mark_for_update();
        }
    }

    /// Month selector change: refetch only the product breakdown.
    pub fn set_month(&mut self, mes: Option<String>, ctx: &egui::Context) {
        self.selected_month = mes.clone();
        self.loading = true;
        self.loader.request_products(mes, ctx);
    }

    /// Applies a finished load cycle. A failure leaves the previous snapshot
    /// (and whatever is currently rendered) untouched.
    fn apply_message(&mut self, message: LoaderMessage) {
        self.loading = false;
        match message {
            LoaderMessage::Snapshot(Ok(snapshot)) => {
                info!(
                    "Snapshot loaded: {} ventas, {} productos, {} ejecutivos",
                    snapshot.resumen.total_ventas,
                    snapshot.productos.productos.len(),
                    snapshot.ejecutivos.ejecutivos.len()
                );
                self.snapshot = Some(snapshot);
                self.error_message = None;
                self.drill.reset();
                self.drill_panel.mark_for_update();
            }
            LoaderMessage::Snapshot(Err(message)) => {
                self.error_message = Some(message);
            }
            LoaderMessage::Products(Ok(productos)) => {
                if let Some(snapshot) = &mut self.snapshot {
                    snapshot.productos = productos;
                }
                self.error_message = None;
                self.drill.reset();
                self.drill_panel.mark_for_update();
            }
            LoaderMessage::Products(Err(message)) => {
                self.error_message = Some(message);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Some(message) = self.loader.try_recv() {
            self.apply_message(message);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    show_main_panel(ui, self);
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CoordinatorData, ExecutiveData, ProductData, ProductEntry, SalesSummary, TrendData,
    };
    use hashlink::LinkedHashMap;

    fn test_app() -> DashboardApp {
        DashboardApp::with_loader(DataLoader::new(ApiClient::new("http://127.0.0.1:9")))
    }

    fn snapshot(total_ventas: u64) -> SalesSnapshot {
        SalesSnapshot {
            resumen: SalesSummary {
                total_ventas,
                total_nap: total_ventas as f64 * 2.75,
                promedio_mensual_ventas: 0.0,
                promedio_mensual_nap: 0.0,
                meses_procesados: 1,
                ultima_actualizacion: "2024-08-01".to_string(),
            },
            tendencia: TrendData {
                labels: vec!["Enero".to_string()],
                ventas: vec![total_ventas],
                nap: vec![total_ventas as f64 * 2.75],
            },
            coordinadores: CoordinatorData {
                labels: vec!["Enero".to_string()],
                coordinadores: LinkedHashMap::new(),
            },
            productos: ProductData {
                mes: None,
                productos: vec![ProductEntry {
                    nombre: "Seguro".to_string(),
                    ventas: total_ventas,
                    porcentaje: 100.0,
                }],
                meses_disponibles: Vec::new(),
            },
            ejecutivos: ExecutiveData {
                ejecutivos: Vec::new(),
            },
        }
    }

    #[test]
    fn failed_reload_preserves_previous_snapshot() {
        let mut app = test_app();
        app.apply_message(LoaderMessage::Snapshot(Ok(snapshot(1000))));
        assert!(app.error_message.is_none());

        app.apply_message(LoaderMessage::Snapshot(Err("Error al cargar".to_string())));

        let kept = app.snapshot.as_ref().expect("snapshot kept");
        assert_eq!(kept.resumen.total_ventas, 1000);
        assert_eq!(app.error_message.as_deref(), Some("Error al cargar"));
        assert!(!app.loading);
    }

    #[test]
    fn successful_load_clears_error_and_resets_navigation() {
        let mut app = test_app();
        app.error_message = Some("stale".to_string());
        app.drill.select("Seguro");

        app.apply_message(LoaderMessage::Snapshot(Ok(snapshot(500))));

        assert!(app.error_message.is_none());
        assert!(app.drill.at_root());
        assert_eq!(app.snapshot.as_ref().unwrap().resumen.total_ventas, 500);
    }

    #[test]
    fn product_refresh_replaces_only_the_product_list() {
        let mut app = test_app();
        app.apply_message(LoaderMessage::Snapshot(Ok(snapshot(1000))));
        app.drill.select("Seguro");

        let productos = ProductData {
            mes: Some("Febrero".to_string()),
            productos: vec![ProductEntry {
                nombre: "Tarjeta".to_string(),
                ventas: 77,
                porcentaje: 100.0,
            }],
            meses_disponibles: Vec::new(),
        };
        app.apply_message(LoaderMessage::Products(Ok(productos)));

        let current = app.snapshot.as_ref().unwrap();
        assert_eq!(current.resumen.total_ventas, 1000);
        assert_eq!(current.productos.productos[0].nombre, "Tarjeta");
        assert_eq!(current.productos.mes.as_deref(), Some("Febrero"));
        assert!(app.drill.at_root());
    }

    #[test]
    fn product_refresh_failure_keeps_old_products() {
        let mut app = test_app();
        app.apply_message(LoaderMessage::Snapshot(Ok(snapshot(1000))));

        app.apply_message(LoaderMessage::Products(Err("sin conexión".to_string())));

        let current = app.snapshot.as_ref().unwrap();
        assert_eq!(current.productos.productos[0].nombre, "Seguro");
        assert_eq!(app.error_message.as_deref(), Some("sin conexión"));
    }

    #[test]
    fn switching_views_resets_drill_down() {
        let mut app = test_app();
        app.apply_message(LoaderMessage::Snapshot(Ok(snapshot(1000))));
        app.set_view(View::Products);
        app.drill.select("Seguro");

        app.set_view(View::General);
        assert!(app.drill.at_root());

        // Selecting the already-active view keeps state.
        app.set_view(View::General);
        assert_eq!(app.view, View::General);
    }
}
