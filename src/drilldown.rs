use eframe::egui::Color32;

use crate::models::{MONTH_NAMES, SalesSnapshot};

/// Chart palette shared by every drill-down level, applied by result index.
pub const PALETTE: [Color32; 8] = [
    Color32::from_rgb(102, 126, 234),
    Color32::from_rgb(118, 75, 162),
    Color32::from_rgb(240, 147, 251),
    Color32::from_rgb(245, 87, 108),
    Color32::from_rgb(79, 172, 254),
    Color32::from_rgb(0, 242, 254),
    Color32::from_rgb(67, 233, 123),
    Color32::from_rgb(56, 249, 215),
];

/// Deepest level: months of a single executive.
pub const MAX_LEVEL: usize = 3;

const TOP_COORDINATORS: usize = 6;
const TOP_EXECUTIVES: usize = 8;

const LEVEL_ICONS: [&str; 4] = ["🎯", "👥", "👤", "📅"];
const LEVEL_LABELS: [&str; 4] = ["Productos", "Coordinadores", "Ejecutivos", "Meses"];
const LEVEL_SUBTITLES: [&str; 4] = [
    "Participación de ventas por tipo de producto",
    "Ventas por coordinador en este producto",
    "Ventas por ejecutivo en este coordinador",
    "Ventas mensuales de este ejecutivo",
];

/// One slice of the currently displayed level.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicePoint {
    pub name: String,
    pub value: u64,
    pub color: Color32,
}

/// Navigation state for the hierarchical product chart:
/// product → coordinator → executive → month.
///
/// `breadcrumbs.len() == level` holds at all times, and the level moves by
/// exactly one per user action. Datasets are never stored here; they are
/// recomputed from the snapshot and the breadcrumb trail on entry to a level,
/// including when navigating back.
#[derive(Debug, Default)]
pub struct DrillDown {
    level: usize,
    breadcrumbs: Vec<String>,
}

impl DrillDown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn breadcrumbs(&self) -> &[String] {
        &self.breadcrumbs
    }

    pub fn at_root(&self) -> bool {
        self.level == 0
    }

    /// Back to the root product view. Called whenever the snapshot is
    /// replaced or the view is switched away.
    pub fn reset(&mut self) {
        self.level = 0;
        self.breadcrumbs.clear();
    }

    /// Forward transition on a user selection. Returns false at the leaf
    /// level, where selecting a point has no further drill target.
    pub fn select(&mut self, name: &str) -> bool {
        if self.level >= MAX_LEVEL {
            return false;
        }
        self.breadcrumbs.push(name.to_string());
        self.level += 1;
        true
    }

    /// Backward transition. Returns false when already at the root.
    pub fn back(&mut self) -> bool {
        if self.level == 0 {
            return false;
        }
        self.breadcrumbs.pop();
        self.level -= 1;
        true
    }

    /// Chart title carrying a level icon and the breadcrumb trail.
    pub fn title(&self) -> String {
        if self.level == 0 {
            return "🎯 Distribución por Producto".to_string();
        }
        format!(
            "{} {} - {}",
            LEVEL_ICONS[self.level],
            LEVEL_LABELS[self.level],
            self.breadcrumbs.join(" > ")
        )
    }

    pub fn subtitle(&self) -> &'static str {
        LEVEL_SUBTITLES[self.level]
    }

    /// Label for the back affordance, naming the level being returned to.
    pub fn back_label(&self) -> String {
        let target = if self.breadcrumbs.len() > 1 {
            &self.breadcrumbs[self.breadcrumbs.len() - 2]
        } else {
            "Productos"
        };
        format!("⬅ Volver a {}", target)
    }

    /// The dataset for the current level, a pure function of
    /// (snapshot, breadcrumbs).
    pub fn dataset(&self, snapshot: &SalesSnapshot) -> Vec<SlicePoint> {
        let selected = self.breadcrumbs.last().map(String::as_str);
        match (self.level, selected) {
            (0, _) => product_dataset(snapshot),
            (1, Some(producto)) => coordinators_for_product(snapshot, producto),
            (2, Some(coordinador)) => executives_for_coordinator(snapshot, coordinador),
            (3, Some(ejecutivo)) => months_for_executive(snapshot, ejecutivo),
            _ => Vec::new(),
        }
    }
}

/// Level 0: one slice per product, straight from the loaded totals.
fn product_dataset(snapshot: &SalesSnapshot) -> Vec<SlicePoint> {
    colorize(
        snapshot
            .productos
            .productos
            .iter()
            .map(|p| (p.nombre.clone(), p.ventas))
            .collect(),
    )
}

/// The selected product's share of overall product sales, the allocation
/// factor for the coordinator level.
fn product_share(snapshot: &SalesSnapshot, producto: &str) -> f64 {
    let total = snapshot.total_product_sales();
    if total == 0 {
        return 0.0;
    }
    let ventas = snapshot
        .productos
        .productos
        .iter()
        .find(|p| p.nombre == producto)
        .map(|p| p.ventas)
        .unwrap_or(0);
    ventas as f64 / total as f64
}

/// Level 1: the API supplies no per-product coordinator split, so each
/// coordinator's summed monthly total is allocated proportionally to the
/// product's share of overall sales. Top 6 by allocated value.
fn coordinators_for_product(snapshot: &SalesSnapshot, producto: &str) -> Vec<SlicePoint> {
    let share = product_share(snapshot, producto);
    let mut points: Vec<(String, u64)> = snapshot
        .coordinadores
        .coordinadores
        .iter()
        .map(|(nombre, monthly)| {
            let total: u64 = monthly.iter().sum();
            (nombre.clone(), (total as f64 * share).round() as u64)
        })
        .collect();
    sort_descending(&mut points);
    points.truncate(TOP_COORDINATORS);
    colorize(points)
}

/// Level 2: executives whose coordinator (as reported by the API) matches the
/// selection, summed across all months. Top 8.
fn executives_for_coordinator(snapshot: &SalesSnapshot, coordinador: &str) -> Vec<SlicePoint> {
    let mut points: Vec<(String, u64)> = snapshot
        .ejecutivos
        .ejecutivos
        .iter()
        .filter(|e| e.coordinador == coordinador)
        .map(|e| (e.nombre.clone(), e.monthly_sum()))
        .collect();
    sort_descending(&mut points);
    points.truncate(TOP_EXECUTIVES);
    colorize(points)
}

/// Level 3: the executive's real per-month values, calendar order, zero
/// months excluded.
fn months_for_executive(snapshot: &SalesSnapshot, ejecutivo: &str) -> Vec<SlicePoint> {
    let Some(entry) = snapshot
        .ejecutivos
        .ejecutivos
        .iter()
        .find(|e| e.nombre == ejecutivo)
    else {
        return Vec::new();
    };
    colorize(
        MONTH_NAMES
            .iter()
            .zip(entry.monthly_values())
            .filter(|(_, ventas)| *ventas > 0)
            .map(|(mes, ventas)| (mes.to_string(), ventas))
            .collect(),
    )
}

/// Stable descending sort; ties keep the source mapping's insertion order.
fn sort_descending(points: &mut [(String, u64)]) {
    points.sort_by(|a, b| b.1.cmp(&a.1));
}

fn colorize(points: Vec<(String, u64)>) -> Vec<SlicePoint> {
    points
        .into_iter()
        .enumerate()
        .map(|(i, (name, value))| SlicePoint {
            name,
            value,
            color: PALETTE[i % PALETTE.len()],
        })
        .collect()
}
