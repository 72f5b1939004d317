use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

/// Month labels in calendar order, matching the per-month fields the API
/// exposes on each executive entry.
pub const MONTH_NAMES: [&str; 7] = [
    "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio", "Julio",
];

/// NAP ("Nuevos Activos Productivos") is derived from the sales count in the
/// coordinator breakdown view.
pub const NAP_FACTOR: f64 = 2.75;

/// `GET /resumen`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_ventas: u64,
    pub total_nap: f64,
    pub promedio_mensual_ventas: f64,
    pub promedio_mensual_nap: f64,
    pub meses_procesados: u32,
    pub ultima_actualizacion: String,
}

/// `GET /tendencia`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendData {
    pub labels: Vec<String>,
    pub ventas: Vec<u64>,
    pub nap: Vec<f64>,
}

/// `GET /coordinadores` — one monthly series per coordinator.
///
/// The map keeps the JSON object's insertion order; downstream sorts rely on
/// it to break ties deterministically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorData {
    pub labels: Vec<String>,
    pub coordinadores: LinkedHashMap<String, Vec<u64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEntry {
    pub nombre: String,
    pub ventas: u64,
    pub porcentaje: f64,
}

/// `GET /productos` or `GET /productos/{mes}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    #[serde(default)]
    pub mes: Option<String>,
    pub productos: Vec<ProductEntry>,
    #[serde(default)]
    pub meses_disponibles: Vec<String>,
}

/// `GET /ejecutivos/top/{n}` — ranked executives with real per-month values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutiveEntry {
    pub posicion: u32,
    pub nombre: String,
    pub coordinador: String,
    pub enero: u64,
    pub febrero: u64,
    pub marzo: u64,
    pub abril: u64,
    pub mayo: u64,
    pub junio: u64,
    pub julio: u64,
    pub total: u64,
    pub promedio: f64,
}

impl ExecutiveEntry {
    /// Per-month values in calendar order, paired with `MONTH_NAMES`.
    pub fn monthly_values(&self) -> [u64; 7] {
        [
            self.enero,
            self.febrero,
            self.marzo,
            self.abril,
            self.mayo,
            self.junio,
            self.julio,
        ]
    }

    pub fn monthly_sum(&self) -> u64 {
        self.monthly_values().iter().sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutiveData {
    pub ejecutivos: Vec<ExecutiveEntry>,
}

/// The loaded API response set. Immutable once loaded; the loader replaces it
/// wholesale on every successful refresh cycle.
#[derive(Debug, Clone)]
pub struct SalesSnapshot {
    pub resumen: SalesSummary,
    pub tendencia: TrendData,
    pub coordinadores: CoordinatorData,
    pub productos: ProductData,
    pub ejecutivos: ExecutiveData,
}

impl SalesSnapshot {
    /// Sum of all product totals, the denominator for drill-down allocation.
    pub fn total_product_sales(&self) -> u64 {
        self.productos.productos.iter().map(|p| p.ventas).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_summary() {
        let json = r#"{
            "totalVentas": 5796,
            "totalNap": 15939.0,
            "promedioMensualVentas": 828.0,
            "promedioMensualNap": 2277.0,
            "mesesProcesados": 7,
            "ultimaActualizacion": "2024-08-01T12:00:00Z"
        }"#;
        let resumen: SalesSummary = serde_json::from_str(json).unwrap();
        assert_eq!(resumen.total_ventas, 5796);
        assert_eq!(resumen.meses_procesados, 7);
    }

    #[test]
    fn coordinator_map_preserves_insertion_order() {
        let json = r#"{
            "labels": ["Enero", "Febrero"],
            "coordinadores": {
                "Priscilla Gutierrez": [361, 365],
                "Dayana Flores": [371, 278],
                "Maria Jose Ortiz": [278, 191]
            }
        }"#;
        let data: CoordinatorData = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = data.coordinadores.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            ["Priscilla Gutierrez", "Dayana Flores", "Maria Jose Ortiz"]
        );
    }

    #[test]
    fn deserializes_products_without_month_filter() {
        let json = r#"{
            "productos": [
                {"nombre": "Seguro", "ventas": 400, "porcentaje": 40.0},
                {"nombre": "Tarjeta", "ventas": 600, "porcentaje": 60.0}
            ]
        }"#;
        let data: ProductData = serde_json::from_str(json).unwrap();
        assert!(data.mes.is_none());
        assert!(data.meses_disponibles.is_empty());
        assert_eq!(data.productos.len(), 2);
    }

    #[test]
    fn executive_monthly_values_are_calendar_ordered() {
        let json = r#"{
            "posicion": 1,
            "nombre": "Andrea Poblete",
            "coordinador": "Priscilla Gutierrez",
            "enero": 90, "febrero": 98, "marzo": 82, "abril": 63,
            "mayo": 0, "junio": 33, "julio": 28,
            "total": 394,
            "promedio": 56.3
        }"#;
        let entry: ExecutiveEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.monthly_values(), [90, 98, 82, 63, 0, 33, 28]);
        assert_eq!(entry.monthly_sum(), 394);
    }
}
