use log::debug;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{CoordinatorData, ExecutiveData, ProductData, SalesSummary, TrendData};

pub const BASE_URL_ENV: &str = "SALESDASH_API_URL";
const DEFAULT_BASE_URL: &str = "http://localhost:5025/api/ventas";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status} for /{path}")]
    Status { status: StatusCode, path: String },
}

/// Thin wrapper over the sales-reporting API. Read-only; all endpoints return
/// pre-aggregated JSON.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL from `SALESDASH_API_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {}", url);
        let response = self.http.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                path: path.to_string(),
            });
        }
        Ok(response.json()?)
    }

    pub fn resumen(&self) -> Result<SalesSummary, ApiError> {
        self.fetch("resumen")
    }

    pub fn tendencia(&self) -> Result<TrendData, ApiError> {
        self.fetch("tendencia")
    }

    pub fn coordinadores(&self) -> Result<CoordinatorData, ApiError> {
        self.fetch("coordinadores")
    }

    /// Product totals, optionally narrowed to a single month.
    pub fn productos(&self, mes: Option<&str>) -> Result<ProductData, ApiError> {
        match mes {
            Some(mes) => self.fetch(&format!("productos/{}", mes)),
            None => self.fetch("productos"),
        }
    }

    pub fn top_ejecutivos(&self, cantidad: u32) -> Result<ExecutiveData, ApiError> {
        self.fetch(&format!("ejecutivos/top/{}", cantidad))
    }
}
