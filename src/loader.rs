use anyhow::{Result, anyhow};
use crossbeam_channel::{Receiver, Sender, unbounded};
use eframe::egui;
use log::{error, info};
use std::sync::Arc;
use std::thread;

use crate::api::{ApiClient, ApiError};
use crate::models::{ProductData, SalesSnapshot};

/// How many ranked executives to request per load cycle.
pub const TOP_EXECUTIVES: u32 = 15;

/// Messages delivered from worker threads back to the UI thread. Results are
/// all-or-nothing: a failed cycle never carries partial data.
pub enum LoaderMessage {
    Snapshot(Result<SalesSnapshot, String>),
    Products(Result<ProductData, String>),
}

/// Issues the API reads on background threads and hands finished results to
/// the UI over a channel. There is no retry and no cancellation: a reload
/// simply starts a new cycle, and the UI applies whichever result arrives.
pub struct DataLoader {
    client: Arc<ApiClient>,
    tx: Sender<LoaderMessage>,
    rx: Receiver<LoaderMessage>,
}

impl DataLoader {
    pub fn new(client: ApiClient) -> Self {
        let (tx, rx) = unbounded();
        Self {
            client: Arc::new(client),
            tx,
            rx,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Fetch all five endpoints in parallel and deliver one snapshot result.
    pub fn request_full_load(&self, ctx: &egui::Context) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            info!("Starting full data load from {}", client.base_url());
            let result = fetch_snapshot(&client).map_err(|e| unified_message(&e));
            if let Err(msg) = &result {
                error!("Full data load failed: {}", msg);
            }
            let _ = tx.send(LoaderMessage::Snapshot(result));
            ctx.request_repaint();
        });
    }

    /// Refetch only the product breakdown, optionally for a single month.
    pub fn request_products(&self, mes: Option<String>, ctx: &egui::Context) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let result = client
                .productos(mes.as_deref())
                .map_err(|e| unified_message(&anyhow::Error::from(e)));
            if let Err(msg) = &result {
                error!("Product reload failed: {}", msg);
            }
            let _ = tx.send(LoaderMessage::Products(result));
            ctx.request_repaint();
        });
    }

    /// Non-blocking poll, called once per UI frame.
    pub fn try_recv(&self) -> Option<LoaderMessage> {
        self.rx.try_recv().ok()
    }
}

/// Issue the five reads concurrently and wait for all of them. The first
/// failure decides the outcome, but the scope still joins every worker, so a
/// late response can never write into a snapshot from a newer cycle.
fn fetch_snapshot(client: &ApiClient) -> Result<SalesSnapshot> {
    thread::scope(|s| {
        let resumen = s.spawn(|| client.resumen());
        let tendencia = s.spawn(|| client.tendencia());
        let coordinadores = s.spawn(|| client.coordinadores());
        let productos = s.spawn(|| client.productos(None));
        let ejecutivos = s.spawn(|| client.top_ejecutivos(TOP_EXECUTIVES));

        Ok(SalesSnapshot {
            resumen: join_fetch(resumen)?,
            tendencia: join_fetch(tendencia)?,
            coordinadores: join_fetch(coordinadores)?,
            productos: join_fetch(productos)?,
            ejecutivos: join_fetch(ejecutivos)?,
        })
    })
}

fn join_fetch<T>(handle: thread::ScopedJoinHandle<'_, Result<T, ApiError>>) -> Result<T> {
    handle
        .join()
        .map_err(|_| anyhow!("worker panicked"))?
        .map_err(Into::into)
}

/// The UI shows one banner message regardless of the underlying cause.
fn unified_message(err: &anyhow::Error) -> String {
    format!("Error al cargar datos desde la API: {}", err)
}
