use crate::config::{InvoiceConfig, StoreBackend};
use crate::handlers;
use crate::services::{MemoryStore, MongoStore, RecordStore};
use axum::{
    routing::{get, post, put},
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: InvoiceConfig,
    pub store: Arc<dyn RecordStore>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: InvoiceConfig) -> Result<Self, AppError> {
        let store: Arc<dyn RecordStore> = match config.store.backend {
            StoreBackend::Mongodb => {
                let uri = config.store.mongodb_uri.clone().ok_or_else(|| {
                    AppError::ConfigError(anyhow::anyhow!(
                        "MONGODB_URI is required for the mongodb store backend"
                    ))
                })?;
                let store = MongoStore::connect(&uri, &config.store.mongodb_database)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to connect to MongoDB: {}", e);
                        e
                    })?;
                store.initialize_indexes().await.map_err(|e| {
                    tracing::error!("Failed to initialize database indexes: {}", e);
                    e
                })?;
                Arc::new(store)
            }
            StoreBackend::Memory => {
                tracing::info!("Using in-memory record store");
                Arc::new(MemoryStore::new())
            }
        };

        let state = AppState {
            config: config.clone(),
            store,
        };

        let app = Router::new()
            .route("/api/health", get(handlers::health_check))
            .route(
                "/api/company-settings",
                get(handlers::get_settings).post(handlers::save_settings),
            )
            .route(
                "/api/customers",
                get(handlers::list_customers).post(handlers::create_customer),
            )
            .route(
                "/api/customers/:id",
                get(handlers::get_customer)
                    .put(handlers::update_customer)
                    .delete(handlers::delete_customer),
            )
            .route(
                "/api/invoices",
                get(handlers::list_invoices).post(handlers::create_invoice),
            )
            .route(
                "/api/invoices/:id",
                get(handlers::get_invoice)
                    .put(handlers::update_invoice)
                    .delete(handlers::delete_invoice),
            )
            .route("/api/invoices/:id/status", put(handlers::update_invoice_status))
            .route("/api/invoices/:id/pdf", get(handlers::download_invoice_pdf))
            .route("/api/payments", post(handlers::record_payment))
            .route(
                "/api/payments/invoice/:invoice_id",
                get(handlers::list_invoice_payments),
            )
            .route("/api/dashboard/stats", get(handlers::dashboard_stats))
            .route(
                "/api/dashboard/recent-invoices",
                get(handlers::recent_invoices),
            )
            .route("/api/search/customers", get(handlers::search_customers))
            .route("/api/search/invoices", get(handlers::search_invoices))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
