use std::sync::Arc;
use std::time::Duration;

use klinik_client::{BackendClient, DocumentAnalyzer, OcrClient};

use crate::config::ServerConfig;

/// Shared application state available to all handlers via Axum's `State` extractor.
///
/// Upstream clients share one connection pool. The backend client held here
/// carries no session; handlers scope it to the caller's cookie token with
/// [`BackendClient::with_token`].
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Anonymous client for the primary backend.
    pub backend: BackendClient,
    /// Upload-and-analyze flow over the OCR service.
    pub analyzer: Arc<DocumentAnalyzer<OcrClient>>,
    /// Raw HTTP client used by the pass-through proxies.
    pub http: reqwest::Client,
}

impl AppState {
    /// Build the state and its upstream clients from configuration.
    ///
    /// Panics if the HTTP client cannot be constructed (TLS backend
    /// initialisation failure), which only happens at startup.
    pub fn new(config: ServerConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .expect("Failed to build upstream HTTP client");

        let backend = BackendClient::new(http.clone(), &config.backend_url);
        let analyzer = Arc::new(DocumentAnalyzer::new(OcrClient::new(
            http.clone(),
            config.ocr_url.clone(),
        )));

        Self {
            config: Arc::new(config),
            backend,
            analyzer,
            http,
        }
    }

    /// A backend client acting for the given session token.
    pub fn backend_for(&self, token: Option<&str>) -> BackendClient {
        self.backend.with_token(token)
    }
}
