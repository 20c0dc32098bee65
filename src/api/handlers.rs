//! API Handlers
//!
//! HTTP request handlers for each sharenv endpoint.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, ConnectInfo, Path, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    Json,
};
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use super::install;
use crate::auth::{client_address, SecretToken};
use crate::cache::{SharedStore, VarStore};
use crate::config::Config;
use crate::models::HealthResponse;
use crate::shell::{render_script, ValueSelector, INVALID_TOKEN_WARNING};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Variable and alias cache, also fed by the watcher task
    pub store: SharedStore,
    /// Random source for multi-value variables
    pub selector: Arc<Mutex<ValueSelector>>,
    /// Secret the export endpoint is guarded by
    pub token: Arc<SecretToken>,
    /// Variables directory as reported by /health
    pub vars_dir: String,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: VarStore, selector: ValueSelector, token: SecretToken) -> Self {
        let vars_dir = store.vars_dir().display().to_string();
        Self {
            store: Arc::new(Mutex::new(store)),
            selector: Arc::new(Mutex::new(selector)),
            token: Arc::new(token),
            vars_dir,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config, token: SecretToken) -> Self {
        let store = VarStore::new(
            config.vars_dir.clone(),
            config.aliases_file.clone(),
            config.cache_ttl(),
        );
        Self::new(store, ValueSelector::from_entropy(), token)
    }

    /// Builds the export script: one value per variable, then aliases.
    pub async fn render(&self) -> String {
        let store = self.store.clone().lock_owned().await;
        let loaded = tokio::task::spawn_blocking(move || {
            let mut store = store;
            let loaded = (store.resolve_all(), store.aliases());
            let stats = store.stats();
            debug!(
                "Cache: {} hits, {} misses, {} invalidations, hit rate {:.2}",
                stats.hits,
                stats.misses,
                stats.invalidations,
                stats.hit_rate()
            );
            loaded
        })
        .await;

        let (candidates, aliases) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                error!("Loading variables failed: {}", e);
                (BTreeMap::new(), Vec::new())
            }
        };

        let mut selector = self.selector.lock().await;
        let vars: BTreeMap<String, String> = candidates
            .iter()
            .filter_map(|(name, values)| {
                selector
                    .select(values)
                    .map(|value| (name.clone(), value.to_string()))
            })
            .collect();

        debug!("Serving {} variables and {} aliases", vars.len(), aliases.len());
        render_script(&vars, &aliases)
    }
}

/// Handler for GET /
///
/// Install instructions: plain text for curl, HTML otherwise.
pub async fn install_handler(headers: HeaderMap) -> Response {
    let endpoint = install::example_endpoint(&headers);
    if install::wants_plain_text(&headers) {
        ([(header::CONTENT_TYPE, TEXT_PLAIN)], install::render_text(&endpoint)).into_response()
    } else {
        Html(install::render_html(&endpoint)).into_response()
    }
}

/// Handler for GET /*token
///
/// Always answers 200 so the caller's `eval` sees valid shell. A wrong or
/// undecodable token gets a single `echo` warning instead of the variables.
pub async fn export_handler(
    State(state): State<AppState>,
    token: std::result::Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    let token = match token {
        Ok(Path(token)) => Some(token),
        Err(rejection) => {
            debug!("Unreadable token in path: {}", rejection);
            None
        }
    };

    if !token.is_some_and(|token| state.token.validate(&token)) {
        let peer = connect_info.map(|ConnectInfo(addr)| addr);
        warn!("Invalid token attempt from {}", client_address(&headers, peer));
        return ([(header::CONTENT_TYPE, TEXT_PLAIN)], INVALID_TOKEN_WARNING).into_response();
    }

    let body = state.render().await;
    ([(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.vars_dir.clone()))
}
