//! HTTP server rendering the patota dashboard
//!
//! Routes are organized into modules:
//! - routes::dashboard: KPI cards, charts, full dashboard page
//! - routes::pending: pending-dues board (page partial + JSON)
//! - routes::session: login gate (shared secret, cookie session)

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use patoweb_config::Config;
use patoweb_core::{Ledger, Session};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::{
        api_categories, api_history, api_series, api_summary, page_dashboard,
    };
    use routes::pending::{api_pending, htmx_pending_list};
    use routes::session::{page_login, post_login, post_logout};

    Router::new()
        // JSON API endpoints
        .route("/api/health", get(health_check))
        .route("/api/summary", get(api_summary))
        .route("/api/pending", get(api_pending))
        .route("/api/series", get(api_series))
        .route("/api/categories", get(api_categories))
        .route("/api/history", get(api_history))
        .route("/api/reload", post(api_reload))
        // Pages
        .route("/", get(page_dashboard))
        .route("/login", get(page_login))
        .route("/login", post(post_login))
        .route("/logout", post(post_logout))
        // HTMX partial routes
        .route("/pendencias/list", get(htmx_pending_list))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Force a snapshot refresh
async fn api_reload(state: axum::extract::State<AppState>) -> String {
    match state.ledger.load().await {
        Ok(_) => r#"{"success": true, "message": "Planilha recarregada"}"#.to_string(),
        Err(e) => format!(r#"{{"success": false, "message": "{}"}}"#, e),
    }
}

// ==================== Session Helpers ====================

/// Build the request's session from its Cookie header
pub fn session_from_headers(config: &Config, headers: &axum::http::HeaderMap) -> Session {
    let cookie_header = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok());
    let expected = config.server.auth.as_ref().map(|a| a.password.as_str());
    Session::from_cookie(cookie_header, expected)
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Patoweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Top header bar with the group name and the refresh date
pub fn header_bar(group_name: &str, show_logout: bool) -> String {
    let today = chrono::Local::now().format("%d/%m/%Y").to_string();
    let logout = if show_logout {
        r#"<form method='post' action='/logout'><button class='text-sm text-gray-500 hover:text-gray-700'>Sair</button></form>"#
    } else {
        ""
    };
    format!(
        r#"<header class='bg-white border-b'>
    <div class='max-w-6xl mx-auto px-6 py-4 flex items-center justify-between'>
        <div class='flex items-center gap-3'>
            <span class='text-2xl'>&#9917;</span>
            <h1 class='text-xl font-bold text-emerald-700'>Painel Financeiro da {}</h1>
        </div>
        <div class='flex items-center gap-4'>
            <span class='text-sm text-gray-500'>Atualizado em: {}</span>
            {}
        </div>
    </div>
</header>"#,
        patoweb_utils::sanitize_html(group_name),
        today,
        logout
    )
}

/// Wrap page content in the base template with the header bar
pub fn page_response(config: &Config, title: &str, inner_content: &str) -> String {
    let content = format!(
        "{}<main class='max-w-6xl mx-auto px-6 py-6'>{}</main>",
        header_bar(&config.display.group_name, config.server.auth.is_some()),
        inner_content
    );
    base_html(title, &content)
}

/// Error banner page shown when the source tables cannot be read
pub fn render_source_error(config: &Config, message: &str) -> String {
    let inner = format!(
        r#"<div class='bg-red-50 border border-red-200 rounded-xl p-8 text-center'>
    <p class='text-3xl mb-3'>&#9888;&#65039;</p>
    <h2 class='text-lg font-bold text-red-700 mb-2'>Sem dados para exibir</h2>
    <p class='text-sm text-red-600'>Não foi possível ler as planilhas de controle. Verifique os arquivos CSV configurados.</p>
    <p class='text-xs text-gray-500 mt-3'>{}</p>
</div>"#,
        patoweb_utils::sanitize_html(message)
    );
    page_response(config, "Sem dados", &inner)
}

/// Start the HTTP server
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `ledger` - The shared ledger state
pub async fn start_server(config: Config, ledger: Arc<Ledger>) {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { ledger, config };

    let router = create_router(state);

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Could not bind {}: {}", addr, e);
            return;
        }
    };
    log::info!("Starting patoweb on http://{}", addr);
    log::info!("Routes: / (dashboard), /pendencias/list (partial), /api/* (JSON)");

    match axum::serve(listener, router).await {
        Ok(_) => log::info!("Server stopped gracefully"),
        Err(e) => log::error!("Server error: {}", e),
    }
}
