#![cfg(feature = "web")]
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use uuid::Uuid;

use crate::config::{Config, MAX_SESSION_HOURS};
use crate::dashboard::profitability::group_for_view;
use crate::dashboard::{ProfitabilityView, SheetKind, render_tab};
use crate::downloader::{to_csv, to_xlsx};
use crate::error::DashboardError;
use crate::format::format_grouped;
use crate::loader::Workbook;
use crate::page::PageRenderer;
use crate::table::HeaderMode;

const SESSION_COOKIE: &str = "session";
const PROFITABILITY: &str = "Profitability";

/// An uploaded workbook and the time its session stops being valid.
struct SessionEntry {
    workbook: Arc<Workbook>,
    expires_at: SystemTime,
}

/// Shared server state: one uploaded workbook per browser session.
pub struct AppState {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    session_ttl: Duration,
    pages: PageRenderer,
}

impl AppState {
    pub fn new(session_ttl: Duration) -> Result<Self, DashboardError> {
        Ok(AppState {
            sessions: RwLock::new(HashMap::new()),
            session_ttl,
            pages: PageRenderer::new()?,
        })
    }

    /// The session's workbook, or `None` once the session has expired.
    pub fn workbook(&self, session: &str) -> Option<Arc<Workbook>> {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions
            .get(session)
            .filter(|entry| entry.expires_at > SystemTime::now())
            .map(|entry| entry.workbook.clone())
    }

    /// Replaces whatever workbook the session had before and drops expired sessions.
    pub fn store(&self, session: String, workbook: Workbook) {
        let now = SystemTime::now();
        let longest = Duration::from_secs(MAX_SESSION_HOURS * 60 * 60);
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());

        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        if sessions.len() < before {
            debug!("pruned {} expired session(s)", before - sessions.len());
        }

        sessions.insert(
            session,
            SessionEntry {
                workbook: Arc::new(workbook),
                expires_at: now.checked_add(self.session_ttl).unwrap_or(now + longest),
            },
        );
    }

    pub fn session_count(&self) -> usize {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.len()
    }

    pub fn forget(&self, session: &str) -> bool {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.remove(session).is_some()
    }
}

#[derive(Deserialize)]
struct DashboardQuery {
    tab: Option<String>,
    view: Option<String>,
}

#[derive(Deserialize)]
struct ExportQuery {
    tab: Option<String>,
    view: String,
    format: Option<String>,
}

#[derive(Serialize)]
struct SheetSummary {
    name: String,
    kind: SheetKind,
}

#[derive(Serialize)]
struct SheetsResponse {
    workbook: String,
    sheets: Vec<SheetSummary>,
}

/// Builds the router with all dashboard routes and the static file service.
pub fn router(state: Arc<AppState>, config: &Config) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/upload", post(upload_workbook))
        .route("/dashboard", get(serve_dashboard))
        .route("/export", get(export_view))
        .route("/api/sheets", get(list_sheets))
        .route("/reset", post(reset_session))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(state)
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Setup app state
    let app_state = Arc::new(AppState::new(config.session_ttl)?);

    // Build router
    let app = router(app_state, &config);

    // Start server
    let listener = TcpListener::bind(config.addr.as_str()).await?;
    info!("Listening on http://{}", config.addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn current_workbook(state: &AppState, jar: &CookieJar) -> Option<Arc<Workbook>> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| state.workbook(cookie.value()))
}

fn internal_error(e: DashboardError) -> Response {
    error!("{}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}

fn upload_error(state: &AppState, message: &str) -> Response {
    warn!("upload rejected: {}", message);
    match state.pages.upload_page(Some(message)) {
        Ok(html) => (StatusCode::BAD_REQUEST, Html(html)).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn serve_index(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if current_workbook(&state, &jar).is_some() {
        return Redirect::to("/dashboard").into_response();
    }

    match state.pages.upload_page(None) {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn upload_workbook(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Response {
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("workbook") {
                    continue;
                }
                let filename = field.file_name().unwrap_or("upload.xlsx").to_string();
                match field.bytes().await {
                    Ok(bytes) => upload = Some((filename, bytes.to_vec())),
                    Err(e) => {
                        return upload_error(&state, &format!("Could not read upload: {}", e));
                    }
                }
            }
            Ok(None) => break,
            Err(e) => return upload_error(&state, &format!("Could not read upload: {}", e)),
        }
    }

    let Some((filename, bytes)) = upload else {
        return upload_error(&state, "No file received. Please choose an .xlsx workbook.");
    };
    if !filename.to_lowercase().ends_with(".xlsx") {
        return upload_error(&state, "Only .xlsx workbooks are supported.");
    }
    if bytes.is_empty() {
        return upload_error(&state, "The uploaded file is empty.");
    }

    // Parsing is CPU bound; keep it off the async workers
    let parsed = tokio::task::spawn_blocking(move || Workbook::from_bytes(filename, bytes)).await;
    let workbook = match parsed {
        Ok(Ok(workbook)) => workbook,
        Ok(Err(e)) => return upload_error(&state, &format!("Could not read workbook: {}", e)),
        Err(e) => {
            error!("workbook parser task failed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Could not read workbook").into_response();
        }
    };

    let session_id = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    info!(
        "session {} uploaded '{}' with {} sheet(s)",
        session_id,
        workbook.name,
        workbook.sheets().len()
    );
    state.store(session_id.clone(), workbook);

    let mut cookie = Cookie::new(SESSION_COOKIE, session_id);
    cookie.set_path("/");
    cookie.set_http_only(true);

    (jar.add(cookie), Redirect::to("/dashboard")).into_response()
}

async fn serve_dashboard(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<DashboardQuery>,
) -> Response {
    let Some(workbook) = current_workbook(&state, &jar) else {
        return Redirect::to("/").into_response();
    };

    // Unknown or missing tabs fall back to the first sheet
    let tab = params
        .tab
        .filter(|name| workbook.sheet(name).is_some())
        .or_else(|| workbook.sheets().first().map(|sheet| sheet.name.clone()))
        .unwrap_or_default();
    let view = params
        .view
        .as_deref()
        .and_then(ProfitabilityView::from_label)
        .unwrap_or_default();

    let rendered = render_tab(&workbook, &tab, view)
        .and_then(|tab_view| state.pages.dashboard_page(&workbook, &tab_view));
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(DashboardError::SheetNotFound(name)) => {
            (StatusCode::NOT_FOUND, format!("Sheet not found: {}", name)).into_response()
        }
        Err(e) => internal_error(e),
    }
}

async fn export_view(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<ExportQuery>,
) -> Response {
    let Some(workbook) = current_workbook(&state, &jar) else {
        return Redirect::to("/").into_response();
    };

    if params.tab.as_deref().is_some_and(|tab| tab != PROFITABILITY) {
        return (StatusCode::NOT_FOUND, "Only Profitability views can be exported").into_response();
    }
    let Some(view) = ProfitabilityView::from_label(&params.view) else {
        return (StatusCode::NOT_FOUND, format!("Unknown view: {}", params.view)).into_response();
    };
    let Some(config) = view.config() else {
        return (StatusCode::NOT_FOUND, format!("Nothing to export for {}", view)).into_response();
    };
    let Some(sheet) = workbook.sheet(PROFITABILITY) else {
        return (StatusCode::NOT_FOUND, "No Profitability sheet in this workbook").into_response();
    };
    let table = match sheet.table(HeaderMode::FirstRow) {
        Ok(table) => table,
        Err(message) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Could not read Profitability sheet: {}", message),
            )
                .into_response();
        }
    };
    let Some(grouped) = group_for_view(&table, &config) else {
        return (
            StatusCode::NOT_FOUND,
            format!("No '{}' column found in your data.", config.axis),
        )
            .into_response();
    };

    let stem = view.label().to_lowercase().replace(' ', "_");
    match params.format.as_deref().unwrap_or("csv") {
        "csv" => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}.csv\"", stem),
                ),
            ],
            to_csv(&format_grouped(&grouped)),
        )
            .into_response(),
        "xlsx" => match to_xlsx(&grouped) {
            Ok(bytes) => (
                [
                    (
                        header::CONTENT_TYPE,
                        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                            .to_string(),
                    ),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}.xlsx\"", stem),
                    ),
                ],
                bytes,
            )
                .into_response(),
            Err(e) => internal_error(e),
        },
        other => (
            StatusCode::BAD_REQUEST,
            format!("Unsupported export format: {}", other),
        )
            .into_response(),
    }
}

async fn list_sheets(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let Some(workbook) = current_workbook(&state, &jar) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "no workbook uploaded" })),
        )
            .into_response();
    };

    Json(SheetsResponse {
        workbook: workbook.name.clone(),
        sheets: workbook
            .sheet_names()
            .into_iter()
            .map(|name| SheetSummary {
                name: name.to_string(),
                kind: SheetKind::from_name(name),
            })
            .collect(),
    })
    .into_response()
}

async fn reset_session(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if state.forget(cookie.value()) {
            info!("session {} cleared", cookie.value());
        }
    }
    Redirect::to("/").into_response()
}
