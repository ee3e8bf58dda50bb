//! HTTP server for the agency integration endpoints.
//!
//! # API Endpoints
//!
//! | Method | Path                  | Description                            |
//! |--------|-----------------------|----------------------------------------|
//! | GET    | `/health`             | Health check                           |
//! | GET    | `/api/export/works`   | Download work submission file          |
//! | GET    | `/api/export/jingles` | Download jingle inclusion file         |
//! | GET    | `/api/export/members` | Download member enrollment file        |
//! | POST   | `/api/import/works`   | Upload acknowledgment file             |
//! | GET    | `/api/logs`           | SSE stream for activity entries        |

use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::{Multipart, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::ACTIVITY_LOG;
use super::types::{error_response, ImportResponse};
use crate::error::ServerError;
use crate::export::{export_jingles, export_members, export_works, ExportFile};
use crate::import::{parse_acknowledgment_file, reconcile_works};
use crate::store::RegistrationStore;

type SharedStore = Arc<dyn RegistrationStore>;

/// Start the HTTP server over the given registration store.
pub async fn start_server(
    store: SharedStore,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    let app = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/export/works", get(export_works_file))
        .route("/api/export/jingles", get(export_jingles_file))
        .route("/api/export/members", get(export_members_file))
        .route("/api/import/works", post(import_works_file))
        .route("/api/logs", get(sse_logs))
        .layer(cors)
        .with_state(store);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Agencylink server running on http://localhost:{}", port);
    println!("   GET  /api/export/works   - Work submission file");
    println!("   GET  /api/export/jingles - Jingle inclusion file");
    println!("   GET  /api/export/members - Member enrollment file");
    println!("   POST /api/import/works   - Acknowledgment upload");
    println!("   GET  /api/logs           - SSE activity stream");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Export(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(error_response(&self.to_string()))).into_response()
    }
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "agencylink",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "exportWorks": "GET /api/export/works",
            "exportJingles": "GET /api/export/jingles",
            "exportMembers": "GET /api/export/members",
            "importWorks": "POST /api/import/works",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for the activity stream
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = ACTIVITY_LOG.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

async fn export_works_file(State(store): State<SharedStore>) -> Result<Response, ServerError> {
    let file = export_works(store.as_ref())?;
    Ok(download_response(file))
}

async fn export_jingles_file(State(store): State<SharedStore>) -> Result<Response, ServerError> {
    let file = export_jingles(store.as_ref())?;
    Ok(download_response(file))
}

async fn export_members_file(State(store): State<SharedStore>) -> Result<Response, ServerError> {
    let file = export_members(store.as_ref())?;
    Ok(download_response(file))
}

/// Serve an assembled submission file as a named download.
fn download_response(file: ExportFile) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_ENCODING, "utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.contents,
    )
        .into_response()
}

/// Acknowledgment upload endpoint
async fn import_works_file(
    State(store): State<SharedStore>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, ServerError> {
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?
                    .to_vec(),
            );
        }
    }

    let bytes = file_data.ok_or_else(|| ServerError::BadRequest("No file provided".into()))?;

    let file = parse_acknowledgment_file(&bytes)?;
    let report = reconcile_works(store.as_ref(), &file)?;

    Ok(Json(ImportResponse::from(report)))
}
