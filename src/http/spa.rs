//! Serving the built single-page app.
//!
//! Requests the proxy did not take end up here:
//!
//! ```text
//! "/" or "/index.html" outside the base  → 302 to "{base}/"
//! "{base}/assets/app.js" (file exists)   → the file
//! any other path under the base          → index document
//! anything else                          → 404
//! ```
//!
//! The app shell decides what an unknown route shows, so the server never
//! answers 404 below the base.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use super::response;
use crate::config::StaticConfig;
use crate::routing::history::strip_base;
use crate::routing::{HistoryMode, RouteTable};

/// Static asset and document fallback for one deployment profile.
#[derive(Clone)]
pub struct SpaService {
    dist_dir: PathBuf,
    index_file: String,
    history: HistoryMode,
    routes: Arc<RouteTable>,
}

impl SpaService {
    pub fn new(config: &StaticConfig, history: HistoryMode, routes: Arc<RouteTable>) -> Self {
        Self {
            dist_dir: PathBuf::from(&config.dist_dir),
            index_file: config.index_file.clone(),
            history,
            routes,
        }
    }

    pub async fn serve(&self, request: Request<Body>) -> Response {
        let method = request.method().clone();
        if method != Method::GET && method != Method::HEAD {
            return StatusCode::METHOD_NOT_ALLOWED.into_response();
        }

        let path = request.uri().path().to_string();
        let base = self.history.base();
        let index_path = format!("/{}", self.index_file);

        let Some(relative) = strip_base(base, &path) else {
            if path == "/" || path == index_path {
                return response::found(&format!("{base}/"));
            }
            return response::not_found();
        };

        let is_document = relative == "/" || relative == index_path;
        if !is_document {
            if let Some(asset) = self.asset(relative, request).await {
                return asset;
            }
        }

        if !is_document && self.unrouted(relative) {
            tracing::debug!(path = %path, "No asset or route for path, serving app shell");
        }
        self.document().await
    }

    /// Web history path the app will render as not found.
    fn unrouted(&self, relative: &str) -> bool {
        match &self.history {
            HistoryMode::Hash { .. } => false,
            HistoryMode::Web { .. } => self.routes.resolve(relative).is_none(),
        }
    }

    /// File under the dist directory, or `None` when there is none.
    async fn asset(&self, relative: &str, request: Request<Body>) -> Option<Response> {
        let (mut parts, body) = request.into_parts();
        parts.uri = Uri::try_from(relative).ok()?;
        let request = Request::from_parts(parts, body);

        let served = match ServeDir::new(&self.dist_dir)
            .append_index_html_on_directories(false)
            .oneshot(request)
            .await
        {
            Ok(response) => response,
            Err(infallible) => match infallible {},
        };

        if served.status() == StatusCode::NOT_FOUND {
            None
        } else {
            Some(served.map(Body::new))
        }
    }

    async fn document(&self) -> Response {
        let index = self.dist_dir.join(&self.index_file);
        match tokio::fs::read(&index).await {
            Ok(bytes) => response::html(bytes),
            Err(e) => {
                tracing::warn!(path = %index.display(), error = %e, "App document not available");
                response::not_found()
            }
        }
    }
}
