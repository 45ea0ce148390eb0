// Vivenda - A multilingual real-estate marketing site built with Rust
// Copyright (C) 2025 Vivenda Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use crate::{handlers, AppState};
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/.health", get(health))
        // Crawler surfaces
        .route("/robots.txt", get(handlers::robots_handler))
        .route("/sitemap.xml", get(handlers::sitemap_handler))
        // Image responders
        .route("/og/{locale}/{id}", get(handlers::og_image_handler))
        .route("/api/image-proxy", get(handlers::image_proxy_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

// Health check handler
async fn health() -> &'static str {
    "OK"
}
