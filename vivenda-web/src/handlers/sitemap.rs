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

use crate::sitemap::{build_sitemap, render_xml, SitemapOutcome};
use crate::state::AppState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

/// Serve `/sitemap.xml`. A listing-API failure is logged and the crawler
/// gets the static-only entries; this endpoint never errors outward.
pub async fn sitemap_handler(State(state): State<AppState>) -> Response {
    let outcome = build_sitemap(
        &state.config.base_url,
        state.properties.as_ref(),
        Utc::now(),
    )
    .await;

    if let SitemapOutcome::Degraded { reason, .. } = &outcome {
        tracing::warn!("Serving static-only sitemap: {}", reason);
    }

    let xml = render_xml(outcome.entries());
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        xml,
    )
        .into_response()
}
