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

use crate::error::AppError;
use crate::imaging;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use url::Url;

const PROXY_CACHE_CONTROL: &str = "public, max-age=86400, s-maxage=86400";

#[derive(Debug, Deserialize)]
pub struct ImageProxyQuery {
    pub url: Option<String>,
}

/// Same-origin image proxy, a diagnostic endpoint: unlike the OG route it
/// surfaces the real failure as a distinct status instead of a placeholder.
/// The host allow-list is checked before any outbound I/O so this cannot be
/// used as an open relay.
pub async fn image_proxy_handler(
    State(state): State<AppState>,
    Query(query): Query<ImageProxyQuery>,
) -> Result<Response, AppError> {
    let raw = query
        .url
        .ok_or_else(|| AppError::bad_request("missing url parameter"))?;

    let url =
        Url::parse(&raw).map_err(|_| AppError::bad_request("url must be an absolute URL"))?;
    let host = url
        .host_str()
        .ok_or_else(|| AppError::bad_request("url has no host"))?
        .to_ascii_lowercase();

    if !state.config.allowed_image_hosts.contains(&host) {
        return Err(AppError::forbidden(format!("host {} is not allowed", host)));
    }

    let response = state
        .http
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::internal_server_error(format!("image fetch failed: {}", e)))?;
    if !response.status().is_success() {
        return Err(AppError::bad_gateway(format!(
            "upstream returned {}",
            response.status()
        )));
    }
    let bytes = response.bytes().await.map_err(|e| {
        AppError::internal_server_error(format!("failed to read image body: {}", e))
    })?;

    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| AppError::internal_server_error(format!("failed to decode image: {}", e)))?;
    let jpeg = imaging::encode_jpeg(&decoded, imaging::PROXY_JPEG_QUALITY)?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/jpeg"),
            (header::CACHE_CONTROL, PROXY_CACHE_CONTROL),
        ],
        jpeg,
    )
        .into_response())
}
