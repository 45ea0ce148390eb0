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

use crate::imaging;
use crate::state::AppState;
use anyhow::{anyhow, bail, Context, Result};
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use vivenda_core::models::Locale;

const OG_CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=3600";

/// Serve the Open Graph preview for one property. This endpoint sits on the
/// social-preview rendering path and therefore always answers 200 with an
/// `image/webp` body; every failure degrades to the branded card.
pub async fn og_image_handler(
    State(state): State<AppState>,
    Path((locale, id)): Path<(String, String)>,
) -> Response {
    // An unknown locale segment is coerced rather than rejected.
    let locale = Locale::parse(&locale).unwrap_or(Locale::DEFAULT);

    let bytes = match render_property_card(&state, &id, locale).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(
                property_id = %id,
                locale = %locale,
                "Serving branded OG fallback: {:#}",
                err
            );
            imaging::og_fallback()
        }
    };

    (
        [
            (header::CONTENT_TYPE, "image/webp"),
            (header::CACHE_CONTROL, OG_CACHE_CONTROL),
        ],
        bytes,
    )
        .into_response()
}

async fn render_property_card(state: &AppState, id: &str, locale: Locale) -> Result<Vec<u8>> {
    let property = state
        .properties
        .find_by_id(id, locale)
        .await
        .context("Property lookup failed")?
        .ok_or_else(|| anyhow!("property {} not found", id))?;

    let image_ref = property
        .image
        .ok_or_else(|| anyhow!("property {} has no image", id))?;
    let image_url = absolute_image_url(&state.config.properties_api_url, &image_ref);

    let response = state
        .http
        .get(&image_url)
        .timeout(state.config.og_fetch_timeout)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", image_url))?;
    if !response.status().is_success() {
        bail!("image fetch returned {}", response.status());
    }
    let bytes = response
        .bytes()
        .await
        .context("Failed to read image body")?;

    let decoded = image::load_from_memory(&bytes).context("Failed to decode property image")?;
    let card = imaging::cover_fit(&decoded, imaging::OG_WIDTH, imaging::OG_HEIGHT);
    Ok(imaging::encode_webp(&card, imaging::OG_WEBP_QUALITY))
}

/// Absolute image URLs pass through; relative paths are qualified against
/// the properties API origin.
fn absolute_image_url(api_url: &str, image: &str) -> String {
    if image.starts_with("http://") || image.starts_with("https://") {
        image.to_string()
    } else {
        format!(
            "{}/{}",
            api_url.trim_end_matches('/'),
            image.trim_start_matches('/')
        )
    }
}
