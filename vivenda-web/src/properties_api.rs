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

use anyhow::{Context, Result};
use async_trait::async_trait;
use vivenda_core::models::{Locale, Property, PropertyPage};

/// Read access to the external properties API. The sitemap builder and the
/// OG-image handler only see this trait, so tests stub it without HTTP.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Fetch page `page` (1-based) of active listings, `per_page` at a time.
    async fn list_active(&self, page: u32, per_page: u32) -> Result<PropertyPage>;

    /// Fetch one property by id, localized. `None` when the API reports 404.
    async fn find_by_id(&self, id: &str, locale: Locale) -> Result<Option<Property>>;
}

/// reqwest-backed client for the production properties API.
pub struct PropertiesApi {
    client: reqwest::Client,
    base_url: String,
}

impl PropertiesApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PropertySource for PropertiesApi {
    async fn list_active(&self, page: u32, per_page: u32) -> Result<PropertyPage> {
        let url = format!(
            "{}/properties?status=active&page={}&limit={}",
            self.base_url, page, per_page
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch listing page {}", page))?
            .error_for_status()
            .with_context(|| format!("Listing page {} returned an error status", page))?;

        response
            .json::<PropertyPage>()
            .await
            .with_context(|| format!("Failed to decode listing page {}", page))
    }

    async fn find_by_id(&self, id: &str, locale: Locale) -> Result<Option<Property>> {
        let url = format!("{}/properties/{}?locale={}", self.base_url, id, locale);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch property {}", id))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = response
            .error_for_status()
            .with_context(|| format!("Property {} returned an error status", id))?;

        let property = response
            .json::<Property>()
            .await
            .with_context(|| format!("Failed to decode property {}", id))?;

        Ok(Some(property))
    }
}
