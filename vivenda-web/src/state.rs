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

use crate::config::Config;
use crate::properties_api::{PropertiesApi, PropertySource};
use anyhow::{Context, Result};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub properties: Arc<dyn PropertySource>,
    /// Shared outbound client for image fetches. Per-request timeouts are
    /// applied at the call site.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vivenda-web/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let properties = Arc::new(PropertiesApi::new(
            http.clone(),
            config.properties_api_url.clone(),
        ));

        Ok(Self {
            config,
            properties,
            http,
        })
    }

    /// State with an injected property source, for tests and local tooling.
    pub fn with_source(config: Config, properties: Arc<dyn PropertySource>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vivenda-web/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            config,
            properties,
            http,
        })
    }
}
