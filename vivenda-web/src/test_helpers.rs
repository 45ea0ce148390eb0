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
use crate::properties_api::PropertySource;
use crate::state::AppState;
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use vivenda_core::models::{Locale, Property, PropertyPage, PropertySummary};

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        base_url: "https://www.vivenda.com.br".to_string(),
        properties_api_url: "https://api.vivenda.com.br".to_string(),
        allowed_image_hosts: HashSet::from([
            "vivenda.com.br".to_string(),
            "www.vivenda.com.br".to_string(),
        ]),
        og_fetch_timeout: Duration::from_secs(8),
    }
}

pub fn listing_page(ids: &[&str], total_pages: u32) -> PropertyPage {
    PropertyPage {
        items: ids
            .iter()
            .map(|id| PropertySummary {
                id: id.to_string(),
                updated_at: None,
            })
            .collect(),
        total_pages,
    }
}

/// In-memory `PropertySource` for tests. Counts listing calls so pagination
/// behavior can be asserted.
pub struct StubPropertySource {
    pub pages: Vec<PropertyPage>,
    pub fail_listing: bool,
    pub property: Option<Property>,
    pub fail_lookup: bool,
    pub list_calls: AtomicU32,
}

impl StubPropertySource {
    pub fn empty() -> Self {
        Self::with_pages(vec![listing_page(&[], 1)])
    }

    pub fn with_pages(pages: Vec<PropertyPage>) -> Self {
        Self {
            pages,
            fail_listing: false,
            property: None,
            fail_lookup: false,
            list_calls: AtomicU32::new(0),
        }
    }

    pub fn failing_listing() -> Self {
        Self {
            fail_listing: true,
            ..Self::with_pages(Vec::new())
        }
    }

    pub fn with_property(property: Property) -> Self {
        Self {
            property: Some(property),
            ..Self::empty()
        }
    }

    pub fn failing_lookup() -> Self {
        Self {
            fail_lookup: true,
            ..Self::empty()
        }
    }
}

#[async_trait]
impl PropertySource for StubPropertySource {
    async fn list_active(&self, page: u32, _per_page: u32) -> Result<PropertyPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            bail!("listing API unavailable");
        }
        self.pages
            .get((page - 1) as usize)
            .cloned()
            .ok_or_else(|| anyhow!("page {} not provisioned", page))
    }

    async fn find_by_id(&self, id: &str, _locale: Locale) -> Result<Option<Property>> {
        if self.fail_lookup {
            bail!("property lookup failed");
        }
        Ok(self.property.iter().find(|p| p.id == id).cloned())
    }
}

pub fn test_state(source: Arc<dyn PropertySource>) -> AppState {
    test_state_with_config(test_config(), source)
}

pub fn test_state_with_config(config: Config, source: Arc<dyn PropertySource>) -> AppState {
    AppState::with_source(config, source).expect("Failed to build test state")
}

/// Serve `router` on an ephemeral local port, as a stand-in for an upstream
/// image origin.
pub async fn spawn_upstream(router: axum::Router) -> Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(addr)
}
