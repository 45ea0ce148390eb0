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
use std::collections::HashSet;
use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://www.vivenda.com.br";
const DEFAULT_API_URL: &str = "https://api.vivenda.com.br";
const DEFAULT_ALLOWED_IMAGE_HOSTS: &str = "vivenda.com.br,www.vivenda.com.br";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Public origin of the site, without trailing slash. Sitemap URLs and
    /// the advertised sitemap location are built from this.
    pub base_url: String,
    /// Origin of the properties REST API; also qualifies relative image
    /// paths returned by it.
    pub properties_api_url: String,
    /// Hosts the image proxy is allowed to fetch from.
    pub allowed_image_hosts: HashSet<String>,
    /// Upper bound on the upstream fetch when rendering an OG image.
    pub og_fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let og_fetch_timeout_secs: u64 = env::var("OG_FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "8".to_string())
            .parse()
            .context("Invalid OG_FETCH_TIMEOUT_SECS")?;

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("Invalid PORT")?,
            base_url: env::var("SITE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            properties_api_url: env::var("PROPERTIES_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            allowed_image_hosts: parse_host_list(
                &env::var("ALLOWED_IMAGE_HOSTS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_IMAGE_HOSTS.to_string()),
            ),
            og_fetch_timeout: Duration::from_secs(og_fetch_timeout_secs),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_host_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|h| h.trim().to_ascii_lowercase())
        .filter(|h| !h.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_host_list_trims_and_lowercases() {
        let hosts = parse_host_list(" Vivenda.com.br , www.vivenda.com.br ,");
        assert_eq!(hosts.len(), 2);
        assert!(hosts.contains("vivenda.com.br"));
        assert!(hosts.contains("www.vivenda.com.br"));
    }

    #[test]
    fn test_parse_host_list_empty_input() {
        assert!(parse_host_list("").is_empty());
        assert!(parse_host_list(" , ,").is_empty());
    }

    #[test]
    fn test_bind_addr_joins_host_and_port() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: DEFAULT_BASE_URL.to_string(),
            properties_api_url: DEFAULT_API_URL.to_string(),
            allowed_image_hosts: parse_host_list(DEFAULT_ALLOWED_IMAGE_HOSTS),
            og_fetch_timeout: Duration::from_secs(8),
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }
}
