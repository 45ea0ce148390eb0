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

use crate::state::AppState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

/// Path prefixes crawlers must stay out of: the back-office, internal and
/// public API surfaces, framework internals and leftover CMS paths still
/// hit by old crawl queues.
const DISALLOWED_PREFIXES: &[&str] = &[
    "/admin/",
    "/internal-api/",
    "/api/",
    "/_next/",
    "/wp-admin/",
    "/wp-login.php",
];

pub async fn robots_handler(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_robots(&state.config.base_url),
    )
        .into_response()
}

pub fn render_robots(base_url: &str) -> String {
    let mut body = String::from("User-agent: *\n");
    for prefix in DISALLOWED_PREFIXES {
        body.push_str(&format!("Disallow: {}\n", prefix));
    }
    body.push_str("Allow: /\n");
    body.push_str(&format!("\nSitemap: {}/sitemap.xml\n", base_url));
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use crate::test_helpers::{test_state, StubPropertySource};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn test_render_robots_policy() {
        let body = render_robots("https://www.vivenda.com.br");

        assert!(body.starts_with("User-agent: *\n"));
        for prefix in DISALLOWED_PREFIXES {
            assert!(body.contains(&format!("Disallow: {}\n", prefix)));
        }
        assert!(body.contains("Allow: /\n"));
        assert!(body.ends_with("Sitemap: https://www.vivenda.com.br/sitemap.xml\n"));
    }

    #[tokio::test]
    async fn test_robots_endpoint_serves_plain_text() {
        let source = Arc::new(StubPropertySource::empty());
        let server = TestServer::new(create_router(test_state(source))).unwrap();

        let response = server.get("/robots.txt").await;
        response.assert_status(StatusCode::OK);
        assert_eq!(
            response.header("content-type").to_str().unwrap(),
            "text/plain; charset=utf-8"
        );
        assert!(response.text().contains("Disallow: /admin/"));
    }
}
