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

use crate::properties_api::PropertySource;
use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use vivenda_core::models::{ChangeFrequency, Locale, SitemapEntry, StaticPageSpec};

/// Listings are paginated in batches of this size.
pub const PAGE_SIZE: u32 = 100;

/// Indexable static pages, in the order they appear in the sitemap. The
/// empty path is the locale home page.
pub const STATIC_PAGES: &[StaticPageSpec] = &[
    StaticPageSpec {
        path: "",
        change_frequency: ChangeFrequency::Daily,
        priority: 1.0,
    },
    StaticPageSpec {
        path: "imoveis",
        change_frequency: ChangeFrequency::Daily,
        priority: 0.9,
    },
    StaticPageSpec {
        path: "luxo",
        change_frequency: ChangeFrequency::Weekly,
        priority: 0.8,
    },
    StaticPageSpec {
        path: "podcast",
        change_frequency: ChangeFrequency::Weekly,
        priority: 0.7,
    },
    StaticPageSpec {
        path: "newsletter",
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.5,
    },
    StaticPageSpec {
        path: "sobre",
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.5,
    },
    StaticPageSpec {
        path: "contato",
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.5,
    },
];

/// Result of one sitemap build. A listing-API failure degrades to the
/// static-only entry set instead of failing the build; the reason is kept
/// so the caller can log it.
#[derive(Debug)]
pub enum SitemapOutcome {
    Complete(Vec<SitemapEntry>),
    Degraded {
        entries: Vec<SitemapEntry>,
        reason: String,
    },
}

impl SitemapOutcome {
    pub fn entries(&self) -> &[SitemapEntry] {
        match self {
            SitemapOutcome::Complete(entries) => entries,
            SitemapOutcome::Degraded { entries, .. } => entries,
        }
    }
}

/// Assemble the full sitemap: static pages first (declaration order x locale
/// order), then every active listing in page/record/locale order.
pub async fn build_sitemap(
    base_url: &str,
    source: &dyn PropertySource,
    now: DateTime<Utc>,
) -> SitemapOutcome {
    let entries = static_entries(base_url, now);

    match listing_entries(base_url, source, now).await {
        Ok(dynamic) => {
            let mut entries = entries;
            entries.extend(dynamic);
            SitemapOutcome::Complete(entries)
        }
        Err(err) => SitemapOutcome::Degraded {
            entries,
            reason: format!("{:#}", err),
        },
    }
}

fn static_entries(base_url: &str, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let mut entries = Vec::with_capacity(STATIC_PAGES.len() * Locale::ALL.len());
    for spec in STATIC_PAGES {
        for locale in Locale::ALL {
            entries.push(SitemapEntry::localized(
                base_url,
                spec.path,
                locale,
                now,
                spec.change_frequency,
                spec.priority,
            ));
        }
    }
    entries
}

/// Walk the listing pages sequentially. The page count is only known once
/// page 1 has been read, so pages cannot be fetched ahead of time.
async fn listing_entries(
    base_url: &str,
    source: &dyn PropertySource,
    now: DateTime<Utc>,
) -> Result<Vec<SitemapEntry>> {
    let mut entries = Vec::new();
    let mut page = 1;

    loop {
        let batch = source.list_active(page, PAGE_SIZE).await?;

        for summary in &batch.items {
            let last_modified = summary.updated_at.unwrap_or(now);
            let path = format!("imoveis/{}", summary.id);
            for locale in Locale::ALL {
                entries.push(SitemapEntry::localized(
                    base_url,
                    &path,
                    locale,
                    last_modified,
                    ChangeFrequency::Weekly,
                    0.6,
                ));
            }
        }

        if page >= batch.total_pages {
            break;
        }
        page += 1;
    }

    Ok(entries)
}

/// Render entries as a sitemap-protocol `<urlset>` with `xhtml:link`
/// alternates per locale.
pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(entries.len() * 512 + 256);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:xhtml="http://www.w3.org/1999/xhtml">"#,
    );
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        for alternate in &entry.alternates {
            xml.push_str(&format!(
                "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>\n",
                escape_xml(&alternate.hreflang),
                escape_xml(&alternate.href)
            ));
        }
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry
                .last_modified
                .to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency.as_str()
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{listing_page, StubPropertySource};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::Ordering;

    const BASE: &str = "https://www.vivenda.com.br";

    fn static_count() -> usize {
        STATIC_PAGES.len() * Locale::ALL.len()
    }

    #[tokio::test]
    async fn test_static_entries_cover_every_page_locale_pair() {
        let source = StubPropertySource::empty();
        let outcome = build_sitemap(BASE, &source, Utc::now()).await;
        let entries = outcome.entries();

        for spec in STATIC_PAGES {
            for locale in Locale::ALL {
                let expected = if spec.path.is_empty() {
                    format!("{}/{}", BASE, locale.as_str())
                } else {
                    format!("{}/{}/{}", BASE, locale.as_str(), spec.path)
                };
                let matching: Vec<_> =
                    entries.iter().filter(|e| e.url == expected).collect();
                assert_eq!(matching.len(), 1, "expected exactly one {}", expected);
                assert_eq!(matching[0].alternates.len(), Locale::ALL.len() + 1);
            }
        }
    }

    #[tokio::test]
    async fn test_listing_entries_follow_static_entries() {
        let source = StubPropertySource::with_pages(vec![listing_page(&["p-1", "p-2"], 1)]);
        let outcome = build_sitemap(BASE, &source, Utc::now()).await;

        let entries = match outcome {
            SitemapOutcome::Complete(entries) => entries,
            SitemapOutcome::Degraded { reason, .. } => panic!("degraded: {}", reason),
        };
        assert_eq!(entries.len(), static_count() + 2 * Locale::ALL.len());

        // Listings come after the statics, record order then locale order.
        let tail = &entries[static_count()..];
        assert_eq!(tail[0].url, format!("{}/pt/imoveis/p-1", BASE));
        assert_eq!(tail[1].url, format!("{}/en/imoveis/p-1", BASE));
        assert_eq!(tail[2].url, format!("{}/fr/imoveis/p-1", BASE));
        assert_eq!(tail[3].url, format!("{}/pt/imoveis/p-2", BASE));
        assert_eq!(tail[0].change_frequency, ChangeFrequency::Weekly);
        assert_eq!(tail[0].priority, 0.6);
    }

    #[tokio::test]
    async fn test_pagination_stops_at_reported_total() {
        let source = StubPropertySource::with_pages(vec![
            listing_page(&["a"], 3),
            listing_page(&["b"], 3),
            listing_page(&["c"], 3),
            listing_page(&["never-fetched"], 3),
        ]);
        let outcome = build_sitemap(BASE, &source, Utc::now()).await;

        assert_eq!(source.list_calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            outcome.entries().len(),
            static_count() + 3 * Locale::ALL.len()
        );
    }

    #[tokio::test]
    async fn test_listing_failure_degrades_to_static_only() {
        let source = StubPropertySource::failing_listing();
        let outcome = build_sitemap(BASE, &source, Utc::now()).await;

        match outcome {
            SitemapOutcome::Degraded { entries, reason } => {
                assert_eq!(entries.len(), static_count());
                assert!(!reason.is_empty());
            }
            SitemapOutcome::Complete(_) => panic!("expected a degraded outcome"),
        }
    }

    #[tokio::test]
    async fn test_listing_uses_updated_at_when_present() {
        let updated = "2025-03-10T08:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let mut page = listing_page(&["p-1"], 1);
        page.items[0].updated_at = Some(updated);
        let source = StubPropertySource::with_pages(vec![page]);

        let now = Utc::now();
        let outcome = build_sitemap(BASE, &source, now).await;
        let entries = outcome.entries();

        let listing = &entries[static_count()];
        assert_eq!(listing.last_modified, updated);
        // Statics always use the build timestamp.
        assert_eq!(entries[0].last_modified, now);
    }

    #[tokio::test]
    async fn test_render_xml_structure() {
        let source = StubPropertySource::with_pages(vec![listing_page(&["p-1"], 1)]);
        let outcome = build_sitemap(BASE, &source, Utc::now()).await;
        let xml = render_xml(outcome.entries());

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"xmlns:xhtml="http://www.w3.org/1999/xhtml""#));
        assert!(xml.contains(&format!("<loc>{}/pt</loc>", BASE)));
        assert!(xml.contains(&format!(
            r#"<xhtml:link rel="alternate" hreflang="x-default" href="{}/pt"/>"#,
            BASE
        )));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.6</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_escape_xml_entities() {
        assert_eq!(
            escape_xml("https://x.test/?a=1&b=<2>"),
            "https://x.test/?a=1&amp;b=&lt;2&gt;"
        );
        assert_eq!(escape_xml(r#"'""#), "&apos;&quot;");
    }
}
