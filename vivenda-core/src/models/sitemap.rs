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

use crate::models::locale::Locale;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `<changefreq>` values from the sitemap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

/// One hreflang alternate of a sitemap URL. `hreflang` is either a locale
/// tag or the literal `x-default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternate {
    pub hreflang: String,
    pub href: String,
}

/// A single `<url>` record. Built through [`SitemapEntry::localized`] so the
/// alternates always cover every supported locale plus `x-default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
    pub alternates: Vec<Alternate>,
}

impl SitemapEntry {
    /// Build the entry for `path` as seen under `locale`, with alternates for
    /// every supported locale (declaration order) and a trailing `x-default`
    /// pointing at the default locale. `path` is relative to the locale root
    /// and may be empty for the home page.
    pub fn localized(
        base_url: &str,
        path: &str,
        locale: Locale,
        last_modified: DateTime<Utc>,
        change_frequency: ChangeFrequency,
        priority: f32,
    ) -> Self {
        let mut alternates: Vec<Alternate> = Locale::ALL
            .iter()
            .map(|l| Alternate {
                hreflang: l.as_str().to_string(),
                href: localized_url(base_url, *l, path),
            })
            .collect();
        alternates.push(Alternate {
            hreflang: "x-default".to_string(),
            href: localized_url(base_url, Locale::DEFAULT, path),
        });

        Self {
            url: localized_url(base_url, locale, path),
            last_modified,
            change_frequency,
            priority,
            alternates,
        }
    }
}

/// `{base}/{locale}` for the empty path, `{base}/{locale}/{path}` otherwise.
pub fn localized_url(base_url: &str, locale: Locale, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.is_empty() {
        format!("{}/{}", base, locale.as_str())
    } else {
        format!("{}/{}/{}", base, locale.as_str(), path)
    }
}

/// A hand-authored static page to advertise in the sitemap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticPageSpec {
    /// Path relative to the locale root; empty for the home page.
    pub path: &'static str,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}
