//! CS.MONEY wiki: canonical item name and quality tiers.

use std::collections::BTreeSet;

use async_trait::async_trait;
use regex::Regex;
use url::Url;

use crate::adapter::outbound::http::HttpSource;
use crate::domain::SkinIdentity;
use crate::error::{Error, Result};
use crate::port::{Fetcher, Normalizer, RawDocument};
use crate::stream::StreamWriter;

const SOURCE: &str = "csmoney-wiki";

/// Fetches the single wiki page of an item.
pub struct WikiFetcher {
    http: HttpSource,
    url: Url,
}

impl WikiFetcher {
    #[must_use]
    pub const fn new(http: HttpSource, url: Url) -> Self {
        Self { http, url }
    }
}

#[async_trait]
impl Fetcher for WikiFetcher {
    async fn fetch(&self, out: &StreamWriter<RawDocument>) -> Result<()> {
        let page = self.http.get_text(self.url.as_str()).await?;
        out.put(RawDocument::Html(page)).await?;
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        SOURCE
    }
}

/// Reads the item name from `<title>` and quality tiers from `<th>` cells.
///
/// A page with no title or no table headings names no known item.
pub struct WikiNormalizer {
    title: Regex,
    heading: Regex,
    tag: Regex,
}

impl WikiNormalizer {
    pub fn new() -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            title: Regex::new(r"(?is)<title[^>]*>(.*?)</title>")?,
            heading: Regex::new(r"(?is)<th[^>]*>(.*?)</th>")?,
            tag: Regex::new(r"(?s)<[^>]*>")?,
        })
    }

    fn texts(&self, pattern: &Regex, html: &str) -> Vec<String> {
        pattern
            .captures_iter(html)
            .filter_map(|c| c.get(1))
            .map(|m| self.plain_text(m.as_str()))
            .collect()
    }

    fn plain_text(&self, fragment: &str) -> String {
        let stripped = self.tag.replace_all(fragment, "");
        decode_entities(&stripped)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl Normalizer for WikiNormalizer {
    type Output = SkinIdentity;

    async fn normalize(&self, document: RawDocument) -> Result<Vec<SkinIdentity>> {
        let RawDocument::Html(html) = document else {
            return Err(Error::malformed(SOURCE, "expected an HTML page"));
        };

        let titles = self.texts(&self.title, &html);
        let headings = self.texts(&self.heading, &html);
        let (Some(title), false) = (titles.first(), headings.is_empty()) else {
            return Err(Error::NameResolution(
                "wiki page has no item title or quality table".into(),
            ));
        };

        let (item_class, pattern) = split_title(title)
            .ok_or_else(|| Error::NameResolution(format!("unrecognized wiki title '{title}'")))?;

        let qualities: BTreeSet<String> = headings.into_iter().filter(|h| !h.is_empty()).collect();

        Ok(vec![SkinIdentity {
            item_class,
            pattern,
            qualities: qualities.into_iter().collect(),
        }])
    }

    fn source_name(&self) -> &'static str {
        SOURCE
    }
}

/// `"AK-47 | Redline — CS.MONEY Wiki"` → `("AK-47", "Redline")`.
fn split_title(title: &str) -> Option<(String, String)> {
    let name = title.split('—').next().unwrap_or(title);
    let (class, pattern) = name.split_once('|')?;
    let (class, pattern) = (class.trim(), pattern.trim());
    if class.is_empty() || pattern.is_empty() {
        return None;
    }
    Some((class.to_string(), pattern.to_string()))
}

fn decode_entities(text: &str) -> String {
    text.replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&quot;", "\"")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head>
        <title>AK-47 | Redline — CS.MONEY Wiki</title></head><body>
        <table><tr><th>Field-Tested</th><th><span>Minimal Wear</span></th><th></th></tr>
        <tr><th>Field-Tested</th><th>Well-Worn</th></tr></table></body></html>"#;

    #[tokio::test]
    async fn extracts_name_and_deduplicated_qualities() {
        let identities = WikiNormalizer::new()
            .unwrap()
            .normalize(RawDocument::Html(PAGE.into()))
            .await
            .unwrap();

        assert_eq!(
            identities,
            vec![SkinIdentity {
                item_class: "AK-47".into(),
                pattern: "Redline".into(),
                qualities: vec![
                    "Field-Tested".into(),
                    "Minimal Wear".into(),
                    "Well-Worn".into()
                ],
            }]
        );
    }

    #[tokio::test]
    async fn page_without_headings_is_a_name_resolution_error() {
        let err = WikiNormalizer::new()
            .unwrap()
            .normalize(RawDocument::Html("<title>Not found</title>".into()))
            .await
            .unwrap_err();
        assert_eq!(err.category(), "name_resolution");
    }

    #[test]
    fn title_split_handles_apostrophes_and_missing_separator() {
        assert_eq!(
            split_title("Desert Eagle | Hand Cannon's Blaze — Wiki"),
            Some(("Desert Eagle".into(), "Hand Cannon's Blaze".into()))
        );
        assert_eq!(split_title("Page not found"), None);
    }
}
