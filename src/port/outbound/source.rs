//! Source ports: fetchers, normalizers and the browser driver.
//!
//! A fetcher turns its locator into raw documents written to a stream; a
//! normalizer turns one raw document into zero or more output values. The
//! pipeline in [`crate::application::pipeline`] wires the two together.

use async_trait::async_trait;

use crate::error::Result;
use crate::stream::StreamWriter;

/// Opaque payload produced by a fetcher.
///
/// Only the normalizer of the same pipeline looks inside.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDocument {
    /// One decoded JSON response page.
    Json(serde_json::Value),
    /// One HTML page.
    Html(String),
    /// One listing row read from a rendered page.
    BrowserRow(BrowserListing),
}

/// Listing row as scraped from a rendered marketplace page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserListing {
    /// Text of the float-checker cell, e.g. `"Float: 0.1523\nPaint Seed: 661"`.
    pub wear_text: String,
    /// Price cell text, e.g. `"$1,234.56"` or `"Sold!"`.
    pub price_text: String,
    /// Href of the buy button.
    pub buy_link: String,
}

/// Fetch stage of a source pipeline.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Write every raw document for this fetcher's locator to `out`.
    ///
    /// Implementations do not close `out`; the pipeline does, on every exit
    /// path.
    async fn fetch(&self, out: &StreamWriter<RawDocument>) -> Result<()>;

    /// Short source name for logs and errors.
    fn source_name(&self) -> &'static str;
}

/// Normalize stage of a source pipeline.
#[async_trait]
pub trait Normalizer: Send + Sync {
    type Output: Send + 'static;

    /// Transform one document. A document may yield any number of values.
    async fn normalize(&self, document: RawDocument) -> Result<Vec<Self::Output>>;

    fn source_name(&self) -> &'static str;
}

/// Driver for a real browser session on a paginated listing page.
///
/// Driver setup (binary, extensions, cookies) is the implementor's concern.
#[async_trait]
pub trait ListingBrowser: Send + Sync {
    /// Navigate to `url` and wait for the listing table.
    async fn open(&self, url: &str) -> Result<()>;

    /// Rows on the current page.
    async fn listings(&self) -> Result<Vec<BrowserListing>>;

    /// Advance one page. Returns `false` when there is no further page.
    async fn next_page(&self) -> Result<bool>;
}
