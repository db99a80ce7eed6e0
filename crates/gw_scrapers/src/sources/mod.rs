use std::fmt;

use async_trait::async_trait;
use gw_core::{ArticleDetail, Headline, Result};

use crate::fetcher::Fetcher;

pub mod uae;

/// Why one listing item was left out of the result. Extraction of a
/// single item either yields a record or one of these; the caller logs
/// the reason and moves on, so a malformed item never aborts the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    MissingTitle,
    MissingLink,
    MissingContent,
    InvalidUrl,
    VideoLink,
    PartnerContent,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::MissingTitle => write!(f, "missing title element"),
            Skip::MissingLink => write!(f, "missing link"),
            Skip::MissingContent => write!(f, "missing content container"),
            Skip::InvalidUrl => write!(f, "unparseable link URL"),
            Skip::VideoLink => write!(f, "video link"),
            Skip::PartnerContent => write!(f, "partner content"),
        }
    }
}

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Human-readable name of the news source
    fn source(&self) -> &str;

    /// URL path segment this source is served under
    fn route(&self) -> &str;

    /// Origin used to resolve relative links found on this site
    fn base_url(&self) -> &str;

    /// Returns true if this scraper can handle the given URL
    fn can_handle(&self, url: &str) -> bool;

    /// Fetches the listing page and extracts its headlines
    async fn headlines(&self, fetcher: &Fetcher) -> Result<Vec<Headline>>;

    /// Fetches one article page and extracts its content
    async fn article(&self, fetcher: &Fetcher, url: &str) -> Result<ArticleDetail>;
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use gw_core::{Error, Result};
    use scraper::ElementRef;
    use url::Url;

    /// Resolves an href against the site origin. Already-absolute URLs
    /// pass through untouched.
    pub fn absolutize(base: &str, href: &str) -> Result<String> {
        if href.starts_with("http") {
            return Ok(href.to_string());
        }
        let base = Url::parse(base)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", base, e)))?;
        let joined = base
            .join(href)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", href, e)))?;
        Ok(joined.to_string())
    }

    /// Collects an element's text with whitespace collapsed and trimmed.
    pub fn element_text(el: ElementRef) -> String {
        el.text()
            .collect::<Vec<_>>()
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// True if any ancestor element carries the given class.
    pub fn has_ancestor_class(el: ElementRef, class: &str) -> bool {
        el.ancestors()
            .filter_map(ElementRef::wrap)
            .any(|a| a.value().classes().any(|c| c == class))
    }
}
