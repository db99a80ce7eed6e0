use std::sync::Arc;

use tracing::{error, info, warn};

use gw_core::types::NO_HEADLINES;
use gw_core::{ArticleDetail, Headline, Result};

use crate::fetcher::Fetcher;
use crate::sources::{self, utils, Scraper};

/// Orchestrates fetch + extract per operation and acts as the failure
/// boundary: nothing above this layer ever receives an error. Listing
/// failures become empty results, detail failures become error-tagged
/// records.
pub struct NewsService {
    fetcher: Fetcher,
    scrapers: Vec<Arc<dyn Scraper>>,
}

impl NewsService {
    pub fn new(fetcher: Fetcher, scrapers: Vec<Arc<dyn Scraper>>) -> Self {
        Self { fetcher, scrapers }
    }

    pub fn with_default_sources() -> Result<Self> {
        Ok(Self::new(Fetcher::new()?, sources::uae::get_scrapers()))
    }

    pub fn scrapers(&self) -> &[Arc<dyn Scraper>] {
        &self.scrapers
    }

    /// Looks a source up by its route slug, e.g. `khaleej-times`.
    pub fn by_route(&self, route: &str) -> Option<Arc<dyn Scraper>> {
        self.scrapers.iter().find(|s| s.route() == route).cloned()
    }

    pub async fn headlines(&self, route: &str) -> Vec<Headline> {
        let Some(scraper) = self.by_route(route) else {
            warn!(route = %route, "headlines requested for unknown source");
            return Vec::new();
        };
        match scraper.headlines(&self.fetcher).await {
            Ok(headlines) => {
                info!(
                    count = headlines.len(),
                    source = scraper.source(),
                    "extracted headlines"
                );
                headlines
            }
            Err(e) => {
                error!(error = %e, source = scraper.source(), "failed to fetch headlines");
                Vec::new()
            }
        }
    }

    pub async fn headline(&self, route: &str) -> String {
        self.headlines(route)
            .await
            .into_iter()
            .next()
            .map(|h| h.title)
            .unwrap_or_else(|| NO_HEADLINES.to_string())
    }

    /// Fetches and extracts one article. Relative URLs are resolved
    /// against the source's base first so callers may pass paths taken
    /// straight from a listing.
    pub async fn article(&self, route: &str, url: &str) -> ArticleDetail {
        let Some(scraper) = self.scraper_for_article(route, url) else {
            warn!(route = %route, "article requested for unknown source");
            return ArticleDetail::failed(url, format!("Unknown news source: {}", route));
        };

        let absolute = match utils::absolutize(scraper.base_url(), url) {
            Ok(absolute) => absolute,
            Err(e) => return ArticleDetail::failed(url, e.to_string()),
        };

        match scraper.article(&self.fetcher, &absolute).await {
            Ok(article) => article,
            Err(e) => {
                error!(error = %e, url = %absolute, "failed to fetch article content");
                ArticleDetail::failed(absolute, e.to_string())
            }
        }
    }

    /// Absolute article links may belong to the other site family (live
    /// pages cross-link); prefer whoever recognizes the URL, fall back
    /// to the requested route.
    fn scraper_for_article(&self, route: &str, url: &str) -> Option<Arc<dyn Scraper>> {
        self.scrapers
            .iter()
            .find(|s| s.can_handle(url))
            .cloned()
            .or_else(|| self.by_route(route))
    }
}
