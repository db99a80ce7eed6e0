use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use gw_core::types::NO_TITLE;
use gw_core::{ArticleDetail, Headline, Result};

use crate::fetcher::Fetcher;
use crate::sources::{utils, Scraper, Skip};

/// Gulf News extraction rules.
///
/// The site ships obfuscated class names that change per build; the
/// title selector lists every variant observed in the wild.
pub struct GulfNewsScraper {
    base_url: String,
}

impl GulfNewsScraper {
    const BASE_URL: &'static str = "https://gulfnews.com";

    const TITLE_CLASSES: &'static str = "h2.f-noZ, h2.MnKKi, h2.mEDSu, h2._2ua-h";

    pub fn new() -> Self {
        Self::with_base_url(Self::BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn extract_headlines(&self, doc: &Html) -> Vec<Headline> {
        let item_sel = Selector::parse("div.w7Q-4").unwrap();

        doc.select(&item_sel)
            .filter_map(|item| match self.headline_item(item) {
                Ok(headline) => Some(headline),
                Err(skip) => {
                    debug!(reason = %skip, "skipping Gulf News listing item");
                    None
                }
            })
            .collect()
    }

    fn headline_item(&self, item: ElementRef) -> std::result::Result<Headline, Skip> {
        let partner_sel = Selector::parse("span.YfFXu").unwrap();
        if item.select(&partner_sel).next().is_some() {
            return Err(Skip::PartnerContent);
        }

        let title_sel = Selector::parse(Self::TITLE_CLASSES).unwrap();
        let title_el = item.select(&title_sel).next().ok_or(Skip::MissingTitle)?;
        let title = utils::element_text(title_el);
        if title.is_empty() {
            return Err(Skip::MissingTitle);
        }

        let link_sel = Selector::parse("a").unwrap();
        let href = item
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or(Skip::MissingLink)?;
        let url = utils::absolutize(&self.base_url, href).map_err(|_| Skip::InvalidUrl)?;

        Ok(Headline {
            title,
            url,
            is_main: false,
            is_live: None,
        })
    }

    pub fn extract_article(&self, doc: &Html, url: &str) -> ArticleDetail {
        let title_sel = Selector::parse("h1.article-title, h1.f-noZ").unwrap();
        let title = doc
            .select(&title_sel)
            .next()
            .map(utils::element_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string());

        let p_sel = Selector::parse("div.story-element-text div.Iqx1L p").unwrap();
        let content = doc
            .select(&p_sel)
            .map(utils::element_text)
            .filter(|t| !t.is_empty())
            .collect();

        let author_sel = Selector::parse("div.Iqx1L p em").unwrap();
        let author = doc
            .select(&author_sel)
            .next()
            .map(utils::element_text)
            .filter(|t| !t.is_empty());

        let date_sel = Selector::parse("span.fPpVR").unwrap();
        let date = doc
            .select(&date_sel)
            .next()
            .map(utils::element_text)
            .filter(|t| !t.is_empty());

        ArticleDetail {
            title,
            content,
            author,
            date,
            url: url.to_string(),
            error: None,
            is_live_blog: false,
        }
    }
}

impl Default for GulfNewsScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for GulfNewsScraper {
    fn source(&self) -> &str {
        "Gulf News"
    }

    fn route(&self) -> &str {
        "gulf-news"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("gulfnews.com")
    }

    async fn headlines(&self, fetcher: &Fetcher) -> Result<Vec<Headline>> {
        let html = fetcher.fetch(&self.base_url).await?;
        let doc = Html::parse_document(&html);
        Ok(self.extract_headlines(&doc))
    }

    async fn article(&self, fetcher: &Fetcher, url: &str) -> Result<ArticleDetail> {
        let html = fetcher.fetch(url).await?;
        let doc = Html::parse_document(&html);
        Ok(self.extract_article(&doc, url))
    }
}
