use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use gw_core::types::NO_TITLE;
use gw_core::{ArticleDetail, CardArticle, Headline, Result, TimelineEvent};

use crate::fetcher::Fetcher;
use crate::sources::{utils, Scraper, Skip};

/// Khaleej Times extraction rules.
///
/// Listing items live in board-article containers on the front page;
/// live-coverage pages additionally carry a timeline and update cards,
/// handled by the auxiliary extractors below.
pub struct KhaleejTimesScraper {
    base_url: String,
}

impl KhaleejTimesScraper {
    const BASE_URL: &'static str = "https://www.khaleejtimes.com";

    pub fn new() -> Self {
        Self::with_base_url(Self::BASE_URL)
    }

    /// Base override for pointing extraction at a different origin.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn extract_headlines(&self, doc: &Html) -> Vec<Headline> {
        let item_sel =
            Selector::parse("div.row.align-items-stretch div.rendered_board_article").unwrap();

        doc.select(&item_sel)
            .filter_map(|item| match self.headline_item(item) {
                Ok(headline) => Some(headline),
                Err(skip) => {
                    debug!(reason = %skip, "skipping Khaleej Times listing item");
                    None
                }
            })
            .collect()
    }

    fn headline_item(&self, item: ElementRef) -> std::result::Result<Headline, Skip> {
        // Partner-content zones reuse the same item markup; exclude by ancestry.
        if utils::has_ancestor_class(item, "partner-content") {
            return Err(Skip::PartnerContent);
        }

        let link_sel = Selector::parse("h4 a").unwrap();
        let link = item.select(&link_sel).next().ok_or(Skip::MissingTitle)?;
        let href = link.value().attr("href").ok_or(Skip::MissingLink)?;

        if href.contains("/videos/") {
            return Err(Skip::VideoLink);
        }

        let text = utils::element_text(link);
        if text.to_lowercase().contains("partner content:") {
            return Err(Skip::PartnerContent);
        }

        // The title attribute carries the full headline when the visible
        // text is truncated or decorated with badges.
        let title = link
            .value()
            .attr("title")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or(text);
        if title.is_empty() {
            return Err(Skip::MissingTitle);
        }

        let url = utils::absolutize(&self.base_url, href).map_err(|_| Skip::InvalidUrl)?;

        let live_sel = Selector::parse("span.pulse1").unwrap();
        let is_live = item.select(&live_sel).next().is_some().then_some(true);

        Ok(Headline {
            title,
            url,
            is_main: false,
            is_live,
        })
    }

    pub fn extract_article(&self, doc: &Html, url: &str) -> ArticleDetail {
        let title_sel = Selector::parse("h1.article-title").unwrap();
        let title = doc
            .select(&title_sel)
            .next()
            .map(utils::element_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string());

        // Live blogs publish a summary list instead of running prose.
        let summary_sel = Selector::parse("div.liveBlog-summary").unwrap();
        let (content, is_live_blog) = match doc.select(&summary_sel).next() {
            Some(summary) => {
                let li_sel = Selector::parse("ul li").unwrap();
                let points = summary
                    .select(&li_sel)
                    .map(utils::element_text)
                    .filter(|t| !t.is_empty())
                    .collect();
                (points, true)
            }
            None => {
                let wrap_sel = Selector::parse("div.article-center-wrap-nf").unwrap();
                let p_sel = Selector::parse("p").unwrap();
                let paragraphs = doc
                    .select(&wrap_sel)
                    .next()
                    .map(|wrap| {
                        wrap.select(&p_sel)
                            .map(utils::element_text)
                            .filter(|t| !t.is_empty())
                            .collect()
                    })
                    .unwrap_or_default();
                (paragraphs, false)
            }
        };

        let author_sel = Selector::parse("div.details h4").unwrap();
        let author = doc
            .select(&author_sel)
            .next()
            .map(utils::element_text)
            .filter(|t| !t.is_empty());

        let date_sel = Selector::parse("time").unwrap();
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
            is_live_blog,
        }
    }

    /// Extracts the dated timeline entries of a live-coverage page.
    pub fn extract_timeline_events(&self, doc: &Html) -> Vec<TimelineEvent> {
        let card_sel = Selector::parse("div.card-box").unwrap();

        doc.select(&card_sel)
            .filter_map(|card| match self.timeline_item(card) {
                Ok(event) => Some(event),
                Err(skip) => {
                    debug!(reason = %skip, "skipping timeline event");
                    None
                }
            })
            .collect()
    }

    fn timeline_item(&self, card: ElementRef) -> std::result::Result<TimelineEvent, Skip> {
        let rows_sel = Selector::parse("div.post-title-rows").unwrap();
        let rows = card.select(&rows_sel).next().ok_or(Skip::MissingContent)?;

        let stamp_sel = Selector::parse("div.time-stmp").unwrap();
        let time_sel = Selector::parse("span.tme-evnt").unwrap();
        let date_sel = Selector::parse("span.date-evnt").unwrap();
        let timestamp = rows
            .select(&stamp_sel)
            .next()
            .and_then(|stamp| {
                let time = stamp.select(&time_sel).next().map(utils::element_text)?;
                let date = stamp.select(&date_sel).next().map(utils::element_text)?;
                Some(format!("{} {}", time, date))
            })
            .unwrap_or_default();

        let link_sel = Selector::parse("h4 a").unwrap();
        let link = rows.select(&link_sel).next().ok_or(Skip::MissingTitle)?;
        let title = utils::element_text(link);
        let event_id = link
            .value()
            .attr("href")
            .map(|href| href.trim_start_matches('#').to_string())
            .unwrap_or_default();
        let url = utils::absolutize(&self.base_url, &event_id).map_err(|_| Skip::InvalidUrl)?;

        Ok(TimelineEvent {
            title,
            timestamp,
            event_id,
            url,
            is_timeline: true,
        })
    }

    /// Extracts the short update cards of a live-coverage page.
    pub fn extract_card_articles(&self, doc: &Html) -> Vec<CardArticle> {
        let card_sel = Selector::parse("li.rcnt-evntPost").unwrap();

        doc.select(&card_sel)
            .filter_map(|card| match self.card_item(card) {
                Ok(article) => Some(article),
                Err(skip) => {
                    debug!(reason = %skip, "skipping card article");
                    None
                }
            })
            .collect()
    }

    fn card_item(&self, card: ElementRef) -> std::result::Result<CardArticle, Skip> {
        let content_sel = Selector::parse("div.evnt-content").unwrap();
        let content_div = card.select(&content_sel).next().ok_or(Skip::MissingContent)?;

        let h2_sel = Selector::parse("h2").unwrap();
        let headline = content_div.select(&h2_sel).next().ok_or(Skip::MissingTitle)?;
        let title = utils::element_text(headline);

        let link_sel = Selector::parse("h2 a").unwrap();
        let href = content_div
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or(Skip::MissingLink)?;
        let url = utils::absolutize(&self.base_url, href).map_err(|_| Skip::InvalidUrl)?;

        let p_sel = Selector::parse("div p").unwrap();
        let content = content_div
            .select(&p_sel)
            .map(utils::element_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let time_sel = Selector::parse("span.tme-evnt").unwrap();
        let timestamp = card
            .select(&time_sel)
            .next()
            .map(utils::element_text)
            .unwrap_or_default();

        Ok(CardArticle {
            title,
            content,
            timestamp,
            url,
            is_card: true,
        })
    }
}

impl Default for KhaleejTimesScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for KhaleejTimesScraper {
    fn source(&self) -> &str {
        "Khaleej Times"
    }

    fn route(&self) -> &str {
        "khaleej-times"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("khaleejtimes.com")
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

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_FIXTURE: &str = r#"
        <html><body>
        <div class="row align-items-stretch">
            <div class="rendered_board_article">
                <h4><a href="/uae/first-story" title="First story full title">First story</a></h4>
            </div>
            <div class="rendered_board_article">
                <h4><a href="/uae/live-story">Live story <span class="pulse1"></span></a></h4>
            </div>
            <div class="rendered_board_article">
                <h4><a href="/videos/some-clip" title="A video">A video</a></h4>
            </div>
            <div class="rendered_board_article">
                <h4><a href="/uae/sponsored">Partner Content: buy things</a></h4>
            </div>
            <div class="partner-content">
                <div class="rendered_board_article">
                    <h4><a href="/uae/advertorial" title="Advertorial">Advertorial</a></h4>
                </div>
            </div>
            <div class="rendered_board_article">
                <p>no title element here</p>
            </div>
            <div class="rendered_board_article">
                <h4><a href="https://www.khaleejtimes.com/world/absolute-story">Absolute story</a></h4>
            </div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_extract_headlines_skips_invalid_items() {
        let scraper = KhaleejTimesScraper::new();
        let doc = Html::parse_document(LISTING_FIXTURE);
        let headlines = scraper.extract_headlines(&doc);

        // video, partner-content title, partner-content zone and the
        // item without a title element are all dropped.
        assert_eq!(headlines.len(), 3);
        assert!(headlines.iter().all(|h| h.url.starts_with("http")));
        assert!(!headlines.iter().any(|h| h.url.contains("/videos/")));
        assert!(!headlines
            .iter()
            .any(|h| h.title.to_lowercase().contains("partner content:")));
        assert!(!headlines.iter().any(|h| h.url.contains("advertorial")));
    }

    #[test]
    fn test_one_malformed_item_does_not_abort_the_rest() {
        let mut html = String::from(r#"<div class="row align-items-stretch">"#);
        for i in 0..5 {
            html.push_str(&format!(
                r#"<div class="rendered_board_article"><h4><a href="/uae/story-{i}">Story {i}</a></h4></div>"#
            ));
        }
        html.push_str(r#"<div class="rendered_board_article"><span>no title element</span></div>"#);
        html.push_str("</div>");

        let scraper = KhaleejTimesScraper::new();
        let doc = Html::parse_document(&html);
        assert_eq!(scraper.extract_headlines(&doc).len(), 5);
    }

    #[test]
    fn test_title_attribute_preferred_over_text() {
        let scraper = KhaleejTimesScraper::new();
        let doc = Html::parse_document(LISTING_FIXTURE);
        let headlines = scraper.extract_headlines(&doc);
        assert_eq!(headlines[0].title, "First story full title");
        assert_eq!(
            headlines[0].url,
            "https://www.khaleejtimes.com/uae/first-story"
        );
    }

    #[test]
    fn test_live_marker_detection() {
        let scraper = KhaleejTimesScraper::new();
        let doc = Html::parse_document(LISTING_FIXTURE);
        let headlines = scraper.extract_headlines(&doc);

        assert_eq!(headlines[1].is_live, Some(true));
        assert_eq!(headlines[0].is_live, None);
        let json = serde_json::to_value(&headlines[0]).unwrap();
        assert!(json.get("is_live").is_none());
    }

    #[test]
    fn test_extract_regular_article() {
        let scraper = KhaleejTimesScraper::new();
        let doc = Html::parse_document(
            r#"
            <html><body>
            <h1 class="article-title">Big news today</h1>
            <div class="details"><h4>A. Reporter</h4></div>
            <time>Mon 12 May 2025, 10:15 AM</time>
            <div class="article-center-wrap-nf">
                <p>First paragraph.</p>
                <p>   </p>
                <p>Second paragraph.</p>
            </div>
            </body></html>
        "#,
        );

        let article = scraper.extract_article(&doc, "https://www.khaleejtimes.com/uae/big-news");
        assert_eq!(article.title, "Big news today");
        assert_eq!(article.content, vec!["First paragraph.", "Second paragraph."]);
        assert_eq!(article.author.as_deref(), Some("A. Reporter"));
        assert_eq!(article.date.as_deref(), Some("Mon 12 May 2025, 10:15 AM"));
        assert!(!article.is_live_blog);
        assert!(article.error.is_none());
    }

    #[test]
    fn test_live_blog_summary_wins_over_body() {
        let scraper = KhaleejTimesScraper::new();
        let doc = Html::parse_document(
            r#"
            <html><body>
            <h1 class="article-title">Rolling coverage</h1>
            <div class="liveBlog-summary">
                <ul>
                    <li>Point one</li>
                    <li>  </li>
                    <li>Point two</li>
                </ul>
            </div>
            <div class="article-center-wrap-nf">
                <p>Regular body that must be ignored.</p>
            </div>
            </body></html>
        "#,
        );

        let article = scraper.extract_article(&doc, "https://www.khaleejtimes.com/uae/live");
        assert!(article.is_live_blog);
        assert_eq!(article.content, vec!["Point one", "Point two"]);
    }

    #[test]
    fn test_missing_fields_are_none_not_empty() {
        let scraper = KhaleejTimesScraper::new();
        let doc = Html::parse_document("<html><body><p>bare page</p></body></html>");
        let article = scraper.extract_article(&doc, "https://www.khaleejtimes.com/x");

        assert_eq!(article.title, NO_TITLE);
        assert!(article.content.is_empty());
        assert_eq!(article.author, None);
        assert_eq!(article.date, None);
        assert!(article.error.is_none());
    }

    #[test]
    fn test_extract_timeline_events() {
        let scraper = KhaleejTimesScraper::new();
        let doc = Html::parse_document(
            r##"
            <html><body>
            <div class="card-box">
                <div class="post-title-rows">
                    <div class="time-stmp">
                        <span class="tme-evnt">10:15</span>
                        <span class="date-evnt">12 May</span>
                    </div>
                    <h4><a href="#event-42">Something happened</a></h4>
                </div>
            </div>
            <div class="card-box">
                <div class="post-title-rows">
                    <h4><a href="#event-43">No timestamp here</a></h4>
                </div>
            </div>
            <div class="card-box"><p>malformed, no title rows</p></div>
            </body></html>
        "##,
        );

        let events = scraper.extract_timeline_events(&doc);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "Something happened");
        assert_eq!(events[0].timestamp, "10:15 12 May");
        assert_eq!(events[0].event_id, "event-42");
        assert_eq!(events[0].url, "https://www.khaleejtimes.com/event-42");
        assert!(events[0].is_timeline);
        assert_eq!(events[1].timestamp, "");
    }

    #[test]
    fn test_extract_card_articles() {
        let scraper = KhaleejTimesScraper::new();
        let doc = Html::parse_document(
            r#"
            <html><body>
            <ul>
            <li class="rcnt-evntPost">
                <span class="tme-evnt">11:02</span>
                <div class="evnt-content">
                    <h2><a href="/uae/update-1">Update one</a></h2>
                    <div>
                        <p>First bit.</p>
                        <p></p>
                        <p>Second bit.</p>
                    </div>
                </div>
            </li>
            <li class="rcnt-evntPost"><div><p>no content div class</p></div></li>
            </ul>
            </body></html>
        "#,
        );

        let cards = scraper.extract_card_articles(&doc);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Update one");
        assert_eq!(cards[0].content, "First bit. Second bit.");
        assert_eq!(cards[0].timestamp, "11:02");
        assert_eq!(cards[0].url, "https://www.khaleejtimes.com/uae/update-1");
        assert!(cards[0].is_card);
    }

    #[tokio::test]
    async fn test_can_handle() {
        let scraper = KhaleejTimesScraper::new();
        assert!(scraper.can_handle("https://www.khaleejtimes.com/uae/article"));
        assert!(!scraper.can_handle("https://gulfnews.com/article"));
    }
}
