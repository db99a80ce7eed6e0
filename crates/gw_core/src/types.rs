use serde::{Deserialize, Serialize};

/// Sentinel returned by the headline operation when a listing page
/// yields no items.
pub const NO_HEADLINES: &str = "No headlines found";

/// Fallback title for article pages missing their title element.
pub const NO_TITLE: &str = "No title found";

/// One item on a listing page. `url` is always absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub is_main: bool,
    /// Present (and true) only when the listing shows a live indicator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_live: Option<bool>,
}

/// One dated entry on a live-coverage timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub title: String,
    /// Display string as shown on the page, not parsed.
    pub timestamp: String,
    /// Anchor fragment identifying the event on the page.
    pub event_id: String,
    pub url: String,
    pub is_timeline: bool,
}

/// A short self-contained update card on a live-coverage page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardArticle {
    pub title: String,
    /// Paragraph texts joined by single spaces.
    pub content: String,
    pub timestamp: String,
    pub url: String,
    pub is_card: bool,
}

/// Full extracted content of one article page.
///
/// Extraction failures still produce a well-formed record: `title` is
/// `"Error"`, `content` is empty and `error` carries the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDetail {
    pub title: String,
    pub content: Vec<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub url: String,
    pub error: Option<String>,
    #[serde(default)]
    pub is_live_blog: bool,
}

impl ArticleDetail {
    pub fn failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            content: Vec::new(),
            author: None,
            date: None,
            url: url.into(),
            error: Some(message.into()),
            is_live_blog: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_article_is_well_formed() {
        let article = ArticleDetail::failed("/some/path", "connection refused");
        assert_eq!(article.title, "Error");
        assert!(article.content.is_empty());
        assert_eq!(article.author, None);
        assert_eq!(article.date, None);
        assert_eq!(article.error.as_deref(), Some("connection refused"));
        assert!(!article.is_live_blog);
    }

    #[test]
    fn test_is_live_absent_when_none() {
        let headline = Headline {
            title: "Title".to_string(),
            url: "https://example.com/a".to_string(),
            is_main: false,
            is_live: None,
        };
        let json = serde_json::to_value(&headline).unwrap();
        assert!(json.get("is_live").is_none());

        let live = Headline { is_live: Some(true), ..headline };
        let json = serde_json::to_value(&live).unwrap();
        assert_eq!(json["is_live"], true);
    }
}
