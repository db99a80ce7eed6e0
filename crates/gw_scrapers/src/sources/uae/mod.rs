use std::sync::Arc;

use crate::sources::Scraper;

pub mod gulf_news;
pub mod khaleej_times;

pub use gulf_news::GulfNewsScraper;
pub use khaleej_times::KhaleejTimesScraper;

/// Returns a vector of all available UAE news scrapers
pub fn get_scrapers() -> Vec<Arc<dyn Scraper>> {
    vec![
        Arc::new(KhaleejTimesScraper::new()),
        Arc::new(GulfNewsScraper::new()),
    ]
}
