pub mod fetcher;
pub mod service;
pub mod sources;

pub use fetcher::Fetcher;
pub use service::NewsService;
pub use sources::Scraper;

pub mod prelude {
    pub use crate::sources::Scraper;
    pub use gw_core::{ArticleDetail, Error, Headline, Result};
}
