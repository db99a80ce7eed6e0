use gw_core::Config;
use gw_scrapers::NewsService;

pub struct AppState {
    pub service: NewsService,
    pub config: Config,
}
