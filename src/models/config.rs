//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::services::search::PageLimits;

fn default_page_size() -> usize {
    20
}

fn max_page_size() -> usize {
    100
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the reporting binary and the search service.
pub struct AppConfig {
    pub database_url: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "max_page_size")]
    pub max_page_size: usize,
}

impl AppConfig {
    /// Page size bounds handed to [`crate::services::search`].
    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size.max(1),
        }
    }
}
