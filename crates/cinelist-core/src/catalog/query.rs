//! Catalog endpoints and request construction
//!
//! The HTTP client lives outside this crate; it asks a `CatalogQuery`
//! for the path and query string, with the API key resolved at call time.

use super::credentials::CatalogCredentials;
use super::types::DiscoverFilter;
use crate::error::Result;

/// Read-only catalog queries
#[derive(Debug, Clone)]
pub enum CatalogQuery {
    Popular { page: u32 },
    NowPlaying { page: u32 },
    TopRated { page: u32 },
    Upcoming { page: u32 },
    Discover(DiscoverFilter),
    Search { query: String, page: u32 },
    Genres,
}

/// A fully resolved catalog request
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRequest {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl CatalogQuery {
    /// Request path relative to the catalog base URL
    pub fn path(&self) -> &'static str {
        match self {
            Self::Popular { .. } => "/movie/popular",
            Self::NowPlaying { .. } => "/movie/now_playing",
            Self::TopRated { .. } => "/movie/top_rated",
            Self::Upcoming { .. } => "/movie/upcoming",
            Self::Discover(_) => "/discover/movie",
            Self::Search { .. } => "/search/movie",
            Self::Genres => "/genre/movie/list",
        }
    }

    fn own_params(&self) -> Vec<(String, String)> {
        match self {
            Self::Popular { page }
            | Self::NowPlaying { page }
            | Self::TopRated { page }
            | Self::Upcoming { page } => vec![("page".to_string(), page.to_string())],
            Self::Discover(filter) => filter.query_params(),
            Self::Search { query, page } => vec![
                ("query".to_string(), query.clone()),
                ("page".to_string(), page.to_string()),
                ("include_adult".to_string(), "false".to_string()),
            ],
            Self::Genres => Vec::new(),
        }
    }

    /// Build the request, reading the API key from `credentials` now.
    ///
    /// The key is omitted when neither an override nor a default is set.
    pub fn build(&self, credentials: &CatalogCredentials) -> Result<CatalogRequest> {
        let mut params = Vec::new();
        if let Some(api_key) = credentials.resolve()? {
            params.push(("api_key".to_string(), api_key));
        }
        params.push(("language".to_string(), credentials.language().to_string()));
        params.extend(self.own_params());

        Ok(CatalogRequest {
            url: format!("{}{}", credentials.base_url().trim_end_matches('/'), self.path()),
            params,
        })
    }
}
