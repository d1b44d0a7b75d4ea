//! Catalog payload types
//!
//! Shapes returned by the movie catalog API. The wishlist snapshots
//! entries of this type.

use serde::{Deserialize, Serialize};

/// A movie as listed by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_ids: Option<Vec<i64>>,
}

/// One page of catalog results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    pub page: i64,
    pub results: Vec<CatalogEntry>,
    pub total_pages: i64,
    pub total_results: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Filters for the discover endpoint. Unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoverFilter {
    pub with_genres: Option<String>,
    pub sort_by: Option<String>,
    #[serde(rename = "vote_average.gte")]
    pub vote_average_gte: Option<f64>,
    #[serde(rename = "vote_average.lte")]
    pub vote_average_lte: Option<f64>,
    pub with_original_language: Option<String>,
    pub year: Option<i32>,
    pub page: Option<u32>,
}

impl DiscoverFilter {
    /// Query parameters for the filters that are set
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(genres) = &self.with_genres {
            params.push(("with_genres".to_string(), genres.clone()));
        }
        if let Some(sort_by) = &self.sort_by {
            params.push(("sort_by".to_string(), sort_by.clone()));
        }
        if let Some(gte) = self.vote_average_gte {
            params.push(("vote_average.gte".to_string(), gte.to_string()));
        }
        if let Some(lte) = self.vote_average_lte {
            params.push(("vote_average.lte".to_string(), lte.to_string()));
        }
        if let Some(language) = &self.with_original_language {
            params.push(("with_original_language".to_string(), language.clone()));
        }
        if let Some(year) = self.year {
            params.push(("year".to_string(), year.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }

        params
    }
}
