//! Wishlist item and statistics types

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;

/// Snapshot of a catalog entry saved to the wishlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    /// Catalog id
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    #[serde(rename = "vote_average")]
    pub rating: f64,
    pub release_date: String,
    pub overview: String,
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
}

impl WishlistItem {
    /// Capture `entry` as it is now
    pub fn from_entry(entry: &CatalogEntry, added_at: DateTime<Utc>) -> Self {
        Self {
            id: entry.id,
            title: entry.title.clone(),
            poster_path: entry.poster_path.clone(),
            rating: entry.vote_average,
            release_date: entry.release_date.clone(),
            overview: entry.overview.clone(),
            added_at,
        }
    }
}

/// Persisted shape, tolerant of items written before `addedAt` existed
#[derive(Debug, Deserialize)]
pub(crate) struct StoredWishlistItem {
    id: i64,
    title: String,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    release_date: String,
    #[serde(default)]
    overview: String,
    #[serde(rename = "addedAt", default)]
    added_at: Option<DateTime<Utc>>,
}

impl StoredWishlistItem {
    /// Convert, stamping `now` when `addedAt` is missing
    pub(crate) fn into_item(self, now: DateTime<Utc>) -> WishlistItem {
        WishlistItem {
            id: self.id,
            title: self.title,
            poster_path: self.poster_path,
            rating: self.vote_average,
            release_date: self.release_date,
            overview: self.overview,
            added_at: self.added_at.unwrap_or(now),
        }
    }
}

/// Derived wishlist summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistStats {
    pub total: usize,
    /// Mean rating rounded to one decimal, 0 when empty
    pub average_rating: f64,
    /// Title of the most recently added item, empty when none
    pub latest_title: String,
    /// RFC 3339 timestamp of the most recently added item, empty when none
    pub latest_added_at: String,
}

impl WishlistStats {
    pub fn compute(items: &[WishlistItem]) -> Self {
        let total = items.len();

        let average_rating = if total == 0 {
            0.0
        } else {
            let sum: f64 = items.iter().map(|item| item.rating).sum();
            ((sum / total as f64) * 10.0).round() / 10.0
        };

        let (latest_title, latest_added_at) = items
            .iter()
            .max_by_key(|item| item.added_at)
            .map(|item| {
                (
                    item.title.clone(),
                    item.added_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                )
            })
            .unwrap_or_default();

        Self {
            total,
            average_rating,
            latest_title,
            latest_added_at,
        }
    }
}
