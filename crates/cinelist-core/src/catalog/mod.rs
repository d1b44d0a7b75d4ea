//! Movie catalog collaborator: payload types, endpoints and API key resolution

mod credentials;
mod query;
mod types;

pub use credentials::{
    ApiKeyOverride, ApiKeySource, CatalogCredentials, DisabledApiKeyOverride,
    StorageApiKeyOverride,
};
pub use query::{CatalogQuery, CatalogRequest};
pub use types::{CatalogEntry, CatalogPage, DiscoverFilter, Genre};
