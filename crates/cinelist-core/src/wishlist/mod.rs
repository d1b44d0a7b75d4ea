//! Movie wishlist

mod store;
mod types;

pub use store::WishlistStore;
pub use types::{WishlistItem, WishlistStats};
