//! Local accounts and login session

mod session;
mod store;
mod types;

pub use session::{is_authenticated, SessionManager};
pub use store::AccountStore;
pub use types::{is_valid_identifier, Account, MIN_SECRET_LEN};
