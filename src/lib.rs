//! # highspot
//!
//! Blocking client for the Highspot REST API.
//!
//! ```no_run
//! use highspot::{Highspot, api::users};
//!
//! # fn main() -> highspot::Result<()> {
//! let hs = Highspot::new(Some("api-key"), Some("api-secret"))?;
//! let me = users::me(&hs)?;
//! println!("{}", me["email"]);
//!
//! let query = users::UsersQuery {
//!     list_type: Some("verified".to_string()),
//!     ..Default::default()
//! };
//! let verified = users::get_users(&hs, &query)?;
//! # let _ = verified;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod query;
pub mod version;

pub use client::{Highspot, HighspotBuilder, Response};
pub use error::{HighspotError, MissingAuth, Result};
