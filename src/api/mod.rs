//! Endpoint builders for each Highspot resource.
//!
//! Every operation is a free function over a [`Highspot`](crate::Highspot)
//! context. Builders validate their parameters and assemble the relative
//! endpoint before any request is sent, so invalid input never reaches the
//! network.

pub mod domain;
pub mod groups;
pub mod items;
pub mod pitches;
pub mod requests;
pub mod users;

pub use groups::{GroupRight, GroupRole, GroupsQuery};
pub use items::{ItemContent, ItemsQuery};
pub use pitches::{PitchSort, PitchesQuery};
pub use users::{UserListType, UsersQuery};
