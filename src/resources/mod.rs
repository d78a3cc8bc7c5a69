//! Typed clients for the admin API resources

mod categories;
mod cities;
mod lookups;
pub mod types;
mod users;

pub use categories::{CategoriesClient, CategoryPayload};
pub use cities::CitiesClient;
pub use lookups::LookupsClient;
pub use users::UsersClient;
