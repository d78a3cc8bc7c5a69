//! Wire types for the admin API resources

use serde::Deserialize;

use crate::auth::Role;

/// Envelope returned by paginated list endpoints.
///
/// The numeric total arrives as `total` on some endpoints and
/// `recordsTotal` on others; when both are missing the page's own length
/// is the best available answer. `meta.last_page` may ride along but the
/// client derives page counts itself.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,

    #[serde(default)]
    pub total: Option<u64>,

    #[serde(rename = "recordsTotal", default)]
    pub records_total: Option<u64>,

    #[serde(default)]
    pub meta: Option<PageMeta>,
}

/// Optional metadata block on list envelopes
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub last_page: Option<u32>,
}

impl<T> Page<T> {
    /// The total record count, whichever field the endpoint used.
    pub fn total(&self) -> u64 {
        self.total
            .or(self.records_total)
            .unwrap_or(self.data.len() as u64)
    }
}

/// Lookup endpoints answer either a bare array or a `{data: [...]}` wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlatList<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> FlatList<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            FlatList::Wrapped { data } => data,
            FlatList::Bare(items) => items,
        }
    }
}

/// Envelope for single-record responses (`{data: ...}`)
#[derive(Debug, Clone, Deserialize)]
pub struct RecordEnvelope<T> {
    pub data: T,
}

/// One row of the users list
#[derive(Debug, Clone, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    #[serde(rename = "role_id")]
    pub role: Role,
    #[serde(default)]
    pub email_verified_at: Option<String>,
    #[serde(default)]
    pub last_logged_in: Option<String>,
    #[serde(default)]
    pub media: Option<String>,
    #[serde(default)]
    pub service_provider: Option<ProviderSummary>,
}

/// Flattened provider columns on a users-list row
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub service_category: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Comma-joined city names, as the server denormalizes them
    #[serde(default)]
    pub workspaces: Option<String>,
}

/// Full account record from the detail endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AccountDetail {
    pub id: i64,
    pub email: String,
    #[serde(rename = "role_id")]
    pub role: Role,
    #[serde(default)]
    pub email_verified_at: Option<String>,
    #[serde(default)]
    pub last_logged_in: Option<String>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub service_provider: Option<ProviderProfile>,
}

/// `GET /users/:id` body: the account plus the reference city list the
/// workspace picker needs.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountDocument {
    pub data: Option<AccountDetail>,
    #[serde(default)]
    pub cities: Vec<City>,
}

/// Provider-specific extension of an account
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderProfile {
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub stop_time: Option<String>,
    #[serde(default)]
    pub category: Option<NamedRef>,
    #[serde(default)]
    pub service_category: Option<NamedRef>,
    /// Derived server-side from reviews; never submitted back
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub services: Vec<ServiceItem>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub workspaces: Vec<WorkspaceAssignment>,
}

/// Id/name pair used for category references on the detail record
#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

/// One service a provider offers
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceItem {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// A certification held by a provider
#[derive(Debug, Clone, Deserialize)]
pub struct Certification {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// A past project of a provider
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Contact details attached to an account of any role
#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
}

/// Provider-to-city association
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceAssignment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub city_id: Option<i64>,
}

/// An editable category, also used as a filter option list
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub provider_count: Option<u64>,
}

/// Flat service-category reference table
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCategory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
}

/// A city ("workspace") a provider can operate in
#[derive(Debug, Clone, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub provider_count: Option<u64>,
}
