//! Unpaginated option lists used to populate filter and form selects

use reqwest::Client;

use crate::auth::SessionHandle;
use crate::error::Error;
use crate::fetch::Fetch;

use super::types::{Category, City, FlatList, ServiceCategory};

/// Client for the reference lookups (categories, service categories,
/// cities) consumed as select options. Each view fetches these fresh on
/// mount; nothing is cached here.
pub struct LookupsClient {
    url: String,
    client: Client,
    session: SessionHandle,
}

impl LookupsClient {
    pub(crate) fn new(base_url: &str, client: Client, session: SessionHandle) -> Self {
        Self {
            url: base_url.to_string(),
            client,
            session,
        }
    }

    async fn fetch_flat<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let list = Fetch::get(&self.client, &format!("{}{}", self.url, path))
            .bearer_auth(self.session.token().as_deref())
            .execute::<FlatList<T>>()
            .await?;
        Ok(list.into_vec())
    }

    /// All categories, as filter/select options.
    pub async fn categories(&self) -> Result<Vec<Category>, Error> {
        self.fetch_flat("/categories").await
    }

    /// All service categories.
    pub async fn service_categories(&self) -> Result<Vec<ServiceCategory>, Error> {
        self.fetch_flat("/service-categories").await
    }

    /// All cities, for the workspace multi-select.
    pub async fn cities(&self) -> Result<Vec<City>, Error> {
        self.fetch_flat("/cities").await
    }
}
