//! City ("workspace") resource operations

use std::collections::HashMap;

use reqwest::Client;

use crate::auth::SessionHandle;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::listing::ListQuery;

use super::types::{City, Page, RecordEnvelope};

/// Client for the `/cities` resource.
///
/// Cities are mostly reference data; the only write the API allows is a
/// rename, which is a narrow update rather than a whole-document replace.
pub struct CitiesClient {
    url: String,
    client: Client,
    session: SessionHandle,
}

impl CitiesClient {
    pub(crate) fn new(base_url: &str, client: Client, session: SessionHandle) -> Self {
        Self {
            url: format!("{}/cities", base_url),
            client,
            session,
        }
    }

    fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Fetch one page of cities.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<City>, Error> {
        Fetch::get(&self.client, &self.url)
            .bearer_auth(self.token().as_deref())
            .query_pairs(query.params())
            .execute::<Page<City>>()
            .await
    }

    /// Rename a city.
    pub async fn rename(&self, id: i64, name: &str) -> Result<City, Error> {
        let mut body = HashMap::new();
        body.insert("name".to_string(), name.to_string());

        let envelope = Fetch::put(&self.client, &format!("{}/{}", self.url, id))
            .bearer_auth(self.token().as_deref())
            .json(&body)?
            .execute::<RecordEnvelope<City>>()
            .await?;
        Ok(envelope.data)
    }
}
