//! Category resource operations

use reqwest::Client;
use serde::Serialize;

use crate::auth::SessionHandle;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::listing::ListQuery;

use super::types::{Category, Page, RecordEnvelope};

/// Payload for creating or updating a category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPayload {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Client for the `/categories` resource
pub struct CategoriesClient {
    url: String,
    client: Client,
    session: SessionHandle,
}

impl CategoriesClient {
    pub(crate) fn new(base_url: &str, client: Client, session: SessionHandle) -> Self {
        Self {
            url: format!("{}/categories", base_url),
            client,
            session,
        }
    }

    fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Fetch one page of categories.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Category>, Error> {
        Fetch::get(&self.client, &self.url)
            .bearer_auth(self.token().as_deref())
            .query_pairs(query.params())
            .execute::<Page<Category>>()
            .await
    }

    /// Create a category.
    pub async fn create(&self, payload: &CategoryPayload) -> Result<Category, Error> {
        let envelope = Fetch::post(&self.client, &self.url)
            .bearer_auth(self.token().as_deref())
            .json(payload)?
            .execute::<RecordEnvelope<Category>>()
            .await?;
        Ok(envelope.data)
    }

    /// Update a category.
    pub async fn update(&self, id: i64, payload: &CategoryPayload) -> Result<Category, Error> {
        let envelope = Fetch::put(&self.client, &format!("{}/{}", self.url, id))
            .bearer_auth(self.token().as_deref())
            .json(payload)?
            .execute::<RecordEnvelope<Category>>()
            .await?;
        Ok(envelope.data)
    }

    /// Delete a category.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        Fetch::delete(&self.client, &format!("{}/{}", self.url, id))
            .bearer_auth(self.token().as_deref())
            .execute_delete()
            .await
    }
}
