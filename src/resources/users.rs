//! Account (user) resource operations

use reqwest::Client;

use crate::auth::SessionHandle;
use crate::editor::AccountPayload;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::listing::ListQuery;

use super::types::{AccountDetail, AccountDocument, Page, RecordEnvelope, UserRow};

/// Client for the `/users` resource
pub struct UsersClient {
    url: String,
    client: Client,
    session: SessionHandle,
}

impl UsersClient {
    pub(crate) fn new(base_url: &str, client: Client, session: SessionHandle) -> Self {
        Self {
            url: format!("{}/users", base_url),
            client,
            session,
        }
    }

    fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Fetch one page of the user list.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<UserRow>, Error> {
        Fetch::get(&self.client, &self.url)
            .bearer_auth(self.token().as_deref())
            .query_pairs(query.params())
            .execute::<Page<UserRow>>()
            .await
    }

    /// Fetch one account, plus the reference city list that rides along for
    /// the workspace picker. A missing record surfaces as `Error::NotFound`.
    pub async fn get(&self, id: i64) -> Result<AccountDocument, Error> {
        let document = Fetch::get(&self.client, &format!("{}/{}", self.url, id))
            .bearer_auth(self.token().as_deref())
            .execute::<AccountDocument>()
            .await?;
        if document.data.is_none() {
            return Err(Error::not_found(format!("user {}", id)));
        }
        Ok(document)
    }

    /// Create an account from a full form payload.
    pub async fn create(&self, payload: &AccountPayload) -> Result<AccountDetail, Error> {
        let envelope = Fetch::post(&self.client, &self.url)
            .bearer_auth(self.token().as_deref())
            .json(payload)?
            .execute::<RecordEnvelope<AccountDetail>>()
            .await?;
        Ok(envelope.data)
    }

    /// Update an account with a full form payload (whole-document replace).
    pub async fn update(&self, id: i64, payload: &AccountPayload) -> Result<AccountDetail, Error> {
        let envelope = Fetch::put(&self.client, &format!("{}/{}", self.url, id))
            .bearer_auth(self.token().as_deref())
            .json(payload)?
            .execute::<RecordEnvelope<AccountDetail>>()
            .await?;
        Ok(envelope.data)
    }

    /// Delete an account. The server answers 204 or a JSON success flag.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        Fetch::delete(&self.client, &format!("{}/{}", self.url, id))
            .bearer_auth(self.token().as_deref())
            .execute_delete()
            .await
    }
}
